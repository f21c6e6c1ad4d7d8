//! Stop-line policy
//!
//! Decides whether a vehicle must hold at the intersection, and latches
//! vehicles released on green so they are never force-stopped again.

use super::light::{LightBank, LightState};
use super::types::{Approach, STALL_FORCE_QUEUE_SECS};
use super::vehicle::Vehicle;

/// Southbound traffic holds once y exceeds this.
pub const SOUTHBOUND_STOP_Y: f32 = 150.0;
/// Northbound traffic holds once y drops below this.
pub const NORTHBOUND_STOP_Y: f32 = 450.0;
/// Eastbound traffic holds once x exceeds this.
pub const EASTBOUND_STOP_X: f32 = 300.0;
/// Westbound traffic holds once x drops below this.
pub const WESTBOUND_STOP_X: f32 = 605.0;

/// Whether the stop-line policy forces this vehicle to hold.
///
/// A vehicle already released past the stop line is never force-stopped
/// again. A vehicle stalled for 2 seconds is force-queued regardless of its
/// light, which catches vehicles wedged behind a blocked lane. Otherwise a
/// vehicle past its approach threshold holds on red or yellow; on green it
/// is released and permanently latched.
pub fn must_stop(vehicle: &mut Vehicle, lights: &LightBank) -> bool {
    if vehicle.has_passed_stop_line() {
        return false;
    }
    if vehicle.stopped_time >= STALL_FORCE_QUEUE_SECS {
        return true;
    }
    if !at_stop_line(vehicle) {
        return false;
    }
    match lights.governing(vehicle.approach) {
        LightState::Red | LightState::Yellow => true,
        LightState::Green => {
            vehicle.mark_passed_stop_line();
            false
        }
    }
}

/// Whether the vehicle has reached its approach's stop threshold.
fn at_stop_line(vehicle: &Vehicle) -> bool {
    let pos = vehicle.position;
    match vehicle.approach {
        Approach::Southbound => pos.y > SOUTHBOUND_STOP_Y,
        Approach::Northbound => pos.y < NORTHBOUND_STOP_Y,
        Approach::Eastbound => pos.x > EASTBOUND_STOP_X,
        Approach::Westbound => pos.x < WESTBOUND_STOP_X,
    }
}
