//! Vehicle value type and per-tick kinematics
//!
//! Vehicles are plain values owned by the world; there is no external
//! ownership or identity beyond their slot in the collection.

use super::types::{
    Approach, Position, VehicleKind, STALL_EPSILON, VEHICLE_SPEED, WORLD_MAX_X, WORLD_MAX_Y,
    WORLD_MIN_X, WORLD_MIN_Y,
};

/// A single vehicle travelling along one approach.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub position: Position,
    pub approach: Approach,
    pub kind: VehicleKind,
    /// Instantaneous speed: the shared constant while moving, 0 when held.
    pub speed: f32,
    /// Seconds spent without meaningful displacement.
    pub stopped_time: f32,
    last_position: Position,
    passed_stop_line: bool,
}

impl Vehicle {
    pub fn new(position: Position, kind: VehicleKind, approach: Approach) -> Self {
        Self {
            position,
            approach,
            kind,
            speed: VEHICLE_SPEED,
            stopped_time: 0.0,
            last_position: position,
            passed_stop_line: false,
        }
    }

    /// Move along the approach axis at `speed` for `dt` seconds.
    pub fn advance(&mut self, dt: f32, speed: f32) {
        let (dx, dy) = match self.approach {
            Approach::Eastbound => (speed, 0.0),
            Approach::Westbound => (-speed, 0.0),
            Approach::Southbound => (0.0, speed),
            Approach::Northbound => (0.0, -speed),
        };
        self.position.x += dx * dt;
        self.position.y += dy * dt;
        self.speed = speed;
    }

    /// Mark the vehicle as held in place for this tick.
    pub fn halt(&mut self) {
        self.speed = 0.0;
    }

    /// Accumulate stall time from the displacement since the last tick.
    ///
    /// Runs for every vehicle every tick, moved or not, so vehicles held by
    /// the stop line or by the car ahead build up `stopped_time`.
    pub fn track_stall(&mut self, dt: f32) {
        let displacement = self.position.distance(&self.last_position);
        if displacement < STALL_EPSILON {
            self.stopped_time += dt;
        } else {
            self.stopped_time = 0.0;
        }
        self.last_position = self.position;
    }

    /// Whether the vehicle has been released past the stop line.
    ///
    /// This is a monotonic latch: once set it is never cleared for the
    /// lifetime of the vehicle.
    pub fn has_passed_stop_line(&self) -> bool {
        self.passed_stop_line
    }

    /// Latch the vehicle as released past the stop line.
    pub fn mark_passed_stop_line(&mut self) {
        self.passed_stop_line = true;
    }

    /// True while the vehicle is inside the bounded simulation area.
    pub fn in_bounds(&self) -> bool {
        self.position.x >= WORLD_MIN_X
            && self.position.x <= WORLD_MAX_X
            && self.position.y >= WORLD_MIN_Y
            && self.position.y <= WORLD_MAX_Y
    }
}
