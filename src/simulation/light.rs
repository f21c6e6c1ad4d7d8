//! Physical light states for the four corners of the intersection
//!
//! Lights never drive themselves; the phase machine is the only writer.

use super::types::{Approach, Axis};

/// State of a single physical light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightState {
    Red,
    Yellow,
    Green,
}

/// The four lights of the intersection.
///
/// The left pair governs north-south traffic, the right pair east-west.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightBank {
    pub top_left: LightState,
    pub top_right: LightState,
    pub bottom_left: LightState,
    pub bottom_right: LightState,
}

impl LightBank {
    /// Initial configuration: north-south green, east-west red.
    pub fn new() -> Self {
        Self {
            top_left: LightState::Green,
            bottom_left: LightState::Green,
            top_right: LightState::Red,
            bottom_right: LightState::Red,
        }
    }

    /// The light a vehicle on the given approach obeys.
    pub fn governing(&self, approach: Approach) -> LightState {
        match approach {
            Approach::Southbound => self.top_left,
            Approach::Northbound => self.bottom_left,
            Approach::Eastbound => self.top_right,
            Approach::Westbound => self.bottom_right,
        }
    }

    /// Set one axis green and the other red.
    pub fn begin_green(&mut self, axis: Axis) {
        self.set_axis(axis, LightState::Green);
        self.set_axis(other(axis), LightState::Red);
    }

    /// Set one axis yellow; the other axis stays red.
    pub fn begin_yellow(&mut self, axis: Axis) {
        self.set_axis(axis, LightState::Yellow);
        self.set_axis(other(axis), LightState::Red);
    }

    fn set_axis(&mut self, axis: Axis, state: LightState) {
        match axis {
            Axis::NorthSouth => {
                self.top_left = state;
                self.bottom_left = state;
            }
            Axis::EastWest => {
                self.top_right = state;
                self.bottom_right = state;
            }
        }
    }
}

impl Default for LightBank {
    fn default() -> Self {
        Self::new()
    }
}

fn other(axis: Axis) -> Axis {
    match axis {
        Axis::NorthSouth => Axis::EastWest,
        Axis::EastWest => Axis::NorthSouth,
    }
}
