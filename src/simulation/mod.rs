//! Standalone intersection simulation module
//!
//! Contains all the core signal and vehicle-flow logic. It runs headless,
//! driven by an external tick source, and exposes a read-only observation
//! surface for rendering or HUD layers.

mod controller;
mod light;
mod phase;
mod policy;
mod queue;
mod stopline;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use controller::{
    DecisionRecord, GreenTimeController, BASE_GREEN_CAP, EXTREME_CONGESTION, EXTREME_GREEN_CAP,
    HIGH_CONGESTION, HIGH_GREEN_CAP, INITIAL_GREEN, LOW_TRAFFIC, MIN_GREEN,
};
#[allow(unused_imports)]
pub use light::{LightBank, LightState};
#[allow(unused_imports)]
pub use phase::{Phase, PhaseChange, PhaseMachine, YELLOW_TIME};
#[allow(unused_imports)]
pub use policy::{best_action, PolicyAction, PolicyTable, ACTION_COUNT};
#[allow(unused_imports)]
pub use queue::{lane_front_to_back, measure_queues};
#[allow(unused_imports)]
pub use stopline::{
    must_stop, EASTBOUND_STOP_X, NORTHBOUND_STOP_Y, SOUTHBOUND_STOP_Y, WESTBOUND_STOP_X,
};
#[allow(unused_imports)]
pub use types::{
    Approach, Axis, Position, VehicleKind, LOW_SPEED_THRESHOLD, MIN_FOLLOWING_DISTANCE,
    STALL_EPSILON, STALL_FORCE_QUEUE_SECS, VEHICLE_SPEED, WORLD_MAX_X, WORLD_MAX_Y, WORLD_MIN_X,
    WORLD_MIN_Y,
};
#[allow(unused_imports)]
pub use vehicle::Vehicle;
pub use world::{SimWorld, DEFAULT_SPAWN_INTERVAL};
