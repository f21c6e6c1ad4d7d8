//! Core types for the intersection simulation
//!
//! Standalone value types shared by the signal logic and the vehicle model.

/// A 2D position in the simulation plane.
///
/// The y axis points down: southbound traffic moves toward larger y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Which axis of the intersection a lane belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    NorthSouth,
    EastWest,
}

/// One of the four directional streams entering the intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Approach {
    /// Enters from the north edge, moving toward larger y.
    Southbound,
    /// Enters from the south edge, moving toward smaller y.
    Northbound,
    /// Enters from the west edge, moving toward larger x.
    Eastbound,
    /// Enters from the east edge, moving toward smaller x.
    Westbound,
}

impl Approach {
    pub const ALL: [Approach; 4] = [
        Approach::Southbound,
        Approach::Northbound,
        Approach::Eastbound,
        Approach::Westbound,
    ];

    pub fn axis(&self) -> Axis {
        match self {
            Approach::Southbound | Approach::Northbound => Axis::NorthSouth,
            Approach::Eastbound | Approach::Westbound => Axis::EastWest,
        }
    }

    /// Fixed entry point where vehicles on this approach appear.
    pub fn entry_point(&self) -> Position {
        match self {
            Approach::Southbound => Position::new(390.0, WORLD_MIN_Y),
            Approach::Northbound => Position::new(500.0, WORLD_MAX_Y),
            Approach::Eastbound => Position::new(WORLD_MIN_X, 250.0),
            Approach::Westbound => Position::new(WORLD_MAX_X, 350.0),
        }
    }
}

/// Vehicle category. Affects only display, never physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleKind {
    Sedan,
    Taxi,
    Ambulance,
    Hatchback,
    MiniTruck,
    Bus,
    Sports,
    Truck,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 8] = [
        VehicleKind::Sedan,
        VehicleKind::Taxi,
        VehicleKind::Ambulance,
        VehicleKind::Hatchback,
        VehicleKind::MiniTruck,
        VehicleKind::Bus,
        VehicleKind::Sports,
        VehicleKind::Truck,
    ];
}

/// Simulation area bounds. Vehicles outside these are removed.
pub const WORLD_MIN_X: f32 = -50.0;
pub const WORLD_MAX_X: f32 = 950.0;
pub const WORLD_MIN_Y: f32 = -50.0;
pub const WORLD_MAX_Y: f32 = 650.0;

/// Speed shared by every moving vehicle, in world units per second.
pub const VEHICLE_SPEED: f32 = 120.0;

/// Minimum gap to the vehicle ahead before a vehicle may advance.
pub const MIN_FOLLOWING_DISTANCE: f32 = 80.0;

/// Below this instantaneous speed a vehicle counts as queued.
pub const LOW_SPEED_THRESHOLD: f32 = 5.0;

/// Displacement per tick under this counts as a stall.
pub const STALL_EPSILON: f32 = 0.1;

/// A vehicle stalled this long is force-queued regardless of its light.
pub const STALL_FORCE_QUEUE_SECS: f32 = 2.0;
