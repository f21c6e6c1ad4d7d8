//! Main simulation world that ties everything together
//!
//! Owns every piece of mutable state and sequences one tick: phase advance,
//! the decision point at each yellow-to-green boundary, then vehicle spawn,
//! stop-line checks, car-following motion, stall tracking, and removal.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::controller::GreenTimeController;
use super::light::LightBank;
use super::phase::{Phase, PhaseChange, PhaseMachine};
use super::policy::PolicyTable;
use super::queue;
use super::stopline;
use super::types::{
    Approach, Axis, VehicleKind, MIN_FOLLOWING_DISTANCE, VEHICLE_SPEED,
};
use super::vehicle::Vehicle;

/// Default seconds between vehicle spawns.
pub const DEFAULT_SPAWN_INTERVAL: f32 = 1.0;

/// The simulated four-way intersection.
pub struct SimWorld {
    /// All active vehicles. Removed by compaction when they leave the area.
    pub vehicles: Vec<Vehicle>,

    lights: LightBank,
    machine: PhaseMachine,
    controller: GreenTimeController,
    policy: PolicyTable,

    queue_ns: u32,
    queue_ew: u32,

    spawn_timer: f32,
    spawn_interval: f32,

    /// Simulation time in seconds.
    pub time: f32,

    rng: StdRng,
}

impl SimWorld {
    fn new_internal(policy: PolicyTable, rng: StdRng) -> Self {
        Self {
            vehicles: Vec::new(),
            lights: LightBank::new(),
            machine: PhaseMachine::new(),
            controller: GreenTimeController::new(),
            policy,
            queue_ns: 0,
            queue_ew: 0,
            spawn_timer: 0.0,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            time: 0.0,
            rng,
        }
    }

    pub fn new(policy: PolicyTable) -> Self {
        Self::new_internal(policy, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create a world with a seeded RNG for reproducible simulations.
    pub fn with_seed(policy: PolicyTable, seed: u64) -> Self {
        Self::new_internal(policy, StdRng::seed_from_u64(seed))
    }

    /// Main simulation tick.
    pub fn tick(&mut self, dt: f32) {
        self.time += dt;
        self.advance_signals(dt);

        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval {
            self.spawn_vehicle();
            self.spawn_timer = 0.0;
        }

        self.move_vehicles(dt);

        for vehicle in &mut self.vehicles {
            vehicle.track_stall(dt);
        }

        self.vehicles.retain(|v| v.in_bounds());
    }

    /// Advance the phase machine and run the decision point when a yellow
    /// segment expires. Queues are measured with the outgoing lights still
    /// in place, so they reflect vehicle state as of the end of the
    /// previous tick.
    fn advance_signals(&mut self, dt: f32) {
        match self.machine.advance(dt, self.controller.green_time()) {
            Some(PhaseChange::BeginYellow(axis)) => self.lights.begin_yellow(axis),
            Some(PhaseChange::BeginGreen(axis)) => {
                let prev_ns = self.queue_ns;
                let prev_ew = self.queue_ew;
                let (ns, ew) = queue::measure_queues(&mut self.vehicles, &self.lights);
                self.queue_ns = ns;
                self.queue_ew = ew;
                debug!("queues at decision: ns={} ew={}", ns, ew);

                let record =
                    self.controller
                        .decide(&self.policy, ns, ew, prev_ns, prev_ew, &mut self.rng);
                info!(
                    "decision for state {}: action={:?}{} reward={:.2} green_time={:.1}",
                    PolicyTable::key(record.state.0, record.state.1),
                    record.action,
                    if record.explored { " (explored)" } else { "" },
                    record.reward,
                    record.green_time,
                );
                debug!(
                    "smoothed state: ({}, {})",
                    record.smoothed.0, record.smoothed.1
                );

                self.lights.begin_green(axis);
            }
            None => {}
        }
    }

    /// Create one vehicle at a uniformly chosen entry point.
    fn spawn_vehicle(&mut self) {
        let approach = Approach::ALL[self.rng.random_range(0..Approach::ALL.len())];
        let kind = VehicleKind::ALL[self.rng.random_range(0..VehicleKind::ALL.len())];
        self.vehicles
            .push(Vehicle::new(approach.entry_point(), kind, approach));
    }

    /// Car-following pass: within each lane, front to back, a vehicle may
    /// advance only if the stop-line policy permits it and the gap to the
    /// vehicle ahead is at least the minimum following distance.
    fn move_vehicles(&mut self, dt: f32) {
        for approach in Approach::ALL {
            let lane = queue::lane_front_to_back(&self.vehicles, approach);
            let mut ahead: Option<f32> = None;
            for i in lane {
                let mut can_move = !stopline::must_stop(&mut self.vehicles[i], &self.lights);

                let along = match approach.axis() {
                    Axis::NorthSouth => self.vehicles[i].position.y,
                    Axis::EastWest => self.vehicles[i].position.x,
                };
                if let Some(front) = ahead {
                    if (front - along).abs() < MIN_FOLLOWING_DISTANCE {
                        can_move = false;
                    }
                }

                if can_move {
                    self.vehicles[i].advance(dt, VEHICLE_SPEED);
                } else {
                    self.vehicles[i].halt();
                }

                ahead = Some(match approach.axis() {
                    Axis::NorthSouth => self.vehicles[i].position.y,
                    Axis::EastWest => self.vehicles[i].position.x,
                });
            }
        }
    }

    /// Change the spawn interval, the only externally mutable parameter.
    /// A genuine change raises the controller's one-shot flag.
    pub fn set_spawn_interval(&mut self, interval: f32) {
        if interval != self.spawn_interval {
            self.spawn_interval = interval;
            self.controller.note_spawn_interval_changed();
        }
    }

    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Queue lengths from the most recent decision point.
    pub fn queue_lengths(&self) -> (u32, u32) {
        (self.queue_ns, self.queue_ew)
    }

    pub fn current_green_time(&self) -> f32 {
        self.controller.green_time()
    }

    pub fn min_green(&self) -> f32 {
        self.controller.min_green()
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn lights(&self) -> &LightBank {
        &self.lights
    }

    /// Print a summary of the world state.
    pub fn print_summary(&self) {
        println!("=== Intersection Summary ===");
        println!("Time: {:.2}s", self.time);
        println!(
            "Phase: {:?}, green budget: {:.1}s",
            self.machine.phase(),
            self.controller.green_time()
        );
        println!(
            "Queues: NS={}, EW={} (as of last decision)",
            self.queue_ns, self.queue_ew
        );
        println!(
            "Lights: TL={:?} TR={:?} BL={:?} BR={:?}",
            self.lights.top_left, self.lights.top_right, self.lights.bottom_left,
            self.lights.bottom_right
        );
        println!("Vehicles on road: {}", self.vehicles.len());
        for vehicle in &self.vehicles {
            println!(
                "  {:?} {:?} at ({:.0}, {:.0}) speed={:.0}",
                vehicle.kind, vehicle.approach, vehicle.position.x, vehicle.position.y,
                vehicle.speed
            );
        }
    }
}
