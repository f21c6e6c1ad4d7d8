//! Signal phase state machine
//!
//! Drives the strictly cyclic NS green / NS yellow / EW green / EW yellow
//! sequence. Green duration is whatever the controller's budget held when
//! the green segment began; yellow duration is constant.

use super::types::Axis;

/// Duration of every yellow segment, in seconds.
pub const YELLOW_TIME: f32 = 2.0;

/// Which axis currently has right-of-way, and in what color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NsGreen,
    NsYellow,
    EwGreen,
    EwYellow,
}

impl Phase {
    pub fn axis(&self) -> Axis {
        match self {
            Phase::NsGreen | Phase::NsYellow => Axis::NorthSouth,
            Phase::EwGreen | Phase::EwYellow => Axis::EastWest,
        }
    }
}

/// A transition reported by [`PhaseMachine::advance`].
///
/// `BeginGreen` is the decision point: the caller measures queues and runs
/// the controller before switching the lights for the new phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseChange {
    BeginYellow(Axis),
    BeginGreen(Axis),
}

#[derive(Debug, Clone)]
pub struct PhaseMachine {
    phase: Phase,
    timer: f32,
    yellow_time: f32,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            phase: Phase::NsGreen,
            timer: 0.0,
            yellow_time: YELLOW_TIME,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn yellow_time(&self) -> f32 {
        self.yellow_time
    }

    /// Advance the phase timer by `dt` against the active green budget.
    ///
    /// At most one transition fires per tick. The timer resets to zero on
    /// every transition, so each segment is timed from its own start.
    pub fn advance(&mut self, dt: f32, green_time: f32) -> Option<PhaseChange> {
        self.timer += dt;
        let change = match self.phase {
            Phase::NsGreen if self.timer >= green_time => {
                self.phase = Phase::NsYellow;
                Some(PhaseChange::BeginYellow(Axis::NorthSouth))
            }
            Phase::NsYellow if self.timer >= self.yellow_time => {
                self.phase = Phase::EwGreen;
                Some(PhaseChange::BeginGreen(Axis::EastWest))
            }
            Phase::EwGreen if self.timer >= green_time => {
                self.phase = Phase::EwYellow;
                Some(PhaseChange::BeginYellow(Axis::EastWest))
            }
            Phase::EwYellow if self.timer >= self.yellow_time => {
                self.phase = Phase::NsGreen;
                Some(PhaseChange::BeginGreen(Axis::NorthSouth))
            }
            _ => None,
        };
        if change.is_some() {
            self.timer = 0.0;
        }
        change
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}
