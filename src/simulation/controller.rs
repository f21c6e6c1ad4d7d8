//! Adaptive green-time controller
//!
//! Blends a decision-table lookup with hand-tuned congestion overrides to
//! produce the next green-time budget. The eleven adjustment steps run in a
//! fixed order; later steps may override earlier ones, and the result is
//! always clamped into the valid range for the decision.

use log::debug;
use rand::Rng;

use super::policy::{best_action, PolicyAction, PolicyTable};

/// Lower bound for the green-time budget, in seconds.
pub const MIN_GREEN: f32 = 3.0;
/// Green-time budget at construction.
pub const INITIAL_GREEN: f32 = 5.0;

/// Base green-time cap under light traffic.
pub const BASE_GREEN_CAP: f32 = 5.0;
/// Cap once either queue reaches [`HIGH_CONGESTION`].
pub const HIGH_GREEN_CAP: f32 = 6.0;
/// Cap once either queue reaches [`EXTREME_CONGESTION`].
pub const EXTREME_GREEN_CAP: f32 = 8.0;

/// Queue length treated as high congestion.
pub const HIGH_CONGESTION: u32 = 6;
/// Queue length treated as extreme congestion.
pub const EXTREME_CONGESTION: u32 = 9;
/// Below this on both axes traffic counts as light.
pub const LOW_TRAFFIC: u32 = 3;

/// Smoothing factor for the diagnostic queue EMAs.
const EMA_ALPHA: f32 = 0.8;

/// Observability record emitted by every decision.
#[derive(Debug, Clone, Copy)]
pub struct DecisionRecord {
    /// Queue-state key the decision was made for.
    pub state: (u32, u32),
    /// Action finally applied, after any override.
    pub action: PolicyAction,
    /// Whether the action came from random exploration rather than the table.
    pub explored: bool,
    /// EMA-smoothed queue state, rounded. Diagnostic only.
    pub smoothed: (i32, i32),
    /// Reward for the previous cycle. Diagnostic only, never fed back.
    pub reward: f64,
    /// Green-time budget after all adjustments.
    pub green_time: f32,
}

/// Controller state persisted across decisions.
#[derive(Debug, Clone)]
pub struct GreenTimeController {
    green_time: f32,
    min_green: f32,
    ema_queue_ns: Option<f32>,
    ema_queue_ew: Option<f32>,
    spawn_interval_changed: bool,
}

impl GreenTimeController {
    pub fn new() -> Self {
        Self {
            green_time: INITIAL_GREEN,
            min_green: MIN_GREEN,
            ema_queue_ns: None,
            ema_queue_ew: None,
            spawn_interval_changed: false,
        }
    }

    /// The green-time budget both axes currently share.
    pub fn green_time(&self) -> f32 {
        self.green_time
    }

    pub fn min_green(&self) -> f32 {
        self.min_green
    }

    /// Raise the one-shot flag consumed by the next decision.
    pub fn note_spawn_interval_changed(&mut self) {
        self.spawn_interval_changed = true;
    }

    /// Green-time cap for the given congestion level.
    ///
    /// Extreme congestion overrides high, so the checks run in that order.
    pub fn congestion_cap(queue_ns: u32, queue_ew: u32) -> f32 {
        if queue_ns >= EXTREME_CONGESTION || queue_ew >= EXTREME_CONGESTION {
            EXTREME_GREEN_CAP
        } else if queue_ns >= HIGH_CONGESTION || queue_ew >= HIGH_CONGESTION {
            HIGH_GREEN_CAP
        } else {
            BASE_GREEN_CAP
        }
    }

    /// Produce the next green-time budget from the measured queues.
    ///
    /// `prev_queue_ns`/`prev_queue_ew` are the queues from the previous
    /// decision point. A missing table entry is never fatal; it degrades to
    /// random exploration over the non-hold actions.
    pub fn decide(
        &mut self,
        policy: &PolicyTable,
        queue_ns: u32,
        queue_ew: u32,
        prev_queue_ns: u32,
        prev_queue_ew: u32,
        rng: &mut impl Rng,
    ) -> DecisionRecord {
        // Step 1: table lookup, falling back to exploration on a miss.
        let (mut action, explored) = match policy.lookup(queue_ns, queue_ew) {
            Some(scores) => (best_action(scores), false),
            None => {
                debug!(
                    "no table entry for state {}; exploring",
                    PolicyTable::key(queue_ns, queue_ew)
                );
                (explore(rng), true)
            }
        };

        // Step 2: diagnostic queue smoothing, seeded from the first
        // previous-queue snapshot.
        let ema_ns = self.ema_queue_ns.get_or_insert(prev_queue_ns as f32);
        *ema_ns = EMA_ALPHA * queue_ns as f32 + (1.0 - EMA_ALPHA) * *ema_ns;
        let smoothed_ns = ema_ns.round() as i32;
        let ema_ew = self.ema_queue_ew.get_or_insert(prev_queue_ew as f32);
        *ema_ew = EMA_ALPHA * queue_ew as f32 + (1.0 - EMA_ALPHA) * *ema_ew;
        let smoothed_ew = ema_ew.round() as i32;

        // Step 3: diagnostic reward for the cycle that just ended.
        let reduction =
            (prev_queue_ns + prev_queue_ew) as i32 - (queue_ns + queue_ew) as i32;
        let reward = if reduction > 0 {
            5.0 * f64::from(reduction).powf(1.5)
        } else {
            -1.5
        };

        // Step 4: congestion cap for this decision.
        let cap = Self::congestion_cap(queue_ns, queue_ew);

        // Step 5: reconcile the carried budget with the new cap.
        if self.green_time < cap {
            self.green_time = cap;
        } else {
            self.green_time = self.green_time.clamp(self.min_green, cap);
        }

        // Step 6: never hold while high congestion is worsening.
        if action == PolicyAction::Hold
            && (queue_ns >= HIGH_CONGESTION || queue_ew >= HIGH_CONGESTION)
            && (queue_ns > prev_queue_ns || queue_ew > prev_queue_ew)
        {
            action = explore(rng);
            debug!("congestion worsening under hold; overriding to {:?}", action);
        }

        // Step 7: a spawn-interval change forces an immediate jump to the cap.
        if self.spawn_interval_changed {
            self.green_time = Self::congestion_cap(queue_ns, queue_ew);
            self.spawn_interval_changed = false;
        }

        // Step 8: mid-cycle nudge toward the cap.
        if self.green_time < cap {
            self.green_time = (self.green_time + 1.0).min(cap);
        }

        // Step 9: congestion heuristic.
        if queue_ns >= HIGH_CONGESTION || queue_ew >= HIGH_CONGESTION {
            self.green_time = (self.green_time + 1.0).min(cap);
        } else if queue_ns < LOW_TRAFFIC && queue_ew < LOW_TRAFFIC {
            self.green_time = (self.green_time - 1.0).max(self.min_green + 1.0);
        }

        // Step 10: apply the policy action.
        match action {
            PolicyAction::Extend => self.green_time += 1.0,
            PolicyAction::Shorten => self.green_time -= 1.0,
            PolicyAction::Hold => {}
        }

        // Step 11: final clamp.
        self.green_time = self.green_time.clamp(self.min_green, cap);

        DecisionRecord {
            state: (queue_ns, queue_ew),
            action,
            explored,
            smoothed: (smoothed_ns, smoothed_ew),
            reward,
            green_time: self.green_time,
        }
    }
}

impl Default for GreenTimeController {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform choice over the non-hold actions.
fn explore(rng: &mut impl Rng) -> PolicyAction {
    if rng.random_range(0..2) == 0 {
        PolicyAction::Extend
    } else {
        PolicyAction::Shorten
    }
}
