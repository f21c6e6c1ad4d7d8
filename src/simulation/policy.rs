//! Static decision table mapping queue states to action scores
//!
//! Loaded once before the simulation starts and read-only afterwards. The
//! core only ever performs lookups; a missing entry is not an error, it
//! degrades to exploration in the controller.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use ordered_float::OrderedFloat;

/// Number of scores per table entry, one per action.
pub const ACTION_COUNT: usize = 3;

/// Green-time adjustment chosen by a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyAction {
    /// Index 0: keep the current green time.
    Hold,
    /// Index 1: lengthen the green time by one second.
    Extend,
    /// Index 2: shorten the green time by one second.
    Shorten,
}

impl PolicyAction {
    pub fn index(&self) -> usize {
        match self {
            PolicyAction::Hold => 0,
            PolicyAction::Extend => 1,
            PolicyAction::Shorten => 2,
        }
    }
}

/// Read-only mapping from a queue-state key to ordered action scores.
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    entries: HashMap<String, [f64; ACTION_COUNT]>,
}

impl PolicyTable {
    /// An empty table: every lookup misses and the controller explores.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a table from a JSON file of `"(ns, ew)" -> [score; 3]` pairs.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("unable to open decision table file: {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("invalid decision table file: {}", path.display()))
    }

    /// Parse a table from any JSON reader, rejecting malformed entries.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let raw: HashMap<String, Vec<f64>> =
            serde_json::from_reader(reader).context("decision table is not a JSON object")?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (key, scores) in raw {
            if scores.len() != ACTION_COUNT {
                bail!(
                    "entry {:?} has {} scores, expected {}",
                    key,
                    scores.len(),
                    ACTION_COUNT
                );
            }
            let mut fixed = [0.0; ACTION_COUNT];
            fixed.copy_from_slice(&scores);
            entries.insert(key, fixed);
        }
        Ok(Self { entries })
    }

    /// Insert an entry directly. Intended for tests and programmatic setup.
    pub fn insert(&mut self, queue_ns: u32, queue_ew: u32, scores: [f64; ACTION_COUNT]) {
        self.entries.insert(Self::key(queue_ns, queue_ew), scores);
    }

    /// Pure lookup by queue-state key.
    pub fn lookup(&self, queue_ns: u32, queue_ew: u32) -> Option<&[f64; ACTION_COUNT]> {
        self.entries.get(&Self::key(queue_ns, queue_ew))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical string form of a queue-state key.
    pub fn key(queue_ns: u32, queue_ew: u32) -> String {
        format!("({}, {})", queue_ns, queue_ew)
    }
}

/// Index of the maximum score; ties resolve to the lowest index.
pub fn best_action(scores: &[f64; ACTION_COUNT]) -> PolicyAction {
    let mut best = 0;
    for (i, score) in scores.iter().enumerate().skip(1) {
        if OrderedFloat(*score) > OrderedFloat(scores[best]) {
            best = i;
        }
    }
    match best {
        1 => PolicyAction::Extend,
        2 => PolicyAction::Shorten,
        _ => PolicyAction::Hold,
    }
}
