//! Adaptive Traffic Signal Simulation Library
//!
//! A four-way signalized intersection where green-light duration adapts to
//! observed traffic load using a precomputed decision table.

pub mod simulation;
