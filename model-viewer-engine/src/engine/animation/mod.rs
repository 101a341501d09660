//! Per-frame animation of the displayed model.
//!
//! Runs once per frame after all viewer commands have been applied:
//! bounce from the shared phase accumulator, spin scaled by frame time,
//! then the star field drift.

/// Bounce and spin update for the current model.
pub mod driver;
