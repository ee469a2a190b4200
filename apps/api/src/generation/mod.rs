// Letter Generation
// Implements: skill classification, template selection, letter assembly.
// Time-dependent pieces (delay, date) are injected through clock.rs.

pub mod classifier;
pub mod clock;
pub mod generator;
pub mod templates;
