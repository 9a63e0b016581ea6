//! Utility functions shared by the pipeline stages.

pub mod stats;

pub use stats::{mean, percent_change, round_to};
