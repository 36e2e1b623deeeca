//! Synthetic panel generation.
//!
//! Produces random but always valid decision problems for testing and
//! benchmarking: labelled alternatives and criteria, weighted experts
//! with normalized CPVs, and a ranked partition for every
//! (expert, criterion) pair.

mod config;
mod panel;

pub use config::{GeneratorConfig, WeightDistribution};
pub use panel::PanelGenerator;
