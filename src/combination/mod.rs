//! Combination of independent bodies of evidence.
//!
//! Two sources are combined conjunctively: mass is assigned to the
//! intersections of their focal elements, and the mass that falls on the
//! empty set is the conflict `K`. The rules differ in how they treat `K`:
//!
//! - **Dempster**: discards it and renormalizes by `1 / (1 - K)`.
//! - **Yager**: moves it to Θ, turning disagreement into ignorance.
//! - **Adaptive**: Dempster below a conflict threshold, Yager at or above.
//!
//! Multi-source combination is a strict left fold driven by a
//! [`Combiner`], which records one [`CombinationStep`] per pair into a
//! caller-owned [`CombinationTrace`].
//!
//! # References
//!
//! - Dempster (1967), "Upper and lower probabilities induced by a
//!   multivalued mapping"
//! - Shafer (1976), "A Mathematical Theory of Evidence"
//! - Yager (1987), "On the Dempster-Shafer framework and new combination rules"

mod config;
mod rules;
mod runner;

pub use config::{BaseRule, CombinationRule, DEFAULT_CONFLICT_THRESHOLD};
pub use rules::{
    combine_adaptive, combine_dempster, combine_yager, conflict, AdaptiveDecision,
    FULL_CONFLICT_EPSILON,
};
pub use runner::{CombinationStep, CombinationTrace, Combiner, RuleCounts};
