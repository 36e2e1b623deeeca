//! Belief/plausibility ranking.
//!
//! For each alternative the group BOE yields an interval
//! `[Bel, Pl]`: the evidence that certainly supports it and the evidence
//! that does not rule it out. A pessimism coefficient `γ` collapses the
//! interval into one score, `γ·Bel + (1 − γ)·Pl`, used for ranking.
//!
//! Singleton intervals are the operative contract. [`belief_lattice`]
//! extends Bel/Pl to every subset for small frames.
//!
//! # References
//!
//! - Shafer (1976), "A Mathematical Theory of Evidence"
//! - Beynon, Curry & Morgan (2000), "The Dempster-Shafer theory of evidence:
//!   an alternative approach to multicriteria decision modelling"

mod interval;
mod lattice;

pub use interval::{BeliefInterval, RankedAlternative, Ranker, Ranking};
pub use lattice::{belief_lattice, SubsetInterval, MAX_LATTICE_ALTERNATIVES};
