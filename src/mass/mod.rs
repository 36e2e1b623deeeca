//! Mass assignment from ranked preferences.
//!
//! An expert ranks groups of alternatives under each criterion. The
//! [`MassBuilder`] turns one such ranking plus the expert's criterion
//! priority value (CPV) into a single-criterion body of evidence.
//!
//! # References
//!
//! - Beynon, Curry & Morgan (2000), "The Dempster-Shafer theory of evidence:
//!   an alternative approach to multicriteria decision modelling"
//! - Beynon (2006), "The role of the DS/AHP in identifying inter-group
//!   alliances and majority rule within group decision making"

mod builder;
mod partition;

pub use builder::MassBuilder;
pub use partition::{PreferenceGroup, PreferencePartition};
