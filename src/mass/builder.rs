//! Single-criterion mass assignment.

use super::partition::PreferencePartition;
use crate::boe::BodyOfEvidence;
use crate::frame::Frame;
use std::collections::BTreeMap;

/// Turns one expert's ranked partition for one criterion into a BOE.
///
/// For `d` groups with ranks `a_i` and criterion priority value `p`:
///
/// ```text
/// m(s_i) = a_i·p / (Σ_j a_j·p + √d)
/// m(Θ)   = √d    / (Σ_j a_j·p + √d)
/// ```
///
/// The `√d` term grows the residual ignorance as the expert draws finer
/// distinctions.
///
/// # References
///
/// Beynon, Curry & Morgan (2000), "The Dempster-Shafer theory of evidence:
/// an alternative approach to multicriteria decision modelling"
pub struct MassBuilder;

impl MassBuilder {
    /// Builds the BOE for one criterion.
    ///
    /// A zero CPV or an unranked partition yields the vacuous BOE
    /// `{Θ: 1}`: the criterion contributes no discriminating evidence.
    /// A CPV outside `[0, 1]` (including NaN) is not a priority and is
    /// treated the same way.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_evidence::frame::Frame;
    /// use u_evidence::mass::{MassBuilder, PreferencePartition};
    ///
    /// let frame = Frame::new(["A", "B"]).unwrap();
    /// let p = PreferencePartition::new(&frame, "Cost", [(vec!["A"], 2), (vec!["B"], 1)]).unwrap();
    /// let boe = MassBuilder::build(&frame, &p, 0.5);
    /// assert!((boe.total_mass() - 1.0).abs() < 1e-9);
    /// ```
    pub fn build(frame: &Frame, partition: &PreferencePartition, cpv: f64) -> BodyOfEvidence {
        let groups = partition.groups();
        if !(0.0..=1.0).contains(&cpv) {
            tracing::warn!(cpv, "CPV outside [0, 1], using total ignorance");
            return BodyOfEvidence::vacuous(frame);
        }
        if cpv == 0.0 || groups.is_empty() {
            return BodyOfEvidence::vacuous(frame);
        }

        let sqrt_d = (groups.len() as f64).sqrt();
        let denominator = partition.rank_sum() as f64 * cpv + sqrt_d;
        if denominator == 0.0 {
            tracing::warn!("zero denominator in mass assignment, using total ignorance");
            return BodyOfEvidence::vacuous(frame);
        }

        let theta = frame.theta();
        let mut masses = BTreeMap::new();
        for group in groups {
            // a group covering the whole frame merges with the ignorance term
            *masses.entry(group.members().clone()).or_insert(0.0) +=
                f64::from(group.rank()) * cpv / denominator;
        }
        *masses.entry(theta.clone()).or_insert(0.0) += sqrt_d / denominator;

        BodyOfEvidence::from_parts(theta, masses).renormalized()
    }
}
