//! Pairwise combination rules.
//!
//! All three rules share the same conjunctive core: every pair of focal
//! elements `(B, C)` contributes `m1(B)·m2(C)` to `B ∩ C`, and pairs with
//! an empty intersection add to the conflict `K`. They differ only in what
//! happens to `K`.
//!
//! Every function here panics when the two inputs are defined over frames
//! of different sizes. [`Combiner::combine_all`](super::Combiner::combine_all)
//! reports the same condition as an error instead.

use super::config::BaseRule;
use crate::boe::BodyOfEvidence;
use crate::frame::FocalElement;
use std::collections::BTreeMap;

/// Conflict at or above `1 - FULL_CONFLICT_EPSILON` is treated as total.
pub const FULL_CONFLICT_EPSILON: f64 = 1e-10;

/// Masses at or below this are dropped from combined results.
const NEGLIGIBLE_MASS: f64 = 1e-10;

/// Outcome of one adaptive combination: what was measured and which base
/// rule it selected.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdaptiveDecision {
    /// Conflict coefficient `K` between the two inputs.
    pub conflict: f64,
    /// Threshold `K` was compared against.
    pub threshold: f64,
    /// Rule that fired: Dempster if `K < threshold`, Yager otherwise.
    pub rule: BaseRule,
}

fn assert_same_frame(m1: &BodyOfEvidence, m2: &BodyOfEvidence) {
    assert_eq!(
        m1.frame_len(),
        m2.frame_len(),
        "bodies of evidence over frames of different sizes"
    );
}

/// Conjunctive accumulation shared by every rule.
///
/// Returns the unnormalized intersection masses and the conflict `K`.
fn conjunctive(m1: &BodyOfEvidence, m2: &BodyOfEvidence) -> (BTreeMap<FocalElement, f64>, f64) {
    assert_same_frame(m1, m2);

    let mut masses: BTreeMap<FocalElement, f64> = BTreeMap::new();
    let mut conflict = 0.0;

    for (b, mb) in m1.iter() {
        for (c, mc) in m2.iter() {
            let product = mb * mc;
            let meet = b.intersection(c);
            if meet.is_empty() {
                conflict += product;
            } else {
                *masses.entry(meet).or_insert(0.0) += product;
            }
        }
    }

    (masses, conflict)
}

fn prune(masses: &mut BTreeMap<FocalElement, f64>) {
    masses.retain(|_, m| *m > NEGLIGIBLE_MASS);
}

/// Conflict coefficient `K = Σ_{B∩C=∅} m1(B)·m2(C)`, always in `[0, 1]`.
///
/// # Panics
///
/// If `m1` and `m2` are defined over frames of different sizes.
pub fn conflict(m1: &BodyOfEvidence, m2: &BodyOfEvidence) -> f64 {
    assert_same_frame(m1, m2);
    let mut k = 0.0;
    for (b, mb) in m1.iter() {
        for (c, mc) in m2.iter() {
            if !b.intersects(c) {
                k += mb * mc;
            }
        }
    }
    k
}

/// Dempster's rule. Returns the combined BOE, `K`, and whether full
/// conflict forced the vacuous fallback.
pub(crate) fn dempster_with_conflict(
    m1: &BodyOfEvidence,
    m2: &BodyOfEvidence,
) -> (BodyOfEvidence, f64, bool) {
    let (mut masses, k) = conjunctive(m1, m2);

    if k >= 1.0 - FULL_CONFLICT_EPSILON {
        tracing::warn!(conflict = k, "total conflict under Dempster's rule, returning Θ");
        return (BodyOfEvidence::vacuous_over(m1.theta().clone()), k, true);
    }

    let norm = 1.0 - k;
    for mass in masses.values_mut() {
        *mass /= norm;
    }
    prune(&mut masses);

    let boe = BodyOfEvidence::from_parts(m1.theta().clone(), masses).renormalized();
    (boe, k, false)
}

/// Yager's rule. Returns the combined BOE and `K`.
pub(crate) fn yager_with_conflict(m1: &BodyOfEvidence, m2: &BodyOfEvidence) -> (BodyOfEvidence, f64) {
    let (mut masses, k) = conjunctive(m1, m2);

    *masses.entry(m1.theta().clone()).or_insert(0.0) += k;
    prune(&mut masses);

    let boe = BodyOfEvidence::from_parts(m1.theta().clone(), masses).renormalized();
    (boe, k)
}

/// Combines two BOEs with Dempster's rule.
///
/// Conflicting mass is discarded and the remainder renormalized by
/// `1 / (1 - K)`. When the sources are (almost) mutually exclusive,
/// `K ≥ 1 - 1e-10`, the vacuous BOE `{Θ: 1}` is returned instead of
/// dividing by zero.
///
/// Commutative, and associative as long as no intermediate step hits full
/// conflict.
///
/// # Panics
///
/// If `m1` and `m2` are defined over frames of different sizes.
///
/// # Examples
///
/// ```
/// use u_evidence::boe::BodyOfEvidence;
/// use u_evidence::combination::combine_dempster;
/// use u_evidence::frame::Frame;
///
/// let frame = Frame::new(["A", "B"]).unwrap();
/// let a = frame.subset(["A"]).unwrap();
/// let b = frame.subset(["B"]).unwrap();
/// let m1 = BodyOfEvidence::from_masses(&frame, [(a.clone(), 0.6), (frame.theta(), 0.4)]).unwrap();
/// let m2 = BodyOfEvidence::from_masses(&frame, [(b.clone(), 0.5), (frame.theta(), 0.5)]).unwrap();
///
/// let m = combine_dempster(&m1, &m2);
/// assert!((m.mass(&a) - 0.3 / 0.7).abs() < 1e-9);
/// assert!((m.mass(&b) - 0.2 / 0.7).abs() < 1e-9);
/// ```
pub fn combine_dempster(m1: &BodyOfEvidence, m2: &BodyOfEvidence) -> BodyOfEvidence {
    dempster_with_conflict(m1, m2).0
}

/// Combines two BOEs with Yager's rule.
///
/// Intersections are accumulated exactly as in Dempster's rule but never
/// normalized: the conflict `K` is added to Θ. The result always sums to
/// 1 and the rule never degenerates.
///
/// # Panics
///
/// If `m1` and `m2` are defined over frames of different sizes.
pub fn combine_yager(m1: &BodyOfEvidence, m2: &BodyOfEvidence) -> BodyOfEvidence {
    yager_with_conflict(m1, m2).0
}

/// Combines two BOEs with the conflict-adaptive rule.
///
/// Measures `K`; below `threshold` the sources are considered compatible
/// and Dempster's rule is used, otherwise Yager's rule keeps the conflict
/// as ignorance.
///
/// The rule is not associative: in a multi-source fold the conflict is
/// measured against the partial result on the left, so different orders
/// may select different base rules. Callers fold strictly left to right.
///
/// # Panics
///
/// If `m1` and `m2` are defined over frames of different sizes.
pub fn combine_adaptive(
    m1: &BodyOfEvidence,
    m2: &BodyOfEvidence,
    threshold: f64,
) -> (BodyOfEvidence, AdaptiveDecision) {
    let k = conflict(m1, m2);
    if k < threshold {
        let (boe, _, _) = dempster_with_conflict(m1, m2);
        (
            boe,
            AdaptiveDecision {
                conflict: k,
                threshold,
                rule: BaseRule::Dempster,
            },
        )
    } else {
        let (boe, _) = yager_with_conflict(m1, m2);
        (
            boe,
            AdaptiveDecision {
                conflict: k,
                threshold,
                rule: BaseRule::Yager,
            },
        )
    }
}
