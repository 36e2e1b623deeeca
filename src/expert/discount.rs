//! Importance discounting.

use crate::boe::BodyOfEvidence;
use crate::error::{EvidenceError, Result};
use std::collections::BTreeMap;

/// A discount rate within this distance of 1 leaves the BOE untouched.
pub const IDENTITY_RATE_EPSILON: f64 = 1e-10;

/// Relative importance of each weight: `ω_k / max_j ω_j`.
///
/// The most important expert gets exactly 1.
///
/// # Errors
///
/// [`EvidenceError::NoExperts`] for an empty slice,
/// [`EvidenceError::ZeroExpertWeights`] if every weight is zero.
pub fn discount_rates(weights: &[f64]) -> Result<Vec<f64>> {
    let max = weights
        .iter()
        .copied()
        .reduce(f64::max)
        .ok_or(EvidenceError::NoExperts)?;
    if max <= 0.0 {
        return Err(EvidenceError::ZeroExpertWeights);
    }
    Ok(weights.iter().map(|w| w / max).collect())
}

/// Discounts a BOE by an expert's relative importance `rate`.
///
/// Every focal element other than Θ is scaled by `rate`; Θ keeps its
/// mass; the result is divided by the new total. A rate of 1 returns the
/// input unchanged. If nothing is left to normalize (all mass was on
/// discounted elements and `rate` is 0) the vacuous BOE is returned.
///
/// # Examples
///
/// ```
/// use u_evidence::boe::BodyOfEvidence;
/// use u_evidence::expert::adjust_with_importance;
/// use u_evidence::frame::Frame;
///
/// let frame = Frame::new(["A", "B"]).unwrap();
/// let a = frame.subset(["A"]).unwrap();
/// let boe = BodyOfEvidence::from_masses(&frame, [(a.clone(), 0.6), (frame.theta(), 0.4)]).unwrap();
///
/// let adjusted = adjust_with_importance(&boe, 0.5);
/// // {A}: 0.3 / 0.7, Θ: 0.4 / 0.7
/// assert!((adjusted.mass(&a) - 0.3 / 0.7).abs() < 1e-12);
/// ```
pub fn adjust_with_importance(boe: &BodyOfEvidence, rate: f64) -> BodyOfEvidence {
    if (rate - 1.0).abs() <= IDENTITY_RATE_EPSILON {
        return boe.clone();
    }

    let theta = boe.theta();
    let mut masses: BTreeMap<_, _> = boe
        .iter()
        .map(|(focal, mass)| {
            let scaled = if focal == theta { mass } else { mass * rate };
            (focal.clone(), scaled)
        })
        .collect();

    let total: f64 = masses.values().sum();
    if total <= 0.0 {
        tracing::warn!(rate, "discounting left no mass, using total ignorance");
        return BodyOfEvidence::vacuous_over(theta.clone());
    }

    masses.retain(|_, m| *m > 0.0);
    for mass in masses.values_mut() {
        *mass /= total;
    }
    BodyOfEvidence::from_parts(theta.clone(), masses)
}
