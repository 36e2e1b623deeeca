//! Belief and plausibility over the full subset lattice.

use super::interval::Ranker;
use crate::boe::BodyOfEvidence;
use crate::error::{EvidenceError, Result};
use crate::frame::{FocalElement, Frame};

/// Largest frame for which [`belief_lattice`] will enumerate `2^n - 1`
/// subsets.
pub const MAX_LATTICE_ALTERNATIVES: usize = 12;

/// Belief and plausibility of one non-empty subset of the frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubsetInterval {
    pub subset: FocalElement,
    pub belief: f64,
    pub plausibility: f64,
}

/// Bel and Pl for every non-empty subset of the frame.
///
/// Subsets are listed by their bitmask over frame indices, so singletons
/// of earlier alternatives come first and Θ is last.
///
/// # Errors
///
/// [`EvidenceError::LatticeTooLarge`] when the frame has more than
/// [`MAX_LATTICE_ALTERNATIVES`] alternatives.
pub fn belief_lattice(boe: &BodyOfEvidence, frame: &Frame) -> Result<Vec<SubsetInterval>> {
    let n = frame.len();
    if n > MAX_LATTICE_ALTERNATIVES {
        return Err(EvidenceError::LatticeTooLarge {
            alternatives: n,
            limit: MAX_LATTICE_ALTERNATIVES,
        });
    }

    let lattice = (1u32..(1u32 << n))
        .map(|mask| {
            let subset = FocalElement::from_indices(n, (0..n).filter(|&i| mask & (1 << i) != 0));
            SubsetInterval {
                belief: Ranker::belief(boe, &subset),
                plausibility: Ranker::plausibility(boe, &subset),
                subset,
            }
        })
        .collect();
    Ok(lattice)
}
