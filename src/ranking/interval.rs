//! Singleton belief intervals and the pessimism-weighted ranking.

use crate::boe::BodyOfEvidence;
use crate::frame::{FocalElement, Frame};

/// Belief and plausibility of a single alternative.
///
/// `belief ≤ plausibility` always holds; the gap is the ignorance left
/// about the alternative.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeliefInterval {
    pub alternative: String,
    pub belief: f64,
    pub plausibility: f64,
}

impl BeliefInterval {
    /// `γ·Bel + (1 − γ)·Pl`.
    ///
    /// `γ = 1` is the fully pessimistic view (belief only), `γ = 0` the
    /// fully optimistic one (plausibility only).
    pub fn score(&self, pessimism: f64) -> f64 {
        pessimism * self.belief + (1.0 - pessimism) * self.plausibility
    }

    /// Width of the interval.
    pub fn ignorance(&self) -> f64 {
        self.plausibility - self.belief
    }
}

/// One ranked alternative.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedAlternative {
    pub alternative: String,
    pub score: f64,
}

/// Alternatives ordered by descending score.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ranking {
    entries: Vec<RankedAlternative>,
}

impl Ranking {
    pub fn entries(&self) -> &[RankedAlternative] {
        &self.entries
    }

    /// The top-ranked alternative, or `None` for an empty ranking.
    pub fn optimal(&self) -> Option<&str> {
        self.entries.first().map(|e| e.alternative.as_str())
    }

    /// 1-based position of `alternative`.
    pub fn position(&self, alternative: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.alternative == alternative)
            .map(|p| p + 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Computes belief functions over a BOE and ranks the alternatives.
///
/// # Examples
///
/// ```
/// use u_evidence::boe::BodyOfEvidence;
/// use u_evidence::frame::Frame;
/// use u_evidence::ranking::Ranker;
///
/// let frame = Frame::new(["A", "B", "C"]).unwrap();
/// let boe = BodyOfEvidence::from_masses(
///     &frame,
///     [
///         (frame.subset(["B"]).unwrap(), 0.5),
///         (frame.subset(["A", "B"]).unwrap(), 0.2),
///         (frame.theta(), 0.3),
///     ],
/// )
/// .unwrap();
///
/// let ranking = Ranker::rank(&boe, &frame, 0.5);
/// assert_eq!(ranking.optimal(), Some("B"));
/// ```
pub struct Ranker;

impl Ranker {
    /// `Bel(A) = Σ_{B ⊆ A} m(B)`.
    pub fn belief(boe: &BodyOfEvidence, subset: &FocalElement) -> f64 {
        boe.iter()
            .filter(|(focal, _)| focal.is_subset(subset))
            .map(|(_, m)| m)
            .sum()
    }

    /// `Pl(A) = Σ_{B ∩ A ≠ ∅} m(B)`.
    pub fn plausibility(boe: &BodyOfEvidence, subset: &FocalElement) -> f64 {
        boe.iter()
            .filter(|(focal, _)| focal.intersects(subset))
            .map(|(_, m)| m)
            .sum()
    }

    /// Belief interval of every alternative, in frame order.
    pub fn intervals(boe: &BodyOfEvidence, frame: &Frame) -> Vec<BeliefInterval> {
        frame
            .labels()
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                let singleton = frame.singleton(idx);
                BeliefInterval {
                    alternative: label.clone(),
                    belief: Self::belief(boe, &singleton),
                    plausibility: Self::plausibility(boe, &singleton),
                }
            })
            .collect()
    }

    /// Orders precomputed intervals by descending score.
    ///
    /// The sort is stable: alternatives with equal scores keep their
    /// relative input order.
    pub fn rank_intervals(intervals: &[BeliefInterval], pessimism: f64) -> Ranking {
        let mut entries: Vec<RankedAlternative> = intervals
            .iter()
            .map(|i| RankedAlternative {
                alternative: i.alternative.clone(),
                score: i.score(pessimism),
            })
            .collect();
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ranking { entries }
    }

    /// Scores every alternative with pessimism `γ ∈ [0, 1]` and ranks
    /// them; ties keep frame order.
    pub fn rank(boe: &BodyOfEvidence, frame: &Frame, pessimism: f64) -> Ranking {
        Self::rank_intervals(&Self::intervals(boe, frame), pessimism)
    }
}
