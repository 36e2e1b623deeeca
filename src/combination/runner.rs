//! Multi-source combination and per-step diagnostics.

use super::config::{BaseRule, CombinationRule, DEFAULT_CONFLICT_THRESHOLD};
use super::rules::{combine_adaptive, dempster_with_conflict, yager_with_conflict};
use crate::boe::BodyOfEvidence;
use crate::error::{EvidenceError, Result};

/// Diagnostics for one pairwise combination step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinationStep {
    /// 1-based position of the step within its trace.
    pub step: usize,

    /// Conflict coefficient `K` measured between the partial result and
    /// the next source.
    pub conflict: f64,

    /// Threshold `K` was compared against. `Some` only for the adaptive rule.
    pub threshold: Option<f64>,

    /// Base rule that produced this step's result.
    pub rule: BaseRule,

    /// `true` if Dempster's rule met total conflict and fell back to `{Θ: 1}`.
    pub degenerate: bool,
}

/// How often each base rule fired within a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleCounts {
    pub dempster: usize,
    pub yager: usize,
}

/// Ordered record of the steps taken by one or more folds.
///
/// Owned and passed in by the caller so that combination itself stays
/// free of hidden state; a fresh trace per fold keeps step numbers local
/// to that fold.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinationTrace {
    steps: Vec<CombinationStep>,
}

impl CombinationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, conflict: f64, threshold: Option<f64>, rule: BaseRule, degenerate: bool) {
        let step = self.steps.len() + 1;
        tracing::debug!(step, conflict, ?threshold, %rule, degenerate, "combination step");
        self.steps.push(CombinationStep {
            step,
            conflict,
            threshold,
            rule,
            degenerate,
        });
    }

    pub fn steps(&self) -> &[CombinationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps resolved by each base rule.
    pub fn rule_counts(&self) -> RuleCounts {
        self.steps
            .iter()
            .fold(RuleCounts::default(), |mut acc, s| {
                match s.rule {
                    BaseRule::Dempster => acc.dempster += 1,
                    BaseRule::Yager => acc.yager += 1,
                }
                acc
            })
    }

    /// Largest conflict measured, if any step was taken.
    pub fn max_conflict(&self) -> Option<f64> {
        self.steps.iter().map(|s| s.conflict).reduce(f64::max)
    }
}

/// Applies a [`CombinationRule`] to pairs and sequences of BOEs.
///
/// # Examples
///
/// ```
/// use u_evidence::boe::BodyOfEvidence;
/// use u_evidence::combination::{CombinationTrace, Combiner};
/// use u_evidence::frame::Frame;
///
/// let frame = Frame::new(["A", "B"]).unwrap();
/// let a = frame.subset(["A"]).unwrap();
/// let b = frame.subset(["B"]).unwrap();
/// let sources = vec![
///     BodyOfEvidence::from_masses(&frame, [(a, 0.6), (frame.theta(), 0.4)]).unwrap(),
///     BodyOfEvidence::from_masses(&frame, [(b, 0.5), (frame.theta(), 0.5)]).unwrap(),
/// ];
///
/// let mut trace = CombinationTrace::new();
/// let combined = Combiner::adaptive(0.25).combine_all(&sources, &mut trace).unwrap();
/// assert_eq!(trace.len(), 1);
/// assert!((combined.theta_mass() - 0.5).abs() < 1e-9); // K = 0.3 >= 0.25 -> Yager
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Combiner {
    rule: CombinationRule,
    threshold: f64,
}

impl Combiner {
    /// Creates a combiner for `rule` with the default adaptive threshold.
    pub fn new(rule: CombinationRule) -> Self {
        Self {
            rule,
            threshold: DEFAULT_CONFLICT_THRESHOLD,
        }
    }

    pub fn dempster() -> Self {
        Self::new(CombinationRule::Dempster)
    }

    pub fn yager() -> Self {
        Self::new(CombinationRule::Yager)
    }

    pub fn adaptive(threshold: f64) -> Self {
        Self::new(CombinationRule::Adaptive).with_threshold(threshold)
    }

    /// Sets the conflict threshold (only consulted by the adaptive rule).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn rule(&self) -> CombinationRule {
        self.rule
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Combines two BOEs and appends one step to `trace`.
    ///
    /// # Panics
    ///
    /// If `m1` and `m2` are defined over frames of different sizes.
    pub fn combine_pair(
        &self,
        m1: &BodyOfEvidence,
        m2: &BodyOfEvidence,
        trace: &mut CombinationTrace,
    ) -> BodyOfEvidence {
        match self.rule {
            CombinationRule::Dempster => {
                let (boe, k, degenerate) = dempster_with_conflict(m1, m2);
                trace.record(k, None, BaseRule::Dempster, degenerate);
                boe
            }
            CombinationRule::Yager => {
                let (boe, k) = yager_with_conflict(m1, m2);
                trace.record(k, None, BaseRule::Yager, false);
                boe
            }
            CombinationRule::Adaptive => {
                let (boe, decision) = combine_adaptive(m1, m2, self.threshold);
                let degenerate = decision.rule == BaseRule::Dempster
                    && decision.conflict >= 1.0 - super::rules::FULL_CONFLICT_EPSILON;
                trace.record(
                    decision.conflict,
                    Some(decision.threshold),
                    decision.rule,
                    degenerate,
                );
                boe
            }
        }
    }

    /// Folds `boes` strictly left to right:
    /// `rule(rule(rule(b1, b2), b3), …)`.
    ///
    /// A single source is returned unchanged and records no step.
    ///
    /// # Errors
    ///
    /// [`EvidenceError::NoEvidence`] if `boes` is empty,
    /// [`EvidenceError::FrameMismatch`] if the sources are not all defined
    /// over frames of the same size. Nothing is recorded in either case.
    pub fn combine_all(
        &self,
        boes: &[BodyOfEvidence],
        trace: &mut CombinationTrace,
    ) -> Result<BodyOfEvidence> {
        let (first, rest) = boes.split_first().ok_or(EvidenceError::NoEvidence)?;
        if let Some(other) = rest.iter().find(|b| b.frame_len() != first.frame_len()) {
            return Err(EvidenceError::FrameMismatch {
                expected: first.frame_len(),
                found: other.frame_len(),
            });
        }
        let mut acc = first.clone();
        for next in rest {
            acc = self.combine_pair(&acc, next, trace);
        }
        Ok(acc)
    }
}

impl Default for Combiner {
    fn default() -> Self {
        Self::new(CombinationRule::default())
    }
}
