//! Analysis run configuration.

use crate::combination::{CombinationRule, Combiner, DEFAULT_CONFLICT_THRESHOLD};
use crate::error::{EvidenceError, Result};

/// Configuration for one DS/AHP group-decision analysis.
///
/// # Examples
///
/// ```
/// use u_evidence::analysis::AnalysisConfig;
/// use u_evidence::combination::CombinationRule;
///
/// let config = AnalysisConfig::default()
///     .with_rule(CombinationRule::Adaptive)
///     .with_conflict_threshold(0.3)
///     .with_pessimism(0.7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisConfig {
    /// Rule used for both the criterion fold and the group fold.
    pub rule: CombinationRule,

    /// Conflict level at which the adaptive rule switches from Dempster to
    /// Yager. Ignored by the other rules.
    pub conflict_threshold: f64,

    /// Pessimism coefficient `γ` in `[0, 1]`: weight of belief against
    /// plausibility in the ranking score.
    pub pessimism: f64,

    /// Combine importance-discounted BOEs (`true`) or raw individual BOEs.
    pub use_adjusted_boe: bool,

    /// Compute individual BOEs in parallel using rayon. Requires the
    /// `parallel` feature; otherwise the run is sequential.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rule: CombinationRule::Dempster,
            conflict_threshold: DEFAULT_CONFLICT_THRESHOLD,
            pessimism: 0.5,
            use_adjusted_boe: true,
            parallel: false,
        }
    }
}

impl AnalysisConfig {
    /// Ranks by belief alone (`γ = 1`).
    pub fn pessimistic() -> Self {
        Self::default().with_pessimism(1.0)
    }

    /// Ranks by plausibility alone (`γ = 0`).
    pub fn optimistic() -> Self {
        Self::default().with_pessimism(0.0)
    }

    /// Adaptive combination with the default threshold, for panels
    /// expected to disagree.
    pub fn conflict_tolerant() -> Self {
        Self::default()
            .with_rule(CombinationRule::Adaptive)
            .with_conflict_threshold(DEFAULT_CONFLICT_THRESHOLD)
    }

    pub fn with_rule(mut self, rule: CombinationRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_conflict_threshold(mut self, threshold: f64) -> Self {
        self.conflict_threshold = threshold;
        self
    }

    pub fn with_pessimism(mut self, pessimism: f64) -> Self {
        self.pessimism = pessimism;
        self
    }

    pub fn with_adjusted_boe(mut self, use_adjusted: bool) -> Self {
        self.use_adjusted_boe = use_adjusted;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The combiner described by `rule` and `conflict_threshold`.
    pub fn combiner(&self) -> Combiner {
        Combiner::new(self.rule).with_threshold(self.conflict_threshold)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.conflict_threshold) {
            return Err(EvidenceError::InvalidConfig(format!(
                "conflict_threshold must be in [0, 1], got {}",
                self.conflict_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.pessimism) {
            return Err(EvidenceError::InvalidConfig(format!(
                "pessimism must be in [0, 1], got {}",
                self.pessimism
            )));
        }
        Ok(())
    }
}
