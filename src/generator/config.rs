//! Generator configuration.

use crate::error::{EvidenceError, Result};

/// How expert weights are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeightDistribution {
    /// Independent uniform draws from `[0.3, 1.0]`, rounded to two decimals.
    #[default]
    Uniform,

    /// Linearly decreasing from 1.0 (first expert) to 0.3 (last expert).
    Decreasing,
}

/// Configuration for synthetic panel generation.
///
/// # Examples
///
/// ```
/// use u_evidence::generator::{GeneratorConfig, WeightDistribution};
///
/// let config = GeneratorConfig::default()
///     .with_alternatives(20)
///     .with_experts(5)
///     .with_weights(WeightDistribution::Decreasing)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Number of alternatives, labelled `A001`, `A002`, …
    pub alternatives: usize,

    /// Number of criteria.
    pub criteria: usize,

    /// Number of experts, named `E1`, `E2`, …
    pub experts: usize,

    /// Upper bound on preference groups per (expert, criterion). Capped by
    /// the number of alternatives.
    pub max_groups: usize,

    /// Expert weight distribution.
    pub weights: WeightDistribution,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            alternatives: 10,
            criteria: 3,
            experts: 4,
            max_groups: 5,
            weights: WeightDistribution::default(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_alternatives(mut self, n: usize) -> Self {
        self.alternatives = n;
        self
    }

    pub fn with_criteria(mut self, n: usize) -> Self {
        self.criteria = n;
        self
    }

    pub fn with_experts(mut self, n: usize) -> Self {
        self.experts = n;
        self
    }

    pub fn with_max_groups(mut self, n: usize) -> Self {
        self.max_groups = n;
        self
    }

    pub fn with_weights(mut self, weights: WeightDistribution) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.alternatives == 0 {
            return Err(EvidenceError::InvalidConfig(
                "alternatives must be at least 1".into(),
            ));
        }
        if self.experts == 0 {
            return Err(EvidenceError::InvalidConfig("experts must be at least 1".into()));
        }
        if self.max_groups == 0 {
            return Err(EvidenceError::InvalidConfig(
                "max_groups must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
