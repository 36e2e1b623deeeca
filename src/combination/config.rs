//! Combination rule selection.

use crate::error::EvidenceError;
use std::fmt;
use std::str::FromStr;

/// Default conflict threshold for the adaptive rule.
pub const DEFAULT_CONFLICT_THRESHOLD: f64 = 0.4;

/// Rule used to combine two or more bodies of evidence.
///
/// # Examples
///
/// ```
/// use u_evidence::combination::CombinationRule;
///
/// let rule: CombinationRule = "adaptive".parse().unwrap();
/// assert_eq!(rule, CombinationRule::Adaptive);
/// assert_eq!(rule.to_string(), "adaptive");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CombinationRule {
    /// Conjunctive combination normalized by `1 - K`.
    ///
    /// Discards conflicting mass and redistributes it proportionally.
    /// Degenerates to total ignorance under full conflict.
    #[default]
    Dempster,

    /// Conjunctive combination without normalization; conflicting mass
    /// `K` is moved to Θ.
    Yager,

    /// Dempster while `K < threshold`, Yager otherwise. Decided afresh at
    /// every pairwise step, so the result depends on fold order.
    Adaptive,
}

impl CombinationRule {
    /// Lowercase identifier, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            CombinationRule::Dempster => "dempster",
            CombinationRule::Yager => "yager",
            CombinationRule::Adaptive => "adaptive",
        }
    }
}

impl fmt::Display for CombinationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CombinationRule {
    type Err = EvidenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dempster" => Ok(CombinationRule::Dempster),
            "yager" => Ok(CombinationRule::Yager),
            "adaptive" => Ok(CombinationRule::Adaptive),
            other => Err(EvidenceError::InvalidConfig(format!(
                "unknown combination rule '{other}'"
            ))),
        }
    }
}

/// The base rule that actually ran for one pairwise combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseRule {
    Dempster,
    Yager,
}

impl fmt::Display for BaseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseRule::Dempster => f.write_str("dempster"),
            BaseRule::Yager => f.write_str("yager"),
        }
    }
}
