//! End-to-end analysis run.

use super::config::AnalysisConfig;
use crate::boe::BodyOfEvidence;
use crate::combination::{CombinationRule, CombinationTrace};
use crate::error::{EvidenceError, Result};
use crate::expert::ExpertPanel;
use crate::ranking::{BeliefInterval, Ranker, Ranking};

/// What one expert contributed to a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpertSummary {
    pub name: String,
    pub weight: f64,

    /// `ω / max ω`.
    pub discount_rate: f64,

    /// Fold of this expert's criterion BOEs.
    pub individual_boe: BodyOfEvidence,

    /// Individual BOE after importance discounting.
    pub adjusted_boe: BodyOfEvidence,

    /// Steps of the criterion fold.
    pub criterion_trace: CombinationTrace,
}

/// Result of an analysis run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisReport {
    /// Rule the run was configured with.
    pub rule: CombinationRule,

    /// Pessimism coefficient used for scoring.
    pub pessimism: f64,

    /// Combined evidence of the whole panel.
    pub group_boe: BodyOfEvidence,

    /// Singleton intervals, in frame order.
    pub intervals: Vec<BeliefInterval>,

    /// Alternatives by descending score.
    pub ranking: Ranking,

    /// Per-expert results, in insertion order.
    pub experts: Vec<ExpertSummary>,

    /// Steps of the fold over experts.
    pub group_trace: CombinationTrace,
}

impl AnalysisReport {
    /// The top-ranked alternative.
    pub fn optimal(&self) -> Option<&str> {
        self.ranking.optimal()
    }

    pub fn interval(&self, alternative: &str) -> Option<&BeliefInterval> {
        self.intervals.iter().find(|i| i.alternative == alternative)
    }

    pub fn expert(&self, name: &str) -> Option<&ExpertSummary> {
        self.experts.iter().find(|e| e.name == name)
    }
}

/// Runs a complete analysis over an expert panel.
pub struct AnalysisRunner;

impl AnalysisRunner {
    /// Evaluates every expert, folds the panel into a group BOE and ranks
    /// the alternatives.
    ///
    /// The panel's cached per-expert results are refreshed as a side
    /// effect.
    ///
    /// # Errors
    ///
    /// Invalid configuration, an empty panel, or all expert weights zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_evidence::analysis::{AnalysisConfig, AnalysisRunner};
    /// use u_evidence::expert::{ExpertInput, ExpertPanel};
    /// use u_evidence::frame::Frame;
    ///
    /// let frame = Frame::new(["A", "B", "C"]).unwrap();
    /// let mut panel = ExpertPanel::new(frame, ["Cost", "Quality"]).unwrap();
    /// panel
    ///     .add_expert(
    ///         ExpertInput::new("E1")
    ///             .with_weight(0.9)
    ///             .with_cpv("Cost", 0.5)
    ///             .with_cpv("Quality", 0.5)
    ///             .with_preferences("Cost", [(vec!["A"], 3), (vec!["B", "C"], 1)])
    ///             .with_preferences("Quality", [(vec!["A", "B"], 2), (vec!["C"], 1)]),
    ///     )
    ///     .unwrap();
    ///
    /// let report = AnalysisRunner::run(&mut panel, &AnalysisConfig::default()).unwrap();
    /// assert_eq!(report.optimal(), Some("A"));
    /// ```
    pub fn run(panel: &mut ExpertPanel, config: &AnalysisConfig) -> Result<AnalysisReport> {
        config.validate()?;
        let combiner = config.combiner();

        tracing::info!(
            rule = %config.rule,
            threshold = config.conflict_threshold,
            experts = panel.len(),
            alternatives = panel.frame().len(),
            criteria = panel.criteria().len(),
            "starting analysis"
        );

        let criterion_traces = panel.evaluate(&combiner, config.parallel)?;

        let mut group_trace = CombinationTrace::new();
        let group_boe = panel.group_boe(&combiner, config.use_adjusted_boe, &mut group_trace)?;

        let intervals = Ranker::intervals(&group_boe, panel.frame());
        let ranking = Ranker::rank_intervals(&intervals, config.pessimism);

        let experts = panel
            .experts()
            .iter()
            .zip(criterion_traces)
            .map(|(e, criterion_trace)| -> Result<ExpertSummary> {
                let not_evaluated = || EvidenceError::NotEvaluated(e.name().to_string());
                Ok(ExpertSummary {
                    name: e.name().to_string(),
                    weight: e.weight(),
                    discount_rate: e.discount_rate().ok_or_else(not_evaluated)?,
                    individual_boe: e.individual_boe().cloned().ok_or_else(not_evaluated)?,
                    adjusted_boe: e.adjusted_boe().cloned().ok_or_else(not_evaluated)?,
                    criterion_trace,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let counts = group_trace.rule_counts();
        tracing::info!(
            optimal = ranking.optimal().unwrap_or("-"),
            group_focal = group_boe.len(),
            dempster_steps = counts.dempster,
            yager_steps = counts.yager,
            "analysis complete"
        );

        Ok(AnalysisReport {
            rule: config.rule,
            pessimism: config.pessimism,
            group_boe,
            intervals,
            ranking,
            experts,
            group_trace,
        })
    }
}
