//! The expert panel: validation, per-expert folds and group aggregation.

use super::discount::{adjust_with_importance, discount_rates};
use super::types::{Expert, ExpertInput};
use crate::boe::BodyOfEvidence;
use crate::combination::{CombinationTrace, Combiner};
use crate::error::{EvidenceError, Result};
use crate::frame::Frame;
use crate::mass::{MassBuilder, PreferencePartition};
use std::collections::HashSet;

/// Slack allowed on an expert's CPV sum.
pub const CPV_SUM_TOLERANCE: f64 = 1e-5;

/// A decision problem and the experts judging it.
///
/// Experts are kept in insertion order, which is also the order of the
/// group fold.
///
/// # Examples
///
/// ```
/// use u_evidence::combination::{CombinationTrace, Combiner};
/// use u_evidence::expert::{ExpertInput, ExpertPanel};
/// use u_evidence::frame::Frame;
///
/// let frame = Frame::new(["A", "B"]).unwrap();
/// let mut panel = ExpertPanel::new(frame, ["Cost"]).unwrap();
/// panel
///     .add_expert(
///         ExpertInput::new("E1")
///             .with_cpv("Cost", 1.0)
///             .with_preferences("Cost", [(vec!["A"], 2), (vec!["B"], 1)]),
///     )
///     .unwrap();
///
/// let combiner = Combiner::dempster();
/// panel.evaluate(&combiner, false).unwrap();
/// let mut trace = CombinationTrace::new();
/// let group = panel.group_boe(&combiner, true, &mut trace).unwrap();
/// assert!((group.total_mass() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExpertPanel {
    frame: Frame,
    criteria: Vec<String>,
    experts: Vec<Expert>,
}

impl ExpertPanel {
    /// Creates an empty panel.
    ///
    /// # Errors
    ///
    /// [`EvidenceError::InvalidCriterion`] for an empty or repeated
    /// criterion name.
    pub fn new<I, S>(frame: Frame, criteria: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for c in criteria {
            let c = c.into();
            if c.trim().is_empty() || !seen.insert(c.clone()) {
                return Err(EvidenceError::InvalidCriterion(c));
            }
            names.push(c);
        }
        Ok(Self {
            frame,
            criteria: names,
            experts: Vec::new(),
        })
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    pub fn experts(&self) -> &[Expert] {
        &self.experts
    }

    pub fn expert(&self, name: &str) -> Option<&Expert> {
        self.experts.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.experts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experts.is_empty()
    }

    fn criterion_index(&self, expert: &str, criterion: &str) -> Result<usize> {
        self.criteria
            .iter()
            .position(|c| c == criterion)
            .ok_or_else(|| EvidenceError::UnknownCriterion {
                expert: expert.to_string(),
                criterion: criterion.to_string(),
            })
    }

    /// Validates `input` and appends it to the panel.
    ///
    /// Nothing is added when validation fails. Adding an expert discards
    /// cached evaluation results of the others, since discount rates
    /// depend on the whole panel.
    ///
    /// # Errors
    ///
    /// Empty or duplicate name, weight or CPV outside `[0, 1]`, CPV sum
    /// above `1 + CPV_SUM_TOLERANCE`, unknown criterion, criterion without
    /// a CPV, or an invalid preference partition (wrapped in
    /// [`EvidenceError::Expert`]).
    pub fn add_expert(&mut self, input: ExpertInput) -> Result<()> {
        let ExpertInput {
            name,
            weight,
            cpvs: raw_cpvs,
            preferences,
        } = input;

        if name.trim().is_empty() {
            return Err(EvidenceError::EmptyExpertName);
        }
        if self.expert(&name).is_some() {
            return Err(EvidenceError::DuplicateExpert(name));
        }
        if !(0.0..=1.0).contains(&weight) {
            return Err(EvidenceError::WeightOutOfRange {
                expert: name,
                weight,
            });
        }

        let mut cpvs: Vec<Option<f64>> = vec![None; self.criteria.len()];
        for (criterion, cpv) in raw_cpvs {
            let idx = self.criterion_index(&name, &criterion)?;
            if !(0.0..=1.0).contains(&cpv) {
                return Err(EvidenceError::CpvOutOfRange {
                    expert: name,
                    criterion,
                    cpv,
                });
            }
            cpvs[idx] = Some(cpv);
        }
        let cpvs = cpvs
            .into_iter()
            .zip(&self.criteria)
            .map(|(cpv, criterion)| {
                cpv.ok_or_else(|| EvidenceError::MissingCpv {
                    expert: name.clone(),
                    criterion: criterion.clone(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        let sum: f64 = cpvs.iter().sum();
        if sum > 1.0 + CPV_SUM_TOLERANCE {
            return Err(EvidenceError::CpvSumExceeded { expert: name, sum });
        }

        let mut partitions = vec![PreferencePartition::unranked(); self.criteria.len()];
        for (criterion, groups) in preferences {
            let idx = self.criterion_index(&name, &criterion)?;
            if let Some(groups) = groups {
                partitions[idx] = PreferencePartition::new(&self.frame, &criterion, groups)
                    .map_err(|source| EvidenceError::Expert {
                        expert: name.clone(),
                        source: Box::new(source),
                    })?;
            }
        }

        for expert in &mut self.experts {
            expert.clear_evaluation();
        }
        self.experts.push(Expert {
            name,
            weight,
            cpvs,
            partitions,
            discount_rate: None,
            individual_boe: None,
            adjusted_boe: None,
        });
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<&Expert> {
        self.expert(name)
            .ok_or_else(|| EvidenceError::UnknownExpert(name.to_string()))
    }

    /// `ω_k / max ω` for every expert, in insertion order.
    pub fn discount_rates(&self) -> Result<Vec<f64>> {
        let weights: Vec<f64> = self.experts.iter().map(|e| e.weight).collect();
        discount_rates(&weights)
    }

    fn boes_of(&self, expert: &Expert) -> Vec<BodyOfEvidence> {
        expert
            .partitions
            .iter()
            .zip(&expert.cpvs)
            .map(|(partition, &cpv)| MassBuilder::build(&self.frame, partition, cpv))
            .collect()
    }

    fn fold_criteria(
        &self,
        expert: &Expert,
        combiner: &Combiner,
        trace: &mut CombinationTrace,
    ) -> Result<BodyOfEvidence> {
        let boes = self.boes_of(expert);
        if boes.is_empty() {
            return Ok(BodyOfEvidence::vacuous(&self.frame));
        }
        combiner.combine_all(&boes, trace)
    }

    /// One BOE per criterion for the named expert, in criterion order.
    pub fn criterion_boes(&self, expert: &str) -> Result<Vec<BodyOfEvidence>> {
        Ok(self.boes_of(self.lookup(expert)?))
    }

    /// Folds the named expert's criterion BOEs with `combiner`.
    ///
    /// A panel without criteria gives the vacuous BOE.
    pub fn individual_boe(
        &self,
        expert: &str,
        combiner: &Combiner,
        trace: &mut CombinationTrace,
    ) -> Result<BodyOfEvidence> {
        self.fold_criteria(self.lookup(expert)?, combiner, trace)
    }

    fn fold_all_experts(
        &self,
        combiner: &Combiner,
        parallel: bool,
    ) -> Result<Vec<(BodyOfEvidence, CombinationTrace)>> {
        let fold = |expert: &Expert| -> Result<(BodyOfEvidence, CombinationTrace)> {
            let mut trace = CombinationTrace::new();
            let boe = self.fold_criteria(expert, combiner, &mut trace)?;
            Ok((boe, trace))
        };

        #[cfg(feature = "parallel")]
        {
            if parallel {
                use rayon::prelude::*;
                return self.experts.par_iter().map(&fold).collect();
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            if parallel {
                tracing::debug!("built without the parallel feature, evaluating sequentially");
            }
        }

        self.experts.iter().map(&fold).collect()
    }

    /// Computes and caches discount rates, individual BOEs and adjusted
    /// BOEs for every expert.
    ///
    /// Returns each expert's criterion-fold trace, in insertion order.
    /// Parallel and sequential evaluation give identical results.
    pub fn evaluate(
        &mut self,
        combiner: &Combiner,
        parallel: bool,
    ) -> Result<Vec<CombinationTrace>> {
        let rates = self.discount_rates()?;
        let folded = self.fold_all_experts(combiner, parallel)?;

        let mut traces = Vec::with_capacity(folded.len());
        for ((expert, rate), (boe, trace)) in self.experts.iter_mut().zip(rates).zip(folded) {
            let adjusted = adjust_with_importance(&boe, rate);
            tracing::debug!(
                expert = %expert.name,
                rate,
                focal = boe.len(),
                "expert evaluated"
            );
            expert.discount_rate = Some(rate);
            expert.individual_boe = Some(boe);
            expert.adjusted_boe = Some(adjusted);
            traces.push(trace);
        }
        Ok(traces)
    }

    /// Folds the cached adjusted (or raw individual) BOEs of all experts
    /// in insertion order.
    ///
    /// # Errors
    ///
    /// [`EvidenceError::NoExperts`] for an empty panel,
    /// [`EvidenceError::NotEvaluated`] if [`evaluate`](Self::evaluate)
    /// has not run since the last change.
    pub fn group_boe(
        &self,
        combiner: &Combiner,
        use_adjusted: bool,
        trace: &mut CombinationTrace,
    ) -> Result<BodyOfEvidence> {
        if self.experts.is_empty() {
            return Err(EvidenceError::NoExperts);
        }
        let boes = self
            .experts
            .iter()
            .map(|e| {
                let cached = if use_adjusted {
                    e.adjusted_boe.as_ref()
                } else {
                    e.individual_boe.as_ref()
                };
                cached
                    .cloned()
                    .ok_or_else(|| EvidenceError::NotEvaluated(e.name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        combiner.combine_all(&boes, trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> ExpertPanel {
        let frame = Frame::new(["A", "B", "C"]).unwrap();
        ExpertPanel::new(frame, ["Cost", "Quality"]).unwrap()
    }

    fn alice() -> ExpertInput {
        ExpertInput::new("Alice")
            .with_weight(0.8)
            .with_cpv("Cost", 0.6)
            .with_cpv("Quality", 0.4)
            .with_preferences("Cost", [(vec!["A"], 3), (vec!["B", "C"], 1)])
            .with_preferences("Quality", [(vec!["B"], 2), (vec!["A", "C"], 1)])
    }

    fn bob() -> ExpertInput {
        ExpertInput::new("Bob")
            .with_weight(0.4)
            .with_cpv("Cost", 0.5)
            .with_cpv("Quality", 0.5)
            .with_preferences("Cost", [(vec!["A", "B"], 2), (vec!["C"], 1)])
    }

    #[test]
    fn test_rejects_bad_criteria() {
        let frame = Frame::new(["A"]).unwrap();
        assert!(matches!(
            ExpertPanel::new(frame.clone(), ["Cost", "Cost"]),
            Err(EvidenceError::InvalidCriterion(_))
        ));
        assert!(ExpertPanel::new(frame, [" "]).is_err());
    }

    #[test]
    fn test_add_expert_validation() {
        let mut p = panel();
        p.add_expert(alice()).unwrap();

        assert_eq!(
            p.add_expert(alice()).unwrap_err(),
            EvidenceError::DuplicateExpert("Alice".into())
        );
        assert_eq!(
            p.add_expert(ExpertInput::new("  ")).unwrap_err(),
            EvidenceError::EmptyExpertName
        );
        assert!(matches!(
            p.add_expert(bob().with_weight(1.5)).unwrap_err(),
            EvidenceError::WeightOutOfRange { .. }
        ));
        assert!(matches!(
            p.add_expert(bob().with_cpv("Cost", -0.1)).unwrap_err(),
            EvidenceError::CpvOutOfRange { .. }
        ));
        assert!(matches!(
            p.add_expert(bob().with_cpv("Cost", 0.7)).unwrap_err(),
            EvidenceError::CpvSumExceeded { .. }
        ));
        assert!(matches!(
            p.add_expert(bob().with_cpv("Speed", 0.0)).unwrap_err(),
            EvidenceError::UnknownCriterion { .. }
        ));
        assert_eq!(
            p.add_expert(ExpertInput::new("Carol").with_cpv("Cost", 1.0))
                .unwrap_err(),
            EvidenceError::MissingCpv {
                expert: "Carol".into(),
                criterion: "Quality".into()
            }
        );
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_cpv_sum_tolerance() {
        let mut p = panel();
        p.add_expert(
            ExpertInput::new("E")
                .with_cpv("Cost", 0.5)
                .with_cpv("Quality", 0.500_004),
        )
        .unwrap();
    }

    #[test]
    fn test_partition_errors_name_the_expert() {
        let mut p = panel();
        let err = p
            .add_expert(bob().with_preferences("Quality", [(vec!["A", "B"], 1)]))
            .unwrap_err();
        match err {
            EvidenceError::Expert { expert, source } => {
                assert_eq!(expert, "Bob");
                assert_eq!(
                    *source,
                    EvidenceError::MissingFromPartition {
                        criterion: "Quality".into(),
                        alternative: "C".into()
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_partition_abstains() {
        let mut p = panel();
        p.add_expert(bob()).unwrap();
        let boes = p.criterion_boes("Bob").unwrap();
        assert_eq!(boes.len(), 2);
        assert!(!boes[0].is_vacuous());
        assert!(boes[1].is_vacuous());
    }

    #[test]
    fn test_individual_boe_folds_criteria() {
        let mut p = panel();
        p.add_expert(alice()).unwrap();
        let combiner = Combiner::dempster();
        let mut trace = CombinationTrace::new();
        let boe = p.individual_boe("Alice", &combiner, &mut trace).unwrap();
        assert_eq!(trace.len(), 1);
        assert!((boe.total_mass() - 1.0).abs() < 1e-9);

        assert_eq!(
            p.individual_boe("Zed", &combiner, &mut trace).unwrap_err(),
            EvidenceError::UnknownExpert("Zed".into())
        );
    }

    #[test]
    fn test_no_criteria_is_vacuous() {
        let frame = Frame::new(["A", "B"]).unwrap();
        let mut p = ExpertPanel::new(frame, Vec::<String>::new()).unwrap();
        p.add_expert(ExpertInput::new("E")).unwrap();
        let mut trace = CombinationTrace::new();
        let boe = p
            .individual_boe("E", &Combiner::yager(), &mut trace)
            .unwrap();
        assert!(boe.is_vacuous());
        assert!(trace.is_empty());
    }

    #[test]
    fn test_evaluate_caches_derived_fields() {
        let mut p = panel();
        p.add_expert(alice()).unwrap();
        p.add_expert(bob()).unwrap();

        let traces = p.evaluate(&Combiner::dempster(), false).unwrap();
        assert_eq!(traces.len(), 2);

        let a = p.expert("Alice").unwrap();
        let b = p.expert("Bob").unwrap();
        assert!(a.is_evaluated() && b.is_evaluated());
        assert!((a.discount_rate().unwrap() - 1.0).abs() < 1e-12);
        assert!((b.discount_rate().unwrap() - 0.5).abs() < 1e-12);
        // the top expert is not discounted
        assert_eq!(a.adjusted_boe(), a.individual_boe());
        assert!(b.adjusted_boe().unwrap().theta_mass() > b.individual_boe().unwrap().theta_mass());
    }

    #[test]
    fn test_group_boe_requires_evaluation() {
        let mut p = panel();
        let mut trace = CombinationTrace::new();
        assert_eq!(
            p.group_boe(&Combiner::dempster(), true, &mut trace)
                .unwrap_err(),
            EvidenceError::NoExperts
        );

        p.add_expert(alice()).unwrap();
        assert_eq!(
            p.group_boe(&Combiner::dempster(), true, &mut trace)
                .unwrap_err(),
            EvidenceError::NotEvaluated("Alice".into())
        );

        p.evaluate(&Combiner::dempster(), false).unwrap();
        p.add_expert(bob()).unwrap();
        assert!(p.group_boe(&Combiner::dempster(), true, &mut trace).is_err());
    }

    #[test]
    fn test_group_boe_adjusted_vs_raw() {
        let mut p = panel();
        p.add_expert(alice()).unwrap();
        p.add_expert(bob()).unwrap();
        let combiner = Combiner::dempster();
        p.evaluate(&combiner, false).unwrap();

        let mut t1 = CombinationTrace::new();
        let mut t2 = CombinationTrace::new();
        let adjusted = p.group_boe(&combiner, true, &mut t1).unwrap();
        let raw = p.group_boe(&combiner, false, &mut t2).unwrap();
        assert_eq!(t1.len(), 1);
        assert!(!adjusted.approx_eq(&raw, 1e-9));
    }

    #[test]
    fn test_zero_weights_rejected_on_evaluate() {
        let mut p = panel();
        p.add_expert(alice().with_weight(0.0)).unwrap();
        assert_eq!(
            p.evaluate(&Combiner::dempster(), false).unwrap_err(),
            EvidenceError::ZeroExpertWeights
        );
    }

    // sequential on both sides unless built with the parallel feature
    #[test]
    fn test_parallel_flag_matches_sequential() {
        let mut seq = panel();
        seq.add_expert(alice()).unwrap();
        seq.add_expert(bob()).unwrap();
        let mut par = seq.clone();

        let combiner = Combiner::adaptive(0.2);
        let t_seq = seq.evaluate(&combiner, false).unwrap();
        let t_par = par.evaluate(&combiner, true).unwrap();
        assert_eq!(t_seq, t_par);
        assert_eq!(seq, par);
    }
}
