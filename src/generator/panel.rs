//! Random expert panels.

use super::config::{GeneratorConfig, WeightDistribution};
use crate::error::Result;
use crate::expert::{ExpertInput, ExpertPanel};
use crate::frame::Frame;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const CRITERION_NAMES: [&str; 5] = ["Quality", "Cost", "Reliability", "Usability", "Performance"];

/// Highest rank drawn when fewer groups than this are needed.
const RANK_SCALE: u32 = 7;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Generates valid synthetic decision problems.
///
/// Every generated expert passes [`ExpertPanel::add_expert`] validation:
/// weights lie in `[0.3, 1.0]`, CPVs sum to at most 1, and each
/// (expert, criterion) gets a full ranked partition of the frame.
///
/// # Examples
///
/// ```
/// use u_evidence::generator::{GeneratorConfig, PanelGenerator};
///
/// let panel = PanelGenerator::generate(&GeneratorConfig::default().with_seed(42)).unwrap();
/// assert_eq!(panel.frame().label(0), Some("A001"));
/// assert_eq!(panel.len(), 4);
/// ```
pub struct PanelGenerator;

impl PanelGenerator {
    /// Generates a panel from `config`. The same seed gives the same panel.
    pub fn generate(config: &GeneratorConfig) -> Result<ExpertPanel> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));

        let alternatives = Self::alternatives(config.alternatives);
        let criteria = Self::criteria(config.criteria);
        let weights = Self::weights(config.experts, config.weights, &mut rng);

        let frame = Frame::new(alternatives.iter().cloned())?;
        let mut panel = ExpertPanel::new(frame, criteria.iter().cloned())?;

        for (k, weight) in weights.into_iter().enumerate() {
            let mut input = ExpertInput::new(format!("E{}", k + 1)).with_weight(weight);
            for (criterion, cpv) in criteria.iter().zip(Self::cpvs(criteria.len(), &mut rng)) {
                let groups = Self::partition(&alternatives, config.max_groups, &mut rng);
                input = input
                    .with_cpv(criterion.as_str(), cpv)
                    .with_preferences(criterion.as_str(), groups);
            }
            panel.add_expert(input)?;
        }

        tracing::debug!(
            alternatives = config.alternatives,
            criteria = config.criteria,
            experts = config.experts,
            "generated panel"
        );
        Ok(panel)
    }

    /// `A001`, `A002`, …
    pub fn alternatives(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("A{i:03}")).collect()
    }

    /// Named criteria while the base list lasts, `Criterion_i` beyond.
    pub fn criteria(m: usize) -> Vec<String> {
        if m <= CRITERION_NAMES.len() {
            CRITERION_NAMES[..m].iter().map(|s| s.to_string()).collect()
        } else {
            (1..=m).map(|i| format!("Criterion_{i}")).collect()
        }
    }

    pub fn weights<R: Rng>(k: usize, distribution: WeightDistribution, rng: &mut R) -> Vec<f64> {
        match distribution {
            WeightDistribution::Uniform => (0..k)
                .map(|_| round_to(rng.random_range(0.3..=1.0), 2))
                .collect(),
            WeightDistribution::Decreasing if k <= 1 => vec![1.0; k],
            WeightDistribution::Decreasing => (0..k)
                .map(|i| round_to(1.0 - i as f64 * 0.7 / (k - 1) as f64, 2))
                .collect(),
        }
    }

    /// Random CPVs normalized to sum 1 and rounded to three decimals.
    ///
    /// Rounding can overshoot; the excess is taken from the largest value
    /// so the sum never exceeds 1.
    pub fn cpvs<R: Rng>(m: usize, rng: &mut R) -> Vec<f64> {
        if m == 0 {
            return Vec::new();
        }
        let raw: Vec<f64> = (0..m).map(|_| rng.random::<f64>()).collect();
        let total: f64 = raw.iter().sum();
        let mut cpvs: Vec<f64> = if total > 0.0 {
            raw.iter().map(|v| round_to(v / total, 3)).collect()
        } else {
            vec![round_to(1.0 / m as f64, 3); m]
        };

        let excess = cpvs.iter().sum::<f64>() - 1.0;
        if excess > 0.0 {
            let largest = cpvs
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap_or(0);
            cpvs[largest] = (cpvs[largest] - excess).max(0.0);
        }
        cpvs
    }

    /// A random ranked partition of `alternatives` into
    /// `1..=min(max_groups, n)` groups with distinct ranks.
    pub fn partition<R: Rng>(
        alternatives: &[String],
        max_groups: usize,
        rng: &mut R,
    ) -> Vec<(Vec<String>, u32)> {
        let n = alternatives.len();
        if n == 0 {
            return Vec::new();
        }
        let groups = rng.random_range(1..=max_groups.clamp(1, n));

        let mut shuffled = alternatives.to_vec();
        shuffled.shuffle(rng);

        let mut cuts: Vec<usize> = (1..n).collect();
        cuts.shuffle(rng);
        cuts.truncate(groups - 1);
        cuts.sort_unstable();

        let max_rank = RANK_SCALE.max(groups as u32);
        let mut ranks: Vec<u32> = (1..=max_rank).collect();
        ranks.shuffle(rng);

        let mut out = Vec::with_capacity(groups);
        let mut start = 0;
        for (end, rank) in cuts.into_iter().chain(std::iter::once(n)).zip(ranks) {
            out.push((shuffled[start..end].to_vec(), rank));
            start = end;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mass::PreferencePartition;
    use std::collections::HashSet;

    #[test]
    fn test_alternative_and_criterion_names() {
        assert_eq!(PanelGenerator::alternatives(3), vec!["A001", "A002", "A003"]);
        assert_eq!(PanelGenerator::criteria(2), vec!["Quality", "Cost"]);
        let many = PanelGenerator::criteria(6);
        assert_eq!(many[0], "Criterion_1");
        assert_eq!(many[5], "Criterion_6");
    }

    #[test]
    fn test_weights() {
        let mut rng = StdRng::seed_from_u64(1);
        for w in PanelGenerator::weights(50, WeightDistribution::Uniform, &mut rng) {
            assert!((0.3..=1.0).contains(&w));
            assert!((w * 100.0 - (w * 100.0).round()).abs() < 1e-9);
        }

        let dec = PanelGenerator::weights(3, WeightDistribution::Decreasing, &mut rng);
        assert!((dec[0] - 1.0).abs() < 1e-12);
        assert!((dec[1] - 0.65).abs() < 1e-12);
        assert!((dec[2] - 0.3).abs() < 1e-12);
        assert_eq!(
            PanelGenerator::weights(1, WeightDistribution::Decreasing, &mut rng),
            vec![1.0]
        );
    }

    #[test]
    fn test_cpvs_never_exceed_one() {
        let mut rng = StdRng::seed_from_u64(3);
        for m in 1..12 {
            let cpvs = PanelGenerator::cpvs(m, &mut rng);
            assert_eq!(cpvs.len(), m);
            let sum: f64 = cpvs.iter().sum();
            assert!(sum <= 1.0 + 1e-9, "sum {sum} for m = {m}");
            assert!(sum > 0.98);
            assert!(cpvs.iter().all(|&c| (0.0..=1.0).contains(&c)));
        }
    }

    #[test]
    fn test_partition_is_valid() {
        let alternatives = PanelGenerator::alternatives(12);
        let frame = Frame::new(alternatives.iter().cloned()).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let groups = PanelGenerator::partition(&alternatives, 9, &mut rng);
            assert!(!groups.is_empty() && groups.len() <= 9);
            let ranks: HashSet<u32> = groups.iter().map(|(_, r)| *r).collect();
            assert_eq!(ranks.len(), groups.len());
            assert!(PreferencePartition::new(&frame, "C", groups).is_ok());
        }
    }

    #[test]
    fn test_many_groups_extend_rank_scale() {
        let alternatives = PanelGenerator::alternatives(20);
        let mut rng = StdRng::seed_from_u64(5);
        let groups = PanelGenerator::partition(&alternatives, 20, &mut rng);
        let ranks: HashSet<u32> = groups.iter().map(|(_, r)| *r).collect();
        assert_eq!(ranks.len(), groups.len());
    }

    #[test]
    fn test_seed_reproducibility() {
        let config = GeneratorConfig::default().with_seed(99);
        let a = PanelGenerator::generate(&config).unwrap();
        let b = PanelGenerator::generate(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.criteria().len(), 3);
        assert_eq!(a.experts()[0].name(), "E1");
    }
}
