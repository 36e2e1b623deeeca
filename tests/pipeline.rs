//! End-to-end analyses over small hand-built panels and generated ones.

use u_evidence::analysis::{AnalysisConfig, AnalysisRunner};
use u_evidence::boe::BodyOfEvidence;
use u_evidence::combination::{BaseRule, CombinationRule, CombinationTrace, Combiner};
use u_evidence::expert::{ExpertInput, ExpertPanel};
use u_evidence::frame::Frame;
use u_evidence::generator::{GeneratorConfig, PanelGenerator, WeightDistribution};
use u_evidence::EvidenceError;

fn unanimous_panel() -> ExpertPanel {
    let frame = Frame::new(["A", "B", "C"]).unwrap();
    let mut panel = ExpertPanel::new(frame, ["Cost", "Quality"]).unwrap();
    for (name, weight) in [("E1", 1.0), ("E2", 0.7), ("E3", 0.4)] {
        panel
            .add_expert(
                ExpertInput::new(name)
                    .with_weight(weight)
                    .with_cpv("Cost", 0.5)
                    .with_cpv("Quality", 0.5)
                    .with_preferences("Cost", [(vec!["A"], 3), (vec!["B"], 2), (vec!["C"], 1)])
                    .with_preferences("Quality", [(vec!["A"], 2), (vec!["B", "C"], 1)]),
            )
            .unwrap();
    }
    panel
}

/// Two equally weighted experts backing different alternatives; their
/// BOEs conflict with K ≈ 0.553.
fn split_panel() -> ExpertPanel {
    let frame = Frame::new(["A", "B", "C"]).unwrap();
    let mut panel = ExpertPanel::new(frame, ["Overall"]).unwrap();
    panel
        .add_expert(
            ExpertInput::new("Pro-A")
                .with_cpv("Overall", 1.0)
                .with_preferences("Overall", [(vec!["A"], 7), (vec!["B", "C"], 1)]),
        )
        .unwrap();
    panel
        .add_expert(
            ExpertInput::new("Pro-B")
                .with_cpv("Overall", 1.0)
                .with_preferences("Overall", [(vec!["B"], 7), (vec!["A", "C"], 1)]),
        )
        .unwrap();
    panel
}

#[test]
fn test_worked_example() {
    let frame = Frame::new(["A", "B"]).unwrap();
    let a = frame.subset(["A"]).unwrap();
    let b = frame.subset(["B"]).unwrap();
    let m1 = BodyOfEvidence::from_masses(&frame, [(a.clone(), 0.6), (frame.theta(), 0.4)]).unwrap();
    let m2 = BodyOfEvidence::from_masses(&frame, [(b.clone(), 0.5), (frame.theta(), 0.5)]).unwrap();
    let sources = [m1, m2];

    let mut trace = CombinationTrace::new();
    let dempster = Combiner::dempster().combine_all(&sources, &mut trace).unwrap();
    assert!((trace.steps()[0].conflict - 0.3).abs() < 1e-12);
    assert!((dempster.mass(&a) - 0.4286).abs() < 1e-4);
    assert!((dempster.mass(&b) - 0.2857).abs() < 1e-4);
    assert!((dempster.theta_mass() - 0.2857).abs() < 1e-4);

    let mut trace = CombinationTrace::new();
    let yager = Combiner::yager().combine_all(&sources, &mut trace).unwrap();
    assert!((yager.mass(&a) - 0.30).abs() < 1e-12);
    assert!((yager.mass(&b) - 0.20).abs() < 1e-12);
    assert!((yager.theta_mass() - 0.50).abs() < 1e-12);
}

#[test]
fn test_unanimous_panel_picks_the_same_winner_under_every_rule() {
    for rule in [
        CombinationRule::Dempster,
        CombinationRule::Yager,
        CombinationRule::Adaptive,
    ] {
        let mut panel = unanimous_panel();
        let report =
            AnalysisRunner::run(&mut panel, &AnalysisConfig::default().with_rule(rule)).unwrap();
        assert_eq!(report.optimal(), Some("A"), "rule {rule}");
        assert_eq!(report.group_trace.len(), 2);
        assert_eq!(report.experts.len(), 3);
    }
}

#[test]
fn test_yager_keeps_conflict_as_ignorance() {
    let mut panel = split_panel();
    let dempster = AnalysisRunner::run(&mut panel, &AnalysisConfig::default()).unwrap();
    let yager = AnalysisRunner::run(
        &mut panel,
        &AnalysisConfig::default().with_rule(CombinationRule::Yager),
    )
    .unwrap();

    let k = dempster.group_trace.steps()[0].conflict;
    assert!(k > 0.5 && k < 0.6);
    assert!(yager.group_boe.theta_mass() > dempster.group_boe.theta_mass());

    // symmetric panel: A and B tie, and ties keep frame order
    assert_eq!(yager.optimal(), Some("A"));
    let scores: Vec<f64> = yager.ranking.entries().iter().map(|e| e.score).collect();
    assert!((scores[0] - scores[1]).abs() < 1e-12);
}

#[test]
fn test_adaptive_switches_on_threshold() {
    let mut panel = split_panel();

    let low = AnalysisConfig::conflict_tolerant().with_conflict_threshold(0.4);
    let report = AnalysisRunner::run(&mut panel, &low).unwrap();
    let step = report.group_trace.steps()[0];
    assert_eq!(step.rule, BaseRule::Yager);
    assert_eq!(step.threshold, Some(0.4));
    assert_eq!(report.group_trace.rule_counts().yager, 1);

    let high = AnalysisConfig::conflict_tolerant().with_conflict_threshold(0.6);
    let report = AnalysisRunner::run(&mut panel, &high).unwrap();
    assert_eq!(report.group_trace.steps()[0].rule, BaseRule::Dempster);
    assert_eq!(report.group_trace.rule_counts().dempster, 1);
}

#[test]
fn test_pessimistic_scores_are_beliefs() {
    let mut panel = unanimous_panel();
    let report = AnalysisRunner::run(&mut panel, &AnalysisConfig::pessimistic()).unwrap();
    for entry in report.ranking.entries() {
        let interval = report.interval(&entry.alternative).unwrap();
        assert!((entry.score - interval.belief).abs() < 1e-12);
    }

    let report = AnalysisRunner::run(&mut panel, &AnalysisConfig::optimistic()).unwrap();
    for entry in report.ranking.entries() {
        let interval = report.interval(&entry.alternative).unwrap();
        assert!((entry.score - interval.plausibility).abs() < 1e-12);
    }
}

#[test]
fn test_raw_boes_ignore_weights() {
    let mut weighted = unanimous_panel();
    let frame = weighted.frame().clone();
    let mut flat = ExpertPanel::new(frame, ["Cost", "Quality"]).unwrap();
    for expert in ["E1", "E2", "E3"] {
        flat.add_expert(
            ExpertInput::new(expert)
                .with_cpv("Cost", 0.5)
                .with_cpv("Quality", 0.5)
                .with_preferences("Cost", [(vec!["A"], 3), (vec!["B"], 2), (vec!["C"], 1)])
                .with_preferences("Quality", [(vec!["A"], 2), (vec!["B", "C"], 1)]),
        )
        .unwrap();
    }

    let config = AnalysisConfig::default().with_adjusted_boe(false);
    let a = AnalysisRunner::run(&mut weighted, &config).unwrap();
    let b = AnalysisRunner::run(&mut flat, &config).unwrap();
    assert_eq!(a.group_boe, b.group_boe);
    assert_eq!(a.ranking, b.ranking);

    let adjusted = AnalysisRunner::run(&mut weighted, &AnalysisConfig::default()).unwrap();
    assert_ne!(adjusted.group_boe, a.group_boe);
}

#[test]
fn test_invalid_partition_is_rejected_with_context() {
    let mut panel = unanimous_panel();
    let err = panel
        .add_expert(
            ExpertInput::new("E4")
                .with_cpv("Cost", 0.5)
                .with_cpv("Quality", 0.5)
                .with_preferences("Cost", [(vec!["A", "B"], 2), (vec!["B", "C"], 1)]),
        )
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("E4"));
    assert!(msg.contains("Cost"));
    assert!(msg.contains("'B'"));
    assert!(matches!(err, EvidenceError::Expert { .. }));
    assert_eq!(panel.len(), 3);
}

/// Without the `parallel` feature the flag is accepted and both runs are
/// sequential; see the rayon-only variant below.
#[test]
fn test_parallel_and_sequential_reports_match() {
    let config = GeneratorConfig::default()
        .with_alternatives(25)
        .with_criteria(4)
        .with_experts(6)
        .with_max_groups(8)
        .with_weights(WeightDistribution::Decreasing)
        .with_seed(2024);
    let mut seq_panel = PanelGenerator::generate(&config).unwrap();
    let mut par_panel = seq_panel.clone();

    let base = AnalysisConfig::conflict_tolerant();
    let seq = AnalysisRunner::run(&mut seq_panel, &base).unwrap();
    let par = AnalysisRunner::run(&mut par_panel, &base.clone().with_parallel(true)).unwrap();
    assert_eq!(seq, par);
}

#[test]
fn test_group_focal_elements_describe_cleanly() {
    let mut panel = unanimous_panel();
    let report = AnalysisRunner::run(&mut panel, &AnalysisConfig::default()).unwrap();
    let frame = panel.frame();
    for (focal, mass) in report.group_boe.iter() {
        let text = frame.describe(focal);
        assert!(text == "Θ" || (text.starts_with('{') && text.ends_with('}')));
        assert!(mass > 0.0);
    }
}

#[cfg(feature = "parallel")]
#[test]
fn test_rayon_evaluation_matches_sequential() {
    let config = GeneratorConfig::default()
        .with_alternatives(40)
        .with_criteria(5)
        .with_experts(48)
        .with_max_groups(10)
        .with_seed(7);
    let mut seq_panel = PanelGenerator::generate(&config).unwrap();
    let mut par_panel = seq_panel.clone();

    for rule in [
        CombinationRule::Dempster,
        CombinationRule::Yager,
        CombinationRule::Adaptive,
    ] {
        let base = AnalysisConfig::default().with_rule(rule);
        let seq = AnalysisRunner::run(&mut seq_panel, &base).unwrap();
        let par = AnalysisRunner::run(&mut par_panel, &base.clone().with_parallel(true)).unwrap();
        assert_eq!(seq, par, "rule {rule}");
        assert_eq!(seq_panel, par_panel);
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_report_json_round_trip() {
    use u_evidence::analysis::AnalysisReport;

    let mut panel = split_panel();
    let report = AnalysisRunner::run(&mut panel, &AnalysisConfig::conflict_tolerant()).unwrap();

    let json = serde_json::to_string_pretty(&report).unwrap();
    assert!(json.contains("\"group_boe\""));
    assert!(json.contains("\"members\""));
    assert!(json.contains("\"rule\": \"adaptive\""));

    let back: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
    assert_eq!(back.group_boe.frame_len(), 3);
    assert_eq!(back.experts[1].adjusted_boe, report.experts[1].adjusted_boe);
}
