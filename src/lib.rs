//! Dempster-Shafer evidence combination for group decision making.
//!
//! Implements the DS/AHP group-decision method: several experts rank
//! groups of alternatives under several criteria, and their uncertain,
//! possibly conflicting judgments are turned into bodies of evidence,
//! combined, and ranked.
//!
//! - **Frame**: the universal set Θ of alternatives, with bit-set focal
//!   elements.
//! - **Body of Evidence**: an immutable mass assignment over focal
//!   elements.
//! - **Mass Assignment**: ranked preference partition + criterion priority
//!   value → single-criterion BOE.
//! - **Combination**: conflict measurement and Dempster, Yager and
//!   conflict-adaptive rules, with a traced multi-source fold.
//! - **Expert Aggregation**: individual, importance-discounted and group
//!   BOEs over an expert panel.
//! - **Ranking**: belief/plausibility intervals, pessimism-weighted scores
//!   and a stable ranking.
//! - **Analysis**: configuration and the end-to-end pipeline.
//! - **Generator**: seeded synthetic panels for testing and benchmarking.
//!
//! # Architecture
//!
//! Data flows strictly forward:
//!
//! ```text
//! mass ─→ expert (combination over criteria, then experts) ─→ ranking
//! ```
//!
//! The crate is synchronous and performs no I/O. Reading decision
//! problems from files and presenting reports belong to consumers.
//!
//! # Example
//!
//! ```
//! use u_evidence::analysis::{AnalysisConfig, AnalysisRunner};
//! use u_evidence::combination::CombinationRule;
//! use u_evidence::expert::{ExpertInput, ExpertPanel};
//! use u_evidence::frame::Frame;
//!
//! let frame = Frame::new(["Car", "Bike", "Bus"]).unwrap();
//! let mut panel = ExpertPanel::new(frame, ["Cost", "Comfort"]).unwrap();
//!
//! panel
//!     .add_expert(
//!         ExpertInput::new("Ann")
//!             .with_weight(1.0)
//!             .with_cpv("Cost", 0.3)
//!             .with_cpv("Comfort", 0.7)
//!             .with_preferences("Cost", [(vec!["Bike"], 3), (vec!["Bus"], 2), (vec!["Car"], 1)])
//!             .with_preferences("Comfort", [(vec!["Car"], 2), (vec!["Bike", "Bus"], 1)]),
//!     )
//!     .unwrap();
//! panel
//!     .add_expert(
//!         ExpertInput::new("Ben")
//!             .with_weight(0.6)
//!             .with_cpv("Cost", 0.8)
//!             .with_cpv("Comfort", 0.2)
//!             .with_preferences("Cost", [(vec!["Bike", "Bus"], 2), (vec!["Car"], 1)]),
//!     )
//!     .unwrap();
//!
//! let config = AnalysisConfig::default().with_rule(CombinationRule::Adaptive);
//! let report = AnalysisRunner::run(&mut panel, &config).unwrap();
//! assert_eq!(report.ranking.len(), 3);
//! assert!(report.optimal().is_some());
//! ```

pub mod analysis;
pub mod boe;
pub mod combination;
pub mod error;
pub mod expert;
pub mod frame;
pub mod generator;
pub mod mass;
pub mod ranking;

pub use error::{EvidenceError, Result};
