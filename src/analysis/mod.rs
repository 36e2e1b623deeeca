//! Full DS/AHP group-decision analysis.
//!
//! [`AnalysisRunner::run`] drives the whole pipeline over an
//! [`ExpertPanel`](crate::expert::ExpertPanel): criterion BOEs, individual
//! and adjusted expert BOEs, the group BOE, belief intervals and the
//! final ranking. Everything is returned in an [`AnalysisReport`]; nothing
//! is printed.

mod config;
mod runner;

pub use config::AnalysisConfig;
pub use runner::{AnalysisReport, AnalysisRunner, ExpertSummary};
