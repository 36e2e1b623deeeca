//! Expert aggregation.
//!
//! Each expert contributes one BOE per criterion. These are folded into
//! the expert's *individual* BOE, discounted by the expert's relative
//! importance into an *adjusted* BOE, and the adjusted BOEs of all experts
//! are folded into the *group* BOE.
//!
//! ```text
//! criterion BOEs ─fold→ individual ─discount(ω*)→ adjusted ─fold (all experts)→ group
//! ```
//!
//! # References
//!
//! - Beynon (2006), "The role of the DS/AHP in identifying inter-group
//!   alliances and majority rule within group decision making"
//! - Shafer (1976), "A Mathematical Theory of Evidence", ch. 11 (discounting)

mod discount;
mod panel;
mod types;

pub use discount::{adjust_with_importance, discount_rates, IDENTITY_RATE_EPSILON};
pub use panel::{ExpertPanel, CPV_SUM_TOLERANCE};
pub use types::{Expert, ExpertInput};
