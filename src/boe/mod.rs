//! Bodies of evidence (basic probability assignments).
//!
//! A [`BodyOfEvidence`] maps focal elements of a [`Frame`](crate::frame::Frame)
//! to masses summing to 1. Mass on Θ represents unresolved ignorance.

mod body;

pub use body::{BodyOfEvidence, MASS_TOLERANCE};
