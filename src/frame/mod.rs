//! Frame of discernment and focal elements.
//!
//! Alternatives are mapped to dense indices once, and every subset of the
//! frame is a fixed-width bit-set over those indices. This gives focal
//! elements value equality and cheap hashing, and keeps intersection and
//! subset tests proportional to `n / 64` words rather than `n` labels.

mod focal;
mod table;

pub use focal::FocalElement;
pub use table::Frame;
