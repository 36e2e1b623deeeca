//! Error taxonomy for the evidence engine.
//!
//! Only structural input problems surface as errors. Degenerate evidence
//! (total conflict, zero denominators, zero discounted mass) is recovered
//! locally by the component that meets it and never reaches this type.

/// Errors raised by validation and by operations that cannot proceed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvidenceError {
    #[error("frame has no alternatives")]
    EmptyFrame,

    #[error("alternative label must not be empty")]
    EmptyAlternative,

    #[error("alternative '{0}' appears more than once in the frame")]
    DuplicateAlternative(String),

    #[error("unknown alternative '{0}'")]
    UnknownAlternative(String),

    #[error("alternative index {index} out of range for a frame of {alternatives}")]
    IndexOutOfRange { index: usize, alternatives: usize },

    #[error("evidence over {found} alternatives cannot be combined with a frame of {expected}")]
    FrameMismatch { expected: usize, found: usize },

    #[error("criterion '{criterion}': preference group {group} is empty")]
    EmptyGroup { criterion: String, group: usize },

    #[error("criterion '{criterion}': rank {rank} is not a positive integer")]
    NonPositiveRank { criterion: String, rank: u32 },

    #[error("criterion '{criterion}': rank {rank} is assigned to more than one group")]
    DuplicateRank { criterion: String, rank: u32 },

    #[error("criterion '{criterion}': alternative '{alternative}' is missing from the partition")]
    MissingFromPartition {
        criterion: String,
        alternative: String,
    },

    #[error("criterion '{criterion}': alternative '{alternative}' is assigned to more than one group")]
    AssignedTwice {
        criterion: String,
        alternative: String,
    },

    #[error("expert name must not be empty")]
    EmptyExpertName,

    #[error("expert '{0}' is already registered")]
    DuplicateExpert(String),

    #[error("expert '{expert}': weight {weight} outside [0, 1]")]
    WeightOutOfRange { expert: String, weight: f64 },

    #[error("expert '{expert}': CPV {cpv} for criterion '{criterion}' outside [0, 1]")]
    CpvOutOfRange {
        expert: String,
        criterion: String,
        cpv: f64,
    },

    #[error("expert '{expert}': CPV sum {sum:.6} exceeds 1")]
    CpvSumExceeded { expert: String, sum: f64 },

    #[error("expert '{expert}': unknown criterion '{criterion}'")]
    UnknownCriterion { expert: String, criterion: String },

    #[error("expert '{expert}': no CPV given for criterion '{criterion}'")]
    MissingCpv { expert: String, criterion: String },

    #[error("criterion name '{0}' is empty or duplicated")]
    InvalidCriterion(String),

    #[error("expert '{expert}': {source}")]
    Expert {
        expert: String,
        #[source]
        source: Box<EvidenceError>,
    },

    #[error("expert '{0}' is not part of this panel")]
    UnknownExpert(String),

    #[error("panel has no experts")]
    NoExperts,

    #[error("all expert weights are zero")]
    ZeroExpertWeights,

    #[error("invalid mass assignment: {0}")]
    InvalidMass(String),

    #[error("at least one body of evidence is required")]
    NoEvidence,

    #[error("expert '{0}' has not been evaluated yet")]
    NotEvaluated(String),

    #[error("subset lattice over {alternatives} alternatives exceeds the limit of {limit}")]
    LatticeTooLarge { alternatives: usize, limit: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EvidenceError>;
