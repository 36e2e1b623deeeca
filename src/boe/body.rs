//! Mass assignment over focal elements.

use crate::error::{EvidenceError, Result};
use crate::frame::{FocalElement, Frame};
use std::collections::BTreeMap;

/// Allowed deviation of a BOE's total mass from 1 before it is renormalized.
pub const MASS_TOLERANCE: f64 = 1e-4;

/// A body of evidence (basic probability assignment): a mapping from
/// focal elements to masses in `[0, 1]` that sum to 1.
///
/// Values are immutable once built. Combination, discounting and mass
/// construction all return new instances.
///
/// Iteration order follows the total order of [`FocalElement`], so two
/// runs over the same inputs visit focal elements identically.
///
/// With the `serde` feature a BOE is encoded as the frame size plus a list
/// of `{"members": [i, ...], "mass": m}` entries. Decoding applies the same
/// validation as [`from_masses`](Self::from_masses).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "BoeRepr", try_from = "BoeRepr")
)]
pub struct BodyOfEvidence {
    theta: FocalElement,
    masses: BTreeMap<FocalElement, f64>,
}

impl BodyOfEvidence {
    /// Total ignorance: `{Θ: 1.0}`.
    pub fn vacuous(frame: &Frame) -> Self {
        Self::vacuous_over(frame.theta())
    }

    pub(crate) fn vacuous_over(theta: FocalElement) -> Self {
        let mut masses = BTreeMap::new();
        masses.insert(theta.clone(), 1.0);
        Self { theta, masses }
    }

    /// Builds a BOE from explicit `(focal element, mass)` entries.
    ///
    /// Repeated focal elements accumulate. Zero-mass entries are dropped.
    /// A total that drifts from 1 by more than [`MASS_TOLERANCE`] is
    /// renormalized.
    ///
    /// # Errors
    ///
    /// Returns [`EvidenceError::InvalidMass`] for non-finite or negative
    /// masses, positive mass on the empty set, or a zero total, and
    /// [`EvidenceError::FrameMismatch`] for a focal element taken from a
    /// frame of another size.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_evidence::boe::BodyOfEvidence;
    /// use u_evidence::frame::Frame;
    ///
    /// let frame = Frame::new(["A", "B"]).unwrap();
    /// let a = frame.subset(["A"]).unwrap();
    /// let boe = BodyOfEvidence::from_masses(&frame, [(a.clone(), 0.6), (frame.theta(), 0.4)]).unwrap();
    /// assert!((boe.mass(&a) - 0.6).abs() < 1e-12);
    /// ```
    pub fn from_masses<I>(frame: &Frame, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (FocalElement, f64)>,
    {
        Self::validated(frame.theta(), entries, |focal| frame.describe(focal))
    }

    fn validated<I, D>(theta: FocalElement, entries: I, describe: D) -> Result<Self>
    where
        I: IntoIterator<Item = (FocalElement, f64)>,
        D: Fn(&FocalElement) -> String,
    {
        let mut masses: BTreeMap<FocalElement, f64> = BTreeMap::new();

        for (focal, mass) in entries {
            if focal.frame_len() != theta.frame_len() {
                return Err(EvidenceError::FrameMismatch {
                    expected: theta.frame_len(),
                    found: focal.frame_len(),
                });
            }
            if !mass.is_finite() || mass < 0.0 {
                return Err(EvidenceError::InvalidMass(format!(
                    "mass {mass} for {} is not a non-negative number",
                    describe(&focal)
                )));
            }
            if mass == 0.0 {
                continue;
            }
            if focal.is_empty() {
                return Err(EvidenceError::InvalidMass(
                    "the empty set cannot carry positive mass".into(),
                ));
            }
            *masses.entry(focal).or_insert(0.0) += mass;
        }

        let total: f64 = masses.values().sum();
        if total <= 0.0 {
            return Err(EvidenceError::InvalidMass("total mass is zero".into()));
        }

        Ok(Self { theta, masses }.renormalized())
    }

    /// Assembles a BOE from already-validated parts.
    pub(crate) fn from_parts(theta: FocalElement, masses: BTreeMap<FocalElement, f64>) -> Self {
        Self { theta, masses }
    }

    /// Divides every mass by the total when it has drifted from 1.
    pub(crate) fn renormalized(mut self) -> Self {
        let total = self.total_mass();
        if (total - 1.0).abs() > MASS_TOLERANCE && total > 0.0 {
            tracing::trace!(total, "renormalizing drifted mass assignment");
            for mass in self.masses.values_mut() {
                *mass /= total;
            }
        }
        self
    }

    /// Number of alternatives in the frame this BOE is defined over.
    pub fn frame_len(&self) -> usize {
        self.theta.frame_len()
    }

    /// The universal set this BOE is defined over.
    pub fn theta(&self) -> &FocalElement {
        &self.theta
    }

    /// Mass of `focal`, or 0 if it is not a focal element.
    pub fn mass(&self, focal: &FocalElement) -> f64 {
        self.masses.get(focal).copied().unwrap_or(0.0)
    }

    /// Mass of Θ (unresolved ignorance).
    pub fn theta_mass(&self) -> f64 {
        self.mass(&self.theta)
    }

    pub fn total_mass(&self) -> f64 {
        self.masses.values().sum()
    }

    /// Number of focal elements.
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Iterates `(focal element, mass)` pairs in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&FocalElement, f64)> + '_ {
        self.masses.iter().map(|(focal, &mass)| (focal, mass))
    }

    /// Returns `true` if all mass sits on Θ.
    pub fn is_vacuous(&self) -> bool {
        (self.theta_mass() - 1.0).abs() <= MASS_TOLERANCE
    }

    /// Element-wise comparison within `eps`, treating absent focal
    /// elements as zero mass.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.masses
            .keys()
            .chain(other.masses.keys())
            .all(|focal| (self.mass(focal) - other.mass(focal)).abs() <= eps)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct BoeRepr {
    alternatives: usize,
    masses: Vec<MassEntry>,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct MassEntry {
    members: Vec<usize>,
    mass: f64,
}

#[cfg(feature = "serde")]
impl From<BodyOfEvidence> for BoeRepr {
    fn from(boe: BodyOfEvidence) -> Self {
        Self {
            alternatives: boe.frame_len(),
            masses: boe
                .iter()
                .map(|(focal, mass)| MassEntry {
                    members: focal.indices().collect(),
                    mass,
                })
                .collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<BoeRepr> for BodyOfEvidence {
    type Error = EvidenceError;

    fn try_from(repr: BoeRepr) -> Result<Self> {
        if repr.alternatives == 0 {
            return Err(EvidenceError::EmptyFrame);
        }
        let len = repr.alternatives;
        let entries = repr
            .masses
            .into_iter()
            .map(|entry| -> Result<(FocalElement, f64)> {
                Ok((FocalElement::checked(len, entry.members)?, entry.mass))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::validated(FocalElement::full(len), entries, |focal| {
            format!("{:?}", focal.indices().collect::<Vec<_>>())
        })
    }
}
