//! Bit-set focal elements.

#[cfg(feature = "serde")]
use crate::error::{EvidenceError, Result};

const WORD_BITS: usize = 64;

/// Number of `u64` words needed to hold `len` alternatives.
pub(crate) fn words_for(len: usize) -> usize {
    len.div_ceil(WORD_BITS)
}

/// A subset of the frame of discernment, stored as a bit-set over
/// alternative indices.
///
/// Two focal elements are equal exactly when they contain the same
/// alternatives, regardless of the order in which those were inserted.
/// The derived `Ord` is a total order over the underlying words, which
/// makes iteration over a [`BodyOfEvidence`](crate::boe::BodyOfEvidence)
/// deterministic.
///
/// Each element remembers the size of the [`Frame`](super::Frame) that
/// produced it, and elements from frames of different sizes never compare
/// equal. With the `serde` feature it is encoded as
/// `{"alternatives": n, "members": [i, ...]}` with ascending indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "FocalRepr", try_from = "FocalRepr")
)]
pub struct FocalElement {
    frame_len: usize,
    words: Box<[u64]>,
}

impl FocalElement {
    /// The empty subset of a frame with `len` alternatives.
    pub(crate) fn empty(len: usize) -> Self {
        Self {
            frame_len: len,
            words: vec![0u64; words_for(len)].into_boxed_slice(),
        }
    }

    /// The full subset (Θ) of a frame with `len` alternatives.
    pub(crate) fn full(len: usize) -> Self {
        let mut words = vec![u64::MAX; words_for(len)];
        let tail = len % WORD_BITS;
        if tail != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << tail) - 1;
            }
        }
        Self {
            frame_len: len,
            words: words.into_boxed_slice(),
        }
    }

    /// Builds a subset from alternative indices. Indices must be `< len`.
    pub(crate) fn from_indices<I: IntoIterator<Item = usize>>(len: usize, indices: I) -> Self {
        let mut set = Self::empty(len);
        for idx in indices {
            debug_assert!(idx < len, "alternative index {idx} out of range {len}");
            set.insert(idx);
        }
        set
    }

    /// Like [`from_indices`](Self::from_indices) but rejects indices
    /// outside the frame.
    #[cfg(feature = "serde")]
    pub(crate) fn checked<I: IntoIterator<Item = usize>>(len: usize, indices: I) -> Result<Self> {
        let mut set = Self::empty(len);
        for index in indices {
            if index >= len {
                return Err(EvidenceError::IndexOutOfRange {
                    index,
                    alternatives: len,
                });
            }
            set.insert(index);
        }
        Ok(set)
    }

    /// Number of alternatives in the frame this subset belongs to.
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    pub(crate) fn insert(&mut self, idx: usize) {
        self.words[idx / WORD_BITS] |= 1u64 << (idx % WORD_BITS);
    }

    /// Returns `true` if the alternative at `idx` belongs to this subset.
    pub fn contains(&self, idx: usize) -> bool {
        self.words
            .get(idx / WORD_BITS)
            .is_some_and(|w| w & (1u64 << (idx % WORD_BITS)) != 0)
    }

    /// Returns `true` if no alternative belongs to this subset.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Number of alternatives in the subset.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Set intersection.
    pub fn intersection(&self, other: &Self) -> Self {
        debug_assert_eq!(self.frame_len, other.frame_len);
        Self {
            frame_len: self.frame_len,
            words: self
                .words
                .iter()
                .zip(other.words.iter())
                .map(|(a, b)| a & b)
                .collect(),
        }
    }

    /// Returns `true` if the two subsets share at least one alternative.
    ///
    /// Equivalent to `!self.intersection(other).is_empty()` without
    /// allocating.
    pub fn intersects(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| a & b != 0)
    }

    /// Returns `true` if every alternative of `self` is also in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & !b == 0)
    }

    /// Iterates the alternative indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            (0..WORD_BITS)
                .filter(move |bit| word & (1u64 << bit) != 0)
                .map(move |bit| w * WORD_BITS + bit)
        })
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct FocalRepr {
    alternatives: usize,
    members: Vec<usize>,
}

#[cfg(feature = "serde")]
impl From<FocalElement> for FocalRepr {
    fn from(focal: FocalElement) -> Self {
        Self {
            alternatives: focal.frame_len,
            members: focal.indices().collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<FocalRepr> for FocalElement {
    type Error = EvidenceError;

    fn try_from(repr: FocalRepr) -> Result<Self> {
        Self::checked(repr.alternatives, repr.members)
    }
}
