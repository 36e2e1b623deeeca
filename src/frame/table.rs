//! Alternative-index table.

use super::focal::FocalElement;
use crate::error::{EvidenceError, Result};
use std::collections::HashMap;

/// The frame of discernment (Θ): the ordered set of alternatives under
/// consideration.
///
/// Every alternative gets a stable index equal to its position in the
/// input sequence. That order is also the tie-break order used by the
/// ranker.
///
/// # Examples
///
/// ```
/// use u_evidence::frame::Frame;
///
/// let frame = Frame::new(["A", "B", "C"]).unwrap();
/// let ab = frame.subset(["B", "A"]).unwrap();
/// assert_eq!(frame.describe(&ab), "{A, B}");
/// assert_eq!(frame.describe(&frame.theta()), "Θ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl Frame {
    /// Creates a frame from unique, non-empty labels.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(EvidenceError::EmptyFrame);
        }

        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(EvidenceError::EmptyAlternative);
            }
            if index.insert(label.clone(), i).is_some() {
                return Err(EvidenceError::DuplicateAlternative(label.clone()));
            }
        }

        Ok(Self { labels, index })
    }

    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false` for a successfully constructed frame.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Alternative labels in frame order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, idx: usize) -> Option<&str> {
        self.labels.get(idx).map(String::as_str)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// The universal set Θ.
    pub fn theta(&self) -> FocalElement {
        FocalElement::full(self.len())
    }

    /// The singleton `{alternative idx}`.
    pub fn singleton(&self, idx: usize) -> FocalElement {
        FocalElement::from_indices(self.len(), [idx])
    }

    /// Builds a subset from labels. Unknown labels are an error; the
    /// result may be empty if no labels are given.
    pub fn subset<I, S>(&self, labels: I) -> Result<FocalElement>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = FocalElement::empty(self.len());
        for label in labels {
            let label = label.as_ref();
            let idx = self
                .index_of(label)
                .ok_or_else(|| EvidenceError::UnknownAlternative(label.to_string()))?;
            set.insert(idx);
        }
        Ok(set)
    }

    /// Human-readable form of a focal element: `Θ` for the universal set,
    /// otherwise the member labels in frame order, e.g. `{A, C}`.
    pub fn describe(&self, focal: &FocalElement) -> String {
        if *focal == self.theta() {
            return "Θ".to_string();
        }
        let members: Vec<&str> = focal
            .indices()
            .filter_map(|i| self.label(i))
            .collect();
        format!("{{{}}}", members.join(", "))
    }
}
