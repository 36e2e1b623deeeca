//! Ranked preference partitions.

use crate::error::{EvidenceError, Result};
use crate::frame::{FocalElement, Frame};
use std::collections::HashSet;

/// One group of alternatives an expert considers equally preferable
/// under a criterion, with its preference rank (higher = more preferred).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferenceGroup {
    members: FocalElement,
    rank: u32,
}

impl PreferenceGroup {
    pub fn members(&self) -> &FocalElement {
        &self.members
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }
}

/// A partition of the whole frame into ranked groups, for one
/// (expert, criterion) pair.
///
/// Construction enforces the structural invariants:
///
/// - every group is non-empty and refers only to known alternatives,
/// - ranks are positive and pairwise distinct,
/// - every alternative of the frame lands in exactly one group.
///
/// An [`unranked`](PreferencePartition::unranked) partition has no groups
/// at all and stands for an expert abstaining on the criterion.
///
/// # Examples
///
/// ```
/// use u_evidence::frame::Frame;
/// use u_evidence::mass::PreferencePartition;
///
/// let frame = Frame::new(["A", "B", "C"]).unwrap();
/// let p = PreferencePartition::new(&frame, "Cost", [(vec!["A"], 3), (vec!["B", "C"], 1)]).unwrap();
/// assert_eq!(p.groups().len(), 2);
///
/// // "C" is missing
/// assert!(PreferencePartition::new(&frame, "Cost", [(vec!["A"], 3), (vec!["B"], 1)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferencePartition {
    groups: Vec<PreferenceGroup>,
}

impl PreferencePartition {
    /// Validates and builds a partition from `(labels, rank)` pairs.
    ///
    /// `criterion` is only used to make error messages specific.
    pub fn new<G, L, S>(frame: &Frame, criterion: &str, groups: G) -> Result<Self>
    where
        G: IntoIterator<Item = (L, u32)>,
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut assigned = vec![false; frame.len()];
        let mut ranks = HashSet::new();
        let mut out = Vec::new();

        for (g, (labels, rank)) in groups.into_iter().enumerate() {
            if rank == 0 {
                return Err(EvidenceError::NonPositiveRank {
                    criterion: criterion.to_string(),
                    rank,
                });
            }
            if !ranks.insert(rank) {
                return Err(EvidenceError::DuplicateRank {
                    criterion: criterion.to_string(),
                    rank,
                });
            }

            let mut indices = Vec::new();
            for label in labels {
                let label = label.as_ref();
                let idx = frame
                    .index_of(label)
                    .ok_or_else(|| EvidenceError::UnknownAlternative(label.to_string()))?;
                if assigned[idx] {
                    return Err(EvidenceError::AssignedTwice {
                        criterion: criterion.to_string(),
                        alternative: label.to_string(),
                    });
                }
                assigned[idx] = true;
                indices.push(idx);
            }

            if indices.is_empty() {
                return Err(EvidenceError::EmptyGroup {
                    criterion: criterion.to_string(),
                    group: g,
                });
            }

            out.push(PreferenceGroup {
                members: FocalElement::from_indices(frame.len(), indices),
                rank,
            });
        }

        if let Some(missing) = assigned.iter().position(|&a| !a) {
            return Err(EvidenceError::MissingFromPartition {
                criterion: criterion.to_string(),
                alternative: frame.label(missing).unwrap_or_default().to_string(),
            });
        }

        Ok(Self { groups: out })
    }

    /// A partition with no groups: the expert expresses no preference.
    pub fn unranked() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[PreferenceGroup] {
        &self.groups
    }

    pub fn is_unranked(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of all ranks, `Σ a_j`.
    pub fn rank_sum(&self) -> u64 {
        self.groups.iter().map(|g| u64::from(g.rank)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(["A", "B", "C", "D"]).unwrap()
    }

    #[test]
    fn test_valid_partition() {
        let frame = frame();
        let p = PreferencePartition::new(
            &frame,
            "Quality",
            [(vec!["A", "C"], 5), (vec!["B"], 2), (vec!["D"], 1)],
        )
        .unwrap();
        assert_eq!(p.groups().len(), 3);
        assert_eq!(p.rank_sum(), 8);
        assert_eq!(p.groups()[0].members(), &frame.subset(["C", "A"]).unwrap());
    }

    #[test]
    fn test_missing_alternative_rejected() {
        let frame = frame();
        let err = PreferencePartition::new(&frame, "Quality", [(vec!["A", "B"], 2), (vec!["D"], 1)])
            .unwrap_err();
        assert_eq!(
            err,
            EvidenceError::MissingFromPartition {
                criterion: "Quality".into(),
                alternative: "C".into(),
            }
        );
    }

    #[test]
    fn test_alternative_in_two_groups_rejected() {
        let frame = frame();
        let err = PreferencePartition::new(
            &frame,
            "Quality",
            [(vec!["A", "B"], 2), (vec!["B", "C", "D"], 1)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            EvidenceError::AssignedTwice {
                criterion: "Quality".into(),
                alternative: "B".into(),
            }
        );
    }

    #[test]
    fn test_rank_rules() {
        let frame = frame();
        let zero = PreferencePartition::new(&frame, "Q", [(vec!["A", "B", "C", "D"], 0)]);
        assert!(matches!(zero, Err(EvidenceError::NonPositiveRank { rank: 0, .. })));

        let dup = PreferencePartition::new(&frame, "Q", [(vec!["A", "B"], 2), (vec!["C", "D"], 2)]);
        assert!(matches!(dup, Err(EvidenceError::DuplicateRank { rank: 2, .. })));
    }

    #[test]
    fn test_empty_group_and_unknown_label() {
        let frame = frame();
        let empty = PreferencePartition::new(
            &frame,
            "Q",
            [(vec!["A", "B", "C", "D"], 2), (Vec::<&str>::new(), 1)],
        );
        assert!(matches!(empty, Err(EvidenceError::EmptyGroup { group: 1, .. })));

        let unknown = PreferencePartition::new(&frame, "Q", [(vec!["A", "B", "C", "D", "E"], 1)]);
        assert_eq!(
            unknown.unwrap_err(),
            EvidenceError::UnknownAlternative("E".into())
        );
    }

    #[test]
    fn test_unranked() {
        let p = PreferencePartition::unranked();
        assert!(p.is_unranked());
        assert_eq!(p.rank_sum(), 0);
    }
}
