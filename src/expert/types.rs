//! Expert input and evaluated expert records.

use crate::boe::BodyOfEvidence;
use crate::mass::PreferencePartition;

/// Raw ranked groups for one criterion, as given by the caller.
pub(crate) type RawGroups = Vec<(Vec<String>, u32)>;

/// Unvalidated description of one expert, assembled with a builder.
///
/// Nothing is checked until the input is handed to
/// [`ExpertPanel::add_expert`](super::ExpertPanel::add_expert).
///
/// # Examples
///
/// ```
/// use u_evidence::expert::ExpertInput;
///
/// let input = ExpertInput::new("Alice")
///     .with_weight(0.8)
///     .with_cpv("Cost", 0.6)
///     .with_cpv("Quality", 0.4)
///     .with_preferences("Cost", [(vec!["A"], 2), (vec!["B", "C"], 1)])
///     .with_abstention("Quality");
/// assert_eq!(input.name(), "Alice");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExpertInput {
    pub(crate) name: String,
    pub(crate) weight: f64,
    pub(crate) cpvs: Vec<(String, f64)>,
    pub(crate) preferences: Vec<(String, Option<RawGroups>)>,
}

impl ExpertInput {
    /// Starts an expert with full weight and no judgments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: 1.0,
            cpvs: Vec::new(),
            preferences: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the expert's importance weight, expected in `[0, 1]`.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the criterion priority value for `criterion`. A repeated
    /// criterion replaces the earlier value.
    pub fn with_cpv(mut self, criterion: impl Into<String>, cpv: f64) -> Self {
        let criterion = criterion.into();
        match self.cpvs.iter_mut().find(|(c, _)| *c == criterion) {
            Some(entry) => entry.1 = cpv,
            None => self.cpvs.push((criterion, cpv)),
        }
        self
    }

    /// Sets the ranked groups for `criterion` as `(labels, rank)` pairs.
    pub fn with_preferences<G, L, S>(self, criterion: impl Into<String>, groups: G) -> Self
    where
        G: IntoIterator<Item = (L, u32)>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let groups = groups
            .into_iter()
            .map(|(labels, rank)| (labels.into_iter().map(Into::into).collect(), rank))
            .collect();
        self.set_preferences(criterion.into(), Some(groups))
    }

    /// Marks the expert as abstaining on `criterion`. Criteria with no
    /// preferences at all are treated the same way.
    pub fn with_abstention(self, criterion: impl Into<String>) -> Self {
        self.set_preferences(criterion.into(), None)
    }

    fn set_preferences(mut self, criterion: String, groups: Option<RawGroups>) -> Self {
        match self.preferences.iter_mut().find(|(c, _)| *c == criterion) {
            Some(entry) => entry.1 = groups,
            None => self.preferences.push((criterion, groups)),
        }
        self
    }
}

/// A validated expert within a panel.
///
/// CPVs and partitions are stored in the panel's criterion order. The
/// derived fields are empty until the panel is evaluated, and are then
/// filled once for the run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expert {
    pub(crate) name: String,
    pub(crate) weight: f64,
    pub(crate) cpvs: Vec<f64>,
    pub(crate) partitions: Vec<PreferencePartition>,

    pub(crate) discount_rate: Option<f64>,
    pub(crate) individual_boe: Option<BodyOfEvidence>,
    pub(crate) adjusted_boe: Option<BodyOfEvidence>,
}

impl Expert {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// CPVs in the panel's criterion order.
    pub fn cpvs(&self) -> &[f64] {
        &self.cpvs
    }

    /// Partitions in the panel's criterion order; abstentions are
    /// unranked.
    pub fn partitions(&self) -> &[PreferencePartition] {
        &self.partitions
    }

    /// `ω / max ω`, available after evaluation.
    pub fn discount_rate(&self) -> Option<f64> {
        self.discount_rate
    }

    /// Combination of this expert's criterion BOEs, available after
    /// evaluation.
    pub fn individual_boe(&self) -> Option<&BodyOfEvidence> {
        self.individual_boe.as_ref()
    }

    /// Individual BOE discounted by the expert's importance, available
    /// after evaluation.
    pub fn adjusted_boe(&self) -> Option<&BodyOfEvidence> {
        self.adjusted_boe.as_ref()
    }

    pub fn is_evaluated(&self) -> bool {
        self.discount_rate.is_some() && self.individual_boe.is_some() && self.adjusted_boe.is_some()
    }

    pub(crate) fn clear_evaluation(&mut self) {
        self.discount_rate = None;
        self.individual_boe = None;
        self.adjusted_boe = None;
    }
}
