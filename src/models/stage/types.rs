use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::FunnelError;

/// Phase of the school acquisition pipeline.
///
/// Pipeline order:
/// - `Awareness` -> `Interest` -> `Intent` -> `Consideration`
/// - `Consideration` -> `DecisionYes` | `DecisionNo`
/// - `DecisionYes` and `DecisionNo` are terminal, mutually exclusive outcomes
///   that share the final pipeline index
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum FunnelStage {
    /// The school becomes aware of us through outreach.
    #[default]
    Awareness,

    /// The school engages with materials or asks questions.
    Interest,

    /// The school asks for a meeting or a proposal.
    Intent,

    /// The school evaluates the offer against its needs.
    Consideration,

    /// Partnership accepted; terminal.
    DecisionYes,

    /// Partnership declined; terminal.
    DecisionNo,
}

const ALL_STAGES: [FunnelStage; 6] = [
    FunnelStage::Awareness,
    FunnelStage::Interest,
    FunnelStage::Intent,
    FunnelStage::Consideration,
    FunnelStage::DecisionYes,
    FunnelStage::DecisionNo,
];

impl FunnelStage {
    /// Number of stages in the pipeline.
    pub const COUNT: usize = ALL_STAGES.len();

    /// All stages in pipeline order.
    pub fn all() -> &'static [FunnelStage] {
        &ALL_STAGES
    }

    /// Canonical wire value (`"decision_yes"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            FunnelStage::Awareness => "awareness",
            FunnelStage::Interest => "interest",
            FunnelStage::Intent => "intent",
            FunnelStage::Consideration => "consideration",
            FunnelStage::DecisionYes => "decision_yes",
            FunnelStage::DecisionNo => "decision_no",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FunnelStage::DecisionYes | FunnelStage::DecisionNo)
    }
}

impl std::fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunnelStage {
    type Err = FunnelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_STAGES
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| FunnelError::UnknownStage(s.to_string()))
    }
}

impl TryFrom<String> for FunnelStage {
    type Error = FunnelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
