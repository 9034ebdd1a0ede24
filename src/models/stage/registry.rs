//! Static stage metadata and pipeline positions

use serde::Serialize;

use super::types::FunnelStage;
use crate::error::FunnelError;

/// Display metadata for a funnel stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageDescriptor {
    pub stage: FunnelStage,
    pub label: &'static str,
    /// Color tag used by dashboards (slate, blue, orange, green, emerald, red)
    pub color: &'static str,
    pub description: &'static str,
}

/// Pipeline index shared by both decision outcomes.
///
/// Index 4 is intentionally unoccupied: `DecisionYes` and `DecisionNo` both sit at
/// the final index so their progress bars are identical.
pub const TERMINAL_INDEX: usize = FunnelStage::COUNT - 1;

static STAGES: [StageDescriptor; FunnelStage::COUNT] = [
    StageDescriptor {
        stage: FunnelStage::Awareness,
        label: "Awareness",
        color: "slate",
        description: "The school becomes aware of Edike through outreach.",
    },
    StageDescriptor {
        stage: FunnelStage::Interest,
        label: "Interest",
        color: "blue",
        description: "The school expresses curiosity—acknowledges, asks questions, or engages with materials.",
    },
    StageDescriptor {
        stage: FunnelStage::Intent,
        label: "Intent",
        color: "orange",
        description: "The school shows signals of intent, e.g., asks for a meeting or requests more information/proposal.",
    },
    StageDescriptor {
        stage: FunnelStage::Consideration,
        label: "Consideration",
        color: "green",
        description: "The school evaluates Edike against their needs.",
    },
    StageDescriptor {
        stage: FunnelStage::DecisionYes,
        label: "Decision - Yes",
        color: "emerald",
        description: "The school decides to move forward with a partnership.",
    },
    StageDescriptor {
        stage: FunnelStage::DecisionNo,
        label: "Decision - No",
        color: "red",
        description: "The school declines the partnership opportunity.",
    },
];

/// All stage descriptors in pipeline order.
pub fn list_stages() -> &'static [StageDescriptor] {
    &STAGES
}

pub fn describe(stage: FunnelStage) -> &'static StageDescriptor {
    let slot = match stage {
        FunnelStage::Awareness => 0,
        FunnelStage::Interest => 1,
        FunnelStage::Intent => 2,
        FunnelStage::Consideration => 3,
        FunnelStage::DecisionYes => 4,
        FunnelStage::DecisionNo => 5,
    };
    &STAGES[slot]
}

/// Describe a stage given as a raw string (URL parameter, file contents, CLI input).
pub fn describe_value(raw: &str) -> Result<&'static StageDescriptor, FunnelError> {
    raw.parse().map(describe)
}

/// Pipeline position in `[0, COUNT - 1]`.
///
/// Both decision outcomes return [`TERMINAL_INDEX`].
pub fn index_of(stage: FunnelStage) -> usize {
    match stage {
        FunnelStage::Awareness => 0,
        FunnelStage::Interest => 1,
        FunnelStage::Intent => 2,
        FunnelStage::Consideration => 3,
        FunnelStage::DecisionYes | FunnelStage::DecisionNo => TERMINAL_INDEX,
    }
}

pub fn index_of_value(raw: &str) -> Result<usize, FunnelError> {
    raw.parse().map(index_of)
}

/// Percentage complete for a progress bar: `(index_of + 1) / COUNT * 100`.
pub fn progress_percentage(stage: FunnelStage) -> f64 {
    (index_of(stage) + 1) as f64 / FunnelStage::COUNT as f64 * 100.0
}

impl FunnelStage {
    pub fn descriptor(&self) -> &'static StageDescriptor {
        describe(*self)
    }

    pub fn label(&self) -> &'static str {
        describe(*self).label
    }

    pub fn index(&self) -> usize {
        index_of(*self)
    }
}
