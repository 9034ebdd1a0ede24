//! Next-step catalog: the follow-up actions a user may pick for each funnel stage.
//!
//! List order is presentation order.

use crate::error::FunnelError;
use crate::models::stage::FunnelStage;

const AWARENESS_STEPS: &[&str] = &[
    "Send introductory email",
    "Share brochure / company deck",
    "Schedule a follow-up call",
    "Add to drip email campaign",
    "No immediate next step — monitor",
];

const INTEREST_STEPS: &[&str] = &[
    "Answer questions / provide clarifications",
    "Share case studies or testimonials",
    "Send pricing / product sheet",
    "Schedule discovery call or demo",
    "Follow up in X days",
];

const INTENT_STEPS: &[&str] = &[
    "Prepare and send formal proposal",
    "Schedule proposal review meeting",
    "Send meeting invite",
    "Gather requirements",
    "Confirm decision-making timeline",
    "Follow up after proposal",
];

const CONSIDERATION_STEPS: &[&str] = &[
    "Offer trial / pilot program",
    "Provide references / testimonials",
    "Negotiate terms",
    "Share competitive analysis",
    "Follow up to check status",
    "Schedule final Q&A session",
];

const DECISION_YES_STEPS: &[&str] = &[
    "Send contract for signature",
    "Schedule onboarding session",
    "Record outcome (Closed Won)",
    "Collect feedback",
    "Archive record and set reminder to re-engage later",
];

const DECISION_NO_STEPS: &[&str] = &[
    "Record outcome (Closed Lost)",
    "Collect feedback if declined",
    "Archive record and set reminder to re-engage later",
];

/// Allowed next-step actions for a stage, in presentation order. Never empty.
pub fn options_for(stage: FunnelStage) -> &'static [&'static str] {
    match stage {
        FunnelStage::Awareness => AWARENESS_STEPS,
        FunnelStage::Interest => INTEREST_STEPS,
        FunnelStage::Intent => INTENT_STEPS,
        FunnelStage::Consideration => CONSIDERATION_STEPS,
        FunnelStage::DecisionYes => DECISION_YES_STEPS,
        FunnelStage::DecisionNo => DECISION_NO_STEPS,
    }
}

/// Exact, case-sensitive catalog membership.
pub fn validate(stage: FunnelStage, action: &str) -> bool {
    options_for(stage).contains(&action)
}

/// Write-path form of [`validate`].
pub fn require_valid(stage: FunnelStage, action: &str) -> Result<(), FunnelError> {
    if validate(stage, action) {
        Ok(())
    } else {
        Err(FunnelError::InvalidNextStep {
            stage,
            action: action.to_string(),
        })
    }
}

/// Whether the action implies booking a call or meeting.
pub fn requires_scheduling(action: &str) -> bool {
    action.contains("Schedule") || action.contains("meeting")
}
