//! Error taxonomy for the funnel model
//!
//! Every variant is a local validation rejection:
//! - `UnknownStage` / `UnknownRole`: untrusted input outside a fixed enumeration
//! - `InvalidNextStep`: chosen action is not in the stage's catalog
//! - `MissingField`: a draft is committed before all required fields are set

use thiserror::Error;

use crate::models::stage::FunnelStage;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunnelError {
    #[error("Unknown funnel stage '{0}'. Use: awareness, interest, intent, consideration, decision_yes, decision_no")]
    UnknownStage(String),

    #[error("Next step '{action}' is not available at the {stage} stage")]
    InvalidNextStep { stage: FunnelStage, action: String },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown role '{0}'. Use: super_admin, it_support, employee")]
    UnknownRole(String),
}
