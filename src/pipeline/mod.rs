//! Derived funnel state: current stage per school and dashboard aggregates.
//!
//! Nothing here is cached. Every function recomputes from the interaction
//! history it is given.

pub mod current;
pub mod summary;

pub use current::{current_stage, current_stages, days_in_stage, history_for, latest_interaction};
pub use summary::{
    build_progress, stage_breakdown, FunnelStats, ProgressFilter, SchoolProgress, StageCount,
    Staleness, StalenessThresholds,
};
