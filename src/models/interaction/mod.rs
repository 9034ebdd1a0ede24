mod draft;
mod types;


pub use draft::InteractionDraft;
pub use types::{Interaction, NextStep};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::FunnelError;

impl Interaction {
    pub fn generate_id() -> String {
        format!("visit-{}", Uuid::new_v4().simple())
    }

    /// Replace comments, stage and next step from an edit session.
    ///
    /// The record is left untouched when the draft does not validate.
    pub fn apply_edit(
        &mut self,
        draft: &InteractionDraft,
        now: DateTime<Utc>,
    ) -> Result<(), FunnelError> {
        let (comments, next_step) = draft.resolve()?;

        self.comments = comments;
        self.funnel_stage = draft.stage();
        self.next_step = next_step;
        self.updated_at = Some(now);
        Ok(())
    }
}
