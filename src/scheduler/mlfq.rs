use super::{Scheduler, SimCtx, Ticks};
use crate::error::SimError;

/// Placeholder for a feedback queue with demotion across levels. It refuses
/// every configuration so callers can tell it apart from an empty run.
pub struct MultilevelFeedbackQueue {
    pub quantum: Ticks,
}

impl MultilevelFeedbackQueue {
    pub fn new(quantum: Ticks) -> Self {
        Self { quantum }
    }
}

impl Scheduler for MultilevelFeedbackQueue {
    fn name(&self) -> &'static str {
        "Multilevel Feedback Queue"
    }

    fn validate(&self) -> Result<(), SimError> {
        Err(SimError::Unsupported {
            policy: self.name(),
        })
    }

    // Unreachable: validate() never lets a run start.
    fn schedule(&mut self, _ctx: &mut SimCtx) {}
}
