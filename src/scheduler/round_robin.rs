use std::collections::VecDeque;

use super::{ProcKey, Scheduler, SimCtx, Ticks};
use crate::error::SimError;

/// Fixed time slices over a rotating queue. The first arrived process in queue
/// order runs for up to `quantum` ticks, then moves to the back if unfinished.
pub struct RoundRobin {
    quantum: Ticks,
}

impl RoundRobin {
    pub fn new(quantum: Ticks) -> Self {
        Self { quantum }
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

impl Scheduler for RoundRobin {
    fn name(&self) -> &'static str {
        "Round-Robin"
    }

    fn validate(&self) -> Result<(), SimError> {
        if self.quantum == 0 {
            return Err(SimError::InvalidParameter {
                name: "quantum",
                reason: "must be a positive number of ticks".into(),
            });
        }
        Ok(())
    }

    fn schedule(&mut self, ctx: &mut SimCtx) {
        let mut queue: VecDeque<ProcKey> = ctx.order().iter().copied().collect();

        while !queue.is_empty() {
            let now = ctx.now;
            let eligible = queue
                .iter()
                .position(|&key| ctx.process(key).arrival <= now);

            let Some(pos) = eligible else {
                let next = queue
                    .iter()
                    .map(|&key| ctx.process(key).arrival)
                    .min()
                    .expect("Round-robin queue is non-empty");
                ctx.idle_until(next);
                continue;
            };

            let key = queue.remove(pos).expect("Eligible position within queue");
            let slice = self.quantum.min(ctx.process(key).remaining);
            if !ctx.run(key, slice) {
                queue.push_back(key);
            }
        }
    }
}
