use super::{ProcKey, Scheduler, SimCtx};

pub struct Fcfs;

impl Scheduler for Fcfs {
    fn name(&self) -> &'static str {
        "First-Come-First-Served"
    }

    fn schedule(&mut self, ctx: &mut SimCtx) {
        let order = ctx.order().to_vec();
        run_in_arrival_order(ctx, order);
    }
}

/// Run `keys` back to back, ordered by arrival (stable on ties), idling across
/// any gap before a process arrives.
pub(crate) fn run_in_arrival_order(ctx: &mut SimCtx, mut keys: Vec<ProcKey>) {
    keys.sort_by_key(|&key| ctx.process(key).arrival);
    for key in keys {
        ctx.idle_until(ctx.process(key).arrival);
        ctx.run_to_completion(key);
    }
}
