use std::collections::BTreeMap;

use super::{Scheduler, SimCtx, fcfs::run_in_arrival_order};
use crate::sim::Job;

/// Strict fixed-priority levels with no migration: level 0 drains completely
/// before level 1 starts. Each level runs first-come-first-served.
pub struct MultilevelQueue;

impl Scheduler for MultilevelQueue {
    fn name(&self) -> &'static str {
        "Multilevel Queue"
    }

    fn schedule(&mut self, ctx: &mut SimCtx) {
        let levels = ctx.levels().to_vec();
        for level in levels {
            run_in_arrival_order(ctx, level);
        }
    }
}

/// Split a flat job list into levels by ascending `queue` index, keeping the
/// relative order of jobs within a level.
pub fn partition_by_queue(jobs: Vec<Job>) -> Vec<Vec<Job>> {
    let mut levels: BTreeMap<usize, Vec<Job>> = BTreeMap::new();
    for job in jobs {
        levels.entry(job.queue).or_default().push(job);
    }
    levels.into_values().collect()
}
