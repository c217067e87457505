pub mod fcfs;
pub mod mlfq;
pub mod mlq;
pub mod priority;
pub mod round_robin;
pub mod sjf;

use keyed_priority_queue::KeyedPriorityQueue;
use std::cmp::Reverse;
use std::fmt;

use crate::{
    core::{
        Ticks,
        state::{ProcKey, SimCtx},
    },
    error::SimError,
    sim::{self, Job, SimResult},
};
pub use fcfs::Fcfs;
pub use mlfq::MultilevelFeedbackQueue;
pub use mlq::{MultilevelQueue, partition_by_queue};
pub use priority::{PriorityNonPreemptive, PriorityPreemptive};
pub use round_robin::RoundRobin;
pub use sjf::{SjfNonPreemptive, SjfPreemptive};

/// A uniprocessor scheduling policy. `schedule` drives `ctx` until every
/// process has completed.
pub trait Scheduler {
    fn name(&self) -> &'static str;

    /// Reject degenerate parameters before any simulation state exists.
    fn validate(&self) -> Result<(), SimError> {
        Ok(())
    }

    fn schedule(&mut self, ctx: &mut SimCtx);
}

/// Min-ordered ready set. Equal ranks fall back to the order processes were
/// handed to the run.
pub(crate) struct ReadyQueue<R: Ord> {
    tasks: KeyedPriorityQueue<ProcKey, Reverse<(R, usize)>>,
}

impl<R: Ord> ReadyQueue<R> {
    pub fn new() -> Self {
        Self {
            tasks: KeyedPriorityQueue::new(),
        }
    }

    pub fn push(&mut self, ctx: &SimCtx, key: ProcKey, rank: R) {
        self.tasks.push(key, Reverse((rank, ctx.seq(key))));
    }

    pub fn pop(&mut self) -> Option<ProcKey> {
        self.tasks.pop().map(|(key, _)| key)
    }
}

/// Jump the clock over an empty ready set. Callers only reach this with work
/// still outstanding, so some process has yet to arrive.
pub(crate) fn idle_to_next_arrival(ctx: &mut SimCtx) {
    let next = ctx
        .next_arrival()
        .expect("Empty ready set with no pending arrival");
    ctx.idle_until(next);
}

/// Every policy the simulator knows about, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    SjfNonPreemptive,
    SjfPreemptive,
    PriorityNonPreemptive,
    PriorityPreemptive,
    RoundRobin { quantum: Ticks },
    MultilevelQueue,
    MultilevelFeedbackQueue { quantum: Ticks },
}

impl Policy {
    pub const NAMES: [&'static str; 8] =
        ["fcfs", "sjf", "srtf", "prio", "prio-p", "rr", "mlq", "mlfq"];

    pub fn all(quantum: Ticks) -> [Policy; 8] {
        [
            Policy::Fcfs,
            Policy::SjfNonPreemptive,
            Policy::SjfPreemptive,
            Policy::PriorityNonPreemptive,
            Policy::PriorityPreemptive,
            Policy::RoundRobin { quantum },
            Policy::MultilevelQueue,
            Policy::MultilevelFeedbackQueue { quantum },
        ]
    }

    /// Look a policy up by its short name. `quantum` is used by the
    /// time-sliced policies and ignored by the rest.
    pub fn parse(name: &str, quantum: Ticks) -> Result<Self, SimError> {
        let policy = match name.to_ascii_lowercase().as_str() {
            "fcfs" => Policy::Fcfs,
            "sjf" => Policy::SjfNonPreemptive,
            "srtf" => Policy::SjfPreemptive,
            "prio" => Policy::PriorityNonPreemptive,
            "prio-p" => Policy::PriorityPreemptive,
            "rr" => Policy::RoundRobin { quantum },
            "mlq" => Policy::MultilevelQueue,
            "mlfq" => Policy::MultilevelFeedbackQueue { quantum },
            other => {
                return Err(SimError::InvalidParameter {
                    name: "policy",
                    reason: format!("unknown policy `{other}`, expected one of {:?}", Self::NAMES),
                });
            }
        };
        Ok(policy)
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "fcfs",
            Policy::SjfNonPreemptive => "sjf",
            Policy::SjfPreemptive => "srtf",
            Policy::PriorityNonPreemptive => "prio",
            Policy::PriorityPreemptive => "prio-p",
            Policy::RoundRobin { .. } => "rr",
            Policy::MultilevelQueue => "mlq",
            Policy::MultilevelFeedbackQueue { .. } => "mlfq",
        }
    }

    /// Run this policy over a flat process list. The multilevel policies
    /// partition it by each job's `queue` index.
    pub fn simulate(&self, jobs: Vec<Job>) -> Result<SimResult, SimError> {
        match *self {
            Policy::Fcfs => sim::fcfs(jobs),
            Policy::SjfNonPreemptive => sim::sjf_non_preemptive(jobs),
            Policy::SjfPreemptive => sim::sjf_preemptive(jobs),
            Policy::PriorityNonPreemptive => sim::priority_non_preemptive(jobs),
            Policy::PriorityPreemptive => sim::priority_preemptive(jobs),
            Policy::RoundRobin { quantum } => sim::round_robin(jobs, quantum),
            Policy::MultilevelQueue => sim::multilevel_queue(partition_by_queue(jobs)),
            Policy::MultilevelFeedbackQueue { quantum } => {
                sim::multilevel_feedback_queue(partition_by_queue(jobs), quantum)
            }
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fcfs => f.write_str("First-Come-First-Served"),
            Policy::SjfNonPreemptive => f.write_str("Shortest Job First (non-preemptive)"),
            Policy::SjfPreemptive => f.write_str("Shortest Remaining Time First"),
            Policy::PriorityNonPreemptive => f.write_str("Priority (non-preemptive)"),
            Policy::PriorityPreemptive => f.write_str("Priority (preemptive)"),
            Policy::RoundRobin { quantum } => write!(f, "Round-Robin (quantum {quantum})"),
            Policy::MultilevelQueue => f.write_str("Multilevel Queue"),
            Policy::MultilevelFeedbackQueue { quantum } => {
                write!(f, "Multilevel Feedback Queue (quantum {quantum})")
            }
        }
    }
}
