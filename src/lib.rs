pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use crate::core::{Label, Process, Segment, Ticks, Timeline};
pub use error::SimError;
pub use scheduler::{Policy, Scheduler};
pub use sim::{
    Job, Sim, SimResult, fcfs, multilevel_feedback_queue, multilevel_queue,
    priority_non_preemptive, priority_preemptive, round_robin, sjf_non_preemptive,
    sjf_preemptive,
};
