pub mod driver;
pub mod input;
pub mod job;

pub use driver::{
    Sim, fcfs, multilevel_feedback_queue, multilevel_queue, priority_non_preemptive,
    priority_preemptive, round_robin, sjf_non_preemptive, sjf_preemptive,
};
pub use job::{Job, SimResult};
