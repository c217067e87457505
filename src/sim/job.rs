use crate::core::{Process, Ticks, Timeline};

/// Input record for one process, as handed over by ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: i64,
    pub queue: usize,
}

impl Job {
    pub fn new(name: impl Into<String>, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
            priority: 0,
            queue: 0,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_queue(mut self, queue: usize) -> Self {
        self.queue = queue;
        self
    }
}

impl From<Job> for Process {
    fn from(job: Job) -> Self {
        Process::new(job.name, job.arrival, job.burst, job.priority, job.queue)
    }
}

/// Completed processes (in completion order) and the Gantt sequence of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimResult {
    pub processes: Vec<Process>,
    pub timeline: Timeline,
}

impl SimResult {
    pub fn process(&self, name: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.name == name)
    }

    pub fn makespan(&self) -> Ticks {
        self.timeline.total()
    }
}
