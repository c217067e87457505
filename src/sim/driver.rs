use log::info;
use rustc_hash::FxHashSet;

use super::job::{Job, SimResult};
use crate::{
    core::{IDLE_LABEL, Process, SimCtx, Ticks, observer},
    error::SimError,
    scheduler::{
        Fcfs, MultilevelFeedbackQueue, MultilevelQueue, PriorityNonPreemptive,
        PriorityPreemptive, RoundRobin, Scheduler, SjfNonPreemptive, SjfPreemptive,
    },
};

/// One validated simulation, ready to run under `S`.
pub struct Sim<S: Scheduler> {
    pub ctx: SimCtx,
    scheduler: S,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(jobs: Vec<Job>, scheduler: S) -> Result<Self, SimError> {
        Self::with_levels(vec![jobs], scheduler)
    }

    /// Build a run over pre-partitioned sub-queues, highest level first.
    pub fn with_levels(levels: Vec<Vec<Job>>, scheduler: S) -> Result<Self, SimError> {
        scheduler.validate()?;
        validate_jobs(levels.iter().flatten())?;

        let levels = levels
            .into_iter()
            .map(|level| level.into_iter().map(Process::from).collect())
            .collect();

        Ok(Self {
            ctx: SimCtx::with_levels(levels),
            scheduler,
        })
    }

    pub fn run(mut self) -> SimResult {
        info!(
            "{}: simulating {} processes",
            self.scheduler.name(),
            self.ctx.len()
        );
        self.scheduler.schedule(&mut self.ctx);

        let (processes, timeline) = self.ctx.finish();
        observer::observe(&processes, &timeline);
        info!(
            "{}: finished at t={} over {} segments",
            self.scheduler.name(),
            timeline.total(),
            timeline.len()
        );

        SimResult {
            processes,
            timeline,
        }
    }
}

fn validate_jobs<'a>(jobs: impl Iterator<Item = &'a Job>) -> Result<(), SimError> {
    let mut seen = FxHashSet::default();
    // The clock never passes the latest arrival plus all the work
    let mut horizon: Ticks = 0;
    let mut total_burst: Ticks = 0;
    for job in jobs {
        if job.name.is_empty() {
            return Err(SimError::record("process name is empty"));
        }
        if job.name == IDLE_LABEL {
            return Err(SimError::record(format!(
                "`{IDLE_LABEL}` is reserved for idle segments"
            )));
        }
        if job.burst == 0 {
            return Err(SimError::record(format!(
                "{}: burst must be positive",
                job.name
            )));
        }
        horizon = horizon.max(job.arrival);
        total_burst = total_burst.checked_add(job.burst).ok_or_else(|| {
            SimError::record(format!("{}: total burst overflows the clock", job.name))
        })?;
        if horizon.checked_add(total_burst).is_none() {
            return Err(SimError::record(format!(
                "{}: arrival {} plus outstanding work overflows the clock",
                job.name, job.arrival
            )));
        }
        if !seen.insert(job.name.as_str()) {
            return Err(SimError::record(format!(
                "duplicate process name {}",
                job.name
            )));
        }
    }
    Ok(())
}

pub fn fcfs(jobs: Vec<Job>) -> Result<SimResult, SimError> {
    Ok(Sim::new(jobs, Fcfs)?.run())
}

pub fn sjf_non_preemptive(jobs: Vec<Job>) -> Result<SimResult, SimError> {
    Ok(Sim::new(jobs, SjfNonPreemptive)?.run())
}

pub fn sjf_preemptive(jobs: Vec<Job>) -> Result<SimResult, SimError> {
    Ok(Sim::new(jobs, SjfPreemptive)?.run())
}

pub fn priority_non_preemptive(jobs: Vec<Job>) -> Result<SimResult, SimError> {
    Ok(Sim::new(jobs, PriorityNonPreemptive)?.run())
}

pub fn priority_preemptive(jobs: Vec<Job>) -> Result<SimResult, SimError> {
    Ok(Sim::new(jobs, PriorityPreemptive)?.run())
}

pub fn round_robin(jobs: Vec<Job>, quantum: Ticks) -> Result<SimResult, SimError> {
    Ok(Sim::new(jobs, RoundRobin::new(quantum))?.run())
}

pub fn multilevel_queue(levels: Vec<Vec<Job>>) -> Result<SimResult, SimError> {
    Ok(Sim::with_levels(levels, MultilevelQueue)?.run())
}

pub fn multilevel_feedback_queue(
    levels: Vec<Vec<Job>>,
    quantum: Ticks,
) -> Result<SimResult, SimError> {
    Ok(Sim::with_levels(levels, MultilevelFeedbackQueue::new(quantum))?.run())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_trivial() {
        for result in [
            fcfs(Vec::new()),
            sjf_preemptive(Vec::new()),
            round_robin(Vec::new(), 1),
            multilevel_queue(Vec::new()),
        ] {
            assert_eq!(result, Ok(SimResult::default()));
        }
    }

    #[test]
    fn test_zero_burst_rejected() {
        let err = fcfs(vec![Job::new("P1", 0, 0)]).unwrap_err();
        assert!(matches!(err, SimError::InvalidProcessRecord { line: None, .. }));
    }

    #[test]
    fn test_duplicate_names_rejected_across_levels() {
        let levels = vec![vec![Job::new("P1", 0, 1)], vec![Job::new("P1", 0, 2)]];
        assert!(multilevel_queue(levels).is_err());
    }

    #[test]
    fn test_reserved_idle_name_rejected() {
        assert!(sjf_non_preemptive(vec![Job::new("IDLE", 0, 1)]).is_err());
    }

    #[test]
    fn test_clock_overflow_rejected() {
        let err = fcfs(vec![Job::new("P1", u64::MAX - 1, 5)]).unwrap_err();
        assert!(matches!(err, SimError::InvalidProcessRecord { line: None, .. }));

        let jobs = vec![
            Job::new("P1", u64::MAX - 10, 8),
            Job::new("P2", u64::MAX - 10, 8),
        ];
        assert!(sjf_preemptive(jobs).is_err());
    }

    #[test]
    fn test_late_arrival_near_limit_accepted() {
        let result = fcfs(vec![Job::new("P1", u64::MAX - 5, 5)]).unwrap();
        assert_eq!(result.makespan(), u64::MAX);
    }

    #[test]
    fn test_parameter_checked_before_records() {
        let err = round_robin(vec![Job::new("P1", 0, 0)], 0).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter { .. }));
    }

    #[test]
    fn test_input_jobs_are_not_aliased() {
        let jobs = vec![Job::new("P1", 0, 2), Job::new("P2", 0, 1)];
        let first = sjf_preemptive(jobs.clone()).unwrap();
        let second = sjf_preemptive(jobs.clone()).unwrap();

        assert_eq!(first, second);
        assert_eq!(jobs[0], Job::new("P1", 0, 2));
    }
}
