use log::{debug, trace};
use slotmap::{SecondaryMap, SlotMap, new_key_type};
use std::collections::VecDeque;

use super::timeline::{Label, Timeline};

pub type Ticks = u64;
new_key_type! {
    pub struct ProcKey;
}

/// One simulated process: static inputs plus the metrics a policy fills in.
/// Derived times stay `None` until the simulator sets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub name: String,
    pub arrival: Ticks,
    pub burst: Ticks,
    /// Lower value runs first.
    pub priority: i64,
    pub queue: usize,

    pub remaining: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub turnaround_time: Option<Ticks>,
    pub waiting_time: Option<Ticks>,
    pub response_time: Option<Ticks>,
}

impl Process {
    pub fn new(
        name: impl Into<String>,
        arrival: Ticks,
        burst: Ticks,
        priority: i64,
        queue: usize,
    ) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
            priority,
            queue,
            remaining: burst,
            start_time: None,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
            response_time: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    pub fn label(&self) -> Label {
        Label::Process(self.name.clone())
    }

    fn mark_started(&mut self, now: Ticks) {
        debug_assert!(self.start_time.is_none(), "{} started twice", self.name);
        self.start_time = Some(now);
        self.response_time = Some(now - self.arrival);
    }

    fn mark_completed(&mut self, now: Ticks) {
        debug_assert_eq!(self.remaining, 0, "{} completed with work left", self.name);
        let turnaround = now - self.arrival;
        self.completion_time = Some(now);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst);
    }
}

/// Mutable state of a single simulation run: the clock, the process table,
/// and the timeline being built.
#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub procs: SlotMap<ProcKey, Process>,
    pub timeline: Timeline,

    // Position of each process in the order it was handed to the run
    seq: SecondaryMap<ProcKey, usize>,
    order: Vec<ProcKey>,
    levels: Vec<Vec<ProcKey>>,
    // Not yet admitted, sorted by (arrival, seq)
    arrivals: VecDeque<ProcKey>,
    completed: Vec<ProcKey>,
}

impl SimCtx {
    pub fn new(processes: Vec<Process>) -> Self {
        Self::with_levels(vec![processes])
    }

    pub fn with_levels(levels: Vec<Vec<Process>>) -> Self {
        let total = levels.iter().map(Vec::len).sum();
        let mut procs = SlotMap::with_capacity_and_key(total);
        let mut seq = SecondaryMap::with_capacity(total);
        let mut order = Vec::with_capacity(total);

        let mut level_keys = Vec::with_capacity(levels.len());
        for level in levels {
            let mut keys = Vec::with_capacity(level.len());
            for process in level {
                let key = procs.insert(process);
                seq.insert(key, order.len());
                order.push(key);
                keys.push(key);
            }
            level_keys.push(keys);
        }

        let mut arrivals: Vec<ProcKey> = order.clone();
        arrivals.sort_by_key(|&key| (procs[key].arrival, seq[key]));

        Self {
            now: 0,
            procs,
            timeline: Timeline::new(),
            seq,
            order,
            levels: level_keys,
            arrivals: arrivals.into(),
            completed: Vec::with_capacity(total),
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn process(&self, key: ProcKey) -> &Process {
        &self.procs[key]
    }

    pub fn seq(&self, key: ProcKey) -> usize {
        self.seq[key]
    }

    /// Every process in hand-off order.
    pub fn order(&self) -> &[ProcKey] {
        &self.order
    }

    pub fn levels(&self) -> &[Vec<ProcKey>] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.procs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }

    /// Pop every process whose arrival is at or before `now`, in arrival order.
    pub fn admit(&mut self) -> Vec<ProcKey> {
        let mut arrived = Vec::new();
        while let Some(&key) = self.arrivals.front() {
            if self.procs[key].arrival > self.now {
                break;
            }
            self.arrivals.pop_front();
            arrived.push(key);
        }
        arrived
    }

    pub fn next_arrival(&self) -> Option<Ticks> {
        self.arrivals.front().map(|&key| self.procs[key].arrival)
    }

    /// Execute `key` for `ticks` units starting now. Returns true when the
    /// process finished.
    pub fn run(&mut self, key: ProcKey, ticks: Ticks) -> bool {
        let now = self.now;
        let task = self
            .procs
            .get_mut(key)
            .expect("Dispatched process missing from process table");
        debug_assert!(task.arrival <= now, "{} dispatched before arrival", task.name);
        debug_assert!(
            ticks > 0 && ticks <= task.remaining,
            "{} asked to run {ticks} with {} left",
            task.name,
            task.remaining
        );

        if task.start_time.is_none() {
            task.mark_started(now);
            debug!("t={now} first dispatch of {}", task.name);
        }

        task.remaining -= ticks;
        let label = task.label();
        let finished = task.remaining == 0;

        self.advance_time(ticks);
        self.timeline.push(label, ticks);

        if finished {
            let now = self.now;
            let task = &mut self.procs[key];
            task.mark_completed(now);
            debug!("t={now} {} completed", task.name);
            self.completed.push(key);
        }
        finished
    }

    pub fn run_to_completion(&mut self, key: ProcKey) {
        let remaining = self.procs[key].remaining;
        self.run(key, remaining);
    }

    pub fn idle(&mut self, ticks: Ticks) {
        if ticks == 0 {
            return;
        }
        trace!("t={} idle for {ticks}", self.now);
        self.timeline.push_idle(ticks);
        self.advance_time(ticks);
    }

    pub fn idle_until(&mut self, t: Ticks) {
        self.idle(t.saturating_sub(self.now));
    }

    pub fn all_completed(&self) -> bool {
        self.completed.len() == self.procs.len()
    }

    /// Tear down the run: processes in completion order, plus the timeline.
    pub fn finish(mut self) -> (Vec<Process>, Timeline) {
        debug_assert!(self.all_completed(), "Run finished with pending processes");
        let processes = self
            .completed
            .iter()
            .filter_map(|&key| self.procs.remove(key))
            .collect();
        (processes, self.timeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admit_in_arrival_order() {
        let mut ctx = SimCtx::new(vec![
            Process::new("A", 2, 1, 0, 0),
            Process::new("B", 0, 1, 0, 0),
            Process::new("C", 0, 1, 0, 0),
        ]);

        let names = |ctx: &SimCtx, keys: &[ProcKey]| {
            keys.iter()
                .map(|&k| ctx.process(k).name.clone())
                .collect::<Vec<_>>()
        };

        let first = ctx.admit();
        assert_eq!(names(&ctx, &first), vec!["B", "C"]);
        assert_eq!(ctx.next_arrival(), Some(2));

        ctx.idle_until(2);
        let second = ctx.admit();
        assert_eq!(names(&ctx, &second), vec!["A"]);
        assert_eq!(ctx.next_arrival(), None);
    }

    #[test]
    fn test_run_sets_start_once_and_finishes() {
        let mut ctx = SimCtx::new(vec![Process::new("P1", 1, 3, 0, 0)]);
        let key = ctx.order()[0];
        ctx.idle_until(1);

        assert!(!ctx.run(key, 1));
        ctx.idle(2);
        assert!(ctx.run(key, 2));

        let (done, timeline) = ctx.finish();
        let p = &done[0];
        assert_eq!(p.start_time, Some(1));
        assert_eq!(p.response_time, Some(0));
        assert_eq!(p.completion_time, Some(6));
        assert_eq!(p.turnaround_time, Some(5));
        assert_eq!(p.waiting_time, Some(2));
        assert_eq!(timeline.total(), 6);
        assert_eq!(timeline.len(), 4);
    }
}
