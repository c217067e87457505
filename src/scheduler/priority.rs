use super::{ReadyQueue, Scheduler, SimCtx, Ticks, idle_to_next_arrival};

/// Lowest priority value first, run to completion once picked. While nothing
/// has arrived the clock advances one tick at a time.
pub struct PriorityNonPreemptive;

impl Scheduler for PriorityNonPreemptive {
    fn name(&self) -> &'static str {
        "Priority (non-preemptive)"
    }

    fn schedule(&mut self, ctx: &mut SimCtx) {
        let mut ready: ReadyQueue<i64> = ReadyQueue::new();

        while !ctx.all_completed() {
            for key in ctx.admit() {
                let priority = ctx.process(key).priority;
                ready.push(ctx, key, priority);
            }

            match ready.pop() {
                Some(key) => ctx.run_to_completion(key),
                None => idle_to_next_arrival(ctx),
            }
        }
    }
}

/// Lowest priority value first, re-evaluated every tick. Equal priorities go
/// to the earlier arrival.
pub struct PriorityPreemptive;

impl Scheduler for PriorityPreemptive {
    fn name(&self) -> &'static str {
        "Priority (preemptive)"
    }

    fn schedule(&mut self, ctx: &mut SimCtx) {
        let mut ready: ReadyQueue<(i64, Ticks)> = ReadyQueue::new();

        while !ctx.all_completed() {
            for key in ctx.admit() {
                let p = ctx.process(key);
                let rank = (p.priority, p.arrival);
                ready.push(ctx, key, rank);
            }

            let Some(key) = ready.pop() else {
                idle_to_next_arrival(ctx);
                continue;
            };

            if !ctx.run(key, 1) {
                let p = ctx.process(key);
                let rank = (p.priority, p.arrival);
                ready.push(ctx, key, rank);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::{Job, SimResult, priority_non_preemptive, priority_preemptive};

    fn labels(result: &SimResult) -> Vec<String> {
        result
            .timeline
            .segments()
            .iter()
            .map(|s| format!("{}:{}", s.label, s.duration))
            .collect()
    }

    #[test]
    fn test_non_preemptive_runs_lowest_value_first() {
        let jobs = vec![
            Job::new("P1", 0, 3).with_priority(3),
            Job::new("P2", 1, 2).with_priority(1),
            Job::new("P3", 1, 2).with_priority(2),
        ];
        let result = priority_non_preemptive(jobs).unwrap();

        assert_eq!(labels(&result), vec!["P1:3", "P2:2", "P3:2"]);
        let p3 = result.process("P3").unwrap();
        assert_eq!(p3.start_time, Some(5));
        assert_eq!(p3.waiting_time, Some(4));
    }

    #[test]
    fn test_non_preemptive_ties_keep_input_order() {
        let jobs = vec![
            Job::new("B", 0, 1).with_priority(1),
            Job::new("A", 0, 1).with_priority(1),
        ];
        let result = priority_non_preemptive(jobs).unwrap();
        assert_eq!(labels(&result), vec!["B:1", "A:1"]);
    }

    #[test]
    fn test_non_preemptive_idles_until_first_arrival() {
        let jobs = vec![Job::new("P1", 3, 2).with_priority(0)];
        let result = priority_non_preemptive(jobs).unwrap();

        assert_eq!(labels(&result), vec!["IDLE:3", "P1:2"]);
        assert_eq!(result.process("P1").unwrap().response_time, Some(0));
    }

    #[test]
    fn test_preemptive_higher_priority_interrupts() {
        let jobs = vec![
            Job::new("P1", 0, 4).with_priority(2),
            Job::new("P2", 1, 2).with_priority(1),
        ];
        let result = priority_preemptive(jobs).unwrap();

        assert_eq!(labels(&result), vec!["P1:1", "P2:2", "P1:3"]);
        let p1 = result.process("P1").unwrap();
        assert_eq!(p1.response_time, Some(0));
        assert_eq!(p1.completion_time, Some(6));
        assert_eq!(p1.waiting_time, Some(2));
        let p2 = result.process("P2").unwrap();
        assert_eq!(p2.response_time, Some(0));
        assert_eq!(p2.turnaround_time, Some(2));
    }

    #[test]
    fn test_preemptive_equal_priority_prefers_earlier_arrival() {
        let jobs = vec![
            Job::new("Late", 1, 2).with_priority(1),
            Job::new("Early", 0, 2).with_priority(1),
        ];
        let result = priority_preemptive(jobs).unwrap();
        assert_eq!(labels(&result), vec!["Early:2", "Late:2"]);
    }

    #[test]
    fn test_distant_arrival_skips_idle_in_one_step() {
        let jobs = vec![Job::new("P1", 1_000_000_000, 3).with_priority(1)];

        let result = priority_non_preemptive(jobs.clone()).unwrap();
        assert_eq!(labels(&result), vec!["IDLE:1000000000", "P1:3"]);

        let result = priority_preemptive(jobs).unwrap();
        assert_eq!(labels(&result), vec!["IDLE:1000000000", "P1:3"]);
        assert_eq!(result.process("P1").unwrap().response_time, Some(0));
    }

    #[test]
    fn test_preemptive_records_idle_between_arrivals() {
        let jobs = vec![
            Job::new("P1", 0, 1).with_priority(0),
            Job::new("P2", 3, 1).with_priority(0),
        ];
        let result = priority_preemptive(jobs).unwrap();

        assert_eq!(labels(&result), vec!["P1:1", "IDLE:2", "P2:1"]);
        assert_eq!(result.timeline.total(), 4);
    }
}
