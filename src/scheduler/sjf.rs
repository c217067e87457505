use super::{ReadyQueue, Scheduler, SimCtx, Ticks, idle_to_next_arrival};

/// Shortest job first, run to completion once picked.
pub struct SjfNonPreemptive;

impl Scheduler for SjfNonPreemptive {
    fn name(&self) -> &'static str {
        "Shortest Job First (non-preemptive)"
    }

    fn schedule(&mut self, ctx: &mut SimCtx) {
        // Ranked by (burst, arrival): the shortest job, earliest arrival on ties
        let mut ready: ReadyQueue<(Ticks, Ticks)> = ReadyQueue::new();

        while !ctx.all_completed() {
            for key in ctx.admit() {
                let p = ctx.process(key);
                let rank = (p.burst, p.arrival);
                ready.push(ctx, key, rank);
            }

            match ready.pop() {
                Some(key) => ctx.run_to_completion(key),
                None => idle_to_next_arrival(ctx),
            }
        }
    }
}

/// Shortest remaining time first, re-evaluated every tick.
pub struct SjfPreemptive;

impl Scheduler for SjfPreemptive {
    fn name(&self) -> &'static str {
        "Shortest Remaining Time First"
    }

    fn schedule(&mut self, ctx: &mut SimCtx) {
        let mut ready: ReadyQueue<Ticks> = ReadyQueue::new();

        while !ctx.all_completed() {
            for key in ctx.admit() {
                let remaining = ctx.process(key).remaining;
                ready.push(ctx, key, remaining);
            }

            let Some(key) = ready.pop() else {
                idle_to_next_arrival(ctx);
                continue;
            };

            if !ctx.run(key, 1) {
                let remaining = ctx.process(key).remaining;
                ready.push(ctx, key, remaining);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::{Job, SimResult, sjf_non_preemptive, sjf_preemptive};

    fn completion(result: &SimResult, name: &str) -> u64 {
        result.process(name).unwrap().completion_time.unwrap()
    }

    fn labels(result: &SimResult) -> Vec<String> {
        result
            .timeline
            .segments()
            .iter()
            .map(|s| format!("{}:{}", s.label, s.duration))
            .collect()
    }

    #[test]
    fn test_non_preemptive_picks_shortest_ready() {
        let jobs = vec![
            Job::new("P1", 0, 5),
            Job::new("P2", 1, 3),
            Job::new("P3", 2, 1),
        ];
        let result = sjf_non_preemptive(jobs).unwrap();

        assert_eq!(labels(&result), vec!["P1:5", "P3:1", "P2:3"]);
        assert_eq!(completion(&result, "P1"), 5);
        assert_eq!(completion(&result, "P2"), 9);
        assert_eq!(completion(&result, "P3"), 6);
    }

    #[test]
    fn test_non_preemptive_equal_burst_prefers_earlier_arrival() {
        let jobs = vec![
            Job::new("P1", 0, 4),
            Job::new("P3", 2, 2),
            Job::new("P2", 1, 2),
        ];
        let result = sjf_non_preemptive(jobs).unwrap();
        assert_eq!(labels(&result), vec!["P1:4", "P2:2", "P3:2"]);
    }

    #[test]
    fn test_non_preemptive_idle_units_coalesce() {
        let jobs = vec![Job::new("P1", 0, 1), Job::new("P2", 4, 2)];
        let result = sjf_non_preemptive(jobs).unwrap();

        assert_eq!(labels(&result), vec!["P1:1", "IDLE:3", "P2:2"]);
        assert_eq!(result.timeline.total(), 6);
    }

    #[test]
    fn test_preemptive_shorter_arrival_takes_over() {
        let jobs = vec![
            Job::new("P1", 0, 8),
            Job::new("P2", 1, 4),
            Job::new("P3", 2, 9),
            Job::new("P4", 3, 5),
        ];
        let result = sjf_preemptive(jobs).unwrap();

        assert_eq!(labels(&result), vec!["P1:1", "P2:4", "P4:5", "P1:7", "P3:9"]);
        assert_eq!(completion(&result, "P2"), 5);
        assert_eq!(completion(&result, "P4"), 10);
        assert_eq!(completion(&result, "P1"), 17);
        assert_eq!(completion(&result, "P3"), 26);

        let p1 = result.process("P1").unwrap();
        assert_eq!(p1.start_time, Some(0));
        assert_eq!(p1.waiting_time, Some(9));
    }

    #[test]
    fn test_preemptive_equal_remaining_keeps_input_order() {
        let jobs = vec![Job::new("A", 0, 2), Job::new("B", 0, 2)];
        let result = sjf_preemptive(jobs).unwrap();
        assert_eq!(labels(&result), vec!["A:2", "B:2"]);
    }

    #[test]
    fn test_distant_arrival_skips_idle_in_one_step() {
        let jobs = vec![Job::new("P1", 0, 1), Job::new("P2", 1_000_000_000_000, 2)];

        let result = sjf_non_preemptive(jobs.clone()).unwrap();
        assert_eq!(labels(&result), vec!["P1:1", "IDLE:999999999999", "P2:2"]);

        let result = sjf_preemptive(jobs).unwrap();
        assert_eq!(labels(&result), vec!["P1:1", "IDLE:999999999999", "P2:2"]);
        assert_eq!(completion(&result, "P2"), 1_000_000_000_002);
    }

    #[test]
    fn test_preemptive_idle_gap_is_one_segment() {
        let jobs = vec![Job::new("P1", 2, 1), Job::new("P2", 5, 1)];
        let result = sjf_preemptive(jobs).unwrap();
        assert_eq!(labels(&result), vec!["IDLE:2", "P1:1", "IDLE:2", "P2:1"]);
    }
}
