use rustc_hash::FxHashMap;

use super::state::{Process, Ticks};
use super::timeline::{Label, Timeline};

/// Check the cross-policy invariants of a finished run and describe the first
/// one that does not hold.
pub fn verify(processes: &[Process], timeline: &Timeline) -> Result<(), String> {
    let mut prev: Option<&Label> = None;
    for seg in timeline.segments() {
        if seg.duration == 0 {
            return Err(format!("zero-length segment for {}", seg.label));
        }
        if prev == Some(&seg.label) {
            return Err(format!("adjacent segments share label {}", seg.label));
        }
        prev = Some(&seg.label);
    }

    // name -> (executed ticks, first start, last end)
    let mut executed: FxHashMap<&str, (Ticks, Ticks, Ticks)> = FxHashMap::default();
    for (label, start, end) in timeline.spans() {
        if let Label::Process(name) = label {
            let entry = executed.entry(name.as_str()).or_insert((0, start, end));
            entry.0 += end - start;
            entry.2 = end;
        }
    }

    let makespan = processes
        .iter()
        .filter_map(|p| p.completion_time)
        .max()
        .unwrap_or(0);
    if timeline.total() != makespan {
        return Err(format!(
            "timeline spans {} ticks but last completion is {makespan}",
            timeline.total()
        ));
    }

    if executed.len() != processes.len() {
        return Err(format!(
            "timeline runs {} processes, result holds {}",
            executed.len(),
            processes.len()
        ));
    }

    for p in processes {
        let name = &p.name;
        let (Some(start), Some(completion), Some(turnaround), Some(waiting), Some(response)) = (
            p.start_time,
            p.completion_time,
            p.turnaround_time,
            p.waiting_time,
            p.response_time,
        ) else {
            return Err(format!("{name} is missing derived metrics"));
        };

        if p.remaining != 0 {
            return Err(format!("{name} completed with {} ticks left", p.remaining));
        }
        if start < p.arrival || completion < p.arrival + p.burst {
            return Err(format!("{name} ran outside its arrival window"));
        }
        if turnaround != completion - p.arrival
            || waiting != turnaround - p.burst
            || response != start - p.arrival
        {
            return Err(format!("{name} metrics are inconsistent"));
        }

        match executed.get(name.as_str()) {
            Some(&(ticks, first, last))
                if ticks == p.burst && first == start && last == completion => {}
            Some(&(ticks, first, last)) => {
                return Err(format!(
                    "{name}: timeline shows {ticks} ticks over {first}-{last}, \
                     metrics say {} ticks over {start}-{completion}",
                    p.burst
                ));
            }
            None => return Err(format!("{name} never appears in the timeline")),
        }
    }

    Ok(())
}

/// Debug-build guard run by the driver after every simulation.
pub fn observe(processes: &[Process], timeline: &Timeline) {
    if let Err(violation) = verify(processes, timeline) {
        debug_assert!(false, "scheduler invariant violated: {violation}");
        log::error!("scheduler invariant violated: {violation}");
    }
}
