use std::fmt;

use super::state::Ticks;

pub const IDLE_LABEL: &str = "IDLE";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Idle,
    Process(String),
}

impl Label {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Idle => IDLE_LABEL,
            Self::Process(name) => name,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub label: Label,
    pub duration: Ticks,
}

/// Ordered Gantt sequence starting at t=0. Adjacent segments never share a
/// label and no segment has zero length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `duration` ticks of `label`, extending the tail segment when it
    /// carries the same label.
    pub fn push(&mut self, label: Label, duration: Ticks) {
        if duration == 0 {
            return;
        }

        match self.segments.last_mut() {
            Some(tail) if tail.label == label => tail.duration += duration,
            _ => self.segments.push(Segment { label, duration }),
        }
    }

    pub fn push_idle(&mut self, duration: Ticks) {
        self.push(Label::Idle, duration);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn total(&self) -> Ticks {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// `(label, start, end)` for every segment, with cumulative boundaries.
    pub fn spans(&self) -> impl Iterator<Item = (&Label, Ticks, Ticks)> + '_ {
        self.segments.iter().scan(0, |t, seg| {
            let start = *t;
            *t += seg.duration;
            Some((&seg.label, start, *t))
        })
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, start, end) in self.spans() {
            writeln!(f, "{start:>5}-{end:<5} {label}")?;
        }
        Ok(())
    }
}
