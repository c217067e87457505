pub mod observer;
pub mod state;
pub mod timeline;

pub use state::{ProcKey, Process, SimCtx, Ticks};
pub use timeline::{IDLE_LABEL, Label, Segment, Timeline};
