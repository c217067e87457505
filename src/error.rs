use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A process record was rejected before simulation. `line` is the 1-based
    /// line number when the record came from text input.
    InvalidProcessRecord { line: Option<usize>, reason: String },
    InvalidParameter { name: &'static str, reason: String },
    /// The policy exists in the enumeration but has no simulator behind it.
    Unsupported { policy: &'static str },
}

impl SimError {
    pub(crate) fn record(reason: impl Into<String>) -> Self {
        Self::InvalidProcessRecord {
            line: None,
            reason: reason.into(),
        }
    }

    pub(crate) fn record_at(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidProcessRecord {
            line: Some(line),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProcessRecord {
                line: Some(line),
                reason,
            } => write!(f, "invalid process record on line {line}: {reason}"),
            Self::InvalidProcessRecord { line: None, reason } => {
                write!(f, "invalid process record: {reason}")
            }
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{name}`: {reason}")
            }
            Self::Unsupported { policy } => write!(f, "policy {policy} is not implemented"),
        }
    }
}

impl std::error::Error for SimError {}
