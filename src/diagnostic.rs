//! Non-fatal events raised while reading or replaying a trace

use std::fmt;

use serde::Serialize;

/// A warning that does not stop the run
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A trace line with an unrecognized kind was skipped
    UnknownInstruction { line: usize, kind: String },
    /// A scratchpad allocation was rejected
    ScratchpadOverflow {
        address: u64,
        requested: u64,
        used: u64,
        capacity: u64,
    },
}

impl Diagnostic {
    /// Forward the event to the logger
    pub fn emit(&self) {
        log::warn!("{}", self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownInstruction { line, kind } => {
                write!(f, "Skipping unknown instruction '{}' at line {}", kind, line)
            }
            Diagnostic::ScratchpadOverflow {
                address,
                requested,
                used,
                capacity,
            } => write!(
                f,
                "Scratchpad overflow at {:#x}: requested {} B with {}/{} B in use",
                address, requested, used, capacity
            ),
        }
    }
}
