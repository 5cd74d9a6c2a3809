use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconError {
    /// A header expected in the candidate list was not found.
    UnknownHeader(String),
    /// A workflow operation was called in the wrong step.
    StepMismatch {
        operation: &'static str,
        step: &'static str,
    },
    /// Projection failure while cleaning or matching.
    Projection(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownHeader(header) => {
                write!(f, "header '{header}' not found in candidate")
            }
            Self::StepMismatch { operation, step } => {
                write!(f, "cannot {operation} while in step '{step}'")
            }
            Self::Projection(msg) => write!(f, "projection error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
