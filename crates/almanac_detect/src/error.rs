//! Error type for the event detector.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from a detection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DetectError {
    /// Detector configuration failed validation.
    InvalidConfig(&'static str),
    /// Samples were not strictly increasing in time.
    UnsortedSamples,
}

impl Display for DetectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::UnsortedSamples => {
                write!(f, "samples must be strictly increasing in time")
            }
        }
    }
}

impl Error for DetectError {}
