//! Error type for refinement batches.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from a refinement batch.
///
/// Oracle failures are not represented here: they degrade the affected
/// event and are logged, per the isolated-failure-domain contract.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RefineError {
    /// Refinement configuration failed validation.
    InvalidConfig(&'static str),
}

impl Display for RefineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for RefineError {}
