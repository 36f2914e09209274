//! The exact-position oracle seam.
//!
//! Refinement evaluates trial instants through this trait. The real
//! implementation is network- or compute-bound and may fail per call;
//! callers must treat every call as fallible and slow.

use std::error::Error;
use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use almanac_core::Body;

/// Exact state of one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OracleState {
    /// Ecliptic longitude in degrees [0, 360).
    pub longitude_deg: f64,
    /// Signed longitude speed in degrees per day.
    pub speed_deg_per_day: f64,
}

/// Errors from an oracle call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OracleError {
    /// The oracle could not be reached or failed to compute.
    Unavailable(String),
    /// The oracle does not serve this body.
    UnsupportedBody(Body),
}

impl Display for OracleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "oracle unavailable: {msg}"),
            Self::UnsupportedBody(body) => {
                write!(f, "oracle does not serve body: {}", body.name())
            }
        }
    }
}

impl Error for OracleError {}

/// High-precision position oracle evaluated at exact instants.
#[async_trait]
pub trait PositionOracle: Send + Sync {
    /// Exact longitude and speed of `body` at `at`.
    async fn state_at(&self, body: Body, at: DateTime<Utc>) -> Result<OracleState, OracleError>;
}
