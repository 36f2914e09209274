//! Data source seams for the feed.
//!
//! The feed never computes positions itself. Coarse yearly samples come
//! from a `SampleProvider`, lunation instants from an optional
//! `LunationSource`. Both are network- or compute-bound in production.

use std::error::Error;
use std::fmt::{Display, Formatter};

use async_trait::async_trait;

use almanac_core::{Body, EphemerisSample, LunationEvent};

/// A request for one year of coarse samples at one observer location.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRequest {
    pub year: i32,
    pub latitude: f64,
    pub longitude: f64,
    /// Sampling cadence in hours.
    pub interval_hours: u32,
    pub bodies: Vec<Body>,
}

/// Errors from a sample or lunation source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderError {
    /// The source could not be reached or failed to compute.
    Unavailable(String),
    /// The request asked for something the source cannot serve.
    Unsupported(String),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "provider unavailable: {msg}"),
            Self::Unsupported(msg) => write!(f, "unsupported request: {msg}"),
        }
    }
}

impl Error for ProviderError {}

/// Source of coarse, chronologically ordered ephemeris samples.
#[async_trait]
pub trait SampleProvider: Send + Sync {
    async fn samples(&self, request: &SampleRequest) -> Result<Vec<EphemerisSample>, ProviderError>;
}

/// Source of already-timestamped lunation events for a year.
#[async_trait]
pub trait LunationSource: Send + Sync {
    async fn lunations(&self, year: i32) -> Result<Vec<LunationEvent>, ProviderError>;
}
