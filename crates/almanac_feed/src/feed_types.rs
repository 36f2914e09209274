//! Configuration and error types for feed assembly.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use chrono::{FixedOffset, Offset, Utc};

use almanac_cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL};
use almanac_core::{ALL_BODIES, Body};
use almanac_detect::{DEFAULT_ORB_DEG, DetectError};
use almanac_refine::{RefineConfig, RefineError};

use crate::provider::ProviderError;

/// Configuration for a yearly event feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// Sampling cadence requested from the provider, in hours (default 12).
    pub interval_hours: u32,
    /// Aspect exactness threshold in degrees.
    pub orb_deg: f64,
    /// Cache entry lifetime.
    pub ttl: Duration,
    /// Advisory cache entry ceiling.
    pub max_cache_entries: usize,
    /// Bodies to track.
    pub bodies: Vec<Body>,
    /// Offset used for the local mirror of each event instant.
    pub local_offset: FixedOffset,
    /// Refinement settings.
    pub refine: RefineConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval_hours: 12,
            orb_deg: DEFAULT_ORB_DEG,
            ttl: DEFAULT_TTL,
            max_cache_entries: DEFAULT_MAX_ENTRIES,
            bodies: ALL_BODIES.to_vec(),
            local_offset: Utc.fix(),
            refine: RefineConfig::default(),
        }
    }
}

impl FeedConfig {
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if self.interval_hours == 0 {
            return Err("interval_hours must be > 0");
        }
        if self.bodies.is_empty() {
            return Err("bodies must be non-empty");
        }
        if !(self.orb_deg > 0.0) {
            return Err("orb_deg must be > 0");
        }
        Ok(())
    }
}

/// Errors from feed assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FeedError {
    /// Feed configuration failed validation.
    InvalidConfig(&'static str),
    /// The sample provider failed; the feed cannot be built without samples.
    Provider(ProviderError),
    /// Detection rejected the provider's samples.
    Detect(DetectError),
}

impl Display for FeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Provider(e) => write!(f, "provider error: {e}"),
            Self::Detect(e) => write!(f, "detection error: {e}"),
        }
    }
}

impl Error for FeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConfig(_) => None,
            Self::Provider(e) => Some(e),
            Self::Detect(e) => Some(e),
        }
    }
}

impl From<ProviderError> for FeedError {
    fn from(e: ProviderError) -> Self {
        Self::Provider(e)
    }
}

impl From<DetectError> for FeedError {
    fn from(e: DetectError) -> Self {
        Self::Detect(e)
    }
}

impl From<RefineError> for FeedError {
    fn from(e: RefineError) -> Self {
        match e {
            RefineError::InvalidConfig(msg) => Self::InvalidConfig(msg),
            _ => Self::InvalidConfig("refinement configuration rejected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_valid() {
        let c = FeedConfig::default();
        assert_eq!(c.interval_hours, 12);
        assert_eq!(c.max_cache_entries, 5);
        assert_eq!(c.ttl, Duration::from_secs(3600));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_zero_interval() {
        let mut c = FeedConfig::default();
        c.interval_hours = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_empty_bodies() {
        let mut c = FeedConfig::default();
        c.bodies.clear();
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_nan_orb() {
        let mut c = FeedConfig::default();
        c.orb_deg = f64::NAN;
        assert!(c.validate().is_err());
    }
}
