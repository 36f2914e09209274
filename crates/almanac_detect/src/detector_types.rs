//! Types for the event detector.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use almanac_core::{ALL_BODIES, Body, Event, ZodiacSign};

/// Default aspect orb tolerance in degrees.
///
/// Chosen smaller than the expected angular travel between samples at a
/// 12-hour cadence, so an exact aspect cannot slip through a sample gap
/// and the rising-edge logic stays well-defined.
pub const DEFAULT_ORB_DEG: f64 = 0.5;

/// Which event families a detection pass emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventFamilies {
    pub ingress: bool,
    pub station: bool,
    pub aspect: bool,
}

impl EventFamilies {
    /// All families enabled.
    pub const fn all() -> Self {
        Self {
            ingress: true,
            station: true,
            aspect: true,
        }
    }
}

impl Default for EventFamilies {
    fn default() -> Self {
        Self::all()
    }
}

/// Configuration for one detection pass.
///
/// One detector, parameterized by tracked bodies and enabled families,
/// replaces per-variant copies of the detection loop.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Bodies to track.
    pub bodies: Vec<Body>,
    /// Event families to emit.
    pub families: EventFamilies,
    /// Aspect orb tolerance in degrees (default 0.5).
    pub orb_deg: f64,
    /// Offset used to derive the local mirror of each event instant.
    pub local_offset: FixedOffset,
}

impl DetectorConfig {
    /// Config tracking the given bodies with all families enabled.
    pub fn for_bodies(bodies: Vec<Body>) -> Self {
        Self {
            bodies,
            families: EventFamilies::all(),
            orb_deg: DEFAULT_ORB_DEG,
            local_offset: Utc.fix(),
        }
    }

    /// Config tracking every supported body.
    pub fn all_bodies() -> Self {
        Self::for_bodies(ALL_BODIES.to_vec())
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if self.bodies.is_empty() {
            return Err("bodies must not be empty");
        }
        if !self.orb_deg.is_finite() || self.orb_deg <= 0.0 {
            return Err("orb_deg must be positive");
        }
        Ok(())
    }
}

/// Rolling per-body state, updated after every processed sample.
///
/// All fields start unset; a body's first sample only seeds them, it can
/// never emit an event (there is no "from" state yet).
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyTrackState {
    /// Sign at the previously processed sample.
    pub sign: Option<ZodiacSign>,
    /// Signed velocity at the previously processed sample, if known.
    pub velocity: Option<f64>,
    /// Longitude at the previously processed sample.
    pub longitude: Option<f64>,
    /// Instant of the previously processed sample for this body.
    pub time: Option<DateTime<Utc>>,
}

/// Rolling state for one (body pair, aspect kind) combination.
///
/// An aspect event is emitted only on an observed transition from
/// not-exact to exact, so an aspect that stays within orb across several
/// samples is reported once, and a pair already within orb at its first
/// observation only seeds the state.
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectTrackState {
    /// Whether the pair was within orb at the previously processed sample.
    pub was_exact: bool,
    /// Orb at the previously processed sample.
    pub last_orb: Option<f64>,
    /// Instant the pair was last evaluated.
    pub last_seen: Option<DateTime<Utc>>,
}

/// The sample interval that bracketed a detected transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    /// Last sample instant before the transition.
    pub start: DateTime<Utc>,
    /// First sample instant at or after the transition.
    pub end: DateTime<Utc>,
}

impl Bracket {
    /// Whether an instant lies within the bracket (inclusive).
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// A detected event together with its bracketing interval.
///
/// Refinement may move the event instant anywhere inside the bracket,
/// never outside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub event: Event,
    pub bracket: Bracket,
}
