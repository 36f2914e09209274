//! The event sum type produced by detection and refinement.
//!
//! Every event carries an [`EventInstant`]: the UTC instant is the source
//! of truth, the local mirror is derived once from a caller-supplied
//! offset and kept in step when refinement moves the UTC instant.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aspect::AspectKind;
use crate::body::Body;
use crate::zodiac::{SignPosition, ZodiacSign};

/// A UTC instant paired with its caller-local mirror.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventInstant {
    /// UTC instant, the source of truth.
    pub utc: DateTime<Utc>,
    /// Local wall-clock mirror of `utc`.
    pub local: NaiveDateTime,
}

impl EventInstant {
    /// Build from a UTC instant and a fixed local offset.
    pub fn from_utc(utc: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            utc,
            local: utc.with_timezone(&offset).naive_local(),
        }
    }

    /// Move the instant, preserving the original UTC-to-local offset.
    pub fn with_utc(self, utc: DateTime<Utc>) -> Self {
        let offset = self.local - self.utc.naive_utc();
        Self {
            utc,
            local: utc.naive_utc() + offset,
        }
    }
}

/// Whether a station begins or ends a retrograde period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationType {
    /// Longitude speed crossed from positive to negative.
    Retrograde,
    /// Longitude speed crossed from negative to positive.
    Direct,
}

impl StationType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Retrograde => "retrograde",
            Self::Direct => "direct",
        }
    }
}

/// Lunar phase quarters, sourced externally and merged into the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LunationKind {
    NewMoon,
    FirstQuarter,
    FullMoon,
    LastQuarter,
}

impl LunationKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::NewMoon => "New Moon",
            Self::FirstQuarter => "First Quarter",
            Self::FullMoon => "Full Moon",
            Self::LastQuarter => "Last Quarter",
        }
    }
}

/// A body crossing a sign boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngressEvent {
    pub body: Body,
    pub from_sign: ZodiacSign,
    pub to_sign: ZodiacSign,
    pub instant: EventInstant,
    /// Decimal degrees within `to_sign` at detection.
    pub degrees_in_sign: f64,
    /// True when the crossing happened while moving retrograde.
    pub retrograde: bool,
}

/// A body's longitude speed crossing zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationEvent {
    pub body: Body,
    pub station_type: StationType,
    pub instant: EventInstant,
    pub sign: ZodiacSign,
    /// Decimal degrees within `sign` at detection.
    pub degrees_in_sign: f64,
}

/// Two bodies reaching an exact aspect angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectEvent {
    pub body_a: Body,
    pub body_b: Body,
    pub kind: AspectKind,
    pub instant: EventInstant,
    /// Deviation from the exact angle at emission, in degrees.
    pub orb_deg: f64,
    pub position_a: SignPosition,
    pub position_b: SignPosition,
}

/// An externally sourced lunar phase event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunationEvent {
    pub kind: LunationKind,
    pub instant: EventInstant,
}

/// Any event the feed can surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Ingress(IngressEvent),
    Station(StationEvent),
    Aspect(AspectEvent),
    Lunation(LunationEvent),
}

impl Event {
    /// The event's instant.
    pub fn instant(&self) -> &EventInstant {
        match self {
            Self::Ingress(e) => &e.instant,
            Self::Station(e) => &e.instant,
            Self::Aspect(e) => &e.instant,
            Self::Lunation(e) => &e.instant,
        }
    }

    /// The event's UTC instant, used for chronological ordering.
    pub fn utc(&self) -> DateTime<Utc> {
        self.instant().utc
    }

    /// Replace the event's instant (refinement keeps the local offset).
    pub fn set_utc(&mut self, utc: DateTime<Utc>) {
        let refined = self.instant().with_utc(utc);
        match self {
            Self::Ingress(e) => e.instant = refined,
            Self::Station(e) => e.instant = refined,
            Self::Aspect(e) => e.instant = refined,
            Self::Lunation(e) => e.instant = refined,
        }
    }
}
