//! Ephemeris samples: one instant's snapshot of tracked body positions.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::zodiac::{SignPosition, ZodiacSign, sign_from_longitude};

/// One body's position at a sample instant.
///
/// The reported speed is optional: upstream providers sometimes omit it, or
/// report a stale zero near stations. Consumers must treat zero/missing/NaN
/// speed as "unknown" and fall back to a finite difference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Ecliptic longitude in degrees [0, 360).
    pub longitude_deg: f64,
    /// Signed longitude speed in degrees per day, if reported.
    pub speed_deg_per_day: Option<f64>,
    /// Zodiac sign containing the longitude.
    pub sign: ZodiacSign,
    /// Decimal degrees within the sign [0.0, 30.0).
    pub degrees_in_sign: f64,
}

impl BodyPosition {
    /// Build a position from a longitude, deriving the sign fields.
    pub fn from_longitude(longitude_deg: f64, speed_deg_per_day: Option<f64>) -> Self {
        let pos = sign_from_longitude(longitude_deg);
        Self {
            longitude_deg,
            speed_deg_per_day,
            sign: pos.sign,
            degrees_in_sign: pos.degrees_in_sign,
        }
    }

    /// Zodiac position (sign + DMS) of the longitude.
    pub fn sign_position(&self) -> SignPosition {
        sign_from_longitude(self.longitude_deg)
    }

    /// Formatted degree within the sign, e.g. `15°30'00"`.
    pub fn formatted_degree(&self) -> String {
        self.sign_position().dms.to_string()
    }
}

/// One instant's snapshot of every tracked body.
///
/// Samples are immutable once produced; a body missing from `positions`
/// is simply absent for that instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSample {
    /// Sample instant (UTC).
    pub time: DateTime<Utc>,
    /// Per-body position records.
    pub positions: HashMap<Body, BodyPosition>,
}

impl EphemerisSample {
    pub fn new(time: DateTime<Utc>) -> Self {
        Self {
            time,
            positions: HashMap::new(),
        }
    }

    /// Position of one body at this sample, if present.
    pub fn position(&self, body: Body) -> Option<&BodyPosition> {
        self.positions.get(&body)
    }
}
