//! Shared data model for the almanac event engine.
//!
//! This crate provides the vocabulary the detection, refinement, and feed
//! crates speak: tracked bodies, the 12-sign zodiac table, wrap-aware angle
//! math, ephemeris samples, and the event sum type (ingress, station,
//! aspect, lunation).

pub mod angles;
pub mod aspect;
pub mod body;
pub mod event;
pub mod sample;
pub mod zodiac;

pub use angles::{angular_separation, normalize_360, wrap_180};
pub use aspect::{ALL_ASPECTS, AspectKind};
pub use body::{ALL_BODIES, Body};
pub use event::{
    AspectEvent, Event, EventInstant, IngressEvent, LunationEvent, LunationKind, StationEvent,
    StationType,
};
pub use sample::{BodyPosition, EphemerisSample};
pub use zodiac::{ALL_SIGNS, Dms, SignPosition, ZodiacSign, deg_to_dms, sign_from_longitude};
