//! Single-pass event detection over an ephemeris sample series.
//!
//! The detector walks a chronologically sorted series of samples once,
//! maintaining minimal per-body and per-aspect rolling state, and emits
//! ingress, station, and aspect detections together with the sample
//! interval that bracketed each transition. It is a pure function of its
//! input plus the detection thresholds: no I/O, no external state.

pub mod detector;
pub mod detector_types;
pub mod error;

pub use detector::detect;
pub use detector_types::{
    AspectTrackState, BodyTrackState, Bracket, DEFAULT_ORB_DEG, Detection, DetectorConfig,
    EventFamilies,
};
pub use error::DetectError;
