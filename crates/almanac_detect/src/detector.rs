//! The single-pass detection loop.
//!
//! Walks the sample series left to right, keeping rolling per-body and
//! per-aspect state, and emits a [`Detection`] whenever a qualitative
//! transition (sign change, velocity zero-crossing, orb entry) is
//! observed between the previous and current sample.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;

use almanac_core::{
    ALL_ASPECTS, AspectEvent, AspectKind, Body, BodyPosition, EphemerisSample, Event, EventInstant,
    IngressEvent, StationEvent, StationType, angular_separation, wrap_180,
};

use crate::detector_types::{AspectTrackState, BodyTrackState, Bracket, Detection, DetectorConfig};
use crate::error::DetectError;

/// Velocity to use for a sample: the reported value when trustworthy,
/// otherwise a finite difference against the tracked previous longitude.
///
/// Upstream samples sometimes report a stale zero speed near exact
/// stations, precisely where accurate sign information matters most, so
/// zero, missing, and non-finite speeds all take the fallback path. The
/// longitude delta is wrapped to (-180, 180] before dividing so the
/// 0°/360° seam cannot fabricate a huge velocity.
fn effective_velocity(
    pos: &BodyPosition,
    state: &BodyTrackState,
    now: DateTime<Utc>,
) -> Option<f64> {
    if let Some(v) = pos.speed_deg_per_day
        && v.is_finite()
        && v != 0.0
    {
        return Some(v);
    }
    let prev_lon = state.longitude?;
    let prev_time = state.time?;
    let elapsed_days = (now - prev_time).num_seconds() as f64 / 86_400.0;
    if elapsed_days <= 0.0 {
        return None;
    }
    Some(wrap_180(pos.longitude_deg - prev_lon) / elapsed_days)
}

/// Detect ingress, station, and aspect events across a sample series.
///
/// Samples must be chronologically sorted with strictly increasing
/// timestamps. The pass is pure: given the same series and config it
/// produces the same detections. A body absent from one sample is skipped
/// for that sample only; its rolling state is left untouched.
///
/// Returned detections are sorted ascending by UTC instant; the order of
/// same-instant detections is unspecified.
pub fn detect(
    config: &DetectorConfig,
    samples: &[EphemerisSample],
) -> Result<Vec<Detection>, DetectError> {
    config.validate().map_err(DetectError::InvalidConfig)?;
    for pair in samples.windows(2) {
        if pair[1].time <= pair[0].time {
            return Err(DetectError::UnsortedSamples);
        }
    }

    let mut body_states: HashMap<Body, BodyTrackState> = config
        .bodies
        .iter()
        .map(|&b| (b, BodyTrackState::default()))
        .collect();
    let mut aspect_states: HashMap<(Body, Body, AspectKind), AspectTrackState> = HashMap::new();
    let mut detections = Vec::new();

    for sample in samples {
        for &body in &config.bodies {
            // Missing data for one instant must not flush detection state.
            let Some(pos) = sample.position(body) else {
                continue;
            };
            let Some(state) = body_states.get_mut(&body) else {
                continue;
            };

            let velocity = effective_velocity(pos, state, sample.time);
            if let Some(v) = velocity
                && pos
                    .speed_deg_per_day
                    .is_none_or(|r| !r.is_finite() || r == 0.0)
            {
                debug!(
                    "{}: velocity fallback at {} -> {v:.4} deg/day",
                    body.name(),
                    sample.time
                );
            }
            let bracket = Bracket {
                start: state.time.unwrap_or(sample.time),
                end: sample.time,
            };
            let instant = EventInstant::from_utc(sample.time, config.local_offset);

            if config.families.ingress
                && let Some(prev_sign) = state.sign
                && prev_sign != pos.sign
            {
                detections.push(Detection {
                    event: Event::Ingress(IngressEvent {
                        body,
                        from_sign: prev_sign,
                        to_sign: pos.sign,
                        instant,
                        degrees_in_sign: pos.degrees_in_sign,
                        retrograde: velocity.is_some_and(|v| v < 0.0),
                    }),
                    bracket,
                });
            }

            if config.families.station
                && body.can_station()
                && let (Some(v_prev), Some(v_curr)) = (state.velocity, velocity)
                // A true zero-crossing needs both signs known and opposite;
                // an exact zero is ambiguous data, not a station.
                && v_prev != 0.0
                && v_curr != 0.0
                && (v_prev > 0.0) != (v_curr > 0.0)
            {
                detections.push(Detection {
                    event: Event::Station(StationEvent {
                        body,
                        station_type: if v_prev > 0.0 {
                            StationType::Retrograde
                        } else {
                            StationType::Direct
                        },
                        instant,
                        sign: pos.sign,
                        degrees_in_sign: pos.degrees_in_sign,
                    }),
                    bracket,
                });
            }

            state.sign = Some(pos.sign);
            state.velocity = velocity;
            state.longitude = Some(pos.longitude_deg);
            state.time = Some(sample.time);
        }

        if config.families.aspect {
            detect_aspects(config, sample, &mut aspect_states, &mut detections);
        }
    }

    detections.sort_by(|a, b| a.event.utc().cmp(&b.event.utc()));
    Ok(detections)
}

/// Rising-edge aspect detection for every unordered body pair.
///
/// A pair's first observation only seeds its state: with no previous
/// sample there is no observed transition into orb, so nothing is
/// emitted even if the pair is already exact.
fn detect_aspects(
    config: &DetectorConfig,
    sample: &EphemerisSample,
    states: &mut HashMap<(Body, Body, AspectKind), AspectTrackState>,
    detections: &mut Vec<Detection>,
) {
    for (i, &body_a) in config.bodies.iter().enumerate() {
        for &body_b in &config.bodies[i + 1..] {
            let (Some(pos_a), Some(pos_b)) = (sample.position(body_a), sample.position(body_b))
            else {
                continue;
            };
            let separation = angular_separation(pos_a.longitude_deg, pos_b.longitude_deg);
            for &kind in ALL_ASPECTS.iter() {
                let orb = (separation - kind.angle()).abs();
                let exact = orb <= config.orb_deg;
                let state = states.entry((body_a, body_b, kind)).or_default();
                if let Some(prev_seen) = state.last_seen
                    && exact
                    && !state.was_exact
                {
                    detections.push(Detection {
                        event: Event::Aspect(AspectEvent {
                            body_a,
                            body_b,
                            kind,
                            instant: EventInstant::from_utc(sample.time, config.local_offset),
                            orb_deg: orb,
                            position_a: pos_a.sign_position(),
                            position_b: pos_b.sign_position(),
                        }),
                        bracket: Bracket {
                            start: prev_seen,
                            end: sample.time,
                        },
                    });
                }
                state.was_exact = exact;
                state.last_orb = Some(orb);
                state.last_seen = Some(sample.time);
            }
        }
    }
}
