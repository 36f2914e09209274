//! Bisection refinement and bounded fan-out.
//!
//! Every event kind reduces to one-dimensional root-finding of a scalar
//! function that is monotone within its bracket: the detector only emits
//! an event when a genuine crossing was observed between exactly those
//! two samples, so the bracket contains the root and bisection cannot
//! leave it.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use log::{error, warn};

use almanac_core::{Body, Event, wrap_180};
use almanac_detect::{Bracket, Detection};

use crate::error::RefineError;
use crate::oracle::{OracleError, PositionOracle};
use crate::refine_types::RefineConfig;

/// The scalar function being driven to zero.
#[derive(Debug, Clone, Copy)]
enum RefineTarget {
    /// Longitude offset from a sign boundary.
    Ingress { body: Body, boundary_deg: f64 },
    /// Longitude speed.
    Station { body: Body },
    /// Signed separation offset from the aspect's target angle.
    Aspect {
        body_a: Body,
        body_b: Body,
        target_deg: f64,
    },
}

/// Pick the signed target separation nearest to where the pair started.
///
/// A trine can be exact at +120° or -120° of signed separation; the sign
/// observed at the bracket start decides which crossing this bracket
/// contains.
fn signed_target(separation_at_start: f64, angle_deg: f64) -> f64 {
    if separation_at_start < 0.0 {
        -angle_deg
    } else {
        angle_deg
    }
}

async fn eval(
    oracle: &dyn PositionOracle,
    target: &RefineTarget,
    at: DateTime<Utc>,
) -> Result<f64, OracleError> {
    match target {
        RefineTarget::Ingress { body, boundary_deg } => {
            let state = oracle.state_at(*body, at).await?;
            Ok(wrap_180(state.longitude_deg - boundary_deg))
        }
        RefineTarget::Station { body } => {
            let state = oracle.state_at(*body, at).await?;
            Ok(state.speed_deg_per_day)
        }
        RefineTarget::Aspect {
            body_a,
            body_b,
            target_deg,
        } => {
            let a = oracle.state_at(*body_a, at).await?;
            let b = oracle.state_at(*body_b, at).await?;
            Ok(wrap_180(
                wrap_180(a.longitude_deg - b.longitude_deg) - target_deg,
            ))
        }
    }
}

/// Bisect the zero crossing of the target function inside the bracket.
///
/// Converges when the bracket width falls under the tolerance or the
/// iteration budget runs out; either way the result stays inside the
/// original bracket.
async fn bisect(
    oracle: &dyn PositionOracle,
    target: &RefineTarget,
    bracket: Bracket,
    config: &RefineConfig,
) -> Result<DateTime<Utc>, OracleError> {
    let mut lo = bracket.start;
    let mut hi = bracket.end;
    if lo == hi {
        return Ok(lo);
    }
    let tolerance = TimeDelta::seconds(config.tolerance_secs as i64);
    let mut f_lo = eval(oracle, target, lo).await?;

    for _ in 0..config.max_iterations {
        if hi - lo <= tolerance {
            break;
        }
        let mid = lo + (hi - lo) / 2;
        let f_mid = eval(oracle, target, mid).await?;
        if f_lo * f_mid <= 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    Ok(lo + (hi - lo) / 2)
}

/// Build the refinement target for a detection, if its kind is refinable.
///
/// Lunations are externally sourced and pass through unrefined.
async fn target_for(
    detection: &Detection,
    oracle: &dyn PositionOracle,
) -> Result<Option<RefineTarget>, OracleError> {
    match &detection.event {
        Event::Ingress(ev) => {
            // The crossing boundary is shared by both signs: the start of
            // the entered sign going direct, of the departed sign going
            // retrograde.
            let boundary_deg = if ev.retrograde {
                ev.from_sign.start_deg()
            } else {
                ev.to_sign.start_deg()
            };
            Ok(Some(RefineTarget::Ingress {
                body: ev.body,
                boundary_deg,
            }))
        }
        Event::Station(ev) => Ok(Some(RefineTarget::Station { body: ev.body })),
        Event::Aspect(ev) => {
            let a = oracle.state_at(ev.body_a, detection.bracket.start).await?;
            let b = oracle.state_at(ev.body_b, detection.bracket.start).await?;
            let start_sep = wrap_180(a.longitude_deg - b.longitude_deg);
            Ok(Some(RefineTarget::Aspect {
                body_a: ev.body_a,
                body_b: ev.body_b,
                target_deg: signed_target(start_sep, ev.kind.angle()),
            }))
        }
        Event::Lunation(_) => Ok(None),
    }
}

/// Refine one detection's instant, degrading to the unrefined detection
/// on any oracle failure.
pub async fn refine(
    mut detection: Detection,
    oracle: &dyn PositionOracle,
    config: &RefineConfig,
) -> Detection {
    let refined = match target_for(&detection, oracle).await {
        Ok(Some(target)) => bisect(oracle, &target, detection.bracket, config).await,
        Ok(None) => return detection,
        Err(e) => Err(e),
    };
    match refined {
        Ok(at) => {
            detection.event.set_utc(at);
            detection
        }
        Err(e) => {
            warn!(
                "refinement degraded for event at {}: {e}",
                detection.event.utc()
            );
            detection
        }
    }
}

/// Refine a batch of detections with bounded fan-out.
///
/// Detections are spawned in waves of `max_concurrency`; completion order
/// does not matter because the output is re-sorted by instant. One
/// event's failure never blocks or cancels the others.
pub async fn refine_all(
    detections: Vec<Detection>,
    oracle: Arc<dyn PositionOracle>,
    config: RefineConfig,
) -> Result<Vec<Detection>, RefineError> {
    config.validate().map_err(RefineError::InvalidConfig)?;

    let mut refined = Vec::with_capacity(detections.len());
    let mut queue = detections.into_iter();
    loop {
        let wave: Vec<Detection> = queue.by_ref().take(config.max_concurrency).collect();
        if wave.is_empty() {
            break;
        }
        let mut handles = Vec::with_capacity(wave.len());
        for detection in wave {
            let oracle = Arc::clone(&oracle);
            handles.push(tokio::spawn(async move {
                refine(detection, oracle.as_ref(), &config).await
            }));
        }
        for handle in handles {
            match handle.await {
                Ok(detection) => refined.push(detection),
                Err(e) => error!("refinement task failed: {e}"),
            }
        }
    }

    refined.sort_by(|a, b| a.event.utc().cmp(&b.event.utc()));
    Ok(refined)
}
