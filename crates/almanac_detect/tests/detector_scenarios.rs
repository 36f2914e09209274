//! Scenario tests for the event detector over synthetic sample series.

use chrono::{DateTime, TimeZone, Utc};

use almanac_core::{
    AspectKind, Body, BodyPosition, EphemerisSample, Event, StationType, ZodiacSign,
};
use almanac_detect::{DetectError, Detection, DetectorConfig, detect};

fn t(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() + chrono::TimeDelta::hours(hours)
}

fn sample(at: DateTime<Utc>, entries: &[(Body, f64, Option<f64>)]) -> EphemerisSample {
    let mut s = EphemerisSample::new(at);
    for &(body, lon, speed) in entries {
        s.positions
            .insert(body, BodyPosition::from_longitude(lon, speed));
    }
    s
}

fn ingresses(detections: &[Detection]) -> Vec<&Detection> {
    detections
        .iter()
        .filter(|d| matches!(d.event, Event::Ingress(_)))
        .collect()
}

fn stations(detections: &[Detection]) -> Vec<&Detection> {
    detections
        .iter()
        .filter(|d| matches!(d.event, Event::Station(_)))
        .collect()
}

fn aspects(detections: &[Detection]) -> Vec<&Detection> {
    detections
        .iter()
        .filter(|d| matches!(d.event, Event::Aspect(_)))
        .collect()
}

#[test]
fn no_event_on_first_sample() {
    let config = DetectorConfig::for_bodies(vec![Body::Mars]);
    // First ever sample is deep inside Taurus; no "from" state exists.
    let samples = vec![sample(t(0), &[(Body::Mars, 45.0, Some(0.6))])];
    let detections = detect(&config, &samples).unwrap();
    assert!(detections.is_empty());
}

#[test]
fn ingress_direction_and_bracket() {
    let config = DetectorConfig::for_bodies(vec![Body::Mars]);
    // Sign sequence Aries, Aries, Taurus: exactly one ingress, between
    // the 2nd and 3rd sample.
    let samples = vec![
        sample(t(0), &[(Body::Mars, 10.0, Some(0.6))]),
        sample(t(12), &[(Body::Mars, 29.7, Some(0.6))]),
        sample(t(24), &[(Body::Mars, 30.2, Some(0.6))]),
    ];
    let detections = detect(&config, &samples).unwrap();
    let found = ingresses(&detections);
    assert_eq!(found.len(), 1);
    let Event::Ingress(ev) = &found[0].event else {
        unreachable!()
    };
    assert_eq!(ev.from_sign, ZodiacSign::Aries);
    assert_eq!(ev.to_sign, ZodiacSign::Taurus);
    assert!(!ev.retrograde);
    assert_eq!(found[0].bracket.start, t(12));
    assert_eq!(found[0].bracket.end, t(24));
    assert!(found[0].bracket.contains(ev.instant.utc));
}

#[test]
fn retrograde_ingress_flagged() {
    let config = DetectorConfig::for_bodies(vec![Body::Mercury]);
    // Backing out of Aries into Pisces across the 0° seam.
    let samples = vec![
        sample(t(0), &[(Body::Mercury, 0.8, Some(-1.1))]),
        sample(t(12), &[(Body::Mercury, 359.4, Some(-1.1))]),
    ];
    let detections = detect(&config, &samples).unwrap();
    let found = ingresses(&detections);
    assert_eq!(found.len(), 1);
    let Event::Ingress(ev) = &found[0].event else {
        unreachable!()
    };
    assert_eq!(ev.from_sign, ZodiacSign::Aries);
    assert_eq!(ev.to_sign, ZodiacSign::Pisces);
    assert!(ev.retrograde);
}

#[test]
fn station_requires_true_sign_flip() {
    let config = DetectorConfig::for_bodies(vec![Body::Mercury]);
    // Velocity sequence +0.4, 0.0, -0.3: the zero sample holds its
    // longitude so the fallback also resolves to zero. No station may be
    // emitted at the 0.0 sample nor between 0.0 and -0.3.
    let samples = vec![
        sample(t(0), &[(Body::Mercury, 20.0, Some(0.4))]),
        sample(t(12), &[(Body::Mercury, 20.0, Some(0.0))]),
        sample(t(24), &[(Body::Mercury, 19.85, Some(-0.3))]),
    ];
    let detections = detect(&config, &samples).unwrap();
    assert!(stations(&detections).is_empty());
}

#[test]
fn station_on_direct_sign_flip() {
    let config = DetectorConfig::for_bodies(vec![Body::Mercury]);
    // Velocity sequence +0.4, -0.3 is a genuine zero-crossing.
    let samples = vec![
        sample(t(0), &[(Body::Mercury, 20.0, Some(0.4))]),
        sample(t(12), &[(Body::Mercury, 20.05, Some(-0.3))]),
    ];
    let detections = detect(&config, &samples).unwrap();
    let found = stations(&detections);
    assert_eq!(found.len(), 1);
    let Event::Station(ev) = &found[0].event else {
        unreachable!()
    };
    assert_eq!(ev.station_type, StationType::Retrograde);
    assert_eq!(found[0].bracket.start, t(0));
    assert_eq!(found[0].bracket.end, t(12));
}

#[test]
fn station_direct_classification() {
    let config = DetectorConfig::for_bodies(vec![Body::Jupiter]);
    let samples = vec![
        sample(t(0), &[(Body::Jupiter, 100.0, Some(-0.05))]),
        sample(t(12), &[(Body::Jupiter, 100.0, Some(0.04))]),
    ];
    let detections = detect(&config, &samples).unwrap();
    let found = stations(&detections);
    assert_eq!(found.len(), 1);
    let Event::Station(ev) = &found[0].event else {
        unreachable!()
    };
    assert_eq!(ev.station_type, StationType::Direct);
}

#[test]
fn sun_velocity_noise_never_stations() {
    let config = DetectorConfig::for_bodies(vec![Body::Sun]);
    // A provider glitch reporting a negative solar speed must not
    // manufacture a station.
    let samples = vec![
        sample(t(0), &[(Body::Sun, 100.0, Some(1.0))]),
        sample(t(12), &[(Body::Sun, 100.5, Some(-1.0))]),
    ];
    let detections = detect(&config, &samples).unwrap();
    assert!(stations(&detections).is_empty());
}

#[test]
fn aspect_rising_edge_only() {
    let config = DetectorConfig::for_bodies(vec![Body::Venus, Body::Mars]);
    // Conjunction orb sequence 0.8, 0.3, 0.2, 0.35, 0.1 against the 0.5
    // tolerance: exactly one event, at the transition into 0.3.
    let orbs = [0.8, 0.3, 0.2, 0.35, 0.1];
    let samples: Vec<EphemerisSample> = orbs
        .iter()
        .enumerate()
        .map(|(i, orb)| {
            sample(
                t(12 * i as i64),
                &[
                    (Body::Venus, 100.0, Some(1.0)),
                    (Body::Mars, 100.0 + orb, Some(1.0)),
                ],
            )
        })
        .collect();
    let detections = detect(&config, &samples).unwrap();
    let found = aspects(&detections);
    assert_eq!(found.len(), 1);
    let Event::Aspect(ev) = &found[0].event else {
        unreachable!()
    };
    assert_eq!(ev.kind, AspectKind::Conjunct);
    assert!((ev.orb_deg - 0.3).abs() < 1e-9);
    assert_eq!(ev.instant.utc, t(12));
    assert_eq!(found[0].bracket.start, t(0));
    assert_eq!(found[0].bracket.end, t(12));
}

#[test]
fn aspect_in_orb_at_first_sample_not_emitted() {
    let config = DetectorConfig::for_bodies(vec![Body::Venus, Body::Mars]);
    // The pair is already exact when tracking starts: no transition was
    // observed, so nothing may be emitted until the pair leaves orb and
    // comes back.
    let orbs = [0.2, 0.3, 0.9, 0.1];
    let samples: Vec<EphemerisSample> = orbs
        .iter()
        .enumerate()
        .map(|(i, orb)| {
            sample(
                t(12 * i as i64),
                &[
                    (Body::Venus, 100.0, Some(1.0)),
                    (Body::Mars, 100.0 + orb, Some(1.0)),
                ],
            )
        })
        .collect();
    let detections = detect(&config, &samples).unwrap();
    let found = aspects(&detections);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].event.utc(), t(36));
    assert_eq!(found[0].bracket.start, t(24));
}

#[test]
fn aspect_reemitted_after_leaving_orb() {
    let config = DetectorConfig::for_bodies(vec![Body::Venus, Body::Mars]);
    // Out of orb, in, out, back in: two rising edges.
    let orbs = [0.8, 0.3, 0.9, 0.2];
    let samples: Vec<EphemerisSample> = orbs
        .iter()
        .enumerate()
        .map(|(i, orb)| {
            sample(
                t(12 * i as i64),
                &[
                    (Body::Venus, 100.0, Some(1.0)),
                    (Body::Mars, 100.0 + orb, Some(1.0)),
                ],
            )
        })
        .collect();
    let detections = detect(&config, &samples).unwrap();
    assert_eq!(aspects(&detections).len(), 2);
}

#[test]
fn missing_body_preserves_state() {
    let config = DetectorConfig::for_bodies(vec![Body::Mars]);
    // Mars is absent from the middle sample; the ingress detected at the
    // third sample brackets back to the first.
    let samples = vec![
        sample(t(0), &[(Body::Mars, 29.8, Some(0.6))]),
        sample(t(12), &[]),
        sample(t(24), &[(Body::Mars, 30.4, Some(0.6))]),
    ];
    let detections = detect(&config, &samples).unwrap();
    let found = ingresses(&detections);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].bracket.start, t(0));
    assert_eq!(found[0].bracket.end, t(24));
}

#[test]
fn disabled_families_emit_nothing() {
    let mut config = DetectorConfig::for_bodies(vec![Body::Venus, Body::Mars]);
    config.families.ingress = false;
    config.families.aspect = false;
    let samples = vec![
        sample(
            t(0),
            &[(Body::Venus, 29.8, Some(0.6)), (Body::Mars, 29.9, Some(0.5))],
        ),
        sample(
            t(12),
            &[(Body::Venus, 30.1, Some(0.6)), (Body::Mars, 30.2, Some(0.5))],
        ),
    ];
    let detections = detect(&config, &samples).unwrap();
    assert!(detections.is_empty());
}

#[test]
fn output_sorted_by_instant() {
    let config = DetectorConfig::for_bodies(vec![Body::Mercury, Body::Mars]);
    let samples = vec![
        sample(
            t(0),
            &[
                (Body::Mercury, 29.5, Some(1.2)),
                (Body::Mars, 59.7, Some(0.5)),
            ],
        ),
        sample(
            t(12),
            &[
                (Body::Mercury, 30.1, Some(1.2)),
                (Body::Mars, 59.95, Some(0.5)),
            ],
        ),
        sample(
            t(24),
            &[
                (Body::Mercury, 30.7, Some(1.2)),
                (Body::Mars, 60.2, Some(0.5)),
            ],
        ),
    ];
    let detections = detect(&config, &samples).unwrap();
    assert!(!detections.is_empty());
    for pair in detections.windows(2) {
        assert!(pair[0].event.utc() <= pair[1].event.utc());
    }
}

#[test]
fn invalid_config_surfaces() {
    let config = DetectorConfig::for_bodies(Vec::new());
    let err = detect(&config, &[]).unwrap_err();
    assert!(matches!(err, DetectError::InvalidConfig(_)));
}
