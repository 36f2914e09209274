use chrono::{TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use almanac_core::{ALL_BODIES, BodyPosition, EphemerisSample, normalize_360};
use almanac_detect::{DetectorConfig, detect};

/// One year of synthetic samples at a 12-hour cadence, each body on a
/// different constant angular rate.
fn year_of_samples() -> Vec<EphemerisSample> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..730)
        .map(|i| {
            let mut s = EphemerisSample::new(start + chrono::TimeDelta::hours(12 * i));
            for (n, &body) in ALL_BODIES.iter().enumerate() {
                let rate = 0.98 / (n as f64 + 1.0);
                let lon = normalize_360(n as f64 * 31.0 + rate * 0.5 * i as f64);
                s.positions
                    .insert(body, BodyPosition::from_longitude(lon, Some(rate)));
            }
            s
        })
        .collect()
}

fn detect_bench(c: &mut Criterion) {
    let samples = year_of_samples();
    let config = DetectorConfig::all_bodies();

    let mut group = c.benchmark_group("detect");
    group.sample_size(20);
    group.bench_function("year_all_bodies", |b| {
        b.iter(|| detect(black_box(&config), black_box(&samples)).expect("detection should succeed"))
    });
    group.finish();
}

criterion_group!(benches, detect_bench);
criterion_main!(benches);
