use std::fs;
use std::path::PathBuf;
use std::process;

use chrono::FixedOffset;
use clap::{Parser, Subcommand};

use almanac_core::{
    ALL_ASPECTS, ALL_BODIES, EphemerisSample, Event, deg_to_dms, sign_from_longitude,
};
use almanac_detect::{DEFAULT_ORB_DEG, DetectorConfig, detect};

#[derive(Parser)]
#[command(name = "almanac", about = "Almanac event engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Zodiac sign and DMS position for an ecliptic longitude
    Sign {
        /// Ecliptic longitude in degrees
        lon: f64,
    },
    /// List the recognized aspect angles
    Aspects,
    /// List the tracked bodies
    Bodies,
    /// Detect events in a JSON sample series
    Detect {
        /// Path to a JSON array of ephemeris samples
        #[arg(long)]
        samples: PathBuf,
        /// Aspect exactness threshold in degrees
        #[arg(long, default_value_t = DEFAULT_ORB_DEG)]
        orb: f64,
        /// Skip aspect detection
        #[arg(long)]
        no_aspects: bool,
        /// Local-time offset from UTC in minutes
        #[arg(long, default_value = "0")]
        offset_minutes: i32,
        /// Emit events as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sign { lon } => {
            let pos = sign_from_longitude(lon);
            println!("{} {}", pos.sign.name(), pos.dms);
        }

        Commands::Aspects => {
            for aspect in ALL_ASPECTS {
                println!("{:12} {:>5.0}\u{00b0}", aspect.name(), aspect.angle());
            }
        }

        Commands::Bodies => {
            for body in ALL_BODIES {
                println!(
                    "{:8} {}",
                    body.name(),
                    if body.can_station() {
                        "can station"
                    } else {
                        "never stations"
                    }
                );
            }
        }

        Commands::Detect {
            samples,
            orb,
            no_aspects,
            offset_minutes,
            json,
        } => {
            let raw = fs::read_to_string(&samples).unwrap_or_else(|e| {
                eprintln!("Error reading {}: {e}", samples.display());
                process::exit(1);
            });
            let series: Vec<EphemerisSample> = serde_json::from_str(&raw).unwrap_or_else(|e| {
                eprintln!("Error parsing samples: {e}");
                process::exit(1);
            });
            let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap_or_else(|| {
                eprintln!("Error: offset out of range: {offset_minutes} minutes");
                process::exit(1);
            });

            let mut config = DetectorConfig::all_bodies();
            config.orb_deg = orb;
            config.local_offset = offset;
            config.families.aspect = !no_aspects;

            let detections = detect(&config, &series).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                process::exit(1);
            });
            let events: Vec<Event> = detections.into_iter().map(|d| d.event).collect();

            if json {
                let out = serde_json::to_string_pretty(&events).unwrap_or_else(|e| {
                    eprintln!("Error serializing events: {e}");
                    process::exit(1);
                });
                println!("{out}");
            } else {
                for event in &events {
                    println!("{}", format_event(event));
                }
                println!("{} events", events.len());
            }
        }
    }
}

fn format_event(event: &Event) -> String {
    match event {
        Event::Ingress(ev) => format!(
            "{}  ingress   {:8} {} -> {} {}{}",
            ev.instant.utc.format("%Y-%m-%d %H:%M:%S"),
            ev.body.name(),
            ev.from_sign.name(),
            ev.to_sign.name(),
            deg_to_dms(ev.degrees_in_sign),
            if ev.retrograde { " (retrograde)" } else { "" },
        ),
        Event::Station(ev) => format!(
            "{}  station   {:8} {} at {} {}",
            ev.instant.utc.format("%Y-%m-%d %H:%M:%S"),
            ev.body.name(),
            ev.station_type.name(),
            ev.sign.name(),
            deg_to_dms(ev.degrees_in_sign),
        ),
        Event::Aspect(ev) => format!(
            "{}  aspect    {} {} {} (orb {:.2}\u{00b0})",
            ev.instant.utc.format("%Y-%m-%d %H:%M:%S"),
            ev.body_a.name(),
            ev.kind.name(),
            ev.body_b.name(),
            ev.orb_deg,
        ),
        Event::Lunation(ev) => format!(
            "{}  lunation  {}",
            ev.instant.utc.format("%Y-%m-%d %H:%M:%S"),
            ev.kind.name(),
        ),
    }
}
