#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for EV charging station siting.
//!
//! Every subcommand works on one catalogue snapshot: either a JSON file
//! passed with `--snapshot`, or a synthetic one generated from `--seed`.
//! Results are printed to stdout as pretty JSON. Without a subcommand an
//! interactive menu is shown instead.

mod interactive;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use ev_siting_analytics::advice::recommend;
use ev_siting_analytics::{AnalysisConfig, SiteAnalyzer};
use ev_siting_analytics_models::{AreaSummary, CandidateLocation, LocationScore, Recommendation};
use ev_siting_generate::{DEFAULT_STATION_BUDGET, generate_snapshot, read_snapshot, write_snapshot};
use ev_siting_station_models::{CatalogueSnapshot, Coordinate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "ev-siting", about = "EV charging station siting analysis")]
struct Cli {
    /// Analysis config TOML; omitted keys keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Catalogue snapshot JSON; a synthetic snapshot is used when omitted
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,
    /// Seed for synthetic data and sampled estimates
    #[arg(long, global = true, default_value_t = 42)]
    seed: u64,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a synthetic catalogue snapshot
    Generate {
        /// Output JSON path
        output: PathBuf,
        /// Station budget the largest city is scaled against
        #[arg(long, default_value_t = DEFAULT_STATION_BUDGET)]
        budget: u32,
    },
    /// Convert an Open Charge Map POI export into a snapshot
    Ingest {
        /// POI export JSON
        input: PathBuf,
        /// Output snapshot JSON path
        output: PathBuf,
    },
    #[command(flatten)]
    Query(Query),
}

/// Commands that analyze a loaded snapshot.
#[derive(Subcommand)]
enum Query {
    /// List the stations closest to a point
    Nearest {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
        /// Number of stations to return
        #[arg(short, default_value_t = 5)]
        k: usize,
    },
    /// Score a point and print the recommendation
    Score {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
    /// Rank operators by competitiveness
    Competitors,
    /// Generate and rank candidate sites in a region
    Area {
        /// Province name (e.g., "İstanbul")
        city: String,
        /// District name, or "Merkez" for provinces without district data
        district: String,
        /// Optional neighborhood within the district
        neighborhood: Option<String>,
    },
    /// List the districts of a city, or the neighborhoods of a district
    Districts {
        city: String,
        district: Option<String>,
    },
    /// Project the return on an investment at a given score
    Roi {
        /// Suitability score, 0-100
        score: f64,
        /// Investment amount
        #[arg(long, default_value_t = 100_000.0)]
        investment: f64,
        /// Number of yearly periods (defaults to the config value)
        #[arg(long)]
        periods: Option<u32>,
    },
    /// Count stations by operator, city, power and year
    Stats,
}

/// A location score with its qualitative reading.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreReport<'a> {
    #[serde(flatten)]
    score: &'a LocationScore,
    recommendation: Recommendation,
}

/// Ranked candidates with their roll-up.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AreaReport<'a> {
    summary: AreaSummary,
    candidates: &'a [CandidateLocation],
}

/// Loads the analysis config, falling back to the built-in defaults.
///
/// # Errors
///
/// Returns an error if `path` is given but cannot be loaded.
fn load_config(path: Option<&Path>) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    })
}

/// Reads `path` or generates a synthetic snapshot from `rng`.
///
/// # Errors
///
/// Returns an error if `path` is given but cannot be read.
fn load_snapshot(
    path: Option<&Path>,
    rng: &mut ChaCha8Rng,
) -> Result<CatalogueSnapshot, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => read_snapshot(path)?,
        None => {
            log::info!("No --snapshot given; generating a synthetic catalogue");
            generate_snapshot(DEFAULT_STATION_BUDGET, rng)
        }
    })
}

/// Prints `value` as pretty JSON.
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
    let config = load_config(cli.config.as_deref())?;

    let Some(command) = cli.command else {
        let snapshot = load_snapshot(cli.snapshot.as_deref(), &mut rng)?;
        return interactive::run(&snapshot, config, &mut rng);
    };

    match command {
        Commands::Generate { output, budget } => {
            let snapshot = generate_snapshot(budget, &mut rng);
            write_snapshot(&output, &snapshot)?;
            println!(
                "Wrote {} stations across {} cities to {}",
                snapshot.stations.len(),
                snapshot.cities.len(),
                output.display()
            );
        }
        Commands::Ingest { input, output } => {
            let outcome = ev_siting_ingest::load_poi_file(&input, &mut rng)?;
            let snapshot = ev_siting_generate::snapshot_from_stations(outcome.stations, &mut rng);
            write_snapshot(&output, &snapshot)?;
            println!(
                "Wrote {} stations to {} ({} unrecognized towns, {} without coordinates)",
                snapshot.stations.len(),
                output.display(),
                outcome.unknown_city,
                outcome.missing_coordinates
            );
        }
        Commands::Query(query) => {
            let snapshot = load_snapshot(cli.snapshot.as_deref(), &mut rng)?;
            let analyzer = SiteAnalyzer::new(&snapshot, config)?;
            run_query(&analyzer, query, &mut rng)?;
        }
    }

    Ok(())
}

fn run_query(
    analyzer: &SiteAnalyzer<'_>,
    query: Query,
    rng: &mut ChaCha8Rng,
) -> Result<(), Box<dyn std::error::Error>> {
    match query {
        Query::Nearest { lat, lon, k } => {
            print_json(&analyzer.nearest(Coordinate::new(lat, lon), k)?)?;
        }
        Query::Score { lat, lon } => {
            let score = analyzer.score(Coordinate::new(lat, lon))?;
            print_json(&ScoreReport {
                score: &score,
                recommendation: recommend(&score),
            })?;
        }
        Query::Competitors => print_json(&analyzer.competitors(rng))?,
        Query::Area {
            city,
            district,
            neighborhood,
        } => {
            let candidates =
                analyzer.analyze_area(&city, &district, neighborhood.as_deref(), rng)?;
            print_json(&AreaReport {
                summary: analyzer.area_summary(&city, &candidates),
                candidates: &candidates,
            })?;
        }
        Query::Districts { city, district } => match district {
            Some(district) => print_json(&analyzer.neighborhoods(&city, &district)?)?,
            None => print_json(&analyzer.districts(&city)?)?,
        },
        Query::Roi {
            score,
            investment,
            periods,
        } => print_json(&analyzer.project(score, investment, periods)?)?,
        Query::Stats => print_json(&analyzer.stats())?,
    }

    Ok(())
}
