#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Synthetic catalogue snapshots and snapshot persistence.
//!
//! When no station export is available, [`generate_snapshot`] builds a
//! plausible catalogue around the major provinces. Everything is drawn
//! from the caller's RNG, so a seed fully determines the snapshot.
//! Snapshots are stored as pretty-printed JSON.

pub mod profiles;

use std::path::Path;

use ev_siting_geography_models::reference::{LARGEST_POPULATION, MAJOR_CITIES, ReferenceCity};
use ev_siting_station_models::{CatalogueSnapshot, Coordinate, Station};
use rand::Rng;
use rand::seq::SliceRandom;

/// Default number of stations the largest city is scaled against.
pub const DEFAULT_STATION_BUDGET: u32 = 200;

/// Operators assigned to synthetic stations.
pub const SYNTHETIC_OPERATORS: &[&str] = &["ZES", "Eşarj", "Sharz", "Voltrun", "Epoint", "Elektrikli"];

/// Power ratings assigned to synthetic stations, in kW.
pub const SYNTHETIC_POWER_KW: &[f64] = &[50.0, 100.0, 150.0, 250.0, 350.0];

/// Maximum offset in degrees of a synthetic station from its city centre.
const SCATTER_DEGREES: f64 = 0.1;

/// Errors that can occur while generating or persisting snapshots.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Number of synthetic stations for a city of `population`.
///
/// Scales `budget` by the city's share of the largest population, keeps
/// 70% of it, and adds two so every city has some coverage.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn stations_for_population(population: u64, budget: u32) -> u32 {
    let share = population as f64 / LARGEST_POPULATION as f64;
    (f64::from(budget) * share * 0.7).floor() as u32 + 2
}

fn synthetic_station<R: Rng + ?Sized>(id: u64, city: &ReferenceCity, rng: &mut R) -> Station {
    let lat = city.center.lat + rng.gen_range(-SCATTER_DEGREES..SCATTER_DEGREES);
    let lon = city.center.lon + rng.gen_range(-SCATTER_DEGREES..SCATTER_DEGREES);
    let charger_count = rng.gen_range(2..=12);
    let power_kw = SYNTHETIC_POWER_KW.choose(rng).copied().unwrap_or(50.0);
    let operator = SYNTHETIC_OPERATORS.choose(rng).copied().unwrap_or("ZES");

    Station {
        id,
        name: format!("{} Charging Station {id}", city.name),
        operator: operator.to_string(),
        location: Coordinate::new(lat, lon),
        city: city.name.to_string(),
        address: String::new(),
        charger_count,
        power_kw,
        connection_types: Vec::new(),
        status: "Operational".to_string(),
        installation_year: rng.gen_range(2018..=2023),
        installation_cost: f64::from(rng.gen_range(20_000u32..=150_000)),
        monthly_revenue: f64::from(rng.gen_range(5_000u32..=40_000)),
        operational_cost: f64::from(rng.gen_range(2_000u32..=15_000)),
        customer_rating: round_to(rng.gen_range(3.0..=5.0), 1),
    }
}

/// Builds a synthetic snapshot covering the major provinces.
pub fn generate_snapshot<R: Rng + ?Sized>(budget: u32, rng: &mut R) -> CatalogueSnapshot {
    let mut stations = Vec::new();
    let mut next_id = 1u64;

    for city in MAJOR_CITIES {
        for _ in 0..stations_for_population(city.population, budget) {
            stations.push(synthetic_station(next_id, city, rng));
            next_id += 1;
        }
    }

    let (cities, traffic) = profiles::profiles_for(MAJOR_CITIES.iter().map(|c| c.name), rng);

    log::info!(
        "Generated {} stations across {} cities",
        stations.len(),
        cities.len()
    );

    CatalogueSnapshot {
        stations,
        cities,
        traffic,
    }
}

/// Wraps an ingested catalogue with synthetic profiles for every city it
/// mentions, in order of first appearance.
pub fn snapshot_from_stations<R: Rng + ?Sized>(stations: Vec<Station>, rng: &mut R) -> CatalogueSnapshot {
    let mut seen: Vec<&str> = Vec::new();
    for station in &stations {
        if !seen.contains(&station.city.as_str()) {
            seen.push(&station.city);
        }
    }

    let (cities, traffic) = profiles::profiles_for(seen, rng);

    CatalogueSnapshot {
        stations,
        cities,
        traffic,
    }
}

/// Reads a snapshot from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a snapshot.
pub fn read_snapshot(path: &Path) -> Result<CatalogueSnapshot, GenerateError> {
    let contents = std::fs::read_to_string(path)?;
    let snapshot: CatalogueSnapshot = serde_json::from_str(&contents)?;
    log::info!(
        "Loaded snapshot {} ({} stations)",
        path.display(),
        snapshot.stations.len()
    );
    Ok(snapshot)
}

/// Writes a snapshot as pretty JSON.
///
/// Uses an atomic write pattern (write to `.tmp`, then rename) so readers
/// never see a partial file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_snapshot(path: &Path, snapshot: &CatalogueSnapshot) -> Result<(), GenerateError> {
    let tmp_path = path.with_extension("json.tmp");
    let contents = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(&tmp_path, contents)?;
    std::fs::rename(&tmp_path, path)?;
    log::info!("Saved snapshot to {}", path.display());
    Ok(())
}
