#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Converts Open Charge Map POI exports into [`Station`] records.
//!
//! The input is the JSON array returned by the `/poi` endpoint, saved to
//! disk by whatever fetched it. Town names are normalized to canonical
//! provinces; rows that cannot be placed in a province or lack
//! coordinates are dropped. The export carries no economic data, so
//! usage, rating, installation and cost figures are drawn from the
//! injected RNG.

use std::collections::BTreeSet;
use std::path::Path;

use ev_siting_geography_models::provinces::{UNKNOWN_CITY, normalize_city_name};
use ev_siting_station_models::{Coordinate, DEFAULT_POWER_KW, Station, UNKNOWN_OPERATOR};
use rand::Rng;
use serde::Deserialize;

/// Name given to stations without a title.
pub const UNKNOWN_STATION: &str = "Unknown Station";

/// Status given to stations without a status type.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Revenue per charging session used for simulated revenue.
const REVENUE_PER_SESSION: f64 = 75.0;

/// Days per month used for simulated revenue.
const DAYS_PER_MONTH: f64 = 30.0;

/// Errors that can occur while ingesting an export.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The export is not a valid POI array.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The export file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PoiRecord {
    #[serde(rename = "ID")]
    id: Option<u64>,
    address_info: Option<AddressInfo>,
    operator_info: Option<Titled>,
    status_type: Option<Titled>,
    connections: Option<Vec<Connection>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AddressInfo {
    title: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    town: Option<String>,
    address_line1: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Titled {
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Connection {
    #[serde(rename = "PowerKW")]
    power_kw: Option<f64>,
    connection_type: Option<Titled>,
}

/// Stations parsed from an export plus the number of rows dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    /// Accepted stations in export order.
    pub stations: Vec<Station>,
    /// Rows whose town did not normalize to a province.
    pub unknown_city: u64,
    /// Rows without usable coordinates.
    pub missing_coordinates: u64,
}

fn title_of(titled: Option<&Titled>) -> Option<&str> {
    titled
        .and_then(|t| t.title.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Highest positive connection power, or [`DEFAULT_POWER_KW`].
fn max_power(connections: &[Connection]) -> f64 {
    connections
        .iter()
        .filter_map(|c| c.power_kw)
        .filter(|p| p.is_finite() && *p > 0.0)
        .reduce(f64::max)
        .unwrap_or(DEFAULT_POWER_KW)
}

fn connection_types(connections: &[Connection]) -> Vec<String> {
    connections
        .iter()
        .filter_map(|c| title_of(c.connection_type.as_ref()))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn into_station<R: Rng + ?Sized>(
    record: PoiRecord,
    fallback_id: u64,
    city: &str,
    location: Coordinate,
    rng: &mut R,
) -> Station {
    let address = record.address_info.as_ref();
    let connections = record.connections.unwrap_or_default();

    let daily_usage = f64::from(rng.gen_range(5u32..40));
    let customer_rating = (rng.gen_range(3.0f64..5.0) * 10.0).round() / 10.0;
    let installation_year = rng.gen_range(2018u16..=2023);
    let installation_cost = f64::from(rng.gen_range(20_000u32..150_000));

    Station {
        id: record.id.unwrap_or(fallback_id),
        name: address
            .and_then(|a| a.title.clone())
            .unwrap_or_else(|| UNKNOWN_STATION.to_string()),
        operator: title_of(record.operator_info.as_ref())
            .unwrap_or(UNKNOWN_OPERATOR)
            .to_string(),
        location,
        city: city.to_string(),
        address: address
            .and_then(|a| a.address_line1.clone())
            .unwrap_or_default(),
        charger_count: u32::try_from(connections.len()).unwrap_or(u32::MAX),
        power_kw: max_power(&connections),
        connection_types: connection_types(&connections),
        status: title_of(record.status_type.as_ref())
            .unwrap_or(UNKNOWN_STATUS)
            .to_string(),
        installation_year,
        installation_cost,
        monthly_revenue: daily_usage * DAYS_PER_MONTH * REVENUE_PER_SESSION,
        operational_cost: installation_cost.mul_add(0.02, 5_000.0),
        customer_rating,
    }
}

/// Parses a POI export held in memory.
///
/// Rows without an `ID` are numbered by their 1-based position.
///
/// # Errors
///
/// Returns [`IngestError::Json`] if `json` is not an array of POI objects.
pub fn parse_poi_json<R: Rng + ?Sized>(json: &str, rng: &mut R) -> Result<IngestOutcome, IngestError> {
    let records: Vec<PoiRecord> = serde_json::from_str(json)?;
    let total = records.len();

    let mut outcome = IngestOutcome {
        stations: Vec::with_capacity(total),
        unknown_city: 0,
        missing_coordinates: 0,
    };

    for (position, record) in records.into_iter().enumerate() {
        let town = record
            .address_info
            .as_ref()
            .and_then(|a| a.town.as_deref())
            .unwrap_or_default();
        let city = normalize_city_name(town);
        if city == UNKNOWN_CITY {
            log::debug!("Dropping POI {:?}: town '{town}' is not a province", record.id);
            outcome.unknown_city += 1;
            continue;
        }

        let location = record
            .address_info
            .as_ref()
            .and_then(|a| Some(Coordinate::new(a.latitude?, a.longitude?)))
            .filter(Coordinate::is_finite);
        let Some(location) = location else {
            log::debug!("Dropping POI {:?}: no coordinates", record.id);
            outcome.missing_coordinates += 1;
            continue;
        };

        let fallback_id = position as u64 + 1;
        outcome
            .stations
            .push(into_station(record, fallback_id, city, location, rng));
    }

    if outcome.unknown_city + outcome.missing_coordinates > 0 {
        log::warn!(
            "Dropped {} POIs with unrecognized towns and {} without coordinates",
            outcome.unknown_city,
            outcome.missing_coordinates
        );
    }
    log::info!("Ingested {} of {total} POIs", outcome.stations.len());

    Ok(outcome)
}

/// Reads and parses a POI export file.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be read, or
/// [`IngestError::Json`] if it is not a POI array.
pub fn load_poi_file<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> Result<IngestOutcome, IngestError> {
    let contents = std::fs::read_to_string(path)?;
    log::info!("Read POI export {}", path.display());
    parse_poi_json(&contents, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EXPORT: &str = r#"[
      {
        "ID": 101,
        "AddressInfo": {
          "Title": "Moda Sahil",
          "Latitude": 40.983,
          "Longitude": 29.026,
          "Town": "Kadıköy",
          "AddressLine1": "Moda Cd. 12"
        },
        "OperatorInfo": { "Title": "ZES" },
        "StatusType": { "Title": "Operational" },
        "Connections": [
          { "PowerKW": 22.0, "ConnectionType": { "Title": "Type 2" } },
          { "PowerKW": 120.0, "ConnectionType": { "Title": "CCS" } },
          { "PowerKW": null, "ConnectionType": { "Title": "Type 2" } }
        ]
      },
      {
        "ID": 102,
        "AddressInfo": { "Title": "Kızılay AVM", "Latitude": 39.92, "Longitude": 32.85, "Town": "Ankara / Çankaya" },
        "Connections": [ { "PowerKW": 0 } ]
      },
      {
        "ID": 103,
        "AddressInfo": { "Title": "Nowhere", "Latitude": 40.0, "Longitude": 30.0, "Town": "Narnia" }
      },
      {
        "ID": 104,
        "AddressInfo": { "Title": "No Coordinates", "Town": "İzmir" }
      },
      {
        "AddressInfo": { "Latitude": 37.87, "Longitude": 32.48, "Town": "konya" },
        "Connections": null
      }
    ]"#;

    fn ingest() -> IngestOutcome {
        parse_poi_json(EXPORT, &mut ChaCha8Rng::seed_from_u64(1)).unwrap()
    }

    #[test]
    fn keeps_only_placeable_rows() {
        let outcome = ingest();
        let ids: Vec<u64> = outcome.stations.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![101, 102, 5]);
        assert_eq!(outcome.unknown_city, 1);
        assert_eq!(outcome.missing_coordinates, 1);
    }

    #[test]
    fn maps_poi_fields() {
        let outcome = ingest();
        let moda = &outcome.stations[0];

        assert_eq!(moda.city, "İstanbul");
        assert_eq!(moda.name, "Moda Sahil");
        assert_eq!(moda.operator, "ZES");
        assert_eq!(moda.address, "Moda Cd. 12");
        assert_eq!(moda.status, "Operational");
        assert_eq!(moda.charger_count, 3);
        assert!((moda.power_kw - 120.0).abs() < f64::EPSILON);
        assert_eq!(moda.connection_types, vec!["CCS", "Type 2"]);
    }

    #[test]
    fn fills_defaults_for_sparse_rows() {
        let outcome = ingest();

        let kizilay = &outcome.stations[1];
        assert_eq!(kizilay.city, "Ankara");
        assert_eq!(kizilay.operator, UNKNOWN_OPERATOR);
        assert_eq!(kizilay.status, UNKNOWN_STATUS);
        assert!((kizilay.power_kw - DEFAULT_POWER_KW).abs() < f64::EPSILON);

        let konya = &outcome.stations[2];
        assert_eq!(konya.city, "Konya");
        assert_eq!(konya.name, UNKNOWN_STATION);
        assert_eq!(konya.charger_count, 0);
        assert!(konya.connection_types.is_empty());
    }

    #[test]
    fn simulated_economics_are_consistent() {
        for station in ingest().stations {
            assert!((3.0..=5.0).contains(&station.customer_rating));
            assert!((2018..=2023).contains(&station.installation_year));
            assert!((20_000.0..150_000.0).contains(&station.installation_cost));

            let sessions = station.monthly_revenue / (DAYS_PER_MONTH * REVENUE_PER_SESSION);
            assert!((5.0..40.0).contains(&sessions));
            assert!((sessions - sessions.round()).abs() < 1e-9);

            let expected_cost = station.installation_cost * 0.02 + 5_000.0;
            assert!((station.operational_cost - expected_cost).abs() < 1e-6);
        }
    }

    #[test]
    fn equal_seeds_ingest_identically() {
        assert_eq!(ingest(), ingest());
    }

    #[test]
    fn rejects_non_array_input() {
        assert!(matches!(
            parse_poi_json("{\"ID\": 1}", &mut ChaCha8Rng::seed_from_u64(0)),
            Err(IngestError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_poi_file(Path::new("/nonexistent/poi.json"), &mut ChaCha8Rng::seed_from_u64(0)),
            Err(IngestError::Io(_))
        ));
    }
}
