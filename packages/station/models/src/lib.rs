#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Charging station catalogue and per-city profile types.
//!
//! These are the input tables every analysis runs over. A
//! [`CatalogueSnapshot`] is built once per data refresh by the acquisition
//! side (ingest or the synthetic generator) and is never mutated after
//! that; all analytics take it by shared reference.

use serde::{Deserialize, Serialize};

/// Rated power assumed for stations whose connectors report no power.
pub const DEFAULT_POWER_KW: f64 = 50.0;

/// Operator name used when the source does not report one.
pub const UNKNOWN_OPERATOR: &str = "unknown";

/// A point in degree space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns `true` when both components are finite numbers.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// A single charging station in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Source identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Operating company, or [`UNKNOWN_OPERATOR`].
    #[serde(default = "default_operator")]
    pub operator: String,
    /// Station position.
    pub location: Coordinate,
    /// Canonical province name.
    pub city: String,
    /// Street address line, if the source has one.
    #[serde(default)]
    pub address: String,
    /// Number of charge points.
    #[serde(default)]
    pub charger_count: u32,
    /// Highest connector power in kW.
    #[serde(default = "default_power_kw")]
    pub power_kw: f64,
    /// Connector type names (e.g. "CCS (Type 2)").
    #[serde(default)]
    pub connection_types: Vec<String>,
    /// Operational status as reported by the source.
    #[serde(default)]
    pub status: String,
    /// Year the station was commissioned.
    pub installation_year: u16,
    /// Up-front installation cost.
    pub installation_cost: f64,
    /// Average monthly revenue.
    pub monthly_revenue: f64,
    /// Average monthly operating cost.
    pub operational_cost: f64,
    /// Mean customer rating, 0.0-5.0.
    pub customer_rating: f64,
}

fn default_operator() -> String {
    UNKNOWN_OPERATOR.to_string()
}

const fn default_power_kw() -> f64 {
    DEFAULT_POWER_KW
}

/// Demographic statistics for one province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityProfile {
    /// Canonical province name (unique key).
    pub city: String,
    /// Resident population.
    pub population: u64,
    /// Share of registered vehicles that are electric, 0-1.
    pub ev_adoption_rate: f64,
    /// Average monthly income.
    pub avg_income: f64,
    /// Urban share of the population, 0-1.
    pub urbanization_rate: f64,
    /// Median resident age in years.
    pub avg_age: u32,
    /// Share of commuters using public transport, 0-1.
    pub public_transport_usage: f64,
    /// Tourism attractiveness, 1-10.
    pub tourism_score: u8,
    /// Expected annual growth, 0-1.
    pub growth_potential: f64,
}

/// Traffic statistics for one province, 1:1 with [`CityProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficProfile {
    /// Canonical province name (same key space as [`CityProfile::city`]).
    pub city: String,
    /// Average vehicles per day.
    pub avg_daily_traffic: u64,
    /// Peak-hour to average ratio, at least 1.
    pub peak_hour_factor: f64,
    /// Highway accessibility, 0-1.
    pub highway_accessibility: f64,
    /// Congestion index, 1-10.
    pub congestion_index: f64,
    /// Average commute in minutes.
    pub avg_commute_time: u32,
    /// Number of major routes through the city.
    pub major_routes_count: u32,
    /// Annual traffic growth, 0-1.
    pub traffic_growth_rate: f64,
}

/// Immutable point-in-time view of all analysis inputs.
///
/// Refreshed wholesale; there are no per-station updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueSnapshot {
    /// Station catalogue in source order.
    pub stations: Vec<Station>,
    /// One demographic row per province.
    pub cities: Vec<CityProfile>,
    /// One traffic row per province.
    pub traffic: Vec<TrafficProfile>,
}

impl CatalogueSnapshot {
    /// Looks up the demographic row for `city`.
    #[must_use]
    pub fn city_profile(&self, city: &str) -> Option<&CityProfile> {
        self.cities.iter().find(|c| c.city == city)
    }

    /// Looks up the traffic row for `city`.
    #[must_use]
    pub fn traffic_profile(&self, city: &str) -> Option<&TrafficProfile> {
        self.traffic.iter().find(|t| t.city == city)
    }

    /// Returns the stations located in `city`, in catalogue order.
    pub fn stations_in<'a>(&'a self, city: &'a str) -> impl Iterator<Item = &'a Station> + 'a {
        self.stations.iter().filter(move |s| s.city == city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_defaults_fill_missing_fields() {
        let json = r#"{
            "id": 7,
            "name": "Kadıköy Hub",
            "location": { "lat": 40.99, "lon": 29.03 },
            "city": "İstanbul",
            "installationYear": 2021,
            "installationCost": 90000.0,
            "monthlyRevenue": 22500.0,
            "operationalCost": 6800.0,
            "customerRating": 4.2
        }"#;

        let station: Station = serde_json::from_str(json).unwrap();
        assert_eq!(station.operator, UNKNOWN_OPERATOR);
        assert!((station.power_kw - DEFAULT_POWER_KW).abs() < f64::EPSILON);
        assert_eq!(station.charger_count, 0);
        assert!(station.connection_types.is_empty());
    }

    #[test]
    fn snapshot_lookups_by_city() {
        let snapshot = CatalogueSnapshot {
            stations: Vec::new(),
            cities: vec![CityProfile {
                city: "Ankara".to_string(),
                population: 5_639_000,
                ev_adoption_rate: 0.04,
                avg_income: 12_000.0,
                urbanization_rate: 0.9,
                avg_age: 34,
                public_transport_usage: 0.3,
                tourism_score: 5,
                growth_potential: 0.05,
            }],
            traffic: Vec::new(),
        };

        assert!(snapshot.city_profile("Ankara").is_some());
        assert!(snapshot.city_profile("İzmir").is_none());
        assert!(snapshot.traffic_profile("Ankara").is_none());
    }

    #[test]
    fn coordinate_finiteness() {
        assert!(Coordinate::new(39.0, 35.0).is_finite());
        assert!(!Coordinate::new(f64::NAN, 35.0).is_finite());
    }
}
