#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Province reference data and region boundary types.
//!
//! The province list and city-name normalization are the canonical key
//! space for every per-city table. The region types describe the TOML
//! schema of the district/neighborhood registry in `ev_siting_geography`.

pub mod provinces;
pub mod reference;

use ev_siting_station_models::Coordinate;
use serde::{Deserialize, Serialize};

/// A coarse latitude/longitude bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Southern edge.
    pub min_lat: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Western edge.
    pub min_lon: f64,
    /// Eastern edge.
    pub max_lon: f64,
}

impl Envelope {
    /// Box used for provinces without registry data.
    pub const DEFAULT: Self = Self {
        min_lat: 39.0,
        max_lat: 40.0,
        min_lon: 32.0,
        max_lon: 33.0,
    };

    /// Returns `true` if `point` lies inside the box (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lon..=self.max_lon).contains(&point.lon)
    }

    /// Centre of the box.
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            f64::midpoint(self.min_lat, self.max_lat),
            f64::midpoint(self.min_lon, self.max_lon),
        )
    }

    /// Returns `true` when every edge is finite and min < max on both axes.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.min_lat, self.max_lat, self.min_lon, self.max_lon]
            .iter()
            .all(|v| v.is_finite())
            && self.min_lat < self.max_lat
            && self.min_lon < self.max_lon
    }
}

/// District and neighborhood definitions for one province, deserialized
/// from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityRegions {
    /// Canonical province name.
    pub city: String,
    /// Bounding box candidates are generated in.
    pub envelope: Envelope,
    /// Districts in display order.
    #[serde(default)]
    pub districts: Vec<District>,
}

impl CityRegions {
    /// Finds a district by exact name.
    #[must_use]
    pub fn district(&self, name: &str) -> Option<&District> {
        self.districts.iter().find(|d| d.name == name)
    }
}

/// A district and its neighborhoods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct District {
    /// District name.
    pub name: String,
    /// Neighborhood names. Empty means the district only has its centre.
    #[serde(default)]
    pub neighborhoods: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_envelope_is_valid() {
        assert!(Envelope::DEFAULT.is_valid());
        let center = Envelope::DEFAULT.center();
        assert!(Envelope::DEFAULT.contains(center));
        assert!((center.lat - 39.5).abs() < 1e-12);
        assert!((center.lon - 32.5).abs() < 1e-12);
    }

    #[test]
    fn inverted_envelope_is_invalid() {
        let env = Envelope {
            min_lat: 41.0,
            max_lat: 40.0,
            min_lon: 28.0,
            max_lon: 29.0,
        };
        assert!(!env.is_valid());
    }
}
