#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Planar distance and nearest-neighbour lookups over a station catalogue.
//!
//! Distances are Euclidean in degree space and converted to kilometres
//! with a fixed 111 km/degree factor. This is a deliberate approximation:
//! no geodesic or haversine computation is performed anywhere.
//!
//! [`StationIndex`] answers k-nearest queries with a linear scan, which is
//! fine for catalogues of a few thousand stations. [`CityLocator`] resolves
//! the nearest reference city and is built once per catalogue snapshot.

pub mod locator;

pub use locator::CityLocator;

use ev_siting_station_models::{Coordinate, Station};
use thiserror::Error;

/// Kilometres per degree used by [`to_km`].
pub const KM_PER_DEGREE: f64 = 111.0;

/// Errors that can occur during spatial queries.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// The catalogue has no stations to search.
    #[error("Station catalogue is empty")]
    EmptyCatalogue,
}

/// Euclidean distance between two points, in degrees.
///
/// NaN components propagate to a NaN result.
#[must_use]
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    (a.lat - b.lat).hypot(a.lon - b.lon)
}

/// Converts a degree-space distance to approximate kilometres.
#[must_use]
pub fn to_km(degrees: f64) -> f64 {
    degrees * KM_PER_DEGREE
}

/// A station returned from a nearest-neighbour query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestStation<'a> {
    /// The matched station.
    pub station: &'a Station,
    /// Distance from the query point in degrees.
    pub distance_deg: f64,
    /// Distance from the query point in kilometres.
    pub distance_km: f64,
}

/// Read-only nearest-station index over a catalogue slice.
#[derive(Debug, Clone, Copy)]
pub struct StationIndex<'a> {
    stations: &'a [Station],
}

impl<'a> StationIndex<'a> {
    #[must_use]
    pub const fn new(stations: &'a [Station]) -> Self {
        Self { stations }
    }

    /// Number of stations in the index.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.stations.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Returns up to `k` stations ordered by ascending distance to `point`.
    ///
    /// Ties keep catalogue order. Asking for more stations than the
    /// catalogue holds returns all of them.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::EmptyCatalogue`] if there are no stations.
    pub fn nearest(&self, point: Coordinate, k: usize) -> Result<Vec<NearestStation<'a>>, SpatialError> {
        if self.stations.is_empty() {
            return Err(SpatialError::EmptyCatalogue);
        }

        let mut ranked: Vec<NearestStation<'a>> = self
            .stations
            .iter()
            .map(|station| {
                let distance_deg = distance(point, station.location);
                NearestStation {
                    station,
                    distance_deg,
                    distance_km: to_km(distance_deg),
                }
            })
            .collect();

        // `sort_by` is stable, so equal distances stay in catalogue order.
        ranked.sort_by(|a, b| a.distance_deg.total_cmp(&b.distance_deg));
        ranked.truncate(k);

        log::debug!(
            "nearest({:.4}, {:.4}, k={k}) -> {} of {} stations",
            point.lat,
            point.lon,
            ranked.len(),
            self.stations.len()
        );

        Ok(ranked)
    }
}
