//! Nearest reference-city lookup.
//!
//! Each city gets one representative coordinate: the mean position of its
//! stations in the catalogue, or the reference centre from
//! [`ev_siting_geography_models::reference`] when it has no stations.
//! Cities with neither are left out. The table is built once per snapshot
//! and queried by linear scan.

use std::collections::BTreeMap;

use ev_siting_geography_models::provinces::is_province;
use ev_siting_geography_models::reference::reference_city;
use ev_siting_station_models::{Coordinate, Station};

use crate::distance;

/// Representative coordinates for a set of cities, in caller order.
#[derive(Debug, Clone, Default)]
pub struct CityLocator {
    entries: Vec<(String, Coordinate)>,
}

impl CityLocator {
    /// Builds the locator for `cities`, deriving each position from
    /// `stations`.
    ///
    /// Names that are not canonical provinces (including the unknown-city
    /// sentinel) are skipped.
    pub fn build<'c>(cities: impl IntoIterator<Item = &'c str>, stations: &[Station]) -> Self {
        let mut sums: BTreeMap<&str, (f64, f64, u32)> = BTreeMap::new();
        for station in stations.iter().filter(|s| s.location.is_finite()) {
            let entry = sums.entry(station.city.as_str()).or_insert((0.0, 0.0, 0));
            entry.0 += station.location.lat;
            entry.1 += station.location.lon;
            entry.2 += 1;
        }

        let mut entries = Vec::new();
        for city in cities {
            if !is_province(city) {
                log::warn!("Skipping unrecognized city '{city}' in city locator");
                continue;
            }
            if entries.iter().any(|(name, _)| name == city) {
                continue;
            }

            let position = sums
                .get(city)
                .map(|&(lat, lon, n)| Coordinate::new(lat / f64::from(n), lon / f64::from(n)))
                .or_else(|| reference_city(city).map(|r| r.center));

            match position {
                Some(position) => entries.push((city.to_string(), position)),
                None => log::warn!("No position for city '{city}'; it cannot be matched"),
            }
        }

        log::debug!("City locator built with {} cities", entries.len());

        Self { entries }
    }

    /// Number of locatable cities.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Representative coordinate for `city`, if it is locatable.
    #[must_use]
    pub fn position(&self, city: &str) -> Option<Coordinate> {
        self.entries
            .iter()
            .find(|(name, _)| name == city)
            .map(|(_, position)| *position)
    }

    /// Returns the city closest to `point` and its distance in degrees.
    ///
    /// Equal distances resolve to the earliest city in build order.
    #[must_use]
    pub fn nearest_city(&self, point: Coordinate) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;

        for (name, position) in &self.entries {
            let d = distance(point, *position);
            match best {
                Some((_, current)) if d >= current => {}
                _ => best = Some((name.as_str(), d)),
            }
        }

        best
    }
}
