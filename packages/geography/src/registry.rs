//! Compile-time registry of province region definitions.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Adding district detail for a new province requires creating a TOML file
//! in `regions/` and adding a corresponding entry here.

use ev_siting_geography_models::provinces::is_province;
use ev_siting_geography_models::reference::reference_city;
use ev_siting_geography_models::{CityRegions, Envelope};

use crate::GeoError;

/// Name of the implicit district (and neighborhood) for provinces without
/// registry detail.
pub const CENTRAL_DISTRICT: &str = "Merkez";

/// Half-width in degrees of the envelope built around a reference centre.
const REFERENCE_ENVELOPE_RADIUS: f64 = 0.1;

/// Number of registered region files. Enforced by a test.
#[cfg(test)]
const EXPECTED_REGION_COUNT: usize = 3;

/// Embedded TOML region definitions.
const REGION_TOMLS: &[(&str, &str)] = &[
    ("istanbul", include_str!("../regions/istanbul.toml")),
    ("ankara", include_str!("../regions/ankara.toml")),
    ("izmir", include_str!("../regions/izmir.toml")),
];

/// Returns all embedded region definitions.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught by the tests below.
#[must_use]
pub fn all_regions() -> Vec<CityRegions> {
    REGION_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse region '{name}': {e}"))
        })
        .collect()
}

/// A validated (city, district, neighborhood) selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRegion {
    /// Canonical province name.
    pub city: String,
    /// District name.
    pub district: String,
    /// Neighborhood name, when one was selected.
    pub neighborhood: Option<String>,
    /// Box candidate points are drawn from.
    pub envelope: Envelope,
}

impl ResolvedRegion {
    /// Human-readable address label: the most specific area, then the city.
    #[must_use]
    pub fn label(&self) -> String {
        let area = self.neighborhood.as_deref().unwrap_or(&self.district);
        format!("{area}, {}", self.city)
    }
}

/// Read-only lookup over region definitions.
#[derive(Debug, Clone)]
pub struct RegionRegistry {
    regions: Vec<CityRegions>,
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self::embedded()
    }
}

impl RegionRegistry {
    /// Builds the registry from the embedded TOML files.
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(all_regions())
    }

    /// Builds a registry from explicit definitions.
    #[must_use]
    pub const fn new(regions: Vec<CityRegions>) -> Self {
        Self { regions }
    }

    fn city_regions(&self, city: &str) -> Result<Option<&CityRegions>, GeoError> {
        if !is_province(city) {
            return Err(GeoError::UnknownCity {
                city: city.to_string(),
            });
        }
        Ok(self.regions.iter().find(|r| r.city == city))
    }

    /// Lists the districts of `city`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::UnknownCity`] if `city` is not a province.
    pub fn districts(&self, city: &str) -> Result<Vec<&str>, GeoError> {
        Ok(match self.city_regions(city)? {
            Some(regions) if !regions.districts.is_empty() => {
                regions.districts.iter().map(|d| d.name.as_str()).collect()
            }
            _ => vec![CENTRAL_DISTRICT],
        })
    }

    /// Lists the neighborhoods of `district` in `city`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::UnknownCity`] or [`GeoError::UnknownDistrict`]
    /// if the selection is not recognized.
    pub fn neighborhoods(&self, city: &str, district: &str) -> Result<Vec<&str>, GeoError> {
        if !self.districts(city)?.contains(&district) {
            return Err(GeoError::UnknownDistrict {
                city: city.to_string(),
                district: district.to_string(),
            });
        }

        let listed = self
            .city_regions(city)?
            .and_then(|r| r.district(district))
            .map(|d| d.neighborhoods.as_slice())
            .unwrap_or_default();

        if listed.is_empty() {
            Ok(vec![CENTRAL_DISTRICT])
        } else {
            Ok(listed.iter().map(String::as_str).collect())
        }
    }

    /// Returns the candidate envelope for `city`.
    ///
    /// Registry data wins; otherwise a box around the reference centre of a
    /// major city; otherwise [`Envelope::DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::UnknownCity`] if `city` is not a province.
    pub fn envelope(&self, city: &str) -> Result<Envelope, GeoError> {
        if let Some(regions) = self.city_regions(city)? {
            return Ok(regions.envelope);
        }

        Ok(reference_city(city).map_or(Envelope::DEFAULT, |reference| Envelope {
            min_lat: reference.center.lat - REFERENCE_ENVELOPE_RADIUS,
            max_lat: reference.center.lat + REFERENCE_ENVELOPE_RADIUS,
            min_lon: reference.center.lon - REFERENCE_ENVELOPE_RADIUS,
            max_lon: reference.center.lon + REFERENCE_ENVELOPE_RADIUS,
        }))
    }

    /// Validates a (city, district, neighborhood) selection.
    ///
    /// # Errors
    ///
    /// Returns the [`GeoError`] variant for the first level that is not
    /// recognized.
    pub fn resolve(
        &self,
        city: &str,
        district: &str,
        neighborhood: Option<&str>,
    ) -> Result<ResolvedRegion, GeoError> {
        let neighborhoods = self.neighborhoods(city, district)?;

        if let Some(neighborhood) = neighborhood
            && !neighborhoods.contains(&neighborhood)
        {
            return Err(GeoError::UnknownNeighborhood {
                city: city.to_string(),
                district: district.to_string(),
                neighborhood: neighborhood.to_string(),
            });
        }

        let envelope = self.envelope(city)?;
        log::debug!("Resolved region {district}/{neighborhood:?} in {city} to {envelope:?}");

        Ok(ResolvedRegion {
            city: city.to_string(),
            district: district.to_string(),
            neighborhood: neighborhood.map(str::to_string),
            envelope,
        })
    }
}
