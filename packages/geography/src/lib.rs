#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District and neighborhood region registry.
//!
//! Region definitions are TOML files embedded at compile time, one per
//! province that has sub-province detail. Provinces without a file still
//! resolve, with a single `Merkez` (centre) district, so any of the 81
//! provinces can be analyzed.

pub mod registry;

use thiserror::Error;

/// Errors that can occur when resolving a region.
#[derive(Debug, Error)]
pub enum GeoError {
    /// City is not one of the canonical provinces.
    #[error("Unknown city: {city}")]
    UnknownCity {
        /// The rejected city name.
        city: String,
    },

    /// District does not belong to the city.
    #[error("Unknown district '{district}' in {city}")]
    UnknownDistrict {
        /// Province name.
        city: String,
        /// The rejected district name.
        district: String,
    },

    /// Neighborhood does not belong to the district.
    #[error("Unknown neighborhood '{neighborhood}' in {district}, {city}")]
    UnknownNeighborhood {
        /// Province name.
        city: String,
        /// District name.
        district: String,
        /// The rejected neighborhood name.
        neighborhood: String,
    },
}
