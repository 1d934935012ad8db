#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Quantitative engine for EV charging station siting.
//!
//! Every operation is a pure function over an immutable
//! [`CatalogueSnapshot`](ev_siting_station_models::CatalogueSnapshot):
//!
//! - [`scoring`] turns a point into a 0-100 suitability score.
//! - [`competitor`] ranks operators by market share and competitiveness.
//! - [`area`] generates and ranks candidate sites within a region.
//! - [`roi`] projects cumulative profit and the breakeven period.
//!
//! [`SiteAnalyzer`] bundles the per-snapshot lookup structures so they are
//! built once and shared by all queries against that snapshot. Anything
//! that samples takes an injected [`rand::Rng`], so equal seeds give equal
//! results.

pub mod advice;
pub mod analyzer;
pub mod area;
pub mod competitor;
pub mod config;
pub mod operators;
pub mod roi;
pub mod scoring;
pub mod stats;

pub use analyzer::SiteAnalyzer;
pub use config::AnalysisConfig;

use ev_siting_geography::GeoError;
use ev_siting_spatial::SpatialError;
use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The catalogue has no stations to search.
    #[error("Station catalogue is empty")]
    EmptyCatalogue,

    /// No city with both demographic and traffic data could be matched.
    #[error("No reference city with demographic and traffic data near ({lat}, {lon})")]
    NoCityMatch {
        /// Query latitude.
        lat: f64,
        /// Query longitude.
        lon: f64,
    },

    /// The city/district/neighborhood selection is not recognized.
    #[error("Invalid region: {0}")]
    InvalidRegion(#[from] GeoError),

    /// A caller-supplied value is out of its accepted domain.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of what went wrong.
        message: String,
    },

    /// Configuration could not be read or failed validation.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}

impl From<SpatialError> for AnalyticsError {
    fn from(err: SpatialError) -> Self {
        match err {
            SpatialError::EmptyCatalogue => Self::EmptyCatalogue,
        }
    }
}

/// Rounds `value` to `decimals` decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_helper() {
        assert!((round_to(63.749, 1) - 63.7).abs() < 1e-12);
        assert!((round_to(1.005_1, 2) - 1.01).abs() < 1e-12);
        assert!((round_to(-2.25, 0) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn spatial_errors_map_to_empty_catalogue() {
        let err: AnalyticsError = SpatialError::EmptyCatalogue.into();
        assert!(matches!(err, AnalyticsError::EmptyCatalogue));
    }
}
