#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types produced by the siting analytics.
//!
//! Every type here is derived per analysis run from a catalogue snapshot
//! and is never persisted independently. They serialize to camelCase JSON
//! for the presentation layer.

use ev_siting_station_models::{Coordinate, Station};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Operator price positioning.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingTier {
    /// Below-market pricing.
    Economy,
    /// Market-rate pricing.
    Mid,
    /// Above-market pricing.
    Premium,
}

impl PricingTier {
    /// Multiplier applied to the base per-kWh price.
    #[must_use]
    pub const fn price_multiplier(self) -> f64 {
        match self {
            Self::Economy => 0.8,
            Self::Mid => 1.0,
            Self::Premium => 1.2,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Economy, Self::Mid, Self::Premium]
    }
}

/// Three-step qualitative rating shared by competition and risk estimates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }
}

/// Aggregated view of one operator across a catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorSummary {
    /// Operator name.
    pub operator: String,
    /// Stations run by this operator.
    pub total_stations: u32,
    /// Mean charge points per station.
    pub avg_charger_count: f64,
    /// Mean station power in kW.
    pub avg_power: f64,
    /// Mean customer rating, 0-5.
    pub avg_customer_rating: f64,
    /// Share of the catalogue, 0-1. Sums to 1 across one analysis.
    pub market_share: f64,
    /// Room to grow, 0-1.
    pub growth_potential: f64,
    /// Price positioning.
    pub pricing_tier: PricingTier,
    /// Estimated price per kWh.
    pub avg_price_per_kwh: f64,
    /// Brand recognition, 1-10.
    pub brand_recognition: u8,
    /// Service quality, 1-10.
    pub service_quality: u8,
    /// Technology level, 1-10.
    pub tech_level: u8,
    /// Number of accepted payment methods.
    pub payment_options: u32,
    /// Customer segment the operator targets.
    pub target_segment: String,
    /// Derived satisfaction, 0-1.
    pub customer_satisfaction: f64,
    /// Derived competitiveness, 0-10. Primary ranking key.
    pub competitive_score: f64,
    /// Yearly network expansion rate.
    pub expansion_rate: f64,
}

/// Suitability of a single point for a new station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationScore {
    /// Composite suitability, 0-100, one decimal.
    pub score: f64,
    /// Reference city the demographic inputs came from.
    pub nearest_city: String,
    /// Number of stations considered nearby.
    pub nearest_stations: u32,
    /// Mean distance to the nearby stations in km, two decimals.
    /// `None` when the catalogue is empty.
    pub avg_distance_km: Option<f64>,
    /// Population of the nearest city.
    pub population: u64,
    /// EV adoption rate of the nearest city.
    pub ev_adoption_rate: f64,
    /// Average income of the nearest city.
    pub avg_income: f64,
    /// Average daily traffic of the nearest city.
    pub avg_daily_traffic: u64,
    /// Growth potential of the nearest city.
    pub growth_potential: f64,
}

/// A station and its distance from a query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStation {
    /// The station record.
    pub station: Station,
    /// Distance in km.
    pub distance_km: f64,
}

/// A generated point considered for a new station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateLocation {
    /// Candidate position.
    pub location: Coordinate,
    /// Address label ("Moda, İstanbul").
    pub address: String,
    /// Suitability, 0-100.
    pub score: f64,
    /// Estimated vehicles passing per day.
    pub daily_traffic: u32,
    /// Estimated businesses in walking distance.
    pub nearby_businesses: u32,
    /// Estimated competitive pressure.
    pub competition_level: Level,
    /// Estimated monthly revenue.
    pub estimated_revenue: f64,
    /// Estimated payback in months.
    pub roi_months: f64,
    /// Estimated investment risk.
    pub risk_level: Level,
}

/// Roll-up of one area analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSummary {
    /// Province analyzed.
    pub city: String,
    /// Number of candidates generated.
    pub candidate_count: u32,
    /// Mean candidate score, `None` without candidates.
    pub average_score: Option<f64>,
    /// Best candidate score, `None` without candidates.
    pub best_score: Option<f64>,
    /// Stations already operating in the province.
    pub existing_stations: u32,
    /// Province population, when a profile exists.
    pub population: Option<u64>,
    /// Province EV adoption rate, when a profile exists.
    pub ev_adoption_rate: Option<f64>,
    /// Province congestion index, when a traffic profile exists.
    pub congestion_index: Option<f64>,
    /// Province growth potential, when a profile exists.
    pub growth_potential: Option<f64>,
}

/// Payback period of an investment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaybackHorizon {
    /// Investment is recovered after this many months.
    Months(f64),
    /// Monthly profit is not positive; the investment is never recovered.
    Never,
}

impl PaybackHorizon {
    /// Months to payback, [`f64::INFINITY`] for [`Self::Never`].
    #[must_use]
    pub const fn months(self) -> f64 {
        match self {
            Self::Months(months) => months,
            Self::Never => f64::INFINITY,
        }
    }

    #[must_use]
    pub const fn is_never(self) -> bool {
        matches!(self, Self::Never)
    }
}

impl std::fmt::Display for PaybackHorizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Months(months) => write!(f, "{months:.1} months"),
            Self::Never => write!(f, "never"),
        }
    }
}

/// Cumulative profit at the end of one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    /// Period index, starting at 1.
    pub period: u32,
    /// Cumulative profit through this period.
    pub cumulative_profit: f64,
}

/// Financial projection for a candidate site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiProjection {
    /// Expected charging sessions per day.
    pub estimated_daily_usage: f64,
    /// Expected monthly revenue.
    pub monthly_revenue: f64,
    /// Expected monthly expenses.
    pub monthly_expenses: f64,
    /// Revenue minus expenses.
    pub monthly_profit: f64,
    /// Payback period.
    pub roi_months: PaybackHorizon,
    /// Cumulative profit per period, in period order.
    pub cumulative_profit: Vec<ProjectionPoint>,
    /// Fractional period where cumulative profit turns positive.
    pub breakeven_period: Option<f64>,
}

/// Qualitative band of a suitability score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SuitabilityTier {
    /// Score below 40.
    Low,
    /// Score from 40.
    Moderate,
    /// Score from 60.
    Good,
    /// Score from 80.
    Excellent,
}

impl SuitabilityTier {
    /// Band for a 0-100 score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// Observation attached to a location score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Advisory {
    /// Many stations nearby; differentiate on power.
    HighCompetition,
    /// EV adoption is low; plan for a long horizon.
    LowEvAdoption,
    /// Competitors are far away.
    DistantCompetitors,
    /// Heavy traffic around the city.
    HighTraffic,
    /// Nothing stands out.
    GenerallySuitable,
}

/// Tier plus advisories for a scored location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Qualitative band.
    pub tier: SuitabilityTier,
    /// Observations, never empty.
    pub advisories: Vec<Advisory>,
}

/// Number of stations sharing a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCount {
    /// Group label (operator, city, power rating, year).
    pub label: String,
    /// Stations in the group.
    pub count: u64,
}

/// Descriptive counts over a catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueStats {
    /// Total stations.
    pub total_stations: u64,
    /// Stations per operator, most first.
    pub by_operator: Vec<LabelCount>,
    /// Stations per city, most first.
    pub by_city: Vec<LabelCount>,
    /// Stations per power rating, ascending kW.
    pub by_power: Vec<LabelCount>,
    /// Stations per installation year, ascending.
    pub by_year: Vec<LabelCount>,
}
