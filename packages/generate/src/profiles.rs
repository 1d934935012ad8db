//! Synthetic demographic and traffic profiles.
//!
//! Populations come from the reference table where known. Every other
//! figure is drawn uniformly from a plausible range for Turkish provinces.

use ev_siting_geography_models::reference::reference_city;
use ev_siting_station_models::{CityProfile, TrafficProfile};
use rand::Rng;

use crate::round_to;

/// Population range for provinces outside the reference table.
const FALLBACK_POPULATION: std::ops::Range<u64> = 300_000..1_000_000;

/// Population of `city`, drawn from [`FALLBACK_POPULATION`] when unknown.
pub fn population<R: Rng + ?Sized>(city: &str, rng: &mut R) -> u64 {
    reference_city(city).map_or_else(|| rng.gen_range(FALLBACK_POPULATION), |r| r.population)
}

pub fn city_profile<R: Rng + ?Sized>(city: &str, population: u64, rng: &mut R) -> CityProfile {
    CityProfile {
        city: city.to_string(),
        population,
        ev_adoption_rate: round_to(rng.gen_range(0.01..0.15), 3),
        avg_income: f64::from(rng.gen_range(5_000u32..=20_000)),
        urbanization_rate: round_to(rng.gen_range(0.65..0.95), 2),
        avg_age: rng.gen_range(32..=45),
        public_transport_usage: round_to(rng.gen_range(0.1..0.6), 2),
        tourism_score: rng.gen_range(1..=10),
        growth_potential: round_to(rng.gen_range(0.01..0.08), 3),
    }
}

/// Traffic scales with population: 10-40% of residents per day.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn traffic_profile<R: Rng + ?Sized>(city: &str, population: u64, rng: &mut R) -> TrafficProfile {
    let share: f64 = rng.gen_range(0.1..0.4);
    TrafficProfile {
        city: city.to_string(),
        avg_daily_traffic: (population as f64 * share) as u64,
        peak_hour_factor: round_to(rng.gen_range(1.5..3.5), 1),
        highway_accessibility: round_to(rng.gen_range(0.3..0.9), 2),
        congestion_index: round_to(rng.gen_range(1.0..10.0), 1),
        avg_commute_time: rng.gen_range(15..=60),
        major_routes_count: rng.gen_range(3..=15),
        traffic_growth_rate: round_to(rng.gen_range(0.01..0.08), 3),
    }
}

/// Demographic and traffic rows for each of `cities`, in order.
pub fn profiles_for<'c, R: Rng + ?Sized>(
    cities: impl IntoIterator<Item = &'c str>,
    rng: &mut R,
) -> (Vec<CityProfile>, Vec<TrafficProfile>) {
    let mut demographics = Vec::new();
    let mut traffic = Vec::new();

    for city in cities {
        let population = population(city, rng);
        demographics.push(city_profile(city, population, rng));
        traffic.push(traffic_profile(city, population, rng));
    }

    (demographics, traffic)
}
