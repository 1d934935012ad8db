//! Multi-factor suitability score for a single point.
//!
//! Six signals are normalized into `[0, 1]` and combined with the
//! configured weights:
//!
//! | Signal | Source | Saturates at |
//! |---|---|---|
//! | competition | stations among the `nearest_k` closest | 0 nearby |
//! | population | nearest city profile | 10 000 000 |
//! | EV adoption | nearest city profile | 0.15 |
//! | income | nearest city profile | 20 000 |
//! | traffic | nearest city traffic profile | 2 000 000 |
//! | growth | nearest city profile | 0.08 |

use ev_siting_analytics_models::LocationScore;
use ev_siting_spatial::{CityLocator, SpatialError, StationIndex, to_km};
use ev_siting_station_models::{CatalogueSnapshot, CityProfile, Coordinate, TrafficProfile};

use crate::config::{Normalization, ScoringConfig, ScoringWeights};
use crate::{AnalyticsError, round_to};

/// Normalized inputs of the composite score, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringSignals {
    pub competition: f64,
    pub population: f64,
    pub ev_adoption: f64,
    pub income: f64,
    pub traffic: f64,
    pub growth: f64,
}

impl ScoringSignals {
    /// Normalizes the raw city figures against `normalization`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_profiles(
        competition: f64,
        city: &CityProfile,
        traffic: &TrafficProfile,
        normalization: &Normalization,
    ) -> Self {
        Self {
            competition: competition.clamp(0.0, 1.0),
            population: normalize(city.population as f64, normalization.population),
            ev_adoption: normalize(city.ev_adoption_rate, normalization.ev_adoption),
            income: normalize(city.avg_income, normalization.income),
            traffic: normalize(traffic.avg_daily_traffic as f64, normalization.traffic),
            growth: normalize(city.growth_potential, normalization.growth),
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> [f64; 6] {
        [
            self.competition,
            self.population,
            self.ev_adoption,
            self.income,
            self.traffic,
            self.growth,
        ]
    }
}

/// Scales `value` by `max` and caps the result to `[0, 1]`.
///
/// Non-finite results (a NaN input or a zero maximum) count as 0 so they
/// can never push the composite score out of range.
#[must_use]
pub fn normalize(value: f64, max: f64) -> f64 {
    let ratio = value / max;
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Competition signal for `count` nearby stations.
///
/// More stations means less opportunity; with none at all the
/// `no_nearby_competition` floor applies.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn competition_score(count: usize, config: &ScoringConfig) -> f64 {
    if count == 0 {
        config.no_nearby_competition
    } else {
        1.0 - (count as f64 / config.nearest_k as f64).min(1.0)
    }
}

/// Weighted sum of `signals` scaled to `[0, 100]`, one decimal.
#[must_use]
pub fn composite_score(signals: &ScoringSignals, weights: &ScoringWeights) -> f64 {
    let total: f64 = signals
        .as_array()
        .iter()
        .zip(weights.as_array())
        .map(|(signal, weight)| signal * weight)
        .sum();
    round_to((total * 100.0).clamp(0.0, 100.0), 1)
}

/// Builds the nearest-city lookup for `snapshot`.
///
/// Only cities with both a demographic and a traffic profile take part,
/// in demographic table order.
#[must_use]
pub fn build_city_locator(snapshot: &CatalogueSnapshot) -> CityLocator {
    let scorable = snapshot
        .cities
        .iter()
        .filter(|city| snapshot.traffic_profile(&city.city).is_some())
        .map(|city| city.city.as_str());
    CityLocator::build(scorable, &snapshot.stations)
}

/// Scores `point` against prebuilt lookup structures.
///
/// # Errors
///
/// * [`AnalyticsError::InvalidParameter`] if `point` is not finite.
/// * [`AnalyticsError::NoCityMatch`] if no city with both profiles is
///   locatable.
pub fn score_with(
    point: Coordinate,
    snapshot: &CatalogueSnapshot,
    index: &StationIndex<'_>,
    locator: &CityLocator,
    config: &ScoringConfig,
) -> Result<LocationScore, AnalyticsError> {
    if !point.is_finite() {
        return Err(AnalyticsError::InvalidParameter {
            message: format!("point ({}, {}) is not finite", point.lat, point.lon),
        });
    }

    let nearby = match index.nearest(point, config.nearest_k) {
        Ok(nearby) => nearby,
        Err(SpatialError::EmptyCatalogue) => Vec::new(),
    };

    #[allow(clippy::cast_precision_loss)]
    let avg_distance_km = (!nearby.is_empty()).then(|| {
        let mean_deg =
            nearby.iter().map(|n| n.distance_deg).sum::<f64>() / nearby.len() as f64;
        round_to(to_km(mean_deg), 2)
    });

    let no_match = || AnalyticsError::NoCityMatch {
        lat: point.lat,
        lon: point.lon,
    };
    let (city_name, _) = locator.nearest_city(point).ok_or_else(no_match)?;
    let city = snapshot.city_profile(city_name).ok_or_else(no_match)?;
    let traffic = snapshot.traffic_profile(city_name).ok_or_else(no_match)?;

    let signals = ScoringSignals::from_profiles(
        competition_score(nearby.len(), config),
        city,
        traffic,
        &config.normalization,
    );
    let score = composite_score(&signals, &config.weights);

    log::debug!(
        "score({:.4}, {:.4}) = {score} via {city_name}, {} nearby",
        point.lat,
        point.lon,
        nearby.len()
    );

    Ok(LocationScore {
        score,
        nearest_city: city.city.clone(),
        nearest_stations: u32::try_from(nearby.len()).unwrap_or(u32::MAX),
        avg_distance_km,
        population: city.population,
        ev_adoption_rate: city.ev_adoption_rate,
        avg_income: city.avg_income,
        avg_daily_traffic: traffic.avg_daily_traffic,
        growth_potential: city.growth_potential,
    })
}

/// Scores `point` against `snapshot`, building the lookups for this call
/// only. Use [`crate::SiteAnalyzer`] to score many points.
///
/// # Errors
///
/// See [`score_with`].
pub fn score(
    point: Coordinate,
    snapshot: &CatalogueSnapshot,
    config: &ScoringConfig,
) -> Result<LocationScore, AnalyticsError> {
    let index = StationIndex::new(&snapshot.stations);
    let locator = build_city_locator(snapshot);
    score_with(point, snapshot, &index, &locator, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{city_profile, station, traffic_profile};
    use ev_siting_station_models::Station;
    use proptest::prelude::*;

    fn snapshot(stations: Vec<Station>) -> CatalogueSnapshot {
        CatalogueSnapshot {
            stations,
            cities: vec![
                city_profile("İstanbul", 15_462_000),
                city_profile("Ankara", 5_663_000),
                city_profile("Kilis", 145_000),
            ],
            traffic: vec![
                traffic_profile("İstanbul", 2_500_000),
                traffic_profile("Ankara", 900_000),
            ],
        }
    }

    #[test]
    fn competition_signal() {
        let config = ScoringConfig::default();
        assert!((competition_score(0, &config) - 0.8).abs() < f64::EPSILON);
        assert!((competition_score(1, &config) - 0.8).abs() < 1e-12);
        assert!(competition_score(5, &config).abs() < f64::EPSILON);
        assert!(competition_score(9, &config).abs() < f64::EPSILON);
    }

    #[test]
    fn normalize_caps_and_rejects_non_finite() {
        assert!((normalize(5.0, 10.0) - 0.5).abs() < f64::EPSILON);
        assert!((normalize(50.0, 10.0) - 1.0).abs() < f64::EPSILON);
        assert!(normalize(-1.0, 10.0).abs() < f64::EPSILON);
        assert!(normalize(f64::NAN, 10.0).abs() < f64::EPSILON);
        assert!(normalize(1.0, 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn scores_against_nearest_city() {
        let stations: Vec<Station> = (1..=5)
            .map(|id| station(id, "ZES", "Ankara", 39.93, 32.85))
            .collect();
        let snapshot = snapshot(stations);

        let result = score(Coordinate::new(39.93, 32.85), &snapshot, &ScoringConfig::default())
            .unwrap();

        assert_eq!(result.nearest_city, "Ankara");
        assert_eq!(result.nearest_stations, 5);
        assert_eq!(result.avg_distance_km, Some(0.0));
        assert_eq!(result.population, 5_663_000);
        assert_eq!(result.avg_daily_traffic, 900_000);

        // competition 0, population 0.5663, ev 0.5, income 0.5, traffic 0.45, growth 0.5
        let expected = 0.15f64.mul_add(
            0.5663,
            0.15f64.mul_add(0.5, 0.10f64.mul_add(0.5, 0.15f64.mul_add(0.45, 0.15 * 0.5))),
        ) * 100.0;
        assert!((result.score - round_to(expected, 1)).abs() < 1e-9);
    }

    #[test]
    fn city_without_traffic_profile_is_not_matched() {
        // Kilis has demographics only, so the point resolves to Ankara.
        let snapshot = snapshot(vec![station(1, "ZES", "Kilis", 36.72, 37.12)]);
        let result = score(Coordinate::new(36.72, 37.12), &snapshot, &ScoringConfig::default())
            .unwrap();
        assert_ne!(result.nearest_city, "Kilis");
    }

    #[test]
    fn empty_catalogue_uses_competition_floor() {
        let snapshot = snapshot(Vec::new());
        let result = score(Coordinate::new(41.0, 29.0), &snapshot, &ScoringConfig::default())
            .unwrap();
        assert_eq!(result.nearest_city, "İstanbul");
        assert_eq!(result.nearest_stations, 0);
        assert_eq!(result.avg_distance_km, None);
        // 0.3*0.8 + 0.15*1 + 0.15*0.5 + 0.1*0.5 + 0.15*1 + 0.15*0.5 = 0.74
        assert!((result.score - 74.0).abs() < 1e-9);
    }

    #[test]
    fn no_profiles_is_no_city_match() {
        let snapshot = CatalogueSnapshot {
            stations: vec![station(1, "ZES", "Ankara", 39.9, 32.8)],
            cities: Vec::new(),
            traffic: Vec::new(),
        };
        assert!(matches!(
            score(Coordinate::new(39.9, 32.8), &snapshot, &ScoringConfig::default()),
            Err(AnalyticsError::NoCityMatch { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_point() {
        let snapshot = snapshot(Vec::new());
        assert!(matches!(
            score(Coordinate::new(f64::NAN, 29.0), &snapshot, &ScoringConfig::default()),
            Err(AnalyticsError::InvalidParameter { .. })
        ));
    }

    fn arb_weights() -> impl Strategy<Value = ScoringWeights> {
        prop::collection::vec(0.0f64..1.0, 6).prop_filter_map("non-zero total", |raw| {
            let total: f64 = raw.iter().sum();
            (total > 1e-3).then(|| ScoringWeights {
                competition: raw[0] / total,
                population: raw[1] / total,
                ev_adoption: raw[2] / total,
                income: raw[3] / total,
                traffic: raw[4] / total,
                growth: raw[5] / total,
            })
        })
    }

    proptest! {
        #[test]
        fn composite_stays_in_range(
            weights in arb_weights(),
            signals in prop::array::uniform6(0.0f64..=1.0),
        ) {
            let signals = ScoringSignals {
                competition: signals[0],
                population: signals[1],
                ev_adoption: signals[2],
                income: signals[3],
                traffic: signals[4],
                growth: signals[5],
            };
            let score = composite_score(&signals, &weights);
            prop_assert!((0.0..=100.0).contains(&score));
        }

        #[test]
        fn extreme_city_figures_stay_in_range(
            population in any::<u64>(),
            ev in -10.0f64..10.0,
            income in -1e9f64..1e9,
            traffic in any::<u64>(),
            growth in -5.0f64..5.0,
        ) {
            let mut city = city_profile("Ankara", population);
            city.ev_adoption_rate = ev;
            city.avg_income = income;
            city.growth_potential = growth;
            let traffic = traffic_profile("Ankara", traffic);
            let config = ScoringConfig::default();

            let signals =
                ScoringSignals::from_profiles(0.8, &city, &traffic, &config.normalization);
            let score = composite_score(&signals, &config.weights);
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }
}
