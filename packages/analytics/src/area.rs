//! Candidate generation and ranking within a region.
//!
//! Candidate estimates are sampled from the configured ranges. They are
//! placeholders for a predictive model and carry no information beyond
//! the region's envelope and address label.

use ev_siting_analytics_models::{AreaSummary, CandidateLocation, Level};
use ev_siting_geography::registry::{RegionRegistry, ResolvedRegion};
use ev_siting_station_models::{CatalogueSnapshot, Coordinate};
use rand::Rng;

use crate::AnalyticsError;
use crate::config::{AreaConfig, DrawRange};
use crate::round_to;

fn draw<R: Rng + ?Sized>(range: DrawRange, rng: &mut R) -> u32 {
    rng.gen_range(range.min..range.max)
}

fn draw_level<R: Rng + ?Sized>(rng: &mut R) -> Level {
    let levels = Level::all();
    levels[rng.gen_range(0..levels.len())]
}

fn sample_candidate<R: Rng + ?Sized>(
    region: &ResolvedRegion,
    config: &AreaConfig,
    rng: &mut R,
) -> CandidateLocation {
    let envelope = &region.envelope;
    let lat = rng.gen_range(envelope.min_lat..envelope.max_lat);
    let lon = rng.gen_range(envelope.min_lon..envelope.max_lon);

    CandidateLocation {
        location: Coordinate::new(lat, lon),
        address: region.label(),
        score: f64::from(draw(config.score, rng)),
        daily_traffic: draw(config.daily_traffic, rng),
        nearby_businesses: draw(config.nearby_businesses, rng),
        competition_level: draw_level(rng),
        estimated_revenue: f64::from(draw(config.estimated_revenue, rng)),
        roi_months: f64::from(draw(config.roi_months, rng)),
        risk_level: draw_level(rng),
    }
}

/// Generates and ranks candidate sites for a resolved region.
///
/// Candidates are sorted by descending score; the sort is stable, so equal
/// scores keep generation order.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidParameter`] if the region envelope is
/// empty or `config` has an empty draw range.
pub fn candidates_in<R: Rng + ?Sized>(
    region: &ResolvedRegion,
    config: &AreaConfig,
    rng: &mut R,
) -> Result<Vec<CandidateLocation>, AnalyticsError> {
    if !region.envelope.is_valid() {
        return Err(AnalyticsError::InvalidParameter {
            message: format!("envelope for {} is empty: {:?}", region.city, region.envelope),
        });
    }
    let ranges = [
        config.score,
        config.daily_traffic,
        config.nearby_businesses,
        config.estimated_revenue,
        config.roi_months,
    ];
    if config.min_candidates > config.max_candidates || !ranges.iter().all(DrawRange::is_valid) {
        return Err(AnalyticsError::InvalidParameter {
            message: "area sampling ranges must be non-empty".to_string(),
        });
    }

    let count = rng.gen_range(config.min_candidates..=config.max_candidates);
    let mut candidates: Vec<CandidateLocation> = (0..count)
        .map(|_| sample_candidate(region, config, rng))
        .collect();

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    log::debug!("Generated {count} candidates for {}", region.label());

    Ok(candidates)
}

/// Resolves `(city, district, neighborhood)` and generates ranked
/// candidates inside it.
///
/// # Errors
///
/// * [`AnalyticsError::InvalidRegion`] if the selection is not recognized.
/// * See [`candidates_in`] for sampling errors.
pub fn analyze_area<R: Rng + ?Sized>(
    regions: &RegionRegistry,
    city: &str,
    district: &str,
    neighborhood: Option<&str>,
    config: &AreaConfig,
    rng: &mut R,
) -> Result<Vec<CandidateLocation>, AnalyticsError> {
    let region = regions.resolve(city, district, neighborhood)?;
    candidates_in(&region, config, rng)
}

/// Rolls up one area analysis together with the city's profiles.
#[must_use]
pub fn summarize_area(
    city: &str,
    candidates: &[CandidateLocation],
    snapshot: &CatalogueSnapshot,
) -> AreaSummary {
    #[allow(clippy::cast_precision_loss)]
    let average_score = (!candidates.is_empty()).then(|| {
        let total: f64 = candidates.iter().map(|c| c.score).sum();
        round_to(total / candidates.len() as f64, 1)
    });
    let best_score = candidates.iter().map(|c| c.score).reduce(f64::max);

    let profile = snapshot.city_profile(city);
    let traffic = snapshot.traffic_profile(city);

    AreaSummary {
        city: city.to_string(),
        candidate_count: u32::try_from(candidates.len()).unwrap_or(u32::MAX),
        average_score,
        best_score,
        existing_stations: u32::try_from(snapshot.stations_in(city).count()).unwrap_or(u32::MAX),
        population: profile.map(|p| p.population),
        ev_adoption_rate: profile.map(|p| p.ev_adoption_rate),
        congestion_index: traffic.map(|t| t.congestion_index),
        growth_potential: profile.map(|p| p.growth_potential),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{city_profile, station, traffic_profile};
    use ev_siting_geography::GeoError;
    use ev_siting_geography_models::Envelope;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn analyze(
        city: &str,
        district: &str,
        neighborhood: Option<&str>,
        seed: u64,
    ) -> Result<Vec<CandidateLocation>, AnalyticsError> {
        analyze_area(
            &RegionRegistry::embedded(),
            city,
            district,
            neighborhood,
            &AreaConfig::default(),
            &mut ChaCha8Rng::seed_from_u64(seed),
        )
    }

    #[test]
    fn candidates_fall_in_configured_ranges() {
        let candidates = analyze("İstanbul", "Kadıköy", Some("Moda"), 1).unwrap();
        let envelope = RegionRegistry::embedded().envelope("İstanbul").unwrap();

        assert!((3..=7).contains(&candidates.len()));
        for candidate in &candidates {
            assert!(envelope.contains(candidate.location));
            assert_eq!(candidate.address, "Moda, İstanbul");
            assert!((60.0..100.0).contains(&candidate.score));
            assert!((5_000..50_000).contains(&candidate.daily_traffic));
            assert!((10..100).contains(&candidate.nearby_businesses));
            assert!((50_000.0..200_000.0).contains(&candidate.estimated_revenue));
            assert!((24.0..60.0).contains(&candidate.roi_months));
        }
    }

    #[test]
    fn unregistered_province_uses_default_envelope() {
        let candidates = analyze("Kilis", "Merkez", None, 3).unwrap();
        for candidate in &candidates {
            assert!(Envelope::DEFAULT.contains(candidate.location));
            assert_eq!(candidate.address, "Merkez, Kilis");
        }
    }

    #[test]
    fn same_seed_same_candidates() {
        assert_eq!(
            analyze("Ankara", "Çankaya", None, 77).unwrap(),
            analyze("Ankara", "Çankaya", None, 77).unwrap()
        );
    }

    #[test]
    fn unknown_district_is_invalid_region() {
        let err = analyze("İzmir", "Kadıköy", None, 0).unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::InvalidRegion(GeoError::UnknownDistrict { .. })
        ));
    }

    #[test]
    fn unknown_neighborhood_is_invalid_region() {
        assert!(matches!(
            analyze("İstanbul", "Kadıköy", Some("Kızılay"), 0),
            Err(AnalyticsError::InvalidRegion(GeoError::UnknownNeighborhood { .. }))
        ));
    }

    #[test]
    fn fixed_candidate_count() {
        let config = AreaConfig {
            min_candidates: 4,
            max_candidates: 4,
            ..AreaConfig::default()
        };
        let region = RegionRegistry::embedded()
            .resolve("Ankara", "Keçiören", None)
            .unwrap();
        let candidates =
            candidates_in(&region, &config, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        assert_eq!(candidates.len(), 4);
    }

    #[test]
    fn equal_scores_keep_generation_order() {
        let config = AreaConfig {
            min_candidates: 6,
            max_candidates: 6,
            score: DrawRange::new(70, 71),
            ..AreaConfig::default()
        };
        let region = RegionRegistry::embedded()
            .resolve("Ankara", "Çankaya", None)
            .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let ranked = candidates_in(&region, &config, &mut rng).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let _count: u32 = rng.gen_range(6..=6);
        let generated: Vec<CandidateLocation> = (0..6)
            .map(|_| sample_candidate(&region, &config, &mut rng))
            .collect();

        assert_eq!(ranked, generated);
    }

    #[test]
    fn rejects_empty_envelope() {
        let mut region = RegionRegistry::embedded()
            .resolve("Ankara", "Çankaya", None)
            .unwrap();
        region.envelope.max_lat = region.envelope.min_lat;
        assert!(matches!(
            candidates_in(&region, &AreaConfig::default(), &mut ChaCha8Rng::seed_from_u64(0)),
            Err(AnalyticsError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn summary_rolls_up_candidates_and_profiles() {
        let snapshot = CatalogueSnapshot {
            stations: vec![
                station(1, "ZES", "Ankara", 39.9, 32.8),
                station(2, "Sharz", "Ankara", 39.95, 32.85),
                station(3, "ZES", "İzmir", 38.4, 27.1),
            ],
            cities: vec![city_profile("Ankara", 5_663_000)],
            traffic: vec![traffic_profile("Ankara", 900_000)],
        };
        let candidates = analyze("Ankara", "Çankaya", None, 21).unwrap();
        let summary = summarize_area("Ankara", &candidates, &snapshot);

        assert_eq!(summary.candidate_count as usize, candidates.len());
        assert_eq!(summary.existing_stations, 2);
        assert_eq!(summary.best_score, Some(candidates[0].score));
        assert_eq!(summary.population, Some(5_663_000));
        assert!(summary.congestion_index.is_some());

        let empty = summarize_area("İzmir", &[], &snapshot);
        assert_eq!(empty.average_score, None);
        assert_eq!(empty.best_score, None);
        assert_eq!(empty.population, None);
        assert_eq!(empty.existing_stations, 1);
    }

    proptest! {
        #[test]
        fn ranking_is_descending(seed in any::<u64>()) {
            let candidates = analyze("İzmir", "Konak", Some("Alsancak"), seed).unwrap();
            for pair in candidates.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
        }
    }
}
