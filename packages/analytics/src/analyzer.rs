//! Per-snapshot entry point bundling every analysis operation.

use ev_siting_analytics_models::{
    AreaSummary, CandidateLocation, CatalogueStats, CompetitorSummary, LocationScore,
    NearbyStation, RoiProjection,
};
use ev_siting_geography::registry::RegionRegistry;
use ev_siting_spatial::{CityLocator, StationIndex};
use ev_siting_station_models::{CatalogueSnapshot, Coordinate};
use rand::Rng;

use crate::config::AnalysisConfig;
use crate::operators::OperatorRegistry;
use crate::{AnalyticsError, area, competitor, roi, scoring, stats};

/// Read-only analysis context over one catalogue snapshot.
///
/// The station index and city locator are built once here and reused by
/// every query. Nothing is mutated after construction, so a shared
/// reference can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct SiteAnalyzer<'a> {
    snapshot: &'a CatalogueSnapshot,
    config: AnalysisConfig,
    operators: OperatorRegistry,
    regions: RegionRegistry,
    index: StationIndex<'a>,
    locator: CityLocator,
}

impl<'a> SiteAnalyzer<'a> {
    /// Builds an analyzer with the embedded operator and region registries.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if `config` fails validation.
    pub fn new(snapshot: &'a CatalogueSnapshot, config: AnalysisConfig) -> Result<Self, AnalyticsError> {
        Self::with_registries(
            snapshot,
            config,
            OperatorRegistry::embedded(),
            RegionRegistry::embedded(),
        )
    }

    /// Builds an analyzer with explicit registries.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if `config` fails validation.
    pub fn with_registries(
        snapshot: &'a CatalogueSnapshot,
        config: AnalysisConfig,
        operators: OperatorRegistry,
        regions: RegionRegistry,
    ) -> Result<Self, AnalyticsError> {
        config.validate()?;

        let locator = scoring::build_city_locator(snapshot);
        log::info!(
            "Analyzer ready: {} stations, {} city profiles, {} locatable cities",
            snapshot.stations.len(),
            snapshot.cities.len(),
            locator.len()
        );

        Ok(Self {
            snapshot,
            config,
            operators,
            regions,
            index: StationIndex::new(&snapshot.stations),
            locator,
        })
    }

    #[must_use]
    pub const fn snapshot(&self) -> &'a CatalogueSnapshot {
        self.snapshot
    }

    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    #[must_use]
    pub const fn regions(&self) -> &RegionRegistry {
        &self.regions
    }

    /// Up to `k` stations closest to `point`, nearest first.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::EmptyCatalogue`] if the snapshot has no
    /// stations.
    pub fn nearest(&self, point: Coordinate, k: usize) -> Result<Vec<NearbyStation>, AnalyticsError> {
        Ok(self
            .index
            .nearest(point, k)?
            .into_iter()
            .map(|hit| NearbyStation {
                station: hit.station.clone(),
                distance_km: hit.distance_km,
            })
            .collect())
    }

    /// Suitability score for `point`.
    ///
    /// # Errors
    ///
    /// See [`scoring::score_with`].
    pub fn score(&self, point: Coordinate) -> Result<LocationScore, AnalyticsError> {
        scoring::score_with(
            point,
            self.snapshot,
            &self.index,
            &self.locator,
            &self.config.scoring,
        )
    }

    /// Operators ranked by competitiveness.
    pub fn competitors<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<CompetitorSummary> {
        competitor::summarize(&self.snapshot.stations, &self.operators, rng)
    }

    /// Ranked candidate sites in a region.
    ///
    /// # Errors
    ///
    /// See [`area::analyze_area`].
    pub fn analyze_area<R: Rng + ?Sized>(
        &self,
        city: &str,
        district: &str,
        neighborhood: Option<&str>,
        rng: &mut R,
    ) -> Result<Vec<CandidateLocation>, AnalyticsError> {
        area::analyze_area(
            &self.regions,
            city,
            district,
            neighborhood,
            &self.config.area,
            rng,
        )
    }

    #[must_use]
    pub fn area_summary(&self, city: &str, candidates: &[CandidateLocation]) -> AreaSummary {
        area::summarize_area(city, candidates, self.snapshot)
    }

    /// ROI projection over `periods`, or the configured default.
    ///
    /// # Errors
    ///
    /// See [`roi::project`].
    pub fn project(
        &self,
        score: f64,
        investment: f64,
        periods: Option<u32>,
    ) -> Result<RoiProjection, AnalyticsError> {
        roi::project(
            score,
            investment,
            periods.unwrap_or(self.config.roi.default_periods),
            &self.config.roi,
        )
    }

    #[must_use]
    pub fn stats(&self) -> CatalogueStats {
        stats::catalogue_stats(&self.snapshot.stations)
    }

    /// Districts of `city`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidRegion`] for an unknown city.
    pub fn districts(&self, city: &str) -> Result<Vec<&str>, AnalyticsError> {
        Ok(self.regions.districts(city)?)
    }

    /// Neighborhoods of `district` in `city`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidRegion`] for an unknown city or
    /// district.
    pub fn neighborhoods(&self, city: &str, district: &str) -> Result<Vec<&str>, AnalyticsError> {
        Ok(self.regions.neighborhoods(city, district)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::recommend;
    use crate::test_support::{city_profile, station, traffic_profile};
    use ev_siting_analytics_models::{PaybackHorizon, SuitabilityTier};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn snapshot() -> CatalogueSnapshot {
        CatalogueSnapshot {
            stations: vec![
                station(1, "ZES", "İstanbul", 41.01, 28.98),
                station(2, "Eşarj", "İstanbul", 41.05, 29.02),
                station(3, "ZES", "Ankara", 39.93, 32.86),
                station(4, "Epoint", "Ankara", 39.95, 32.80),
            ],
            cities: vec![
                city_profile("İstanbul", 15_462_000),
                city_profile("Ankara", 5_663_000),
            ],
            traffic: vec![
                traffic_profile("İstanbul", 2_500_000),
                traffic_profile("Ankara", 900_000),
            ],
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let snapshot = snapshot();
        let mut config = AnalysisConfig::default();
        config.scoring.weights.growth = 0.9;
        assert!(matches!(
            SiteAnalyzer::new(&snapshot, config),
            Err(AnalyticsError::Config { .. })
        ));
    }

    #[test]
    fn nearest_returns_owned_stations_with_km() {
        let snapshot = snapshot();
        let analyzer = SiteAnalyzer::new(&snapshot, AnalysisConfig::default()).unwrap();

        let nearest = analyzer.nearest(Coordinate::new(41.01, 28.98), 2).unwrap();
        assert_eq!(nearest.len(), 2);
        assert_eq!(nearest[0].station.id, 1);
        assert!(nearest[0].distance_km.abs() < f64::EPSILON);
        assert!(nearest[1].distance_km > nearest[0].distance_km);
    }

    #[test]
    fn empty_snapshot_has_no_nearest() {
        let snapshot = CatalogueSnapshot::default();
        let analyzer = SiteAnalyzer::new(&snapshot, AnalysisConfig::default()).unwrap();
        assert!(matches!(
            analyzer.nearest(Coordinate::new(41.0, 29.0), 3),
            Err(AnalyticsError::EmptyCatalogue)
        ));
        assert!(matches!(
            analyzer.score(Coordinate::new(41.0, 29.0)),
            Err(AnalyticsError::NoCityMatch { .. })
        ));
    }

    #[test]
    fn score_then_project_end_to_end() {
        let snapshot = snapshot();
        let analyzer = SiteAnalyzer::new(&snapshot, AnalysisConfig::default()).unwrap();

        let score = analyzer.score(Coordinate::new(41.02, 29.0)).unwrap();
        assert_eq!(score.nearest_city, "İstanbul");
        assert_eq!(score.nearest_stations, 4);
        assert!((0.0..=100.0).contains(&score.score));

        let recommendation = recommend(&score);
        assert_eq!(recommendation.tier, SuitabilityTier::from_score(score.score));

        let projection = analyzer.project(score.score, 100_000.0, None).unwrap();
        assert_eq!(projection.cumulative_profit.len(), 5);
        assert!(matches!(projection.roi_months, PaybackHorizon::Months(_)));
    }

    #[test]
    fn competitors_cover_every_operator() {
        let snapshot = snapshot();
        let analyzer = SiteAnalyzer::new(&snapshot, AnalysisConfig::default()).unwrap();
        let ranked = analyzer.competitors(&mut ChaCha8Rng::seed_from_u64(1));

        assert_eq!(ranked.len(), 3);
        let zes = ranked.iter().find(|c| c.operator == "ZES").unwrap();
        assert!((zes.market_share - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn area_analysis_and_summary() {
        let snapshot = snapshot();
        let analyzer = SiteAnalyzer::new(&snapshot, AnalysisConfig::default()).unwrap();

        assert!(analyzer.districts("Ankara").unwrap().contains(&"Çankaya"));
        assert!(analyzer.neighborhoods("Ankara", "Çankaya").unwrap().len() > 1);

        let candidates = analyzer
            .analyze_area("İstanbul", "Beşiktaş", None, &mut ChaCha8Rng::seed_from_u64(3))
            .unwrap();
        let summary = analyzer.area_summary("İstanbul", &candidates);
        assert_eq!(summary.existing_stations, 2);
        assert_eq!(summary.candidate_count as usize, candidates.len());
    }

    #[test]
    fn stats_cover_snapshot() {
        let snapshot = snapshot();
        let analyzer = SiteAnalyzer::new(&snapshot, AnalysisConfig::default()).unwrap();
        assert_eq!(analyzer.stats().total_stations, 4);
    }
}
