//! Tunable analysis parameters.
//!
//! The shipped defaults live in `config/default.toml` and are mirrored by
//! the [`Default`] impls below; a test keeps the two in sync. User files
//! only need the keys they override.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::AnalyticsError;

/// The default configuration file, embedded at compile time.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// All analysis parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub scoring: ScoringConfig,
    pub roi: RoiConfig,
    pub area: AreaConfig,
}

/// Point scoring parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Stations considered "nearby" for the competition signal.
    pub nearest_k: usize,
    /// Competition signal used when no station is nearby.
    pub no_nearby_competition: f64,
    pub weights: ScoringWeights,
    pub normalization: Normalization,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            nearest_k: 5,
            no_nearby_competition: 0.8,
            weights: ScoringWeights::default(),
            normalization: Normalization::default(),
        }
    }
}

/// Weight of each normalized signal in the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub competition: f64,
    pub population: f64,
    pub ev_adoption: f64,
    pub income: f64,
    pub traffic: f64,
    pub growth: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            competition: 0.30,
            population: 0.15,
            ev_adoption: 0.15,
            income: 0.10,
            traffic: 0.15,
            growth: 0.15,
        }
    }
}

impl ScoringWeights {
    /// Weights in signal order: competition, population, EV adoption,
    /// income, traffic, growth.
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

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

/// Value at which each raw signal saturates to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Normalization {
    pub population: f64,
    pub ev_adoption: f64,
    pub income: f64,
    pub traffic: f64,
    pub growth: f64,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            population: 10_000_000.0,
            ev_adoption: 0.15,
            income: 20_000.0,
            traffic: 2_000_000.0,
            growth: 0.08,
        }
    }
}

/// Financial projection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiConfig {
    /// Daily sessions at a score of 0.
    pub baseline_sessions: f64,
    /// Extra daily sessions at a score of 100.
    pub session_span: f64,
    pub days_per_month: f64,
    pub revenue_per_session: f64,
    /// Monthly expenses as a fraction of the investment.
    pub expense_rate: f64,
    pub fixed_monthly_overhead: f64,
    /// Year-over-year profit growth.
    pub annual_growth: f64,
    pub default_periods: u32,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            baseline_sessions: 10.0,
            session_span: 30.0,
            days_per_month: 30.0,
            revenue_per_session: 75.0,
            expense_rate: 0.02,
            fixed_monthly_overhead: 5_000.0,
            annual_growth: 0.05,
            default_periods: 5,
        }
    }
}

/// Half-open integer interval `[min, max)` used for sampled estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRange {
    pub min: u32,
    pub max: u32,
}

impl DrawRange {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.min < self.max
    }
}

/// Area candidate generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    /// Fewest candidates per area query (inclusive).
    pub min_candidates: u32,
    /// Most candidates per area query (inclusive).
    pub max_candidates: u32,
    pub score: DrawRange,
    pub daily_traffic: DrawRange,
    pub nearby_businesses: DrawRange,
    pub estimated_revenue: DrawRange,
    pub roi_months: DrawRange,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            min_candidates: 3,
            max_candidates: 7,
            score: DrawRange::new(60, 100),
            daily_traffic: DrawRange::new(5_000, 50_000),
            nearby_businesses: DrawRange::new(10, 100),
            estimated_revenue: DrawRange::new(50_000, 200_000),
            roi_months: DrawRange::new(24, 60),
        }
    }
}

fn config_error(message: impl Into<String>) -> AnalyticsError {
    AnalyticsError::Config {
        message: message.into(),
    }
}

fn require(condition: bool, message: &str) -> Result<(), AnalyticsError> {
    if condition {
        Ok(())
    } else {
        Err(config_error(message))
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl AnalysisConfig {
    /// Parses and validates a TOML document. Missing keys keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if the document is malformed or
    /// fails [`Self::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self, AnalyticsError> {
        let config: Self =
            toml::from_str(content).map_err(|e| config_error(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if the file cannot be read or its
    /// contents are invalid.
    pub fn load(path: &Path) -> Result<Self, AnalyticsError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_error(format!("failed to read {}: {e}", path.display())))?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded analysis config from {}", path.display());
        Ok(config)
    }

    /// Checks that every parameter is inside its accepted domain.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] describing the first violation.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        let scoring = &self.scoring;
        require(scoring.nearest_k >= 1, "scoring.nearest_k must be at least 1")?;
        require(
            (0.0..=1.0).contains(&scoring.no_nearby_competition),
            "scoring.no_nearby_competition must be within 0..=1",
        )?;

        let weights = scoring.weights.as_array();
        require(
            weights.iter().all(|w| is_non_negative(*w)),
            "scoring.weights must be finite and non-negative",
        )?;
        let sum = scoring.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(config_error(format!(
                "scoring.weights must sum to 1, got {sum}"
            )));
        }

        let n = &scoring.normalization;
        require(
            [n.population, n.ev_adoption, n.income, n.traffic, n.growth]
                .iter()
                .all(|v| is_positive(*v)),
            "scoring.normalization maxima must be finite and positive",
        )?;

        let roi = &self.roi;
        require(
            [
                roi.baseline_sessions,
                roi.session_span,
                roi.revenue_per_session,
                roi.expense_rate,
                roi.fixed_monthly_overhead,
                roi.annual_growth,
            ]
            .iter()
            .all(|v| is_non_negative(*v)),
            "roi parameters must be finite and non-negative",
        )?;
        require(is_positive(roi.days_per_month), "roi.days_per_month must be positive")?;
        require(roi.default_periods >= 1, "roi.default_periods must be at least 1")?;

        let area = &self.area;
        require(
            area.min_candidates <= area.max_candidates,
            "area.min_candidates must not exceed area.max_candidates",
        )?;
        for (name, range) in [
            ("score", area.score),
            ("daily_traffic", area.daily_traffic),
            ("nearby_businesses", area.nearby_businesses),
            ("estimated_revenue", area.estimated_revenue),
            ("roi_months", area.roi_months),
        ] {
            if !range.is_valid() {
                return Err(config_error(format!(
                    "area.{name} must have min < max, got {}..{}",
                    range.min, range.max
                )));
            }
        }
        require(area.score.max <= 101, "area.score must stay within 0..=100")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_default_matches_default_impl() {
        let parsed = AnalysisConfig::from_toml_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(parsed, AnalysisConfig::default());
    }

    #[test]
    fn default_weights_sum_to_one() {
        assert!((ScoringWeights::default().sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AnalysisConfig::from_toml_str(
            r"
            [roi]
            revenue_per_session = 90.0

            [area]
            max_candidates = 10
            ",
        )
        .unwrap();

        assert!((config.roi.revenue_per_session - 90.0).abs() < f64::EPSILON);
        assert!((config.roi.expense_rate - 0.02).abs() < f64::EPSILON);
        assert_eq!(config.area.max_candidates, 10);
        assert_eq!(config.area.min_candidates, 3);
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let err = AnalysisConfig::from_toml_str(
            r"
            [scoring.weights]
            competition = 0.5
            ",
        )
        .unwrap_err();
        assert!(matches!(err, AnalyticsError::Config { .. }));
        assert!(err.to_string().contains("sum to 1"));
    }

    #[test]
    fn rejects_inverted_candidate_bounds() {
        let mut config = AnalysisConfig::default();
        config.area.min_candidates = 8;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_draw_range() {
        let mut config = AnalysisConfig::default();
        config.area.roi_months = DrawRange::new(24, 24);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_normalization_maximum() {
        let mut config = AnalysisConfig::default();
        config.scoring.normalization.income = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            AnalysisConfig::from_toml_str("[scoring"),
            Err(AnalyticsError::Config { .. })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AnalysisConfig::load(Path::new("/nonexistent/ev-siting.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
