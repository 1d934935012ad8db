//! Qualitative reading of a location score.

use ev_siting_analytics_models::{Advisory, LocationScore, Recommendation, SuitabilityTier};

const CROWDED_STATION_COUNT: u32 = 3;
const LOW_EV_ADOPTION: f64 = 0.05;
const DISTANT_COMPETITOR_KM: f64 = 5.0;
const HIGH_DAILY_TRAFFIC: u64 = 500_000;

/// Observations that apply to `score`, in a fixed order.
#[must_use]
pub fn advisories(score: &LocationScore) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    if score.nearest_stations > CROWDED_STATION_COUNT {
        advisories.push(Advisory::HighCompetition);
    }
    if score.ev_adoption_rate < LOW_EV_ADOPTION {
        advisories.push(Advisory::LowEvAdoption);
    }
    if score
        .avg_distance_km
        .is_some_and(|km| km > DISTANT_COMPETITOR_KM)
    {
        advisories.push(Advisory::DistantCompetitors);
    }
    if score.avg_daily_traffic > HIGH_DAILY_TRAFFIC {
        advisories.push(Advisory::HighTraffic);
    }

    if advisories.is_empty() {
        advisories.push(Advisory::GenerallySuitable);
    }
    advisories
}

#[must_use]
pub fn recommend(score: &LocationScore) -> Recommendation {
    Recommendation {
        tier: SuitabilityTier::from_score(score.score),
        advisories: advisories(score),
    }
}
