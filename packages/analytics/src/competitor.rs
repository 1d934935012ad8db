//! Operator market-share and competitiveness ranking.

use std::cmp::Ordering;

use ev_siting_analytics_models::CompetitorSummary;
use ev_siting_station_models::Station;
use rand::Rng;

use crate::operators::{OperatorProfile, OperatorRegistry};
use crate::round_to;

/// Base charging price per kWh before the pricing-tier multiplier.
pub const BASE_PRICE_PER_KWH: f64 = 75.0;

/// Upper bound of [`CompetitorSummary::competitive_score`].
const MAX_COMPETITIVE_SCORE: f64 = 10.0;

/// Derived satisfaction from an operator's static attributes, on a 0-1
/// scale.
#[must_use]
pub fn customer_satisfaction(profile: &OperatorProfile) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let payment_count = profile.payment_methods.len() as f64;
    let weighted = f64::from(profile.service_quality).mul_add(
        0.4,
        f64::from(profile.tech_level).mul_add(
            0.3,
            payment_count.mul_add(0.1, f64::from(profile.brand_recognition) * 0.2),
        ),
    );
    round_to(weighted / 10.0, 1)
}

/// Composite competitiveness on a 0-10 scale.
#[must_use]
pub fn competitive_score(
    market_share: f64,
    growth_potential: f64,
    satisfaction: f64,
    partnership_score: u8,
) -> f64 {
    let weighted = market_share.mul_add(
        0.3,
        growth_potential.mul_add(
            0.2,
            satisfaction.mul_add(0.3, f64::from(partnership_score) / 10.0 * 0.2),
        ),
    );
    round_to(weighted * 10.0, 1).clamp(0.0, MAX_COMPETITIVE_SCORE)
}

/// Ranking order: competitive score descending, then market share
/// descending.
#[must_use]
pub fn ranking_order(a: &CompetitorSummary, b: &CompetitorSummary) -> Ordering {
    b.competitive_score
        .total_cmp(&a.competitive_score)
        .then_with(|| b.market_share.total_cmp(&a.market_share))
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Groups `stations` by operator and ranks the groups.
///
/// Groups are built in order of first appearance, and operators missing
/// from `registry` draw their fallback profile from `rng` in that same
/// order. The final sort is stable, so equal keys keep first-appearance
/// order. An empty catalogue yields an empty ranking.
pub fn summarize<R: Rng + ?Sized>(
    stations: &[Station],
    registry: &OperatorRegistry,
    rng: &mut R,
) -> Vec<CompetitorSummary> {
    let mut groups: Vec<(&str, Vec<&Station>)> = Vec::new();
    for station in stations {
        match groups.iter_mut().find(|(op, _)| *op == station.operator) {
            Some((_, members)) => members.push(station),
            None => groups.push((station.operator.as_str(), vec![station])),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let total = stations.len() as f64;

    let mut summaries: Vec<CompetitorSummary> = groups
        .into_iter()
        .map(|(operator, members)| {
            let profile = registry.resolve(operator, rng);

            #[allow(clippy::cast_precision_loss)]
            let market_share = members.len() as f64 / total;
            let growth_potential = ((1.0 - market_share) * profile.expansion_rate).clamp(0.0, 1.0);
            let satisfaction = customer_satisfaction(&profile);

            CompetitorSummary {
                operator: operator.to_string(),
                total_stations: u32::try_from(members.len()).unwrap_or(u32::MAX),
                avg_charger_count: round_to(
                    mean(members.iter().map(|s| f64::from(s.charger_count))),
                    1,
                ),
                avg_power: round_to(mean(members.iter().map(|s| s.power_kw)), 1),
                avg_customer_rating: round_to(mean(members.iter().map(|s| s.customer_rating)), 2),
                market_share,
                growth_potential: round_to(growth_potential, 3),
                pricing_tier: profile.pricing_tier,
                avg_price_per_kwh: round_to(
                    BASE_PRICE_PER_KWH * profile.pricing_tier.price_multiplier(),
                    2,
                ),
                brand_recognition: profile.brand_recognition,
                service_quality: profile.service_quality,
                tech_level: profile.tech_level,
                payment_options: u32::try_from(profile.payment_methods.len()).unwrap_or(u32::MAX),
                target_segment: profile.target_segment.clone(),
                customer_satisfaction: satisfaction,
                competitive_score: competitive_score(
                    market_share,
                    growth_potential,
                    satisfaction,
                    profile.partnership_score,
                ),
                expansion_rate: profile.expansion_rate,
            }
        })
        .collect();

    summaries.sort_by(ranking_order);

    log::debug!(
        "Ranked {} operators over {} stations",
        summaries.len(),
        stations.len()
    );

    summaries
}
