//! Descriptive counts over a station catalogue.

use std::collections::BTreeMap;

use ev_siting_analytics_models::{CatalogueStats, LabelCount};
use ev_siting_station_models::Station;

fn ranked(counts: BTreeMap<String, u64>) -> Vec<LabelCount> {
    let mut out: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount { label, count })
        .collect();
    // Stable over the alphabetical map order, so equal counts stay sorted by label.
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

fn ascending<K: Ord + ToString>(counts: BTreeMap<K, u64>) -> Vec<LabelCount> {
    counts
        .into_iter()
        .map(|(key, count)| LabelCount {
            label: key.to_string(),
            count,
        })
        .collect()
}

/// Power ratings are grouped by whole kW.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn power_bucket(power_kw: f64) -> u32 {
    if power_kw.is_finite() && power_kw > 0.0 {
        power_kw.round() as u32
    } else {
        0
    }
}

/// Counts stations per operator, city, power rating and installation year.
#[must_use]
pub fn catalogue_stats(stations: &[Station]) -> CatalogueStats {
    let mut by_operator: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_city: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_power: BTreeMap<u32, u64> = BTreeMap::new();
    let mut by_year: BTreeMap<u16, u64> = BTreeMap::new();

    for station in stations {
        *by_operator.entry(station.operator.clone()).or_default() += 1;
        *by_city.entry(station.city.clone()).or_default() += 1;
        *by_power.entry(power_bucket(station.power_kw)).or_default() += 1;
        *by_year.entry(station.installation_year).or_default() += 1;
    }

    CatalogueStats {
        total_stations: stations.len() as u64,
        by_operator: ranked(by_operator),
        by_city: ranked(by_city),
        by_power: ascending(by_power),
        by_year: ascending(by_year),
    }
}
