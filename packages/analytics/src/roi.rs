//! Return-on-investment projection for a scored site.

use ev_siting_analytics_models::{PaybackHorizon, ProjectionPoint, RoiProjection};

use crate::AnalyticsError;
use crate::config::RoiConfig;

/// Expected daily charging sessions for a 0-100 score.
#[must_use]
pub fn daily_usage(score: f64, config: &RoiConfig) -> f64 {
    config
        .session_span
        .mul_add(score.clamp(0.0, 100.0) / 100.0, config.baseline_sessions)
}

/// Fractional period at which `series` first turns positive.
///
/// Interpolates linearly between the last non-positive point and the first
/// positive one. Period 0 holds the capital outlay, `-investment`, so a
/// site that pays back within the first period breaks even at
/// `investment / first_period_profit`.
#[must_use]
pub fn breakeven_period(series: &[ProjectionPoint], investment: f64) -> Option<f64> {
    let mut previous = (0.0, -investment);
    for point in series {
        let current = (f64::from(point.period), point.cumulative_profit);
        if current.1 > 0.0 {
            if previous.1 >= 0.0 {
                return Some(previous.0);
            }
            let fraction = -previous.1 / (current.1 - previous.1);
            return Some(fraction.mul_add(current.0 - previous.0, previous.0));
        }
        previous = current;
    }
    None
}

/// Projects monthly economics and the per-period cumulative profit of an
/// investment at a site with the given score.
///
/// Scores outside `[0, 100]` are clamped. The payback horizon is exactly
/// `investment / monthly_profit` when profit is positive and
/// [`PaybackHorizon::Never`] otherwise, in which case there is no
/// breakeven period either.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidParameter`] if `investment` is negative
/// or either input is not finite.
pub fn project(
    score: f64,
    investment: f64,
    periods: u32,
    config: &RoiConfig,
) -> Result<RoiProjection, AnalyticsError> {
    if !score.is_finite() {
        return Err(AnalyticsError::InvalidParameter {
            message: format!("score must be finite, got {score}"),
        });
    }
    if !investment.is_finite() || investment < 0.0 {
        return Err(AnalyticsError::InvalidParameter {
            message: format!("investment must be a non-negative amount, got {investment}"),
        });
    }

    let estimated_daily_usage = daily_usage(score, config);
    let monthly_revenue = estimated_daily_usage * config.days_per_month * config.revenue_per_session;
    let monthly_expenses = investment.mul_add(config.expense_rate, config.fixed_monthly_overhead);
    let monthly_profit = monthly_revenue - monthly_expenses;

    let roi_months = if monthly_profit > 0.0 {
        PaybackHorizon::Months(investment / monthly_profit)
    } else {
        PaybackHorizon::Never
    };

    let mut cumulative = 0.0;
    let cumulative_profit: Vec<ProjectionPoint> = (1..=periods)
        .map(|period| {
            let growth = (1.0 + config.annual_growth).powf(f64::from(period - 1));
            let mut profit = monthly_profit * 12.0 * growth;
            if period == 1 {
                profit -= investment;
            }
            cumulative += profit;
            ProjectionPoint {
                period,
                cumulative_profit: cumulative,
            }
        })
        .collect();

    let breakeven_period = if roi_months.is_never() {
        None
    } else {
        breakeven_period(&cumulative_profit, investment)
    };

    log::debug!(
        "project(score={score}, investment={investment}, periods={periods}): profit={monthly_profit}, roi={roi_months}"
    );

    Ok(RoiProjection {
        estimated_daily_usage,
        monthly_revenue,
        monthly_expenses,
        monthly_profit,
        roi_months,
        cumulative_profit,
        breakeven_period,
    })
}
