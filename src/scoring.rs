//! Impact scoring and risk classification
//!
//! Both computations are pure functions of a module's fan-in, fan-out, and
//! size: no hidden state, so re-running classification over an unchanged
//! graph always yields identical tiers.

use crate::config::Thresholds;
use crate::models::RiskTier;

/// Fan-in dominates: a widely imported module is riskier than one that
/// merely imports a lot.
const FAN_IN_WEIGHT: f64 = 10.0;
const FAN_OUT_WEIGHT: f64 = 2.0;
/// LOC contributes at most `LOC_CEILING / LOC_DIVISOR` = 10 points, so a
/// huge leaf module can never rank CRITICAL on size alone.
const LOC_CEILING: usize = 1000;
const LOC_DIVISOR: f64 = 100.0;
const MAX_IMPACT: f64 = 100.0;

/// Composite impact score in 0..=100
pub fn impact_score(fan_in: usize, fan_out: usize, loc: usize) -> f64 {
    let score = fan_in as f64 * FAN_IN_WEIGHT
        + fan_out as f64 * FAN_OUT_WEIGHT
        + loc.min(LOC_CEILING) as f64 / LOC_DIVISOR;
    score.min(MAX_IMPACT)
}

/// Map a module's metrics to a risk tier.
///
/// Evaluated top-down, first match wins, so a module can only ever land in
/// the highest-severity tier it qualifies for.
pub fn classify(
    fan_in: usize,
    fan_out: usize,
    impact: f64,
    thresholds: &Thresholds,
) -> RiskTier {
    if fan_in >= thresholds.critical_fan_in || impact >= thresholds.critical_impact {
        RiskTier::Critical
    } else if fan_out >= thresholds.god_module_fan_out || impact >= thresholds.high_impact {
        RiskTier::High
    } else if fan_in >= thresholds.medium_fan_in
        || fan_out > thresholds.medium_fan_out
        || impact > thresholds.medium_impact
    {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Human-readable reason for the assigned tier
pub fn justification(
    fan_in: usize,
    fan_out: usize,
    in_cycle: bool,
    thresholds: &Thresholds,
) -> String {
    if fan_in >= thresholds.critical_fan_in {
        format!("high-impact module used by {fan_in} other modules")
    } else if fan_out >= thresholds.god_module_fan_out {
        format!("god module importing {fan_out} other modules")
    } else if in_cycle {
        "part of an import cycle".to_string()
    } else if fan_in >= thresholds.medium_fan_in {
        format!("used by {fan_in} other modules")
    } else {
        "standard module with normal dependencies".to_string()
    }
}
