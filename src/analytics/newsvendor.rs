// src/analytics/newsvendor.rs
//! Newsvendor order quantity and closed-form sales expectations
//!
//! # Mathematical Framework
//!
//! With underage cost `m` (margin lost per unit short) and overage cost `c`
//! (price tied up per unit left over), the expected-profit-maximising stock is
//! the critical fractile of the demand distribution:
//! ```text
//! CR = m / (m + c)
//! Q* = F⁻¹(CR) = μ + Φ⁻¹(CR) · σ        (Gaussian demand)
//! ```
//!
//! Expected unmet demand at stock `q` is the normal loss function:
//! ```text
//! z = (q - μ) / σ
//! E[(D - q)⁺] = σ φ(z) + (μ - q)(1 - Φ(z))
//! ```

use tracing::{debug, warn};

use super::inverse_normal::inverse_normal_cdf;
use crate::math_utils::{norm_cdf, norm_pdf};
use crate::mc::demand_loss::{estimate_demand_loss_with, DemandLossConfig};
use crate::models::{CostStructure, DemandModel, RevenueTerms};

/// Standard deviations above the mean returned when the critical ratio
/// saturates at 1
pub const SATURATION_STD_DEVS: f64 = 5.0;

/// Demand coefficient of variation above which `Auto` switches to Monte Carlo
pub const AUTO_MONTE_CARLO_CV: f64 = 1.0;

/// Newsvendor-optimal stock level
///
/// # Boundary policy
/// - `CR <= 0` → `0.0`
/// - `CR >= 1` → `μ + 5σ` (saturating sentinel, not an infinite service level)
pub fn optimal_order_quantity_with(costs: &CostStructure, demand: &DemandModel) -> f64 {
    let ratio = costs.critical_ratio();
    let mean = demand.aggregated_mean();
    let std_dev = demand.aggregated_std_dev();

    if ratio <= 0.0 {
        debug!(ratio, "critical ratio not positive, ordering nothing");
        return 0.0;
    }
    if ratio >= 1.0 {
        warn!(
            ratio,
            "critical ratio saturated, capping order at {} standard deviations", SATURATION_STD_DEVS
        );
        return mean + SATURATION_STD_DEVS * std_dev;
    }

    let z = inverse_normal_cdf(ratio);
    debug!(ratio, z, mean, std_dev, "newsvendor order quantity");
    mean + z * std_dev
}

/// Scalar form of [`optimal_order_quantity_with`]
pub fn optimal_order_quantity(
    margin: f64,
    price: f64,
    mean_per_period: f64,
    std_dev_per_period: f64,
    periods: f64,
) -> f64 {
    optimal_order_quantity_with(
        &CostStructure::new(margin, price),
        &DemandModel::new(mean_per_period, std_dev_per_period, periods),
    )
}

/// Expected unmet demand `E[(D - q)⁺]` over the demand horizon
pub fn expected_lost_sales(q: f64, demand: &DemandModel) -> f64 {
    let mean = demand.aggregated_mean();
    let std_dev = demand.aggregated_std_dev();
    if std_dev <= 0.0 {
        return (mean - q).max(0.0);
    }
    let z = (q - mean) / std_dev;
    (std_dev * norm_pdf(z) + (mean - q) * (1.0 - norm_cdf(z))).max(0.0)
}

/// How `expected_revenue` obtains expected lost sales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpectedRevenueMethod {
    /// Normal loss function
    #[default]
    Closed,
    /// Demand-loss simulator
    MonteCarlo,
    /// Monte Carlo when demand CV exceeds [`AUTO_MONTE_CARLO_CV`], closed form otherwise
    Auto,
}

impl ExpectedRevenueMethod {
    fn resolve(self, demand: &DemandModel) -> ExpectedRevenueMethod {
        match self {
            ExpectedRevenueMethod::Auto => {
                if demand.coefficient_of_variation() > AUTO_MONTE_CARLO_CV {
                    ExpectedRevenueMethod::MonteCarlo
                } else {
                    ExpectedRevenueMethod::Closed
                }
            }
            other => other,
        }
    }
}

/// Expected revenue of stocking `q` units: regular sales at full price plus
/// the rush-recovered share of unmet demand at rush revenue
pub fn expected_revenue(
    q: f64,
    demand: &DemandModel,
    terms: &RevenueTerms,
    method: ExpectedRevenueMethod,
    mc_config: &DemandLossConfig,
) -> f64 {
    if q == 0.0 {
        return 0.0;
    }

    let mean = demand.aggregated_mean();
    let full_price = terms.full_price();
    let rush_unit_revenue = terms.rush_unit_revenue();

    let (sales, lost) = match method.resolve(demand) {
        ExpectedRevenueMethod::MonteCarlo => {
            let lost = estimate_demand_loss_with(q, demand, mc_config);
            ((mean - lost).max(0.0), lost)
        }
        _ if demand.aggregated_std_dev() <= 0.0 => (q.min(mean), (mean - q).max(0.0)),
        _ => {
            let lost = expected_lost_sales(q, demand);
            ((mean - lost).max(0.0), lost)
        }
    };

    let rush_sales = lost * terms.rush_prob;
    sales * full_price + rush_sales * rush_unit_revenue
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn terms() -> RevenueTerms {
        RevenueTerms {
            purchase: 6.0,
            margin: 4.0,
            rush_prob: 0.5,
            rush_save: 2.0,
        }
    }

    #[test]
    fn test_end_to_end_newsvendor_example() {
        let q = optimal_order_quantity(10.0, 5.0, 100.0, 20.0, 4.0);
        println!("Q* = {}", q);
        assert_abs_diff_eq!(q, 417.2290919718183, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_margin_orders_nothing() {
        assert_eq!(optimal_order_quantity(0.0, 5.0, 100.0, 20.0, 4.0), 0.0);
        assert_eq!(optimal_order_quantity(-1.0, 5.0, 100.0, 20.0, 4.0), 0.0);
    }

    #[test]
    fn test_zero_price_saturates() {
        let q = optimal_order_quantity(10.0, 0.0, 100.0, 20.0, 4.0);
        assert_eq!(q, 400.0 + 5.0 * 40.0);
    }

    #[test]
    fn test_even_ratio_orders_the_mean() {
        assert_eq!(optimal_order_quantity(5.0, 5.0, 100.0, 20.0, 4.0), 400.0);
    }

    #[test]
    fn test_expected_lost_sales_closed_form() {
        let demand = DemandModel::new(100.0, 20.0, 4.0);
        assert_relative_eq!(
            expected_lost_sales(420.0, &demand),
            7.911862296052243,
            max_relative = 1e-10
        );
        // at the mean the loss is σ φ(0)
        assert_relative_eq!(
            expected_lost_sales(400.0, &demand),
            40.0 * norm_pdf(0.0),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_expected_lost_sales_deterministic_demand() {
        let demand = DemandModel::new(25.0, 0.0, 4.0);
        assert_eq!(expected_lost_sales(60.0, &demand), 40.0);
        assert_eq!(expected_lost_sales(120.0, &demand), 0.0);
    }

    #[test]
    fn test_expected_revenue_deterministic_demand() {
        let demand = DemandModel::new(25.0, 0.0, 4.0);
        let cfg = DemandLossConfig::default();
        // 60 sold at 10, 40 short of which half recovered at 8
        let revenue = expected_revenue(60.0, &demand, &terms(), ExpectedRevenueMethod::Closed, &cfg);
        assert_eq!(revenue, 60.0 * 10.0 + 20.0 * 8.0);
        assert_eq!(
            expected_revenue(0.0, &demand, &terms(), ExpectedRevenueMethod::Closed, &cfg),
            0.0
        );
    }

    #[test]
    fn test_expected_revenue_methods_agree() {
        let demand = DemandModel::new(100.0, 20.0, 4.0);
        let cfg = DemandLossConfig {
            iterations: 200_000,
            ..Default::default()
        };
        let closed = expected_revenue(420.0, &demand, &terms(), ExpectedRevenueMethod::Closed, &cfg);
        let mc = expected_revenue(420.0, &demand, &terms(), ExpectedRevenueMethod::MonteCarlo, &cfg);
        println!("closed {} vs monte carlo {}", closed, mc);
        assert_relative_eq!(closed, mc, max_relative = 2e-3);
    }

    #[test]
    fn test_auto_uses_closed_form_for_low_cv() {
        let demand = DemandModel::new(100.0, 20.0, 4.0);
        let cfg = DemandLossConfig::default();
        let closed = expected_revenue(420.0, &demand, &terms(), ExpectedRevenueMethod::Closed, &cfg);
        let auto = expected_revenue(420.0, &demand, &terms(), ExpectedRevenueMethod::Auto, &cfg);
        assert_eq!(closed, auto);
    }

    #[test]
    fn test_auto_uses_monte_carlo_for_high_cv() {
        let demand = DemandModel::new(10.0, 30.0, 1.0);
        let cfg = DemandLossConfig::default();
        let mc = expected_revenue(15.0, &demand, &terms(), ExpectedRevenueMethod::MonteCarlo, &cfg);
        let auto = expected_revenue(15.0, &demand, &terms(), ExpectedRevenueMethod::Auto, &cfg);
        assert_eq!(mc, auto);
    }
}
