// src/models/demand.rs
use super::seasonality::SeasonalityProfile;
use crate::error::{validation::*, StockError, StockResult};

/// Gaussian demand per period, aggregated over a horizon of `periods`
///
/// Periods are treated as independent, so means add and variances add:
/// ```text
/// μ_total = μ · n
/// σ_total = σ · √n
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandModel {
    pub mean_per_period: f64,
    pub std_dev_per_period: f64,
    pub periods: f64,
}

impl DemandModel {
    pub fn new(mean_per_period: f64, std_dev_per_period: f64, periods: f64) -> Self {
        DemandModel {
            mean_per_period,
            std_dev_per_period,
            periods,
        }
    }

    pub fn aggregated_mean(&self) -> f64 {
        self.mean_per_period * self.periods
    }

    pub fn aggregated_std_dev(&self) -> f64 {
        self.std_dev_per_period * self.periods.sqrt()
    }

    /// σ_total / μ_total, or 0 when the aggregated mean is not positive
    pub fn coefficient_of_variation(&self) -> f64 {
        let mean = self.aggregated_mean();
        if mean > 0.0 {
            self.aggregated_std_dev() / mean
        } else {
            0.0
        }
    }

    /// Replace the per-period mean with the seasonal average over `periods`
    /// weeks (see [`SeasonalityProfile::average_seasonal_demand`] for partial
    /// weeks). The standard deviation is left as is.
    pub fn seasonally_adjusted(&self, profile: &SeasonalityProfile) -> DemandModel {
        DemandModel {
            mean_per_period: profile.average_seasonal_demand(self.mean_per_period, self.periods),
            ..*self
        }
    }

    pub fn validate(&self) -> StockResult<()> {
        validate_finite("mean_per_period", self.mean_per_period)?;
        validate_finite("std_dev_per_period", self.std_dev_per_period)?;
        validate_non_negative("std_dev_per_period", self.std_dev_per_period)?;
        validate_finite("periods", self.periods)?;
        validate_positive("periods", self.periods)?;
        Ok(())
    }
}

/// Unit economics for the newsvendor critical ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostStructure {
    /// Profit lost per unit of unmet demand (underage cost)
    pub margin: f64,
    /// Purchase price tied up per unsold unit (overage cost)
    pub price: f64,
}

impl CostStructure {
    pub fn new(margin: f64, price: f64) -> Self {
        CostStructure { margin, price }
    }

    /// Target service level `margin / (margin + price)`
    pub fn critical_ratio(&self) -> f64 {
        self.margin / (self.margin + self.price)
    }

    pub fn validate(&self) -> StockResult<()> {
        validate_finite("margin", self.margin)?;
        validate_finite("price", self.price)?;
        if self.margin + self.price == 0.0 {
            return Err(StockError::InvalidParameters {
                parameter: "margin + price".to_string(),
                value: 0.0,
                constraint: "must be non-zero (critical ratio denominator)".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_over_horizon() {
        let demand = DemandModel::new(100.0, 20.0, 4.0);
        assert_eq!(demand.aggregated_mean(), 400.0);
        assert_eq!(demand.aggregated_std_dev(), 40.0);
        assert_eq!(demand.coefficient_of_variation(), 0.1);
    }

    #[test]
    fn test_coefficient_of_variation_without_demand() {
        let demand = DemandModel::new(0.0, 5.0, 4.0);
        assert_eq!(demand.coefficient_of_variation(), 0.0);
    }

    #[test]
    fn test_demand_validation() {
        assert!(DemandModel::new(100.0, 20.0, 4.0).validate().is_ok());
        assert!(DemandModel::new(100.0, 0.0, 4.0).validate().is_ok());
        assert!(DemandModel::new(100.0, -1.0, 4.0).validate().is_err());
        assert!(DemandModel::new(100.0, 20.0, 0.0).validate().is_err());
        assert!(DemandModel::new(f64::NAN, 20.0, 4.0).validate().is_err());
    }

    #[test]
    fn test_cost_structure() {
        let costs = CostStructure::new(10.0, 5.0);
        assert!((costs.critical_ratio() - 2.0 / 3.0).abs() < 1e-15);
        assert!(costs.validate().is_ok());
        assert!(CostStructure::new(5.0, -5.0).validate().is_err());
    }

    #[test]
    fn test_seasonal_adjustment_scales_mean_only() {
        let mut factors = [1.0; 12];
        factors[0] = 2.0;
        let profile = SeasonalityProfile::new(factors, 0).expect("valid profile");
        let demand = DemandModel::new(10.0, 3.0, 4.0).seasonally_adjusted(&profile);
        // four weeks all fall inside month 0
        assert_eq!(demand.mean_per_period, 20.0);
        assert_eq!(demand.std_dev_per_period, 3.0);
        assert_eq!(demand.periods, 4.0);
    }

    #[test]
    fn test_seasonal_adjustment_keeps_fractional_horizon() {
        let mut factors = [1.0; 12];
        factors[0] = 2.0;
        let profile = SeasonalityProfile::new(factors, 0).expect("valid profile");
        let demand = DemandModel::new(10.0, 3.0, 2.5).seasonally_adjusted(&profile);
        // weeks 0, 1 and 2 at 20 each, spread over 2.5 weeks
        assert!((demand.mean_per_period - 60.0 / 2.5).abs() < 1e-12);
    }
}
