// src/models/seasonality.rs
//! Month-of-year demand multipliers.
//!
//! Weeks are mapped onto months with a fixed 4.33 weeks per month, so week
//! `w` of a horizon starting in month `m` falls in month
//! `(m + ⌊w / 4.33⌋) mod 12`.

use chrono::{Datelike, NaiveDate};

use crate::error::{validation::*, StockError, StockResult};

pub const WEEKS_PER_MONTH: f64 = 4.33;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalityProfile {
    monthly_factors: [f64; 12],
    /// 0 = January
    start_month: u32,
}

impl SeasonalityProfile {
    pub fn new(monthly_factors: [f64; 12], start_month: u32) -> StockResult<Self> {
        if start_month >= 12 {
            return Err(StockError::InvalidConfiguration {
                field: "start_month".to_string(),
                reason: format!("must be in 0..12, got {}", start_month),
            });
        }
        for factor in monthly_factors.iter() {
            validate_finite("monthly_factor", *factor)?;
            validate_non_negative("monthly_factor", *factor)?;
        }
        Ok(SeasonalityProfile {
            monthly_factors,
            start_month,
        })
    }

    /// Profile whose horizon starts in the month of `date`
    pub fn starting_at(monthly_factors: [f64; 12], date: NaiveDate) -> StockResult<Self> {
        Self::new(monthly_factors, date.month0())
    }

    /// No seasonal effect
    pub fn flat() -> Self {
        SeasonalityProfile {
            monthly_factors: [1.0; 12],
            start_month: 0,
        }
    }

    pub fn start_month(&self) -> u32 {
        self.start_month
    }

    fn factor_for_week(&self, week: f64) -> f64 {
        let offset = (week / WEEKS_PER_MONTH).floor() as u32;
        let month = (self.start_month + offset) % 12;
        self.monthly_factors[month as usize]
    }

    /// Weekly demand `weeks_ahead` weeks into the horizon
    pub fn seasonal_demand(&self, base_weekly_demand: f64, weeks_ahead: u32) -> f64 {
        base_weekly_demand * self.factor_for_week(weeks_ahead as f64)
    }

    /// Mean weekly demand over the first `weeks` weeks of the horizon.
    ///
    /// A fractional horizon still visits `⌈weeks⌉` weeks but divides by the
    /// fractional length, so a partial last week counts in full.
    pub fn average_seasonal_demand(&self, base_weekly_demand: f64, weeks: f64) -> f64 {
        if !weeks.is_finite() || weeks <= 0.0 {
            return base_weekly_demand;
        }
        let whole_weeks = weeks.ceil() as u64;
        let total: f64 = (0..whole_weeks)
            .map(|week| base_weekly_demand * self.factor_for_week(week as f64))
            .sum();
        total / weeks
    }
}

impl Default for SeasonalityProfile {
    fn default() -> Self {
        SeasonalityProfile::flat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> [f64; 12] {
        let mut factors = [0.0; 12];
        for (i, f) in factors.iter_mut().enumerate() {
            *f = 1.0 + 0.1 * i as f64;
        }
        factors
    }

    #[test]
    fn test_rejects_bad_profiles() {
        assert!(SeasonalityProfile::new([1.0; 12], 12).is_err());
        let mut factors = [1.0; 12];
        factors[3] = -0.5;
        assert!(SeasonalityProfile::new(factors, 0).is_err());
        factors[3] = f64::NAN;
        assert!(SeasonalityProfile::new(factors, 0).is_err());
    }

    #[test]
    fn test_starting_at_uses_calendar_month() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 18).expect("valid date");
        let profile = SeasonalityProfile::starting_at(ramp(), date).expect("valid profile");
        assert_eq!(profile.start_month(), 10);
    }

    #[test]
    fn test_seasonal_demand_month_rollover() {
        let profile = SeasonalityProfile::new(ramp(), 11).expect("valid profile");
        // week 0 is December, week 5 falls one month later in January
        assert!((profile.seasonal_demand(10.0, 0) - 21.0).abs() < 1e-12);
        assert!((profile.seasonal_demand(10.0, 5) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_seasonal_demand() {
        let profile = SeasonalityProfile::new(ramp(), 0).expect("valid profile");
        // weeks 0-4 in January (1.0), weeks 5-8 in February (1.1)
        let avg = profile.average_seasonal_demand(10.0, 9.0);
        let expected = (5.0 * 10.0 + 4.0 * 11.0) / 9.0;
        assert!((avg - expected).abs() < 1e-12, "avg {} expected {}", avg, expected);
    }

    #[test]
    fn test_fractional_horizon_divides_by_fractional_weeks() {
        let profile = SeasonalityProfile::new(ramp(), 0).expect("valid profile");
        // 2.5 weeks visit weeks 0, 1 and 2, all in January
        let avg = profile.average_seasonal_demand(10.0, 2.5);
        assert!((avg - 30.0 / 2.5).abs() < 1e-12, "avg {}", avg);
    }

    #[test]
    fn test_flat_profile_is_identity() {
        let profile = SeasonalityProfile::flat();
        assert_eq!(profile.average_seasonal_demand(37.5, 26.0), 37.5);
        assert_eq!(profile.average_seasonal_demand(37.5, 0.0), 37.5);
    }
}
