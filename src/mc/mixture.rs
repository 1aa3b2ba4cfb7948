// src/mc/mixture.rs
//! Stock position valued as a probability-weighted mix of demand scenarios
//!
//! # Math Framework
//!
//! Holding `q` units for `w` weeks is treated as a call on the revenue they
//! produce, struck at the cost of carrying them:
//! ```text
//! T = w / 52
//! K = q · c_eff · (1 + rT) + q · h · w
//! V = Σ_s p_s · C_s(q)
//! ```
//! where `c_eff` is the discounted purchase price, `h` the weekly holding cost
//! per unit and `C_s` the scenario value from [`evaluate_scenario_with`].
//!
//! Scenarios are independent simulations with their own generators, so they
//! are valued in parallel; the weighted sum runs in scenario order.

use rayon::prelude::*;
use tracing::debug;

use super::scenario::{evaluate_scenario_with, ScenarioParams, SimulationConfig};
use crate::error::{validation::*, StockResult};
use crate::models::{effective_purchase_price, VolumeDiscount};

pub const WEEKS_PER_YEAR: f64 = 52.0;
pub const MIN_MIXTURE_TRIALS: i32 = 300;
pub const MAX_MIXTURE_TRIALS: i32 = 2000;
pub const DEFAULT_MIXTURE_TRIALS: i32 = 1000;
pub const DEFAULT_MIXTURE_SEED: i64 = 1_234_567;

/// Demand regime with its probability and multipliers on base weekly demand.
/// A zero multiplier means "unchanged".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandScenario {
    pub probability: f64,
    pub mean_multiplier: f64,
    pub std_dev_multiplier: f64,
}

impl DemandScenario {
    pub fn new(probability: f64, mean_multiplier: f64, std_dev_multiplier: f64) -> Self {
        DemandScenario {
            probability,
            mean_multiplier,
            std_dev_multiplier,
        }
    }
}

fn multiplier(m: f64) -> f64 {
    if m == 0.0 || m.is_nan() {
        1.0
    } else {
        m
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryOptionParams {
    pub q: f64,
    pub base_mean_per_week: f64,
    pub base_std_dev_per_week: f64,
    pub weeks: f64,
    pub purchase: f64,
    pub margin: f64,
    pub rush_prob: f64,
    pub rush_save: f64,
    pub rate: f64,
    /// Holding cost per unit per week
    pub holding_cost: f64,
    pub volume_discounts: Vec<VolumeDiscount>,
    /// Requested trials per scenario, clamped to `[300, 2000]`
    pub trials: Option<i32>,
    pub seed: Option<i64>,
}

impl Default for InventoryOptionParams {
    fn default() -> Self {
        InventoryOptionParams {
            q: 0.0,
            base_mean_per_week: 0.0,
            base_std_dev_per_week: 0.0,
            weeks: 0.0,
            purchase: 0.0,
            margin: 0.0,
            rush_prob: 0.0,
            rush_save: 0.0,
            rate: 0.0,
            holding_cost: 0.0,
            volume_discounts: Vec::new(),
            trials: None,
            seed: None,
        }
    }
}

impl InventoryOptionParams {
    /// Trials per scenario after clamping
    pub fn scenario_trials(&self) -> i32 {
        match self.trials {
            Some(n) if n > 0 => n.clamp(MIN_MIXTURE_TRIALS, MAX_MIXTURE_TRIALS),
            _ => DEFAULT_MIXTURE_TRIALS,
        }
    }

    pub fn effective_purchase(&self) -> f64 {
        effective_purchase_price(self.purchase, self.q, &self.volume_discounts)
    }

    pub fn maturity(&self) -> f64 {
        self.weeks / WEEKS_PER_YEAR
    }

    /// Carrying cost of the position: financed purchase plus holding
    pub fn strike(&self) -> f64 {
        let t = self.maturity();
        self.q * self.effective_purchase() * (1.0 + self.rate * t)
            + self.q * self.holding_cost * self.weeks
    }

    pub fn validate(&self) -> StockResult<()> {
        validate_finite("q", self.q)?;
        validate_finite("base_mean_per_week", self.base_mean_per_week)?;
        validate_finite("base_std_dev_per_week", self.base_std_dev_per_week)?;
        validate_non_negative("base_std_dev_per_week", self.base_std_dev_per_week)?;
        validate_finite("weeks", self.weeks)?;
        validate_non_negative("purchase", self.purchase)?;
        validate_finite("margin", self.margin)?;
        validate_probability("rush_prob", self.rush_prob)?;
        validate_non_negative("rush_save", self.rush_save)?;
        validate_finite("rate", self.rate)?;
        validate_non_negative("holding_cost", self.holding_cost)?;
        for d in &self.volume_discounts {
            validate_non_negative("min_quantity", d.min_quantity)?;
            validate_range("discount_pct", d.discount_pct, 0.0, 100.0)?;
        }
        Ok(())
    }

    /// Scenario inputs for one demand regime, with the seed that regime uses
    fn scenario_for(&self, scenario: &DemandScenario) -> (ScenarioParams, SimulationConfig) {
        let mean_per_week = (self.base_mean_per_week * multiplier(scenario.mean_multiplier)).max(0.0);
        let std_dev_per_week =
            (self.base_std_dev_per_week * multiplier(scenario.std_dev_multiplier)).max(0.0);

        let full_price = self.effective_purchase() + self.margin;
        let params = ScenarioParams {
            q: self.q,
            mean: mean_per_week * self.weeks,
            std_dev: std_dev_per_week * self.weeks.sqrt(),
            full_price,
            rush_unit_revenue: (full_price - self.rush_save).max(0.0),
            rush_prob: self.rush_prob,
            strike: self.strike(),
            maturity: self.maturity(),
            rate: self.rate,
        };
        let base_seed = self.seed.unwrap_or(DEFAULT_MIXTURE_SEED);
        let cfg = SimulationConfig {
            trials: self.scenario_trials(),
            seed: base_seed.wrapping_add((mean_per_week * 1000.0).floor() as i64),
        };
        (params, cfg)
    }
}

/// Probability-weighted option value of the stock position across scenarios
///
/// Returns `0.0` when `q <= 0` or `weeks <= 0`.
pub fn inventory_option_value(params: &InventoryOptionParams, scenarios: &[DemandScenario]) -> f64 {
    if params.q <= 0.0 || params.weeks <= 0.0 {
        debug!(q = params.q, weeks = params.weeks, "empty position, worth 0");
        return 0.0;
    }

    let values: Vec<f64> = scenarios
        .par_iter()
        .map(|scenario| {
            let (scenario_params, cfg) = params.scenario_for(scenario);
            evaluate_scenario_with(&scenario_params, &cfg)
        })
        .collect();

    let total = scenarios
        .iter()
        .zip(values.iter())
        .map(|(s, v)| s.probability * v)
        .sum::<f64>();

    debug!(
        q = params.q,
        scenarios = scenarios.len(),
        strike = params.strike(),
        total,
        "inventory option valued"
    );
    total
}
