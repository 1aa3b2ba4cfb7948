// src/mc/scenario.rs
//! Scenario revenue simulation valued as a Black-Scholes call
//!
//! # Math Framework
//!
//! Each trial draws one demand realisation for the whole scenario and books
//! regular plus rush revenue:
//! ```text
//! D = max(0, round(N(μ, σ)))
//! sales = min(q, D),  lost = max(0, D - q)
//! rev = sales · p_full + lost · p_rush · rev_rush
//! ```
//! Rush units are the expected share `lost · p_rush` of the excess, not a
//! Bernoulli draw.
//!
//! The sample mean and variance of `rev` are matched to a lognormal with the
//! same coefficient of variation:
//! ```text
//! σ_BS = √(ln(1 + (σ_rev / μ_rev)²))
//! ```
//! and the scenario is worth `C(max(μ_rev, ε), max(K, ε), T, max(σ_BS, ε), r)`
//! with `ε = 1e-6`.

use tracing::{debug, warn};

use crate::analytics::bs_analytic::black_scholes_call;
use crate::error::{validation::*, StockError, StockResult};
use crate::rng;

/// Volatility used when simulated mean revenue is not positive
pub const FALLBACK_VOLATILITY: f64 = 0.2;

/// Floor applied to spot, strike and volatility before pricing
pub const PRICER_FLOOR: f64 = 1e-6;

/// Trial count and seed of one simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub trials: i32,
    pub seed: i64,
}

impl SimulationConfig {
    pub fn validate(&self) -> StockResult<()> {
        validate_trials("trials", self.trials)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            trials: 1000,
            seed: 1_234_567,
        }
    }
}

/// One revenue scenario. Demand `mean`/`std_dev` describe the whole
/// scenario horizon and are not aggregated again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioParams {
    pub q: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub full_price: f64,
    pub rush_unit_revenue: f64,
    pub rush_prob: f64,
    pub strike: f64,
    pub maturity: f64,
    pub rate: f64,
}

impl ScenarioParams {
    pub fn validate(&self) -> StockResult<()> {
        validate_finite("q", self.q)?;
        validate_non_negative("q", self.q)?;
        validate_finite("mean", self.mean)?;
        validate_finite("std_dev", self.std_dev)?;
        validate_non_negative("std_dev", self.std_dev)?;
        validate_finite("full_price", self.full_price)?;
        validate_finite("rush_unit_revenue", self.rush_unit_revenue)?;
        validate_probability("rush_prob", self.rush_prob)?;
        validate_finite("strike", self.strike)?;
        validate_finite("maturity", self.maturity)?;
        validate_finite("rate", self.rate)?;
        Ok(())
    }

    fn trial_revenue(&self, demand: f64) -> f64 {
        let normal_sales = self.q.min(demand);
        let lost = (demand - self.q).max(0.0);
        let rush_sales = lost * self.rush_prob;
        normal_sales * self.full_price + rush_sales * self.rush_unit_revenue
    }
}

/// Running first and second moments of per-trial revenue
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RevenueMoments {
    sum: f64,
    sum_sq: f64,
    trials: u64,
}

impl RevenueMoments {
    pub fn push(&mut self, revenue: f64) {
        self.sum += revenue;
        self.sum_sq += revenue * revenue;
        self.trials += 1;
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn mean(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.sum / self.trials as f64
    }

    /// Population variance, clamped at zero against cancellation
    pub fn variance(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        let mean = self.mean();
        (self.sum_sq / self.trials as f64 - mean * mean).max(0.0)
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Volatility of the lognormal with this mean and standard deviation, or
    /// [`FALLBACK_VOLATILITY`] when the mean is not positive
    pub fn lognormal_volatility(&self) -> f64 {
        let mean = self.mean();
        if mean > 0.0 {
            let cv = self.std_dev() / mean;
            (1.0 + cv * cv).ln().sqrt()
        } else {
            warn!(mean, "non-positive mean revenue, using fallback volatility");
            FALLBACK_VOLATILITY
        }
    }
}

/// Simulate `cfg.trials` revenue outcomes of a scenario
pub fn simulate_revenue_moments(params: &ScenarioParams, cfg: &SimulationConfig) -> RevenueMoments {
    let mut moments = RevenueMoments::default();
    if cfg.trials <= 0 {
        return moments;
    }

    let mut rng = rng::seed_rng(cfg.seed);
    for _ in 0..cfg.trials {
        // round first, then clamp
        let demand = (params.mean + params.std_dev * rng::get_normal_draw(&mut rng))
            .round()
            .max(0.0);
        moments.push(params.trial_revenue(demand));
    }
    moments
}

/// Option value of a revenue scenario
///
/// Returns `0.0` without simulating when `cfg.trials <= 0`.
pub fn evaluate_scenario_with(params: &ScenarioParams, cfg: &SimulationConfig) -> f64 {
    if cfg.trials <= 0 {
        debug!(trials = cfg.trials, "no trials requested, scenario worth 0");
        return 0.0;
    }

    let moments = simulate_revenue_moments(params, cfg);
    let mu_rev = moments.mean();
    let sigma_bs = moments.lognormal_volatility();

    let value = black_scholes_call(
        mu_rev.max(PRICER_FLOOR),
        params.strike.max(PRICER_FLOOR),
        params.maturity,
        sigma_bs.max(PRICER_FLOOR),
        params.rate,
    );
    debug!(
        trials = cfg.trials,
        seed = cfg.seed,
        mu_rev,
        sigma_rev = moments.std_dev(),
        sigma_bs,
        value,
        "scenario evaluated"
    );
    value
}

/// Scalar entry point: the generator is seeded with the caller's `seed`
#[allow(clippy::too_many_arguments)]
pub fn evaluate_scenario(
    q: f64,
    mean: f64,
    std_dev: f64,
    full_price: f64,
    rush_unit_revenue: f64,
    rush_prob: f64,
    trials: i32,
    seed: i64,
    k: f64,
    t: f64,
    r: f64,
) -> f64 {
    let params = ScenarioParams {
        q,
        mean,
        std_dev,
        full_price,
        rush_unit_revenue,
        rush_prob,
        strike: k,
        maturity: t,
        rate: r,
    };
    evaluate_scenario_with(&params, &SimulationConfig { trials, seed })
}

/// Validating form of [`evaluate_scenario_with`]
pub fn try_evaluate_scenario(params: &ScenarioParams, cfg: &SimulationConfig) -> StockResult<f64> {
    params.validate()?;
    cfg.validate()?;
    let value = evaluate_scenario_with(params, cfg);
    if !value.is_finite() {
        return Err(StockError::MonteCarloError {
            trials: cfg.trials,
            reason: format!("option value is not finite ({})", value),
        });
    }
    Ok(value)
}
