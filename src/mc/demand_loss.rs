// src/mc/demand_loss.rs
//! Monte Carlo estimate of expected unmet demand
//!
//! # Algorithm
//!
//! 1. Aggregate per-period demand over the horizon: `μ·n`, `σ·√n`
//! 2. Draw `D_i ~ N(μ·n, σ·√n)`, clamp `D_i ≥ 0`
//! 3. Return `(1/N) Σ max(0, D_i - q)`
//!
//! Draws are accumulated sequentially in draw order so that a given seed
//! reproduces the estimate bit for bit.

use tracing::debug;

use crate::error::{validation::*, StockResult};
use crate::models::DemandModel;
use crate::rng;

/// Seed used by [`estimate_demand_loss`]. Identical economic inputs always give
/// identical loss estimates.
pub const DEMAND_LOSS_SEED: i64 = 42;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandLossConfig {
    pub iterations: i32,
    pub seed: i64,
}

impl DemandLossConfig {
    /// Iteration count scaled with demand noise: `max(1000, ⌈5000 · σ / max(μ, 1)⌉)`
    /// on per-period figures
    pub fn adaptive(demand: &DemandModel) -> Self {
        let cv = demand.std_dev_per_period / demand.mean_per_period.max(1.0);
        let scaled = (5000.0 * cv).ceil();
        let iterations = if scaled.is_finite() {
            scaled.clamp(1000.0, MAX_TRIALS as f64) as i32
        } else {
            1000
        };
        DemandLossConfig {
            iterations,
            seed: DEMAND_LOSS_SEED,
        }
    }

    pub fn validate(&self) -> StockResult<()> {
        validate_trials("iterations", self.iterations)
    }
}

impl Default for DemandLossConfig {
    fn default() -> Self {
        DemandLossConfig {
            iterations: 10_000,
            seed: DEMAND_LOSS_SEED,
        }
    }
}

/// Expected lost sales at stock level `q`
///
/// Returns `0.0` without simulating when `iterations <= 0` or `periods <= 0`.
pub fn estimate_demand_loss_with(q: f64, demand: &DemandModel, cfg: &DemandLossConfig) -> f64 {
    if cfg.iterations <= 0 || demand.periods <= 0.0 {
        debug!(
            iterations = cfg.iterations,
            periods = demand.periods,
            "degenerate demand-loss input, returning 0"
        );
        return 0.0;
    }

    let mean = demand.aggregated_mean();
    let std_dev = demand.aggregated_std_dev();
    let mut rng = rng::seed_rng(cfg.seed);

    let mut sum_lost = 0.0;
    for _ in 0..cfg.iterations {
        let simulated = (mean + std_dev * rng::get_normal_draw(&mut rng)).max(0.0);
        let loss = simulated - q;
        if loss > 0.0 {
            sum_lost += loss;
        }
    }

    let expected_loss = sum_lost / cfg.iterations as f64;
    debug!(
        q,
        mean,
        std_dev,
        iterations = cfg.iterations,
        seed = cfg.seed,
        expected_loss,
        "demand-loss simulation finished"
    );
    expected_loss
}

/// Scalar entry point with the fixed seed [`DEMAND_LOSS_SEED`]
pub fn estimate_demand_loss(
    q: f64,
    mean_per_period: f64,
    std_dev_per_period: f64,
    periods: f64,
    iterations: i32,
) -> f64 {
    estimate_demand_loss_with(
        q,
        &DemandModel::new(mean_per_period, std_dev_per_period, periods),
        &DemandLossConfig {
            iterations,
            seed: DEMAND_LOSS_SEED,
        },
    )
}
