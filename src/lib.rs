//! # stock-math: Monte Carlo and Closed-Form Inventory Analytics
//!
//! A small decision-support kernel for stocking decisions under Gaussian demand:
//! how much demand a stock level leaves unmet, how much to order, and what the
//! upside of a stock position is worth when its revenue is valued as a call
//! option.
//!
//! ## Key Features
//!
//! - **Gaussian primitives**: normal CDF/PDF and the AS241 inverse CDF
//! - **Demand-loss simulation**: seeded Monte Carlo estimate of lost sales
//! - **Newsvendor optimisation**: critical-ratio order quantity
//! - **Scenario valuation**: simulated revenue moments bridged to Black-Scholes
//! - **Reproducible**: every simulation owns an explicitly seeded generator
//!
//! ## Quick Start
//!
//! ```rust
//! use stock_math::{estimate_demand_loss, evaluate_scenario, optimal_order_quantity};
//!
//! // 4 weeks of demand at 100 ± 20 per week, margin 10, purchase price 5
//! let q_star = optimal_order_quantity(10.0, 5.0, 100.0, 20.0, 4.0);
//! assert!((q_star - 417.23).abs() < 0.01);
//!
//! // Expected lost sales if we only stock 380 units
//! let lost = estimate_demand_loss(380.0, 100.0, 20.0, 4.0, 10_000);
//! assert!(lost > 0.0);
//!
//! // Option value of the revenue that q_star units produce
//! let value = evaluate_scenario(
//!     q_star, 400.0, 40.0, 15.0, 12.0, 0.3, 1_000, 42, 4_000.0, 4.0 / 52.0, 0.05,
//! );
//! assert!(value > 0.0);
//! ```
//!
//! ## Sentinels, not errors
//!
//! The scalar functions never fail. Degenerate input (no trials, no horizon,
//! a critical ratio outside `(0, 1)`, an expired option) maps to a documented
//! sentinel value. Typed entry points with `validate()` and the `try_*`
//! functions report bad input as [`StockError`] instead.

// Module declarations
pub mod analytics;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod rng;
pub mod solvers;

// Re-export commonly used types for convenience
pub use error::{StockError, StockResult};

pub use analytics::bs_analytic::black_scholes_call;
pub use analytics::inverse_normal::{inverse_normal_cdf, try_inverse_normal_cdf};
pub use analytics::newsvendor::optimal_order_quantity;
pub use math_utils::{norm_cdf as normal_cdf, norm_pdf as normal_pdf};
pub use mc::demand_loss::estimate_demand_loss;
pub use mc::scenario::evaluate_scenario;
