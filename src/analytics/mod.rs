// src/analytics/mod.rs
pub mod bs_analytic;
pub mod inverse_normal;
pub mod newsvendor;
