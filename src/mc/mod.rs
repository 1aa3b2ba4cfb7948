// src/mc/mod.rs
pub mod demand_loss;
pub mod mixture;
pub mod scenario;
