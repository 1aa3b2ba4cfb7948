// src/solvers/mod.rs
pub mod quantity_search;
