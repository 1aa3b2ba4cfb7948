// src/models/mod.rs
pub mod demand;
pub mod pricing;
pub mod seasonality;
pub mod volatility;

pub use demand::{CostStructure, DemandModel};
pub use pricing::{effective_purchase_price, RevenueTerms, VolumeDiscount};
pub use seasonality::SeasonalityProfile;
