// src/models/pricing.rs
use crate::error::{validation::*, StockResult};

/// Purchase discount tier: orders of at least `min_quantity` units get
/// `discount_pct` percent off the base purchase price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeDiscount {
    pub min_quantity: f64,
    pub discount_pct: f64,
}

impl VolumeDiscount {
    pub fn new(min_quantity: f64, discount_pct: f64) -> Self {
        VolumeDiscount {
            min_quantity,
            discount_pct,
        }
    }
}

/// Purchase price after the largest tier the quantity qualifies for.
///
/// With several tiers at the same threshold the first one listed wins.
pub fn effective_purchase_price(base_price: f64, quantity: f64, discounts: &[VolumeDiscount]) -> f64 {
    let best = discounts
        .iter()
        .filter(|d| quantity >= d.min_quantity)
        .fold(None::<&VolumeDiscount>, |best, d| match best {
            Some(b) if b.min_quantity >= d.min_quantity => Some(b),
            _ => Some(d),
        });

    match best {
        Some(d) => base_price * (1.0 - d.discount_pct / 100.0),
        None => base_price,
    }
}

/// Per-unit revenue terms of a stocking decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenueTerms {
    /// Unit purchase cost
    pub purchase: f64,
    /// Unit margin on top of the purchase cost
    pub margin: f64,
    /// Share of excess demand recovered through a rush order, in [0, 1]
    pub rush_prob: f64,
    /// Per-unit revenue given up on rush-ordered units
    pub rush_save: f64,
}

impl RevenueTerms {
    /// Selling price of a regular unit
    pub fn full_price(&self) -> f64 {
        self.purchase + self.margin
    }

    /// Revenue of a rush-ordered unit, never negative
    pub fn rush_unit_revenue(&self) -> f64 {
        (self.full_price() - self.rush_save).max(0.0)
    }

    pub fn validate(&self) -> StockResult<()> {
        validate_finite("purchase", self.purchase)?;
        validate_non_negative("purchase", self.purchase)?;
        validate_finite("margin", self.margin)?;
        validate_probability("rush_prob", self.rush_prob)?;
        validate_finite("rush_save", self.rush_save)?;
        validate_non_negative("rush_save", self.rush_save)?;
        Ok(())
    }
}
