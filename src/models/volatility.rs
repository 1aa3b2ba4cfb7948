// src/models/volatility.rs
//! Heuristic revenue volatility for a stocking decision.
//!
//! The demand component scales the demand coefficient of variation by how much
//! of expected demand the stock covers:
//! ```text
//! σ_demand = CV · (1 - e^(-2·fill)) · (1 - 0.2·rush_prob),   fill = min(1, q/μ)
//! ```
//! floored at 1%. Currency and supply-route risk are independent components
//! added in quadrature.

use super::demand::DemandModel;

/// Volatility returned when there is no expected demand to scale against
pub const NO_DEMAND_VOLATILITY: f64 = 0.1;
const MIN_DEMAND_VOLATILITY: f64 = 0.01;
const UNKNOWN_COMPONENT_VOLATILITY: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    Rub,
    Usd,
    Eur,
    Cny,
    Other,
}

impl Currency {
    pub fn volatility(&self) -> f64 {
        match self {
            Currency::Rub => 0.15,
            Currency::Usd => 0.20,
            Currency::Eur => 0.18,
            Currency::Cny => 0.12,
            Currency::Other => UNKNOWN_COMPONENT_VOLATILITY,
        }
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "RUB" => Currency::Rub,
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            "CNY" => Currency::Cny,
            _ => Currency::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupplyRoute {
    #[default]
    Domestic,
    China,
    Europe,
    Usa,
    Other,
}

impl SupplyRoute {
    pub fn volatility(&self) -> f64 {
        match self {
            SupplyRoute::Domestic => 0.10,
            SupplyRoute::China => 0.25,
            SupplyRoute::Europe => 0.20,
            SupplyRoute::Usa => 0.22,
            SupplyRoute::Other => UNKNOWN_COMPONENT_VOLATILITY,
        }
    }
}

impl From<&str> for SupplyRoute {
    fn from(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "domestic" => SupplyRoute::Domestic,
            "china" => SupplyRoute::China,
            "europe" => SupplyRoute::Europe,
            "usa" => SupplyRoute::Usa,
            _ => SupplyRoute::Other,
        }
    }
}

/// Demand-driven revenue volatility of holding `q` units
pub fn demand_revenue_volatility(demand: &DemandModel, q: f64, rush_prob: f64) -> f64 {
    let expected = demand.aggregated_mean();
    if expected <= 0.0 {
        return NO_DEMAND_VOLATILITY;
    }
    let cv = demand.aggregated_std_dev() / expected;
    let fill_rate = (q / expected).min(1.0);
    let revenue_vol = cv * (1.0 - (-2.0 * fill_rate).exp());
    let rush_factor = 1.0 - 0.2 * rush_prob;
    (revenue_vol * rush_factor).max(MIN_DEMAND_VOLATILITY)
}

/// Demand volatility combined with currency and logistics risk
pub fn combined_volatility(
    demand: &DemandModel,
    q: f64,
    rush_prob: f64,
    currency: Currency,
    route: SupplyRoute,
) -> f64 {
    if demand.aggregated_mean() <= 0.0 {
        return NO_DEMAND_VOLATILITY;
    }
    let base = demand_revenue_volatility(demand, q, rush_prob);
    let fx = currency.volatility();
    let logistics = route.volatility();
    (base * base + fx * fx + logistics * logistics).sqrt()
}
