// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes call price
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! In this crate the "underlying" is the expected revenue of a stocking
//! decision and the strike is what that stock cost to hold, so the call value
//! reads as the upside of the inventory position.

use crate::math_utils::norm_cdf;

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C(S,K,T,σ,r) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// ```
///
/// Where:
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
///
/// # Parameters
/// - `s`: Spot value
/// - `k`: Strike
/// - `t`: Time to expiration in years
/// - `sigma`: Volatility
/// - `r`: Risk-free rate
///
/// # Returns
/// Present value of the call. An expired option (`t <= 0`) is worth its
/// intrinsic value `max(0, S - K)`.
pub fn black_scholes_call(s: f64, k: f64, t: f64, sigma: f64, r: f64) -> f64 {
    if t <= 0.0 {
        return (s - k).max(0.0);
    }
    let sqrt_t = t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * sqrt_t);
    let d2 = d1 - sigma * sqrt_t;
    s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}
