// src/solvers/quantity_search.rs
//! Integer search for the stock level that maximises an objective
//!
//! # Algorithm
//!
//! 1. Coarse grid over `[min_q, max_q]` with step `s = max(1, round(step))`
//! 2. Ternary search on the bracket `[best - 3s, best + 3s]` until it is at
//!    most 6 units wide
//! 3. Exhaustive scan of the remaining bracket
//!
//! Monte Carlo objectives are expensive, so every evaluation is memoised and
//! no quantity is evaluated twice. The ternary phase assumes the objective is
//! unimodal inside the bracket; the final scan only improves on the best value
//! already seen, so a non-unimodal objective still returns a grid-or-better
//! point.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantitySearch {
    pub best_q: i64,
    pub best_value: f64,
    /// Distinct quantities evaluated
    pub evaluations: usize,
}

/// Maximise `evaluate` over the integers in `[min_q, max_q]`.
///
/// Returns `None` for an empty range.
pub fn optimize_quantity<F>(
    min_q: i64,
    max_q: i64,
    coarse_step: f64,
    mut evaluate: F,
) -> Option<QuantitySearch>
where
    F: FnMut(i64) -> f64,
{
    if min_q > max_q {
        return None;
    }

    let raw_step = if coarse_step.is_finite() {
        (coarse_step.round() as i64).max(1)
    } else {
        1
    };
    // a step wider than the range only ever visits min_q
    let step = match max_q.checked_sub(min_q).and_then(|d| d.checked_add(1)) {
        Some(span) => raw_step.min(span),
        None => raw_step,
    };
    let mut cache: HashMap<i64, f64> = HashMap::new();
    let mut eval = |q: i64| -> f64 { *cache.entry(q).or_insert_with(|| evaluate(q)) };

    let mut best_q = min_q;
    let mut best_value = f64::NEG_INFINITY;

    let mut q = min_q;
    while q <= max_q {
        let v = eval(q);
        if v > best_value {
            best_value = v;
            best_q = q;
        }
        match q.checked_add(step) {
            Some(next) => q = next,
            None => break,
        }
    }

    let reach = step.saturating_mul(3);
    let mut lo = min_q.max(best_q.saturating_sub(reach));
    let mut hi = max_q.min(best_q.saturating_add(reach));
    // bracket arithmetic in i128 so a bracket spanning most of i64 cannot overflow
    while (hi as i128) - (lo as i128) > 6 {
        let width = hi as i128 - lo as i128;
        let m1 = (lo as i128 + width / 3) as i64;
        // floor(hi - (hi - lo) / 3) on the reals
        let m2 = (hi as i128 - (width + 2) / 3) as i64;
        if eval(m1) < eval(m2) {
            lo = m1 + 1;
        } else {
            hi = m2 - 1;
        }
    }
    for q in lo..=hi {
        let v = eval(q);
        if v > best_value {
            best_value = v;
            best_q = q;
        }
    }

    let evaluations = cache.len();
    debug!(best_q, best_value, evaluations, "quantity search finished");
    Some(QuantitySearch {
        best_q,
        best_value,
        evaluations,
    })
}

/// Evaluate candidate quantities in parallel, keeping input order
pub fn sweep_quantities<F>(quantities: &[f64], evaluate: F) -> Vec<(f64, f64)>
where
    F: Fn(f64) -> f64 + Sync,
{
    quantities.par_iter().map(|&q| (q, evaluate(q))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_finds_peak_of_concave_objective() {
        let result = optimize_quantity(0, 1000, 50.0, |q| -((q - 437) as f64).powi(2))
            .expect("non-empty range");
        assert_eq!(result.best_q, 437);
        assert_eq!(result.best_value, 0.0);
    }

    #[test]
    fn test_peak_at_range_boundary() {
        let result = optimize_quantity(10, 200, 25.0, |q| q as f64).expect("non-empty range");
        assert_eq!(result.best_q, 200);
    }

    #[test]
    fn test_huge_coarse_step_is_clamped_to_range() {
        let result = optimize_quantity(1, 100, 1e30, |q| q as f64).expect("non-empty range");
        assert_eq!(result.best_q, 100);
        let result = optimize_quantity(1, 100, f64::MAX, |q| -((q - 40) as f64).abs())
            .expect("non-empty range");
        assert_eq!(result.best_q, 40);
    }

    #[test]
    fn test_range_at_top_of_i64() {
        let result = optimize_quantity(i64::MAX - 10, i64::MAX, 1.0, |q| (q - (i64::MAX - 10)) as f64)
            .expect("non-empty range");
        assert_eq!(result.best_q, i64::MAX);
        assert_eq!(result.evaluations, 11);

        let result = optimize_quantity(i64::MIN, i64::MIN + 20, 7.0, |q| -((q - (i64::MIN + 3)) as f64).abs())
            .expect("non-empty range");
        assert_eq!(result.best_q, i64::MIN + 3);
    }

    #[test]
    fn test_empty_range() {
        assert!(optimize_quantity(5, 4, 1.0, |q| q as f64).is_none());
    }

    #[test]
    fn test_evaluations_are_memoised() {
        let calls = Cell::new(0usize);
        let result = optimize_quantity(0, 300, 10.0, |q| {
            calls.set(calls.get() + 1);
            -((q - 123) as f64).abs()
        })
        .expect("non-empty range");
        assert_eq!(result.best_q, 123);
        assert_eq!(calls.get(), result.evaluations);
    }

    #[test]
    fn test_sweep_keeps_order() {
        let qs = [30.0, 10.0, 20.0];
        let out = sweep_quantities(&qs, |q| q * 2.0);
        assert_eq!(out, vec![(30.0, 60.0), (10.0, 20.0), (20.0, 40.0)]);
    }
}
