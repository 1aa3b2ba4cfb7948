// tests/properties_test.rs
use proptest::prelude::*;
use stock_math::mc::demand_loss::{estimate_demand_loss_with, DemandLossConfig};
use stock_math::models::DemandModel;
use stock_math::{
    black_scholes_call, inverse_normal_cdf, normal_cdf, normal_pdf, optimal_order_quantity,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_cdf_symmetry(x in -8.0f64..8.0) {
        let sum = normal_cdf(x) + normal_cdf(-x);
        prop_assert!((sum - 1.0).abs() < 1e-12, "Φ({}) + Φ(-x) = {}", x, sum);
    }

    #[test]
    fn prop_cdf_bounded_and_monotone(x in -10.0f64..10.0, dx in 0.0f64..1.0) {
        let lo = normal_cdf(x);
        let hi = normal_cdf(x + dx);
        prop_assert!((0.0..=1.0).contains(&lo));
        prop_assert!(hi >= lo);
    }

    #[test]
    fn prop_pdf_symmetry(x in -40.0f64..40.0) {
        prop_assert_eq!(normal_pdf(x), normal_pdf(-x));
        prop_assert!(normal_pdf(x) >= 0.0);
    }

    #[test]
    fn prop_inverse_round_trip(p in 1e-10f64..(1.0 - 1e-10)) {
        let z = inverse_normal_cdf(p);
        let back = normal_cdf(z);
        let tol = 1e-12f64.max(1e-8 * p);
        prop_assert!((back - p).abs() <= tol, "p = {}, z = {}, Φ(z) = {}", p, z, back);
    }

    #[test]
    fn prop_demand_loss_non_increasing_in_stock(
        mean in 0.0f64..200.0,
        std_dev in 0.0f64..60.0,
        periods in 1.0f64..8.0,
        q in 0.0f64..1500.0,
        extra in 0.0f64..200.0,
        seed in any::<i64>(),
    ) {
        let demand = DemandModel::new(mean, std_dev, periods);
        let cfg = DemandLossConfig { iterations: 500, seed };
        let low_stock = estimate_demand_loss_with(q, &demand, &cfg);
        let high_stock = estimate_demand_loss_with(q + extra, &demand, &cfg);
        prop_assert!(low_stock >= 0.0);
        prop_assert!(high_stock <= low_stock, "L({}) = {} < L({}) = {}", q, low_stock, q + extra, high_stock);
    }

    #[test]
    fn prop_order_quantity_grows_with_margin(
        margin in 0.1f64..50.0,
        bump in 0.1f64..50.0,
        price in 0.1f64..50.0,
        mean in 0.0f64..500.0,
        std_dev in 0.1f64..100.0,
    ) {
        let q1 = optimal_order_quantity(margin, price, mean, std_dev, 4.0);
        let q2 = optimal_order_quantity(margin + bump, price, mean, std_dev, 4.0);
        prop_assert!(q2 >= q1 - 1e-9, "q({}) = {} > q({}) = {}", margin, q1, margin + bump, q2);
    }

    #[test]
    fn prop_call_bounded_by_spot(
        s in 1.0f64..500.0,
        k in 1.0f64..500.0,
        t in 0.01f64..3.0,
        sigma in 0.01f64..1.0,
        r in 0.0f64..0.1,
    ) {
        let c = black_scholes_call(s, k, t, sigma, r);
        let lower = (s - k * (-r * t).exp()).max(0.0);
        prop_assert!(c <= s + 1e-9);
        prop_assert!(c >= lower - 1e-9, "C = {} below forward intrinsic {}", c, lower);
    }
}
