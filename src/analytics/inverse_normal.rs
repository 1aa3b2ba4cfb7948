// src/analytics/inverse_normal.rs
//! Inverse standard normal CDF (percent-point function)
//!
//! # Algorithm
//!
//! Wichura's AS241 (PPND16) rational approximation, accurate to about 1 part
//! in 10¹⁶. The domain is split into a central region and a tail region:
//!
//! ```text
//! q = p - ½
//! |q| ≤ 0.425:  r = 0.180625 - q²,        z = q · A(r) / B(r)
//! otherwise:    r = √(-ln(min(p, 1-p)))
//!               r ≤ 5:  z = C(r - 1.6) / D(r - 1.6)
//!               r > 5:  z = E(r - 5)   / F(r - 5)
//!               z = -z when q < 0
//! ```
//!
//! The coefficient tables are data and must not be rounded or reordered.

use crate::error::{StockError, StockResult};

const SPLIT_CENTRAL: f64 = 0.425;
const SPLIT_TAIL: f64 = 5.0;
const CONST_CENTRAL: f64 = 0.180625;
const CONST_TAIL: f64 = 1.6;

// Central region, |q| <= 0.425
const A: [f64; 8] = [
    3.387_132_872_796_366_608_0e0,
    1.331_416_678_917_843_774_5e2,
    1.971_590_950_306_551_442_7e3,
    1.373_169_376_550_946_112_5e4,
    4.592_195_393_154_987_145_7e4,
    6.726_577_092_700_870_085_3e4,
    3.343_057_558_358_812_810_5e4,
    2.509_080_928_730_122_672_7e3,
];
const B: [f64; 8] = [
    1.0,
    4.231_333_070_160_091_125_2e1,
    6.871_870_074_920_579_083_0e2,
    5.394_196_021_424_751_107_7e3,
    2.121_379_430_158_659_586_7e4,
    3.930_789_580_009_271_061_0e4,
    2.872_908_573_572_194_267_4e4,
    5.226_495_278_852_854_561_0e3,
];

// Intermediate tail, r <= 5
const C: [f64; 8] = [
    1.423_437_110_749_683_577_34e0,
    4.630_337_846_156_545_295_90e0,
    5.769_497_221_460_691_405_50e0,
    3.647_848_324_763_204_605_04e0,
    1.270_458_252_452_368_382_58e0,
    2.417_807_251_774_506_117_70e-1,
    2.272_384_498_926_918_458_33e-2,
    7.745_450_142_783_414_076_40e-4,
];
const D: [f64; 8] = [
    1.0,
    2.053_191_626_637_758_821_87e0,
    1.676_384_830_183_803_849_40e0,
    6.897_673_349_851_000_045_50e-1,
    1.481_039_764_274_800_745_90e-1,
    1.519_866_656_361_645_719_66e-2,
    5.475_938_084_995_344_946_00e-4,
    1.050_750_071_644_416_843_24e-9,
];

// Far tail, r > 5
const E: [f64; 8] = [
    6.657_904_643_501_103_777_20e0,
    5.463_784_911_164_114_369_90e0,
    1.784_826_539_917_291_335_80e0,
    2.965_605_718_285_048_912_30e-1,
    2.653_218_952_657_612_309_30e-2,
    1.242_660_947_388_078_438_60e-3,
    2.711_555_568_743_487_578_15e-5,
    2.010_334_399_292_288_132_65e-7,
];
const F: [f64; 8] = [
    1.0,
    5.998_322_065_558_879_376_90e-1,
    1.369_298_809_227_358_053_10e-1,
    1.487_536_129_085_061_485_25e-2,
    7.868_691_311_456_132_591_00e-4,
    1.846_318_317_510_054_681_80e-5,
    1.421_511_758_316_445_888_70e-7,
    2.044_263_103_389_939_785_64e-15,
];

/// Horner evaluation, coefficients in ascending powers
fn poly(coeffs: &[f64; 8], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Standard normal quantile: `z` such that `Φ(z) = p`
///
/// Callers are expected to keep `p` inside `(0, 1)`. Outside that interval the
/// result is `NaN`, except exactly at the endpoints where it is `∓∞`.
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    let q = p - 0.5;
    if q.abs() <= SPLIT_CENTRAL {
        let r = CONST_CENTRAL - q * q;
        return q * poly(&A, r) / poly(&B, r);
    }

    let tail = if q < 0.0 { p } else { 1.0 - p };
    let r = (-tail.ln()).sqrt();
    let magnitude = if r <= SPLIT_TAIL {
        let r = r - CONST_TAIL;
        poly(&C, r) / poly(&D, r)
    } else {
        let r = r - SPLIT_TAIL;
        poly(&E, r) / poly(&F, r)
    };

    if q < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Checked quantile: rejects `p` outside the open interval `(0, 1)`
pub fn try_inverse_normal_cdf(p: f64) -> StockResult<f64> {
    if p > 0.0 && p < 1.0 {
        Ok(inverse_normal_cdf(p))
    } else {
        Err(StockError::InvalidParameters {
            parameter: "p".to_string(),
            value: p,
            constraint: "probability must be in the open interval (0, 1)".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math_utils::norm_cdf;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_median_is_zero() {
        assert_eq!(inverse_normal_cdf(0.5), 0.0);
    }

    #[test]
    fn test_reference_quantiles() {
        let cases = [
            (0.975, 1.959963984540054),
            (0.05, -1.6448536269514726),
            (10.0 / 15.0, 0.43072729929545733),
            (1e-10, -6.361340902404056),
        ];
        for (p, expected) in cases {
            let z = inverse_normal_cdf(p);
            println!("p = {:e}: z = {:.15}, expected {:.15}", p, z, expected);
            assert_abs_diff_eq!(z, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_antisymmetry() {
        for &p in &[0.01, 0.2, 0.4, 0.45, 0.499] {
            assert_abs_diff_eq!(
                inverse_normal_cdf(p),
                -inverse_normal_cdf(1.0 - p),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_round_trip_through_cdf() {
        // Upper tail stops at 6: beyond it Φ(z) rounds to within a few ulps of 1
        let mut z = -8.0;
        while z <= 6.0 {
            let back = inverse_normal_cdf(norm_cdf(z));
            assert_abs_diff_eq!(back, z, epsilon = 1e-6);
            z += 0.25;
        }
    }

    #[test]
    fn test_agrees_with_statrs_quantile() {
        use statrs::distribution::{ContinuousCDF, Normal};

        let normal = Normal::new(0.0, 1.0).expect("unit normal");
        for i in 1..1000 {
            let p = i as f64 / 1000.0;
            assert_abs_diff_eq!(inverse_normal_cdf(p), normal.inverse_cdf(p), epsilon = 1e-8);
        }
    }

    #[test]
    fn test_out_of_domain() {
        assert!(inverse_normal_cdf(-0.1).is_nan());
        assert!(inverse_normal_cdf(1.1).is_nan());
        assert!(inverse_normal_cdf(f64::NAN).is_nan());
        assert_eq!(inverse_normal_cdf(0.0), f64::NEG_INFINITY);
        assert_eq!(inverse_normal_cdf(1.0), f64::INFINITY);
    }

    #[test]
    fn test_checked_variant() {
        assert!(try_inverse_normal_cdf(0.0).is_err());
        assert!(try_inverse_normal_cdf(1.0).is_err());
        assert!(try_inverse_normal_cdf(f64::NAN).is_err());
        let z = try_inverse_normal_cdf(0.975).expect("valid probability");
        assert_abs_diff_eq!(z, 1.959963984540054, epsilon = 1e-12);
    }
}
