//! Quanta Core - Fundamental types
//!
//! This crate provides the core types used throughout Quanta:
//! - `Ratio`: Exact rational numbers
//! - `Magnitude`: Unit conversion factors (exact ratio or approximate real, times π^k)
//! - `QuantaError`: Structured errors with machine-readable codes

mod ratio;
mod magnitude;
mod error;

pub use ratio::{Ratio, RatioError};
pub use magnitude::{Magnitude, Coefficient};
pub use error::{QuantaError, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Ratio, Magnitude, QuantaError};
    pub use crate::error::codes;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod ratio_tests {
        use super::*;
        use dashu_int::IBig;

        #[test]
        fn test_from_i64() {
            let r = Ratio::from_i64(42);
            assert_eq!(r.to_i64(), Some(42));
            assert!(r.is_integer());
        }

        #[test]
        fn test_new_reduces() {
            let r = Ratio::new(2000, 32).unwrap();
            assert_eq!(r.to_string(), "125/2");
            assert_eq!(Ratio::new(2000, 16).unwrap().to_string(), "125");
            assert_eq!(Ratio::new(3, -6).unwrap().to_string(), "-1/2");
        }

        #[test]
        fn test_new_zero_denominator() {
            assert_eq!(Ratio::new(1, 0), Err(RatioError::DivisionByZero));
        }

        #[test]
        fn test_from_str_forms() {
            assert_eq!("1000".parse::<Ratio>().unwrap(), Ratio::from_i64(1000));
            assert_eq!("1/100".parse::<Ratio>().unwrap(), Ratio::new(1, 100).unwrap());
            assert_eq!("0.3048".parse::<Ratio>().unwrap(), Ratio::new(3048, 10000).unwrap());
            assert_eq!("-2.5".parse::<Ratio>().unwrap(), Ratio::new(-5, 2).unwrap());
            assert!("abc".parse::<Ratio>().is_err());
            assert!("1.".parse::<Ratio>().is_err());
        }

        #[test]
        fn test_pow() {
            assert_eq!(Ratio::power_of(2, 10).unwrap(), Ratio::from_i64(1024));
            assert_eq!(Ratio::power_of(10, -3).unwrap(), Ratio::new(1, 1000).unwrap());
            assert_eq!(Ratio::power_of(7, 0).unwrap(), Ratio::one());
            assert_eq!(Ratio::zero().pow(-1), Err(RatioError::DivisionByZero));
        }

        #[test]
        fn test_pow_large_exponent_is_exact() {
            // 2^50 * 2^-50 == 1 with no rounding
            let big = Ratio::power_of(2, 50).unwrap();
            let small = Ratio::power_of(2, -50).unwrap();
            assert!(big.mul(&small).is_one());
        }

        #[test]
        fn test_gcd() {
            // gcd(1024, 1000) = 8
            let g = Ratio::from_i64(1024).gcd(&Ratio::from_i64(1000));
            assert_eq!(g, Ratio::from_i64(8));

            // gcd(1/2, 1/3) = 1/6
            let g = Ratio::new(1, 2).unwrap().gcd(&Ratio::new(1, 3).unwrap());
            assert_eq!(g, Ratio::new(1, 6).unwrap());

            // gcd(0, x) = x
            let g = Ratio::zero().gcd(&Ratio::new(3, 4).unwrap());
            assert_eq!(g, Ratio::new(3, 4).unwrap());
            assert!(Ratio::zero().gcd(&Ratio::zero()).is_zero());
        }

        #[test]
        fn test_trunc() {
            assert_eq!(Ratio::new(7, 2).unwrap().trunc(), IBig::from(3));
            assert_eq!(Ratio::new(-7, 2).unwrap().trunc(), IBig::from(-3));
        }

        #[test]
        fn test_checked_div() {
            let a = Ratio::from_i64(84);
            assert_eq!(a.checked_div(&Ratio::from_i64(2)).unwrap().to_i64(), Some(42));
            assert!(a.checked_div(&Ratio::zero()).is_err());
        }

        #[test]
        fn test_from_f64_exact() {
            let r = Ratio::from_f64(0.5).unwrap();
            assert_eq!(r, Ratio::new(1, 2).unwrap());
            assert!(Ratio::from_f64(f64::NAN).is_err());
        }

        #[test]
        fn test_serde_as_string() {
            let r = Ratio::new(1, 3).unwrap();
            let json = serde_json::to_string(&r).unwrap();
            assert_eq!(json, "\"1/3\"");
            let back: Ratio = serde_json::from_str(&json).unwrap();
            assert_eq!(back, r);
        }
    }

    mod magnitude_tests {
        use super::*;

        #[test]
        fn test_exact_composition() {
            // km/h relative to m/s: 1000 / 3600 = 5/18
            let km = Magnitude::integer(1000);
            let h = Magnitude::integer(3600);
            let kmh = km.checked_div(&h).unwrap();
            assert_eq!(kmh.as_ratio(), Some(&Ratio::new(5, 18).unwrap()));
        }

        #[test]
        fn test_binary_prefix_exact() {
            let mebi = Magnitude::power_of(2, 20).unwrap();
            let kilo = Magnitude::power_of(10, 3).unwrap();
            let factor = mebi.checked_div(&kilo).unwrap();
            assert_eq!(factor.as_ratio(), Some(&Ratio::new(1_048_576, 1000).unwrap()));
            assert!(!factor.is_integer());
        }

        #[test]
        fn test_pi_tracking() {
            let degree: Magnitude = "pi/180".parse().unwrap();
            assert_eq!(degree.pi(), 1);
            assert!(degree.is_exact());
            assert!(!degree.is_rational());

            // degree / radian^... : 180 degrees over pi radians is exactly one
            let half_turn = degree
                .checked_mul(&Magnitude::integer(180))
                .and_then(|m| m.checked_div(&Magnitude::one().with_pi(1)?))
                .unwrap();
            assert!(half_turn.is_one());
        }

        #[test]
        fn test_approx_contaminates() {
            let g = Magnitude::approx(9.80665).unwrap();
            let m = g.checked_mul(&Magnitude::integer(2)).unwrap();
            assert!(!m.is_exact());
            assert!((m.to_f64() - 19.6133).abs() < 1e-12);
        }

        #[test]
        fn test_common_divisor() {
            let kib = Magnitude::integer(1024);
            let kb = Magnitude::integer(1000);
            assert_eq!(kib.common_divisor(&kb), Some(Magnitude::integer(8)));

            let deg: Magnitude = "pi/180".parse().unwrap();
            assert_eq!(deg.common_divisor(&kb), None);
        }

        #[test]
        fn test_parse_forms() {
            assert_eq!("2pi".parse::<Magnitude>().unwrap(), Magnitude::integer(2).with_pi(1).unwrap());
            assert_eq!("pi^2".parse::<Magnitude>().unwrap(), Magnitude::one().with_pi(2).unwrap());
            assert_eq!("1/100".parse::<Magnitude>().unwrap(), Magnitude::ratio(1, 100).unwrap());
            assert!("~0.3048".parse::<Magnitude>().map(|m| !m.is_exact()).unwrap());
            assert!("".parse::<Magnitude>().is_err());
            assert!("pi^x".parse::<Magnitude>().is_err());
        }

        #[test]
        fn test_display_round_trip() {
            for s in ["1000", "1/100", "1/180*pi", "2*pi", "pi^-1", "~0.5"] {
                let m: Magnitude = s.parse().unwrap();
                let back: Magnitude = m.to_string().parse().unwrap();
                assert_eq!(m, back, "round trip of {}", s);
            }
        }

        #[test]
        fn test_pi_power_overflow() {
            let huge = Magnitude::one().with_pi(i32::MAX).unwrap();
            assert_eq!(huge.checked_mul(&huge), Err(RatioError::Overflow));
            assert_eq!(huge.with_pi(1), Err(RatioError::Overflow));
            let tiny = Magnitude::one().with_pi(i32::MIN).unwrap();
            assert_eq!(tiny.checked_div(&Magnitude::one().with_pi(1).unwrap()), Err(RatioError::Overflow));
        }

        #[test]
        fn test_approx_rejects_non_finite() {
            assert!(Magnitude::approx(f64::INFINITY).is_err());
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_error_construction() {
            let err = QuantaError::div_zero();
            assert_eq!(err.code, codes::DIV_ZERO);
            assert!(err.is(codes::DIV_ZERO));
        }

        #[test]
        fn test_error_with_note() {
            let err = QuantaError::dimension_mismatch("add", "L", "T")
                .with_note("while adding distances");
            assert_eq!(err.notes, vec!["while adding distances".to_string()]);
        }

        #[test]
        fn test_error_display() {
            let err = QuantaError::unknown_unit("furlong");
            let display = format!("{}", err);
            assert!(display.contains("UNKNOWN_UNIT"));
            assert!(display.contains("furlong"));
        }

        #[test]
        fn test_from_ratio_error() {
            let err: QuantaError = RatioError::Overflow.into();
            assert_eq!(err.code, codes::OVERFLOW);
        }
    }
}
