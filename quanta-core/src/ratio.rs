//! Exact rational numbers using dashu
//!
//! Uses dashu-ratio (RBig) so that conversion factors such as 1000 m/km or
//! 2^20 b/Mib compose without rounding. All operations return Results or new
//! Ratios - never panic.

use std::fmt;
use std::str::FromStr;

use dashu_int::{IBig, UBig};
use dashu_ratio::RBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for ratio operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatioError {
    #[error("Invalid ratio format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Overflow: result does not fit the target representation")]
    Overflow,

    #[error("Not a finite number: {0}")]
    NotFinite(f64),
}

/// Exact rational number
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ratio {
    inner: RBig,
}

impl Ratio {
    // ========== Construction ==========

    pub fn zero() -> Self {
        Self { inner: RBig::ZERO }
    }

    pub fn one() -> Self {
        Self { inner: RBig::ONE }
    }

    /// Create from i64
    pub fn from_i64(n: i64) -> Self {
        Self::from_integer(IBig::from(n))
    }

    /// Create from an arbitrary precision integer
    pub fn from_integer(n: IBig) -> Self {
        Self { inner: RBig::from(n) }
    }

    /// Create from numerator and denominator (reduced automatically)
    pub fn new(num: i64, den: i64) -> Result<Self, RatioError> {
        Self::from_parts(IBig::from(num), IBig::from(den))
    }

    /// Create from arbitrary precision numerator and denominator
    pub fn from_parts(num: IBig, den: IBig) -> Result<Self, RatioError> {
        if den == IBig::ZERO {
            return Err(RatioError::DivisionByZero);
        }
        Ok(Self { inner: RBig::from(num) / RBig::from(den) })
    }

    /// `base^exp`, exact for any integer exponent
    pub fn power_of(base: i64, exp: i32) -> Result<Self, RatioError> {
        Self::from_i64(base).pow(exp)
    }

    /// Exact value of a finite f64 (every finite double is a dyadic rational)
    pub fn from_f64(f: f64) -> Result<Self, RatioError> {
        if !f.is_finite() {
            return Err(RatioError::NotFinite(f));
        }
        RBig::try_from(f)
            .map(|inner| Self { inner })
            .map_err(|_| RatioError::NotFinite(f))
    }

    // ========== Predicates ==========

    pub fn is_zero(&self) -> bool {
        self.inner == RBig::ZERO
    }

    pub fn is_one(&self) -> bool {
        self.inner == RBig::ONE
    }

    pub fn is_negative(&self) -> bool {
        self.inner < RBig::ZERO
    }

    /// Check if the denominator is 1
    pub fn is_integer(&self) -> bool {
        self.inner.is_int()
    }

    // ========== Arithmetic ==========

    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    pub fn neg(&self) -> Self {
        Self { inner: -self.inner.clone() }
    }

    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.neg()
        } else {
            self.clone()
        }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, RatioError> {
        if other.is_zero() {
            Err(RatioError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    pub fn recip(&self) -> Result<Self, RatioError> {
        Self::one().checked_div(self)
    }

    /// Integer power (exact), square-and-multiply
    pub fn pow(&self, exp: i32) -> Result<Self, RatioError> {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut remaining = exp.unsigned_abs();

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul(&base);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul(&base);
            }
        }

        if exp < 0 {
            result.recip()
        } else {
            Ok(result)
        }
    }

    /// Greatest common divisor of the absolute values.
    ///
    /// For `a/b` and `c/d` in lowest terms this is `gcd(a, c) / lcm(b, d)`,
    /// the largest ratio dividing both by an integer.
    pub fn gcd(&self, other: &Self) -> Self {
        let num = gcd_int(self.numerator().clone(), other.numerator().clone());
        let b = IBig::from(self.denominator().clone());
        let d = IBig::from(other.denominator().clone());
        let den_gcd = gcd_int(b.clone(), d.clone());
        // denominators are positive, so the lcm is too
        let lcm = (&b * &d) / den_gcd;
        Self { inner: RBig::from(num) / RBig::from(lcm) }
    }

    // ========== Accessors & Conversion ==========

    pub fn numerator(&self) -> &IBig {
        self.inner.numerator()
    }

    pub fn denominator(&self) -> &UBig {
        self.inner.denominator()
    }

    /// Integer part, rounding toward zero
    pub fn trunc(&self) -> IBig {
        self.numerator() / IBig::from(self.denominator().clone())
    }

    /// Convert to i64 if it is an integer in range
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        i64::try_from(self.numerator().clone()).ok()
    }

    /// Nearest f64 (may lose precision)
    pub fn to_f64(&self) -> f64 {
        self.inner.to_f64().value()
    }
}

/// Euclid on absolute values; gcd(0, 0) = 0
fn gcd_int(a: IBig, b: IBig) -> IBig {
    let mut a = if a < IBig::ZERO { -a } else { a };
    let mut b = if b < IBig::ZERO { -b } else { b };
    while b != IBig::ZERO {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

impl FromStr for Ratio {
    type Err = RatioError;

    /// Supports: "42", "-7", "1/3", "0.3048"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse_err = || RatioError::ParseError(s.to_string());

        if let Some((num, den)) = s.split_once('/') {
            let num: Ratio = num.parse().map_err(|_| parse_err())?;
            let den: Ratio = den.parse().map_err(|_| parse_err())?;
            return num.checked_div(&den);
        }

        if let Some((int_part, frac_part)) = s.split_once('.') {
            if frac_part.is_empty() || !frac_part.chars().all(|c| c.is_ascii_digit()) {
                return Err(parse_err());
            }
            let negative = int_part.starts_with('-');
            let digits = format!("{}{}", int_part.trim_start_matches(['-', '+']), frac_part);
            let mut num: IBig = digits.parse().map_err(|_| parse_err())?;
            if negative {
                num = -num;
            }
            let scale = Self::power_of(10, frac_part.len() as i32)?;
            return Self::from_integer(num).checked_div(&scale);
        }

        let n: IBig = s.parse().map_err(|_| parse_err())?;
        Ok(Self::from_integer(n))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ratio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl From<i64> for Ratio {
    fn from(n: i64) -> Self {
        Self::from_i64(n)
    }
}
