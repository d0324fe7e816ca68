//! Unit magnitudes: the ratio of a unit to its coherent reference unit
//!
//! A magnitude is a coefficient times an integer power of π. The coefficient
//! is an exact `Ratio` whenever the relationship is known exactly, and an
//! approximate real only when it is not (for example a measured constant).
//! Angle units keep their π multiplicity exact: a degree is `1/180 * pi`.

use std::cmp::Ordering;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Ratio, RatioError};

/// Coefficient part of a magnitude
#[derive(Debug, Clone, PartialEq)]
pub enum Coefficient {
    Exact(Ratio),
    Approx(f64),
}

impl Coefficient {
    pub fn to_f64(&self) -> f64 {
        match self {
            Coefficient::Exact(r) => r.to_f64(),
            Coefficient::Approx(f) => *f,
        }
    }
}

/// Conversion magnitude `coefficient * π^pi`
#[derive(Debug, Clone, PartialEq)]
pub struct Magnitude {
    coefficient: Coefficient,
    pi: i32,
}

impl Magnitude {
    // ========== Construction ==========

    pub fn one() -> Self {
        Self::exact(Ratio::one())
    }

    pub fn exact(ratio: Ratio) -> Self {
        Magnitude { coefficient: Coefficient::Exact(ratio), pi: 0 }
    }

    pub fn integer(n: i64) -> Self {
        Self::exact(Ratio::from_i64(n))
    }

    /// Exact `num/den`
    pub fn ratio(num: i64, den: i64) -> Result<Self, RatioError> {
        Ok(Self::exact(Ratio::new(num, den)?))
    }

    /// `base^exp`, e.g. `power_of(2, 10)` for kibi
    pub fn power_of(base: i64, exp: i32) -> Result<Self, RatioError> {
        Ok(Self::exact(Ratio::power_of(base, exp)?))
    }

    /// Approximate real coefficient; must be finite
    pub fn approx(value: f64) -> Result<Self, RatioError> {
        if !value.is_finite() {
            return Err(RatioError::NotFinite(value));
        }
        Ok(Magnitude { coefficient: Coefficient::Approx(value), pi: 0 })
    }

    /// Multiply by `π^k`
    pub fn with_pi(mut self, k: i32) -> Result<Self, RatioError> {
        self.pi = self.pi.checked_add(k).ok_or(RatioError::Overflow)?;
        Ok(self)
    }

    // ========== Accessors & Predicates ==========

    pub fn coefficient(&self) -> &Coefficient {
        &self.coefficient
    }

    pub fn pi(&self) -> i32 {
        self.pi
    }

    /// The exact rational value, if there is one (exact coefficient, no π)
    pub fn as_ratio(&self) -> Option<&Ratio> {
        match &self.coefficient {
            Coefficient::Exact(r) if self.pi == 0 => Some(r),
            _ => None,
        }
    }

    pub fn is_rational(&self) -> bool {
        self.as_ratio().is_some()
    }

    pub fn is_integer(&self) -> bool {
        self.as_ratio().is_some_and(Ratio::is_integer)
    }

    pub fn is_exact(&self) -> bool {
        matches!(self.coefficient, Coefficient::Exact(_))
    }

    pub fn is_one(&self) -> bool {
        self.as_ratio().is_some_and(Ratio::is_one)
    }

    pub fn is_zero(&self) -> bool {
        match &self.coefficient {
            Coefficient::Exact(r) => r.is_zero(),
            Coefficient::Approx(f) => *f == 0.0,
        }
    }

    // ========== Arithmetic ==========

    pub fn checked_mul(&self, other: &Self) -> Result<Self, RatioError> {
        let pi = self.pi.checked_add(other.pi).ok_or(RatioError::Overflow)?;
        let coefficient = match (&self.coefficient, &other.coefficient) {
            (Coefficient::Exact(a), Coefficient::Exact(b)) => Coefficient::Exact(a.mul(b)),
            (a, b) => Coefficient::Approx(a.to_f64() * b.to_f64()),
        };
        Ok(Magnitude { coefficient, pi })
    }

    pub fn checked_div(&self, other: &Self) -> Result<Self, RatioError> {
        if other.is_zero() {
            return Err(RatioError::DivisionByZero);
        }
        let pi = self.pi.checked_sub(other.pi).ok_or(RatioError::Overflow)?;
        let coefficient = match (&self.coefficient, &other.coefficient) {
            (Coefficient::Exact(a), Coefficient::Exact(b)) => Coefficient::Exact(a.checked_div(b)?),
            (a, b) => Coefficient::Approx(a.to_f64() / b.to_f64()),
        };
        Ok(Magnitude { coefficient, pi })
    }

    pub fn recip(&self) -> Result<Self, RatioError> {
        Self::one().checked_div(self)
    }

    pub fn pow(&self, exp: i32) -> Result<Self, RatioError> {
        let pi = self.pi.checked_mul(exp).ok_or(RatioError::Overflow)?;
        let coefficient = match &self.coefficient {
            Coefficient::Exact(r) => Coefficient::Exact(r.pow(exp)?),
            Coefficient::Approx(f) => {
                let v = f.powi(exp);
                if !v.is_finite() {
                    return Err(RatioError::Overflow);
                }
                Coefficient::Approx(v)
            }
        };
        Ok(Magnitude { coefficient, pi })
    }

    /// Approximate value as f64
    pub fn to_f64(&self) -> f64 {
        self.coefficient.to_f64() * PI.powi(self.pi)
    }

    /// Order by value; exact when both share a π power and are exact
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        match (&self.coefficient, &other.coefficient) {
            (Coefficient::Exact(a), Coefficient::Exact(b)) if self.pi == other.pi => a.cmp(b),
            _ => self.to_f64().total_cmp(&other.to_f64()),
        }
    }

    /// Largest magnitude both `self` and `other` are integer multiples of,
    /// when such a thing exists exactly (exact coefficients, same π power).
    pub fn common_divisor(&self, other: &Self) -> Option<Self> {
        match (&self.coefficient, &other.coefficient) {
            (Coefficient::Exact(a), Coefficient::Exact(b)) if self.pi == other.pi => {
                let gcd = a.gcd(b);
                if gcd.is_zero() {
                    None
                } else {
                    Some(Magnitude { coefficient: Coefficient::Exact(gcd), pi: self.pi })
                }
            }
            _ => None,
        }
    }
}

/// Parse a single factor: a number, `pi`, `pi^k`, `2pi`, `pi/180`
fn parse_factor(part: &str, approx: bool) -> Result<Magnitude, RatioError> {
    let part = part.trim();
    let parse_err = || RatioError::ParseError(part.to_string());

    let pi_at = part.find("pi").map(|i| (i, 2)).or_else(|| part.find('π').map(|i| (i, 'π'.len_utf8())));
    let Some((idx, len)) = pi_at else {
        return parse_number(part, approx);
    };

    let (prefix, rest) = (&part[..idx], &part[idx + len..]);
    let mut magnitude = if prefix.is_empty() {
        Magnitude::one()
    } else {
        parse_number(prefix, approx)?
    };

    let (power_str, den_str) = match rest.split_once('/') {
        Some((p, d)) => (p, Some(d)),
        None => (rest, None),
    };
    let k = match power_str.strip_prefix('^') {
        Some(k) => k.trim().parse::<i32>().map_err(|_| parse_err())?,
        None if power_str.trim().is_empty() => 1,
        None => return Err(parse_err()),
    };
    magnitude = magnitude.with_pi(k)?;

    if let Some(den) = den_str {
        let den = parse_number(den, approx)?;
        magnitude = magnitude.checked_div(&den)?;
    }
    Ok(magnitude)
}

fn parse_number(s: &str, approx: bool) -> Result<Magnitude, RatioError> {
    if approx {
        let v: f64 = s.trim().parse().map_err(|_| RatioError::ParseError(s.to_string()))?;
        Magnitude::approx(v)
    } else {
        Ok(Magnitude::exact(s.parse()?))
    }
}

impl FromStr for Magnitude {
    type Err = RatioError;

    /// Supports: "1000", "1/100", "0.3048", "pi", "2pi", "pi/180",
    /// "1/180*pi", "pi^2", and "~9.80665" for approximate values
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (approx, body) = match s.strip_prefix('~') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if body.is_empty() {
            return Err(RatioError::ParseError(s.to_string()));
        }

        let mut result = Magnitude::one();
        for part in body.split('*') {
            result = result.checked_mul(&parse_factor(part, approx)?)?;
        }
        Ok(result)
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coefficient = match &self.coefficient {
            Coefficient::Exact(r) => r.to_string(),
            Coefficient::Approx(v) => format!("~{}", v),
        };
        match self.pi {
            0 => write!(f, "{}", coefficient),
            1 => write!(f, "{}*pi", coefficient),
            k => write!(f, "{}*pi^{}", coefficient, k),
        }
    }
}

impl Default for Magnitude {
    fn default() -> Self {
        Self::one()
    }
}

impl Serialize for Magnitude {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Magnitude {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl From<Ratio> for Magnitude {
    fn from(r: Ratio) -> Self {
        Self::exact(r)
    }
}
