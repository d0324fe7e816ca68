//! Numeric representations a quantity can store its value in
//!
//! The representation decides which conversions are lossless and so may
//! happen implicitly: integers accept only exact integer factors, exact
//! rationals accept any exact rational factor, and floating point accepts
//! anything. Arithmetic never wraps; overflow is an error.

use std::fmt;

use quanta_core::{codes, Magnitude, QuantaError, Ratio};

/// Family of a representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepKind {
    Integer,
    Floating,
    Exact,
}

/// A numeric type usable as a quantity value
pub trait Representation: Clone + fmt::Debug + fmt::Display + PartialEq + PartialOrd + Send + Sync + 'static {
    const KIND: RepKind;
    const NAME: &'static str;

    fn add(&self, other: &Self) -> Result<Self, QuantaError>;
    fn sub(&self, other: &Self) -> Result<Self, QuantaError>;
    fn mul(&self, other: &Self) -> Result<Self, QuantaError>;
    fn div(&self, other: &Self) -> Result<Self, QuantaError>;
    fn pow(&self, n: i32) -> Result<Self, QuantaError>;

    fn to_f64(&self) -> f64;
    fn to_ratio(&self) -> Result<Ratio, QuantaError>;

    /// Nearest value; integers truncate toward zero
    fn from_ratio(r: &Ratio) -> Result<Self, QuantaError>;
    /// Nearest value; integers truncate toward zero
    fn from_f64(v: f64) -> Result<Self, QuantaError>;

    /// Whether multiplying by `factor` can never lose information
    fn is_lossless(factor: &Magnitude) -> bool {
        match Self::KIND {
            RepKind::Integer => factor.is_integer(),
            RepKind::Floating => true,
            RepKind::Exact => factor.is_rational(),
        }
    }

    /// Multiply by a conversion factor, exactly when the factor is rational
    fn rescale(&self, factor: &Magnitude) -> Result<Self, QuantaError> {
        match factor.as_ratio() {
            Some(r) if r.is_one() => Ok(self.clone()),
            Some(r) => Self::from_ratio(&self.to_ratio()?.mul(r)),
            None => Self::from_f64(self.to_f64() * factor.to_f64()),
        }
    }
}

macro_rules! integer_representation {
    ($t:ty, $name:literal) => {
        impl Representation for $t {
            const KIND: RepKind = RepKind::Integer;
            const NAME: &'static str = $name;

            fn add(&self, other: &Self) -> Result<Self, QuantaError> {
                self.checked_add(*other)
                    .ok_or_else(|| QuantaError::overflow(format!("{} + {} in {}", self, other, $name)))
            }

            fn sub(&self, other: &Self) -> Result<Self, QuantaError> {
                self.checked_sub(*other)
                    .ok_or_else(|| QuantaError::overflow(format!("{} - {} in {}", self, other, $name)))
            }

            fn mul(&self, other: &Self) -> Result<Self, QuantaError> {
                self.checked_mul(*other)
                    .ok_or_else(|| QuantaError::overflow(format!("{} * {} in {}", self, other, $name)))
            }

            fn div(&self, other: &Self) -> Result<Self, QuantaError> {
                if *other == 0 {
                    return Err(QuantaError::div_zero());
                }
                match self.checked_rem(*other) {
                    Some(0) => self
                        .checked_div(*other)
                        .ok_or_else(|| QuantaError::overflow(format!("{} / {} in {}", self, other, $name))),
                    Some(_) => Err(inexact(format!("{} / {}", self, other), $name)),
                    None => Err(QuantaError::overflow(format!("{} / {} in {}", self, other, $name))),
                }
            }

            fn pow(&self, n: i32) -> Result<Self, QuantaError> {
                if n >= 0 {
                    return self
                        .checked_pow(n.unsigned_abs())
                        .ok_or_else(|| QuantaError::overflow(format!("{}^{} in {}", self, n, $name)));
                }
                let r = self.to_ratio()?.pow(n)?;
                if !r.is_integer() {
                    return Err(inexact(format!("{}^{}", self, n), $name));
                }
                Self::from_ratio(&r)
            }

            fn to_f64(&self) -> f64 {
                *self as f64
            }

            fn to_ratio(&self) -> Result<Ratio, QuantaError> {
                Ok(Ratio::from_i64(i64::from(*self)))
            }

            fn from_ratio(r: &Ratio) -> Result<Self, QuantaError> {
                let t = r.trunc();
                <$t>::try_from(t.clone()).map_err(|_| QuantaError::overflow(format!("{} does not fit {}", t, $name)))
            }

            fn from_f64(v: f64) -> Result<Self, QuantaError> {
                let t = v.trunc();
                // MIN is a power of two, so both bounds are exact in f64
                if !t.is_finite() || t < <$t>::MIN as f64 || t >= -(<$t>::MIN as f64) {
                    return Err(QuantaError::overflow(format!("{} does not fit {}", v, $name)));
                }
                Ok(t as $t)
            }
        }
    };
}

macro_rules! float_representation {
    ($t:ty, $name:literal) => {
        impl Representation for $t {
            const KIND: RepKind = RepKind::Floating;
            const NAME: &'static str = $name;

            fn add(&self, other: &Self) -> Result<Self, QuantaError> {
                finite(self + other, $name)
            }

            fn sub(&self, other: &Self) -> Result<Self, QuantaError> {
                finite(self - other, $name)
            }

            fn mul(&self, other: &Self) -> Result<Self, QuantaError> {
                finite(self * other, $name)
            }

            fn div(&self, other: &Self) -> Result<Self, QuantaError> {
                if *other == 0.0 {
                    return Err(QuantaError::div_zero());
                }
                finite(self / other, $name)
            }

            fn pow(&self, n: i32) -> Result<Self, QuantaError> {
                if *self == 0.0 && n < 0 {
                    return Err(QuantaError::div_zero());
                }
                finite(self.powi(n), $name)
            }

            fn to_f64(&self) -> f64 {
                f64::from(*self)
            }

            fn to_ratio(&self) -> Result<Ratio, QuantaError> {
                Ok(Ratio::from_f64(f64::from(*self))?)
            }

            fn from_ratio(r: &Ratio) -> Result<Self, QuantaError> {
                finite(r.to_f64() as $t, $name)
            }

            fn from_f64(v: f64) -> Result<Self, QuantaError> {
                finite(v as $t, $name)
            }
        }
    };
}

integer_representation!(i32, "i32");
integer_representation!(i64, "i64");
float_representation!(f32, "f32");
float_representation!(f64, "f64");

impl Representation for Ratio {
    const KIND: RepKind = RepKind::Exact;
    const NAME: &'static str = "ratio";

    fn add(&self, other: &Self) -> Result<Self, QuantaError> {
        Ok(Ratio::add(self, other))
    }

    fn sub(&self, other: &Self) -> Result<Self, QuantaError> {
        Ok(Ratio::sub(self, other))
    }

    fn mul(&self, other: &Self) -> Result<Self, QuantaError> {
        Ok(Ratio::mul(self, other))
    }

    fn div(&self, other: &Self) -> Result<Self, QuantaError> {
        Ok(self.checked_div(other)?)
    }

    fn pow(&self, n: i32) -> Result<Self, QuantaError> {
        Ok(Ratio::pow(self, n)?)
    }

    fn to_f64(&self) -> f64 {
        Ratio::to_f64(self)
    }

    fn to_ratio(&self) -> Result<Ratio, QuantaError> {
        Ok(self.clone())
    }

    fn from_ratio(r: &Ratio) -> Result<Self, QuantaError> {
        Ok(r.clone())
    }

    fn from_f64(v: f64) -> Result<Self, QuantaError> {
        Ok(Ratio::from_f64(v)?)
    }
}

fn finite<T: Into<f64> + Copy>(v: T, name: &str) -> Result<T, QuantaError> {
    if v.into().is_finite() {
        Ok(v)
    } else {
        Err(QuantaError::overflow(format!("result is not a finite {}", name)))
    }
}

fn inexact(expr: String, name: &str) -> QuantaError {
    QuantaError::new(codes::NARROWING, format!("{} has no exact {} result", expr, name))
        .with_suggestion("Use a floating or exact representation")
}
