//! Exponent algebra over base dimensions
//!
//! Lists handled here are canonical: sorted by the base-dimension order, one
//! entry per base dimension, no zero powers. Every function preserves that.

use std::cmp::Ordering;
use std::fmt;

use quanta_core::QuantaError;
use serde::Serialize;

use crate::BaseDimension;

/// A base dimension raised to a non-zero integer power
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Exponent {
    pub base: BaseDimension,
    pub power: i32,
}

impl Exponent {
    pub fn new(base: BaseDimension, power: i32) -> Self {
        Exponent { base, power }
    }
}

impl fmt::Display for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.power == 1 {
            write!(f, "{}", self.base)
        } else {
            write!(f, "{}^{}", self.base, self.power)
        }
    }
}

/// Group by base dimension, sum powers, drop zeros, sort
pub fn normalize(exponents: impl IntoIterator<Item = Exponent>) -> Result<Vec<Exponent>, QuantaError> {
    let mut list: Vec<Exponent> = exponents.into_iter().collect();
    list.sort_by(|a, b| a.base.cmp(&b.base));

    let mut out: Vec<Exponent> = Vec::with_capacity(list.len());
    for e in list {
        match out.last_mut() {
            Some(last) if last.base == e.base => last.power = sum(last.power, e.power)?,
            _ => out.push(e),
        }
    }
    out.retain(|e| e.power != 0);
    Ok(out)
}

/// Add exponents of matching base dimensions
pub fn multiply(a: &[Exponent], b: &[Exponent]) -> Result<Vec<Exponent>, QuantaError> {
    merge(a, b, 1)
}

/// Subtract exponents of matching base dimensions
pub fn divide(a: &[Exponent], b: &[Exponent]) -> Result<Vec<Exponent>, QuantaError> {
    merge(a, b, -1)
}

/// Multiply every power by `n`; `n == 0` gives the dimensionless list
pub fn power(a: &[Exponent], n: i32) -> Result<Vec<Exponent>, QuantaError> {
    if n == 0 {
        return Ok(Vec::new());
    }
    a.iter()
        .map(|e| Ok(Exponent::new(e.base.clone(), scaled(e.power, n)?)))
        .collect()
}

/// Divide every power by `n`; fails unless every power is a multiple of `n`
pub fn root(a: &[Exponent], n: i32) -> Result<Vec<Exponent>, QuantaError> {
    if n <= 0 {
        return Err(QuantaError::invalid_exponent(format!("root index must be positive, got {}", n)));
    }
    a.iter()
        .map(|e| {
            if e.power % n == 0 {
                Ok(Exponent::new(e.base.clone(), e.power / n))
            } else {
                Err(QuantaError::invalid_exponent(format!(
                    "{} has no integral root of index {}", e, n
                )))
            }
        })
        .collect()
}

/// Merge two canonical lists, scaling powers of `b` by `sign`
fn merge(a: &[Exponent], b: &[Exponent], sign: i32) -> Result<Vec<Exponent>, QuantaError> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].base.cmp(&b[j].base) {
            Ordering::Less => {
                out.push(a[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                out.push(Exponent::new(b[j].base.clone(), scaled(b[j].power, sign)?));
                j += 1;
            }
            Ordering::Equal => {
                let p = sum(a[i].power, scaled(b[j].power, sign)?)?;
                if p != 0 {
                    out.push(Exponent::new(a[i].base.clone(), p));
                }
                i += 1;
                j += 1;
            }
        }
    }

    out.extend(a[i..].iter().cloned());
    for e in &b[j..] {
        out.push(Exponent::new(e.base.clone(), scaled(e.power, sign)?));
    }
    Ok(out)
}

fn sum(a: i32, b: i32) -> Result<i32, QuantaError> {
    a.checked_add(b)
        .ok_or_else(|| QuantaError::overflow(format!("exponent {} + {}", a, b)))
}

fn scaled(power: i32, n: i32) -> Result<i32, QuantaError> {
    power
        .checked_mul(n)
        .ok_or_else(|| QuantaError::overflow(format!("exponent {} * {}", power, n)))
}
