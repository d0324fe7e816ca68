//! Derived dimensions
//!
//! A derived dimension is a canonical exponent list over base dimensions.
//! Canonical form is unique, so dimension equality is plain list equality
//! no matter which composition path produced the dimension. Names such as
//! "speed" live in the `Catalog` and never take part in equality.

use std::fmt;

use quanta_core::{Magnitude, QuantaError};
use serde::Serialize;

use crate::exponent::{self, Exponent};
use crate::BaseDimension;

/// Product of base dimensions raised to integer powers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct DerivedDimension {
    exponents: Vec<Exponent>,
}

impl DerivedDimension {
    /// The dimension of pure numbers
    pub fn dimensionless() -> Self {
        DerivedDimension { exponents: Vec::new() }
    }

    /// A base dimension viewed as a derived dimension (one exponent of power 1)
    pub fn base(base: &BaseDimension) -> Self {
        DerivedDimension { exponents: vec![Exponent::new(base.clone(), 1)] }
    }

    /// Compose from (base, power) pairs in any order
    pub fn compose(exponents: impl IntoIterator<Item = (BaseDimension, i32)>) -> Result<Self, QuantaError> {
        Self::from_exponents(exponents.into_iter().map(|(b, p)| Exponent::new(b, p)))
    }

    pub fn from_exponents(exponents: impl IntoIterator<Item = Exponent>) -> Result<Self, QuantaError> {
        Ok(DerivedDimension { exponents: exponent::normalize(exponents)? })
    }

    pub fn exponents(&self) -> &[Exponent] {
        &self.exponents
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.is_empty()
    }

    /// The base dimension, if this is exactly one base dimension to the first power
    pub fn as_base(&self) -> Option<&BaseDimension> {
        match self.exponents.as_slice() {
            [e] if e.power == 1 => Some(&e.base),
            _ => None,
        }
    }

    /// Power of `base` in this dimension (0 if absent)
    pub fn power_of(&self, base: &BaseDimension) -> i32 {
        self.exponents
            .iter()
            .find(|e| &e.base == base)
            .map_or(0, |e| e.power)
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &DerivedDimension) -> Result<DerivedDimension, QuantaError> {
        Ok(DerivedDimension { exponents: exponent::multiply(&self.exponents, &other.exponents)? })
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &DerivedDimension) -> Result<DerivedDimension, QuantaError> {
        Ok(DerivedDimension { exponents: exponent::divide(&self.exponents, &other.exponents)? })
    }

    /// Raise to integer power (multiply exponents)
    pub fn power(&self, n: i32) -> Result<DerivedDimension, QuantaError> {
        Ok(DerivedDimension { exponents: exponent::power(&self.exponents, n)? })
    }

    /// Invert dimensions (negate exponents)
    pub fn invert(&self) -> Result<DerivedDimension, QuantaError> {
        Self::dimensionless().divide(self)
    }

    /// Integral root; fails if any exponent is not a multiple of `n`
    pub fn root(&self, n: i32) -> Result<DerivedDimension, QuantaError> {
        Ok(DerivedDimension { exponents: exponent::root(&self.exponents, n)? })
    }

    /// Same names and powers, but at least one differing reference unit.
    ///
    /// Such dimensions describe the same physical quantity in different unit
    /// systems; only an explicit cast may convert between them.
    pub fn is_bridgeable(&self, other: &DerivedDimension) -> bool {
        self != other
            && self.exponents.len() == other.exponents.len()
            && self
                .exponents
                .iter()
                .zip(&other.exponents)
                .all(|(a, b)| a.base.shares_name(&b.base) && a.power == b.power)
    }

    /// Coherent unit of this dimension in the canonical units of each base name
    pub fn reference_magnitude(&self) -> Result<Magnitude, QuantaError> {
        self.exponents.iter().try_fold(Magnitude::one(), |acc, e| {
            Ok(acc.checked_mul(&e.base.reference_magnitude().pow(e.power)?)?)
        })
    }
}

impl fmt::Display for DerivedDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponents.is_empty() {
            return write!(f, "1");
        }
        let parts: Vec<String> = self.exponents.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}

impl From<&BaseDimension> for DerivedDimension {
    fn from(base: &BaseDimension) -> Self {
        Self::base(base)
    }
}
