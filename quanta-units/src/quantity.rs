//! Quantity type - a value with an associated unit

use std::cmp::Ordering;
use std::fmt;

use quanta_core::{QuantaError, Ratio};
use serde::Serialize;

use crate::exponent::Exponent;
use crate::rep::Representation;
use crate::unit::check_compatible;
use crate::{DerivedDimension, Unit};

/// A value of representation `R` measured in a unit.
///
/// The dimension is always the unit's dimension. Every operation checks
/// dimensions (and reference units) first and returns an error before any
/// arithmetic happens.
///
/// There is no `==`: `1 B` and `8 b` are equal only after conversion, and a
/// metre compared with a second is an error. Use `try_eq` and `try_cmp`.
///
/// ```compile_fail
/// use quanta_units::Quantity;
///
/// let q = Quantity::dimensionless(1i64);
/// let _ = q == q.clone();
/// ```
#[derive(Debug, Clone)]
pub struct Quantity<R> {
    value: R,
    unit: Unit,
}

/// Serializable snapshot of a quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantityReport {
    pub value: String,
    pub representation: &'static str,
    pub unit: String,
    pub magnitude: String,
    pub dimension: Vec<ExponentReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExponentReport {
    pub base: String,
    pub reference_unit: String,
    pub power: i32,
}

impl<R: Representation> Quantity<R> {
    /// Create a new quantity
    pub fn new(value: R, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(value: R) -> Self {
        Quantity { value, unit: Unit::dimensionless() }
    }

    pub fn value(&self) -> &R {
        &self.value
    }

    pub fn into_value(self) -> R {
        self.value
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn dimension(&self) -> &DerivedDimension {
        self.unit.dimension()
    }

    pub fn exponents(&self) -> &[Exponent] {
        self.unit.dimension().exponents()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimension().is_dimensionless()
    }

    // ========== Conversion ==========

    /// Implicit conversion: same dimension, and only when lossless for `R`
    pub fn convert_to(&self, target: &Unit) -> Result<Self, QuantaError> {
        check_compatible("convert", &self.unit, target)?;
        let factor = self.unit.conversion_factor(target)?;
        if !R::is_lossless(&factor) {
            return Err(QuantaError::narrowing(self.unit.symbol(), target.symbol(), &factor)
                .with_note(format!("representation {}", R::NAME)));
        }
        tracing::trace!(from = self.unit.symbol(), to = target.symbol(), %factor, "convert");
        Ok(Quantity::new(self.value.rescale(&factor)?, target.clone()))
    }

    /// Explicit conversion: lossy factors truncate, and same-named base
    /// dimensions with different reference units are bridged
    pub fn cast_to(&self, target: &Unit) -> Result<Self, QuantaError> {
        let factor = self.unit.bridge_factor(target)?;
        tracing::trace!(from = self.unit.symbol(), to = target.symbol(), %factor, "cast");
        Ok(Quantity::new(self.value.rescale(&factor)?, target.clone()))
    }

    /// Change representation where `From` guarantees no loss (i32 -> i64, f32 -> f64)
    pub fn widen<T: Representation + From<R>>(self) -> Quantity<T> {
        Quantity::new(T::from(self.value), self.unit)
    }

    /// Change representation explicitly; floats truncate toward zero into integers
    pub fn cast_rep<T: Representation>(&self) -> Result<Quantity<T>, QuantaError> {
        let value = T::from_ratio(&self.value.to_ratio()?)?;
        Ok(Quantity::new(value, self.unit.clone()))
    }

    /// Convert to the coherent unit of the dimension (magnitude one)
    pub fn to_coherent(&self) -> Result<Self, QuantaError> {
        if self.unit.is_coherent() {
            return Ok(self.clone());
        }
        let symbol: Vec<String> = self
            .exponents()
            .iter()
            .map(|e| match e.power {
                1 => e.base.reference_unit().to_string(),
                p => format!("{}^{}", e.base.reference_unit(), p),
            })
            .collect();
        let coherent = Unit::coherent(&symbol.join("·"), &symbol.join(" "), self.dimension().clone());
        self.convert_to(&coherent)
    }

    // ========== Arithmetic ==========

    /// Add two quantities of one dimension; the result is in their common unit
    pub fn add(&self, other: &Self) -> Result<Self, QuantaError> {
        let (a, b) = self.in_common_unit("add", other)?;
        Ok(Quantity::new(a.value.add(&b.value)?, a.unit))
    }

    /// Subtract two quantities of one dimension; the result is in their common unit
    pub fn sub(&self, other: &Self) -> Result<Self, QuantaError> {
        let (a, b) = self.in_common_unit("subtract", other)?;
        Ok(Quantity::new(a.value.sub(&b.value)?, a.unit))
    }

    /// Multiply two quantities (dimensions are multiplied)
    pub fn mul(&self, other: &Self) -> Result<Self, QuantaError> {
        let unit = self.unit.multiply(&other.unit)?;
        Ok(Quantity::new(self.value.mul(&other.value)?, unit))
    }

    /// Divide two quantities (dimensions are divided)
    pub fn div(&self, other: &Self) -> Result<Self, QuantaError> {
        let unit = self.unit.divide(&other.unit)?;
        Ok(Quantity::new(self.value.div(&other.value)?, unit))
    }

    /// Raise quantity to an integer power
    pub fn pow(&self, n: i32) -> Result<Self, QuantaError> {
        let unit = self.unit.power(n)?;
        Ok(Quantity::new(self.value.pow(n)?, unit))
    }

    /// Multiply the value by a pure number
    pub fn scale(&self, factor: &R) -> Result<Self, QuantaError> {
        Ok(Quantity::new(self.value.mul(factor)?, self.unit.clone()))
    }

    /// Divide the value by a pure number
    pub fn div_scalar(&self, divisor: &R) -> Result<Self, QuantaError> {
        Ok(Quantity::new(self.value.div(divisor)?, self.unit.clone()))
    }

    // ========== Comparison ==========

    /// Equality after converting both sides to their common unit
    pub fn try_eq(&self, other: &Self) -> Result<bool, QuantaError> {
        let (a, b) = self.in_common_unit("compare", other)?;
        Ok(a.value == b.value)
    }

    /// Ordering after converting both sides to their common unit
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, QuantaError> {
        let (a, b) = self.in_common_unit("compare", other)?;
        a.value
            .partial_cmp(&b.value)
            .ok_or_else(|| QuantaError::not_comparable(format!("{} and {}", a, b)))
    }

    fn in_common_unit(&self, op: &str, other: &Self) -> Result<(Self, Self), QuantaError> {
        check_compatible(op, &self.unit, &other.unit)?;
        let common = Unit::common(&self.unit, &other.unit)?;
        Ok((self.convert_to(&common)?, other.convert_to(&common)?))
    }

    // ========== Reporting ==========

    /// Snapshot without a catalog name for the dimension (see `Catalog::describe`)
    pub fn report(&self) -> QuantityReport {
        QuantityReport {
            value: self.value.to_string(),
            representation: R::NAME,
            unit: self.unit.symbol().to_string(),
            magnitude: self.unit.magnitude().to_string(),
            dimension: self
                .exponents()
                .iter()
                .map(|e| ExponentReport {
                    base: e.base.name().to_string(),
                    reference_unit: e.base.reference_unit().to_string(),
                    power: e.power,
                })
                .collect(),
            dimension_name: None,
        }
    }
}

impl Quantity<Ratio> {
    /// Exact value of an integer quantity
    pub fn exact(value: i64, unit: Unit) -> Self {
        Quantity::new(Ratio::from_i64(value), unit)
    }
}

impl<R: Representation> fmt::Display for Quantity<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol().is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol())
        }
    }
}
