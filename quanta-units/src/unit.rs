//! Unit representation with conversion magnitudes

use std::fmt;
use std::sync::Arc;

use quanta_core::{Magnitude, QuantaError};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::{DerivedDimension, Prefix};

/// How a unit was declared
#[derive(Debug, Clone, PartialEq)]
pub enum UnitKind {
    /// Magnitude one: the reference unit of its dimension
    Coherent,
    /// Reference unit times an explicit factor (byte = 8 bit, degree = π/180 rad)
    Scaled { reference: Unit },
    /// Prefix applied to a reference unit (kilobit, mebibyte)
    Prefixed { prefix: Prefix, reference: Unit },
    /// Built for a derived dimension from one unit per base dimension
    Deduced { constituents: Vec<Unit> },
    /// Product, quotient or power produced by quantity arithmetic
    Composed,
    /// Common unit synthesized to add or compare two units exactly
    Common,
}

#[derive(Debug)]
struct UnitInner {
    symbol: String,
    name: String,
    dimension: DerivedDimension,
    magnitude: Magnitude,
    kind: UnitKind,
}

/// A unit of measure: the dimension it measures and its magnitude relative
/// to that dimension's coherent unit
#[derive(Debug, Clone)]
pub struct Unit(Arc<UnitInner>);

impl Unit {
    fn build(symbol: &str, name: &str, dimension: DerivedDimension, magnitude: Magnitude, kind: UnitKind) -> Self {
        Unit(Arc::new(UnitInner {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            magnitude,
            kind,
        }))
    }

    /// The coherent (magnitude one) unit of a dimension
    pub fn coherent(symbol: &str, name: &str, dimension: DerivedDimension) -> Self {
        Self::build(symbol, name, dimension, Magnitude::one(), UnitKind::Coherent)
    }

    /// Unit of pure numbers
    pub fn dimensionless() -> Self {
        Self::coherent("", "one", DerivedDimension::dimensionless())
    }

    /// `factor` times `reference`, measuring the same dimension
    pub fn scaled(symbol: &str, name: &str, reference: &Unit, factor: Magnitude) -> Result<Self, QuantaError> {
        Ok(Self::build(
            symbol,
            name,
            reference.dimension().clone(),
            reference.magnitude().checked_mul(&factor)?,
            UnitKind::Scaled { reference: reference.clone() },
        ))
    }

    /// `prefix` applied to `reference` (symbol and name are concatenated)
    pub fn prefixed(prefix: Prefix, reference: &Unit) -> Result<Self, QuantaError> {
        if reference.prefix().is_some() {
            return Err(QuantaError::invalid_declaration(format!(
                "cannot prefix already prefixed unit {}", reference.symbol()
            )));
        }
        Ok(Self::build(
            &format!("{}{}", prefix.symbol, reference.symbol()),
            &format!("{}{}", prefix.name, reference.name()),
            reference.dimension().clone(),
            reference.magnitude().checked_mul(&prefix.magnitude()?)?,
            UnitKind::Prefixed { prefix, reference: reference.clone() },
        ))
    }

    /// Unit for a derived dimension from one constituent per base dimension.
    ///
    /// Each constituent must measure exactly one base dimension of
    /// `dimension`; the magnitude is the product of the constituents'
    /// magnitudes raised to the matching exponents, exact when they all are.
    pub fn deduced(
        symbol: &str,
        name: &str,
        dimension: &DerivedDimension,
        constituents: &[&Unit],
    ) -> Result<Self, QuantaError> {
        if constituents.len() != dimension.exponents().len() {
            return Err(QuantaError::invalid_declaration(format!(
                "{} needs {} constituent units for {}, got {}",
                symbol, dimension.exponents().len(), dimension, constituents.len()
            )));
        }

        let mut magnitude = Magnitude::one();
        for e in dimension.exponents() {
            let matching: Vec<&&Unit> = constituents
                .iter()
                .filter(|u| u.dimension().as_base() == Some(&e.base))
                .collect();
            let [unit] = matching.as_slice() else {
                return Err(QuantaError::invalid_declaration(format!(
                    "{} needs exactly one constituent unit measuring {}", symbol, e.base
                )));
            };
            magnitude = magnitude.checked_mul(&unit.magnitude().pow(e.power)?)?;
        }

        Ok(Self::build(
            symbol,
            name,
            dimension.clone(),
            magnitude,
            UnitKind::Deduced { constituents: constituents.iter().map(|u| (*u).clone()).collect() },
        ))
    }

    // ========== Accessors ==========

    pub fn symbol(&self) -> &str {
        &self.0.symbol
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn dimension(&self) -> &DerivedDimension {
        &self.0.dimension
    }

    /// Ratio to the coherent unit of the dimension
    pub fn magnitude(&self) -> &Magnitude {
        &self.0.magnitude
    }

    pub fn kind(&self) -> &UnitKind {
        &self.0.kind
    }

    pub fn prefix(&self) -> Option<Prefix> {
        match self.kind() {
            UnitKind::Prefixed { prefix, .. } => Some(*prefix),
            _ => None,
        }
    }

    pub fn is_coherent(&self) -> bool {
        self.magnitude().is_one()
    }

    pub fn measures(&self, dimension: &DerivedDimension) -> bool {
        self.dimension() == dimension
    }

    /// Check if two units measure the same dimension (can be converted implicitly)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension() == other.dimension()
    }

    // ========== Conversion factors ==========

    /// Factor `f` such that `x self == x * f target`
    pub fn conversion_factor(&self, target: &Unit) -> Result<Magnitude, QuantaError> {
        if !self.is_compatible(target) {
            return Err(mismatch("convert", self, target));
        }
        Ok(self.magnitude().checked_div(target.magnitude())?)
    }

    /// Like `conversion_factor`, but also bridges dimensions that differ only
    /// in the reference units of same-named base dimensions
    pub fn bridge_factor(&self, target: &Unit) -> Result<Magnitude, QuantaError> {
        if self.is_compatible(target) {
            return self.conversion_factor(target);
        }
        if !self.dimension().is_bridgeable(target.dimension()) {
            return Err(mismatch("cast", self, target));
        }
        let from = self.magnitude().checked_mul(&self.dimension().reference_magnitude()?)?;
        let to = target.magnitude().checked_mul(&target.dimension().reference_magnitude()?)?;
        Ok(from.checked_div(&to)?)
    }

    // ========== Composition ==========

    /// Multiply two units (e.g., m * m -> m^2)
    pub fn multiply(&self, other: &Unit) -> Result<Unit, QuantaError> {
        Ok(Self::build(
            &format!("{}·{}", self.symbol(), other.symbol()),
            &format!("{} {}", self.name(), other.name()),
            self.dimension().multiply(other.dimension())?,
            self.magnitude().checked_mul(other.magnitude())?,
            UnitKind::Composed,
        ))
    }

    /// Divide two units (e.g., m / s -> m/s)
    pub fn divide(&self, other: &Unit) -> Result<Unit, QuantaError> {
        Ok(Self::build(
            &format!("{}/{}", self.symbol(), other.symbol()),
            &format!("{} per {}", self.name(), other.name()),
            self.dimension().divide(other.dimension())?,
            self.magnitude().checked_div(other.magnitude())?,
            UnitKind::Composed,
        ))
    }

    /// Raise unit to a power (e.g., m^2, m^3)
    pub fn power(&self, exp: i32) -> Result<Unit, QuantaError> {
        if exp == 1 {
            return Ok(self.clone());
        }
        Ok(Self::build(
            &format!("{}^{}", self.symbol(), exp),
            &format!("{} to the {}", self.name(), exp),
            self.dimension().power(exp)?,
            self.magnitude().pow(exp)?,
            UnitKind::Composed,
        ))
    }

    /// Get the inverse unit (e.g., s -> 1/s)
    pub fn inverse(&self) -> Result<Unit, QuantaError> {
        Ok(Self::build(
            &format!("1/{}", self.symbol()),
            &format!("inverse {}", self.name()),
            self.dimension().invert()?,
            self.magnitude().recip()?,
            UnitKind::Composed,
        ))
    }

    /// Unit both operands are converted to before adding or comparing.
    ///
    /// If one magnitude is an integer multiple of the other the finer unit
    /// wins (the left one when equal). Otherwise exact magnitudes with the
    /// same π power meet at their rational gcd, so integer values stay exact
    /// (Kib and kb meet at 8 b). Anything else falls back to the smaller unit.
    pub fn common(a: &Unit, b: &Unit) -> Result<Unit, QuantaError> {
        if !a.is_compatible(b) {
            return Err(mismatch("common unit", a, b));
        }
        if a == b {
            return Ok(a.clone());
        }

        let a_over_b = a.magnitude().checked_div(b.magnitude())?;
        if a_over_b.is_one() {
            return Ok(a.clone());
        }
        if a_over_b.is_integer() {
            return Ok(b.clone());
        }
        if b.magnitude().checked_div(a.magnitude())?.is_integer() {
            return Ok(a.clone());
        }

        if let Some(magnitude) = a.magnitude().common_divisor(b.magnitude()) {
            tracing::trace!(a = a.symbol(), b = b.symbol(), %magnitude, "synthesized common unit");
            return Ok(Self::build(
                &format!("common({}, {})", a.symbol(), b.symbol()),
                &format!("common unit of {} and {}", a.name(), b.name()),
                a.dimension().clone(),
                magnitude,
                UnitKind::Common,
            ));
        }

        if b.magnitude().cmp_value(a.magnitude()).is_lt() {
            Ok(b.clone())
        } else {
            Ok(a.clone())
        }
    }
}

/// Fail with the appropriate mismatch error unless `a` and `b` share a dimension
pub(crate) fn check_compatible(op: &str, a: &Unit, b: &Unit) -> Result<(), QuantaError> {
    if a.is_compatible(b) {
        Ok(())
    } else {
        Err(mismatch(op, a, b))
    }
}

fn mismatch(op: &str, a: &Unit, b: &Unit) -> QuantaError {
    if a.dimension().is_bridgeable(b.dimension()) {
        QuantaError::reference_mismatch(op, a, b)
    } else {
        QuantaError::dimension_mismatch(op, a.dimension(), b.dimension())
            .with_note(format!("{} vs {}", a.symbol(), b.symbol()))
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.symbol() == other.symbol()
                && self.dimension() == other.dimension()
                && self.magnitude() == other.magnitude())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Unit", 4)?;
        s.serialize_field("symbol", self.symbol())?;
        s.serialize_field("name", self.name())?;
        s.serialize_field("dimension", self.dimension())?;
        s.serialize_field("magnitude", self.magnitude())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix::{KIBI, KILO, MEBI};
    use crate::BaseDimension;
    use quanta_core::codes;

    fn length() -> BaseDimension {
        BaseDimension::new("L", "m")
    }

    fn time() -> BaseDimension {
        BaseDimension::new("T", "s")
    }

    fn metre() -> Unit {
        Unit::coherent("m", "metre", DerivedDimension::base(&length()))
    }

    fn kilometre() -> Unit {
        Unit::prefixed(KILO, &metre()).unwrap()
    }

    fn second() -> Unit {
        Unit::coherent("s", "second", DerivedDimension::base(&time()))
    }

    fn hour() -> Unit {
        Unit::scaled("h", "hour", &second(), Magnitude::integer(3600)).unwrap()
    }

    fn bit() -> Unit {
        Unit::coherent("b", "bit", DerivedDimension::base(&BaseDimension::new("information", "b")))
    }

    #[test]
    fn test_coherent_unit() {
        assert!(metre().is_coherent());
        assert!(!kilometre().is_coherent());
    }

    #[test]
    fn test_prefixed_unit() {
        let km = kilometre();
        assert_eq!(km.symbol(), "km");
        assert_eq!(km.name(), "kilometre");
        assert_eq!(km.prefix(), Some(KILO));
        assert_eq!(km.magnitude(), &Magnitude::integer(1000));
        assert!(Unit::prefixed(KILO, &km).is_err());
    }

    #[test]
    fn test_compatible_units() {
        assert!(metre().is_compatible(&kilometre()));
        assert!(!metre().is_compatible(&second()));
    }

    #[test]
    fn test_conversion_factor() {
        let f = kilometre().conversion_factor(&metre()).unwrap();
        assert_eq!(f, Magnitude::integer(1000));
        let err = metre().conversion_factor(&second()).unwrap_err();
        assert_eq!(err.code, codes::DIMENSION_MISMATCH);
    }

    #[test]
    fn test_deduced_unit() {
        let speed = DerivedDimension::compose([(length(), 1), (time(), -1)]).unwrap();
        let kmh = Unit::deduced("km/h", "kilometre per hour", &speed, &[&kilometre(), &hour()]).unwrap();
        assert_eq!(kmh.magnitude(), &Magnitude::ratio(5, 18).unwrap());
        assert!(kmh.magnitude().is_rational());

        // order of constituents does not matter
        let again = Unit::deduced("km/h", "kilometre per hour", &speed, &[&hour(), &kilometre()]).unwrap();
        assert_eq!(kmh, again);
    }

    #[test]
    fn test_deduced_unit_rejects_bad_constituents() {
        let speed = DerivedDimension::compose([(length(), 1), (time(), -1)]).unwrap();
        assert!(Unit::deduced("x", "x", &speed, &[&kilometre()]).is_err());
        assert!(Unit::deduced("x", "x", &speed, &[&kilometre(), &metre()]).is_err());
    }

    #[test]
    fn test_unit_power() {
        let m2 = metre().power(2).unwrap();
        assert_eq!(m2.symbol(), "m^2");
        assert_eq!(m2.dimension(), &DerivedDimension::compose([(length(), 2)]).unwrap());
        let km2 = kilometre().power(2).unwrap();
        assert_eq!(km2.magnitude(), &Magnitude::integer(1_000_000));
    }

    #[test]
    fn test_unit_multiply_divide() {
        let m2 = metre().multiply(&metre()).unwrap();
        assert_eq!(m2.dimension(), &DerivedDimension::compose([(length(), 2)]).unwrap());

        let velocity = kilometre().divide(&hour()).unwrap();
        assert_eq!(velocity.dimension(), &DerivedDimension::compose([(length(), 1), (time(), -1)]).unwrap());
        assert_eq!(velocity.magnitude(), &Magnitude::ratio(5, 18).unwrap());

        let hz = second().inverse().unwrap();
        assert_eq!(hz.dimension(), &DerivedDimension::compose([(time(), -1)]).unwrap());
    }

    #[test]
    fn test_composition_overflow_is_an_error() {
        let huge = metre().power(1 << 30).unwrap();
        assert_eq!(huge.multiply(&huge).unwrap_err().code, codes::OVERFLOW);
        let tiny = metre().power(i32::MIN).unwrap();
        assert_eq!(tiny.inverse().unwrap_err().code, codes::OVERFLOW);
    }

    #[test]
    fn test_common_prefers_finer_unit() {
        assert_eq!(Unit::common(&kilometre(), &metre()).unwrap(), metre());
        assert_eq!(Unit::common(&metre(), &kilometre()).unwrap(), metre());
        assert_eq!(Unit::common(&metre(), &metre()).unwrap(), metre());
    }

    #[test]
    fn test_common_across_prefix_families() {
        let kib = Unit::prefixed(KIBI, &bit()).unwrap();
        let kb = Unit::prefixed(KILO, &bit()).unwrap();
        let common = Unit::common(&kib, &kb).unwrap();
        assert_eq!(common.magnitude(), &Magnitude::integer(8));
        assert_eq!(common.kind(), &UnitKind::Common);

        let mib = Unit::prefixed(MEBI, &bit()).unwrap();
        assert_eq!(Unit::common(&mib, &kib).unwrap(), kib);
    }
}
