//! References: units used as quantity constructors
//!
//! `10 * &kib` builds a quantity of 10 kibibits in whatever representation
//! the scalar has.

use std::ops::Mul;

use quanta_core::{QuantaError, Ratio};

use crate::rep::Representation;
use crate::{Quantity, Unit};

/// A unit that builds quantities
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    unit: Unit,
}

impl Reference {
    pub fn new(unit: Unit) -> Self {
        Reference { unit }
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn quantity<R: Representation>(&self, value: R) -> Quantity<R> {
        Quantity::new(value, self.unit.clone())
    }

    /// Integer quantity from an unsigned literal; fails if it does not fit `i64`
    pub fn literal(&self, value: u64) -> Result<Quantity<i64>, QuantaError> {
        let value = i64::try_from(value).map_err(|_| QuantaError::out_of_range(value, "i64"))?;
        Ok(self.quantity(value))
    }

    pub fn literal_f64(&self, value: f64) -> Quantity<f64> {
        self.quantity(value)
    }

    /// Reference for the product unit
    pub fn times(&self, other: &Reference) -> Result<Reference, QuantaError> {
        Ok(Reference::new(self.unit.multiply(&other.unit)?))
    }

    /// Reference for the quotient unit
    pub fn per(&self, other: &Reference) -> Result<Reference, QuantaError> {
        Ok(Reference::new(self.unit.divide(&other.unit)?))
    }
}

impl From<Unit> for Reference {
    fn from(unit: Unit) -> Self {
        Reference::new(unit)
    }
}

macro_rules! scalar_times_reference {
    ($($t:ty),*) => {
        $(
            impl Mul<&Reference> for $t {
                type Output = Quantity<$t>;

                fn mul(self, reference: &Reference) -> Quantity<$t> {
                    reference.quantity(self)
                }
            }

            impl Mul<Reference> for $t {
                type Output = Quantity<$t>;

                fn mul(self, reference: Reference) -> Quantity<$t> {
                    Quantity::new(self, reference.unit)
                }
            }
        )*
    };
}

scalar_times_reference!(i32, i64, f32, f64, Ratio);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BaseDimension, DerivedDimension};
    use quanta_core::codes;

    fn bit() -> Reference {
        let information = BaseDimension::new("information", "b");
        Reference::new(Unit::coherent("b", "bit", DerivedDimension::base(&information)))
    }

    fn second() -> Reference {
        let time = BaseDimension::new("T", "s");
        Reference::new(Unit::coherent("s", "second", DerivedDimension::base(&time)))
    }

    #[test]
    fn test_scalar_times_reference() {
        let b = bit();
        let q = 10i64 * &b;
        assert_eq!(*q.value(), 10);
        assert_eq!(q.unit().symbol(), "b");

        let f = 2.5f64 * &b;
        assert_eq!(*f.value(), 2.5);

        let r = Ratio::new(1, 2).unwrap() * b;
        assert_eq!(r.value(), &Ratio::new(1, 2).unwrap());
    }

    #[test]
    fn test_literal_range() {
        assert_eq!(*bit().literal(42).unwrap().value(), 42);
        assert_eq!(*bit().literal(i64::MAX as u64).unwrap().value(), i64::MAX);
        let err = bit().literal(u64::MAX).unwrap_err();
        assert_eq!(err.code, codes::OUT_OF_RANGE);
    }

    #[test]
    fn test_per() {
        let bps = bit().per(&second()).unwrap();
        let q = 3i64 * &bps;
        assert_eq!(q.dimension().exponents().len(), 2);
        assert_eq!(bps.times(&second()).unwrap().unit().dimension(), bit().unit().dimension());
    }
}
