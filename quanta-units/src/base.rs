//! Base dimensions
//!
//! A base dimension is identified by its name together with its reference
//! unit. Two base dimensions with the same name but different reference
//! units (SI length in metres, CGS length in centimetres) are distinct: they
//! never cancel or add, and only an explicit cast bridges them.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use quanta_core::Magnitude;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

#[derive(Debug)]
struct BaseInner {
    name: String,
    reference_unit: String,
    /// Reference unit expressed in the family's canonical unit (1 for SI)
    reference_magnitude: Magnitude,
}

/// An irreducible dimension such as length or time
#[derive(Debug, Clone)]
pub struct BaseDimension(Arc<BaseInner>);

impl BaseDimension {
    /// Base dimension whose reference unit is the canonical one for its name
    pub fn new(name: &str, reference_unit: &str) -> Self {
        Self::scaled(name, reference_unit, Magnitude::one())
    }

    /// Base dimension whose reference unit is `reference_magnitude` times the
    /// canonical unit of the same name (CGS length: centimetre, 1/100)
    pub fn scaled(name: &str, reference_unit: &str, reference_magnitude: Magnitude) -> Self {
        BaseDimension(Arc::new(BaseInner {
            name: name.to_string(),
            reference_unit: reference_unit.to_string(),
            reference_magnitude,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn reference_unit(&self) -> &str {
        &self.0.reference_unit
    }

    pub fn reference_magnitude(&self) -> &Magnitude {
        &self.0.reference_magnitude
    }

    /// Same name, possibly a different reference unit
    pub fn shares_name(&self, other: &BaseDimension) -> bool {
        self.name() == other.name()
    }
}

impl PartialEq for BaseDimension {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.name() == other.name() && self.reference_unit() == other.reference_unit())
    }
}

impl Eq for BaseDimension {}

impl Hash for BaseDimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
        self.reference_unit().hash(state);
    }
}

impl PartialOrd for BaseDimension {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BaseDimension {
    /// Lexicographic by name; the reference unit only breaks ties between
    /// same-named dimensions of different unit systems
    fn cmp(&self, other: &Self) -> Ordering {
        self.name()
            .cmp(other.name())
            .then_with(|| self.reference_unit().cmp(other.reference_unit()))
    }
}

impl fmt::Display for BaseDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for BaseDimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("BaseDimension", 2)?;
        s.serialize_field("name", self.name())?;
        s.serialize_field("reference_unit", self.reference_unit())?;
        s.end()
    }
}
