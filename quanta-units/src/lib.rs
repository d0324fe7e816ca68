//! Quanta Units - Dimensional analysis with exact unit conversion
//!
//! Provides quantities whose dimensions are checked on every operation.
//!
//! - Base dimensions are identified by name and reference unit; the same
//!   name in two unit systems gives two distinct dimensions.
//! - Derived dimensions are canonical exponent lists, so equality does not
//!   depend on how a dimension was composed.
//! - Units carry exact magnitudes (rational times a power of π) and
//!   decimal or binary prefixes.
//! - Quantities store any `Representation` (i32, i64, f32, f64, `Ratio`);
//!   implicit conversion happens only when it is lossless for that type.

mod base;
mod catalog;
mod declare;
mod dimension;
mod exponent;
pub mod prefix;
mod quantity;
mod reference;
mod rep;
mod unit;

pub use base::BaseDimension;
pub use catalog::Catalog;
pub use declare::{BaseDecl, Declarations, DimensionDecl, ExponentDecl, UnitDecl};
pub use dimension::DerivedDimension;
pub use exponent::Exponent;
pub use prefix::{Prefix, PrefixFamily};
pub use quantity::{ExponentReport, Quantity, QuantityReport};
pub use reference::Reference;
pub use rep::{RepKind, Representation};
pub use unit::{Unit, UnitKind};

/// Exponent-list algebra on canonical lists
pub mod exponents {
    pub use crate::exponent::{divide, multiply, normalize, power, root};
}
