//! Quanta Systems - Built-in unit systems
//!
//! Declares an SI subset (length, mass, time, angle, speed, force), a CGS
//! subset whose length and mass use their own reference units, and
//! information units with decimal and binary prefixes plus bitrates.
//!
//! ```ignore
//! use quanta_systems::literals::*;
//!
//! assert!(q_B(1).try_eq(&q_b(8))?);
//! assert!(q_b(8 * 1024).try_eq(&q_KiB(1))?);
//! ```

use std::sync::LazyLock;

use quanta_core::QuantaError;
use quanta_units::{Catalog, Unit};

mod builtins;
mod cgs;
mod data;
mod si;

pub use builtins::{literals, references};
pub use cgs::load_cgs;
pub use data::{load_data, DECIMAL_DATA};
pub use si::load_si;

/// Global catalog of the built-in systems
pub static CATALOG: LazyLock<Catalog> = LazyLock::new(|| match standard_catalog() {
    Ok(catalog) => catalog,
    Err(err) => panic!("built-in unit declarations are inconsistent: {}", err),
});

/// Build a fresh catalog with every built-in system
pub fn standard_catalog() -> Result<Catalog, QuantaError> {
    let mut catalog = Catalog::new();
    load_si(&mut catalog)?;
    load_cgs(&mut catalog)?;
    load_data(&mut catalog)?;
    Ok(catalog)
}

/// A unit of the global catalog; literals and references only name declared keys
pub(crate) fn builtin(key: &str) -> Unit {
    match CATALOG.require(key) {
        Ok(unit) => unit,
        Err(err) => panic!("built-in unit missing: {}", err),
    }
}
