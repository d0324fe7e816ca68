//! CGS subset: centimetre and gram as reference units of their own
//! length and mass dimensions.
//!
//! CGS length and SI length share the name "length" but not the reference
//! unit, so they never mix implicitly. Their units are registered under
//! `cgs:` keys because SI already owns the plain symbols.

use quanta_core::{Magnitude, QuantaError};
use quanta_units::{Catalog, DerivedDimension, Unit};

use crate::si::base;

/// Declare the CGS subset; expects the SI time dimension to be declared
pub fn load_cgs(catalog: &mut Catalog) -> Result<(), QuantaError> {
    let length = catalog.declare_base_scaled("length", "cm", Magnitude::ratio(1, 100)?)?;
    let mass = catalog.declare_base_scaled("mass", "g", Magnitude::ratio(1, 1000)?)?;
    let time = base(catalog, "time", "s")?;

    let cm = catalog.declare_unit_as("cgs:cm", Unit::coherent("cm", "centimetre", DerivedDimension::base(&length)))?;
    catalog.declare_unit_as("cgs:g", Unit::coherent("g", "gram", DerivedDimension::base(&mass)))?;
    catalog.declare_unit_as("cgs:m", Unit::scaled("m", "metre", &cm, Magnitude::integer(100))?)?;

    let speed = DerivedDimension::compose([(length.clone(), 1), (time.clone(), -1)])?;
    catalog.name_dimension("cgs:speed", &speed)?;
    catalog.declare_deduced("cgs:cm/s", "centimetre per second", "cgs:speed", &["cgs:cm", "s"])?;

    let force = DerivedDimension::compose([(mass, 1), (length, 1), (time, -2)])?;
    catalog.name_dimension("cgs:force", &force)?;
    catalog.declare_deduced("cgs:dyn", "dyne", "cgs:force", &["cgs:g", "cgs:cm", "s"])?;

    catalog.alias("dyn", "cgs:dyn")?;
    tracing::debug!("loaded CGS units");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::si::load_si;
    use quanta_core::codes;
    use quanta_units::Quantity;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        load_si(&mut catalog).unwrap();
        load_cgs(&mut catalog).unwrap();
        catalog
    }

    #[test]
    fn test_cgs_needs_si_time() {
        let mut catalog = Catalog::new();
        assert!(load_cgs(&mut catalog).is_err());
    }

    #[test]
    fn test_cgs_and_si_length_do_not_mix() {
        let catalog = catalog();
        let si_cm = Quantity::new(5i64, catalog.require("cm").unwrap());
        let cgs_cm = Quantity::new(5i64, catalog.require("cgs:cm").unwrap());

        assert_eq!(si_cm.add(&cgs_cm).unwrap_err().code, codes::REFERENCE_MISMATCH);
        assert_eq!(si_cm.try_eq(&cgs_cm).unwrap_err().code, codes::REFERENCE_MISMATCH);
        assert_eq!(
            si_cm.convert_to(cgs_cm.unit()).unwrap_err().code,
            codes::REFERENCE_MISMATCH
        );

        let bridged = si_cm.cast_to(cgs_cm.unit()).unwrap();
        assert_eq!(*bridged.value(), 5);
        assert!(bridged.try_eq(&cgs_cm).unwrap());
    }

    #[test]
    fn test_bridge_speed_and_force() {
        let catalog = catalog();
        let cms = Quantity::new(250i64, catalog.require("cgs:cm/s").unwrap());
        let ms = cms.cast_to(&catalog.require("m/s").unwrap()).unwrap();
        assert_eq!(*ms.value(), 2);

        let dyn_ = Quantity::new(100_000.0f64, catalog.require("dyn").unwrap());
        let newtons = dyn_.cast_to(&catalog.require("N").unwrap()).unwrap();
        assert!((newtons.value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cgs_metre_is_not_si_metre() {
        let catalog = catalog();
        let cgs_m = catalog.require("cgs:m").unwrap();
        let si_m = catalog.require("m").unwrap();
        assert_ne!(cgs_m.dimension(), si_m.dimension());
        assert!(cgs_m.dimension().is_bridgeable(si_m.dimension()));
        let q = Quantity::new(3i64, cgs_m).cast_to(&si_m).unwrap();
        assert_eq!(*q.value(), 3);
    }

    #[test]
    fn test_time_is_shared() {
        let catalog = catalog();
        let si_speed = catalog.dimension("speed").unwrap();
        let cgs_speed = catalog.dimension("cgs:speed").unwrap();
        assert_eq!(si_speed.exponents()[1].base, cgs_speed.exponents()[1].base);
        assert!(catalog.verify().is_ok());
    }
}
