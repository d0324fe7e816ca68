//! SI subset: length, mass, time and angle, with speed and force

use quanta_core::{Magnitude, QuantaError};
use quanta_units::prefix::{CENTI, KILO, MILLI};
use quanta_units::{Catalog, DerivedDimension};

/// Declare the SI subset
pub fn load_si(catalog: &mut Catalog) -> Result<(), QuantaError> {
    register_base_units(catalog)?;
    register_time_units(catalog)?;
    register_angle_units(catalog)?;
    register_mechanics(catalog)?;
    tracing::debug!("loaded SI units");
    Ok(())
}

fn register_base_units(catalog: &mut Catalog) -> Result<(), QuantaError> {
    let length = catalog.declare_base("length", "m")?;
    let mass = catalog.declare_base("mass", "kg")?;
    let time = catalog.declare_base("time", "s")?;

    catalog.declare_unit("m", "metre", &DerivedDimension::base(&length))?;
    catalog.declare_prefixed(KILO, "m")?;
    catalog.declare_prefixed(CENTI, "m")?;
    catalog.declare_prefixed(MILLI, "m")?;

    // The kilogram is coherent; the gram is defined from it
    catalog.declare_unit("kg", "kilogram", &DerivedDimension::base(&mass))?;
    catalog.declare_scaled("g", "gram", "kg", Magnitude::ratio(1, 1000)?)?;

    catalog.declare_unit("s", "second", &DerivedDimension::base(&time))?;

    catalog.alias("metre", "m")?;
    catalog.alias("meter", "m")?;
    catalog.alias("kilometre", "km")?;
    catalog.alias("kilometer", "km")?;
    catalog.alias("kilogram", "kg")?;
    catalog.alias("gram", "g")?;
    catalog.alias("second", "s")?;
    Ok(())
}

fn register_time_units(catalog: &mut Catalog) -> Result<(), QuantaError> {
    catalog.declare_scaled("min", "minute", "s", Magnitude::integer(60))?;
    catalog.declare_scaled("h", "hour", "s", Magnitude::integer(3600))?;

    catalog.alias("minute", "min")?;
    catalog.alias("hour", "h")?;
    Ok(())
}

fn register_angle_units(catalog: &mut Catalog) -> Result<(), QuantaError> {
    let angle = catalog.declare_base("angle", "rad")?;
    catalog.declare_unit("rad", "radian", &DerivedDimension::base(&angle))?;
    catalog.declare_scaled("deg", "degree", "rad", "pi/180".parse()?)?;
    catalog.declare_scaled("rev", "revolution", "rad", "2pi".parse()?)?;

    catalog.alias("radian", "rad")?;
    catalog.alias("degree", "deg")?;
    catalog.alias("°", "deg")?;
    catalog.alias("turn", "rev")?;
    Ok(())
}

fn register_mechanics(catalog: &mut Catalog) -> Result<(), QuantaError> {
    let length = base(catalog, "length", "m")?;
    let mass = base(catalog, "mass", "kg")?;
    let time = base(catalog, "time", "s")?;

    catalog.declare_derived("speed", [(length.clone(), 1), (time.clone(), -1)])?;
    catalog.declare_deduced("m/s", "metre per second", "speed", &["m", "s"])?;
    catalog.declare_deduced("km/h", "kilometre per hour", "speed", &["km", "h"])?;

    catalog.declare_derived("acceleration", [(length.clone(), 1), (time.clone(), -2)])?;
    catalog.declare_deduced("m/s^2", "metre per second squared", "acceleration", &["m", "s"])?;

    catalog.declare_derived("force", [(mass, 1), (length, 1), (time, -2)])?;
    catalog.declare_deduced("N", "newton", "force", &["kg", "m", "s"])?;

    catalog.alias("kph", "km/h")?;
    catalog.alias("newton", "N")?;
    Ok(())
}

pub(crate) fn base(catalog: &Catalog, name: &str, reference_unit: &str) -> Result<quanta_units::BaseDimension, QuantaError> {
    catalog
        .base(name, reference_unit)
        .cloned()
        .ok_or_else(|| QuantaError::unknown_dimension(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quanta_core::codes;
    use quanta_units::Quantity;

    fn si() -> Catalog {
        let mut catalog = Catalog::new();
        load_si(&mut catalog).unwrap();
        catalog
    }

    #[test]
    fn test_load_si() {
        let catalog = si();
        assert_eq!(catalog.unit("km").unwrap().magnitude(), &Magnitude::integer(1000));
        assert_eq!(catalog.unit("g").unwrap().magnitude(), &Magnitude::ratio(1, 1000).unwrap());
        assert_eq!(catalog.unit("km/h").unwrap().magnitude(), &Magnitude::ratio(5, 18).unwrap());
        assert!(catalog.verify().is_ok());
    }

    #[test]
    fn test_speed_two_paths() {
        let catalog = si();
        let length = base(&catalog, "length", "m").unwrap();
        let time = base(&catalog, "time", "s").unwrap();

        let direct = DerivedDimension::compose([(length.clone(), 1), (time.clone(), -1)]).unwrap();
        let metres = Quantity::new(100.0f64, catalog.require("m").unwrap());
        let seconds = Quantity::new(9.58f64, catalog.require("s").unwrap());
        let divided = metres.div(&seconds).unwrap();

        assert_eq!(divided.dimension(), &direct);
        assert_eq!(catalog.dimension("speed"), Some(&direct));
        assert_eq!(catalog.dimension_name(divided.dimension()), Some("speed"));
    }

    #[test]
    fn test_kmh_to_ms() {
        let catalog = si();
        let kmh = Quantity::new(36i64, catalog.require("km/h").unwrap());
        let ms = catalog.require("m/s").unwrap();
        assert_eq!(kmh.convert_to(&ms).unwrap_err().code, codes::NARROWING);
        assert_eq!(*kmh.cast_to(&ms).unwrap().value(), 10);
        assert_eq!(*kmh.cast_rep::<f64>().unwrap().convert_to(&ms).unwrap().value(), 10.0);
    }

    #[test]
    fn test_angles_keep_pi() {
        let catalog = si();
        let rev = Quantity::new(1.0f64, catalog.require("rev").unwrap());
        let deg = rev.convert_to(&catalog.require("deg").unwrap()).unwrap();
        assert!((deg.value() - 360.0).abs() < 1e-9);

        // rev -> deg is exactly 360, so an exact representation stays exact
        let exact = Quantity::exact(1, catalog.require("rev").unwrap());
        let exact_deg = exact.convert_to(&catalog.require("deg").unwrap()).unwrap();
        assert_eq!(exact_deg.value(), &quanta_core::Ratio::from_i64(360));

        // rad -> deg needs 180/pi
        let rad = Quantity::exact(1, catalog.require("rad").unwrap());
        assert!(rad.convert_to(&catalog.require("deg").unwrap()).is_err());
    }

    #[test]
    fn test_force_composition() {
        let catalog = si();
        let mass = Quantity::new(2.0f64, catalog.require("kg").unwrap());
        let accel = Quantity::new(3.0f64, catalog.require("m/s^2").unwrap());
        let force = mass.mul(&accel).unwrap();
        assert_eq!(catalog.dimension_name(force.dimension()), Some("force"));
        let newtons = force.convert_to(&catalog.require("N").unwrap()).unwrap();
        assert_eq!(*newtons.value(), 6.0);
    }
}
