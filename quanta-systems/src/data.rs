//! Information units: bit and byte with decimal and binary prefixes,
//! and bitrate units deduced from them

use quanta_core::{Magnitude, QuantaError};
use quanta_units::prefix::{Prefix, BINARY, EXA, GIGA, KILO, MEGA, PETA, TERA};
use quanta_units::{Catalog, DerivedDimension};

use crate::si::base;

/// Decimal prefixes used with information units (k..E)
pub const DECIMAL_DATA: [Prefix; 6] = [KILO, MEGA, GIGA, TERA, PETA, EXA];

/// Declare information and bitrate units; expects the SI time dimension
pub fn load_data(catalog: &mut Catalog) -> Result<(), QuantaError> {
    let information = catalog.declare_base("information", "b")?;
    let time = base(catalog, "time", "s")?;

    catalog.declare_unit("b", "bit", &DerivedDimension::base(&information))?;
    catalog.declare_scaled("B", "byte", "b", Magnitude::integer(8))?;
    for reference in ["b", "B"] {
        catalog.declare_prefixes(&DECIMAL_DATA, reference)?;
        catalog.declare_prefixes(&BINARY, reference)?;
    }

    catalog.declare_derived("bitrate", [(information, 1), (time, -1)])?;
    catalog.declare_deduced("b/s", "bit per second", "bitrate", &["b", "s"])?;
    catalog.declare_deduced("B/s", "byte per second", "bitrate", &["B", "s"])?;
    for reference in ["b", "B"] {
        for prefix in DECIMAL_DATA[..5].iter().chain(&BINARY[..5]) {
            let unit = format!("{}{}", prefix.symbol, reference);
            let symbol = format!("{}/s", unit);
            let name = format!("{}{} per second", prefix.name, if reference == "b" { "bit" } else { "byte" });
            catalog.declare_deduced(&symbol, &name, "bitrate", &[unit.as_str(), "s"])?;
        }
    }

    catalog.alias("bit", "b")?;
    catalog.alias("byte", "B")?;
    catalog.alias("bps", "b/s")?;
    tracing::debug!("loaded information units");
    Ok(())
}
