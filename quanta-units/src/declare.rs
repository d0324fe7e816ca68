//! Catalog declarations described as data (JSON via serde)
//!
//! ```json
//! {
//!   "bases": [{ "name": "information", "reference_unit": "b", "unit_name": "bit" }],
//!   "dimensions": [{ "name": "bitrate", "exponents": [
//!       { "base": "information", "power": 1 }, { "base": "T", "power": -1 }] }],
//!   "units": [
//!     { "kind": "scaled", "symbol": "B", "name": "byte", "reference": "b", "factor": "8" },
//!     { "kind": "prefixed", "prefix": "Ki", "reference": "b" },
//!     { "kind": "deduced", "symbol": "Kib/s", "name": "kibibit per second",
//!       "dimension": "bitrate", "constituents": ["Kib", "s"] }
//!   ],
//!   "aliases": { "bit": "b" }
//! }
//! ```

use std::collections::BTreeMap;

use quanta_core::{Magnitude, QuantaError};
use serde::{Deserialize, Serialize};

use crate::{BaseDimension, Catalog, DerivedDimension, Prefix, Unit};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Declarations {
    #[serde(default)]
    pub bases: Vec<BaseDecl>,
    #[serde(default)]
    pub dimensions: Vec<DimensionDecl>,
    #[serde(default)]
    pub units: Vec<UnitDecl>,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// A base dimension together with its coherent reference unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseDecl {
    pub name: String,
    pub reference_unit: String,
    pub unit_name: String,
    /// Reference unit relative to the canonical unit of the same name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_magnitude: Option<Magnitude>,
    /// Catalog key of the reference unit when its symbol is already taken
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionDecl {
    pub name: String,
    pub exponents: Vec<ExponentDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExponentDecl {
    /// Base dimension name
    pub base: String,
    /// Needed only when several bases share the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_unit: Option<String>,
    pub power: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UnitDecl {
    Scaled {
        symbol: String,
        name: String,
        reference: String,
        factor: Magnitude,
    },
    Prefixed {
        prefix: String,
        reference: String,
    },
    Deduced {
        symbol: String,
        name: String,
        dimension: String,
        constituents: Vec<String>,
    },
}

impl Catalog {
    /// Build a catalog from JSON declarations
    pub fn from_json(json: &str) -> Result<Catalog, QuantaError> {
        let mut catalog = Catalog::new();
        catalog.load_json(json)?;
        Ok(catalog)
    }

    pub fn load_json(&mut self, json: &str) -> Result<(), QuantaError> {
        let declarations: Declarations =
            serde_json::from_str(json).map_err(|e| QuantaError::parse_error(e.to_string()))?;
        self.load(&declarations)
    }

    /// Apply declarations in order: bases, dimensions, units, aliases
    pub fn load(&mut self, declarations: &Declarations) -> Result<(), QuantaError> {
        for b in &declarations.bases {
            let base = match &b.reference_magnitude {
                Some(m) => self.declare_base_scaled(&b.name, &b.reference_unit, m.clone())?,
                None => self.declare_base(&b.name, &b.reference_unit)?,
            };
            let key = b.key.as_deref().unwrap_or(&b.reference_unit);
            let unit = Unit::coherent(&b.reference_unit, &b.unit_name, DerivedDimension::base(&base));
            self.declare_unit_as(key, unit)?;
        }

        for d in &declarations.dimensions {
            let exponents = d
                .exponents
                .iter()
                .map(|e| Ok((self.resolve_base(e)?, e.power)))
                .collect::<Result<Vec<_>, QuantaError>>()?;
            self.declare_derived(&d.name, exponents)?;
        }

        for u in &declarations.units {
            match u {
                UnitDecl::Scaled { symbol, name, reference, factor } => {
                    self.declare_scaled(symbol, name, reference, factor.clone())?;
                }
                UnitDecl::Prefixed { prefix, reference } => {
                    let prefix = Prefix::lookup(prefix)
                        .ok_or_else(|| QuantaError::invalid_declaration(format!("unknown prefix '{}'", prefix)))?;
                    self.declare_prefixed(prefix, reference)?;
                }
                UnitDecl::Deduced { symbol, name, dimension, constituents } => {
                    let keys: Vec<&str> = constituents.iter().map(String::as_str).collect();
                    self.declare_deduced(symbol, name, dimension, &keys)?;
                }
            }
        }

        for (alias, key) in &declarations.aliases {
            self.alias(alias, key)?;
        }
        Ok(())
    }

    fn resolve_base(&self, e: &ExponentDecl) -> Result<BaseDimension, QuantaError> {
        if let Some(unit) = &e.reference_unit {
            return self
                .base(&e.base, unit)
                .cloned()
                .ok_or_else(|| QuantaError::unknown_dimension(&format!("{} [{}]", e.base, unit)));
        }
        match self.bases_named(&e.base).as_slice() {
            [only] => Ok((*only).clone()),
            [] => Err(QuantaError::unknown_dimension(&e.base)),
            _ => Err(QuantaError::invalid_declaration(format!(
                "base dimension '{}' is declared in several unit systems", e.base
            ))
            .with_suggestion("Give the reference_unit of the exponent")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quanta_core::codes;

    const DATA: &str = r#"{
        "bases": [
            { "name": "information", "reference_unit": "b", "unit_name": "bit" },
            { "name": "T", "reference_unit": "s", "unit_name": "second" }
        ],
        "dimensions": [
            { "name": "bitrate", "exponents": [
                { "base": "T", "power": -1 },
                { "base": "information", "power": 1 }
            ] }
        ],
        "units": [
            { "kind": "scaled", "symbol": "B", "name": "byte", "reference": "b", "factor": "8" },
            { "kind": "prefixed", "prefix": "Ki", "reference": "b" },
            { "kind": "prefixed", "prefix": "Ki", "reference": "B" },
            { "kind": "deduced", "symbol": "KiB/s", "name": "kibibyte per second",
              "dimension": "bitrate", "constituents": ["KiB", "s"] }
        ],
        "aliases": { "byte": "B" }
    }"#;

    #[test]
    fn test_load_json() {
        let catalog = Catalog::from_json(DATA).unwrap();
        assert_eq!(catalog.unit("byte").unwrap().magnitude(), &Magnitude::integer(8));
        assert_eq!(catalog.unit("KiB").unwrap().magnitude(), &Magnitude::integer(8192));
        let rate = catalog.unit("KiB/s").unwrap();
        assert_eq!(catalog.dimension_name(rate.dimension()), Some("bitrate"));
        assert!(catalog.verify().is_ok());
    }

    #[test]
    fn test_irrational_factor() {
        let json = r#"{
            "bases": [{ "name": "A", "reference_unit": "rad", "unit_name": "radian" }],
            "units": [{ "kind": "scaled", "symbol": "deg", "name": "degree", "reference": "rad", "factor": "pi/180" }]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        let deg = catalog.unit("deg").unwrap();
        assert_eq!(deg.magnitude().pi(), 1);
        assert!(!deg.magnitude().is_rational());
    }

    #[test]
    fn test_ambiguous_base_needs_reference_unit() {
        let json = r#"{
            "bases": [
                { "name": "L", "reference_unit": "m", "unit_name": "metre" },
                { "name": "L", "reference_unit": "cm", "unit_name": "centimetre", "reference_magnitude": "1/100" }
            ],
            "dimensions": [{ "name": "area", "exponents": [{ "base": "L", "power": 2 }] }]
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert_eq!(err.code, codes::INVALID_DECLARATION);
    }

    #[test]
    fn test_bad_json_and_unknown_prefix() {
        assert!(Catalog::from_json("{").unwrap_err().is(codes::PARSE_ERROR));

        let json = r#"{
            "bases": [{ "name": "information", "reference_unit": "b", "unit_name": "bit" }],
            "units": [{ "kind": "prefixed", "prefix": "Qi", "reference": "b" }]
        }"#;
        assert!(Catalog::from_json(json).unwrap_err().is(codes::INVALID_DECLARATION));
    }

    #[test]
    fn test_declarations_serialize() {
        let decls: Declarations = serde_json::from_str(DATA).unwrap();
        let json = serde_json::to_string(&decls).unwrap();
        assert!(json.contains(r#""kind":"prefixed""#));
        assert!(json.contains(r#""factor":"8""#));
    }
}
