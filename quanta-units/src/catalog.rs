//! Catalog of declared base dimensions, named dimensions and units

use std::collections::{HashMap, HashSet};

use quanta_core::{Magnitude, QuantaError};

use crate::quantity::QuantityReport;
use crate::rep::Representation;
use crate::unit::UnitKind;
use crate::{BaseDimension, DerivedDimension, Prefix, Quantity, Reference, Unit};

/// Registry of everything a unit system declares.
///
/// Units are looked up by key, which is normally the unit symbol. A unit
/// whose symbol is already taken by another system is registered under a
/// qualified key instead (`cgs:cm`).
#[derive(Debug, Default)]
pub struct Catalog {
    bases: Vec<BaseDimension>,
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
    names: HashMap<DerivedDimension, String>,
    dimensions: HashMap<String, DerivedDimension>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Declarations ==========

    /// Declare a base dimension whose reference unit is canonical for its name
    pub fn declare_base(&mut self, name: &str, reference_unit: &str) -> Result<BaseDimension, QuantaError> {
        self.declare_base_scaled(name, reference_unit, Magnitude::one())
    }

    /// Declare a base dimension whose reference unit is `reference_magnitude`
    /// times the canonical unit of the same name
    pub fn declare_base_scaled(
        &mut self,
        name: &str,
        reference_unit: &str,
        reference_magnitude: Magnitude,
    ) -> Result<BaseDimension, QuantaError> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(QuantaError::invalid_declaration(format!(
                "base dimension name '{}' must be non-empty without whitespace", name
            )));
        }
        if reference_unit.trim().is_empty() {
            return Err(QuantaError::invalid_declaration(format!(
                "base dimension '{}' needs a reference unit", name
            )));
        }
        if reference_magnitude.is_zero() {
            return Err(QuantaError::invalid_declaration(format!(
                "base dimension '{}' has a zero reference magnitude", name
            )));
        }
        if self.base(name, reference_unit).is_some() {
            return Err(QuantaError::duplicate("base dimension", &format!("{} [{}]", name, reference_unit)));
        }

        let base = BaseDimension::scaled(name, reference_unit, reference_magnitude);
        tracing::debug!(name, reference_unit, "declared base dimension");
        self.bases.push(base.clone());
        self.bases.sort();
        Ok(base)
    }

    /// Declare the coherent unit of `dimension` under its symbol
    pub fn declare_unit(&mut self, symbol: &str, name: &str, dimension: &DerivedDimension) -> Result<Unit, QuantaError> {
        self.declare_unit_as(symbol, Unit::coherent(symbol, name, dimension.clone()))
    }

    /// Register a ready-made unit under `key`
    pub fn declare_unit_as(&mut self, key: &str, unit: Unit) -> Result<Unit, QuantaError> {
        if key.is_empty() {
            return Err(QuantaError::invalid_declaration("unit key must be non-empty"));
        }
        if self.units.contains_key(key) || self.aliases.contains_key(key) {
            return Err(QuantaError::duplicate("unit", key));
        }
        for e in unit.dimension().exponents() {
            if !self.bases.contains(&e.base) {
                return Err(QuantaError::unknown_dimension(&format!("{} [{}]", e.base, e.base.reference_unit()))
                    .with_note(format!("while declaring {}", key)));
            }
        }
        if unit.magnitude().is_zero() {
            return Err(QuantaError::invalid_declaration(format!("unit {} has zero magnitude", key)));
        }

        tracing::debug!(key, dimension = %unit.dimension(), magnitude = %unit.magnitude(), "declared unit");
        self.units.insert(key.to_string(), unit.clone());
        Ok(unit)
    }

    /// Declare `factor` times the unit registered under `reference`
    pub fn declare_scaled(&mut self, symbol: &str, name: &str, reference: &str, factor: Magnitude) -> Result<Unit, QuantaError> {
        if factor.is_zero() {
            return Err(QuantaError::invalid_declaration(format!("unit {} has zero factor", symbol)));
        }
        let reference = self.require(reference)?;
        self.declare_unit_as(symbol, Unit::scaled(symbol, name, &reference, factor)?)
    }

    /// Declare `prefix` applied to the unit registered under `reference`
    pub fn declare_prefixed(&mut self, prefix: Prefix, reference: &str) -> Result<Unit, QuantaError> {
        let unit = Unit::prefixed(prefix, &self.require(reference)?)?;
        let key = unit.symbol().to_string();
        self.declare_unit_as(&key, unit)
    }

    /// Declare every prefix of `prefixes` for one reference unit
    pub fn declare_prefixes(&mut self, prefixes: &[Prefix], reference: &str) -> Result<Vec<Unit>, QuantaError> {
        prefixes.iter().map(|p| self.declare_prefixed(*p, reference)).collect()
    }

    /// Compose a derived dimension and give it a name
    pub fn declare_derived(
        &mut self,
        name: &str,
        exponents: impl IntoIterator<Item = (BaseDimension, i32)>,
    ) -> Result<DerivedDimension, QuantaError> {
        let dimension = DerivedDimension::compose(exponents)?;
        self.name_dimension(name, &dimension)?;
        Ok(dimension)
    }

    /// Give a display name to a dimension; names never affect equality
    pub fn name_dimension(&mut self, name: &str, dimension: &DerivedDimension) -> Result<(), QuantaError> {
        if name.trim().is_empty() {
            return Err(QuantaError::invalid_declaration("dimension name must be non-empty"));
        }
        if self.dimensions.contains_key(name) {
            return Err(QuantaError::duplicate("dimension", name));
        }
        if let Some(existing) = self.names.get(dimension) {
            return Err(QuantaError::duplicate("dimension", &dimension.to_string())
                .with_note(format!("already named '{}'", existing)));
        }
        for e in dimension.exponents() {
            if !self.bases.contains(&e.base) {
                return Err(QuantaError::unknown_dimension(e.base.name()));
            }
        }

        tracing::debug!(name, dimension = %dimension, "named dimension");
        self.names.insert(dimension.clone(), name.to_string());
        self.dimensions.insert(name.to_string(), dimension.clone());
        Ok(())
    }

    /// Declare a unit of the named dimension from one registered unit per base dimension
    pub fn declare_deduced(
        &mut self,
        symbol: &str,
        name: &str,
        dimension: &str,
        constituents: &[&str],
    ) -> Result<Unit, QuantaError> {
        let dimension = self
            .dimension(dimension)
            .cloned()
            .ok_or_else(|| QuantaError::unknown_dimension(dimension))?;
        let units = constituents
            .iter()
            .map(|s| self.require(s))
            .collect::<Result<Vec<_>, _>>()?;
        let refs: Vec<&Unit> = units.iter().collect();
        self.declare_unit_as(symbol, Unit::deduced(symbol, name, &dimension, &refs)?)
    }

    /// Make `alias` resolve to the unit registered under `key`
    pub fn alias(&mut self, alias: &str, key: &str) -> Result<(), QuantaError> {
        if self.units.contains_key(alias) || self.aliases.contains_key(alias) {
            return Err(QuantaError::duplicate("unit", alias));
        }
        if !self.units.contains_key(key) {
            return Err(QuantaError::unknown_unit(key));
        }
        self.aliases.insert(alias.to_string(), key.to_string());
        Ok(())
    }

    // ========== Lookups ==========

    /// Get a unit by key or alias
    pub fn unit(&self, key: &str) -> Option<&Unit> {
        if let Some(unit) = self.units.get(key) {
            return Some(unit);
        }
        self.aliases.get(key).and_then(|canonical| self.units.get(canonical))
    }

    /// Like `unit`, but an unknown key is an error naming similar keys
    pub fn require(&self, key: &str) -> Result<Unit, QuantaError> {
        if let Some(unit) = self.unit(key) {
            return Ok(unit.clone());
        }
        let similar = self.find_similar_symbols(key);
        let mut err = QuantaError::unknown_unit(key);
        if !similar.is_empty() {
            let suggestions: Vec<&str> = similar.iter().take(5).map(|s| s.as_str()).collect();
            err = err.with_suggestion(format!("Similar: {}", suggestions.join(", ")));
        }
        Err(err)
    }

    pub fn reference(&self, key: &str) -> Result<Reference, QuantaError> {
        Ok(Reference::new(self.require(key)?))
    }

    /// The base dimension with this name and reference unit
    pub fn base(&self, name: &str, reference_unit: &str) -> Option<&BaseDimension> {
        self.bases
            .iter()
            .find(|b| b.name() == name && b.reference_unit() == reference_unit)
    }

    /// All base dimensions sharing a name (one per unit system)
    pub fn bases_named(&self, name: &str) -> Vec<&BaseDimension> {
        self.bases.iter().filter(|b| b.name() == name).collect()
    }

    /// Base dimensions in canonical order
    pub fn bases(&self) -> &[BaseDimension] {
        &self.bases
    }

    pub fn dimension(&self, name: &str) -> Option<&DerivedDimension> {
        self.dimensions.get(name)
    }

    pub fn dimension_name(&self, dimension: &DerivedDimension) -> Option<&str> {
        self.names.get(dimension).map(|s| s.as_str())
    }

    /// Units measuring `dimension`, smallest magnitude first
    pub fn units_of(&self, dimension: &DerivedDimension) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self.units.values().filter(|u| u.measures(dimension)).collect();
        units.sort_by(|a, b| {
            a.magnitude()
                .cmp_value(b.magnitude())
                .then_with(|| a.symbol().cmp(b.symbol()))
        });
        units
    }

    /// All unit keys, sorted
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.units.keys().map(|s| s.as_str()).collect();
        symbols.sort_unstable();
        symbols
    }

    /// Report for a quantity, including the catalog name of its dimension
    pub fn describe<R: Representation>(&self, quantity: &Quantity<R>) -> QuantityReport {
        let mut report = quantity.report();
        report.dimension_name = self.dimension_name(quantity.dimension()).map(str::to_string);
        report
    }

    // ========== Consistency ==========

    /// Check the whole catalog: every unit measures declared base dimensions,
    /// prefixed and deduced magnitudes match their constituents, aliases
    /// resolve, and the dimension name tables agree.
    pub fn verify(&self) -> Result<(), Vec<QuantaError>> {
        let mut problems = Vec::new();

        for (key, unit) in &self.units {
            for e in unit.dimension().exponents() {
                if !self.bases.contains(&e.base) {
                    problems.push(QuantaError::unknown_dimension(e.base.name()).with_note(format!("unit {}", key)));
                }
            }
            if let Err(err) = Self::check_magnitude(unit) {
                problems.push(err.with_note(format!("unit {}", key)));
            }
        }

        for (alias, key) in &self.aliases {
            if !self.units.contains_key(key) {
                problems.push(QuantaError::unknown_unit(key).with_note(format!("alias {}", alias)));
            }
        }

        for (name, dimension) in &self.dimensions {
            if self.names.get(dimension).map(String::as_str) != Some(name.as_str()) {
                problems.push(QuantaError::invalid_declaration(format!(
                    "dimension '{}' is not the display name of {}", name, dimension
                )));
            }
        }

        let distinct: HashSet<&BaseDimension> = self.bases.iter().collect();
        if distinct.len() != self.bases.len() {
            problems.push(QuantaError::invalid_declaration("base dimension declared twice"));
        }

        for problem in &problems {
            tracing::warn!(code = %problem.code, "{}", problem.message);
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }

    fn check_magnitude(unit: &Unit) -> Result<(), QuantaError> {
        if unit.magnitude().is_zero() {
            return Err(QuantaError::invalid_declaration(format!("{} has zero magnitude", unit)));
        }
        let expected = match unit.kind() {
            UnitKind::Coherent => Magnitude::one(),
            UnitKind::Prefixed { prefix, reference } => reference.magnitude().checked_mul(&prefix.magnitude()?)?,
            UnitKind::Deduced { constituents } => {
                let refs: Vec<&Unit> = constituents.iter().collect();
                Unit::deduced(unit.symbol(), unit.name(), unit.dimension(), &refs)?.magnitude().clone()
            }
            UnitKind::Scaled { reference } => {
                if !reference.is_compatible(unit) {
                    return Err(QuantaError::dimension_mismatch("scaled unit", unit.dimension(), reference.dimension()));
                }
                return Ok(());
            }
            UnitKind::Composed | UnitKind::Common => return Ok(()),
        };
        if unit.magnitude() != &expected {
            return Err(QuantaError::invalid_declaration(format!(
                "{} has magnitude {} but its definition gives {}", unit, unit.magnitude(), expected
            )));
        }
        Ok(())
    }

    /// Find keys similar to the given one (for error suggestions)
    fn find_similar_symbols(&self, key: &str) -> Vec<String> {
        let key_lower = key.to_lowercase();
        let mut matches: Vec<(String, usize)> = self
            .units
            .keys()
            .chain(self.aliases.keys())
            .filter_map(|candidate| {
                let score = Self::similarity_score(&key_lower, &candidate.to_lowercase());
                (score > 0).then(|| (candidate.clone(), score))
            })
            .collect();

        // Higher score first, then alphabetical for a stable order
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    /// Calculate similarity score between two strings
    fn similarity_score(query: &str, candidate: &str) -> usize {
        if query.is_empty() {
            return 0;
        }
        let mut score = 0;

        if candidate == query {
            score += 200;
        } else if candidate.starts_with(query) {
            score += 100;
        } else if candidate.contains(query) {
            score += 50;
        } else if query.contains(candidate) {
            score += 30;
        }

        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();
        if common == 0 {
            return score;
        }
        score += common * 2;

        let len_diff = query.chars().count().abs_diff(candidate.chars().count());
        if len_diff < 5 {
            score += 5 - len_diff;
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix::{BINARY, KIBI, KILO};
    use quanta_core::codes;

    fn data_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        let info = catalog.declare_base("information", "b").unwrap();
        let time = catalog.declare_base("T", "s").unwrap();
        catalog.declare_unit("b", "bit", &DerivedDimension::base(&info)).unwrap();
        catalog.declare_unit("s", "second", &DerivedDimension::base(&time)).unwrap();
        catalog.declare_scaled("B", "byte", "b", Magnitude::integer(8)).unwrap();
        catalog.declare_prefixes(&BINARY, "b").unwrap();
        catalog.declare_prefixed(KILO, "b").unwrap();
        catalog.declare_derived("bitrate", [(info, 1), (time, -1)]).unwrap();
        catalog.declare_deduced("Kib/s", "kibibit per second", "bitrate", &["Kib", "s"]).unwrap();
        catalog.alias("bit", "b").unwrap();
        catalog
    }

    #[test]
    fn test_lookup_and_alias() {
        let catalog = data_catalog();
        assert_eq!(catalog.unit("b"), catalog.unit("bit"));
        assert_eq!(catalog.unit("Kib").unwrap().magnitude(), &Magnitude::integer(1024));
        assert!(catalog.unit("nope").is_none());
    }

    #[test]
    fn test_unknown_unit_suggests_similar() {
        let catalog = data_catalog();
        let err = catalog.require("kib").unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_UNIT);
        assert!(err.suggestion.unwrap().contains("Kib"));
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut catalog = data_catalog();
        assert!(catalog.declare_base("T", "s").unwrap_err().is(codes::DUPLICATE));
        assert!(catalog.declare_prefixed(KIBI, "b").unwrap_err().is(codes::DUPLICATE));
        assert!(catalog.alias("b", "B").unwrap_err().is(codes::DUPLICATE));

        let info = catalog.bases_named("information")[0].clone();
        let time = catalog.bases_named("T")[0].clone();
        let err = catalog.declare_derived("rate", [(time, -1), (info, 1)]).unwrap_err();
        assert!(err.is(codes::DUPLICATE));
    }

    #[test]
    fn test_invalid_base_names() {
        let mut catalog = Catalog::new();
        assert!(catalog.declare_base("", "m").is_err());
        assert!(catalog.declare_base("a length", "m").is_err());
        assert!(catalog.declare_base("L", " ").is_err());
    }

    #[test]
    fn test_same_name_different_reference_unit() {
        let mut catalog = Catalog::new();
        let si = catalog.declare_base("L", "m").unwrap();
        let cgs = catalog.declare_base_scaled("L", "cm", Magnitude::ratio(1, 100).unwrap()).unwrap();
        assert_ne!(si, cgs);
        assert_eq!(catalog.bases_named("L").len(), 2);
        assert_eq!(catalog.base("L", "cm"), Some(&cgs));
    }

    #[test]
    fn test_unit_over_undeclared_base_rejected() {
        let mut catalog = Catalog::new();
        let stray = BaseDimension::new("L", "m");
        let err = catalog.declare_unit("m", "metre", &DerivedDimension::base(&stray)).unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_DIMENSION);
    }

    #[test]
    fn test_named_dimension_lookup() {
        let catalog = data_catalog();
        let kibps = catalog.unit("Kib/s").unwrap();
        assert_eq!(catalog.dimension_name(kibps.dimension()), Some("bitrate"));
        assert_eq!(kibps.magnitude(), &Magnitude::integer(1024));

        let q = Quantity::new(2i64, kibps.clone());
        let report = catalog.describe(&q);
        assert_eq!(report.dimension_name.as_deref(), Some("bitrate"));
    }

    #[test]
    fn test_deduced_needs_known_dimension() {
        let mut catalog = data_catalog();
        let err = catalog.declare_deduced("x", "x", "speed", &["b"]).unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_DIMENSION);
    }

    #[test]
    fn test_units_of_sorted_by_magnitude() {
        let catalog = data_catalog();
        let info = DerivedDimension::base(catalog.bases_named("information")[0]);
        let symbols: Vec<&str> = catalog.units_of(&info).iter().map(|u| u.symbol()).collect();
        assert_eq!(&symbols[..4], &["b", "B", "kb", "Kib"]);
    }

    #[test]
    fn test_verify() {
        assert!(data_catalog().verify().is_ok());
    }
}
