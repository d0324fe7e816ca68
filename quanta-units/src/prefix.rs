//! Unit prefixes
//!
//! Decimal (kilo = 10^3) and binary (kibi = 2^10) prefixes are separate
//! families. A prefixed unit keeps its prefix instead of folding it into a
//! raw multiplier, and both families produce exact ratios.

use std::fmt;

use quanta_core::{Magnitude, QuantaError};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixFamily {
    /// Powers of 10
    Decimal,
    /// Powers of 2 (IEC 80000-13)
    Binary,
}

/// A named scale factor applied to a reference unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Prefix {
    pub symbol: &'static str,
    pub name: &'static str,
    pub family: PrefixFamily,
    pub exponent: i32,
}

impl Prefix {
    pub const fn decimal(symbol: &'static str, name: &'static str, exponent: i32) -> Self {
        Prefix { symbol, name, family: PrefixFamily::Decimal, exponent }
    }

    pub const fn binary(symbol: &'static str, name: &'static str, exponent: i32) -> Self {
        Prefix { symbol, name, family: PrefixFamily::Binary, exponent }
    }

    pub fn radix(&self) -> i64 {
        match self.family {
            PrefixFamily::Decimal => 10,
            PrefixFamily::Binary => 2,
        }
    }

    /// Exact scale factor, `radix^exponent`
    pub fn magnitude(&self) -> Result<Magnitude, QuantaError> {
        Ok(Magnitude::power_of(self.radix(), self.exponent)?)
    }

    /// Find a prefix by symbol ("k", "Ki", "µ"/"u")
    pub fn lookup(symbol: &str) -> Option<Prefix> {
        let symbol = if symbol == "u" { "µ" } else { symbol };
        DECIMAL.iter().chain(BINARY.iter()).find(|p| p.symbol == symbol).copied()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

// Decimal prefixes
pub const NANO: Prefix = Prefix::decimal("n", "nano", -9);
pub const MICRO: Prefix = Prefix::decimal("µ", "micro", -6);
pub const MILLI: Prefix = Prefix::decimal("m", "milli", -3);
pub const CENTI: Prefix = Prefix::decimal("c", "centi", -2);
pub const DECI: Prefix = Prefix::decimal("d", "deci", -1);
pub const DECA: Prefix = Prefix::decimal("da", "deca", 1);
pub const HECTO: Prefix = Prefix::decimal("h", "hecto", 2);
pub const KILO: Prefix = Prefix::decimal("k", "kilo", 3);
pub const MEGA: Prefix = Prefix::decimal("M", "mega", 6);
pub const GIGA: Prefix = Prefix::decimal("G", "giga", 9);
pub const TERA: Prefix = Prefix::decimal("T", "tera", 12);
pub const PETA: Prefix = Prefix::decimal("P", "peta", 15);
pub const EXA: Prefix = Prefix::decimal("E", "exa", 18);

// Binary prefixes
pub const KIBI: Prefix = Prefix::binary("Ki", "kibi", 10);
pub const MEBI: Prefix = Prefix::binary("Mi", "mebi", 20);
pub const GIBI: Prefix = Prefix::binary("Gi", "gibi", 30);
pub const TEBI: Prefix = Prefix::binary("Ti", "tebi", 40);
pub const PEBI: Prefix = Prefix::binary("Pi", "pebi", 50);
pub const EXBI: Prefix = Prefix::binary("Ei", "exbi", 60);

pub const DECIMAL: [Prefix; 13] = [
    NANO, MICRO, MILLI, CENTI, DECI, DECA, HECTO, KILO, MEGA, GIGA, TERA, PETA, EXA,
];

pub const BINARY: [Prefix; 6] = [KIBI, MEBI, GIBI, TEBI, PEBI, EXBI];
