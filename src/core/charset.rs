// File: src/core/charset.rs
use crate::core::types::Symbol;
use crate::error::{CipherError, Result};
use serde::{Deserialize, Serialize};

const ALPHA_LOW: &str = "abcdefghijklmnopqrstuvwxyz";
const ALPHA_UP: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMERALS: &str = "0123456789";
const GREEK_LOW: &str = "αβγδεζηθικλμνξοπρστυφχψω";
const GREEK_UP: &str = "ΑΒΓΔΕΖΗΘΙΚΛΜΝΞΟΠΡΣΤΥΦΧΨΩ";
const CYRILLIC_LOW: &str = "абвгдежзийклмнопрстуфхцчшщьюя";
const CYRILLIC_UP: &str = "АБВГДЕЖЗИЙКЛМНОПРСТУФХЦЧШЩЬЮЯ";
const ARABIC: &str = "غظضذخثتشرقصفعسنملكيطحزوهدجبأ";
const HEBREW: &str = "אבגדהוזחטיכמנסעפצקרשת";

/// Base alphabets in registry order. Keyword synthesis walks this list, so
/// the order is part of the deterministic contract.
const BASE_PRESETS: [(&str, &str); 9] = [
    ("alpha_low", ALPHA_LOW),
    ("alpha_up", ALPHA_UP),
    ("numerals", NUMERALS),
    ("greek_low", GREEK_LOW),
    ("greek_up", GREEK_UP),
    ("cyrillic_low", CYRILLIC_LOW),
    ("cyrillic_up", CYRILLIC_UP),
    ("arabic", ARABIC),
    ("hebrew", HEBREW),
];

/// The ordered alphabet a cipher operates over. Built once per session and
/// never mutated; order only matters for deterministic output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charset {
    symbols: Vec<Symbol>,
}

impl Charset {
    /// Builds a charset from any symbol sequence, keeping the first
    /// occurrence of each symbol and dropping later duplicates.
    pub fn from_symbols<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut symbols = Vec::new();
        for sym in iter {
            if !symbols.contains(&sym) {
                symbols.push(sym);
            }
        }
        Self { symbols }
    }

    /// Looks up a registered alphabet by name. Combined variants (`alpha`,
    /// `alphanumeric`, `greek`, `cyrillic`) concatenate upper before lower,
    /// matching the literal tables this registry was seeded from.
    pub fn from_preset(name: &str) -> Result<Self> {
        if let Some((_, table)) = BASE_PRESETS.iter().find(|(key, _)| *key == name) {
            return Ok(Self::from_symbols(table.chars()));
        }
        let combined = match name {
            "alpha" => [ALPHA_UP, ALPHA_LOW].concat(),
            "alphanumeric" => [ALPHA_UP, ALPHA_LOW, NUMERALS].concat(),
            "greek" => [GREEK_UP, GREEK_LOW].concat(),
            "cyrillic" => [CYRILLIC_UP, CYRILLIC_LOW].concat(),
            _ => return Err(CipherError::UnknownPreset(name.to_string())),
        };
        Ok(Self::from_symbols(combined.chars()))
    }

    /// Synthesizes a charset from a keyword: the unique symbols of `seed` in
    /// first-occurrence order, followed by the leftover symbols of every base
    /// alphabet that contributed at least one seed symbol, alphabet by
    /// alphabet in registry order.
    pub fn from_keyword(seed: &str) -> Self {
        let mut symbols: Vec<Symbol> = Vec::new();
        for sym in seed.chars() {
            if !symbols.contains(&sym) {
                symbols.push(sym);
            }
        }
        for (_, table) in BASE_PRESETS.iter() {
            if seed.chars().any(|sym| table.contains(sym)) {
                for sym in table.chars() {
                    if !symbols.contains(&sym) {
                        symbols.push(sym);
                    }
                }
            }
        }
        Self { symbols }
    }

    pub fn contains(&self, sym: Symbol) -> bool {
        self.symbols.contains(&sym)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.iter().copied()
    }
}
