// File: src/core/codec.rs
use crate::core::charset::Charset;
use crate::core::mapping::SubstitutionMap;
use crate::core::types::{Symbol, DEFAULT_PLACEHOLDER};
use crate::error::Result;

/// Translates text through a [`SubstitutionMap`]. The placeholder used for
/// unmapped in-charset symbols is an explicit field here, not a module-level
/// global.
#[derive(Debug, Clone, Copy)]
pub struct Codec {
    placeholder: Symbol,
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }
}

impl Codec {
    pub fn new(placeholder: Symbol) -> Self {
        Self { placeholder }
    }

    pub fn placeholder(&self) -> Symbol {
        self.placeholder
    }

    /// Decodes ciphertext. Mapped symbols become their images, in-charset
    /// symbols without an image become the placeholder, and everything else
    /// (punctuation, whitespace, foreign symbols) passes through unchanged.
    /// Total over any input.
    pub fn decode(&self, text: &str, map: &SubstitutionMap, charset: &Charset) -> String {
        text.chars()
            .map(|sym| match map.get(sym) {
                Some(image) => image,
                None if charset.contains(sym) => self.placeholder,
                None => sym,
            })
            .collect()
    }

    /// Encodes plaintext by running symbols through the inverted map.
    /// Fails with `NotBijective` when the map cannot be inverted; encoding
    /// under an ambiguous key must fail loudly, not pass text through.
    pub fn encode(&self, text: &str, map: &SubstitutionMap) -> Result<String> {
        let inverse = map.invert()?;
        Ok(text
            .chars()
            .map(|sym| inverse.get(sym).unwrap_or(sym))
            .collect())
    }
}
