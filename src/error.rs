// File: src/error.rs
use crate::core::types::Symbol;
use thiserror::Error;

/// Everything that can go wrong while building charsets, mappings, or
/// running an analysis.
#[derive(Debug, Error)]
pub enum CipherError {
    /// No charset is registered under the requested name.
    #[error("unknown charset preset '{0}'")]
    UnknownPreset(String),

    /// A charset symbol has no image; the mapping is not total.
    #[error("charset symbol '{0}' has no image in the mapping")]
    IncompleteMapping(Symbol),

    /// Two cipher symbols share an image, or an image falls outside the
    /// charset. The offending symbol is reported.
    #[error("mapping is not a bijection over the charset (symbol '{0}')")]
    NotBijective(Symbol),

    /// A swap was requested on a symbol that currently has no image.
    #[error("symbol '{0}' is not mapped and cannot be swapped")]
    SymbolNotMapped(Symbol),

    /// The sample text contained no in-charset symbols, so no frequency
    /// estimate is possible.
    #[error("sample text contains no in-charset symbols")]
    EmptySample,

    /// A frequency file line did not parse as `<symbol>:<probability>`.
    #[error("malformed frequency entry on line {line}: '{content}'")]
    MalformedFrequencyEntry { line: usize, content: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session state error: {0}")]
    Session(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, CipherError>;
