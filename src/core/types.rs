// src/core/types.rs

/// A single cipher or plain symbol. The engine works on Unicode scalar
/// values so non-Latin alphabets (Greek, Cyrillic, Arabic, Hebrew) need no
/// special casing.
pub type Symbol = char;

/// Fill character emitted for in-charset symbols that have no image yet.
pub const DEFAULT_PLACEHOLDER: Symbol = '_';
