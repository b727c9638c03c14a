pub mod analyzer;
pub mod charset;
pub mod codec;
pub mod frequency;
pub mod mapping;
pub mod types;
