// src/lib.rs

pub mod core;
pub mod error;
pub mod persistence;

pub use crate::core::analyzer::{Analysis, Cryptanalyzer, Termination};
pub use crate::core::charset::Charset;
pub use crate::core::codec::Codec;
pub use crate::core::frequency::{FrequencyProfile, FrequencyTable};
pub use crate::core::mapping::SubstitutionMap;
pub use crate::error::{CipherError, Result};
