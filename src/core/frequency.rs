// File: src/core/frequency.rs
use crate::core::charset::Charset;
use crate::core::types::Symbol;
use crate::error::{CipherError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A symbol-to-probability distribution: either the language-level reference
/// ideal or the empirical estimate computed from ciphertext.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTable {
    probs: BTreeMap<Symbol, f64>,
}

impl FrequencyTable {
    /// Probability of `sym`; symbols absent from the table have implied
    /// frequency zero.
    pub fn get(&self, sym: Symbol) -> f64 {
        self.probs.get(&sym).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, sym: Symbol, prob: f64) {
        self.probs.insert(sym, prob);
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, f64)> + '_ {
        self.probs.iter().map(|(&sym, &prob)| (sym, prob))
    }

    pub fn sum(&self) -> f64 {
        self.probs.values().sum()
    }

    /// Entries sorted by ascending probability, ties broken by symbol order
    /// so rank alignment is deterministic.
    pub fn sorted_ascending(&self) -> Vec<(Symbol, f64)> {
        let mut entries: Vec<(Symbol, f64)> = self.iter().collect();
        entries.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        entries
    }
}

impl FromIterator<(Symbol, f64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (Symbol, f64)>>(iter: I) -> Self {
        Self {
            probs: iter.into_iter().collect(),
        }
    }
}

/// Empirical per-symbol frequency estimate for one ciphertext. Computed once
/// and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyProfile {
    table: FrequencyTable,
    sample_size: u64,
}

impl FrequencyProfile {
    /// Counts in-charset symbols in `text` and normalizes to a probability
    /// distribution. Symbols outside the charset are ignored; charset symbols
    /// that never occur are omitted (implied frequency zero). A text with no
    /// in-charset symbols at all yields `EmptySample`.
    pub fn from_text(text: &str, charset: &Charset) -> Result<Self> {
        let mut counts: BTreeMap<Symbol, u64> = BTreeMap::new();
        let mut total: u64 = 0;
        for sym in text.chars() {
            if charset.contains(sym) {
                *counts.entry(sym).or_insert(0) += 1;
                total += 1;
            }
        }
        if total == 0 {
            return Err(CipherError::EmptySample);
        }
        let table = counts
            .into_iter()
            .map(|(sym, count)| (sym, count as f64 / total as f64))
            .collect();
        Ok(Self {
            table,
            sample_size: total,
        })
    }

    /// Parses a serialized frequency table: one `<symbol>:<probability>` pair
    /// per line, blank lines skipped. A line with the wrong shape, a
    /// multi-symbol key, or a probability that is not a finite non-negative
    /// number is rejected with the offending line number and content.
    pub fn load_reference(source: &str) -> Result<FrequencyTable> {
        let mut table = FrequencyTable::default();
        for (idx, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = || CipherError::MalformedFrequencyEntry {
                line: idx + 1,
                content: raw.to_string(),
            };
            let (key, value) = line.split_once(':').ok_or_else(malformed)?;
            let mut key_chars = key.chars();
            let sym = key_chars.next().ok_or_else(malformed)?;
            if key_chars.next().is_some() {
                return Err(malformed());
            }
            let prob: f64 = value.trim().parse().map_err(|_| malformed())?;
            if !prob.is_finite() || prob < 0.0 {
                return Err(malformed());
            }
            table.set(sym, prob);
        }
        Ok(table)
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Number of in-charset symbols that went into the estimate.
    pub fn sample_size(&self) -> u64 {
        self.sample_size
    }
}
