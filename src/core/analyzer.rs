// File: src/core/analyzer.rs
use crate::core::charset::Charset;
use crate::core::codec::Codec;
use crate::core::frequency::{FrequencyProfile, FrequencyTable};
use crate::core::mapping::SubstitutionMap;
use crate::core::types::Symbol;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default cap on refinement iterations. Each iteration scores a full
/// pairwise-swap neighborhood, so a few hundred sweeps is far more than any
/// realistic alphabet needs to converge.
pub const DEFAULT_MAX_ITERATIONS: usize = 300;

/// Why the refinement loop stopped. Running out of budget is a reported
/// outcome, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// No pairwise swap improved the score; a local optimum was reached.
    LocalOptimum,
    /// The iteration budget ran out first; the best candidate so far is
    /// returned.
    BudgetExhausted,
}

/// The outcome of an analysis: the best mapping found, its chi-squared score
/// (lower is better, 0 is a perfect distribution fit), and how the search
/// ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub mapping: SubstitutionMap,
    pub score: f64,
    pub iterations: usize,
    pub termination: Termination,
}

/// Recovers an unknown substitution key from ciphertext alone, in two
/// phases: frequency-rank alignment for the initial guess, then a
/// chi-squared-guided hill climb over pairwise swaps. Both phases are
/// deterministic for fixed inputs.
pub struct Cryptanalyzer {
    charset: Charset,
    reference: FrequencyTable,
    codec: Codec,
    max_iterations: usize,
}

impl Cryptanalyzer {
    pub fn new(charset: Charset, reference: FrequencyTable) -> Self {
        Self {
            charset,
            reference,
            codec: Codec::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Overrides the iteration budget. A budget of zero returns the initial
    /// guess unrefined.
    pub fn with_budget(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    pub fn reference(&self) -> &FrequencyTable {
        &self.reference
    }

    /// Phase 1: rank alignment. Sorts both distributions by ascending
    /// probability and pairs the i-th empirical symbol with the i-th
    /// reference symbol. Letter frequency is the strongest single signal for
    /// a monoalphabetic cipher, so this lands far closer to the key than a
    /// random start. Charset symbols with zero observed occurrences stay
    /// unmapped.
    pub fn initial_guess(&self, empirical: &FrequencyTable) -> SubstitutionMap {
        let mut mapping = SubstitutionMap::blank();
        for ((cipher, _), (plain, _)) in empirical
            .sorted_ascending()
            .into_iter()
            .zip(self.reference.sorted_ascending())
        {
            mapping.set(cipher, plain);
        }
        mapping
    }

    /// Goodness of fit of `mapping` against the reference distribution.
    /// Decodes the ciphertext, counts each mapped symbol's decoded output,
    /// and accumulates Σ (observed − expected)² / expected. A reference
    /// probability of zero would divide by zero; that term is skipped instead
    /// of faulting. Only currently-mapped symbols contribute, so partial
    /// candidates are scored over their mapped subset.
    pub fn chi_squared(&self, mapping: &SubstitutionMap, ciphertext: &str) -> f64 {
        let decoded = self.codec.decode(ciphertext, mapping, &self.charset);
        let mut observed: BTreeMap<Symbol, u64> = BTreeMap::new();
        let mut total: u64 = 0;
        for sym in decoded.chars() {
            if self.charset.contains(sym) {
                *observed.entry(sym).or_insert(0) += 1;
                total += 1;
            }
        }
        let mut score = 0.0;
        for (_, image) in mapping.iter() {
            let expected = self.reference.get(image) * total as f64;
            if expected == 0.0 {
                continue;
            }
            let count = observed.get(&image).copied().unwrap_or(0) as f64;
            score += (count - expected) * (count - expected) / expected;
        }
        score
    }

    /// Phase 2: steepest-descent hill climb. Each iteration scores every
    /// pairwise swap of currently-mapped symbols and moves to the best
    /// neighbor only on a strict improvement; the first best pair in
    /// ascending symbol order wins ties, keeping runs reproducible. Stops at
    /// a local optimum or when the budget runs out, whichever comes first.
    /// The score sequence is monotone non-increasing.
    pub fn refine(&self, start: SubstitutionMap, ciphertext: &str) -> Result<Analysis> {
        let mut current = start;
        let mut current_score = self.chi_squared(&current, ciphertext);
        let mut iterations = 0;
        let mut termination = Termination::BudgetExhausted;

        while iterations < self.max_iterations {
            iterations += 1;
            let mapped: Vec<Symbol> = current.mapped_symbols().collect();
            let mut best: Option<(f64, SubstitutionMap)> = None;
            for (i, &a) in mapped.iter().enumerate() {
                for &b in &mapped[i + 1..] {
                    let candidate = current.swapped(a, b)?;
                    let score = self.chi_squared(&candidate, ciphertext);
                    let bar = best.as_ref().map_or(current_score, |(s, _)| *s);
                    if score < bar {
                        best = Some((score, candidate));
                    }
                }
            }
            match best {
                Some((score, mapping)) => {
                    current = mapping;
                    current_score = score;
                }
                None => {
                    termination = Termination::LocalOptimum;
                    break;
                }
            }
        }

        Ok(Analysis {
            mapping: current,
            score: current_score,
            iterations,
            termination,
        })
    }

    /// Full pipeline: empirical estimate, rank-aligned guess, refinement.
    /// `EmptySample` from the estimate is fatal; nothing can be guessed from
    /// a text with no in-charset symbols.
    pub fn analyze(&self, ciphertext: &str) -> Result<Analysis> {
        let profile = FrequencyProfile::from_text(ciphertext, &self.charset)?;
        let guess = self.initial_guess(profile.table());
        self.refine(guess, ciphertext)
    }
}
