// File: src/core/mapping.rs
use crate::core::charset::Charset;
use crate::core::types::Symbol;
use crate::error::{CipherError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cipher-symbol to plain-symbol correspondence. May be partial (some
/// symbols unmapped) or a total permutation over a charset; totality is
/// validated at the boundary by [`SubstitutionMap::as_permutation`] instead
/// of being re-checked at every call site.
///
/// Keys live in a `BTreeMap` so iteration order is the symbol order; the
/// search's deterministic tie-break relies on that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionMap {
    entries: BTreeMap<Symbol, Symbol>,
}

impl SubstitutionMap {
    /// An empty, fully partial mapping.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Maps every charset symbol to itself.
    pub fn identity(charset: &Charset) -> Self {
        let entries = charset.iter().map(|sym| (sym, sym)).collect();
        Self { entries }
    }

    /// A uniformly random total permutation over `charset`. Callers pass the
    /// RNG explicitly so a seeded generator gives reproducible keys.
    pub fn random<R: Rng>(charset: &Charset, rng: &mut R) -> Self {
        let mut images: Vec<Symbol> = charset.iter().collect();
        images.shuffle(rng);
        let entries = charset.iter().zip(images).collect();
        Self { entries }
    }

    /// Inserts or overwrites one correspondence. Does not enforce bijection;
    /// partial maps are built through here.
    pub fn set(&mut self, cipher: Symbol, plain: Symbol) {
        self.entries.insert(cipher, plain);
    }

    pub fn get(&self, cipher: Symbol) -> Option<Symbol> {
        self.entries.get(&cipher).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All currently mapped cipher symbols, ascending.
    pub fn mapped_symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.entries.keys().copied()
    }

    /// (cipher, plain) pairs in ascending cipher-symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, Symbol)> + '_ {
        self.entries.iter().map(|(&c, &p)| (c, p))
    }

    /// Validates the total-permutation invariant over `charset` and returns
    /// the checked view. Every charset symbol must have exactly one image,
    /// every image must be a charset symbol, and no image may repeat.
    pub fn as_permutation(&self, charset: &Charset) -> Result<Permutation> {
        for (cipher, plain) in self.iter() {
            if !charset.contains(cipher) || !charset.contains(plain) {
                return Err(CipherError::NotBijective(cipher));
            }
        }
        for sym in charset.iter() {
            if self.get(sym).is_none() {
                return Err(CipherError::IncompleteMapping(sym));
            }
        }
        let inverse = self.invert()?;
        debug_assert_eq!(inverse.len(), charset.len());
        Ok(Permutation { map: self.clone() })
    }

    /// A copy with the images of `a` and `b` exchanged. Swapping two images
    /// of a permutation yields another permutation, so this is the only
    /// mutation the search needs.
    pub fn swapped(&self, a: Symbol, b: Symbol) -> Result<Self> {
        let image_a = self.get(a).ok_or(CipherError::SymbolNotMapped(a))?;
        let image_b = self.get(b).ok_or(CipherError::SymbolNotMapped(b))?;
        let mut next = self.clone();
        next.entries.insert(a, image_b);
        next.entries.insert(b, image_a);
        Ok(next)
    }

    /// The plain-to-cipher direction, required for encoding. Fails on the
    /// first duplicated image rather than silently dropping entries.
    pub fn invert(&self) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (cipher, plain) in self.iter() {
            if entries.insert(plain, cipher).is_some() {
                return Err(CipherError::NotBijective(plain));
            }
        }
        Ok(Self { entries })
    }
}

/// A [`SubstitutionMap`] that passed total-permutation validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    map: SubstitutionMap,
}

impl Permutation {
    pub fn image(&self, cipher: Symbol) -> Option<Symbol> {
        self.map.get(cipher)
    }

    pub fn as_map(&self) -> &SubstitutionMap {
        &self.map
    }

    pub fn into_map(self) -> SubstitutionMap {
        self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn abc() -> Charset {
        Charset::from_symbols("abc".chars())
    }

    #[test]
    fn identity_maps_every_symbol_to_itself() {
        let map = SubstitutionMap::identity(&abc());
        assert_eq!(map.get('a'), Some('a'));
        assert_eq!(map.get('b'), Some('b'));
        assert_eq!(map.get('c'), Some('c'));
        assert!(map.as_permutation(&abc()).is_ok());
    }

    #[test]
    fn swapped_exchanges_two_images() {
        let map = SubstitutionMap::identity(&abc());
        let swapped = map.swapped('a', 'c').unwrap();
        assert_eq!(swapped.get('a'), Some('c'));
        assert_eq!(swapped.get('c'), Some('a'));
        assert_eq!(swapped.get('b'), Some('b'));
        // Still a permutation.
        assert!(swapped.as_permutation(&abc()).is_ok());
        // The receiver is untouched.
        assert_eq!(map.get('a'), Some('a'));
    }

    #[test]
    fn swapping_an_unmapped_symbol_fails() {
        let mut map = SubstitutionMap::blank();
        map.set('a', 'b');
        match map.swapped('a', 'z') {
            Err(CipherError::SymbolNotMapped(sym)) => assert_eq!(sym, 'z'),
            other => panic!("expected SymbolNotMapped, got {:?}", other),
        }
    }

    #[test]
    fn as_permutation_rejects_missing_images() {
        let mut map = SubstitutionMap::blank();
        map.set('a', 'b');
        map.set('b', 'a');
        match map.as_permutation(&abc()) {
            Err(CipherError::IncompleteMapping(sym)) => assert_eq!(sym, 'c'),
            other => panic!("expected IncompleteMapping, got {:?}", other),
        }
    }

    #[test]
    fn as_permutation_rejects_duplicate_images() {
        let mut map = SubstitutionMap::blank();
        map.set('a', 'b');
        map.set('b', 'b');
        map.set('c', 'a');
        assert!(matches!(
            map.as_permutation(&abc()),
            Err(CipherError::NotBijective(_))
        ));
    }

    #[test]
    fn as_permutation_rejects_out_of_charset_images() {
        let mut map = SubstitutionMap::identity(&abc());
        map.set('a', 'z');
        assert!(matches!(
            map.as_permutation(&abc()),
            Err(CipherError::NotBijective(_))
        ));
    }

    #[test]
    fn invert_round_trips_a_permutation() {
        let mut map = SubstitutionMap::blank();
        map.set('a', 'c');
        map.set('b', 'a');
        map.set('c', 'b');
        let inverse = map.invert().unwrap();
        assert_eq!(inverse.get('c'), Some('a'));
        assert_eq!(inverse.invert().unwrap(), map);
    }

    #[test]
    fn invert_fails_on_shared_image() {
        let mut map = SubstitutionMap::blank();
        map.set('a', 'x');
        map.set('b', 'x');
        match map.invert() {
            Err(CipherError::NotBijective(sym)) => assert_eq!(sym, 'x'),
            other => panic!("expected NotBijective, got {:?}", other),
        }
    }

    #[test]
    fn random_key_is_a_permutation_and_seed_reproducible() {
        let charset = Charset::from_preset("alpha_low").unwrap();
        let a = SubstitutionMap::random(&charset, &mut StdRng::seed_from_u64(7));
        let b = SubstitutionMap::random(&charset, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(a.as_permutation(&charset).is_ok());
    }
}
