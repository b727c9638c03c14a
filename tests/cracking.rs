// End-to-end cryptanalysis: synthesize ciphertext whose letter statistics
// follow a known reference, encrypt under a key the analyzer never sees, and
// check what comes back.
use cipher_core::{
    Charset, Codec, Cryptanalyzer, FrequencyProfile, FrequencyTable, SubstitutionMap, Termination,
};

/// Reference distribution over a..z with strictly decreasing, well-separated
/// probabilities: symbol i gets weight 26 - i.
fn skewed_reference(charset: &Charset) -> FrequencyTable {
    let total: f64 = (1..=26).map(f64::from).sum();
    charset
        .iter()
        .enumerate()
        .map(|(i, sym)| (sym, (26 - i) as f64 / total))
        .collect()
}

/// Plaintext whose counts match the reference weights exactly: 26 copies of
/// 'a', 25 of 'b', ... 1 of 'z'.
fn faithful_plaintext(charset: &Charset) -> String {
    let mut text = String::new();
    for (i, sym) in charset.iter().enumerate() {
        for _ in 0..(26 - i) {
            text.push(sym);
        }
    }
    text
}

/// A fixed scrambling of a..z used as the decode key (cipher -> plain).
fn fixed_key(charset: &Charset) -> SubstitutionMap {
    let mut key = SubstitutionMap::blank();
    for (i, sym) in charset.iter().enumerate() {
        // An affine shuffle: position i receives the plain symbol at
        // (7 * i + 3) mod 26. gcd(7, 26) = 1, so this is a permutation.
        key.set(sym, charset.symbols()[(7 * i + 3) % 26]);
    }
    key
}

#[test]
fn distribution_faithful_ciphertext_is_fully_recovered() {
    let charset = Charset::from_preset("alpha_low").unwrap();
    let reference = skewed_reference(&charset);
    let key = fixed_key(&charset);
    let codec = Codec::default();

    let plaintext = faithful_plaintext(&charset);
    let ciphertext = codec.encode(&plaintext, &key).unwrap();
    assert_ne!(ciphertext, plaintext);

    let analyzer = Cryptanalyzer::new(charset.clone(), reference);
    let analysis = analyzer.analyze(&ciphertext).unwrap();

    // Every count is distinct, so rank alignment alone pins the whole key
    // and the search terminates at a perfect fit.
    assert_eq!(analysis.mapping, key);
    assert!(analysis.score < 1e-9);
    assert_eq!(analysis.termination, Termination::LocalOptimum);
    assert_eq!(
        codec.decode(&ciphertext, &analysis.mapping, &charset),
        plaintext
    );
}

#[test]
fn true_key_scores_no_worse_than_the_rank_guess() {
    let charset = Charset::from_preset("alpha_low").unwrap();
    let reference = skewed_reference(&charset);
    let key = fixed_key(&charset);
    let codec = Codec::default();

    // Repeating the faithful text with one run truncated perturbs the counts
    // slightly, so the guess may differ from the key.
    let mut plaintext = faithful_plaintext(&charset);
    plaintext.push_str(&faithful_plaintext(&charset)[..200]);
    let ciphertext = codec.encode(&plaintext, &key).unwrap();

    let analyzer = Cryptanalyzer::new(charset.clone(), reference);
    let profile = FrequencyProfile::from_text(&ciphertext, &charset).unwrap();
    let guess = analyzer.initial_guess(profile.table());

    let true_score = analyzer.chi_squared(&key, &ciphertext);
    let guess_score = analyzer.chi_squared(&guess, &ciphertext);
    assert!(true_score <= guess_score);

    let analysis = analyzer.refine(guess, &ciphertext).unwrap();
    assert!(analysis.score <= guess_score);
}

#[test]
fn round_trip_through_map_file_preserves_a_recovered_key() {
    let charset = Charset::from_preset("alpha_low").unwrap();
    let key = fixed_key(&charset);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recovered.map");
    cipher_core::persistence::write_mapping(&charset, &key, &path).unwrap();
    let read = cipher_core::persistence::read_mapping(&path).unwrap();
    assert_eq!(read, key);
    let permutation = read.as_permutation(&charset).unwrap();
    assert_eq!(permutation.image('a'), key.get('a'));
    assert_eq!(permutation.as_map(), &key);
}

#[test]
fn out_of_charset_text_passes_through_the_whole_pipeline() {
    let charset = Charset::from_symbols("abcxyz".chars());
    let reference: FrequencyTable = [('a', 0.6), ('b', 0.3), ('c', 0.1)].into_iter().collect();
    let analyzer = Cryptanalyzer::new(charset.clone(), reference);

    // Punctuation and whitespace must survive decode untouched.
    let analysis = analyzer.analyze("xxx, xxx! yyyy... z?").unwrap();
    let decoded = Codec::default().decode("xxx, xxx! yyyy... z?", &analysis.mapping, &charset);
    assert_eq!(decoded, "aaa, aaa! bbbb... c?");
}
