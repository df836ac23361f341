//! Integration tests for the composite cipher pipelines.
//!
//! These tests drive the public API end to end: options -> pipeline ->
//! encrypt -> decrypt, with verification that the output matches the
//! normalized input.

use classic_cipher_core::{
    build_checkerboard, build_square,
    ciphers::{adfgvx, bifid, nihilist, rs44, straddling, trifid, vic},
    config::{CheckerboardType, KeyType, MonoParams, SquareType},
    keygen::{generate_key_for_text, generate_random_key, seeded_rng, VicKeys},
    mono::Bijection,
    Alphabet, AlphabetError, Direction, Error, Language, Options,
};

/// The reference VIC scenario: static keystream, one pass.
#[test]
fn test_vic_reference_scenario() {
    let options = Options::default();

    let ciphertext = vic::encrypt("HELLO", "SECRET", "CIPHER", "KEY", "12345", &options)
        .expect("encryption failed");
    let plaintext = vic::decrypt(&ciphertext, "SECRET", "CIPHER", "KEY", "12345", &options)
        .expect("decryption failed");

    assert_eq!(plaintext, "hello");
}

/// Chain addition changes the ciphertext but still round-trips.
#[test]
fn test_vic_chain_addition_scenario() {
    let static_options = Options::default();
    let chain_options = Options {
        use_chain_addition: true,
        ..Options::default()
    };

    let static_ct = vic::encrypt("HELLO", "SECRET", "CIPHER", "KEY", "12345", &static_options)
        .expect("static encryption failed");
    let chain_ct = vic::encrypt("HELLO", "SECRET", "CIPHER", "KEY", "12345", &chain_options)
        .expect("chain encryption failed");
    assert_ne!(static_ct, chain_ct);

    let plaintext = vic::decrypt(&chain_ct, "SECRET", "CIPHER", "KEY", "12345", &chain_options)
        .expect("chain decryption failed");
    assert_eq!(plaintext, "hello");
}

/// Every square type with a longer message and all pass counts.
#[test]
fn test_vic_square_types_and_passes() {
    let text = "Rendezvous at the old bridge 0400 hours";
    let expected = "rendezvousattheoldbridge0400hours";

    let mut params = MonoParams::default();
    params.shift = Some(7);
    params.a = Some(5);
    params.b = Some(8);

    for square_type in [
        SquareType::Standard,
        SquareType::Frequency,
        SquareType::Keyword,
        SquareType::Caesar,
        SquareType::Atbash,
        SquareType::Affine,
    ] {
        for passes in 1..=3 {
            let options = Options {
                square_type,
                mono_params: params.clone(),
                transposition_passes: passes,
                use_chain_addition: passes % 2 == 0,
                ..Options::default()
            };
            let ciphertext = vic::encrypt(text, "SECRET", "CIPHER", "KEY", "12345", &options)
                .unwrap_or_else(|e| panic!("{} x{} failed: {}", square_type, passes, e));
            let plaintext = vic::decrypt(&ciphertext, "SECRET", "CIPHER", "KEY", "12345", &options)
                .unwrap_or_else(|e| panic!("{} x{} failed: {}", square_type, passes, e));
            assert_eq!(plaintext, expected, "{} with {} passes", square_type, passes);
        }
    }
}

/// Keys that do not match the ciphertext never panic.
#[test]
fn test_vic_wrong_keys_do_not_panic() {
    let options = Options::default();
    let ciphertext = vic::encrypt("attack at dawn", "SECRET", "CIPHER", "KEY", "12345", &options)
        .expect("encryption failed");

    for (poly, board, trans, num) in [
        ("OTHER", "CIPHER", "KEY", "12345"),
        ("SECRET", "BOARD", "KEY", "12345"),
        ("SECRET", "CIPHER", "LONGERKEY", "12345"),
        ("SECRET", "CIPHER", "KEY", "99"),
    ] {
        if let Ok(plaintext) = vic::decrypt(&ciphertext, poly, board, trans, num, &options) {
            assert_ne!(plaintext, "attackatdawn");
        }
    }
}

/// Random VIC keys from a seeded RNG are reproducible.
#[test]
fn test_vic_random_keys() {
    let options = Options::default();
    let (ct1, keys1) = vic::encrypt_with_random_keys(&mut seeded_rng(99), "a quiet place", &options)
        .expect("encryption failed");
    let (ct2, keys2) = vic::encrypt_with_random_keys(&mut seeded_rng(99), "a quiet place", &options)
        .expect("encryption failed");

    assert_eq!(keys1, keys2);
    assert_eq!(ct1, ct2);
    assert_eq!(keys1, VicKeys::from_seed(99).expect("key generation failed"));
}

/// ADFGVX variants round-trip under every square type that fits.
#[test]
fn test_adfgvx_round_trips() {
    let options = Options {
        square_type: SquareType::Frequency,
        transposition_passes: 2,
        ..Options::default()
    };
    let ciphertext =
        adfgvx::encrypt("Munitions 1918", "MARNE", &options).expect("encryption failed");
    assert_eq!(
        adfgvx::decrypt(&ciphertext, "MARNE", &options).expect("decryption failed"),
        "munitions1918"
    );

    for variant in [adfgvx::Variant::Adfgx, adfgvx::Variant::Adfgvzx] {
        let ciphertext = adfgvx::encrypt_with(variant, "retreat now", "SOMME", &Options::default())
            .expect("encryption failed");
        let plaintext =
            adfgvx::decrypt_with(variant, &ciphertext, "SOMME", &Options::default())
                .expect("decryption failed");
        assert_eq!(plaintext, "retreatnow");
    }
}

/// Nihilist, straddling checkerboard, Bifid, Trifid and Rasterschlüssel 44 round trips.
#[test]
fn test_other_ciphers_round_trip() {
    let options = Options::default();
    let text = "Send more supplies";
    let expected = "sendmoresupplies";

    let ct = nihilist::encrypt(text, "4821", &options).expect("nihilist failed");
    assert_eq!(nihilist::decrypt(&ct, "4821", &options).expect("nihilist failed"), expected);

    let ct = straddling::encrypt(text, "4821", &options).expect("straddling failed");
    assert_eq!(straddling::decrypt(&ct, "4821", &options).expect("straddling failed"), expected);

    let ct = bifid::encrypt(text, "LOGISTICS", &options).expect("bifid failed");
    assert_eq!(bifid::decrypt(&ct, "LOGISTICS", &options).expect("bifid failed"), expected);

    let ct = trifid::encrypt(text, "LOGISTICS", &options).expect("trifid failed");
    assert_eq!(trifid::decrypt(&ct, "LOGISTICS", &options).expect("trifid failed"), expected);

    let ct = rs44::encrypt(text, "LOGISTICS", Some("GRID"), &options).expect("rs44 failed");
    assert!(ct.chars().all(|c| ('0'..='5').contains(&c)));
    assert_eq!(
        rs44::decrypt(&ct, "LOGISTICS", Some("GRID"), &options).expect("rs44 failed"),
        expected
    );
}

/// Options parsed from text drive the ciphers the same way as literals.
#[test]
fn test_options_from_pairs() {
    let options = Options::from_pairs([
        ("square_type", "affine"),
        ("a", "5"),
        ("b", "3"),
        ("language", "turkish"),
        ("transposition_passes", "2"),
        ("use_chain_addition", "true"),
    ])
    .expect("options failed to parse");

    let ciphertext =
        vic::encrypt("Çiçek açtı", "GİZLİ", "ŞİFRE", "ANAHTAR", "31415", &options)
            .expect("encryption failed");
    let plaintext = vic::decrypt(&ciphertext, "GİZLİ", "ŞİFRE", "ANAHTAR", "31415", &options)
        .expect("decryption failed");
    assert_eq!(plaintext, "çiçekaçtı");
}

/// Unknown option names and values are rejected at the boundary.
#[test]
fn test_options_rejects_bad_values() {
    assert!(matches!(
        Options::from_pairs([("square_type", "hexagonal")]),
        Err(Error::InvalidStrategy { .. })
    ));
    assert!(matches!(
        Options::from_pairs([("transposition_passes", "4")]),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        Options::from_pairs([("colour", "blue")]),
        Err(Error::Config(_))
    ));
}

/// Affine with a = 2 over 26 letters has no inverse.
#[test]
fn test_affine_non_invertible() {
    let result = Bijection::Affine { a: 2, b: 1 }.apply(&Alphabet::letters(Language::English));
    assert_eq!(
        result,
        Err(Error::NonInvertibleParameter { a: 2, modulus: 26 })
    );

    let mut params = MonoParams::default();
    params.a = Some(2);
    params.b = Some(1);
    let result = build_square(SquareType::Affine, None, None, &params, Language::English);
    assert_eq!(
        result,
        Err(Error::NonInvertibleParameter { a: 2, modulus: 36 })
    );

    params.b = Some(0);
    let letters = Alphabet::letters(Language::English);
    let result = build_square(SquareType::Affine, None, Some(&letters), &params, Language::English);
    assert_eq!(
        result,
        Err(Error::NonInvertibleParameter { a: 2, modulus: 26 })
    );
}

/// Square and checkerboard builders expose their textual forms.
#[test]
fn test_builders_render() {
    let square = build_square(
        SquareType::Standard,
        None,
        None,
        &MonoParams::default(),
        Language::English,
    )
    .expect("square failed");
    assert_eq!(
        square.to_string(),
        "abcdef\nghijkl\nmnopqr\nstuvwx\nyz0123\n456789"
    );

    let board = build_checkerboard(CheckerboardType::Standard, None, None, Language::English)
        .expect("checkerboard failed");
    let text = board.to_string();
    assert!(text.starts_with("a:0,b:3,c:4,"));
    assert!(text.ends_with("z:27"));
}

/// Missing strategy parameters are reported by name.
#[test]
fn test_missing_parameters() {
    let options = Options {
        square_type: SquareType::Caesar,
        ..Options::default()
    };
    assert_eq!(
        vic::encrypt("hello", "SECRET", "CIPHER", "KEY", "12345", &options),
        Err(Error::MissingParameter {
            strategy: "caesar",
            parameter: "shift"
        })
    );

    let options = Options {
        checkerboard_type: CheckerboardType::Keyword,
        ..Options::default()
    };
    assert!(matches!(
        straddling::encrypt("hello", "123", &options),
        Err(Error::MissingParameter { .. })
    ));
}

/// Alphabets outside what a cipher can use are rejected up front.
#[test]
fn test_alphabet_errors() {
    assert!(matches!(
        Alphabet::new("abca"),
        Err(Error::Alphabet(AlphabetError::DuplicateSymbol { symbol: 'a', .. }))
    ));

    let options = Options {
        alphabet: Some(Alphabet::letters(Language::Turkish)),
        ..Options::default()
    };
    assert!(matches!(
        vic::encrypt("merhaba", "SECRET", "CIPHER", "KEY", "12345", &options),
        Err(Error::Alphabet(AlphabetError::SizeMismatch { expected: 36, .. }))
    ));
}

/// Generated keys drive the ciphers that take them.
#[test]
fn test_generated_keys() {
    let mut rng = seeded_rng(5);
    let alphabet = Alphabet::letters(Language::English);

    let key = generate_key_for_text(&mut rng, "one time", KeyType::Numeric, &alphabet)
        .expect("key generation failed");
    assert_eq!(key.len(), 7);
    let ct = straddling::encrypt("one time", &key, &Options::default()).expect("encryption failed");
    assert_eq!(
        straddling::decrypt(&ct, &key, &Options::default()).expect("decryption failed"),
        "onetime"
    );

    let key = generate_random_key(&mut rng, 8, KeyType::Alphabetic).expect("key generation failed");
    let options = Options {
        key_type: KeyType::Alphabetic,
        ..Options::default()
    };
    let ct = nihilist::encrypt("one time", &key, &options).expect("encryption failed");
    assert_eq!(
        nihilist::decrypt(&ct, &key, &options).expect("decryption failed"),
        "onetime"
    );
}

/// Traced runs export every stage and the final chain window.
#[test]
fn test_traced_metrics_export() {
    let options = Options {
        use_chain_addition: true,
        transposition_passes: 2,
        ..Options::default()
    };
    let (ciphertext, metrics) =
        vic::encrypt_traced("HELLO", "SECRET", "CIPHER", "KEY", "12345", &options)
            .expect("encryption failed");
    assert_eq!(metrics.direction, Direction::Encrypt);
    assert_eq!(metrics.stages.len(), 6);

    let export = metrics.export_text();
    assert!(export.contains("cipher=vic\n"));
    assert!(export.contains("stages=6\n"));
    assert!(export.contains("stage.0=polybius_substitute(ADFGVX):5:10\n"));
    assert!(export.contains("final_key="));

    let (plaintext, _) =
        vic::decrypt_traced(&ciphertext, "SECRET", "CIPHER", "KEY", "12345", &options)
            .expect("decryption failed");
    assert_eq!(plaintext, "hello");
}
