//! Integration tests for the SecureVault crypto module.

use securevault::crypto::{CipherEngine, MasterKey};

fn engine_with(byte: u8) -> CipherEngine {
    CipherEngine::new(&MasterKey::new([byte; 32])).expect("build engine")
}

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let engine = engine_with(0xAB);
    let plaintext = b"Sunshine1!";

    let ciphertext = engine.encrypt(plaintext).expect("encrypt should succeed");

    // Ciphertext must be longer than plaintext (12-byte nonce + 16-byte tag).
    assert!(ciphertext.len() > plaintext.len());

    let recovered = engine.decrypt(&ciphertext).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn roundtrip_handles_empty_and_long_plaintexts() {
    let engine = engine_with(0x3C);

    for plaintext in [&b""[..], &b"x"[..], &[0x55u8; 4096][..]] {
        let ciphertext = engine.encrypt(plaintext).expect("encrypt");
        let recovered = engine.decrypt(&ciphertext).expect("decrypt");
        assert_eq!(recovered, plaintext);
    }
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let engine = engine_with(0xCD);
    let plaintext = b"hunter2";

    let ct1 = engine.encrypt(plaintext).expect("encrypt 1");
    let ct2 = engine.encrypt(plaintext).expect("encrypt 2");

    // Because each call generates a new random nonce, the output must differ.
    assert_ne!(ct1, ct2, "two encryptions of the same plaintext must differ");
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let engine = engine_with(0x11);
    let wrong_engine = engine_with(0x22);
    let plaintext = b"TOP_SECRET";

    let ciphertext = engine.encrypt(plaintext).expect("encrypt");
    let result = wrong_engine.decrypt(&ciphertext);

    assert!(result.is_err(), "decryption with the wrong key must fail");
}

#[test]
fn decrypt_with_truncated_data_fails() {
    // Anything shorter than 12 bytes (nonce length) should fail.
    let engine = engine_with(0xAA);
    let result = engine.decrypt(&[0u8; 5]);
    assert!(result.is_err(), "truncated ciphertext must fail");
}

#[test]
fn flipping_any_byte_makes_decrypt_fail() {
    let engine = engine_with(0xBB);
    let plaintext = b"Rainbow2@";

    let ciphertext = engine.encrypt(plaintext).expect("encrypt");

    // Every byte matters: the embedded nonce, the body, and the tag.
    for i in 0..ciphertext.len() {
        let mut tampered = ciphertext.clone();
        tampered[i] ^= 0xFF;
        assert!(
            engine.decrypt(&tampered).is_err(),
            "flipping byte {i} must fail the auth check"
        );
    }
}

// ---------------------------------------------------------------------------
// String helper
// ---------------------------------------------------------------------------

#[test]
fn decrypt_string_roundtrip() {
    let engine = engine_with(0x77);
    let ciphertext = engine.encrypt("pässwörd".as_bytes()).expect("encrypt");
    let recovered = engine.decrypt_string(&ciphertext).expect("decrypt");
    assert_eq!(recovered, "pässwörd");
}
