//! End-to-end dispatch tests against the shipped providers.
//!
//! Covers the externally observable contract: exact NotImplemented
//! messages on an empty backend set, canonical known-answer vectors,
//! backend-agnosticism when the set is swapped, the synchronous failure
//! semantics of `random` and `create_aes_cbc`, and the AES-CBC session
//! lifecycle including native-to-software fallback.

use std::sync::Arc;

use crypto_engine::{
    Argon2Params, Capability, CryptoEngine, CryptoError, MockBackend, RingBackend,
    SoftwareBackend,
};

fn full_engine() -> CryptoEngine {
    CryptoEngine::with_backends(
        Some(Arc::new(RingBackend::new())),
        Some(Arc::new(SoftwareBackend::new())),
    )
}

fn mock_engine() -> CryptoEngine {
    CryptoEngine::with_backends(None, Some(Arc::new(MockBackend::new())))
}

// ---------------------------------------------------------------------------
// Uniform failure on an empty set
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_set_fails_every_primitive_with_exact_message() {
    let engine = CryptoEngine::new();

    let err = engine.sha256(b"x").await.unwrap_err();
    assert_eq!(err.to_string(), "SHA256 not implemented");

    let err = engine.hmac_sha256(b"k", b"d").await.unwrap_err();
    assert_eq!(err.to_string(), "HMAC-SHA256 not implemented");

    let err = engine.random(8).unwrap_err();
    assert_eq!(err.to_string(), "Random not implemented");

    let err = engine.create_aes_cbc().unwrap_err();
    assert_eq!(err.to_string(), "AES-CBC not implemented");

    let err = engine
        .argon2(b"pw", b"salt", &Argon2Params::default(), 32)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Argon2 not implemented");
}

#[test]
fn random_and_session_factory_fail_without_suspension() {
    // No async runtime exists in this test; both calls must complete
    // (here: fail) entirely within the calling control flow.
    let engine = CryptoEngine::new();
    assert!(matches!(
        engine.random(16),
        Err(CryptoError::NotImplemented(Capability::Random))
    ));
    assert!(matches!(
        engine.create_aes_cbc(),
        Err(CryptoError::NotImplemented(Capability::AesCbcEncrypt))
    ));
}

// ---------------------------------------------------------------------------
// Canonical vectors through the dispatch layer
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sha256_known_answer_via_engine() {
    let engine = full_engine();
    let digest = engine.sha256(b"abc").await.unwrap();
    assert_eq!(
        hex::encode(digest),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[tokio::test]
async fn hmac_sha256_known_answer_via_engine() {
    let engine = full_engine();
    let mac = engine
        .hmac_sha256(b"Jefe", b"what do ya want for nothing?")
        .await
        .unwrap();
    assert_eq!(
        hex::encode(mac),
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );
}

#[tokio::test]
async fn aes_cbc_known_answer_via_session() {
    // NIST SP 800-38A F.2.5 (AES-256-CBC), first block.
    let engine = full_engine();
    let key =
        hex::decode("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4").unwrap();
    let iv = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
    let plaintext = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

    let mut session = engine.create_aes_cbc().unwrap();
    session.import_key(&key).await.unwrap();

    let ciphertext = session.encrypt(&plaintext, &iv).await.unwrap();
    assert_eq!(
        hex::encode(&ciphertext[..16]),
        "f58c4c04d6e5f1ba779eabfb5f7bfbd6"
    );

    let decrypted = session.decrypt(&ciphertext, &iv).await.unwrap();
    assert_eq!(decrypted, plaintext);
}

// ---------------------------------------------------------------------------
// Backend-agnosticism: swapping the set preserves results
// ---------------------------------------------------------------------------

#[tokio::test]
async fn swapping_backend_set_yields_identical_vectors() {
    let real = full_engine();
    let mock = mock_engine();

    assert_eq!(
        real.sha256(b"dispatch invariance").await.unwrap(),
        mock.sha256(b"dispatch invariance").await.unwrap()
    );
    assert_eq!(
        real.hmac_sha256(b"key", b"data").await.unwrap(),
        mock.hmac_sha256(b"key", b"data").await.unwrap()
    );

    let key = [0x5Au8; 32];
    let iv = [0x0Fu8; 16];
    let plaintext = b"backend-agnostic ciphertext";

    let mut real_session = real.create_aes_cbc().unwrap();
    real_session.import_key(&key).await.unwrap();
    let mut mock_session = mock.create_aes_cbc().unwrap();
    mock_session.import_key(&key).await.unwrap();

    assert_eq!(
        real_session.encrypt(plaintext, &iv).await.unwrap(),
        mock_session.encrypt(plaintext, &iv).await.unwrap()
    );
}

#[tokio::test]
async fn reconfiguring_a_live_engine_preserves_vectors() {
    let engine = full_engine();
    let before = engine.sha256(b"stable across reconfigure").await.unwrap();

    engine.configure(None, Some(Arc::new(MockBackend::new())));
    let after = engine.sha256(b"stable across reconfigure").await.unwrap();

    assert_eq!(before, after);
}

// ---------------------------------------------------------------------------
// Random
// ---------------------------------------------------------------------------

#[test]
fn random_returns_exactly_n_fresh_bytes() {
    let engine = full_engine();
    for n in [1usize, 13, 32, 257] {
        assert_eq!(engine.random(n).unwrap().len(), n);
    }
    assert_ne!(engine.random(32).unwrap(), engine.random(32).unwrap());
}

// ---------------------------------------------------------------------------
// Fallback and session binding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn aes_cbc_falls_through_native_slot_to_software() {
    // ring declares no CBC capability, so the session must bind to the
    // software slot even though the native slot is occupied.
    let engine = full_engine();
    let session = engine.create_aes_cbc().unwrap();
    assert_eq!(session.backend_name(), "software");
}

#[tokio::test]
async fn session_backend_is_frozen_at_creation() {
    let engine = full_engine();
    let mut session = engine.create_aes_cbc().unwrap();
    session.import_key(&[0x33; 16]).await.unwrap();

    // Clearing the engine afterwards must not affect the session.
    engine.configure(None, None);

    let iv = [1u8; 16];
    let ciphertext = session.encrypt(b"still works", &iv).await.unwrap();
    let decrypted = session.decrypt(&ciphertext, &iv).await.unwrap();
    assert_eq!(decrypted, b"still works");
}

// ---------------------------------------------------------------------------
// Argon2 scaffolding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn argon2_is_not_implemented_under_every_shipped_configuration() {
    let engines = [
        CryptoEngine::new(),
        full_engine(),
        mock_engine(),
        CryptoEngine::with_backends(Some(Arc::new(SoftwareBackend::new())), None),
    ];
    for engine in &engines {
        let err = engine
            .argon2(b"pw", b"salt", &Argon2Params::default(), 32)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Argon2 not implemented");
    }
}
