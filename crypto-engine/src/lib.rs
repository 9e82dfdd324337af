//! Runtime-pluggable cryptographic primitive engine.
//!
//! A single facade over interchangeable backend providers for:
//! - Hashing (SHA-256)
//! - Keyed hashing (HMAC-SHA256)
//! - Symmetric encryption (AES-CBC with PKCS#7 padding)
//! - Secure random byte generation
//! - Password hardening (Argon2 — scaffolded, no shipped provider)
//!
//! The engine does not implement cryptography itself; it routes each call
//! to the first configured backend that declares the requested capability
//! and fails with a stable, per-primitive `NotImplemented` error when no
//! backend can serve it. Backends are swapped wholesale at runtime via
//! [`CryptoEngine::configure`], which is how tests substitute a
//! deterministic double for the real providers.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use crypto_engine::{CryptoEngine, RingBackend, SoftwareBackend};
//!
//! # async fn run() -> crypto_engine::CryptoResult<()> {
//! let engine = CryptoEngine::with_backends(
//!     Some(Arc::new(RingBackend::new())),
//!     Some(Arc::new(SoftwareBackend::new())),
//! );
//!
//! // Served by the native slot.
//! let digest = engine.sha256(b"hello").await?;
//! assert_eq!(digest.len(), 32);
//!
//! // ring has no CBC mode, so this falls through to the software slot.
//! let mut session = engine.create_aes_cbc()?;
//! session.import_key(&engine.random(32)?).await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod backends;
pub mod capability;
pub mod engine;
pub mod error;
pub mod session;

pub use backend::{AesKeyHandle, CryptoBackend};
pub use backends::{MockBackend, RingBackend, SoftwareBackend};
pub use capability::{Argon2Params, Capability};
pub use engine::{BackendSet, CryptoEngine};
pub use error::{CryptoError, CryptoResult};
pub use session::AesCbcSession;
