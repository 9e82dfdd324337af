//! The pluggable backend contract.

use std::fmt;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::capability::{Argon2Params, Capability};
use crate::error::{CryptoError, CryptoResult};

/// Opaque imported-key handle for an AES-CBC session.
///
/// Only a backend's `import_aes_key` constructs one; the raw key material
/// is zeroized when the handle is dropped.
pub struct AesKeyHandle {
    bytes: Zeroizing<Vec<u8>>,
}

impl AesKeyHandle {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
        }
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length of the imported key in bytes.
    pub fn key_len(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for AesKeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never expose key material in debug output
        write!(f, "AesKeyHandle({} bytes)", self.bytes.len())
    }
}

/// A capability provider.
///
/// `supports` is the static declared capability set consulted by dispatch;
/// the per-capability methods are only reached through a positive
/// declaration. The default bodies guard against a backend that declares a
/// capability it does not implement — such a failure surfaces as a
/// `Backend` error naming the provider, never as `NotImplemented`.
///
/// `random_bytes` and `import_aes_key` are synchronous on the backend side
/// as well: no shipped provider needs to suspend for them, and the engine
/// relies on `random` failing within the calling control flow.
#[async_trait]
pub trait CryptoBackend: Send + Sync {
    /// Short stable identifier used in logs and `Backend` errors.
    fn name(&self) -> &'static str;

    /// Whether this backend declares support for `capability`.
    fn supports(&self, capability: Capability) -> bool;

    async fn sha256(&self, _data: &[u8]) -> CryptoResult<[u8; 32]> {
        Err(undeclared(self.name(), Capability::Sha256))
    }

    async fn hmac_sha256(&self, _key: &[u8], _data: &[u8]) -> CryptoResult<[u8; 32]> {
        Err(undeclared(self.name(), Capability::HmacSha256))
    }

    fn random_bytes(&self, _n: usize) -> CryptoResult<Vec<u8>> {
        Err(undeclared(self.name(), Capability::Random))
    }

    /// Validate and take ownership of raw AES key material (16, 24 or 32
    /// bytes).
    async fn import_aes_key(&self, _raw: &[u8]) -> CryptoResult<AesKeyHandle> {
        Err(undeclared(self.name(), Capability::AesCbcEncrypt))
    }

    async fn aes_cbc_encrypt(
        &self,
        _key: &AesKeyHandle,
        _iv: &[u8],
        _plaintext: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        Err(undeclared(self.name(), Capability::AesCbcEncrypt))
    }

    async fn aes_cbc_decrypt(
        &self,
        _key: &AesKeyHandle,
        _iv: &[u8],
        _ciphertext: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        Err(undeclared(self.name(), Capability::AesCbcDecrypt))
    }

    async fn argon2(
        &self,
        _password: &[u8],
        _salt: &[u8],
        _params: &Argon2Params,
        _key_length: usize,
    ) -> CryptoResult<Zeroizing<Vec<u8>>> {
        Err(undeclared(self.name(), Capability::Argon2))
    }
}

fn undeclared(backend: &'static str, capability: Capability) -> CryptoError {
    CryptoError::backend(
        backend,
        format!("{} capability not declared", capability.primitive_name()),
    )
}
