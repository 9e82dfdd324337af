//! Deterministic test double.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use super::software::{cbc_decrypt, cbc_encrypt, import_aes_key_checked};
use crate::backend::{AesKeyHandle, CryptoBackend};
use crate::capability::Capability;
use crate::error::{CryptoError, CryptoResult};

type HmacSha256 = Hmac<Sha256>;

/// Test double for dispatch and backend-swap tests.
///
/// Digest, HMAC and AES-CBC produce real algorithm output, so canonical
/// vectors compare equal across a set built from this backend and one
/// built from the production providers. `random_bytes` is the exception:
/// it returns a counter-seeded deterministic stream, which still differs
/// between successive calls but is reproducible from a fresh instance.
pub struct MockBackend {
    counter: Mutex<u64>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            counter: Mutex::new(0),
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CryptoBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn supports(&self, capability: Capability) -> bool {
        !matches!(capability, Capability::Argon2)
    }

    async fn sha256(&self, data: &[u8]) -> CryptoResult<[u8; 32]> {
        Ok(Sha256::digest(data).into())
    }

    async fn hmac_sha256(&self, key: &[u8], data: &[u8]) -> CryptoResult<[u8; 32]> {
        let mut mac = HmacSha256::new_from_slice(key)
            .map_err(|e| CryptoError::backend(self.name(), e.to_string()))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().into())
    }

    fn random_bytes(&self, n: usize) -> CryptoResult<Vec<u8>> {
        let mut counter = self.counter.lock();
        let mut buf = vec![0u8; n];
        for chunk in buf.chunks_mut(32) {
            let block = Sha256::digest(counter.to_be_bytes());
            *counter += 1;
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
        Ok(buf)
    }

    async fn import_aes_key(&self, raw: &[u8]) -> CryptoResult<AesKeyHandle> {
        import_aes_key_checked(raw)
    }

    async fn aes_cbc_encrypt(
        &self,
        key: &AesKeyHandle,
        iv: &[u8],
        plaintext: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        cbc_encrypt(key.bytes(), iv, plaintext)
    }

    async fn aes_cbc_decrypt(
        &self,
        key: &AesKeyHandle,
        iv: &[u8],
        ciphertext: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        cbc_decrypt(self.name(), key.bytes(), iv, ciphertext)
    }
}
