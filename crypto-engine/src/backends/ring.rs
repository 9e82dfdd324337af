//! Native provider backed by *ring*.

use async_trait::async_trait;
use ring::digest;
use ring::hmac;
use ring::rand::{SecureRandom, SystemRandom};

use crate::backend::CryptoBackend;
use crate::capability::Capability;
use crate::error::{CryptoError, CryptoResult};

/// The preferred provider for the native slot. Declares SHA-256,
/// HMAC-SHA256 and randomness; *ring* ships no CBC mode, so AES-CBC
/// requests fall through to the software slot, and Argon2 stays
/// undeclared like everywhere else.
pub struct RingBackend {
    rng: SystemRandom,
}

impl RingBackend {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for RingBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CryptoBackend for RingBackend {
    fn name(&self) -> &'static str {
        "ring"
    }

    fn supports(&self, capability: Capability) -> bool {
        matches!(
            capability,
            Capability::Sha256 | Capability::HmacSha256 | Capability::Random
        )
    }

    async fn sha256(&self, data: &[u8]) -> CryptoResult<[u8; 32]> {
        let digest = digest::digest(&digest::SHA256, data);
        let mut out = [0u8; 32];
        out.copy_from_slice(digest.as_ref());
        Ok(out)
    }

    async fn hmac_sha256(&self, key: &[u8], data: &[u8]) -> CryptoResult<[u8; 32]> {
        let key = hmac::Key::new(hmac::HMAC_SHA256, key);
        let tag = hmac::sign(&key, data);
        let mut out = [0u8; 32];
        out.copy_from_slice(tag.as_ref());
        Ok(out)
    }

    fn random_bytes(&self, n: usize) -> CryptoResult<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.rng
            .fill(&mut buf)
            .map_err(|_| CryptoError::backend(self.name(), "system RNG unavailable"))?;
        Ok(buf)
    }
}
