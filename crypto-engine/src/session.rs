//! AES-CBC session lifecycle.

use std::fmt;
use std::sync::Arc;

use crate::backend::{AesKeyHandle, CryptoBackend};
use crate::error::{CryptoError, CryptoResult};

/// A short-lived AES-CBC handle bound to the backend chosen at creation.
///
/// Lifecycle: the session starts without a key, [`import_key`] moves it to
/// the key-imported state, then [`encrypt`]/[`decrypt`] may be called
/// repeatedly. Importing over an existing key replaces it; the old material
/// is zeroized when the previous handle drops. Dropping the session
/// releases everything — there is no close.
///
/// The session performs no internal locking. Concurrent use of one session
/// must be serialized by the caller if the backend's thread-safety is not
/// guaranteed.
///
/// [`import_key`]: AesCbcSession::import_key
/// [`encrypt`]: AesCbcSession::encrypt
/// [`decrypt`]: AesCbcSession::decrypt
pub struct AesCbcSession {
    backend: Arc<dyn CryptoBackend>,
    key: Option<AesKeyHandle>,
}

impl fmt::Debug for AesCbcSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesCbcSession")
            .field("backend", &self.backend.name())
            .field("key", &self.key)
            .finish()
    }
}

impl AesCbcSession {
    pub(crate) fn new(backend: Arc<dyn CryptoBackend>) -> Self {
        Self { backend, key: None }
    }

    /// Name of the backend this session was bound to at creation.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Whether a key has been imported.
    pub fn key_imported(&self) -> bool {
        self.key.is_some()
    }

    /// Import raw AES key material (16, 24 or 32 bytes).
    ///
    /// Valid in any state: importing a second key silently replaces the
    /// first.
    pub async fn import_key(&mut self, raw: &[u8]) -> CryptoResult<()> {
        let handle = self.backend.import_aes_key(raw).await?;
        self.key = Some(handle);
        Ok(())
    }

    /// Encrypt the whole buffer in CBC mode with PKCS#7 padding.
    ///
    /// `iv` is caller-supplied, 16 bytes, and must be fresh per invocation.
    pub async fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> CryptoResult<Vec<u8>> {
        let key = self.key.as_ref().ok_or(CryptoError::KeyNotImported)?;
        self.backend.aes_cbc_encrypt(key, iv, plaintext).await
    }

    /// Decrypt a whole CBC ciphertext and strip PKCS#7 padding.
    pub async fn decrypt(&self, ciphertext: &[u8], iv: &[u8]) -> CryptoResult<Vec<u8>> {
        let key = self.key.as_ref().ok_or(CryptoError::KeyNotImported)?;
        self.backend.aes_cbc_decrypt(key, iv, ciphertext).await
    }
}
