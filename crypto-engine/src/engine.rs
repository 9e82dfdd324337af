//! The engine facade: backend registry, capability dispatch, and the
//! uniform failure contract.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::backend::CryptoBackend;
use crate::capability::{Argon2Params, Capability};
use crate::error::{CryptoError, CryptoResult};
use crate::session::AesCbcSession;

/// The active provider set, replaced wholesale by [`CryptoEngine::configure`].
///
/// Two role slots with fixed dispatch precedence: the native slot is probed
/// first for every capability, then the software slot. An empty slot means
/// "no provider for this role"; each slot holds at most one provider.
#[derive(Clone, Default)]
pub struct BackendSet {
    pub native: Option<Arc<dyn CryptoBackend>>,
    pub software: Option<Arc<dyn CryptoBackend>>,
}

impl BackendSet {
    pub fn empty() -> Self {
        Self::default()
    }

    fn slots(&self) -> impl Iterator<Item = &Arc<dyn CryptoBackend>> {
        [self.native.as_ref(), self.software.as_ref()]
            .into_iter()
            .flatten()
    }

    /// First backend in precedence order declaring `capability`.
    fn select(&self, capability: Capability) -> Option<Arc<dyn CryptoBackend>> {
        self.slots()
            .find(|backend| backend.supports(capability))
            .cloned()
    }

    /// First backend in precedence order declaring every capability listed.
    fn select_all(&self, capabilities: &[Capability]) -> Option<Arc<dyn CryptoBackend>> {
        self.slots()
            .find(|backend| {
                capabilities
                    .iter()
                    .all(|capability| backend.supports(*capability))
            })
            .cloned()
    }
}

/// Facade over the configured backend providers.
///
/// The engine is a pure router: its only local decision is whether any
/// configured backend declares the requested capability. Capable-backend
/// failures pass through verbatim; an exhausted capability walk yields
/// [`CryptoError::NotImplemented`] with the primitive's stable message.
///
/// `sha256`, `hmac_sha256` and `argon2` are asynchronous; `random` and
/// `create_aes_cbc` complete (or fail) synchronously because the outcome
/// is known without suspending — callers rely on that distinction.
pub struct CryptoEngine {
    backends: RwLock<BackendSet>,
}

impl CryptoEngine {
    /// Create an engine with no configured backends. Every operation fails
    /// with `NotImplemented` until [`configure`](Self::configure) is called.
    pub fn new() -> Self {
        Self {
            backends: RwLock::new(BackendSet::empty()),
        }
    }

    /// Convenience constructor: a freshly configured engine.
    pub fn with_backends(
        native: Option<Arc<dyn CryptoBackend>>,
        software: Option<Arc<dyn CryptoBackend>>,
    ) -> Self {
        let engine = Self::new();
        engine.configure(native, software);
        engine
    }

    /// Atomically replace the active backend set.
    ///
    /// Passing `None` for both slots clears the set, making every
    /// subsequent operation fail uniformly. Providers are not validated
    /// here; an incapable provider is simply skipped during dispatch.
    /// In-flight operations hold a snapshot taken before their capability
    /// walk and observe either the old or the new set, never a mix.
    pub fn configure(
        &self,
        native: Option<Arc<dyn CryptoBackend>>,
        software: Option<Arc<dyn CryptoBackend>>,
    ) {
        debug!(
            native = native.as_deref().map(|backend| backend.name()),
            software = software.as_deref().map(|backend| backend.name()),
            "reconfiguring backend set"
        );
        *self.backends.write() = BackendSet { native, software };
    }

    fn snapshot(&self) -> BackendSet {
        self.backends.read().clone()
    }

    fn select(&self, capability: Capability) -> CryptoResult<Arc<dyn CryptoBackend>> {
        match self.snapshot().select(capability) {
            Some(backend) => {
                debug!(backend = backend.name(), capability = ?capability, "dispatching");
                Ok(backend)
            }
            None => {
                warn!(capability = ?capability, "no configured backend declares capability");
                Err(CryptoError::NotImplemented(capability))
            }
        }
    }

    /// SHA-256 digest of `data`. Output is exactly 32 bytes.
    pub async fn sha256(&self, data: &[u8]) -> CryptoResult<[u8; 32]> {
        self.select(Capability::Sha256)?.sha256(data).await
    }

    /// HMAC-SHA256 of `data` under `key`. Key and data are arbitrary-length;
    /// output is exactly 32 bytes.
    pub async fn hmac_sha256(&self, key: &[u8], data: &[u8]) -> CryptoResult<[u8; 32]> {
        self.select(Capability::HmacSha256)?
            .hmac_sha256(key, data)
            .await
    }

    /// Exactly `n` cryptographically secure random bytes.
    ///
    /// Synchronous: when no backend declares `Random` this fails within the
    /// calling control flow, never via a deferred completion.
    pub fn random(&self, n: usize) -> CryptoResult<Vec<u8>> {
        self.select(Capability::Random)?.random_bytes(n)
    }

    /// Create an AES-CBC session bound to the first backend declaring both
    /// CBC directions. The backend choice is frozen into the session and
    /// never re-resolved.
    ///
    /// Synchronous factory: fails immediately when no AES-capable provider
    /// exists, before any key material is touched.
    pub fn create_aes_cbc(&self) -> CryptoResult<AesCbcSession> {
        let backend = self
            .snapshot()
            .select_all(&[Capability::AesCbcEncrypt, Capability::AesCbcDecrypt])
            .ok_or(CryptoError::NotImplemented(Capability::AesCbcEncrypt))?;
        debug!(backend = backend.name(), "AES-CBC session created");
        Ok(AesCbcSession::new(backend))
    }

    /// Derive `key_length` bytes from `password` and `salt` with Argon2id.
    ///
    /// No shipped backend declares `Argon2`; until a future provider does,
    /// every call resolves to `NotImplemented` regardless of configuration.
    pub async fn argon2(
        &self,
        password: &[u8],
        salt: &[u8],
        params: &Argon2Params,
        key_length: usize,
    ) -> CryptoResult<Zeroizing<Vec<u8>>> {
        self.select(Capability::Argon2)?
            .argon2(password, salt, params, key_length)
            .await
    }
}

impl Default for CryptoEngine {
    fn default() -> Self {
        Self::new()
    }
}
