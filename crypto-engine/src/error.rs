use crate::capability::Capability;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    /// No configured backend declares the requested capability.
    ///
    /// The message text is stable per primitive ("SHA256 not implemented",
    /// "HMAC-SHA256 not implemented", "Random not implemented",
    /// "AES-CBC not implemented", "Argon2 not implemented") and is part of
    /// the external contract; consumers match on it.
    #[error("{} not implemented", .0.primitive_name())]
    NotImplemented(Capability),

    /// A capable backend was selected but failed internally.
    ///
    /// Propagated verbatim; the engine never retries or reinterprets these.
    #[error("backend {backend}: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    #[error("Invalid key length: expected 16, 24 or 32 bytes, got {got}")]
    InvalidKeyLength { got: usize },

    #[error("Invalid IV length: expected {expected}, got {got}")]
    InvalidIvLength { expected: usize, got: usize },

    /// `encrypt`/`decrypt` called on a session before `import_key`.
    #[error("AES-CBC key not imported")]
    KeyNotImported,
}

pub type CryptoResult<T> = Result<T, CryptoError>;

impl CryptoError {
    pub(crate) fn backend(backend: &'static str, message: impl Into<String>) -> Self {
        CryptoError::Backend {
            backend,
            message: message.into(),
        }
    }
}
