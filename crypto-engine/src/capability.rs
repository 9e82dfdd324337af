//! Capability taxonomy used for backend dispatch.

/// A primitive operation a backend may declare support for.
///
/// Dispatch is lookup-only: the engine asks each configured backend for its
/// declared set via [`CryptoBackend::supports`](crate::CryptoBackend::supports)
/// and never infers support from trial failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Sha256,
    HmacSha256,
    Random,
    AesCbcEncrypt,
    AesCbcDecrypt,
    Argon2,
}

impl Capability {
    /// Primitive name used in the stable `NotImplemented` messages.
    ///
    /// Both AES-CBC directions report as "AES-CBC"; consumers match on the
    /// combined name.
    pub fn primitive_name(self) -> &'static str {
        match self {
            Capability::Sha256 => "SHA256",
            Capability::HmacSha256 => "HMAC-SHA256",
            Capability::Random => "Random",
            Capability::AesCbcEncrypt | Capability::AesCbcDecrypt => "AES-CBC",
            Capability::Argon2 => "Argon2",
        }
    }
}

/// Argon2id parameters for password hardening.
#[derive(Debug, Clone)]
pub struct Argon2Params {
    /// Memory cost in KiB (minimum 19456 for Argon2id)
    pub memory_cost: u32,
    /// Time cost (iterations)
    pub time_cost: u32,
    /// Parallelism factor
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_cost: 19456, // 19 MiB
            time_cost: 2,
            parallelism: 1,
        }
    }
}
