//! Pure-Rust fallback provider built on the RustCrypto crates.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::backend::{AesKeyHandle, CryptoBackend};
use crate::capability::Capability;
use crate::error::{CryptoError, CryptoResult};

type HmacSha256 = Hmac<Sha256>;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes192CbcEnc = cbc::Encryptor<Aes192>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes192CbcDec = cbc::Decryptor<Aes192>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

const AES_BLOCK: usize = 16;

/// Software provider: SHA-256, HMAC-SHA256, AES-CBC and OS randomness via
/// the RustCrypto stack. Declares everything except Argon2 and normally
/// occupies the fallback slot behind the native provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct SoftwareBackend;

impl SoftwareBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CryptoBackend for SoftwareBackend {
    fn name(&self) -> &'static str {
        "software"
    }

    fn supports(&self, capability: Capability) -> bool {
        !matches!(capability, Capability::Argon2)
    }

    async fn sha256(&self, data: &[u8]) -> CryptoResult<[u8; 32]> {
        Ok(Sha256::digest(data).into())
    }

    async fn hmac_sha256(&self, key: &[u8], data: &[u8]) -> CryptoResult<[u8; 32]> {
        // HMAC accepts any key length
        let mut mac = HmacSha256::new_from_slice(key)
            .map_err(|e| CryptoError::backend(self.name(), e.to_string()))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().into())
    }

    fn random_bytes(&self, n: usize) -> CryptoResult<Vec<u8>> {
        let mut buf = vec![0u8; n];
        OsRng.fill_bytes(&mut buf);
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

pub(super) fn import_aes_key_checked(raw: &[u8]) -> CryptoResult<AesKeyHandle> {
    match raw.len() {
        16 | 24 | 32 => Ok(AesKeyHandle::new(raw.to_vec())),
        got => Err(CryptoError::InvalidKeyLength { got }),
    }
}

fn check_iv(iv: &[u8]) -> CryptoResult<()> {
    if iv.len() != AES_BLOCK {
        return Err(CryptoError::InvalidIvLength {
            expected: AES_BLOCK,
            got: iv.len(),
        });
    }
    Ok(())
}

pub(super) fn cbc_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    check_iv(iv)?;
    let invalid_key = |_| CryptoError::InvalidKeyLength { got: key.len() };
    let ciphertext = match key.len() {
        16 => Aes128CbcEnc::new_from_slices(key, iv)
            .map_err(invalid_key)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        24 => Aes192CbcEnc::new_from_slices(key, iv)
            .map_err(invalid_key)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        32 => Aes256CbcEnc::new_from_slices(key, iv)
            .map_err(invalid_key)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        got => return Err(CryptoError::InvalidKeyLength { got }),
    };
    Ok(ciphertext)
}

pub(super) fn cbc_decrypt(
    backend: &'static str,
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> CryptoResult<Vec<u8>> {
    check_iv(iv)?;
    let invalid_key = |_| CryptoError::InvalidKeyLength { got: key.len() };
    let unpad = |_| CryptoError::backend(backend, "CBC decrypt failed: bad padding");
    let plaintext = match key.len() {
        16 => Aes128CbcDec::new_from_slices(key, iv)
            .map_err(invalid_key)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(unpad)?,
        24 => Aes192CbcDec::new_from_slices(key, iv)
            .map_err(invalid_key)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(unpad)?,
        32 => Aes256CbcDec::new_from_slices(key, iv)
            .map_err(invalid_key)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(unpad)?,
        got => return Err(CryptoError::InvalidKeyLength { got }),
    };
    Ok(plaintext)
}
