use std::fmt;

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};

use super::{CryptoError, CryptographyProvider};

const NONCE_LEN: usize = 12;

/// AES-256-GCM provider with a random nonce per message.
///
/// Ciphertext layout: `nonce (12 bytes) || ciphertext || tag (16 bytes)`.
pub struct AesGcmProvider {
    cipher: Aes256Gcm,
}

impl AesGcmProvider {
    pub fn new(key: [u8; 32]) -> Self {
        AesGcmProvider {
            cipher: Aes256Gcm::new(&key.into()),
        }
    }
}

impl fmt::Debug for AesGcmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesGcmProvider").finish_non_exhaustive()
    }
}

impl CryptographyProvider for AesGcmProvider {
    fn encrypt_symmetric(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| CryptoError::Encrypt(e.to_string()))?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(nonce.as_slice());
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    // aes-gcm relies on generic-array 0.14, so suppress the upstream deprecation locally.
    #[allow(deprecated)]
    fn decrypt_symmetric(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if ciphertext.len() < NONCE_LEN {
            return Err(CryptoError::Decrypt(format!(
                "ciphertext is {} bytes, shorter than the {}-byte nonce",
                ciphertext.len(),
                NONCE_LEN
            )));
        }
        let (nonce, sealed) = ciphertext.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|e| CryptoError::Decrypt(e.to_string()))
    }
}
