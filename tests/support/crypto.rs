//! Deterministic cryptography providers for tests.

use sourced_state::{CryptoError, CryptographyProvider};

/// Repeating-key XOR. Fixed key, so stored bytes are predictable.
pub struct XorCrypto {
    key: Vec<u8>,
}

impl XorCrypto {
    pub fn new(key: &[u8]) -> Self {
        XorCrypto { key: key.to_vec() }
    }

    fn apply(&self, bytes: &[u8]) -> Vec<u8> {
        bytes
            .iter()
            .zip(self.key.iter().cycle())
            .map(|(b, k)| b ^ k)
            .collect()
    }
}

impl Default for XorCrypto {
    fn default() -> Self {
        XorCrypto::new(b"fixed-test-key")
    }
}

impl CryptographyProvider for XorCrypto {
    fn encrypt_symmetric(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(self.apply(plaintext))
    }

    fn decrypt_symmetric(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(self.apply(ciphertext))
    }
}

/// Encrypts like `XorCrypto` but refuses every decrypt.
#[derive(Default)]
pub struct RejectingCrypto(XorCrypto);

impl CryptographyProvider for RejectingCrypto {
    fn encrypt_symmetric(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.0.encrypt_symmetric(plaintext)
    }

    fn decrypt_symmetric(&self, _ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Err(CryptoError::Decrypt("authentication tag mismatch".into()))
    }
}

/// Fails every encrypt, as a provider with a revoked key would.
#[derive(Default)]
pub struct SealFailingCrypto;

impl CryptographyProvider for SealFailingCrypto {
    fn encrypt_symmetric(&self, _plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Err(CryptoError::Encrypt("key unavailable".into()))
    }

    fn decrypt_symmetric(&self, _ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Err(CryptoError::Decrypt("key unavailable".into()))
    }
}
