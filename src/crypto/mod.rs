//! Cryptography - opaque symmetric encryption over byte buffers.
//!
//! The persistence service consumes a `CryptographyProvider` as a capability;
//! key material and rotation belong to whoever builds the provider.

#[cfg(feature = "aes")]
mod aes;

use std::fmt;

#[cfg(feature = "aes")]
pub use aes::AesGcmProvider;

/// Symmetric encrypt/decrypt capability.
///
/// `decrypt_symmetric(encrypt_symmetric(x))` must yield `x` for the same
/// provider instance (or one built from the same key).
pub trait CryptographyProvider: Send + Sync {
    fn encrypt_symmetric(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>;

    fn decrypt_symmetric(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// Error type for cryptography operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Encryption failed.
    Encrypt(String),
    /// Decryption or authentication failed.
    Decrypt(String),
    /// Cryptography was requested but no provider was supplied.
    MissingProvider {
        capability: &'static str,
        requested_by: &'static str,
    },
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::Encrypt(msg) => write!(f, "encrypt failed: {}", msg),
            CryptoError::Decrypt(msg) => write!(f, "decrypt failed: {}", msg),
            CryptoError::MissingProvider {
                capability,
                requested_by,
            } => write!(
                f,
                "required service {} is missing (requested by {})",
                capability, requested_by
            ),
        }
    }
}

impl std::error::Error for CryptoError {}
