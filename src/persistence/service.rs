use std::io::{self, Read, Write};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::codec::{Codec, CodecError, JsonCodec};
use crate::crypto::{CryptoError, CryptographyProvider};
use crate::state::State;
use crate::stream::{with_stream, StreamMode, StreamStore};

use super::config::PersistenceConfig;
use super::error::PersistenceError;

/// Saves, loads, and removes `State` values through a `StreamStore`.
///
/// Each call is a straight pipeline: existence check, codec, optional
/// encryption, one scoped stream. The service holds no mutable state, so a
/// shared reference can be used from any number of threads. Nothing is
/// locked: concurrent operations on the same id may interleave at the
/// backend, and `save`'s remove-then-write is two backend calls, not an
/// atomic replace.
pub struct StatePersistenceService<S, C = JsonCodec> {
    store: S,
    codec: C,
    crypto: Option<Arc<dyn CryptographyProvider>>,
    config: PersistenceConfig,
}

impl<S: StreamStore> StatePersistenceService<S, JsonCodec> {
    /// A service over `store` using the JSON codec and no encryption.
    pub fn new(store: S) -> Self {
        Self::with_codec(store, JsonCodec)
    }
}

impl<S: StreamStore, C: Codec> StatePersistenceService<S, C> {
    pub fn with_codec(store: S, codec: C) -> Self {
        StatePersistenceService {
            store,
            codec,
            crypto: None,
            config: PersistenceConfig::default(),
        }
    }

    /// Supply the provider used when cryptography is enabled.
    pub fn with_cryptography<P>(self, provider: P) -> Self
    where
        P: CryptographyProvider + 'static,
    {
        self.with_shared_cryptography(Arc::new(provider))
    }

    pub fn with_shared_cryptography(mut self, provider: Arc<dyn CryptographyProvider>) -> Self {
        self.crypto = Some(provider);
        self
    }

    pub fn with_config(mut self, config: PersistenceConfig) -> Self {
        self.config = config;
        self
    }

    /// Apply flat name/value settings (see `PersistenceConfig::from_settings`).
    ///
    /// An unparsable `UseCryptography` fails here. A missing provider does not;
    /// that is reported by the first `save` or `load` that needs it.
    pub fn configure<I, K, V>(self, settings: I) -> Result<Self, PersistenceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let config = PersistenceConfig::from_settings(settings)?;
        Ok(self.with_config(config))
    }

    pub fn config(&self) -> PersistenceConfig {
        self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Persist `state`, replacing anything stored under its id.
    ///
    /// A failure part-way through can leave the id removed or partially
    /// written; there is no rollback.
    pub fn save<T: Serialize>(&self, state: &State<T>) -> Result<(), PersistenceError> {
        let id = state.id();
        self.save_inner(id, state).map_err(|err| {
            log::warn!("failed to save state {}: {}", id, err);
            err
        })
    }

    fn save_inner<T: Serialize>(&self, id: &str, state: &State<T>) -> Result<(), PersistenceError> {
        if self.exists(id)? {
            log::debug!("state {} exists, removing before save", id);
            self.store
                .remove_stream(id)
                .map_err(|e| PersistenceError::from_io(id, e))?;
        }

        let payload = self
            .codec
            .encode(state)
            .map_err(|e| PersistenceError::codec(id, e))?;

        let data = if self.config.use_cryptography {
            self.crypto_provider()
                .and_then(|crypto| crypto.encrypt_symmetric(&payload))
                .map_err(|e| PersistenceError::crypto(id, e))?
        } else {
            payload
        };

        with_stream(&self.store, id, StreamMode::Write, |stream| {
            stream.write_all(&data)?;
            stream.flush()
        })
        .map_err(|e| PersistenceError::from_stream(id, e))?;

        log::debug!("saved state {} ({} bytes)", id, data.len());
        Ok(())
    }

    /// Load the state stored under `id`.
    ///
    /// Fails with `NotFound` before any stream is opened if nothing is stored.
    pub fn load<T: DeserializeOwned>(&self, id: &str) -> Result<State<T>, PersistenceError> {
        if !self.exists(id)? {
            return Err(PersistenceError::NotFound { id: id.to_string() });
        }
        self.load_inner(id).map_err(|err| {
            log::warn!("failed to load state {}: {}", id, err);
            err
        })
    }

    fn load_inner<T: DeserializeOwned>(&self, id: &str) -> Result<State<T>, PersistenceError> {
        let bytes = with_stream(&self.store, id, StreamMode::Read, |stream| {
            let mut buffer = Vec::new();
            stream.read_to_end(&mut buffer)?;
            Ok(buffer)
        })
        .map_err(|e| PersistenceError::from_stream(id, e))?;
        log::debug!("read state {} ({} bytes)", id, bytes.len());

        let payload = if self.config.use_cryptography {
            self.crypto_provider()
                .and_then(|crypto| crypto.decrypt_symmetric(&bytes))
                .map_err(|e| PersistenceError::crypto(id, e))?
        } else {
            bytes
        };

        self.codec
            .decode::<State<T>>(&payload)
            .and_then(|state| state.ok_or(CodecError::Absent))
            .map_err(|e| PersistenceError::codec(id, e))
    }

    /// Delete whatever is stored under `id`.
    ///
    /// Removing an id that is not stored is backend-defined: the in-memory
    /// store ignores it, the file store reports `NotFound`.
    pub fn remove(&self, id: &str) -> Result<(), PersistenceError> {
        self.store.remove_stream(id).map_err(|e| {
            let err = PersistenceError::from_io(id, e);
            log::warn!("failed to remove state {}: {}", id, err);
            err
        })?;
        log::debug!("removed state {}", id);
        Ok(())
    }

    /// Whether a state is stored under `id`. Backend errors pass through as-is.
    pub fn contains(&self, id: &str) -> io::Result<bool> {
        self.store.contains(id)
    }

    fn exists(&self, id: &str) -> Result<bool, PersistenceError> {
        self.contains(id).map_err(|source| PersistenceError::Io {
            id: id.to_string(),
            source,
        })
    }

    fn crypto_provider(&self) -> Result<&dyn CryptographyProvider, CryptoError> {
        self.crypto
            .as_deref()
            .ok_or(CryptoError::MissingProvider {
                capability: "CryptographyProvider",
                requested_by: std::any::type_name::<Self>(),
            })
    }
}
