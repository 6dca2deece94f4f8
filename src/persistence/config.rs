use serde::{Deserialize, Serialize};

use super::error::PersistenceError;

/// Settings key that turns payload encryption on or off.
pub const USE_CRYPTOGRAPHY: &str = "UseCryptography";

/// Persistence service configuration. Fixed once the service is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistenceConfig {
    #[serde(default)]
    pub use_cryptography: bool,
}

impl PersistenceConfig {
    /// Read configuration from a flat name/value settings map.
    ///
    /// Only `UseCryptography` is recognized (key matched ignoring ASCII case).
    /// Its value must be `true` or `false` in any case; an empty value leaves
    /// the default. Other keys are ignored.
    pub fn from_settings<I, K, V>(settings: I) -> Result<Self, PersistenceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = PersistenceConfig::default();
        for (key, value) in settings {
            let (key, value) = (key.as_ref(), value.as_ref());
            if !key.eq_ignore_ascii_case(USE_CRYPTOGRAPHY) {
                continue;
            }
            if let Some(flag) = parse_flag(key, value)? {
                config.use_cryptography = flag;
            }
        }
        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<Option<bool>, PersistenceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else if trimmed.eq_ignore_ascii_case("true") {
        Ok(Some(true))
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(Some(false))
    } else {
        Err(PersistenceError::Configuration {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}
