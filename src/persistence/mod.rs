//! State persistence - the service that ties stores, codecs, and crypto together.
//!
//! ## Example
//!
//! ```ignore
//! use sourced_state::{FileStreamStore, State, StatePersistenceService};
//!
//! let service = StatePersistenceService::new(FileStreamStore::new("/var/lib/shell")?)
//!     .with_cryptography(provider)
//!     .configure([("UseCryptography", "true")])?;
//!
//! service.save(&State::new("shell.layout", layout))?;
//! let restored: State<Layout> = service.load("shell.layout")?;
//! service.remove("shell.layout")?;
//! ```

mod config;
mod error;
mod service;

pub use config::{PersistenceConfig, USE_CRYPTOGRAPHY};
pub use error::{ErrorKind, PersistenceError};
pub use service::StatePersistenceService;
