//! State - the unit of persistence.
//!
//! A `State` pairs a caller-chosen identifier with an opaque payload. The
//! identifier is the storage key and cannot change once the state exists;
//! the payload is whatever the caller wants round-tripped through a codec.
//!
//! ## Example
//!
//! ```ignore
//! use sourced_state::State;
//!
//! #[derive(Serialize, Deserialize, Clone, PartialEq)]
//! struct Layout {
//!     pub open_panes: Vec<String>,
//! }
//!
//! let state = State::new("shell.layout", Layout { open_panes: vec![] });
//! service.save(&state)?;
//! let loaded: State<Layout> = service.load("shell.layout")?;
//! ```

use serde::{Deserialize, Serialize};

/// A named, serializable unit of application state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State<T> {
    id: String,
    payload: T,
}

impl<T> State<T> {
    pub fn new(id: impl Into<String>, payload: T) -> Self {
        State {
            id: id.into(),
            payload,
        }
    }

    /// The storage key for this state.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Split into `(id, payload)`.
    pub fn into_parts(self) -> (String, T) {
        (self.id, self.payload)
    }
}
