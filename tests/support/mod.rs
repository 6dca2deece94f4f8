#![allow(dead_code)]

pub mod counting_store;
pub mod crypto;

use serde::{Deserialize, Serialize};

pub use counting_store::CountingStore;
pub use crypto::{RejectingCrypto, SealFailingCrypto, XorCrypto};

/// A small payload shaped like a saved shell layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub workspace: String,
    pub panes: Vec<String>,
    pub docked: bool,
}

impl Layout {
    pub fn new(workspace: &str, panes: &[&str]) -> Self {
        Layout {
            workspace: workspace.into(),
            panes: panes.iter().map(|p| p.to_string()).collect(),
            docked: true,
        }
    }
}
