//! Keyboard bindings and held-key state
//!
//! Hosts feed key down/up events into [`KeyState`]; the game polls it once per
//! frame through [`KeyState::poll`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::FrameInput;

/// Keys bound to the three gameplay triggers (DOM `KeyboardEvent.key` names)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub fire: String,
    pub left: String,
    pub right: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            fire: "F".to_string(),
            left: "ArrowLeft".to_string(),
            right: "ArrowRight".to_string(),
        }
    }
}

/// Currently held keys
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize so `f` and `F` are the same key
    fn normalize(key: &str) -> String {
        if key.chars().count() == 1 {
            key.to_uppercase()
        } else {
            key.to_string()
        }
    }

    pub fn press(&mut self, key: &str) {
        self.held.insert(Self::normalize(key));
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(&Self::normalize(key));
    }

    /// Drop every held key (focus loss)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.held.contains(&Self::normalize(key))
    }

    /// Snapshot the bound triggers for this frame
    pub fn poll(&self, bindings: &KeyBindings) -> FrameInput {
        FrameInput {
            fire: self.is_down(&bindings.fire),
            left: self.is_down(&bindings.left),
            right: self.is_down(&bindings.right),
        }
    }
}
