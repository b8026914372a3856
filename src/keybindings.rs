//! Keyboard bindings for the lightbox.
//!
//! Keys are matched against `KeyboardEvent.key`. Single-character bindings
//! match regardless of case, so `f` and `F` both toggle fullscreen.

use serde::{Deserialize, Serialize};

/// Action triggered by a key press while the lightbox is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxAction {
    Close,
    Next,
    Prev,
    ToggleFullscreen,
}

/// Keybinding configuration for the lightbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Hotkey that closes the lightbox
    #[serde(default = "default_close")]
    pub close: String,
    /// Hotkey for the next image
    #[serde(default = "default_next")]
    pub next: String,
    /// Hotkey for the previous image
    #[serde(default = "default_prev")]
    pub prev: String,
    /// Hotkey that toggles fullscreen
    #[serde(default = "default_fullscreen")]
    pub fullscreen: String,
}

fn default_close() -> String {
    "Escape".to_string()
}

fn default_next() -> String {
    "ArrowRight".to_string()
}

fn default_prev() -> String {
    "ArrowLeft".to_string()
}

fn default_fullscreen() -> String {
    "f".to_string()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            close: default_close(),
            next: default_next(),
            prev: default_prev(),
            fullscreen: default_fullscreen(),
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for_key(&self, key: &str) -> Option<LightboxAction> {
        if key_matches(&self.close, key) {
            Some(LightboxAction::Close)
        } else if key_matches(&self.next, key) {
            Some(LightboxAction::Next)
        } else if key_matches(&self.prev, key) {
            Some(LightboxAction::Prev)
        } else if key_matches(&self.fullscreen, key) {
            Some(LightboxAction::ToggleFullscreen)
        } else {
            None
        }
    }
}

fn key_matches(binding: &str, key: &str) -> bool {
    if binding.chars().count() == 1 {
        binding.eq_ignore_ascii_case(key)
    } else {
        binding == key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.action_for_key("Escape"), Some(LightboxAction::Close));
        assert_eq!(bindings.action_for_key("ArrowRight"), Some(LightboxAction::Next));
        assert_eq!(bindings.action_for_key("ArrowLeft"), Some(LightboxAction::Prev));
        assert_eq!(bindings.action_for_key("f"), Some(LightboxAction::ToggleFullscreen));
        assert_eq!(bindings.action_for_key("F"), Some(LightboxAction::ToggleFullscreen));
    }

    #[test]
    fn test_unbound_keys() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.action_for_key("g"), None);
        assert_eq!(bindings.action_for_key("escape"), None);
        assert_eq!(bindings.action_for_key("ArrowUp"), None);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let bindings: KeyBindings = serde_json::from_str(r#"{"next": "l", "prev": "h"}"#).unwrap();
        assert_eq!(bindings.action_for_key("L"), Some(LightboxAction::Next));
        assert_eq!(bindings.action_for_key("h"), Some(LightboxAction::Prev));
        assert_eq!(bindings.action_for_key("ArrowRight"), None);
        assert_eq!(bindings.action_for_key("Escape"), Some(LightboxAction::Close));
    }
}
