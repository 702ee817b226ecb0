//! Hotkey binding value object

use serde::{Deserialize, Serialize};

/// Key codes for the keys keyscribe cares about, in the numeric scheme the
/// global key hook reports (uiohook-compatible scancodes).
pub mod keys {
    pub const ESCAPE: u32 = 1;
    pub const SPACE: u32 = 57;
    pub const ENTER: u32 = 28;

    pub const SHIFT_LEFT: u32 = 42;
    pub const SHIFT_RIGHT: u32 = 54;
    pub const CTRL_LEFT: u32 = 29;
    pub const CTRL_RIGHT: u32 = 3613;
    pub const ALT_LEFT: u32 = 56;
    pub const ALT_RIGHT: u32 = 3640;

    pub const F1: u32 = 59;
    pub const F2: u32 = 60;
    pub const F3: u32 = 61;
    pub const F4: u32 = 62;
    pub const F5: u32 = 63;
    pub const F6: u32 = 64;
    pub const F7: u32 = 65;
    pub const F8: u32 = 66;
    pub const F9: u32 = 67;
    pub const F10: u32 = 68;
    pub const F11: u32 = 87;
    pub const F12: u32 = 88;

    pub const PAUSE: u32 = 3653;
}

/// Logical modifier keys. Left and right variants of a physical modifier
/// collapse to the same logical modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
}

impl Modifier {
    /// Classify a raw key code as a modifier, if it is one
    pub fn from_key_code(key_code: u32) -> Option<Self> {
        match key_code {
            keys::SHIFT_LEFT | keys::SHIFT_RIGHT => Some(Self::Shift),
            keys::CTRL_LEFT | keys::CTRL_RIGHT => Some(Self::Ctrl),
            keys::ALT_LEFT | keys::ALT_RIGHT => Some(Self::Alt),
            _ => None,
        }
    }
}

/// A configured hotkey: a key code plus the exact modifier set that must be
/// held for the binding to match. Bindings are fixed for the lifetime of the
/// process; changing them requires a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyBinding {
    pub key_code: u32,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
}

impl HotkeyBinding {
    /// Create a binding with no required modifiers
    pub fn new(key_code: u32) -> Self {
        Self {
            key_code,
            shift: false,
            ctrl: false,
            alt: false,
        }
    }

    /// Require shift to be held
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Require ctrl to be held
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Require alt to be held
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Default push-to-talk binding: bare pause/break
    pub fn default_push_to_talk() -> Self {
        Self::new(keys::PAUSE)
    }

    /// Default toggle-listen binding: shift + pause/break
    pub fn default_toggle_listen() -> Self {
        Self::new(keys::PAUSE).with_shift()
    }

    /// Whether the binding requires the given modifier
    pub fn requires(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_from_key_code_collapses_sides() {
        assert_eq!(Modifier::from_key_code(keys::SHIFT_LEFT), Some(Modifier::Shift));
        assert_eq!(Modifier::from_key_code(keys::SHIFT_RIGHT), Some(Modifier::Shift));
        assert_eq!(Modifier::from_key_code(keys::CTRL_LEFT), Some(Modifier::Ctrl));
        assert_eq!(Modifier::from_key_code(keys::CTRL_RIGHT), Some(Modifier::Ctrl));
        assert_eq!(Modifier::from_key_code(keys::ALT_LEFT), Some(Modifier::Alt));
        assert_eq!(Modifier::from_key_code(keys::ALT_RIGHT), Some(Modifier::Alt));
    }

    #[test]
    fn modifier_from_key_code_rejects_ordinary_keys() {
        assert_eq!(Modifier::from_key_code(keys::PAUSE), None);
        assert_eq!(Modifier::from_key_code(keys::F9), None);
        assert_eq!(Modifier::from_key_code(keys::SPACE), None);
    }

    #[test]
    fn builder_sets_required_modifiers() {
        let binding = HotkeyBinding::new(keys::F9).with_ctrl().with_shift();
        assert!(binding.requires(Modifier::Ctrl));
        assert!(binding.requires(Modifier::Shift));
        assert!(!binding.requires(Modifier::Alt));
    }

    #[test]
    fn default_bindings_share_the_pause_key() {
        let ptt = HotkeyBinding::default_push_to_talk();
        let toggle = HotkeyBinding::default_toggle_listen();
        assert_eq!(ptt.key_code, keys::PAUSE);
        assert_eq!(toggle.key_code, keys::PAUSE);
        assert!(!ptt.shift);
        assert!(toggle.shift);
    }

    #[test]
    fn binding_deserializes_with_defaulted_modifiers() {
        let binding: HotkeyBinding = toml::from_str("key_code = 3653").unwrap();
        assert_eq!(binding.key_code, keys::PAUSE);
        assert!(!binding.shift);
        assert!(!binding.ctrl);
        assert!(!binding.alt);
    }
}
