//! Mapping from rdev keys to the numeric key codes used in hotkey bindings

use rdev::Key;

use crate::domain::hotkey::keys;

/// Translate an rdev key into the numeric code space of hotkey bindings.
/// Keys with no assigned code cannot be bound and are dropped.
pub fn key_code(key: Key) -> Option<u32> {
    let code = match key {
        Key::Escape => keys::ESCAPE,
        Key::Return => keys::ENTER,
        Key::Space => keys::SPACE,
        Key::ControlLeft => keys::CTRL_LEFT,
        Key::ControlRight => keys::CTRL_RIGHT,
        Key::ShiftLeft => keys::SHIFT_LEFT,
        Key::ShiftRight => keys::SHIFT_RIGHT,
        Key::Alt => keys::ALT_LEFT,
        Key::AltGr => keys::ALT_RIGHT,
        Key::Pause => keys::PAUSE,
        Key::F1 => keys::F1,
        Key::F2 => keys::F2,
        Key::F3 => keys::F3,
        Key::F4 => keys::F4,
        Key::F5 => keys::F5,
        Key::F6 => keys::F6,
        Key::F7 => keys::F7,
        Key::F8 => keys::F8,
        Key::F9 => keys::F9,
        Key::F10 => keys::F10,
        Key::F11 => keys::F11,
        Key::F12 => keys::F12,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_default_binding_keys() {
        assert_eq!(key_code(Key::Pause), Some(keys::PAUSE));
        assert_eq!(key_code(Key::ShiftLeft), Some(keys::SHIFT_LEFT));
        assert_eq!(key_code(Key::ShiftRight), Some(keys::SHIFT_RIGHT));
    }

    #[test]
    fn maps_modifiers_on_both_sides() {
        assert_eq!(key_code(Key::ControlLeft), Some(keys::CTRL_LEFT));
        assert_eq!(key_code(Key::ControlRight), Some(keys::CTRL_RIGHT));
        assert_eq!(key_code(Key::Alt), Some(keys::ALT_LEFT));
        assert_eq!(key_code(Key::AltGr), Some(keys::ALT_RIGHT));
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        assert_eq!(key_code(Key::KeyA), None);
        assert_eq!(key_code(Key::Tab), None);
    }
}
