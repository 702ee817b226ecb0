//! Modifier tracker and hotkey matcher
//!
//! Converts the raw key-down/key-up stream into an always-current modifier
//! state and binary match decisions against the two configured bindings. Pure
//! classification: this component never starts or stops anything itself.

use super::binding::{HotkeyBinding, Modifier};

/// Live pressed/released state of the logical modifier keys.
/// Mutated only by key events, never inferred from polling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    shift: bool,
    ctrl: bool,
    alt: bool,
}

impl ModifierState {
    /// Mark a modifier as held. Idempotent.
    pub fn press(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Shift => self.shift = true,
            Modifier::Ctrl => self.ctrl = true,
            Modifier::Alt => self.alt = true,
        }
    }

    /// Mark a modifier as released. Idempotent.
    pub fn release(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Shift => self.shift = false,
            Modifier::Ctrl => self.ctrl = false,
            Modifier::Alt => self.alt = false,
        }
    }

    /// Whether the given modifier is currently held
    pub fn is_held(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
        }
    }

    /// Exact-match comparison against a binding's required modifier set.
    /// A binding that does not require a modifier must see it released.
    fn satisfies(&self, binding: &HotkeyBinding) -> bool {
        self.shift == binding.shift && self.ctrl == binding.ctrl && self.alt == binding.alt
    }
}

/// Which binding a key-down event matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyPress {
    ToggleListen,
    PushToTalk,
}

/// Tracks modifier state and classifies key events against the two bindings.
///
/// Toggle-listen is always evaluated before push-to-talk, so when both
/// bindings share a key code and the modifier sets collide, toggle wins
/// deterministically.
#[derive(Debug)]
pub struct HotkeyTracker {
    modifiers: ModifierState,
    push_to_talk: HotkeyBinding,
    toggle_listen: HotkeyBinding,
    ptt_held: bool,
}

impl HotkeyTracker {
    pub fn new(push_to_talk: HotkeyBinding, toggle_listen: HotkeyBinding) -> Self {
        Self {
            modifiers: ModifierState::default(),
            push_to_talk,
            toggle_listen,
            ptt_held: false,
        }
    }

    /// Current modifier state
    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    /// Whether the push-to-talk key is currently held down
    pub fn is_push_to_talk_held(&self) -> bool {
        self.ptt_held
    }

    /// Process a key-down event. Modifiers are folded into the state before
    /// the bindings are evaluated, so a modifier press can complete a chord
    /// on the same event only if the binding keys on the modifier itself.
    pub fn on_key_down(&mut self, key_code: u32) -> Option<HotkeyPress> {
        if let Some(modifier) = Modifier::from_key_code(key_code) {
            self.modifiers.press(modifier);
        }

        if key_code == self.toggle_listen.key_code && self.modifiers.satisfies(&self.toggle_listen)
        {
            return Some(HotkeyPress::ToggleListen);
        }

        if key_code == self.push_to_talk.key_code && self.modifiers.satisfies(&self.push_to_talk) {
            self.ptt_held = true;
            return Some(HotkeyPress::PushToTalk);
        }

        None
    }

    /// Process a key-up event. Returns true when this release ends a
    /// push-to-talk hold that was previously matched on key-down.
    pub fn on_key_up(&mut self, key_code: u32) -> bool {
        if let Some(modifier) = Modifier::from_key_code(key_code) {
            self.modifiers.release(modifier);
        }

        if key_code == self.push_to_talk.key_code && self.ptt_held {
            self.ptt_held = false;
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hotkey::binding::keys;

    fn tracker() -> HotkeyTracker {
        HotkeyTracker::new(
            HotkeyBinding::default_push_to_talk(),
            HotkeyBinding::default_toggle_listen(),
        )
    }

    #[test]
    fn bare_key_matches_push_to_talk() {
        let mut t = tracker();
        assert_eq!(t.on_key_down(keys::PAUSE), Some(HotkeyPress::PushToTalk));
        assert!(t.is_push_to_talk_held());
    }

    #[test]
    fn shifted_key_matches_toggle_not_push_to_talk() {
        // Bindings: ptt = 3653, toggle = 3653+shift. With shift held, only
        // the toggle binding's exact modifier set is satisfied.
        let mut t = tracker();
        assert_eq!(t.on_key_down(keys::SHIFT_LEFT), None);
        assert_eq!(t.on_key_down(keys::PAUSE), Some(HotkeyPress::ToggleListen));
        assert!(!t.is_push_to_talk_held());

        // The key-up must not be misread as a push-to-talk release.
        assert!(!t.on_key_up(keys::PAUSE));
        assert!(!t.on_key_up(keys::SHIFT_LEFT));
    }

    #[test]
    fn exact_match_rejects_extra_modifiers() {
        let mut t = tracker();
        t.on_key_down(keys::CTRL_LEFT);
        // ptt requires no modifiers; ctrl held means no match at all.
        assert_eq!(t.on_key_down(keys::PAUSE), None);
        t.on_key_up(keys::CTRL_LEFT);
        assert_eq!(t.on_key_down(keys::PAUSE), Some(HotkeyPress::PushToTalk));
    }

    #[test]
    fn missing_required_modifier_rejects_match() {
        let mut t = HotkeyTracker::new(
            HotkeyBinding::new(keys::F9).with_ctrl().with_shift(),
            HotkeyBinding::new(keys::F10).with_ctrl().with_shift(),
        );
        t.on_key_down(keys::CTRL_LEFT);
        assert_eq!(t.on_key_down(keys::F9), None);
        t.on_key_down(keys::SHIFT_LEFT);
        assert_eq!(t.on_key_down(keys::F9), Some(HotkeyPress::PushToTalk));
        assert_eq!(t.on_key_down(keys::F10), Some(HotkeyPress::ToggleListen));
    }

    #[test]
    fn right_side_modifiers_count() {
        let mut t = tracker();
        t.on_key_down(keys::SHIFT_RIGHT);
        assert_eq!(t.on_key_down(keys::PAUSE), Some(HotkeyPress::ToggleListen));
    }

    #[test]
    fn toggle_wins_ties_when_bindings_collide() {
        // Both bindings identical: toggle is evaluated first and wins.
        let binding = HotkeyBinding::new(keys::F9);
        let mut t = HotkeyTracker::new(binding, binding);
        assert_eq!(t.on_key_down(keys::F9), Some(HotkeyPress::ToggleListen));
    }

    #[test]
    fn key_up_reports_push_to_talk_release_once() {
        let mut t = tracker();
        t.on_key_down(keys::PAUSE);
        assert!(t.on_key_up(keys::PAUSE));
        // A second release without a new press is not a release event.
        assert!(!t.on_key_up(keys::PAUSE));
    }

    #[test]
    fn unrelated_key_up_is_not_a_release() {
        let mut t = tracker();
        t.on_key_down(keys::PAUSE);
        assert!(!t.on_key_up(keys::SPACE));
        assert!(t.is_push_to_talk_held());
    }

    #[test]
    fn modifier_press_is_idempotent() {
        let mut t = tracker();
        t.on_key_down(keys::SHIFT_LEFT);
        t.on_key_down(keys::SHIFT_LEFT);
        assert!(t.modifiers().is_held(Modifier::Shift));
        t.on_key_up(keys::SHIFT_LEFT);
        assert!(!t.modifiers().is_held(Modifier::Shift));
    }
}
