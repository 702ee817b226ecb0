//! Hotkey domain module

mod binding;
mod tracker;

pub use binding::{keys, HotkeyBinding, Modifier};
pub use tracker::{HotkeyPress, HotkeyTracker, ModifierState};
