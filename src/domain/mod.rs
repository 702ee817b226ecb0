//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod audio;
pub mod config;
pub mod error;
pub mod hotkey;
pub mod session;

// Re-export common types
pub use audio::{AudioBuffer, BackendLimits};
pub use config::{AppConfig, BackendKind};
pub use error::*;
pub use hotkey::{HotkeyBinding, HotkeyPress, HotkeyTracker};
pub use session::{ActivationMode, SessionEvent, SessionMachine, SessionStatus, Transition};
