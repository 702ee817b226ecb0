//! Keyscribe - hotkey-driven voice to text for your desktop
//!
//! Hold a key, speak, release; the transcript lands in whatever window has
//! focus. A toggle hotkey covers longer dictation sessions.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Hotkey tracking, session state machine, history, config
//! - **Application**: Orchestrator event loop, pipeline, port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, rdev, Whisper, enigo, etc.)
//! - **HTTP**: Localhost dashboard API for status, history, and the hotkey switch
//! - **CLI**: Command-line interface and the daemon runner

pub mod application;
pub mod cli;
pub mod domain;
pub mod http;
pub mod infrastructure;
