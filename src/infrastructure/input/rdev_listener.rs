//! Global keyboard listener built on rdev
//!
//! Forwards mapped key events into the orchestrator channel from a dedicated
//! thread. rdev::listen blocks for the life of the process and offers no
//! clean shutdown, so the thread is detached and dies with the process.

use std::thread::{self, JoinHandle};

use rdev::{listen, Event, EventType};
use tokio::sync::mpsc;
use tracing::{error, warn};

use crate::application::orchestrator::OrchestratorEvent;

use super::keycodes::key_code;

/// Spawn the global key listener thread.
///
/// Events are forwarded with `try_send`: if the orchestrator ever falls
/// behind, key events are dropped rather than blocking the OS hook.
pub fn spawn_listener(tx: mpsc::Sender<OrchestratorEvent>) -> JoinHandle<()> {
    thread::spawn(move || {
        let callback = move |event: Event| {
            let orchestrator_event = match event.event_type {
                EventType::KeyPress(key) => key_code(key).map(OrchestratorEvent::KeyDown),
                EventType::KeyRelease(key) => key_code(key).map(OrchestratorEvent::KeyUp),
                _ => None,
            };
            if let Some(event) = orchestrator_event {
                if tx.try_send(event).is_err() {
                    warn!("orchestrator busy, dropping key event");
                }
            }
        };

        if let Err(e) = listen(callback) {
            error!("key listener failed: {:?}", e);
        }
    })
}
