//! Clipboard-paste delivery using arboard and enigo
//!
//! Copies the transcript to the clipboard and synthesizes a paste chord.
//! Faster than typing long transcripts character by character, at the cost
//! of clobbering the user's clipboard.

use async_trait::async_trait;

use crate::application::ports::{DeliveryError, TextDelivery};

/// Delivers text via clipboard plus a paste keystroke
pub struct PasteDelivery;

impl PasteDelivery {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PasteDelivery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextDelivery for PasteDelivery {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        let text = text.to_owned();

        // arboard and enigo are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            use enigo::{Direction, Enigo, Key, Keyboard, Settings};

            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| DeliveryError::ClipboardUnavailable(e.to_string()))?;
            clipboard
                .set_text(&text)
                .map_err(|e| DeliveryError::CopyFailed(e.to_string()))?;

            let mut enigo = Enigo::new(&Settings::default())
                .map_err(|e| DeliveryError::TypeFailed(format!("Failed to create enigo: {}", e)))?;

            #[cfg(target_os = "macos")]
            let modifier = Key::Meta;
            #[cfg(not(target_os = "macos"))]
            let modifier = Key::Control;

            enigo
                .key(modifier, Direction::Press)
                .and_then(|_| enigo.key(Key::Unicode('v'), Direction::Click))
                .and_then(|_| enigo.key(modifier, Direction::Release))
                .map_err(|e| DeliveryError::TypeFailed(format!("Paste failed: {}", e)))
        })
        .await
        .map_err(|e| DeliveryError::TypeFailed(format!("Task join error: {}", e)))?
    }
}
