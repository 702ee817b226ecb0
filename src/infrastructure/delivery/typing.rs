//! Cross-platform typing delivery using enigo
//!
//! Works on Windows, macOS, and Linux (X11/Wayland).

use async_trait::async_trait;

use crate::application::ports::{DeliveryError, TextDelivery};

/// Delivers text by synthesizing keystrokes into the focused window
pub struct TypingDelivery;

impl TypingDelivery {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TypingDelivery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextDelivery for TypingDelivery {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        let text = text.to_owned();

        // enigo operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            use enigo::{Enigo, Keyboard, Settings};

            let mut enigo = Enigo::new(&Settings::default())
                .map_err(|e| DeliveryError::TypeFailed(format!("Failed to create enigo: {}", e)))?;

            enigo
                .text(&text)
                .map_err(|e| DeliveryError::TypeFailed(format!("Failed to type text: {}", e)))
        })
        .await
        .map_err(|e| DeliveryError::TypeFailed(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_creates_successfully() {
        let _delivery = TypingDelivery::new();
    }
}
