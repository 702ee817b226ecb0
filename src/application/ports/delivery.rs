//! Text delivery port interface

use async_trait::async_trait;
use thiserror::Error;

/// Delivery errors
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    #[error("Failed to type text: {0}")]
    TypeFailed(String),

    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Failed to copy to clipboard: {0}")]
    CopyFailed(String),
}

/// Port for delivering transcribed text into the focused application
#[async_trait]
pub trait TextDelivery: Send + Sync {
    /// Deliver text at the current cursor position.
    ///
    /// # Returns
    /// Ok(()) on success, error otherwise
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Blanket implementation for boxed delivery types
#[async_trait]
impl TextDelivery for Box<dyn TextDelivery> {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        self.as_ref().deliver(text).await
    }
}
