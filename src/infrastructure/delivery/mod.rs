//! Text delivery adapters

mod paste;
mod typing;

use std::sync::Arc;

pub use paste::PasteDelivery;
pub use typing::TypingDelivery;

use crate::application::ports::TextDelivery;

/// Choose the delivery adapter for the configured insertion mode
pub fn build_delivery(auto_paste: bool) -> Arc<dyn TextDelivery> {
    if auto_paste {
        Arc::new(PasteDelivery::new())
    } else {
        Arc::new(TypingDelivery::new())
    }
}
