mod history;
mod machine;

pub use history::{TranscriptionHistory, TranscriptionRecord, DEFAULT_HISTORY_LIMIT};
pub use machine::{ActivationMode, SessionEvent, SessionMachine, SessionStatus, Transition};
