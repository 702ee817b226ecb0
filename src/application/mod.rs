//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod orchestrator;
pub mod pipeline;
pub mod ports;

// Re-export use cases
pub use orchestrator::{event_channel, Orchestrator, OrchestratorEvent};
pub use pipeline::{PipelineOutcome, TranscriptionPipeline};
