//! Session orchestrator
//!
//! Owns the hotkey tracker and session state machine and drives capture,
//! pipeline, timers, and status reporting from a single event loop. All
//! inbound sources funnel through one channel, so state transitions are
//! decided in one place and never race.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::audio::BackendLimits;
use crate::domain::hotkey::{HotkeyPress, HotkeyTracker};
use crate::domain::session::{
    ActivationMode, SessionEvent, SessionMachine, SessionStatus, Transition,
};

use super::pipeline::{PipelineOutcome, TranscriptionPipeline};
use super::ports::{AudioCapture, AudioCue, AudioCueType, HotkeySwitch, StatusSink};

/// Events drained by the orchestrator loop
#[derive(Debug)]
pub enum OrchestratorEvent {
    /// Raw key-down from the global listener (numeric key code)
    KeyDown(u32),
    /// Raw key-up from the global listener
    KeyUp(u32),
    /// The auto-stop timer or byte ceiling fired for the given session
    LimitReached { generation: u64 },
    /// The pipeline spawned for the last session finished
    PipelineFinished(PipelineOutcome),
    /// Stop the event loop
    Shutdown,
}

/// Channel depth for inbound events. Key events are small and drained fast;
/// if the loop ever falls this far behind, dropping is better than blocking
/// the key listener thread.
const EVENT_CHANNEL_CAPACITY: usize = 256;

pub fn event_channel() -> (
    mpsc::Sender<OrchestratorEvent>,
    mpsc::Receiver<OrchestratorEvent>,
) {
    mpsc::channel(EVENT_CHANNEL_CAPACITY)
}

/// The recording-session orchestrator.
///
/// `run` consumes events until `Shutdown` or until every sender is dropped.
pub struct Orchestrator {
    tracker: HotkeyTracker,
    machine: SessionMachine,
    capture: Arc<dyn AudioCapture>,
    pipeline: Arc<TranscriptionPipeline>,
    status: Arc<dyn StatusSink>,
    cue: Option<Arc<dyn AudioCue>>,
    hotkeys: HotkeySwitch,
    limits: BackendLimits,
    tx: mpsc::Sender<OrchestratorEvent>,
    rx: mpsc::Receiver<OrchestratorEvent>,
    limit_timer: Option<JoinHandle<()>>,
}

impl Orchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tracker: HotkeyTracker,
        capture: Arc<dyn AudioCapture>,
        pipeline: Arc<TranscriptionPipeline>,
        status: Arc<dyn StatusSink>,
        cue: Option<Arc<dyn AudioCue>>,
        hotkeys: HotkeySwitch,
        limits: BackendLimits,
        tx: mpsc::Sender<OrchestratorEvent>,
        rx: mpsc::Receiver<OrchestratorEvent>,
    ) -> Self {
        Self {
            tracker,
            machine: SessionMachine::new(),
            capture,
            pipeline,
            status,
            cue,
            hotkeys,
            limits,
            tx,
            rx,
            limit_timer: None,
        }
    }

    /// Sender for feeding events from listener threads and HTTP handlers
    pub fn sender(&self) -> mpsc::Sender<OrchestratorEvent> {
        self.tx.clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.machine.status()
    }

    /// Drain events until shutdown.
    ///
    /// Shutdown is forceful: an active capture is stopped so the stream
    /// thread winds down, and any in-flight transcription is abandoned.
    pub async fn run(&mut self) {
        while let Some(event) = self.rx.recv().await {
            if matches!(event, OrchestratorEvent::Shutdown) {
                debug!("orchestrator shutting down");
                break;
            }
            self.handle_event(event).await;
        }
        self.disarm_limit_timer();
        if self.capture.is_capturing() {
            let _ = self.capture.stop().await;
        }
    }

    /// Apply one inbound event.
    pub async fn handle_event(&mut self, event: OrchestratorEvent) {
        match event {
            OrchestratorEvent::KeyDown(code) => {
                let Some(press) = self.tracker.on_key_down(code) else {
                    return;
                };
                if !self.hotkeys.is_enabled() {
                    debug!("hotkeys disabled, dropping {:?}", press);
                    return;
                }
                let session_event = match press {
                    HotkeyPress::PushToTalk => SessionEvent::PushToTalkPressed,
                    HotkeyPress::ToggleListen => SessionEvent::TogglePressed,
                };
                self.apply(session_event).await;
            }
            OrchestratorEvent::KeyUp(code) => {
                // A push-to-talk release ends the session even while hotkeys
                // are disabled; a held key must never record forever.
                if self.tracker.on_key_up(code) {
                    self.apply(SessionEvent::PushToTalkReleased).await;
                }
            }
            OrchestratorEvent::LimitReached { generation } => {
                self.apply(SessionEvent::LimitReached { generation }).await;
            }
            OrchestratorEvent::PipelineFinished(outcome) => {
                self.report_outcome(outcome);
                self.apply(SessionEvent::PipelineFinished).await;
            }
            OrchestratorEvent::Shutdown => {}
        }
    }

    async fn apply(&mut self, event: SessionEvent) {
        match self.machine.handle(event) {
            Transition::Start(mode) => self.start_session(mode).await,
            Transition::Finish(mode) => self.finish_session(mode).await,
            Transition::Complete => {
                self.status.status_changed(SessionStatus::Idle);
            }
            Transition::Ignored => {}
        }
    }

    async fn start_session(&mut self, mode: ActivationMode) {
        let generation = self.machine.generation();
        let on_limit = {
            let tx = self.tx.clone();
            Arc::new(move || {
                // Called from the audio callback thread; never block it.
                let _ = tx.try_send(OrchestratorEvent::LimitReached { generation });
            }) as Arc<dyn Fn() + Send + Sync>
        };

        if let Err(e) = self.capture.start(self.limits.max_bytes, Some(on_limit)).await {
            warn!("could not start capture: {}", e);
            self.machine.abort_start();
            self.status.pipeline_error(&format!("Could not start recording: {e}"));
            return;
        }

        self.arm_limit_timer(generation);
        self.play_cue(AudioCueType::RecordingStart);
        debug!("session {} started ({:?})", generation, mode);
        self.status.status_changed(SessionStatus::Recording);
    }

    async fn finish_session(&mut self, mode: ActivationMode) {
        self.disarm_limit_timer();
        let audio = self.capture.stop().await;
        debug!(
            "session finished ({:?}), {} bytes captured",
            mode,
            audio.byte_len()
        );
        self.status.status_changed(SessionStatus::Transcribing);
        self.play_cue(AudioCueType::RecordingStop);

        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = pipeline.run(audio).await;
            // The loop owns the receiver for its whole life; this only fails
            // at shutdown, when the outcome is moot.
            let _ = tx.send(OrchestratorEvent::PipelineFinished(outcome)).await;
        });
    }

    fn report_outcome(&self, outcome: PipelineOutcome) {
        if let Some(record) = &outcome.record {
            self.status.transcription_complete(record);
        }
        if let Some(message) = &outcome.error {
            warn!("pipeline error: {}", message);
            self.status.pipeline_error(message);
        }
    }

    fn arm_limit_timer(&mut self, generation: u64) {
        let tx = self.tx.clone();
        let max_duration = self.limits.max_duration;
        self.limit_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(max_duration).await;
            let _ = tx.send(OrchestratorEvent::LimitReached { generation }).await;
        }));
    }

    fn disarm_limit_timer(&mut self) {
        if let Some(timer) = self.limit_timer.take() {
            timer.abort();
        }
    }

    fn play_cue(&self, cue_type: AudioCueType) {
        if let Some(cue) = &self.cue {
            let cue = Arc::clone(cue);
            tokio::spawn(async move {
                if let Err(e) = cue.play(cue_type).await {
                    debug!("audio cue failed: {}", e);
                }
            });
        }
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.disarm_limit_timer();
    }
}
