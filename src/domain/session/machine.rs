//! Recording session state machine
//!
//! Pure transition logic for the orchestrator. All inbound sources (key
//! events, the auto-stop limit, pipeline completion) are reduced to one event
//! enum, and every transition decision is a side-effect-free function of
//! (state, event). The orchestrator executes the returned transition.

use std::fmt;

use serde::Serialize;

/// The activation mode of a recording session. At most one mode is active at
/// any instant; this is the central invariant of the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivationMode {
    /// Recording while the key is held down
    PushToTalk,
    /// Recording until a second matching press or the auto-stop limit
    Toggle,
}

/// Session status as observed from outside (tray, dashboard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Idle,
    Recording,
    Transcribing,
}

impl SessionStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Transcribing => "transcribing",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unified inbound event for the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Push-to-talk binding matched on key-down
    PushToTalkPressed,
    /// The held push-to-talk key was released
    PushToTalkReleased,
    /// Toggle-listen binding matched on key-down
    TogglePressed,
    /// Auto-stop limit (duration timer or byte ceiling) fired for the session
    /// with the given generation
    LimitReached { generation: u64 },
    /// The capture→transcribe→deliver pipeline finished, success or not
    PipelineFinished,
}

/// What the orchestrator must do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Start capture and enter the given mode
    Start(ActivationMode),
    /// Stop capture, hand the buffer to the pipeline, enter Transcribing
    Finish(ActivationMode),
    /// The pipeline is done; return to Idle
    Complete,
    /// No transition; the event is dropped
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Recording(ActivationMode),
    Transcribing,
}

/// The recording-session state machine.
///
/// States: Idle → Recording(PushToTalk|Toggle) → Transcribing → Idle.
/// Runs for the process lifetime; there is no terminal state.
///
/// Each started session gets a fresh generation number. Limit events carry the
/// generation they were armed for, so a stale timer firing after a manual stop
/// can never touch a newer session.
#[derive(Debug)]
pub struct SessionMachine {
    state: State,
    generation: u64,
}

impl SessionMachine {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            generation: 0,
        }
    }

    /// The externally observable status
    pub fn status(&self) -> SessionStatus {
        match self.state {
            State::Idle => SessionStatus::Idle,
            State::Recording(_) => SessionStatus::Recording,
            State::Transcribing => SessionStatus::Transcribing,
        }
    }

    /// The active mode, if a recording session is in progress
    pub fn mode(&self) -> Option<ActivationMode> {
        match self.state {
            State::Recording(mode) => Some(mode),
            _ => None,
        }
    }

    /// Generation of the current (or most recent) session
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply one event and return the transition the orchestrator must
    /// execute. Everything not in the transition table is ignored; in
    /// particular, a hotkey press for one mode while the other mode is
    /// recording never starts or stops anything.
    pub fn handle(&mut self, event: SessionEvent) -> Transition {
        match (self.state, event) {
            (State::Idle, SessionEvent::PushToTalkPressed) => {
                self.generation += 1;
                self.state = State::Recording(ActivationMode::PushToTalk);
                Transition::Start(ActivationMode::PushToTalk)
            }
            (State::Idle, SessionEvent::TogglePressed) => {
                self.generation += 1;
                self.state = State::Recording(ActivationMode::Toggle);
                Transition::Start(ActivationMode::Toggle)
            }
            (State::Recording(ActivationMode::PushToTalk), SessionEvent::PushToTalkReleased) => {
                self.state = State::Transcribing;
                Transition::Finish(ActivationMode::PushToTalk)
            }
            (State::Recording(ActivationMode::Toggle), SessionEvent::TogglePressed) => {
                self.state = State::Transcribing;
                Transition::Finish(ActivationMode::Toggle)
            }
            (State::Recording(mode), SessionEvent::LimitReached { generation })
                if generation == self.generation =>
            {
                self.state = State::Transcribing;
                Transition::Finish(mode)
            }
            (State::Transcribing, SessionEvent::PipelineFinished) => {
                self.state = State::Idle;
                Transition::Complete
            }
            _ => Transition::Ignored,
        }
    }

    /// Roll back a `Start` whose capture could not begin. The machine returns
    /// to Idle as if the session had never existed; observers were never told
    /// about it.
    pub fn abort_start(&mut self) {
        if matches!(self.state, State::Recording(_)) {
            self.state = State::Idle;
        }
    }
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_machine_is_idle() {
        let machine = SessionMachine::new();
        assert_eq!(machine.status(), SessionStatus::Idle);
        assert_eq!(machine.mode(), None);
    }

    #[test]
    fn push_to_talk_full_cycle() {
        let mut m = SessionMachine::new();
        assert_eq!(
            m.handle(SessionEvent::PushToTalkPressed),
            Transition::Start(ActivationMode::PushToTalk)
        );
        assert_eq!(m.status(), SessionStatus::Recording);
        assert_eq!(m.mode(), Some(ActivationMode::PushToTalk));

        assert_eq!(
            m.handle(SessionEvent::PushToTalkReleased),
            Transition::Finish(ActivationMode::PushToTalk)
        );
        assert_eq!(m.status(), SessionStatus::Transcribing);

        assert_eq!(m.handle(SessionEvent::PipelineFinished), Transition::Complete);
        assert_eq!(m.status(), SessionStatus::Idle);
    }

    #[test]
    fn toggle_requires_second_press_to_stop() {
        let mut m = SessionMachine::new();
        assert_eq!(
            m.handle(SessionEvent::TogglePressed),
            Transition::Start(ActivationMode::Toggle)
        );
        // A push-to-talk release means nothing to a toggle session.
        assert_eq!(m.handle(SessionEvent::PushToTalkReleased), Transition::Ignored);
        assert_eq!(m.status(), SessionStatus::Recording);

        assert_eq!(
            m.handle(SessionEvent::TogglePressed),
            Transition::Finish(ActivationMode::Toggle)
        );
    }

    #[test]
    fn modes_are_mutually_exclusive() {
        let mut m = SessionMachine::new();
        m.handle(SessionEvent::TogglePressed);

        // Push-to-talk events while toggle is active are dropped entirely.
        assert_eq!(m.handle(SessionEvent::PushToTalkPressed), Transition::Ignored);
        assert_eq!(m.handle(SessionEvent::PushToTalkReleased), Transition::Ignored);
        assert_eq!(m.mode(), Some(ActivationMode::Toggle));

        let mut m = SessionMachine::new();
        m.handle(SessionEvent::PushToTalkPressed);
        assert_eq!(m.handle(SessionEvent::TogglePressed), Transition::Ignored);
        assert_eq!(m.mode(), Some(ActivationMode::PushToTalk));
    }

    #[test]
    fn no_new_session_while_transcribing() {
        let mut m = SessionMachine::new();
        m.handle(SessionEvent::PushToTalkPressed);
        m.handle(SessionEvent::PushToTalkReleased);
        assert_eq!(m.status(), SessionStatus::Transcribing);

        assert_eq!(m.handle(SessionEvent::PushToTalkPressed), Transition::Ignored);
        assert_eq!(m.handle(SessionEvent::TogglePressed), Transition::Ignored);
        assert_eq!(m.status(), SessionStatus::Transcribing);
    }

    #[test]
    fn limit_stops_the_current_session() {
        let mut m = SessionMachine::new();
        m.handle(SessionEvent::TogglePressed);
        let generation = m.generation();

        assert_eq!(
            m.handle(SessionEvent::LimitReached { generation }),
            Transition::Finish(ActivationMode::Toggle)
        );
        assert_eq!(m.status(), SessionStatus::Transcribing);
    }

    #[test]
    fn stale_limit_event_is_ignored() {
        let mut m = SessionMachine::new();
        m.handle(SessionEvent::PushToTalkPressed);
        let stale = m.generation();
        m.handle(SessionEvent::PushToTalkReleased);
        m.handle(SessionEvent::PipelineFinished);

        // New session; the old session's timer fires late.
        m.handle(SessionEvent::PushToTalkPressed);
        assert_eq!(
            m.handle(SessionEvent::LimitReached { generation: stale }),
            Transition::Ignored
        );
        assert_eq!(m.status(), SessionStatus::Recording);
    }

    #[test]
    fn release_after_limit_stop_is_a_no_op() {
        let mut m = SessionMachine::new();
        m.handle(SessionEvent::PushToTalkPressed);
        let generation = m.generation();
        m.handle(SessionEvent::LimitReached { generation });
        assert_eq!(m.status(), SessionStatus::Transcribing);

        // Key-up arrives after the limit already stopped the session.
        assert_eq!(m.handle(SessionEvent::PushToTalkReleased), Transition::Ignored);
        assert_eq!(m.status(), SessionStatus::Transcribing);
    }

    #[test]
    fn limit_in_idle_or_transcribing_is_ignored() {
        let mut m = SessionMachine::new();
        assert_eq!(
            m.handle(SessionEvent::LimitReached { generation: 0 }),
            Transition::Ignored
        );
        m.handle(SessionEvent::PushToTalkPressed);
        let generation = m.generation();
        m.handle(SessionEvent::PushToTalkReleased);
        assert_eq!(
            m.handle(SessionEvent::LimitReached { generation }),
            Transition::Ignored
        );
    }

    #[test]
    fn abort_start_returns_to_idle() {
        let mut m = SessionMachine::new();
        m.handle(SessionEvent::PushToTalkPressed);
        m.abort_start();
        assert_eq!(m.status(), SessionStatus::Idle);

        // The machine is usable again.
        assert_eq!(
            m.handle(SessionEvent::TogglePressed),
            Transition::Start(ActivationMode::Toggle)
        );
    }

    #[test]
    fn abort_start_outside_recording_is_a_no_op() {
        let mut m = SessionMachine::new();
        m.handle(SessionEvent::PushToTalkPressed);
        m.handle(SessionEvent::PushToTalkReleased);
        m.abort_start();
        assert_eq!(m.status(), SessionStatus::Transcribing);
    }

    #[test]
    fn generations_increase_per_session() {
        let mut m = SessionMachine::new();
        m.handle(SessionEvent::PushToTalkPressed);
        let first = m.generation();
        m.handle(SessionEvent::PushToTalkReleased);
        m.handle(SessionEvent::PipelineFinished);
        m.handle(SessionEvent::TogglePressed);
        assert!(m.generation() > first);
    }

    #[test]
    fn status_display() {
        assert_eq!(SessionStatus::Idle.to_string(), "idle");
        assert_eq!(SessionStatus::Recording.to_string(), "recording");
        assert_eq!(SessionStatus::Transcribing.to_string(), "transcribing");
    }
}
