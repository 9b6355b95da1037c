//! Script runtime - applies parsed lines to a session and observes the result

use tracing::{debug, warn};

use crate::core::GameSession;
use crate::protocol::{parse_line, ObservationMessage, ProtocolError, ScriptLine};

/// Drives one session from script lines.
#[derive(Debug, Clone)]
pub struct ScriptRunner {
    session: GameSession,
    /// Number of lines applied so far
    seq: u64,
}

impl ScriptRunner {
    pub fn new(session: GameSession) -> Self {
        Self { session, seq: 0 }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn into_session(self) -> GameSession {
        self.session
    }

    /// Sequence number of the last observation
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Parse and apply one raw line
    ///
    /// Blank and comment lines yield `Ok(None)`. A malformed line is returned as an
    /// error before anything reaches the session.
    pub fn apply_line(&mut self, line: &str) -> Result<Option<ObservationMessage>, ProtocolError> {
        match parse_line(line) {
            Ok(Some(parsed)) => Ok(Some(self.apply(parsed))),
            Ok(None) => Ok(None),
            Err(e) => {
                warn!(line, error = %e, "rejected script line");
                Err(e)
            }
        }
    }

    /// Apply one parsed line and observe the session afterwards
    pub fn apply(&mut self, line: ScriptLine) -> ObservationMessage {
        let accepted = match line {
            ScriptLine::Action(action) => self.session.apply_action(action),
            ScriptLine::Tick(ms) => self.session.gravity_tick(ms),
        };
        self.seq += 1;
        debug!(seq = self.seq, ?line, accepted, "applied script line");

        let last_event = self.session.take_last_event();
        ObservationMessage::from_snapshot(self.seq, accepted, &self.session.snapshot(), last_event)
    }

    /// Apply a whole script, stopping at the first malformed line
    pub fn run_script(&mut self, script: &str) -> Result<Vec<ObservationMessage>, ProtocolError> {
        let mut observations = Vec::new();
        for line in script.lines() {
            if let Some(obs) = self.apply_line(line)? {
                observations.push(obs);
            }
        }
        Ok(observations)
    }
}
