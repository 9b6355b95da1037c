//! Protocol module - script lines in, JSON observations out
//!
//! Every output line is one JSON object with `type` and `seq` (line sequence number).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::GameSnapshot;
use crate::types::{
    cell_code, Coord, GameAction, LockEvent, Orientation, PieceKind, BOARD_HEIGHT, BOARD_WIDTH,
    PREVIEW_LEN,
};

// ============== Script Input ==============

/// One parsed script instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLine {
    /// A discrete game command
    Action(GameAction),
    /// Let time pass, in milliseconds
    Tick(u32),
}

/// Rejected script line; the session is left untouched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("`tick` needs a duration in milliseconds")]
    MissingTickDuration,
    #[error("invalid tick duration `{value}`")]
    InvalidTickDuration {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("unexpected argument `{arg}` after `{command}`")]
    UnexpectedArgument { command: String, arg: String },
}

/// Parse one script line
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_line(line: &str) -> Result<Option<ScriptLine>, ProtocolError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if let Some(extra) = words.next() {
        return Err(ProtocolError::UnexpectedArgument {
            command: command.to_string(),
            arg: extra.to_string(),
        });
    }

    if command.eq_ignore_ascii_case("tick") {
        let value = arg.ok_or(ProtocolError::MissingTickDuration)?;
        let ms = value
            .parse::<u32>()
            .map_err(|source| ProtocolError::InvalidTickDuration {
                value: value.to_string(),
                source,
            })?;
        return Ok(Some(ScriptLine::Tick(ms)));
    }

    let action = GameAction::from_str(command)
        .ok_or_else(|| ProtocolError::UnknownCommand(command.to_string()))?;
    if let Some(arg) = arg {
        return Err(ProtocolError::UnexpectedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        });
    }
    Ok(Some(ScriptLine::Action(action)))
}

// ============== Observation Output ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

/// Game state after one applied script line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    /// Whether the line changed anything (a rejected move or an idle tick is `false`)
    pub accepted: bool,
    pub playable: bool,
    pub game_over: bool,
    pub board: BoardSnapshot,
    pub active: ActivePieceSnapshot,
    pub ghost: [Coord; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold: Option<PieceKindLower>,
    pub can_hold: bool,
    pub next_queue: [PieceKindLower; PREVIEW_LEN],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event: Option<LastEvent>,
    pub score: u32,
    pub combo: u32,
    pub lines: u32,
    pub level: u32,
}

impl ObservationMessage {
    pub fn from_snapshot(
        seq: u64,
        accepted: bool,
        snapshot: &GameSnapshot,
        last_event: Option<LockEvent>,
    ) -> Self {
        Self {
            msg_type: ObservationType::Observation,
            seq,
            accepted,
            playable: snapshot.playable(),
            game_over: snapshot.game_over,
            board: BoardSnapshot::from(snapshot),
            active: ActivePieceSnapshot {
                kind: snapshot.active.kind.into(),
                rotation: snapshot.active.orientation.into(),
                cells: snapshot.active.cells,
            },
            ghost: snapshot.ghost,
            hold: snapshot.hold.map(Into::into),
            can_hold: snapshot.can_hold,
            next_queue: snapshot.preview.map(Into::into),
            last_event: last_event.map(Into::into),
            score: snapshot.score,
            combo: snapshot.combo,
            lines: snapshot.lines,
            level: snapshot.level,
        }
    }
}

/// Locked cells as colour codes, top row first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    /// 0 = empty, 1-7 = piece colour
    pub cells: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
}

impl From<&GameSnapshot> for BoardSnapshot {
    fn from(snapshot: &GameSnapshot) -> Self {
        let mut cells = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (out, row) in cells.iter_mut().zip(snapshot.grid.iter().rev()) {
            for (code, &cell) in out.iter_mut().zip(row) {
                *code = cell_code(cell);
            }
        }
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePieceSnapshot {
    pub kind: PieceKindLower,
    pub rotation: RotationLower,
    /// Absolute cells, y counted up from the floor
    pub cells: [Coord; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKindLower {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl From<PieceKind> for PieceKindLower {
    fn from(value: PieceKind) -> Self {
        match value {
            PieceKind::I => Self::I,
            PieceKind::J => Self::J,
            PieceKind::L => Self::L,
            PieceKind::O => Self::O,
            PieceKind::S => Self::S,
            PieceKind::T => Self::T,
            PieceKind::Z => Self::Z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationLower {
    North,
    East,
    South,
    West,
}

impl From<Orientation> for RotationLower {
    fn from(value: Orientation) -> Self {
        match value {
            Orientation::Spawn => Self::North,
            Orientation::Right => Self::East,
            Orientation::Reverse => Self::South,
            Orientation::Left => Self::West,
        }
    }
}

/// The lock that happened while applying this line, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastEvent {
    pub kind: PieceKindLower,
    pub lines_cleared: u32,
    pub score_awarded: u32,
    pub combo: u32,
    pub game_over: bool,
}

impl From<LockEvent> for LastEvent {
    fn from(value: LockEvent) -> Self {
        Self {
            kind: value.kind.into(),
            lines_cleared: value.lines_cleared,
            score_awarded: value.score_awarded,
            combo: value.combo,
            game_over: value.game_over,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

/// Report for a script line that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub message: String,
}

/// Create an error message
pub fn create_error(seq: u64, error: &ProtocolError) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        message: error.to_string(),
    }
}
