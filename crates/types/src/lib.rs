//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the engine core, the session driver
//! and any front end that renders a board.
//!
//! # Board Dimensions
//!
//! Conventional playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21), the top 2 rows are a hidden spawn buffer
//! - **Spawn position**: (3, 0) for every piece
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed tick period of the driver (~60 FPS) |
//! | `DROP_INTERVALS` | 1000..160 | Gravity interval per level |
//! | `DROP_INTERVAL_FLOOR_MS` | 120 | Gravity interval past the table |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece: PieceKind = "t".parse().unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color_id(), 6);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells, hidden buffer included (22 rows)
pub const BOARD_HEIGHT: usize = 22;

/// Rows above the visible playfield used as spawn buffer
pub const HIDDEN_ROWS: usize = 2;

/// Rows shown to the player
pub const VISIBLE_ROWS: usize = BOARD_HEIGHT - HIDDEN_ROWS;

/// Spawn column of the shape mask's left edge (centers a 4-wide mask on a 10-wide board)
pub const SPAWN_X: i32 = 3;

/// Spawn row of the shape mask's top edge
pub const SPAWN_Y: i32 = 0;

/// Side length of every shape mask
pub const MASK_SIZE: usize = 4;

/// Minimum number of queued piece types kept ahead of the active piece
pub const LOOKAHEAD: usize = 2;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Drop intervals by level (milliseconds per row)
///
/// Index 0 = Level 0, Index 8 = Level 8
pub const DROP_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Gravity interval once the level runs past `DROP_INTERVALS`
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per row travelled by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Points per row travelled by a player-issued soft drop
pub const SOFT_DROP_POINTS_PER_ROW: u32 = 1;

/// Line clear scoring table
///
/// Points for clearing N rows with a single lock:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Any other count scores 0.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// A cell on the game board
///
/// - `0`: Empty cell
/// - `1..=7`: Cell filled by the piece kind with that color id
pub type Cell = u8;

/// Value of an empty cell
pub const EMPTY_CELL: Cell = 0;

/// The seven piece kinds
///
/// The declaration order fixes the color ids: I=1, J=2, L=3, O=4, S=5, T=6, Z=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in color-id order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Uppercase identifier used in snapshots
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_str(), "I");
    /// assert_eq!(PieceKind::Z.as_str(), "Z");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Cell value written into the grid when this kind locks
    pub fn color_id(&self) -> Cell {
        *self as Cell + 1
    }

    /// Inverse of [`PieceKind::color_id`]
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_color_id(4), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_color_id(0), None);
    /// assert_eq!(PieceKind::from_color_id(8), None);
    /// ```
    pub fn from_color_id(id: Cell) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized piece identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown piece kind: {0:?}")]
pub struct ParsePieceKindError(pub String);

impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    /// Parse piece kind from its identifier (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "I" => Ok(PieceKind::I),
            "J" => Ok(PieceKind::J),
            "L" => Ok(PieceKind::L),
            "O" => Ok(PieceKind::O),
            "S" => Ok(PieceKind::S),
            "T" => Ok(PieceKind::T),
            "Z" => Ok(PieceKind::Z),
            _ => Err(ParsePieceKindError(s.to_string())),
        }
    }
}

/// Commands a driver applies to a running session
///
/// These are used by human input mappings and scripted players alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Drop piece to its resting row and lock it
    HardDrop,
    /// Advance to the next rotation state
    Rotate,
    /// Toggle pause state
    Pause,
    /// Start a fresh game
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Drop-speed tier chosen by the player
///
/// Each tier starts gravity a fixed number of levels ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl DropSpeed {
    /// Levels added to the session level when picking a gravity interval
    pub fn level_offset(&self) -> u32 {
        match self {
            DropSpeed::Slow => 0,
            DropSpeed::Normal => 2,
            DropSpeed::Fast => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DropSpeed::Slow => "slow",
            DropSpeed::Normal => "normal",
            DropSpeed::Fast => "fast",
        }
    }

    /// ```
    /// use blockfall_types::DropSpeed;
    ///
    /// assert_eq!(DropSpeed::parse("FAST"), Some(DropSpeed::Fast));
    /// assert_eq!(DropSpeed::parse("warp"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "slow" => Some(DropSpeed::Slow),
            "normal" => Some(DropSpeed::Normal),
            "fast" => Some(DropSpeed::Fast),
            _ => None,
        }
    }
}

/// Gameplay toggles supplied by the driver and carried through snapshots
///
/// The board engine never reads these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Toggles {
    pub drop_speed: DropSpeed,
    pub ghost_enabled: bool,
    pub alternate_drop: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            drop_speed: DropSpeed::Normal,
            ghost_enabled: true,
            alternate_drop: false,
        }
    }
}
