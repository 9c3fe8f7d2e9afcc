//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board simulation engine. It has **no dependencies** on
//! rendering, input devices, timers or I/O, which keeps it:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule is reachable from plain unit tests
//! - **Portable**: runs under any driver (terminal, GUI, headless)
//! - **Instance-scoped**: no globals, so any number of boards may coexist
//!
//! # Module Structure
//!
//! - [`grid`]: cell matrix plus collision, merge and line-clear functions
//! - [`pieces`]: the seven kinds and their rotation masks
//! - [`rng`]: uniform random piece queue with a lookahead of two
//! - [`active`]: the falling piece's kind, rotation and offset
//! - [`board`]: the engine state machine composing the above
//! - [`snapshot`]: save/restore value types
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every kind is drawn independently, repeats allowed
//! - **Simple rotation**: the next state is tried in place, no wall kicks
//! - **Ghost piece**: projection of where the current piece will land
//! - **Scoring**: 100 / 300 / 500 / 800 for 1-4 rows cleared at once
//!
//! # Example
//!
//! ```
//! use blockfall_core::Board;
//!
//! let mut board = Board::new(10, 22).unwrap();
//! assert!(!board.new_game());
//!
//! board.move_left();
//! board.rotate();
//! while board.move_down() {}
//! board.lock();
//! let cleared = board.clear_lines();
//! board.add_score(cleared.points);
//! let game_over = board.spawn_next();
//! assert!(!game_over);
//! ```

pub mod active;
pub mod board;
pub mod error;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use active::ActivePiece;
pub use board::{Board, BoardState, BoardView};
pub use error::{ConfigError, RestoreError};
pub use grid::{clear_full_rows, intersects, merge, Grid, LineClearResult, ShapeMask};
pub use pieces::{get_shape, get_spawn_shape, rotations};
pub use rng::{PieceQueue, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot, SessionFields};
