//! Error types for board construction and snapshot restore.

use thiserror::Error;

use crate::types::{Cell, PieceKind};

/// Rejected board construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

/// A snapshot that cannot be applied to the engine.
///
/// Restore is atomic: when one of these is returned the engine is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    #[error("unknown piece kind {0:?} in snapshot")]
    UnknownPieceKind(String),
    #[error("snapshot grid has {found} rows, board has {expected}")]
    GridHeight { expected: usize, found: usize },
    #[error("snapshot grid row {row} has {found} cells, board has {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("snapshot grid cell ({x}, {y}) holds invalid value {value}")]
    InvalidCell { x: usize, y: usize, value: Cell },
    #[error("snapshot shape for {kind} does not match rotation {rotation}")]
    ShapeMismatch { kind: PieceKind, rotation: usize },
    #[error("snapshot next pieces {next:?} do not match the queue head {queue:?}")]
    NextMismatch { next: [String; 2], queue: Vec<String> },
}
