use serde::{Deserialize, Serialize};

use crate::active::ActivePiece;
use crate::error::RestoreError;
use crate::grid::ShapeMask;
use crate::pieces::{get_shape, lookup, rotation_count};
use crate::types::{Cell, Toggles};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: String,
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
    pub shape: ShapeMask,
    /// Already merged into the grid, waiting for the next spawn
    #[serde(default)]
    pub locked: bool,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind.as_str().to_string(),
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            shape: value.shape(),
            locked: false,
        }
    }
}

impl ActiveSnapshot {
    /// Rebuild the live piece, checking the identifier and the stored shape
    pub fn resolve(&self) -> Result<ActivePiece, RestoreError> {
        let kind =
            lookup(&self.kind).map_err(|_| RestoreError::UnknownPieceKind(self.kind.clone()))?;
        let rotation = self.rotation % rotation_count(kind);
        if get_shape(kind, rotation) != self.shape {
            return Err(RestoreError::ShapeMismatch {
                kind,
                rotation: self.rotation,
            });
        }
        Ok(ActivePiece {
            kind,
            rotation,
            x: self.x,
            y: self.y,
        })
    }
}

/// Counters and toggles owned by the driver, carried through the snapshot untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SessionFields {
    pub lines: u32,
    pub level: u32,
    pub toggles: Toggles,
}

/// Deep copy of a board at one moment
///
/// Holds no reference back to the engine; restoring builds new live state from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: Vec<Vec<Cell>>,
    pub active: Option<ActiveSnapshot>,
    pub next: [String; 2],
    pub queue: Vec<String>,
    pub score: u32,
    pub session: SessionFields,
}

impl GameSnapshot {
    /// Gameplay toggles saved with the session
    pub fn toggles(&self) -> Toggles {
        self.session.toggles
    }
}
