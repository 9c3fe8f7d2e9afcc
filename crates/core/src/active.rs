//! Active piece tracker - the falling piece's kind, rotation and offset.

use crate::grid::ShapeMask;
use crate::pieces::{get_shape, rotation_count, SPAWN_POSITION};
use crate::types::PieceKind;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Index into the kind's rotation states, always below the state count
    pub rotation: usize,
    /// Column of the mask's left edge
    pub x: i32,
    /// Row of the mask's top edge, negative only above the board
    pub y: i32,
}

impl ActivePiece {
    /// Create a new piece at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Switch to `kind`, resetting the rotation index to 0
    pub fn assign(&mut self, kind: PieceKind) {
        self.kind = kind;
        self.rotation = 0;
    }

    /// Mask for the current rotation
    pub fn shape(&self) -> ShapeMask {
        get_shape(self.kind, self.rotation)
    }

    /// Next rotation state and its index, without committing
    pub fn peek_next_rotation(&self) -> (ShapeMask, usize) {
        let next = (self.rotation + 1) % rotation_count(self.kind);
        (get_shape(self.kind, next), next)
    }

    /// Set the rotation index (reduced modulo the state count)
    pub fn commit_rotation(&mut self, index: usize) {
        self.rotation = index % rotation_count(self.kind);
    }

    pub fn offset(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn set_offset(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}
