//! Pieces module - the piece catalog
//!
//! Every kind owns a fixed, cyclic list of 4x4 rotation masks. Advancing past the last
//! state wraps to the first, so symmetric kinds simply list fewer states:
//!
//! | Kind | States |
//! |------|--------|
//! | I, S, Z | 2 |
//! | J, L, T | 4 |
//! | O | 1 |
//!
//! Occupied mask cells hold the kind's color id.

use crate::grid::ShapeMask;
use crate::types::{ParsePieceKindError, PieceKind, SPAWN_X, SPAWN_Y};

const I_STATES: [ShapeMask; 2] = [
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
];

const J_STATES: [ShapeMask; 4] = [
    [[2, 0, 0, 0], [2, 2, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 2, 2, 0], [0, 2, 0, 0], [0, 2, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [2, 2, 2, 0], [0, 0, 2, 0], [0, 0, 0, 0]],
    [[0, 2, 0, 0], [0, 2, 0, 0], [2, 2, 0, 0], [0, 0, 0, 0]],
];

const L_STATES: [ShapeMask; 4] = [
    [[0, 0, 3, 0], [3, 3, 3, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 3, 0, 0], [0, 3, 0, 0], [0, 3, 3, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [3, 3, 3, 0], [3, 0, 0, 0], [0, 0, 0, 0]],
    [[3, 3, 0, 0], [0, 3, 0, 0], [0, 3, 0, 0], [0, 0, 0, 0]],
];

// Rows 1-2 so a spawned O rests 19 rows down on a 22-row board.
const O_STATES: [ShapeMask; 1] = [[[0, 0, 0, 0], [0, 4, 4, 0], [0, 4, 4, 0], [0, 0, 0, 0]]];

const S_STATES: [ShapeMask; 2] = [
    [[0, 5, 5, 0], [5, 5, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[5, 0, 0, 0], [5, 5, 0, 0], [0, 5, 0, 0], [0, 0, 0, 0]],
];

const T_STATES: [ShapeMask; 4] = [
    [[0, 6, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 6, 0, 0], [0, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [6, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
    [[0, 6, 0, 0], [6, 6, 0, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
];

const Z_STATES: [ShapeMask; 2] = [
    [[7, 7, 0, 0], [0, 7, 7, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 7, 0], [0, 7, 7, 0], [0, 7, 0, 0], [0, 0, 0, 0]],
];

/// Ordered rotation states of a kind
pub fn rotations(kind: PieceKind) -> &'static [ShapeMask] {
    match kind {
        PieceKind::I => &I_STATES,
        PieceKind::J => &J_STATES,
        PieceKind::L => &L_STATES,
        PieceKind::O => &O_STATES,
        PieceKind::S => &S_STATES,
        PieceKind::T => &T_STATES,
        PieceKind::Z => &Z_STATES,
    }
}

/// Number of distinct rotation states
pub fn rotation_count(kind: PieceKind) -> usize {
    rotations(kind).len()
}

/// Get the mask for a kind and rotation index (taken modulo the state count)
pub fn get_shape(kind: PieceKind, rotation: usize) -> ShapeMask {
    let states = rotations(kind);
    states[rotation % states.len()]
}

/// Initial mask for a new piece at spawn position
pub fn get_spawn_shape(kind: PieceKind) -> ShapeMask {
    get_shape(kind, 0)
}

/// Spawn position for new pieces (x, y)
pub const SPAWN_POSITION: (i32, i32) = (SPAWN_X, SPAWN_Y);

/// Resolve a piece identifier
pub fn lookup(name: &str) -> Result<PieceKind, ParsePieceKindError> {
    name.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::mask_cells;

    #[test]
    fn every_state_has_four_cells_of_its_color() {
        for kind in PieceKind::ALL {
            for mask in rotations(kind) {
                let cells = mask_cells(mask);
                assert_eq!(cells.len(), 4, "{:?}", kind);
                assert!(cells.iter().all(|&(_, _, v)| v == kind.color_id()));
            }
        }
    }

    #[test]
    fn states_within_a_kind_are_distinct() {
        for kind in PieceKind::ALL {
            let states = rotations(kind);
            for i in 0..states.len() {
                for j in (i + 1)..states.len() {
                    assert_ne!(states[i], states[j], "{:?} {} {}", kind, i, j);
                }
            }
        }
    }

    #[test]
    fn rotation_index_wraps() {
        assert_eq!(get_shape(PieceKind::I, 2), get_shape(PieceKind::I, 0));
        assert_eq!(get_shape(PieceKind::T, 5), get_shape(PieceKind::T, 1));
        assert_eq!(get_shape(PieceKind::O, 3), get_spawn_shape(PieceKind::O));
    }
}
