//! Board engine - the authoritative game state
//!
//! Ties together the grid, the piece queue and the active piece tracker. The engine is
//! synchronous and single-writer: a driver calls one operation at a time and reads the
//! result back through [`Board::view`].
//!
//! # States
//!
//! - `Idle`: constructed, no game started yet
//! - `Active`: a piece is falling and controllable
//! - `GameOver`: a freshly spawned piece collided; left only via `new_game` or `restore`
//!
//! # Driver contract
//!
//! On every gravity tick or down command call [`Board::move_down`]. When it returns
//! false, call [`Board::lock`], then [`Board::clear_lines`], award the points, then
//! [`Board::spawn_next`] and check its game-over flag. A hard drop repeats `move_down`
//! until it fails and then follows the same sequence.

use crate::active::ActivePiece;
use crate::error::{ConfigError, RestoreError};
use crate::grid::{clear_full_rows, intersects, merge, Grid, LineClearResult, ShapeMask};
use crate::pieces::get_spawn_shape;
use crate::rng::{parse_kinds, PieceQueue};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, SessionFields};
use crate::types::{PieceKind, MASK_SIZE, SPAWN_Y};

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardState {
    Idle,
    Active,
    GameOver,
}

/// Render-facing read model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView<'a> {
    pub grid: &'a Grid,
    pub active_shape: Option<ShapeMask>,
    pub offset: Option<(i32, i32)>,
    /// Spawn states of the next two queued kinds
    pub next_shapes: [ShapeMask; 2],
    pub ghost_y: Option<i32>,
}

/// The board engine
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    active: Option<ActivePiece>,
    queue: PieceQueue,
    score: u32,
    state: BoardState,
    /// Set by `lock`, cleared by the next spawn. A locked piece is part of the grid.
    locked: bool,
    spawn_x: i32,
}

impl Board {
    /// Create an idle board with a queue seeded from 1
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        Self::with_queue(width, height, PieceQueue::default())
    }

    pub fn with_seed(width: usize, height: usize, seed: u32) -> Result<Self, ConfigError> {
        Self::with_queue(width, height, PieceQueue::new(seed))
    }

    pub fn with_queue(width: usize, height: usize, queue: PieceQueue) -> Result<Self, ConfigError> {
        let grid = Grid::new(width, height)?;
        Ok(Self {
            grid,
            active: None,
            queue,
            score: 0,
            state: BoardState::Idle,
            locked: false,
            spawn_x: (width as i32 - MASK_SIZE as i32) / 2,
        })
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == BoardState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Award points; the score never decreases within a game
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    /// True once the active piece has been merged and before the next spawn
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The piece that can still move, if any
    fn movable(&self) -> Option<ActivePiece> {
        if self.state != BoardState::Active || self.locked {
            return None;
        }
        self.active
    }

    /// Try to shift the active piece by (dx, dy)
    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(mut piece) = self.movable() else {
            return false;
        };

        if intersects(&self.grid, &piece.shape(), piece.x + dx, piece.y + dy) {
            return false;
        }

        piece.set_offset(piece.x + dx, piece.y + dy);
        self.active = Some(piece);
        true
    }

    /// Move down one row; false means the piece has landed
    pub fn move_down(&mut self) -> bool {
        self.try_move(0, 1)
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Advance to the next rotation state in place. No wall kicks: any collision
    /// rejects the rotation.
    pub fn rotate(&mut self) -> bool {
        let Some(mut piece) = self.movable() else {
            return false;
        };

        let (shape, next) = piece.peek_next_rotation();
        if intersects(&self.grid, &shape, piece.x, piece.y) {
            return false;
        }

        piece.commit_rotation(next);
        self.active = Some(piece);
        true
    }

    /// Merge the active piece into the grid at its current offset
    ///
    /// Call only after `move_down` returned false. Returns false if there was no
    /// piece to lock.
    pub fn lock(&mut self) -> bool {
        let Some(piece) = self.movable() else {
            return false;
        };

        self.grid = merge(&self.grid, &piece.shape(), piece.x, piece.y);
        self.locked = true;
        true
    }

    /// Remove full rows from the grid and report what was removed
    pub fn clear_lines(&mut self) -> LineClearResult {
        let result = clear_full_rows(&self.grid);
        self.grid = result.grid.clone();
        result
    }

    /// Spawn the next queued piece; returns true when the game is over
    pub fn spawn_next(&mut self) -> bool {
        if self.state == BoardState::GameOver {
            return true;
        }

        let kind = self.queue.dequeue_next();
        let mut piece = self.active.unwrap_or_else(|| ActivePiece::new(kind));
        piece.assign(kind);
        piece.set_offset(self.spawn_x, SPAWN_Y);

        self.active = Some(piece);
        self.locked = false;

        if intersects(&self.grid, &piece.shape(), piece.x, piece.y) {
            self.state = BoardState::GameOver;
            return true;
        }

        self.state = BoardState::Active;
        false
    }

    /// Row the active piece would rest on if dropped straight down
    pub fn ghost_drop_row(&self) -> Option<i32> {
        let piece = self.movable()?;
        let shape = piece.shape();

        let mut y = piece.y;
        while !intersects(&self.grid, &shape, piece.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Clear the grid and score, then spawn the first piece
    ///
    /// Returns true if even the first piece cannot spawn.
    pub fn new_game(&mut self) -> bool {
        self.grid.clear();
        self.score = 0;
        self.active = None;
        self.locked = false;
        self.state = BoardState::Idle;
        self.spawn_next()
    }

    /// Next two queued kinds, generating more if the queue runs short
    pub fn next_kinds(&mut self) -> [PieceKind; 2] {
        [self.queue.peek_next(), self.queue.peek_next2()]
    }

    /// Deep copy of the live state plus the driver's session fields
    ///
    /// Tops up the queue's lookahead first.
    pub fn snapshot(&mut self, session: SessionFields) -> GameSnapshot {
        let [next1, next2] = self.next_kinds();
        GameSnapshot {
            grid: self.grid.to_rows(),
            active: self.active.map(|piece| ActiveSnapshot {
                locked: self.locked,
                ..ActiveSnapshot::from(piece)
            }),
            next: [next1.as_str().to_string(), next2.as_str().to_string()],
            queue: self.queue.snapshot_queue(),
            score: self.score,
            session,
        }
    }

    /// Replace the live state with a snapshot
    ///
    /// Everything is validated before anything is replaced; on error the engine is
    /// unchanged. The snapshot's `next` pair must name the head of its queue.
    pub fn restore(&mut self, snapshot: &GameSnapshot) -> Result<(), RestoreError> {
        let grid = Grid::from_rows(&snapshot.grid, self.grid.width(), self.grid.height())?;
        let active = snapshot
            .active
            .as_ref()
            .map(ActiveSnapshot::resolve)
            .transpose()?;
        let locked = snapshot.active.as_ref().is_some_and(|a| a.locked);
        let queue = parse_kinds(&snapshot.queue)?;
        let next = parse_kinds(&snapshot.next)?;
        if !queue.iter().take(2).eq(next.iter()) {
            return Err(RestoreError::NextMismatch {
                next: snapshot.next.clone(),
                queue: snapshot.queue.iter().take(2).cloned().collect(),
            });
        }

        self.grid = grid;
        self.active = active;
        self.queue.replace(queue);
        self.score = 0;
        self.add_score(snapshot.score);
        self.locked = locked;
        // A locked piece is already part of the grid; only a live one can collide.
        self.state = match active {
            None => BoardState::Idle,
            Some(_) if locked => BoardState::Active,
            Some(p) if intersects(&self.grid, &p.shape(), p.x, p.y) => BoardState::GameOver,
            Some(_) => BoardState::Active,
        };
        Ok(())
    }

    /// Everything a renderer needs after a mutation
    pub fn view(&mut self) -> BoardView<'_> {
        let [next1, next2] = self.next_kinds();
        let ghost_y = self.ghost_drop_row();
        BoardView {
            grid: &self.grid,
            active_shape: self.active.map(|p| p.shape()),
            offset: self.active.map(|p| p.offset()),
            next_shapes: [get_spawn_shape(next1), get_spawn_shape(next2)],
            ghost_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    fn board_with(kinds: &[PieceKind]) -> Board {
        let queue = PieceQueue::from_kinds(kinds.iter().copied(), 7);
        Board::with_queue(BOARD_WIDTH, BOARD_HEIGHT, queue).unwrap()
    }

    #[test]
    fn test_new_board_is_idle() {
        let mut board = Board::new(10, 22).unwrap();
        assert_eq!(board.state(), BoardState::Idle);
        assert!(board.active().is_none());
        assert!(!board.move_down());
        assert!(!board.rotate());
        assert!(!board.lock());
        assert_eq!(board.ghost_drop_row(), None);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Board::new(0, 22).unwrap_err(),
            ConfigError::InvalidDimensions {
                width: 0,
                height: 22
            }
        );
    }

    #[test]
    fn test_spawn_position_centered() {
        let mut board = board_with(&[PieceKind::T]);
        assert!(!board.new_game());
        assert_eq!(board.active().unwrap().offset(), (3, 0));

        let mut wide = Board::with_queue(12, 22, PieceQueue::from_kinds([PieceKind::T], 1)).unwrap();
        wide.new_game();
        assert_eq!(wide.active().unwrap().x, 4);
    }

    #[test]
    fn test_lock_freezes_piece_until_spawn() {
        let mut board = board_with(&[PieceKind::O, PieceKind::I]);
        board.new_game();
        while board.move_down() {}
        assert!(board.lock());
        assert!(board.is_locked());

        let before = board.active();
        assert!(!board.move_left());
        assert!(!board.rotate());
        assert!(!board.lock());
        assert_eq!(board.active(), before);

        assert!(!board.spawn_next());
        assert!(!board.is_locked());
        assert_eq!(board.active().unwrap().kind, PieceKind::I);
    }

    #[test]
    fn test_spawn_into_blocked_grid_is_game_over() {
        let mut board = board_with(&[PieceKind::O, PieceKind::O]);
        board.new_game();
        // Nothing moves sideways, so the spawn columns fill up and no row completes.
        let mut over = false;
        for _ in 0..100 {
            while board.move_down() {}
            board.lock();
            board.clear_lines();
            if board.spawn_next() {
                over = true;
                break;
            }
        }
        assert!(over);
        assert!(board.is_game_over());
        assert!(board.spawn_next());
        assert!(!board.move_down());
        assert_eq!(board.ghost_drop_row(), None);
    }

    #[test]
    fn test_new_game_resets() {
        let mut board = board_with(&[PieceKind::I]);
        board.new_game();
        while board.move_down() {}
        board.lock();
        board.add_score(300);

        assert!(!board.new_game());
        assert_eq!(board.score(), 0);
        assert!(board.grid().is_empty());
        assert_eq!(board.state(), BoardState::Active);
    }

    #[test]
    fn test_view_reports_next_shapes() {
        let mut board = board_with(&[PieceKind::T, PieceKind::I, PieceKind::Z]);
        board.new_game();
        let view = board.view();
        assert_eq!(view.next_shapes[0], get_spawn_shape(PieceKind::I));
        assert_eq!(view.next_shapes[1], get_spawn_shape(PieceKind::Z));
        assert_eq!(view.offset, Some((3, 0)));
        // T spawn occupies mask rows 0-1, so it rests with its top on row 20.
        assert_eq!(view.ghost_y, Some(20));
    }
}
