//! Session module - drives a board the way a game loop does
//!
//! A [`Session`] owns one [`Board`] plus everything the engine leaves to its driver:
//! the gravity timer, the pause flag, lines and level, and the gameplay toggles.
//! It applies the land sequence (lock, clear, award, spawn) whenever a piece cannot
//! move down any further.

use blockfall_core::{Board, ConfigError, GameSnapshot, RestoreError, SessionFields, ShapeMask};

use crate::config::SessionConfig;
use crate::scoring::{calculate_drop_score, calculate_level, tier_drop_interval_ms};
use crate::types::{Cell, GameAction, Toggles, TICK_MS};

/// What happened when a piece landed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockOutcome {
    pub lines_cleared: usize,
    /// Pre-clear row indices, top to bottom
    pub cleared_rows: Vec<usize>,
    pub line_points: u32,
    pub drop_points: u32,
    pub game_over: bool,
}

/// Owned render model, detached from the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<Vec<Cell>>,
    pub active_shape: Option<ShapeMask>,
    pub offset: Option<(i32, i32)>,
    pub next_shapes: [ShapeMask; 2],
    /// None when the ghost toggle is off
    pub ghost_y: Option<i32>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
}

/// A single game session
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    toggles: Toggles,
    lines: u32,
    level: u32,
    paused: bool,
    drop_timer_ms: u32,
    last_outcome: Option<LockOutcome>,
    tick_ms: u32,
}

impl Session {
    /// Create a session; the board stays idle until [`Session::start`]
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let board = Board::with_seed(config.width, config.height, config.seed)?;
        let mut session = Self::with_board(board, config.toggles);
        session.set_tick_ms(config.tick_ms);
        Ok(session)
    }

    /// Wrap an existing board, ticking at the default period
    pub fn with_board(board: Board, toggles: Toggles) -> Self {
        Self {
            board,
            toggles,
            lines: 0,
            level: 0,
            paused: false,
            drop_timer_ms: 0,
            last_outcome: None,
            tick_ms: TICK_MS,
        }
    }

    /// Start a fresh game; returns true if it is over immediately
    pub fn start(&mut self) -> bool {
        self.lines = 0;
        self.level = 0;
        self.paused = false;
        self.drop_timer_ms = 0;
        self.last_outcome = None;
        let over = self.board.new_game();
        if over {
            eprintln!("[Session] game over on first spawn");
        }
        over
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn toggles(&self) -> Toggles {
        self.toggles
    }

    pub fn set_toggles(&mut self, toggles: Toggles) {
        self.toggles = toggles;
    }

    /// Period at which a driver should call [`Session::tick`]
    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    pub fn set_tick_ms(&mut self, tick_ms: u32) {
        self.tick_ms = tick_ms.max(1);
    }

    /// Take and clear the last landing outcome
    pub fn take_last_outcome(&mut self) -> Option<LockOutcome> {
        self.last_outcome.take()
    }

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> u32 {
        tier_drop_interval_ms(self.level, self.toggles.drop_speed)
    }

    fn playable(&self) -> bool {
        !self.paused && !self.board.is_game_over()
    }

    /// Advance the gravity timer; returns true if the board changed
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.playable() || self.board.active().is_none() {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.drop_interval_ms() {
            return false;
        }
        self.drop_timer_ms = 0;

        if !self.board.move_down() {
            self.land(0);
        }
        true
    }

    /// Apply a driver command; returns whether it had an effect
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => {
                if self.board.is_game_over() {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                self.start();
                true
            }
            _ if !self.playable() => false,
            GameAction::MoveLeft => self.board.move_left(),
            GameAction::MoveRight => self.board.move_right(),
            GameAction::Rotate => self.board.rotate(),
            GameAction::SoftDrop if self.toggles.alternate_drop => self.hard_drop().is_some(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop if self.toggles.alternate_drop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop().is_some(),
        }
    }

    /// One row down, scoring the row; lands the piece if it cannot move
    pub fn soft_drop(&mut self) -> bool {
        if self.board.move_down() {
            self.board.add_score(calculate_drop_score(1, false));
            self.drop_timer_ms = 0;
            return true;
        }
        self.land(0).is_some()
    }

    /// Drop to the resting row and land; returns the outcome if a piece landed
    pub fn hard_drop(&mut self) -> Option<LockOutcome> {
        let mut rows = 0u32;
        while self.board.move_down() {
            rows += 1;
        }
        self.land(calculate_drop_score(rows, true))
    }

    /// Lock, clear, award and spawn
    fn land(&mut self, drop_points: u32) -> Option<LockOutcome> {
        if !self.board.lock() {
            return None;
        }

        let cleared = self.board.clear_lines();
        self.board.add_score(cleared.points + drop_points);

        if cleared.count > 0 {
            self.lines += cleared.count as u32;
            self.level = calculate_level(self.lines);
        }

        let game_over = self.board.spawn_next();
        if game_over {
            eprintln!(
                "[Session] game over: score={} lines={} level={}",
                self.board.score(),
                self.lines,
                self.level
            );
        }
        self.drop_timer_ms = 0;

        let outcome = LockOutcome {
            lines_cleared: cleared.count,
            cleared_rows: cleared.cleared_rows,
            line_points: cleared.points,
            drop_points,
            game_over,
        };
        self.last_outcome = Some(outcome.clone());
        Some(outcome)
    }

    /// Session fields carried through snapshots
    pub fn session_fields(&self) -> SessionFields {
        SessionFields {
            lines: self.lines,
            level: self.level,
            toggles: self.toggles,
        }
    }

    /// Snapshot the board together with the session counters
    pub fn save(&mut self) -> GameSnapshot {
        let fields = self.session_fields();
        self.board.snapshot(fields)
    }

    /// Replace the whole session from a snapshot; nothing changes on error
    pub fn resume(&mut self, snapshot: &GameSnapshot) -> Result<(), RestoreError> {
        if let Err(e) = self.board.restore(snapshot) {
            eprintln!("[Session] resume rejected: {}", e);
            return Err(e);
        }
        self.lines = snapshot.session.lines;
        self.level = snapshot.session.level;
        self.toggles = snapshot.toggles();
        self.paused = false;
        self.drop_timer_ms = 0;
        self.last_outcome = None;
        Ok(())
    }

    /// Render model after the latest mutation
    pub fn frame(&mut self) -> Frame {
        let ghost_enabled = self.toggles.ghost_enabled;
        let (score, lines, level, paused) = (self.board.score(), self.lines, self.level, self.paused);
        let game_over = self.board.is_game_over();
        let view = self.board.view();
        Frame {
            rows: view.grid.to_rows(),
            active_shape: view.active_shape,
            offset: view.offset,
            next_shapes: view.next_shapes,
            ghost_y: if ghost_enabled { view.ghost_y } else { None },
            score,
            lines,
            level,
            paused,
            game_over,
        }
    }
}
