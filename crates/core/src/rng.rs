//! RNG module - uniform random piece generation
//!
//! Each new piece kind is drawn independently and uniformly from the seven kinds,
//! so repeats and long streaks are possible. The queue always keeps at least
//! [`LOOKAHEAD`] kinds ahead of the caller.
//!
//! Also provides a simple LCG so a seed reproduces the same piece sequence.

use std::collections::VecDeque;

use crate::error::RestoreError;
use crate::pieces::lookup;
use crate::types::{PieceKind, LOOKAHEAD};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of an LCG cycle with a short period.
        (self.next_u32() >> 16) % max
    }
}

/// Upcoming piece kinds
#[derive(Debug, Clone)]
pub struct PieceQueue {
    queue: VecDeque<PieceKind>,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed, pre-filled to the lookahead
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            queue: VecDeque::with_capacity(LOOKAHEAD + 1),
            rng: SimpleRng::new(seed),
        };
        queue.fill_to(LOOKAHEAD);
        queue
    }

    /// Queue seeded with a fixed prefix; random kinds follow once it is consumed
    pub fn from_kinds(kinds: impl IntoIterator<Item = PieceKind>, seed: u32) -> Self {
        let mut queue = Self {
            queue: kinds.into_iter().collect(),
            rng: SimpleRng::new(seed),
        };
        queue.fill_to(LOOKAHEAD);
        queue
    }

    fn random_kind(&mut self) -> PieceKind {
        let i = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[i]
    }

    fn fill_to(&mut self, len: usize) {
        while self.queue.len() < len {
            let kind = self.random_kind();
            self.queue.push_back(kind);
        }
    }

    /// Remove and return the head, leaving at least `LOOKAHEAD` kinds queued
    pub fn dequeue_next(&mut self) -> PieceKind {
        self.fill_to(LOOKAHEAD + 1);
        let kind = self.queue[0];
        self.queue.pop_front();
        kind
    }

    /// First queued kind
    pub fn peek_next(&mut self) -> PieceKind {
        self.fill_to(LOOKAHEAD);
        self.queue[0]
    }

    /// Second queued kind
    pub fn peek_next2(&mut self) -> PieceKind {
        self.fill_to(LOOKAHEAD);
        self.queue[1]
    }

    /// Queue contents as identifiers, head first
    pub fn snapshot_queue(&self) -> Vec<String> {
        self.queue.iter().map(|k| k.as_str().to_string()).collect()
    }

    /// Replace the queue verbatim with `ids`, head first
    ///
    /// Nothing changes if any identifier is unknown.
    pub fn restore_queue<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<(), RestoreError> {
        let kinds = parse_kinds(ids)?;
        self.queue = kinds;
        Ok(())
    }

    /// Replace the queue with already-resolved kinds
    pub fn replace(&mut self, kinds: VecDeque<PieceKind>) {
        self.queue = kinds;
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterate queued kinds, head first
    pub fn iter(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Resolve identifiers into kinds, failing on the first unknown one
pub fn parse_kinds<S: AsRef<str>>(ids: &[S]) -> Result<VecDeque<PieceKind>, RestoreError> {
    ids.iter()
        .map(|id| {
            lookup(id.as_ref())
                .map_err(|_| RestoreError::UnknownPieceKind(id.as_ref().to_string()))
        })
        .collect()
}
