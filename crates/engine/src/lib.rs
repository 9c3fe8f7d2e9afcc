//! Session driver for the board engine
//!
//! The core crate only knows how to move, lock, clear and spawn. This crate is the
//! collaborator that calls it: gravity timing, player commands, lines and levels,
//! gameplay toggles, JSON save files, and an async loop that serializes ticks and
//! commands onto one session.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Session, SessionConfig};
//! use blockfall_engine::types::GameAction;
//!
//! let mut session = Session::new(SessionConfig::default()).unwrap();
//! session.start();
//!
//! session.apply_action(GameAction::Rotate);
//! session.apply_action(GameAction::HardDrop);
//! assert!(session.score() > 0);
//!
//! let saved = session.save();
//! let mut resumed = Session::new(SessionConfig::default()).unwrap();
//! resumed.resume(&saved).unwrap();
//! assert_eq!(resumed.score(), session.score());
//! ```

pub mod config;
pub mod driver;
pub mod persist;
pub mod scoring;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::SessionConfig;
pub use driver::{run_driver, spawn_driver, DriverCommand, DriverHandle};
pub use persist::PersistError;
pub use session::{Frame, LockOutcome, Session};
