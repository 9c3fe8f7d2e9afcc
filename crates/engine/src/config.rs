//! Session configuration.

use std::env;

use crate::types::{DropSpeed, Toggles, BOARD_HEIGHT, BOARD_WIDTH, TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    pub toggles: Toggles,
    /// Fixed period of the async driver's tick
    pub tick_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: 1,
            toggles: Toggles::default(),
            tick_ms: TICK_MS,
        }
    }
}

impl SessionConfig {
    /// Create from `BLOCKFALL_*` environment variables, defaulting anything unset or
    /// unparsable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`SessionConfig::from_env`] over an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let width = lookup("BLOCKFALL_WIDTH")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.width);
        let height = lookup("BLOCKFALL_HEIGHT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.height);
        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);
        let tick_ms = lookup("BLOCKFALL_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(defaults.tick_ms);

        let drop_speed = lookup("BLOCKFALL_DROP_SPEED")
            .and_then(|s| DropSpeed::parse(&s))
            .unwrap_or(defaults.toggles.drop_speed);
        let ghost_enabled = lookup("BLOCKFALL_GHOST")
            .and_then(|s| parse_flag(&s))
            .unwrap_or(defaults.toggles.ghost_enabled);
        let alternate_drop = lookup("BLOCKFALL_ALT_DROP")
            .and_then(|s| parse_flag(&s))
            .unwrap_or(defaults.toggles.alternate_drop);

        Self {
            width,
            height,
            seed,
            toggles: Toggles {
                drop_speed,
                ghost_enabled,
                alternate_drop,
            },
            tick_ms,
        }
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}
