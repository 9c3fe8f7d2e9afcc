//! Scoring module - drop points, levels and gravity
//!
//! Line-clear points come from the board's [`LineClearResult`]; this module covers the
//! parts a driver adds on top.
//!
//! [`LineClearResult`]: blockfall_core::LineClearResult

use crate::types::{
    DropSpeed, DROP_INTERVALS, DROP_INTERVAL_FLOOR_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL,
    SOFT_DROP_POINTS_PER_ROW,
};

/// Points for rows travelled by a player drop
pub fn calculate_drop_score(rows: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        rows * HARD_DROP_POINTS_PER_ROW
    } else {
        rows * SOFT_DROP_POINTS_PER_ROW
    }
}

/// Level management
/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level (milliseconds per row)
pub fn get_drop_interval_ms(level: u32) -> u32 {
    DROP_INTERVALS
        .get(level as usize)
        .copied()
        .unwrap_or(DROP_INTERVAL_FLOOR_MS)
}

/// Gravity interval for a level under a drop-speed tier
pub fn tier_drop_interval_ms(level: u32, speed: DropSpeed) -> u32 {
    get_drop_interval_ms(level.saturating_add(speed.level_offset()))
}
