//! Grid module - the cell matrix and the pure operations over it
//!
//! The grid is `width` columns by `height` rows stored as a flat row-major vector.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! On the conventional 10x22 board rows 0 and 1 are the hidden spawn buffer.
//!
//! [`intersects`], [`merge`] and [`clear_full_rows`] never mutate their inputs.

use std::fmt;

use arrayvec::ArrayVec;

use crate::error::{ConfigError, RestoreError};
use crate::types::{Cell, PieceKind, EMPTY_CELL, LINE_SCORES, MASK_SIZE};

/// One rotation state of a piece, indexed `mask[row][col]`
pub type ShapeMask = [[Cell; MASK_SIZE]; MASK_SIZE];

/// Occupied cells of a mask as `(col, row, value)`
pub type MaskCells = ArrayVec<(i32, i32, Cell), { MASK_SIZE * MASK_SIZE }>;

/// Collect the non-empty cells of a shape mask
pub fn mask_cells(mask: &ShapeMask) -> MaskCells {
    let mut cells = MaskCells::new();
    for (row, line) in mask.iter().enumerate() {
        for (col, &value) in line.iter().enumerate() {
            if value != EMPTY_CELL {
                cells.push((col as i32, row as i32, value));
            }
        }
    }
    cells
}

/// Fixed-size cell matrix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![EMPTY_CELL; width * height],
        })
    }

    /// Build a grid from rows, checking it matches `width` x `height` and holds only
    /// valid cell values
    pub fn from_rows(rows: &[Vec<Cell>], width: usize, height: usize) -> Result<Self, RestoreError> {
        if rows.len() != height {
            return Err(RestoreError::GridHeight {
                expected: height,
                found: rows.len(),
            });
        }
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(RestoreError::RowWidth {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                if value != EMPTY_CELL && PieceKind::from_color_id(value).is_none() {
                    return Err(RestoreError::InvalidCell { x, y, value });
                }
                cells.push(value);
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Cells of row `y`
    ///
    /// Panics if `y` is outside the grid.
    pub fn row(&self, y: usize) -> &[Cell] {
        assert!(y < self.height, "row {} out of range for height {}", y, self.height);
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height && self.row(y).iter().all(|&c| c != EMPTY_CELL)
    }

    /// True when no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == EMPTY_CELL)
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }

    /// Convert to nested rows (snapshot form)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl fmt::Display for Grid {
    /// One line per row; `.` for empty, the piece letter otherwise
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &cell in row {
                match PieceKind::from_color_id(cell) {
                    Some(kind) => f.write_str(kind.as_str())?,
                    None => f.write_str(".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Test whether `shape` placed with its top-left corner at (x, y) collides.
///
/// Cells above the grid (row < 0) never collide, whatever their column. Cells below
/// the floor, outside the side walls, or over an occupied cell do.
pub fn intersects(grid: &Grid, shape: &ShapeMask, x: i32, y: i32) -> bool {
    mask_cells(shape).iter().any(|&(col, row, _)| {
        let tx = x + col;
        let ty = y + row;
        if ty < 0 {
            return false;
        }
        match grid.get(tx, ty) {
            Some(cell) => cell != EMPTY_CELL,
            None => true,
        }
    })
}

/// Return a copy of `grid` with `shape` written at (x, y).
///
/// Cells above the grid are dropped.
///
/// # Panics
///
/// Panics if a cell lands outside the side walls or below the floor. Callers merge
/// only placements that passed [`intersects`].
pub fn merge(grid: &Grid, shape: &ShapeMask, x: i32, y: i32) -> Grid {
    let mut merged = grid.clone();
    for (col, row, value) in mask_cells(shape) {
        let ty = y + row;
        if ty < 0 {
            continue;
        }
        let placed = merged.set(x + col, ty, value);
        assert!(placed, "merge cell ({}, {}) is outside the grid", x + col, ty);
    }
    merged
}

/// Outcome of a line clear
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClearResult {
    /// Rows removed
    pub count: usize,
    /// Grid after the removal, bottom-packed
    pub grid: Grid,
    /// Points from [`line_clear_points`]
    pub points: u32,
    /// Pre-clear indices of the removed rows, top to bottom
    pub cleared_rows: Vec<usize>,
}

/// Points for `count` simultaneously cleared rows
pub fn line_clear_points(count: usize) -> u32 {
    match count {
        1..=4 => LINE_SCORES[count],
        _ => 0,
    }
}

/// Remove every full row, shifting the remaining rows down in their original order.
/// Vacated rows at the top are empty.
pub fn clear_full_rows(grid: &Grid) -> LineClearResult {
    let width = grid.width;
    let cleared_rows: Vec<usize> = (0..grid.height).filter(|&y| grid.is_row_full(y)).collect();

    let mut cleared = grid.clone();
    if !cleared_rows.is_empty() {
        let mut write_y = grid.height;
        // Scan from bottom to top
        for read_y in (0..grid.height).rev() {
            if grid.is_row_full(read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                cleared.cells[write_y * width..(write_y + 1) * width]
                    .copy_from_slice(&grid.cells[src..src + width]);
            }
        }
        cleared.cells[..write_y * width].fill(EMPTY_CELL);
    }

    let count = cleared_rows.len();
    LineClearResult {
        count,
        grid: cleared,
        points: line_clear_points(count),
        cleared_rows,
    }
}
