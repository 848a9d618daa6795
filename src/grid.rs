use std::fmt;

use error_chain::bail;
use smallvec::SmallVec;

use crate::coordinates::{Position, ALL_DIRECTIONS};
use crate::errors::*;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

pub type PositionSmallVec = SmallVec<[Position; 4]>;

/// The one capability a maze generator needs from the space it walks: a membership test.
pub trait GridBounds {
    fn contains(&self, pos: Position) -> bool;
}

/// A fixed size rectangle of cells addressed by `Position`. Holds no per cell state.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Grid {
    rows: usize,
    columns: usize,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {}, columns: {}", self.rows, self.columns)
    }
}

impl Grid {
    /// Both dimensions must be positive, and small enough that every cell can be indexed.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {
        let (RowsCount(rows), ColumnsCount(columns)) = (rows, columns);

        let indexable = rows
            .checked_mul(columns)
            .map_or(false, |cells| cells <= isize::MAX as usize);
        if rows == 0 || columns == 0 || !indexable {
            bail!(ErrorKind::InvalidDimensions(rows, columns));
        }

        Ok(Grid { rows, columns })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.rows)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.columns)
    }

    #[inline]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.rows * self.columns)
    }

    /// Number of walls shared by two cells, i.e. the edges of the full grid graph.
    pub fn interior_walls(&self) -> EdgesCount {
        EdgesCount(self.rows * (self.columns - 1) + self.columns * (self.rows - 1))
    }

    /// Row-major index of a position, None when outside the grid.
    #[inline]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.row as usize * self.columns + pos.col as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn position_at(&self, index: usize) -> Option<Position> {
        if index < self.rows * self.columns {
            Some(Position::new((index / self.columns) as isize, (index % self.columns) as isize))
        } else {
            None
        }
    }

    /// Cells one step away from `pos` in canonical direction order, clipped to the grid.
    pub fn neighbours(&self, pos: Position) -> PositionSmallVec {
        ALL_DIRECTIONS
            .iter()
            .map(|dir| pos.offset(*dir))
            .filter(|adjacent| self.contains(*adjacent))
            .collect()
    }

    pub fn iter(&self) -> GridPositionIter {
        GridPositionIter {
            grid: *self,
            current_cell_number: 0,
        }
    }
}

impl GridBounds for Grid {
    #[inline]
    fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 &&
        pos.col >= 0 &&
        (pos.row as usize) < self.rows &&
        (pos.col as usize) < self.columns
    }
}

/// Row-major walk over every position of a grid.
#[derive(Debug, Clone)]
pub struct GridPositionIter {
    grid: Grid,
    current_cell_number: usize,
}

impl Iterator for GridPositionIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.grid.position_at(self.current_cell_number)?;
        self.current_cell_number += 1;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let NodesCount(cells_count) = self.grid.size();
        let remaining = cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for GridPositionIter {} // default impl using size_hint()

impl<'a> IntoIterator for &'a Grid {
    type Item = Position;
    type IntoIter = GridPositionIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
