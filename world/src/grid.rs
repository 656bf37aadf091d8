//! Wall and path topology of the maze.

use maze_chase_core::{CellCoord, Direction};
use thiserror::Error;

/// Wall flags for the four sides of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    north: bool,
    south: bool,
    east: bool,
    west: bool,
}

impl Cell {
    const fn walled() -> Self {
        Self {
            north: true,
            south: true,
            east: true,
            west: true,
        }
    }

    /// Reports whether a wall closes the side facing `direction`.
    #[must_use]
    pub const fn has_wall(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    /// Reports whether a path leads out of the side facing `direction`.
    #[must_use]
    pub const fn is_open(&self, direction: Direction) -> bool {
        !self.has_wall(direction)
    }

    fn open(&mut self, direction: Direction) {
        match direction {
            Direction::North => self.north = false,
            Direction::South => self.south = false,
            Direction::East => self.east = false,
            Direction::West => self.west = false,
        }
    }
}

/// Reasons a carve request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CarveError {
    /// The starting cell does not belong to the grid.
    #[error("cell {cell:?} lies outside the grid")]
    OutsideGrid {
        /// Cell that was requested.
        cell: CellCoord,
    },
    /// The carve would open a path through the grid's border.
    #[error("cannot carve {direction:?} from border cell {cell:?}")]
    OutOfBounds {
        /// Cell the carve started from.
        cell: CellCoord,
        /// Direction that leaves the grid.
        direction: Direction,
    },
}

/// Fixed-size grid of cells whose shared walls always agree on both sides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a `rows × columns` grid with every wall standing.
    #[must_use]
    pub fn new(rows: u32, columns: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            rows,
            columns,
            cells: vec![Cell::walled(); capacity],
        }
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the grid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether `cell` belongs to the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Wall flags of `cell`, if it belongs to the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<&Cell> {
        self.index(cell).and_then(|index| self.cells.get(index))
    }

    /// Reports whether a wall closes `direction` on `cell`.
    ///
    /// Cells outside the grid behave as if fully walled.
    #[must_use]
    pub fn has_wall(&self, cell: CellCoord, direction: Direction) -> bool {
        self.cell(cell).map_or(true, |flags| flags.has_wall(direction))
    }

    /// Neighbouring cell in `direction`, if it belongs to the grid.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        cell.step(direction, self.columns, self.rows)
    }

    /// Neighbours reachable through an open side, in north, south, east, west order.
    pub fn open_neighbors(
        &self,
        cell: CellCoord,
    ) -> impl Iterator<Item = (Direction, CellCoord)> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            if self.has_wall(cell, direction) {
                return None;
            }
            self.neighbor(cell, direction)
                .map(|neighbor| (direction, neighbor))
        })
    }

    /// Opens a path from `cell` toward `direction`, updating both sides of the wall.
    ///
    /// Returns the neighbour that the new path leads to.
    pub fn carve(&mut self, cell: CellCoord, direction: Direction) -> Result<CellCoord, CarveError> {
        let from = self.index(cell).ok_or(CarveError::OutsideGrid { cell })?;
        let neighbor = self
            .neighbor(cell, direction)
            .ok_or(CarveError::OutOfBounds { cell, direction })?;
        let to = self
            .index(neighbor)
            .ok_or(CarveError::OutOfBounds { cell, direction })?;

        self.cells[from].open(direction);
        self.cells[to].open(direction.opposite());
        Ok(neighbor)
    }

    /// Number of open interior edges, counting each shared wall once.
    #[must_use]
    pub fn open_edge_count(&self) -> usize {
        self.coords()
            .map(|cell| {
                [Direction::South, Direction::East]
                    .into_iter()
                    .filter(|direction| {
                        !self.has_wall(cell, *direction)
                            && self.neighbor(cell, *direction).is_some()
                    })
                    .count()
            })
            .sum()
    }

    /// Reports whether every shared wall agrees on both of its sides.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.coords().all(|cell| {
            [Direction::South, Direction::East].into_iter().all(|direction| {
                match self.neighbor(cell, direction) {
                    Some(neighbor) => {
                        self.has_wall(cell, direction)
                            == self.has_wall(neighbor, direction.opposite())
                    }
                    None => true,
                }
            })
        })
    }

    /// Iterates every cell coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
    }

    pub(crate) fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}
