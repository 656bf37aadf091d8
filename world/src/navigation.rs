//! Breadth-first distance fields over the open edges of the maze.

use std::collections::VecDeque;

use maze_chase_core::{CellCoord, CellSpan, UNREACHED};

use crate::grid::Grid;

/// Dense path-distance grid seeded from a set of source cells.
///
/// The field mirrors the grid's dimensions and stores, for every cell, the
/// number of open edges on the shortest path to the nearest source. Cells the
/// search never reached keep [`UNREACHED`] so callers can tell them apart from
/// genuine distances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistanceField {
    rows: u32,
    columns: u32,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Computes distances from every in-grid cell of `span`.
    ///
    /// Source cells outside the grid are skipped. Traversal only follows open
    /// sides, visiting neighbours in north, south, east, west order; the first
    /// visit of a cell fixes its distance.
    #[must_use]
    pub fn from_span(grid: &Grid, span: CellSpan) -> Self {
        debug_assert!(
            span.cells().any(|cell| grid.contains(cell)),
            "distance field source {span:?} lies outside the grid"
        );

        let mut field = Self {
            rows: grid.rows(),
            columns: grid.columns(),
            distances: vec![UNREACHED; grid.len()],
        };

        let mut queue = VecDeque::new();
        for source in span.cells() {
            let Some(index) = grid.index(source) else {
                continue;
            };
            if field.distances[index] == 0 {
                continue;
            }
            field.distances[index] = 0;
            queue.push_back(source);
        }

        while let Some(cell) = queue.pop_front() {
            let Some(current_index) = grid.index(cell) else {
                continue;
            };
            let next_distance = field.distances[current_index].saturating_add(1);

            for (_, neighbor) in grid.open_neighbors(cell) {
                let Some(neighbor_index) = grid.index(neighbor) else {
                    continue;
                };
                if field.distances[neighbor_index] != UNREACHED {
                    continue;
                }
                field.distances[neighbor_index] = next_distance;
                queue.push_back(neighbor);
            }
        }

        log::trace!(
            "distance field from {span:?} reached {} of {} cells",
            field.distances.iter().filter(|d| **d != UNREACHED).count(),
            field.distances.len()
        );
        field
    }

    /// Number of rows covered by the field.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns covered by the field.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Dense distances stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.distances
    }

    /// Distance recorded for `cell`, if it lies within the field.
    #[must_use]
    pub fn distance(&self, cell: CellCoord) -> Option<u32> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        let offset = row.checked_mul(width)?.checked_add(column)?;
        self.distances.get(offset).copied()
    }

    /// Smallest reached distance among the in-grid cells of `span`.
    #[must_use]
    pub fn min_over(&self, span: CellSpan) -> Option<u32> {
        span.cells()
            .filter_map(|cell| self.distance(cell))
            .filter(|distance| *distance != UNREACHED)
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::Direction;

    fn open_grid(rows: u32, columns: u32) -> Grid {
        let mut grid = Grid::new(rows, columns);
        let cells: Vec<_> = grid.coords().collect();
        for cell in cells {
            for direction in [Direction::South, Direction::East] {
                let _ = grid.carve(cell, direction);
            }
        }
        grid
    }

    #[test]
    fn source_cell_is_zero() {
        let grid = open_grid(3, 4);
        let field = DistanceField::from_span(&grid, CellSpan::single(CellCoord::new(1, 2)));

        assert_eq!(field.distance(CellCoord::new(1, 2)), Some(0));
        assert_eq!(field.distance(CellCoord::new(1, 1)), Some(1));
        assert_eq!(field.distance(CellCoord::new(1, 0)), Some(2));
        assert_eq!(field.distance(CellCoord::new(0, 0)), Some(3));
    }

    #[test]
    fn open_grid_distances_are_manhattan() {
        let grid = open_grid(5, 5);
        let origin = CellCoord::new(0, 0);
        let field = DistanceField::from_span(&grid, CellSpan::single(origin));

        for cell in grid.coords() {
            assert_eq!(field.distance(cell), Some(origin.manhattan_distance(cell)));
        }
    }

    #[test]
    fn walls_block_traversal() {
        let mut grid = Grid::new(1, 3);
        let _ = grid
            .carve(CellCoord::new(0, 0), Direction::East)
            .expect("interior carve");
        let field = DistanceField::from_span(&grid, CellSpan::single(CellCoord::new(0, 0)));

        assert_eq!(field.distance(CellCoord::new(1, 0)), Some(1));
        assert_eq!(field.distance(CellCoord::new(2, 0)), Some(UNREACHED));
        assert_eq!(field.distance(CellCoord::new(3, 0)), None);
    }

    #[test]
    fn straddling_sources_all_start_at_zero() {
        let grid = open_grid(1, 4);
        let field = DistanceField::from_span(&grid, CellSpan::new(1, 2, 0, 0));

        assert_eq!(field.cells(), &[1, 0, 0, 1]);
        assert_eq!(field.min_over(CellSpan::new(2, 3, 0, 0)), Some(0));
        assert_eq!(field.min_over(CellSpan::new(3, 4, 0, 0)), Some(1));
    }

    #[test]
    fn corner_sources_seed_four_cells() {
        let grid = open_grid(4, 4);
        let field = DistanceField::from_span(&grid, CellSpan::new(1, 2, 1, 2));

        for cell in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            assert_eq!(field.distance(CellCoord::new(cell.0, cell.1)), Some(0));
        }
        assert_eq!(field.distance(CellCoord::new(0, 0)), Some(2));
        assert_eq!(field.distance(CellCoord::new(3, 1)), Some(1));
        assert_eq!(field.distance(CellCoord::new(3, 3)), Some(2));
        assert_eq!(field.min_over(CellSpan::new(0, 1, 0, 0)), Some(1));
    }
}
