//! Wall-aware gating of continuous actor movement.

use glam::Vec2;
use maze_chase_core::{CellCoord, CellSpan, Direction, MoveError, Straddle};

use crate::{geometry::Geometry, grid::Grid, spatial::GridFrame};

/// Decides whether `geometry` may occupy the `candidate` position.
///
/// The footprint is resolved to a [`CellSpan`] and every wall separating the
/// cells it overlaps is checked. A footprint inside a single cell always
/// passes; one that leaves the grid or spans more than two cells on an axis
/// never does.
pub fn can_move(
    grid: &Grid,
    frame: &GridFrame,
    geometry: &Geometry,
    candidate: Vec2,
    direction: Direction,
) -> Result<CellSpan, MoveError> {
    let span = frame.bounds(geometry, candidate);
    check_span(grid, span).map_err(|error| {
        log::trace!("move {direction:?} to {span:?} rejected: {error}");
        error
    })?;
    Ok(span)
}

/// Checks that no wall separates the cells of `span`.
pub fn check_span(grid: &Grid, span: CellSpan) -> Result<(), MoveError> {
    if !span.is_within(grid.columns(), grid.rows()) {
        return Err(MoveError::OutOfBounds);
    }

    let c0 = span.col_low() as u32;
    let c1 = span.col_high() as u32;
    let r0 = span.row_low() as u32;
    let r1 = span.row_high() as u32;

    match span.straddle() {
        Straddle::Single => Ok(()),
        Straddle::Columns => require_open(grid, CellCoord::new(c0, r0), Direction::East),
        Straddle::Rows => require_open(grid, CellCoord::new(c0, r0), Direction::South),
        Straddle::Both => {
            let north_west = CellCoord::new(c0, r0);
            let north_east = CellCoord::new(c1, r0);
            let south_west = CellCoord::new(c0, r1);
            let south_east = CellCoord::new(c1, r1);
            for (cell, sides) in [
                (north_west, [Direction::South, Direction::East]),
                (north_east, [Direction::South, Direction::West]),
                (south_west, [Direction::North, Direction::East]),
                (south_east, [Direction::North, Direction::West]),
            ] {
                for side in sides {
                    require_open(grid, cell, side)?;
                }
            }
            Ok(())
        }
        Straddle::Wide => Err(MoveError::Oversized),
    }
}

fn require_open(grid: &Grid, cell: CellCoord, side: Direction) -> Result<(), MoveError> {
    if !grid.has_wall(cell, side) {
        return Ok(());
    }
    let to = grid.neighbor(cell, side).unwrap_or(cell);
    Err(MoveError::Wall { from: cell, to })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_cell_spans_always_pass() {
        let grid = Grid::new(2, 2);
        assert_eq!(check_span(&grid, CellSpan::new(1, 1, 0, 0)), Ok(()));
    }

    #[test]
    fn walls_block_column_straddles() {
        let mut grid = Grid::new(1, 2);
        let span = CellSpan::new(0, 1, 0, 0);
        assert_eq!(
            check_span(&grid, span),
            Err(MoveError::Wall {
                from: CellCoord::new(0, 0),
                to: CellCoord::new(1, 0),
            })
        );

        let _ = grid
            .carve(CellCoord::new(0, 0), Direction::East)
            .expect("interior carve");
        assert_eq!(check_span(&grid, span), Ok(()));
    }

    #[test]
    fn walls_block_row_straddles() {
        let mut grid = Grid::new(2, 1);
        let span = CellSpan::new(0, 0, 0, 1);
        assert_eq!(span.straddle(), Straddle::Rows);
        assert_eq!(
            check_span(&grid, span),
            Err(MoveError::Wall {
                from: CellCoord::new(0, 0),
                to: CellCoord::new(0, 1),
            })
        );

        let _ = grid
            .carve(CellCoord::new(0, 0), Direction::South)
            .expect("interior carve");
        assert_eq!(check_span(&grid, span), Ok(()));
    }

    #[test]
    fn corner_straddle_needs_all_four_walls_open() {
        let mut grid = Grid::new(2, 2);
        let span = CellSpan::new(0, 1, 0, 1);
        for (cell, direction) in [
            (CellCoord::new(0, 0), Direction::East),
            (CellCoord::new(0, 0), Direction::South),
            (CellCoord::new(1, 0), Direction::South),
        ] {
            let _ = grid.carve(cell, direction).expect("interior carve");
        }
        assert!(matches!(check_span(&grid, span), Err(MoveError::Wall { .. })));

        let _ = grid
            .carve(CellCoord::new(0, 1), Direction::East)
            .expect("interior carve");
        assert_eq!(check_span(&grid, span), Ok(()));
    }

    #[test]
    fn spans_outside_the_grid_are_rejected() {
        let grid = Grid::new(2, 2);
        assert_eq!(
            check_span(&grid, CellSpan::new(-1, 0, 0, 0)),
            Err(MoveError::OutOfBounds)
        );
        assert_eq!(
            check_span(&grid, CellSpan::new(1, 2, 1, 1)),
            Err(MoveError::OutOfBounds)
        );
    }

    #[test]
    fn wide_spans_are_oversized() {
        let grid = Grid::new(3, 3);
        assert_eq!(
            check_span(&grid, CellSpan::new(0, 2, 0, 0)),
            Err(MoveError::Oversized)
        );
    }
}
