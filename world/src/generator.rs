//! Procedural maze generation: randomized depth-first carving followed by loop injection.

use maze_chase_core::{CellCoord, Direction};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::Grid;

/// Each interior wall survives loop injection unless a draw from `0..LOOP_ODDS` hits zero.
const LOOP_ODDS: u32 = 9;

/// Order in which unvisited neighbours are collected during carving.
const CARVE_ORDER: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
];

/// Generates a `rows × columns` maze from an explicit seed.
#[must_use]
pub fn generate(rows: u32, columns: u32, seed: u64) -> Grid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_with(rows, columns, &mut rng)
}

/// Generates a maze drawing randomness from `rng`.
///
/// The base is a perfect maze; loop injection then reopens a fraction of the
/// remaining interior walls so that most cells are reachable by several routes.
pub fn generate_with<R: Rng + ?Sized>(rows: u32, columns: u32, rng: &mut R) -> Grid {
    let mut grid = carve_perfect(rows, columns, rng);
    let reopened = inject_loops(&mut grid, rng);
    log::debug!(
        "generated {rows}x{columns} maze with {} open edges ({reopened} from loop injection)",
        grid.open_edge_count()
    );
    grid
}

/// Carves a spanning tree over a fully walled grid using randomized depth-first search.
pub fn carve_perfect<R: Rng + ?Sized>(rows: u32, columns: u32, rng: &mut R) -> Grid {
    let mut grid = Grid::new(rows, columns);
    if grid.is_empty() {
        return grid;
    }

    let mut visited = vec![false; grid.len()];
    let start = CellCoord::new(rng.gen_range(0..columns), rng.gen_range(0..rows));
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        if let Some(index) = grid.index(current) {
            visited[index] = true;
        }

        let mut candidates = [Direction::North; 4];
        let mut count = 0;
        for direction in CARVE_ORDER {
            let Some(neighbor) = grid.neighbor(current, direction) else {
                continue;
            };
            let unvisited = grid.index(neighbor).is_some_and(|index| !visited[index]);
            if unvisited {
                candidates[count] = direction;
                count += 1;
            }
        }

        if count == 0 {
            let _ = stack.pop();
            continue;
        }

        let direction = candidates[rng.gen_range(0..count)];
        match grid.carve(current, direction) {
            Ok(next) => {
                if let Some(index) = grid.index(next) {
                    visited[index] = true;
                }
                stack.push(next);
            }
            Err(error) => {
                log::warn!("skipping uncarvable neighbour of {current:?}: {error}");
                let _ = stack.pop();
            }
        }
    }

    grid
}

/// Reopens each interior wall independently with probability `1 / LOOP_ODDS`.
///
/// Every shared wall is considered once, through its cell's south and east side.
/// Returns the number of walls that were removed.
pub fn inject_loops<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> usize {
    let cells: Vec<CellCoord> = grid.coords().collect();
    let mut reopened = 0;
    for cell in cells {
        for direction in [Direction::South, Direction::East] {
            if grid.neighbor(cell, direction).is_none() {
                continue;
            }
            if rng.gen_range(0..LOOP_ODDS) != 0 {
                continue;
            }
            if !grid.has_wall(cell, direction) {
                continue;
            }
            if grid.carve(cell, direction).is_ok() {
                reopened += 1;
            }
        }
    }
    reopened
}
