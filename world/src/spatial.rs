//! Conversion between continuous world positions and maze cell indices.

use glam::Vec2;
use maze_chase_core::{CellCoord, CellSpan};

use crate::geometry::Geometry;

/// Placement of the maze in world space.
///
/// World `y` grows upward while rows grow downward, so row zero sits along the
/// top edge of the maze at `origin.y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridFrame {
    cell_width: f32,
    cell_height: f32,
    origin: Vec2,
}

impl GridFrame {
    /// Creates a frame whose top-left maze corner sits at `origin`.
    #[must_use]
    pub const fn new(cell_width: f32, cell_height: f32, origin: Vec2) -> Self {
        Self {
            cell_width,
            cell_height,
            origin,
        }
    }

    /// Creates a frame with the maze centred on the world origin.
    #[must_use]
    pub fn centered(rows: u32, columns: u32, cell_width: f32, cell_height: f32) -> Self {
        let origin = Vec2::new(
            -cell_width * columns as f32 / 2.0,
            cell_height * rows as f32 / 2.0,
        );
        Self::new(cell_width, cell_height, origin)
    }

    /// Width of a single cell in world units.
    #[must_use]
    pub const fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Height of a single cell in world units.
    #[must_use]
    pub const fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// World position of the maze's top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// World position of the centre of `cell`.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            self.origin.x + self.cell_width * (cell.column() as f32 + 0.5),
            self.origin.y - self.cell_height * (cell.row() as f32 + 0.5),
        )
    }

    /// World position of the top-left corner of `cell`.
    #[must_use]
    pub fn cell_corner(&self, column: u32, row: u32) -> Vec2 {
        Vec2::new(
            self.origin.x + self.cell_width * column as f32,
            self.origin.y - self.cell_height * row as f32,
        )
    }

    /// Column containing the world coordinate `x`, unclamped.
    #[must_use]
    pub fn column_at(&self, x: f32) -> i32 {
        ((x - self.origin.x) / self.cell_width).floor() as i32
    }

    /// Row containing the world coordinate `y`, unclamped.
    #[must_use]
    pub fn row_at(&self, y: f32) -> i32 {
        ((self.origin.y - y) / self.cell_height).floor() as i32
    }

    /// Resolves the cells overlapped by `geometry` placed at `position`.
    ///
    /// The result is not clamped: indices of `-1` or equal to the grid
    /// dimension signal that the box reaches outside the maze.
    #[must_use]
    pub fn bounds(&self, geometry: &Geometry, position: Vec2) -> CellSpan {
        let (min, max) = geometry
            .local_bounds()
            .unwrap_or((Vec2::ZERO, Vec2::ZERO));
        self.box_bounds(position + min, position + max)
    }

    /// Resolves the cells overlapped by the world-space box `min..=max`.
    #[must_use]
    pub fn box_bounds(&self, min: Vec2, max: Vec2) -> CellSpan {
        CellSpan::new(
            self.column_at(min.x),
            self.column_at(max.x),
            self.row_at(max.y),
            self.row_at(min.y),
        )
    }
}
