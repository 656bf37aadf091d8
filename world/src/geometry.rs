//! Fixed local geometry owned by actors and markers.

use glam::Vec2;
use maze_chase_core::Rgb;

/// Angular step between consecutive vertices of the head arc, in degrees.
const ARC_STEP_DEGREES: f32 = 5.0;
const ARC_SEGMENTS: u32 = 36;

/// Single vertex expressed relative to its owner's origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// Offset from the owner's origin in world units.
    pub position: Vec2,
    /// Base colour of the vertex.
    pub color: Rgb,
}

impl Vertex {
    const fn new(x: f32, y: f32, color: Rgb) -> Self {
        Self {
            position: Vec2::new(x, y),
            color,
        }
    }
}

/// Ordered vertex list plus the triangles that cover it.
///
/// Geometry is built once when its owner spawns and never resized.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    vertices: Vec<Vertex>,
    triangles: Vec<[u32; 3]>,
}

impl Geometry {
    /// Builds the explorer silhouette shared by the player and the bot.
    ///
    /// The body is a `width × height` rectangle centred on the origin, topped by
    /// a visor band and a semicircular head whose apex sits at `height`.
    #[must_use]
    pub fn explorer(width: f32, height: f32, body: Rgb, visor: Rgb) -> Self {
        let mut vertices = Vec::with_capacity(9 + ARC_SEGMENTS as usize + 1);
        let mut triangles = Vec::with_capacity(4 + ARC_SEGMENTS as usize);

        for i in [-1.0_f32, 1.0] {
            for j in [-1.0_f32, 1.0] {
                vertices.push(Vertex::new(j * width / 2.0, i * height / 2.0, body));
            }
        }
        triangles.extend([[0, 1, 2], [1, 2, 3]]);

        for i in [-1.0_f32, 1.0] {
            for j in [-1.0_f32, 1.0] {
                vertices.push(Vertex::new(
                    j * width / 3.0,
                    height / 2.0 + i * height / 4.0,
                    visor,
                ));
            }
        }
        triangles.extend([[4, 5, 6], [5, 6, 7]]);

        vertices.push(Vertex::new(0.0, height / 2.0, body));
        for step in 0..=ARC_SEGMENTS {
            let angle = (step as f32 * ARC_STEP_DEGREES).to_radians();
            vertices.push(Vertex::new(
                (width / 2.0) * angle.cos(),
                (height / 2.0) * (1.0 + angle.sin()),
                body,
            ));
        }
        for step in 0..ARC_SEGMENTS {
            triangles.push([8, 9 + step, 10 + step]);
        }

        Self {
            vertices,
            triangles,
        }
    }

    /// Builds a `width × height` quad centred on the origin.
    #[must_use]
    pub fn quad(width: f32, height: f32, color: Rgb) -> Self {
        let half = Vec2::new(width / 2.0, height / 2.0);
        Self {
            vertices: vec![
                Vertex::new(-half.x, -half.y, color),
                Vertex::new(half.x, -half.y, color),
                Vertex::new(-half.x, half.y, color),
                Vertex::new(half.x, half.y, color),
            ],
            triangles: vec![[0, 1, 2], [1, 2, 3]],
        }
    }

    /// Vertices in their original order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Triangles indexing into [`Geometry::vertices`].
    #[must_use]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Axis-aligned bounds of the vertices as `(min, max)` in local space.
    #[must_use]
    pub fn local_bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = self.vertices.first()?.position;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), vertex| {
                    (min.min(vertex.position), max.max(vertex.position))
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    #[test]
    fn explorer_bounds_include_head() {
        let geometry = Geometry::explorer(0.3, 0.3, WHITE, WHITE);
        let (min, max) = geometry.local_bounds().expect("explorer has vertices");

        assert!((min.x + 0.15).abs() < 1e-5);
        assert!((max.x - 0.15).abs() < 1e-5);
        assert!((min.y + 0.15).abs() < 1e-5);
        assert!((max.y - 0.3).abs() < 1e-5);
    }

    #[test]
    fn explorer_triangles_reference_existing_vertices() {
        let geometry = Geometry::explorer(1.0, 1.0, WHITE, WHITE);
        assert_eq!(geometry.vertices().len(), 46);
        assert_eq!(geometry.triangles().len(), 40);
        let count = geometry.vertices().len() as u32;
        assert!(geometry
            .triangles()
            .iter()
            .flatten()
            .all(|index| *index < count));
    }

    #[test]
    fn empty_geometry_has_no_bounds() {
        let geometry = Geometry {
            vertices: Vec::new(),
            triangles: Vec::new(),
        };
        assert!(geometry.local_bounds().is_none());
    }
}
