#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Chase adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_chase_core::{Direction, MarkerKind, Outcome, Paint, Rgb};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Scales the RGB channels by `intensity`, leaving alpha untouched.
    #[must_use]
    pub fn scaled(self, intensity: f32) -> Self {
        let intensity = intensity.clamp(0.0, 1.0);
        Self {
            red: self.red * intensity,
            green: self.green * intensity,
            blue: self.blue * intensity,
            alpha: self.alpha,
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::new(rgb.red, rgb.green, rgb.blue, 1.0)
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Movement directions held down during the frame.
    pub moves: Vec<Direction>,
    /// Requested lights state, if a lights key was pressed this frame.
    pub lights: Option<bool>,
}

/// Vertex of a mesh expressed relative to its owner's origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshVertex {
    /// Offset from the owner's origin in world units.
    pub position: Vec2,
    /// Base color before paint is applied.
    pub color: Color,
}

/// Triangle mesh drawn at an element's position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertices in drawing order.
    pub vertices: Vec<MeshVertex>,
    /// Triangles indexing into [`Mesh::vertices`].
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a mesh from its vertices and triangles.
    #[must_use]
    pub fn new(vertices: Vec<MeshVertex>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// World-space corners of every triangle placed at `origin`.
    ///
    /// Triangles referring to missing vertices are skipped.
    pub fn world_triangles(
        &self,
        origin: Vec2,
    ) -> impl Iterator<Item = [(Vec2, Color); 3]> + '_ {
        self.triangles.iter().filter_map(move |triangle| {
            let corner = |index: u32| {
                let vertex = self.vertices.get(usize::try_from(index).ok()?)?;
                Some((origin + vertex.position, vertex.color))
            };
            Some([
                corner(triangle[0])?,
                corner(triangle[1])?,
                corner(triangle[2])?,
            ])
        })
    }
}

/// Actor or marker placed in the scene together with its paint.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementPresentation {
    /// World position of the element's origin.
    pub position: Vec2,
    /// Geometry drawn at the position.
    pub mesh: Mesh,
    /// Visual state chosen by the simulation.
    pub paint: Paint,
}

impl ElementPresentation {
    /// Creates a new element descriptor.
    #[must_use]
    pub fn new(position: Vec2, mesh: Mesh, paint: Paint) -> Self {
        Self {
            position,
            mesh,
            paint,
        }
    }

    /// Resolves a base color through the element's paint.
    ///
    /// Returns `None` for dead elements, which must not be drawn.
    #[must_use]
    pub fn resolve(&self, base: Color, gradient_factor: f32) -> Option<Color> {
        match self.paint {
            Paint::Dead => None,
            paint => Some(base.scaled(paint.intensity(gradient_factor))),
        }
    }
}

/// Stationary marker drawn in the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerPresentation {
    /// Role of the marker.
    pub kind: MarkerKind,
    /// Drawable state of the marker.
    pub element: ElementPresentation,
}

/// Wall lines of the maze.
#[derive(Clone, Debug, PartialEq)]
pub struct MazePresentation {
    /// Wall segments in world coordinates.
    pub segments: Vec<(Vec2, Vec2)>,
    /// Line thickness measured in world units.
    pub thickness: f32,
    /// Color of the wall lines.
    pub color: Color,
}

impl MazePresentation {
    /// Creates a new maze descriptor, rejecting non-positive line thickness.
    pub fn new(
        segments: Vec<(Vec2, Vec2)>,
        thickness: f32,
        color: Color,
    ) -> std::result::Result<Self, RenderingError> {
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(RenderingError::InvalidLineThickness { thickness });
        }
        Ok(Self {
            segments,
            thickness,
            color,
        })
    }
}

/// Values shown on the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct HudPresentation {
    /// Current score.
    pub score: i32,
    /// Whether the maze lights are on.
    pub lights_on: bool,
    /// Objectives completed so far.
    pub tasks_done: u32,
    /// Objectives in the session.
    pub tasks_total: u32,
    /// Whole seconds left on the countdown.
    pub seconds_left: u64,
}

impl HudPresentation {
    /// Text lines in the order they are drawn.
    #[must_use]
    pub fn lines(&self) -> [String; 4] {
        [
            format!("Score: {}", self.score),
            format!("Lights: {}", if self.lights_on { "On" } else { "Off" }),
            format!("Tasks: {}/{}", self.tasks_done, self.tasks_total),
            format!("Time: {}", self.seconds_left),
        ]
    }
}

/// Summary shown once the session has ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOverPresentation {
    /// How the session ended.
    pub outcome: Outcome,
    /// Final score.
    pub score: i32,
}

impl GameOverPresentation {
    /// Headline describing the outcome.
    #[must_use]
    pub fn headline(&self) -> &'static str {
        match self.outcome {
            Outcome::Win => "You escaped!",
            Outcome::Lose => "Caught by the bot",
            Outcome::Timeout => "Out of time",
        }
    }
}

/// Scene description combining the maze, actors and markers.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Wall lines of the maze.
    pub maze: MazePresentation,
    /// Player avatar.
    pub player: ElementPresentation,
    /// Pursuing bot.
    pub bot: ElementPresentation,
    /// Stationary markers.
    pub markers: Vec<MarkerPresentation>,
    /// Ephemeral spawns; collected spawns leave an empty slot.
    pub spawns: Vec<Option<ElementPresentation>>,
    /// Heads-up display values.
    pub hud: HudPresentation,
    /// Present once the session has ended.
    pub game_over: Option<GameOverPresentation>,
    /// World position the view is centred on.
    pub camera: Vec2,
    /// Intensity lost per hop of distance for graded paints.
    pub gradient_factor: f32,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        maze: MazePresentation,
        player: ElementPresentation,
        bot: ElementPresentation,
        markers: Vec<MarkerPresentation>,
        spawns: Vec<Option<ElementPresentation>>,
        hud: HudPresentation,
        camera: Vec2,
        gradient_factor: f32,
    ) -> Self {
        Self {
            maze,
            player,
            bot,
            markers,
            spawns,
            hud,
            game_over: None,
            camera,
            gradient_factor,
        }
    }

    /// Elements drawn this frame in back-to-front order, skipping dead ones.
    pub fn visible_elements(&self) -> impl Iterator<Item = &ElementPresentation> {
        self.markers
            .iter()
            .map(|marker| &marker.element)
            .chain(self.spawns.iter().flatten())
            .chain([&self.bot, &self.player])
            .filter(|element| element.paint != Paint::Dead)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
    /// Height of the visible world region in world units.
    pub view_height: f32,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene, view_height: f32) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
            view_height,
        }
    }
}

/// Rendering backend capable of presenting Maze Chase scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderingError {
    /// Wall lines must have a positive, finite thickness.
    InvalidLineThickness {
        /// Provided thickness that failed validation.
        thickness: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLineThickness { thickness } => {
                write!(
                    f,
                    "wall thickness must be positive (received {thickness})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(color: Color) -> Mesh {
        let vertex = |x: f32, y: f32| MeshVertex {
            position: Vec2::new(x, y),
            color,
        };
        Mesh::new(
            vec![
                vertex(-0.5, -0.5),
                vertex(0.5, -0.5),
                vertex(-0.5, 0.5),
                vertex(0.5, 0.5),
            ],
            vec![[0, 1, 2], [1, 2, 3]],
        )
    }

    fn element(paint: Paint) -> ElementPresentation {
        ElementPresentation::new(Vec2::ZERO, quad(Color::from_rgb_u8(255, 255, 255)), paint)
    }

    #[test]
    fn maze_creation_rejects_non_positive_thickness() {
        let error = MazePresentation::new(Vec::new(), 0.0, Color::from_rgb_u8(0, 0, 0))
            .expect_err("zero thickness must be rejected");
        assert!(matches!(
            error,
            RenderingError::InvalidLineThickness { thickness } if thickness == 0.0
        ));
    }

    #[test]
    fn graded_paint_dims_base_color() {
        let white = Color::from_rgb_u8(255, 255, 255);
        let resolved = element(Paint::Graded(5))
            .resolve(white, 0.1)
            .expect("graded elements are drawn");
        assert!((resolved.red - 0.5).abs() < 1e-6);
        assert_eq!(resolved.alpha, 1.0);

        assert_eq!(element(Paint::FullBright).resolve(white, 0.1), Some(white));
        assert_eq!(element(Paint::Dead).resolve(white, 0.1), None);
    }

    #[test]
    fn world_triangles_offset_by_origin() {
        let mesh = quad(Color::from_rgb_u8(10, 20, 30));
        let triangles: Vec<_> = mesh.world_triangles(Vec2::new(2.0, 1.0)).collect();
        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[0][0].0, Vec2::new(1.5, 0.5));
    }

    #[test]
    fn visible_elements_skip_dead_and_empty_slots() {
        let maze = MazePresentation::new(Vec::new(), 0.05, Color::from_rgb_u8(255, 255, 255))
            .expect("positive thickness");
        let scene = Scene::new(
            maze,
            element(Paint::FullBright),
            element(Paint::Dead),
            vec![MarkerPresentation {
                kind: MarkerKind::Goal,
                element: element(Paint::Graded(2)),
            }],
            vec![None, Some(element(Paint::FullBright))],
            HudPresentation::default(),
            Vec2::ZERO,
            0.1,
        );

        assert_eq!(scene.visible_elements().count(), 3);
        assert!(scene.game_over.is_none());
    }

    #[test]
    fn hud_lines_follow_display_order() {
        let hud = HudPresentation {
            score: 12,
            lights_on: false,
            tasks_done: 1,
            tasks_total: 2,
            seconds_left: 90,
        };
        assert_eq!(
            hud.lines(),
            [
                "Score: 12".to_owned(),
                "Lights: Off".to_owned(),
                "Tasks: 1/2".to_owned(),
                "Time: 90".to_owned(),
            ]
        );
    }
}
