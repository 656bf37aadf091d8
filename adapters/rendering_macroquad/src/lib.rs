#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Chase.
//!
//! The game is silent, so macroquad is built without its default `audio`
//! feature and the adapter only uses windowing, shapes and text.

use anyhow::Result;
use glam::Vec2;
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use macroquad::math::Vec2 as MacroquadVec2;
use maze_chase_core::Direction;
use maze_chase_rendering::{
    Color, ElementPresentation, FrameInput, GameOverPresentation, HudPresentation,
    MazePresentation, Presentation, RenderingBackend, Scene,
};
use std::time::Duration;

const HUD_FONT_SIZE: f32 = 32.0;
const HUD_LINE_SPACING: f32 = 40.0;
const HUD_MARGIN: f32 = 10.0;
const GAME_OVER_FONT_SIZE: f32 = 56.0;
/// Initial width and height of the square window in pixels.
const WINDOW_SIZE: i32 = 960;

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Escape` quits the game loop.
    quit_requested: bool,
    /// `L` switches the lights on.
    lights_on: bool,
    /// `K` switches the lights off.
    lights_off: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape),
            lights_on: is_key_pressed(KeyCode::L),
            lights_off: is_key_pressed(KeyCode::K),
        }
    }
}

/// Movement keys held down during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct HeldMovement {
    north: bool,
    south: bool,
    east: bool,
    west: bool,
}

impl HeldMovement {
    fn poll() -> Self {
        Self {
            north: is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
            south: is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
            east: is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
            west: is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = Some(i32::from(enabled));
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self { swap_interval } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
            view_height,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: WINDOW_SIZE,
            window_height: WINDOW_SIZE,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = gather_frame_input(HeldMovement::poll(), keyboard);

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = ViewMetrics::new(
                    scene.camera,
                    view_height,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );

                draw_maze(&scene.maze, &metrics);
                for element in scene.visible_elements() {
                    draw_element(element, scene.gradient_factor, &metrics);
                }
                draw_hud(&scene.hud);
                if let Some(game_over) = scene.game_over {
                    draw_game_over(game_over, &metrics);
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Mapping from world coordinates to screen pixels for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ViewMetrics {
    scale: f32,
    camera: Vec2,
    screen_center: Vec2,
}

impl ViewMetrics {
    fn new(camera: Vec2, view_height: f32, screen_width: f32, screen_height: f32) -> Self {
        let scale = if view_height > f32::EPSILON {
            screen_height / view_height
        } else {
            0.0
        };
        Self {
            scale,
            camera,
            screen_center: Vec2::new(screen_width / 2.0, screen_height / 2.0),
        }
    }

    /// Screen position of a world point; world `y` grows upward, screen `y` downward.
    fn to_screen(&self, world: Vec2) -> Vec2 {
        let relative = (world - self.camera) * self.scale;
        Vec2::new(
            self.screen_center.x + relative.x,
            self.screen_center.y - relative.y,
        )
    }
}

fn gather_frame_input(held: HeldMovement, keyboard: KeyboardShortcuts) -> FrameInput {
    let moves = [
        (held.north, Direction::North),
        (held.south, Direction::South),
        (held.east, Direction::East),
        (held.west, Direction::West),
    ]
    .into_iter()
    .filter_map(|(pressed, direction)| pressed.then_some(direction))
    .collect();

    let lights = if keyboard.lights_on {
        Some(true)
    } else if keyboard.lights_off {
        Some(false)
    } else {
        None
    };

    FrameInput { moves, lights }
}

fn draw_maze(maze: &MazePresentation, metrics: &ViewMetrics) {
    if metrics.scale <= f32::EPSILON {
        return;
    }

    let color = to_macroquad_color(maze.color);
    let thickness = (maze.thickness * metrics.scale).max(1.0);
    for (start, end) in &maze.segments {
        let start = metrics.to_screen(*start);
        let end = metrics.to_screen(*end);
        macroquad::shapes::draw_line(start.x, start.y, end.x, end.y, thickness, color);
    }
}

fn draw_element(element: &ElementPresentation, gradient_factor: f32, metrics: &ViewMetrics) {
    for [a, b, c] in element.mesh.world_triangles(element.position) {
        let Some(color) = element.resolve(a.1, gradient_factor) else {
            return;
        };
        macroquad::shapes::draw_triangle(
            to_macroquad_vec(metrics.to_screen(a.0)),
            to_macroquad_vec(metrics.to_screen(b.0)),
            to_macroquad_vec(metrics.to_screen(c.0)),
            to_macroquad_color(color),
        );
    }
}

fn draw_hud(hud: &HudPresentation) {
    let color = macroquad::color::WHITE;
    for (index, line) in hud.lines().iter().enumerate() {
        let y = HUD_MARGIN + HUD_FONT_SIZE + index as f32 * HUD_LINE_SPACING;
        let _ = macroquad::text::draw_text(line, HUD_MARGIN, y, HUD_FONT_SIZE, color);
    }
}

fn draw_game_over(game_over: GameOverPresentation, metrics: &ViewMetrics) {
    let center = metrics.screen_center;
    let color = macroquad::color::WHITE;
    let headline = game_over.headline();
    let score = format!("Final score: {}", game_over.score);
    let x = center.x - GAME_OVER_FONT_SIZE * 4.0;
    let _ = macroquad::text::draw_text(headline, x, center.y, GAME_OVER_FONT_SIZE, color);
    let _ = macroquad::text::draw_text(
        &score,
        x,
        center.y + GAME_OVER_FONT_SIZE,
        GAME_OVER_FONT_SIZE,
        color,
    );
}

fn to_macroquad_vec(position: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(position.x, position.y)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
