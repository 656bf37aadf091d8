#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Chase experience.

mod scene;
mod settings;
mod simulation;

use anyhow::{Context, Result};
use clap::Parser;
use maze_chase_rendering::{Color, Presentation, RenderingBackend};
use maze_chase_rendering_macroquad::MacroquadBackend;
use maze_chase_world::{query, World};

use crate::{settings::Args, simulation::Simulation};

/// Number of cells visible vertically around the player.
const VIEW_CELLS: f32 = 10.0;

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = settings::load(&args)?;
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("starting {}x{} maze with seed {seed}", config.rows, config.columns);

    let view_height = config.cell_height * VIEW_CELLS.min(config.rows as f32);
    let world = World::new(config, seed).context("failed to set up the session")?;
    log::info!("{}", query::welcome_banner(&world));

    let mut simulation = Simulation::new(world);
    let scene = simulation
        .initial_scene()
        .context("failed to build the initial scene")?;
    let presentation = Presentation::new(
        "Maze Chase",
        Color::from_rgb_u8(0, 0, 0),
        scene,
        view_height,
    );

    MacroquadBackend::new()
        .with_vsync(true)
        .run(presentation, move |dt, input, scene| {
            simulation.advance(dt, &input);
            simulation.refresh_scene(scene);
        })
}
