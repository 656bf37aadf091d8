//! Conversion of world state into rendering descriptors.

use maze_chase_core::{Outcome, Paint};
use maze_chase_rendering::{
    Color, ElementPresentation, GameOverPresentation, HudPresentation, MarkerPresentation,
    MazePresentation, Mesh, MeshVertex, RenderingError, Scene,
};
use maze_chase_system_visibility::PaintFrame;
use maze_chase_world::{geometry::Geometry, query, World};

/// Wall thickness as a fraction of the cell width.
const WALL_THICKNESS: f32 = 0.05;
const WALL_COLOR: Color = Color::from_rgb_u8(230, 230, 230);

pub(crate) fn mesh(geometry: &Geometry) -> Mesh {
    Mesh::new(
        geometry
            .vertices()
            .iter()
            .map(|vertex| MeshVertex {
                position: vertex.position,
                color: vertex.color.into(),
            })
            .collect(),
        geometry.triangles().to_vec(),
    )
}

/// Builds the full scene for the current world state.
pub(crate) fn build(world: &World, paints: &PaintFrame) -> Result<Scene, RenderingError> {
    let config = query::config(world);
    let maze = MazePresentation::new(
        query::wall_segments(world),
        WALL_THICKNESS * config.cell_width,
        WALL_COLOR,
    )?;

    let player = query::player(world);
    let bot = query::bot(world);
    let markers = query::markers(world)
        .iter()
        .map(|marker| MarkerPresentation {
            kind: marker.kind,
            element: ElementPresentation::new(
                marker.position,
                mesh(marker.geometry),
                paints.marker(marker.kind).unwrap_or(Paint::Dead),
            ),
        })
        .collect();

    let mut scene = Scene::new(
        maze,
        ElementPresentation::new(player.position, mesh(player.geometry), Paint::FullBright),
        ElementPresentation::new(bot.actor.position, mesh(bot.actor.geometry), paints.bot),
        markers,
        Vec::new(),
        HudPresentation::default(),
        player.position,
        config.gradient_factor,
    );
    refresh(&mut scene, world, paints);
    Ok(scene)
}

/// Updates the moving parts of `scene` in place.
///
/// Meshes of actors and markers never change after spawning, so only
/// positions, paints, spawns and the overlays are rewritten.
pub(crate) fn refresh(scene: &mut Scene, world: &World, paints: &PaintFrame) {
    let player = query::player(world);
    scene.player.position = player.position;
    scene.camera = player.position;

    let bot = query::bot(world);
    scene.bot.position = bot.actor.position;
    scene.bot.paint = paints.bot;

    for marker in &mut scene.markers {
        marker.element.paint = paints.marker(marker.kind).unwrap_or(Paint::Dead);
    }

    let frame = query::frame(world);
    scene.spawns = query::spawns(world)
        .iter()
        .zip(&paints.spawns)
        .map(|(slot, paint)| {
            let (spawn, paint) = ((*slot)?, (*paint)?);
            Some(ElementPresentation::new(
                frame.cell_center(spawn.cell),
                mesh(query::spawn_geometry(world, spawn.kind)),
                paint,
            ))
        })
        .collect();

    let hud = query::hud(world);
    scene.hud = HudPresentation {
        score: hud.score,
        lights_on: hud.lights_on,
        tasks_done: hud.tasks_done,
        tasks_total: hud.tasks_total,
        seconds_left: hud.remaining.as_secs(),
    };
    scene.game_over = query::outcome(world).map(|outcome: Outcome| GameOverPresentation {
        outcome,
        score: hud.score,
    });
}
