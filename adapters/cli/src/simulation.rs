//! Per-frame orchestration of the world and its systems.

use std::time::Duration;

use maze_chase_core::{Command, Event};
use maze_chase_rendering::{FrameInput, RenderingError, Scene};
use maze_chase_system_pursuit::Pursuit;
use maze_chase_system_visibility::{PaintFrame, Visibility};
use maze_chase_world::{self as world, query, World};

use crate::scene;

/// Owns the world and drives one frame of commands at a time.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    pursuit: Pursuit,
    visibility: Visibility,
    carried: Vec<Event>,
    paints: PaintFrame,
}

impl Simulation {
    pub(crate) fn new(world: World) -> Self {
        let mut visibility = Visibility::new(query::lights_on(&world));
        let paints = paint(&mut visibility, &world, &[]);
        Self {
            world,
            pursuit: Pursuit::default(),
            visibility,
            carried: Vec::new(),
            paints,
        }
    }

    pub(crate) fn initial_scene(&self) -> Result<Scene, RenderingError> {
        scene::build(&self.world, &self.paints)
    }

    /// Applies player input, lets the bot react, repaints, then advances the clock.
    ///
    /// Paints are taken before the tick evaluates the rules, so an element
    /// retired by this frame's rules fades out on the following frame.
    ///
    /// Frames after the session ended leave the world untouched.
    pub(crate) fn advance(&mut self, dt: Duration, input: &FrameInput) {
        if query::outcome(&self.world).is_some() {
            return;
        }

        let mut events = Vec::new();
        if let Some(on) = input.lights {
            world::apply(&mut self.world, Command::SetLights { on }, &mut events);
        }
        for &direction in &input.moves {
            world::apply(
                &mut self.world,
                Command::MovePlayer { direction, dt },
                &mut events,
            );
        }

        let field = query::distance_field(&self.world);
        let mut commands = Vec::new();
        self.pursuit.handle(
            &self.carried,
            &query::bot(&self.world),
            &field,
            query::grid(&self.world),
            &mut commands,
        );
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        self.paints = self.visibility.handle(
            &events,
            &query::bot(&self.world),
            &query::markers(&self.world),
            query::spawns(&self.world),
            &field,
        );
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);
        self.carried = events;
    }

    pub(crate) fn refresh_scene(&self, scene: &mut Scene) {
        scene::refresh(scene, &self.world, &self.paints);
    }
}

fn paint(visibility: &mut Visibility, world: &World, events: &[Event]) -> PaintFrame {
    visibility.handle(
        events,
        &query::bot(world),
        &query::markers(world),
        query::spawns(world),
        &query::distance_field(world),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::{CellCoord, Direction, Outcome, Paint};
    use maze_chase_world::{grid::Grid, Layout, SessionConfig};

    const FRAME: Duration = Duration::from_millis(16);

    fn corridor_world(config: SessionConfig) -> World {
        let mut grid = Grid::new(1, 5);
        for column in 0..4 {
            let _ = grid
                .carve(CellCoord::new(column, 0), Direction::East)
                .expect("interior carve");
        }
        let layout = Layout {
            grid,
            player: CellCoord::new(0, 0),
            bot: Some(CellCoord::new(4, 0)),
            goal: CellCoord::new(1, 0),
            bot_kill: CellCoord::new(3, 0),
            powerup: CellCoord::new(2, 0),
            tasks_remaining: 2,
            powerup_activated: false,
        };
        World::from_layout(layout, config, 11).expect("valid layout")
    }

    #[test]
    fn bot_steps_toward_player_once_ready() {
        let mut simulation = Simulation::new(corridor_world(SessionConfig::default()));
        for _ in 0..40 {
            simulation.advance(FRAME, &FrameInput::default());
        }

        assert_eq!(query::bot(&simulation.world).cell, CellCoord::new(3, 0));
    }

    #[test]
    fn switching_lights_off_grades_paints() {
        let mut simulation = Simulation::new(corridor_world(SessionConfig::default()));
        let mut scene = simulation.initial_scene().expect("scene builds");
        assert_eq!(scene.bot.paint, Paint::FullBright);

        let input = FrameInput {
            moves: Vec::new(),
            lights: Some(false),
        };
        simulation.advance(FRAME, &input);
        simulation.refresh_scene(&mut scene);

        assert_eq!(scene.bot.paint, Paint::Graded(4));
        assert!(!scene.hud.lights_on);
        assert_eq!(scene.markers[0].element.paint, Paint::Graded(1));
    }

    #[test]
    fn finished_session_ignores_further_frames() {
        let config = SessionConfig {
            countdown_secs: 1,
            ..SessionConfig::default()
        };
        let mut simulation = Simulation::new(corridor_world(config));
        let step = Duration::from_millis(600);
        simulation.advance(step, &FrameInput::default());
        simulation.advance(step, &FrameInput::default());
        assert_eq!(query::outcome(&simulation.world), Some(Outcome::Timeout));

        let elapsed = query::elapsed(&simulation.world);
        simulation.advance(step, &FrameInput::default());
        assert_eq!(query::elapsed(&simulation.world), elapsed);

        let mut scene = simulation.initial_scene().expect("scene builds");
        simulation.refresh_scene(&mut scene);
        assert_eq!(
            scene.game_over.map(|game_over| game_over.outcome),
            Some(Outcome::Timeout)
        );
    }

    #[test]
    fn paints_are_taken_before_rules_retire_the_bot() {
        let mut grid = Grid::new(1, 5);
        for column in 0..4 {
            let _ = grid
                .carve(CellCoord::new(column, 0), Direction::East)
                .expect("interior carve");
        }
        let layout = Layout {
            grid,
            player: CellCoord::new(0, 0),
            bot: Some(CellCoord::new(4, 0)),
            goal: CellCoord::new(1, 0),
            bot_kill: CellCoord::new(0, 0),
            powerup: CellCoord::new(2, 0),
            tasks_remaining: 2,
            powerup_activated: false,
        };
        let world = World::from_layout(layout, SessionConfig::default(), 11)
            .expect("valid layout");
        let mut simulation = Simulation::new(world);
        let mut scene = simulation.initial_scene().expect("scene builds");

        simulation.advance(FRAME, &FrameInput::default());
        simulation.refresh_scene(&mut scene);
        assert!(!query::bot(&simulation.world).alive);
        assert_eq!(scene.bot.paint, Paint::FullBright);

        simulation.advance(FRAME, &FrameInput::default());
        simulation.refresh_scene(&mut scene);
        assert_eq!(scene.bot.paint, Paint::Dead);
    }
}
