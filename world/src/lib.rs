#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Chase.

pub mod config;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod movement;
pub mod navigation;
pub mod rules;
pub mod spatial;

use std::time::Duration;

use glam::Vec2;
use maze_chase_core::{
    CellCoord, CellSpan, Command, Direction, Event, Outcome, Rgb, WELCOME_BANNER,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

pub use config::{ConfigError, SessionConfig, MAX_ACTOR_SCALE};

use crate::{
    geometry::Geometry,
    grid::Grid,
    rules::{PowerupSpawn, TASKS_TOTAL, TASK_REWARD, WIN_REWARD},
    spatial::GridFrame,
};

const PLAYER_BODY: Rgb = Rgb::new(0.42, 0.76, 0.14);
const BOT_BODY: Rgb = Rgb::new(0.86, 0.08, 0.24);
const VISOR: Rgb = Rgb::new(0.90, 0.91, 0.98);
const GOAL_COLOR: Rgb = Rgb::new(0.98, 0.84, 0.0);
const BOT_KILL_COLOR: Rgb = Rgb::new(0.55, 0.0, 0.0);
const POWERUP_COLOR: Rgb = Rgb::new(0.0, 0.6, 0.9);
const BENEFICIAL_COLOR: Rgb = Rgb::new(0.2, 0.9, 0.3);
const HARMFUL_COLOR: Rgb = Rgb::new(0.9, 0.3, 0.1);

/// Marker quads cover this fraction of a cell on each axis.
const MARKER_SCALE: f32 = 0.5;
const SPAWN_SCALE: f32 = 0.25;

/// Largest fraction of a cell the player may cover in a single move.
const MAX_STEP_FRACTION: f32 = 0.25;

/// Failures raised while setting up a session.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SessionError {
    /// The configuration does not describe a playable session.
    #[error("invalid session configuration")]
    Config(#[from] ConfigError),
    /// The grid has too few cells to place every marker and actor.
    #[error("a {rows}x{columns} grid cannot hold {required} more distinct cells")]
    GridTooSmall {
        /// Grid rows.
        rows: u32,
        /// Grid columns.
        columns: u32,
        /// Distinct cells that still had to be placed.
        required: usize,
    },
    /// A layout refers to a cell outside its grid.
    #[error("cell {cell:?} lies outside the grid")]
    OutsideGrid {
        /// Offending cell.
        cell: CellCoord,
    },
}

/// Hand-built session layout used to stage specific situations.
#[derive(Clone, Debug)]
pub struct Layout {
    /// Maze the session takes place in.
    pub grid: Grid,
    /// Cell the player starts in.
    pub player: CellCoord,
    /// Cell the bot starts in; `None` starts the session with the bot removed.
    pub bot: Option<CellCoord>,
    /// Goal marker cell.
    pub goal: CellCoord,
    /// Bot-kill marker cell.
    pub bot_kill: CellCoord,
    /// Powerup marker cell.
    pub powerup: CellCoord,
    /// Objectives still outstanding.
    pub tasks_remaining: u32,
    /// Whether the powerup marker was already collected.
    pub powerup_activated: bool,
}

#[derive(Clone, Debug)]
struct Actor {
    position: Vec2,
    geometry: Geometry,
}

#[derive(Clone, Debug)]
struct Bot {
    actor: Actor,
    cell: CellCoord,
    alive: bool,
    accumulator: Duration,
}

#[derive(Clone, Debug)]
struct Marker {
    cell: CellCoord,
    geometry: Geometry,
}

/// Represents the authoritative Maze Chase world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: SessionConfig,
    grid: Grid,
    frame: GridFrame,
    player: Actor,
    bot: Bot,
    goal: Marker,
    bot_kill: Marker,
    powerup: Marker,
    spawns: Vec<Option<PowerupSpawn>>,
    beneficial_geometry: Geometry,
    harmful_geometry: Geometry,
    lights_on: bool,
    tasks_remaining: u32,
    powerup_activated: bool,
    score: i32,
    elapsed: Duration,
    lights_sampled: Duration,
    outcome: Option<Outcome>,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a session with a freshly generated maze.
    ///
    /// The player starts in the centre cell; the bot and the three markers are
    /// placed at random cells distinct from it and from each other.
    pub fn new(config: SessionConfig, seed: u64) -> Result<Self, SessionError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = generator::generate_with(config.rows, config.columns, &mut rng);
        let player = CellCoord::new(config.columns / 2, config.rows / 2);

        let placed = rules::place_distinct(&mut rng, config.rows, config.columns, &[player], 4)?;
        let [goal, bot_kill, powerup, bot] = [placed[0], placed[1], placed[2], placed[3]];
        log::debug!(
            "session seeded with {seed}: player {player:?}, bot {bot:?}, goal {goal:?}, \
             bot kill {bot_kill:?}, powerup {powerup:?}"
        );

        let layout = Layout {
            grid,
            player,
            bot: Some(bot),
            goal,
            bot_kill,
            powerup,
            tasks_remaining: TASKS_TOTAL,
            powerup_activated: false,
        };
        Ok(Self::assemble(layout, config, rng))
    }

    /// Creates a session from a hand-built layout.
    ///
    /// The configured dimensions are replaced by those of the layout's grid.
    pub fn from_layout(
        layout: Layout,
        mut config: SessionConfig,
        seed: u64,
    ) -> Result<Self, SessionError> {
        config.rows = layout.grid.rows();
        config.columns = layout.grid.columns();
        config.validate()?;

        let cells = [layout.player, layout.goal, layout.bot_kill, layout.powerup];
        for cell in cells.into_iter().chain(layout.bot) {
            if !layout.grid.contains(cell) {
                return Err(SessionError::OutsideGrid { cell });
            }
        }
        Ok(Self::assemble(
            layout,
            config,
            ChaCha8Rng::seed_from_u64(seed),
        ))
    }

    fn assemble(layout: Layout, config: SessionConfig, rng: ChaCha8Rng) -> Self {
        let frame = GridFrame::centered(
            layout.grid.rows(),
            layout.grid.columns(),
            config.cell_width,
            config.cell_height,
        );
        let actor_width = config.actor_scale * config.cell_width;
        let actor_height = config.actor_scale * config.cell_height;
        let marker = |cell: CellCoord, color: Rgb| Marker {
            cell,
            geometry: Geometry::quad(
                MARKER_SCALE * config.cell_width,
                MARKER_SCALE * config.cell_height,
                color,
            ),
        };
        let spawn_quad = |color: Rgb| {
            Geometry::quad(
                SPAWN_SCALE * config.cell_width,
                SPAWN_SCALE * config.cell_height,
                color,
            )
        };

        let bot_cell = layout.bot.unwrap_or(layout.bot_kill);
        Self {
            banner: WELCOME_BANNER,
            player: Actor {
                position: frame.cell_center(layout.player),
                geometry: Geometry::explorer(actor_width, actor_height, PLAYER_BODY, VISOR),
            },
            bot: Bot {
                actor: Actor {
                    position: frame.cell_center(bot_cell),
                    geometry: Geometry::explorer(actor_width, actor_height, BOT_BODY, VISOR),
                },
                cell: bot_cell,
                alive: layout.bot.is_some(),
                accumulator: Duration::ZERO,
            },
            goal: marker(layout.goal, GOAL_COLOR),
            bot_kill: marker(layout.bot_kill, BOT_KILL_COLOR),
            powerup: marker(layout.powerup, POWERUP_COLOR),
            spawns: Vec::new(),
            beneficial_geometry: spawn_quad(BENEFICIAL_COLOR),
            harmful_geometry: spawn_quad(HARMFUL_COLOR),
            lights_on: config.lights_on,
            tasks_remaining: layout.tasks_remaining,
            powerup_activated: layout.powerup_activated,
            score: 0,
            elapsed: Duration::ZERO,
            lights_sampled: Duration::ZERO,
            outcome: None,
            grid: layout.grid,
            frame,
            config,
            rng,
        }
    }

    fn player_span(&self) -> CellSpan {
        self.frame
            .bounds(&self.player.geometry, self.player.position)
    }

    fn bot_span(&self) -> CellSpan {
        self.frame
            .bounds(&self.bot.actor.geometry, self.bot.actor.position)
    }

    fn move_player(&mut self, direction: Direction, dt: Duration, out_events: &mut Vec<Event>) {
        let (dc, dr) = direction.offset();
        let cells = (self.config.player_speed * dt.as_secs_f32()).min(MAX_STEP_FRACTION);
        let delta = Vec2::new(
            dc as f32 * self.frame.cell_width(),
            -(dr as f32) * self.frame.cell_height(),
        ) * cells;
        let candidate = self.player.position + delta;

        match movement::can_move(
            &self.grid,
            &self.frame,
            &self.player.geometry,
            candidate,
            direction,
        ) {
            Ok(span) => {
                self.player.position = candidate;
                out_events.push(Event::PlayerMoved { span });
            }
            Err(reason) => out_events.push(Event::PlayerMoveBlocked { direction, reason }),
        }
    }

    fn step_bot(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let ready = self.bot.alive && self.bot.accumulator >= self.config.bot_step_interval();
        let from = self.bot.cell;
        let next = if ready && !self.grid.has_wall(from, direction) {
            self.grid.neighbor(from, direction)
        } else {
            None
        };

        let Some(to) = next else {
            out_events.push(Event::BotStepRejected { direction });
            return;
        };

        self.bot.cell = to;
        self.bot.actor.position = self.frame.cell_center(to);
        self.bot.accumulator = Duration::ZERO;
        out_events.push(Event::BotAdvanced { from, to });
    }

    fn set_lights(&mut self, on: bool, out_events: &mut Vec<Event>) {
        if self.lights_on == on {
            return;
        }
        self.lights_on = on;
        log::debug!("lights switched {}", if on { "on" } else { "off" });
        out_events.push(Event::LightsChanged { on });
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.elapsed = self.elapsed.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        if self.bot.alive {
            self.bot.accumulator = self
                .bot
                .accumulator
                .saturating_add(dt)
                .min(self.config.bot_step_interval());
        }

        self.evaluate_rules(out_events);
    }

    fn evaluate_rules(&mut self, out_events: &mut Vec<Event>) {
        let player = self.player_span();

        if self.bot.alive && self.bot_span().same_cells(&player) {
            self.finish(Outcome::Lose, out_events);
            return;
        }

        if self.bot.alive && player.covers_exactly(self.bot_kill.cell) {
            self.bot.alive = false;
            log::debug!("bot removed at {:?}", self.bot_kill.cell);
            out_events.push(Event::BotRemoved);
            self.award(TASK_REWARD, out_events);
            self.complete_task(out_events);
        }

        if !self.powerup_activated && player.covers_exactly(self.powerup.cell) {
            self.activate_powerup(player, out_events);
        }

        if let Some((index, kind)) = rules::collect_spawn(&mut self.spawns, player) {
            out_events.push(Event::SpawnCollected { index, kind });
            self.award(kind.score_delta(), out_events);
        }

        if !self.lights_on {
            let award = rules::lights_off_award(self.lights_sampled, self.elapsed);
            if award > 0 {
                self.award(award, out_events);
            }
        }
        self.lights_sampled = self.elapsed;

        if self.tasks_remaining == 0 && player.covers_exactly(self.goal.cell) {
            self.award(WIN_REWARD, out_events);
            self.finish(Outcome::Win, out_events);
            return;
        }

        if self.elapsed >= self.config.countdown() {
            self.finish(Outcome::Timeout, out_events);
        }
    }

    fn activate_powerup(&mut self, player: CellSpan, out_events: &mut Vec<Event>) {
        let mut taken = vec![self.goal.cell, self.bot_kill.cell, self.powerup.cell];
        taken.extend(player.cells());
        let cells = match rules::place_distinct(
            &mut self.rng,
            self.grid.rows(),
            self.grid.columns(),
            &taken,
            self.config.spawn_batch,
        ) {
            Ok(cells) => cells,
            Err(error) => {
                log::warn!("powerup released no spawns: {error}");
                Vec::new()
            }
        };

        self.spawns = cells
            .into_iter()
            .map(|cell| {
                Some(PowerupSpawn {
                    cell,
                    kind: rules::random_kind(&mut self.rng),
                })
            })
            .collect();
        self.powerup_activated = true;
        log::debug!("powerup activated with {} spawns", self.spawns.len());
        out_events.push(Event::PowerupActivated {
            spawns: self.spawns.len(),
        });
        self.award(TASK_REWARD, out_events);
        self.complete_task(out_events);
    }

    fn award(&mut self, delta: i32, out_events: &mut Vec<Event>) {
        self.score = self.score.saturating_add(delta);
        out_events.push(Event::ScoreChanged {
            delta,
            score: self.score,
        });
    }

    fn complete_task(&mut self, out_events: &mut Vec<Event>) {
        self.tasks_remaining = self.tasks_remaining.saturating_sub(1);
        out_events.push(Event::TaskCompleted {
            remaining: self.tasks_remaining,
        });
    }

    fn finish(&mut self, outcome: Outcome, out_events: &mut Vec<Event>) {
        self.outcome = Some(outcome);
        log::info!("game over: {outcome:?} with score {}", self.score);
        out_events.push(Event::GameOver {
            outcome,
            score: self.score,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands arriving after the session ended are ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.outcome.is_some() {
        return;
    }

    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::MovePlayer { direction, dt } => world.move_player(direction, dt, out_events),
        Command::StepBot { direction } => world.step_bot(direction, out_events),
        Command::SetLights { on } => world.set_lights(on, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use glam::Vec2;
    use maze_chase_core::{CellCoord, CellSpan, Direction, MarkerKind, Outcome, SpawnKind};

    use super::{Marker, World, TASKS_TOTAL};
    use crate::{
        geometry::Geometry, grid::Grid, navigation::DistanceField, rules::PowerupSpawn,
        spatial::GridFrame, SessionConfig,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the session was created with.
    #[must_use]
    pub fn config(world: &World) -> &SessionConfig {
        &world.config
    }

    /// Provides read-only access to the maze topology.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Placement of the maze in world space.
    #[must_use]
    pub fn frame(world: &World) -> &GridFrame {
        &world.frame
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> ActorSnapshot<'_> {
        ActorSnapshot {
            position: world.player.position,
            span: world.player_span(),
            geometry: &world.player.geometry,
        }
    }

    /// Cells currently overlapped by the player.
    #[must_use]
    pub fn player_span(world: &World) -> CellSpan {
        world.player_span()
    }

    /// Captures the bot's current state.
    #[must_use]
    pub fn bot(world: &World) -> BotSnapshot<'_> {
        BotSnapshot {
            actor: ActorSnapshot {
                position: world.bot.actor.position,
                span: world.bot_span(),
                geometry: &world.bot.actor.geometry,
            },
            cell: world.bot.cell,
            alive: world.bot.alive,
            ready_for_step: world.bot.alive
                && world.bot.accumulator >= world.config.bot_step_interval(),
        }
    }

    /// Describes the three stationary markers in goal, bot-kill, powerup order.
    #[must_use]
    pub fn markers(world: &World) -> [MarkerSnapshot<'_>; 3] {
        let frame = &world.frame;
        [
            marker_snapshot(frame, MarkerKind::Goal, &world.goal, true),
            marker_snapshot(frame, MarkerKind::BotKill, &world.bot_kill, world.bot.alive),
            marker_snapshot(
                frame,
                MarkerKind::Powerup,
                &world.powerup,
                !world.powerup_activated,
            ),
        ]
    }

    fn marker_snapshot<'a>(
        frame: &GridFrame,
        kind: MarkerKind,
        marker: &'a Marker,
        active: bool,
    ) -> MarkerSnapshot<'a> {
        MarkerSnapshot {
            kind,
            cell: marker.cell,
            position: frame.cell_center(marker.cell),
            geometry: &marker.geometry,
            active,
        }
    }

    /// Ephemeral spawn slots; collected spawns leave an empty slot behind.
    #[must_use]
    pub fn spawns(world: &World) -> &[Option<PowerupSpawn>] {
        &world.spawns
    }

    /// Geometry shared by every spawn of `kind`.
    #[must_use]
    pub fn spawn_geometry(world: &World, kind: SpawnKind) -> &Geometry {
        match kind {
            SpawnKind::Beneficial => &world.beneficial_geometry,
            SpawnKind::Harmful => &world.harmful_geometry,
        }
    }

    /// Reports whether the maze lights are on.
    #[must_use]
    pub fn lights_on(world: &World) -> bool {
        world.lights_on
    }

    /// Current score.
    #[must_use]
    pub fn score(world: &World) -> i32 {
        world.score
    }

    /// Outcome of the session once it has ended.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        world.outcome
    }

    /// Session time elapsed so far.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Values shown on the heads-up display.
    #[must_use]
    pub fn hud(world: &World) -> Hud {
        Hud {
            score: world.score,
            lights_on: world.lights_on,
            tasks_done: TASKS_TOTAL.saturating_sub(world.tasks_remaining),
            tasks_total: TASKS_TOTAL,
            remaining: world.config.countdown().saturating_sub(world.elapsed),
        }
    }

    /// Breadth-first distances from every cell the player overlaps.
    #[must_use]
    pub fn distance_field(world: &World) -> DistanceField {
        DistanceField::from_span(&world.grid, world.player_span())
    }

    /// Line segments of every standing wall in world coordinates.
    ///
    /// Each cell contributes its north and west walls; the last row and column
    /// add the southern and eastern border.
    #[must_use]
    pub fn wall_segments(world: &World) -> Vec<(Vec2, Vec2)> {
        let grid = &world.grid;
        let frame = &world.frame;
        let mut segments = Vec::new();

        for cell in grid.coords() {
            let (column, row) = (cell.column(), cell.row());
            let corner = frame.cell_corner(column, row);
            if grid.has_wall(cell, Direction::North) {
                segments.push((corner, frame.cell_corner(column + 1, row)));
            }
            if grid.has_wall(cell, Direction::West) {
                segments.push((corner, frame.cell_corner(column, row + 1)));
            }
            if row + 1 == grid.rows() && grid.has_wall(cell, Direction::South) {
                segments.push((
                    frame.cell_corner(column, row + 1),
                    frame.cell_corner(column + 1, row + 1),
                ));
            }
            if column + 1 == grid.columns()
                && grid.has_wall(cell, Direction::East)
            {
                segments.push((
                    frame.cell_corner(column + 1, row),
                    frame.cell_corner(column + 1, row + 1),
                ));
            }
        }
        segments
    }

    /// Read-only view of an actor.
    #[derive(Clone, Copy, Debug)]
    pub struct ActorSnapshot<'a> {
        /// World position of the actor's origin.
        pub position: Vec2,
        /// Cells overlapped by the actor.
        pub span: CellSpan,
        /// Local geometry of the actor.
        pub geometry: &'a Geometry,
    }

    /// Read-only view of the bot.
    #[derive(Clone, Copy, Debug)]
    pub struct BotSnapshot<'a> {
        /// Continuous state shared with the player.
        pub actor: ActorSnapshot<'a>,
        /// Cell the bot stands in.
        pub cell: CellCoord,
        /// Whether the bot is still in play.
        pub alive: bool,
        /// Whether enough time passed for the bot to take another step.
        pub ready_for_step: bool,
    }

    /// Read-only view of a stationary marker.
    #[derive(Clone, Copy, Debug)]
    pub struct MarkerSnapshot<'a> {
        /// Role of the marker.
        pub kind: MarkerKind,
        /// Cell the marker occupies.
        pub cell: CellCoord,
        /// World position of the marker's centre.
        pub position: Vec2,
        /// Local geometry of the marker.
        pub geometry: &'a Geometry,
        /// Whether the marker can still trigger.
        pub active: bool,
    }

    /// Heads-up display values.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Hud {
        /// Current score.
        pub score: i32,
        /// Whether the lights are on.
        pub lights_on: bool,
        /// Objectives completed so far.
        pub tasks_done: u32,
        /// Objectives in the session.
        pub tasks_total: u32,
        /// Countdown left before the session times out.
        pub remaining: Duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::LIGHTS_OFF_REWARD;
    use maze_chase_core::{MarkerKind, SpawnKind};

    fn corridor(columns: u32) -> Grid {
        let mut grid = Grid::new(1, columns);
        for column in 0..columns.saturating_sub(1) {
            let _ = grid
                .carve(CellCoord::new(column, 0), Direction::East)
                .expect("interior carve");
        }
        grid
    }

    fn tick(world: &mut World, millis: u64) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Tick {
                dt: Duration::from_millis(millis),
            },
            &mut events,
        );
        events
    }

    #[test]
    fn new_world_places_actors_and_markers_apart() {
        let world = World::new(SessionConfig::default(), 17).expect("default session");
        let player = query::player(&world).span.single_cell().expect("centred player");
        assert_eq!(player, CellCoord::new(12, 12));

        let mut cells: Vec<_> = query::markers(&world).iter().map(|m| m.cell).collect();
        cells.push(player);
        cells.push(query::bot(&world).cell);
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 5);
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn tiny_grid_is_rejected() {
        let config = SessionConfig {
            rows: 1,
            columns: 3,
            ..SessionConfig::default()
        };
        assert!(matches!(
            World::new(config, 1),
            Err(SessionError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn layout_cells_must_lie_inside_grid() {
        let layout = Layout {
            grid: corridor(2),
            player: CellCoord::new(0, 0),
            bot: None,
            goal: CellCoord::new(5, 0),
            bot_kill: CellCoord::new(0, 0),
            powerup: CellCoord::new(1, 0),
            tasks_remaining: 2,
            powerup_activated: false,
        };
        assert_eq!(
            World::from_layout(layout, SessionConfig::default(), 0).err(),
            Some(SessionError::OutsideGrid {
                cell: CellCoord::new(5, 0)
            })
        );
    }

    #[test]
    fn bot_catching_player_ends_session() {
        let layout = Layout {
            grid: corridor(3),
            player: CellCoord::new(1, 0),
            bot: Some(CellCoord::new(1, 0)),
            goal: CellCoord::new(0, 0),
            bot_kill: CellCoord::new(2, 0),
            powerup: CellCoord::new(0, 0),
            tasks_remaining: 2,
            powerup_activated: true,
        };
        let mut world =
            World::from_layout(layout, SessionConfig::default(), 0).expect("valid layout");

        let events = tick(&mut world, 16);
        assert!(events.contains(&Event::GameOver {
            outcome: Outcome::Lose,
            score: 0
        }));

        let events = tick(&mut world, 16);
        assert!(events.is_empty());
    }

    #[test]
    fn standing_on_kill_tile_removes_bot_once() {
        let layout = Layout {
            grid: corridor(3),
            player: CellCoord::new(0, 0),
            bot: Some(CellCoord::new(2, 0)),
            goal: CellCoord::new(2, 0),
            bot_kill: CellCoord::new(0, 0),
            powerup: CellCoord::new(1, 0),
            tasks_remaining: 2,
            powerup_activated: false,
        };
        let mut world =
            World::from_layout(layout, SessionConfig::default(), 0).expect("valid layout");

        let events = tick(&mut world, 16);
        assert!(events.contains(&Event::BotRemoved));
        assert!(events.contains(&Event::TaskCompleted { remaining: 1 }));
        assert_eq!(query::score(&world), TASK_REWARD);
        assert!(!query::bot(&world).alive);

        let events = tick(&mut world, 16);
        assert!(!events.contains(&Event::BotRemoved));
        assert_eq!(query::score(&world), TASK_REWARD);
    }

    #[test]
    fn bot_steps_only_after_interval_through_open_sides() {
        let layout = Layout {
            grid: corridor(3),
            player: CellCoord::new(0, 0),
            bot: Some(CellCoord::new(2, 0)),
            goal: CellCoord::new(1, 0),
            bot_kill: CellCoord::new(1, 0),
            powerup: CellCoord::new(1, 0),
            tasks_remaining: 2,
            powerup_activated: true,
        };
        let mut world =
            World::from_layout(layout, SessionConfig::default(), 0).expect("valid layout");
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::StepBot {
                direction: Direction::West,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::BotStepRejected {
                direction: Direction::West
            }]
        );

        let _ = tick(&mut world, 500);
        assert!(query::bot(&world).ready_for_step);

        events.clear();
        apply(
            &mut world,
            Command::StepBot {
                direction: Direction::North,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::BotStepRejected {
                direction: Direction::North
            }]
        );

        events.clear();
        apply(
            &mut world,
            Command::StepBot {
                direction: Direction::West,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::BotAdvanced {
                from: CellCoord::new(2, 0),
                to: CellCoord::new(1, 0),
            }]
        );
        assert!(!query::bot(&world).ready_for_step);
    }

    #[test]
    fn lights_off_scores_whole_seconds() {
        let layout = Layout {
            grid: corridor(3),
            player: CellCoord::new(0, 0),
            bot: None,
            goal: CellCoord::new(2, 0),
            bot_kill: CellCoord::new(2, 0),
            powerup: CellCoord::new(2, 0),
            tasks_remaining: 2,
            powerup_activated: true,
        };
        let mut world =
            World::from_layout(layout, SessionConfig::default(), 0).expect("valid layout");
        let mut events = Vec::new();
        apply(&mut world, Command::SetLights { on: false }, &mut events);
        assert_eq!(events, vec![Event::LightsChanged { on: false }]);

        let _ = tick(&mut world, 600);
        assert_eq!(query::score(&world), 0);
        let _ = tick(&mut world, 600);
        assert_eq!(query::score(&world), LIGHTS_OFF_REWARD);
        let _ = tick(&mut world, 2_000);
        assert_eq!(query::score(&world), 3 * LIGHTS_OFF_REWARD);
        assert!(!query::hud(&world).lights_on);
    }

    #[test]
    fn countdown_expiry_times_out() {
        let layout = Layout {
            grid: corridor(2),
            player: CellCoord::new(0, 0),
            bot: None,
            goal: CellCoord::new(1, 0),
            bot_kill: CellCoord::new(1, 0),
            powerup: CellCoord::new(1, 0),
            tasks_remaining: 2,
            powerup_activated: false,
        };
        let config = SessionConfig {
            countdown_secs: 1,
            ..SessionConfig::default()
        };
        let mut world = World::from_layout(layout, config, 0).expect("valid layout");

        let _ = tick(&mut world, 999);
        assert_eq!(query::outcome(&world), None);
        let events = tick(&mut world, 1);
        assert!(events.contains(&Event::GameOver {
            outcome: Outcome::Timeout,
            score: 0
        }));
        assert_eq!(query::hud(&world).remaining, Duration::ZERO);
    }

    #[test]
    fn wall_segments_outline_a_closed_cell() {
        let layout = Layout {
            grid: Grid::new(1, 1),
            player: CellCoord::new(0, 0),
            bot: None,
            goal: CellCoord::new(0, 0),
            bot_kill: CellCoord::new(0, 0),
            powerup: CellCoord::new(0, 0),
            tasks_remaining: 2,
            powerup_activated: true,
        };
        let world = World::from_layout(layout, SessionConfig::default(), 0).expect("valid layout");
        assert_eq!(query::wall_segments(&world).len(), 4);
        assert_eq!(query::markers(&world)[0].kind, MarkerKind::Goal);
    }

    #[test]
    fn spawn_geometry_follows_kind() {
        let world = World::new(SessionConfig::default(), 3).expect("default session");
        let beneficial = query::spawn_geometry(&world, SpawnKind::Beneficial);
        let harmful = query::spawn_geometry(&world, SpawnKind::Harmful);
        assert_ne!(beneficial, harmful);
        assert_eq!(query::frame(&world).origin(), Vec2::new(-12.5, 12.5));
    }
}
