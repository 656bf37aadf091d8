use std::time::Duration;

use maze_chase_core::{CellCoord, CellSpan, Command, Direction, Event};
use maze_chase_system_pursuit::{next_direction, Pursuit};
use maze_chase_world::{
    self as world, grid::Grid, navigation::DistanceField, query, Layout, SessionConfig, World,
};

fn open_grid(rows: u32, columns: u32) -> Grid {
    let mut grid = Grid::new(rows, columns);
    let cells: Vec<_> = grid.coords().collect();
    for cell in cells {
        for direction in [Direction::South, Direction::East] {
            let _ = grid.carve(cell, direction);
        }
    }
    grid
}

fn corridor_world(bot: CellCoord) -> World {
    let mut grid = Grid::new(1, 4);
    for column in 0..3 {
        let _ = grid
            .carve(CellCoord::new(column, 0), Direction::East)
            .expect("interior carve");
    }
    let layout = Layout {
        grid,
        player: CellCoord::new(0, 0),
        bot: Some(bot),
        goal: CellCoord::new(1, 0),
        bot_kill: CellCoord::new(2, 0),
        powerup: CellCoord::new(1, 0),
        tasks_remaining: 2,
        powerup_activated: true,
    };
    World::from_layout(layout, SessionConfig::default(), 0).expect("valid layout")
}

fn tick(world: &mut World, millis: u64) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::Tick {
            dt: Duration::from_millis(millis),
        },
        &mut events,
    );
    events
}

#[test]
fn ties_prefer_north_then_south_then_east_then_west() {
    let grid = open_grid(3, 3);
    let field = DistanceField::from_span(&grid, CellSpan::single(CellCoord::new(0, 0)));

    assert_eq!(
        next_direction(&grid, &field, CellCoord::new(1, 1)),
        Some(Direction::North)
    );
    assert_eq!(
        next_direction(&grid, &field, CellCoord::new(2, 0)),
        Some(Direction::West)
    );
}

#[test]
fn follows_open_edges_rather_than_straight_lines() {
    let mut grid = Grid::new(2, 2);
    for (cell, direction) in [
        (CellCoord::new(0, 0), Direction::South),
        (CellCoord::new(0, 1), Direction::East),
        (CellCoord::new(1, 1), Direction::North),
    ] {
        let _ = grid.carve(cell, direction).expect("interior carve");
    }
    let field = DistanceField::from_span(&grid, CellSpan::single(CellCoord::new(0, 0)));

    assert_eq!(
        next_direction(&grid, &field, CellCoord::new(1, 0)),
        Some(Direction::South)
    );
}

#[test]
fn no_step_without_a_reached_exit() {
    let grid = Grid::new(2, 2);
    let field = DistanceField::from_span(&grid, CellSpan::single(CellCoord::new(0, 0)));

    assert_eq!(next_direction(&grid, &field, CellCoord::new(1, 1)), None);
    assert_eq!(next_direction(&grid, &field, CellCoord::new(0, 0)), None);
}

#[test]
fn waits_for_step_interval_then_closes_in() {
    let mut world = corridor_world(CellCoord::new(3, 0));
    let mut pursuit = Pursuit::default();

    let events = tick(&mut world, 100);
    let mut commands = Vec::new();
    pursuit.handle(
        &events,
        &query::bot(&world),
        &query::distance_field(&world),
        query::grid(&world),
        &mut commands,
    );
    assert!(commands.is_empty());

    let events = tick(&mut world, 400);
    pursuit.handle(
        &events,
        &query::bot(&world),
        &query::distance_field(&world),
        query::grid(&world),
        &mut commands,
    );
    assert_eq!(
        commands,
        vec![Command::StepBot {
            direction: Direction::West
        }]
    );

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }
    assert_eq!(
        events,
        vec![Event::BotAdvanced {
            from: CellCoord::new(3, 0),
            to: CellCoord::new(2, 0),
        }]
    );
}

#[test]
fn stays_silent_once_bot_is_removed() {
    let mut world = corridor_world(CellCoord::new(3, 0));
    let mut pursuit = Pursuit::default();
    let mut commands = Vec::new();

    pursuit.handle(
        &[Event::BotRemoved],
        &query::bot(&world),
        &query::distance_field(&world),
        query::grid(&world),
        &mut commands,
    );
    let _ = tick(&mut world, 1_000);
    pursuit.handle(
        &[],
        &query::bot(&world),
        &query::distance_field(&world),
        query::grid(&world),
        &mut commands,
    );
    assert!(commands.is_empty());
}
