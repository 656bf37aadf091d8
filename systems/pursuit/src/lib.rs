#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Greedy pursuit system that steers the bot down the player's distance field.

use maze_chase_core::{CellCoord, Command, Direction, Event, UNREACHED};
use maze_chase_world::{grid::Grid, navigation::DistanceField, query::BotSnapshot};

/// Pure system that reacts to world events and emits bot step commands.
#[derive(Debug)]
pub struct Pursuit {
    active: bool,
}

impl Pursuit {
    /// Consumes world events and immutable views to emit at most one bot step.
    ///
    /// The field must be measured from the player's current footprint. Once
    /// the bot is removed or the session ends the system stays silent.
    pub fn handle(
        &mut self,
        events: &[Event],
        bot: &BotSnapshot<'_>,
        field: &DistanceField,
        grid: &Grid,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if matches!(event, Event::BotRemoved | Event::GameOver { .. }) {
                self.active = false;
            }
        }

        if !self.active || !bot.alive || !bot.ready_for_step {
            return;
        }

        if let Some(direction) = next_direction(grid, field, bot.cell) {
            log::trace!("bot at {:?} steps {direction:?}", bot.cell);
            out.push(Command::StepBot { direction });
        }
    }
}

impl Default for Pursuit {
    fn default() -> Self {
        Self { active: true }
    }
}

/// Picks the open exit of `from` whose neighbour lies closest to the field's source.
///
/// Ties resolve in north, south, east, west order. Returns `None` when the bot
/// already stands on a source cell or no exit leads to a reached cell.
#[must_use]
pub fn next_direction(grid: &Grid, field: &DistanceField, from: CellCoord) -> Option<Direction> {
    if field.distance(from) == Some(0) {
        return None;
    }

    let mut best: Option<(Direction, u32)> = None;
    for (direction, neighbor) in grid.open_neighbors(from) {
        let Some(distance) = field.distance(neighbor) else {
            continue;
        };
        if distance == UNREACHED {
            continue;
        }
        if best.map_or(true, |(_, current)| distance < current) {
            best = Some((direction, distance));
        }
    }
    best.map(|(direction, _)| direction)
}
