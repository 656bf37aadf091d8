#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Visibility system that decides how brightly each actor and marker is drawn.
//!
//! With the lights on everything is drawn at full brightness. With the lights
//! off, elements fade with their maze distance from the player, so a bot
//! around the corner is harder to see than one in the same corridor.

use maze_chase_core::{CellCoord, Event, MarkerKind, Paint, UNREACHED};
use maze_chase_world::{
    navigation::DistanceField,
    query::{BotSnapshot, MarkerSnapshot},
    rules::PowerupSpawn,
};

/// Paint chosen for every visible element in a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaintFrame {
    /// Paint of the bot.
    pub bot: Paint,
    /// Paint of each stationary marker, in the order they were supplied.
    pub markers: Vec<(MarkerKind, Paint)>,
    /// Paint of each spawn slot; empty slots stay empty.
    pub spawns: Vec<Option<Paint>>,
}

impl PaintFrame {
    /// Paint assigned to the marker of `kind`, if it was supplied.
    #[must_use]
    pub fn marker(&self, kind: MarkerKind) -> Option<Paint> {
        self.markers
            .iter()
            .find(|(marker, _)| *marker == kind)
            .map(|(_, paint)| *paint)
    }
}

/// Pure system tracking the lights and deriving paints from the distance field.
#[derive(Debug)]
pub struct Visibility {
    lights_on: bool,
}

impl Visibility {
    /// Creates the system with the session's initial lights state.
    #[must_use]
    pub fn new(lights_on: bool) -> Self {
        Self { lights_on }
    }

    /// Reports whether the system currently considers the lights on.
    #[must_use]
    pub fn lights_on(&self) -> bool {
        self.lights_on
    }

    /// Consumes world events and immutable views to paint the frame.
    ///
    /// The field is only read while the lights are off.
    pub fn handle(
        &mut self,
        events: &[Event],
        bot: &BotSnapshot<'_>,
        markers: &[MarkerSnapshot<'_>],
        spawns: &[Option<PowerupSpawn>],
        field: &DistanceField,
    ) -> PaintFrame {
        for event in events {
            if let Event::LightsChanged { on } = event {
                self.lights_on = *on;
            }
        }

        let bot_paint = if !bot.alive {
            Paint::Dead
        } else if self.lights_on {
            Paint::FullBright
        } else {
            Paint::Graded(field.min_over(bot.actor.span).unwrap_or(UNREACHED))
        };

        PaintFrame {
            bot: bot_paint,
            markers: markers
                .iter()
                .map(|marker| {
                    let paint = if marker.active {
                        self.cell_paint(field, marker.cell)
                    } else {
                        Paint::Dead
                    };
                    (marker.kind, paint)
                })
                .collect(),
            spawns: spawns
                .iter()
                .map(|slot| slot.map(|spawn| self.cell_paint(field, spawn.cell)))
                .collect(),
        }
    }

    fn cell_paint(&self, field: &DistanceField, cell: CellCoord) -> Paint {
        if self.lights_on {
            return Paint::FullBright;
        }
        Paint::Graded(field.distance(cell).unwrap_or(UNREACHED))
    }
}
