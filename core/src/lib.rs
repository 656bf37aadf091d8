#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query immutable snapshots, and
//! respond exclusively with new command batches.

use std::time::Duration;

use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Chase.";

/// Distance reported for cells that a breadth-first search never reached.
pub const UNREACHED: u32 = u32::MAX;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the session clock and evaluates the gameplay rules once.
    Tick {
        /// Duration of time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the player move for one frame in the given direction.
    MovePlayer {
        /// Direction of travel.
        direction: Direction,
        /// Frame time used to scale the configured player speed.
        dt: Duration,
    },
    /// Requests that the bot advance one cell in the given direction.
    StepBot {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Switches the maze lights on or off.
    SetLights {
        /// Whether the lights should be on.
        on: bool,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player moved; carries the span resolved after the move.
    PlayerMoved {
        /// Cells overlapped by the player's footprint after moving.
        span: CellSpan,
    },
    /// Reports that a player move was rejected.
    PlayerMoveBlocked {
        /// Direction of the rejected move.
        direction: Direction,
        /// Why the move was rejected.
        reason: MoveError,
    },
    /// Confirms that the bot moved between two cells.
    BotAdvanced {
        /// Cell the bot occupied before moving.
        from: CellCoord,
        /// Cell the bot occupies after moving.
        to: CellCoord,
    },
    /// Reports that a bot step was rejected.
    BotStepRejected {
        /// Direction of the rejected step.
        direction: Direction,
    },
    /// Announces that the lights changed state.
    LightsChanged {
        /// Whether the lights are now on.
        on: bool,
    },
    /// Announces that the player removed the bot from the maze.
    BotRemoved,
    /// Announces that the powerup marker was collected and spawns appeared.
    PowerupActivated {
        /// Number of ephemeral spawns placed into the maze.
        spawns: usize,
    },
    /// Announces that an ephemeral spawn was consumed.
    SpawnCollected {
        /// Slot of the consumed spawn.
        index: usize,
        /// Kind of the consumed spawn.
        kind: SpawnKind,
    },
    /// Reports a change to the player's score.
    ScoreChanged {
        /// Signed change applied to the score.
        delta: i32,
        /// Score after applying the change.
        score: i32,
    },
    /// Reports that an objective was completed.
    TaskCompleted {
        /// Objectives still outstanding.
        remaining: u32,
    },
    /// Announces the end of the session.
    GameOver {
        /// How the session ended.
        outcome: Outcome,
        /// Final score.
        score: i32,
    },
}

/// Cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All directions in the order used to break ties.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Column and row offsets produced by a single step.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Neighbouring cell in `direction`, if it lies inside a `columns × rows` grid.
    #[must_use]
    pub fn step(self, direction: Direction, columns: u32, rows: u32) -> Option<CellCoord> {
        let (dc, dr) = direction.offset();
        let column = self.column.checked_add_signed(dc)?;
        let row = self.row.checked_add_signed(dr)?;
        if column < columns && row < rows {
            Some(CellCoord::new(column, row))
        } else {
            None
        }
    }
}

/// Range of grid cells overlapped by an axis-aligned box.
///
/// Bounds are inclusive and signed: a value of `-1` or one equal to the grid
/// dimension means the box reaches outside the grid on that side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellSpan {
    col_low: i32,
    col_high: i32,
    row_low: i32,
    row_high: i32,
}

impl CellSpan {
    /// Creates a span from inclusive column and row bounds.
    #[must_use]
    pub const fn new(col_low: i32, col_high: i32, row_low: i32, row_high: i32) -> Self {
        Self {
            col_low,
            col_high,
            row_low,
            row_high,
        }
    }

    /// Span covering exactly one cell.
    #[must_use]
    pub const fn single(cell: CellCoord) -> Self {
        let column = cell.column() as i32;
        let row = cell.row() as i32;
        Self::new(column, column, row, row)
    }

    /// Lowest column overlapped.
    #[must_use]
    pub const fn col_low(&self) -> i32 {
        self.col_low
    }

    /// Highest column overlapped.
    #[must_use]
    pub const fn col_high(&self) -> i32 {
        self.col_high
    }

    /// Lowest (northernmost) row overlapped.
    #[must_use]
    pub const fn row_low(&self) -> i32 {
        self.row_low
    }

    /// Highest (southernmost) row overlapped.
    #[must_use]
    pub const fn row_high(&self) -> i32 {
        self.row_high
    }

    /// Reports whether both spans overlap exactly the same cells.
    #[must_use]
    pub fn same_cells(&self, other: &CellSpan) -> bool {
        self == other
    }

    /// Reports whether the span covers `cell` and nothing else.
    ///
    /// Both the low and the high bound of each axis must equal the cell.
    #[must_use]
    pub fn covers_exactly(&self, cell: CellCoord) -> bool {
        self.same_cells(&CellSpan::single(cell))
    }

    /// Reports whether every bound lies inside a `columns × rows` grid.
    #[must_use]
    pub fn is_within(&self, columns: u32, rows: u32) -> bool {
        let columns = i64::from(columns);
        let rows = i64::from(rows);
        i64::from(self.col_low) >= 0
            && i64::from(self.row_low) >= 0
            && i64::from(self.col_high) < columns
            && i64::from(self.row_high) < rows
    }

    /// Classifies how many cell boundaries the span crosses.
    #[must_use]
    pub fn straddle(&self) -> Straddle {
        let columns = i64::from(self.col_high) - i64::from(self.col_low);
        let rows = i64::from(self.row_high) - i64::from(self.row_low);
        match (columns, rows) {
            (0, 0) => Straddle::Single,
            (1, 0) => Straddle::Columns,
            (0, 1) => Straddle::Rows,
            (1, 1) => Straddle::Both,
            _ => Straddle::Wide,
        }
    }

    /// The single cell covered by the span, if it covers exactly one in-grid cell.
    #[must_use]
    pub fn single_cell(&self) -> Option<CellCoord> {
        if self.straddle() != Straddle::Single {
            return None;
        }
        let column = u32::try_from(self.col_low).ok()?;
        let row = u32::try_from(self.row_low).ok()?;
        Some(CellCoord::new(column, row))
    }

    /// Iterates the non-negative cells of the span in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.col_low.max(0)..=self.col_high;
        (self.row_low.max(0)..=self.row_high).flat_map(move |row| {
            columns
                .clone()
                .map(move |column| CellCoord::new(column as u32, row as u32))
        })
    }
}

/// How a footprint sits relative to the cell boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Straddle {
    /// The footprint fits inside one cell.
    Single,
    /// The footprint crosses one column boundary.
    Columns,
    /// The footprint crosses one row boundary.
    Rows,
    /// The footprint crosses one boundary on each axis and touches four cells.
    Both,
    /// The footprint spans more than two cells on at least one axis.
    Wide,
}

/// Reasons a movement request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum MoveError {
    /// The candidate footprint reaches outside the grid.
    #[error("footprint leaves the grid")]
    OutOfBounds,
    /// A wall separates two cells overlapped by the candidate footprint.
    #[error("wall between {from:?} and {to:?}")]
    Wall {
        /// Cell on one side of the wall.
        from: CellCoord,
        /// Cell on the other side of the wall.
        to: CellCoord,
    },
    /// The footprint is wider than two cells and cannot pass any doorway.
    #[error("footprint spans more than two cells")]
    Oversized,
}

/// Ways a session can end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The player finished every task and reached the goal.
    Win,
    /// The bot caught the player.
    Lose,
    /// The countdown ran out.
    Timeout,
}

/// Kinds of ephemeral spawns released by the powerup marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpawnKind {
    /// Awards points when collected.
    Beneficial,
    /// Costs points when collected.
    Harmful,
}

impl SpawnKind {
    /// Score change applied when a spawn of this kind is collected.
    #[must_use]
    pub const fn score_delta(self) -> i32 {
        match self {
            Self::Beneficial => 10,
            Self::Harmful => -10,
        }
    }
}

/// Stationary objective markers placed when the session starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Cell the player must reach once every task is complete.
    Goal,
    /// Cell that removes the bot when the player stands on it.
    BotKill,
    /// Cell that releases ephemeral spawns when the player stands on it.
    Powerup,
}

/// Visual state of an actor or marker, resolved to a colour by renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Paint {
    /// Retired element; renderers skip it.
    Dead,
    /// Drawn at its base colour.
    FullBright,
    /// Faded according to its maze distance from the player.
    Graded(u32),
}

impl Paint {
    /// Scale factor applied to the element's base colour.
    ///
    /// Graded paints fade linearly as `max(0, 1 - gradient_factor * distance)`.
    #[must_use]
    pub fn intensity(self, gradient_factor: f32) -> f32 {
        match self {
            Self::Dead => 0.0,
            Self::FullBright => 1.0,
            Self::Graded(distance) => (1.0 - gradient_factor * distance as f32).max(0.0),
        }
    }
}

/// Linear RGB colour attached to geometry vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
}

impl Rgb {
    /// Creates a colour from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }
}
