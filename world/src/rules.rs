//! Scoring constants and the pure helpers behind the per-frame rules.

use std::{collections::HashSet, time::Duration};

use maze_chase_core::{CellCoord, CellSpan, SpawnKind};
use rand::Rng;

use crate::SessionError;

/// Objectives the player must complete before the goal opens.
pub const TASKS_TOTAL: u32 = 2;
/// Score awarded for removing the bot or collecting the powerup marker.
pub const TASK_REWARD: i32 = 100;
/// Score awarded for reaching the goal with every task complete.
pub const WIN_REWARD: i32 = 100;
/// Score awarded per whole second spent with the lights off.
pub const LIGHTS_OFF_REWARD: i32 = 2;

/// Ephemeral marker released by the powerup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerupSpawn {
    /// Cell the spawn occupies.
    pub cell: CellCoord,
    /// Whether collecting the spawn helps or hurts.
    pub kind: SpawnKind,
}

/// Consumes the first live spawn whose cell the player covers exactly.
///
/// The matching slot is emptied and its index returned. Further matches are
/// left for later frames.
pub fn collect_spawn(
    spawns: &mut [Option<PowerupSpawn>],
    player: CellSpan,
) -> Option<(usize, SpawnKind)> {
    let (index, slot) = spawns.iter_mut().enumerate().find(|(_, slot)| {
        slot.is_some_and(|spawn| player.covers_exactly(spawn.cell))
    })?;
    slot.take().map(|spawn| (index, spawn.kind))
}

/// Score earned with the lights off between two samples of the session clock.
///
/// Every whole second boundary crossed between `previous` and `now` is worth
/// [`LIGHTS_OFF_REWARD`], so long frames do not lose points.
#[must_use]
pub fn lights_off_award(previous: Duration, now: Duration) -> i32 {
    let crossed = now.as_secs().saturating_sub(previous.as_secs());
    i32::try_from(crossed)
        .unwrap_or(i32::MAX)
        .saturating_mul(LIGHTS_OFF_REWARD)
}

/// Draws `count` random cells that differ from each other and from `taken`.
///
/// Candidates are resampled until distinct, so the grid must hold enough free
/// cells; otherwise [`SessionError::GridTooSmall`] is returned.
pub fn place_distinct<R: Rng + ?Sized>(
    rng: &mut R,
    rows: u32,
    columns: u32,
    taken: &[CellCoord],
    count: usize,
) -> Result<Vec<CellCoord>, SessionError> {
    let cells = u64::from(rows) * u64::from(columns);
    let mut occupied: HashSet<CellCoord> = taken
        .iter()
        .copied()
        .filter(|cell| cell.column() < columns && cell.row() < rows)
        .collect();
    let free = cells.saturating_sub(occupied.len() as u64);
    if free < count as u64 {
        return Err(SessionError::GridTooSmall {
            rows,
            columns,
            required: count,
        });
    }

    let mut placed = Vec::with_capacity(count);
    while placed.len() < count {
        let candidate = CellCoord::new(rng.gen_range(0..columns), rng.gen_range(0..rows));
        if occupied.insert(candidate) {
            placed.push(candidate);
        }
    }
    Ok(placed)
}

/// Draws a spawn kind with even odds.
pub fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> SpawnKind {
    if rng.gen_bool(0.5) {
        SpawnKind::Beneficial
    } else {
        SpawnKind::Harmful
    }
}
