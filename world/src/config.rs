//! Session tuning values.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Largest accepted `actor_scale`.
///
/// The explorer's head rises a full actor height above its origin, so a
/// centred actor keeps `0.5 - MAX_ACTOR_SCALE` of a cell clear of the top edge.
pub const MAX_ACTOR_SCALE: f32 = 0.45;

/// Tunable parameters of a single play session.
///
/// Every field has a default so partial TOML documents are accepted.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Number of maze rows.
    pub rows: u32,
    /// Number of maze columns.
    pub columns: u32,
    /// Seed for maze generation and marker placement; random when absent.
    pub seed: Option<u64>,
    /// Length of the session countdown in seconds.
    pub countdown_secs: u64,
    /// Width of a cell in world units.
    pub cell_width: f32,
    /// Height of a cell in world units.
    pub cell_height: f32,
    /// Player speed in cells per second.
    pub player_speed: f32,
    /// Time the bot waits between consecutive steps, in milliseconds.
    pub bot_step_millis: u64,
    /// Intensity lost per hop of maze distance while the lights are off.
    pub gradient_factor: f32,
    /// Number of ephemeral spawns released by the powerup marker.
    pub spawn_batch: usize,
    /// Actor footprint relative to the size of a cell.
    pub actor_scale: f32,
    /// Whether the session starts with the lights on.
    pub lights_on: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: 25,
            columns: 25,
            seed: None,
            countdown_secs: 120,
            cell_width: 1.0,
            cell_height: 1.0,
            player_speed: 2.5,
            bot_step_millis: 450,
            gradient_factor: 0.1,
            spawn_batch: 5,
            actor_scale: 0.3,
            lights_on: true,
        }
    }
}

impl SessionConfig {
    /// Checks that the values describe a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                columns: self.columns,
            });
        }
        for (name, value) in [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
            ("player_speed", self.player_speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !(self.gradient_factor.is_finite() && self.gradient_factor >= 0.0) {
            return Err(ConfigError::NonPositive {
                name: "gradient_factor",
                value: self.gradient_factor,
            });
        }
        if !(self.actor_scale > 0.0 && self.actor_scale <= MAX_ACTOR_SCALE) {
            return Err(ConfigError::ActorScale(self.actor_scale));
        }
        if self.countdown_secs == 0 {
            return Err(ConfigError::ZeroCountdown);
        }
        Ok(())
    }

    /// Session countdown as a duration.
    #[must_use]
    pub const fn countdown(&self) -> Duration {
        Duration::from_secs(self.countdown_secs)
    }

    /// Delay between bot steps as a duration.
    #[must_use]
    pub const fn bot_step_interval(&self) -> Duration {
        Duration::from_millis(self.bot_step_millis)
    }
}

/// Reasons a session configuration is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The grid would contain no cells.
    #[error("grid must have at least one row and one column (got {rows}x{columns})")]
    EmptyGrid {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        columns: u32,
    },
    /// A size or rate that must be positive is not.
    #[error("{name} must be a positive number (got {value})")]
    NonPositive {
        /// Name of the offending field.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// Actors would not fit through a one-cell corridor.
    #[error("actor_scale must lie in (0, {max}] (got {0})", max = MAX_ACTOR_SCALE)]
    ActorScale(f32),
    /// The session would end before it starts.
    #[error("countdown_secs must be greater than zero")]
    ZeroCountdown,
}
