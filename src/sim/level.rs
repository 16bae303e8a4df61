//! Level descriptions
//!
//! The content layer hands the simulation one [`LevelDescription`]: plain
//! data, usually deserialized from JSON. Everything here is inert; the
//! live entities are spawned from it by `LevelState::new`, and any bad
//! parameter aborts that load with a [`LevelError`] instead of starting a
//! half-working level.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::platform::Axis;

/// Errors that abort a level load
#[derive(Debug, Error)]
pub enum LevelError {
    /// Malformed JSON, or an unknown hostile variant / goal tag
    #[error("level description does not parse: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("moving platform range must be positive, got {range}")]
    NonPositiveRange { range: f32 },
    #[error("platform speed must be positive, got {speed}")]
    NonPositiveSpeed { speed: f32 },
    #[error("one-way platform width must be positive, got {width}")]
    NonPositiveWidth { width: f32 },
    #[error("hop interval must be positive, got {interval}")]
    NonPositiveInterval { interval: f32 },
}

/// How the level is completed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Goal {
    /// Gather every collectible in the level
    CollectAll,
    /// Touch a trigger location
    ReachPoint { target: Vec2 },
}

/// A static solid box (center + full size)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StaticPlatformDesc {
    pub pos: Vec2,
    pub size: Vec2,
}

/// Oscillating platform parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MovingPlatformDesc {
    pub origin: Vec2,
    pub size: Vec2,
    pub axis: Axis,
    /// Travel distance from origin to either turnaround
    pub range: f32,
    pub speed: f32,
}

/// One-way strip; `origin` is the center of the top surface
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OneWayPlatformDesc {
    pub origin: Vec2,
    pub width: f32,
}

/// Hostile spawn: a variant tag plus that variant's parameters. An
/// unrecognized tag fails the whole load at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum HostileSpawn {
    Patrolling {
        pos: Vec2,
        /// Track extends this far to either side of the spawn point
        half_range: f32,
        speed: f32,
    },
    Hopping {
        pos: Vec2,
        /// Upward launch speed
        impulse: f32,
        /// Seconds between jumps
        interval: f32,
    },
    Flying {
        pos: Vec2,
        amplitude: f32,
        /// Angular frequency of the bob (rad/s)
        frequency: f32,
        speed: f32,
    },
}

/// Horizontal extent of the playable area. The vertical extent is open;
/// levels bound it with geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min_x: -640.0,
            max_x: 640.0,
        }
    }
}

/// Everything the simulation needs to start a level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDescription {
    /// 1-based level number, echoed in outcome events
    pub number: u32,
    pub player_spawn: Vec2,
    #[serde(default)]
    pub bounds: WorldBounds,
    #[serde(default)]
    pub static_platforms: Vec<StaticPlatformDesc>,
    #[serde(default)]
    pub moving_platforms: Vec<MovingPlatformDesc>,
    #[serde(default)]
    pub one_way_platforms: Vec<OneWayPlatformDesc>,
    /// Collectible positions
    #[serde(default)]
    pub collectibles: Vec<Vec2>,
    /// Heal pickup positions
    #[serde(default)]
    pub heal_pickups: Vec<Vec2>,
    #[serde(default)]
    pub hostiles: Vec<HostileSpawn>,
    pub goal: Goal,
    /// Seed for the per-level RNG (hop timers, flight phases). The same
    /// seed replays identically.
    #[serde(default)]
    pub seed: u64,
}

impl LevelDescription {
    /// Parse a JSON level. Structural problems (bad JSON, unknown variant
    /// or goal tags) surface here; parameter checks happen when the level
    /// is actually constructed.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }
}
