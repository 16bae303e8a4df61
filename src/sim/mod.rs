//! Deterministic gameplay simulation
//!
//! Every gameplay rule lives under this module, and all of it stays pure:
//! fixed timestep, seeded RNG, entities iterated in spawn order, no
//! rendering or I/O anywhere. Given the same level description and input
//! trace, a run replays tick for tick.

pub mod body;
pub mod hostile;
pub mod level;
pub mod platform;
pub mod state;
pub mod tick;

pub use body::{Body, MoveResult, Terrain};
pub use hostile::{Behavior, HopPhase, Hostile};
pub use level::{
    Goal, HostileSpawn, LevelDescription, LevelError, MovingPlatformDesc, OneWayPlatformDesc,
    StaticPlatformDesc, WorldBounds,
};
pub use platform::{Axis, MovingPlatform, OneWayPlatform};
pub use state::{Guard, Ledger, LevelState, Outcome, Pickup, PickupKind, Player};
pub use tick::{ContactOutcome, GameEvent, TickInput, tick};
