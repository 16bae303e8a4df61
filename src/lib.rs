//! Cliffhop - gameplay core for a 2D side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (platforms, hostiles, contact rules)
//! - `run_state`: Run-wide HP / checkpoint / level-unlock bookkeeping
//! - `settings`: Audio settings, the durable sub-record of the profile
//! - `persistence`: Single-key profile save/load behind a key-value store
//!
//! Rendering, menus, audio playback and the actual level content live
//! outside this crate. Levels come in as `sim::LevelDescription`; what
//! happened each tick goes out as `sim::GameEvent`s.

pub mod persistence;
pub mod run_state;
pub mod settings;
pub mod sim;

pub use persistence::{KeyValueStore, MemoryStore, Profile};
pub use run_state::RunState;
pub use settings::Settings;

use glam::Vec2;

/// Gameplay tuning constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Downward gravity (world units/s²; +Y points down)
    pub const GRAVITY: f32 = 1500.0;
    /// Fall speed cap
    pub const TERMINAL_FALL_SPEED: f32 = 900.0;

    /// Player collider half-extents
    pub const PLAYER_HALF_WIDTH: f32 = 10.0;
    pub const PLAYER_HALF_HEIGHT: f32 = 14.0;
    /// Horizontal run speed
    pub const PLAYER_RUN_SPEED: f32 = 140.0;
    /// Ground/air acceleration toward the target run speed
    pub const PLAYER_ACCEL: f32 = 900.0;
    /// Deceleration when no direction is held
    pub const PLAYER_DECEL: f32 = 1100.0;
    /// Upward jump impulse
    pub const PLAYER_JUMP_SPEED: f32 = 420.0;

    /// One-way platforms stop a body only while its bottom edge is within
    /// this distance below the top surface; deeper means it came from
    /// below and passes through
    pub const ONE_WAY_TOLERANCE: f32 = 8.0;
    /// Vertical slack for the standing-on test used for platform riding
    pub const STAND_TOLERANCE: f32 = 4.0;

    /// Damage per qualifying hostile contact
    pub const CONTACT_DAMAGE: u32 = 1;
    /// Knockback replaces the player's velocity with this horizontal speed...
    pub const KNOCKBACK_SPEED: f32 = 220.0;
    /// ...and this upward lift
    pub const KNOCKBACK_LIFT: f32 = 260.0;
    /// Invulnerability window opened by a hostile contact (seconds)
    pub const INVULN_DURATION: f32 = 1.2;

    /// Seconds between patroller ledge probes
    pub const EDGE_CHECK_INTERVAL: f32 = 0.15;
    /// Hopper telegraphs for this long before leaving the ground
    pub const HOP_ANTICIPATION: f32 = 0.25;

    /// Contact radius of a reach-point goal trigger
    pub const GOAL_RADIUS: f32 = 24.0;
    /// Contact half-extent of collectibles and heal pickups
    pub const PICKUP_RADIUS: f32 = 12.0;
}

/// Overlap test between two axis-aligned boxes given center + half-extents
#[inline]
pub fn aabb_overlap(center_a: Vec2, half_a: Vec2, center_b: Vec2, half_b: Vec2) -> bool {
    (center_a.x - center_b.x).abs() < half_a.x + half_b.x
        && (center_a.y - center_b.y).abs() < half_a.y + half_b.y
}

/// Move `current` toward `target` by at most `max_delta`
#[inline]
pub fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    if current < target {
        (current + max_delta).min(target)
    } else {
        (current - max_delta).max(target)
    }
}
