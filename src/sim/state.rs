//! Live state of a level in progress
//!
//! [`LevelState`] owns every entity spawned from a [`LevelDescription`]
//! and the per-level bookkeeping (collectible ledger, outcome, clock).
//! Run-wide state (HP, checkpoints, unlocks) deliberately lives outside,
//! in [`RunState`](crate::RunState); a level borrows it during `tick` and
//! never stores it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::Body;
use super::hostile::Hostile;
use super::level::{Goal, HostileSpawn, LevelDescription, LevelError, WorldBounds};
use super::platform::{MovingPlatform, OneWayPlatform};
use crate::consts::{PICKUP_RADIUS, PLAYER_HALF_HEIGHT, PLAYER_HALF_WIDTH};
use crate::RunState;

/// Where the level run stands. Once it leaves `Playing` it never goes
/// back; a new run means a new `LevelState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    Won,
    Lost,
}

/// Damage gate on the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Guard {
    Vulnerable,
    /// Contacts are ignored until the window runs out
    Invulnerable { remaining: f32 },
}

/// The player's avatar
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    /// Standing on something this tick (solid, one-way or moving platform)
    pub grounded: bool,
    pub guard: Guard,
}

impl Player {
    fn spawn_at(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::new(PLAYER_HALF_WIDTH, PLAYER_HALF_HEIGHT)),
            grounded: false,
            guard: Guard::Vulnerable,
        }
    }
}

/// What touching a pickup grants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    /// Counts toward the collectible ledger
    Collectible,
    /// Restores one HP (wasted at full health)
    Heal,
}

/// A touchable pickup. Collection deactivates the body before any other
/// bookkeeping, so duplicate contact reports in the same tick resolve to
/// nothing.
#[derive(Debug, Clone)]
pub struct Pickup {
    pub body: Body,
    pub kind: PickupKind,
}

impl Pickup {
    fn at(pos: Vec2, kind: PickupKind) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(PICKUP_RADIUS)),
            kind,
        }
    }
}

/// Collectible progress for the level.
///
/// `collected` has exactly one writer: the pickup handler in `tick`. The
/// field stays private so nothing else can reach it, and debug builds
/// re-derive the count from the surviving pickups every tick and abort on
/// mismatch. A mismatch is a double-count bug to find, not drift to paper
/// over.
#[derive(Debug, Clone)]
pub struct Ledger {
    collected: u32,
    total: u32,
}

impl Ledger {
    fn new(total: u32) -> Self {
        Self {
            collected: 0,
            total,
        }
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Has every collectible been gathered?
    pub fn complete(&self) -> bool {
        self.collected >= self.total
    }

    /// The single authorized increment, called once per consumed
    /// collectible.
    pub(super) fn record(&mut self) {
        self.collected += 1;
    }

    /// Debug-build reconciliation against the live pickup set
    pub(super) fn debug_verify(&self, active_remaining: u32) {
        debug_assert_eq!(
            self.collected + active_remaining,
            self.total,
            "collectible ledger out of sync with the live pickups"
        );
    }
}

/// All simulation state for one level attempt
#[derive(Debug, Clone)]
pub struct LevelState {
    pub number: u32,
    pub bounds: WorldBounds,
    pub player: Player,
    pub statics: Vec<Body>,
    pub moving: Vec<MovingPlatform>,
    pub one_ways: Vec<OneWayPlatform>,
    pub hostiles: Vec<Hostile>,
    pub pickups: Vec<Pickup>,
    pub ledger: Ledger,
    pub goal: Goal,
    pub outcome: Outcome,
    /// Seconds simulated since the level started
    pub elapsed: f32,
}

impl LevelState {
    /// Spawn everything a description names. Fails fast: the first bad
    /// parameter aborts the load and no level starts.
    pub fn new(desc: &LevelDescription) -> Result<Self, LevelError> {
        let mut rng = Pcg32::seed_from_u64(desc.seed);

        let statics = desc
            .static_platforms
            .iter()
            .map(|p| Body::new(p.pos, p.size / 2.0))
            .collect();

        let mut moving = Vec::with_capacity(desc.moving_platforms.len());
        for p in &desc.moving_platforms {
            moving.push(MovingPlatform::new(
                p.origin,
                p.size / 2.0,
                p.axis,
                p.range,
                p.speed,
            )?);
        }

        let mut one_ways = Vec::with_capacity(desc.one_way_platforms.len());
        for p in &desc.one_way_platforms {
            one_ways.push(OneWayPlatform::new(p.origin, p.width)?);
        }

        let mut hostiles = Vec::with_capacity(desc.hostiles.len());
        for spawn in &desc.hostiles {
            hostiles.push(match *spawn {
                HostileSpawn::Patrolling {
                    pos,
                    half_range,
                    speed,
                } => Hostile::patrolling(pos, half_range, speed),
                HostileSpawn::Hopping {
                    pos,
                    impulse,
                    interval,
                } => {
                    if interval <= 0.0 {
                        return Err(LevelError::NonPositiveInterval { interval });
                    }
                    Hostile::hopping(pos, impulse, interval, &mut rng)
                }
                HostileSpawn::Flying {
                    pos,
                    amplitude,
                    frequency,
                    speed,
                } => Hostile::flying(pos, amplitude, frequency, speed, &mut rng),
            });
        }

        let mut pickups: Vec<Pickup> = desc
            .collectibles
            .iter()
            .map(|&pos| Pickup::at(pos, PickupKind::Collectible))
            .collect();
        pickups.extend(
            desc.heal_pickups
                .iter()
                .map(|&pos| Pickup::at(pos, PickupKind::Heal)),
        );

        let total = desc.collectibles.len() as u32;
        log::info!(
            "level {} loaded: {} platforms, {} hostiles, {} collectibles",
            desc.number,
            desc.static_platforms.len() + desc.moving_platforms.len() + desc.one_way_platforms.len(),
            hostiles.len(),
            total
        );

        Ok(Self {
            number: desc.number,
            bounds: desc.bounds,
            player: Player::spawn_at(desc.player_spawn),
            statics,
            moving,
            one_ways,
            hostiles,
            pickups,
            ledger: Ledger::new(total),
            goal: desc.goal,
            outcome: Outcome::Playing,
            elapsed: 0.0,
        })
    }

    /// Enter a level fresh: snapshot the checkpoint HP, then construct.
    pub fn start(desc: &LevelDescription, run: &mut RunState) -> Result<Self, LevelError> {
        run.save_checkpoint();
        Self::new(desc)
    }

    /// Retry after a loss (or a voluntary restart): HP rolls back to the
    /// value held on entering the level, everything else re-spawns from
    /// scratch.
    pub fn restart(desc: &LevelDescription, run: &mut RunState) -> Result<Self, LevelError> {
        run.restore_checkpoint();
        Self::new(desc)
    }

    /// Live collectibles still on the field
    pub fn active_collectibles(&self) -> u32 {
        self.pickups
            .iter()
            .filter(|p| p.kind == PickupKind::Collectible && p.body.active)
            .count() as u32
    }
}
