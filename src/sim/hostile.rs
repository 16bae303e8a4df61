//! Hostile entities
//!
//! Three behavior variants behind one per-tick contract: the caller hands
//! each hostile the terrain view and a dt, the hostile updates its own
//! body and internal state, and nothing else. Hostiles never read the
//! player or each other; contact consequences are the resolver's job.
//!
//! Hop timers and flight phases are seeded from the level RNG so packs of
//! the same variant drift out of sync instead of moving in lockstep.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::body::{apply_gravity, move_and_collide, Body, Terrain};
use crate::consts::{EDGE_CHECK_INTERVAL, HOP_ANTICIPATION};

/// Half-extents shared by all hostile variants
const HOSTILE_HALF: Vec2 = Vec2::new(10.0, 10.0);
/// Ledge probes sample this far below the feet
const EDGE_PROBE_DEPTH: f32 = 6.0;

/// Where a hopper is in its jump cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopPhase {
    /// On the ground, waiting out the interval
    Idle,
    /// Airborne, still rising
    Ascending,
    /// Past the apex, falling
    Descending,
}

/// Ground patrol: walk a bounded track, turn at walls and ledges
#[derive(Debug, Clone)]
pub struct Patrol {
    half_range: f32,
    speed: f32,
    direction: f32,
    edge_timer: f32,
}

/// Periodic vertical jumps with a wind-up the player can read
#[derive(Debug, Clone)]
pub struct Hop {
    impulse: f32,
    interval: f32,
    phase: HopPhase,
    timer: f32,
}

/// Airborne bobbing: direct sine placement, immune to gravity
#[derive(Debug, Clone)]
pub struct Fly {
    amplitude: f32,
    frequency: f32,
    base_elevation: f32,
    speed: f32,
    direction: f32,
    elapsed: f32,
}

/// Behavior state machine; exactly one per hostile
#[derive(Debug, Clone)]
pub enum Behavior {
    Patrol(Patrol),
    Hop(Hop),
    Fly(Fly),
}

/// A hostile entity: collision body plus behavior state
#[derive(Debug, Clone)]
pub struct Hostile {
    pub body: Body,
    /// Spawn point; patrol bounds and flight elevation derive from it
    pub spawn: Vec2,
    pub behavior: Behavior,
}

impl Hostile {
    pub fn patrolling(pos: Vec2, half_range: f32, speed: f32) -> Self {
        Self {
            body: Body::new(pos, HOSTILE_HALF),
            spawn: pos,
            behavior: Behavior::Patrol(Patrol {
                half_range,
                speed,
                direction: 1.0,
                edge_timer: 0.0,
            }),
        }
    }

    /// Hop timer starts at a random point in the interval so co-spawned
    /// hoppers desynchronize.
    pub fn hopping(pos: Vec2, impulse: f32, interval: f32, rng: &mut Pcg32) -> Self {
        Self {
            body: Body::new(pos, HOSTILE_HALF),
            spawn: pos,
            behavior: Behavior::Hop(Hop {
                impulse,
                interval,
                phase: HopPhase::Descending,
                timer: rng.random_range(0.0..interval),
            }),
        }
    }

    /// Flight phase starts at a random angle for the same reason.
    pub fn flying(pos: Vec2, amplitude: f32, frequency: f32, speed: f32, rng: &mut Pcg32) -> Self {
        Self {
            body: Body::new(pos, HOSTILE_HALF),
            spawn: pos,
            behavior: Behavior::Fly(Fly {
                amplitude,
                frequency,
                base_elevation: pos.y,
                speed,
                direction: 1.0,
                elapsed: rng.random_range(0.0..std::f32::consts::TAU),
            }),
        }
    }

    /// Advance one tick of behavior. Each variant fully owns its body for
    /// the duration of the call.
    pub fn advance(&mut self, terrain: &Terrain, dt: f32) {
        if !self.body.active {
            return;
        }
        match &mut self.behavior {
            Behavior::Patrol(p) => advance_patrol(&mut self.body, self.spawn, p, terrain, dt),
            Behavior::Hop(h) => advance_hop(&mut self.body, h, terrain, dt),
            Behavior::Fly(f) => advance_fly(&mut self.body, f, terrain, dt),
        }
    }

    /// Is a hopper telegraphing its next jump? Pure presentation hint; the
    /// physics does not change until the impulse fires.
    pub fn telegraphing(&self) -> bool {
        match &self.behavior {
            Behavior::Hop(h) => {
                h.phase == HopPhase::Idle && h.timer >= h.interval - HOP_ANTICIPATION
            }
            _ => false,
        }
    }

    /// Variant name for logs and events
    pub fn kind(&self) -> &'static str {
        match self.behavior {
            Behavior::Patrol(_) => "patrolling",
            Behavior::Hop(_) => "hopping",
            Behavior::Fly(_) => "flying",
        }
    }
}

fn advance_patrol(body: &mut Body, spawn: Vec2, p: &mut Patrol, terrain: &Terrain, dt: f32) {
    body.vel.x = p.speed * p.direction;
    apply_gravity(body, dt);
    let result = move_and_collide(body, terrain, dt);

    // Wall contact forces direction away from the wall, checked every tick
    if result.blocked_left {
        p.direction = 1.0;
    }
    if result.blocked_right {
        p.direction = -1.0;
    }

    // Range bounce: past a patrol bound and still heading outward
    let min_x = spawn.x - p.half_range;
    let max_x = spawn.x + p.half_range;
    if body.pos.x <= min_x && p.direction < 0.0 {
        p.direction = 1.0;
    }
    if body.pos.x >= max_x && p.direction > 0.0 {
        p.direction = -1.0;
    }

    // Ledge probe on a cadence, not every tick. Samples one body-width
    // ahead and just below the feet; no ground there means turn around.
    p.edge_timer -= dt;
    if p.edge_timer <= 0.0 && result.grounded {
        p.edge_timer = EDGE_CHECK_INTERVAL;
        let probe = Vec2::new(
            body.pos.x + p.direction * body.half.x * 2.0,
            body.bottom() + EDGE_PROBE_DEPTH,
        );
        if !terrain.solid_at(probe) {
            p.direction = -p.direction;
        }
    }

    // Re-apply speed after any flip so the entity never coasts on a stale
    // heading into the next tick
    body.vel.x = p.speed * p.direction;
}

fn advance_hop(body: &mut Body, h: &mut Hop, terrain: &Terrain, dt: f32) {
    h.timer += dt;
    apply_gravity(body, dt);
    let result = move_and_collide(body, terrain, dt);

    match h.phase {
        HopPhase::Idle => {
            // The impulse waits for both the timer and solid footing
            if h.timer >= h.interval && result.grounded {
                body.vel.y = -h.impulse;
                h.timer = 0.0;
                h.phase = HopPhase::Ascending;
            }
        }
        HopPhase::Ascending => {
            // Apex: vertical velocity stops being upward
            if body.vel.y >= 0.0 {
                h.phase = HopPhase::Descending;
            }
        }
        HopPhase::Descending => {
            if result.grounded {
                h.phase = HopPhase::Idle;
            }
        }
    }
}

fn advance_fly(body: &mut Body, f: &mut Fly, terrain: &Terrain, dt: f32) {
    f.elapsed += dt;

    // Elevation comes straight from the wave; integrating a velocity here
    // would accumulate drift
    body.pos.x += f.speed * f.direction * dt;
    body.pos.y = f.base_elevation + f.amplitude * (f.elapsed * f.frequency).sin();

    // Turn at world edges and at walls a probe-length ahead
    if body.left() <= terrain.min_x {
        f.direction = 1.0;
    } else if body.right() >= terrain.max_x {
        f.direction = -1.0;
    } else {
        let ahead = Vec2::new(
            body.pos.x + f.direction * (body.half.x + 2.0),
            body.pos.y,
        );
        if terrain.solid_at(ahead) {
            f.direction = -f.direction;
        }
    }

    body.vel = Vec2::new(f.speed * f.direction, 0.0);
}
