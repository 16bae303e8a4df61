//! Rigid-body boundary of the simulation
//!
//! Everything that moves is a [`Body`]: an axis-aligned box with a center
//! position, a velocity and an active flag. Gameplay rules only ever talk
//! to the small query surface in this file (overlap, support, standing-on,
//! solid resolution), so swapping the collision backend means re-doing this
//! module, not the rules.
//!
//! Coordinates are screen-style: +X right, +Y down. Upward motion is a
//! negative `vel.y`, gravity is a positive one.

use glam::Vec2;

use crate::aabb_overlap;
use crate::consts::{GRAVITY, STAND_TOLERANCE, TERMINAL_FALL_SPEED};

/// A moving axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Center position (world units)
    pub pos: Vec2,
    /// Velocity (world units/s)
    pub vel: Vec2,
    /// Half-extents of the box
    pub half: Vec2,
    /// Inactive bodies are invisible to every contact query
    pub active: bool,
}

impl Body {
    pub fn new(pos: Vec2, half: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            half,
            active: true,
        }
    }

    /// Y of the top edge (smaller Y is higher on screen)
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.half.y
    }

    /// Y of the bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.half.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.half.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.half.x
    }

    /// Box overlap with another body; inactive bodies never overlap
    pub fn overlaps(&self, other: &Body) -> bool {
        self.active && other.active && aabb_overlap(self.pos, self.half, other.pos, other.half)
    }

    /// Do the horizontal spans of the two boxes overlap?
    #[inline]
    pub fn spans_overlap_x(&self, other: &Body) -> bool {
        (self.pos.x - other.pos.x).abs() < self.half.x + other.half.x
    }

    /// Support test: is this body standing on `surface`?
    ///
    /// True when the horizontal spans overlap, the bottom edge sits within
    /// [`STAND_TOLERANCE`] of the surface top and the body is not moving
    /// upward. Carrying logic keys off this every tick, so the test is a
    /// pure function of the current state.
    pub fn standing_on(&self, surface: &Body) -> bool {
        self.active
            && surface.active
            && self.vel.y >= 0.0
            && self.spans_overlap_x(surface)
            && (self.bottom() - surface.top()).abs() <= STAND_TOLERANCE
    }

    /// Point containment (ledge and wall probes)
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.active
            && (point.x - self.pos.x).abs() <= self.half.x
            && (point.y - self.pos.y).abs() <= self.half.y
    }
}

/// Borrowed view of the immobile world, rebuilt per tick
pub struct Terrain<'a> {
    /// Fully solid static boxes
    pub solids: &'a [Body],
    /// Left edge of the playable area
    pub min_x: f32,
    /// Right edge of the playable area
    pub max_x: f32,
}

impl Terrain<'_> {
    /// Is there solid ground at this point? Used by ledge and wall probes.
    pub fn solid_at(&self, point: Vec2) -> bool {
        self.solids.iter().any(|b| b.contains_point(point))
    }
}

/// What a body ran into while moving this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveResult {
    /// Landed on or rests on a top surface
    pub grounded: bool,
    /// Pushed back by a wall (or world edge) on the left
    pub blocked_left: bool,
    /// Pushed back by a wall (or world edge) on the right
    pub blocked_right: bool,
    /// Bumped the underside of a solid
    pub hit_ceiling: bool,
}

/// Accelerate a body downward, capped at terminal fall speed
#[inline]
pub fn apply_gravity(body: &mut Body, dt: f32) {
    body.vel.y = (body.vel.y + GRAVITY * dt).min(TERMINAL_FALL_SPEED);
}

/// Push `body` out of `solid` along the shallow axis and update the flags.
///
/// A body overlapping near a top corner while moving up is treated as
/// separating and left alone; snapping it down would yank jumps short.
pub fn resolve_solid(body: &mut Body, solid: &Body, result: &mut MoveResult) {
    if !aabb_overlap(body.pos, body.half, solid.pos, solid.half) {
        return;
    }
    let dx = body.pos.x - solid.pos.x;
    let dy = body.pos.y - solid.pos.y;
    let pen_x = body.half.x + solid.half.x - dx.abs();
    let pen_y = body.half.y + solid.half.y - dy.abs();

    if pen_y < pen_x {
        if dy < 0.0 {
            // Body above the solid: rest on top
            if body.vel.y >= 0.0 {
                body.pos.y = solid.top() - body.half.y;
                body.vel.y = 0.0;
                result.grounded = true;
            }
        } else if body.vel.y < 0.0 {
            // Body below, moving up: head bump
            body.pos.y = solid.bottom() + body.half.y;
            body.vel.y = 0.0;
            result.hit_ceiling = true;
        }
    } else if dx < 0.0 {
        body.pos.x = solid.left() - body.half.x;
        body.vel.x = 0.0;
        result.blocked_right = true;
    } else {
        body.pos.x = solid.right() + body.half.x;
        body.vel.x = 0.0;
        result.blocked_left = true;
    }
}

/// Integrate one tick of motion and resolve against the static world.
///
/// Order: integrate velocity, clamp to the horizontal world edges, then
/// push out of each overlapping solid. The vertical extent is open; levels
/// bound it with geometry.
pub fn move_and_collide(body: &mut Body, terrain: &Terrain, dt: f32) -> MoveResult {
    let mut result = MoveResult::default();
    body.pos += body.vel * dt;

    if body.left() < terrain.min_x {
        body.pos.x = terrain.min_x + body.half.x;
        result.blocked_left = true;
    }
    if body.right() > terrain.max_x {
        body.pos.x = terrain.max_x - body.half.x;
        result.blocked_right = true;
    }

    for solid in terrain.solids {
        if solid.active {
            resolve_solid(body, solid, &mut result);
        }
    }
    result
}
