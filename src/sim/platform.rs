//! Moving and one-way platforms
//!
//! Two platform flavors with very different jobs: [`MovingPlatform`] is a
//! solid box oscillating along one axis that carries whoever stands on it,
//! and [`OneWayPlatform`] is an immobile strip that only stops bodies
//! falling onto it from above.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::level::LevelError;
use crate::consts::ONE_WAY_TOLERANCE;

/// Travel axis of a moving platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Unit vector along the axis (+X right, +Y down)
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::X,
            Axis::Vertical => Vec2::Y,
        }
    }
}

/// A solid platform oscillating between `origin - range` and `origin + range`
/// along its axis
#[derive(Debug, Clone)]
pub struct MovingPlatform {
    pub body: Body,
    origin: Vec2,
    axis: Axis,
    range: f32,
    speed: f32,
    direction: f32,
}

impl MovingPlatform {
    /// Build a platform. Non-positive range or speed aborts the level load;
    /// there is no silent fallback.
    pub fn new(
        origin: Vec2,
        half: Vec2,
        axis: Axis,
        range: f32,
        speed: f32,
    ) -> Result<Self, LevelError> {
        if range <= 0.0 {
            return Err(LevelError::NonPositiveRange { range });
        }
        if speed <= 0.0 {
            return Err(LevelError::NonPositiveSpeed { speed });
        }
        let mut body = Body::new(origin, half);
        body.vel = axis.unit() * speed;
        Ok(Self {
            body,
            origin,
            axis,
            range,
            speed,
            direction: 1.0,
        })
    }

    /// Advance along the axis and flip direction on reaching the range
    /// boundary. Position is never clamped: a tick may overshoot the
    /// boundary by up to `speed * dt`, and the flipped direction walks it
    /// back on the next tick.
    pub fn advance(&mut self, dt: f32) {
        let axis = self.axis.unit();
        self.body.pos += axis * self.speed * self.direction * dt;

        let offset = (self.body.pos - self.origin).dot(axis);
        if offset * self.direction >= self.range {
            self.direction = -self.direction;
        }
        self.body.vel = axis * self.speed * self.direction;
    }

    /// Signed velocity for the current heading. Riders add exactly
    /// `velocity() * dt` on ticks where they stand on the platform.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.axis.unit() * self.speed * self.direction
    }

    /// Signed displacement from the origin along the travel axis
    #[inline]
    pub fn offset(&self) -> f32 {
        (self.body.pos - self.origin).dot(self.axis.unit())
    }
}

/// An immobile strip bodies can jump up through and land on from above.
/// `origin` is the center of the top surface.
#[derive(Debug, Clone)]
pub struct OneWayPlatform {
    origin: Vec2,
    width: f32,
}

impl OneWayPlatform {
    pub fn new(origin: Vec2, width: f32) -> Result<Self, LevelError> {
        if width <= 0.0 {
            return Err(LevelError::NonPositiveWidth { width });
        }
        Ok(Self { origin, width })
    }

    /// Y of the walkable surface
    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.width / 2.0
    }

    /// Does the body's horizontal span cross the strip?
    pub fn overlaps_span(&self, body: &Body) -> bool {
        body.right() > self.left() && body.left() < self.right()
    }

    /// Collision filter, consulted on every tick a potential contact
    /// exists (not just on first touch).
    ///
    /// Permissive in the pass-through direction: a body moving upward
    /// never collides, wherever it is. A body whose bottom edge is more
    /// than [`ONE_WAY_TOLERANCE`] below the surface arrived from below
    /// and passes too. Everything else is landing. Both comparisons keep
    /// the boundary itself on the colliding side, so a body resting
    /// exactly on the surface with zero velocity stays grounded instead
    /// of flickering.
    pub fn should_collide(&self, body: &Body) -> bool {
        if body.vel.y < 0.0 {
            return false;
        }
        if body.bottom() > self.top() + ONE_WAY_TOLERANCE {
            return false;
        }
        true
    }
}
