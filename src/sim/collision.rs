//! Collision detection and response
//!
//! Ball-ball contacts swap the normal velocity components of two equal-mass
//! balls. Ball-cushion contacts reflect the perpendicular component, or pocket
//! the ball when it meets a rail inside a pocket zone.

use glam::Vec2;

use super::ball::Ball;
use super::table::{Axis, Rail, Table};
use crate::consts::{CUSHION_DAMPING, PUSH};

/// Centre distances below this are treated as coincident
const COINCIDENT_EPS: f32 = 1e-6;

/// Result of a ball-ball overlap test
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the balls touch or overlap
    pub hit: bool,
    /// Unit normal pointing from the second ball toward the first
    pub normal: Vec2,
    /// Overlap along the normal (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check whether two balls touch. Contact fires when the centre distance is
/// at most the sum of the radii. Coincident centres get a fixed `+x` normal
/// so the pair is still pushed apart deterministically.
pub fn ball_ball_contact(a_pos: Vec2, b_pos: Vec2, contact_dist: f32) -> CollisionResult {
    let delta = a_pos - b_pos;
    let dist = delta.length();

    if dist > contact_dist {
        return CollisionResult::miss();
    }

    let normal = if dist > COINCIDENT_EPS {
        delta / dist
    } else {
        Vec2::X
    };

    CollisionResult {
        hit: true,
        normal,
        penetration: contact_dist - dist,
    }
}

/// Resolve a contact between two balls. Returns true if they touched.
///
/// Both balls are pushed apart by half the overlap, then exchange the
/// velocity components along the line of centres. Tangential components are
/// left alone. Both balls end up flagged as moving.
pub fn resolve_ball_ball(a: &mut Ball, b: &mut Ball) -> bool {
    let contact = ball_ball_contact(a.pos, b.pos, a.radius + b.radius);
    if !contact.hit {
        return false;
    }

    let un = contact.normal;
    let ut = Vec2::new(-un.y, un.x);

    // Minimum translation, split between the two
    let mtd = un * contact.penetration;
    a.pos += mtd / 2.0;
    b.pos -= mtd / 2.0;

    let v1n = a.vel.dot(un);
    let v1t = a.vel.dot(ut);
    let v2n = b.vel.dot(un);
    let v2t = b.vel.dot(ut);

    a.vel = v2n * un + v1t * ut;
    b.vel = v1n * un + v2t * ut;

    a.moving = true;
    b.moving = true;
    true
}

/// Test every pair of balls on the table once, in roster order, and resolve
/// the ones in contact. Pairs where neither ball is moving are skipped, so a
/// settled rack stays settled. Returns the ids of each pair that touched.
pub fn resolve_all_pairs(balls: &mut [Ball]) -> Vec<(u32, u32)> {
    let mut contacts = Vec::new();
    let n = balls.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let (left, right) = balls.split_at_mut(j);
            let a = &mut left[i];
            let b = &mut right[0];

            if a.pocketed || b.pocketed || !(a.moving || b.moving) {
                continue;
            }
            if resolve_ball_ball(a, b) {
                contacts.push((a.id, b.id));
            }
        }
    }

    contacts
}

/// What happened when a ball was checked against the cushions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CushionOutcome {
    /// No rail touched
    Clear,
    /// Bounced off at least one rail
    Bounced,
    /// Dropped into a pocket on this rail
    Pocketed(Rail),
}

/// Resolve a ball against the four rails. Rails are checked top, right,
/// bottom, left. A rail touched inside an active pocket zone pockets the
/// ball and ends the check. Otherwise the perpendicular velocity component
/// is negated and the ball is put back `radius + PUSH` inside the rail. Any
/// bounce costs extra energy on top of rolling friction.
pub fn resolve_ball_table(ball: &mut Ball, table: &Table) -> CushionOutcome {
    if !ball.moving || ball.pocketed {
        return CushionOutcome::Clear;
    }

    let mut bounced = false;

    for rail in [Rail::Top, Rail::Right, Rail::Bottom, Rail::Left] {
        if table.depth_from_rail(rail, ball.pos) > ball.radius {
            continue;
        }

        if table.in_pocket(rail, ball.pos) {
            ball.pocket();
            return CushionOutcome::Pocketed(rail);
        }

        let rest = Vec2::splat(table.rail_coordinate(rail))
            + rail.inward_normal() * (ball.radius + PUSH);
        match rail.axis() {
            Axis::X => {
                ball.vel.y = -ball.vel.y;
                ball.pos.y = rest.y;
            }
            Axis::Y => {
                ball.vel.x = -ball.vel.x;
                ball.pos.x = rest.x;
            }
        }
        bounced = true;
    }

    if bounced {
        ball.vel *= CUSHION_DAMPING;
        CushionOutcome::Bounced
    } else {
        CushionOutcome::Clear
    }
}
