//! Oriented rectangular hit boxes.
//!
//! A box is an axis-aligned rectangle in its own local space. To test a point, the
//! four corners are carried into the point's space and the point is tested against
//! that convex quad, so the verdict doesn't depend on which shared space the caller
//! picks (scene, projectile-local or effector-local).

use bevy::math::Affine2;
use bevy::prelude::*;

/// Tolerance for points lying on an edge after a round trip through transforms.
const EDGE_EPSILON: f32 = 1e-5;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HitBox {
    pub half_size: Vec2,
}

impl HitBox {
    pub fn new(half_size: Vec2) -> Self {
        Self {
            half_size: half_size.abs(),
        }
    }

    #[inline]
    pub fn contains_local(&self, p: Vec2) -> bool {
        p.x.abs() <= self.half_size.x && p.y.abs() <= self.half_size.y
    }

    /// Corners in counter-clockwise local order, mapped through `to_space`.
    pub fn corners(&self, to_space: Affine2) -> [Vec2; 4] {
        let h = self.half_size;
        [
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
        ]
        .map(|c| to_space.transform_point2(c))
    }

    /// Whether `point`, given in the space described by `space_to_world`, lies in the
    /// box placed in the world by `box_to_world`.
    pub fn contains_in_space(&self, box_to_world: Affine2, point: Vec2, space_to_world: Affine2) -> bool {
        let box_to_space = space_to_world.inverse() * box_to_world;
        point_in_convex_quad(&self.corners(box_to_space), point)
    }
}

/// Works for either winding; a mirrored transform flips it.
fn point_in_convex_quad(quad: &[Vec2; 4], p: Vec2) -> bool {
    if !p.is_finite() || quad.iter().any(|c| !c.is_finite()) {
        return false;
    }

    let area2 = (quad[1] - quad[0]).perp_dot(quad[2] - quad[0]);
    if area2.abs() <= f32::EPSILON {
        return false;
    }
    let winding = area2.signum();
    let scale = quad[0].distance(quad[2]).max(1.0);

    (0..4).all(|i| {
        let a = quad[i];
        let b = quad[(i + 1) % 4];
        // Normalised so the tolerance is a distance, not an area.
        let edge = b - a;
        let side = edge.perp_dot(p - a) / edge.length().max(f32::EPSILON);
        side * winding >= -EDGE_EPSILON * scale
    })
}
