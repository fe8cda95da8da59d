//! # Frame
//!
//! Local orthonormal frames and rigid rotations used by the primitive
//! generators and transforms.

use config::constants::{CIRCLE_SEGMENTS, FULL_TURN_EPSILON, MIN_ARC_SEGMENTS};
use glam::{DQuat, DVec3};
use std::f64::consts::TAU;

/// Orthonormal frame with `w` along an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub origin: DVec3,
    pub u: DVec3,
    pub v: DVec3,
    pub w: DVec3,
}

impl Frame {
    /// Builds a frame around `axis` (need not be normalized).
    ///
    /// `u` is the global X axis projected into the plane normal to `axis`,
    /// falling back to Y when the axis is parallel to X. Angles measured in
    /// this frame therefore start in the XZ half-plane for vertical axes.
    ///
    /// Returns `None` for a zero axis.
    pub fn new(origin: DVec3, axis: DVec3) -> Option<Self> {
        let w = axis.try_normalize()?;
        let reference = if w.x.abs() > 0.9 { DVec3::Y } else { DVec3::X };
        let u = (reference - w * w.dot(reference)).normalize();
        let v = w.cross(u);
        Some(Self { origin, u, v, w })
    }

    /// Point at cylindrical coordinates in this frame.
    #[inline]
    pub fn at(&self, radius: f64, angle: f64, height: f64) -> DVec3 {
        self.origin + self.u * (radius * angle.cos()) + self.v * (radius * angle.sin()) + self.w * height
    }
}

/// Number of segments used to tessellate an arc of `angle` radians.
pub fn arc_segments(angle: f64) -> usize {
    let fraction = (angle.abs() / TAU).min(1.0);
    ((CIRCLE_SEGMENTS as f64 * fraction).ceil() as usize).max(MIN_ARC_SEGMENTS as usize)
}

/// Whether `angle` describes a full turn.
#[inline]
pub fn is_full_turn(angle: f64) -> bool {
    angle.abs() >= TAU - FULL_TURN_EPSILON
}

/// Rotates `p` by `angle` radians about the line through `point` along `axis`.
///
/// Returns `None` for a zero axis.
pub fn rotate_about(p: DVec3, point: DVec3, axis: DVec3, angle: f64) -> Option<DVec3> {
    let axis = axis.try_normalize()?;
    let rotation = DQuat::from_axis_angle(axis, angle);
    Some(point + rotation * (p - point))
}
