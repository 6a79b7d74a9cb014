//! Translation within a plane.

use glam::{Quat, Vec3};

use crate::control::{parent_rotation, ControlDelta, ControlHit, ControlPart, ControlUnit, ParentTransform, UnitId};
use crate::math::{Plane, Ray};

/// Side length of the square handle.
pub const QUAD_SIZE: f32 = 0.5;

/// Square handle that moves its parent freely within the plane orthogonal to
/// its normal.
#[derive(Debug, Clone)]
pub struct TranslationPlane {
    id: UnitId,
    normal: Vec3,
    color: [u8; 3],
    /// Rotation taking the quad's +Z onto `normal`.
    orientation: Quat,
    highlighted: bool,
    parent: Option<ParentTransform>,
}

impl TranslationPlane {
    pub fn new(id: UnitId, normal: Vec3, color: [u8; 3]) -> Self {
        let normal = match normal.try_normalize() {
            Some(normal) => normal,
            None => {
                log::warn!("Plane unit {} built with a zero normal, using +Z", id);
                Vec3::Z
            }
        };

        Self {
            id,
            normal,
            color,
            orientation: Quat::from_rotation_arc(Vec3::Z, normal),
            highlighted: false,
            parent: None,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Constraint normal, rotated into the parent's frame when `local`.
    pub fn constraint_normal(&self, local: bool) -> Vec3 {
        if local {
            parent_rotation(self.parent.as_ref()) * self.normal
        } else {
            self.normal
        }
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }
}

impl ControlUnit for TranslationPlane {
    fn id(&self) -> UnitId {
        self.id
    }

    /// The caller's drag plane is ignored: the unit builds its own plane
    /// through `old_hit` with its normal.
    fn compute_delta(&self, old_hit: Vec3, ray: &Ray, _drag_plane: &Plane, local: bool) -> ControlDelta {
        let plane = Plane::from_normal_and_coplanar_point(self.constraint_normal(local), old_hit);

        match ray.intersect_plane(&plane) {
            Some(new_hit) => ControlDelta::translation(new_hit - old_hit, new_hit),
            None => {
                log::debug!("Plane {}: pointer ray misses the constraint plane", self.id);
                ControlDelta::none(old_hit)
            }
        }
    }

    fn set_highlighted(&mut self, hit: Option<&ControlHit>) -> bool {
        self.highlighted = hit.is_some_and(|hit| hit.unit == self.id);
        self.highlighted
    }

    fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// The quad keeps its footprint under parent scaling.
    fn update_scale(&mut self, _world_scale: Vec3) {}

    fn raycast(&self, ray: &Ray, origin: Vec3) -> Option<ControlHit> {
        let world_orientation = parent_rotation(self.parent.as_ref()) * self.orientation;
        let plane = Plane::from_normal_and_coplanar_point(world_orientation * Vec3::Z, origin);

        let t = ray.distance_to_plane(&plane)?;
        let local = world_orientation.inverse() * (ray.at(t) - origin);
        let half = QUAD_SIZE * 0.5;

        (local.x.abs() <= half && local.y.abs() <= half).then_some(ControlHit {
            unit: self.id,
            part: ControlPart::Quad,
            distance: t,
        })
    }

    fn set_parent(&mut self, parent: Option<ParentTransform>) {
        self.parent = parent;
    }

    fn parent(&self) -> Option<&ParentTransform> {
        self.parent.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_normal_is_normalized() {
        let plane = TranslationPlane::new(1, Vec3::new(0.0, 0.0, 2.0), [0, 0, 255]);
        assert_eq!(plane.normal(), Vec3::Z);
        assert!((plane.orientation() * Vec3::Z).abs_diff_eq(Vec3::Z, EPSILON));
    }

    #[test]
    fn test_delta_within_xy_plane() {
        let unit = TranslationPlane::new(1, Vec3::Z, [0, 0, 255]);
        let ignored = Plane::new(Vec3::X, 100.0);
        let old_hit = Vec3::new(1.0, 1.0, 2.0);
        let ray = Ray::new(Vec3::new(3.0, -1.0, 12.0), Vec3::NEG_Z);

        let delta = unit.compute_delta(old_hit, &ray, &ignored, false);
        assert!(delta.translation.abs_diff_eq(Vec3::new(2.0, -2.0, 0.0), EPSILON));
        assert!(delta.next_hit.abs_diff_eq(Vec3::new(3.0, -1.0, 2.0), EPSILON));
        assert_eq!(delta.rotation, Quat::IDENTITY);
        assert_eq!(delta.scale, Vec3::ZERO);
    }

    #[test]
    fn test_delta_orthogonal_to_normal() {
        let mut unit = TranslationPlane::new(1, Vec3::new(1.0, 1.0, 0.0), [0, 0, 255]);
        unit.set_parent(Some(ParentTransform::new(Quat::from_rotation_y(0.8), Vec3::ONE)));
        let drag_plane = Plane::new(Vec3::Y, 0.0);

        for local in [false, true] {
            let normal = unit.constraint_normal(local);
            for i in 0..12 {
                let angle = i as f32 * 0.5;
                let old_hit = Vec3::new(angle.cos(), 0.5 * angle, angle.sin());
                let ray = Ray::new(
                    Vec3::new(4.0 * angle.sin(), 6.0, -3.0 + angle),
                    Vec3::new(-angle.cos(), -1.0, 0.3),
                );

                let delta = unit.compute_delta(old_hit, &ray, &drag_plane, local);
                assert!(delta.translation.dot(normal).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_local_frame_follows_parent() {
        let mut unit = TranslationPlane::new(1, Vec3::Z, [0, 0, 255]);
        // Quarter turn about X maps +Z onto -Y.
        unit.set_parent(Some(ParentTransform::new(Quat::from_rotation_x(FRAC_PI_2), Vec3::ONE)));

        assert!(unit.constraint_normal(false).abs_diff_eq(Vec3::Z, EPSILON));
        assert!(unit.constraint_normal(true).abs_diff_eq(Vec3::NEG_Y, EPSILON));

        let ray = Ray::new(Vec3::new(1.0, 5.0, 2.0), Vec3::NEG_Y);
        let delta = unit.compute_delta(Vec3::ZERO, &ray, &Plane::new(Vec3::Z, 0.0), true);
        assert!(delta.translation.abs_diff_eq(Vec3::new(1.0, 0.0, 2.0), EPSILON));
    }

    #[test]
    fn test_update_scale_is_noop() {
        let mut unit = TranslationPlane::new(1, Vec3::Z, [0, 0, 255]);
        unit.set_parent(Some(ParentTransform::default()));
        let before = unit.clone();
        unit.update_scale(Vec3::new(5.0, 0.1, 2.0));
        assert_eq!(unit.orientation(), before.orientation());
        assert_eq!(unit.normal(), before.normal());
    }

    #[test]
    fn test_raycast_quad_bounds() {
        let unit = TranslationPlane::new(9, Vec3::Z, [0, 0, 255]);
        let origin = Vec3::new(1.0, 1.0, 0.0);

        let inside = Ray::new(Vec3::new(1.2, 0.8, 3.0), Vec3::NEG_Z);
        let hit = unit.raycast(&inside, origin).expect("quad should be hit");
        assert_eq!(hit.unit, 9);
        assert!(approx_eq(hit.distance, 3.0));

        let outside = Ray::new(Vec3::new(1.3, 1.0, 3.0), Vec3::NEG_Z);
        assert!(unit.raycast(&outside, origin).is_none());
    }
}
