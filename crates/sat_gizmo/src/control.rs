//! The control unit capability shared by every gizmo constraint.

use glam::{Quat, Vec3};

use crate::axis::TranslationAxis;
use crate::math::{Plane, Ray};
use crate::plane::TranslationPlane;

/// Identifier used to match raycast hits back to the unit that produced them.
pub type UnitId = u32;

/// Opacity of a unit while the pointer is over it.
pub const HIGHLIGHT_OPACITY: f32 = 0.9;

/// Opacity of a unit otherwise.
pub const IDLE_OPACITY: f32 = 0.65;

/// Visual part of a control unit that a ray can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPart {
    /// Shaft of an axis arrow.
    Line,
    /// Arrowhead of an axis arrow.
    Cone,
    /// Quad of a plane handle.
    Quad,
}

/// Result of a raycast against a control unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlHit {
    pub unit: UnitId,
    pub part: ControlPart,
    /// Ray parameter of the hit, used to pick the nearest unit.
    pub distance: f32,
}

/// World rotation and scale of the object a unit is attached to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentTransform {
    pub world_rotation: Quat,
    pub world_scale: Vec3,
}

impl ParentTransform {
    pub fn new(world_rotation: Quat, world_scale: Vec3) -> Self {
        Self {
            world_rotation,
            world_scale,
        }
    }
}

impl Default for ParentTransform {
    fn default() -> Self {
        Self::new(Quat::IDENTITY, Vec3::ONE)
    }
}

/// Transform change produced by one pointer move over a control unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlDelta {
    /// Translation to apply to the parent.
    pub translation: Vec3,
    /// Rotation to apply to the parent. Identity for translation units.
    pub rotation: Quat,
    /// Scale change to apply to the parent. Zero for translation units.
    pub scale: Vec3,
    /// Hit point to pass as `old_hit` on the next call.
    pub next_hit: Vec3,
}

impl ControlDelta {
    /// Pure translation delta.
    pub fn translation(translation: Vec3, next_hit: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            scale: Vec3::ZERO,
            next_hit,
        }
    }

    /// No movement; the drag stays anchored at `hit`.
    pub fn none(hit: Vec3) -> Self {
        Self::translation(Vec3::ZERO, hit)
    }
}

/// One constrained degree-of-freedom handle of a transform gizmo.
pub trait ControlUnit {
    fn id(&self) -> UnitId;

    /// Resolve a pointer ray into a constrained transform delta.
    ///
    /// `old_hit` is the world point the drag is anchored at, `drag_plane` the
    /// plane the caller resolves screen rays against, and `local` whether the
    /// constraint follows the parent's rotation.
    fn compute_delta(&self, old_hit: Vec3, ray: &Ray, drag_plane: &Plane, local: bool) -> ControlDelta;

    /// Update the highlight from the latest hit test. Returns whether this
    /// unit is now highlighted.
    fn set_highlighted(&mut self, hit: Option<&ControlHit>) -> bool;

    fn is_highlighted(&self) -> bool;

    /// Track a change of the parent's world scale.
    fn update_scale(&mut self, world_scale: Vec3);

    /// Hit-test the unit's parts placed at world position `origin`.
    fn raycast(&self, ray: &Ray, origin: Vec3) -> Option<ControlHit>;

    fn set_parent(&mut self, parent: Option<ParentTransform>);

    fn parent(&self) -> Option<&ParentTransform>;

    fn opacity(&self) -> f32 {
        if self.is_highlighted() {
            HIGHLIGHT_OPACITY
        } else {
            IDLE_OPACITY
        }
    }
}

/// World rotation of the parent, identity when detached.
pub(crate) fn parent_rotation(parent: Option<&ParentTransform>) -> Quat {
    parent.map_or(Quat::IDENTITY, |p| p.world_rotation)
}

/// Closed set of control unit variants.
#[derive(Debug, Clone)]
pub enum Control {
    Axis(TranslationAxis),
    Plane(TranslationPlane),
}

impl From<TranslationAxis> for Control {
    fn from(axis: TranslationAxis) -> Self {
        Control::Axis(axis)
    }
}

impl From<TranslationPlane> for Control {
    fn from(plane: TranslationPlane) -> Self {
        Control::Plane(plane)
    }
}

impl ControlUnit for Control {
    fn id(&self) -> UnitId {
        match self {
            Control::Axis(axis) => axis.id(),
            Control::Plane(plane) => plane.id(),
        }
    }

    fn compute_delta(&self, old_hit: Vec3, ray: &Ray, drag_plane: &Plane, local: bool) -> ControlDelta {
        match self {
            Control::Axis(axis) => axis.compute_delta(old_hit, ray, drag_plane, local),
            Control::Plane(plane) => plane.compute_delta(old_hit, ray, drag_plane, local),
        }
    }

    fn set_highlighted(&mut self, hit: Option<&ControlHit>) -> bool {
        match self {
            Control::Axis(axis) => axis.set_highlighted(hit),
            Control::Plane(plane) => plane.set_highlighted(hit),
        }
    }

    fn is_highlighted(&self) -> bool {
        match self {
            Control::Axis(axis) => axis.is_highlighted(),
            Control::Plane(plane) => plane.is_highlighted(),
        }
    }

    fn update_scale(&mut self, world_scale: Vec3) {
        match self {
            Control::Axis(axis) => axis.update_scale(world_scale),
            Control::Plane(plane) => plane.update_scale(world_scale),
        }
    }

    fn raycast(&self, ray: &Ray, origin: Vec3) -> Option<ControlHit> {
        match self {
            Control::Axis(axis) => axis.raycast(ray, origin),
            Control::Plane(plane) => plane.raycast(ray, origin),
        }
    }

    fn set_parent(&mut self, parent: Option<ParentTransform>) {
        match self {
            Control::Axis(axis) => axis.set_parent(parent),
            Control::Plane(plane) => plane.set_parent(parent),
        }
    }

    fn parent(&self) -> Option<&ParentTransform> {
        match self {
            Control::Axis(axis) => axis.parent(),
            Control::Plane(plane) => plane.parent(),
        }
    }
}

/// Raycast every unit and return the nearest hit.
pub fn nearest_hit<'a, I>(units: I, ray: &Ray, origin: Vec3) -> Option<ControlHit>
where
    I: IntoIterator<Item = &'a Control>,
{
    units
        .into_iter()
        .filter_map(|unit| unit.raycast(ray, origin))
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_hit_and_highlight() {
        let mut units: Vec<Control> = vec![
            TranslationAxis::new(1, Vec3::X, [255, 0, 0]).into(),
            TranslationPlane::new(2, Vec3::Z, [0, 0, 255]).into(),
        ];

        // Straight down onto the XY plane, inside the quad but away from the X axis.
        let ray = Ray::new(Vec3::new(0.1, 0.15, 5.0), Vec3::NEG_Z);
        let hit = nearest_hit(&units, &ray, Vec3::ZERO).expect("plane quad should be hit");
        assert_eq!(hit.unit, 2);
        assert_eq!(hit.part, ControlPart::Quad);

        let highlighted: Vec<bool> = units.iter_mut().map(|u| u.set_highlighted(Some(&hit))).collect();
        assert_eq!(highlighted, vec![false, true]);
        assert_eq!(units[0].opacity(), IDLE_OPACITY);
        assert_eq!(units[1].opacity(), HIGHLIGHT_OPACITY);

        for unit in &mut units {
            assert!(!unit.set_highlighted(None));
        }
    }

    #[test]
    fn test_control_dispatch_parent() {
        let mut control: Control = TranslationAxis::new(7, Vec3::Y, [0, 255, 0]).into();
        assert_eq!(control.id(), 7);
        assert!(control.parent().is_none());

        control.set_parent(Some(ParentTransform::default()));
        assert_eq!(control.parent(), Some(&ParentTransform::default()));
    }
}
