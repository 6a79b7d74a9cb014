//! Translation along a single axis.

use glam::{Quat, Vec3};

use crate::control::{parent_rotation, ControlDelta, ControlHit, ControlPart, ControlUnit, ParentTransform, UnitId};
use crate::math::{Plane, Ray};

/// Default arrowhead size relative to the unit length of the gizmo.
pub const DEFAULT_CONE_SIZE: f32 = 0.15;

/// Distance from the origin to the arrowhead before any scale correction.
pub const BASE_AXIS_LENGTH: f32 = 0.75;

/// How close a ray must pass to the shaft to count as a hit.
pub const LINE_PICK_RADIUS: f32 = 0.05;

/// Height of the cone mesh relative to its size.
const CONE_HEIGHT_RATIO: f32 = 1.2;

/// Arrow handle that moves its parent along one direction.
///
/// The direction is fixed at construction. Drawn as a shaft from the origin
/// along the direction, capped with a cone.
#[derive(Debug, Clone)]
pub struct TranslationAxis {
    id: UnitId,
    /// Unit direction, 180 degree symmetric.
    direction: Vec3,
    color: [u8; 3],
    cone_size: f32,
    /// Rotation taking the mesh's +Y onto `direction`.
    orientation: Quat,
    line_length: f32,
    cone_offset: f32,
    highlighted: bool,
    parent: Option<ParentTransform>,
}

impl TranslationAxis {
    pub fn new(id: UnitId, direction: Vec3, color: [u8; 3]) -> Self {
        Self::with_cone_size(id, direction, color, DEFAULT_CONE_SIZE)
    }

    pub fn with_cone_size(id: UnitId, direction: Vec3, color: [u8; 3], cone_size: f32) -> Self {
        let direction = match direction.try_normalize() {
            Some(direction) => direction,
            None => {
                log::warn!("Axis unit {} built with a zero direction, using +Y", id);
                Vec3::Y
            }
        };

        Self {
            id,
            direction,
            color,
            cone_size,
            orientation: Quat::from_rotation_arc(Vec3::Y, direction),
            line_length: BASE_AXIS_LENGTH - cone_size,
            cone_offset: BASE_AXIS_LENGTH,
            highlighted: false,
            parent: None,
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Direction after applying the parent's world rotation.
    pub fn world_direction(&self) -> Vec3 {
        parent_rotation(self.parent.as_ref()) * self.direction
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Rendered shaft length along the direction.
    pub fn line_length(&self) -> f32 {
        self.line_length
    }

    /// Distance of the arrowhead's center from the origin.
    pub fn cone_offset(&self) -> f32 {
        self.cone_offset
    }

    pub fn cone_size(&self) -> f32 {
        self.cone_size
    }
}

impl ControlUnit for TranslationAxis {
    fn id(&self) -> UnitId {
        self.id
    }

    /// The axis is always local: the direction follows the parent's rotation
    /// whatever `local` says.
    fn compute_delta(&self, old_hit: Vec3, ray: &Ray, drag_plane: &Plane, _local: bool) -> ControlDelta {
        let direction = self.world_direction();

        let Some(new_hit) = ray.intersect_plane(drag_plane) else {
            log::debug!("Axis {}: pointer ray misses the drag plane", self.id);
            return ControlDelta::none(old_hit);
        };

        let projection_length = (new_hit - old_hit).dot(direction);
        let delta = direction * projection_length;

        ControlDelta::translation(delta, old_hit + delta)
    }

    fn set_highlighted(&mut self, hit: Option<&ControlHit>) -> bool {
        // Line and cone hits both carry this unit's id.
        self.highlighted = hit.is_some_and(|hit| hit.unit == self.id);
        self.highlighted
    }

    fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Stretch the arrow to follow non-uniform parent scaling. Only applies
    /// while attached to a parent.
    fn update_scale(&mut self, world_scale: Vec3) {
        if self.parent.is_none() {
            return;
        }

        let new_length = self.direction.dot(world_scale).abs() * BASE_AXIS_LENGTH;
        self.line_length = new_length;
        self.cone_offset = new_length;
    }

    /// Pick extents follow the scale-corrected length from
    /// [`update_scale`](ControlUnit::update_scale). The shaft radius and cone
    /// size stay at their drawn thickness, which parent scaling never changes.
    fn raycast(&self, ray: &Ray, origin: Vec3) -> Option<ControlHit> {
        let direction = self.world_direction();

        let half_cone = self.cone_size * CONE_HEIGHT_RATIO * 0.5;
        let cone_start = origin + direction * (self.cone_offset - half_cone);
        let cone_end = origin + direction * (self.cone_offset + half_cone);
        let (cone_gap, cone_t) = ray.distance_to_segment(cone_start, cone_end);
        if cone_gap <= self.cone_size {
            return Some(ControlHit {
                unit: self.id,
                part: ControlPart::Cone,
                distance: cone_t,
            });
        }

        let (line_gap, line_t) = ray.distance_to_segment(origin, origin + direction * self.line_length);
        (line_gap <= LINE_PICK_RADIUS).then_some(ControlHit {
            unit: self.id,
            part: ControlPart::Line,
            distance: line_t,
        })
    }

    fn set_parent(&mut self, parent: Option<ParentTransform>) {
        self.parent = parent;
    }

    fn parent(&self) -> Option<&ParentTransform> {
        self.parent.as_ref()
    }
}
