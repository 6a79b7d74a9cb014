//! Control units for 3D transform gizmos.
//!
//! A control unit is one constrained degree of freedom attached to a
//! transformable object: an axis arrow moves the object along a line, a plane
//! handle moves it within a plane. Each unit turns a pointer ray into a
//! translation delta that an outer composition step applies to the object.
//!
//! ```
//! use sat_gizmo::{ControlUnit, Plane, Ray, TranslationAxis};
//! use glam::Vec3;
//!
//! let axis = TranslationAxis::new(0, Vec3::X, [255, 0, 0]);
//! let drag_plane = Plane::new(Vec3::Z, 0.0);
//! let ray = Ray::new(Vec3::new(2.0, 1.0, 5.0), Vec3::NEG_Z);
//!
//! let delta = axis.compute_delta(Vec3::ZERO, &ray, &drag_plane, true);
//! assert!(delta.translation.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));
//! ```

pub mod axis;
pub mod control;
pub mod math;
pub mod plane;

pub use axis::TranslationAxis;
pub use control::{
    nearest_hit, Control, ControlDelta, ControlHit, ControlPart, ControlUnit, ParentTransform, UnitId,
    HIGHLIGHT_OPACITY, IDLE_OPACITY,
};
pub use math::{Plane, Ray};
pub use plane::TranslationPlane;

pub use glam;
