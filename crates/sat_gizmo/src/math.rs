//! Ray and plane primitives for resolving pointer rays into world points.
//!
//! Vectors and quaternions come from `glam`; this module only adds the two
//! shapes the control units intersect against.

use glam::Vec3;

/// Tolerance below which a ray is treated as parallel to a plane.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// A half-infinite ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray. The direction is normalized; a zero direction stays zero
    /// and never intersects anything.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray parameter where the ray meets `plane`, if it does so in front of
    /// the origin.
    ///
    /// A ray lying inside the plane reports `Some(0.0)`; a ray parallel to
    /// the plane but off it reports `None`.
    pub fn distance_to_plane(&self, plane: &Plane) -> Option<f32> {
        let denominator = plane.normal.dot(self.direction);
        if denominator.abs() < PARALLEL_EPSILON {
            if plane.distance_to_point(self.origin).abs() < PARALLEL_EPSILON {
                return Some(0.0);
            }
            return None;
        }

        let t = -(self.origin.dot(plane.normal) + plane.constant) / denominator;
        (t >= 0.0).then_some(t)
    }

    /// World point where the ray meets `plane`.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Vec3> {
        self.distance_to_plane(plane).map(|t| self.at(t))
    }

    /// Closest approach between the ray and the segment `start..end`.
    ///
    /// Returns `(distance, t)` where `distance` is the gap between the two
    /// closest points and `t` the ray parameter of the point on the ray.
    pub fn distance_to_segment(&self, start: Vec3, end: Vec3) -> (f32, f32) {
        let d1 = self.direction;
        let d2 = end - start;
        let r = self.origin - start;

        let a = d1.dot(d1);
        let e = d2.dot(d2);
        let f = d2.dot(r);

        if a < PARALLEL_EPSILON {
            // Degenerate ray: distance from its origin to the segment.
            let s = if e < PARALLEL_EPSILON { 0.0 } else { (-f / e).clamp(0.0, 1.0) };
            return ((start + d2 * s - self.origin).length(), 0.0);
        }

        let b = d1.dot(d2);
        let c = d1.dot(r);

        let s = if e < PARALLEL_EPSILON {
            0.0
        } else {
            let denominator = a * e - b * b;
            let t = if denominator > PARALLEL_EPSILON {
                ((b * f - c * e) / denominator).max(0.0)
            } else {
                0.0
            };
            ((b * t + f) / e).clamp(0.0, 1.0)
        };
        let t = ((b * s - c) / a).max(0.0);

        let on_ray = self.at(t);
        let on_segment = start + d2 * s;
        ((on_ray - on_segment).length(), t)
    }
}

/// An infinite plane `normal . p + constant = 0` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    pub fn new(normal: Vec3, constant: f32) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            constant,
        }
    }

    /// Plane with the given normal passing through `point`.
    pub fn from_normal_and_coplanar_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            constant: -point.dot(normal),
        }
    }

    /// Signed distance from `point` to the plane.
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.distance_to_point(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_ray_hits_plane_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -2.0));
        let plane = Plane::new(Vec3::Z, 0.0);

        let hit = ray.intersect_plane(&plane).expect("ray should hit the plane");
        assert!(hit.abs_diff_eq(Vec3::ZERO, EPSILON));
        assert!(approx_eq(ray.distance_to_plane(&plane).unwrap_or(-1.0), 5.0));
    }

    #[test]
    fn test_ray_misses_plane_behind() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        let plane = Plane::new(Vec3::Z, 0.0);
        assert!(ray.intersect_plane(&plane).is_none());
    }

    #[test]
    fn test_parallel_ray() {
        let plane = Plane::new(Vec3::Y, 0.0);

        let off_plane = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(off_plane.intersect_plane(&plane).is_none());

        let in_plane = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::X);
        assert_eq!(in_plane.distance_to_plane(&plane), Some(0.0));
    }

    #[test]
    fn test_plane_through_point() {
        let point = Vec3::new(1.0, 2.0, 3.0);
        let plane = Plane::from_normal_and_coplanar_point(Vec3::new(0.0, 2.0, 0.0), point);

        assert!(approx_eq(plane.normal.length(), 1.0));
        assert!(approx_eq(plane.distance_to_point(point), 0.0));
        assert!(approx_eq(plane.distance_to_point(Vec3::new(0.0, 5.0, 0.0)), 3.0));

        let projected = plane.project_point(Vec3::new(4.0, 9.0, -1.0));
        assert!(projected.abs_diff_eq(Vec3::new(4.0, 2.0, -1.0), EPSILON));
    }

    #[test]
    fn test_distance_to_segment_crossing() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let (distance, t) = ray.distance_to_segment(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(approx_eq(distance, 0.0));
        assert!(approx_eq(t, 5.0));
    }

    #[test]
    fn test_distance_to_segment_past_end() {
        // Ray passes beside the segment's end point.
        let ray = Ray::new(Vec3::new(3.0, 0.5, 5.0), Vec3::NEG_Z);
        let (distance, _) = ray.distance_to_segment(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        let expected = Vec3::new(1.0, 0.5, 0.0).length();
        assert!(approx_eq(distance, expected));
    }

    #[test]
    fn test_distance_to_parallel_segment() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        let (distance, _) = ray.distance_to_segment(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        assert!(approx_eq(distance, 1.0));
    }
}
