//! Math utilities and helpers.

use crate::types::Axis;
use glam::Vec3;

/// Ray for picking operations.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Ray direction (normalized, or zero for a degenerate ray)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is normalized; a zero direction
    /// yields a ray that hits nothing.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get a point along the ray at distance t
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a ray/box face test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Face through which the ray enters the box
    pub axis: Axis,
    /// World-space entry point
    pub point: Vec3,
    /// Parametric distance along the ray to `point`
    pub t: f32,
}

/// Axis-Aligned Bounding Box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB for a unit cube at the given position
    #[inline]
    pub fn unit_cube(pos: Vec3) -> Self {
        Self {
            min: pos,
            max: pos + Vec3::ONE,
        }
    }

    /// Slab test returning the face through which `ray` enters the box.
    ///
    /// Each axis contributes a parametric interval `[t_near, t_far]`; the ray
    /// hits when the intersection of the three intervals is non-empty and lies
    /// in front of the origin. The entry face belongs to the axis with the
    /// largest `t_near`, with X winning over Y and Y over Z on ties. An axis
    /// the ray runs parallel to only constrains the hit if the origin lies
    /// outside that slab.
    ///
    /// A ray starting inside the box does not enter it through any face and
    /// returns `None`.
    pub fn hit_face(&self, ray: &Ray) -> Option<RayHit> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut entry: Option<Axis> = None;

        for component in 0..3 {
            let origin = ray.origin[component];
            let dir = ray.direction[component];
            let lo = self.min[component];
            let hi = self.max[component];

            if dir == 0.0 {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let t_lo = (lo - origin) / dir;
            let t_hi = (hi - origin) / dir;
            let (t_near, t_far, positive) = if t_lo < t_hi {
                (t_lo, t_hi, false)
            } else {
                (t_hi, t_lo, true)
            };

            if t_near > t_enter {
                t_enter = t_near;
                entry = Some(Axis::from_component(component, positive));
            }
            t_exit = t_exit.min(t_far);
        }

        let axis = entry?;
        if t_enter > t_exit || t_enter < 0.0 {
            return None;
        }

        // Snap the entry coordinate onto its plane so callers see an exact face point.
        let mut point = ray.at(t_enter);
        let component = axis.component();
        point[component] = if axis.is_positive() {
            self.max[component]
        } else {
            self.min[component]
        };

        Some(RayHit {
            axis,
            point,
            t: t_enter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(5.0), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn ray_direction_is_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 4.0));
        assert_relative_eq!(ray.direction.length(), 1.0);
    }

    #[test]
    fn hit_face_from_each_side() {
        let aabb = Aabb::unit_cube(Vec3::ZERO);
        let center = Vec3::splat(0.5);
        for axis in Axis::ALL {
            let origin = center + axis.normal() * 5.0;
            let ray = Ray::new(origin, -axis.normal());
            let hit = aabb.hit_face(&ray).expect("ray aimed at the box must hit");
            assert_eq!(hit.axis, axis);
            assert_relative_eq!(hit.t, 4.5);
            assert_relative_eq!(hit.point.distance(center), 0.5);
        }
    }

    #[test]
    fn hit_face_misses() {
        let aabb = Aabb::unit_cube(Vec3::ZERO);

        // Parallel to X, outside the Y slab
        let ray = Ray::new(Vec3::new(-1.0, 2.0, 0.5), Vec3::X);
        assert!(aabb.hit_face(&ray).is_none());

        // Pointing away from the box
        let ray = Ray::new(Vec3::new(-1.0, 0.5, 0.5), Vec3::NEG_X);
        assert!(aabb.hit_face(&ray).is_none());

        // Diagonal passing beside the box
        let ray = Ray::new(Vec3::new(-1.0, 3.0, 0.5), Vec3::new(1.0, -0.2, 0.0));
        assert!(aabb.hit_face(&ray).is_none());

        // Degenerate direction
        let ray = Ray::new(Vec3::splat(-1.0), Vec3::ZERO);
        assert!(aabb.hit_face(&ray).is_none());
    }

    #[test]
    fn hit_face_origin_between_opposing_faces() {
        // Origin sits inside the Y and Z slabs but well above on X. A per-axis
        // nearest-plane test misclassifies this layout; the slab test must not.
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let ray = Ray::new(Vec3::new(0.5, 3.0, 0.9), Vec3::new(0.1, -1.0, -0.2));
        let hit = aabb.hit_face(&ray).expect("hit");
        assert_eq!(hit.axis, Axis::PosY);
        assert_relative_eq!(hit.point.y, 1.0);
        assert!(hit.point.cmpge(aabb.min).all() && hit.point.cmple(aabb.max).all());
    }

    #[test]
    fn hit_face_oblique_entry_picks_latest_slab() {
        // Enters the X slab at t=1 but the Y slab only at t=2: the +Y face wins.
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let ray = Ray {
            origin: Vec3::new(-1.0, 3.0, 0.5),
            direction: Vec3::new(1.0, -1.0, 0.0),
        };
        let hit = aabb.hit_face(&ray).expect("hit");
        assert_eq!(hit.axis, Axis::PosY);
        assert_relative_eq!(hit.t, 2.0);
        assert_relative_eq!(hit.point.x, 1.0);
    }

    #[test]
    fn hit_face_edge_tie_prefers_x() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let ray = Ray {
            origin: Vec3::new(-1.0, -1.0, 0.5),
            direction: Vec3::new(1.0, 1.0, 0.0),
        };
        let hit = aabb.hit_face(&ray).expect("hit");
        assert_eq!(hit.axis, Axis::NegX);
    }

    #[test]
    fn hit_face_from_inside_is_none() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let ray = Ray::new(Vec3::splat(0.5), Vec3::X);
        assert!(aabb.hit_face(&ray).is_none());
    }
}
