//! Ray queries against a snapshot of the scene.

use fetch_core::{HitTarget, Ray, RayHit, Raycast, Vec3};

/// Snapshot of the shapes a tap can land on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneGeometry {
    pub agent_center: Vec3,
    pub agent_radius: f32,
    pub ball_center: Vec3,
    pub ball_radius: f32,
    pub ground_height: f32,
    pub half_extents: Vec3,
}

impl Raycast for SceneGeometry {
    fn raycast(&self, ray: Ray) -> Option<RayHit> {
        if ray.direction == Vec3::ZERO {
            return None;
        }

        let candidates = [
            ray_sphere(&ray, self.agent_center, self.agent_radius).map(|d| (d, HitTarget::Agent)),
            ray_sphere(&ray, self.ball_center, self.ball_radius).map(|d| (d, HitTarget::Ball)),
            ray_plane(&ray, Vec3::Y, self.ground_height).map(|d| (d, HitTarget::Ground)),
            ray_plane(&ray, Vec3::X, self.half_extents.x).map(|d| (d, HitTarget::Wall)),
            ray_plane(&ray, Vec3::NEG_X, self.half_extents.x).map(|d| (d, HitTarget::Wall)),
            ray_plane(&ray, Vec3::Z, self.half_extents.z).map(|d| (d, HitTarget::Wall)),
            ray_plane(&ray, Vec3::NEG_Z, self.half_extents.z).map(|d| (d, HitTarget::Wall)),
        ];

        candidates
            .into_iter()
            .flatten()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(distance, target)| RayHit {
                point: ray.at(distance),
                distance,
                target,
            })
    }
}

/// Nearest non-negative hit distance, if the ray meets the sphere.
fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let to_origin = ray.origin - center;
    let b = to_origin.dot(ray.direction);
    let c = to_origin.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    [-b - root, -b + root].into_iter().find(|d| *d >= 0.0)
}

/// Plane `dot(p, normal) == offset`, hit from either side.
fn ray_plane(ray: &Ray, normal: Vec3, offset: f32) -> Option<f32> {
    let denom = ray.direction.dot(normal);
    if denom.abs() < f32::EPSILON {
        return None;
    }
    let distance = (offset - ray.origin.dot(normal)) / denom;
    (distance >= 0.0).then_some(distance)
}
