use glam::Vec3;
use rayon::prelude::*;
use std::fmt::Debug;

/// Signed distance to a closed surface, positive outside.
///
/// Mesh-based samplers live outside this crate; anything implementing this
/// trait can drive surface classification.
pub trait SignedDistance: Send + Sync + Debug {
    fn signed_distance(&self, point: Vec3) -> f32;

    fn signed_distances(&self, points: &[Vec3]) -> Vec<f32> {
        points.par_iter().map(|&p| self.signed_distance(p)).collect()
    }
}

impl<T: SignedDistance + ?Sized> SignedDistance for Box<T> {
    fn signed_distance(&self, point: Vec3) -> f32 {
        (**self).signed_distance(point)
    }

    fn signed_distances(&self, points: &[Vec3]) -> Vec<f32> {
        (**self).signed_distances(points)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SphereField {
    pub center: Vec3,
    pub radius: f32,
}

impl SphereField {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl SignedDistance for SphereField {
    fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.center).length() - self.radius
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoxField {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoxField {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

impl SignedDistance for BoxField {
    fn signed_distance(&self, point: Vec3) -> f32 {
        let q = (point - self.center()).abs() - self.half_extents();
        q.max(Vec3::ZERO).length() + q.x.max(q.y.max(q.z)).min(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sphere_distance_sign() {
        let s = SphereField::new(Vec3::ZERO, 1.0);
        assert_relative_eq!(s.signed_distance(Vec3::new(2.0, 0.0, 0.0)), 1.0);
        assert_relative_eq!(s.signed_distance(Vec3::ZERO), -1.0);
    }

    #[test]
    fn box_distance_inside_and_outside() {
        let b = BoxField::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        assert_relative_eq!(b.signed_distance(Vec3::new(3.0, 0.0, 0.0)), 2.0);
        assert_relative_eq!(b.signed_distance(Vec3::new(0.0, 0.5, 0.0)), -0.5);

        let boxed: Box<dyn SignedDistance> = Box::new(b);
        assert_eq!(
            boxed.signed_distances(&[Vec3::ZERO, Vec3::new(0.0, 0.0, 1.5)]),
            vec![-1.0, 0.5]
        );
    }
}
