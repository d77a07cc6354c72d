// Re-export glam for convenience
pub use glam::*;

// Ember math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Components below this magnitude count as zero for [`Vec3Ext::near_zero`].
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Vector operations the renderer needs on top of what glam provides.
///
/// `add`, `dot`, `cross`, `length`, `normalize` and `lerp` come straight from
/// [`glam::Vec3`]. Normalizing a zero-length vector is a caller error and is
/// not checked.
pub trait Vec3Ext {
    /// True if every component's magnitude is below [`NEAR_ZERO_EPSILON`].
    fn near_zero(self) -> bool;

    /// Mirror `self` about the unit normal `n`.
    fn reflected(self, n: Vec3) -> Vec3;

    /// Bend the unit vector `self` through a surface with unit normal `n`.
    ///
    /// `etai_over_etat` is the ratio of refractive indices on the incoming
    /// and outgoing sides (Snell's law).
    fn refracted(self, n: Vec3, etai_over_etat: f32) -> Vec3;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(self) -> bool {
        self.x.abs() < NEAR_ZERO_EPSILON
            && self.y.abs() < NEAR_ZERO_EPSILON
            && self.z.abs() < NEAR_ZERO_EPSILON
    }

    #[inline]
    fn reflected(self, n: Vec3) -> Vec3 {
        self - 2.0 * self.dot(n) * n
    }

    #[inline]
    fn refracted(self, n: Vec3, etai_over_etat: f32) -> Vec3 {
        let cos_theta = (-self).dot(n).min(1.0);
        let r_out_perp = etai_over_etat * (self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
        r_out_perp + r_out_parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_lerp() {
        let a = Vec3::ZERO;
        let b = Vec3::new(2.0, 4.0, 6.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_near_zero() {
        assert!(Vec3::ZERO.near_zero());
        assert!(Vec3::splat(1e-9).near_zero());
        assert!(!Vec3::new(0.0, 1e-6, 0.0).near_zero());
    }

    #[test]
    fn test_reflect() {
        // Orthogonal incidence flips the normal component, no tangential part
        let reflected = Vec3::new(0.0, -1.0, 0.0).reflected(Vec3::Y);
        assert_eq!(reflected, Vec3::Y);

        // 45 degree incidence keeps the tangential component
        let reflected = Vec3::new(1.0, -1.0, 0.0).reflected(Vec3::Y);
        assert_eq!(reflected, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_unit_ratio_is_undeviated() {
        let incoming = Vec3::new(1.0, -2.0, 0.5).normalize();
        let refracted = incoming.refracted(Vec3::Y, 1.0);
        assert!((refracted - incoming).length() < 1e-5);
    }
}
