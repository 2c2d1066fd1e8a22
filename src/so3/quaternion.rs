//! The unit-quaternion representation.

use std::fmt::{self, Display, Formatter};

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::error::{So3Error, So3Result};

use super::convert::CanonicalConvert;
use super::ops::{random_uniform_vector, GroupOps, IDENTITY_TOLERANCE};
use super::{maps, Rep, Sealed, SO3};

/// Representation tag: unit quaternion (w, x, y, z).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuaternionRep;

impl Sealed for QuaternionRep {}

impl Rep for QuaternionRep {
    type Storage = UnitQuaternion<f64>;
    const IS_COORDINATES: bool = false;
    const NAME: &'static str = "quaternion";
}

/// A rotation stored as a unit quaternion.
pub type SO3Quaternion = SO3<QuaternionRep>;

impl SO3Quaternion {
    /// Wrap an existing unit quaternion.
    pub fn from_unit_quaternion(quaternion: UnitQuaternion<f64>) -> Self {
        SO3::from_storage(quaternion)
    }

    /// Build from raw coefficients (w, x, y, z), normalizing them.
    ///
    /// Fails when the coefficients are all (near) zero.
    pub fn try_from_coeffs(w: f64, x: f64, y: f64, z: f64) -> So3Result<Self> {
        let q = Quaternion::new(w, x, y, z);
        let norm = q.norm();
        if norm < 1e-12 {
            return Err(So3Error::ZeroQuaternion { norm });
        }
        Ok(SO3::from_storage(UnitQuaternion::from_quaternion(q)))
    }

    /// The stored unit quaternion.
    pub fn quaternion(&self) -> &UnitQuaternion<f64> {
        self.storage()
    }

    /// Replace the stored quaternion.
    pub fn set_quaternion(&mut self, quaternion: UnitQuaternion<f64>) {
        *self.storage_mut() = quaternion;
    }

    /// Coefficients as (w, x, y, z).
    pub fn coeffs(&self) -> [f64; 4] {
        let q = self.storage().quaternion();
        [q.w, q.i, q.j, q.k]
    }

    /// The scalar component.
    pub fn w(&self) -> f64 {
        self.storage().w
    }

    /// The i component.
    pub fn x(&self) -> f64 {
        self.storage().i
    }

    /// The j component.
    pub fn y(&self) -> f64 {
        self.storage().j
    }

    /// The k component.
    pub fn z(&self) -> f64 {
        self.storage().k
    }
}

impl GroupOps for QuaternionRep {
    fn identity() -> Self::Storage {
        UnitQuaternion::identity()
    }

    fn is_identity(data: &Self::Storage) -> bool {
        // Coefficientwise closeness to (1, 0, 0, 0); the antipode -1 encodes
        // the same rotation but does not pass this test.
        (data.w - 1.0).abs() < IDENTITY_TOLERANCE
            && data.vector().norm() < IDENTITY_TOLERANCE
    }

    fn inverse(data: &Self::Storage) -> Self::Storage {
        data.inverse()
    }

    fn random() -> Self::Storage {
        QuaternionRep::from_canonical(maps::exp(&random_uniform_vector()))
    }

    fn exact_eq(a: &Self::Storage, b: &Self::Storage) -> bool {
        a == b
    }

    fn is_approx(a: &Self::Storage, b: &Self::Storage, tol: f64) -> bool {
        (a.coords - b.coords).norm() < tol
    }

    fn is_valid(data: &Self::Storage, tol: f64) -> bool {
        (data.quaternion().norm() - 1.0).abs() < tol
    }

    fn rotate(data: &Self::Storage, v: &Vector3<f64>) -> Vector3<f64> {
        data * v
    }
}

impl Display for SO3Quaternion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let q = self.storage().quaternion();
        write!(
            f,
            "SO3(quaternion: [w: {:.4}, x: {:.4}, y: {:.4}, z: {:.4}])",
            q.w, q.i, q.j, q.k
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_identity_coeffs() {
        let q = SO3Quaternion::identity();
        assert_eq!(q.coeffs(), [1.0, 0.0, 0.0, 0.0]);
        assert!(q.is_identity());
    }

    #[test]
    fn test_try_from_coeffs_normalizes() {
        let q = SO3Quaternion::try_from_coeffs(0.4, 0.1, 0.2, 0.3).unwrap();
        assert!(q.is_valid(TOLERANCE));

        let expected = Quaternion::new(0.4, 0.1, 0.2, 0.3).normalize();
        assert!((q.w() - expected.w).abs() < TOLERANCE);
        assert!((q.x() - expected.i).abs() < TOLERANCE);
    }

    #[test]
    fn test_try_from_coeffs_rejects_zero() {
        let err = SO3Quaternion::try_from_coeffs(0.0, 0.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, So3Error::ZeroQuaternion { .. }));
    }

    #[test]
    fn test_random_is_unit() {
        let q = SO3Quaternion::random();
        assert!(q.is_valid(1e-10));
    }

    #[test]
    fn test_antipode_is_not_coefficientwise_identity() {
        let q = SO3Quaternion::try_from_coeffs(-1.0, 0.0, 0.0, 0.0).unwrap();
        assert!(!q.is_identity());
    }

    #[test]
    fn test_inverse_of_identity() {
        let q = SO3Quaternion::identity();
        assert!(q.inverse().is_identity());
    }

    #[test]
    fn test_set_quaternion() {
        let mut q = SO3Quaternion::identity();
        let replacement = UnitQuaternion::from_quaternion(Quaternion::new(0.5, 0.5, 0.5, 0.5));
        q.set_quaternion(replacement);
        assert_eq!(q.quaternion(), &replacement);
    }
}
