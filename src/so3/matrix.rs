//! The canonical rotation-matrix representation.

use std::fmt::{self, Display, Formatter};

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::error::{So3Error, So3Result};

use super::ops::{random_uniform_vector, GroupOps, IDENTITY_TOLERANCE};
use super::{maps, Rep, Sealed, SO3};

/// Representation tag: orthonormal 3x3 matrix with determinant +1, the
/// canonical representation conversions are mediated through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationMatrixRep;

impl Sealed for RotationMatrixRep {}

impl Rep for RotationMatrixRep {
    type Storage = Rotation3<f64>;
    const IS_COORDINATES: bool = false;
    const NAME: &'static str = "rotation matrix";
}

/// A rotation stored as an orthonormal 3x3 matrix.
pub type SO3Matrix = SO3<RotationMatrixRep>;

impl SO3Matrix {
    /// Wrap an existing rotation.
    pub fn from_rotation(rotation: Rotation3<f64>) -> Self {
        SO3::from_storage(rotation)
    }

    /// Wrap a raw 3x3 matrix without validating the rotation invariant.
    ///
    /// The caller is responsible for supplying an orthonormal matrix with
    /// determinant +1; a debug assertion checks the contract.
    pub fn from_matrix_unchecked(matrix: Matrix3<f64>) -> Self {
        debug_assert!(
            (matrix.transpose() * matrix - Matrix3::identity()).norm() < 1e-6,
            "matrix is not orthonormal"
        );
        SO3::from_storage(Rotation3::from_matrix_unchecked(matrix))
    }

    /// Build from a raw 3x3 matrix, validating orthonormality and
    /// orientation within `tol`.
    pub fn try_from_matrix(matrix: Matrix3<f64>, tol: f64) -> So3Result<Self> {
        let deviation = (matrix.transpose() * matrix - Matrix3::identity()).norm();
        if deviation > tol {
            return Err(So3Error::NotOrthonormal { deviation });
        }

        let determinant = matrix.determinant();
        if determinant < 0.0 {
            return Err(So3Error::ImproperRotation { determinant });
        }

        Ok(SO3::from_storage(Rotation3::from_matrix_unchecked(matrix)))
    }

    /// The raw 3x3 matrix.
    pub fn matrix(&self) -> &Matrix3<f64> {
        self.storage().matrix()
    }

    /// The stored rotation.
    pub fn rotation(&self) -> &Rotation3<f64> {
        self.storage()
    }

    /// Replace the stored rotation.
    pub fn set_rotation(&mut self, rotation: Rotation3<f64>) {
        *self.storage_mut() = rotation;
    }
}

impl GroupOps for RotationMatrixRep {
    fn identity() -> Self::Storage {
        Rotation3::identity()
    }

    fn is_identity(data: &Self::Storage) -> bool {
        (data.matrix() - Matrix3::identity()).norm() < IDENTITY_TOLERANCE
    }

    fn inverse(data: &Self::Storage) -> Self::Storage {
        data.transpose()
    }

    fn random() -> Self::Storage {
        maps::exp(&random_uniform_vector())
    }

    fn exact_eq(a: &Self::Storage, b: &Self::Storage) -> bool {
        a == b
    }

    fn is_approx(a: &Self::Storage, b: &Self::Storage, tol: f64) -> bool {
        (a.matrix() - b.matrix()).norm() < tol
    }

    fn is_valid(data: &Self::Storage, tol: f64) -> bool {
        let m = data.matrix();
        (m.transpose() * m - Matrix3::identity()).norm() < tol
            && (m.determinant() - 1.0).abs() < tol
    }

    fn rotate(data: &Self::Storage, v: &Vector3<f64>) -> Vector3<f64> {
        data * v
    }
}

impl Display for SO3Matrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let m = self.matrix();
        write!(
            f,
            "SO3(matrix: [[{:.4}, {:.4}, {:.4}], [{:.4}, {:.4}, {:.4}], [{:.4}, {:.4}, {:.4}]])",
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
            m[(2, 0)],
            m[(2, 1)],
            m[(2, 2)]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_identity_matrix() {
        let m = SO3Matrix::identity();
        assert!(m.is_identity());
        assert_eq!(m.matrix(), &Matrix3::identity());
    }

    #[test]
    fn test_random_is_on_manifold() {
        let m = SO3Matrix::random();
        assert!(m.is_valid(1e-10));
    }

    #[test]
    fn test_try_from_matrix_accepts_rotations() {
        let r = maps::exp(&Vector3::new(0.2, -0.5, 0.1));
        let m = SO3Matrix::try_from_matrix(r.into_inner(), 1e-9).unwrap();
        assert!(m.is_valid(1e-9));
    }

    #[test]
    fn test_try_from_matrix_rejects_non_orthonormal() {
        let bad = Matrix3::identity() * 2.0;
        let err = SO3Matrix::try_from_matrix(bad, 1e-9).unwrap_err();
        assert!(matches!(err, So3Error::NotOrthonormal { .. }));
    }

    #[test]
    fn test_try_from_matrix_rejects_reflections() {
        let mut flipped = Matrix3::identity();
        flipped[(2, 2)] = -1.0;
        let err = SO3Matrix::try_from_matrix(flipped, 1e-9).unwrap_err();
        assert!(matches!(err, So3Error::ImproperRotation { .. }));
    }

    #[test]
    fn test_set_identity_after_random() {
        let mut m = SO3Matrix::random();
        m.set_identity();
        assert!(m.is_identity());
    }

    #[test]
    fn test_inverse_composes_to_identity() {
        let m = SO3Matrix::random();
        let product = &m * m.inverse();
        assert!(product.is_identity() || product.is_approx(&SO3Matrix::identity(), 1e-10));
    }

    #[test]
    fn test_rotate_unit_axes() {
        let quarter_z = SO3Matrix::exp(&Vector3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2));
        let rotated = quarter_z.rotate(&Vector3::x());
        assert!((rotated - Vector3::y()).norm() < TOLERANCE);
    }
}
