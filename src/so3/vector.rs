//! The rotation-vector representation, the minimal coordinate chart.

use std::fmt::{self, Display, Formatter};

use nalgebra::Vector3;

use super::ops::{random_uniform_vector, GroupOps};
use super::{maps, Rep, Sealed, SO3};

/// Representation tag: 3-vector whose direction is the rotation axis and
/// whose norm is the rotation angle.
///
/// This is the Lie-algebra coordinate chart of SO(3), not a redundant group
/// encoding; it is the only representation with [`Rep::IS_COORDINATES`]
/// set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationVectorRep;

impl Sealed for RotationVectorRep {}

impl Rep for RotationVectorRep {
    type Storage = Vector3<f64>;
    const IS_COORDINATES: bool = true;
    const NAME: &'static str = "rotation vector";
}

/// A rotation stored as a rotation vector.
pub type SO3Vector = SO3<RotationVectorRep>;

impl SO3Vector {
    /// Wrap a raw rotation vector.
    pub fn from_rotation_vector(vector: Vector3<f64>) -> Self {
        SO3::from_storage(vector)
    }

    /// The stored vector.
    pub fn vector(&self) -> &Vector3<f64> {
        self.storage()
    }

    /// Replace the stored vector.
    pub fn set_vector(&mut self, vector: Vector3<f64>) {
        *self.storage_mut() = vector;
    }

    /// The Lie-algebra coordinates of this rotation. Only the coordinate
    /// chart exposes this accessor; redundant representations go through
    /// [`SO3::log`].
    pub fn coordinates(&self) -> Vector3<f64> {
        *self.storage()
    }
}

impl GroupOps for RotationVectorRep {
    fn identity() -> Self::Storage {
        Vector3::zeros()
    }

    fn is_identity(data: &Self::Storage) -> bool {
        // Exact zero test, unlike the tolerance-aware redundant
        // representations.
        *data == Vector3::zeros()
    }

    fn inverse(data: &Self::Storage) -> Self::Storage {
        -data
    }

    fn random() -> Self::Storage {
        random_uniform_vector()
    }

    fn exact_eq(a: &Self::Storage, b: &Self::Storage) -> bool {
        a == b
    }

    fn is_approx(a: &Self::Storage, b: &Self::Storage, tol: f64) -> bool {
        (a - b).norm() < tol
    }

    fn is_valid(data: &Self::Storage, _tol: f64) -> bool {
        // Every finite 3-vector is a valid chart point.
        data.iter().all(|c| c.is_finite())
    }

    fn rotate(data: &Self::Storage, v: &Vector3<f64>) -> Vector3<f64> {
        maps::exp(data) * v
    }
}

impl Display for SO3Vector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let v = self.storage();
        write!(f, "SO3(rotation vector: [{:.4}, {:.4}, {:.4}])", v.x, v.y, v.z)
    }
}
