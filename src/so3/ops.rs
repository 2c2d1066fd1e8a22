//! Group operation dispatch across representations.
//!
//! [`GroupOps`] holds the per-representation closed forms (identity,
//! inversion, random sampling, equality tests). [`Compose`] is the pairwise
//! multiplication table: pairs whose storage is natively closed under
//! multiplication (matrix, axis-angle, quaternion, in any combination)
//! multiply directly, while every pair involving the rotation vector routes
//! through the canonical representation, since the coordinate chart has no
//! group product of its own: `a * b = log(exp(a) * exp(b))`.
//!
//! [`ApproxCmp`] mirrors the same structure for approximate equality:
//! same-representation pairs compare raw storage, cross-representation
//! pairs compare canonical matrices. The canonical comparison is a flat
//! Euclidean closeness, not a geodesic distance; near-antipodal quaternions
//! may compare as distant even though they encode the same rotation.

use std::ops::{Mul, MulAssign};

use nalgebra::{UnitQuaternion, Vector3};

use super::axis_angle::AxisAngleRep;
use super::convert::{CanonicalConvert, ConvertTo};
use super::matrix::RotationMatrixRep;
use super::quaternion::QuaternionRep;
use super::vector::RotationVectorRep;
use super::{Rep, SO3};

/// Tolerance used by the approximate identity tests of the redundant
/// representations (rotation matrix, quaternion).
pub const IDENTITY_TOLERANCE: f64 = 1e-12;

/// Componentwise uniform sample in [-1, 1]^3.
pub(crate) fn random_uniform_vector() -> Vector3<f64> {
    Vector3::new(
        rand::random::<f64>() * 2.0 - 1.0,
        rand::random::<f64>() * 2.0 - 1.0,
        rand::random::<f64>() * 2.0 - 1.0,
    )
}

/// Per-representation group operations.
///
/// Every operation is a pure closed form on the representation's storage;
/// none can fail at runtime.
pub trait GroupOps: Rep {
    /// The identity payload.
    fn identity() -> Self::Storage;

    /// Representation-specific identity test.
    fn is_identity(data: &Self::Storage) -> bool;

    /// Representation-specific closed-form inverse.
    fn inverse(data: &Self::Storage) -> Self::Storage;

    /// Representation-specific random payload.
    fn random() -> Self::Storage;

    /// Exact equality with the representation's own semantics.
    fn exact_eq(a: &Self::Storage, b: &Self::Storage) -> bool;

    /// Norm-based closeness on the raw storage.
    fn is_approx(a: &Self::Storage, b: &Self::Storage, tol: f64) -> bool;

    /// Whether the payload satisfies the representation invariant.
    fn is_valid(data: &Self::Storage, tol: f64) -> bool;

    /// Apply the rotation to a vector.
    fn rotate(data: &Self::Storage, v: &Vector3<f64>) -> Vector3<f64>;
}

/// Pairwise composition strategies, resolved at compile time.
pub trait Compose<Rhs: Rep>: Rep {
    /// Group multiplication; the result stays in `Self`'s representation.
    fn compose(a: &Self::Storage, b: &Rhs::Storage) -> Self::Storage;

    /// In-place group multiplication.
    fn compose_in_place(a: &mut Self::Storage, b: &Rhs::Storage) {
        *a = Self::compose(a, b);
    }
}

impl Compose<RotationMatrixRep> for RotationMatrixRep {
    fn compose(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        a * b
    }
}

impl Compose<AxisAngleRep> for RotationMatrixRep {
    fn compose(
        a: &Self::Storage,
        b: &<AxisAngleRep as Rep>::Storage,
    ) -> Self::Storage {
        a * <AxisAngleRep as ConvertTo<RotationMatrixRep>>::convert(b)
    }
}

impl Compose<QuaternionRep> for RotationMatrixRep {
    fn compose(
        a: &Self::Storage,
        b: &<QuaternionRep as Rep>::Storage,
    ) -> Self::Storage {
        a * b.to_rotation_matrix()
    }
}

impl Compose<AxisAngleRep> for AxisAngleRep {
    fn compose(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        // The axis-angle pair multiplies through the quaternion product.
        let q = <AxisAngleRep as ConvertTo<QuaternionRep>>::convert(a)
            * <AxisAngleRep as ConvertTo<QuaternionRep>>::convert(b);
        <QuaternionRep as ConvertTo<AxisAngleRep>>::convert(&q)
    }
}

impl Compose<RotationMatrixRep> for AxisAngleRep {
    fn compose(
        a: &Self::Storage,
        b: &<RotationMatrixRep as Rep>::Storage,
    ) -> Self::Storage {
        let m = <AxisAngleRep as ConvertTo<RotationMatrixRep>>::convert(a) * b;
        <RotationMatrixRep as ConvertTo<AxisAngleRep>>::convert(&m)
    }
}

impl Compose<QuaternionRep> for AxisAngleRep {
    fn compose(
        a: &Self::Storage,
        b: &<QuaternionRep as Rep>::Storage,
    ) -> Self::Storage {
        let q = <AxisAngleRep as ConvertTo<QuaternionRep>>::convert(a) * b;
        <QuaternionRep as ConvertTo<AxisAngleRep>>::convert(&q)
    }
}

impl Compose<QuaternionRep> for QuaternionRep {
    fn compose(a: &Self::Storage, b: &Self::Storage) -> Self::Storage {
        a * b
    }
}

impl Compose<RotationMatrixRep> for QuaternionRep {
    fn compose(
        a: &Self::Storage,
        b: &<RotationMatrixRep as Rep>::Storage,
    ) -> Self::Storage {
        a * UnitQuaternion::from_rotation_matrix(b)
    }
}

impl Compose<AxisAngleRep> for QuaternionRep {
    fn compose(
        a: &Self::Storage,
        b: &<AxisAngleRep as Rep>::Storage,
    ) -> Self::Storage {
        a * <AxisAngleRep as ConvertTo<QuaternionRep>>::convert(b)
    }
}

/// Pairs involving the rotation vector: convert both operands to the
/// canonical representation, multiply there, convert the product back into
/// the left operand's representation. For a rotation-vector left operand
/// this is exactly `log(exp(a) * exp(b))`.
macro_rules! compose_via_canonical {
    ($(($lhs:ty, $rhs:ty)),* $(,)?) => {$(
        impl Compose<$rhs> for $lhs {
            fn compose(
                a: &<$lhs as Rep>::Storage,
                b: &<$rhs as Rep>::Storage,
            ) -> <$lhs as Rep>::Storage {
                let product = <$lhs as CanonicalConvert>::to_canonical(a).as_ref()
                    * <$rhs as CanonicalConvert>::to_canonical(b).as_ref();
                <$lhs as CanonicalConvert>::from_canonical(product)
            }
        }
    )*};
}

compose_via_canonical!(
    (RotationMatrixRep, RotationVectorRep),
    (AxisAngleRep, RotationVectorRep),
    (QuaternionRep, RotationVectorRep),
    (RotationVectorRep, RotationMatrixRep),
    (RotationVectorRep, AxisAngleRep),
    (RotationVectorRep, QuaternionRep),
    (RotationVectorRep, RotationVectorRep),
);

/// Pairwise approximate equality, resolved at compile time.
pub trait ApproxCmp<B: Rep>: Rep {
    /// Norm-based closeness; cross-representation pairs compare in the
    /// canonical representation.
    fn is_approx(a: &Self::Storage, b: &B::Storage, tol: f64) -> bool;
}

macro_rules! approx_same_rep {
    ($($rep:ty),* $(,)?) => {$(
        impl ApproxCmp<$rep> for $rep {
            fn is_approx(a: &Self::Storage, b: &Self::Storage, tol: f64) -> bool {
                <$rep as GroupOps>::is_approx(a, b, tol)
            }
        }
    )*};
}

approx_same_rep!(RotationMatrixRep, AxisAngleRep, QuaternionRep, RotationVectorRep);

macro_rules! approx_via_canonical {
    ($(($lhs:ty, $rhs:ty)),* $(,)?) => {$(
        impl ApproxCmp<$rhs> for $lhs {
            fn is_approx(
                a: &<$lhs as Rep>::Storage,
                b: &<$rhs as Rep>::Storage,
                tol: f64,
            ) -> bool {
                let ca = <$lhs as CanonicalConvert>::to_canonical(a);
                let cb = <$rhs as CanonicalConvert>::to_canonical(b);
                (ca.matrix() - cb.matrix()).norm() < tol
            }
        }
    )*};
}

approx_via_canonical!(
    (RotationMatrixRep, AxisAngleRep),
    (RotationMatrixRep, QuaternionRep),
    (RotationMatrixRep, RotationVectorRep),
    (AxisAngleRep, RotationMatrixRep),
    (AxisAngleRep, QuaternionRep),
    (AxisAngleRep, RotationVectorRep),
    (QuaternionRep, RotationMatrixRep),
    (QuaternionRep, AxisAngleRep),
    (QuaternionRep, RotationVectorRep),
    (RotationVectorRep, RotationMatrixRep),
    (RotationVectorRep, AxisAngleRep),
    (RotationVectorRep, QuaternionRep),
);

impl<A, B> Mul<&SO3<B>> for &SO3<A>
where
    A: Compose<B>,
    B: Rep,
{
    type Output = SO3<A>;

    fn mul(self, rhs: &SO3<B>) -> SO3<A> {
        self.compose(rhs)
    }
}

impl<A, B> Mul<SO3<B>> for &SO3<A>
where
    A: Compose<B>,
    B: Rep,
{
    type Output = SO3<A>;

    fn mul(self, rhs: SO3<B>) -> SO3<A> {
        self.compose(&rhs)
    }
}

impl<A, B> Mul<&SO3<B>> for SO3<A>
where
    A: Compose<B>,
    B: Rep,
{
    type Output = SO3<A>;

    fn mul(self, rhs: &SO3<B>) -> SO3<A> {
        self.compose(rhs)
    }
}

impl<A, B> Mul<SO3<B>> for SO3<A>
where
    A: Compose<B>,
    B: Rep,
{
    type Output = SO3<A>;

    fn mul(self, rhs: SO3<B>) -> SO3<A> {
        self.compose(&rhs)
    }
}

impl<A, B> MulAssign<&SO3<B>> for SO3<A>
where
    A: Compose<B>,
    B: Rep,
{
    fn mul_assign(&mut self, rhs: &SO3<B>) {
        self.compose_in_place(rhs);
    }
}

impl<A, B> MulAssign<SO3<B>> for SO3<A>
where
    A: Compose<B>,
    B: Rep,
{
    fn mul_assign(&mut self, rhs: SO3<B>) {
        self.compose_in_place(&rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::so3::{maps, SO3AxisAngle, SO3Matrix, SO3Quaternion, SO3Vector};
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_compose_with_inverse_is_identity_per_representation() {
        let m = SO3Matrix::random();
        assert!((&m * m.inverse()).is_approx(&SO3Matrix::identity(), 1e-10));

        let a = SO3AxisAngle::random();
        assert!((&a * a.inverse()).is_approx(&SO3AxisAngle::identity(), 1e-10));

        let q = SO3Quaternion::random();
        assert!((&q * q.inverse()).is_approx(&SO3Quaternion::identity(), 1e-10));

        let v = SO3Vector::random();
        assert!((&v * v.inverse()).is_approx(&SO3Vector::identity(), 1e-10));
    }

    #[test]
    fn test_associativity_across_representations() {
        let a = SO3Matrix::random();
        let b = SO3Quaternion::random();
        let c = SO3AxisAngle::random();

        let left = (&a * &b) * &c;
        let right = &a * (b.convert::<RotationMatrixRep>() * &c);
        assert!(left.is_approx(&right, 1e-10));
    }

    #[test]
    fn test_two_quarter_turns_make_a_half_turn() {
        let quarter = SO3AxisAngle::from_axis_angle(Vector3::z(), PI / 2.0).unwrap();
        let half = &quarter * &quarter;

        assert!((half.angle() - PI).abs() < 1e-10);
        assert!((half.axis() - Vector3::z()).norm() < 1e-10);
    }

    #[test]
    fn test_quaternion_inverse_is_conjugate() {
        let q = SO3Quaternion::random();
        let inv = q.inverse();

        assert!((q.w() - inv.w()).abs() < TOLERANCE);
        assert!((q.x() + inv.x()).abs() < TOLERANCE);
        assert!((q.y() + inv.y()).abs() < TOLERANCE);
        assert!((q.z() + inv.z()).abs() < TOLERANCE);
    }

    #[test]
    fn test_matrix_inverse_is_transpose() {
        let m = SO3Matrix::random();
        let inv = m.inverse();
        assert!((inv.rotation_matrix() - m.rotation_matrix().transpose()).norm() < TOLERANCE);
    }

    #[test]
    fn test_axis_angle_inverse_negates_angle() {
        let a = SO3AxisAngle::from_axis_angle(Vector3::y(), 0.8).unwrap();
        let inv = a.inverse();
        assert_eq!(inv.angle(), -0.8);
        assert_eq!(inv.axis(), a.axis());
    }

    #[test]
    fn test_rotation_vector_inverse_is_negation() {
        let v = SO3Vector::from_rotation_vector(Vector3::new(0.1, -0.2, 0.3));
        assert_eq!(v.inverse().coordinates(), -v.coordinates());
    }

    #[test]
    fn test_vector_composition_routes_through_canonical() {
        let a = Vector3::new(0.4, 0.0, -0.3);
        let b = Vector3::new(-0.1, 0.6, 0.2);

        let composed = SO3Vector::from_rotation_vector(a) * SO3Vector::from_rotation_vector(b);
        let expected = maps::log(&(maps::exp(&a) * maps::exp(&b)));
        assert!((composed.coordinates() - expected).norm() < TOLERANCE);
    }

    #[test]
    fn test_cross_representation_composition_agrees_with_canonical() {
        let a = SO3Quaternion::random();
        let b = SO3Vector::random();

        let mixed = &a * &b;
        let canonical =
            a.convert::<RotationMatrixRep>() * b.convert::<RotationMatrixRep>();
        assert!(mixed.is_approx(&canonical, 1e-10));
    }

    #[test]
    fn test_compose_in_place_matches_compose() {
        let a = SO3Matrix::random();
        let b = SO3AxisAngle::random();

        let composed = &a * &b;
        let mut in_place = a;
        in_place *= &b;
        assert!(in_place.is_approx(&composed, TOLERANCE));
    }

    #[test]
    fn test_zero_angle_axis_angles_compare_equal() {
        let a = SO3AxisAngle::from_parts_unchecked(Vector3::x(), 0.0);
        let b = SO3AxisAngle::from_parts_unchecked(Vector3::new(0.0, 1.0, 0.0), 0.0);

        assert!(a.is_approx(&b, TOLERANCE));
        assert_eq!(a, b);
    }

    #[test]
    fn test_cross_representation_is_approx() {
        let a = SO3AxisAngle::from_axis_angle(Vector3::x(), 0.7).unwrap();
        let m: SO3Matrix = a.convert();
        let q: SO3Quaternion = a.convert();
        let v: SO3Vector = a.convert();

        assert!(a.is_approx(&m, 1e-12));
        assert!(a.is_approx(&q, 1e-12));
        assert!(m.is_approx(&v, 1e-12));
        assert!(!a.is_approx(&SO3Matrix::identity(), 1e-3));
    }

    #[test]
    fn test_is_identity_semantics() {
        assert!(SO3Matrix::identity().is_identity());
        assert!(SO3Quaternion::identity().is_identity());
        assert!(SO3Vector::identity().is_identity());

        // The rotation-vector zero test is exact, not tolerance based.
        let tiny = SO3Vector::from_rotation_vector(Vector3::new(1e-300, 0.0, 0.0));
        assert!(!tiny.is_identity());
    }
}
