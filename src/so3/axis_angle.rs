//! The axis-angle representation.

use std::fmt::{self, Display, Formatter};

use nalgebra::{Unit, Vector3};

use crate::error::{So3Error, So3Result};

use super::convert::ConvertTo;
use super::ops::{random_uniform_vector, GroupOps};
use super::quaternion::QuaternionRep;
use super::{Rep, Sealed, SO3};

/// Axis norms below this cannot be normalized into a rotation axis.
const MIN_AXIS_NORM: f64 = 1e-12;

/// Representation tag: unit axis plus unconstrained angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisAngleRep;

impl Sealed for AxisAngleRep {}

impl Rep for AxisAngleRep {
    type Storage = AxisAngle;
    const IS_COORDINATES: bool = false;
    const NAME: &'static str = "axis-angle";
}

/// Storage of the axis-angle representation.
///
/// The axis is unit length whenever the angle is non-zero; at angle zero the
/// axis carries no information and any stored value means the identity. The
/// angle is not restricted to any canonical range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngle {
    axis: Vector3<f64>,
    angle: f64,
}

impl AxisAngle {
    /// Build from an axis and an angle, normalizing the axis.
    ///
    /// Fails when the axis is too short to normalize and the angle is
    /// non-zero; a zero angle with any axis is the identity.
    pub fn new(axis: Vector3<f64>, angle: f64) -> So3Result<Self> {
        let norm = axis.norm();
        if norm < MIN_AXIS_NORM {
            if angle == 0.0 {
                return Ok(AxisAngle::identity());
            }
            return Err(So3Error::ZeroAxis { norm });
        }
        Ok(AxisAngle {
            axis: axis / norm,
            angle,
        })
    }

    /// Build from a unit axis and an angle without normalizing.
    pub fn from_unit_axis(axis: Unit<Vector3<f64>>, angle: f64) -> Self {
        AxisAngle {
            axis: axis.into_inner(),
            angle,
        }
    }

    /// Wrap raw parts. The axis must already be unit length when the angle
    /// is non-zero; a debug assertion checks the contract.
    pub(crate) fn from_parts(axis: Vector3<f64>, angle: f64) -> Self {
        debug_assert!(
            angle == 0.0 || (axis.norm() - 1.0).abs() < 1e-6,
            "axis must be unit length for a non-zero angle"
        );
        AxisAngle { axis, angle }
    }

    /// The identity: zero angle about the +X default axis.
    pub fn identity() -> Self {
        AxisAngle {
            axis: Vector3::x(),
            angle: 0.0,
        }
    }

    /// The rotation axis.
    pub fn axis(&self) -> Vector3<f64> {
        self.axis
    }

    /// The rotation angle in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }
}

/// A rotation stored as an axis-angle pair.
pub type SO3AxisAngle = SO3<AxisAngleRep>;

impl SO3AxisAngle {
    /// Build from an axis and an angle, normalizing the axis.
    pub fn from_axis_angle(axis: Vector3<f64>, angle: f64) -> So3Result<Self> {
        Ok(SO3::from_storage(AxisAngle::new(axis, angle)?))
    }

    /// Build from an already-unit axis and an angle.
    pub fn from_unit_axis(axis: Unit<Vector3<f64>>, angle: f64) -> Self {
        SO3::from_storage(AxisAngle::from_unit_axis(axis, angle))
    }

    /// Wrap raw parts without normalizing; the axis must be unit length
    /// when the angle is non-zero.
    pub fn from_parts_unchecked(axis: Vector3<f64>, angle: f64) -> Self {
        SO3::from_storage(AxisAngle::from_parts(axis, angle))
    }

    /// The stored pair.
    pub fn axis_angle(&self) -> &AxisAngle {
        self.storage()
    }

    /// The rotation axis.
    pub fn axis(&self) -> Vector3<f64> {
        self.storage().axis
    }

    /// The rotation angle in radians.
    pub fn angle(&self) -> f64 {
        self.storage().angle
    }

    /// Replace the axis, normalizing it.
    pub fn set_axis(&mut self, axis: Vector3<f64>) -> So3Result<()> {
        let norm = axis.norm();
        if norm < MIN_AXIS_NORM {
            return Err(So3Error::ZeroAxis { norm });
        }
        self.storage_mut().axis = axis / norm;
        Ok(())
    }

    /// Replace the angle, keeping the axis.
    pub fn set_angle(&mut self, angle: f64) {
        self.storage_mut().angle = angle;
    }

    /// Replace both components.
    pub fn set_axis_angle(&mut self, axis: Vector3<f64>, angle: f64) -> So3Result<()> {
        *self.storage_mut() = AxisAngle::new(axis, angle)?;
        Ok(())
    }
}

impl GroupOps for AxisAngleRep {
    fn identity() -> Self::Storage {
        AxisAngle::identity()
    }

    fn is_identity(data: &Self::Storage) -> bool {
        data.angle == 0.0
    }

    fn inverse(data: &Self::Storage) -> Self::Storage {
        AxisAngle {
            axis: data.axis,
            angle: -data.angle,
        }
    }

    fn random() -> Self::Storage {
        AxisAngle {
            axis: random_uniform_vector().normalize(),
            angle: rand::random::<f64>() * 2.0 - 1.0,
        }
    }

    fn exact_eq(a: &Self::Storage, b: &Self::Storage) -> bool {
        // Any two zero-angle values are the identity, whatever their axes.
        if a.angle == 0.0 && b.angle == 0.0 {
            return true;
        }
        a == b
    }

    fn is_approx(a: &Self::Storage, b: &Self::Storage, tol: f64) -> bool {
        if a.angle == 0.0 && b.angle == 0.0 {
            return true;
        }
        (a.angle * a.axis - b.angle * b.axis).norm() < tol
    }

    fn is_valid(data: &Self::Storage, tol: f64) -> bool {
        data.angle == 0.0 || (data.axis.norm() - 1.0).abs() < tol
    }

    fn rotate(data: &Self::Storage, v: &Vector3<f64>) -> Vector3<f64> {
        <AxisAngleRep as ConvertTo<QuaternionRep>>::convert(data) * v
    }
}

impl Display for SO3AxisAngle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let data = self.storage();
        write!(
            f,
            "SO3(axis: [{:.4}, {:.4}, {:.4}], angle: {:.4})",
            data.axis.x, data.axis.y, data.axis.z, data.angle
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_new_normalizes_axis() {
        let aa = AxisAngle::new(Vector3::new(0.0, 0.0, 10.0), PI).unwrap();
        assert!((aa.axis() - Vector3::z()).norm() < TOLERANCE);
        assert_eq!(aa.angle(), PI);
    }

    #[test]
    fn test_new_rejects_zero_axis() {
        let err = AxisAngle::new(Vector3::zeros(), 1.0).unwrap_err();
        assert!(matches!(err, So3Error::ZeroAxis { .. }));
    }

    #[test]
    fn test_new_accepts_zero_axis_with_zero_angle() {
        let aa = AxisAngle::new(Vector3::zeros(), 0.0).unwrap();
        assert_eq!(aa.angle(), 0.0);
        assert_eq!(aa.axis(), Vector3::x());
    }

    #[test]
    fn test_zero_angle_is_identity_for_any_axis() {
        let a = SO3AxisAngle::from_parts_unchecked(Vector3::new(0.0, 1.0, 0.0), 0.0);
        assert!(a.is_identity());
    }

    #[test]
    fn test_invert_negates_angle_only() {
        let mut a = SO3AxisAngle::from_axis_angle(Vector3::y(), 1.3).unwrap();
        let axis = a.axis();
        a.invert();
        assert_eq!(a.angle(), -1.3);
        assert_eq!(a.axis(), axis);
    }

    #[test]
    fn test_random_axis_is_unit() {
        let a = SO3AxisAngle::random();
        assert!(a.is_valid(1e-10));
        assert!(a.angle().abs() <= 1.0);
    }

    #[test]
    fn test_set_angle_keeps_axis() {
        let mut a = SO3AxisAngle::from_axis_angle(Vector3::z(), 0.4).unwrap();
        a.set_angle(2.0);
        assert_eq!(a.angle(), 2.0);
        assert!((a.axis() - Vector3::z()).norm() < TOLERANCE);
    }

    #[test]
    fn test_set_axis_rejects_zero() {
        let mut a = SO3AxisAngle::from_axis_angle(Vector3::z(), 0.4).unwrap();
        assert!(a.set_axis(Vector3::zeros()).is_err());
    }

    #[test]
    fn test_display_contains_components() {
        let a = SO3AxisAngle::from_axis_angle(Vector3::z(), 0.5).unwrap();
        let text = a.to_string();
        assert!(text.contains("axis"));
        assert!(text.contains("0.5"));
    }
}
