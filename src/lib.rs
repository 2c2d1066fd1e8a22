//! # so3kit
//!
//! A representation-polymorphic library for the 3-D rotation group SO(3).
//!
//! A rotation may be stored as an orthonormal 3x3 matrix, an axis-angle
//! pair, a unit quaternion, or a minimal rotation vector (the Lie-algebra
//! coordinates of the element), while exposing one uniform algebraic
//! interface regardless of the storage choice.
//!
//! ## Features
//!
//! - **Four interoperable representations**: rotation matrix (canonical),
//!   axis-angle, unit quaternion, and rotation vector
//! - **Minimal-cost conversions**: direct pairwise shortcuts where they
//!   exist, canonical mediation through the rotation matrix otherwise,
//!   selected at compile time
//! - **Closed-form manifold maps**: Rodrigues exponential with a
//!   numerically stable small-angle branch, and the matrix logarithm
//! - **Group algebra**: composition (`*`, `*=`), inversion, identity and
//!   approximate-equality tests, uniform across representations
//!
//! ## Example
//!
//! ```
//! use nalgebra::Vector3;
//! use so3kit::{SO3AxisAngle, SO3Matrix, SO3Quaternion};
//! use std::f64::consts::PI;
//!
//! let quarter = SO3AxisAngle::from_axis_angle(Vector3::z(), PI / 2.0).unwrap();
//! let as_matrix: SO3Matrix = quarter.convert();
//! let as_quat: SO3Quaternion = quarter.convert();
//!
//! let half = &as_matrix * &as_quat;
//! let expected = SO3AxisAngle::from_axis_angle(Vector3::z(), PI).unwrap();
//! assert!(half.is_approx(&expected, 1e-12));
//! ```

pub mod error;
#[cfg(feature = "logging")]
pub mod logger;
pub mod so3;

pub use error::{So3Error, So3Result};
#[cfg(feature = "logging")]
pub use logger::{init_logger, init_logger_with_level};
pub use so3::{
    AxisAngle, AxisAngleRep, Canonical, ConversionPath, ConvertTo, QuaternionRep, Rep, Rotation,
    RotationMatrixRep, RotationVectorRep, SO3, SO3AxisAngle, SO3Canonical, SO3Matrix,
    SO3Quaternion, SO3Vector,
};
