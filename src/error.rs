//! Error types for the so3kit library.
//!
//! The rotation algebra itself is infallible: every group operation and
//! conversion is a total function. Errors arise only when *constructing* a
//! rotation from raw user data that may not satisfy the representation
//! invariant (an orthonormal matrix, a normalizable axis, a non-zero
//! quaternion). All errors use the `thiserror` crate for automatic trait
//! implementations.

use thiserror::Error;

/// Result type used by the validating constructors.
pub type So3Result<T> = Result<T, So3Error>;

/// Errors reported by validating constructors.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum So3Error {
    /// The supplied 3x3 matrix is not orthonormal within tolerance.
    #[error("matrix is not orthonormal: |R^T R - I| = {deviation}")]
    NotOrthonormal {
        /// Frobenius norm of `R^T R - I`.
        deviation: f64,
    },

    /// The supplied 3x3 matrix is orthonormal but orientation-reversing.
    #[error("matrix is a reflection, not a rotation: det = {determinant}")]
    ImproperRotation {
        /// Determinant of the supplied matrix.
        determinant: f64,
    },

    /// The supplied rotation axis is too short to normalize.
    #[error("axis magnitude {norm} is too small to normalize")]
    ZeroAxis {
        /// Norm of the supplied axis.
        norm: f64,
    },

    /// The supplied quaternion coefficients are all (near) zero.
    #[error("quaternion norm {norm} is too small to normalize")]
    ZeroQuaternion {
        /// Norm of the supplied coefficients.
        norm: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = So3Error::ImproperRotation { determinant: -1.0 };
        assert!(err.to_string().contains("reflection"));
        assert!(err.to_string().contains("-1"));
    }

    #[test]
    fn test_zero_axis_display() {
        let err = So3Error::ZeroAxis { norm: 0.0 };
        assert!(err.to_string().contains("too small"));
    }

    #[test]
    fn test_result_alias() {
        let ok: So3Result<i32> = Ok(7);
        assert!(ok.is_ok());

        let err: So3Result<i32> = Err(So3Error::ZeroQuaternion { norm: 0.0 });
        assert!(err.is_err());
    }
}
