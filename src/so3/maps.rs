//! Closed-form maps between the Lie algebra so(3) and the group SO(3).
//!
//! so(3) elements are identified with plain 3-vectors through the
//! skew-symmetric [`hat`] construction: the direction is the rotation axis
//! and the magnitude the rotation angle. [`exp`] is the Rodrigues formula
//! with a Taylor-series branch near zero angle; [`log`] recovers axis times
//! angle from the canonical matrix decomposition.

use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};

/// Angle below which [`exp`] switches to the Taylor expansion of the
/// Rodrigues coefficients to avoid cancellation and division by zero.
pub const SMALL_ANGLE_EPSILON: f64 = 1e-8;

/// Hat operator: so(3) coordinates to the skew-symmetric generator matrix.
///
/// `hat(w) * v == w.cross(&v)` for any `v`.
#[rustfmt::skip]
pub fn hat(w: &Vector3<f64>) -> Matrix3<f64> {
    Matrix3::new(
         0.0, -w.z,  w.y,
         w.z,  0.0, -w.x,
        -w.y,  w.x,  0.0,
    )
}

/// Vee operator, the inverse of [`hat`].
///
/// Reads the coordinates back out of a skew-symmetric matrix; the symmetric
/// part of the input is ignored.
pub fn vee(m: &Matrix3<f64>) -> Vector3<f64> {
    Vector3::new(m[(2, 1)], m[(0, 2)], m[(1, 0)])
}

/// Exponential map: so(3) -> SO(3) by the Rodrigues formula.
///
/// With theta = |w|, the result is
/// `I + alpha * hat(w) + beta * hat(w)^2` for `alpha = sin(theta)/theta`
/// and `beta = (1 - cos(theta))/theta^2`, assembled entry-wise from the
/// outer- and cross-product structure of `w`. For theta below
/// [`SMALL_ANGLE_EPSILON`] the coefficients come from their degree-4 Taylor
/// expansions, so the map is total and orthonormal for every input.
pub fn exp(w: &Vector3<f64>) -> Rotation3<f64> {
    let s2 = [w.x * w.x, w.y * w.y, w.z * w.z];
    let s3 = [w.x * w.y, w.y * w.z, w.z * w.x];
    let theta = (s2[0] + s2[1] + s2[2]).sqrt();
    let cos_t = theta.cos();

    let (alpha, beta) = if theta > SMALL_ANGLE_EPSILON {
        (theta.sin() / theta, (1.0 - cos_t) / (theta * theta))
    } else {
        (1.0 - theta * theta / 6.0, 0.5 - theta * theta / 24.0)
    };

    #[rustfmt::skip]
    let m = Matrix3::new(
        beta * s2[0] + cos_t,      beta * s3[0] - alpha * w.z, beta * s3[2] + alpha * w.y,
        beta * s3[0] + alpha * w.z, beta * s2[1] + cos_t,      beta * s3[1] - alpha * w.x,
        beta * s3[2] - alpha * w.y, beta * s3[1] + alpha * w.x, beta * s2[2] + cos_t,
    );

    Rotation3::from_matrix_unchecked(m)
}

/// Logarithm map: SO(3) -> so(3) through the angle-axis decomposition of
/// the matrix.
///
/// The extraction goes through the unit-quaternion factorization of the
/// matrix. Returns the zero vector at the identity. The axis-sign
/// ambiguity at angle pi is inherited from the decomposition and not
/// stabilized here.
pub fn log(r: &Rotation3<f64>) -> Vector3<f64> {
    match UnitQuaternion::from_rotation_matrix(r).axis_angle() {
        Some((axis, angle)) => axis.into_inner() * angle,
        None => Vector3::zeros(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn test_exp_of_zero_is_identity() {
        let r = exp(&Vector3::zeros());
        assert!((r.matrix() - Matrix3::identity()).norm() < TOLERANCE);
    }

    #[test]
    fn test_exp_is_orthonormal() {
        for w in [
            Vector3::new(0.1, 0.2, 0.3),
            Vector3::new(-2.0, 1.5, 0.7),
            Vector3::new(3.0, -3.0, 3.0),
        ] {
            let m = exp(&w).into_inner();
            assert!((m.transpose() * m - Matrix3::identity()).norm() < 1e-14);
            assert!((m.determinant() - 1.0).abs() < 1e-14);
        }
    }

    #[test]
    fn test_exp_matches_quarter_turn_about_z() {
        let r = exp(&Vector3::new(0.0, 0.0, PI / 2.0));
        #[rustfmt::skip]
        let expected = Matrix3::new(
            0.0, -1.0, 0.0,
            1.0,  0.0, 0.0,
            0.0,  0.0, 1.0,
        );
        assert!((r.matrix() - expected).norm() < TOLERANCE);
    }

    #[test]
    fn test_log_exp_roundtrip_below_pi() {
        for w in [
            Vector3::new(0.1, -0.2, 0.3),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(0.0, 0.0, 3.1),
        ] {
            let recovered = log(&exp(&w));
            assert!((recovered - w).norm() < 1e-10);
        }
    }

    #[test]
    fn test_exp_log_roundtrip_for_matrices() {
        let r = exp(&Vector3::new(-0.4, 0.9, 0.2));
        let recovered = exp(&log(&r));
        assert!((recovered.matrix() - r.matrix()).norm() < 1e-12);
    }

    #[test]
    fn test_small_angle_first_order() {
        let w = Vector3::new(1e-10, -2e-10, 3e-10);
        let r = exp(&w);
        assert!(r.matrix().iter().all(|c| c.is_finite()));

        let first_order = Matrix3::identity() + hat(&w);
        assert!((r.matrix() - first_order).norm() < 1e-18);
    }

    #[test]
    fn test_log_of_identity_is_zero() {
        let r = Rotation3::identity();
        assert!(log(&r).norm() < TOLERANCE);
    }

    #[test]
    fn test_log_magnitude_at_half_turn() {
        // Axis sign is ambiguous at pi; the magnitude is still well defined.
        let r = exp(&Vector3::new(0.0, PI, 0.0));
        let w = log(&r);
        assert!((w.norm() - PI).abs() < 1e-9);
    }

    #[test]
    fn test_hat_antisymmetric_and_cross() {
        let w = Vector3::new(1.0, 2.0, 3.0);
        let h = hat(&w);
        assert!((h + h.transpose()).norm() < TOLERANCE);

        let v = Vector3::new(-0.5, 0.25, 2.0);
        assert!((h * v - w.cross(&v)).norm() < TOLERANCE);
    }

    #[test]
    fn test_vee_inverts_hat() {
        let w = Vector3::new(-1.0, 0.5, 2.5);
        assert_eq!(vee(&hat(&w)), w);
    }
}
