//! Conversion machinery between rotation representations.
//!
//! Two layers cooperate here:
//!
//! - [`CanonicalConvert`] carries any representation to and from the
//!   canonical rotation matrix. This is the fallback every conversion can
//!   take, and the only layer that touches the manifold maps (the rotation
//!   vector enters and leaves the group through `exp`/`log`).
//! - [`ConvertTo`] is the pairwise dispatch table: all 16 ordered tag pairs
//!   resolved at compile time, each carrying the [`ConversionPath`] it
//!   takes. Direct shortcuts (rotation vector <-> axis-angle, axis-angle
//!   <-> quaternion) skip the canonical detour; the quaternion <->
//!   rotation-vector pair has no shortcut and always pays the double hop.

use std::borrow::Cow;

use nalgebra::{Rotation3, Unit, UnitQuaternion, Vector3};

use super::axis_angle::{AxisAngle, AxisAngleRep};
use super::matrix::RotationMatrixRep;
use super::quaternion::QuaternionRep;
use super::vector::RotationVectorRep;
use super::{maps, CanonicalData, Rep};

/// The route a conversion takes between two representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionPath {
    /// Source and target representations coincide; no conversion.
    Identity,
    /// One hop: a native conversion to or from the canonical representation,
    /// or a hand-specified direct shortcut between non-canonical pairs.
    Single,
    /// Two hops through the canonical representation.
    Canonical,
}

impl ConversionPath {
    /// Number of conversion hops this path performs.
    pub const fn cost(self) -> u8 {
        match self {
            ConversionPath::Identity => 0,
            ConversionPath::Single => 1,
            ConversionPath::Canonical => 2,
        }
    }
}

/// Conversion to and from the canonical rotation matrix.
///
/// `to_canonical` returns the input by reference when the source already is
/// canonical, so the identity path carries no copy cost.
pub trait CanonicalConvert: Rep {
    /// Express the payload in the canonical representation.
    fn to_canonical(data: &Self::Storage) -> Cow<'_, CanonicalData>;

    /// Rebuild a payload of this representation from canonical data.
    fn from_canonical(canonical: CanonicalData) -> Self::Storage;
}

impl CanonicalConvert for RotationMatrixRep {
    fn to_canonical(data: &Self::Storage) -> Cow<'_, CanonicalData> {
        Cow::Borrowed(data)
    }

    fn from_canonical(canonical: CanonicalData) -> Self::Storage {
        canonical
    }
}

impl CanonicalConvert for AxisAngleRep {
    fn to_canonical(data: &Self::Storage) -> Cow<'_, CanonicalData> {
        Cow::Owned(if data.angle() == 0.0 {
            Rotation3::identity()
        } else {
            Rotation3::from_axis_angle(&Unit::new_unchecked(data.axis()), data.angle())
        })
    }

    fn from_canonical(canonical: CanonicalData) -> Self::Storage {
        // Extraction through the quaternion factorization stays well defined
        // at angle pi, up to the axis-sign ambiguity.
        match UnitQuaternion::from_rotation_matrix(&canonical).axis_angle() {
            Some((axis, angle)) => AxisAngle::from_parts(axis.into_inner(), angle),
            None => AxisAngle::identity(),
        }
    }
}

impl CanonicalConvert for QuaternionRep {
    fn to_canonical(data: &Self::Storage) -> Cow<'_, CanonicalData> {
        Cow::Owned(data.to_rotation_matrix())
    }

    fn from_canonical(canonical: CanonicalData) -> Self::Storage {
        UnitQuaternion::from_rotation_matrix(&canonical)
    }
}

impl CanonicalConvert for RotationVectorRep {
    fn to_canonical(data: &Self::Storage) -> Cow<'_, CanonicalData> {
        Cow::Owned(maps::exp(data))
    }

    fn from_canonical(canonical: CanonicalData) -> Self::Storage {
        maps::log(&canonical)
    }
}

/// One entry of the pairwise conversion dispatch table.
///
/// The operation layer always takes the lowest-cost path recorded in
/// [`ConvertTo::PATH`]; where a direct shortcut and the canonical route tie
/// on hop count, the shortcut wins (fewer basis changes).
pub trait ConvertTo<Dst: Rep>: Rep {
    /// The path this pair resolves to, fixed at compile time.
    const PATH: ConversionPath;

    /// Perform the conversion.
    fn convert(data: &Self::Storage) -> Dst::Storage;
}

/// Same representation: hand the payload back unchanged.
macro_rules! convert_identity {
    ($($rep:ty),* $(,)?) => {$(
        impl ConvertTo<$rep> for $rep {
            const PATH: ConversionPath = ConversionPath::Identity;

            fn convert(data: &Self::Storage) -> Self::Storage {
                *data
            }
        }
    )*};
}

convert_identity!(RotationMatrixRep, AxisAngleRep, QuaternionRep, RotationVectorRep);

/// Pairs with a canonical endpoint: one native hop through the canonical
/// layer.
macro_rules! convert_from_canonical_rep {
    ($($dst:ty),* $(,)?) => {$(
        impl ConvertTo<$dst> for RotationMatrixRep {
            const PATH: ConversionPath = ConversionPath::Single;

            fn convert(data: &Self::Storage) -> <$dst as Rep>::Storage {
                <$dst as CanonicalConvert>::from_canonical(*data)
            }
        }

        impl ConvertTo<RotationMatrixRep> for $dst {
            const PATH: ConversionPath = ConversionPath::Single;

            fn convert(data: &Self::Storage) -> CanonicalData {
                <$dst as CanonicalConvert>::to_canonical(data).into_owned()
            }
        }
    )*};
}

convert_from_canonical_rep!(AxisAngleRep, QuaternionRep, RotationVectorRep);

impl ConvertTo<AxisAngleRep> for RotationVectorRep {
    const PATH: ConversionPath = ConversionPath::Single;

    /// Direct shortcut: the angle is the vector norm, the axis its
    /// direction. At zero norm the axis is undefined and defaults to +X
    /// with angle zero.
    fn convert(data: &Self::Storage) -> AxisAngle {
        let norm = data.norm();
        if norm > 0.0 {
            AxisAngle::from_parts(data / norm, norm)
        } else {
            AxisAngle::identity()
        }
    }
}

impl ConvertTo<RotationVectorRep> for AxisAngleRep {
    const PATH: ConversionPath = ConversionPath::Single;

    /// Direct shortcut: angle times axis, unconditionally. A zero angle
    /// yields the zero vector whatever the stored axis.
    fn convert(data: &Self::Storage) -> Vector3<f64> {
        data.angle() * data.axis()
    }
}

impl ConvertTo<QuaternionRep> for AxisAngleRep {
    const PATH: ConversionPath = ConversionPath::Single;

    /// Direct shortcut: closed-form axis-angle to unit quaternion.
    fn convert(data: &Self::Storage) -> UnitQuaternion<f64> {
        if data.angle() == 0.0 {
            UnitQuaternion::identity()
        } else {
            UnitQuaternion::from_axis_angle(&Unit::new_unchecked(data.axis()), data.angle())
        }
    }
}

impl ConvertTo<AxisAngleRep> for QuaternionRep {
    const PATH: ConversionPath = ConversionPath::Single;

    /// Direct shortcut: closed-form unit quaternion to axis-angle, with the
    /// +X default axis at the identity.
    fn convert(data: &Self::Storage) -> AxisAngle {
        match data.axis_angle() {
            Some((axis, angle)) => AxisAngle::from_parts(axis.into_inner(), angle),
            None => AxisAngle::identity(),
        }
    }
}

impl ConvertTo<RotationVectorRep> for QuaternionRep {
    const PATH: ConversionPath = ConversionPath::Canonical;

    /// No direct shortcut exists for this pair; route through the canonical
    /// matrix.
    fn convert(data: &Self::Storage) -> Vector3<f64> {
        RotationVectorRep::from_canonical(QuaternionRep::to_canonical(data).into_owned())
    }
}

impl ConvertTo<QuaternionRep> for RotationVectorRep {
    const PATH: ConversionPath = ConversionPath::Canonical;

    /// No direct shortcut exists for this pair; route through the canonical
    /// matrix.
    fn convert(data: &Self::Storage) -> UnitQuaternion<f64> {
        QuaternionRep::from_canonical(RotationVectorRep::to_canonical(data).into_owned())
    }
}
