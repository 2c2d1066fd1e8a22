//! Representation-polymorphic rotations in SO(3).
//!
//! A rotation value is a pair of a compile-time representation tag and the
//! storage that tag selects. Four representations interoperate:
//!
//! Representation | Tag                 | Storage              | Coordinates
//! -------------- | ------------------- | -------------------- | -----------
//! Rotation matrix| [`RotationMatrixRep`] | `Rotation3<f64>`   | no (canonical)
//! Axis-angle     | [`AxisAngleRep`]      | [`AxisAngle`]      | no
//! Unit quaternion| [`QuaternionRep`]     | `UnitQuaternion<f64>` | no
//! Rotation vector| [`RotationVectorRep`] | `Vector3<f64>`     | yes
//!
//! Every cross-representation operation picks the cheapest conversion path
//! available for the concrete tag pair. The cost of each ordered pair, in
//! conversion hops:
//!
//! from \ to | Matrix | RotVec | AxisAngle | Quaternion
//! --------- | ------ | ------ | --------- | ----------
//! Matrix    | 0      | 1      | 1         | 1
//! RotVec    | 1      | 0      | 1 direct  | 2 via canonical
//! AxisAngle | 1      | 1 direct | 0       | 1 direct
//! Quaternion| 1      | 2 via canonical | 1 direct | 0
//!
//! Single-hop entries touching the matrix column/row are native conversions
//! to or from the canonical representation; the remaining single-hop entries
//! are hand-specified direct shortcuts that skip the canonical detour for
//! accuracy. The two double-hop entries have no direct shortcut and always
//! route through the canonical rotation matrix.
//!
//! The rotation-vector representation is a minimal coordinate chart, not a
//! redundant group encoding: it is carried in and out of the group through
//! the exponential and logarithm maps in [`maps`], and its "composition" is
//! `log(exp(a) * exp(b))` rather than any direct formula.

use std::fmt::Debug;

use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};

pub mod axis_angle;
pub mod convert;
pub mod maps;
pub mod matrix;
pub mod ops;
pub mod quaternion;
pub mod vector;

pub use axis_angle::{AxisAngle, AxisAngleRep, SO3AxisAngle};
pub use convert::{CanonicalConvert, ConversionPath, ConvertTo};
pub use matrix::{RotationMatrixRep, SO3Matrix};
pub use ops::{ApproxCmp, Compose, GroupOps};
pub use quaternion::{QuaternionRep, SO3Quaternion};
pub use vector::{RotationVectorRep, SO3Vector};

mod sealed {
    pub trait Sealed {}
}

pub(crate) use sealed::Sealed;

/// Compile-time registry entry for a rotation representation.
///
/// Maps a representation tag to its concrete storage type and metadata. The
/// trait is sealed: the set of representations is closed, and requesting an
/// unsupported tag is a compile-time failure rather than a runtime one.
pub trait Rep: Sealed + Copy + Debug + 'static {
    /// Concrete storage held by [`SO3`] values of this representation.
    type Storage: Clone + Copy + PartialEq + Debug;

    /// True only for minimal coordinate charts (the rotation vector), false
    /// for redundant group encodings.
    const IS_COORDINATES: bool;

    /// Human-readable representation name.
    const NAME: &'static str;
}

/// The representation conversions are mediated through when no direct
/// shortcut exists.
pub type Canonical = RotationMatrixRep;

/// Raw storage of the canonical representation.
pub type CanonicalData = Rotation3<f64>;

/// A rotation stored in the canonical representation.
pub type SO3Canonical = SO3<Canonical>;

/// A rotation in SO(3), stored in representation `R`.
///
/// The payload is private; collaborators obtain concrete forms through the
/// conversion surface ([`SO3::convert`], [`SO3::rotation_matrix`], ...) and
/// the per-representation accessors.
pub struct SO3<R: Rep = Canonical> {
    data: R::Storage,
}

impl<R: Rep> SO3<R> {
    /// Wrap raw storage. Crate-internal: representation payloads are only
    /// constructed by the conversion and dispatch layers.
    pub(crate) fn from_storage(data: R::Storage) -> Self {
        SO3 { data }
    }

    pub(crate) fn storage(&self) -> &R::Storage {
        &self.data
    }

    pub(crate) fn storage_mut(&mut self) -> &mut R::Storage {
        &mut self.data
    }

    /// Whether this representation is a minimal coordinate chart.
    pub fn is_coordinates() -> bool {
        R::IS_COORDINATES
    }

    /// Name of this representation.
    pub fn rep_name() -> &'static str {
        R::NAME
    }

    /// Convert into another representation, taking the cheapest path the
    /// conversion table allows for the `(R, Dst)` pair.
    pub fn convert<Dst: Rep>(&self) -> SO3<Dst>
    where
        R: ConvertTo<Dst>,
    {
        SO3::from_storage(<R as ConvertTo<Dst>>::convert(&self.data))
    }

    /// The conversion path the dispatch layer selects for `(R, Dst)`.
    pub fn conversion_path<Dst: Rep>() -> ConversionPath
    where
        R: ConvertTo<Dst>,
    {
        <R as ConvertTo<Dst>>::PATH
    }

    /// This rotation as a raw 3x3 matrix.
    pub fn rotation_matrix(&self) -> Matrix3<f64>
    where
        R: ConvertTo<RotationMatrixRep>,
    {
        <R as ConvertTo<RotationMatrixRep>>::convert(&self.data).into_inner()
    }

    /// This rotation as a unit quaternion.
    pub fn unit_quaternion(&self) -> UnitQuaternion<f64>
    where
        R: ConvertTo<QuaternionRep>,
    {
        <R as ConvertTo<QuaternionRep>>::convert(&self.data)
    }

    /// This rotation as a raw rotation vector (axis scaled by angle).
    pub fn rotation_vector(&self) -> Vector3<f64>
    where
        R: ConvertTo<RotationVectorRep>,
    {
        <R as ConvertTo<RotationVectorRep>>::convert(&self.data)
    }

    /// This rotation as an axis-angle pair.
    pub fn to_axis_angle(&self) -> AxisAngle
    where
        R: ConvertTo<AxisAngleRep>,
    {
        <R as ConvertTo<AxisAngleRep>>::convert(&self.data)
    }

    /// Compose with a rotation held in any representation; the result stays
    /// in `R`.
    pub fn compose<B: Rep>(&self, other: &SO3<B>) -> Self
    where
        R: Compose<B>,
    {
        SO3::from_storage(<R as Compose<B>>::compose(&self.data, other.storage()))
    }

    /// In-place variant of [`SO3::compose`].
    pub fn compose_in_place<B: Rep>(&mut self, other: &SO3<B>)
    where
        R: Compose<B>,
    {
        <R as Compose<B>>::compose_in_place(&mut self.data, other.storage());
    }

    /// Approximate equality against a rotation in any representation.
    ///
    /// Same-representation pairs compare their raw storage with a norm-based
    /// closeness test; cross-representation pairs convert both sides to the
    /// canonical rotation matrix and compare there.
    pub fn is_approx<B: Rep>(&self, other: &SO3<B>, tol: f64) -> bool
    where
        R: ApproxCmp<B>,
    {
        <R as ApproxCmp<B>>::is_approx(&self.data, other.storage(), tol)
    }
}

impl<R: GroupOps> SO3<R> {
    /// The identity rotation.
    pub fn identity() -> Self {
        SO3::from_storage(R::identity())
    }

    /// Reset to the identity rotation.
    pub fn set_identity(&mut self) {
        self.data = R::identity();
    }

    /// Whether this value is the identity rotation, using the
    /// representation-specific zero test.
    pub fn is_identity(&self) -> bool {
        R::is_identity(&self.data)
    }

    /// The inverse rotation, via the representation's closed form.
    pub fn inverse(&self) -> Self {
        SO3::from_storage(R::inverse(&self.data))
    }

    /// Invert in place.
    pub fn invert(&mut self) {
        self.data = R::inverse(&self.data);
    }

    /// A random rotation. Axis-angle draws a uniform random axis and a
    /// bounded angle; this is not a Haar-uniform sample over SO(3).
    pub fn random() -> Self {
        SO3::from_storage(R::random())
    }

    /// Replace this value with a random rotation.
    pub fn set_random(&mut self) {
        self.data = R::random();
    }

    /// Whether the stored payload satisfies its representation invariant
    /// within `tol` (orthonormality, unit axis, unit norm).
    pub fn is_valid(&self, tol: f64) -> bool {
        R::is_valid(&self.data, tol)
    }

    /// Apply this rotation to a 3-vector.
    pub fn rotate(&self, v: &Vector3<f64>) -> Vector3<f64> {
        R::rotate(&self.data, v)
    }
}

impl<R: CanonicalConvert> SO3<R> {
    /// Exponential map: build a rotation in representation `R` from
    /// Lie-algebra coordinates.
    pub fn exp(w: &Vector3<f64>) -> Self {
        SO3::from_storage(R::from_canonical(maps::exp(w)))
    }

    /// Logarithm map: the Lie-algebra coordinates of this rotation.
    pub fn log(&self) -> Vector3<f64> {
        maps::log(R::to_canonical(&self.data).as_ref())
    }
}

/// Uniform operation surface over every representation.
///
/// Implemented once for all `SO3<R>`; lets collaborators that do not care
/// about the storage choice (kinematic chains, gradient assembly) hold and
/// combine rotations generically.
pub trait Rotation: Clone + PartialEq + std::fmt::Display {
    /// The identity rotation.
    fn identity() -> Self;
    /// Reset to the identity rotation.
    fn set_identity(&mut self);
    /// Whether this value is the identity rotation.
    fn is_identity(&self) -> bool;
    /// The inverse rotation.
    fn inverse(&self) -> Self;
    /// Invert in place.
    fn invert(&mut self);
    /// A random rotation.
    fn random() -> Self;
    /// Replace this value with a random rotation.
    fn set_random(&mut self);
    /// Group multiplication.
    fn compose(&self, other: &Self) -> Self;
    /// In-place group multiplication.
    fn compose_in_place(&mut self, other: &Self);
    /// Norm-based approximate equality.
    fn is_approx(&self, other: &Self, tol: f64) -> bool;
    /// Representation-invariant check.
    fn is_valid(&self, tol: f64) -> bool;
    /// Apply the rotation to a 3-vector.
    fn rotate(&self, v: &Vector3<f64>) -> Vector3<f64>;
    /// Exponential map from Lie-algebra coordinates.
    fn exp(w: &Vector3<f64>) -> Self;
    /// Logarithm map to Lie-algebra coordinates.
    fn log(&self) -> Vector3<f64>;
}

impl<R> Rotation for SO3<R>
where
    R: GroupOps + CanonicalConvert + Compose<R> + ApproxCmp<R>,
    SO3<R>: std::fmt::Display,
{
    fn identity() -> Self {
        SO3::identity()
    }

    fn set_identity(&mut self) {
        SO3::set_identity(self);
    }

    fn is_identity(&self) -> bool {
        SO3::is_identity(self)
    }

    fn inverse(&self) -> Self {
        SO3::inverse(self)
    }

    fn invert(&mut self) {
        SO3::invert(self);
    }

    fn random() -> Self {
        SO3::random()
    }

    fn set_random(&mut self) {
        SO3::set_random(self);
    }

    fn compose(&self, other: &Self) -> Self {
        SO3::compose(self, other)
    }

    fn compose_in_place(&mut self, other: &Self) {
        SO3::compose_in_place(self, other);
    }

    fn is_approx(&self, other: &Self, tol: f64) -> bool {
        SO3::is_approx(self, other, tol)
    }

    fn is_valid(&self, tol: f64) -> bool {
        SO3::is_valid(self, tol)
    }

    fn rotate(&self, v: &Vector3<f64>) -> Vector3<f64> {
        SO3::rotate(self, v)
    }

    fn exp(w: &Vector3<f64>) -> Self {
        SO3::exp(w)
    }

    fn log(&self) -> Vector3<f64> {
        SO3::log(self)
    }
}

impl<R: Rep> Clone for SO3<R> {
    fn clone(&self) -> Self {
        SO3 { data: self.data }
    }
}

impl<R: Rep> Copy for SO3<R> {}

impl<R: Rep> Debug for SO3<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SO3")
            .field("rep", &R::NAME)
            .field("data", &self.data)
            .finish()
    }
}

/// Exact equality with the representation's own semantics; axis-angle
/// treats any two zero-angle values as equal regardless of axis.
impl<R: GroupOps> PartialEq for SO3<R> {
    fn eq(&self, other: &Self) -> bool {
        R::exact_eq(&self.data, &other.data)
    }
}

impl<R: GroupOps> Default for SO3<R> {
    fn default() -> Self {
        SO3::identity()
    }
}
