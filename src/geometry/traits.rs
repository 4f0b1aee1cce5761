use crate::connectivity::Topidx;
use crate::helpers::aliases::{Mat3, Vec3};
use nalgebra::RealField;
use num_traits::{Float, FromPrimitive};

/// Scalar type of the reference-to-Cartesian mappings.
pub trait RealNumber: Float + FromPrimitive + RealField {}

impl RealNumber for f32 {}
impl RealNumber for f64 {}

/// A curvilinear mapping from per-tree reference coordinates into
/// Cartesian space.
///
/// The reference cube is `[-1, 1]^3`, with `[1, 2]` on the radial axis of
/// shell-mapped trees. Implementations are pure: the same `(tree, abc)`
/// yields bit-identical output, and nothing is cached across calls, so a
/// geometry value may be shared freely between threads. Consumers must not
/// carry Jacobian data across tree boundaries.
pub trait Geometry {
    type Scalar: RealNumber;

    /// The forward map; continuous across the tree interfaces of the
    /// associated connectivity.
    fn transform(&self, tree: Topidx, abc: &Vec3<Self::Scalar>) -> Vec3<Self::Scalar>;

    /// The Jacobian of [`Geometry::transform`] and its determinant. The
    /// determinant is positive everywhere inside the reference cube.
    fn jacobian(&self, tree: Topidx, abc: &Vec3<Self::Scalar>)
        -> (Mat3<Self::Scalar>, Self::Scalar);

    /// Determinant-only path; agrees with [`Geometry::jacobian`] to
    /// rounding. Override where a closed form is cheaper.
    fn jacobian_determinant(&self, tree: Topidx, abc: &Vec3<Self::Scalar>) -> Self::Scalar {
        self.jacobian(tree, abc).1
    }

    /// The inverse transpose of the Jacobian together with the determinant,
    /// so callers can reuse it without recomputation.
    ///
    /// The provided implementation forms the nine cofactors of the
    /// Jacobian and divides by the determinant; self-inverse geometries
    /// override it.
    fn jacobian_inverse_transpose(
        &self,
        tree: Topidx,
        abc: &Vec3<Self::Scalar>,
    ) -> (Mat3<Self::Scalar>, Self::Scalar) {
        let (j, det) = self.jacobian(tree, abc);
        debug_assert!(det > num_traits::zero(), "degenerate geometry mapping");

        // Cofactors of j; dividing by det gives the inverse transpose
        // directly, the transposition being absorbed by the adjugate.
        let cof = Mat3::new(
            j.m22 * j.m33 - j.m23 * j.m32,
            j.m23 * j.m31 - j.m21 * j.m33,
            j.m21 * j.m32 - j.m22 * j.m31,
            j.m13 * j.m32 - j.m12 * j.m33,
            j.m11 * j.m33 - j.m13 * j.m31,
            j.m12 * j.m31 - j.m11 * j.m32,
            j.m12 * j.m23 - j.m13 * j.m22,
            j.m13 * j.m21 - j.m11 * j.m23,
            j.m11 * j.m22 - j.m12 * j.m21,
        );
        (cof / det, det)
    }
}
