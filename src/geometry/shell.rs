use super::traits::{Geometry, RealNumber};
use super::{frame_matrix, frame_point, PATCH_FRAMES, SHELL_PATCH_FRAMES};
use crate::connectivity::Topidx;
use crate::helpers::aliases::{Mat3, Vec3};
use num_traits::Float;

/// A six-patch spherical shell between radii `r1 < r2`, tiled by the 24
/// trees of [`crate::connectivity::Connectivity::shell`].
///
/// The two in-face axes are graded with a tangent so that equal reference
/// steps give roughly equal surface spacing; the radial axis (reference
/// `[1, 2]`) is graded exponentially between the radii.
#[derive(Debug, Clone, Copy)]
pub struct ShellGeometry<TScalar: RealNumber> {
    r2_by_r1: TScalar,
    r1_sq_by_r2: TScalar,
    log_r2_by_r1: TScalar,
}

impl<TScalar: RealNumber> ShellGeometry<TScalar> {
    pub fn new(r1: TScalar, r2: TScalar) -> Self {
        assert!(
            TScalar::zero() < r1 && r1 < r2,
            "shell radii must satisfy 0 < r1 < r2"
        );
        Self {
            r2_by_r1: r2 / r1,
            r1_sq_by_r2: r1 * r1 / r2,
            log_r2_by_r1: Float::ln(r2 / r1),
        }
    }

    #[inline]
    fn frame(tree: Topidx) -> &'static [(usize, i8); 3] {
        assert!((0..24).contains(&tree), "shell tree index out of range");
        &PATCH_FRAMES[SHELL_PATCH_FRAMES[tree as usize / 4]]
    }
}

impl<TScalar: RealNumber> Geometry for ShellGeometry<TScalar> {
    type Scalar = TScalar;

    fn transform(&self, tree: Topidx, abc: &Vec3<TScalar>) -> Vec3<TScalar> {
        shell_point(
            Self::frame(tree),
            self.r1_sq_by_r2,
            self.r2_by_r1,
            abc,
        )
    }

    fn jacobian(&self, tree: Topidx, abc: &Vec3<TScalar>) -> (Mat3<TScalar>, TScalar) {
        shell_jacobian(
            Self::frame(tree),
            self.r1_sq_by_r2,
            self.r2_by_r1,
            self.log_r2_by_r1,
            abc,
        )
    }

    fn jacobian_determinant(&self, tree: Topidx, abc: &Vec3<TScalar>) -> TScalar {
        Self::frame(tree);
        shell_determinant(self.r1_sq_by_r2, self.r2_by_r1, self.log_r2_by_r1, abc)
    }
}

#[inline]
fn quarter_pi<S: RealNumber>() -> S {
    S::from_f64(std::f64::consts::FRAC_PI_4).unwrap()
}

fn check_domain<S: RealNumber>(abc: &Vec3<S>) {
    let tol = S::from_f64(1e-9).unwrap();
    debug_assert!(Float::abs(abc.x) <= S::one() + tol, "reference x out of range");
    debug_assert!(Float::abs(abc.y) <= S::one() + tol, "reference y out of range");
    debug_assert!(
        abc.z >= S::one() - tol && abc.z <= S::from_f64(2.0).unwrap() + tol,
        "radial reference coordinate out of range"
    );
}

/// Forward shell map in a given patch frame.
pub(crate) fn shell_point<S: RealNumber>(
    frame: &[(usize, i8); 3],
    r1_sq_by_r2: S,
    r2_by_r1: S,
    abc: &Vec3<S>,
) -> Vec3<S> {
    check_domain(abc);
    let x = Float::tan(abc.x * quarter_pi());
    let y = Float::tan(abc.y * quarter_pi());
    let r = r1_sq_by_r2 * Float::powf(r2_by_r1, abc.z);
    let q = r / Float::sqrt(x * x + y * y + S::one());
    frame_point(frame, [q * x, q * y, q])
}

/// Jacobian of the shell map with its numerically evaluated determinant.
pub(crate) fn shell_jacobian<S: RealNumber>(
    frame: &[(usize, i8); 3],
    r1_sq_by_r2: S,
    r2_by_r1: S,
    log_ratio: S,
    abc: &Vec3<S>,
) -> (Mat3<S>, S) {
    check_domain(abc);
    let one = S::one();
    let qp = quarter_pi::<S>();

    let x = Float::tan(abc.x * qp);
    let y = Float::tan(abc.y * qp);
    let derx = qp * (one + x * x);
    let dery = qp * (one + y * y);
    let t = one + x * x + y * y;
    let r = r1_sq_by_r2 * Float::powf(r2_by_r1, abc.z);
    let q = r / Float::sqrt(t);

    let rows = [
        [
            q * derx * (one + y * y) / t,
            -q * x * y * dery / t,
            q * log_ratio * x,
        ],
        [
            -q * x * y * derx / t,
            q * dery * (one + x * x) / t,
            q * log_ratio * y,
        ],
        [-q * x * derx / t, -q * y * dery / t, q * log_ratio],
    ];
    let jacobian = frame_matrix(frame, rows);
    let det = jacobian.determinant();
    debug_assert!(det > S::zero(), "degenerate shell mapping");
    (jacobian, det)
}

/// Closed-form determinant of the shell map.
pub(crate) fn shell_determinant<S: RealNumber>(
    r1_sq_by_r2: S,
    r2_by_r1: S,
    log_ratio: S,
    abc: &Vec3<S>,
) -> S {
    check_domain(abc);
    let one = S::one();
    let qp = quarter_pi::<S>();

    let x = Float::tan(abc.x * qp);
    let y = Float::tan(abc.y * qp);
    let derx = qp * (one + x * x);
    let dery = qp * (one + y * y);
    let r = r1_sq_by_r2 * Float::powf(r2_by_r1, abc.z);
    let q = r / Float::sqrt(one + x * x + y * y);

    let det = q * q * q * derx * dery * log_ratio;
    debug_assert!(det > S::zero(), "degenerate shell mapping");
    det
}
