//! Reference geometry: curvilinear mappings from tree reference cubes
//! into Cartesian space, with Jacobians.

pub mod identity;
pub mod shell;
pub mod sphere;
pub mod traits;

pub use identity::IdentityGeometry;
pub use shell::ShellGeometry;
pub use sphere::SphereGeometry;
pub use traits::{Geometry, RealNumber};

use crate::helpers::aliases::{Mat3, Vec3};

/// One row per spherical patch: for each Cartesian output axis, the index
/// into the patch-local triple `(q*x, q*y, q)` and the sign it receives.
/// Rows are determinant +1 axis permutations, ordered front, top, back,
/// right, bottom, left.
pub(crate) const PATCH_FRAMES: [[(usize, i8); 3]; 6] = [
    [(0, 1), (2, -1), (1, 1)],  // front  (-y)
    [(0, 1), (1, 1), (2, 1)],   // top    (+z)
    [(0, 1), (2, 1), (1, -1)],  // back   (+y)
    [(2, 1), (0, 1), (1, 1)],   // right  (+x)
    [(1, 1), (0, 1), (2, -1)],  // bottom (-z)
    [(2, -1), (1, 1), (0, 1)],  // left   (-x)
];

/// Shell patch order (right, bottom, left, top, back, front) expressed as
/// indices into [`PATCH_FRAMES`].
pub(crate) const SHELL_PATCH_FRAMES: [usize; 6] = [3, 4, 5, 1, 2, 0];

/// Applies a patch frame to a patch-local triple.
#[inline]
pub(crate) fn frame_point<S: RealNumber>(frame: &[(usize, i8); 3], uvw: [S; 3]) -> Vec3<S> {
    Vec3::from_fn(|axis, _| {
        let (src, sign) = frame[axis];
        if sign < 0 {
            -uvw[src]
        } else {
            uvw[src]
        }
    })
}

/// Applies a patch frame to the rows of a patch-local Jacobian.
#[inline]
pub(crate) fn frame_matrix<S: RealNumber>(frame: &[(usize, i8); 3], rows: [[S; 3]; 3]) -> Mat3<S> {
    Mat3::from_fn(|axis, col| {
        let (src, sign) = frame[axis];
        if sign < 0 {
            -rows[src][col]
        } else {
            rows[src][col]
        }
    })
}

#[cfg(test)]
pub(crate) mod tests_support {
    use super::{frame_point, Geometry, PATCH_FRAMES};
    use crate::connectivity::Topidx;
    use crate::helpers::aliases::{Mat3, Vec3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Samples interior points of every tree and checks the Jacobian
    /// contract: positive determinant, fast path agreeing with the full
    /// Jacobian, and the inverse transpose actually inverting.
    pub fn check_geometry_on<G: Geometry<Scalar = f64>>(
        geometry: &G,
        num_trees: usize,
        radial_lo: f64,
        radial_hi: f64,
    ) {
        let mut rng = StdRng::seed_from_u64(0x0c70f0);
        for tree in 0..num_trees as Topidx {
            for _ in 0..40 {
                let abc = Vec3::new(
                    rng.gen_range(-0.999..0.999),
                    rng.gen_range(-0.999..0.999),
                    rng.gen_range(radial_lo + 1e-3..radial_hi - 1e-3),
                );

                let (jacobian, det) = geometry.jacobian(tree, &abc);
                let fast = geometry.jacobian_determinant(tree, &abc);
                assert!(det > 0.0, "tree {} at {:?}: detJ = {}", tree, abc, det);
                assert!(
                    (fast - det).abs() <= 1e-10 * det.abs().max(1.0),
                    "determinant paths disagree: {} vs {}",
                    fast,
                    det
                );

                let (jit, det2) = geometry.jacobian_inverse_transpose(tree, &abc);
                assert_eq!(det2, det);
                let product = jit.transpose() * jacobian;
                let error = (product - Mat3::identity()).norm();
                assert!(error < 1e-10, "Jit does not invert J: error {}", error);
            }
        }
    }

    /// For a point on a tangential patch boundary, finds the other patch
    /// containing it and the matching reference coordinates there.
    /// `to_patch` translates a frame index into the caller's patch
    /// numbering and returns `None` for frames that are not in use.
    pub fn frame_partner_point(
        frame: &[(usize, i8); 3],
        abc: &Vec3<f64>,
        to_patch: impl Fn(usize) -> Option<usize>,
        self_patch: usize,
    ) -> Option<(usize, Vec3<f64>)> {
        let quarter_pi = std::f64::consts::FRAC_PI_4;
        let direction = frame_point(
            frame,
            [
                f64::tan(abc.x * quarter_pi),
                f64::tan(abc.y * quarter_pi),
                1.0,
            ],
        );

        for (candidate, other) in PATCH_FRAMES.iter().enumerate() {
            let Some(patch) = to_patch(candidate) else {
                continue;
            };
            if patch == self_patch {
                continue;
            }

            // Invert the signed permutation.
            let mut uvw = [0.0; 3];
            for (axis, &(src, sign)) in other.iter().enumerate() {
                uvw[src] = sign as f64 * direction[axis];
            }
            let tol = 1e-9;
            if (uvw[2] - 1.0).abs() < tol && uvw[0].abs() <= 1.0 + tol && uvw[1].abs() <= 1.0 + tol
            {
                return Some((
                    patch,
                    Vec3::new(
                        f64::atan(uvw[0]) / quarter_pi,
                        f64::atan(uvw[1]) / quarter_pi,
                        abc.z,
                    ),
                ));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_frames_are_rotations() {
        for frame in &PATCH_FRAMES {
            let mut sources: Vec<usize> = frame.iter().map(|&(src, _)| src).collect();
            sources.sort_unstable();
            assert_eq!(sources, [0, 1, 2]);

            // Signed permutation parity times sign product must be +1.
            let perm: Vec<usize> = frame.iter().map(|&(src, _)| src).collect();
            let mut parity = 1i8;
            for i in 0..3 {
                for j in i + 1..3 {
                    if perm[i] > perm[j] {
                        parity = -parity;
                    }
                }
            }
            let signs: i8 = frame.iter().map(|&(_, sign)| sign).product();
            assert_eq!(parity * signs, 1, "frame must preserve orientation");
        }
    }

    #[test]
    fn patch_frames_point_at_their_directions() {
        // The patch center (x = y = 0) maps to +- one Cartesian axis.
        let expected = [
            [0.0, -1.0, 0.0], // front
            [0.0, 0.0, 1.0],  // top
            [0.0, 1.0, 0.0],  // back
            [1.0, 0.0, 0.0],  // right
            [0.0, 0.0, -1.0], // bottom
            [-1.0, 0.0, 0.0], // left
        ];
        for (frame, direction) in PATCH_FRAMES.iter().zip(expected) {
            let center = frame_point(frame, [0.0, 0.0, 1.0]);
            assert_eq!([center.x, center.y, center.z], direction);
        }
    }
}
