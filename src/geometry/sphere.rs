use super::shell::{shell_determinant, shell_jacobian, shell_point};
use super::traits::{Geometry, RealNumber};
use super::{frame_matrix, frame_point, PATCH_FRAMES};
use crate::connectivity::Topidx;
use crate::helpers::aliases::{Mat3, Vec3};
use num_traits::Float;

/// A solid sphere of radius `r2` for the 13 trees of
/// [`crate::connectivity::Connectivity::sphere`]: an outer shell between
/// `r1` and `r2`, an inner shell between `r0` and `r1` that blends from
/// the tangent grading into a cube, and a center cube.
///
/// The blend parameter `p = 2 - abc[2]` moves the inner shell from the
/// pure shell map at its outer boundary (`p = 0`) to a linear map at the
/// center-cube interface (`p = 1`), which keeps the mapping continuous on
/// both radial seams.
#[derive(Debug, Clone, Copy)]
pub struct SphereGeometry<TScalar: RealNumber> {
    outer_r1_sq_by_r2: TScalar,
    outer_r2_by_r1: TScalar,
    outer_log: TScalar,
    inner_r0_sq_by_r1: TScalar,
    inner_r1_by_r0: TScalar,
    inner_log: TScalar,
    center_scale: TScalar,
}

impl<TScalar: RealNumber> SphereGeometry<TScalar> {
    pub fn new(r0: TScalar, r1: TScalar, r2: TScalar) -> Self {
        assert!(
            TScalar::zero() < r0 && r0 < r1 && r1 < r2,
            "sphere radii must satisfy 0 < r0 < r1 < r2"
        );
        Self {
            outer_r1_sq_by_r2: r1 * r1 / r2,
            outer_r2_by_r1: r2 / r1,
            outer_log: Float::ln(r2 / r1),
            inner_r0_sq_by_r1: r0 * r0 / r1,
            inner_r1_by_r0: r1 / r0,
            inner_log: Float::ln(r1 / r0),
            center_scale: r0 / Float::sqrt(TScalar::from_f64(3.0).unwrap()),
        }
    }

    #[inline]
    fn frame(tree: Topidx) -> &'static [(usize, i8); 3] {
        &PATCH_FRAMES[tree as usize % 6]
    }

    fn inner_parts(&self, abc: &Vec3<TScalar>) -> InnerParts<TScalar> {
        let one = TScalar::one();
        let two = TScalar::from_f64(2.0).unwrap();
        let qp = TScalar::from_f64(std::f64::consts::FRAC_PI_4).unwrap();
        debug_assert!(
            abc.z >= one - TScalar::from_f64(1e-9).unwrap()
                && abc.z <= two + TScalar::from_f64(1e-9).unwrap(),
            "radial reference coordinate out of range"
        );

        let p = two - abc.z;
        let m = one - p;
        let tanx = Float::tan(abc.x * qp);
        let tany = Float::tan(abc.y * qp);
        let x = p * abc.x + m * tanx;
        let y = p * abc.y + m * tany;
        let r = self.inner_r0_sq_by_r1 * Float::powf(self.inner_r1_by_r0, abc.z);
        let s = one + m * (tanx * tanx + tany * tany) + two * p;
        let q = r / Float::sqrt(s);

        InnerParts {
            p,
            m,
            qp,
            tanx,
            tany,
            x,
            y,
            s,
            q,
        }
    }

    fn inner_jacobian(&self, frame: &[(usize, i8); 3], abc: &Vec3<TScalar>) -> (Mat3<TScalar>, TScalar) {
        let one = TScalar::one();
        let two = TScalar::from_f64(2.0).unwrap();
        let InnerParts {
            p,
            m,
            qp,
            tanx,
            tany,
            x,
            y,
            s,
            q,
        } = self.inner_parts(abc);

        let dtanx = qp * (one + tanx * tanx);
        let dtany = qp * (one + tany * tany);
        let dx_da = p + m * dtanx;
        let dy_db = p + m * dtany;
        let dx_dc = tanx - abc.x;
        let dy_dc = tany - abc.y;
        let ds_da = two * m * tanx * dtanx;
        let ds_db = two * m * tany * dtany;
        let ds_dc = tanx * tanx + tany * tany - two;
        let dq_da = -q * ds_da / (two * s);
        let dq_db = -q * ds_db / (two * s);
        let dq_dc = q * (self.inner_log - ds_dc / (two * s));

        let rows = [
            [q * dx_da + x * dq_da, x * dq_db, q * dx_dc + x * dq_dc],
            [y * dq_da, q * dy_db + y * dq_db, q * dy_dc + y * dq_dc],
            [dq_da, dq_db, dq_dc],
        ];
        let jacobian = frame_matrix(frame, rows);
        let det = jacobian.determinant();
        debug_assert!(det > TScalar::zero(), "degenerate sphere mapping");
        (jacobian, det)
    }
}

struct InnerParts<S> {
    p: S,
    m: S,
    qp: S,
    tanx: S,
    tany: S,
    x: S,
    y: S,
    s: S,
    q: S,
}

impl<TScalar: RealNumber> Geometry for SphereGeometry<TScalar> {
    type Scalar = TScalar;

    fn transform(&self, tree: Topidx, abc: &Vec3<TScalar>) -> Vec3<TScalar> {
        match tree {
            0..=5 => shell_point(
                Self::frame(tree),
                self.outer_r1_sq_by_r2,
                self.outer_r2_by_r1,
                abc,
            ),
            6..=11 => {
                let InnerParts { x, y, q, .. } = self.inner_parts(abc);
                frame_point(Self::frame(tree), [q * x, q * y, q])
            }
            12 => abc * self.center_scale,
            _ => panic!("sphere tree index out of range"),
        }
    }

    fn jacobian(&self, tree: Topidx, abc: &Vec3<TScalar>) -> (Mat3<TScalar>, TScalar) {
        match tree {
            0..=5 => shell_jacobian(
                Self::frame(tree),
                self.outer_r1_sq_by_r2,
                self.outer_r2_by_r1,
                self.outer_log,
                abc,
            ),
            6..=11 => self.inner_jacobian(Self::frame(tree), abc),
            12 => {
                let scale = self.center_scale;
                (Mat3::from_diagonal_element(scale), scale * scale * scale)
            }
            _ => panic!("sphere tree index out of range"),
        }
    }

    fn jacobian_determinant(&self, tree: Topidx, abc: &Vec3<TScalar>) -> TScalar {
        match tree {
            0..=5 => shell_determinant(
                self.outer_r1_sq_by_r2,
                self.outer_r2_by_r1,
                self.outer_log,
                abc,
            ),
            6..=11 => self.inner_jacobian(Self::frame(tree), abc).1,
            12 => {
                let scale = self.center_scale;
                scale * scale * scale
            }
            _ => panic!("sphere tree index out of range"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests_support::{check_geometry_on, frame_partner_point};
    use super::*;

    fn geometry() -> SphereGeometry<f64> {
        SphereGeometry::new(0.5, 1.0, 2.0)
    }

    #[test]
    fn center_cube_is_a_scaled_identity() {
        let g = geometry();
        let scale = 0.5 / f64::sqrt(3.0);

        let xyz = g.transform(12, &Vec3::new(1.0, 1.0, 1.0));
        assert!((xyz - Vec3::new(scale, scale, scale)).norm() < 1e-15);
        assert!((g.jacobian_determinant(12, &Vec3::new(1.0, 1.0, 1.0)) - scale.powi(3)).abs() < 1e-15);
    }

    #[test]
    fn outer_shell_hits_the_patch_center() {
        let g = geometry();
        // Tree 3 is the +x patch of the sphere ordering.
        let xyz = g.transform(3, &Vec3::new(0.0, 0.0, 1.5));
        assert!((xyz - Vec3::new(f64::sqrt(2.0), 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn radial_seams_are_continuous() {
        let g = geometry();
        for patch in 0..6 {
            for a in [-0.8, -0.1, 0.6] {
                for b in [-0.7, 0.2, 0.9] {
                    // Outer shell bottom meets inner shell top.
                    let outer = g.transform(patch, &Vec3::new(a, b, 1.0));
                    let inner = g.transform(patch + 6, &Vec3::new(a, b, 2.0));
                    assert!((outer - inner).norm() < 1e-12);
                    assert!((outer.norm() - 1.0).abs() < 1e-12);

                    // Inner shell bottom meets the center cube.
                    let seam = g.transform(patch + 6, &Vec3::new(a, b, 1.0));
                    let frame = &PATCH_FRAMES[patch as usize];
                    let cube = g.transform(12, &frame_point(frame, [a, b, 1.0]));
                    assert!((seam - cube).norm() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn shell_trees_satisfy_the_jacobian_contract() {
        check_geometry_on(&geometry(), 12, 1.0, 2.0);
    }

    #[test]
    fn center_cube_satisfies_the_jacobian_contract() {
        let g = geometry();
        let abc = Vec3::new(0.3, -0.8, 0.1);
        let (jacobian, det) = g.jacobian(12, &abc);
        assert!(det > 0.0);
        assert!((det - g.jacobian_determinant(12, &abc)).abs() < 1e-15);

        let (jit, _) = g.jacobian_inverse_transpose(12, &abc);
        assert!((jit.transpose() * jacobian - Mat3::identity()).norm() < 1e-12);
    }

    #[test]
    fn adjacent_patches_agree_on_shared_boundaries() {
        let g = geometry();
        for inner in [false, true] {
            for patch in 0..6usize {
                let frame = &PATCH_FRAMES[patch];
                for (fixed_axis, fixed) in [(0, -1.0), (0, 1.0), (1, -1.0), (1, 1.0)] {
                    for along in [-0.75, 0.1, 0.8] {
                        let mut abc = Vec3::new(along, along, 1.6);
                        abc[fixed_axis] = fixed;

                        let base = if inner { 6 } else { 0 };
                        let here = g.transform((base + patch) as Topidx, &abc);
                        let (other, nabc) =
                            frame_partner_point(frame, &abc, Some, patch)
                                .expect("boundary point must belong to a second patch");
                        let there = g.transform((base + other) as Topidx, &nabc);
                        assert!(
                            (here - there).norm() < 1e-12,
                            "patch seam mismatch between {} and {}",
                            patch,
                            other
                        );
                    }
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "sphere radii")]
    fn disordered_radii_are_rejected() {
        let _ = SphereGeometry::new(1.0, 0.5, 2.0);
    }
}
