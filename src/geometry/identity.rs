use super::traits::{Geometry, RealNumber};
use crate::connectivity::Topidx;
use crate::helpers::aliases::{Mat3, Vec3};
use std::marker::PhantomData;

/// The trivial mapping: Cartesian coordinates equal reference coordinates.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityGeometry<TScalar: RealNumber> {
    marker: PhantomData<TScalar>,
}

impl<TScalar: RealNumber> IdentityGeometry<TScalar> {
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<TScalar: RealNumber> Geometry for IdentityGeometry<TScalar> {
    type Scalar = TScalar;

    #[inline]
    fn transform(&self, _tree: Topidx, abc: &Vec3<TScalar>) -> Vec3<TScalar> {
        *abc
    }

    #[inline]
    fn jacobian(&self, _tree: Topidx, _abc: &Vec3<TScalar>) -> (Mat3<TScalar>, TScalar) {
        (Mat3::identity(), TScalar::one())
    }

    #[inline]
    fn jacobian_determinant(&self, _tree: Topidx, _abc: &Vec3<TScalar>) -> TScalar {
        TScalar::one()
    }

    #[inline]
    fn jacobian_inverse_transpose(
        &self,
        _tree: Topidx,
        _abc: &Vec3<TScalar>,
    ) -> (Mat3<TScalar>, TScalar) {
        // Self-inverse.
        (Mat3::identity(), TScalar::one())
    }
}
