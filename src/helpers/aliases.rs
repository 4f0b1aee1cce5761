use nalgebra::{Matrix3, Vector3};

pub type Vec3<T> = Vector3<T>;
pub type Mat3<T> = Matrix3<T>;
pub type Vec3d = Vector3<f64>;
