//! Conversions between the algebra types and their `nalgebra` counterparts.

use crate::algebra::{Matrix3, Vector3};
use crate::traits::Scalar;

impl<T: Scalar> From<Vector3<T>> for nalgebra::Vector3<T> {
    fn from(v: Vector3<T>) -> Self {
        nalgebra::Vector3::new(v.x, v.y, v.z)
    }
}

impl<T: Scalar> From<nalgebra::Vector3<T>> for Vector3<T> {
    fn from(v: nalgebra::Vector3<T>) -> Self {
        Vector3::new(v[0], v[1], v[2])
    }
}

impl<T: Scalar> From<Matrix3<T>> for nalgebra::Matrix3<T> {
    fn from(m: Matrix3<T>) -> Self {
        let [a, b, c] = m.rows;
        nalgebra::Matrix3::new(a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z)
    }
}

impl<T: Scalar> From<nalgebra::Matrix3<T>> for Matrix3<T> {
    fn from(m: nalgebra::Matrix3<T>) -> Self {
        Matrix3::from_row_slice([
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
            m[(2, 0)],
            m[(2, 1)],
            m[(2, 2)],
        ])
    }
}
