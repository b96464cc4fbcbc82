use super::Vector3;
use crate::traits::{Scalar, Vector};
use log::warn;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// 3x3 matrix stored row-wise as three [`Vector3`] rows.
///
/// As a [`Vector`] it is the 9-dimensional space of matrices: `dot` is the
/// Frobenius inner product and `prod` the matrix product.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Matrix3<T> {
    pub rows: [Vector3<T>; 3],
}

impl<T: Scalar> Matrix3<T> {
    pub fn from_rows(r0: Vector3<T>, r1: Vector3<T>, r2: Vector3<T>) -> Self {
        Self { rows: [r0, r1, r2] }
    }

    pub fn from_columns(c0: Vector3<T>, c1: Vector3<T>, c2: Vector3<T>) -> Self {
        Self::from_rows(c0, c1, c2).transpose()
    }

    /// Builds a matrix from row-major components.
    pub fn from_row_slice(values: [T; 9]) -> Self {
        Self::from_rows(
            Vector3::new(values[0], values[1], values[2]),
            Vector3::new(values[3], values[4], values[5]),
            Vector3::new(values[6], values[7], values[8]),
        )
    }

    pub fn identity() -> Self {
        Self::from_rows(Vector3::ex(), Vector3::ey(), Vector3::ez())
    }

    pub fn diagonal(d: Vector3<T>) -> Self {
        let z = T::zero();
        Self::from_rows(
            Vector3::new(d.x, z, z),
            Vector3::new(z, d.y, z),
            Vector3::new(z, z, d.z),
        )
    }

    pub fn row(&self, i: usize) -> Vector3<T> {
        self.rows[i]
    }

    pub fn column(&self, j: usize) -> Vector3<T> {
        let pick = |r: &Vector3<T>| r.to_array()[j];
        Vector3::new(pick(&self.rows[0]), pick(&self.rows[1]), pick(&self.rows[2]))
    }

    /// Component at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.rows[i].to_array()[j]
    }

    pub fn transpose(&self) -> Self {
        let [a, b, c] = self.rows;
        Self::from_rows(
            Vector3::new(a.x, b.x, c.x),
            Vector3::new(a.y, b.y, c.y),
            Vector3::new(a.z, b.z, c.z),
        )
    }

    pub fn trace(&self) -> T {
        self.rows[0].x + self.rows[1].y + self.rows[2].z
    }

    pub fn det(&self) -> T {
        let [a, b, c] = self.rows;
        a.dot(&b.cross(&c))
    }

    /// Inverse via the adjugate. A singular matrix is not reported: the
    /// division by a zero determinant yields infinite or NaN components.
    pub fn inv(&self) -> Self {
        let [a, b, c] = self.rows;
        let det = self.det();
        // Columns of the adjugate are the pairwise cross products of the rows.
        Self::from_columns(b.cross(&c), c.cross(&a), a.cross(&b)) / det
    }

    /// Inverse that reports singular matrices as `None`.
    pub fn try_inv(&self) -> Option<Self> {
        let det = self.det();
        if det == T::zero() || !det.is_finite() {
            warn!("Matrix3::try_inv on a singular matrix (det = {:?})", det);
            return None;
        }
        Some(self.inv())
    }

    /// Matrix-vector product `M v`.
    pub fn apply(&self, v: &Vector3<T>) -> Vector3<T> {
        Vector3::new(self.rows[0].dot(v), self.rows[1].dot(v), self.rows[2].dot(v))
    }

    fn map_rows(&self, f: impl Fn(&Vector3<T>) -> Vector3<T>) -> Self {
        Self::from_rows(f(&self.rows[0]), f(&self.rows[1]), f(&self.rows[2]))
    }

    fn zip_rows(&self, other: &Self, f: impl Fn(&Vector3<T>, &Vector3<T>) -> Vector3<T>) -> Self {
        Self::from_rows(
            f(&self.rows[0], &other.rows[0]),
            f(&self.rows[1], &other.rows[1]),
            f(&self.rows[2], &other.rows[2]),
        )
    }
}

impl<T: Scalar> Vector<T> for Matrix3<T> {
    fn zeros() -> Self {
        Self::from_rows(Vector3::zeros(), Vector3::zeros(), Vector3::zeros())
    }

    fn dot(&self, other: &Self) -> T {
        self.rows[0].dot(&other.rows[0])
            + self.rows[1].dot(&other.rows[1])
            + self.rows[2].dot(&other.rows[2])
    }

    fn prod(&self, other: &Self) -> Self {
        let t = other.transpose();
        self.map_rows(|r| t.apply(r))
    }

    fn max_abs(&self) -> T {
        self.rows[0]
            .max_abs()
            .max(self.rows[1].max_abs())
            .max(self.rows[2].max_abs())
    }
}

impl<T: Scalar> Add for Matrix3<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.zip_rows(&rhs, |a, b| *a + *b)
    }
}

impl<T: Scalar> Sub for Matrix3<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.zip_rows(&rhs, |a, b| *a - *b)
    }
}

impl<T: Scalar> Neg for Matrix3<T> {
    type Output = Self;
    fn neg(self) -> Self {
        self.map_rows(|r| -*r)
    }
}

impl<T: Scalar> Mul<T> for Matrix3<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        self.map_rows(|r| *r * rhs)
    }
}

impl<T: Scalar> Div<T> for Matrix3<T> {
    type Output = Self;
    fn div(self, rhs: T) -> Self {
        self.map_rows(|r| *r / rhs)
    }
}

impl<T: Scalar> Mul<Vector3<T>> for Matrix3<T> {
    type Output = Vector3<T>;
    fn mul(self, rhs: Vector3<T>) -> Vector3<T> {
        self.apply(&rhs)
    }
}

impl<T: Scalar> Mul for Matrix3<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.prod(&rhs)
    }
}

impl<T: Scalar> AddAssign for Matrix3<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar> SubAssign for Matrix3<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar> MulAssign<T> for Matrix3<T> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: Scalar> DivAssign<T> for Matrix3<T> {
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}
