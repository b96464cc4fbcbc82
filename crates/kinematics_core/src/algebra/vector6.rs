use super::Vector3;
use crate::traits::{Scalar, Vector};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Six-dimensional vector split into an upper and a lower 3-vector.
///
/// Used as the phase-space state of a point mass: `upper` holds the
/// position and `lower` the velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector6<T> {
    pub upper: Vector3<T>,
    pub lower: Vector3<T>,
}

impl<T: Scalar> Vector6<T> {
    pub fn new(upper: Vector3<T>, lower: Vector3<T>) -> Self {
        Self { upper, lower }
    }

    pub fn from_array(values: [T; 6]) -> Self {
        Self::new(
            Vector3::new(values[0], values[1], values[2]),
            Vector3::new(values[3], values[4], values[5]),
        )
    }

    pub fn to_array(&self) -> [T; 6] {
        [
            self.upper.x,
            self.upper.y,
            self.upper.z,
            self.lower.x,
            self.lower.y,
            self.lower.z,
        ]
    }

    pub fn upper(&self) -> &Vector3<T> {
        &self.upper
    }

    pub fn lower(&self) -> &Vector3<T> {
        &self.lower
    }
}

impl<T: Scalar> Vector<T> for Vector6<T> {
    fn zeros() -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros())
    }

    fn dot(&self, other: &Self) -> T {
        self.upper.dot(&other.upper) + self.lower.dot(&other.lower)
    }

    fn prod(&self, other: &Self) -> Self {
        let a = self.to_array();
        let b = other.to_array();
        let mut out = [T::zero(); 6];
        for i in 0..6 {
            out[i] = a[i] * b[i];
        }
        Self::from_array(out)
    }

    fn max_abs(&self) -> T {
        self.upper.max_abs().max(self.lower.max_abs())
    }
}

impl<T: Scalar> Add for Vector6<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.upper + rhs.upper, self.lower + rhs.lower)
    }
}

impl<T: Scalar> Sub for Vector6<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.upper - rhs.upper, self.lower - rhs.lower)
    }
}

impl<T: Scalar> Neg for Vector6<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.upper, -self.lower)
    }
}

impl<T: Scalar> Mul<T> for Vector6<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        Self::new(self.upper * rhs, self.lower * rhs)
    }
}

impl<T: Scalar> Div<T> for Vector6<T> {
    type Output = Self;
    fn div(self, rhs: T) -> Self {
        Self::new(self.upper / rhs, self.lower / rhs)
    }
}

impl<T: Scalar> AddAssign for Vector6<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.upper += rhs.upper;
        self.lower += rhs.lower;
    }
}

impl<T: Scalar> SubAssign for Vector6<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.upper -= rhs.upper;
        self.lower -= rhs.lower;
    }
}

impl<T: Scalar> MulAssign<T> for Vector6<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.upper *= rhs;
        self.lower *= rhs;
    }
}

impl<T: Scalar> DivAssign<T> for Vector6<T> {
    fn div_assign(&mut self, rhs: T) {
        self.upper /= rhs;
        self.lower /= rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::Vector6;
    use crate::algebra::Vector3;
    use crate::traits::Vector;

    #[test]
    fn halves_map_to_flat_components() {
        let v = Vector6::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(Vector6::from_array(v.to_array()), v);
        assert_eq!(v.upper(), &Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn dot_spans_both_halves_and_prod_is_componentwise() {
        let v = Vector6::from_array([1.0, 0.0, 0.0, 0.0, 0.0, 2.0]);
        let w = Vector6::from_array([3.0, 1.0, 1.0, 1.0, 1.0, 4.0]);
        assert_eq!(v.dot(&w), 11.0);
        assert_eq!(v.prod(&w).to_array(), [3.0, 0.0, 0.0, 0.0, 0.0, 8.0]);
        assert_eq!(v.norm2(), 5.0);
    }

    #[test]
    fn euler_style_update_touches_both_halves() {
        let mut state = Vector6::from_array([0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        let derivative = Vector6::new(state.lower, Vector3::new(0.0, -10.0, 0.0));
        state.comb(0.5, &derivative);
        assert_eq!(state.to_array(), [0.5, 0.0, 0.0, 1.0, -5.0, 0.0]);
    }
}
