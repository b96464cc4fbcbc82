use crate::traits::{Scalar, Vector};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Cartesian 3-vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

/// Cylindrical coordinates `(rho, phi, z)` with `phi` measured from the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cylindrical<T> {
    pub rho: T,
    pub phi: T,
    pub z: T,
}

/// Spherical coordinates `(r, theta, phi)`: `theta` is the polar angle from
/// the z axis, `phi` the azimuth from the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spherical<T> {
    pub r: T,
    pub theta: T,
    pub phi: T,
}

impl<T: Scalar> Vector3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    pub fn ex() -> Self {
        Self::new(T::one(), T::zero(), T::zero())
    }

    pub fn ey() -> Self {
        Self::new(T::zero(), T::one(), T::zero())
    }

    pub fn ez() -> Self {
        Self::new(T::zero(), T::zero(), T::one())
    }

    pub fn from_array(values: [T; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    pub fn to_array(&self) -> [T; 3] {
        [self.x, self.y, self.z]
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Unit vector along `self`. The zero vector yields NaN components.
    pub fn normalized(&self) -> Self {
        *self / self.norm()
    }

    /// Unoriented angle between two vectors, in `[0, pi]`.
    pub fn angle(&self, other: &Self) -> T {
        self.cross(other).norm().atan2(self.dot(other))
    }

    pub fn to_cylindrical(&self) -> Cylindrical<T> {
        Cylindrical {
            rho: self.x.hypot(self.y),
            phi: self.y.atan2(self.x),
            z: self.z,
        }
    }

    pub fn from_cylindrical(c: &Cylindrical<T>) -> Self {
        Self::new(c.rho * c.phi.cos(), c.rho * c.phi.sin(), c.z)
    }

    pub fn to_spherical(&self) -> Spherical<T> {
        let r = self.norm();
        let theta = if r == T::zero() {
            T::zero()
        } else {
            (self.z / r).max(-T::one()).min(T::one()).acos()
        };
        Spherical {
            r,
            theta,
            phi: self.y.atan2(self.x),
        }
    }

    pub fn from_spherical(s: &Spherical<T>) -> Self {
        let (sin_theta, cos_theta) = s.theta.sin_cos();
        let (sin_phi, cos_phi) = s.phi.sin_cos();
        Self::new(
            s.r * sin_theta * cos_phi,
            s.r * sin_theta * sin_phi,
            s.r * cos_theta,
        )
    }
}

impl<T: Scalar> Vector<T> for Vector3<T> {
    fn zeros() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    fn dot(&self, other: &Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    fn prod(&self, other: &Self) -> Self {
        self.cross(other)
    }

    fn max_abs(&self) -> T {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }
}

impl<T: Scalar> Add for Vector3<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Scalar> Sub for Vector3<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Scalar> Neg for Vector3<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T: Scalar> Mul<T> for Vector3<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl<T: Scalar> Div<T> for Vector3<T> {
    type Output = Self;
    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl<T: Scalar> AddAssign for Vector3<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.x = self.x + rhs.x;
        self.y = self.y + rhs.y;
        self.z = self.z + rhs.z;
    }
}

impl<T: Scalar> SubAssign for Vector3<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x = self.x - rhs.x;
        self.y = self.y - rhs.y;
        self.z = self.z - rhs.z;
    }
}

impl<T: Scalar> MulAssign<T> for Vector3<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.x = self.x * rhs;
        self.y = self.y * rhs;
        self.z = self.z * rhs;
    }
}

impl<T: Scalar> DivAssign<T> for Vector3<T> {
    fn div_assign(&mut self, rhs: T) {
        self.x = self.x / rhs;
        self.y = self.y / rhs;
        self.z = self.z / rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::{Cylindrical, Vector3};
    use crate::traits::Vector;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn copy_operators_leave_operands_unchanged() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-1.0, 0.5, 2.0);
        let sum = a + b;
        assert_eq!(sum, Vector3::new(0.0, 2.5, 5.0));
        assert_eq!(a, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(-a * 2.0, Vector3::new(-2.0, -4.0, -6.0));
        assert_eq!(a / 2.0, Vector3::new(0.5, 1.0, 1.5));
    }

    #[test]
    fn in_place_variants_mutate_receiver() {
        let mut a = Vector3::new(1.0, 2.0, 3.0);
        a.comb(2.0, &Vector3::ex()).negate();
        assert_eq!(a, Vector3::new(-3.0, -2.0, -3.0));
        a /= -1.0;
        a -= Vector3::new(3.0, 2.0, 3.0);
        assert_eq!(a, Vector3::zeros());
    }

    #[test]
    fn prod_is_right_handed_cross_product() {
        assert_eq!(Vector3::<f64>::ex().prod(&Vector3::ey()), Vector3::ez());
        let mut v = Vector3::<f64>::ey();
        v.prod_assign(&Vector3::ez());
        assert_eq!(v, Vector3::ex());
    }

    #[test]
    fn metrics_and_angle() {
        let a = Vector3::new(1.0, 2.0, 2.0);
        assert_eq!(a.norm(), 3.0);
        assert_eq!(a.dist2(&Vector3::zeros()), 9.0);
        let angle = Vector3::new(1.0, 0.0, 0.0).angle(&Vector3::new(1.0, 1.0, 0.0));
        assert!((angle - FRAC_PI_4).abs() < 1e-15);
    }

    #[test]
    fn cylindrical_conversion_is_pure() {
        let v = Vector3::<f64>::new(0.0, 2.0, -1.0);
        let c = v.to_cylindrical();
        assert!((c.rho - 2.0).abs() < 1e-15);
        assert!((c.phi - FRAC_PI_2).abs() < 1e-15);
        assert_eq!(c.z, -1.0);

        let rebuilt = Vector3::from_cylindrical(&Cylindrical { rho: 3.0, ..c });
        assert!(rebuilt.equal2(&Vector3::new(0.0, 3.0, -1.0)));
        assert_eq!(v, Vector3::new(0.0, 2.0, -1.0));
    }

    #[test]
    fn spherical_round_trip_and_origin() {
        let v = Vector3::new(1.0, -2.0, 0.5);
        let back = Vector3::from_spherical(&v.to_spherical());
        assert!(back.equal2(&v));

        let origin = Vector3::<f64>::zeros().to_spherical();
        assert_eq!(origin.r, 0.0);
        assert_eq!(origin.theta, 0.0);
    }
}
