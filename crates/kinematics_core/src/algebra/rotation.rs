//! Rotation generators parametrized by the pair of functions standing in for
//! cosine and sine.
//!
//! With `cos`/`sin` the matrices are ordinary rotations. Substituting other
//! generators (scaled, hyperbolic, ...) yields the elliptic or hyperbolic
//! analogues from the same formulas.

use super::{Matrix3, Vector3};
use crate::traits::{Scalar, Vector};

pub struct Rotation<C, S> {
    cos: C,
    sin: S,
}

impl<C, S> Rotation<C, S> {
    pub fn new(cos: C, sin: S) -> Self {
        Self { cos, sin }
    }
}

impl<T: Scalar> Rotation<fn(T) -> T, fn(T) -> T> {
    pub fn circular() -> Self {
        Self::new(T::cos, T::sin)
    }
}

impl<T: Scalar> Rotation<Box<dyn Fn(T) -> T>, Box<dyn Fn(T) -> T>> {
    /// Generators `a cos` and `b sin`.
    pub fn elliptic(a: T, b: T) -> Self {
        Self::new(Box::new(move |x: T| a * x.cos()), Box::new(move |x: T| b * x.sin()))
    }
}

impl<C, S> Rotation<C, S> {
    fn generators<T: Scalar>(&self, angle: T) -> (T, T)
    where
        C: Fn(T) -> T,
        S: Fn(T) -> T,
    {
        ((self.cos)(angle), (self.sin)(angle))
    }

    /// Rotation about the x axis.
    pub fn x<T: Scalar>(&self, angle: T) -> Matrix3<T>
    where
        C: Fn(T) -> T,
        S: Fn(T) -> T,
    {
        let (c, s) = self.generators(angle);
        let (o, l) = (T::zero(), T::one());
        Matrix3::from_rows(Vector3::new(l, o, o), Vector3::new(o, c, -s), Vector3::new(o, s, c))
    }

    /// Rotation about the y axis.
    pub fn y<T: Scalar>(&self, angle: T) -> Matrix3<T>
    where
        C: Fn(T) -> T,
        S: Fn(T) -> T,
    {
        let (c, s) = self.generators(angle);
        let (o, l) = (T::zero(), T::one());
        Matrix3::from_rows(Vector3::new(c, o, s), Vector3::new(o, l, o), Vector3::new(-s, o, c))
    }

    /// Rotation about the z axis.
    pub fn z<T: Scalar>(&self, angle: T) -> Matrix3<T>
    where
        C: Fn(T) -> T,
        S: Fn(T) -> T,
    {
        let (c, s) = self.generators(angle);
        let (o, l) = (T::zero(), T::one());
        Matrix3::from_rows(Vector3::new(c, -s, o), Vector3::new(s, c, o), Vector3::new(o, o, l))
    }

    /// Rotation about an arbitrary axis (Rodrigues form):
    /// `R = c I + s [k]x + (1 - c) k k^T` with `k` the normalized axis.
    pub fn about<T: Scalar>(&self, axis: &Vector3<T>, angle: T) -> Matrix3<T>
    where
        C: Fn(T) -> T,
        S: Fn(T) -> T,
    {
        let (c, s) = self.generators(angle);
        let k = axis.normalized();
        let o = T::zero();
        let cross = Matrix3::from_rows(
            Vector3::new(o, -k.z, k.y),
            Vector3::new(k.z, o, -k.x),
            Vector3::new(-k.y, k.x, o),
        );
        let outer = Matrix3::from_rows(k * k.x, k * k.y, k * k.z);
        let mut r = Matrix3::identity() * c;
        r.comb(s, &cross).comb(T::one() - c, &outer);
        r
    }
}
