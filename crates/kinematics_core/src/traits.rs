use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A trait for types that can be used as scalars in the kinematics types.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Number of machine epsilons tolerated by [`Vector::equal1`] and [`Vector::equal2`].
pub const TOLERANCE_ULPS: f64 = 64.0;

/// Converts an `f64` constant into `T`.
pub fn scalar<T: Scalar>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(T::nan)
}

/// Whether `mass` marks a fixed body, i.e. is `+inf`.
pub fn is_fixed_mass<T: Scalar>(mass: T) -> bool {
    mass.is_infinite() && mass > T::zero()
}

/// Absolute tolerance used by the approximate equality predicates, before scaling.
pub fn tolerance<T: Scalar>() -> T {
    T::epsilon() * scalar::<T>(TOLERANCE_ULPS)
}

/// An element of a finite-dimensional real vector space.
///
/// The operator traits provide the copy variants (`a + b`, `a * s`, `-a`) and the
/// assigning traits the in-place variants (`a += b`, `a *= s`). The provided
/// methods follow the same split: `comb` mutates, `combined` returns a new value.
pub trait Vector<T: Scalar>:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<T, Output = Self>
    + Div<T, Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign<T>
    + DivAssign<T>
{
    /// The additive identity.
    fn zeros() -> Self;

    /// Scalar (inner) product.
    fn dot(&self, other: &Self) -> T;

    /// Type-specific bilinear product: cross product for 3-vectors, matrix
    /// product for matrices, component-wise product otherwise.
    fn prod(&self, other: &Self) -> Self;

    /// Largest absolute component.
    fn max_abs(&self) -> T;

    fn prod_assign(&mut self, other: &Self) -> &mut Self {
        *self = self.prod(other);
        self
    }

    fn negate(&mut self) -> &mut Self {
        *self = -*self;
        self
    }

    /// Linear combination in place: `self += s * other`.
    fn comb(&mut self, s: T, other: &Self) -> &mut Self {
        *self += *other * s;
        self
    }

    /// Linear combination returning a new value: `self + s * other`.
    fn combined(&self, s: T, other: &Self) -> Self {
        *self + *other * s
    }

    fn norm2(&self) -> T {
        self.dot(self)
    }

    fn norm(&self) -> T {
        self.norm2().sqrt()
    }

    fn dist2(&self, other: &Self) -> T {
        (*self - *other).norm2()
    }

    fn dist(&self, other: &Self) -> T {
        self.dist2(other).sqrt()
    }

    /// Linear interpolation, `u = 0` yields `self` and `u = 1` yields `other`.
    fn lerp(&self, other: &Self, u: T) -> Self {
        *self + (*other - *self) * u
    }

    /// Component-wise approximate equality, scaled by the largest component.
    fn equal1(&self, other: &Self) -> bool {
        let scale = T::one().max(self.max_abs()).max(other.max_abs());
        (*self - *other).max_abs() <= tolerance::<T>() * scale
    }

    /// Euclidean approximate equality, scaled by the larger magnitude.
    fn equal2(&self, other: &Self) -> bool {
        let scale = T::one().max(self.norm()).max(other.norm());
        self.dist(other) <= tolerance::<T>() * scale
    }
}

macro_rules! impl_scalar_vector {
    ($($ty:ty),*) => {
        $(
            impl Vector<$ty> for $ty {
                fn zeros() -> Self {
                    0.0
                }

                fn dot(&self, other: &Self) -> $ty {
                    self * other
                }

                fn prod(&self, other: &Self) -> Self {
                    self * other
                }

                fn max_abs(&self) -> $ty {
                    self.abs()
                }
            }
        )*
    };
}

impl_scalar_vector!(f32, f64);

/// The right-hand side of a first-order ODE `du/dt = f(t, u)`.
pub trait VectorField<T: Scalar, V> {
    fn apply(&self, t: T, u: &V) -> V;
}

impl<T: Scalar, V, F> VectorField<T, V> for F
where
    F: Fn(T, &V) -> V,
{
    fn apply(&self, t: T, u: &V) -> V {
        self(t, u)
    }
}

/// The right-hand side of a coupled system: the derivative of `states[index]`
/// given every state of the system. The field decides how to combine the
/// contributions of the other elements.
pub trait InteractionField<T: Scalar, V> {
    fn apply(&self, t: T, index: usize, states: &[V]) -> V;
}

impl<T: Scalar, V, F> InteractionField<T, V> for F
where
    F: Fn(T, usize, &[V]) -> V,
{
    fn apply(&self, t: T, index: usize, states: &[V]) -> V {
        self(t, index, states)
    }
}
