//! Second-order point dynamics reduced to first-order fields over the
//! phase-space state `(position, velocity)`:
//! `d/dt (x, v) = (v, a)`.

use crate::algebra::{Vector3, Vector6};
use crate::traits::{is_fixed_mass, InteractionField, Scalar, Vector, VectorField};

/// Field of a single point under `acceleration(t, position, velocity)`.
pub struct PointDynamics<A> {
    acceleration: A,
}

impl<A> PointDynamics<A> {
    pub fn new(acceleration: A) -> Self {
        Self { acceleration }
    }
}

impl<T, A> VectorField<T, Vector6<T>> for PointDynamics<A>
where
    T: Scalar,
    A: Fn(T, &Vector3<T>, &Vector3<T>) -> Vector3<T>,
{
    fn apply(&self, t: T, u: &Vector6<T>) -> Vector6<T> {
        Vector6::new(u.lower, (self.acceleration)(t, &u.upper, &u.lower))
    }
}

/// One member of an interacting system as seen by a pairwise law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body<T> {
    pub index: usize,
    pub mass: T,
    pub state: Vector6<T>,
}

impl<T: Scalar> Body<T> {
    pub fn position(&self) -> &Vector3<T> {
        &self.state.upper
    }

    pub fn speed(&self) -> &Vector3<T> {
        &self.state.lower
    }
}

type ExternalField<T> = Box<dyn Fn(T, &Body<T>) -> Vector3<T>>;

/// Field of an interacting system.
///
/// `law(t, one, other)` is the acceleration of `one` caused by `other`; the
/// acceleration of each body sums the law over every other body, plus an
/// optional background field. Bodies with infinite mass do not move.
pub struct SystemDynamics<T, L> {
    masses: Vec<T>,
    law: L,
    external: Option<ExternalField<T>>,
}

impl<T, L> SystemDynamics<T, L>
where
    T: Scalar,
    L: Fn(T, &Body<T>, &Body<T>) -> Vector3<T>,
{
    pub fn new(masses: Vec<T>, law: L) -> Self {
        Self {
            masses,
            law,
            external: None,
        }
    }

    /// Adds a per-body background acceleration, e.g. uniform gravity.
    pub fn with_external<E>(mut self, acceleration: E) -> Self
    where
        E: Fn(T, &Body<T>) -> Vector3<T> + 'static,
    {
        self.external = Some(Box::new(acceleration));
        self
    }

    pub fn masses(&self) -> &[T] {
        &self.masses
    }

    /// A state without a matching mass gets a NaN mass.
    fn body(&self, index: usize, state: &Vector6<T>) -> Body<T> {
        Body {
            index,
            mass: self.masses.get(index).copied().unwrap_or_else(T::nan),
            state: *state,
        }
    }

    /// Acceleration of body `index` within `states`.
    pub fn acceleration(&self, t: T, index: usize, states: &[Vector6<T>]) -> Vector3<T> {
        let one = self.body(index, &states[index]);
        let mut acceleration = match &self.external {
            Some(external) => external(t, &one),
            None => Vector3::zeros(),
        };
        for (j, state) in states.iter().enumerate() {
            if j != index {
                acceleration += (self.law)(t, &one, &self.body(j, state));
            }
        }
        acceleration
    }
}

impl<T, L> InteractionField<T, Vector6<T>> for SystemDynamics<T, L>
where
    T: Scalar,
    L: Fn(T, &Body<T>, &Body<T>) -> Vector3<T>,
{
    fn apply(&self, t: T, index: usize, states: &[Vector6<T>]) -> Vector6<T> {
        let mass = self.masses.get(index).copied().unwrap_or_else(T::nan);
        if is_fixed_mass(mass) {
            return Vector6::zeros();
        }
        Vector6::new(states[index].lower, self.acceleration(t, index, states))
    }
}
