//! Explicit Euler solvers driven by a shared [`Timer`].
//!
//! Every solver keeps a double buffer: `u0` is the state before the last
//! call, `u1` the current, authoritative state. Each tick applies
//! `u1 += dt * field(t, u1)`. Explicit Euler is first order and only
//! conditionally stable; accuracy is controlled by `dt` alone.

use crate::error::KinematicsError;
use crate::timer::Timer;
use crate::traits::{InteractionField, Scalar, Vector, VectorField};
use log::debug;

/// Common driving interface of the solvers, mirroring the timer's operations.
///
/// The returned state is borrowed from the solver; later calls change it, so
/// callers needing a stable snapshot clone it.
pub trait Stepper<T: Scalar> {
    type State: ?Sized;

    /// One tick.
    fn step(&mut self) -> &Self::State;

    /// Whole ticks contained in `duration`; the clock ends exactly `duration` later.
    fn advance(&mut self, duration: T) -> &Self::State;

    /// Exactly `count` ticks.
    fn iterate(&mut self, count: usize) -> &Self::State;

    fn state(&self) -> &Self::State;

    /// State at the start of the last call.
    fn previous(&self) -> &Self::State;

    fn timer(&self) -> &Timer<T>;
}

fn euler_update<T, V, F>(field: &F, u: &mut V, dt: T, t: T)
where
    T: Scalar,
    V: Vector<T>,
    F: VectorField<T, V>,
{
    let du = field.apply(t, u);
    u.comb(dt, &du);
}

fn check_count(expected: usize, actual: usize) -> Result<(), KinematicsError> {
    if expected != actual {
        return Err(KinematicsError::StateCountMismatch { expected, actual });
    }
    Ok(())
}

/// Integrates a single state.
pub struct VectorSolver<T, V, F> {
    u0: V,
    u1: V,
    field: F,
    timer: Timer<T>,
}

impl<T, V, F> VectorSolver<T, V, F>
where
    T: Scalar,
    V: Vector<T>,
    F: VectorField<T, V>,
{
    pub fn new(u: V, field: F, timer: Timer<T>) -> Self {
        Self {
            u0: u,
            u1: u,
            field,
            timer,
        }
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// Replaces both buffered states.
    pub fn set_state(&mut self, u: V) {
        self.u0 = u;
        self.u1 = u;
    }
}

impl<T, V, F> Stepper<T> for VectorSolver<T, V, F>
where
    T: Scalar,
    V: Vector<T>,
    F: VectorField<T, V>,
{
    type State = V;

    fn step(&mut self) -> &V {
        self.u0 = self.u1;
        self.timer
            .step(|dt, t, _| euler_update(&self.field, &mut self.u1, dt, t));
        &self.u1
    }

    fn advance(&mut self, duration: T) -> &V {
        self.u0 = self.u1;
        let ticks = self
            .timer
            .advance(duration, |dt, t, _| euler_update(&self.field, &mut self.u1, dt, t));
        debug!("VectorSolver ran {} ticks, t = {:?}", ticks, self.timer.t1());
        &self.u1
    }

    fn iterate(&mut self, count: usize) -> &V {
        self.u0 = self.u1;
        self.timer
            .iterate(count, |dt, t, _| euler_update(&self.field, &mut self.u1, dt, t));
        debug!("VectorSolver ran {} ticks, t = {:?}", count, self.timer.t1());
        &self.u1
    }

    fn state(&self) -> &V {
        &self.u1
    }

    fn previous(&self) -> &V {
        &self.u0
    }

    fn timer(&self) -> &Timer<T> {
        &self.timer
    }
}

/// Integrates independent states sharing one clock and one field.
pub struct ArraySolver<T, V, F> {
    u0: Vec<V>,
    u1: Vec<V>,
    field: F,
    timer: Timer<T>,
}

impl<T, V, F> ArraySolver<T, V, F>
where
    T: Scalar,
    V: Vector<T>,
    F: VectorField<T, V>,
{
    pub fn new(states: Vec<V>, field: F, timer: Timer<T>) -> Self {
        Self {
            u0: states.clone(),
            u1: states,
            field,
            timer,
        }
    }

    pub fn len(&self) -> usize {
        self.u1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.u1.is_empty()
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// Replaces both buffered states; the element count cannot change.
    pub fn set_states(&mut self, states: &[V]) -> Result<(), KinematicsError> {
        check_count(self.u1.len(), states.len())?;
        self.u0.copy_from_slice(states);
        self.u1.copy_from_slice(states);
        Ok(())
    }

    fn tick(field: &F, states: &mut [V], dt: T, t: T) {
        for u in states.iter_mut() {
            euler_update(field, u, dt, t);
        }
    }
}

impl<T, V, F> Stepper<T> for ArraySolver<T, V, F>
where
    T: Scalar,
    V: Vector<T>,
    F: VectorField<T, V>,
{
    type State = [V];

    fn step(&mut self) -> &[V] {
        self.u0.copy_from_slice(&self.u1);
        self.timer
            .step(|dt, t, _| Self::tick(&self.field, &mut self.u1, dt, t));
        &self.u1
    }

    fn advance(&mut self, duration: T) -> &[V] {
        self.u0.copy_from_slice(&self.u1);
        let ticks = self
            .timer
            .advance(duration, |dt, t, _| Self::tick(&self.field, &mut self.u1, dt, t));
        debug!(
            "ArraySolver ran {} ticks over {} states, t = {:?}",
            ticks,
            self.u1.len(),
            self.timer.t1()
        );
        &self.u1
    }

    fn iterate(&mut self, count: usize) -> &[V] {
        self.u0.copy_from_slice(&self.u1);
        self.timer
            .iterate(count, |dt, t, _| Self::tick(&self.field, &mut self.u1, dt, t));
        debug!(
            "ArraySolver ran {} ticks over {} states, t = {:?}",
            count,
            self.u1.len(),
            self.timer.t1()
        );
        &self.u1
    }

    fn state(&self) -> &[V] {
        &self.u1
    }

    fn previous(&self) -> &[V] {
        &self.u0
    }

    fn timer(&self) -> &Timer<T> {
        &self.timer
    }
}

/// Integrates coupled states.
///
/// Updates are Jacobi-style: on each tick every derivative is evaluated
/// against the same `u1` before any state moves, so the result does not
/// depend on element order.
pub struct InteractionSolver<T, V, F> {
    u0: Vec<V>,
    u1: Vec<V>,
    derivatives: Vec<V>,
    field: F,
    timer: Timer<T>,
}

impl<T, V, F> InteractionSolver<T, V, F>
where
    T: Scalar,
    V: Vector<T>,
    F: InteractionField<T, V>,
{
    pub fn new(states: Vec<V>, field: F, timer: Timer<T>) -> Self {
        Self {
            u0: states.clone(),
            derivatives: vec![V::zeros(); states.len()],
            u1: states,
            field,
            timer,
        }
    }

    pub fn len(&self) -> usize {
        self.u1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.u1.is_empty()
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// Replaces both buffered states; the element count cannot change.
    pub fn set_states(&mut self, states: &[V]) -> Result<(), KinematicsError> {
        check_count(self.u1.len(), states.len())?;
        self.u0.copy_from_slice(states);
        self.u1.copy_from_slice(states);
        Ok(())
    }

    fn tick(field: &F, states: &mut [V], derivatives: &mut [V], dt: T, t: T) {
        for (i, du) in derivatives.iter_mut().enumerate() {
            *du = field.apply(t, i, states);
        }
        for (u, du) in states.iter_mut().zip(derivatives.iter()) {
            u.comb(dt, du);
        }
    }
}

impl<T, V, F> Stepper<T> for InteractionSolver<T, V, F>
where
    T: Scalar,
    V: Vector<T>,
    F: InteractionField<T, V>,
{
    type State = [V];

    fn step(&mut self) -> &[V] {
        self.u0.copy_from_slice(&self.u1);
        self.timer.step(|dt, t, _| {
            Self::tick(&self.field, &mut self.u1, &mut self.derivatives, dt, t)
        });
        &self.u1
    }

    fn advance(&mut self, duration: T) -> &[V] {
        self.u0.copy_from_slice(&self.u1);
        let ticks = self.timer.advance(duration, |dt, t, _| {
            Self::tick(&self.field, &mut self.u1, &mut self.derivatives, dt, t)
        });
        debug!(
            "InteractionSolver ran {} ticks over {} states, t = {:?}",
            ticks,
            self.u1.len(),
            self.timer.t1()
        );
        &self.u1
    }

    fn iterate(&mut self, count: usize) -> &[V] {
        self.u0.copy_from_slice(&self.u1);
        self.timer.iterate(count, |dt, t, _| {
            Self::tick(&self.field, &mut self.u1, &mut self.derivatives, dt, t)
        });
        debug!(
            "InteractionSolver ran {} ticks over {} states, t = {:?}",
            count,
            self.u1.len(),
            self.timer.t1()
        );
        &self.u1
    }

    fn state(&self) -> &[V] {
        &self.u1
    }

    fn previous(&self) -> &[V] {
        &self.u0
    }

    fn timer(&self) -> &Timer<T> {
        &self.timer
    }
}
