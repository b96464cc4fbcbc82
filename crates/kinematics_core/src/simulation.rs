//! Frame-by-frame driver for an interacting system of points.
//!
//! [`NBodySystem`] owns the points, their barycenter and an
//! [`InteractionSolver`] over [`SystemDynamics`]. After every `update` or
//! `advance` the solver's states are committed back into the points, whose
//! trajectories and the barycenter then reflect the latest state.

use crate::algebra::{Vector3, Vector6};
use crate::config::SimulationSettings;
use crate::dynamics::{Body, SystemDynamics};
use crate::error::KinematicsError;
use crate::point::{Barycenter, Point};
use crate::solvers::{InteractionSolver, Stepper};
use crate::timer::Timer;
use crate::traits::{scalar, Scalar};
use anyhow::{bail, Context, Result};
use log::{debug, trace};

pub struct NBodySystem<T, L> {
    points: Vec<Point<T>>,
    barycenter: Barycenter<T>,
    solver: InteractionSolver<T, Vector6<T>, SystemDynamics<T, L>>,
    settings: SimulationSettings,
}

impl<T, L> NBodySystem<T, L>
where
    T: Scalar,
    L: Fn(T, &Body<T>, &Body<T>) -> Vector3<T>,
{
    /// Builds a system whose bodies interact through the pairwise `law`.
    pub fn new(points: Vec<Point<T>>, law: L, settings: SimulationSettings) -> Result<Self> {
        let masses = points.iter().map(Point::mass).collect();
        Self::from_dynamics(points, SystemDynamics::new(masses, law), settings)
    }

    /// Builds a system from prepared dynamics; the dynamics must carry one
    /// mass per point.
    pub fn from_dynamics(
        points: Vec<Point<T>>,
        dynamics: SystemDynamics<T, L>,
        settings: SimulationSettings,
    ) -> Result<Self> {
        settings
            .validate()
            .context("Invalid simulation settings.")?;
        if points.is_empty() {
            bail!("An N-body system needs at least one point.");
        }
        if dynamics.masses().len() != points.len() {
            return Err(KinematicsError::StateCountMismatch {
                expected: points.len(),
                actual: dynamics.masses().len(),
            })
            .context("Dynamics masses do not match the point set.");
        }

        let barycenter = Barycenter::new(&points, settings.trajectory_length)?;
        let timer = Timer::new(scalar::<T>(settings.dt))?;
        let states = points.iter().map(|p| *p.state()).collect();
        debug!(
            "NBodySystem with {} points, dt = {}, {} samples per frame",
            points.len(),
            settings.dt,
            settings.samples
        );

        Ok(Self {
            points,
            barycenter,
            solver: InteractionSolver::new(states, dynamics, timer),
            settings,
        })
    }

    /// Advances one visual frame (`settings.samples` ticks) and commits it.
    pub fn update(&mut self) -> Result<()> {
        self.solver.iterate(self.settings.samples);
        self.commit()
    }

    /// Advances `duration` of simulated time and commits it as one frame.
    pub fn advance(&mut self, duration: T) -> Result<()> {
        self.solver.advance(duration);
        self.commit()
    }

    fn commit(&mut self) -> Result<()> {
        let elapsed = self.solver.timer().elapsed();
        for (point, state) in self.points.iter_mut().zip(self.solver.state()) {
            point.commit(*state, elapsed);
        }
        self.barycenter.update(&self.points, elapsed)?;
        trace!(
            "frame committed at t = {:?}, momentum = {:?}",
            self.time(),
            self.barycenter.momentum()
        );
        Ok(())
    }

    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }

    pub fn barycenter(&self) -> &Barycenter<T> {
        &self.barycenter
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn timer(&self) -> &Timer<T> {
        self.solver.timer()
    }

    /// Current simulated time.
    pub fn time(&self) -> T {
        self.solver.timer().t1()
    }

    /// Total kinetic energy of the finite-mass points.
    pub fn kinetic_energy(&self) -> T {
        self.points
            .iter()
            .fold(T::zero(), |acc, p| acc + p.kinetic_energy())
    }
}
