pub mod algebra;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod interop;
pub mod point;
pub mod ring;
pub mod simulation;
pub mod solvers;
pub mod timer;
/// The `kinematics_core` crate provides the numerical engine for simulating point kinematics.
/// It is generic over the scalar type, supporting both `f32` and `f64`.
///
/// Key components:
/// - **Traits**: `Scalar` (numeric type abstraction), `Vector` (linear-space contract), field traits.
/// - **Algebra**: `Vector3`, `Vector6` (phase-space state) and `Matrix3` with rotations.
/// - **Timer**: Fixed-step clock driving every solver batch.
/// - **Trajectory**: Ring-buffer history of samples with per-sample time steps.
/// - **Solvers**: Explicit Euler for single, independent and interacting states.
/// - **Dynamics**: Point and system fields, driven frame-by-frame by `NBodySystem`.
pub mod traits;
pub mod trajectory;

pub use algebra::{Matrix3, Vector3, Vector6};
pub use config::SimulationSettings;
pub use error::KinematicsError;
pub use point::{Barycenter, Point};
pub use simulation::NBodySystem;
pub use timer::Timer;
pub use trajectory::{Trajectory, TrajectoryBuffer};
