//! Fixed-dimension value types implementing [`crate::traits::Vector`].

pub mod matrix3;
pub mod rotation;
pub mod vector3;
pub mod vector6;

pub use matrix3::Matrix3;
pub use rotation::Rotation;
pub use vector3::{Cylindrical, Spherical, Vector3};
pub use vector6::Vector6;
