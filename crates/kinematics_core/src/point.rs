use crate::algebra::{Vector3, Vector6};
use crate::error::KinematicsError;
use crate::traits::{is_fixed_mass, scalar, Scalar, Vector};
use crate::trajectory::TrajectoryBuffer;
use serde::{Deserialize, Serialize};

/// A point mass with its phase-space state and a bounded history of its
/// positions. An infinite mass marks a fixed body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point<T> {
    id: String,
    mass: T,
    state: Vector6<T>,
    trajectory: TrajectoryBuffer<T, Vector3<T>>,
}

impl<T: Scalar> Point<T> {
    /// The initial position is recorded as the first trajectory sample.
    pub fn new(
        id: impl Into<String>,
        mass: T,
        position: Vector3<T>,
        speed: Vector3<T>,
        capacity: usize,
    ) -> Result<Self, KinematicsError> {
        let mut trajectory = TrajectoryBuffer::new(capacity)?;
        trajectory.push(position);
        Ok(Self {
            id: id.into(),
            mass,
            state: Vector6::new(position, speed),
            trajectory,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mass(&self) -> T {
        self.mass
    }

    pub fn is_fixed(&self) -> bool {
        is_fixed_mass(self.mass)
    }

    pub fn state(&self) -> &Vector6<T> {
        &self.state
    }

    pub fn position(&self) -> &Vector3<T> {
        &self.state.upper
    }

    pub fn speed(&self) -> &Vector3<T> {
        &self.state.lower
    }

    pub fn trajectory(&self) -> &TrajectoryBuffer<T, Vector3<T>> {
        &self.trajectory
    }

    /// Linear momentum; zero for fixed bodies.
    pub fn momentum(&self) -> Vector3<T> {
        if self.is_fixed() {
            Vector3::zeros()
        } else {
            self.state.lower * self.mass
        }
    }

    /// Kinetic energy; zero for fixed bodies.
    pub fn kinetic_energy(&self) -> T {
        if self.is_fixed() {
            T::zero()
        } else {
            scalar::<T>(0.5) * self.mass * self.state.lower.norm2()
        }
    }

    /// Accepts a new state from a solver and records its position, `dt`
    /// after the previous sample.
    pub fn commit(&mut self, state: Vector6<T>, dt: T) {
        self.state = state;
        self.trajectory.add(state.upper, Some(dt));
    }
}

/// Centre of mass of a set of points, recomputed from scratch on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barycenter<T> {
    mass: T,
    state: Vector6<T>,
    momentum: Vector3<T>,
    trajectory: TrajectoryBuffer<T, Vector3<T>>,
}

impl<T: Scalar> Barycenter<T> {
    pub fn new(points: &[Point<T>], capacity: usize) -> Result<Self, KinematicsError> {
        let (mass, state, momentum) = aggregate(points)?;
        let mut trajectory = TrajectoryBuffer::new(capacity)?;
        trajectory.push(state.upper);
        Ok(Self {
            mass,
            state,
            momentum,
            trajectory,
        })
    }

    pub fn update(&mut self, points: &[Point<T>], dt: T) -> Result<(), KinematicsError> {
        let (mass, state, momentum) = aggregate(points)?;
        self.mass = mass;
        self.state = state;
        self.momentum = momentum;
        self.trajectory.add(state.upper, Some(dt));
        Ok(())
    }

    pub fn mass(&self) -> T {
        self.mass
    }

    pub fn state(&self) -> &Vector6<T> {
        &self.state
    }

    pub fn position(&self) -> &Vector3<T> {
        &self.state.upper
    }

    pub fn speed(&self) -> &Vector3<T> {
        &self.state.lower
    }

    /// Total momentum of the finite-mass points.
    pub fn momentum(&self) -> &Vector3<T> {
        &self.momentum
    }

    pub fn trajectory(&self) -> &TrajectoryBuffer<T, Vector3<T>> {
        &self.trajectory
    }
}

/// Total mass, centre-of-mass state and momentum.
///
/// Fixed bodies outweigh any finite mass, so when present the centre is the
/// plain mean of their states.
fn aggregate<T: Scalar>(
    points: &[Point<T>],
) -> Result<(T, Vector6<T>, Vector3<T>), KinematicsError> {
    if points.is_empty() {
        return Err(KinematicsError::EmptyBarycenter);
    }

    let mut momentum = Vector3::zeros();
    let mut weighted = Vector6::zeros();
    let mut mass = T::zero();
    let mut fixed_sum = Vector6::zeros();
    let mut fixed_count = 0usize;

    for point in points {
        if point.is_fixed() {
            fixed_sum += point.state;
            fixed_count += 1;
        } else {
            mass = mass + point.mass;
            weighted.comb(point.mass, &point.state);
            momentum += point.momentum();
        }
    }

    if fixed_count > 0 {
        let count = T::from_usize(fixed_count).unwrap_or_else(T::nan);
        return Ok((T::infinity(), fixed_sum / count, momentum));
    }
    Ok((mass, weighted / mass, momentum))
}

#[cfg(test)]
mod tests {
    use super::{Barycenter, Point};
    use crate::algebra::{Vector3, Vector6};
    use crate::traits::Vector;

    fn body(id: &str, mass: f64, x: f64, vy: f64) -> Point<f64> {
        Point::new(id, mass, Vector3::new(x, 0.0, 0.0), Vector3::new(0.0, vy, 0.0), 8)
            .expect("point")
    }

    #[test]
    fn new_point_records_initial_position() {
        let p = body("a", 2.0, 1.5, 3.0);
        assert_eq!(p.id(), "a");
        assert_eq!(p.trajectory().last(), Vector3::new(1.5, 0.0, 0.0));
        assert_eq!(p.momentum(), Vector3::new(0.0, 6.0, 0.0));
        assert_eq!(p.kinetic_energy(), 9.0);
        assert!(!p.is_fixed());
    }

    #[test]
    fn commit_updates_state_and_history() {
        let mut p = body("a", 1.0, 0.0, 1.0);
        let next = Vector6::new(Vector3::new(0.0, 0.1, 0.0), Vector3::new(0.0, 1.0, 0.0));
        p.commit(next, 0.1);
        assert_eq!(p.position(), &Vector3::new(0.0, 0.1, 0.0));
        assert_eq!(p.trajectory().next_to_last(), Vector3::zeros());
        assert_eq!(p.trajectory().last_step(), 0.1);
    }

    #[test]
    fn fixed_points_have_no_momentum() {
        let p = body("sun", f64::INFINITY, 0.0, 0.0);
        assert!(p.is_fixed());
        assert_eq!(p.momentum(), Vector3::zeros());
        assert_eq!(p.kinetic_energy(), 0.0);
    }

    #[test]
    fn barycenter_rejects_empty_point_set() {
        let err = Barycenter::<f64>::new(&[], 4).expect_err("expected error");
        assert!(format!("{err}").contains("at least one point"));
    }

    #[test]
    fn barycenter_is_mass_weighted() {
        let points = vec![body("a", 1.0, -3.0, 2.0), body("b", 3.0, 1.0, -1.0)];
        let center = Barycenter::new(&points, 4).expect("barycenter");
        assert_eq!(center.mass(), 4.0);
        assert_eq!(center.position(), &Vector3::zeros());
        assert_eq!(center.momentum(), &Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(center.speed(), &Vector3::new(0.0, -0.25, 0.0));
    }

    #[test]
    fn fixed_bodies_anchor_the_barycenter() {
        let points = vec![body("sun", f64::INFINITY, 2.0, 0.0), body("planet", 1.0, 10.0, 1.0)];
        let center = Barycenter::new(&points, 4).expect("barycenter");
        assert_eq!(center.position(), &Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(center.momentum(), &Vector3::new(0.0, 1.0, 0.0));
        assert!(center.mass().is_infinite());
    }

    #[test]
    fn update_recomputes_and_records_position() {
        let mut points = vec![body("a", 1.0, 0.0, 0.0), body("b", 1.0, 2.0, 0.0)];
        let mut center = Barycenter::new(&points, 4).expect("barycenter");
        points[1].commit(Vector6::from_array([4.0, 0.0, 0.0, 0.0, 0.0, 0.0]), 0.5);
        center.update(&points, 0.5).expect("update");
        assert_eq!(center.position(), &Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(
            center.trajectory().vertices()[2..].to_vec(),
            vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(2.0, 0.0, 0.0)]
        );
        assert!(center.update(&[], 0.5).is_err());
    }
}
