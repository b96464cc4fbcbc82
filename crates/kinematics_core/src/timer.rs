//! Fixed-step clock shared by the solvers.
//!
//! A timer keeps two ticks: the anchor `(idx0, t0)` taken at the start of the
//! last batch and the current tick `(idx1, t1)`. Batches (`advance`,
//! `iterate`) re-anchor first and recompute `t1` from the anchor on every
//! tick, so rounding error does not accumulate across ticks.

use crate::error::KinematicsError;
use crate::traits::{tolerance, Scalar};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timer<T> {
    dt: T,
    t0: T,
    t1: T,
    idx0: usize,
    idx1: usize,
}

impl<T: Scalar> Timer<T> {
    pub fn new(dt: T) -> Result<Self, KinematicsError> {
        Self::starting_at(dt, T::zero())
    }

    pub fn starting_at(dt: T, t: T) -> Result<Self, KinematicsError> {
        check_time_step(dt)?;
        Ok(Self {
            dt,
            t0: t,
            t1: t,
            idx0: 0,
            idx1: 0,
        })
    }

    pub fn dt(&self) -> T {
        self.dt
    }

    pub fn t0(&self) -> T {
        self.t0
    }

    pub fn t1(&self) -> T {
        self.t1
    }

    pub fn idx0(&self) -> usize {
        self.idx0
    }

    pub fn idx1(&self) -> usize {
        self.idx1
    }

    /// Simulated time since the last anchor.
    pub fn elapsed(&self) -> T {
        self.t1 - self.t0
    }

    /// Ticks run since the last anchor.
    pub fn ticks(&self) -> usize {
        self.idx1 - self.idx0
    }

    pub fn set_dt(&mut self, dt: T) -> Result<(), KinematicsError> {
        check_time_step(dt)?;
        self.dt = dt;
        Ok(())
    }

    /// Moves both `t0` and `t1` to `t`.
    pub fn reset_time(&mut self, t: T) {
        self.t0 = t;
        self.t1 = t;
    }

    /// Moves both tick indices to `idx` and re-anchors `t0` on `t1`.
    pub fn reset_index(&mut self, idx: usize) {
        self.idx0 = idx;
        self.idx1 = idx;
        self.t0 = self.t1;
    }

    /// Runs `action(dt, t, idx)` once at the current tick, then moves one
    /// tick forward. Does not re-anchor.
    pub fn step<F>(&mut self, mut action: F)
    where
        F: FnMut(T, T, usize),
    {
        action(self.dt, self.t1, self.idx1);
        self.t1 = self.t1 + self.dt;
        self.idx1 += 1;
    }

    /// Runs the whole ticks contained in `duration`, then sets `t1` to
    /// exactly `t0 + duration`. A trailing partial tick is not run.
    /// Returns the number of ticks run.
    pub fn advance<F>(&mut self, duration: T, action: F) -> usize
    where
        F: FnMut(T, T, usize),
    {
        self.anchor();
        let ticks = whole_ticks(duration / self.dt);
        self.run(ticks, action);
        self.t1 = self.t0 + duration;
        ticks
    }

    /// Runs exactly `count` ticks and sets `t1` to `t0 + count * dt`.
    pub fn iterate<F>(&mut self, count: usize, action: F)
    where
        F: FnMut(T, T, usize),
    {
        self.anchor();
        self.run(count, action);
        self.t1 = self.t0 + self.span(count);
    }

    fn anchor(&mut self) {
        self.t0 = self.t1;
        self.idx0 = self.idx1;
    }

    fn span(&self, ticks: usize) -> T {
        T::from_usize(ticks).unwrap_or_else(T::infinity) * self.dt
    }

    fn run<F>(&mut self, ticks: usize, mut action: F)
    where
        F: FnMut(T, T, usize),
    {
        let end = self.idx0 + ticks;
        while self.idx1 < end {
            action(self.dt, self.t1, self.idx1);
            self.idx1 += 1;
            self.t1 = self.t0 + self.span(self.idx1 - self.idx0);
        }
    }
}

fn check_time_step<T: Scalar>(dt: T) -> Result<(), KinematicsError> {
    if dt > T::zero() && dt.is_finite() {
        Ok(())
    } else {
        Err(KinematicsError::InvalidTimeStep(dt.to_f64().unwrap_or(f64::NAN)))
    }
}

/// Whole ticks in `iterations`, treating a quotient within a few ulps of an
/// integer as that integer (`0.3 / 0.1` is three ticks, not two).
///
/// Counts beyond `usize` saturate; NaN and non-positive quotients run nothing.
fn whole_ticks<T: Scalar>(iterations: T) -> usize {
    if iterations.is_nan() || iterations <= T::zero() {
        return 0;
    }
    if iterations.is_infinite() {
        return usize::MAX;
    }
    let nearest = iterations.round();
    let whole = if (iterations - nearest).abs() <= tolerance::<T>() * nearest.max(T::one()) {
        nearest
    } else {
        iterations.floor()
    };
    whole.to_usize().unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::{whole_ticks, Timer};

    fn assert_err_contains<T: std::fmt::Debug>(
        result: Result<T, crate::error::KinematicsError>,
        needle: &str,
    ) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn rejects_invalid_time_steps() {
        assert_err_contains(Timer::new(0.0), "dt must be positive");
        assert_err_contains(Timer::new(-0.5), "got -0.5");
        assert_err_contains(Timer::new(f64::INFINITY), "dt must be positive");
        let mut timer = Timer::new(0.1).expect("timer");
        assert!(timer.set_dt(f64::NAN).is_err());
        assert_eq!(timer.dt(), 0.1);
    }

    #[test]
    fn step_runs_action_before_moving_forward() {
        let mut timer = Timer::new(0.5).expect("timer");
        let mut seen = Vec::new();
        timer.step(|dt, t, idx| seen.push((dt, t, idx)));
        timer.step(|dt, t, idx| seen.push((dt, t, idx)));
        assert_eq!(seen, vec![(0.5, 0.0, 0), (0.5, 0.5, 1)]);
        assert_eq!(timer.t1(), 1.0);
        assert_eq!(timer.idx1(), 2);
        assert_eq!(timer.idx0(), 0);
    }

    #[test]
    fn advance_snaps_to_requested_duration_without_extra_tick() {
        let mut timer = Timer::new(0.1).expect("timer");
        let mut times: Vec<f64> = Vec::new();
        let ticks = timer.advance(0.25, |_, t, _| times.push(t));
        assert_eq!(ticks, 2);
        assert_eq!(times.len(), 2);
        assert!((times[1] - 0.1).abs() < 1e-15);
        assert_eq!(timer.t1(), 0.25);
        assert_eq!(timer.ticks(), 2);
    }

    #[test]
    fn advance_elapsed_time_matches_duration_exactly() {
        let mut timer = Timer::new(0.1).expect("timer");
        timer.advance(0.3, |_, _, _| {});
        assert_eq!(timer.t1(), 0.3);

        let mut timer = Timer::new(0.125).expect("timer");
        for duration in [0.375, 1.0, 0.0625, 2.5] {
            let before = timer.t1();
            timer.advance(duration, |_, _, _| {});
            assert_eq!(timer.t1() - before, duration);
            assert_eq!(timer.elapsed(), duration);
        }
    }

    #[test]
    fn advance_counts_near_integer_quotients_as_whole() {
        assert_eq!(whole_ticks(0.3_f64 / 0.1), 3);
        assert_eq!(whole_ticks(2.5_f64), 2);
        assert_eq!(whole_ticks(-1.0_f64), 0);
        assert_eq!(whole_ticks(f64::NAN), 0);
    }

    #[test]
    fn oversized_quotients_saturate_instead_of_running_nothing() {
        assert_eq!(whole_ticks(1e30_f64), usize::MAX);
        assert_eq!(whole_ticks(f64::INFINITY), usize::MAX);
        assert_eq!(whole_ticks(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn iterate_runs_exact_count_and_reanchors() {
        let mut timer = Timer::new(0.25).expect("timer");
        timer.step(|_, _, _| {});
        let mut indices = Vec::new();
        timer.iterate(3, |_, _, idx| indices.push(idx));
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(timer.t0(), 0.25);
        assert_eq!(timer.t1(), 1.0);
        assert_eq!(timer.idx0(), 1);
        assert_eq!(timer.ticks(), 3);
    }

    #[test]
    fn resets_move_anchor_and_current_together() {
        let mut timer = Timer::starting_at(0.5, 2.0).expect("timer");
        timer.iterate(2, |_, _, _| {});
        timer.reset_time(10.0);
        assert_eq!((timer.t0(), timer.t1()), (10.0, 10.0));
        timer.reset_index(100);
        assert_eq!((timer.idx0(), timer.idx1()), (100, 100));
        timer.step(|_, t, idx| {
            assert_eq!(t, 10.0);
            assert_eq!(idx, 100);
        });
    }
}
