//! Position histories.
//!
//! [`Trajectory`] grows without bound; [`TrajectoryBuffer`] keeps a fixed
//! number of samples in a ring and is seeded from a `Trajectory` through
//! [`TrajectoryBuffer::bufferize`]. Each sample carries the time step that
//! separates it from the previous one.

use crate::error::KinematicsError;
use crate::ring;
use crate::traits::{Scalar, Vector};
use serde::{Deserialize, Serialize};

/// Step recorded for a new sample: the given one, else the last given one,
/// else one.
fn resolve_step<T: Scalar>(dt: Option<T>, last_step: &mut Option<T>) -> T {
    match dt {
        Some(step) => {
            *last_step = Some(step);
            step
        }
        None => last_step.unwrap_or_else(T::one),
    }
}

fn sum<T: Scalar>(steps: &[T]) -> T {
    steps.iter().fold(T::zero(), |acc, &s| acc + s)
}

/// Unbounded sequence of samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory<T, V> {
    samples: Vec<V>,
    steps: Vec<T>,
    last_step: Option<T>,
}

impl<T: Scalar, V: Vector<T>> Trajectory<T, V> {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            steps: Vec::new(),
            last_step: None,
        }
    }

    pub fn add(&mut self, sample: V, dt: Option<T>) {
        let step = resolve_step(dt, &mut self.last_step);
        self.samples.push(sample);
        self.steps.push(step);
    }

    pub fn push(&mut self, sample: V) {
        self.add(sample, None);
    }

    pub fn get(&self, i: usize) -> Option<&V> {
        self.samples.get(i)
    }

    pub fn last(&self) -> Option<&V> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Elapsed time over the most recent `i` steps.
    pub fn duration(&self, i: usize) -> T {
        let i = i.min(self.steps.len());
        sum(&self.steps[self.steps.len() - i..])
    }

    pub fn vertices(&self) -> &[V] {
        &self.samples
    }

    pub fn steps(&self) -> &[T] {
        &self.steps
    }
}

/// Fixed-capacity ring of samples.
///
/// The buffer is always full: unwritten slots hold zero samples with zero
/// steps. `add_index` is the next slot to overwrite, so the newest sample
/// sits just before it and the oldest retained sample at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryBuffer<T, V> {
    samples: Vec<V>,
    steps: Vec<T>,
    add_index: usize,
    last_step: Option<T>,
}

impl<T: Scalar, V: Vector<T>> TrajectoryBuffer<T, V> {
    pub fn new(capacity: usize) -> Result<Self, KinematicsError> {
        if capacity == 0 {
            return Err(KinematicsError::ZeroCapacity);
        }
        Ok(Self {
            samples: vec![V::zeros(); capacity],
            steps: vec![T::zero(); capacity],
            add_index: 0,
            last_step: None,
        })
    }

    /// Seeds a ring from an unbounded trajectory.
    ///
    /// A source at least `capacity` long contributes its newest `capacity`
    /// samples and the cursor starts at slot 0. A shorter source is stored
    /// at the front of the storage with zero padding behind it, and the
    /// cursor points at the first padding slot; read in logical order the
    /// padding comes first.
    pub fn bufferize(capacity: usize, source: &Trajectory<T, V>) -> Result<Self, KinematicsError> {
        let mut buffer = Self::new(capacity)?;
        let len = source.len();
        if len >= capacity {
            buffer.samples.copy_from_slice(&source.samples[len - capacity..]);
            buffer.steps.copy_from_slice(&source.steps[len - capacity..]);
            buffer.add_index = 0;
        } else {
            buffer.samples[..len].copy_from_slice(&source.samples);
            buffer.steps[..len].copy_from_slice(&source.steps);
            buffer.add_index = len;
        }
        buffer.last_step = source.last_step;
        Ok(buffer)
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    pub fn add_index(&self) -> usize {
        self.add_index
    }

    /// Overwrites the oldest sample. A missing `dt` reuses the last given
    /// step, or one if none was ever given.
    pub fn add(&mut self, sample: V, dt: Option<T>) {
        let step = resolve_step(dt, &mut self.last_step);
        self.samples[self.add_index] = sample;
        self.steps[self.add_index] = step;
        self.add_index = ring::offset(self.add_index, 1, self.capacity());
    }

    pub fn push(&mut self, sample: V) {
        self.add(sample, None);
    }

    fn slot(&self, i: usize) -> usize {
        ring::logical_index(self.add_index, i, self.capacity())
    }

    /// The `i`-th retained sample counted from the oldest; indices past the
    /// capacity wrap around.
    pub fn get(&self, i: usize) -> V {
        self.samples[self.slot(i)]
    }

    /// Time step between retained samples `i - 1` and `i`.
    pub fn step(&self, i: usize) -> T {
        self.steps[self.slot(i)]
    }

    pub fn last(&self) -> V {
        self.samples[ring::last_index(self.add_index, self.capacity())]
    }

    pub fn next_to_last(&self) -> V {
        self.samples[ring::next_to_last_index(self.add_index, self.capacity())]
    }

    pub fn last_step(&self) -> T {
        self.steps[ring::last_index(self.add_index, self.capacity())]
    }

    /// Sum of steps over logical positions `from..to`, oldest first.
    fn logical_sum(&self, from: usize, to: usize) -> T {
        let capacity = self.capacity();
        let len = to - from;
        let start = self.slot(from);
        if start + len <= capacity {
            sum(&self.steps[start..start + len])
        } else {
            // Window crosses the end of the storage: tail segment, then head.
            let head = sum(&self.steps[start..]);
            head + sum(&self.steps[..start + len - capacity])
        }
    }

    /// Elapsed time over the most recent `i` steps.
    pub fn duration(&self, i: usize) -> T {
        let capacity = self.capacity();
        let i = i.min(capacity);
        self.logical_sum(capacity - i, capacity)
    }

    fn window_position(&self, u: T) -> (usize, T) {
        let last = self.capacity() - 1;
        let s = u.max(T::zero()).min(T::one()) * T::from_usize(last).unwrap_or_else(T::zero);
        let k = s.floor().to_usize().unwrap_or(0).min(last);
        (k, s - s.floor())
    }

    /// Elapsed time from the oldest retained sample to the normalized window
    /// position `u` in `[0, 1]`, linear inside a step. `time(1)` equals
    /// `duration(capacity - 1)`.
    pub fn time(&self, u: T) -> T {
        let (k, frac) = self.window_position(u);
        let whole = self.logical_sum(1, k + 1);
        if k + 1 < self.capacity() {
            whole + frac * self.step(k + 1)
        } else {
            whole
        }
    }

    /// Sample at the normalized window position `u`, interpolated linearly
    /// between neighbours.
    pub fn position(&self, u: T) -> V {
        let (k, frac) = self.window_position(u);
        if k + 1 < self.capacity() {
            self.get(k).lerp(&self.get(k + 1), frac)
        } else {
            self.get(k)
        }
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        (0..self.capacity()).map(move |i| &self.samples[self.slot(i)])
    }

    pub fn vertices(&self) -> Vec<V> {
        self.iter().copied().collect()
    }

    /// Restores the freshly constructed state.
    pub fn clear(&mut self) {
        self.samples.fill(V::zeros());
        self.steps.fill(T::zero());
        self.add_index = 0;
        self.last_step = None;
    }
}
