use thiserror::Error;

/// Relative tolerance for comparing interval lengths, scaled by the span.
const SPACING_TOL: f64 = 10.0 * f64::EPSILON;

/// An ordered set of strictly increasing time points.
///
/// A grid with `n` points partitions `[first_time, last_time]` into `n - 1`
/// intervals. Construction validates that at least two points are present,
/// that every point is finite, and that the sequence is strictly increasing,
/// so a `Grid` always holds at least one interval of positive length.
///
/// # Examples
///
/// ```
/// use stride_core::Grid;
///
/// let grid = Grid::from_points(vec![0.0, 1.0, 3.0, 4.0])?;
/// assert_eq!(grid.num_intervals(), 3);
/// assert!(!grid.is_equidistant());
/// # Ok::<(), stride_core::GridError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Grid {
    times: Vec<f64>,
}

/// Errors that can occur when constructing a [`Grid`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GridError {
    #[error("a grid needs at least two time points, got {points}")]
    TooFewPoints { points: usize },

    #[error("time points must be strictly increasing at index {index}")]
    NotIncreasing { index: usize },

    #[error("time points must be finite, got {value} at index {index}")]
    NonFinite { index: usize, value: f64 },
}

impl Grid {
    /// Constructs a grid from an explicit sequence of time points.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two points are given, if any point is
    /// not finite, or if the points are not strictly increasing.
    pub fn from_points(times: Vec<f64>) -> Result<Self, GridError> {
        if times.len() < 2 {
            return Err(GridError::TooFewPoints {
                points: times.len(),
            });
        }
        for (index, &value) in times.iter().enumerate() {
            if !value.is_finite() {
                return Err(GridError::NonFinite { index, value });
            }
        }
        for index in 1..times.len() {
            if times[index] <= times[index - 1] {
                return Err(GridError::NotIncreasing { index });
            }
        }
        Ok(Self { times })
    }

    /// Constructs a uniform grid of `num_points` points over `[first, last]`.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two points are requested or if the
    /// resulting sequence is not finite and strictly increasing (for
    /// example, when `last <= first`).
    pub fn from_range(first: f64, last: f64, num_points: usize) -> Result<Self, GridError> {
        if num_points < 2 {
            return Err(GridError::TooFewPoints { points: num_points });
        }
        let n = num_points - 1;
        let times = (0..=n)
            .map(|i| first + (i as f64 / n as f64) * (last - first))
            .collect();
        Self::from_points(times)
    }

    /// Returns the number of time points.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.times.len()
    }

    /// Returns the number of intervals, always at least one.
    #[must_use]
    pub fn num_intervals(&self) -> usize {
        self.times.len() - 1
    }

    /// Returns the first time point.
    #[must_use]
    pub fn first_time(&self) -> f64 {
        self.times[0]
    }

    /// Returns the last time point.
    #[must_use]
    pub fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Returns the time point at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_points()`.
    #[must_use]
    pub fn time(&self, index: usize) -> f64 {
        self.times[index]
    }

    /// Returns all time points.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the total duration `last_time - first_time`.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.last_time() - self.first_time()
    }

    /// Returns true when every interval has the same length, up to a
    /// floating-point tolerance scaled by the span.
    #[must_use]
    pub fn is_equidistant(&self) -> bool {
        let expected = self.span() / self.num_intervals() as f64;
        let tol = SPACING_TOL * self.span();
        self.times
            .windows(2)
            .all(|pair| ((pair[1] - pair[0]) - expected).abs() <= tol)
    }

    /// Returns the zero-based index of the interval owning `time`.
    ///
    /// The query is expected pre-scaled to the grid's own frame: it is
    /// compared against the interior boundaries multiplied by the
    /// reciprocal of the span. A query exactly on a boundary belongs to the
    /// earlier interval, and queries beyond the last point clamp to the
    /// final interval. Queries before the first point are the caller's
    /// responsibility and are not checked.
    #[must_use]
    pub fn interval_index(&self, time: f64) -> usize {
        let scale = 1.0 / self.span();
        let mut index = 0;
        while index < self.num_intervals() - 1 && time > scale * self.time(index + 1) {
            index += 1;
        }
        index
    }
}
