use stride_core::Grid;

use super::error::Error;

/// Guard subtracted before `ceil` so a length that is already an exact
/// multiple of the step size is not rounded up by floating-point noise.
const ROUNDING_GUARD: f64 = 10.0 * f64::EPSILON;

/// Integration grid derived from a shooting grid, plus per-interval step
/// counts when the shooting grid is non-equidistant.
#[derive(Debug)]
pub(super) struct DerivedGrid {
    pub(super) grid: Grid,
    pub(super) steps_per_interval: Vec<usize>,
}

/// Computes the integration grid for a shooting grid and a desired total
/// number of integration steps.
///
/// An equidistant shooting grid yields one canonical interval of length
/// `span / N`, subdivided into `ceil(desired_steps / N)` steps; every
/// shooting interval replays the same template and the step vector stays
/// empty. A non-equidistant shooting grid yields a single generic step of
/// size `span / desired_steps` together with one count per interval, sized
/// so no interval undershoots its true duration.
pub(super) fn derive(ocp_grid: &Grid, desired_steps: usize) -> Result<DerivedGrid, Error> {
    if desired_steps == 0 {
        return Err(Error::ZeroSteps);
    }

    let intervals = ocp_grid.num_intervals();
    let span = ocp_grid.span();
    let h = span / desired_steps as f64;

    if ocp_grid.is_equidistant() {
        let per_interval =
            (desired_steps as f64 / intervals as f64 - ROUNDING_GUARD).ceil() as usize;
        let grid = Grid::from_range(0.0, span / intervals as f64, per_interval + 1)?;
        Ok(DerivedGrid {
            grid,
            steps_per_interval: Vec::new(),
        })
    } else {
        let steps_per_interval = (0..intervals)
            .map(|i| {
                let length = ocp_grid.time(i + 1) - ocp_grid.time(i);
                let steps = (length / h - ROUNDING_GUARD).ceil() as usize;
                // An interval shorter than the guard still gets one step.
                steps.max(1)
            })
            .collect();
        let grid = Grid::from_range(0.0, h, 2)?;
        Ok(DerivedGrid {
            grid,
            steps_per_interval,
        })
    }
}
