//! Sweep grid inference and reshaping.
//!
//! The sweep tables carry no explicit grid description: the grid is implied
//! by the order of the samples. One parameter varies fastest (it cycles through
//! its values within each block), another varies slower (it stays constant over
//! a block). Both shapes are "contiguous runs that eventually return to the
//! first value", which is what [`grid_from_values`] recognizes.

use nalgebra::DMatrix;

use crate::domain::{BioParam, ParameterSample};

/// Ordered unique values of `param` across the sweep.
pub fn parameter_grid(param: BioParam, samples: &[ParameterSample]) -> Vec<f64> {
    grid_from_values(samples.iter().map(|s| s.get(param)))
}

/// Infer a parameter grid from an ordered value sequence.
///
/// Precondition: equal values appear in contiguous runs, and the run sequence
/// either ends or starts over at the first value. A new grid entry is recorded
/// whenever the value changes; scanning stops at the first return to the
/// initial value (which is not included again).
///
/// Values are compared exactly. Inputs that violate the precondition produce a
/// grid that is wrong but well-formed; use [`run_count`] to spot them.
pub fn grid_from_values<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut grid: Vec<f64> = Vec::new();
    let mut previous: Option<f64> = None;

    for value in values {
        if let Some(first) = grid.first() {
            if previous == Some(value) {
                continue;
            }
            if *first == value {
                break;
            }
        }
        grid.push(value);
        previous = Some(value);
    }

    grid
}

/// Number of contiguous runs in the whole sequence.
pub fn run_count<I>(values: I) -> usize
where
    I: IntoIterator<Item = f64>,
{
    let mut count = 0;
    let mut previous: Option<f64> = None;
    for value in values {
        if previous != Some(value) {
            count += 1;
            previous = Some(value);
        }
    }
    count
}

/// Value of each non-axis parameter, taken from the first sample.
///
/// Returned in canonical [`BioParam::ALL`] order.
pub fn fixed_parameters(
    samples: &[ParameterSample],
    y_param: BioParam,
    x_param: BioParam,
) -> Vec<(BioParam, f64)> {
    BioParam::ALL
        .into_iter()
        .filter(|p| *p != y_param && *p != x_param)
        .filter_map(|p| parameter_grid(p, samples).first().map(|v| (p, *v)))
        .collect()
}

/// Result of laying a flat results column over the sweep grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Reshaped {
    /// `rows = len(y_grid)`, `cols = len(x_grid)`.
    pub values: DMatrix<f64>,
    /// Cells filled with `0.0` because the column was too short.
    pub padded: usize,
    /// Trailing column entries that fell outside the grid.
    pub dropped: usize,
}

impl Reshaped {
    pub fn is_exact(&self) -> bool {
        self.padded == 0 && self.dropped == 0
    }
}

/// Slice `column` into `y_len` consecutive chunks of `x_len`, one matrix row
/// per Y value. Missing trailing cells are padded with `0.0`.
pub fn reshape(column: &[f64], y_len: usize, x_len: usize) -> Reshaped {
    let cells = y_len * x_len;
    let values = DMatrix::from_fn(y_len, x_len, |row, col| {
        column.get(row * x_len + col).copied().unwrap_or(0.0)
    });

    Reshaped {
        values,
        padded: cells.saturating_sub(column.len()),
        dropped: column.len().saturating_sub(cells),
    }
}

/// Cell boundaries for "nearest" shading: each value sits at the center of
/// its cell and inner edges are midpoints between neighbours.
///
/// A single value gets a cell of width `max(|v| * 0.1, 1.0)`.
pub fn cell_edges(centers: &[f64]) -> Vec<f64> {
    match centers {
        [] => Vec::new(),
        [only] => {
            let half = (only.abs() * 0.1).max(1.0) / 2.0;
            vec![only - half, only + half]
        }
        _ => {
            let mut edges = Vec::with_capacity(centers.len() + 1);
            let first_step = centers[1] - centers[0];
            edges.push(centers[0] - first_step / 2.0);
            for pair in centers.windows(2) {
                edges.push((pair[0] + pair[1]) / 2.0);
            }
            let n = centers.len();
            let last_step = centers[n - 1] - centers[n - 2];
            edges.push(centers[n - 1] + last_step / 2.0);
            edges
        }
    }
}
