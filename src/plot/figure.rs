//! Render-ready heatmap description.
//!
//! A `HeatmapFigure` is built once per target column by the pipeline and then
//! handed to whichever front-end draws it (SVG, terminal viewer, ASCII).

use nalgebra::DMatrix;

use crate::domain::{BioParam, PlotStyle, TargetColumn};
use crate::grid::cell_edges;

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapFigure {
    pub target: TargetColumn,
    pub y_param: BioParam,
    pub x_param: BioParam,
    pub y_grid: Vec<f64>,
    pub x_grid: Vec<f64>,
    /// `rows = y_grid.len()`, `cols = x_grid.len()`.
    pub values: DMatrix<f64>,
    /// Non-axis parameters and their (constant) values.
    pub fixed: Vec<(BioParam, f64)>,
    pub style: PlotStyle,
    pub padded: usize,
    pub dropped: usize,
}

/// One shaded cell of the pseudocolor plot, in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub value: f64,
}

impl HeatmapFigure {
    pub fn suptitle(&self) -> String {
        self.target.suptitle()
    }

    pub fn colorbar_label(&self) -> String {
        self.target.colorbar_label()
    }

    /// Fixed-parameter annotation, e.g. `b=1.0 d=0.0 dd=0.01`.
    pub fn title(&self) -> String {
        self.fixed
            .iter()
            .map(|(param, value)| format!("{param}={}", format_value(*value)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn x_label(&self) -> String {
        self.x_param.axis_label()
    }

    pub fn y_label(&self) -> String {
        self.y_param.axis_label()
    }

    /// Min/max over finite values, widened when degenerate.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let (lo, hi) = self
            .values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if !lo.is_finite() || !hi.is_finite() {
            return None;
        }
        if (hi - lo).abs() < f64::EPSILON {
            let pad = (lo.abs() * 0.05).max(0.5);
            return Some((lo - pad, hi + pad));
        }
        Some((lo, hi))
    }

    /// Data-space extent of the shaded area on the x axis.
    pub fn x_span(&self) -> Option<(f64, f64)> {
        span(&cell_edges(&self.x_grid))
    }

    pub fn y_span(&self) -> Option<(f64, f64)> {
        span(&cell_edges(&self.y_grid))
    }

    /// All cells with a finite value; NaN cells are left blank.
    pub fn cells(&self) -> Vec<Cell> {
        let x_edges = cell_edges(&self.x_grid);
        let y_edges = cell_edges(&self.y_grid);
        let mut out = Vec::with_capacity(self.values.len());
        for row in 0..self.values.nrows().min(self.y_grid.len()) {
            for col in 0..self.values.ncols().min(self.x_grid.len()) {
                let value = self.values[(row, col)];
                if !value.is_finite() {
                    continue;
                }
                out.push(Cell {
                    x0: x_edges[col],
                    x1: x_edges[col + 1],
                    y0: y_edges[row],
                    y1: y_edges[row + 1],
                    value,
                });
            }
        }
        out
    }

    /// Normalize `value` into `[0, 1]` against the figure's value range.
    pub fn normalized(&self, value: f64) -> f64 {
        match self.value_range() {
            Some((lo, hi)) => ((value - lo) / (hi - lo)).clamp(0.0, 1.0),
            None => 0.0,
        }
    }
}

fn span(edges: &[f64]) -> Option<(f64, f64)> {
    let lo = edges.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = edges.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo.is_finite() && hi.is_finite() && hi > lo {
        Some((lo, hi))
    } else {
        None
    }
}

/// Format a parameter value the way the sweep tables print them.
///
/// Integral values keep one decimal (`1.0`, not `1`). Magnitudes below `1e-4`
/// or from `1e16` up use scientific notation with a signed two-digit exponent
/// (`1e-05`, `2.5e-07`, `1e+16`).
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let magnitude = value.abs();
    if value != 0.0 && (magnitude < 1e-4 || magnitude >= 1e16) {
        return scientific(value);
    }
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn scientific(value: f64) -> String {
    let raw = format!("{value:e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure() -> HeatmapFigure {
        HeatmapFigure {
            target: TargetColumn::Alpha,
            y_param: BioParam::SigmaM,
            x_param: BioParam::SigmaW,
            y_grid: vec![0.1, 0.2],
            x_grid: vec![1.0, 2.0, 3.0],
            values: DMatrix::from_row_slice(2, 3, &[0.0, 1.0, 2.0, 3.0, f64::NAN, 4.0]),
            fixed: vec![(BioParam::B, 1.0), (BioParam::D, 0.0), (BioParam::Dd, 0.01)],
            style: PlotStyle::Default,
            padded: 0,
            dropped: 0,
        }
    }

    #[test]
    fn title_lists_fixed_parameters() {
        assert_eq!(figure().title(), "b=1.0 d=0.0 dd=0.01");
    }

    #[test]
    fn title_uses_scientific_notation_for_tiny_values() {
        let mut fig = figure();
        fig.fixed = vec![(BioParam::B, 1.0), (BioParam::D, 0.00001), (BioParam::Dd, 0.01)];
        assert_eq!(fig.title(), "b=1.0 d=1e-05 dd=0.01");
    }

    #[test]
    fn cells_skip_nan_and_cover_grid() {
        let fig = figure();
        let cells = fig.cells();
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[0].x0, 0.5);
        assert_eq!(cells[0].x1, 1.5);
        assert!((cells[0].y0 - 0.05).abs() < 1e-12);
        assert_eq!(fig.x_span(), Some((0.5, 3.5)));
    }

    #[test]
    fn value_range_ignores_nan() {
        let fig = figure();
        assert_eq!(fig.value_range(), Some((0.0, 4.0)));
        assert_eq!(fig.normalized(2.0), 0.5);
    }

    #[test]
    fn constant_values_get_a_nonempty_range() {
        let mut fig = figure();
        fig.values = DMatrix::from_element(2, 3, 2.0);
        let (lo, hi) = fig.value_range().unwrap();
        assert!(lo < 2.0 && hi > 2.0);
    }

    #[test]
    fn integral_values_keep_one_decimal() {
        assert_eq!(format_value(1.0), "1.0");
        assert_eq!(format_value(0.25), "0.25");
    }

    #[test]
    fn small_and_huge_values_use_scientific_notation() {
        assert_eq!(format_value(0.00001), "1e-05");
        assert_eq!(format_value(-2.5e-7), "-2.5e-07");
        assert_eq!(format_value(1e16), "1e+16");
        assert_eq!(format_value(1.5e-123), "1.5e-123");
        assert_eq!(format_value(0.0001), "0.0001");
        assert_eq!(format_value(0.0), "0.0");
    }
}
