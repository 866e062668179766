//! Character-shaded heatmaps for plain terminal output.
//!
//! One grid cell becomes two characters (terminal cells are roughly twice as
//! tall as they are wide). The first Y value is printed at the bottom, like the
//! pseudocolor plot. NaN cells print as `?`.

use crate::plot::figure::{HeatmapFigure, format_value};

/// Shades from low to high.
const SHADES: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

pub fn render_ascii_heatmap(figure: &HeatmapFigure) -> String {
    let mut out = String::new();
    out.push_str(&figure.suptitle());
    out.push('\n');
    let title = figure.title();
    if !title.is_empty() {
        out.push_str(&title);
        out.push('\n');
    }

    let y_labels: Vec<String> = figure.y_grid.iter().map(|v| format_value(*v)).collect();
    let label_width = y_labels.iter().map(String::len).max().unwrap_or(0);

    for row in (0..figure.values.nrows().min(figure.y_grid.len())).rev() {
        out.push_str(&format!("{:>label_width$} |", y_labels[row]));
        for col in 0..figure.values.ncols() {
            let ch = shade(figure, figure.values[(row, col)]);
            out.push(ch);
            out.push(ch);
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "{:>label_width$} +{}\n",
        "",
        "-".repeat(figure.values.ncols() * 2)
    ));
    out.push_str(&format!(
        "y: {} [{}]  x: {} [{}]\n",
        figure.y_label(),
        join_values(&figure.y_grid),
        figure.x_label(),
        join_values(&figure.x_grid),
    ));

    if let Some((lo, hi)) = figure.value_range() {
        out.push_str(&format!(
            "{}: '{}' = {lo:.4} .. '{}' = {hi:.4}\n",
            figure.colorbar_label(),
            SHADES[0],
            SHADES[SHADES.len() - 1],
        ));
    }
    out
}

fn shade(figure: &HeatmapFigure, value: f64) -> char {
    if !value.is_finite() {
        return '?';
    }
    let t = figure.normalized(value);
    let idx = (t * (SHADES.len() - 1) as f64).round() as usize;
    SHADES[idx.min(SHADES.len() - 1)]
}

fn join_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format_value(*v))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BioParam, PlotStyle, TargetColumn};
    use nalgebra::DMatrix;

    fn figure() -> HeatmapFigure {
        HeatmapFigure {
            target: TargetColumn::Beta,
            y_param: BioParam::SigmaM,
            x_param: BioParam::SigmaW,
            y_grid: vec![0.1, 0.2],
            x_grid: vec![0.01, 0.02],
            values: DMatrix::from_row_slice(2, 2, &[0.0, 1.0, f64::NAN, 2.0]),
            fixed: vec![(BioParam::B, 1.0)],
            style: PlotStyle::Default,
            padded: 0,
            dropped: 0,
        }
    }

    #[test]
    fn rows_are_printed_top_down_from_last_y() {
        let text = render_ascii_heatmap(&figure());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Optimal β");
        assert_eq!(lines[1], "b=1.0");
        assert_eq!(lines[2], "0.2 |??@@");
        assert_eq!(lines[3], "0.1 |  ++");
    }

    #[test]
    fn legend_reports_value_range() {
        let text = render_ascii_heatmap(&figure());
        assert!(text.contains("Optimal β value"));
        assert!(text.contains("0.0000"));
        assert!(text.contains("2.0000"));
        assert!(text.contains("x: sigma_w value [0.01, 0.02]"));
    }
}
