//! Formatted terminal output.
//!
//! Kept separate from the pipeline so output changes stay local.

use crate::app::pipeline::RunOutput;
use crate::domain::SweepConfig;
use crate::plot::HeatmapFigure;
use crate::plot::figure::format_value;

/// Header block: inputs, grid shape, shape diagnostics.
pub fn format_run_summary(run: &RunOutput, config: &SweepConfig) -> String {
    let mut out = String::new();

    out.push_str("=== sweep - closure parameter heatmaps ===\n");
    out.push_str(&format!("Results: {}\n", config.results_path.display()));
    out.push_str(&format!(
        "Parameters: {} ({} tables)\n",
        config.params_dir.display(),
        run.data.samples.len()
    ));
    out.push_str(&format!(
        "Rows: {} | columns: {}\n",
        run.data.results.rows(),
        run.data.results.headers().join(", ")
    ));
    if run.data.results.missing_cells > 0 {
        out.push_str(&format!(
            "Backward-filled cells: {}\n",
            run.data.results.missing_cells
        ));
    }

    if let Some(first) = run.figures.first() {
        out.push_str(&format!(
            "Grid: {} ({}) x {} ({})\n",
            config.y_param,
            first.y_grid.len(),
            config.x_param,
            first.x_grid.len(),
        ));
    }

    out.push_str("\nFigures:\n");
    for figure in &run.figures {
        out.push_str(&format_figure_line(figure));
        out.push('\n');
    }
    out
}

/// One line per figure: target, value range, style, shape notes.
pub fn format_figure_line(figure: &HeatmapFigure) -> String {
    let range = figure
        .value_range()
        .map(|(lo, hi)| format!("[{}, {}]", format_value(lo), format_value(hi)))
        .unwrap_or_else(|| "[-]".to_string());

    let mut line = format!(
        "  {:<10} {:<18} {range} style={:?}",
        figure.target.column(),
        figure.suptitle(),
        figure.style,
    );
    if figure.padded > 0 {
        line.push_str(&format!(" padded={}", figure.padded));
    }
    if figure.dropped > 0 {
        line.push_str(&format!(" dropped={}", figure.dropped));
    }
    line
}
