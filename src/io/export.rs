//! Export reshaped heatmap data.
//!
//! - CSV: long form, one row per cell (`{y_param},{x_param},{target}`)
//! - JSON: grids, matrix rows, labels and shape diagnostics

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{BioParam, ExportFormat, PlotStyle, TargetColumn};
use crate::error::AppError;
use crate::plot::HeatmapFigure;

/// JSON schema of an exported heatmap.
#[derive(Debug, Clone, Serialize)]
pub struct GridExport<'a> {
    pub tool: &'static str,
    pub generated_at: DateTime<Utc>,
    pub target: TargetColumn,
    pub suptitle: String,
    pub colorbar_label: String,
    pub y_param: BioParam,
    pub x_param: BioParam,
    pub y_grid: &'a [f64],
    pub x_grid: &'a [f64],
    /// One inner vector per Y value.
    pub values: Vec<Vec<f64>>,
    pub fixed: Vec<FixedParam>,
    pub style: PlotStyle,
    pub padded: usize,
    pub dropped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixedParam {
    pub param: BioParam,
    pub value: f64,
}

impl<'a> GridExport<'a> {
    pub fn from_figure(figure: &'a HeatmapFigure) -> Self {
        let values = figure
            .values
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect();

        Self {
            tool: "sweep",
            generated_at: Utc::now(),
            target: figure.target,
            suptitle: figure.suptitle(),
            colorbar_label: figure.colorbar_label(),
            y_param: figure.y_param,
            x_param: figure.x_param,
            y_grid: &figure.y_grid,
            x_grid: &figure.x_grid,
            values,
            fixed: figure
                .fixed
                .iter()
                .map(|&(param, value)| FixedParam { param, value })
                .collect(),
            style: figure.style,
            padded: figure.padded,
            dropped: figure.dropped,
        }
    }
}

/// Export path for `figure` inside `dir`.
pub fn export_path(dir: &Path, figure: &HeatmapFigure, format: ExportFormat) -> PathBuf {
    let ext = match format {
        ExportFormat::Csv => "csv",
        ExportFormat::Json => "json",
    };
    dir.join(format!("{}_grid.{ext}", figure.target))
}

pub fn write_grid(path: &Path, figure: &HeatmapFigure, format: ExportFormat) -> Result<(), AppError> {
    match format {
        ExportFormat::Csv => write_grid_csv(path, figure),
        ExportFormat::Json => write_grid_json(path, figure),
    }
}

/// Write the grid in long form. Columns: Y value, X value, cell value.
pub fn write_grid_csv(path: &Path, figure: &HeatmapFigure) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record([
            figure.y_param.column(),
            figure.x_param.column(),
            figure.target.column(),
        ])
        .map_err(|e| AppError::input(format!("Failed to write export CSV header: {e}")))?;

    for (row, y) in figure.y_grid.iter().enumerate().take(figure.values.nrows()) {
        for (col, x) in figure.x_grid.iter().enumerate().take(figure.values.ncols()) {
            let value = figure.values[(row, col)];
            writer
                .write_record([y.to_string(), x.to_string(), value.to_string()])
                .map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
        }
    }

    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush export CSV '{}': {e}", path.display())))?;
    Ok(())
}

pub fn write_grid_json(path: &Path, figure: &HeatmapFigure) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &GridExport::from_figure(figure))
        .map_err(|e| AppError::input(format!("Failed to write export JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn figure() -> HeatmapFigure {
        HeatmapFigure {
            target: TargetColumn::PcfError,
            y_param: BioParam::SigmaM,
            x_param: BioParam::SigmaW,
            y_grid: vec![0.1, 0.2],
            x_grid: vec![0.5, 1.5],
            values: DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 0.0]),
            fixed: vec![(BioParam::D, 0.0)],
            style: PlotStyle::Classic,
            padded: 1,
            dropped: 0,
        }
    }

    #[test]
    fn csv_export_is_long_form() {
        let dir = tempfile::tempdir().unwrap();
        let fig = figure();
        let path = export_path(dir.path(), &fig, ExportFormat::Csv);
        assert!(path.ends_with("pcf_error_grid.csv"));

        write_grid(&path, &fig, ExportFormat::Csv).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines[0], "sigma_m,sigma_w,pcf_error");
        assert_eq!(lines[1], "0.1,0.5,1");
        assert_eq!(lines[4], "0.2,1.5,0");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn json_export_keeps_matrix_rows() {
        let dir = tempfile::tempdir().unwrap();
        let fig = figure();
        let path = export_path(dir.path(), &fig, ExportFormat::Json);
        write_grid(&path, &fig, ExportFormat::Json).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["target"], "pcf_error");
        assert_eq!(parsed["y_param"], "sigma_m");
        assert_eq!(parsed["style"], "classic");
        assert_eq!(parsed["values"][1][0], 3.0);
        assert_eq!(parsed["padded"], 1);
        assert_eq!(parsed["fixed"][0]["param"], "d");
    }
}
