//! Plotters heatmap renderer.
//!
//! `draw_heatmap` is backend-agnostic: the SVG exporter and the terminal
//! viewer both call it, only the `FigureLayout` differs.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::AppError;
use crate::plot::figure::HeatmapFigure;
use crate::plot::palette::Palette;

const FONT: &str = "sans-serif";

/// Number of color steps drawn in the colorbar.
const COLORBAR_STEPS: usize = 64;

/// Pixel-level layout knobs for one output medium.
#[derive(Debug, Clone, Copy)]
pub struct FigureLayout {
    /// `None` leaves the target untouched (the terminal keeps its own background).
    pub background: Option<RGBColor>,
    pub foreground: RGBColor,
    pub suptitle_size: u32,
    pub title_size: u32,
    pub label_size: u32,
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
    /// Share of the width given to the colorbar panel.
    pub colorbar_fraction: f64,
    pub colorbar_label_area: u32,
    pub ticks: usize,
}

impl FigureLayout {
    /// Print-quality layout for file output.
    pub fn svg() -> Self {
        Self {
            background: Some(WHITE),
            foreground: BLACK,
            suptitle_size: 24,
            title_size: 16,
            label_size: 14,
            margin: 16,
            x_label_area: 50,
            y_label_area: 70,
            colorbar_fraction: 0.18,
            colorbar_label_area: 90,
            ticks: 8,
        }
    }

    /// Compact layout for terminal cells.
    pub fn terminal() -> Self {
        Self {
            background: None,
            foreground: WHITE,
            suptitle_size: 12,
            title_size: 10,
            label_size: 10,
            margin: 1,
            x_label_area: 3,
            y_label_area: 8,
            colorbar_fraction: 0.2,
            colorbar_label_area: 8,
            ticks: 5,
        }
    }
}

/// Draw `figure` onto `root`: suptitle, cell plot, colorbar.
pub fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &HeatmapFigure,
    layout: &FigureLayout,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if let Some(background) = layout.background {
        root.fill(&background)?;
    }
    let fg = layout.foreground;

    let suptitle = figure.suptitle();
    let root = root.titled(
        &suptitle,
        (FONT, layout.suptitle_size)
            .into_font()
            .style(FontStyle::Bold)
            .color(&fg),
    )?;

    let (width, _) = root.dim_in_pixel();
    let main_width = (width as f64 * (1.0 - layout.colorbar_fraction)).round() as u32;
    let (main, bar) = root.split_horizontally(main_width);

    let (Some((x0, x1)), Some((y0, y1))) = (figure.x_span(), figure.y_span()) else {
        // Nothing to shade; the suptitle still identifies the figure.
        return Ok(());
    };

    let palette = Palette::from(figure.style);
    let title = figure.title();
    let x_label = figure.x_label();
    let y_label = figure.y_label();
    let label_style = (FONT, layout.label_size).into_font().color(&fg);

    let mut chart = ChartBuilder::on(&main)
        .caption(&title, (FONT, layout.title_size).into_font().color(&fg))
        .margin(layout.margin)
        .x_label_area_size(layout.x_label_area)
        .y_label_area_size(layout.y_label_area)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_label.as_str())
        .y_desc(y_label.as_str())
        .x_labels(layout.ticks)
        .y_labels(layout.ticks)
        .label_style(label_style.clone())
        .axis_desc_style(label_style.clone())
        .axis_style(&fg)
        .draw()?;

    chart.draw_series(figure.cells().into_iter().map(|cell| {
        let color = palette.color(figure.normalized(cell.value));
        Rectangle::new([(cell.x0, cell.y0), (cell.x1, cell.y1)], color.filled())
    }))?;

    let Some((v0, v1)) = figure.value_range() else {
        return Ok(());
    };

    let colorbar_label = figure.colorbar_label();
    let mut colorbar = ChartBuilder::on(&bar)
        .margin(layout.margin)
        .margin_top(layout.margin + layout.title_size)
        .x_label_area_size(layout.x_label_area)
        .set_label_area_size(LabelAreaPosition::Right, layout.colorbar_label_area)
        .build_cartesian_2d(0.0..1.0, v0..v1)?;

    colorbar
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(colorbar_label.as_str())
        .y_labels(layout.ticks)
        .label_style(label_style.clone())
        .axis_desc_style(label_style)
        .axis_style(&fg)
        .draw()?;

    let step = (v1 - v0) / COLORBAR_STEPS as f64;
    colorbar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let lo = v0 + step * i as f64;
        let t = (i as f64 + 0.5) / COLORBAR_STEPS as f64;
        Rectangle::new([(0.0, lo), (1.0, lo + step)], palette.color(t).filled())
    }))?;

    Ok(())
}

/// Render `figure` to an SVG file.
pub fn write_svg(path: &Path, figure: &HeatmapFigure, size: (u32, u32)) -> Result<(), AppError> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    let layout = FigureLayout::svg();
    draw_heatmap(&root, figure, &layout)
        .map_err(|e| AppError::render(format!("Failed to draw '{}': {e}", path.display())))?;
    root.present()
        .map_err(|e| AppError::render(format!("Failed to write SVG '{}': {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BioParam, PlotStyle, TargetColumn};
    use nalgebra::DMatrix;

    fn figure(target: TargetColumn) -> HeatmapFigure {
        HeatmapFigure {
            target,
            y_param: BioParam::SigmaM,
            x_param: BioParam::SigmaW,
            y_grid: vec![0.1, 0.2],
            x_grid: vec![0.01, 0.02, 0.03],
            values: DMatrix::from_row_slice(2, 3, &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]),
            fixed: vec![(BioParam::B, 1.0), (BioParam::D, 0.0), (BioParam::Dd, 0.01)],
            style: PlotStyle::for_target(PlotStyle::Default, target),
            padded: 0,
            dropped: 0,
        }
    }

    fn render(figure: &HeatmapFigure) -> String {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (800, 600)).into_drawing_area();
            draw_heatmap(&root, figure, &FigureLayout::svg()).unwrap();
            root.present().unwrap();
        }
        svg
    }

    #[test]
    fn svg_contains_titles_and_labels() {
        let svg = render(&figure(TargetColumn::PopError));
        assert!(svg.contains("Population error"));
        assert!(svg.contains("b=1.0 d=0.0 dd=0.01"));
        assert!(svg.contains("sigma_w value"));
        assert!(svg.contains("sigma_m value"));
    }

    #[test]
    fn svg_draws_one_rect_per_cell_plus_colorbar() {
        let svg = render(&figure(TargetColumn::Alpha));
        // Background fill + 6 cells + colorbar steps, at minimum.
        assert!(svg.matches("<rect").count() >= 1 + 6 + COLORBAR_STEPS);
    }

    #[test]
    fn write_svg_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.svg");
        write_svg(&path, &figure(TargetColumn::Alpha), (640, 480)).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("<svg"));
    }
}
