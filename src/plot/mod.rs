//! Heatmap figures and their renderers.
//!
//! - `figure`: the render-ready figure model
//! - `heatmap`: Plotters renderer (SVG files, terminal buffer)
//! - `ascii`: shaded-character fallback for plain output
//! - `palette`: color maps selected by the plot style

pub mod ascii;
pub mod figure;
pub mod heatmap;
pub mod palette;

pub use ascii::render_ascii_heatmap;
pub use figure::{Cell, HeatmapFigure};
pub use heatmap::{FigureLayout, draw_heatmap, write_svg};
pub use palette::Palette;
