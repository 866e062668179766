//! Plotters-powered heatmap widget for Ratatui.
//!
//! The same `draw_heatmap` used for SVG output draws into the Ratatui buffer
//! through `plotters-ratatui-backend`; only the layout is terminal-sized.

use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::{FigureLayout, HeatmapFigure, draw_heatmap};

pub struct HeatmapWidget<'a> {
    pub figure: &'a HeatmapFigure,
}

impl<'a> Widget for HeatmapWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters cannot lay out a chart plus colorbar in a tiny area.
        if area.width < 30 || area.height < 10 {
            buf.set_string(
                area.x,
                area.y,
                "Plot area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let figure = self.figure;
        let layout = FigureLayout::terminal();
        let widget = widget_fn(move |root| {
            draw_heatmap(&root, figure, &layout)?;
            Ok(())
        });

        widget.render(area, buf);
    }
}
