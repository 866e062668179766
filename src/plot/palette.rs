//! Color maps for heatmap cells and the colorbar.

use plotters::style::RGBColor;

use crate::domain::PlotStyle;

/// Sampled viridis (the default style's color map).
const VIRIDIS: [(f64, (u8, u8, u8)); 9] = [
    (0.0, (68, 1, 84)),
    (0.125, (71, 44, 122)),
    (0.25, (59, 81, 139)),
    (0.375, (44, 113, 142)),
    (0.5, (33, 144, 141)),
    (0.625, (39, 173, 129)),
    (0.75, (92, 200, 99)),
    (0.875, (170, 220, 50)),
    (1.0, (253, 231, 37)),
];

/// Jet, the classic style's higher-contrast map.
const JET: [(f64, (u8, u8, u8)); 6] = [
    (0.0, (0, 0, 128)),
    (0.125, (0, 0, 255)),
    (0.375, (0, 255, 255)),
    (0.625, (255, 255, 0)),
    (0.875, (255, 0, 0)),
    (1.0, (128, 0, 0)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Viridis,
    Jet,
}

impl From<PlotStyle> for Palette {
    fn from(style: PlotStyle) -> Self {
        match style {
            PlotStyle::Default => Palette::Viridis,
            PlotStyle::Classic => Palette::Jet,
        }
    }
}

impl Palette {
    /// Color at position `t` in `[0, 1]` (clamped; NaN maps to the low end).
    pub fn color(self, t: f64) -> RGBColor {
        let stops: &[(f64, (u8, u8, u8))] = match self {
            Palette::Viridis => &VIRIDIS,
            Palette::Jet => &JET,
        };
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        for pair in stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let u = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
                return RGBColor(lerp(c0.0, c1.0, u), lerp(c0.1, c1.1, u), lerp(c0.2, c1.2, u));
            }
        }

        let (_, (r, g, b)) = stops[stops.len() - 1];
        RGBColor(r, g, b)
    }
}

fn lerp(a: u8, b: u8, u: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * u).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_stops() {
        assert_eq!(Palette::Viridis.color(0.0), RGBColor(68, 1, 84));
        assert_eq!(Palette::Viridis.color(1.0), RGBColor(253, 231, 37));
        assert_eq!(Palette::Jet.color(0.0), RGBColor(0, 0, 128));
        assert_eq!(Palette::Jet.color(1.0), RGBColor(128, 0, 0));
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(Palette::Jet.color(-3.0), Palette::Jet.color(0.0));
        assert_eq!(Palette::Jet.color(7.0), Palette::Jet.color(1.0));
        assert_eq!(Palette::Viridis.color(f64::NAN), Palette::Viridis.color(0.0));
    }

    #[test]
    fn midpoint_interpolates() {
        // Halfway between (0,0,128) and (0,0,255).
        assert_eq!(Palette::Jet.color(0.0625), RGBColor(0, 0, 192));
    }

    #[test]
    fn style_selects_palette() {
        assert_eq!(Palette::from(PlotStyle::Default), Palette::Viridis);
        assert_eq!(Palette::from(PlotStyle::Classic), Palette::Jet);
    }
}
