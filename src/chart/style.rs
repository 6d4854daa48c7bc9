use serde::Serialize;

pub const LINE_COLOR: &str = "#27b5b3";
pub const AXIS_COLOR: &str = "rgb(204, 204, 204)";
pub const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// Presentation constants handed to the renderer with every chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartStyle {
    pub line: LineStyle,

    pub height: u32,

    pub margin: Margin,

    pub axis: AxisStyle,

    pub plot_background: &'static str,

    pub paper_background: &'static str,

    pub hover_label_color: &'static str,

    pub show_legend: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Margin {
    pub top: u32,
    pub left: u32,
    pub right: u32,
    pub bottom: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxisStyle {
    pub color: &'static str,
    pub line_width: u32,
    pub tick_width: u32,
    pub tick_len: u32,
    pub tick_font_size: u32,
    /// d3 format for hovered y values.
    pub hover_format: &'static str,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line: LineStyle {
                color: LINE_COLOR,
                width: 3,
            },
            height: 370,
            margin: Margin {
                top: 30,
                left: 55,
                right: 20,
                bottom: 70,
            },
            axis: AxisStyle {
                color: AXIS_COLOR,
                line_width: 2,
                tick_width: 2,
                tick_len: 5,
                tick_font_size: 12,
                hover_format: ".0f",
            },
            plot_background: TRANSPARENT,
            paper_background: TRANSPARENT,
            hover_label_color: "#FFA200",
            show_legend: false,
        }
    }
}
