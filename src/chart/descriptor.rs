use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use crate::{air::Metric, chart::ChartStyle};

/// Everything a renderer needs to draw one metric's line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescriptor {
    pub metric: Metric,

    pub title: String,

    /// Same order as the readings the chart was built from.
    pub points: Vec<Point>,

    /// Epoch milliseconds. `0..0` for an empty chart.
    pub x_range: AxisRange<i64>,

    /// `0..0` for an empty chart.
    pub y_range: AxisRange<f64>,

    pub class_name: &'static str,

    pub style: ChartStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub at: DateTime<Tz>,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange<T> {
    pub min: T,
    pub max: T,
}

/// Which dashboard panel the charts are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Full-width charts refreshed on the slow timer.
    Main,
    /// Half-width charts refreshed on the fast timer.
    Panel,
}

impl Variant {
    pub fn class_name(&self) -> &'static str {
        match self {
            Variant::Main => "graph-div col s12",
            Variant::Panel => "graph-div col-xs-12 col-sm-6 col-md-6 col-lg-6",
        }
    }
}
