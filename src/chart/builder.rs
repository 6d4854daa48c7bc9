use chrono_tz::Tz;

use crate::{
    air::{Metric, Reading},
    chart::{AxisRange, ChartDescriptor, ChartStyle, NO_DATA_TITLE, Point, Variant, format_title},
};

#[derive(Debug, Clone)]
pub struct ChartBuilder {
    timezone: Tz,
    style: ChartStyle,
}

impl ChartBuilder {
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            style: ChartStyle::default(),
        }
    }

    /// One chart per entry of [`Metric::ALL`], in that order.
    ///
    /// `readings` are expected newest first; the first one supplies the title value.
    pub fn build(&self, readings: &[Reading], variant: Variant) -> Vec<ChartDescriptor> {
        Metric::ALL
            .iter()
            .map(|&metric| self.build_one(readings, metric, variant))
            .collect()
    }

    fn build_one(&self, readings: &[Reading], metric: Metric, variant: Variant) -> ChartDescriptor {
        let points: Vec<Point> = readings
            .iter()
            .map(|r| Point {
                at: r.at.with_timezone(&self.timezone),
                value: r.value(metric),
            })
            .collect();

        let x_range = range(
            readings.iter().map(|r| r.at.timestamp_millis()),
            0,
            i64::min,
            i64::max,
        );
        let y_range = range(points.iter().map(|p| p.value), 0.0, f64::min, f64::max);

        let title = match points.first() {
            Some(latest) => format_title(metric, latest.value),
            None => NO_DATA_TITLE.to_string(),
        };

        ChartDescriptor {
            metric,
            title,
            points,
            x_range,
            y_range,
            class_name: variant.class_name(),
            style: self.style,
        }
    }
}

fn range<T: Copy>(
    mut values: impl Iterator<Item = T>,
    empty: T,
    min: fn(T, T) -> T,
    max: fn(T, T) -> T,
) -> AxisRange<T> {
    let Some(first) = values.next() else {
        return AxisRange {
            min: empty,
            max: empty,
        };
    };

    let (lo, hi) = values.fold((first, first), |(lo, hi), v| (min(lo, v), max(hi, v)));

    AxisRange { min: lo, max: hi }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, TimeZone as _, Utc};

    use super::*;

    fn reading(id: i64, at: DateTime<Utc>, base: f64) -> Reading {
        Reading {
            id,
            at,
            voc_ccs: base,
            voc_tgs: base + 1.0,
            pm25: base + 2.0,
            pm10: base + 3.0,
        }
    }

    fn newest_first() -> Vec<Reading> {
        let t0 = Utc.with_ymd_and_hms(2020, 2, 3, 15, 0, 0).unwrap();
        vec![
            reading(3, t0 + TimeDelta::minutes(2), 1234.75),
            reading(2, t0 + TimeDelta::minutes(1), 10.0),
            reading(1, t0, 500.0),
        ]
    }

    #[test]
    fn builds_four_charts_in_fixed_order() {
        let builder = ChartBuilder::new(chrono_tz::Asia::Taipei);

        for readings in [newest_first(), newest_first()[..1].to_vec()] {
            let metrics: Vec<_> = builder
                .build(&readings, Variant::Main)
                .iter()
                .map(|c| c.metric)
                .collect();
            assert_eq!(metrics, Metric::ALL);
        }
    }

    #[test]
    fn empty_batch_yields_no_data_charts() {
        let charts = ChartBuilder::new(chrono_tz::Asia::Taipei).build(&[], Variant::Panel);

        assert_eq!(charts.len(), 4);
        for chart in charts {
            assert_eq!(chart.title, "no data");
            assert!(chart.points.is_empty());
            assert_eq!(chart.x_range, AxisRange { min: 0, max: 0 });
            assert_eq!(chart.y_range, AxisRange { min: 0.0, max: 0.0 });
        }
    }

    #[test]
    fn series_keeps_store_order() {
        let readings = newest_first();
        let charts = ChartBuilder::new(chrono_tz::Asia::Taipei).build(&readings, Variant::Main);

        let values: Vec<_> = charts[0].points.iter().map(|p| p.value).collect();
        assert_eq!(values, [1234.75, 10.0, 500.0]);
    }

    #[test]
    fn ranges_cover_series() {
        let readings = newest_first();
        let charts = ChartBuilder::new(chrono_tz::Asia::Taipei).build(&readings, Variant::Main);
        let pm10 = &charts[3];

        assert_eq!(pm10.y_range, AxisRange { min: 13.0, max: 1237.75 });
        assert_eq!(
            pm10.x_range,
            AxisRange {
                min: readings[2].at.timestamp_millis(),
                max: readings[0].at.timestamp_millis(),
            }
        );
    }

    #[test]
    fn title_uses_newest_reading() {
        let charts =
            ChartBuilder::new(chrono_tz::Asia::Taipei).build(&newest_first(), Variant::Main);

        assert_eq!(charts[0].title, "VOC-CCS:  1,235 PPB");
        assert_eq!(charts[2].title, "PM2.5:  1,237 μg/m3");
    }

    #[test]
    fn points_are_in_local_time() {
        let charts =
            ChartBuilder::new(chrono_tz::Asia::Taipei).build(&newest_first(), Variant::Main);
        let at = charts[0].points[2].at;

        assert_eq!(at.to_rfc3339(), "2020-02-03T23:00:00+08:00");
    }

    #[test]
    fn variant_only_changes_class_name() {
        let builder = ChartBuilder::new(chrono_tz::Asia::Taipei);
        let main = builder.build(&newest_first(), Variant::Main);
        let panel = builder.build(&newest_first(), Variant::Panel);

        assert_eq!(main[1].class_name, "graph-div col s12");
        assert_eq!(
            panel[1].class_name,
            "graph-div col-xs-12 col-sm-6 col-md-6 col-lg-6"
        );
        assert_eq!(main[1].points, panel[1].points);
        assert_eq!(main[1].title, panel[1].title);
    }
}
