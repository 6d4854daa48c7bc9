use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::air::Metric;

#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub id: i64,

    pub at: DateTime<Utc>,

    pub voc_ccs: f64,

    pub voc_tgs: f64,

    pub pm25: f64,

    pub pm10: f64,
}

impl Reading {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::VocCcs => self.voc_ccs,
            Metric::VocTgs => self.voc_tgs,
            Metric::Pm25 => self.pm25,
            Metric::Pm10 => self.pm10,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadingError {
    #[error("reading {id} is missing metric {metric}")]
    MissingMetric { id: i64, metric: Metric },
}
