use std::fmt;

use serde::Serialize;

/// One tracked air-quality measurement. Charts are always built in the order of [`Metric::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    #[serde(rename = "VOC-CCS")]
    VocCcs,
    #[serde(rename = "VOC-TGS")]
    VocTgs,
    #[serde(rename = "PM25")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::VocCcs, Metric::VocTgs, Metric::Pm25, Metric::Pm10];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::VocCcs => "VOC-CCS",
            Metric::VocTgs => "VOC-TGS",
            Metric::Pm25 => "PM25",
            Metric::Pm10 => "PM10",
        }
    }

    /// Name shown in chart titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::Pm25 => "PM2.5",
            other => other.as_str(),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::VocCcs => "PPB",
            Metric::VocTgs => "",
            Metric::Pm25 => "μg/m3",
            Metric::Pm10 => "μg/m3",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
