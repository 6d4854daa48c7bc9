use crate::air::Metric;

pub const NO_DATA_TITLE: &str = "no data";

/// `"{name}:  {value} {unit}"` with the value rounded and comma grouped, e.g. `"PM2.5:  1,235 μg/m3"`.
///
/// The unit separator is kept even when the unit is empty.
pub fn format_title(metric: Metric, latest: f64) -> String {
    format!(
        "{}:  {} {}",
        metric.display_name(),
        group_thousands(latest),
        metric.unit()
    )
}

/// Rounds to an integer (ties to even) and inserts `,` every three digits.
pub fn group_thousands(value: f64) -> String {
    let rounded = format!("{value:.0}");
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", rounded.as_str()),
    };

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        // inf / NaN
        return rounded;
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pm25_title() {
        assert_eq!(format_title(Metric::Pm25, 1234.6), "PM2.5:  1,235 μg/m3");
    }

    #[test]
    fn empty_unit_keeps_trailing_space() {
        assert_eq!(format_title(Metric::VocTgs, 7.0), "VOC-TGS:  7 ");
    }

    #[test]
    fn voc_ccs_title() {
        assert_eq!(format_title(Metric::VocCcs, 412.2), "VOC-CCS:  412 PPB");
    }

    #[test]
    fn grouping() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.4), "999");
        assert_eq!(group_thousands(999.5), "1,000");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
        assert_eq!(group_thousands(-1234.0), "-1,234");
        assert_eq!(group_thousands(100000.0), "100,000");
    }

    #[test]
    fn rounds_ties_to_even() {
        assert_eq!(group_thousands(0.5), "0");
        assert_eq!(group_thousands(2.5), "2");
        assert_eq!(group_thousands(3.5), "4");
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert_eq!(group_thousands(f64::NAN), "NaN");
        assert_eq!(group_thousands(f64::INFINITY), "inf");
    }
}
