//! Display formatting for the dashboard. All numbers come from the backend.

use crate::models::{DailyVisits, parse_date};

/// `+12.5%` for growth, `-3%` for decline.
pub fn format_growth(value: f64) -> String {
    // -0.0 would print as "-0".
    let value = if value == 0.0 { 0.0 } else { value };
    if value >= 0.0 {
        format!("+{value}%")
    } else {
        format!("{value}%")
    }
}

/// `1234567` as `1,234,567`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One decimal place, as on the click-rate card.
pub fn format_rate(value: f64) -> String {
    format!("{value:.1}")
}

/// `2024-01-05` as `Jan 5`. Unparsable input is returned unchanged.
pub fn format_chart_date(raw: &str) -> String {
    parse_date(raw)
        .map(|date| date.format("%b %-d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[derive(Debug, Clone, PartialEq)]
/// One point of the visits chart, already in SVG coordinates.
pub struct ChartPoint {
    pub label: String,
    pub visits: u64,
    pub x: f64,
    pub y: f64,
}

/// Lays the series out on a `width` x `height` canvas: x evenly spaced,
/// y scaled to the busiest day (0 at the bottom edge).
pub fn chart_points(series: &[DailyVisits], width: f64, height: f64) -> Vec<ChartPoint> {
    let max = series.iter().map(|day| day.visits).max().unwrap_or(0).max(1) as f64;
    let step = if series.len() > 1 {
        width / (series.len() - 1) as f64
    } else {
        0.0
    };

    series
        .iter()
        .enumerate()
        .map(|(i, day)| ChartPoint {
            label: format_chart_date(&day.date),
            visits: day.visits,
            x: step * i as f64,
            y: height - (day.visits as f64 / max) * height,
        })
        .collect()
}

/// `points` attribute of an SVG `<polyline>`.
pub fn polyline(points: &[ChartPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{:.1},{:.1}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, visits: u64) -> DailyVisits {
        DailyVisits {
            date: date.to_string(),
            visits,
        }
    }

    #[test]
    fn growth_has_explicit_sign() {
        assert_eq!(format_growth(12.5), "+12.5%");
        assert_eq!(format_growth(0.0), "+0%");
        assert_eq!(format_growth(-0.0), "+0%");
        assert_eq!(format_growth(-3.0), "-3%");
    }

    #[test]
    fn counts_get_thousand_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn rate_has_one_decimal() {
        assert_eq!(format_rate(3.0), "3.0");
        assert_eq!(format_rate(2.46), "2.5");
    }

    #[test]
    fn chart_dates_are_short_month_and_day() {
        assert_eq!(format_chart_date("2024-01-05"), "Jan 5");
        assert_eq!(format_chart_date("2024-12-25T08:00:00Z"), "Dec 25");
        assert_eq!(format_chart_date("soon"), "soon");
    }

    #[test]
    fn chart_scales_to_busiest_day() {
        let series = vec![day("2024-01-01", 0), day("2024-01-02", 5), day("2024-01-03", 10)];
        let points = chart_points(&series, 200.0, 100.0);

        assert_eq!(points.len(), 3);
        assert_eq!((points[0].x, points[0].y), (0.0, 100.0));
        assert_eq!((points[1].x, points[1].y), (100.0, 50.0));
        assert_eq!((points[2].x, points[2].y), (200.0, 0.0));
        assert_eq!(points[1].label, "Jan 2");
        assert_eq!(polyline(&points), "0.0,100.0 100.0,50.0 200.0,0.0");
    }

    #[test]
    fn empty_series_draws_nothing() {
        assert!(chart_points(&[], 200.0, 100.0).is_empty());
    }
}
