use crate::analytics_client::api::ActivityDay;
use crate::format;
use crate::selection::ActivityMetric;
use std::cmp::max;

/// Shortest bar, in percent, so that zero days still show up.
pub const MIN_BAR_PERCENT: u32 = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
    pub height_percent: u32,
}

pub fn metric_value(day: &ActivityDay, metric: ActivityMetric) -> u64 {
    match metric {
        ActivityMetric::PostCount => day.post_count,
        ActivityMetric::Engagements => day.engagements,
    }
}

/// Largest value of `metric` across `days`, never less than 1.
pub fn denominator(days: &[ActivityDay], metric: ActivityMetric) -> u64 {
    days.iter()
        .map(|day| metric_value(day, metric))
        .max()
        .unwrap_or(0)
        .max(1)
}

pub fn bar_height_percent(value: u64, denominator: u64) -> u32 {
    let percent = (value as f64 / max(denominator, 1) as f64 * 100.0).round() as u32;
    max(MIN_BAR_PERCENT, percent)
}

pub fn bars(days: &[ActivityDay], metric: ActivityMetric) -> Vec<Bar> {
    let denominator = denominator(days, metric);
    days.iter()
        .map(|day| {
            let value = metric_value(day, metric);
            Bar {
                label: format::day_label(&day.date),
                value,
                height_percent: bar_height_percent(value, denominator),
            }
        })
        .collect()
}

/// Terminal rows for a bar of `height_percent` in a chart `chart_rows` tall.
pub fn bar_rows(height_percent: u32, chart_rows: u16) -> u16 {
    let rows = (height_percent as f64 / 100.0 * chart_rows as f64).round() as u16;
    rows.clamp(1, max(chart_rows, 1))
}
