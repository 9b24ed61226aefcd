//! Provider payload -> display text. One-way; nothing numeric is retained.

use std::fmt::Write;

use crate::payload::{CurrentConditions, DailyForecast, HistoricalRecord, HourlyForecast, UvIndex};

pub fn current(conditions: &CurrentConditions) -> String {
    format!(
        "Weather: {}\nTemperature: {}°C",
        conditions.weather_text, conditions.temperature.metric.value
    )
}

pub fn daily_forecast(days: &[DailyForecast]) -> String {
    let mut text = String::from("5-day Forecast:\n");
    for day in days {
        let _ = writeln!(
            text,
            "{}: {}°C - {}°C",
            prefix(&day.date, 10),
            day.temperature.minimum.value,
            day.temperature.maximum.value
        );
    }
    text
}

pub fn uv_index(uv: &UvIndex) -> String {
    format!("UV Index: {}", uv.category)
}

pub fn hourly_forecast(hours: &[HourlyForecast]) -> String {
    let mut text = String::from("12-hour Forecast:\n");
    for hour in hours {
        let _ = writeln!(text, "{}: {}°C", hour_of_day(&hour.date_time), hour.temperature.value);
    }
    text
}

pub fn historical(records: &[HistoricalRecord]) -> String {
    let mut text = String::from("Historical Data:\n");
    for record in records {
        let _ = writeln!(
            text,
            "{}: {}°C",
            prefix(&record.local_observation_date_time, 16),
            record.temperature.metric.value
        );
    }
    text
}

/// First `n` characters.
fn prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// `HH:MM` out of a `YYYY-MM-DDTHH:MM:SS+hh:mm` stamp: characters 14 to 9
/// from the end. Short inputs clamp at the start and may come out empty.
fn hour_of_day(date_time: &str) -> String {
    let len = date_time.chars().count();
    let start = len.saturating_sub(14);
    let end = len.saturating_sub(9);
    date_time.chars().skip(start).take(end - start).collect()
}
