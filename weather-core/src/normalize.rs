//! Mapping of raw OpenWeather JSON payloads into fixed-shape records.
//!
//! The payload is walked as a [`serde_json::Value`] rather than deserialized
//! into mirror structs so that a missing field is reported by its dotted
//! path (e.g. `main.humidity`), which is what the CLI shows to the user.

use std::collections::HashSet;
use std::fmt::Display;

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike};
use serde_json::Value;

use crate::error::{Result, WeatherError};
use crate::model::{ForecastEntry, TIMESTAMP_FORMAT, WeatherRecord};

/// `cod` value the provider uses for a successful answer.
pub const SUCCESS_CODE: i64 = 200;

/// Forecast entries within this many hours of noon are preferred.
const MIDDAY_WINDOW_HOURS: u32 = 3;

const WEEKDAYS_RU: [&str; 7] = [
    "Понедельник",
    "Вторник",
    "Среда",
    "Четверг",
    "Пятница",
    "Суббота",
    "Воскресенье",
];

struct Field {
    pointer: &'static str,
    name: &'static str,
}

const TEMP: Field = Field { pointer: "/main/temp", name: "main.temp" };
const FEELS_LIKE: Field = Field { pointer: "/main/feels_like", name: "main.feels_like" };
const HUMIDITY: Field = Field { pointer: "/main/humidity", name: "main.humidity" };
const PRESSURE: Field = Field { pointer: "/main/pressure", name: "main.pressure" };
const WIND_SPEED: Field = Field { pointer: "/wind/speed", name: "wind.speed" };
const DESCRIPTION: Field =
    Field { pointer: "/weather/0/description", name: "weather[0].description" };
const DT: Field = Field { pointer: "/dt", name: "dt" };

/// Build a [`WeatherRecord`] from a current-weather payload.
///
/// `observed_at` becomes the record timestamp; payload time fields are ignored.
pub fn normalize_current(
    raw: &Value,
    city: &str,
    observed_at: NaiveDateTime,
) -> Result<WeatherRecord> {
    Ok(WeatherRecord {
        city: city.to_string(),
        timestamp: observed_at.format(TIMESTAMP_FORMAT).to_string(),
        temperature: round1(number(raw, &TEMP)?),
        feels_like: round1(number(raw, &FEELS_LIKE)?),
        humidity: integer(raw, &HUMIDITY)?,
        pressure: integer(raw, &PRESSURE)?,
        wind_speed: round1(number(raw, &WIND_SPEED)?),
        description: capitalize(text(raw, &DESCRIPTION)?),
        visibility: optional_integer(raw, "visibility"),
    })
}

/// Pick at most `days` forecast entries, one per calendar day in `tz`,
/// preferring the slot closest to noon.
///
/// The first usable slot is always taken so that a forecast requested late
/// in the evening still starts with today. Malformed list items are skipped.
pub fn normalize_forecast<Tz>(raw: &Value, days: usize, tz: &Tz) -> Result<Vec<ForecastEntry>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let list = raw["list"].as_array().ok_or_else(|| WeatherError::format("list"))?;

    let mut entries = Vec::with_capacity(days);
    let mut seen_dates = HashSet::new();

    for item in list {
        if entries.len() >= days {
            break;
        }

        let time = match forecast_time(item, tz) {
            Ok(time) => time,
            Err(err) => {
                tracing::warn!(%err, "skipping forecast item");
                continue;
            }
        };

        let date = time.date_naive();
        if seen_dates.contains(&date) {
            continue;
        }
        if time.hour().abs_diff(12) > MIDDAY_WINDOW_HOURS && !entries.is_empty() {
            continue;
        }

        match forecast_entry(item, &time) {
            Ok(entry) => {
                entries.push(entry);
                seen_dates.insert(date);
            }
            Err(err) => tracing::warn!(%err, "skipping forecast item"),
        }
    }

    Ok(entries)
}

/// Check the provider `cod` field.
///
/// The provider sends it as a number on some endpoints and as a string on
/// others; both spellings are compared as integers. A payload without `cod`
/// passes and is left to the normalizer.
pub fn check_status(raw: &Value) -> Result<()> {
    let cod = match raw.get("cod") {
        Some(cod) => cod,
        None => return Ok(()),
    };

    let code = cod
        .as_i64()
        .or_else(|| cod.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| WeatherError::format("cod"))?;

    if code == SUCCESS_CODE {
        return Ok(());
    }

    let message = raw["message"].as_str().unwrap_or("unknown error").to_string();

    Err(WeatherError::Provider { code, message })
}

fn forecast_time<Tz: TimeZone>(item: &Value, tz: &Tz) -> Result<DateTime<Tz>> {
    let ts = item
        .pointer(DT.pointer)
        .and_then(Value::as_i64)
        .ok_or_else(|| WeatherError::format(DT.name))?;

    DateTime::from_timestamp(ts, 0)
        .map(|utc| utc.with_timezone(tz))
        .ok_or_else(|| WeatherError::format(DT.name))
}

fn forecast_entry<Tz>(item: &Value, time: &DateTime<Tz>) -> Result<ForecastEntry>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    Ok(ForecastEntry {
        date: time.format("%d.%m.%Y").to_string(),
        weekday: weekday_ru(time.weekday()).to_string(),
        time: time.format("%H:%M").to_string(),
        temperature: round1(number(item, &TEMP)?),
        feels_like: round1(number(item, &FEELS_LIKE)?),
        humidity: integer(item, &HUMIDITY)?,
        pressure: integer(item, &PRESSURE)?,
        wind_speed: round1(number(item, &WIND_SPEED)?),
        description: capitalize(text(item, &DESCRIPTION)?),
    })
}

fn number(raw: &Value, field: &Field) -> Result<f64> {
    raw.pointer(field.pointer)
        .and_then(Value::as_f64)
        .ok_or_else(|| WeatherError::format(field.name))
}

fn integer(raw: &Value, field: &Field) -> Result<u32> {
    raw.pointer(field.pointer)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| WeatherError::format(field.name))
}

fn optional_integer(raw: &Value, key: &str) -> Option<u32> {
    raw.get(key).and_then(Value::as_u64).and_then(|v| u32::try_from(v).ok())
}

fn text<'a>(raw: &'a Value, field: &Field) -> Result<&'a str> {
    raw.pointer(field.pointer)
        .and_then(Value::as_str)
        .ok_or_else(|| WeatherError::format(field.name))
}

/// Round to one decimal place, halves away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn weekday_ru(day: chrono::Weekday) -> &'static str {
    WEEKDAYS_RU[day.num_days_from_monday() as usize]
}
