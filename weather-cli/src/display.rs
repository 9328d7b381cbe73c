//! Human-readable rendering of records, forecasts and history.

use std::io::{self, Write};

use weather_core::{ForecastEntry, HistoryCache, WeatherError, WeatherRecord};

pub const HELP: &str = "\
🌤 Парсер погоды
Команды:
  город                - текущая погода
  прогноз город [дни]  - прогноз на N дней (по умолчанию 5)
  история              - показать историю запросов
  выход                - завершить программу";

pub fn record(out: &mut impl Write, record: &WeatherRecord) -> io::Result<()> {
    writeln!(out, "\n🌤 ПОГОДА В {}", record.city.to_uppercase())?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "📅 {}", record.timestamp)?;
    writeln!(out, "🌡 Температура: {:.1}°C", record.temperature)?;
    writeln!(out, "🤔 Ощущается как: {:.1}°C", record.feels_like)?;
    writeln!(out, "💧 Влажность: {}%", record.humidity)?;
    writeln!(out, "📊 Давление: {} гПа", record.pressure)?;
    writeln!(out, "🌬 Ветер: {:.1} м/с", record.wind_speed)?;
    writeln!(out, "☁️ {}", record.description)?;
    if let Some(visibility) = record.visibility {
        writeln!(out, "👁 Видимость: {visibility} м")?;
    }
    Ok(())
}

pub fn forecast(out: &mut impl Write, city: &str, entries: &[ForecastEntry]) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "Нет данных для отображения прогноза");
    }

    writeln!(out, "\n📅 ПРОГНОЗ ПОГОДЫ В {}", city.to_uppercase())?;
    writeln!(out, "{}", "=".repeat(70))?;

    for entry in entries {
        writeln!(out, "{} ({}, {}):", entry.date, entry.weekday, entry.time)?;
        writeln!(out, "  🌡 {:.1}°C (ощущается как {:.1}°C)", entry.temperature, entry.feels_like)?;
        writeln!(out, "  💧 Влажность: {}%", entry.humidity)?;
        writeln!(out, "  🌬 Ветер: {:.1} м/с", entry.wind_speed)?;
        writeln!(out, "  📊 Давление: {} гПа", entry.pressure)?;
        writeln!(out, "  ☁️ {}", entry.description)?;
        writeln!(out, "{}", "-".repeat(70))?;
    }
    Ok(())
}

/// History, newest first.
pub fn history(out: &mut impl Write, history: &HistoryCache) -> io::Result<()> {
    if history.is_empty() {
        return writeln!(out, "История запросов пуста");
    }

    writeln!(out, "\n📋 ИСТОРИЯ ЗАПРОСОВ")?;
    writeln!(out, "{}", "=".repeat(50))?;

    for (i, record) in history.iter_recent().enumerate() {
        writeln!(out, "{}. {} - {}", i + 1, record.city, record.timestamp)?;
        writeln!(out, "   {:.1}°C, {}", record.temperature, record.description)?;
        writeln!(out, "{}", "-".repeat(30))?;
    }
    Ok(())
}

/// One-line user message for a failed lookup.
pub fn fetch_error(err: &WeatherError) -> String {
    match err {
        WeatherError::Provider { message, .. } => format!("Ошибка: {message}"),
        WeatherError::Format { field } => format!("Ошибка формата данных: {field}"),
        WeatherError::Network(_) | WeatherError::Status { .. } | WeatherError::Json(_) => {
            format!("Ошибка при запросе к API: {err}")
        }
    }
}
