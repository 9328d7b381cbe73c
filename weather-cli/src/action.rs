//! Parsing of free-text lines typed at the interactive prompt.

use anyhow::{Result, bail};
use weather_core::{DEFAULT_FORECAST_DAYS, FORECAST_DAYS_RANGE};

const EXIT_WORDS: [&str; 3] = ["выход", "exit", "quit"];
const HISTORY_WORDS: [&str; 2] = ["история", "history"];
const FORECAST_WORDS: [&str; 2] = ["прогноз", "forecast"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Current { city: String },
    Forecast { city: String, days: u8 },
    History,
    Exit,
    Empty,
}

impl Action {
    /// Interpret one input line.
    ///
    /// Anything that is not a keyword is taken as a city name. For a forecast
    /// the last word is read as the day count only if it is all digits and a
    /// city precedes it, so `прогноз нью йорк` asks for "нью йорк".
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim().to_lowercase();
        let mut words = line.split_whitespace();

        let first = match words.next() {
            Some(first) => first,
            None => return Ok(Self::Empty),
        };

        if EXIT_WORDS.contains(&first) && words.clone().next().is_none() {
            return Ok(Self::Exit);
        }
        if HISTORY_WORDS.contains(&first) && words.clone().next().is_none() {
            return Ok(Self::History);
        }
        if FORECAST_WORDS.contains(&first) {
            let rest: Vec<&str> = words.collect();
            return parse_forecast(first, &rest);
        }

        Ok(Self::Current { city: line.split_whitespace().collect::<Vec<_>>().join(" ") })
    }
}

fn parse_forecast(keyword: &str, rest: &[&str]) -> Result<Action> {
    let (city, days) = match rest {
        [] => bail!("Укажите город после '{keyword}'"),
        [city @ .., last] if !city.is_empty() && last.chars().all(|c| c.is_ascii_digit()) => {
            // Saturate absurdly long numbers so they fail the range check below.
            (city.join(" "), last.parse::<u8>().unwrap_or(u8::MAX))
        }
        city => (city.join(" "), DEFAULT_FORECAST_DAYS),
    };

    if !FORECAST_DAYS_RANGE.contains(&days) {
        bail!(
            "Количество дней должно быть от {} до {}",
            FORECAST_DAYS_RANGE.start(),
            FORECAST_DAYS_RANGE.end()
        );
    }

    Ok(Action::Forecast { city, days })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forecast(city: &str, days: u8) -> Action {
        Action::Forecast { city: city.to_string(), days }
    }

    #[test]
    fn blank_line_is_empty() {
        assert_eq!(Action::parse("   ").unwrap(), Action::Empty);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(Action::parse("ВЫХОД").unwrap(), Action::Exit);
        assert_eq!(Action::parse(" quit ").unwrap(), Action::Exit);
        assert_eq!(Action::parse("История").unwrap(), Action::History);
        assert_eq!(Action::parse("history").unwrap(), Action::History);
    }

    #[test]
    fn anything_else_is_a_city() {
        assert_eq!(
            Action::parse("  Нижний   Новгород ").unwrap(),
            Action::Current { city: "нижний новгород".into() }
        );
        assert_eq!(
            Action::parse("exit city").unwrap(),
            Action::Current { city: "exit city".into() }
        );
    }

    #[test]
    fn forecast_with_days() {
        assert_eq!(Action::parse("прогноз москва 3").unwrap(), forecast("москва", 3));
        assert_eq!(Action::parse("forecast new york 10").unwrap(), forecast("new york", 10));
    }

    #[test]
    fn forecast_defaults_to_five_days() {
        assert_eq!(Action::parse("прогноз нью йорк").unwrap(), forecast("нью йорк", 5));
        // A lone number is a city, not a day count.
        assert_eq!(Action::parse("прогноз 7").unwrap(), forecast("7", 5));
    }

    #[test]
    fn forecast_days_out_of_range() {
        for line in ["прогноз москва 0", "прогноз москва 11", "прогноз москва 99999"] {
            let err = Action::parse(line).unwrap_err();
            assert!(err.to_string().contains("от 1 до 10"), "{line}: {err}");
        }
    }

    #[test]
    fn forecast_without_city() {
        let err = Action::parse("прогноз").unwrap_err();
        assert!(err.to_string().contains("Укажите город"));
    }
}
