use std::io::Write;

use anyhow::Result;
use weather_core::{HistoryCache, WeatherProvider};

use crate::{action::Action, display};

/// What the command loop should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A provider plus the lookup history it feeds.
#[derive(Debug)]
pub struct Session<P> {
    provider: P,
    history: HistoryCache,
}

impl<P: WeatherProvider> Session<P> {
    pub fn new(provider: P, history: HistoryCache) -> Self {
        Self { provider, history }
    }

    pub fn history(&self) -> &HistoryCache {
        &self.history
    }

    /// Run one action to completion, writing user-facing output to `out`.
    ///
    /// Lookup failures and history write failures are reported to `out` and
    /// do not make this return an error; only output errors do.
    pub async fn handle(&mut self, action: Action, out: &mut impl Write) -> Result<Flow> {
        match action {
            Action::Empty => {}
            Action::Exit => {
                writeln!(out, "До свидания!")?;
                return Ok(Flow::Exit);
            }
            Action::History => display::history(out, &self.history)?,
            Action::Current { city } => self.current(&city, out).await?,
            Action::Forecast { city, days } => match self.provider.forecast(&city, days).await {
                Ok(entries) => display::forecast(out, &city, &entries)?,
                Err(err) => writeln!(out, "{}", display::fetch_error(&err))?,
            },
        }

        Ok(Flow::Continue)
    }

    async fn current(&mut self, city: &str, out: &mut impl Write) -> Result<()> {
        let record = match self.provider.current(city).await {
            Ok(record) => record,
            Err(err) => {
                writeln!(out, "{}", display::fetch_error(&err))?;
                return Ok(());
            }
        };

        display::record(out, &record)?;

        if let Err(err) = self.history.append(record) {
            tracing::error!("{err:#}");
            writeln!(out, "Ошибка при сохранении истории")?;
        }

        Ok(())
    }
}
