//! The interactive command loop.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;
use inquire::{InquireError, Text};
use weather_core::WeatherProvider;

use crate::{
    action::Action,
    display,
    session::{Flow, Session},
};

const PROMPT: &str = "Введите команду:";

/// Consecutive unreadable lines after which the loop gives up.
const MAX_READ_ERRORS: usize = 3;

/// Where command lines come from: an inquire prompt on a terminal, plain
/// stdin lines otherwise (pipes, scripts).
struct Lines {
    source: Source,
    /// Set once the user pressed Ctrl-C or Esc at the prompt.
    interrupted: bool,
}

enum Source {
    Prompt,
    Stdin(io::Lines<io::StdinLock<'static>>),
}

impl Lines {
    fn detect() -> Self {
        let source = if io::stdin().is_terminal() {
            Source::Prompt
        } else {
            Source::Stdin(io::stdin().lock().lines())
        };
        Self { source, interrupted: false }
    }
}

impl Iterator for Lines {
    type Item = Result<String>;

    /// `None` on end of input, Ctrl-C or Esc.
    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.source {
            Source::Prompt => match Text::new(PROMPT).prompt() {
                Ok(line) => Some(Ok(line)),
                Err(InquireError::OperationInterrupted | InquireError::OperationCanceled) => {
                    self.interrupted = true;
                    None
                }
                Err(err) => Some(Err(err.into())),
            },
            Source::Stdin(lines) => lines.next().map(|line| line.map_err(Into::into)),
        }
    }
}

/// Run the loop on the process terminal until exit, end of input or interrupt.
pub async fn run<P: WeatherProvider>(session: &mut Session<P>) -> Result<()> {
    tracing::debug!(records = session.history().len(), "starting interactive session");

    let mut stdout = io::stdout();
    writeln!(stdout, "{}", display::HELP)?;

    let mut lines = Lines::detect();
    let exited = drive(session, &mut lines, &mut stdout).await?;
    if !exited && lines.interrupted {
        writeln!(stdout, "\nПрограмма завершена пользователем")?;
    }
    Ok(())
}

/// Feed `lines` to the session until an exit command or the end of input.
///
/// Returns `true` when the loop ended on an exit command. Errors from a
/// single command or an unreadable line are printed and the loop keeps
/// going; a few unreadable lines in a row stop it.
pub async fn drive<P, I, W>(session: &mut Session<P>, lines: I, out: &mut W) -> Result<bool>
where
    P: WeatherProvider,
    I: IntoIterator<Item = Result<String>>,
    W: Write,
{
    let mut read_errors = 0;

    for line in lines {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::error!("failed to read command: {err:#}");
                writeln!(out, "Произошла ошибка: {err:#}")?;
                read_errors += 1;
                if read_errors >= MAX_READ_ERRORS {
                    break;
                }
                continue;
            }
        };
        read_errors = 0;

        let action = match Action::parse(&line) {
            Ok(action) => action,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match session.handle(action, out).await {
            Ok(Flow::Exit) => return Ok(true),
            Ok(Flow::Continue) => {}
            Err(err) => {
                tracing::error!("command failed: {err:#}");
                writeln!(out, "Произошла ошибка: {err:#}")?;
            }
        }
    }

    Ok(false)
}
