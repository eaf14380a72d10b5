//! Masked terminal input for secrets.

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use prdeck::DeckError;

/// Reads a secret from the terminal, echoing `*` per character.
///
/// Returns `None` when the user dismisses the prompt with Escape or
/// Ctrl+C.
///
/// # Errors
///
/// Returns [`DeckError::Interface`] when the terminal cannot be switched
/// into raw mode or events cannot be read.
pub fn prompt_secret(label: &str) -> Result<Option<String>, DeckError> {
    let mut stderr = io::stderr().lock();
    write!(stderr, "{label}: ")
        .and_then(|()| stderr.flush())
        .map_err(|error| DeckError::Io {
            message: format!("failed to write prompt: {error}"),
        })?;

    terminal::enable_raw_mode().map_err(|error| DeckError::Interface {
        message: format!("failed to enable raw terminal mode: {error}"),
    })?;
    let outcome = read_masked(&mut stderr);
    // Restore the terminal even when reading failed.
    let _ = terminal::disable_raw_mode();
    let _ = writeln!(stderr);

    outcome
}

fn read_masked(stderr: &mut impl Write) -> Result<Option<String>, DeckError> {
    let mut value = String::new();
    loop {
        let read = event::read().map_err(|error| DeckError::Interface {
            message: format!("failed to read terminal event: {error}"),
        })?;
        let Event::Key(key) = read else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Enter => return Ok(Some(value)),
            KeyCode::Esc => return Ok(None),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(None);
            }
            KeyCode::Backspace => {
                if value.pop().is_some() {
                    let _ = write!(stderr, "\u{8} \u{8}");
                    let _ = stderr.flush();
                }
            }
            KeyCode::Char(ch) => {
                value.push(ch);
                let _ = write!(stderr, "*");
                let _ = stderr.flush();
            }
            _ => {}
        }
    }
}
