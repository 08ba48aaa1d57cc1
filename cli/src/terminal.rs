//! Crossterm-backed [`Screen`]: raw mode on the alternate screen.
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::screen::{Key, Screen};

pub struct Terminal {
    out: Stdout,
}

/// Take over the terminal. It is handed back when the returned value drops.
pub fn init() -> Result<Terminal> {
    enable_raw_mode()?;
    let mut out = io::stdout();
    execute!(out, EnterAlternateScreen, Clear(ClearType::All), Hide)?;
    Ok(Terminal { out })
}

pub fn restore() -> Result<()> {
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = restore();
    }
}

impl Screen for Terminal {
    fn draw(&mut self, row: u16, col: u16, text: &str) -> Result<()> {
        for (offset, line) in (0u16..).zip(text.split('\n')) {
            queue!(self.out, MoveTo(col, row + offset), Print(line))?;
        }
        Ok(())
    }

    fn cursor(&mut self, at: Option<(u16, u16)>) -> Result<()> {
        match at {
            Some((row, col)) => queue!(self.out, MoveTo(col, row), Show)?,
            None => queue!(self.out, Hide)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                return Ok(match key.code {
                    // raw mode swallows SIGINT
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Esc,
                    KeyCode::Char(c) => Key::Char(c),
                    KeyCode::Enter => Key::Enter,
                    KeyCode::Backspace => Key::Backspace,
                    KeyCode::Esc => Key::Esc,
                    _ => Key::Other,
                });
            }
        }
    }

    fn pause(&mut self, delay: Duration) -> Result<()> {
        thread::sleep(delay);
        Ok(())
    }
}
