use std::time::Duration;

use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Esc,
    Other,
}

impl Key {
    pub fn is_quit(self) -> bool {
        matches!(self, Key::Char('q' | 'Q') | Key::Esc)
    }
}

/// Where the session draws and where it reads keys from.
pub trait Screen {
    /// Draw `text` with its first line at `row`, `col`; later lines go on
    /// the rows below, starting at the same column.
    fn draw(&mut self, row: u16, col: u16, text: &str) -> Result<()>;

    /// Show the cursor at `(row, col)`, or hide it.
    fn cursor(&mut self, at: Option<(u16, u16)>) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    /// Block until a key is pressed.
    fn read_key(&mut self) -> Result<Key>;

    fn pause(&mut self, delay: Duration) -> Result<()>;
}
