//! Terminal rendering of the VRAM character cells.
//!
//! The display is an external collaborator: the machine core only reserves
//! the VRAM byte range, and this module renders it to the terminal as a
//! `rows x columns` grid. The terminal is taken into raw mode on an
//! alternate screen; the drop guard restores it on every exit path,
//! including errors and panics unwinding through the caller.

use crossterm::{cursor, execute, style, terminal};
use std::io::{self, Stdout, Write};

/// A terminal display session.
///
/// Construction acquires the terminal; dropping the value releases it.
pub struct Display {
    out: Stdout,
    rows: u16,
    columns: u16,
}

impl Display {
    /// Enter the alternate screen and hide the cursor.
    pub fn new(rows: u16, columns: u16) -> io::Result<Display> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Display { out, rows, columns })
    }

    /// Draw the VRAM contents as character cells.
    ///
    /// `vram` is the byte range starting at `VRAM_START`; cell `(r, c)` is
    /// byte `r * columns + c`. Bytes outside printable ASCII render as
    /// spaces.
    pub fn render(&mut self, vram: &[u8]) -> io::Result<()> {
        for row in 0..self.rows {
            let start = row as usize * self.columns as usize;
            let end = (start + self.columns as usize).min(vram.len());
            let cells: String = vram
                .get(start..end)
                .unwrap_or(&[])
                .iter()
                .map(|&byte| printable(byte))
                .collect();
            execute!(self.out, cursor::MoveTo(0, row), style::Print(cells))?;
        }
        self.out.flush()
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Map a VRAM byte to its on-screen character.
fn printable(byte: u8) -> char {
    if (0x20..0x7F).contains(&byte) {
        byte as char
    } else {
        ' '
    }
}
