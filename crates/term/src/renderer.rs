//! TerminalRenderer: flushes a composed frame to a real terminal.
//!
//! Full redraw every frame. The frames here are small (a 10x20 well plus a
//! side panel), so diffing is not worth its bookkeeping.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use blockfall_types::TileColor;

use crate::game_view::Frame;

pub struct TerminalRenderer {
    stdout: io::Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        let mut current: Option<TileColor> = None;
        self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;

        for (row, cells) in frame.rows().enumerate() {
            self.stdout.queue(cursor::MoveTo(0, row as u16))?;
            for cell in cells {
                if cell.color != current {
                    match cell.color {
                        Some(tile) => {
                            self.stdout.queue(SetForegroundColor(Color::Rgb {
                                r: tile.r,
                                g: tile.g,
                                b: tile.b,
                            }))?;
                        }
                        None => {
                            self.stdout.queue(ResetColor)?;
                        }
                    }
                    current = cell.color;
                }
                self.stdout.queue(Print(cell.ch))?;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
