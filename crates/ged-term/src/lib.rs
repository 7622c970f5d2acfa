// SPDX-License-Identifier: MIT
//
// ged-term — Terminal backend for ged.
//
// Everything the editor needs to own a terminal: raw-mode entry and
// RAII restore via termios, a panic hook that puts the terminal back
// before the message prints, ANSI escape generation, and a blocking
// key decoder for the sequences the editor actually binds (arrows,
// function keys, editing keys, plain bytes).
//
// This crate intentionally avoids external TUI frameworks (ratatui,
// crossterm) in favor of direct terminal control via ANSI escape
// sequences and raw termios. The editor redraws whole frames; there
// is no cell diffing here, just honest escape codes.

pub mod ansi;
pub mod input;
pub mod terminal;

pub use input::Key;
pub use terminal::{Size, Terminal};
