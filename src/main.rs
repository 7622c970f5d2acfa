// SPDX-License-Identifier: MIT
//
// ged — a small terminal text editor built on a gap buffer.
//
// This is the main binary that wires together the crates:
//
//   ged-term → terminal control, ANSI output, key decoding
//   ged-core → gap buffer store, navigation, edit operations
//
// The Session struct owns the buffer, the terminal, and the key reader.
// Each keypress flows through:
//
//   stdin → read_key → dispatch → buffer mutation → render
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ text area                    │  ← painted from disp_b every frame
//   ├──────────────────────────────┤
//   │ message / prompt line        │  ← bottom row (REVERSE), on demand
//   └──────────────────────────────┘
//
// The renderer repaints the whole frame into a byte vector and flushes
// it with one write; the message line is painted over the bottom row
// and survives until the next full repaint.

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::sync::Arc;

use ged_core::symbol::symbol_len;
use ged_core::{Direction, Error, GapBuffer};
use ged_term::input::{Key, Reader};
use ged_term::{Terminal, ansi};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

// ─── Constants ──────────────────────────────────────────────────────────────

/// Lines scrolled per PageUp / PageDown.
const PAGE_LINES: usize = 10;

/// Cells per tab stop in the rendered view.
const TAB_WIDTH: usize = 8;

/// Log file written next to wherever the editor was started.
const LOG_FILE: &str = "ged.log";

const HELP: &str = "F1-Help  F2-Save   F3-Sel(on/off)  \
                    F4-Copy  F5-Cut  F6-Paste  F10-Quit  \
                    (any key - to continue)";

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    init_logging();

    let filename = env::args().nth(1);
    if let Err(err) = run(filename.as_deref()) {
        error!(%err, "session ended with error");
        eprintln!("ged: {err} (details in {LOG_FILE})");
        process::exit(1);
    }
}

/// Route `tracing` output to [`LOG_FILE`] in plain text.
///
/// Stdout belongs to the frame renderer, so logs can never go there.
/// If the log file cannot be opened the editor simply runs unlogged.
fn init_logging() {
    let Ok(file) = File::options().create(true).append(true).open(LOG_FILE) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}

/// Prepare the buffer and terminal, run the session, restore the terminal.
fn run(filename: Option<&str>) -> ged_core::Result<()> {
    let mut buf = GapBuffer::new();
    if let Some(name) = filename {
        let path = Path::new(name);
        if path.exists() {
            buf.load(path)?;
            info!(file = name, bytes = buf.logical_len(), "file loaded");
        } else {
            // New file: remember the name, save creates it later.
            buf.set_filename(name);
        }
    }

    let mut term = Terminal::new();
    term.enter()?;

    let mut session = Session {
        buf,
        term,
        keys: Reader::new(),
    };
    let outcome = session.run();

    session.term.leave()?;
    outcome
}

// ─── Session ────────────────────────────────────────────────────────────────

/// One editing session: a buffer, a terminal, and the key reader,
/// driven by a blocking dispatch loop.
struct Session {
    buf: GapBuffer,
    term: Terminal,
    keys: Reader,
}

impl Session {
    /// The dispatch loop. One buffer operation per keypress, then a
    /// full repaint unless the key only touched the message line.
    ///
    /// Copy and cut failures abort that operation and the session
    /// continues; paste and insert failures end the session, since the
    /// buffer may already hold a partial insertion.
    fn run(&mut self) -> ged_core::Result<()> {
        self.render()?;
        self.message(HELP)?;

        loop {
            let key = self.keys.read_key()?;
            let mut redisplay = true;

            match key {
                Key::F(10) => break,
                Key::Right => self.buf.mv_cursor(Direction::Next),
                Key::Left => self.buf.mv_cursor(Direction::Prev),
                Key::Down => self.buf.mv_cursor(Direction::LineNext),
                Key::Up => self.buf.mv_cursor(Direction::LinePrev),
                Key::Backspace => self.delete_prev(),
                Key::Delete => self.delete(),
                Key::Escape => self.buf.clear_selection(),
                Key::F(1) => {
                    self.message(HELP)?;
                    redisplay = false;
                }
                Key::F(2) => {
                    self.save_file()?;
                    redisplay = false;
                }
                Key::F(3) => self.buf.toggle_selection(),
                Key::F(4) => {
                    if let Err(err) = self.copy_selection() {
                        error!(%err, "copy failed");
                    }
                }
                Key::F(5) => {
                    if let Err(err) = self.cut_selection() {
                        error!(%err, "cut failed");
                    }
                }
                Key::F(6) => self.paste_selection()?,
                Key::PageDown => self.buf.mv_by_lines(PAGE_LINES, Direction::LineNext),
                Key::PageUp => self.buf.mv_by_lines(PAGE_LINES, Direction::LinePrev),
                Key::Home => self.buf.jump_line_begin(),
                Key::End => self.buf.jump_line_end(),
                Key::Enter => self.add_symbol(b'\n')?,
                Key::Byte(byte) => self.add_symbol(byte)?,
                Key::F(_) => redisplay = false,
            }

            if redisplay {
                self.render()?;
            }
        }

        Ok(())
    }

    // ── Edit helpers ────────────────────────────────────────────────

    /// Insert a full symbol starting from its lead byte, reading the
    /// continuation bytes (the decoder delivers them as `Key::Byte`)
    /// before returning.
    fn add_symbol(&mut self, first: u8) -> ged_core::Result<()> {
        self.buf.add_ch(first)?;
        for _ in 1..symbol_len(first) {
            let Key::Byte(byte) = self.keys.read_key()? else {
                break;
            };
            self.buf.add_ch(byte)?;
        }
        Ok(())
    }

    /// Delete forward: the selection if one is active, else the symbol
    /// at the cursor.
    fn delete(&mut self) {
        if self.buf.sel().is_some() {
            self.buf.del_sel();
            self.buf.clear_selection();
        } else {
            self.buf.del_symb();
        }
    }

    /// Delete backward: the selection if one is active, else the symbol
    /// before the cursor.
    fn delete_prev(&mut self) {
        if self.buf.sel().is_some() {
            self.buf.del_sel();
            self.buf.clear_selection();
        } else {
            self.buf.del_prev_symb();
        }
    }

    fn copy_selection(&mut self) -> ged_core::Result<()> {
        if self.buf.sel().is_some() {
            let bytes = self.buf.copy_sel()?;
            self.buf.clear_selection();
            info!(bytes, "copy");
        }
        Ok(())
    }

    fn cut_selection(&mut self) -> ged_core::Result<()> {
        if self.buf.sel().is_some() {
            let bytes = self.buf.copy_sel()?;
            self.buf.del_sel();
            self.buf.clear_selection();
            info!(bytes, "cut");
        }
        Ok(())
    }

    fn paste_selection(&mut self) -> ged_core::Result<()> {
        if self.buf.clipboard().is_some_and(|c| !c.is_empty()) {
            self.buf.paste()?;
            self.buf.clear_selection();
        }
        Ok(())
    }

    // ── Saving ──────────────────────────────────────────────────────

    /// Save the buffer, prompting for a filename while there is none.
    fn save_file(&mut self) -> io::Result<()> {
        while self.buf.filename().is_empty() {
            let name = self.prompt("Enter filename: ")?;
            self.buf.set_filename(&name);
        }

        match self.buf.save() {
            Ok(()) => {
                info!(file = self.buf.filename(), "file saved");
                self.message("File saved")
            }
            Err(err) => {
                error!(%err, "save failed");
                self.message("Error! File wasn't saved")
            }
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Repaint the whole frame from `disp_b`.
    ///
    /// Walks physical positions, hopping the gap as the store does,
    /// and stops at the screen bottom or the buffer end — whichever
    /// comes first. Records where the cursor cell landed, then writes
    /// the position one past the last painted byte back into the
    /// buffer as the display end.
    fn render(&mut self) -> ged_core::Result<()> {
        let size = self.term.size();
        let rows = usize::from(size.rows);
        let cols = usize::from(size.cols);

        let mut frame: Vec<u8> = Vec::with_capacity(rows * cols * 2);
        ansi::cursor_hide(&mut frame)?;
        ansi::reset(&mut frame)?;
        ansi::clear_screen(&mut frame)?;
        ansi::cursor_to(&mut frame, 0, 0)?;

        let sel = self.buf.sel_range();
        let buf_e = self.buf.buf_e();
        let mut p = self.buf.disp_b();
        let (mut x, mut y) = (0usize, 0usize);
        let (mut cursor_x, mut cursor_y) = (0usize, 0usize);
        let mut reversed = false;

        while y < rows {
            let highlight = sel.is_some_and(|(sel_b, sel_e)| sel_b <= p && p <= sel_e);
            if highlight != reversed {
                if highlight {
                    ansi::reverse_on(&mut frame)?;
                } else {
                    ansi::reverse_off(&mut frame)?;
                }
                reversed = highlight;
            }

            if self.buf.cursor() == p {
                cursor_x = x;
                cursor_y = y;
            }

            if self.buf.in_gap(p) {
                p = self.buf.gap_e();
                if self.buf.cursor() == p {
                    cursor_x = x;
                    cursor_y = y;
                }
            }

            if p >= buf_e {
                break;
            }

            let byte = self.buf.byte_at(p);
            let len = symbol_len(byte);
            if len == 0 {
                return Err(Error::BadSymbol(byte));
            }

            let mut x_inc = 0;
            if len == 1 {
                if byte == b'\n' {
                    frame.extend_from_slice(b"\r\n");
                    x_inc = 1;
                } else if byte == b'\t' {
                    frame.extend_from_slice(&[b' '; TAB_WIDTH]);
                    x_inc = TAB_WIDTH;
                } else if byte.is_ascii_graphic() || byte == b' ' {
                    frame.push(byte);
                    x_inc = 1;
                }
                // Other control bytes occupy no cell.
            } else if p + len <= buf_e {
                let bytes: Vec<u8> = (p..p + len).map(|i| self.buf.byte_at(i)).collect();
                if let Ok(s) = std::str::from_utf8(&bytes) {
                    frame.extend_from_slice(s.as_bytes());
                    x_inc = UnicodeWidthStr::width(s).max(1);
                }
            }

            x += x_inc;
            if byte == b'\n' {
                y += 1;
                x = 0;
            } else if x >= cols {
                frame.extend_from_slice(b"\r\n");
                y += 1;
                x = 0;
            }
            p += len;
        }
        self.buf.set_disp_end(p);

        ansi::reverse_off(&mut frame)?;
        ansi::cursor_to(&mut frame, clamp_u16(cursor_x), clamp_u16(cursor_y))?;
        ansi::cursor_show(&mut frame)?;

        let mut out = io::stdout().lock();
        out.write_all(&frame)?;
        out.flush()?;
        Ok(())
    }

    /// Paint `text` over the bottom row in reverse video. Stays on
    /// screen until the next full repaint.
    fn message(&mut self, text: &str) -> io::Result<()> {
        let size = self.term.size();
        let row = size.rows.saturating_sub(1);
        let cols = usize::from(size.cols);

        let mut frame: Vec<u8> = Vec::with_capacity(cols + 32);
        paint_status(&mut frame, row, cols, text)?;
        ansi::reverse_off(&mut frame)?;

        let mut out = io::stdout().lock();
        out.write_all(&frame)?;
        out.flush()?;
        Ok(())
    }

    /// Read a line of input on the bottom row, echoing as it is typed.
    fn prompt(&mut self, prompt: &str) -> io::Result<String> {
        let size = self.term.size();
        let row = size.rows.saturating_sub(1);
        let cols = usize::from(size.cols);

        let mut input = String::new();
        loop {
            let mut frame: Vec<u8> = Vec::with_capacity(cols + 32);
            let mut line = String::with_capacity(prompt.len() + input.len());
            line.push_str(prompt);
            line.push_str(&input);
            paint_status(&mut frame, row, cols, &line)?;
            ansi::cursor_show(&mut frame)?;

            let mut out = io::stdout().lock();
            out.write_all(&frame)?;
            out.flush()?;
            drop(out);

            match self.keys.read_key()? {
                Key::Enter => break,
                Key::Backspace => {
                    input.pop();
                }
                Key::Byte(byte) if byte.is_ascii_graphic() || byte == b' ' => {
                    input.push(char::from(byte));
                }
                _ => {}
            }
        }

        let mut frame: Vec<u8> = Vec::new();
        ansi::reverse_off(&mut frame)?;
        io::stdout().write_all(&frame)?;
        Ok(input)
    }
}

/// Fill the bottom row with reverse-video blanks and lay `text` over
/// it, truncated to the screen width.
fn paint_status(frame: &mut Vec<u8>, row: u16, cols: usize, text: &str) -> io::Result<()> {
    ansi::cursor_to(frame, 0, row)?;
    ansi::reverse_on(frame)?;
    frame.extend(std::iter::repeat_n(b' ', cols));
    ansi::cursor_to(frame, 0, row)?;
    let mut tmp = [0u8; 4];
    for ch in text.chars().take(cols) {
        frame.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
    }
    Ok(())
}

/// Clamp a cell coordinate into the terminal's `u16` range.
fn clamp_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}
