//! # ged-core — Editor core for ged
//!
//! This crate contains the editing engine of the editor:
//!
//! - **[`buffer`]** — `GapBuffer`: gap-buffer storage with cursor, selection,
//!   display window, clipboard, and file I/O
//! - **[`symbol`]** — UTF-8 symbol classification (lead-byte length table)
//! - **[`motion`]** — symbol- and line-wise navigation over the gap
//! - **[`editing`]** — insertion, deletion, and selection copy/cut/paste
//! - **[`error`]** — the crate-wide `Error`/`Result` pair
//!
//! Everything speaks in absolute positions into physical storage; the only
//! place logical offsets appear is at the API edge (file I/O, reporting).
//! Terminal concerns live entirely in `ged-term` and the binary.

pub mod buffer;
pub mod editing;
pub mod error;
pub mod motion;
pub mod symbol;

pub use buffer::GapBuffer;
pub use error::{Error, Result};
pub use motion::Direction;
