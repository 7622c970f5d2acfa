//! Edit operations — insertion, deletion, selection copy/cut/paste.
//!
//! Every operation here is an atomic transformation of cursor, selection,
//! and content against the current store state; there is no state machine
//! beyond the buffer's own invariants. The unit of mutation is one byte:
//! [`GapBuffer::add_ch`] inserts a single byte, and assembling a full
//! multi-byte symbol is one call per byte, composed by the caller.
//! Deletion is symbol-aware going in either direction; selection deletion
//! is byte-oriented by design (callers pass raw byte spans).
//!
//! Failure semantics: allocation failures propagate unchanged to the
//! dispatcher, which aborts the current operation. The one documented
//! exception is [`paste`](GapBuffer::paste), which may leave a partial
//! insertion behind when growth fails mid-stream — there is no
//! transactional rollback.

use tracing::debug;

use crate::buffer::GapBuffer;
use crate::error::{Error, Result};
use crate::symbol::symbol_len;

impl GapBuffer {
    // -- Insertion ----------------------------------------------------------

    /// Insert one byte at the cursor.
    ///
    /// Grows the storage first when the gap is empty, relocates the gap to
    /// the cursor, writes the byte at the gap start and advances it. The
    /// cursor (resting on the gap end) does not move; the inserted byte
    /// becomes the last byte of the content before it.
    ///
    /// # Errors
    ///
    /// [`Error::Alloc`] when a required growth fails; the buffer is left
    /// unchanged in that case.
    pub fn add_ch(&mut self, byte: u8) -> Result<()> {
        if self.gap_b == self.gap_e {
            self.grow()?;
        }
        self.move_gap();
        self.storage[self.gap_b] = byte;
        self.gap_b += 1;
        self.debug_invariants();
        Ok(())
    }

    // -- Deletion -----------------------------------------------------------

    /// Delete the whole symbol at the cursor (1–6 bytes). No-op at the
    /// buffer end, or on a corrupt lead byte (reported length zero).
    pub fn del_symb(&mut self) {
        self.move_gap();
        if self.cursor >= self.buf_e() {
            return;
        }
        let bytes = symbol_len(self.storage[self.cursor]);
        if bytes > 0 && self.gap_e + bytes <= self.buf_e() {
            self.gap_e += bytes;
            self.cursor += bytes;
        }
        self.debug_invariants();
    }

    /// Delete exactly one byte at the cursor, symbol structure ignored.
    /// The building block of [`del_sel`](Self::del_sel).
    pub(crate) fn del_ch(&mut self) {
        self.move_gap();
        if self.gap_e < self.buf_e() {
            self.gap_e += 1;
            self.cursor += 1;
        }
        self.debug_invariants();
    }

    /// Delete the whole symbol immediately before the cursor. No-op at
    /// the buffer start.
    pub fn del_prev_symb(&mut self) {
        self.move_gap();
        let prev_pos = self.prev_symb(self.cursor);
        if prev_pos == self.cursor {
            return;
        }
        let bytes = symbol_len(self.storage[prev_pos]);
        self.gap_b = self.gap_b.saturating_sub(bytes);
        self.debug_invariants();
    }

    // -- Selection ----------------------------------------------------------

    /// Copy the selected bytes into a fresh clipboard, releasing the old
    /// one first. The clipboard is sized to the *logical* byte count of
    /// the selection — whatever part of the gap falls inside the range
    /// contributes zero bytes — and the copy vaults over the gap while
    /// filling it.
    ///
    /// Returns the number of bytes copied; 0 (with the clipboard simply
    /// released) when no selection is active or the logical length is
    /// zero.
    ///
    /// # Errors
    ///
    /// [`Error::Alloc`] when the clipboard allocation fails.
    pub fn copy_sel(&mut self) -> Result<usize> {
        self.clipboard = None;
        let Some((sel_b, sel_e)) = self.sel_range() else {
            return Ok(0);
        };

        // Logical size: raw span minus the gap overlap.
        let overlap = self
            .gap_e()
            .min(sel_e)
            .saturating_sub(self.gap_b().max(sel_b));
        let size = (sel_e - sel_b) - overlap;
        if size == 0 {
            return Ok(0);
        }

        let mut out = Vec::new();
        out.try_reserve_exact(size).map_err(|_| Error::Alloc)?;

        let mut p = sel_b;
        while out.len() < size {
            if self.in_gap(p) {
                p = self.gap_e;
                continue;
            }
            out.push(self.storage[p]);
            p += 1;
        }

        debug!(bytes = size, "selection copied");
        self.clipboard = Some(out);
        Ok(size)
    }

    /// Append every clipboard byte at the cursor via repeated
    /// [`add_ch`](Self::add_ch). No-op with an empty or absent clipboard.
    ///
    /// # Errors
    ///
    /// Fails only when a growth fails mid-stream. Bytes inserted before
    /// the failure stay in place — partial insertion, no rollback.
    pub fn paste(&mut self) -> Result<()> {
        let Some(clip) = self.clipboard.take() else {
            return Ok(());
        };
        let result = clip.iter().try_for_each(|&byte| self.add_ch(byte));
        self.clipboard = Some(clip);
        result
    }

    /// Delete the selected range: cursor to the range start, gap pulled
    /// up to it, then one byte removed per raw byte of the span.
    ///
    /// The span is raw, not logical: gap bytes sitting inside it count
    /// toward the deletions, and the extra removals clamp at the buffer
    /// end. Callers that need exact logical deletion must select with
    /// the gap outside the range.
    ///
    /// The selection anchor itself stays active; clearing it is the
    /// dispatcher's business.
    pub fn del_sel(&mut self) {
        let Some((sel_b, sel_e)) = self.sel_range() else {
            return;
        };

        self.cursor = sel_b;
        self.move_gap();

        let mut bytes = sel_e - sel_b;
        while bytes > 0 {
            self.del_ch();
            bytes -= 1;
        }
        self.debug_invariants();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
