//! Cursor navigation — symbol stepping, line discovery, vertical motion.
//!
//! Everything here is built on three primitives that treat the gap as a
//! zero-width jump point: a byte scan for a target byte in either
//! direction, and whole-symbol steps forward and backward that skip
//! continuation bytes. Line begin/end fall out of the newline scan;
//! vertical motion preserves the column (counted in symbols, not bytes)
//! on the destination line.
//!
//! Moves that would land outside the buffer are clamped no-ops, not
//! errors: the helpers return the original position unmoved and
//! [`GapBuffer::mv_cursor`] simply leaves the cursor where it was.

use crate::buffer::GapBuffer;
use crate::symbol::{is_continuation, symbol_len};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Cursor movement direction, one per arrow key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// One symbol backward.
    Prev,
    /// One symbol forward.
    Next,
    /// One line up, preserving the column.
    LinePrev,
    /// One line down, preserving the column.
    LineNext,
}

// ---------------------------------------------------------------------------
// Navigation operations
// ---------------------------------------------------------------------------

impl GapBuffer {
    /// Move the cursor one step in `dir`.
    ///
    /// Computes a candidate position via symbol-aware stepping (`Prev` /
    /// `Next`) or column-preserving vertical stepping (`LinePrev` /
    /// `LineNext`). A candidate equal to the current cursor (the helpers'
    /// clamped no-op) leaves everything untouched. After a successful
    /// move the display window start is nudged back one line if the
    /// cursor scrolled above it, or forward one line if it scrolled past
    /// the last painted position — keeping the cursor inside the
    /// renderable window.
    pub fn mv_cursor(&mut self, dir: Direction) {
        let old_cur = self.cursor;
        let new_cur = match dir {
            Direction::Prev => self.prev_symb(old_cur),
            Direction::Next => self.next_symb(old_cur),
            Direction::LinePrev => self.line_prev(old_cur),
            Direction::LineNext => self.line_next(old_cur),
        };

        if new_cur != old_cur && new_cur <= self.buf_e() {
            self.cursor = new_cur;

            if self.cursor < self.disp_b {
                self.disp_b = self.line_prev(self.disp_b);
            }
            if let Some(disp_e) = self.disp_e {
                if self.cursor > disp_e && self.cursor != self.gap_e {
                    self.disp_b = self.line_next(self.disp_b);
                }
            }
        }

        self.debug_invariants();
    }

    /// Repeat single-line vertical movement `lines` times, stopping early
    /// if a step fails to advance, then put the display window start at
    /// the final line's begin. Used for paging.
    pub fn mv_by_lines(&mut self, lines: usize, dir: Direction) {
        let mut cur_prev = self.cursor;
        let mut cur_now = self.cursor;
        for _ in 0..lines {
            cur_now = if dir == Direction::LineNext {
                self.line_next(cur_prev)
            } else {
                self.line_prev(cur_prev)
            };
            if cur_now == cur_prev {
                break;
            }
            cur_prev = cur_now;
        }
        if cur_now != self.cursor {
            self.cursor = cur_now;
            self.disp_b = self.line_begin(cur_now);
        }
        self.debug_invariants();
    }

    /// Jump the cursor to the begin of its line.
    pub fn jump_line_begin(&mut self) {
        self.cursor = self.line_begin(self.cursor);
        self.debug_invariants();
    }

    /// Jump the cursor to the end of its line (the newline itself, or
    /// one past the last buffer byte on the final line).
    pub fn jump_line_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
        self.debug_invariants();
    }

    // -- Symbol stepping ----------------------------------------------------

    /// Position of the symbol before `pos`, splicing over the gap.
    ///
    /// Walks one byte back, jumps the gap if it lands inside, then keeps
    /// stepping back over continuation bytes until a lead byte (or ASCII)
    /// is under it. A step that would exit the buffer returns `pos`
    /// unmoved.
    #[must_use]
    pub fn prev_symb(&self, pos: usize) -> usize {
        if pos == 0 {
            return pos;
        }
        let mut new_pos = pos - 1;
        if self.in_gap(new_pos) {
            if self.gap_b == 0 {
                return pos;
            }
            new_pos = self.gap_b - 1;
        }

        while is_continuation(self.storage[new_pos]) {
            if new_pos == 0 {
                return pos;
            }
            new_pos -= 1;
            if self.in_gap(new_pos) {
                if self.gap_b == 0 {
                    return pos;
                }
                new_pos = self.gap_b - 1;
            }
        }

        new_pos
    }

    /// Position of the symbol after `pos`, splicing over the gap.
    ///
    /// Steps by the encoded length of the symbol at `pos`; a step landing
    /// inside the gap comes out at the gap's far edge. Trailing
    /// continuation bytes (from a corrupt lead byte, whose reported
    /// length is zero) are skipped forward to the next lead. A step that
    /// would exit the buffer returns `pos` unmoved.
    #[must_use]
    pub fn next_symb(&self, pos: usize) -> usize {
        if pos >= self.buf_e() {
            return pos;
        }
        let step = symbol_len(self.storage[pos]);
        let mut new_pos = pos + step;
        if self.in_gap(new_pos) {
            return self.gap_e;
        }
        if new_pos > self.buf_e() {
            return pos;
        }

        while new_pos < self.buf_e() && is_continuation(self.storage[new_pos]) {
            new_pos += 1;
            if self.in_gap(new_pos) {
                new_pos = self.gap_e;
            }
            if new_pos > self.buf_e() {
                return pos;
            }
        }

        if new_pos == pos {
            // Zero-length lead with no continuation bytes after it; treat
            // as a clamped no-op rather than looping in place.
            return pos;
        }
        new_pos
    }

    // -- Line discovery -----------------------------------------------------

    /// Begin of the line containing `pos`: the position just after the
    /// previous newline, or 0 when there is none. A cursor sitting on a
    /// newline belongs to the line that newline terminates.
    #[must_use]
    pub fn line_begin(&self, pos: usize) -> usize {
        let mut p = pos;
        if p < self.buf_e() && self.storage[p] == b'\n' {
            p = self.prev_symb(pos);
            if p == pos {
                return pos;
            }
        }

        match self.scan_byte(p, b'\n', false) {
            Some(prev_nl) => self.next_symb(prev_nl),
            None => 0,
        }
    }

    /// End of the line containing `pos`: the next newline, or `buf_e()`
    /// when there is none. A cursor already on a newline is its own line
    /// end.
    #[must_use]
    pub fn line_end(&self, pos: usize) -> usize {
        if pos >= self.buf_e() {
            return self.buf_e();
        }
        if self.storage[pos] == b'\n' {
            return pos;
        }
        self.scan_byte(pos, b'\n', true).unwrap_or(self.buf_e())
    }

    /// Scan for `byte` starting at `start` (inclusive), forward or
    /// backward, jumping the gap. Returns the position of the first match
    /// or `None` when the buffer edge is reached first.
    fn scan_byte(&self, start: usize, byte: u8, forward: bool) -> Option<usize> {
        let mut p = start;
        loop {
            if self.in_gap(p) {
                if forward {
                    p = self.gap_e;
                } else {
                    if self.gap_b == 0 {
                        return None;
                    }
                    p = self.gap_b - 1;
                }
                if !self.in_buf(p) {
                    return None;
                }
                continue;
            }

            if p >= self.buf_e() {
                // Past-the-end holds no byte. Forward scans are done;
                // backward scans step inside and keep going.
                if forward || p == 0 {
                    return None;
                }
                p -= 1;
                continue;
            }

            if self.storage[p] == byte {
                return Some(p);
            }

            if forward {
                p += 1;
            } else {
                if p == 0 {
                    return None;
                }
                p -= 1;
            }
        }
    }

    // -- Column bookkeeping -------------------------------------------------

    /// Count of symbols from `beg` up to and including the symbol at
    /// `end`. Counts at least 1 for `beg == end`; 0 when `beg > end`.
    fn count_symbols(&self, beg: usize, end: usize) -> usize {
        if beg > end {
            return 0;
        }
        let mut count = 0;
        let mut p2 = beg;
        loop {
            let p = p2;
            p2 = self.next_symb(p);
            count += 1;
            if p == p2 || p2 > end {
                break;
            }
        }
        count
    }

    /// Zero-based column of `pos` — symbols between its line begin and
    /// `pos` itself.
    fn pos_in_line(&self, pos: usize) -> usize {
        let line_b = self.line_begin(pos);
        self.count_symbols(line_b, pos).saturating_sub(1)
    }

    /// Symbol length of the line containing `pos`, counting the line-end
    /// position itself. A line holding only a newline has length 1.
    fn line_len(&self, pos: usize) -> usize {
        let line_b = self.line_begin(pos);
        let line_e = self.line_end(pos);
        self.count_symbols(line_b, line_e)
    }

    /// Walk `count` whole symbols forward from `from`, stopping early at
    /// the buffer edge.
    fn walk_symbols(&self, from: usize, count: usize) -> usize {
        let mut p2 = from;
        for _ in 0..count {
            let p = p2;
            p2 = self.next_symb(p);
            if p == p2 {
                break;
            }
        }
        p2
    }

    // -- Vertical stepping --------------------------------------------------

    /// One line up from `pos`, preserving the column clamped to the
    /// destination line's length. Returns `pos` when already on the first
    /// line.
    ///
    /// The clamped offset collapses to column 0 when it equals the
    /// destination line's full length *and* that length is exactly 1 —
    /// the line holds only a newline, and landing past it would put the
    /// cursor on the following line.
    pub(crate) fn line_prev(&self, pos: usize) -> usize {
        let line_pos = self.pos_in_line(pos);
        let line_b = self.line_begin(pos);
        let prev_e = self.prev_symb(line_b);
        let prev_b = self.line_begin(prev_e);
        let prev_len = self.line_len(prev_b);

        let mut offset = line_pos.min(prev_len);
        if offset == prev_len && offset == 1 {
            offset = 0;
        }

        self.walk_symbols(prev_b, offset)
    }

    /// One line down from `pos`, preserving the column clamped to the
    /// destination line's length (same collapse rule as
    /// [`line_prev`](Self::line_prev)). Returns `pos` when already on the
    /// last line.
    pub(crate) fn line_next(&self, pos: usize) -> usize {
        let line_e = self.line_end(pos);
        if line_e == self.buf_e() {
            return pos;
        }

        let next_b = self.next_symb(line_e);
        let next_len = self.line_len(next_b);
        let line_pos = self.pos_in_line(pos);

        let mut offset = line_pos.min(next_len);
        if offset == next_len && offset == 1 {
            offset = 0;
        }

        self.walk_symbols(next_b, offset)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
