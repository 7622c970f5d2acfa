//! Gap buffer — the text store everything else is built on.
//!
//! A `GapBuffer` owns one contiguous `Vec<u8>` of raw bytes with a single
//! movable hole (the *gap*) inside it. Logical content is the bytes before
//! the gap followed by the bytes after it; insertions and deletions at the
//! cursor only touch the gap edges, which makes edits near a moving edit
//! point amortized O(1).
//!
//! # Design choices
//!
//! - **Positions are indices, never pointers.** Every position (cursor,
//!   selection anchor, display window, gap bounds) is an absolute index
//!   into `storage`. Growth re-derives each one through the logical ↔
//!   physical translation below; a raw index into relocated storage stays
//!   valid precisely because it is an index.
//!
//! - **Bytes, not chars.** The store never decodes UTF-8. Loading reads a
//!   file verbatim; saving writes the two logical segments verbatim.
//!   Symbol awareness lives one layer up, in navigation.
//!
//! - **Growth is all-or-nothing.** `try_reserve_exact` runs before any
//!   mutation, so a failed growth leaves the buffer byte-for-byte and
//!   invariant-for-invariant unchanged.
//!
//! # Invariant
//!
//! `gap_b <= gap_e <= storage.len()` and `cursor <= storage.len()`,
//! checked by debug assertions after every mutating operation. The cursor
//! coincides with a gap edge after every completed operation; it rests
//! strictly inside the gap only transiently, mid-operation.

use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Sizing constants
// ---------------------------------------------------------------------------

/// Storage allocated for a fresh, empty buffer.
pub const INIT_BUF_SIZE: usize = 1024;

/// Fixed increment added on each growth. Capacity never shrinks.
pub const INC_BUF_SIZE: usize = 1024;

/// Byte bound on the recorded filename; overlong names are truncated.
pub const FILENAME_MAX: usize = 70;

// ---------------------------------------------------------------------------
// GapBuffer
// ---------------------------------------------------------------------------

/// An array-backed text store with a movable gap absorbing edits.
///
/// The buffer tracks, besides the text itself:
///
/// - the cursor (an absolute storage index, always on a gap edge between
///   operations)
/// - the display window start (owner-set by navigation) and end
///   (renderer-computed each frame)
/// - an optional selection anchor
/// - the clipboard (independently owned bytes, replaced wholesale on copy)
/// - the associated filename (empty ⇒ unsaved/new document)
pub struct GapBuffer {
    pub(crate) storage: Vec<u8>,
    pub(crate) gap_b: usize,
    pub(crate) gap_e: usize,
    pub(crate) cursor: usize,
    pub(crate) disp_b: usize,
    pub(crate) disp_e: Option<usize>,
    pub(crate) sel: Option<usize>,
    pub(crate) clipboard: Option<Vec<u8>>,
    filename: String,
}

impl GapBuffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer: the gap spans the whole storage and the
    /// cursor sits at the gap end.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: vec![0; INIT_BUF_SIZE],
            gap_b: 0,
            gap_e: INIT_BUF_SIZE,
            cursor: INIT_BUF_SIZE,
            disp_b: 0,
            disp_e: None,
            sel: None,
            clipboard: None,
            filename: String::new(),
        }
    }

    /// Create a buffer holding `text`, cursor at the end. The gap sits
    /// after the content with a fresh [`INIT_BUF_SIZE`] of slack.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut storage = Vec::with_capacity(bytes.len() + INIT_BUF_SIZE);
        storage.extend_from_slice(bytes);
        storage.resize(bytes.len() + INIT_BUF_SIZE, 0);
        let gap_b = bytes.len();
        let gap_e = storage.len();
        Self {
            storage,
            gap_b,
            gap_e,
            cursor: gap_e,
            disp_b: 0,
            disp_e: None,
            sel: None,
            clipboard: None,
            filename: String::new(),
        }
    }

    // -- Bounds and membership ----------------------------------------------

    /// One past the last storage byte. Valid positions are `0..=buf_e()`;
    /// valid *byte* positions are `0..buf_e()`.
    #[inline]
    #[must_use]
    pub fn buf_e(&self) -> usize {
        self.storage.len()
    }

    /// Gap start — also the count of logical bytes before the gap.
    #[inline]
    #[must_use]
    pub const fn gap_b(&self) -> usize {
        self.gap_b
    }

    /// One past the last gap byte.
    #[inline]
    #[must_use]
    pub const fn gap_e(&self) -> usize {
        self.gap_e
    }

    /// Current gap width in bytes.
    #[inline]
    #[must_use]
    pub const fn gap_len(&self) -> usize {
        self.gap_e - self.gap_b
    }

    /// Is `pos` a real byte position inside storage?
    #[inline]
    #[must_use]
    pub fn in_buf(&self, pos: usize) -> bool {
        pos < self.storage.len()
    }

    /// Is `pos` inside the gap? Scans that walk storage must honor this
    /// and jump the hole.
    #[inline]
    #[must_use]
    pub const fn in_gap(&self, pos: usize) -> bool {
        self.gap_b <= pos && pos < self.gap_e
    }

    /// Raw byte at an absolute storage position.
    ///
    /// Positions inside the gap return stale bytes — callers are expected
    /// to check [`in_gap`](Self::in_gap) first.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= buf_e()`.
    #[inline]
    #[must_use]
    pub fn byte_at(&self, pos: usize) -> u8 {
        self.storage[pos]
    }

    // -- Logical ↔ physical translation -------------------------------------

    /// Logical offset (gap excluded) of an absolute position. Positions
    /// inside the gap collapse to the gap start's logical offset.
    #[inline]
    #[must_use]
    pub const fn to_logical(&self, pos: usize) -> usize {
        if pos <= self.gap_b {
            pos
        } else if pos < self.gap_e {
            self.gap_b
        } else {
            pos - self.gap_len()
        }
    }

    /// Absolute position of a logical offset, against the *current* gap.
    /// An offset equal to `gap_b` maps to the gap start edge.
    #[inline]
    #[must_use]
    pub(crate) const fn to_physical(&self, idx: usize) -> usize {
        if idx <= self.gap_b {
            idx
        } else {
            self.gap_e + (idx - self.gap_b)
        }
    }

    /// Count of logical content bytes (storage minus the gap).
    #[inline]
    #[must_use]
    pub fn logical_len(&self) -> usize {
        self.storage.len() - self.gap_len()
    }

    /// True when the buffer holds no text.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logical_len() == 0
    }

    /// Logical offset of the cursor.
    #[inline]
    #[must_use]
    pub const fn cursor_offset(&self) -> usize {
        self.to_logical(self.cursor)
    }

    /// Collect the logical content into one owned byte vector. Allocates —
    /// meant for saves, tests, and diagnostics, not per-keystroke paths.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.logical_len());
        out.extend_from_slice(&self.storage[..self.gap_b]);
        out.extend_from_slice(&self.storage[self.gap_e..]);
        out
    }

    // -- Cursor / display / selection accessors ------------------------------

    /// Absolute cursor position, in `[0, buf_e()]`.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// First displayed byte position.
    #[inline]
    #[must_use]
    pub const fn disp_b(&self) -> usize {
        self.disp_b
    }

    /// One past the last byte the renderer actually painted, or `None`
    /// before the first frame.
    #[inline]
    #[must_use]
    pub const fn disp_e(&self) -> Option<usize> {
        self.disp_e
    }

    /// Renderer write-back: position one past the last painted byte.
    /// The renderer recomputes this every frame; nothing else writes it.
    #[inline]
    pub const fn set_disp_end(&mut self, pos: usize) {
        self.disp_e = Some(pos);
    }

    /// Selection anchor, if a selection is active.
    #[inline]
    #[must_use]
    pub const fn sel(&self) -> Option<usize> {
        self.sel
    }

    /// Normalized selection endpoints `(min, max)` of anchor and cursor,
    /// or `None` when no selection is active. Raw storage positions — the
    /// range may straddle the gap.
    #[inline]
    #[must_use]
    pub const fn sel_range(&self) -> Option<(usize, usize)> {
        match self.sel {
            Some(s) => {
                if s <= self.cursor {
                    Some((s, self.cursor))
                } else {
                    Some((self.cursor, s))
                }
            }
            None => None,
        }
    }

    /// Set the anchor to the cursor if no selection is active, else clear.
    pub const fn toggle_selection(&mut self) {
        if self.sel.is_none() {
            self.sel = Some(self.cursor);
        } else {
            self.sel = None;
        }
    }

    /// Drop any active selection.
    #[inline]
    pub const fn clear_selection(&mut self) {
        self.sel = None;
    }

    // -- Clipboard -----------------------------------------------------------

    /// Clipboard content from the last copy, if any.
    #[inline]
    #[must_use]
    pub fn clipboard(&self) -> Option<&[u8]> {
        self.clipboard.as_deref()
    }

    /// Release the clipboard allocation.
    #[inline]
    pub fn clear_clipboard(&mut self) {
        self.clipboard = None;
    }

    // -- Filename ------------------------------------------------------------

    /// Associated filename; empty means an unsaved/new document.
    #[inline]
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Record the filename, truncated to [`FILENAME_MAX`] bytes on a char
    /// boundary.
    pub fn set_filename(&mut self, name: &str) {
        let mut end = name.len().min(FILENAME_MAX);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        self.filename = name[..end].to_string();
    }

    // -- Growth --------------------------------------------------------------

    /// Grow storage by the fixed [`INC_BUF_SIZE`] increment.
    ///
    /// # Errors
    ///
    /// [`Error::Alloc`] if the larger storage cannot be obtained; the
    /// buffer is left unchanged in that case.
    pub fn grow(&mut self) -> Result<()> {
        self.grow_by(INC_BUF_SIZE)
    }

    /// Grow storage by an exact byte count (used by load to make room for
    /// a whole file ahead of reading it).
    ///
    /// Content after the gap shifts right by `inc`; the widened gap
    /// absorbs the new capacity. Every derived position is captured as a
    /// logical offset before the shift and reapplied against the new gap
    /// afterwards.
    pub(crate) fn grow_by(&mut self, inc: usize) -> Result<()> {
        let old_len = self.storage.len();
        let after_gap = old_len - self.gap_e;

        let cursor_idx = self.to_logical(self.cursor);
        let sel_idx = self.sel.map(|s| self.to_logical(s));
        let disp_idx = self.to_logical(self.disp_b);

        // Reserve before any mutation: a failed growth must leave the
        // buffer untouched.
        self.storage
            .try_reserve_exact(inc)
            .map_err(|_| Error::Alloc)?;
        self.storage.resize(old_len + inc, 0);
        self.storage
            .copy_within(self.gap_e..self.gap_e + after_gap, self.gap_e + inc);
        self.gap_e += inc;

        self.cursor = self.to_physical(cursor_idx);
        self.sel = sel_idx.map(|i| self.to_physical(i));
        self.disp_b = self.to_physical(disp_idx);

        debug!(inc, total = self.storage.len(), "storage grown");
        self.debug_invariants();
        Ok(())
    }

    // -- Gap relocation ------------------------------------------------------

    /// Relocate the gap so its start touches the cursor, moving only the
    /// smaller of the two displaced ranges in one block copy.
    ///
    /// This is the sole mechanism making cursor/gap adjacency valid before
    /// any byte-level insert or delete. No-op (and idempotent) when the
    /// cursor already sits on a gap edge; a cursor at the gap start is
    /// canonicalized to the gap end.
    pub fn move_gap(&mut self) {
        if self.cursor == self.gap_e {
            return;
        }
        if self.cursor == self.gap_b {
            self.cursor = self.gap_e;
            return;
        }

        if self.cursor < self.gap_b {
            // Text between cursor and gap start slides right, over the
            // old gap; the gap slides left onto the cursor.
            let chunk = self.gap_b - self.cursor;
            self.gap_b -= chunk;
            self.gap_e -= chunk;
            self.cursor = self.gap_e;
            self.storage
                .copy_within(self.gap_b..self.gap_b + chunk, self.gap_e);
        } else {
            // Text between gap end and cursor slides left, onto the old
            // gap start; the gap slides right up to the cursor.
            let chunk = self.cursor - self.gap_e;
            self.storage
                .copy_within(self.gap_e..self.gap_e + chunk, self.gap_b);
            self.gap_b += chunk;
            self.gap_e = self.cursor;
        }

        self.debug_invariants();
    }

    // -- File I/O ------------------------------------------------------------

    /// Load a file's bytes into the buffer, verbatim.
    ///
    /// Grows ahead of time by the file's exact size, reads the whole file
    /// into the gap region, then advances the gap start past the read
    /// content — no decoding happens here; bytes are classified only
    /// later, during navigation. Records the (truncated) filename.
    ///
    /// # Errors
    ///
    /// Fails if the path cannot be opened, the growth allocation fails, or
    /// the read comes up short. A 0-byte file loads as empty content.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let mut file = File::open(path)?;
        let fsize = usize::try_from(file.metadata()?.len())
            .map_err(|_| Error::InvalidArg("file too large for this platform"))?;

        self.grow_by(fsize)?;
        if fsize > 0 {
            file.read_exact(&mut self.storage[self.gap_b..self.gap_b + fsize])?;
            self.gap_b += fsize;
        }

        self.set_filename(&path.to_string_lossy());
        debug!(bytes = fsize, file = %self.filename, "file loaded");
        self.debug_invariants();
        Ok(())
    }

    /// Save the logical content to the recorded filename, truncating any
    /// prior file content. Writes the two logical segments — before-gap,
    /// then after-gap — in order.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidArg`] when no filename is recorded, and
    /// with [`Error::Io`] on open, short-write, or sync failure.
    pub fn save(&self) -> Result<()> {
        if self.filename.is_empty() {
            return Err(Error::InvalidArg("no filename recorded"));
        }

        let mut file = File::create(&self.filename)?;
        file.write_all(&self.storage[..self.gap_b])?;
        file.write_all(&self.storage[self.gap_e..])?;
        // Surface deferred write errors now rather than silently on drop.
        file.sync_all()?;
        debug!(bytes = self.logical_len(), file = %self.filename, "file saved");
        Ok(())
    }

    // -- Invariants ----------------------------------------------------------

    /// Debug-only check of the store invariant; compiled out in release.
    #[inline]
    pub(crate) fn debug_invariants(&self) {
        debug_assert!(self.gap_b <= self.gap_e, "gap start past gap end");
        debug_assert!(self.gap_e <= self.storage.len(), "gap end past storage");
        debug_assert!(self.cursor <= self.storage.len(), "cursor past storage");
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GapBuffer")
            .field("storage", &self.storage.len())
            .field("gap", &(self.gap_b..self.gap_e))
            .field("cursor", &self.cursor)
            .field("disp_b", &self.disp_b)
            .field("sel", &self.sel)
            .field("filename", &self.filename)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn invariants_hold(buf: &GapBuffer) -> bool {
        buf.gap_b <= buf.gap_e && buf.gap_e <= buf.buf_e() && buf.cursor <= buf.buf_e()
    }

    // -- Construction -------------------------------------------------------

    #[test]
    fn new_buffer_is_empty_gap_everywhere() {
        let buf = GapBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.logical_len(), 0);
        assert_eq!(buf.buf_e(), INIT_BUF_SIZE);
        assert_eq!(buf.gap_b(), 0);
        assert_eq!(buf.gap_e(), INIT_BUF_SIZE);
        assert_eq!(buf.cursor(), buf.gap_e());
        assert_eq!(buf.disp_b(), 0);
        assert_eq!(buf.disp_e(), None);
        assert_eq!(buf.sel(), None);
        assert!(buf.clipboard().is_none());
        assert_eq!(buf.filename(), "");
        assert!(invariants_hold(&buf));
    }

    #[test]
    fn from_text_content_and_cursor() {
        let buf = GapBuffer::from_text("hello");
        assert_eq!(buf.contents(), b"hello");
        assert_eq!(buf.logical_len(), 5);
        assert_eq!(buf.cursor_offset(), 5);
        assert!(invariants_hold(&buf));
    }

    #[test]
    fn default_is_new() {
        assert!(GapBuffer::default().is_empty());
    }

    // -- Membership ---------------------------------------------------------

    #[test]
    fn membership_predicates() {
        let buf = GapBuffer::from_text("ab");
        assert!(buf.in_buf(0));
        assert!(buf.in_buf(buf.buf_e() - 1));
        assert!(!buf.in_buf(buf.buf_e()));
        assert!(!buf.in_gap(0));
        assert!(buf.in_gap(buf.gap_b()));
        assert!(buf.in_gap(buf.gap_e() - 1));
        assert!(!buf.in_gap(buf.gap_e()));
    }

    // -- Translation --------------------------------------------------------

    #[test]
    fn logical_translation_skips_gap() {
        let buf = GapBuffer::from_text("abc");
        // Before the gap: identity.
        assert_eq!(buf.to_logical(2), 2);
        // Inside the gap: collapses to gap start.
        assert_eq!(buf.to_logical(buf.gap_b() + 1), 3);
        // After the gap: gap width subtracted.
        assert_eq!(buf.to_logical(buf.gap_e()), 3);
    }

    // -- move_gap -----------------------------------------------------------

    #[test]
    fn move_gap_noop_at_gap_end() {
        let mut buf = GapBuffer::from_text("abc");
        let (gb, ge) = (buf.gap_b(), buf.gap_e());
        buf.move_gap();
        assert_eq!((buf.gap_b(), buf.gap_e()), (gb, ge));
    }

    #[test]
    fn move_gap_is_idempotent() {
        let mut buf = GapBuffer::from_text("hello world");
        buf.cursor = 3;
        buf.move_gap();
        let snapshot = (buf.gap_b(), buf.gap_e(), buf.cursor());
        buf.move_gap();
        assert_eq!((buf.gap_b(), buf.gap_e(), buf.cursor()), snapshot);
        assert_eq!(buf.contents(), b"hello world");
    }

    #[test]
    fn move_gap_backward_preserves_content() {
        let mut buf = GapBuffer::from_text("hello");
        buf.cursor = 2;
        buf.move_gap();
        assert_eq!(buf.gap_b(), 2);
        assert_eq!(buf.cursor(), buf.gap_e());
        assert_eq!(buf.contents(), b"hello");
        assert!(invariants_hold(&buf));
    }

    #[test]
    fn move_gap_forward_preserves_content() {
        let mut buf = GapBuffer::from_text("hello");
        // Pull the gap to the front first, then push it to the far end.
        buf.cursor = 0;
        buf.move_gap();
        assert_eq!(buf.gap_b(), 0);
        buf.cursor = buf.buf_e();
        buf.move_gap();
        assert_eq!(buf.gap_e(), buf.buf_e());
        assert_eq!(buf.contents(), b"hello");
        assert!(invariants_hold(&buf));
    }

    #[test]
    fn move_gap_canonicalizes_cursor_at_gap_start() {
        let mut buf = GapBuffer::from_text("abc");
        buf.cursor = buf.gap_b();
        buf.move_gap();
        assert_eq!(buf.cursor(), buf.gap_e());
    }

    // -- Growth -------------------------------------------------------------

    #[test]
    fn grow_preserves_content_and_cursor_offset() {
        let mut buf = GapBuffer::from_text("hello");
        let old_end = buf.buf_e();
        buf.grow().unwrap();
        assert_eq!(buf.buf_e(), old_end + INC_BUF_SIZE);
        assert_eq!(buf.contents(), b"hello");
        assert_eq!(buf.cursor_offset(), 5);
        assert!(invariants_hold(&buf));
    }

    #[test]
    fn grow_preserves_positions_after_gap() {
        let mut buf = GapBuffer::from_text("hello world");
        buf.cursor = 3;
        buf.move_gap(); // gap now at [3, ..), "lo world" after it
        buf.toggle_selection(); // anchor at cursor (= gap_e)
        let sel_logical = buf.to_logical(buf.sel().unwrap());
        let cur_logical = buf.cursor_offset();

        buf.grow().unwrap();
        assert_eq!(buf.contents(), b"hello world");
        assert_eq!(buf.cursor_offset(), cur_logical);
        assert_eq!(buf.to_logical(buf.sel().unwrap()), sel_logical);
        assert!(invariants_hold(&buf));
    }

    #[test]
    fn grow_repeatedly() {
        let mut buf = GapBuffer::from_text("x");
        for _ in 0..4 {
            buf.grow().unwrap();
        }
        assert_eq!(buf.buf_e(), 1 + INIT_BUF_SIZE + 4 * INC_BUF_SIZE);
        assert_eq!(buf.contents(), b"x");
    }

    // -- Selection ----------------------------------------------------------

    #[test]
    fn toggle_selection_sets_then_clears() {
        let mut buf = GapBuffer::from_text("abc");
        assert_eq!(buf.sel(), None);
        buf.toggle_selection();
        assert_eq!(buf.sel(), Some(buf.cursor()));
        buf.toggle_selection();
        assert_eq!(buf.sel(), None);
    }

    #[test]
    fn sel_range_normalizes() {
        let mut buf = GapBuffer::from_text("abcdef");
        buf.toggle_selection();
        buf.cursor = 2;
        let (b, e) = buf.sel_range().unwrap();
        assert_eq!(b, 2);
        assert_eq!(e, buf.sel().unwrap());
    }

    // -- Filename ------------------------------------------------------------

    #[test]
    fn filename_truncated_to_bound() {
        let mut buf = GapBuffer::new();
        let long = "x".repeat(FILENAME_MAX + 30);
        buf.set_filename(&long);
        assert_eq!(buf.filename().len(), FILENAME_MAX);
    }

    #[test]
    fn filename_truncation_respects_char_boundary() {
        let mut buf = GapBuffer::new();
        // 'é' is 2 bytes; 35 of them straddle the 70-byte bound exactly,
        // so add one more to force a mid-char cut.
        let name = "é".repeat(36);
        buf.set_filename(&name);
        assert!(buf.filename().len() <= FILENAME_MAX);
        assert!(buf.filename().is_char_boundary(buf.filename().len()));
    }

    // -- File I/O ------------------------------------------------------------

    #[test]
    fn load_then_save_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.txt");
        std::fs::write(&path, b"alpha\nbeta\n\xF0\x9F\x91\x8B end").unwrap();

        let mut buf = GapBuffer::new();
        buf.load(&path).unwrap();
        assert_eq!(buf.contents(), b"alpha\nbeta\n\xF0\x9F\x91\x8B end");
        // Cursor lands at the start of the loaded content.
        assert_eq!(buf.cursor_offset(), 0);

        buf.save().unwrap();
        let reread = std::fs::read(&path).unwrap();
        assert_eq!(reread, buf.contents());
    }

    #[test]
    fn load_empty_file_is_empty_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, b"").unwrap();

        let mut buf = GapBuffer::new();
        buf.load(&path).unwrap();
        assert!(buf.is_empty());

        buf.save().unwrap();
        assert_eq!(std::fs::read(&path).unwrap().len(), 0);
    }

    #[test]
    fn load_missing_file_fails() {
        let mut buf = GapBuffer::new();
        let err = buf.load(Path::new("/nonexistent/ged/file.txt"));
        assert!(matches!(err, Err(Error::Io(_))));
        // Failed load leaves the buffer untouched.
        assert!(buf.is_empty());
        assert_eq!(buf.filename(), "");
    }

    #[test]
    fn save_without_filename_fails() {
        let buf = GapBuffer::from_text("hello");
        assert!(matches!(buf.save(), Err(Error::InvalidArg(_))));
    }

    #[test]
    fn save_writes_both_segments_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("split.txt");

        let mut buf = GapBuffer::from_text("hello world");
        // Park the gap in the middle so both segments are non-empty.
        buf.cursor = 5;
        buf.move_gap();
        buf.set_filename(&path.to_string_lossy());
        buf.save().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"hello world");
    }

    #[test]
    fn load_records_truncated_filename() {
        let dir = tempfile::tempdir().unwrap();
        let long_name = format!("{}.txt", "n".repeat(FILENAME_MAX));
        let path = dir.path().join(long_name);
        std::fs::write(&path, b"x").unwrap();

        let mut buf = GapBuffer::new();
        buf.load(&path).unwrap();
        assert_eq!(buf.filename().len(), FILENAME_MAX);
    }

    // -- Clipboard -----------------------------------------------------------

    #[test]
    fn clear_clipboard_releases() {
        let mut buf = GapBuffer::new();
        buf.clipboard = Some(b"stale".to_vec());
        buf.clear_clipboard();
        assert!(buf.clipboard().is_none());
    }

    // -- Debug format --------------------------------------------------------

    #[test]
    fn debug_format_mentions_gap_and_cursor() {
        let buf = GapBuffer::from_text("hi");
        let debug = format!("{buf:?}");
        assert!(debug.contains("GapBuffer"));
        assert!(debug.contains("gap"));
        assert!(debug.contains("cursor"));
    }
}
