// SPDX-License-Identifier: MIT
//
// Terminal input decoding.
//
// Turns raw stdin bytes into the keys the editor binds: plain bytes,
// arrows, editing keys, and function keys. Handles the sequences real
// terminals actually send for them:
//
// - Legacy CSI sequences (`ESC [ A`, `ESC [ 5 ~`, `ESC [ 2 1 ~`, ...)
// - SS3 sequences (`ESC O P`... — F1-F4 and arrows on some terminals)
// - Raw-mode control bytes (CR for Enter, DEL/BS for Backspace)
//
// The decoder itself is a pure function over a byte slice so it can be
// tested without a terminal; [`Reader`] wraps it with blocking reads
// and the lone-ESC timeout.
//
// Safety: `Reader` uses `libc::read` and `libc::poll` directly on the
// stdin fd. Raw fd reads pair with the raw-mode termios setup in
// `terminal.rs` (VMIN=1 blocking reads); poll gives the short timeout
// that distinguishes a lone Escape keypress from the start of an
// escape sequence.
#![allow(unsafe_code)]

use std::io;

// ─── Keys ───────────────────────────────────────────────────────────────────

/// A decoded keypress.
///
/// Printable input arrives one byte at a time as [`Byte`](Key::Byte) —
/// multi-byte UTF-8 symbols are delivered as their individual bytes and
/// composed by the editor, which knows the expected length from the
/// lead byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A single input byte (printable ASCII, or one byte of a UTF-8 symbol).
    Byte(u8),
    Enter,
    Backspace,
    Delete,
    Escape,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    // ── Function keys ───────────────────────────────────────────
    /// F1 through F12.
    F(u8),
}

// ─── Decoder ────────────────────────────────────────────────────────────────

/// Outcome of decoding a (possibly partial) escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A complete, recognized sequence.
    Key(Key),
    /// A valid prefix — feed more bytes.
    Incomplete,
    /// Not a sequence we recognize; discard it.
    Unknown,
}

/// Decode an escape sequence starting at the ESC byte.
///
/// `seq[0]` must be `0x1b`. Returns [`Decoded::Incomplete`] while the
/// bytes form a valid prefix of a known sequence, [`Decoded::Key`] once
/// a complete one is recognized, and [`Decoded::Unknown`] for anything
/// else (including Alt+key chords, which the editor does not bind).
#[must_use]
pub fn decode_escape(seq: &[u8]) -> Decoded {
    debug_assert_eq!(seq.first(), Some(&0x1b));
    match seq.get(1) {
        None => Decoded::Incomplete,
        Some(b'[') => decode_csi(&seq[2..]),
        Some(b'O') => decode_ss3(seq.get(2).copied()),
        Some(_) => Decoded::Unknown,
    }
}

/// Decode the body of a CSI sequence (bytes after `ESC [`).
fn decode_csi(body: &[u8]) -> Decoded {
    let Some((&last, params)) = body.split_last() else {
        return Decoded::Incomplete;
    };

    match last {
        // Parameter or intermediate byte — sequence still open.
        0x20..=0x3f => Decoded::Incomplete,
        b'A' if params.is_empty() => Decoded::Key(Key::Up),
        b'B' if params.is_empty() => Decoded::Key(Key::Down),
        b'C' if params.is_empty() => Decoded::Key(Key::Right),
        b'D' if params.is_empty() => Decoded::Key(Key::Left),
        b'H' if params.is_empty() => Decoded::Key(Key::Home),
        b'F' if params.is_empty() => Decoded::Key(Key::End),
        b'~' => decode_tilde(params),
        _ => Decoded::Unknown,
    }
}

/// Decode a `CSI N ~` editing/function key from its numeric parameter.
fn decode_tilde(params: &[u8]) -> Decoded {
    if params.is_empty() || !params.iter().all(u8::is_ascii_digit) {
        return Decoded::Unknown;
    }
    let mut n: u16 = 0;
    for &d in params {
        n = n * 10 + u16::from(d - b'0');
    }

    // xterm numbering: the function-key ranges have gaps at 16 and 22.
    let key = match n {
        1 | 7 => Key::Home,
        4 | 8 => Key::End,
        3 => Key::Delete,
        5 => Key::PageUp,
        6 => Key::PageDown,
        11..=15 => Key::F((n - 10) as u8),
        17..=21 => Key::F((n - 11) as u8),
        23 | 24 => Key::F((n - 12) as u8),
        _ => return Decoded::Unknown,
    };
    Decoded::Key(key)
}

/// Decode the final byte of an SS3 sequence (`ESC O x`).
fn decode_ss3(last: Option<u8>) -> Decoded {
    let Some(last) = last else {
        return Decoded::Incomplete;
    };
    let key = match last {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' => Key::Home,
        b'F' => Key::End,
        b'P' => Key::F(1),
        b'Q' => Key::F(2),
        b'R' => Key::F(3),
        b'S' => Key::F(4),
        _ => return Decoded::Unknown,
    };
    Decoded::Key(key)
}

/// Map a single non-ESC raw-mode byte to a key.
#[must_use]
pub const fn decode_byte(byte: u8) -> Key {
    match byte {
        b'\r' | b'\n' => Key::Enter,
        0x7f | 0x08 => Key::Backspace,
        _ => Key::Byte(byte),
    }
}

// ─── Reader ─────────────────────────────────────────────────────────────────

/// How long to wait after a lone ESC before deciding it was a real
/// Escape keypress rather than the start of a sequence.
const ESC_TIMEOUT_MS: i32 = 25;

/// Blocking key reader over raw-mode stdin.
///
/// Owns no state beyond the fd it reads; one instance per editor
/// session.
#[derive(Debug, Default)]
pub struct Reader {
    _private: (),
}

impl Reader {
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Block until the next complete keypress and return it.
    ///
    /// Unknown escape sequences are consumed and skipped; a lone ESC
    /// (no follow-up byte within [`ESC_TIMEOUT_MS`]) is delivered as
    /// [`Key::Escape`].
    ///
    /// # Errors
    ///
    /// Propagates read failures, including EOF on stdin.
    pub fn read_key(&mut self) -> io::Result<Key> {
        loop {
            let byte = read_byte()?;
            if byte != 0x1b {
                return Ok(decode_byte(byte));
            }

            let mut seq = [0u8; 16];
            seq[0] = 0x1b;
            let mut len = 1;

            loop {
                if !poll_readable(ESC_TIMEOUT_MS)? {
                    // Timeout: a lone ESC is the Escape key; a stalled
                    // partial sequence is dropped.
                    if len == 1 {
                        return Ok(Key::Escape);
                    }
                    break;
                }
                if len == seq.len() {
                    break;
                }
                seq[len] = read_byte()?;
                len += 1;

                match decode_escape(&seq[..len]) {
                    Decoded::Key(key) => return Ok(key),
                    Decoded::Incomplete => {}
                    Decoded::Unknown => break,
                }
            }
            // Sequence discarded — wait for the next keypress.
        }
    }
}

/// Read exactly one byte from stdin, retrying on EINTR.
#[cfg(unix)]
fn read_byte() -> io::Result<u8> {
    let mut byte = 0u8;
    loop {
        let n = unsafe { libc::read(libc::STDIN_FILENO, (&raw mut byte).cast(), 1) };
        match n {
            1 => return Ok(byte),
            0 => return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed")),
            _ => {
                let err = io::Error::last_os_error();
                if err.kind() != io::ErrorKind::Interrupted {
                    return Err(err);
                }
            }
        }
    }
}

/// Wait up to `timeout_ms` for stdin to become readable.
#[cfg(unix)]
fn poll_readable(timeout_ms: i32) -> io::Result<bool> {
    let mut fds = libc::pollfd {
        fd: libc::STDIN_FILENO,
        events: libc::POLLIN,
        revents: 0,
    };
    loop {
        let n = unsafe { libc::poll(&raw mut fds, 1, timeout_ms) };
        match n {
            0 => return Ok(false),
            1 => return Ok(fds.revents & libc::POLLIN != 0),
            _ => {
                let err = io::Error::last_os_error();
                if err.kind() != io::ErrorKind::Interrupted {
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(not(unix))]
fn read_byte() -> io::Result<u8> {
    use std::io::Read;
    let mut byte = [0u8; 1];
    io::stdin().read_exact(&mut byte)?;
    Ok(byte[0])
}

#[cfg(not(unix))]
fn poll_readable(_timeout_ms: i32) -> io::Result<bool> {
    Ok(true)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn arrows_csi_and_ss3() {
        assert_eq!(decode_escape(b"\x1b[A"), Decoded::Key(Key::Up));
        assert_eq!(decode_escape(b"\x1b[B"), Decoded::Key(Key::Down));
        assert_eq!(decode_escape(b"\x1b[C"), Decoded::Key(Key::Right));
        assert_eq!(decode_escape(b"\x1b[D"), Decoded::Key(Key::Left));
        assert_eq!(decode_escape(b"\x1bOA"), Decoded::Key(Key::Up));
        assert_eq!(decode_escape(b"\x1bOD"), Decoded::Key(Key::Left));
    }

    #[test]
    fn home_and_end_variants() {
        assert_eq!(decode_escape(b"\x1b[H"), Decoded::Key(Key::Home));
        assert_eq!(decode_escape(b"\x1b[F"), Decoded::Key(Key::End));
        assert_eq!(decode_escape(b"\x1b[1~"), Decoded::Key(Key::Home));
        assert_eq!(decode_escape(b"\x1b[7~"), Decoded::Key(Key::Home));
        assert_eq!(decode_escape(b"\x1b[4~"), Decoded::Key(Key::End));
        assert_eq!(decode_escape(b"\x1b[8~"), Decoded::Key(Key::End));
        assert_eq!(decode_escape(b"\x1bOH"), Decoded::Key(Key::Home));
        assert_eq!(decode_escape(b"\x1bOF"), Decoded::Key(Key::End));
    }

    #[test]
    fn editing_and_paging_keys() {
        assert_eq!(decode_escape(b"\x1b[3~"), Decoded::Key(Key::Delete));
        assert_eq!(decode_escape(b"\x1b[5~"), Decoded::Key(Key::PageUp));
        assert_eq!(decode_escape(b"\x1b[6~"), Decoded::Key(Key::PageDown));
    }

    #[test]
    fn function_keys_ss3() {
        assert_eq!(decode_escape(b"\x1bOP"), Decoded::Key(Key::F(1)));
        assert_eq!(decode_escape(b"\x1bOQ"), Decoded::Key(Key::F(2)));
        assert_eq!(decode_escape(b"\x1bOR"), Decoded::Key(Key::F(3)));
        assert_eq!(decode_escape(b"\x1bOS"), Decoded::Key(Key::F(4)));
    }

    #[test]
    fn function_keys_csi_with_gaps() {
        assert_eq!(decode_escape(b"\x1b[11~"), Decoded::Key(Key::F(1)));
        assert_eq!(decode_escape(b"\x1b[15~"), Decoded::Key(Key::F(5)));
        assert_eq!(decode_escape(b"\x1b[17~"), Decoded::Key(Key::F(6)));
        assert_eq!(decode_escape(b"\x1b[21~"), Decoded::Key(Key::F(10)));
        assert_eq!(decode_escape(b"\x1b[23~"), Decoded::Key(Key::F(11)));
        assert_eq!(decode_escape(b"\x1b[24~"), Decoded::Key(Key::F(12)));
        // 16 and 22 are the xterm gaps.
        assert_eq!(decode_escape(b"\x1b[16~"), Decoded::Unknown);
        assert_eq!(decode_escape(b"\x1b[22~"), Decoded::Unknown);
    }

    #[test]
    fn partial_sequences_are_incomplete() {
        assert_eq!(decode_escape(b"\x1b"), Decoded::Incomplete);
        assert_eq!(decode_escape(b"\x1b["), Decoded::Incomplete);
        assert_eq!(decode_escape(b"\x1b[2"), Decoded::Incomplete);
        assert_eq!(decode_escape(b"\x1b[21"), Decoded::Incomplete);
        assert_eq!(decode_escape(b"\x1bO"), Decoded::Incomplete);
    }

    #[test]
    fn unknown_sequences() {
        assert_eq!(decode_escape(b"\x1bx"), Decoded::Unknown); // Alt+x
        assert_eq!(decode_escape(b"\x1b[Z"), Decoded::Unknown); // Shift+Tab
        assert_eq!(decode_escape(b"\x1b[99~"), Decoded::Unknown);
        assert_eq!(decode_escape(b"\x1bOz"), Decoded::Unknown);
    }

    #[test]
    fn raw_bytes() {
        assert_eq!(decode_byte(b'\r'), Key::Enter);
        assert_eq!(decode_byte(b'\n'), Key::Enter);
        assert_eq!(decode_byte(0x7f), Key::Backspace);
        assert_eq!(decode_byte(0x08), Key::Backspace);
        assert_eq!(decode_byte(b'a'), Key::Byte(b'a'));
        assert_eq!(decode_byte(0xc3), Key::Byte(0xc3)); // UTF-8 lead byte
    }
}
