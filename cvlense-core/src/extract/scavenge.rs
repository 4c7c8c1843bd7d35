//! Byte scavenger fallback
//!
//! Recovers partial text signal from raw PDF bytes when no library backend
//! is available. Scans the stream with a two-state machine: printable bytes
//! accumulate into the current run, anything else flushes the run as a
//! decoded fragment. Noisy by nature (stray glyph and operator tokens), but
//! downstream scoring is substring-based and tolerates it.

/// Scan state: either collecting printable bytes or between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Flushed,
    InRun,
}

/// Bytes that keep a run alive: printable ASCII, tab/LF/CR, and the
/// extended 0x80-0xFD range where PDF streams bury readable fragments.
fn is_run_byte(b: u8) -> bool {
    (0x20..=0x7E).contains(&b) || matches!(b, b'\t' | b'\n' | b'\r') || (0x80..=0xFD).contains(&b)
}

/// Decode a run permissively, dropping undecodable bytes instead of
/// substituting replacement characters.
fn decode_run(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf).replace('\u{FFFD}', "")
}

/// Scavenge printable text fragments from raw bytes, joined with single
/// spaces. The caller strips `(cid:N)` artifacts and collapses whitespace.
pub fn scavenge(data: &[u8]) -> String {
    let mut chunks: Vec<String> = Vec::new();
    let mut buf: Vec<u8> = Vec::new();
    let mut state = ScanState::Flushed;

    let flush = |buf: &mut Vec<u8>, chunks: &mut Vec<String>| {
        if !buf.is_empty() {
            let s = decode_run(buf);
            if !s.trim().is_empty() {
                chunks.push(s);
            }
            buf.clear();
        }
    };

    for &b in data {
        if is_run_byte(b) {
            buf.push(b);
            state = ScanState::InRun;
        } else if state == ScanState::InRun {
            flush(&mut buf, &mut chunks);
            state = ScanState::Flushed;
        }
    }
    flush(&mut buf, &mut chunks);

    chunks.join(" ")
}
