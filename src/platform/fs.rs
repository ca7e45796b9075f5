// Platkit - platform/fs.rs
//
// Line-oriented reading with CR/LF normalisation.
//
// End of stream is the only condition reported to the caller. Any other
// read failure in the middle of a file is escalated to `Diagnostics::fatal`.

use super::diagnostics::Diagnostics;
use crate::util::error::{PlatkitError, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Read one line of at most `capacity - 1` bytes into `line`.
///
/// Stops after a newline or at end of stream; bytes past the capacity stay
/// in `reader` and are returned by the next call. Every `\r` and `\n`
/// anywhere in the line is removed, not only the trailing terminator.
///
/// Returns `false` only when the stream was already exhausted and nothing
/// was read.
pub fn read_line<R: BufRead + ?Sized>(
    reader: &mut R,
    line: &mut Vec<u8>,
    capacity: usize,
    diag: &Diagnostics,
) -> bool {
    debug_assert!(capacity > 0, "read_line: capacity must be positive");

    let limit = capacity.saturating_sub(1);
    line.clear();

    let mut hit_eof = false;
    loop {
        let room = limit - line.len();
        let (taken, complete) = match reader.fill_buf() {
            Ok(available) if available.is_empty() => {
                hit_eof = true;
                break;
            }
            Ok(available) => {
                let window = &available[..available.len().min(room)];
                let (taken, complete) = match window.iter().position(|&b| b == b'\n') {
                    Some(i) => (i + 1, true),
                    None => (window.len(), false),
                };
                line.extend_from_slice(&window[..taken]);
                (taken, complete)
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => diag.fatal(&format!("read_line(): {e}\n")),
        };
        reader.consume(taken);

        if complete || line.len() >= limit {
            break;
        }
    }

    if hit_eof && line.is_empty() {
        return false;
    }

    line.retain(|&b| b != b'\r' && b != b'\n');
    true
}

/// Streams normalised lines out of a buffered reader, reusing one buffer.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    capacity: usize,
    line: Vec<u8>,
    line_number: u64,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R, capacity: usize) -> Self {
        Self {
            reader,
            capacity,
            line: Vec::with_capacity(capacity),
            line_number: 0,
        }
    }

    /// The next line, or `None` at end of stream.
    pub fn next_line(&mut self, diag: &Diagnostics) -> Option<&[u8]> {
        if !read_line(&mut self.reader, &mut self.line, self.capacity, diag) {
            return None;
        }
        self.line_number += 1;
        Some(&self.line)
    }

    /// Number of lines returned so far.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}

/// Open `path` for line reading.
pub fn open_lines(path: &Path, capacity: usize) -> Result<LineReader<BufReader<File>>> {
    let file = File::open(path).map_err(|source| PlatkitError::Io {
        path: path.to_path_buf(),
        operation: "open",
        source,
    })?;
    tracing::debug!(path = %path.display(), capacity, "Opened file for line reading");
    Ok(LineReader::new(BufReader::new(file), capacity))
}

/// Read the first `max_lines` lines of a file.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_first_lines(
    path: &Path,
    max_lines: usize,
    capacity: usize,
    diag: &Diagnostics,
) -> Result<Vec<String>> {
    let mut reader = open_lines(path, capacity)?;
    let mut lines = Vec::with_capacity(max_lines);
    while lines.len() < max_lines {
        match reader.next_line(diag) {
            Some(line) => lines.push(String::from_utf8_lossy(line).into_owned()),
            None => break,
        }
    }
    Ok(lines)
}
