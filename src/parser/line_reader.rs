//! Buffered line input with one line of lookahead.

use std::io::{self, BufRead};

/// Upper bound on the columns kept per physical line, and on a merged
/// logical line.  Longer lines are truncated, never an error.
pub const MAX_LINE: usize = 8192;

const TAB_STOP: usize = 4;

/// Reads physical lines, normalizing them for the block engine: tabs are
/// expanded to the next four-column stop, carriage returns are dropped, and
/// every line comes back `\n`-terminated.  Invalid UTF-8 is decoded lossily.
///
/// `peek` exposes the next line without consuming it; the block engine's
/// lookahead never needs more than one line.
pub struct LineReader<R: BufRead> {
    input: R,
    peeked: Option<Option<String>>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(input: R) -> Self {
        LineReader {
            input,
            peeked: None,
        }
    }

    /// The next normalized line, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        match self.peeked.take() {
            Some(line) => Ok(line),
            None => self.read_normalized(),
        }
    }

    /// The next normalized line without consuming it.
    pub fn peek(&mut self) -> io::Result<Option<&str>> {
        if self.peeked.is_none() {
            self.peeked = Some(self.read_normalized()?);
        }
        match self.peeked {
            Some(Some(ref line)) => Ok(Some(line)),
            _ => Ok(None),
        }
    }

    fn read_normalized(&mut self) -> io::Result<Option<String>> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }

        let decoded = String::from_utf8_lossy(&raw);
        let mut line = String::with_capacity(decoded.len() + 1);
        let mut column = 0;

        for ch in decoded.chars() {
            match ch {
                '\r' => {}
                '\n' => break,
                '\t' => {
                    loop {
                        line.push(' ');
                        column += 1;
                        if column % TAB_STOP == 0 || column >= MAX_LINE {
                            break;
                        }
                    }
                }
                _ => {
                    line.push(ch);
                    column += 1;
                }
            }
            if column >= MAX_LINE {
                break;
            }
        }

        line.push('\n');
        Ok(Some(line))
    }
}
