//! Line-oriented source output shared by all backends.

use std::io::{self, Write};

/// Indented line writer with a pending literal buffer.
///
/// The buffer holds text that is already escaped for the target language's
/// string literal syntax. Backends turn it into a single output statement
/// whenever [`SourceEmitter::take_literal`] hands it back.
pub struct SourceEmitter<W: Write> {
    out: W,
    literal: String,
    depth: usize,
    indent_unit: &'static str,
    lines: usize,
}

impl<W: Write> SourceEmitter<W> {
    pub fn new(out: W, indent_unit: &'static str) -> Self {
        Self {
            out,
            literal: String::new(),
            depth: 0,
            indent_unit,
            lines: 0,
        }
    }

    /// Write one line at the current indentation
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        for _ in 0..self.depth {
            self.out.write_all(self.indent_unit.as_bytes())?;
        }
        self.raw_line(text)
    }

    /// Write one line without indentation
    pub fn raw_line(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    pub fn blank_line(&mut self) -> io::Result<()> {
        self.raw_line("")
    }

    /// Number of lines written so far
    pub fn lines_written(&self) -> usize {
        self.lines
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Append already escaped text to the pending literal
    pub fn push_literal(&mut self, escaped: &str) {
        self.literal.push_str(escaped);
    }

    /// Take the pending literal, if there is any
    pub fn take_literal(&mut self) -> Option<String> {
        if self.literal.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.literal))
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Escape text for a C or C++ string literal body
pub fn escape_c(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}
