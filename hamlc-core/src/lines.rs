//! Splitting source text into indented logical lines.

use crate::error::{HamlError, Result};

/// Indent unit used when auto detection is off
pub const FIXED_INDENT: &str = "  ";

/// A non-blank source line with its nesting depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based physical line number
    pub number: usize,
    pub depth: usize,
    /// The line with surrounding whitespace trimmed
    pub content: &'a str,
}

/// Lazy iterator over the logical lines of a template
pub struct LineSplitter<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    indent_unit: Option<&'a str>,
}

impl<'a> LineSplitter<'a> {
    /// Detect the indent unit from the first indented line
    pub fn auto(source: &'a str) -> Self {
        Self {
            lines: source.lines().enumerate(),
            indent_unit: None,
        }
    }

    /// Use a fixed indent unit
    pub fn fixed(source: &'a str, unit: &'a str) -> Self {
        Self {
            lines: source.lines().enumerate(),
            indent_unit: Some(unit),
        }
    }

    /// The indent unit in use, `None` until auto detection has seen an
    /// indented line
    pub fn indent_unit(&self) -> Option<&'a str> {
        self.indent_unit
    }

    fn depth_of(&mut self, raw: &'a str, number: usize) -> Result<usize> {
        let unit = match self.indent_unit {
            Some(unit) => unit,
            None => {
                let rest = raw.trim_start();
                let leading = &raw[..raw.len() - rest.len()];
                if leading.is_empty() {
                    return Ok(0);
                }
                tracing::debug!("detected indent unit {:?} at line {}", leading, number);
                self.indent_unit = Some(leading);
                leading
            }
        };

        let mut depth = 0;
        let mut rest = raw;
        while let Some(stripped) = rest.strip_prefix(unit).filter(|_| !unit.is_empty()) {
            depth += 1;
            rest = stripped;
        }

        if rest.starts_with(char::is_whitespace) {
            return Err(HamlError::IndentError { line: number });
        }

        Ok(depth)
    }
}

impl<'a> Iterator for LineSplitter<'a> {
    type Item = Result<Line<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, raw) = self.lines.next()?;
            let raw = raw.trim_end();
            if raw.is_empty() {
                continue;
            }

            let number = index + 1;
            return Some(self.depth_of(raw, number).map(|depth| Line {
                number,
                depth,
                content: raw.trim_start(),
            }));
        }
    }
}
