//! Cursor over the text of a tag line.
//!
//! Values are scanned bracket- and quote-aware so attribute expressions like
//! `f(a, ")")` or `"say \"hi\""` are consumed as one piece.

use crate::ast::Attributes;
use crate::error::{HamlError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w:-]+").unwrap());

/// Returns true if the byte at `index` is preceded by an odd number of
/// backslashes
pub fn is_escaped(haystack: &str, index: usize) -> bool {
    haystack.as_bytes()[..index]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count()
        % 2
        == 1
}

/// Byte index of the first unescaped `needle` at or after `start`
pub fn find_unescaped(haystack: &str, needle: char, start: usize) -> Option<usize> {
    let mut from = start;
    while let Some(offset) = haystack.get(from..)?.find(needle) {
        let index = from + offset;
        if !is_escaped(haystack, index) {
            return Some(index);
        }
        from = index + needle.len_utf8();
    }
    None
}

pub struct Scanner<'a> {
    rest: &'a str,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str, line: usize) -> Self {
        Self { rest: input, line }
    }

    /// The unconsumed remainder
    pub fn rest(&self) -> &'a str {
        self.rest
    }

    pub fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rest = &self.rest[c.len_utf8()..];
        Some(c)
    }

    /// Consume `prefix` if the remainder starts with it
    pub fn eat(&mut self, prefix: &str) -> bool {
        match self.rest.strip_prefix(prefix) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    pub fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    /// Consume the match of an anchored regex, empty if it doesn't match
    pub fn consume_regex(&mut self, regex: &Regex) -> &'a str {
        match regex.find(self.rest) {
            Some(m) if m.start() == 0 => {
                let (matched, rest) = self.rest.split_at(m.end());
                self.rest = rest;
                matched
            }
            _ => "",
        }
    }

    /// Consume a value up to the first stopper outside of brackets and
    /// quotes. The stopper itself is left in place.
    pub fn consume_value(&mut self, stoppers: &[char]) -> Result<&'a str> {
        let data = self.rest;
        let mut index = 0;
        let mut depth = 0usize;

        loop {
            let c = data[index..]
                .chars()
                .next()
                .ok_or(HamlError::UnterminatedValue { line: self.line })?;

            if depth == 0 && stoppers.contains(&c) {
                break;
            }

            match c {
                '"' | '\'' => {
                    let close = find_unescaped(data, c, index + 1)
                        .ok_or(HamlError::UnterminatedValue { line: self.line })?;
                    index = close + 1;
                }
                '(' => {
                    depth += 1;
                    index += 1;
                }
                ')' => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or(HamlError::UnmatchedBracket { line: self.line })?;
                    index += 1;
                }
                _ => index += c.len_utf8(),
            }
        }

        let (value, rest) = data.split_at(index);
        self.rest = rest;
        Ok(value)
    }

    /// Scan the `%name#id.class` head of a tag, returning the element name.
    /// Stops at whitespace, an attribute list or `=`.
    pub fn scan_tag_head(&mut self, attrs: &mut Attributes) -> Result<String> {
        let mut name = String::from("div");

        while let Some(marker) = self.peek() {
            if marker.is_whitespace() || matches!(marker, '(' | '{' | '=') {
                break;
            }
            if !matches!(marker, '%' | '#' | '.') {
                return Err(self.malformed_name(format!("unexpected `{}`", marker)));
            }
            self.bump();

            let fragment = self.consume_regex(&NAME);
            if fragment.is_empty() {
                return Err(self.malformed_name(format!("expected a name after `{}`", marker)));
            }

            match marker {
                '%' => name = fragment.to_string(),
                '#' => attrs.push("\"id\"", format!("\"{}\"", fragment)),
                _ => attrs.push("\"class\"", format!("\"{}\"", fragment)),
            }
        }

        Ok(name)
    }

    /// Scan any number of `(k=v ...)` and `{k => v, ...}` lists
    pub fn scan_attribute_lists(&mut self, attrs: &mut Attributes) -> Result<()> {
        loop {
            if self.eat("(") {
                self.scan_paren_list(attrs)?;
            } else if self.eat("{") {
                self.scan_brace_list(attrs)?;
            } else {
                return Ok(());
            }
        }
    }

    fn scan_paren_list(&mut self, attrs: &mut Attributes) -> Result<()> {
        loop {
            self.skip_whitespace();
            if self.close_list(')')? {
                return Ok(());
            }

            let key = self.consume_regex(&NAME);
            if key.is_empty() {
                return Err(self.malformed_list("expected an attribute name"));
            }
            self.skip_whitespace();
            if !self.eat("=") {
                return Err(self.malformed_list(format!("expected `=` after `{}`", key)));
            }
            self.skip_whitespace();

            let value = self.consume_value(&[' ', '\t', ')'])?;
            if value.is_empty() {
                return Err(self.malformed_list(format!("missing value for `{}`", key)));
            }
            attrs.push(format!("\"{}\"", key), value);

            self.skip_whitespace();
            self.eat(",");
        }
    }

    fn scan_brace_list(&mut self, attrs: &mut Attributes) -> Result<()> {
        loop {
            self.skip_whitespace();
            if self.close_list('}')? {
                return Ok(());
            }

            let key = self.consume_value(&['=', '}'])?.trim_end();
            if key.is_empty() {
                return Err(self.malformed_list("expected an attribute key"));
            }
            if !self.eat("=>") {
                return Err(self.malformed_list(format!("expected `=>` after `{}`", key)));
            }
            self.skip_whitespace();

            let value = self.consume_value(&[',', '}'])?.trim_end();
            if value.is_empty() {
                return Err(self.malformed_list(format!("missing value for `{}`", key)));
            }
            attrs.push(key, value);

            self.skip_whitespace();
            self.eat(",");
        }
    }

    /// Consume the closing bracket if it is next
    fn close_list(&mut self, close: char) -> Result<bool> {
        match self.peek() {
            None => Err(self.malformed_list(format!("missing closing `{}`", close))),
            Some(c) if c == close => {
                self.bump();
                Ok(true)
            }
            Some(_) => Ok(false),
        }
    }

    fn malformed_name(&self, message: String) -> HamlError {
        HamlError::MalformedTagName {
            line: self.line,
            message,
        }
    }

    fn malformed_list(&self, message: impl Into<String>) -> HamlError {
        HamlError::MalformedAttributeList {
            line: self.line,
            message: message.into(),
        }
    }
}
