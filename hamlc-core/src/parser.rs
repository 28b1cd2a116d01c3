use crate::ast::{Attributes, Display, Document, Node, NodeKind, Segment, Tag};
use crate::doctype;
use crate::error::{HamlError, Result};
use crate::lines::{Line, LineSplitter, FIXED_INDENT};
use crate::options::Options;
use crate::scanner::Scanner;

/// What a line is, decided by its leading marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Doctype,
    Tag,
    SilentComment,
    Execution,
    Comment,
    Escape,
    Declaration,
    Text,
}

/// Checked in order, so longer prefixes come before their single character
/// counterparts
const MARKERS: &[(&str, Marker)] = &[
    ("!!!", Marker::Doctype),
    ("#{", Marker::Text),
    ("%", Marker::Tag),
    ("#", Marker::Tag),
    (".", Marker::Tag),
    ("-#", Marker::SilentComment),
    ("-", Marker::Execution),
    ("/", Marker::Comment),
    ("\\", Marker::Escape),
    ("?", Marker::Declaration),
];

fn classify_line(content: &str) -> (Marker, &str) {
    MARKERS
        .iter()
        .find_map(|&(prefix, marker)| match marker {
            Marker::Text => content.starts_with(prefix).then_some((marker, content)),
            _ => content.strip_prefix(prefix).map(|rest| (marker, rest)),
        })
        .unwrap_or((Marker::Text, content))
}

/// Builds a [`Document`] from template source
pub struct Parser<'a> {
    lines: LineSplitter<'a>,
    options: &'a Options,
    /// Open nodes, outermost first; the document root is implicit below them
    open: Vec<Node>,
    root: Document,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, options: &'a Options) -> Self {
        let lines = if options.auto_indent {
            LineSplitter::auto(source)
        } else {
            LineSplitter::fixed(source, FIXED_INDENT)
        };

        Self {
            lines,
            options,
            open: Vec::new(),
            root: Document::default(),
        }
    }

    /// Parse the entire input
    pub fn parse(mut self) -> Result<Document> {
        while let Some(line) = self.lines.next() {
            self.parse_line(line?)?;
        }
        self.close_to(0);

        tracing::debug!(
            "parsed template with {} top-level nodes (indent unit {:?})",
            self.root.children.len(),
            self.lines.indent_unit()
        );
        Ok(self.root)
    }

    fn parse_line(&mut self, line: Line<'_>) -> Result<()> {
        if line.depth > self.open.len() {
            return Err(HamlError::SkippedIndentLevel { line: line.number });
        }
        self.close_to(line.depth);

        // A leaf parent rejects the line before its own placement rules apply
        if let Some(parent) = self.open.last() {
            if !parent.kind.accepts_children() {
                return Err(HamlError::IllegalChildren { line: line.number });
            }
        }

        let (marker, rest) = classify_line(line.content);
        tracing::trace!(
            "line {} depth {} marker {:?}",
            line.number,
            line.depth,
            marker
        );

        let kind = match marker {
            Marker::Declaration => {
                if self.root.manual_declaration {
                    return Err(HamlError::DuplicateDeclaration { line: line.number });
                }
                if line.depth > 0 {
                    return Err(HamlError::NestedDeclaration { line: line.number });
                }
                self.root.manual_declaration = true;
                NodeKind::Declaration(split_params(rest))
            }
            Marker::Doctype => {
                if line.depth > 0 {
                    return Err(HamlError::DoctypeNotTopLevel { line: line.number });
                }
                NodeKind::Doctype(doctype::resolve(rest, self.options.format, line.number)?)
            }
            Marker::Tag => NodeKind::Tag(parse_tag(line.content, line.number)?),
            Marker::SilentComment => NodeKind::SilentComment(rest.trim().to_string()),
            Marker::Execution => NodeKind::Execution(rest.trim().to_string()),
            Marker::Comment => NodeKind::Comment(rest.trim().to_string()),
            Marker::Escape => NodeKind::Escape(parse_display(rest, line.number)?),
            Marker::Text => NodeKind::DirectDisplay(parse_display(rest, line.number)?),
        };

        self.open.push(Node {
            line: line.number,
            kind,
            children: Vec::new(),
        });
        Ok(())
    }

    /// Close open nodes until `depth` remain, attaching each to its parent
    fn close_to(&mut self, depth: usize) {
        while self.open.len() > depth {
            if let Some(node) = self.open.pop() {
                match self.open.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => self.root.children.push(node),
                }
            }
        }
    }
}

/// Parse template source into a document tree
pub fn parse(source: &str, options: &Options) -> Result<Document> {
    Parser::new(source, options).parse()
}

/// Split declaration parameters on commas outside of brackets, so
/// `std::map<int, int> m` stays one parameter
fn split_params(input: &str) -> Vec<String> {
    let mut params = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, c) in input.char_indices() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                params.push(&input[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    params.push(&input[start..]);

    params
        .into_iter()
        .map(str::trim)
        .filter(|param| !param.is_empty())
        .map(String::from)
        .collect()
}

fn parse_tag(content: &str, line: usize) -> Result<Tag> {
    let mut scanner = Scanner::new(content, line);
    let mut attributes = Attributes::new();

    let name = scanner.scan_tag_head(&mut attributes)?;
    scanner.scan_attribute_lists(&mut attributes)?;

    let rest = scanner.rest();
    let rest = rest.strip_prefix(char::is_whitespace).unwrap_or(rest);
    let content = if rest.trim().is_empty() {
        None
    } else {
        Some(parse_display(rest, line)?)
    };

    Ok(Tag {
        name,
        attributes,
        content,
    })
}

/// A display line: `= expr` evaluates, anything else is interpolated text
pub fn parse_display(data: &str, line: usize) -> Result<Display> {
    match data.strip_prefix('=') {
        Some(expr) => {
            let expr = expr.trim();
            if expr.is_empty() {
                return Err(HamlError::EmptyEvaluation { line });
            }
            Ok(Display::Evaluate(expr.to_string()))
        }
        None => parse_text(data, line),
    }
}

/// Literal text with `#{expr}` interpolations
pub fn parse_text(data: &str, line: usize) -> Result<Display> {
    let mut segments = Vec::new();
    let mut last = 0;

    while let Some(offset) = data[last..].find("#{") {
        let start = last + offset;
        let end = data[start..]
            .find('}')
            .map(|offset| start + offset)
            .ok_or(HamlError::UnclosedEvaluation { line })?;

        if start > last {
            segments.push(Segment::Literal(data[last..start].to_string()));
        }

        let expr = data[start + 2..end].trim();
        if expr.is_empty() {
            return Err(HamlError::EmptyEvaluation { line });
        }
        segments.push(Segment::Evaluate(expr.to_string()));

        last = end + 1;
    }

    if last < data.len() {
        segments.push(Segment::Literal(data[last..].to_string()));
    }

    Ok(Display::Text(segments))
}
