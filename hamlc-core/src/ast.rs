//! The document tree produced by the parser.
//!
//! The tree is immutable once built and holds no writer state, so one
//! [`Document`] can be rendered against any number of backends.

use indexmap::IndexMap;

/// Root of a parsed template
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Whether the template declared its parameters with `?`
    pub manual_declaration: bool,
    pub children: Vec<Node>,
}

/// One template line and the lines nested below it
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// 1-based source line
    pub line: usize,
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// `? params` fixing the generated callable's parameters
    Declaration(Vec<String>),
    Tag(Tag),
    /// A plain text or `=` evaluation line
    DirectDisplay(Display),
    /// A `\` line, displayed with the marker removed
    Escape(Display),
    /// `/ text`, rendered as an HTML comment
    Comment(String),
    /// `- statement`
    Execution(String),
    /// `-# text`, only visible as a comment in debug output
    SilentComment(String),
    /// `!!!`, already resolved to its literal
    Doctype(String),
}

impl NodeKind {
    /// Whether lines may be nested below this node
    pub fn accepts_children(&self) -> bool {
        match self {
            NodeKind::Declaration(_)
            | NodeKind::DirectDisplay(_)
            | NodeKind::Escape(_)
            | NodeKind::Doctype(_) => false,
            NodeKind::Tag(tag) => tag.content.is_none(),
            NodeKind::Comment(text) => text.is_empty(),
            NodeKind::Execution(_) | NodeKind::SilentComment(_) => true,
        }
    }
}

/// An HTML element
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
    pub attributes: Attributes,
    /// Content on the same line as the tag
    pub content: Option<Display>,
}

/// Attribute key expressions mapped to their value expressions, in order of
/// first use
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes(IndexMap<String, Vec<String>>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, accumulating on repeated keys
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Displayed text
#[derive(Debug, Clone, PartialEq)]
pub enum Display {
    /// `= expr`: the whole line is one expression
    Evaluate(String),
    /// Literal text with `#{expr}` interpolations
    Text(Vec<Segment>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Evaluate(String),
}
