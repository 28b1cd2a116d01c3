//! # hamlc-core
//!
//! Front end of the hamlc template compiler. Templates are written in an
//! indentation based, Haml-like markup and compiled ahead of time into
//! source code of a host language; running that code prints the HTML.
//!
//! ## Example
//!
//! ```ignore
//! ? const char *title
//! !!! 5
//! %html
//!   %head
//!     %title= title
//!   %body
//!     %h1.title Hello #{title}!
//!     - for (int i = 0; i < 3; ++i)
//!       %p(class="item")= i
//! ```
//!
//! Source text goes through the [`lines::LineSplitter`] into the
//! [`parser::Parser`], which builds an immutable [`Document`]. The document
//! is then rendered against any [`Writer`] backend.

pub mod ast;
pub mod doctype;
pub mod error;
pub mod lines;
pub mod literal;
pub mod options;
pub mod parser;
pub mod render;
pub mod scanner;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export key types
pub use ast::{Attributes, Display, Document, Node, NodeKind, Segment, Tag};
pub use error::{ErrorContext, HamlError, Result};
pub use literal::classify;
pub use options::{ConfigError, Format, Options};
pub use parser::{parse, Parser};
pub use render::Renderer;
pub use writer::Writer;

/// Parse `source` and render it against `writer` in one go
pub fn compile(source: &str, options: &Options, writer: &mut dyn Writer) -> Result<()> {
    let document = parse(source, options)?;
    document.render(writer, options)
}
