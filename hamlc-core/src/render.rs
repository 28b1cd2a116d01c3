//! Walks a document tree and drives a [`Writer`].

use crate::ast::{Display, Document, Node, NodeKind, Segment, Tag};
use crate::error::{HamlError, Result};
use crate::options::Options;
use crate::writer::Writer;

/// HTML indentation per nesting level
const HTML_INDENT: &str = "  ";

/// One render pass of a document against a writer
pub struct Renderer<'a> {
    writer: &'a mut dyn Writer,
    options: &'a Options,
}

impl<'a> Renderer<'a> {
    pub fn new(writer: &'a mut dyn Writer, options: &'a Options) -> Self {
        Self { writer, options }
    }

    /// Render the whole document.
    ///
    /// Without a `?` line the callable is declared with no parameters. The
    /// comment saying so is a trace comment and, like the per-line ones,
    /// is only written in debug mode.
    pub fn render(&mut self, document: &Document) -> Result<()> {
        self.writer.start()?;

        if !document.manual_declaration {
            if self.options.debug {
                self.writer
                    .comment("no `?` declaration found, declaring without parameters")?;
            }
            self.writer.declare(&[])?;
        }

        self.render_children(&document.children, 0)?;

        self.writer.finish()?;
        Ok(())
    }

    fn render_children(&mut self, children: &[Node], depth: usize) -> Result<()> {
        for child in children {
            if self.options.debug {
                self.writer
                    .comment(&format!(">> entering template line {}", child.line))?;
            }

            self.render_node(child, depth)?;

            if self.options.debug {
                self.writer
                    .comment(&format!("<< leaving template line {}", child.line))?;
            }
        }
        Ok(())
    }

    fn render_node(&mut self, node: &Node, depth: usize) -> Result<()> {
        match &node.kind {
            NodeKind::Declaration(params) => self.writer.declare(params)?,
            NodeKind::Tag(tag) => self.render_tag(node, tag, depth)?,
            NodeKind::DirectDisplay(display) | NodeKind::Escape(display) => {
                self.write_indent(depth)?;
                self.render_display(display)?;
                self.writer.write("\n")?;
            }
            NodeKind::Comment(text) => {
                self.write_indent(depth)?;
                self.writer.write("<!--")?;
                if node.children.is_empty() {
                    self.writer.write(" ")?;
                    self.writer.write(text)?;
                    self.writer.write(" ")?;
                } else {
                    if !text.is_empty() {
                        return Err(HamlError::IllegalChildren { line: node.line });
                    }
                    self.writer.write("\n")?;
                    self.render_children(&node.children, depth + 1)?;
                    self.write_indent(depth)?;
                }
                self.writer.write("-->\n")?;
            }
            NodeKind::Execution(statement) => {
                if node.children.is_empty() {
                    self.writer.execute(statement)?;
                } else {
                    self.writer.block_exec(statement)?;
                    self.render_children(&node.children, depth)?;
                    self.writer.close_block()?;
                }
            }
            NodeKind::SilentComment(text) => {
                if self.options.debug {
                    self.writer.comment(text)?;
                }
            }
            NodeKind::Doctype(literal) => {
                if depth > 0 {
                    return Err(HamlError::DoctypeNotTopLevel { line: node.line });
                }
                self.writer.write(literal)?;
                self.writer.write("\n")?;
            }
        }
        Ok(())
    }

    fn render_tag(&mut self, node: &Node, tag: &Tag, depth: usize) -> Result<()> {
        self.write_indent(depth)?;
        self.writer.write("<")?;
        self.writer.write(&tag.name)?;

        for (key, values) in tag.attributes.iter() {
            self.writer.write(" ")?;
            self.writer.evaluate(key)?;
            self.writer.write("=\"")?;
            for (index, value) in values.iter().enumerate() {
                if index > 0 {
                    self.writer.write(" ")?;
                }
                self.writer.evaluate(value)?;
            }
            self.writer.write("\"")?;
        }

        match (&tag.content, node.children.is_empty()) {
            (None, true) => self.writer.write(" />\n")?,
            (None, false) => {
                self.writer.write(">\n")?;
                self.render_children(&node.children, depth + 1)?;
                self.write_indent(depth)?;
                self.write_close_tag(&tag.name)?;
            }
            (Some(content), true) => {
                self.writer.write(">")?;
                self.render_display(content)?;
                self.write_close_tag(&tag.name)?;
            }
            (Some(_), false) => return Err(HamlError::IllegalChildren { line: node.line }),
        }
        Ok(())
    }

    fn write_close_tag(&mut self, name: &str) -> Result<()> {
        self.writer.write("</")?;
        self.writer.write(name)?;
        self.writer.write(">\n")?;
        Ok(())
    }

    fn render_display(&mut self, display: &Display) -> Result<()> {
        match display {
            Display::Evaluate(expr) => self.writer.evaluate(expr)?,
            Display::Text(segments) => {
                for segment in segments {
                    match segment {
                        Segment::Literal(text) => self.writer.write(text)?,
                        Segment::Evaluate(expr) => self.writer.evaluate(expr)?,
                    }
                }
            }
        }
        Ok(())
    }

    fn write_indent(&mut self, depth: usize) -> Result<()> {
        if self.options.indent && depth > 0 {
            self.writer.write(&HTML_INDENT.repeat(depth))?;
        }
        Ok(())
    }
}

impl Document {
    /// Render this document once against `writer`
    pub fn render(&self, writer: &mut dyn Writer, options: &Options) -> Result<()> {
        Renderer::new(writer, options).render(self)
    }
}
