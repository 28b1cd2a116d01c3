//! Python output: a module-level function writing to a file-like object.

use std::io::{self, Write};

use hamlc_core::{classify, Writer};

use crate::emitter::SourceEmitter;

/// Escape text for a double-quoted Python string literal body
pub fn escape_python(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\x{:02x}", c as u32)),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub struct PythonWriter<W: Write> {
    emitter: SourceEmitter<W>,
    name: String,
    /// Whether each open suite has a statement yet; an empty one gets `pass`
    suites: Vec<bool>,
}

impl<W: Write> PythonWriter<W> {
    pub fn new(name: impl Into<String>, out: W) -> Self {
        Self {
            emitter: SourceEmitter::new(out, "    "),
            name: name.into(),
            suites: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.emitter.into_inner()
    }

    fn statement(&mut self, statement: &str) -> io::Result<()> {
        if let Some(filled) = self.suites.last_mut() {
            *filled = true;
        }
        self.emitter.line(statement)
    }

    fn flush_literal(&mut self) -> io::Result<()> {
        if let Some(escaped) = self.emitter.take_literal() {
            self.statement(&format!("out.write(\"{escaped}\")"))?;
        }
        Ok(())
    }

    fn open_suite(&mut self, header: &str) -> io::Result<()> {
        self.statement(header)?;
        self.emitter.indent();
        self.suites.push(false);
        Ok(())
    }

    fn close_suite(&mut self) -> io::Result<()> {
        self.flush_literal()?;
        if self.suites.pop() == Some(false) {
            self.emitter.line("pass")?;
        }
        self.emitter.dedent();
        Ok(())
    }
}

impl<W: Write> Writer for PythonWriter<W> {
    fn start(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn declare(&mut self, params: &[String]) -> io::Result<()> {
        self.flush_literal()?;
        if self.emitter.lines_written() > 0 {
            self.emitter.blank_line()?;
        }
        let params = std::iter::once("out")
            .chain(params.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ");
        self.open_suite(&format!("def {}({params}):", self.name))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.emitter.push_literal(&escape_python(text));
        Ok(())
    }

    fn evaluate(&mut self, expr: &str) -> io::Result<()> {
        match classify(expr) {
            Some(literal) => {
                self.emitter.push_literal(literal);
                Ok(())
            }
            None => {
                self.flush_literal()?;
                self.statement(&format!("out.write(str({expr}))"))
            }
        }
    }

    fn execute(&mut self, statement: &str) -> io::Result<()> {
        self.flush_literal()?;
        self.statement(statement.trim())
    }

    fn block_exec(&mut self, statement: &str) -> io::Result<()> {
        self.flush_literal()?;
        let header = statement.trim().trim_end_matches(':');
        self.open_suite(&format!("{header}:"))
    }

    fn close_block(&mut self) -> io::Result<()> {
        self.close_suite()
    }

    fn comment(&mut self, text: &str) -> io::Result<()> {
        self.flush_literal()?;
        self.emitter.line(&format!("# {text}"))
    }

    fn finish(&mut self) -> io::Result<()> {
        self.close_suite()?;
        self.emitter.flush()
    }
}
