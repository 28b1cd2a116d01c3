//! C output, and the statement layer shared with the C++ backend.

use std::io::{self, Write};

use hamlc_core::{classify, Writer};

use crate::emitter::{escape_c, SourceEmitter};

/// How a C-like language prints to the `out` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dialect {
    C,
    Cpp,
}

impl Dialect {
    fn print_literal(self, escaped: &str) -> String {
        match self {
            Dialect::C => format!("fputs(\"{escaped}\", out)"),
            Dialect::Cpp => format!("out << \"{escaped}\""),
        }
    }

    fn print_expr(self, expr: &str) -> String {
        match self {
            Dialect::C => format!("fputs({expr}, out)"),
            Dialect::Cpp => format!("out << ({expr})"),
        }
    }
}

/// Function bodies in C syntax: tab indentation, braces, semicolons.
pub(crate) struct CBody<W: Write> {
    emitter: SourceEmitter<W>,
    dialect: Dialect,
}

impl<W: Write> CBody<W> {
    pub(crate) fn new(out: W, dialect: Dialect) -> Self {
        Self {
            emitter: SourceEmitter::new(out, "\t"),
            dialect,
        }
    }

    pub(crate) fn line(&mut self, text: &str) -> io::Result<()> {
        self.emitter.line(text)
    }

    fn flush_literal(&mut self) -> io::Result<()> {
        if let Some(escaped) = self.emitter.take_literal() {
            let statement = self.dialect.print_literal(&escaped);
            self.statement(&statement)?;
        }
        Ok(())
    }

    /// Preprocessor lines go out unindented and without a semicolon
    fn statement(&mut self, statement: &str) -> io::Result<()> {
        let statement = statement.trim();
        if statement.starts_with('#') {
            self.emitter.raw_line(statement)
        } else {
            self.emitter.line(&format!("{statement};"))
        }
    }

    pub(crate) fn open_function(&mut self, signature: &str) -> io::Result<()> {
        self.flush_literal()?;
        self.emitter.blank_line()?;
        self.emitter.line(&format!("{signature} {{"))?;
        self.emitter.indent();
        Ok(())
    }

    pub(crate) fn close_function(&mut self) -> io::Result<()> {
        self.flush_literal()?;
        self.emitter.dedent();
        self.emitter.line("}")?;
        self.emitter.flush()
    }

    pub(crate) fn write(&mut self, text: &str) {
        self.emitter.push_literal(&escape_c(text));
    }

    pub(crate) fn evaluate(&mut self, expr: &str) -> io::Result<()> {
        match classify(expr) {
            Some(literal) => {
                self.emitter.push_literal(literal);
                Ok(())
            }
            None => {
                self.flush_literal()?;
                let statement = self.dialect.print_expr(expr);
                self.statement(&statement)
            }
        }
    }

    pub(crate) fn execute(&mut self, statement: &str) -> io::Result<()> {
        self.flush_literal()?;
        self.statement(statement)
    }

    pub(crate) fn block_exec(&mut self, statement: &str) -> io::Result<()> {
        self.flush_literal()?;
        self.emitter.line(&format!("{} {{", statement.trim()))?;
        self.emitter.indent();
        Ok(())
    }

    pub(crate) fn close_block(&mut self) -> io::Result<()> {
        self.flush_literal()?;
        self.emitter.dedent();
        self.emitter.line("}")
    }

    pub(crate) fn comment(&mut self, text: &str) -> io::Result<()> {
        self.flush_literal()?;
        self.emitter.line(&format!("// {text}"))
    }

    pub(crate) fn into_inner(self) -> W {
        self.emitter.into_inner()
    }
}

/// Parameter list with the output sink first
pub(crate) fn parameter_list(sink: &str, params: &[String]) -> String {
    std::iter::once(sink)
        .chain(params.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Writes a template as a C function taking a `FILE *`.
pub struct CWriter<W: Write> {
    body: CBody<W>,
    name: String,
}

impl<W: Write> CWriter<W> {
    pub fn new(name: impl Into<String>, out: W) -> Self {
        Self {
            body: CBody::new(out, Dialect::C),
            name: name.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.body.into_inner()
    }
}

impl<W: Write> Writer for CWriter<W> {
    fn start(&mut self) -> io::Result<()> {
        self.body.line("#include <stdio.h>")
    }

    fn declare(&mut self, params: &[String]) -> io::Result<()> {
        let signature = format!(
            "void {}({})",
            self.name,
            parameter_list("FILE *out", params)
        );
        self.body.open_function(&signature)
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.body.write(text);
        Ok(())
    }

    fn evaluate(&mut self, expr: &str) -> io::Result<()> {
        self.body.evaluate(expr)
    }

    fn execute(&mut self, statement: &str) -> io::Result<()> {
        self.body.execute(statement)
    }

    fn block_exec(&mut self, statement: &str) -> io::Result<()> {
        self.body.block_exec(statement)
    }

    fn close_block(&mut self) -> io::Result<()> {
        self.body.close_block()
    }

    fn comment(&mut self, text: &str) -> io::Result<()> {
        self.body.comment(text)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.body.close_function()
    }
}
