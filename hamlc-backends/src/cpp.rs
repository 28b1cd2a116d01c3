//! C++ output, either as a free function or as a class with a header.

use std::io::{self, Write};

use hamlc_core::Writer;

use crate::c::{parameter_list, CBody, Dialect};

const SINK: &str = "std::ostream &out";

/// The header half of the class layout
struct Header<W: Write> {
    out: W,
    file_name: String,
    declared: bool,
}

/// Writes a template as C++ printing to a `std::ostream`.
pub struct CppWriter<W: Write> {
    body: CBody<W>,
    name: String,
    header: Option<Header<W>>,
}

impl<W: Write> CppWriter<W> {
    /// A single source file with a free function named after the template
    pub fn function(name: impl Into<String>, source: W) -> Self {
        Self {
            body: CBody::new(source, Dialect::Cpp),
            name: name.into(),
            header: None,
        }
    }

    /// A header declaring a class with a static `render` method, and a
    /// source file defining it. `header_file_name` is what the source
    /// file `#include`s.
    pub fn class(
        name: impl Into<String>,
        header_file_name: impl Into<String>,
        source: W,
        header: W,
    ) -> Self {
        Self {
            body: CBody::new(source, Dialect::Cpp),
            name: name.into(),
            header: Some(Header {
                out: header,
                file_name: header_file_name.into(),
                declared: false,
            }),
        }
    }

    /// The source sink and, for the class layout, the header sink
    pub fn into_parts(self) -> (W, Option<W>) {
        (self.body.into_inner(), self.header.map(|header| header.out))
    }

    fn include_guard(&self) -> String {
        let mut guard: String = self
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        guard.push_str("_HPP");
        guard
    }
}

impl<W: Write> Writer for CppWriter<W> {
    fn start(&mut self) -> io::Result<()> {
        let guard = self.include_guard();
        match &mut self.header {
            None => self.body.line("#include <iostream>"),
            Some(header) => {
                writeln!(header.out, "#ifndef {guard}")?;
                writeln!(header.out, "#define {guard}")?;
                writeln!(header.out)?;
                writeln!(header.out, "#include <iostream>")?;
                let include = format!("#include \"{}\"", header.file_name);
                self.body.line(&include)
            }
        }
    }

    fn declare(&mut self, params: &[String]) -> io::Result<()> {
        let params = parameter_list(SINK, params);
        match &mut self.header {
            None => self
                .body
                .open_function(&format!("void {}({params})", self.name)),
            Some(header) => {
                writeln!(header.out)?;
                writeln!(header.out, "class {} {{", self.name)?;
                writeln!(header.out, "public:")?;
                writeln!(header.out, "\tstatic void render({params});")?;
                writeln!(header.out, "}};")?;
                writeln!(header.out)?;
                writeln!(header.out, "#endif")?;
                header.out.flush()?;
                header.declared = true;
                self.body
                    .open_function(&format!("void {}::render({params})", self.name))
            }
        }
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.body.write(text);
        Ok(())
    }

    fn evaluate(&mut self, expr: &str) -> io::Result<()> {
        self.body.evaluate(expr)
    }

    /// Preprocessor lines seen before the declaration belong to the header,
    /// so the parameter types they bring in are visible to the class.
    fn execute(&mut self, statement: &str) -> io::Result<()> {
        let statement = statement.trim();
        match &mut self.header {
            Some(header) if !header.declared && statement.starts_with('#') => {
                writeln!(header.out, "{statement}")
            }
            _ => self.body.execute(statement),
        }
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
