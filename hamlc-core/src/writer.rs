//! The contract between the render pass and the target language backends.

use std::io;

/// A target language backend.
///
/// The render pass drives a writer with one call per template construct.
/// Literal text passed to [`Writer::write`] is buffered and coalesced;
/// every other call flushes the buffer first, so consecutive literal
/// fragments end up in a single output statement.
pub trait Writer {
    /// Begin the generated source
    fn start(&mut self) -> io::Result<()>;

    /// Open the generated callable with the given raw parameter texts
    fn declare(&mut self, params: &[String]) -> io::Result<()>;

    /// Buffer literal output text
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Output the value of an expression. Constant expressions recognized by
    /// [`crate::literal::classify`] are folded into the literal buffer.
    fn evaluate(&mut self, expr: &str) -> io::Result<()>;

    /// Emit a statement verbatim
    fn execute(&mut self, statement: &str) -> io::Result<()>;

    /// Emit a statement opening a nested block
    fn block_exec(&mut self, statement: &str) -> io::Result<()>;

    /// Close the innermost block opened by [`Writer::block_exec`]
    fn close_block(&mut self) -> io::Result<()>;

    /// Emit a comment in the target language
    fn comment(&mut self, text: &str) -> io::Result<()>;

    /// Flush everything and close the callable
    fn finish(&mut self) -> io::Result<()>;
}
