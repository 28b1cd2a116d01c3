//! CLI command implementations.

pub mod compile;
pub mod list;

pub use compile::compile_files;
pub use list::list_backends;
