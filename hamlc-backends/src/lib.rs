//! # hamlc-backends
//!
//! Target language writers for hamlc.
//!
//! Each backend implements [`hamlc_core::Writer`] over any [`std::io::Write`]
//! sink. The [`registry`] maps command line identifiers to backends and
//! creates their output files.

pub mod c;
pub mod cpp;
pub mod emitter;
pub mod python;
pub mod registry;

pub use c::CWriter;
pub use cpp::CppWriter;
pub use python::PythonWriter;
pub use registry::{find, BackendError, BackendInfo, Opened, BACKENDS};
