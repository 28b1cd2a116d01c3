//! Lookup of backends by the identifiers used on the command line.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use hamlc_core::Writer;
use serde::Serialize;
use thiserror::Error;

use crate::c::CWriter;
use crate::cpp::CppWriter;
use crate::python::PythonWriter;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("unknown output module `{0}`")]
    Unknown(String),

    #[error("failed to create {}: {}", .path.display(), .source)]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A writer bound to freshly created output files
pub struct Opened {
    pub writer: Box<dyn Writer>,
    /// Every file created, in creation order
    pub paths: Vec<PathBuf>,
}

type OpenFn = fn(&str, &Path) -> Result<Opened, BackendError>;

#[derive(Serialize)]
pub struct BackendInfo {
    /// Identifiers accepted by [`find`]; the first one is canonical
    pub ids: &'static [&'static str],
    pub name: &'static str,
    /// Extensions of the files the backend creates
    pub extensions: &'static [&'static str],
    #[serde(skip)]
    open: OpenFn,
}

impl BackendInfo {
    pub fn id(&self) -> &'static str {
        self.ids[0]
    }

    /// Create `name.<ext>` files in `dir` and a writer targeting them
    pub fn open(&self, name: &str, dir: &Path) -> Result<Opened, BackendError> {
        let opened = (self.open)(name, dir)?;
        tracing::debug!(backend = self.id(), paths = ?opened.paths, "opened output files");
        Ok(opened)
    }
}

pub static BACKENDS: &[BackendInfo] = &[
    BackendInfo {
        ids: &["cpp", "cpp-class"],
        name: "C++ using a class",
        extensions: &["hpp", "cpp"],
        open: open_cpp_class,
    },
    BackendInfo {
        ids: &["cpp-fun"],
        name: "C++ using a function",
        extensions: &["cpp"],
        open: open_cpp_function,
    },
    BackendInfo {
        ids: &["c"],
        name: "C using functions",
        extensions: &["c"],
        open: open_c,
    },
    BackendInfo {
        ids: &["python", "py"],
        name: "Python using functions",
        extensions: &["py"],
        open: open_python,
    },
];

pub fn find(id: &str) -> Result<&'static BackendInfo, BackendError> {
    BACKENDS
        .iter()
        .find(|backend| backend.ids.iter().any(|known| *known == id))
        .ok_or_else(|| BackendError::Unknown(id.to_string()))
}

fn create(
    dir: &Path,
    file_name: &str,
    paths: &mut Vec<PathBuf>,
) -> Result<BufWriter<File>, BackendError> {
    let path = dir.join(file_name);
    match File::create(&path) {
        Ok(file) => {
            paths.push(path);
            Ok(BufWriter::new(file))
        }
        Err(source) => {
            for created in paths.drain(..) {
                let _ = fs::remove_file(created);
            }
            Err(BackendError::Create { path, source })
        }
    }
}

fn open_cpp_class(name: &str, dir: &Path) -> Result<Opened, BackendError> {
    let mut paths = Vec::new();
    let header_name = format!("{name}.hpp");
    let header = create(dir, &header_name, &mut paths)?;
    let source = create(dir, &format!("{name}.cpp"), &mut paths)?;
    Ok(Opened {
        writer: Box::new(CppWriter::class(name, header_name, source, header)),
        paths,
    })
}

fn open_cpp_function(name: &str, dir: &Path) -> Result<Opened, BackendError> {
    let mut paths = Vec::new();
    let source = create(dir, &format!("{name}.cpp"), &mut paths)?;
    Ok(Opened {
        writer: Box::new(CppWriter::function(name, source)),
        paths,
    })
}

fn open_c(name: &str, dir: &Path) -> Result<Opened, BackendError> {
    let mut paths = Vec::new();
    let source = create(dir, &format!("{name}.c"), &mut paths)?;
    Ok(Opened {
        writer: Box::new(CWriter::new(name, source)),
        paths,
    })
}

fn open_python(name: &str, dir: &Path) -> Result<Opened, BackendError> {
    let mut paths = Vec::new();
    let source = create(dir, &format!("{name}.py"), &mut paths)?;
    Ok(Opened {
        writer: Box::new(PythonWriter::new(name, source)),
        paths,
    })
}
