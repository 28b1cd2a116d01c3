//! Compile template files into source files of the selected backend.

use anyhow::{anyhow, bail, Context, Result};
use hamlc_backends::{BackendInfo, Opened};
use hamlc_core::{ErrorContext, Options};
use std::fs;
use std::path::{Path, PathBuf};

/// Compile every file, reporting failures as they happen.
///
/// Returns the number of templates that failed; one bad template does not
/// stop the others from being compiled.
pub fn compile_files(
    files: &[PathBuf],
    backend: &BackendInfo,
    directory: &Path,
    options: &Options,
) -> Result<usize> {
    fs::create_dir_all(directory).with_context(|| {
        format!(
            "Failed to create output directory {}",
            directory.display()
        )
    })?;

    let mut failures = 0;
    for file in files {
        if let Err(err) = compile_file(file, backend, directory, options) {
            eprintln!("{}: {:#}", file.display(), err);
            failures += 1;
        }
    }
    Ok(failures)
}

fn compile_file(
    path: &Path,
    backend: &BackendInfo,
    directory: &Path,
    options: &Options,
) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = template_name(path)?;

    let Opened { mut writer, paths } = backend.open(&name, directory)?;
    let result = hamlc_core::compile(&source, options, writer.as_mut());
    drop(writer);

    if let Err(err) = result {
        for created in &paths {
            if let Err(remove_err) = fs::remove_file(created) {
                tracing::warn!("Failed to remove {}: {}", created.display(), remove_err);
            }
        }
        let report = ErrorContext::new(&source, &err).to_string();
        return Err(anyhow!("{}", report.trim_end()));
    }

    tracing::info!(
        template = %path.display(),
        backend = backend.id(),
        "compiled {} into {} file(s)",
        name,
        paths.len()
    );
    Ok(())
}

/// Name of the generated function or class for a template file.
///
/// `page.haml` gives `page`; without a `.haml` suffix everything from the
/// first dot on is dropped. Characters that can't appear in an identifier
/// become underscores.
pub fn template_name(path: &Path) -> Result<String> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("{} has no usable file name", path.display()))?;

    let stem = if file_name.to_ascii_lowercase().ends_with(".haml") {
        &file_name[..file_name.len() - ".haml".len()]
    } else {
        file_name.split('.').next().unwrap_or(file_name)
    };

    let mut name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if name.is_empty() {
        bail!("cannot derive a template name from {}", path.display());
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    Ok(name)
}
