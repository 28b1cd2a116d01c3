//! # hamlc CLI
//!
//! Command-line front end that compiles templates into C, C++ or Python.

mod commands;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use hamlc_core::{Format, Options};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hamlc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Template files to compile
    #[arg(required_unless_present = "list")]
    files: Vec<PathBuf>,

    /// Output module (language), see --list
    #[arg(short, long, value_name = "MODULE", default_value = "cpp")]
    output: String,

    /// Directory for the generated files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    directory: PathBuf,

    /// Make the output more readable for debugging
    #[arg(short, long)]
    readable: bool,

    /// List available output modules
    #[arg(short, long)]
    list: bool,

    /// Print the module list as JSON
    #[arg(long, requires = "list")]
    json: bool,

    /// YAML file with compile options; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Don't indent the generated HTML
    #[arg(long)]
    no_indent: bool,

    /// Require two-space indentation instead of detecting it
    #[arg(long)]
    fixed_indent: bool,

    /// Doctype table used by `!!!`
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Xhtml,
    Html4,
}

impl From<FormatArg> for Format {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Xhtml => Format::Xhtml,
            FormatArg::Html4 => Format::Html4,
        }
    }
}

impl Cli {
    fn options(&self) -> anyhow::Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::from_file(path)
                .with_context(|| format!("Failed to load options from {}", path.display()))?,
            None => Options::default(),
        };

        if self.readable {
            options.debug = true;
        }
        if self.no_indent {
            options.indent = false;
        }
        if self.fixed_indent {
            options.auto_indent = false;
        }
        if let Some(format) = self.format {
            options.format = format.into();
        }
        Ok(options)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.list {
        return commands::list_backends(cli.json);
    }

    let options = cli.options()?;
    let backend = hamlc_backends::find(&cli.output)?;
    tracing::debug!(?options, backend = backend.id(), "compiling {} file(s)", cli.files.len());

    let failures = commands::compile_files(&cli.files, backend, &cli.directory, &options)?;
    if failures > 0 {
        bail!("{} of {} templates failed to compile", failures, cli.files.len());
    }
    Ok(())
}
