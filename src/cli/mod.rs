//! CLI command definitions and handlers

mod init;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::{style, Term};
use docdr::annotate::{AnnotationSummary, Annotator, TerminalPrompt};
use docdr::config::Settings;
use docdr::coverage::analyze_packages;
use docdr::editor::ExternalEditor;
use docdr::loader::{load_packages, PackageMap};
use docdr::reporters::{self, OutputFormat};
use docdr::writer::{SourceWriter, WriteMode};
use std::path::{Path, PathBuf};
use tracing::info;

/// docdr - documentation coverage for Go packages
#[derive(Parser, Debug)]
#[command(name = "docdr")]
#[command(
    version,
    about = "Report doc comment coverage of Go packages and add the missing comments interactively",
    after_help = "\
Examples:
  docdr run .                          Coverage per package, best first
  docdr run . --format json            JSON output for scripting
  docdr run ./src server               Annotate undocumented exported functions of package server
  docdr run ./src server --stdout      Print annotated files instead of overwriting them
  docdr missing . server               List undocumented exported functions
  docdr init                           Write a docdr.toml with example settings"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report coverage, or annotate one package when PACKAGE is given
    Run {
        /// Directory to scan recursively
        directory: PathBuf,

        /// Package to annotate (name from its `package` clause)
        package: Option<String>,

        /// Print annotated files to stdout and leave the originals untouched
        #[arg(long)]
        stdout: bool,

        /// Report format (coverage report only)
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text, conflicts_with = "package")]
        format: OutputFormat,
    },

    /// List undocumented exported functions without prompting
    Missing {
        /// Directory to scan recursively
        directory: PathBuf,

        /// Only list this package
        package: Option<String>,
    },

    /// Write a docdr.toml with example settings
    Init {
        /// Directory to initialize
        #[arg(default_value = ".")]
        directory: PathBuf,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            directory,
            package,
            stdout,
            format,
        } => match package {
            None => report(&directory, format),
            Some(name) => {
                let mode = if stdout {
                    WriteMode::Stdout
                } else {
                    WriteMode::InPlace
                };
                annotate(&directory, &name, mode)
            }
        },
        Commands::Missing { directory, package } => missing(&directory, package.as_deref()),
        Commands::Init { directory } => init::run(&directory),
    }
}

fn load(directory: &Path) -> Result<(Settings, PackageMap)> {
    let settings = Settings::load(directory);
    let packages = load_packages(directory, &settings.project)
        .with_context(|| format!("Failed to load Go sources from {}", directory.display()))?;
    Ok((settings, packages))
}

/// Print the coverage report on stdout
fn report(directory: &Path, format: OutputFormat) -> Result<()> {
    let (_, packages) = load(directory)?;
    let stats = analyze_packages(&packages);
    print!("{}", reporters::report(&stats, format)?);
    Ok(())
}

/// Walk the operator through the candidates of one package
fn annotate(directory: &Path, name: &str, mode: WriteMode) -> Result<()> {
    let (settings, mut packages) = load(directory)?;

    let Some(package) = packages.get_mut(name) else {
        info!("No package {} under {}", name, directory.display());
        return Ok(());
    };

    let mut annotator = Annotator::new(
        TerminalPrompt::stdin(),
        ExternalEditor::new(settings.editor_command()),
        SourceWriter::new(mode),
    );
    let summary = annotator.annotate_package(package)?;

    print_summary(&summary, mode)?;
    Ok(())
}

fn print_summary(summary: &AnnotationSummary, mode: WriteMode) -> Result<()> {
    let term = Term::stderr();

    if summary.visited() == 0 && !summary.quit {
        term.write_line(&format!("{} Nothing to document", style("✓").green()))?;
        return Ok(());
    }

    term.write_line(&format!(
        "\n{} {} documented, {} skipped{}",
        style("✓").green(),
        style(summary.annotated).cyan(),
        style(summary.skipped).dim(),
        if summary.quit { " (stopped early)" } else { "" }
    ))?;

    if mode == WriteMode::InPlace {
        for path in &summary.written {
            term.write_line(&format!("  {} {}", style("wrote").dim(), path.display()))?;
        }
    }
    Ok(())
}

/// Print `path:line:column<TAB>name` for every candidate
fn missing(directory: &Path, package: Option<&str>) -> Result<()> {
    let (_, packages) = load(directory)?;

    let mut names: Vec<&String> = match package {
        Some(name) => packages.keys().filter(|k| k.as_str() == name).collect(),
        None => packages.keys().collect(),
    };
    names.sort();

    if names.is_empty() {
        if let Some(name) = package {
            info!("No package {} under {}", name, directory.display());
        }
        return Ok(());
    }

    for name in names {
        for candidate in packages[name].candidates() {
            println!(
                "{}:{}\t{}",
                candidate.path.display(),
                candidate.position,
                candidate.display_name()
            );
        }
    }
    Ok(())
}
