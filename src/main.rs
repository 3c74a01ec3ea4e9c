use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use yamlnub::config::{Config, OutputFormat};
use yamlnub::document::parser::parse_yaml;
use yamlnub::document::tree::Tree;
use yamlnub::file::loader::load;
use yamlnub::file::saver::{render, save_file};

/// yamlnub - query and edit YAML/JSON documents with dot-delimited paths
#[derive(Parser)]
#[command(name = "yamlnub")]
#[command(version)]
#[command(about = "Query and edit YAML/JSON documents with dot-delimited paths", long_about = None)]
struct Cli {
    /// Print documents as JSON instead of the configured format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the value at a path (exits 1 if it does not exist)
    Get {
        /// Document to read, `-` for stdin
        file: PathBuf,
        /// Path such as `spec.containers.[name:web].image`
        path: String,
    },
    /// Set the value at a path, creating missing containers
    Set {
        file: PathBuf,
        path: String,
        /// Value, decoded as YAML (`3` is a number, `'3'` a string)
        value: String,
        /// Write the result back to the file instead of printing it
        #[arg(short, long)]
        in_place: bool,
    },
    /// Insert a value at a path; the last segment is used in insert form
    Insert {
        file: PathBuf,
        path: String,
        value: String,
        #[arg(short, long)]
        in_place: bool,
    },
    /// Deep-merge another document over this one
    Merge {
        file: PathBuf,
        /// Document whose values take precedence
        other: PathBuf,
        #[arg(short, long)]
        in_place: bool,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load();
    init_tracing(&config);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output_format
    };

    match cli.command {
        Command::Get { file, path } => {
            let tree = load(&file)?;
            match tree.query(&path).context("Invalid path")? {
                Some(node) => {
                    print_tree(&Tree::new(node.clone()), format)?;
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    tracing::info!(path = %path, "path not found");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Set {
            file,
            path,
            value,
            in_place,
        } => {
            let mut tree = load(&file)?;
            let value = parse_yaml(&value).context("Invalid value")?;
            tree.mutate(&path, value)
                .with_context(|| format!("Failed to set {}", path))?;
            finish(&file, &tree, in_place, format, &config)
        }
        Command::Insert {
            file,
            path,
            value,
            in_place,
        } => {
            let mut tree = load(&file)?;
            let value = parse_yaml(&value).context("Invalid value")?;
            tree.insert(&path, value)
                .with_context(|| format!("Failed to insert at {}", path))?;
            finish(&file, &tree, in_place, format, &config)
        }
        Command::Merge {
            file,
            other,
            in_place,
        } => {
            let mut tree = load(&file)?;
            let other = load(&other)?;
            tree.merge(other.into_root());
            finish(&file, &tree, in_place, format, &config)
        }
    }
}

fn finish(
    file: &Path,
    tree: &Tree,
    in_place: bool,
    format: OutputFormat,
    config: &Config,
) -> Result<ExitCode> {
    if in_place {
        if file.as_os_str() == "-" {
            anyhow::bail!("--in-place needs a file, not stdin");
        }
        save_file(file, tree, config)
            .with_context(|| format!("Failed to save {}", file.display()))?;
    } else {
        print_tree(tree, format)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn print_tree(tree: &Tree, format: OutputFormat) -> Result<()> {
    let text = render(tree, format)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
