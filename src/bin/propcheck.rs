//! propcheck - Property assertions on JSON/YAML documents
//!
//! Loads a document as the tree of a fresh world and runs one property
//! operation or assertion against it.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use property_steps::value;
use property_steps::{ChecksumAlgorithm, ChecksumOptions, CompareMode, World};

#[derive(Debug, Parser)]
#[command(name = "propcheck", version, about = "Property assertions on JSON/YAML documents")]
struct Cli {
    /// Document to load as the world tree (.json, otherwise YAML)
    #[arg(short, long)]
    file: PathBuf,

    /// Directory for `file` values (defaults to the document's directory)
    #[arg(short, long)]
    base_dir: Option<PathBuf>,

    /// Digest used to compare binary and file values
    #[arg(long, value_enum, default_value_t = Algorithm::Md5)]
    checksum: Algorithm,

    /// Output location. Use '-' for stdout
    #[arg(short, long, default_value = "-")]
    output: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Md5,
    Sha256,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the value of a property as JSON
    Get { property: String },
    /// Compare a property with a `type value` string
    Check {
        property: String,
        /// `equals` or `not-equals`
        mode: String,
        /// Expected value, e.g. `string admin` or `number-array 1,2`
        #[arg(num_args = 1.., required = true)]
        value: Vec<String>,
    },
    /// Check the type tag of a property (`array` checks for a list)
    Type { property: String, tag: String },
    /// Check the element count of a list property
    Length { property: String, count: usize },
    /// Check that a property does not exist
    Absent { property: String },
    /// Set a property to a `type value` string and print the document
    Set {
        property: String,
        #[arg(num_args = 1.., required = true)]
        value: Vec<String>,
    },
    /// Remove a property and print the document
    Remove { property: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let root = load_document(&cli.file)?;
    let base_dir = cli.base_dir.clone().unwrap_or_else(|| {
        cli.file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });
    let algorithm = match cli.checksum {
        Algorithm::Md5 => ChecksumAlgorithm::Md5,
        Algorithm::Sha256 => ChecksumAlgorithm::Sha256,
    };

    let mut world = World::builder()
        .root(root)
        .base_dir(base_dir)
        .checksum(ChecksumOptions {
            algorithm,
            ..Default::default()
        })
        .build();

    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout())
    } else {
        let file = fs::File::create(&cli.output)
            .map_err(|e| format!("Failed to create output file {:?}: {}", cli.output, e))?;
        Box::new(file)
    };

    match cli.command {
        Command::Get { property } => {
            let found = world
                .get_property(&property)
                .ok_or_else(|| format!("property {} does not exist", property))?;
            writeln!(output, "{}", value::to_json_pretty(found)?)?;
        }
        Command::Check {
            property,
            mode,
            value,
        } => {
            let mode: CompareMode = mode.parse()?;
            world.check_property(&property, mode, &value.join(" "))?;
            writeln!(output, "ok")?;
        }
        Command::Type { property, tag } => {
            world.check_type(&property, &tag)?;
            writeln!(output, "ok")?;
        }
        Command::Length { property, count } => {
            world.check_length(&property, count)?;
            writeln!(output, "ok")?;
        }
        Command::Absent { property } => {
            world.check_not_exists(&property)?;
            writeln!(output, "ok")?;
        }
        Command::Set { property, value } => {
            world.set_property_from_string(&property, &value.join(" "))?;
            write_document(&cli.file, world.root(), &mut output)?;
        }
        Command::Remove { property } => {
            world.remove_property(&property);
            write_document(&cli.file, world.root(), &mut output)?;
        }
    }

    Ok(())
}

fn is_json(file: &Path) -> bool {
    file.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn load_document(file: &Path) -> Result<value::Value, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(file)
        .map_err(|e| format!("Failed to read file {:?}: {}", file, e))?;
    let root = if is_json(file) {
        value::from_json(&content)?
    } else {
        value::from_yaml(&content)?
    };
    Ok(root)
}

fn write_document(
    file: &Path,
    root: &value::Value,
    output: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    if is_json(file) {
        writeln!(output, "{}", value::to_json_pretty(root)?)?;
    } else {
        write!(output, "{}", value::to_yaml(root)?)?;
    }
    Ok(())
}
