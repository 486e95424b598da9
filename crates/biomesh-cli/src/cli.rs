use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "BioMesh Developers",
    version,
    about = "BioMesh CLI - Inspect PDB structures and partition them into occupancy octrees for volumetric meshing.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a structure and report its atoms, chains, bounding boxes and diagnostics.
    Inspect(InspectArgs),
    /// Parse a structure and subdivide the space around it into an occupancy octree.
    Partition(PartitionArgs),
}

/// Options shared by every command that reads a structure.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the input PDB file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Abort at the first undecodable atom record instead of collecting errors.
    #[arg(long)]
    pub strict: bool,

    /// Read HETATM records as atoms instead of skipping them with a warning.
    #[arg(long)]
    pub include_hetatm: bool,

    /// Element table (TOML or CSV) merged over the built-in defaults.
    #[arg(short, long, value_name = "PATH")]
    pub elements: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print every atom record in addition to the summary.
    #[arg(long)]
    pub atoms: bool,
}

/// Arguments for the `partition` subcommand.
#[derive(Args, Debug)]
pub struct PartitionArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Override the maximum subdivision depth.
    #[arg(short, long, value_name = "INT")]
    pub depth: Option<usize>,

    /// Override the minimum number of atoms a cell needs to be subdivided.
    #[arg(long, value_name = "INT")]
    pub min_atoms: Option<usize>,

    /// Override the padding (in Angstroms) added around the structure.
    #[arg(short, long, value_name = "FLOAT")]
    pub margin: Option<f64>,
}
