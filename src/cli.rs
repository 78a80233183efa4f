use std::fmt::Display;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::request::{OutputFormat, DEFAULT_OUTDIR};

#[derive(Parser, Debug)]
#[command(name = "palletqr")]
#[command(about = "Generate sequential QR codes from pallet_id, item_id, name and cantidad", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Pallet ID
    #[arg(long)]
    pub pallet_id: Option<String>,

    /// Item ID
    #[arg(long)]
    pub item_id: Option<String>,

    /// Human-readable item name
    #[arg(long)]
    pub name: Option<String>,

    /// Number of QR codes to generate
    #[arg(long, allow_negative_numbers = true)]
    pub cantidad: Option<i64>,

    /// Output directory
    #[arg(long, default_value = DEFAULT_OUTDIR)]
    pub outdir: PathBuf,

    /// Image format for each label
    #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// JSON file with pallet_id, item_id, name, cantidad (and optional outdir).
    /// When given, the other generation flags are ignored.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print every generated code to the terminal
    #[arg(long)]
    pub preview: bool,
}

impl Cli {
    /// A usage error for missing generation flags, printed and exited the way
    /// clap reports its own parse errors (status 2).
    pub fn missing_arguments_error(message: impl Display) -> clap::Error {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::MissingRequiredArgument, message)
    }
}
