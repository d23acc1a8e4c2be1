//! ovfkit CLI — inspect, convert, and validate OVF/OMF vector-field files

mod convert;
mod info;
mod validate;

use clap::{Parser, Subcommand, ValueEnum};
use ovf_core::DataFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ovfkit")]
#[command(author, version, about = "Inspect and convert OVF/OMF vector-field files")]
#[command(
    long_about = "ovfkit reads and writes the OOMMF vector-field formats (OVF 1.0/2.0) \
                  in Text, Binary 4, and Binary 8 encodings, tolerating the quirks real \
                  simulator output exhibits."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show header and value-range information for a file
    Info {
        /// Vector-field file (.omf, .ovf)
        file: PathBuf,

        /// Emit machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Re-encode a file in a different data format
    Convert {
        /// Input vector-field file
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Target data encoding
        #[arg(long, value_enum, default_value_t = Encoding::Binary8)]
        format: Encoding,
    },

    /// Decode files and report anything suspicious
    Validate {
        /// Vector-field files to check
        files: Vec<PathBuf>,
    },
}

/// CLI-facing names for the data encodings.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Encoding {
    Text,
    Binary4,
    Binary8,
}

impl From<Encoding> for DataFormat {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Text => DataFormat::Ascii,
            Encoding::Binary4 => DataFormat::Binary4,
            Encoding::Binary8 => DataFormat::Binary8,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file, json } => info::run(&file, json),
        Commands::Convert {
            input,
            output,
            format,
        } => convert::run(&input, &output, format.into()),
        Commands::Validate { files } => validate::run(&files),
    }
}
