use clap::{Parser, Subcommand};
use std::path::PathBuf;

use velotrace_cli::{ExtractionOverrides, OutputFormat};

mod commands;

use commands::{cmd_analyze, cmd_batch, cmd_extract, cmd_init};

#[derive(Parser)]
#[command(name = "velotrace")]
#[command(
    version,
    about = "Extract a representative cardiac cycle from Doppler ultrasound images",
    long_about = None
)]
struct Cli {
    /// Show per-stage debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the representative cycle from one image
    Extract {
        /// Input image
        #[arg(value_name = "IMAGE")]
        input: PathBuf,

        /// Extraction config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output file or directory
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Cycle output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Also write the raw and smoothed velocity traces as JSON
        #[arg(long, value_name = "FILE")]
        trace: Option<PathBuf>,

        /// Also write the classified trace mask as PNG
        #[arg(long, value_name = "FILE")]
        mask: Option<PathBuf>,

        /// Use only these crossings (0-based ordinals, e.g. 0,1,2)
        #[arg(long, value_name = "LIST", conflicts_with = "auto")]
        manual: Option<String>,

        /// Pick crossings automatically from the preceding negative lobes
        #[arg(long)]
        auto: bool,

        /// Keep the measured first and last cycle samples
        #[arg(long)]
        no_zero_endpoints: bool,
    },

    /// Extract cycles from many images in parallel
    Batch {
        /// Input files or directories
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,

        /// Scan directories recursively
        #[arg(short, long)]
        recursive: bool,

        /// Extraction config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,
    },

    /// Report mask coverage, crossings and outcome for one image
    Analyze {
        /// Input image
        #[arg(value_name = "IMAGE")]
        input: PathBuf,

        /// Extraction config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default extraction config
    Init {
        /// Destination (default: ~/velotrace/velotrace.yml)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            input,
            config,
            out,
            format,
            trace,
            mask,
            manual,
            auto,
            no_zero_endpoints,
        } => cmd_extract(
            input,
            config,
            out,
            format,
            trace,
            mask,
            ExtractionOverrides {
                manual,
                auto,
                no_zero_endpoints,
            },
        ),

        Commands::Batch {
            inputs,
            recursive,
            config,
            out,
            threads,
        } => cmd_batch(inputs, recursive, config, out, threads),

        Commands::Analyze {
            input,
            config,
            json,
        } => cmd_analyze(input, config, json),

        Commands::Init { output, force } => cmd_init(output, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
