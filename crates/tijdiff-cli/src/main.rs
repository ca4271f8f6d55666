mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tijdiff",
    version,
    about = "Compare the Final Totals of two Tij reports"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Text extraction backend.
#[derive(Clone, Copy, ValueEnum)]
pub enum Backend {
    /// Pure-Rust extraction with lopdf
    Lopdf,
    /// poppler's pdftotext
    Pdftotext,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two reports and write the PDF summary report
    Compare {
        /// Report for the first (earlier) period
        first: PathBuf,

        /// Report for the second (later) period
        second: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Directory the PDF report is written to
        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,

        /// Do not write the PDF report
        #[arg(long)]
        no_report: bool,

        /// Also write the chart as PNG
        #[arg(long, value_name = "FILE")]
        chart: Option<PathBuf>,

        /// Text extraction backend
        #[arg(short, long, value_enum, default_value = "lopdf")]
        backend: Backend,

        /// Run pdftotext in -layout mode (needs --backend pdftotext)
        #[arg(long)]
        layout: bool,

        /// JSON file with report options
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Show the period label and Final Totals of a single report
    Parse {
        /// Path to PDF file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Text extraction backend
        #[arg(short, long, value_enum, default_value = "lopdf")]
        backend: Backend,

        /// Run pdftotext in -layout mode (needs --backend pdftotext)
        #[arg(long)]
        layout: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Compare {
            first,
            second,
            output,
            out_dir,
            no_report,
            chart,
            backend,
            layout,
            config,
        } => commands::compare::run(commands::compare::CompareArgs {
            first,
            second,
            output_format: output,
            out_dir: (!no_report).then_some(out_dir),
            chart,
            backend,
            layout,
            config,
        }),
        Commands::Parse {
            input_file,
            output,
            backend,
            layout,
        } => commands::parse::run(input_file, &output, backend, layout),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
