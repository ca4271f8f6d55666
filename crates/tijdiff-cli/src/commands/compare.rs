use std::path::PathBuf;
use tijdiff_core::config::{self, ReportOptions};
use tijdiff_core::error::TijError;
use tijdiff_core::extraction::FileDocument;
use tracing::info;

use crate::{output, Backend};

pub struct CompareArgs {
    pub first: PathBuf,
    pub second: PathBuf,
    pub output_format: String,
    /// Where the PDF report goes; None skips writing it.
    pub out_dir: Option<PathBuf>,
    pub chart: Option<PathBuf>,
    pub backend: Backend,
    pub layout: bool,
    pub config: Option<PathBuf>,
}

pub fn run(args: CompareArgs) -> Result<(), TijError> {
    let options = match &args.config {
        Some(path) => config::load_options(path)?,
        None => ReportOptions::default(),
    };

    let extractor = super::extractor(args.backend, args.layout)?;
    let first = FileDocument::new(&args.first);
    let second = FileDocument::new(&args.second);

    let outcome = tijdiff_core::compare_documents(&first, &second, extractor.as_ref(), &options)?;

    match args.output_format.as_str() {
        "json" => output::json::print_comparison(&outcome.table, &outcome.report)?,
        _ => output::table::print(&outcome.table, &outcome.report),
    }

    if let Some(path) = &args.chart {
        std::fs::write(path, &outcome.chart.png)?;
        info!(path = %path.display(), "wrote chart");
    }

    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&outcome.report.file_name);
        std::fs::write(&path, &outcome.report.pdf)?;
        eprintln!("Report written to {}", path.display());
    }

    Ok(())
}
