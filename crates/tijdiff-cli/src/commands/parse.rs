use std::path::PathBuf;
use tijdiff_core::error::TijError;
use tijdiff_core::extraction::FileDocument;

use crate::{output, Backend};

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    backend: Backend,
    layout: bool,
) -> Result<(), TijError> {
    let extractor = super::extractor(backend, layout)?;
    let source = FileDocument::new(&pdf_file);
    let data = tijdiff_core::analyze_document(&source, extractor.as_ref())?;

    match output_format {
        "json" => output::json::print(&data)?,
        _ => println!("{}", output::table::format_document(&data)),
    }

    Ok(())
}
