pub mod compare;
pub mod parse;

use crate::Backend;
use tijdiff_core::error::TijError;
use tijdiff_core::extraction::native::LopdfExtractor;
use tijdiff_core::extraction::pdftotext::PdftotextExtractor;
use tijdiff_core::extraction::PdfExtractor;

/// Build the selected backend, failing early if pdftotext is missing or
/// `--layout` is combined with a backend that has no layout mode.
pub fn extractor(backend: Backend, layout: bool) -> Result<Box<dyn PdfExtractor>, TijError> {
    match backend {
        Backend::Lopdf if layout => Err(TijError::ConfigInvalid(
            "--layout only applies to --backend pdftotext".into(),
        )),
        Backend::Lopdf => Ok(Box::new(LopdfExtractor::new())),
        Backend::Pdftotext => {
            if !PdftotextExtractor::is_available() {
                return Err(TijError::PdftotextNotFound);
            }
            Ok(Box::new(PdftotextExtractor::new().with_layout(layout)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lopdf_backend() {
        let extractor = extractor(Backend::Lopdf, false).unwrap();
        assert_eq!(extractor.backend_name(), "lopdf");
    }

    #[test]
    fn test_layout_rejected_for_lopdf() {
        let result = extractor(Backend::Lopdf, true);
        assert!(matches!(result, Err(TijError::ConfigInvalid(_))));
    }

    #[test]
    fn test_pdftotext_backend_matches_availability() {
        let result = extractor(Backend::Pdftotext, true);
        if PdftotextExtractor::is_available() {
            assert_eq!(result.unwrap().backend_name(), "pdftotext");
        } else {
            assert!(matches!(result, Err(TijError::PdftotextNotFound)));
        }
    }
}
