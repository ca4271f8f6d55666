use crate::error::TijError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the rendered report.
///
/// Tij and Yksb 1 are always reported in thousands; that is not an option.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportOptions {
    /// Chart raster width in pixels.
    pub chart_width: u32,
    /// Chart raster height in pixels.
    pub chart_height: u32,
    /// RGB color of the first period's bars.
    pub first_color: [u8; 3],
    /// RGB color of the second period's bars.
    pub second_color: [u8; 3],
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            chart_width: 800,
            chart_height: 500,
            first_color: [0, 0, 255],
            second_color: [255, 0, 0],
        }
    }
}

/// Load report options from a JSON file.
pub fn load_options(path: &Path) -> Result<ReportOptions, TijError> {
    let content = std::fs::read_to_string(path).map_err(|e| TijError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let options: ReportOptions =
        serde_json::from_str(&content).map_err(|e| TijError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_options(&options)?;
    Ok(options)
}

/// Parse report options from a JSON string (no file path context).
pub fn parse_options_str(json: &str) -> Result<ReportOptions, TijError> {
    let options: ReportOptions = serde_json::from_str(json)?;
    validate_options(&options)?;
    Ok(options)
}

/// Validate that options describe a drawable chart.
pub fn validate_options(options: &ReportOptions) -> Result<(), TijError> {
    if !(100..=4000).contains(&options.chart_width) || !(100..=4000).contains(&options.chart_height)
    {
        return Err(TijError::ConfigInvalid(format!(
            "chart size {}x{} is outside 100..=4000 pixels",
            options.chart_width, options.chart_height
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_options(&ReportOptions::default()).is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options = parse_options_str(r#"{ "chart_width": 1200 }"#).unwrap();
        assert_eq!(options.chart_width, 1200);
        assert_eq!(options.chart_height, 500);
        assert_eq!(options.first_color, [0, 0, 255]);
    }

    #[test]
    fn test_divisor_is_not_configurable() {
        let result = parse_options_str(r#"{ "thousands_divisor": "0.000000000000000000000000001" }"#);
        assert!(matches!(result, Err(TijError::Json(_))));
    }

    #[test]
    fn test_tiny_chart_rejected() {
        let result = parse_options_str(r#"{ "chart_height": 10 }"#);
        assert!(matches!(result, Err(TijError::ConfigInvalid(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse_options_str(r#"{ "colour": [1, 2, 3] }"#).is_err());
    }

    #[test]
    fn test_load_options_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{ "first_color": [10, 20, 30] }}"#).unwrap();
        let options = load_options(tmp.path()).unwrap();
        assert_eq!(options.first_color, [10, 20, 30]);
    }

    #[test]
    fn test_load_options_missing_file() {
        let result = load_options(Path::new("/nonexistent/tijdiff.json"));
        assert!(matches!(result, Err(TijError::ConfigLoad { .. })));
    }
}
