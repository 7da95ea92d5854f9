//! Crossing index lists and output format selection.

use clap::ValueEnum;

/// Cycle output format for `extract`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// JSON report with source, validity and values
    #[default]
    Json,
    /// One value per line
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

/// Parse crossing ordinals in format "0,1,2"
///
/// At least two distinct ordinals are needed to delimit one cycle.
pub fn parse_crossing_indices(list: &str) -> Result<Vec<usize>, String> {
    let mut indices = list
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<usize>()
                .map_err(|_| format!("Invalid crossing index: '{}'", part))
        })
        .collect::<Result<Vec<_>, _>>()?;

    indices.sort_unstable();
    indices.dedup();
    if indices.len() < 2 {
        return Err(format!(
            "Manual selection needs at least two distinct crossings (e.g., 0,1,2), got: {}",
            list
        ));
    }
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crossing_indices() {
        assert_eq!(parse_crossing_indices("0,1,2").unwrap(), vec![0, 1, 2]);
        assert_eq!(parse_crossing_indices(" 3, 1 ,3").unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_parse_crossing_indices_rejects_bad_input() {
        assert!(parse_crossing_indices("1").is_err());
        assert!(parse_crossing_indices("2,2").is_err());
        assert!(parse_crossing_indices("0,-1").is_err());
        assert!(parse_crossing_indices("0,,1").is_err());
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::Text.extension(), "txt");
    }
}
