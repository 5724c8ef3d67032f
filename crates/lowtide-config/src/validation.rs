//! Validation utilities and regex patterns

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #4682B4)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// Accepted tracing levels for the `logging.level` setting
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Regex for one `target=level` filter directive (e.g. `lowtide_graphs=trace`)
pub static LOG_DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)*=(trace|debug|info|warn|error|off)$")
        .expect("Invalid log directive regex pattern")
});

/// Validate a log filter: a bare level, or a comma separated list of
/// levels and `target=level` directives
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid = level
        .split(',')
        .all(|directive| LOG_LEVELS.contains(&directive) || LOG_DIRECTIVE_REGEX.is_match(directive));

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

/// Validate a CSV delimiter: exactly one printable ASCII character or a tab,
/// and never the quote character
pub fn validate_delimiter(delimiter: &str) -> Result<(), ValidationError> {
    let mut chars = delimiter.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(ValidationError::new("delimiter_not_single_char"));
    };

    if !(c.is_ascii_graphic() || c == '\t') || c == '"' {
        return Err(ValidationError::new("invalid_delimiter"));
    }

    Ok(())
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.trim().is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon stays allowed for Windows drive letters (C:\)
    let invalid_chars = ['<', '>', '"', '|', '?', '*', '\0'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_regex() {
        assert!(HEX_COLOR_REGEX.is_match("#FFFFFF"));
        assert!(HEX_COLOR_REGEX.is_match("#4682B4"));
        assert!(HEX_COLOR_REGEX.is_match("#ff7f50"));

        assert!(!HEX_COLOR_REGEX.is_match("FFFFFF")); // Missing #
        assert!(!HEX_COLOR_REGEX.is_match("#FFF")); // Too short
        assert!(!HEX_COLOR_REGEX.is_match("#FFFFFFF")); // Too long
        assert!(!HEX_COLOR_REGEX.is_match("#GGGGGG"));
        assert!(!HEX_COLOR_REGEX.is_match(""));
    }

    #[test]
    fn test_validate_log_level() {
        for level in LOG_LEVELS {
            assert!(validate_log_level(level).is_ok());
        }
        assert!(validate_log_level("verbose").is_err());
        assert!(validate_log_level("INFO").is_err());
        assert!(validate_log_level("").is_err());
    }

    #[test]
    fn test_validate_log_filter_directives() {
        assert!(validate_log_level("lowtide_graphs=trace").is_ok());
        assert!(validate_log_level("warn,lowtide_graphs=debug").is_ok());
        assert!(validate_log_level("info,lowtide_common::source=trace").is_ok());
        assert!(validate_log_level("plotters=off").is_ok());

        assert!(validate_log_level("lowtide_graphs=loud").is_err());
        assert!(validate_log_level("lowtide_graphs").is_err());
        assert!(validate_log_level("info,").is_err());
        assert!(validate_log_level("info, debug").is_err());
        assert!(validate_log_level("=debug").is_err());
    }

    #[test]
    fn test_validate_delimiter() {
        assert!(validate_delimiter(",").is_ok());
        assert!(validate_delimiter(";").is_ok());
        assert!(validate_delimiter("|").is_ok());
        assert!(validate_delimiter("\t").is_ok());

        assert!(validate_delimiter("").is_err());
        assert!(validate_delimiter(",,").is_err());
        assert!(validate_delimiter("\"").is_err());
        assert!(validate_delimiter(" ").is_err());
        assert!(validate_delimiter("§").is_err());
    }

    #[test]
    fn test_validate_file_path() {
        assert!(validate_file_path("Query_results/activity_times.csv").is_ok());
        assert!(validate_file_path("/tmp/out/activity_analysis.png").is_ok());
        assert!(validate_file_path("C:\\reports\\chart.png").is_ok());

        assert!(validate_file_path("").is_err());
        assert!(validate_file_path("   ").is_err());
        assert!(validate_file_path("chart?.png").is_err());
        assert!(validate_file_path("a|b.csv").is_err());
    }
}
