//! CLI utilities for ferro-resolve
//!
//! Pure helpers used by the `ferro-resolve` binary, kept in the library so
//! they can be unit tested without spawning the CLI.

pub mod format;

pub use format::{output_candidates, output_classification, output_error, output_route, OutputFormat};

/// UTF-8 BOM (Byte Order Mark) constant
const UTF8_BOM: &str = "\u{feff}";

/// Strip a UTF-8 BOM from the beginning of a string if present.
///
/// # Examples
///
/// ```
/// use ferro_resolve::cli::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}rs6025"), "rs6025");
/// assert_eq!(strip_bom("rs6025"), "rs6025");
/// ```
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}

/// Strip an inline `#` comment and surrounding whitespace from a query line.
///
/// # Examples
///
/// ```
/// use ferro_resolve::cli::strip_inline_comment;
///
/// assert_eq!(strip_inline_comment("1-55516888-G-GA  # PCSK9 LoF"), "1-55516888-G-GA");
/// assert_eq!(strip_inline_comment("# header"), "");
/// ```
pub fn strip_inline_comment(s: &str) -> &str {
    match s.find('#') {
        Some(pos) => s[..pos].trim(),
        None => s.trim(),
    }
}

/// Turn one line of a query file into a query.
///
/// Returns `None` for blank and comment-only lines. The BOM is only looked for
/// on the first line of a file.
///
/// # Examples
///
/// ```
/// use ferro_resolve::cli::process_input_line;
///
/// assert_eq!(process_input_line("\u{feff}PCSK9", true), Some("PCSK9"));
/// assert_eq!(process_input_line("1:55039447 # window", false), Some("1:55039447"));
/// assert_eq!(process_input_line("   ", false), None);
/// ```
pub fn process_input_line(line: &str, is_first_line: bool) -> Option<&str> {
    let line = line.trim();
    let line = if is_first_line { strip_bom(line) } else { line };
    let line = strip_inline_comment(line);

    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{feff}PCSK9"), "PCSK9");
        assert_eq!(strip_bom("\u{feff}"), "");
        assert_eq!(strip_bom(""), "");
    }

    #[test]
    fn test_strip_inline_comment() {
        assert_eq!(strip_inline_comment("rs6025#factor V Leiden"), "rs6025");
        assert_eq!(strip_inline_comment("  rs6025  "), "rs6025");
        assert_eq!(strip_inline_comment("#"), "");
    }

    #[test]
    fn test_process_input_line() {
        assert_eq!(process_input_line("M-8602-T-C", false), Some("M-8602-T-C"));
        assert_eq!(process_input_line("\u{feff}M-8602-T-C", true), Some("M-8602-T-C"));
        // A BOM after the first line is left alone
        assert_eq!(
            process_input_line("\u{feff}M-8602-T-C", false),
            Some("\u{feff}M-8602-T-C")
        );
        assert_eq!(process_input_line("# queries for review", true), None);
        assert_eq!(process_input_line("", false), None);
    }
}
