//! Cell display text
//!
//! Every cell value is converted to text once, then shortened and escaped
//! for a single-line preview.

use crate::reader::CellValue;

/// Appended to text cut at the character limit
pub const ELLIPSIS: &str = "...";

/// Appended to header cells whose text contains a line break
pub const LINE_BREAK_MARKER: &str = " [LF]";

/// Trimmed text form of a cell value
///
/// Only `Empty` maps to blank text: `0` and `False` print as values, so a
/// row holding just zeros is not reported as `(empty)`.
pub fn cell_text(value: &CellValue) -> String {
    let text = match value {
        CellValue::Empty => return String::new(),
        CellValue::Text(s) => s.clone(),
        CellValue::Integer(i) => i.to_string(),
        CellValue::Number(f) => f.to_string(),
        CellValue::Boolean(true) => "True".to_string(),
        CellValue::Boolean(false) => "False".to_string(),
        CellValue::DateTime { text: Some(t), .. } => t.clone(),
        CellValue::DateTime { serial, text: None } => serial.to_string(),
        CellValue::Duration(secs) => format_duration(*secs),
        CellValue::Error(e) => e.clone(),
        CellValue::Formula(f) => format!("={}", f),
    };
    text.trim().to_string()
}

fn format_duration(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let secs = secs.unsigned_abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        secs / 3600,
        (secs / 60) % 60,
        secs % 60
    )
}

/// A cell shortened and escaped for a one-line preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText {
    /// Text after truncation and line-break escaping
    pub text: String,
    /// Whether the untruncated text contained a line break
    pub line_break: bool,
}

impl DisplayText {
    /// Shorten `text` to `max_chars` characters and escape line breaks
    pub fn new(text: &str, max_chars: usize) -> Self {
        let line_break = text.contains('\n');

        let shortened = if text.chars().count() > max_chars {
            let mut cut: String = text.chars().take(max_chars).collect();
            cut.push_str(ELLIPSIS);
            cut
        } else {
            text.to_string()
        };

        Self {
            text: escape_line_breaks(&shortened),
            line_break,
        }
    }

    pub fn from_value(value: &CellValue, max_chars: usize) -> Self {
        Self::new(&cell_text(value), max_chars)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Replace raw line breaks with visible two-character escapes
pub fn escape_line_breaks(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_variants() {
        assert_eq!(cell_text(&CellValue::Empty), "");
        assert_eq!(cell_text(&CellValue::Text("  padded \n".to_string())), "padded");
        assert_eq!(cell_text(&CellValue::Integer(-12)), "-12");
        assert_eq!(cell_text(&CellValue::Number(5.0)), "5");
        assert_eq!(cell_text(&CellValue::Number(2.5)), "2.5");
        assert_eq!(cell_text(&CellValue::Boolean(false)), "False");
        assert_eq!(cell_text(&CellValue::Error("#N/A".to_string())), "#N/A");
        assert_eq!(
            cell_text(&CellValue::Formula("SUM(A1:A3)".to_string())),
            "=SUM(A1:A3)"
        );
        assert_eq!(
            cell_text(&CellValue::DateTime {
                serial: 45139.0,
                text: Some("2023-08-01 00:00:00".to_string()),
            }),
            "2023-08-01 00:00:00"
        );
        assert_eq!(
            cell_text(&CellValue::DateTime {
                serial: -1.5,
                text: None,
            }),
            "-1.5"
        );
        assert_eq!(cell_text(&CellValue::Duration(3723)), "1:02:03");
        assert_eq!(cell_text(&CellValue::Duration(-60)), "-0:01:00");
    }

    #[test]
    fn test_short_text_is_untouched() {
        let d = DisplayText::new("Name", 30);
        assert_eq!(d.text, "Name");
        assert!(!d.line_break);
    }

    #[test]
    fn test_long_text_is_truncated() {
        let long = "a".repeat(45);
        let d = DisplayText::new(&long, 30);
        assert_eq!(d.text, format!("{}...", "a".repeat(30)));
        assert_eq!(d.text.chars().count(), 33);

        // Exactly at the limit stays as is
        let exact = "b".repeat(30);
        assert_eq!(DisplayText::new(&exact, 30).text, exact);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let korean = "참석자".repeat(12);
        let d = DisplayText::new(&korean, 30);
        assert_eq!(d.text.chars().count(), 33);
        assert!(d.text.starts_with("참석자참석자"));
        assert!(d.text.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_line_breaks_are_escaped_and_flagged() {
        let d = DisplayText::new("first\nsecond", 30);
        assert_eq!(d.text, "first\\nsecond");
        assert!(d.line_break);
        assert!(!d.text.contains('\n'));

        let d = DisplayText::new("windows\r\nline", 30);
        assert_eq!(d.text, "windows\\r\\nline");
        assert!(!d.text.contains('\r'));
    }

    #[test]
    fn test_escaping_happens_after_truncation() {
        // The break sits inside the first 30 characters and expands to two
        let text = format!("{}\n{}", "x".repeat(29), "y".repeat(10));
        let d = DisplayText::new(&text, 30);
        assert_eq!(d.text, format!("{}\\n...", "x".repeat(29)));
        assert!(d.line_break);

        // A break past the cut is dropped from the text but still flagged
        let text = format!("{}\ntail", "z".repeat(40));
        let d = DisplayText::new(&text, 30);
        assert_eq!(d.text, format!("{}...", "z".repeat(30)));
        assert!(d.line_break);
    }
}
