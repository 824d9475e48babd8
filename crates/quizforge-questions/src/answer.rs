//! Reference answers and the rules for matching player input against them.

/// Fixed-point scale for numeric comparison: values are equal when they
/// agree to 5 decimal places.
const NUMERIC_SCALE: f64 = 100_000.0;

/// The correct answer to a question. Internal only, never sent to clients
/// before the question is answered.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    /// An exact whole number (counts, years, sums).
    Integer(i64),
    /// A value already rounded for display, usually to 2 decimals.
    Decimal(f64),
    /// A word or phrase, compared case and whitespace insensitively.
    Text(String),
}

impl AnswerValue {
    /// Returns `true` if `submitted` counts as this answer.
    ///
    /// Never fails: input that doesn't parse as a number against a numeric
    /// reference is simply wrong.
    pub fn matches(&self, submitted: &str) -> bool {
        match self {
            Self::Text(expected) => {
                normalize_text(submitted) == normalize_text(expected)
            }
            Self::Integer(n) => numbers_match(submitted, *n as f64),
            Self::Decimal(x) => numbers_match(submitted, *x),
        }
    }

    /// Canonical display string, as shown after answering.
    ///
    /// Integers print without decimals. Decimals are fixed to 2 places and
    /// then stripped of trailing zeros (`2.50` → `2.5`, `3.00` → `3`).
    pub fn format(&self) -> String {
        match self {
            Self::Integer(n) => n.to_string(),
            Self::Decimal(x) => format_decimal(*x),
            Self::Text(s) => s.clone(),
        }
    }

    /// Rounds to 2 decimals and wraps as a [`AnswerValue::Decimal`].
    pub(crate) fn rounded(value: f64) -> Self {
        Self::Decimal((value * 100.0).round() / 100.0)
    }

    pub(crate) fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Trims, lowercases, and collapses internal whitespace runs to one space.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Parses player input as a number.
///
/// Accepts a decimal comma (`1,5`). Rejects empty input, a bare minus
/// sign, and anything non-finite (`inf`, `NaN`).
pub fn parse_number(raw: &str) -> Option<f64> {
    let candidate = raw.trim().replace(',', ".");
    if candidate.is_empty() || candidate == "-" {
        return None;
    }
    candidate.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn numbers_match(submitted: &str, expected: f64) -> bool {
    match parse_number(submitted) {
        Some(value) => {
            (value * NUMERIC_SCALE).round() == (expected * NUMERIC_SCALE).round()
        }
        None => false,
    }
}

fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let fixed = format!("{value:.2}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // matches(), numeric
    // =====================================================================

    #[test]
    fn test_matches_numeric_trailing_zeros() {
        assert!(AnswerValue::Decimal(1.5).matches("1.50000"));
    }

    #[test]
    fn test_matches_numeric_decimal_comma() {
        assert!(AnswerValue::Decimal(1.5).matches("1,5"));
    }

    #[test]
    fn test_matches_numeric_within_tolerance() {
        assert!(AnswerValue::Decimal(1.5).matches("1.5000001"));
        assert!(!AnswerValue::Decimal(1.5).matches("1.5001"));
    }

    #[test]
    fn test_matches_numeric_garbage_is_wrong() {
        assert!(!AnswerValue::Decimal(1.5).matches("abc"));
        assert!(!AnswerValue::Integer(0).matches(""));
        assert!(!AnswerValue::Integer(0).matches("-"));
        assert!(!AnswerValue::Integer(0).matches("   "));
    }

    #[test]
    fn test_matches_numeric_rejects_non_finite() {
        assert!(!AnswerValue::Decimal(f64::INFINITY).matches("inf"));
        assert!(!AnswerValue::Integer(0).matches("NaN"));
    }

    #[test]
    fn test_matches_integer_accepts_padded_and_negative() {
        assert!(AnswerValue::Integer(42).matches("  42 "));
        assert!(AnswerValue::Integer(-1).matches("-1"));
        assert!(AnswerValue::Integer(7).matches("7.0"));
    }

    // =====================================================================
    // matches(), text
    // =====================================================================

    #[test]
    fn test_matches_text_trims_and_ignores_case() {
        assert!(AnswerValue::text("Berlin").matches("  Berlin "));
        assert!(AnswerValue::text("Berlin").matches("BERLIN"));
    }

    #[test]
    fn test_matches_text_collapses_inner_whitespace() {
        assert!(AnswerValue::text("New Delhi").matches("new    delhi"));
        assert!(AnswerValue::text("milky way").matches("Milky\tWay"));
    }

    #[test]
    fn test_matches_text_different_word_is_wrong() {
        assert!(!AnswerValue::text("paris").matches("berlin"));
        assert!(!AnswerValue::text("New Delhi").matches("newdelhi"));
    }

    // =====================================================================
    // format()
    // =====================================================================

    #[test]
    fn test_format_integer() {
        assert_eq!(AnswerValue::Integer(206).format(), "206");
        assert_eq!(AnswerValue::Integer(-1).format(), "-1");
    }

    #[test]
    fn test_format_decimal_strips_trailing_zeros() {
        assert_eq!(AnswerValue::Decimal(2.5).format(), "2.5");
        assert_eq!(AnswerValue::Decimal(12.57).format(), "12.57");
        assert_eq!(AnswerValue::Decimal(4.0).format(), "4");
    }

    #[test]
    fn test_format_text_is_verbatim() {
        assert_eq!(AnswerValue::text("Milky Way").format(), "Milky Way");
    }

    #[test]
    fn test_formatted_answer_matches_itself() {
        // The server-side formatted answer must always be accepted.
        for value in [
            AnswerValue::Integer(1989),
            AnswerValue::rounded(std::f64::consts::PI * 49.0),
            AnswerValue::rounded(200.0 / 7.0),
            AnswerValue::text("carbon dioxide"),
        ] {
            assert!(value.matches(&value.format()), "{value:?}");
        }
    }

    #[test]
    fn test_rounded_keeps_two_decimals() {
        assert_eq!(AnswerValue::rounded(10.0 / 3.0), AnswerValue::Decimal(3.33));
    }

    #[test]
    fn test_parse_number_variants() {
        assert_eq!(parse_number("3"), Some(3.0));
        assert_eq!(parse_number(" -2,25 "), Some(-2.25));
        assert_eq!(parse_number("1e2"), Some(100.0));
        assert_eq!(parse_number("twelve"), None);
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  White   Blood\nCells "), "white blood cells");
    }
}
