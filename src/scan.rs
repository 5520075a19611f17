//! Serial-number extraction from raw barcode / QR payloads.
//!
//! Multi-field 2D codes carry several lines (model, MAC, serial, ...). The
//! matcher walks a fixed rule list over those lines and keeps the first hit.

use regex::Regex;
use std::sync::OnceLock;

/// Rules 1-3 in priority order. Rule 3 can never win: every line it accepts
/// is already accepted by rule 2.
fn prefix_rules() -> &'static [Regex; 3] {
    static RULES: OnceLock<[Regex; 3]> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            Regex::new(r"^S[N]?[0-9A-Za-z]").expect("serial prefix regex"),
            Regex::new(r"^[0-9]{2}S[A-Za-z0-9]").expect("digit serial prefix regex"),
            Regex::new(r"^20S[A-Za-z]").expect("20S prefix regex"),
        ]
    })
}

fn alphanumeric_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").expect("alphanumeric regex"))
}

const MIN_ALNUM_SERIAL_LEN: usize = 6;

/// Non-empty trimmed lines of a payload, split on any run of CR/LF.
pub fn extract_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(['\r', '\n'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
}

/// Pick the line most likely to be the serial number.
pub fn resolve_serial(raw: &str) -> String {
    let lines: Vec<&str> = extract_lines(raw).collect();
    match select_serial_line(&lines) {
        Some(line) => line.to_string(),
        None => raw.trim().to_string(),
    }
}

/// Rule chain over already-extracted lines; `None` only for an empty slice.
pub fn select_serial_line<'a>(lines: &[&'a str]) -> Option<&'a str> {
    for rule in prefix_rules() {
        if let Some(line) = lines.iter().find(|l| rule.is_match(l)) {
            return Some(*line);
        }
    }

    // Longest pure alphanumeric line; strict `>` keeps the first on ties.
    let mut best: Option<&'a str> = None;
    for &line in lines {
        if line.len() < MIN_ALNUM_SERIAL_LEN || !alphanumeric_re().is_match(line) {
            continue;
        }
        if best.map(|b| line.len() > b.len()).unwrap_or(true) {
            best = Some(line);
        }
    }

    best.or_else(|| lines.first().copied())
}

/// Whitespace / line-break separated parts of a payload that are long enough
/// to be worth a lookup, in payload order.
pub fn fallback_tokens(raw: &str, min_len: usize) -> impl Iterator<Item = &str> {
    raw.split_whitespace()
        .filter(move |part| part.chars().count() >= min_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_lines_splits_on_crlf_runs() {
        let lines: Vec<&str> = extract_lines("  A1 \r\n\r\nB2\n\n  \rC3").collect();
        assert_eq!(lines, vec!["A1", "B2", "C3"]);
    }

    #[test]
    fn extract_lines_single_and_empty() {
        assert_eq!(extract_lines("  ABC  ").collect::<Vec<_>>(), vec!["ABC"]);
        assert_eq!(extract_lines("").count(), 0);
        assert_eq!(extract_lines(" \r\n ").count(), 0);
    }

    #[test]
    fn rule_one_s_or_sn_prefix() {
        assert_eq!(resolve_serial("SN12345\nfoo\nbar"), "SN12345");
        assert_eq!(resolve_serial("model X\nS9XK2L"), "S9XK2L");
    }

    #[test]
    fn rule_two_two_digits_then_s() {
        assert_eq!(resolve_serial("foo\n99SABCDEF\nbar"), "99SABCDEF");
    }

    #[test]
    fn rule_two_shadows_rule_three() {
        // "20SAB" satisfies both; rule 2 is checked first and returns it anyway.
        assert_eq!(resolve_serial("x\n20SAB12"), "20SAB12");
    }

    #[test]
    fn rule_one_wins_over_earlier_rule_two_line() {
        assert_eq!(resolve_serial("12S777\nSN0001"), "SN0001");
    }

    #[test]
    fn rule_four_longest_alphanumeric() {
        assert_eq!(resolve_serial("abc\nABCDEFGH\nXY"), "ABCDEFGH");
        assert_eq!(resolve_serial("MAC: 00-11\n48575443ABCD1234\nGPON1234"), "48575443ABCD1234");
    }

    #[test]
    fn rule_four_tie_keeps_first() {
        assert_eq!(resolve_serial("AAAAAA1\nBBBBBB2"), "AAAAAA1");
    }

    #[test]
    fn rule_four_ignores_short_and_punctuated() {
        assert_eq!(resolve_serial("AB12\nXY-123456"), "AB12");
    }

    #[test]
    fn rule_five_first_line() {
        assert_eq!(resolve_serial("a b\nc d"), "a b");
    }

    #[test]
    fn single_line_is_returned_trimmed() {
        assert_eq!(resolve_serial("  hello world  "), "hello world");
        assert_eq!(resolve_serial("   "), "");
    }

    #[test]
    fn fallback_tokens_respects_min_length_and_order() {
        let parts: Vec<&str> = fallback_tokens("ONT HG8245\nSN: 4857544\tabc", 4).collect();
        assert_eq!(parts, vec!["HG8245", "4857544"]);
    }
}
