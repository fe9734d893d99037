//! Fragment cleaning shared by both reconstruction passes.

use super::markers::{Markers, earliest_marker};

const NON_ASCII_RUN: usize = 3;

fn is_noise_char(c: char) -> bool {
    let code = c as u32;
    code < 32 || code > 126
}

/// Byte offset where the first run of at least three consecutive
/// non-printable-ASCII chars begins.
fn non_ascii_run_start(text: &str) -> Option<usize> {
    let mut run_start = None;
    let mut run_len = 0;

    for (idx, c) in text.char_indices() {
        if is_noise_char(c) {
            run_start.get_or_insert(idx);
            run_len += 1;
            if run_len >= NON_ASCII_RUN {
                return run_start;
            }
        } else {
            run_start = None;
            run_len = 0;
        }
    }

    None
}

/// Truncates before the earliest summary marker. The flag reports whether one
/// was found; an untouched fragment is returned as is.
pub fn trim_summary<'a>(text: &'a str, markers: &Markers) -> (&'a str, bool) {
    match earliest_marker(text, &markers.summary_markers) {
        Some(idx) => (text[..idx].trim(), true),
        None => (text, false),
    }
}

/// Truncates before the earliest noise keyword or non-ASCII run, whichever
/// comes first. Without either, non-ASCII chars are deleted instead.
pub fn cut_noise_tail(text: &str, markers: &Markers) -> String {
    let keyword = earliest_marker(text, &markers.noise_keywords);
    let run = non_ascii_run_start(text);

    let cut = match (keyword, run) {
        (Some(k), Some(r)) => Some(k.min(r)),
        (k, r) => k.or(r),
    };

    match cut {
        Some(idx) => text[..idx].trim().to_string(),
        None => text
            .chars()
            .filter(|c| !is_noise_char(*c))
            .collect::<String>()
            .trim()
            .to_string(),
    }
}

/// Second-pass noise stripping: keywords only, no non-ASCII run detection.
/// Each keyword truncates in list order, so with overlapping keywords the
/// result can differ from cutting at the earliest one.
pub fn strip_noise_keywords<'a>(text: &'a str, markers: &Markers) -> &'a str {
    markers
        .noise_keywords
        .iter()
        .filter(|keyword| !keyword.is_empty())
        .fold(text, |text, keyword| match text.find(keyword.as_str()) {
            Some(idx) => text[..idx].trim(),
            None => text,
        })
}

/// Second-pass summary stripping: cuts at the first marker in list order that
/// occurs, which is not necessarily the earliest one in the text.
pub fn strip_first_summary<'a>(text: &'a str, markers: &Markers) -> &'a str {
    markers
        .summary_markers
        .iter()
        .filter(|marker| !marker.is_empty())
        .find_map(|marker| text.find(marker.as_str()))
        .map(|idx| text[..idx].trim())
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SEQPAYNeuer Saldo35.267,63Kunden-Information", "SEQPAY", true)]
    #[case("PAY Kunden-Information x Neuer Saldo", "PAY", true)]
    #[case("Neuer Saldo11.222,33 Euro", "", true)]
    #[case(" Miete ", " Miete ", false)]
    #[case("Eingeräumte Kontoüberziehung0,00", "Eingeräumte", true)]
    fn test_trim_summary(#[case] text: &str, #[case] expected: &str, #[case] matched: bool) {
        let markers = Markers::default();
        assert_eq!(trim_summary(text, &markers), (expected, matched));
    }

    #[rstest]
    #[case("Miete", "Miete")]
    #[case("RIDA-800SHOPFLAGTAILCODEóôÇÒÒHerrnXUSR2", "RIDA-800SHOPFLAGTAILCODE")]
    #[case("XUSR2 Road 9HerrnóôÇ", "XUSR2 Road 9")]
    #[case("TownDatum31", "Town")]
    #[case("Müller", "Mller")]
    #[case("ab\u{0}\u{1}c", "abc")]
    #[case("ab\u{0}\u{1}\u{2}c", "ab")]
    #[case("óôÇ", "")]
    #[case("  ", "")]
    fn test_cut_noise_tail(#[case] text: &str, #[case] expected: &str) {
        let markers = Markers::default();
        assert_eq!(cut_noise_tail(text, &markers), expected);
    }

    #[test]
    fn test_cut_noise_tail_keyword_before_run() {
        let markers = Markers::default();
        assert_eq!(cut_noise_tail("ShopSeite1óôÇ", &markers), "Shop");
    }

    #[test]
    fn test_cut_noise_tail_keeps_short_non_ascii_before_cut() {
        let markers = Markers::default();
        assert_eq!(cut_noise_tail("Café München IBAN", &markers), "Café München");
    }

    #[test]
    fn test_non_ascii_run_is_byte_offset() {
        assert_eq!(non_ascii_run_start("ab\u{e9}cd\u{e9}\u{e9}\u{e9}"), Some(6));
        assert_eq!(non_ascii_run_start("\u{e9}\u{e9}x\u{e9}\u{e9}"), None);
    }

    #[rstest]
    #[case("LastschriftPROC_ENTITY LTD.-666,66")]
    #[case("RIDA-800SHOPFLAGTAILCODEóôÇÒÒHerrnXUSR2")]
    #[case("Müller")]
    #[case("SEQPAYNeuer Saldo35.267,63")]
    #[case("")]
    fn test_cleaning_is_idempotent(#[case] text: &str) {
        let markers = Markers::default();

        let once = cut_noise_tail(text, &markers);
        assert_eq!(cut_noise_tail(&once, &markers), once);

        let (trimmed, _) = trim_summary(text, &markers);
        assert_eq!(trim_summary(trimmed, &markers).0, trimmed);
    }

    #[test]
    fn test_cut_noise_tail_not_idempotent_for_isolated_non_ascii_prefix() {
        // the fallback deletes the `ü` kept by the first truncation
        let markers = Markers::default();
        let once = cut_noise_tail("Müller Herrn", &markers);
        assert_eq!(once, "Müller");
        assert_eq!(cut_noise_tail(&once, &markers), "Mller");
    }

    #[test]
    fn test_strip_noise_keywords() {
        let markers = Markers::default();
        assert_eq!(strip_noise_keywords("Kaufhaus-25,50Seite 1 von 2", &markers), "Kaufhaus-25,50");
        assert_eq!(strip_noise_keywords("BICxIBAN", &markers), "");
        assert_eq!(strip_noise_keywords("Shopóôǵ", &markers), "Shopóôǵ");
    }

    #[test]
    fn test_strip_noise_keywords_uses_list_order() {
        let markers = Markers {
            noise_keywords: vec!["AB".to_string(), "XA".to_string()],
            ..Markers::default()
        };
        assert_eq!(strip_noise_keywords("QXAB", &markers), "QX");
        assert_eq!(cut_noise_tail("QXAB", &markers), "Q");
    }

    #[test]
    fn test_strip_first_summary_uses_list_order() {
        let markers = Markers::default();
        let text = "PAYAlter Saldo1,00Neuer Saldo2,00";
        assert_eq!(strip_first_summary(text, &markers), "PAYAlter Saldo1,00");
        assert_eq!(trim_summary(text, &markers).0, "PAY");
        assert_eq!(strip_first_summary(" none ", &markers), " none ");
    }
}
