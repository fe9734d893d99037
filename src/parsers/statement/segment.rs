use std::sync::LazyLock;

use regex::Regex;

static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}\.\d{2}\.\d{4}").expect("valid date regex"));

static AMOUNT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-?[0-9]{1,3}(?:\.[0-9]{3})*,[0-9]{2}$").expect("valid amount regex")
});

/// A date token and the text that follows it up to the next date token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub date: &'a str,
    pub body: &'a str,
    /// Byte offset right after the date token, relative to the segmented text.
    pub date_end: usize,
}

/// Drops everything up to and including `marker` when it shows up before the
/// first date. A later occurrence belongs to a transaction and is kept.
pub fn normalize_header<'a>(raw: &'a str, marker: &str) -> &'a str {
    if marker.is_empty() {
        return raw;
    }
    let Some(marker_idx) = raw.find(marker) else {
        return raw;
    };
    let before_first_date = DATE_REGEX
        .find(raw)
        .map(|m| marker_idx < m.start())
        .unwrap_or(true);

    if before_first_date {
        &raw[marker_idx + marker.len()..]
    } else {
        raw
    }
}

/// Splits `text` at every `DD.MM.YYYY` token. Bodies are trimmed.
pub fn segment(text: &str) -> Vec<Segment<'_>> {
    let dates: Vec<_> = DATE_REGEX.find_iter(text).collect();

    dates
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let end = dates.get(i + 1).map(|next| next.start()).unwrap_or(text.len());
            Segment {
                date: m.as_str(),
                body: text[m.end()..end].trim(),
                date_end: m.end(),
            }
        })
        .collect()
}

pub fn has_amount(text: &str) -> bool {
    AMOUNT_REGEX.is_match(text)
}

/// Splits a trailing amount off `text`, returning `(description, amount)`.
pub fn split_amount(text: &str) -> Option<(&str, &str)> {
    AMOUNT_REGEX
        .find(text)
        .map(|m| (text[..m.start()].trim(), &text[m.start()..]))
}

pub fn is_statement_date(text: &str) -> bool {
    DATE_REGEX
        .find(text)
        .map(|m| m.start() == 0 && m.end() == text.len())
        .unwrap_or(false)
}

pub fn is_statement_amount(text: &str) -> bool {
    AMOUNT_REGEX
        .find(text)
        .map(|m| m.start() == 0)
        .unwrap_or(false)
}
