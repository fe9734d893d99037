//! Rebuilds transactions from date segments.
//!
//! The first pass walks the segments with a cursor. An anchor whose body ends
//! in an amount absorbs the following same-date fragments
//! ([`Phase::AbsorbAfterAmount`]); an anchor without one looks ahead through
//! same-date fragments until an amount shows up ([`Phase::ScanForAmount`]).
//! Text after the last date token used by an emitted record is then segmented
//! again and scanned with lighter cleaning ([`Phase::SecondPassRecovery`]).

use std::fmt;

use tracing::{debug, trace};

use super::clean::{cut_noise_tail, strip_first_summary, strip_noise_keywords, trim_summary};
use super::dto::TransactionRecord;
use super::markers::Markers;
use super::segment::{Segment, has_amount, segment, split_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AbsorbAfterAmount,
    ScanForAmount,
    SecondPassRecovery,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::AbsorbAfterAmount => "absorb-after-amount",
            Phase::ScanForAmount => "scan-for-amount",
            Phase::SecondPassRecovery => "second-pass-recovery",
        };
        f.write_str(name)
    }
}

/// Outcome of cleaning one same-date fragment during the first pass.
enum Fragment {
    Empty,
    Summary(String),
    Text(String),
}

struct Reconstructor<'a> {
    segments: &'a [Segment<'a>],
    markers: &'a Markers,
    records: Vec<TransactionRecord>,
    consumed_until: Option<usize>,
}

/// Runs both passes over already header-normalized text.
pub fn reconstruct(text: &str, markers: &Markers) -> Vec<TransactionRecord> {
    let segments = segment(text);
    if segments.is_empty() {
        return Vec::new();
    }

    let mut reconstructor = Reconstructor::new(&segments, markers);
    reconstructor.first_pass();
    reconstructor.second_pass(text);
    reconstructor.records
}

impl<'a> Reconstructor<'a> {
    fn new(segments: &'a [Segment<'a>], markers: &'a Markers) -> Self {
        Self {
            segments,
            markers,
            records: Vec::new(),
            consumed_until: None,
        }
    }

    fn first_pass(&mut self) {
        let mut cursor = 0;
        while cursor < self.segments.len() {
            cursor = match split_amount(self.segments[cursor].body) {
                Some((before, amount)) => self.absorb_after_amount(cursor, before, amount),
                None => self.scan_for_amount(cursor),
            };
        }
    }

    /// `cut_noise_tail` followed by `trim_summary`.
    fn clean(&self, body: &str) -> Fragment {
        let cleaned = cut_noise_tail(body, self.markers);
        let (text, summary) = trim_summary(&cleaned, self.markers);
        if summary {
            return Fragment::Summary(text.to_string());
        }
        if cleaned.is_empty() {
            return Fragment::Empty;
        }
        Fragment::Text(cleaned)
    }

    fn same_date(&self, idx: usize, date: &str) -> Option<&'a Segment<'a>> {
        self.segments.get(idx).filter(|seg| seg.date == date)
    }

    /// Case A: the anchor carries its own amount.
    fn absorb_after_amount(&mut self, anchor: usize, before: &str, amount: &str) -> usize {
        let date = self.segments[anchor].date;
        let mut parts = Vec::new();
        if !before.is_empty() {
            parts.push(before.to_string());
        }

        let mut next = anchor + 1;
        while let Some(seg) = self.same_date(next, date) {
            if seg.body.is_empty() {
                next += 1;
                continue;
            }
            match self.clean(seg.body) {
                Fragment::Summary(text) => {
                    if !text.is_empty() {
                        parts.push(text);
                    }
                    break;
                }
                Fragment::Empty => {
                    trace!(date, "skipping fragment reduced to noise");
                    next += 1;
                }
                Fragment::Text(text) => {
                    if has_amount(&text) {
                        break;
                    }
                    parts.push(text);
                    next += 1;
                }
            }
        }

        self.emit(Phase::AbsorbAfterAmount, date, &parts, amount, next - 1);
        next
    }

    /// Case B: the anchor has no amount, so look ahead through same-date
    /// fragments. The date is abandoned on a summary marker or a date change.
    fn scan_for_amount(&mut self, anchor: usize) -> usize {
        let segments = self.segments;
        let anchor_seg = &segments[anchor];
        let date = anchor_seg.date;
        let mut parts = Vec::new();
        if !anchor_seg.body.is_empty() {
            parts.push(anchor_seg.body.to_string());
        }

        let mut next = anchor + 1;
        while let Some(seg) = self.same_date(next, date) {
            if seg.body.is_empty() {
                next += 1;
                continue;
            }
            let text = match self.clean(seg.body) {
                Fragment::Empty => {
                    next += 1;
                    continue;
                }
                Fragment::Summary(text) if text.is_empty() => {
                    next += 1;
                    continue;
                }
                Fragment::Summary(_) => {
                    trace!(date, "summary reached before an amount, abandoning date");
                    return anchor + 1;
                }
                Fragment::Text(text) => text,
            };

            if let Some((before, amount)) = split_amount(&text) {
                if !before.is_empty() {
                    parts.push(before.to_string());
                }
                let resume = self.absorb_tail(date, next + 1, &mut parts);
                self.emit(Phase::ScanForAmount, date, &parts, amount, resume - 1);
                return resume;
            }

            parts.push(text);
            next += 1;
        }

        trace!(date, "no amount before the date changed, abandoning date");
        anchor + 1
    }

    /// Tail absorption after Case B found its amount. Unlike Case A, a fragment
    /// emptied by cleaning is skipped even when a summary marker was hit.
    fn absorb_tail(&self, date: &str, from: usize, parts: &mut Vec<String>) -> usize {
        let mut next = from;
        while let Some(seg) = self.same_date(next, date) {
            if seg.body.is_empty() {
                next += 1;
                continue;
            }
            match self.clean(seg.body) {
                Fragment::Empty => next += 1,
                Fragment::Summary(text) if text.is_empty() => next += 1,
                Fragment::Summary(text) => {
                    parts.push(text);
                    break;
                }
                Fragment::Text(text) => {
                    if has_amount(&text) {
                        break;
                    }
                    parts.push(text);
                    next += 1;
                }
            }
        }
        next
    }

    fn second_pass(&mut self, text: &str) {
        let Some(consumed) = self.consumed_until else {
            return;
        };
        if consumed >= text.len() {
            return;
        }

        let remaining = &text[consumed..];
        let segments = segment(remaining);
        let mut cursor = 0;
        while cursor < segments.len() {
            cursor = self.recover(&segments, cursor);
        }
    }

    /// Only keywords and the first summary marker are stripped here; runs of
    /// non-ASCII text survive.
    fn recover(&mut self, segments: &[Segment<'_>], idx: usize) -> usize {
        let seg = &segments[idx];
        if seg.body.is_empty() {
            return idx + 1;
        }

        let content = strip_noise_keywords(seg.body, self.markers);
        let content = strip_first_summary(content, self.markers);
        let Some((before, amount)) = split_amount(content) else {
            return idx + 1;
        };

        let mut parts = Vec::new();
        if !before.is_empty() {
            parts.push(before.to_string());
        }

        let mut next = idx + 1;
        while let Some(follow) = segments.get(next).filter(|s| s.date == seg.date) {
            if follow.body.is_empty() || has_amount(follow.body) {
                break;
            }
            // kept even when stripping empties it
            parts.push(strip_noise_keywords(follow.body, self.markers).to_string());
            next += 1;
        }

        let record = TransactionRecord::from_parts(seg.date, &parts, amount);
        debug!(phase = %Phase::SecondPassRecovery, date = %record.date, amount = %record.amount, "recovered transaction");
        self.records.push(record);
        next
    }

    fn emit(&mut self, phase: Phase, date: &str, parts: &[String], amount: &str, last: usize) {
        let record = TransactionRecord::from_parts(date, parts, amount);
        debug!(phase = %phase, date = %record.date, amount = %record.amount, "emitted transaction");
        self.records.push(record);
        self.consumed_until = Some(self.segments[last].date_end);
    }
}
