//! Text normalization for agent output.
//!
//! Agent replies arrive with typographic noise: narrow no-break spaces from
//! model output, doubled spaces after substitutions, and machine-shaped date
//! tokens (`2025-12-12`, `20251212`, `12/12/2025`). This crate canonicalizes
//! the whitespace and rewrites recognizable dates into the long form
//! (`December 12, 2025`).
//!
//! Every function here is pure and never fails: an unparseable candidate is
//! passed through byte-identical.

use chrono::{Datelike, NaiveDate};
use regex_lite::{Captures, Regex};
use std::sync::LazyLock;

// Patterns are word-bounded so digit runs embedded in larger tokens
// (identifiers, currency amounts) are never touched.
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap());
static COMPACT_DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{8}\b").unwrap());
static SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b").unwrap());
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// Compact dates are only trusted inside this year range; outside it an
/// 8-digit token is more likely an identifier or a large price.
const COMPACT_YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;

/// Replace known non-standard space code points (narrow no-break space, thin
/// space, no-break space) with an ordinary space, then collapse any run of
/// two or more ordinary spaces to one.
pub fn clean_spaces(text: &str) -> String {
    let replaced = text.replace(['\u{202f}', '\u{2009}', '\u{00a0}'], " ");
    SPACE_RUN.replace_all(&replaced, " ").into_owned()
}

/// Rewrite recognizable date substrings to the long human-readable form.
///
/// Three independent patterns, attempted in fixed order so already-rewritten
/// text cannot be re-matched by a later numeric pattern:
/// 1. ISO `YYYY-MM-DD`, parsed strictly
/// 2. compact `YYYYMMDD`, parsed strictly, year constrained to 1900-2100
/// 3. slash `M/D/YYYY` or `MM/DD/YYYY`, parsed strictly
///
/// Each pattern scans the entire string and replaces every independent match.
pub fn format_dates(text: &str) -> String {
    let text = rewrite(&ISO_DATE, text, |s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(long_form)
    });
    let text = rewrite(&COMPACT_DATE, &text, |s| {
        let date = NaiveDate::parse_from_str(s, "%Y%m%d").ok()?;
        COMPACT_YEAR_RANGE
            .contains(&date.year())
            .then(|| long_form(date))
    });
    rewrite(&SLASH_DATE, &text, |s| {
        NaiveDate::parse_from_str(s, "%m/%d/%Y").ok().map(long_form)
    })
}

/// Full normalization: spaces first, then dates. Idempotent.
pub fn normalize(text: &str) -> String {
    format_dates(&clean_spaces(text))
}

fn long_form(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Replace every match of `re`, keeping the original substring wherever the
/// rewriter declines (parse failure, out-of-range year).
fn rewrite(re: &Regex, text: &str, rewriter: impl Fn(&str) -> Option<String>) -> String {
    re.replace_all(text, |caps: &Captures<'_>| {
        let matched = &caps[0];
        rewriter(matched).unwrap_or_else(|| matched.to_string())
    })
    .into_owned()
}
