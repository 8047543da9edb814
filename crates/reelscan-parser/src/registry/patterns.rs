//! Delimiter-aware pattern construction and total matching helpers.
//!
//! Names are split into tokens by structural delimiters (`.`, `[`, `]`, `(`,
//! `)`) and padded by soft delimiters (space, `_`, `-`, `,`). A keyword counts
//! as a *word* when it sits between any two delimiters, and as a *token* when
//! only soft delimiters separate it from structural ones.

use std::borrow::Cow;

use fancy_regex::{Captures, Match, Regex};
use tracing::trace;

use crate::error::{ConfigError, Result};

const TOKEN_DELIMITERS: &str = r"\.\[\]\(\)";
const NOTOKEN_DELIMITERS: &str = r" _\-,";

fn any_delimiter() -> String {
    format!("[{NOTOKEN_DELIMITERS}{TOKEN_DELIMITERS}]")
}

/// `body` as a whole word: preceded by start-of-text or a delimiter, followed
/// by a delimiter or end-of-text. Delimiters are not consumed.
pub(crate) fn word(body: &str) -> String {
    let delim = any_delimiter();
    format!("(?:^|(?<={delim}))(?:{body})(?={delim}|$)")
}

/// `body` as a standalone token. The surrounding structural delimiters and
/// padding are part of the match.
pub(crate) fn token(body: &str) -> String {
    format!(
        "(?:[{TOKEN_DELIMITERS}]|^)[{NOTOKEN_DELIMITERS}]*(?:{body})[{NOTOKEN_DELIMITERS}]*(?:[{TOKEN_DELIMITERS}]|$)"
    )
}

/// A square-bracketed chunk containing `keyword`; group 1 is the inner text.
pub(crate) fn bracketed(keyword: &str) -> String {
    format!(r"\[([^\[\]]*{}[^\[]*)\]", regex::escape(keyword))
}

/// Literal alternation of `tokens`, skipping blanks.
pub(crate) fn alternation<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    tokens
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

/// A multi-word phrase where each space matches any single delimiter.
pub(crate) fn phrase(keyword: &str) -> String {
    let delim = any_delimiter();
    keyword
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(&delim)
}

pub(crate) fn compile(kind: &'static str, source: &str, case_insensitive: bool) -> Result<Regex> {
    let full: Cow<'_, str> = if case_insensitive {
        Cow::Owned(format!("(?i){source}"))
    } else {
        Cow::Borrowed(source)
    };
    Regex::new(&full).map_err(|e| ConfigError::invalid_pattern(kind, full.into_owned(), e))
}

/// First match of `pattern`, treating engine failures as no match.
pub(crate) fn find<'t>(pattern: &Regex, text: &'t str) -> Option<Match<'t>> {
    match pattern.find(text) {
        Ok(found) => found,
        Err(e) => {
            trace!(pattern = pattern.as_str(), error = %e, "pattern gave up");
            None
        }
    }
}

pub(crate) fn captures<'t>(pattern: &Regex, text: &'t str) -> Option<Captures<'t>> {
    match pattern.captures(text) {
        Ok(found) => found,
        Err(e) => {
            trace!(pattern = pattern.as_str(), error = %e, "pattern gave up");
            None
        }
    }
}

pub(crate) fn is_match(pattern: &Regex, text: &str) -> bool {
    find(pattern, text).is_some()
}

/// Replace every match of `pattern` with `with`. Matching stops quietly at the
/// first engine failure, keeping whatever was replaced so far.
pub(crate) fn replace_all(pattern: &Regex, text: &str, with: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for found in pattern.find_iter(text) {
        let Ok(found) = found else { break };
        out.push_str(&text[last..found.start()]);
        out.push_str(with);
        last = found.end();
    }
    out.push_str(&text[last..]);
    out
}
