//! Title, year and loose languages.
//!
//! Runs last, over whatever the earlier stages left behind. The title is the
//! first usable fragment before any extras, episode or part marker; the
//! fragment right after it may be a year, and the remaining fragments are
//! checked against the loose language words.

use std::sync::LazyLock;

use regex::Regex;

use super::{Marker, WorkingState};
use crate::registry::patterns;

static CLEANUP_DIVIDERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\. _\[\]]+").expect("divider pattern is valid"));

static CLEANUP_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-$|\($").expect("tail pattern is valid"));

/// Trailing year inside a title: `Aliens(1986)`, `Heat 1995`, `Title (2008/II)`.
/// The whole match is cut, group 1 is the year.
static TITLE_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(?(\d{4})(?:/|\\|\||-)?I*\)?$").expect("title year pattern is valid")
});

/// `-text` up to the next `/`, not directly after a marker.
static SECOND_TITLE: LazyLock<fancy_regex::Regex> = LazyLock::new(|| {
    fancy_regex::Regex::new(r"(?<!/TVSHOW/)(?<!/PART/)-([^/]+)")
        .expect("second title pattern is valid")
});

const STANDALONE_YEARS: std::ops::RangeInclusive<u16> = 1800..=3000;
const TITLE_YEARS: std::ops::RangeInclusive<u16> = 1919..=2099;

/// Collapse divider runs to single spaces and drop a dangling `-` or `(`.
fn clean_up_title(token: &str) -> String {
    let spaced = CLEANUP_DIVIDERS.replace_all(token, " ");
    let trimmed = spaced.trim();
    CLEANUP_TAIL.replace(trimmed, "").trim().to_string()
}

pub(super) fn extract(mut state: WorkingState<'_>) -> WorkingState<'_> {
    let registry = state.registry;
    let detect_languages = registry.config().language_detection;

    let tv_marker = state.rest.find(Marker::TvShow.tag());
    let part_marker = state.rest.find(Marker::Part.tag());
    let extra_marker = state
        .parsed
        .is_extra
        .then(|| state.rest.find(Marker::Extra.tag()))
        .flatten();
    let end = [extra_marker, tv_marker, part_marker]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(state.rest.len());

    let mut pieces = state.rest[..end]
        .split(['/', '[', ']'])
        .filter(|piece| !piece.is_empty())
        .map(clean_up_title);

    let mut title = pieces
        .by_ref()
        .find(|token| !token.is_empty() && !token.starts_with('-'))
        .unwrap_or_default();

    let mut year_checked = false;
    for token in pieces {
        if !year_checked && !token.is_empty() {
            year_checked = true;
            if let Some(year) = standalone_year(&token) {
                state.parsed.year = Some(year);
            }
        }

        if !detect_languages {
            if year_checked {
                break;
            }
            continue;
        }

        if token.chars().count() >= 2 && !token.contains('-') {
            for entry in registry.language_maps().loose() {
                if patterns::is_match(entry.pattern(), &token) {
                    state.parsed.add_language(entry.label());
                }
            }
        }
    }

    if state.parsed.year.is_none() {
        if let Some((year, cut_at)) = title_year(&title) {
            state.parsed.year = Some(year);
            title = title[..cut_at].trim().to_string();
        }
    }
    state.parsed.title = title;

    if let Some(index) = tv_marker {
        let after = &state.rest[index + Marker::TvShow.tag().len()..];
        if let Some(episode_title) = second_title(after) {
            if !registry.config().skip_episode_title {
                state.parsed.episode_title = Some(episode_title);
            }
        }
    }

    if let Some(index) = part_marker {
        if !state.parsed.is_extra {
            let after = &state.rest[index + Marker::Part.tag().len()..];
            state.parsed.part_title = second_title(after);
        }
    }

    state
}

fn standalone_year(token: &str) -> Option<u16> {
    token
        .parse::<u16>()
        .ok()
        .filter(|year| STANDALONE_YEARS.contains(year))
}

/// Year at the end of `title` and the byte offset where it starts.
fn title_year(title: &str) -> Option<(u16, usize)> {
    let caps = TITLE_YEAR.captures(title)?;
    let span = caps.get(0)?;
    let year = caps.get(1)?.as_str().parse::<u16>().ok()?;
    TITLE_YEARS.contains(&year).then_some((year, span.start()))
}

/// First non-empty `-text` fragment.
fn second_title(text: &str) -> Option<String> {
    SECOND_TITLE
        .captures_iter(text)
        .map_while(Result::ok)
        .filter_map(|caps| caps.get(1).map(|m| clean_up_title(m.as_str())))
        .find(|title| !title.is_empty())
}
