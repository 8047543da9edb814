//! Parts, collection sets and external ids.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{Marker, WorkingState, SEPARATOR};
use crate::model::MovieSet;
use crate::registry::patterns;

static SET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[SET(?:\s|-)([^\[\]]*)\]").expect("set pattern is valid")
});

static SET_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\s*(\d+)\s*$").expect("set index pattern is valid"));

static ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[ID ([^\[\]]*)\]").expect("id pattern is valid"));

static IMDB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(tt\d{6,7})\b").expect("imdb pattern is valid"));

static ID_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s+]").expect("id separator pattern is valid"));

const IMDB_PROVIDER: &str = "imdb";

/// The first part pattern (in priority order) with any match wins.
pub(super) fn detect_part(mut state: WorkingState<'_>) -> WorkingState<'_> {
    let registry = state.registry;
    for pattern in registry.part_patterns() {
        let found = patterns::captures(pattern, &state.rest).and_then(|caps| {
            let whole = caps.get(0)?;
            let number = caps.get(1)?.as_str().parse::<u32>().ok()?;
            Some((whole.start(), whole.end(), number))
        });
        if let Some((start, end, number)) = found {
            state.cut(start, end, Marker::Part.replacement());
            state.parsed.part = Some(number);
            break;
        }
    }
    state
}

pub(super) fn detect_sets(mut state: WorkingState<'_>) -> WorkingState<'_> {
    while let Some((start, end, text)) = SET.captures(&state.rest).and_then(|caps| {
        let whole = caps.get(0)?;
        Some((whole.start(), whole.end(), caps.get(1)?.as_str().to_string()))
    }) {
        state.cut(start, end, Marker::Set.replacement());
        state.parsed.sets.push(split_set(&text));
    }
    state
}

/// `X-Men - 99` becomes title `X-Men` with index 99.
fn split_set(text: &str) -> MovieSet {
    let indexed = SET_INDEX.captures(text).and_then(|caps| {
        let whole = caps.get(0)?;
        let index = caps.get(1)?.as_str().parse::<u32>().ok()?;
        Some((whole.start(), index))
    });
    match indexed {
        Some((start, index)) => MovieSet::new(text[..start].trim(), Some(index)),
        None => MovieSet::new(text.trim(), None),
    }
}

pub(super) fn detect_ids(mut state: WorkingState<'_>) -> WorkingState<'_> {
    let explicit = ID.captures(&state.rest).and_then(|caps| {
        let whole = caps.get(0)?;
        Some((whole.start(), whole.end(), caps.get(1)?.as_str().to_string()))
    });

    if let Some((start, end, content)) = explicit {
        state.cut(start, end, SEPARATOR);
        let mut pieces: Vec<&str> = ID_SPLIT.split(&content).collect();
        while pieces.last() == Some(&"") {
            pieces.pop();
        }
        match pieces.as_slice() {
            [provider, id] if !provider.is_empty() && !id.is_empty() => {
                state
                    .parsed
                    .ids
                    .insert(provider.to_lowercase(), id.to_string());
            }
            _ => debug!(content = %content, "ignoring malformed id marker"),
        }
        return state;
    }

    let imdb = IMDB.captures(&state.rest).and_then(|caps| {
        let whole = caps.get(0)?;
        Some((whole.start(), whole.end(), caps.get(1)?.as_str().to_string()))
    });
    if let Some((start, end, id)) = imdb {
        state.cut(start, end, SEPARATOR);
        state.parsed.ids.insert(IMDB_PROVIDER.to_string(), id);
    }
    state
}
