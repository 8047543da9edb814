//! The filename pipeline.
//!
//! A name flows through a fixed sequence of stages. Each stage takes the
//! [`WorkingState`] by value, records what it recognized in the record under
//! construction, and hands back the state with the recognized text replaced by
//! a separator or a marker. Nothing is ever deleted outright, so the tokens on
//! either side of a removed keyword can never run together.
//!
//! Order matters: technical keywords are removed before the season/episode
//! search so `x264` cannot pass for an episode, and parts are searched after
//! episodes so `S01E02` is never read as a part number.

mod episode;
mod structure;
mod technical;
mod title;

use tracing::trace;

use crate::model::ParsedFilename;
use crate::registry::patterns;
use crate::registry::{KeywordPattern, PatternRegistry};

/// Replacement for removed keywords.
pub(crate) const SEPARATOR: &str = "./.";

/// Markers left in the working string for title extraction to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker {
    Extra,
    TvShow,
    Part,
    Set,
}

impl Marker {
    /// Text spliced in place of the recognized span.
    pub(crate) fn replacement(self) -> &'static str {
        match self {
            Self::Extra => "./EXTRA/.",
            Self::TvShow => "./TVSHOW/.",
            Self::Part => " /PART/ ",
            Self::Set => " / ",
        }
    }

    /// Text searched for when locating the marker afterwards.
    pub(crate) fn tag(self) -> &'static str {
        match self {
            Self::Extra => "/EXTRA/",
            Self::TvShow => "/TVSHOW/",
            Self::Part => "/PART/",
            Self::Set => "/",
        }
    }
}

/// The name as it is being taken apart, plus everything recognized so far.
pub(crate) struct WorkingState<'r> {
    pub(crate) registry: &'r PatternRegistry,
    pub(crate) rest: String,
    pub(crate) parsed: ParsedFilename,
    is_directory: bool,
    parent: Option<&'r str>,
}

impl<'r> WorkingState<'r> {
    fn new(
        registry: &'r PatternRegistry,
        filename: &str,
        is_directory: bool,
        parent: Option<&'r str>,
    ) -> Self {
        Self {
            registry,
            rest: filename.to_string(),
            parsed: ParsedFilename::default(),
            is_directory,
            parent,
        }
    }

    /// Replace the byte range `start..end` of the working string.
    pub(crate) fn cut(&mut self, start: usize, end: usize, with: &str) {
        self.rest.replace_range(start..end, with);
    }

    /// Find the first entry of `map` matching anywhere, replace its match with
    /// the separator and return its label.
    pub(crate) fn seek<L: Clone>(&mut self, map: &[KeywordPattern<L>]) -> Option<L> {
        map.iter().find_map(|entry| {
            let found = patterns::find(entry.pattern(), &self.rest)?;
            let (start, end) = (found.start(), found.end());
            self.cut(start, end, SEPARATOR);
            Some(entry.label().clone())
        })
    }
}

type Stage = for<'r> fn(WorkingState<'r>) -> WorkingState<'r>;

const STAGES: &[(&str, Stage)] = &[
    ("extension", split_extension),
    ("skip keywords", strip_skip_keywords),
    ("parent folder", complete_from_parent),
    ("movie version", strip_versions),
    ("extras", detect_extras),
    ("technical keywords", technical::detect),
    ("season/episode", episode::detect),
    ("part", structure::detect_part),
    ("sets", structure::detect_sets),
    ("ids", structure::detect_ids),
    ("languages", detect_strict_languages),
    ("title", title::extract),
];

/// Run every stage over `filename` with one registry snapshot.
pub(crate) fn parse_name(
    registry: &PatternRegistry,
    filename: &str,
    is_directory: bool,
    parent: Option<&str>,
) -> ParsedFilename {
    trace!(filename, is_directory, "parsing");
    let mut state = WorkingState::new(registry, filename, is_directory, parent);
    for (name, stage) in STAGES {
        state = stage(state);
        trace!(stage = *name, rest = %state.rest, "stage done");
    }
    state.parsed
}

fn split_extension(mut state: WorkingState<'_>) -> WorkingState<'_> {
    if state.is_directory {
        state.parsed.container = "DVD".to_string();
        state.parsed.video_source = Some("DVD".to_string());
    } else if let Some(dot) = state.rest.rfind('.') {
        let extension = &state.rest[dot + 1..];
        state.parsed.extension = extension.to_lowercase();
        state.parsed.container = extension.to_uppercase();
        state.rest.truncate(dot);
    }
    state
}

/// Remove skip keywords and skip expressions from `text`.
pub(crate) fn strip_skipped(registry: &PatternRegistry, text: &str) -> String {
    registry
        .strip_patterns()
        .iter()
        .fold(text.to_string(), |rest, pattern| {
            patterns::replace_all(pattern, &rest, SEPARATOR)
        })
}

fn strip_skip_keywords(mut state: WorkingState<'_>) -> WorkingState<'_> {
    state.rest = strip_skipped(state.registry, &state.rest);
    state
}

/// A name that starts with a part or episode marker has no title of its own;
/// borrow the parent folder name.
fn complete_from_parent(mut state: WorkingState<'_>) -> WorkingState<'_> {
    let Some(parent) = state.parent else {
        return state;
    };
    let incomplete = state
        .registry
        .leading_fragment_patterns()
        .iter()
        .any(|pattern| patterns::is_match(pattern, &state.rest));
    if incomplete {
        let prefix = strip_skipped(state.registry, parent);
        state.rest = format!("{prefix}{SEPARATOR}{}", state.rest);
    }
    state
}

fn strip_versions(mut state: WorkingState<'_>) -> WorkingState<'_> {
    for pattern in state.registry.version_patterns() {
        state.rest = patterns::replace_all(pattern, &state.rest, SEPARATOR);
    }
    state
}

fn detect_extras(mut state: WorkingState<'_>) -> WorkingState<'_> {
    let registry = state.registry;
    for pattern in registry.extras_patterns() {
        let found = patterns::captures(pattern, &state.rest).and_then(|caps| {
            let whole = caps.get(0)?;
            Some((whole.start(), whole.end(), caps.get(1)?.as_str().to_string()))
        });
        let Some((start, end, inner)) = found else {
            continue;
        };
        state.parsed.is_extra = true;
        state.parsed.part_title = Some(inner);
        state.cut(start, end, Marker::Extra.replacement());
        break;
    }
    state
}

/// Upper bound on strict language removals, guarding against a token that
/// keeps matching its own replacement.
const MAX_LANGUAGE_MARKERS: usize = 64;

fn detect_strict_languages(mut state: WorkingState<'_>) -> WorkingState<'_> {
    if !state.registry.config().language_detection {
        return state;
    }
    let registry = state.registry;
    for _ in 0..MAX_LANGUAGE_MARKERS {
        let before = state.rest.clone();
        let Some(language) = state.seek(registry.language_maps().strict()) else {
            break;
        };
        state.parsed.add_language(&language);
        if state.rest == before {
            break;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScannerConfig;

    fn registry() -> PatternRegistry {
        PatternRegistry::build(&ScannerConfig::default()).unwrap()
    }

    fn run(name: &str) -> ParsedFilename {
        parse_name(&registry(), name, false, None)
    }

    #[test]
    fn test_extension_split() {
        let parsed = run("Some.Movie.MKV");
        assert_eq!(parsed.extension, "mkv");
        assert_eq!(parsed.container, "MKV");
        assert_eq!(parsed.title, "Some Movie");
    }

    #[test]
    fn test_no_extension() {
        let parsed = run("Role Models [2008]");
        assert_eq!(parsed.extension, "");
        assert_eq!(parsed.container, "");
        assert_eq!(parsed.title, "Role Models");
        assert_eq!(parsed.year, Some(2008));
    }

    #[test]
    fn test_directory_is_dvd_image() {
        let parsed = parse_name(&registry(), "Some.Movie.2001", true, None);
        assert_eq!(parsed.extension, "");
        assert_eq!(parsed.container, "DVD");
        assert_eq!(parsed.video_source.as_deref(), Some("DVD"));
        assert_eq!(parsed.title, "Some Movie");
        assert_eq!(parsed.year, Some(2001));
    }

    #[test]
    fn test_extras_bracket() {
        let parsed = run("The.Matrix.[Trailer-Unrated].avi");
        assert!(parsed.is_extra);
        assert_eq!(parsed.part_title.as_deref(), Some("Trailer-Unrated"));
        assert_eq!(parsed.title, "The Matrix");
    }

    #[test]
    fn test_trailer_outside_brackets_is_not_extra() {
        let parsed = run("The.Matrix 720P - Unrated Trailer.avi");
        assert!(!parsed.is_extra);
        assert_eq!(parsed.title, "The Matrix");
        assert_eq!(parsed.hd_resolution.as_deref(), Some("720p"));
    }

    #[test]
    fn test_parent_folder_ignored_for_complete_names() {
        let parsed = parse_name(&registry(), "Heat.1995.avi", false, Some("Crime"));
        assert_eq!(parsed.title, "Heat");
    }

    #[test]
    fn test_marker_tags_are_inside_replacements() {
        for marker in [Marker::Extra, Marker::TvShow, Marker::Part, Marker::Set] {
            assert!(marker.replacement().contains(marker.tag()));
        }
    }

    #[test]
    fn test_strict_language_loop_terminates_on_self_matching_token() {
        let config = ScannerConfig::builder()
            .languages(vec![crate::config::LanguageDefinition::new(
                "Slash",
                ["/"],
                Vec::<String>::new(),
            )])
            .build();
        let registry = PatternRegistry::build(&config).unwrap();
        let parsed = parse_name(&registry, "Movie./.mkv", false, None);
        assert_eq!(parsed.languages, vec!["Slash"]);
    }
}
