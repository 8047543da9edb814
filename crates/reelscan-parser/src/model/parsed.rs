//! The record produced for every parsed name.

use std::collections::BTreeMap;

/// Membership of a title in a collection, from a `[SET name-index]` marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieSet {
    pub title: String,
    /// Position within the set, when the marker carries one.
    pub index: Option<u32>,
}

impl MovieSet {
    pub fn new(title: impl Into<String>, index: Option<u32>) -> Self {
        Self {
            title: title.into(),
            index,
        }
    }
}

/// Metadata recovered from a movie or episode filename.
///
/// Every field has an explicit absent state; a name that carries no
/// recognizable metadata still produces a record with only `title` set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedFilename {
    /// Lowercase file extension, empty for directories.
    pub extension: String,
    /// Uppercase extension, or `DVD` for directories.
    pub container: String,
    pub title: String,
    /// Release year in `1800..=3000`.
    pub year: Option<u16>,

    // Episodes
    /// Season number. `None` means the name is not a TV episode.
    pub season: Option<u32>,
    /// Episode numbers in the order they appear.
    pub episodes: Vec<u32>,
    pub episode_title: Option<String>,

    // Multi-part releases and extras
    pub part: Option<u32>,
    /// Text following the part marker, or the bracket text of an extra.
    pub part_title: Option<String>,
    pub is_extra: bool,

    pub sets: Vec<MovieSet>,
    /// Language ids, without duplicates.
    pub languages: Vec<String>,

    // Technical keywords
    pub fps: Option<u32>,
    pub audio_codec: Option<String>,
    pub video_codec: Option<String>,
    pub hd_resolution: Option<String>,
    pub video_source: Option<String>,

    /// External ids keyed by provider (`imdb`, `tmdb`, ...).
    pub ids: BTreeMap<String, String>,
}

impl ParsedFilename {
    /// Whether a season/episode marker was found.
    pub fn is_tv_show(&self) -> bool {
        self.season.is_some()
    }

    pub(crate) fn add_language(&mut self, id: &str) {
        if !self.languages.iter().any(|l| l == id) {
            self.languages.push(id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_movie() {
        let parsed = ParsedFilename::default();
        assert!(!parsed.is_tv_show());
        assert!(parsed.title.is_empty());
        assert!(parsed.episodes.is_empty());
        assert!(!parsed.is_extra);
    }

    #[test]
    fn test_add_language_suppresses_duplicates() {
        let mut parsed = ParsedFilename::default();
        parsed.add_language("English");
        parsed.add_language("French");
        parsed.add_language("English");
        assert_eq!(parsed.languages, vec!["English", "French"]);
    }
}
