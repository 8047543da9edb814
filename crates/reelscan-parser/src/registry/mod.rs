//! Compiled recognizers shared by every parse.
//!
//! A [`PatternRegistry`] is built once from a [`ScannerConfig`] and never
//! mutated. [`SharedRegistry`] publishes new snapshots atomically so that a
//! parse in flight keeps the registry it started with.

mod language;
pub(crate) mod patterns;
pub(crate) mod vocabulary;

use std::sync::Arc;

use fancy_regex::Regex;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::ScannerConfig;
use crate::error::{ConfigError, Result};

pub use language::LanguageMaps;

/// A canonical label and the recognizer for all of its spellings.
#[derive(Debug, Clone)]
pub struct KeywordPattern<L> {
    label: L,
    pattern: Regex,
}

impl<L> KeywordPattern<L> {
    pub(crate) fn new(label: L, pattern: Regex) -> Self {
        Self { label, pattern }
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

/// Season/episode token: `S01E02`, `1x02`, `S2008E11E12`, `3x101x19x3`.
const SEASON_EPISODE: &str =
    r"(?<![0-9])((s[0-9]{1,4})|[0-9]{1,4})(?:(\s|\.|x))??((?:(e|x)\s??[0-9]+)+)";

/// Part markers in priority order.
const PART_MARKERS: [PartMarker; 3] = [
    PartMarker::Word("CD ([0-9]+)"),
    PartMarker::Word("(?:(?:CD)|(?:DISC)|(?:DISK)|(?:PART))([0-9]+)"),
    PartMarker::Token("([0-9]{1,2})[ \\.]{0,1}DVD"),
];

enum PartMarker {
    Word(&'static str),
    Token(&'static str),
}

impl PartMarker {
    fn source(&self) -> (String, bool) {
        match self {
            Self::Word(body) => (patterns::word(body), true),
            Self::Token(body) => (patterns::token(body), false),
        }
    }
}

/// Immutable set of recognizers compiled from one configuration.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    config: ScannerConfig,
    strip: Vec<Regex>,
    extras: Vec<Regex>,
    versions: Vec<Regex>,
    fps: Vec<KeywordPattern<u32>>,
    audio_codecs: Vec<KeywordPattern<String>>,
    video_codecs: Vec<KeywordPattern<String>>,
    resolutions: Vec<KeywordPattern<String>>,
    video_sources: Vec<KeywordPattern<String>>,
    season_episode: Regex,
    parts: Vec<Regex>,
    leading_fragments: Vec<Regex>,
    use_parent: Option<Regex>,
    languages: LanguageMaps,
}

impl PatternRegistry {
    /// Compile `config` into a registry.
    ///
    /// Blank keywords are ignored. Invalid user expressions and unnamed
    /// language or source entries are reported as [`ConfigError`].
    pub fn build(config: &ScannerConfig) -> Result<Self> {
        let mut strip = Vec::new();
        for keyword in non_blank(&config.skip_keywords) {
            let source = patterns::word(&regex::escape(keyword));
            strip.push(patterns::compile(
                "skip keyword",
                &source,
                !config.skip_case_sensitive,
            )?);
        }
        for expression in non_blank(&config.skip_regex_keywords) {
            strip.push(patterns::compile(
                "skip regex",
                expression,
                !config.skip_regex_case_sensitive,
            )?);
        }

        let extras = non_blank(&config.extras_keywords)
            .map(|k| patterns::compile("extras keyword", &patterns::bracketed(k), true))
            .collect::<Result<Vec<_>>>()?;

        let versions = non_blank(&config.movie_version_keywords)
            .map(|k| {
                patterns::compile(
                    "movie version keyword",
                    &patterns::word(&patterns::phrase(k)),
                    true,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let fps = vocabulary::FRAME_RATES
            .iter()
            .map(|rate| {
                let source = patterns::word(&format!("p{rate}|{rate}p"));
                Ok(KeywordPattern::new(*rate, patterns::compile("fps", &source, true)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let audio_codecs = keyword_table("audio codec", vocabulary::AUDIO_CODECS)?;
        let video_codecs = keyword_table("video codec", vocabulary::VIDEO_CODECS)?;
        let resolutions = keyword_table("resolution", vocabulary::RESOLUTIONS)?;

        let mut video_sources = Vec::with_capacity(config.sources.len());
        for source in &config.sources {
            let label = source.label.trim();
            if label.is_empty() {
                return Err(ConfigError::EmptySourceLabel);
            }
            let spellings = std::iter::once(label).chain(source.aliases.iter().map(String::as_str));
            let body = patterns::alternation(spellings);
            video_sources.push(KeywordPattern::new(
                label.to_string(),
                patterns::compile("video source", &patterns::word(&body), true)?,
            ));
        }

        let season_episode = patterns::compile("season/episode", SEASON_EPISODE, true)?;

        let mut parts = Vec::with_capacity(PART_MARKERS.len());
        let mut leading_fragments = Vec::with_capacity(PART_MARKERS.len() + 1);
        for marker in &PART_MARKERS {
            let (source, case_insensitive) = marker.source();
            parts.push(patterns::compile("part", &source, case_insensitive)?);
            leading_fragments.push(patterns::compile(
                "leading part",
                &format!("^(?:{source})"),
                case_insensitive,
            )?);
        }
        leading_fragments.push(patterns::compile(
            "leading season/episode",
            &format!("^(?:{SEASON_EPISODE})"),
            true,
        )?);

        let use_parent = config
            .use_parent_regex
            .as_deref()
            .map(str::trim)
            .filter(|expression| !expression.is_empty())
            .map(|expression| patterns::compile("use parent regex", expression, true))
            .transpose()?;

        let languages = LanguageMaps::build(&config.languages)?;

        if config.language_detection && languages.strict().is_empty() && languages.loose().is_empty() {
            warn!("language detection is enabled but no language has any token");
        }

        debug!(
            strip = strip.len(),
            extras = extras.len(),
            versions = versions.len(),
            sources = video_sources.len(),
            languages = config.languages.len(),
            "compiled pattern registry"
        );

        Ok(Self {
            config: config.clone(),
            strip,
            extras,
            versions,
            fps,
            audio_codecs,
            video_codecs,
            resolutions,
            video_sources,
            season_episode,
            parts,
            leading_fragments,
            use_parent,
            languages,
        })
    }

    /// The configuration this registry was compiled from.
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Skip words followed by skip expressions.
    pub fn strip_patterns(&self) -> &[Regex] {
        &self.strip
    }

    /// Bracketed extras markers, group 1 holding the bracket text.
    pub fn extras_patterns(&self) -> &[Regex] {
        &self.extras
    }

    pub fn version_patterns(&self) -> &[Regex] {
        &self.versions
    }

    pub fn fps_map(&self) -> &[KeywordPattern<u32>] {
        &self.fps
    }

    pub fn audio_codec_map(&self) -> &[KeywordPattern<String>] {
        &self.audio_codecs
    }

    pub fn video_codec_map(&self) -> &[KeywordPattern<String>] {
        &self.video_codecs
    }

    pub fn resolution_map(&self) -> &[KeywordPattern<String>] {
        &self.resolutions
    }

    pub fn video_source_map(&self) -> &[KeywordPattern<String>] {
        &self.video_sources
    }

    /// The season/episode recognizer. Group 1 is the season token, group 4
    /// the run of episode tokens.
    pub fn season_episode_pattern(&self) -> &Regex {
        &self.season_episode
    }

    /// Part markers in priority order, group 1 holding the number.
    pub fn part_patterns(&self) -> &[Regex] {
        &self.parts
    }

    /// Part and season/episode markers anchored at the start of a name. A
    /// name starting with one of these lacks its own title.
    pub fn leading_fragment_patterns(&self) -> &[Regex] {
        &self.leading_fragments
    }

    /// File names that should be parsed through their folder instead.
    pub fn use_parent_pattern(&self) -> Option<&Regex> {
        self.use_parent.as_ref()
    }

    pub fn language_maps(&self) -> &LanguageMaps {
        &self.languages
    }
}

fn non_blank(items: &[String]) -> impl Iterator<Item = &str> {
    items.iter().map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn keyword_table(
    kind: &'static str,
    table: &[(&str, &[&str])],
) -> Result<Vec<KeywordPattern<String>>> {
    table
        .iter()
        .map(|(label, aliases)| {
            let body = patterns::alternation(std::iter::once(*label).chain(aliases.iter().copied()));
            let pattern = patterns::compile(kind, &patterns::word(&body), true)?;
            Ok(KeywordPattern::new(label.to_string(), pattern))
        })
        .collect()
}

/// A registry snapshot that can be replaced while parses are running.
///
/// Readers take an `Arc` to the current snapshot; writers compile a new
/// registry off to the side and swap it in only when compilation succeeded.
#[derive(Debug, Clone)]
pub struct SharedRegistry {
    current: Arc<RwLock<Arc<PatternRegistry>>>,
}

impl SharedRegistry {
    pub fn new(registry: PatternRegistry) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(registry))),
        }
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<PatternRegistry> {
        Arc::clone(&self.current.read())
    }

    /// Compile `config` and publish it. On error the active snapshot is kept.
    pub fn configure(&self, config: ScannerConfig) -> Result<()> {
        let registry = PatternRegistry::build(&config)?;
        *self.current.write() = Arc::new(registry);
        Ok(())
    }

    /// Apply `change` to a copy of the active configuration and publish the
    /// result. Concurrent updates are serialized.
    pub fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut ScannerConfig),
    {
        let mut guard = self.current.write();
        let mut config = guard.config().clone();
        change(&mut config);
        let registry = PatternRegistry::build(&config)?;
        *guard = Arc::new(registry);
        Ok(())
    }
}
