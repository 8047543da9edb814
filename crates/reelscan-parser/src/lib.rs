//! # reelscan-parser
//!
//! Turns movie and TV filenames into structured metadata: title, year,
//! season and episodes, part numbers, collection sets, languages, codecs,
//! resolution, video source and external ids.
//!
//! ## Quick Start
//!
//! ```
//! use reelscan_parser::parse;
//!
//! let result = parse("Show.Name.S02E05.HDTV.x264-GROUP.mkv", false);
//!
//! assert_eq!(result.title, "Show Name");
//! assert_eq!(result.season, Some(2));
//! assert_eq!(result.episodes, vec![5]);
//! assert_eq!(result.video_source.as_deref(), Some("HDTV"));
//! assert_eq!(result.video_codec.as_deref(), Some("H.264"));
//! ```
//!
//! ## Configurable Parsing
//!
//! ```
//! use reelscan_parser::Parser;
//! use reelscan_parser::config::ScannerConfig;
//!
//! let config = ScannerConfig::builder()
//!     .skip_keywords(["HDClub"])
//!     .movie_version_keywords(["directors cut"])
//!     .build();
//!
//! let parser = Parser::new(config).unwrap();
//! let result = parser.parse("Troy.Directors.Cut.HDClub.720p.mkv", false);
//! assert_eq!(result.title, "Troy");
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod registry;

mod parser;

use std::path::Path;
use std::sync::{Arc, LazyLock};

use tracing::debug;

pub use config::{LanguageDefinition, ScannerConfig, SourceKeyword};
pub use error::{ConfigError, Result};
pub use model::{MovieSet, ParsedFilename};
pub use registry::{PatternRegistry, SharedRegistry};

static DEFAULT_REGISTRY: LazyLock<Arc<PatternRegistry>> = LazyLock::new(|| {
    Arc::new(
        PatternRegistry::build(&ScannerConfig::default())
            .expect("default scanner configuration compiles"),
    )
});

/// Parse a filename with the default configuration.
///
/// `is_directory` marks DVD/Blu-ray folder images, which have no extension.
///
/// ```
/// use reelscan_parser::parse;
///
/// let result = parse("Aliens(1986).avi", false);
/// assert_eq!(result.title, "Aliens");
/// assert_eq!(result.year, Some(1986));
/// ```
pub fn parse(filename: &str, is_directory: bool) -> ParsedFilename {
    parser::parse_name(&DEFAULT_REGISTRY, filename, is_directory, None)
}

/// A configurable filename parser.
///
/// Cloning is cheap and clones share configuration: a change made through one
/// handle is seen by all of them. Each parse runs against the snapshot that
/// was current when it started.
///
/// ```
/// use reelscan_parser::{LanguageDefinition, Parser};
///
/// let parser = Parser::default();
/// parser
///     .add_language(LanguageDefinition::from_tokens("Russian", "RUS RU rus ru Rus", "RUS RU RUSSIAN"))
///     .unwrap();
///
/// let result = parser.parse("You Don't Mess with the Zohan.2008.Rus.DVDRip.avi", false);
/// assert_eq!(result.languages, vec!["Russian"]);
/// assert_eq!(result.year, Some(2008));
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    registry: SharedRegistry,
}

impl Parser {
    /// Create a parser, compiling `config` up front.
    pub fn new(config: ScannerConfig) -> Result<Self> {
        Ok(Self::with_registry(PatternRegistry::build(&config)?))
    }

    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            registry: SharedRegistry::new(registry),
        }
    }

    /// Parse a bare filename.
    pub fn parse(&self, filename: &str, is_directory: bool) -> ParsedFilename {
        let registry = self.registry.snapshot();
        parser::parse_name(&registry, filename, is_directory, None)
    }

    /// Parse the last component of `path`.
    ///
    /// When the name starts with a part or episode marker (`Part1 - ...`,
    /// `S01E02 ...`) the parent folder name stands in for the missing title.
    /// A name matching the configured `use_parent_regex` is not parsed at
    /// all: its folder is parsed as a directory instead.
    ///
    /// ```
    /// use std::path::Path;
    /// use reelscan_parser::{Parser, ScannerConfig};
    ///
    /// let config = ScannerConfig::builder().use_parent_regex(r"^VTS_\d+").build();
    /// let parser = Parser::new(config).unwrap();
    ///
    /// let result = parser.parse_path(Path::new("Heat (1995)/VTS_01_1.VOB"), false);
    /// assert_eq!(result.title, "Heat");
    /// assert_eq!(result.year, Some(1995));
    /// ```
    pub fn parse_path(&self, path: &Path, is_directory: bool) -> ParsedFilename {
        let registry = self.registry.snapshot();
        let (path, is_directory) = resolve_parent(&registry, path, is_directory);

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let parent = path
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy());

        parser::parse_name(&registry, &filename, is_directory, parent.as_deref())
    }

    /// The registry snapshot currently in effect.
    pub fn registry(&self) -> Arc<PatternRegistry> {
        self.registry.snapshot()
    }

    /// A copy of the active configuration.
    pub fn config(&self) -> ScannerConfig {
        self.registry.snapshot().config().clone()
    }

    /// Replace the whole configuration. On error nothing changes.
    pub fn configure(&self, config: ScannerConfig) -> Result<()> {
        self.registry.configure(config)
    }

    pub fn set_skip_keywords<I, S>(&self, keywords: I, case_sensitive: bool) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        self.registry.update(|config| {
            config.skip_keywords = keywords;
            config.skip_case_sensitive = case_sensitive;
        })
    }

    pub fn skip_keywords(&self) -> Vec<String> {
        self.config().skip_keywords
    }

    pub fn set_skip_regex_keywords<I, S>(&self, patterns: I, case_sensitive: bool) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        self.registry.update(|config| {
            config.skip_regex_keywords = patterns;
            config.skip_regex_case_sensitive = case_sensitive;
        })
    }

    pub fn skip_regex_keywords(&self) -> Vec<String> {
        self.config().skip_regex_keywords
    }

    pub fn set_extras_keywords<I, S>(&self, keywords: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        self.registry.update(|config| config.extras_keywords = keywords)
    }

    pub fn extras_keywords(&self) -> Vec<String> {
        self.config().extras_keywords
    }

    pub fn set_movie_version_keywords<I, S>(&self, keywords: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        self.registry
            .update(|config| config.movie_version_keywords = keywords)
    }

    pub fn movie_version_keywords(&self) -> Vec<String> {
        self.config().movie_version_keywords
    }

    pub fn set_source_keywords(&self, sources: Vec<SourceKeyword>) -> Result<()> {
        self.registry.update(|config| config.sources = sources)
    }

    pub fn source_keywords(&self) -> Vec<SourceKeyword> {
        self.config().sources
    }

    pub fn set_language_detection(&self, enabled: bool) -> Result<()> {
        self.registry
            .update(|config| config.language_detection = enabled)
    }

    pub fn is_language_detection(&self) -> bool {
        self.registry.snapshot().config().language_detection
    }

    /// Remove every language, including the built-in English entry.
    pub fn clear_languages(&self) -> Result<()> {
        self.registry.update(|config| config.languages.clear())
    }

    /// Append a language. Later definitions are tried after earlier ones.
    pub fn add_language(&self, language: LanguageDefinition) -> Result<()> {
        self.registry.update(|config| config.languages.push(language))
    }

    pub fn set_skip_episode_title(&self, enabled: bool) -> Result<()> {
        self.registry
            .update(|config| config.skip_episode_title = enabled)
    }

    /// Set or clear the expression that sends `parse_path` to the folder.
    pub fn set_use_parent_regex(&self, pattern: Option<String>) -> Result<()> {
        self.registry.update(|config| config.use_parent_regex = pattern)
    }

    pub fn use_parent_regex(&self) -> Option<String> {
        self.config().use_parent_regex
    }

    pub fn set_archive_scan_rar(&self, enabled: bool) -> Result<()> {
        self.registry
            .update(|config| config.archive_scan_rar = enabled)
    }

    /// Map a language tag onto a configured language id.
    ///
    /// ```
    /// use reelscan_parser::Parser;
    ///
    /// let parser = Parser::default();
    /// assert_eq!(parser.determine_language("eng"), "English");
    /// assert_eq!(parser.determine_language("xx"), "xx");
    /// ```
    pub fn determine_language(&self, tag: &str) -> String {
        self.registry
            .snapshot()
            .language_maps()
            .determine_language(tag)
    }

    /// Lowercase loose tokens of a language id joined by `|`.
    ///
    /// ```
    /// use reelscan_parser::Parser;
    ///
    /// assert_eq!(Parser::default().language_list("English"), "eng|en|english");
    /// ```
    pub fn language_list(&self, id: &str) -> String {
        self.registry.snapshot().language_maps().language_list(id)
    }
}

/// The path actually parsed by `parse_path`: `path` itself, or its folder
/// when the file name matches the use-parent expression. An archive folder
/// (`*.rar`, `*.001`) is skipped when archive scanning is on.
fn resolve_parent<'a>(
    registry: &PatternRegistry,
    path: &'a Path,
    is_directory: bool,
) -> (&'a Path, bool) {
    let Some(pattern) = registry.use_parent_pattern() else {
        return (path, is_directory);
    };
    let Some(name) = path.file_name() else {
        return (path, is_directory);
    };
    if !registry::patterns::is_match(pattern, &name.to_string_lossy()) {
        return (path, is_directory);
    }
    let Some(parent) = named_parent(path) else {
        return (path, is_directory);
    };

    let target = if registry.config().archive_scan_rar && is_archive_folder(parent) {
        named_parent(parent).unwrap_or(parent)
    } else {
        parent
    };

    debug!(
        file = %path.display(),
        folder = %target.display(),
        "use parent regex matched, parsing folder name"
    );
    (target, true)
}

fn named_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|parent| parent.file_name().is_some())
}

fn is_archive_folder(folder: &Path) -> bool {
    folder.file_name().is_some_and(|name| {
        let name = name.to_string_lossy().to_lowercase();
        name.ends_with("rar") || name.ends_with("001")
    })
}

impl Default for Parser {
    fn default() -> Self {
        Self::with_registry(PatternRegistry::clone(&DEFAULT_REGISTRY))
    }
}
