//! Scanner configuration.
//!
//! A [`ScannerConfig`] is plain data. It is compiled into a
//! [`PatternRegistry`](crate::registry::PatternRegistry) before any filename
//! is parsed, so invalid entries are reported up front.

use crate::registry::vocabulary;

/// A video source label together with the spellings that map onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceKeyword {
    /// Canonical label, also matched literally.
    pub label: String,
    /// Alternative spellings.
    #[cfg_attr(feature = "serde", serde(default))]
    pub aliases: Vec<String>,
}

impl SourceKeyword {
    pub fn new<I, S>(label: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }
}

/// Tokens identifying one language.
///
/// `strict` tokens are matched case-sensitively and must stand alone between
/// structural delimiters (`.`, `[`, `]`, `(`, `)`). `loose` tokens are matched
/// case-insensitively as whole words, and only in the leftover fragments after
/// the title.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanguageDefinition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strict: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loose: Vec<String>,
}

impl LanguageDefinition {
    pub fn new<I, J, S, T>(id: impl Into<String>, strict: I, loose: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            id: id.into(),
            strict: strict.into_iter().map(Into::into).collect(),
            loose: loose.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a definition from token lists separated by spaces or commas.
    ///
    /// ```
    /// use reelscan_parser::config::LanguageDefinition;
    ///
    /// let lang = LanguageDefinition::from_tokens("German", "GER,DE, GERMAN ger", "GER DE");
    /// assert_eq!(lang.strict, vec!["GER", "DE", "GERMAN", "ger"]);
    /// assert_eq!(lang.loose, vec!["GER", "DE"]);
    /// ```
    pub fn from_tokens(id: impl Into<String>, strict: &str, loose: &str) -> Self {
        Self::new(id, split_tokens(strict), split_tokens(loose))
    }

    pub(crate) fn english() -> Self {
        Self::new(
            vocabulary::ENGLISH_ID,
            vocabulary::ENGLISH_STRICT.iter().copied(),
            vocabulary::ENGLISH_LOOSE.iter().copied(),
        )
    }
}

fn split_tokens(tokens: &str) -> Vec<String> {
    tokens
        .split([' ', ','])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration for the filename scanner.
///
/// ```
/// use reelscan_parser::config::ScannerConfig;
///
/// let config = ScannerConfig::builder()
///     .skip_keywords(["xor", "SMB"])
///     .extras_keywords(["trailer", "bonus"])
///     .language_detection(false)
///     .build();
///
/// assert!(config.skip_case_sensitive);
/// assert!(!config.language_detection);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScannerConfig {
    /// Literal words removed before anything else (release groups, site tags).
    pub skip_keywords: Vec<String>,

    /// Whether skip words match case-sensitively.
    /// Default: true
    pub skip_case_sensitive: bool,

    /// Regular expressions removed together with the skip words.
    pub skip_regex_keywords: Vec<String>,

    /// Whether skip expressions match case-sensitively.
    /// Default: true
    pub skip_regex_case_sensitive: bool,

    /// Keywords that mark a bracketed chunk as an extra (trailer, featurette).
    /// Default: `["trailer"]`
    pub extras_keywords: Vec<String>,

    /// Edition phrases discarded from the name. A space inside a phrase
    /// matches any delimiter, so `directors cut` also hits `Directors.Cut`.
    pub movie_version_keywords: Vec<String>,

    /// Video source vocabulary, tried in order.
    pub sources: Vec<SourceKeyword>,

    /// Enables both strict and loose language detection.
    /// Default: true
    pub language_detection: bool,

    /// Language vocabulary, tried in order.
    /// Default: English only.
    pub languages: Vec<LanguageDefinition>,

    /// Leave the episode title unset even when one is present.
    /// Default: false
    pub skip_episode_title: bool,

    /// Case-insensitive expression matched against file names in
    /// `Parser::parse_path`. A match parses the containing folder instead,
    /// for names such as `VTS_01_1.VOB` that carry no title.
    /// Default: None
    pub use_parent_regex: Option<String>,

    /// With `use_parent_regex`, step over a `.rar`/`.001` archive folder to
    /// the folder above it.
    /// Default: false
    pub archive_scan_rar: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            skip_keywords: Vec::new(),
            skip_case_sensitive: true,
            skip_regex_keywords: Vec::new(),
            skip_regex_case_sensitive: true,
            extras_keywords: vocabulary::DEFAULT_EXTRAS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            movie_version_keywords: Vec::new(),
            sources: default_sources(),
            language_detection: true,
            languages: vec![LanguageDefinition::english()],
            skip_episode_title: false,
            use_parent_regex: None,
            archive_scan_rar: false,
        }
    }
}

/// The built-in video source vocabulary.
pub fn default_sources() -> Vec<SourceKeyword> {
    vocabulary::VIDEO_SOURCES
        .iter()
        .map(|(label, aliases)| SourceKeyword::new(*label, aliases.iter().copied()))
        .collect()
}

impl ScannerConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder.
    pub fn builder() -> ScannerConfigBuilder {
        ScannerConfigBuilder::default()
    }
}

/// Builder for [`ScannerConfig`].
#[derive(Debug, Clone, Default)]
pub struct ScannerConfigBuilder {
    skip_keywords: Option<Vec<String>>,
    skip_case_sensitive: Option<bool>,
    skip_regex_keywords: Option<Vec<String>>,
    skip_regex_case_sensitive: Option<bool>,
    extras_keywords: Option<Vec<String>>,
    movie_version_keywords: Option<Vec<String>>,
    sources: Option<Vec<SourceKeyword>>,
    language_detection: Option<bool>,
    languages: Option<Vec<LanguageDefinition>>,
    skip_episode_title: Option<bool>,
    use_parent_regex: Option<String>,
    archive_scan_rar: Option<bool>,
}

fn owned<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl ScannerConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the literal skip words.
    pub fn skip_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_keywords = Some(owned(keywords));
        self
    }

    /// Set whether skip words are case-sensitive.
    ///
    /// Default: true
    pub fn skip_case_sensitive(mut self, enabled: bool) -> Self {
        self.skip_case_sensitive = Some(enabled);
        self
    }

    /// Set the skip regular expressions.
    pub fn skip_regex_keywords<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_regex_keywords = Some(owned(patterns));
        self
    }

    /// Set whether skip expressions are case-sensitive.
    ///
    /// Default: true
    pub fn skip_regex_case_sensitive(mut self, enabled: bool) -> Self {
        self.skip_regex_case_sensitive = Some(enabled);
        self
    }

    pub fn extras_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extras_keywords = Some(owned(keywords));
        self
    }

    pub fn movie_version_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.movie_version_keywords = Some(owned(keywords));
        self
    }

    /// Replace the video source vocabulary.
    pub fn sources(mut self, sources: Vec<SourceKeyword>) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Set whether language detection runs.
    ///
    /// Default: true
    pub fn language_detection(mut self, enabled: bool) -> Self {
        self.language_detection = Some(enabled);
        self
    }

    /// Replace the language vocabulary.
    pub fn languages(mut self, languages: Vec<LanguageDefinition>) -> Self {
        self.languages = Some(languages);
        self
    }

    /// Append one language to the vocabulary (the defaults when none was set).
    pub fn language(mut self, language: LanguageDefinition) -> Self {
        self.languages
            .get_or_insert_with(|| vec![LanguageDefinition::english()])
            .push(language);
        self
    }

    pub fn skip_episode_title(mut self, enabled: bool) -> Self {
        self.skip_episode_title = Some(enabled);
        self
    }

    pub fn use_parent_regex(mut self, pattern: impl Into<String>) -> Self {
        self.use_parent_regex = Some(pattern.into());
        self
    }

    pub fn archive_scan_rar(mut self, enabled: bool) -> Self {
        self.archive_scan_rar = Some(enabled);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ScannerConfig {
        let defaults = ScannerConfig::default();
        ScannerConfig {
            skip_keywords: self.skip_keywords.unwrap_or(defaults.skip_keywords),
            skip_case_sensitive: self.skip_case_sensitive.unwrap_or(true),
            skip_regex_keywords: self
                .skip_regex_keywords
                .unwrap_or(defaults.skip_regex_keywords),
            skip_regex_case_sensitive: self.skip_regex_case_sensitive.unwrap_or(true),
            extras_keywords: self.extras_keywords.unwrap_or(defaults.extras_keywords),
            movie_version_keywords: self
                .movie_version_keywords
                .unwrap_or(defaults.movie_version_keywords),
            sources: self.sources.unwrap_or(defaults.sources),
            language_detection: self.language_detection.unwrap_or(true),
            languages: self.languages.unwrap_or(defaults.languages),
            skip_episode_title: self.skip_episode_title.unwrap_or(false),
            use_parent_regex: self.use_parent_regex,
            archive_scan_rar: self.archive_scan_rar.unwrap_or(false),
        }
    }
}
