//! Two-tier language recognizers.

use crate::config::LanguageDefinition;
use crate::error::{ConfigError, Result};

use super::patterns;
use super::KeywordPattern;

/// Strict and loose language recognizers, in definition order.
#[derive(Debug, Clone, Default)]
pub struct LanguageMaps {
    strict: Vec<KeywordPattern<String>>,
    loose: Vec<KeywordPattern<String>>,
    loose_tokens: Vec<(String, Vec<String>)>,
}

impl LanguageMaps {
    pub(crate) fn build(definitions: &[LanguageDefinition]) -> Result<Self> {
        let mut maps = Self::default();

        for def in definitions {
            let id = def.id.trim();
            if id.is_empty() {
                return Err(ConfigError::EmptyLanguageId);
            }

            let strict = patterns::alternation(def.strict.iter().map(String::as_str));
            if !strict.is_empty() {
                let pattern =
                    patterns::compile("strict language", &patterns::token(&strict), false)?;
                maps.strict.push(KeywordPattern::new(id.to_string(), pattern));
            }

            let mut loose: Vec<String> = Vec::new();
            for token in def.loose.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
                let upper = token.to_uppercase();
                if !loose.contains(&upper) {
                    loose.push(upper);
                }
            }
            if !loose.is_empty() {
                let body = patterns::alternation(loose.iter().map(String::as_str));
                let pattern = patterns::compile("loose language", &patterns::word(&body), true)?;
                maps.loose.push(KeywordPattern::new(id.to_string(), pattern));
                maps.loose_tokens.push((id.to_string(), loose));
            }
        }

        Ok(maps)
    }

    /// Case-sensitive recognizers for tokens standing between structural
    /// delimiters.
    pub fn strict(&self) -> &[KeywordPattern<String>] {
        &self.strict
    }

    /// Case-insensitive whole-word recognizers for leftover fragments.
    pub fn loose(&self) -> &[KeywordPattern<String>] {
        &self.loose
    }

    /// Map a language tag (`"eng"`, `"[ENG]"`) onto a language id using the
    /// strict recognizers. Unknown tags come back unchanged.
    pub fn determine_language(&self, tag: &str) -> String {
        self.strict
            .iter()
            .find(|entry| patterns::is_match(entry.pattern(), tag))
            .map(|entry| entry.label().clone())
            .unwrap_or_else(|| tag.to_string())
    }

    /// Lowercase loose tokens of `id` joined by `|`, or an empty string for an
    /// unknown id.
    pub fn language_list(&self, id: &str) -> String {
        self.loose_tokens
            .iter()
            .find(|(lang, _)| lang == id)
            .map(|(_, tokens)| tokens.join("|").to_lowercase())
            .unwrap_or_default()
    }
}
