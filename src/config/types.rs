use reelscan_parser::ScannerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scanner::paths::DEFAULT_VIDEO_EXTENSIONS;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,

    #[serde(default)]
    pub scanner: ScannerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Folders scanned when `scan` is run without arguments
    #[serde(default)]
    pub paths: Vec<PathBuf>,

    /// File extensions treated as videos (case-insensitive, without the dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Paths containing any of these substrings are skipped (case-insensitive)
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default = "default_true")]
    pub follow_links: bool,

    /// Treat folders holding `VIDEO_TS` or `BDMV` as a single disc image
    #[serde(default = "default_true")]
    pub detect_discs: bool,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_VIDEO_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_true() -> bool {
    true
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            extensions: default_extensions(),
            exclude: Vec::new(),
            follow_links: default_true(),
            detect_discs: default_true(),
        }
    }
}
