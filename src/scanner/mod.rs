//! Media library scanner.
//!
//! Walks library folders, picks out video files and disc images, and runs each
//! one through the filename parser.

pub mod paths;

use rayon::prelude::*;
use reelscan_parser::{ParsedFilename, Parser};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibraryConfig;
use paths::{has_extension, is_disc_folder, is_excluded};

/// Something found on disk that should be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    /// A DVD or Blu-ray folder image rather than a file.
    pub is_directory: bool,
}

/// A parsed library entry.
#[derive(Debug, Clone, Serialize)]
pub struct ScannedEntry {
    pub path: PathBuf,
    pub is_directory: bool,
    #[serde(flatten)]
    pub parsed: ParsedFilename,
}

/// Scanner for discovering and parsing media files.
pub struct LibraryScanner {
    parser: Parser,
    library: LibraryConfig,
}

impl LibraryScanner {
    pub fn new(parser: Parser, library: LibraryConfig) -> Self {
        Self { parser, library }
    }

    /// Collect the candidates below `root`, in walk order.
    ///
    /// Disc image folders are returned as one directory candidate and not
    /// descended into.
    pub fn candidates(&self, root: &Path) -> Vec<Candidate> {
        if !root.exists() {
            warn!("Library path does not exist: {:?}", root);
            return Vec::new();
        }

        let mut found = Vec::new();
        let mut walker = WalkDir::new(root)
            .follow_links(self.library.follow_links)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read library entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if is_excluded(path, &self.library.exclude) {
                debug!("Excluded: {:?}", path);
                if entry.file_type().is_dir() {
                    walker.skip_current_dir();
                }
                continue;
            }

            if entry.file_type().is_dir() {
                if self.library.detect_discs && is_disc_folder(path) {
                    found.push(Candidate {
                        path: path.to_path_buf(),
                        is_directory: true,
                    });
                    walker.skip_current_dir();
                }
                continue;
            }

            if has_extension(path, &self.library.extensions) {
                found.push(Candidate {
                    path: path.to_path_buf(),
                    is_directory: false,
                });
            }
        }

        found
    }

    /// Walk `roots` and parse every candidate on the rayon pool.
    ///
    /// Results keep walk order.
    pub fn scan(&self, roots: &[PathBuf]) -> Vec<ScannedEntry> {
        let candidates: Vec<Candidate> = roots
            .iter()
            .flat_map(|root| {
                info!("Scanning directory: {:?}", root);
                self.candidates(root)
            })
            .collect();

        let entries: Vec<ScannedEntry> = candidates
            .into_par_iter()
            .map(|candidate| self.parse(candidate))
            .collect();

        info!("Scan complete: {} entries parsed", entries.len());
        entries
    }

    /// Parse a single candidate.
    pub fn parse(&self, candidate: Candidate) -> ScannedEntry {
        let parsed = self
            .parser
            .parse_path(&candidate.path, candidate.is_directory);
        debug!(path = ?candidate.path, title = %parsed.title, "parsed");
        ScannedEntry {
            path: candidate.path,
            is_directory: candidate.is_directory,
            parsed,
        }
    }
}
