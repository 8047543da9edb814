//! Integration tests for the library walk.

use reelscan::config::LibraryConfig;
use reelscan::scanner::{Candidate, LibraryScanner};
use reelscan_parser::{LanguageDefinition, Parser, ScannerConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"").unwrap();
}

fn file_names(candidates: &[Candidate]) -> Vec<String> {
    candidates
        .iter()
        .map(|c| c.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_candidates_filter_by_extension_and_exclude() {
    let root = tempdir().unwrap();
    touch(&root.path().join("Heat.1995.mkv"));
    touch(&root.path().join("Heat.1995.nfo"));
    touch(&root.path().join("Ronin.1998.AVI"));
    touch(&root.path().join("Sample").join("ronin-sample.avi"));

    let library = LibraryConfig {
        exclude: vec!["sample".to_string()],
        ..LibraryConfig::default()
    };
    let scanner = LibraryScanner::new(Parser::default(), library);

    let candidates = scanner.candidates(root.path());
    assert_eq!(file_names(&candidates), vec!["Heat.1995.mkv", "Ronin.1998.AVI"]);
    assert!(candidates.iter().all(|c| !c.is_directory));
}

#[test]
fn test_disc_images_are_single_candidates() {
    let root = tempdir().unwrap();
    touch(&root.path().join("Heat (1995)").join("VIDEO_TS").join("VTS_01_1.VOB"));
    touch(&root.path().join("Ronin (1998)").join("BDMV").join("STREAM").join("00000.m2ts"));

    let scanner = LibraryScanner::new(Parser::default(), LibraryConfig::default());
    let candidates = scanner.candidates(root.path());

    assert_eq!(file_names(&candidates), vec!["Heat (1995)", "Ronin (1998)"]);
    assert!(candidates.iter().all(|c| c.is_directory));
}

#[test]
fn test_disc_detection_can_be_disabled() {
    let root = tempdir().unwrap();
    touch(&root.path().join("Heat (1995)").join("VIDEO_TS").join("VTS_01_1.VOB"));

    let library = LibraryConfig {
        detect_discs: false,
        ..LibraryConfig::default()
    };
    let scanner = LibraryScanner::new(Parser::default(), library);
    let candidates = scanner.candidates(root.path());

    assert_eq!(file_names(&candidates), vec!["VTS_01_1.VOB"]);
}

#[test]
fn test_missing_root_yields_nothing() {
    let scanner = LibraryScanner::new(Parser::default(), LibraryConfig::default());
    assert!(scanner.candidates(Path::new("/nonexistent/library")).is_empty());
}

#[test]
fn test_scan_uses_parent_folder_for_part_files() {
    let root = tempdir().unwrap();
    let folder = root.path().join("Гора самоцветов 1 Рубин");
    touch(&folder.join("Part1 - Шейдулла-лентяй.avi"));
    touch(&folder.join("Part2 - Как собака с кошкой жили.avi"));

    let scanner = LibraryScanner::new(Parser::default(), LibraryConfig::default());
    let entries = scanner.scan(&[root.path().to_path_buf()]);

    assert_eq!(entries.len(), 2);
    for (entry, part) in entries.iter().zip([1, 2]) {
        assert_eq!(entry.parsed.title, "Гора самоцветов 1 Рубин");
        assert_eq!(entry.parsed.part, Some(part));
    }
    assert_eq!(entries[0].parsed.part_title.as_deref(), Some("Шейдулла-лентяй"));
}

#[test]
fn test_scan_applies_scanner_config() {
    let root = tempdir().unwrap();
    touch(&root.path().join("Chasseurs.De.Dragons.FRENCH.720p.BluRay.x264-HDClub.mkv"));
    touch(&root.path().join("Misery.1990[German]DTS.720p.BluRay.x264.mkv"));

    let config = ScannerConfig::builder()
        .skip_keywords(["hdclub"])
        .skip_case_sensitive(false)
        .language(LanguageDefinition::from_tokens("French", "FRA FR FRENCH", "FRA FR FRENCH"))
        .language(LanguageDefinition::from_tokens("German", "GER DE GERMAN", "GER DE GERMAN"))
        .build();
    let scanner = LibraryScanner::new(Parser::new(config).unwrap(), LibraryConfig::default());
    let entries = scanner.scan(&[root.path().to_path_buf()]);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].parsed.title, "Chasseurs De Dragons");
    assert_eq!(entries[0].parsed.languages, vec!["French"]);
    assert_eq!(entries[1].parsed.title, "Misery");
    assert_eq!(entries[1].parsed.year, Some(1990));
    assert_eq!(entries[1].parsed.languages, vec!["German"]);
}
