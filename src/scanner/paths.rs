//! Path checks used while walking a library.

use std::path::Path;

/// Video extensions recognized when the configuration names none.
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "m4v", "ts", "m2ts", "webm", "mov", "wmv", "flv", "mpg", "mpeg", "divx",
    "iso", "img", "vob",
];

/// Folder names marking a DVD or Blu-ray image.
const DISC_FOLDERS: &[&str] = &["VIDEO_TS", "BDMV"];

/// Check if `path` has one of `extensions` (case-insensitive).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use reelscan::scanner::paths::has_extension;
///
/// let videos = vec!["mkv".to_string(), "avi".to_string()];
/// assert!(has_extension(Path::new("/movies/Heat.1995.MKV"), &videos));
/// assert!(!has_extension(Path::new("Heat.1995.srt"), &videos));
/// assert!(!has_extension(Path::new("README"), &videos));
/// ```
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Check if any `exclude` entry occurs in `path` (case-insensitive).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use reelscan::scanner::paths::is_excluded;
///
/// let exclude = vec!["sample".to_string()];
/// assert!(is_excluded(Path::new("/movies/Heat/Sample/heat.mkv"), &exclude));
/// assert!(!is_excluded(Path::new("/movies/Heat/heat.mkv"), &exclude));
/// ```
pub fn is_excluded(path: &Path, exclude: &[String]) -> bool {
    let path = path.to_string_lossy().to_lowercase();
    exclude
        .iter()
        .map(|e| e.trim().to_lowercase())
        .any(|e| !e.is_empty() && path.contains(&e))
}

/// Check if `dir` holds a `VIDEO_TS` or `BDMV` folder.
pub fn is_disc_folder(dir: &Path) -> bool {
    DISC_FOLDERS.iter().any(|name| dir.join(name).is_dir())
}
