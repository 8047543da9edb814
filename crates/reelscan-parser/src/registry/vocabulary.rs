//! Built-in keyword vocabularies.
//!
//! Each table lists a canonical label with the spellings that map onto it.
//! Order is significant: within a category the first entry that matches wins.

/// Frame rates recognized as `p<n>` or `<n>p`.
pub(crate) const FRAME_RATES: &[u32] = &[23, 24, 25, 29, 30, 50, 59, 60];

pub(crate) const AUDIO_CODECS: &[(&str, &[&str])] = &[
    ("AC3", &[]),
    ("DTS", &[]),
    ("DD", &[]),
    ("AAC", &[]),
    ("FLAC", &[]),
];

pub(crate) const VIDEO_CODECS: &[(&str, &[&str])] = &[
    ("XviD", &["XVID"]),
    ("DivX", &["DIVX", "DIVX6"]),
    ("H.264", &["H264", "H.264", "X264"]),
];

pub(crate) const RESOLUTIONS: &[(&str, &[&str])] = &[
    ("720p", &[]),
    ("1080i", &[]),
    ("1080p", &[]),
    ("HD", &[]),
    ("1280x720", &[]),
    ("1920x1080", &[]),
    ("2160p", &[]),
];

/// Default video source vocabulary.
pub(crate) const VIDEO_SOURCES: &[(&str, &[&str])] = &[
    ("SDTV", &["TVRip", "PAL", "NTSC"]),
    ("D-THEATER", &["DTH", "DTHEATER"]),
    ("HDDVD", &["HD-DVD", "HDDVDRIP"]),
    ("BluRay", &["BDRIP", "BLURAYRIP", "BLU-RAY", "BD-RIP"]),
    ("DVDRip", &["DVDR"]),
    ("HDTV", &[]),
    ("WEB-DL", &[]),
    ("DVD", &["DVD5", "DVD9"]),
];

pub(crate) const ENGLISH_ID: &str = "English";
pub(crate) const ENGLISH_STRICT: &[&str] = &["ENG", "EN", "ENGLISH", "eng", "en", "english", "Eng"];
pub(crate) const ENGLISH_LOOSE: &[&str] = &["ENG", "EN", "ENGLISH"];

pub(crate) const DEFAULT_EXTRAS: &[&str] = &["trailer"];

/// Resolutions that look like a season number in `720x400` style sizes.
pub(crate) const RESOLUTION_SEASONS: &[&str] = &["720", "1080", "2160"];
