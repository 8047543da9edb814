//! Data model for parsed filenames.

mod parsed;

pub use parsed::{MovieSet, ParsedFilename};
