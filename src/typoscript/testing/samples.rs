//! Sample file loading for tests
//!
//! Sample TypoScript sources live in `samples/` at the crate root. Tests should prefer them
//! over ad-hoc strings when they exercise more than a single rule, so that realistic input
//! is shared and reviewed in one place.

use crate::typoscript::lexing::LexError;
use std::fs;
use std::path::PathBuf;

/// Directory holding the sample sources
pub fn samples_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples")
}

/// Names of all sample files, sorted
pub fn sample_names() -> Result<Vec<String>, LexError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(samples_dir())? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Reads a sample by file name
pub fn load_sample(name: &str) -> Result<String, LexError> {
    let path = samples_dir().join(name);
    fs::read_to_string(&path)
        .map_err(|e| LexError::Io(format!("{}: {}", path.display(), e)))
}
