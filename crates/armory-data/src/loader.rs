//! Definition-file discovery and deserialization.
//!
//! Definitions are accepted in RON, TOML, or JSON, detected by extension.
//! Discovery walks the definition directory recursively; files with an
//! unrecognized extension are skipped, directories expand.

use crate::schema::ItemDefinition;
use armory_core::clone::CloneError;
use std::path::{Path, PathBuf};

/// Errors produced while loading and applying definition files.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// The file failed to deserialize.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A price field carried a sentinel other than the recognized one.
    #[error("invalid price directive '{value}' in {file}")]
    InvalidPriceDirective { file: PathBuf, value: String },

    /// The declared clone origin does not exist in the template table.
    #[error(transparent)]
    Clone(#[from] CloneError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Supported definition-file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DefinitionError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DefinitionError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

/// Read and deserialize one definition file according to its format.
pub fn deserialize_definition(path: &Path) -> Result<ItemDefinition, DefinitionError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| DefinitionError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Json => serde_json::from_str(&content).map_err(|e| DefinitionError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Toml => toml::from_str(&content).map_err(|e| DefinitionError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
    }
}

/// Recursively collect definition files under `dir`.
///
/// Enumeration order is directory order and carries no guarantee;
/// definitions must not depend on one another. I/O errors during the
/// walk propagate.
pub fn discover_definition_files(dir: &Path) -> Result<Vec<PathBuf>, DefinitionError> {
    let mut files = Vec::new();
    collect_into(dir, &mut files)?;
    Ok(files)
}

fn collect_into(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), DefinitionError> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_into(&path, files)?;
        } else if detect_format(&path).is_ok() {
            files.push(path);
        }
    }
    Ok(())
}
