//! Parameter files and report output
//!
//! Parameter files are JSON unless the extension is `.yaml` or `.yml`.
//! Every write goes through [`atomic_write`], so an interrupted save never
//! leaves a truncated file behind.

use std::fs;
use std::path::{Path, PathBuf};

use paycomp_core::ParameterError;
use paycomp_core::config::{from_json_str, to_json_string};
use paycomp_core::model::ParameterSet;

use crate::util::io::atomic_write;

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
    /// File parsed but the parameters fail validation
    Invalid(ParameterError),
    /// Refusing to overwrite an existing file
    Exists(PathBuf),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::Invalid(err) => write!(f, "Invalid parameters: {}", err),
            StorageError::Exists(path) => {
                write!(f, "{} already exists (use --force)", path.display())
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// On-disk encoding of a parameter file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Pick the format from the file extension (JSON when unknown)
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => FileFormat::Yaml,
            _ => FileFormat::Json,
        }
    }
}

/// Get the default data directory path (~/.paycomp/)
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".paycomp")
}

/// Load and validate a parameter file
pub fn load_parameters(path: &Path) -> Result<ParameterSet, StorageError> {
    let content = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    let params = match FileFormat::from_path(path) {
        FileFormat::Json => from_json_str(&content).map_err(|e| match e {
            paycomp_core::CalcError::InvalidParameter(ParameterError::Malformed(msg)) => {
                StorageError::Parse(format!("Failed to parse JSON: {}", msg))
            }
            paycomp_core::CalcError::InvalidParameter(err) => StorageError::Invalid(err),
            other => StorageError::Parse(other.to_string()),
        })?,
        FileFormat::Yaml => {
            let params: ParameterSet = serde_saphyr::from_str(&content)
                .map_err(|e| StorageError::Parse(format!("Failed to parse YAML: {}", e)))?;
            params.validate().map_err(StorageError::Invalid)?;
            params
        }
    };

    tracing::debug!("Loaded parameters from {}", path.display());
    Ok(params)
}

/// Save a parameter file in the format implied by its extension
pub fn save_parameters(
    path: &Path,
    params: &ParameterSet,
    overwrite: bool,
) -> Result<(), StorageError> {
    if !overwrite && path.exists() {
        return Err(StorageError::Exists(path.to_path_buf()));
    }

    let content = match FileFormat::from_path(path) {
        FileFormat::Json => {
            to_json_string(params).map_err(|e| StorageError::Serialize(e.to_string()))?
        }
        FileFormat::Yaml => serde_saphyr::to_string(params)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize YAML: {}", e)))?,
    };

    write_file(path, &content)?;
    tracing::info!("Saved parameters to {}", path.display());
    Ok(())
}

/// Where a report lands for `--output target`
///
/// A directory gets a generated `paycomp-<command>-<timestamp>.<ext>` file
/// name; anything else is used as given.
#[must_use]
pub fn resolve_output_path(
    target: &Path,
    command: &str,
    extension: &str,
    now: jiff::civil::DateTime,
) -> PathBuf {
    if target.is_dir() {
        target.join(report_file_name(command, extension, now))
    } else {
        target.to_path_buf()
    }
}

/// `paycomp-<command>-YYYYmmdd-HHMMSS.<ext>`
#[must_use]
pub fn report_file_name(command: &str, extension: &str, now: jiff::civil::DateTime) -> String {
    format!(
        "paycomp-{}-{}.{}",
        command,
        now.strftime("%Y%m%d-%H%M%S"),
        extension
    )
}

/// Atomically write a report or parameter file, creating parent directories
pub fn write_file(path: &Path, content: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            StorageError::Io(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    atomic_write(path, content)
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
}
