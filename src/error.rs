//! ═══════════════════════════════════════════════════════════════════════════════
//! ERROR — Unified Error Type for chorus-config
//! ═══════════════════════════════════════════════════════════════════════════════
//! Every failure is local and non-recoverable: the pipeline is deterministic,
//! so a run either produces the full output document or aborts with one of
//! these before any partial write.
//! ═══════════════════════════════════════════════════════════════════════════════

use std::fmt;
use std::path::PathBuf;

/// The unified error type for the chorus-config crate
#[derive(Debug)]
pub enum ChorusError {
    /// I/O error (file operations)
    Io(std::io::Error),
    /// YAML parse/emit error
    Yaml(serde_yaml::Error),
    /// JSON serialization error
    Json(serde_json::Error),
    /// A required input file does not exist
    MissingInput(PathBuf),
    /// A guarded write found an existing file and force was not set
    AlreadyExists(PathBuf),
    /// A document parsed but does not have the required shape
    MalformedDocument { path: PathBuf, detail: String },
    /// A choices document references a response key outside the configured pair
    UnknownKey(String),
    /// The choice pair in the experiment file is not two distinct keys
    InvalidChoicePair(String),
    /// Phase value outside the supported domain (negative or unparsable)
    UnsupportedPhase(String),
}

impl std::error::Error for ChorusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChorusError::Io(e) => Some(e),
            ChorusError::Yaml(e) => Some(e),
            ChorusError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ChorusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChorusError::Io(e) => write!(f, "I/O error: {}", e),
            ChorusError::Yaml(e) => write!(f, "YAML error: {}", e),
            ChorusError::Json(e) => write!(f, "JSON error: {}", e),
            ChorusError::MissingInput(path) => {
                write!(f, "Input file not found: {}", path.display())
            }
            ChorusError::AlreadyExists(path) => {
                write!(
                    f,
                    "{} already exists (pass --force-write to overwrite)",
                    path.display()
                )
            }
            ChorusError::MalformedDocument { path, detail } => {
                write!(f, "Malformed document {}: {}", path.display(), detail)
            }
            ChorusError::UnknownKey(key) => {
                write!(f, "Response key '{}' is not one of the configured choices", key)
            }
            ChorusError::InvalidChoicePair(detail) => {
                write!(f, "Invalid choice pair: {}", detail)
            }
            ChorusError::UnsupportedPhase(text) => {
                write!(f, "Unsupported phase '{}': must be a non-negative number", text)
            }
        }
    }
}

impl From<std::io::Error> for ChorusError {
    fn from(err: std::io::Error) -> Self {
        ChorusError::Io(err)
    }
}

impl From<serde_yaml::Error> for ChorusError {
    fn from(err: serde_yaml::Error) -> Self {
        ChorusError::Yaml(err)
    }
}

impl From<serde_json::Error> for ChorusError {
    fn from(err: serde_json::Error) -> Self {
        ChorusError::Json(err)
    }
}
