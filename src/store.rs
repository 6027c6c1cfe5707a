//! ═══════════════════════════════════════════════════════════════════════════════
//! STORE — Guarded Document I/O
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! All file access goes through the [`ConfigStore`] trait so the assembly
//! pipeline stays a pure in-memory transformation everywhere else. The
//! filesystem implementation guards every write with an existence check:
//! nothing is overwritten unless force is set, and a refused write leaves
//! no partial file behind. The check is advisory; concurrent runs against
//! the same path race, which single-operator usage accepts.
//! ═══════════════════════════════════════════════════════════════════════════════

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use log::{debug, info};

use crate::assemble::OutputConfig;
use crate::choice::KeyAssignment;
use crate::error::ChorusError;
use crate::experiment::Experiment;

/// Document I/O as seen by the assembler.
pub trait ConfigStore {
    /// Load a persisted stimulus → response-key assignment
    fn read_choices(&self, path: &Path) -> Result<KeyAssignment, ChorusError>;

    /// Persist a freshly drawn assignment; fails with
    /// [`ChorusError::AlreadyExists`] unless `force` is set
    fn write_choices(
        &mut self,
        path: &Path,
        choices: &KeyAssignment,
        force: bool,
    ) -> Result<(), ChorusError>;

    /// Persist the generated trial config as pretty JSON, same guard
    fn write_config(
        &mut self,
        path: &Path,
        config: &OutputConfig,
        force: bool,
    ) -> Result<(), ChorusError>;
}

/// The real filesystem store.
#[derive(Debug, Default)]
pub struct FsStore;

impl FsStore {
    /// Read and parse the experiment YAML.
    pub fn read_experiment(&self, path: &Path) -> Result<Experiment, ChorusError> {
        let text = read_text(path)?;
        debug!("read experiment file {}", path.display());
        serde_yaml::from_str(&text).map_err(|e| ChorusError::MalformedDocument {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }
}

fn read_text(path: &Path) -> Result<String, ChorusError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ChorusError::MissingInput(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Create-new write unless forced; maps the kernel's existence check onto
/// [`ChorusError::AlreadyExists`].
fn write_guarded(path: &Path, contents: &str, force: bool) -> Result<(), ChorusError> {
    if force {
        fs::write(path, contents)?;
        return Ok(());
    }
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(contents.as_bytes())?;
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(ChorusError::AlreadyExists(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

impl ConfigStore for FsStore {
    fn read_choices(&self, path: &Path) -> Result<KeyAssignment, ChorusError> {
        let text = read_text(path)?;
        debug!("read correct choices from {}", path.display());
        serde_yaml::from_str(&text).map_err(|e| ChorusError::MalformedDocument {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    fn write_choices(
        &mut self,
        path: &Path,
        choices: &KeyAssignment,
        force: bool,
    ) -> Result<(), ChorusError> {
        let text = serde_yaml::to_string(choices)?;
        write_guarded(path, &text, force)?;
        info!("saved correct choices to {}", path.display());
        Ok(())
    }

    fn write_config(
        &mut self,
        path: &Path,
        config: &OutputConfig,
        force: bool,
    ) -> Result<(), ChorusError> {
        let text = serde_json::to_string_pretty(config)?;
        write_guarded(path, &text, force)?;
        info!("saved config to {}", path.display());
        Ok(())
    }
}

/// In-memory store for exercising the pipeline without touching disk.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemStore {
    pub files: std::collections::HashMap<std::path::PathBuf, String>,
}

#[cfg(test)]
impl ConfigStore for MemStore {
    fn read_choices(&self, path: &Path) -> Result<KeyAssignment, ChorusError> {
        let text = self
            .files
            .get(path)
            .ok_or_else(|| ChorusError::MissingInput(path.to_path_buf()))?;
        serde_yaml::from_str(text).map_err(|e| ChorusError::MalformedDocument {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    fn write_choices(
        &mut self,
        path: &Path,
        choices: &KeyAssignment,
        force: bool,
    ) -> Result<(), ChorusError> {
        if !force && self.files.contains_key(path) {
            return Err(ChorusError::AlreadyExists(path.to_path_buf()));
        }
        self.files
            .insert(path.to_path_buf(), serde_yaml::to_string(choices)?);
        Ok(())
    }

    fn write_config(
        &mut self,
        path: &Path,
        config: &OutputConfig,
        force: bool,
    ) -> Result<(), ChorusError> {
        if !force && self.files.contains_key(path) {
            return Err(ChorusError::AlreadyExists(path.to_path_buf()));
        }
        self.files
            .insert(path.to_path_buf(), serde_json::to_string_pretty(config)?);
        Ok(())
    }
}
