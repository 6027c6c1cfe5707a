//! ═══════════════════════════════════════════════════════════════════════════════
//! EXPERIMENT — The Declarative Input Document
//! ═══════════════════════════════════════════════════════════════════════════════
//! Read-only description of one experiment: the two-alternative choice pair,
//! the full set of recognized response keys, opaque rig parameters, and the
//! ordered stimulus list. The core never mutates it.
//! ═══════════════════════════════════════════════════════════════════════════════

use std::path::PathBuf;

use serde::Deserialize;

use crate::choice::ChoiceCodec;
use crate::error::ChorusError;

/// Top level of the experiment YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Experiment {
    pub config: ExperimentSettings,
    /// Stimulus identifiers, in presentation order
    pub stimuli: Vec<String>,
}

/// The `config` block of the experiment file.
#[derive(Debug, Clone, Deserialize)]
pub struct ExperimentSettings {
    /// The two response keys the subject chooses between
    pub choices: (String, String),
    /// Every response key the rig can score
    pub keys: Vec<String>,
    /// Opaque parameter block, copied verbatim into the output
    #[serde(default)]
    pub parameters: serde_json::Value,
    /// Directory the rig loads stimulus files from
    pub stimulus_root: PathBuf,
    /// Base name for the generated config file
    pub output_config_name: String,
}

impl Experiment {
    /// Codec over this experiment's choice pair.
    pub fn codec(&self) -> Result<ChoiceCodec, ChorusError> {
        ChoiceCodec::new(&self.config.choices.0, &self.config.choices.1)
    }
}
