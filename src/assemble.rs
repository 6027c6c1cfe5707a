//! ═══════════════════════════════════════════════════════════════════════════════
//! ASSEMBLE — From Experiment Description to Trial Config
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Orchestration of one generation run:
//!
//! 1. load the persisted correct-choice assignment, or draw a fresh one and
//!    persist it (the run's only side effect: zero or one file write);
//! 2. optionally invert, round-tripping through the codec so inversion is
//!    defined in the abstract-code space regardless of the configured keys;
//! 3. expand every stimulus, in input order, into the variant set its phase
//!    plan calls for (cue-light variant first) and build each variant's
//!    response table;
//! 4. wrap the flattened list with the experiment's parameters and
//!    stimulus root, unchanged.
//!
//! Given a pinned choices file, the whole pipeline is deterministic: two
//! runs serialize byte-identically.
//! ═══════════════════════════════════════════════════════════════════════════════

use std::path::PathBuf;

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::choice::{assign_choices, invert_choices};
use crate::error::ChorusError;
use crate::experiment::Experiment;
use crate::phase::{Phase, VariantPlan};
use crate::response::{build_table, CueMap, ResponseTable};
use crate::store::ConfigStore;

/// Where a freshly drawn assignment is persisted by default
pub const DEFAULT_CHOICES_FILE: &str = "correct_choices.yml";

/// Whether a stimulus variant runs with the cue lights on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CueLights,
    NoCueLights,
}

/// One emitted stimulus variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StimulusEntry {
    pub name: String,
    /// Relative sampling weight for the trial scheduler
    pub frequency: u64,
    pub responses: ResponseTable,
    /// Cue-light hint toward the correct response, when assisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cue_resp: Option<Vec<String>>,
    pub category: Category,
}

/// The generated trial configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub parameters: serde_json::Value,
    pub stimulus_root: PathBuf,
    pub stimuli: Vec<StimulusEntry>,
}

/// Knobs for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Prior assignment to reuse; a fresh one is drawn when absent
    pub correct_choices_file: Option<PathBuf>,
    /// Where a fresh assignment is persisted
    pub choices_output: PathBuf,
    /// Flip the correct key for every stimulus
    pub invert_answers: bool,
    pub phase: Phase,
    /// Overwrite existing files instead of failing
    pub force_write: bool,
}

impl GenerateOptions {
    pub fn new(phase: Phase) -> Self {
        GenerateOptions {
            correct_choices_file: None,
            choices_output: PathBuf::from(DEFAULT_CHOICES_FILE),
            invert_answers: false,
            phase,
            force_write: false,
        }
    }
}

/// Run the full pipeline for one experiment.
pub fn generate_config<S, R>(
    experiment: &Experiment,
    cues: &CueMap,
    store: &mut S,
    rng: &mut R,
    options: &GenerateOptions,
) -> Result<OutputConfig, ChorusError>
where
    S: ConfigStore,
    R: Rng + ?Sized,
{
    let codec = experiment.codec()?;

    let mut correct = match &options.correct_choices_file {
        Some(path) => store.read_choices(path)?,
        None => {
            let assigned = assign_choices(&experiment.stimuli, rng);
            let decoded = codec.decode_values(&assigned);
            store.write_choices(&options.choices_output, &decoded, options.force_write)?;
            info!(
                "assigned fresh correct choices for {} stimuli",
                decoded.len()
            );
            decoded
        }
    };

    if options.invert_answers {
        correct = codec.decode_values(&invert_choices(&codec.encode_values(&correct)?));
    }

    let keys = &experiment.config.keys;
    let plan = options.phase.plan();
    let mut entries = Vec::new();
    for name in &experiment.stimuli {
        let correct_key = correct.get(name).map(String::as_str);
        match plan {
            VariantPlan::CueOnly => {
                entries.push(variant(name, keys, correct_key, cues, true, 1));
            }
            VariantPlan::FreeOnly => {
                entries.push(variant(name, keys, correct_key, cues, false, 1));
            }
            VariantPlan::Mixed {
                cue_frequency,
                free_frequency,
            } => {
                entries.push(variant(name, keys, correct_key, cues, true, cue_frequency));
                entries.push(variant(name, keys, correct_key, cues, false, free_frequency));
            }
        }
    }

    Ok(OutputConfig {
        parameters: experiment.config.parameters.clone(),
        stimulus_root: experiment.config.stimulus_root.clone(),
        stimuli: entries,
    })
}

fn variant(
    name: &str,
    keys: &[String],
    correct_key: Option<&str>,
    cues: &CueMap,
    cue_lights: bool,
    frequency: u64,
) -> StimulusEntry {
    let responses = build_table(keys, correct_key);
    let cue_name = match (cue_lights, correct_key) {
        (true, Some(key)) => cues.get(key),
        _ => None,
    };
    let (cue_resp, category) = match cue_name {
        Some(cue) => (Some(vec![cue.to_string()]), Category::CueLights),
        None => (None, Category::NoCueLights),
    };
    StimulusEntry {
        name: name.to_string(),
        frequency,
        responses,
        cue_resp,
        category,
    }
}

/// File name for the generated config:
/// `{base}[-inverted]-p{phase}.json`.
pub fn output_file_name(base: &str, invert_answers: bool, phase: Phase) -> String {
    let suffix = if invert_answers { "-inverted" } else { "" };
    format!("{}{}-p{}.json", base, suffix, phase)
}
