//! ═══════════════════════════════════════════════════════════════════════════════
//! CHORUS-CONFIG — Trial Config Generator for Two-Alternative Choice Experiments
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Synthesizes the trial configuration for a chorus-noise two-alternative
//! choice experiment: which response key is correct for each stimulus, what
//! every response earns, and how cue-light-assisted and unassisted variants
//! mix as training advances through phases.
//!
//! # Pipeline
//!
//! - **choice**: abstract `{A, B}` codes, the response-key codec, random
//!   half/half assignment, inversion
//! - **response**: outcome values and per-stimulus response tables
//! - **phase**: exact rational phase and variant planning
//! - **assemble**: orchestration into the output document
//! - **store**: guarded YAML/JSON persistence
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use chorus_config::{generate_config, CueMap, FsStore, GenerateOptions};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut store = FsStore;
//!     let experiment = store.read_experiment(Path::new("experiment.yml"))?;
//!     let options = GenerateOptions::new("1.5".parse()?);
//!     let config = generate_config(
//!         &experiment,
//!         &CueMap::default(),
//!         &mut store,
//!         &mut rand::thread_rng(),
//!         &options,
//!     )?;
//!     println!("{} stimulus entries", config.stimuli.len());
//!     Ok(())
//! }
//! ```
//! ═══════════════════════════════════════════════════════════════════════════════

pub mod assemble;
pub mod choice;
pub mod error;
pub mod experiment;
pub mod phase;
pub mod response;
pub mod store;

pub use assemble::{
    generate_config, output_file_name, Category, GenerateOptions, OutputConfig, StimulusEntry,
    DEFAULT_CHOICES_FILE,
};
pub use choice::{
    assign_choices, invert_choices, Choice, ChoiceAssignment, ChoiceCodec, KeyAssignment,
};
pub use error::ChorusError;
pub use experiment::{Experiment, ExperimentSettings};
pub use phase::{Phase, VariantPlan};
pub use response::{build_table, CueMap, Outcome, ResponseTable, TIMEOUT_KEY};
pub use store::{ConfigStore, FsStore};
