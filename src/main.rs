//! ═══════════════════════════════════════════════════════════════════════════════
//! CHORUS-CONFIG CLI — Generate Experiment Trial Configs
//! ═══════════════════════════════════════════════════════════════════════════════

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use chorus_config::{
    generate_config, output_file_name, ConfigStore, CueMap, FsStore, GenerateOptions, Phase,
    DEFAULT_CHOICES_FILE,
};

#[derive(Parser)]
#[command(name = "chorus-config")]
#[command(about = "Generate config files for the chorus noise two-alternative choice experiment")]
#[command(version)]
struct Cli {
    /// Experiment description file (YAML)
    #[arg(short = 'e', long)]
    experiment_file: PathBuf,

    /// Correct choice for each stimulus; a new file is generated and saved
    /// when not provided
    #[arg(short = 'c', long)]
    correct_choices_file: Option<PathBuf>,

    /// Phase of training (phase 1 runs with cue lights)
    #[arg(short, long, default_value = "1")]
    phase: Phase,

    /// Flip the correct key for every stimulus
    #[arg(short, long)]
    invert_answers: bool,

    /// Overwrite existing files
    #[arg(short, long)]
    force_write: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut store = FsStore;
    let experiment = store
        .read_experiment(&cli.experiment_file)
        .context("could not load experiment file")?;

    let options = GenerateOptions {
        correct_choices_file: cli.correct_choices_file.clone(),
        choices_output: PathBuf::from(DEFAULT_CHOICES_FILE),
        invert_answers: cli.invert_answers,
        phase: cli.phase,
        force_write: cli.force_write,
    };
    let mut rng = rand::thread_rng();
    let config = generate_config(&experiment, &CueMap::default(), &mut store, &mut rng, &options)
        .context("could not generate config")?;

    let name = output_file_name(
        &experiment.config.output_config_name,
        cli.invert_answers,
        cli.phase,
    );
    store
        .write_config(&PathBuf::from(&name), &config, cli.force_write)
        .with_context(|| format!("could not save {}", name))?;
    println!("Wrote {} ({} stimulus entries)", name, config.stimuli.len());
    Ok(())
}
