//! End-to-end tests - the binary against real files in a tempdir.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

const EXPERIMENT: &str = "
config:
  choices:
    - peck_left
    - peck_center
  keys:
    - peck_left
    - peck_center
    - peck_right
  parameters:
    correct_timeout: false
  stimulus_root: /root/stimuli
  output_config_name: chorus-noise
stimuli:
  - s1
  - s2
  - s3
  - s4
";

fn write_experiment(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("experiment.yml");
    fs::write(&path, EXPERIMENT).unwrap();
    path
}

fn run_cli(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_chorus-config"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn fresh_run_persists_choices_and_writes_the_config() {
    let dir = tempdir().unwrap();
    let experiment = write_experiment(dir.path());

    let output = run_cli(
        dir.path(),
        &["--experiment-file", experiment.to_str().unwrap()],
    );
    assert!(output.status.success(), "{:?}", output);

    let choices: serde_json::Value = serde_yaml::from_str(
        &fs::read_to_string(dir.path().join("correct_choices.yml")).unwrap(),
    )
    .unwrap();
    let choices = choices.as_object().unwrap();
    assert_eq!(choices.len(), 4);
    let center = choices
        .values()
        .filter(|v| v.as_str() == Some("peck_center"))
        .count();
    assert_eq!(center, 2);

    let config = read_json(&dir.path().join("chorus-noise-p1.json"));
    assert_eq!(config["stimulus_root"], "/root/stimuli");
    assert_eq!(config["parameters"]["correct_timeout"], false);
    let stimuli = config["stimuli"].as_array().unwrap();
    assert_eq!(stimuli.len(), 4);
    for entry in stimuli {
        assert_eq!(entry["frequency"], 1);
        assert_eq!(entry["category"], "cue_lights");
        assert_eq!(entry["responses"]["timeout"], serde_json::json!({"correct": false}));
        let correct_key = choices[entry["name"].as_str().unwrap()].as_str().unwrap();
        assert_eq!(
            entry["responses"][correct_key],
            serde_json::json!({"p_reward": 1.0, "correct": true})
        );
        assert_eq!(
            entry["responses"]["peck_right"],
            serde_json::json!({"p_punish": 1.0, "correct": false})
        );
        assert_eq!(entry["cue_resp"].as_array().unwrap().len(), 1);
    }
}

#[test]
fn rerun_with_saved_choices_reproduces_the_output() {
    let dir = tempdir().unwrap();
    let experiment = write_experiment(dir.path());
    let exp = experiment.to_str().unwrap();

    let first = run_cli(dir.path(), &["--experiment-file", exp]);
    assert!(first.status.success());
    let first_output = fs::read(dir.path().join("chorus-noise-p1.json")).unwrap();

    // regenerate from the persisted assignment; output must be byte-identical
    let second = run_cli(
        dir.path(),
        &[
            "--experiment-file",
            exp,
            "--correct-choices-file",
            "correct_choices.yml",
            "--force-write",
        ],
    );
    assert!(second.status.success());
    let second_output = fs::read(dir.path().join("chorus-noise-p1.json")).unwrap();
    assert_eq!(first_output, second_output);
}

#[test]
fn invert_answers_swaps_every_assignment() {
    let dir = tempdir().unwrap();
    let experiment = write_experiment(dir.path());
    fs::write(
        dir.path().join("choices.yml"),
        "s1: peck_left\ns2: peck_center\ns3: peck_left\ns4: peck_center\n",
    )
    .unwrap();

    let output = run_cli(
        dir.path(),
        &[
            "--experiment-file",
            experiment.to_str().unwrap(),
            "--correct-choices-file",
            "choices.yml",
            "--invert-answers",
        ],
    );
    assert!(output.status.success(), "{:?}", output);

    let config = read_json(&dir.path().join("chorus-noise-inverted-p1.json"));
    let stimuli = config["stimuli"].as_array().unwrap();
    assert_eq!(stimuli[0]["responses"]["peck_center"]["correct"], true);
    assert_eq!(stimuli[0]["responses"]["peck_left"]["correct"], false);
    assert_eq!(stimuli[1]["responses"]["peck_left"]["correct"], true);
    assert_eq!(stimuli[3]["responses"]["peck_left"]["correct"], true);
}

#[test]
fn fractional_phase_writes_weighted_variant_pairs() {
    let dir = tempdir().unwrap();
    let experiment = write_experiment(dir.path());
    fs::write(
        dir.path().join("choices.yml"),
        "s1: peck_left\ns2: peck_center\ns3: peck_left\ns4: peck_center\n",
    )
    .unwrap();

    let output = run_cli(
        dir.path(),
        &[
            "--experiment-file",
            experiment.to_str().unwrap(),
            "--correct-choices-file",
            "choices.yml",
            "--phase",
            "1.25",
        ],
    );
    assert!(output.status.success(), "{:?}", output);

    let config = read_json(&dir.path().join("chorus-noise-p1.25.json"));
    let stimuli = config["stimuli"].as_array().unwrap();
    assert_eq!(stimuli.len(), 8);
    for pair in stimuli.chunks(2) {
        assert_eq!(pair[0]["name"], pair[1]["name"]);
        assert_eq!(pair[0]["frequency"], 3);
        assert_eq!(pair[0]["category"], "cue_lights");
        assert_eq!(pair[1]["frequency"], 1);
        assert_eq!(pair[1]["category"], "no_cue_lights");
        assert!(pair[1].get("cue_resp").is_none());
    }
}

#[test]
fn phase_two_runs_without_cues() {
    let dir = tempdir().unwrap();
    let experiment = write_experiment(dir.path());

    let output = run_cli(
        dir.path(),
        &[
            "--experiment-file",
            experiment.to_str().unwrap(),
            "--phase",
            "2",
        ],
    );
    assert!(output.status.success(), "{:?}", output);

    let config = read_json(&dir.path().join("chorus-noise-p2.json"));
    for entry in config["stimuli"].as_array().unwrap() {
        assert_eq!(entry["category"], "no_cue_lights");
        assert!(entry.get("cue_resp").is_none());
    }
}

#[test]
fn existing_files_stop_the_run_without_force() {
    let dir = tempdir().unwrap();
    let experiment = write_experiment(dir.path());
    let exp = experiment.to_str().unwrap();

    let first = run_cli(dir.path(), &["--experiment-file", exp]);
    assert!(first.status.success());

    // second fresh run would re-sample and clobber the saved assignment
    let second = run_cli(dir.path(), &["--experiment-file", exp]);
    assert!(!second.status.success());
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(stderr.contains("already exists"), "{}", stderr);
}

#[test]
fn negative_phase_aborts_before_any_write() {
    let dir = tempdir().unwrap();
    let experiment = write_experiment(dir.path());

    let output = run_cli(
        dir.path(),
        &[
            "--experiment-file",
            experiment.to_str().unwrap(),
            "--phase=-1",
        ],
    );
    assert!(!output.status.success());
    assert!(!dir.path().join("correct_choices.yml").exists());
    assert!(!dir.path().join("chorus-noise-p-1.json").exists());
}

#[test]
fn missing_experiment_file_fails() {
    let dir = tempdir().unwrap();
    let output = run_cli(dir.path(), &["--experiment-file", "nope.yml"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "{}", stderr);
}
