//! ═══════════════════════════════════════════════════════════════════════════════
//! RESPONSE — Outcome Values and Per-Stimulus Response Tables
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Three canonical outcomes exist: rewarded, punished, neutral. They are
//! shared immutable constants with structural equality, so tables built for
//! different stimuli compare equal when their shape is equal.
//! ═══════════════════════════════════════════════════════════════════════════════

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sentinel response key present in every table
pub const TIMEOUT_KEY: &str = "timeout";

/// What happens when the subject gives one particular response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Reward probability; only the correct response carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_reward: Option<f64>,
    /// Punishment probability; only incorrect responses carry one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_punish: Option<f64>,
    /// Whether this response scores as correct
    pub correct: bool,
}

impl Outcome {
    /// Rewarded with certainty
    pub const CORRECT: Outcome = Outcome {
        p_reward: Some(1.0),
        p_punish: None,
        correct: true,
    };

    /// Punished with certainty
    pub const INCORRECT: Outcome = Outcome {
        p_reward: None,
        p_punish: Some(1.0),
        correct: false,
    };

    /// No consequence; used for the timeout sentinel
    pub const NEUTRAL: Outcome = Outcome {
        p_reward: None,
        p_punish: None,
        correct: false,
    };
}

/// Response key → outcome, in configuration order with `timeout` last
pub type ResponseTable = IndexMap<String, Outcome>;

/// Build the full response table for one stimulus.
///
/// Every recognized key maps to [`Outcome::CORRECT`] or
/// [`Outcome::INCORRECT`] depending on `correct_key`; the `timeout`
/// sentinel is always appended with [`Outcome::NEUTRAL`]. A stimulus with
/// no correct key (filler material) maps every non-timeout key to
/// incorrect, which is a legal table.
pub fn build_table(all_keys: &[String], correct_key: Option<&str>) -> ResponseTable {
    let mut table: ResponseTable = all_keys
        .iter()
        .map(|key| {
            let outcome = if Some(key.as_str()) == correct_key {
                Outcome::CORRECT
            } else {
                Outcome::INCORRECT
            };
            (key.clone(), outcome)
        })
        .collect();
    table.insert(TIMEOUT_KEY.to_string(), Outcome::NEUTRAL);
    table
}

/// Response key → cue-light identifier.
///
/// Fixed experiment hardware data, constructed once and passed to the
/// assembler; a key without an entry simply gets no cue hint.
#[derive(Debug, Clone)]
pub struct CueMap(IndexMap<String, String>);

impl CueMap {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        CueMap(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Cue-light name for a response key, if the rig has one
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

impl Default for CueMap {
    /// The peck-port cue lights of the operant boxes
    fn default() -> Self {
        CueMap::from_pairs([
            ("peck_left", "left_blue"),
            ("peck_center", "center_blue"),
            ("peck_right", "right_blue"),
        ])
    }
}
