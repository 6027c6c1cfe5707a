//! ═══════════════════════════════════════════════════════════════════════════════
//! CHOICE — Abstract Binary Codes and the Response-Key Codec
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! The two alternatives of the experiment live in two spaces:
//!
//! - **Abstract**: [`Choice::A`] / [`Choice::B`], symmetric and
//!   order-independent. Random assignment and inversion happen here.
//! - **Domain**: the two response-key strings configured per experiment
//!   (e.g. `peck_left` / `peck_center`). Persisted files and output
//!   documents hold these.
//!
//! [`ChoiceCodec`] is the bijection between the two spaces. Keeping
//! inversion in the abstract space means it works identically no matter
//! which key pair an experiment configures.
//! ═══════════════════════════════════════════════════════════════════════════════

use indexmap::IndexMap;
use rand::seq::index;
use rand::Rng;

use crate::error::ChorusError;

/// One of the two abstract alternatives. Structural equality; never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    A,
    B,
}

impl Choice {
    /// The other alternative
    pub fn invert(self) -> Choice {
        match self {
            Choice::A => Choice::B,
            Choice::B => Choice::A,
        }
    }
}

/// Stimulus identifier → abstract code, in stimulus input order
pub type ChoiceAssignment = IndexMap<String, Choice>;

/// Stimulus identifier → domain response key, in stimulus input order
pub type KeyAssignment = IndexMap<String, String>;

/// Bijective mapping between `{A, B}` and the experiment's two response keys.
///
/// Purely functional: two small fixed lookup tables, no side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceCodec {
    /// Indexed by code: `[0]` decodes `A`, `[1]` decodes `B`
    keys: [String; 2],
}

impl ChoiceCodec {
    /// Build a codec from the ordered choice pair of an experiment.
    ///
    /// The two keys must be distinct, otherwise the mapping is not a
    /// bijection and encoded assignments could not be inverted.
    pub fn new(first: &str, second: &str) -> Result<Self, ChorusError> {
        if first == second {
            return Err(ChorusError::InvalidChoicePair(format!(
                "'{}' appears twice",
                first
            )));
        }
        Ok(Self {
            keys: [first.to_string(), second.to_string()],
        })
    }

    /// Domain key for an abstract code
    pub fn decode(&self, choice: Choice) -> &str {
        match choice {
            Choice::A => &self.keys[0],
            Choice::B => &self.keys[1],
        }
    }

    /// Abstract code for a domain key; exact inverse of [`decode`](Self::decode)
    pub fn encode(&self, key: &str) -> Result<Choice, ChorusError> {
        if key == self.keys[0] {
            Ok(Choice::A)
        } else if key == self.keys[1] {
            Ok(Choice::B)
        } else {
            Err(ChorusError::UnknownKey(key.to_string()))
        }
    }

    /// Decode every value of an assignment, preserving key order
    pub fn decode_values(&self, choices: &ChoiceAssignment) -> KeyAssignment {
        choices
            .iter()
            .map(|(stimulus, &choice)| (stimulus.clone(), self.decode(choice).to_string()))
            .collect()
    }

    /// Encode every value of an assignment, preserving key order.
    /// Fails on the first key outside the configured pair.
    pub fn encode_values(&self, keys: &KeyAssignment) -> Result<ChoiceAssignment, ChorusError> {
        keys.iter()
            .map(|(stimulus, key)| Ok((stimulus.clone(), self.encode(key)?)))
            .collect()
    }
}

/// Partition stimuli between the two codes.
///
/// Every stimulus starts as `A`; a uniformly random subset of size
/// `floor(n/2)`, drawn without replacement, flips to `B`. The RNG is
/// injected so tests can pin the draw with a seeded generator.
pub fn assign_choices<R: Rng + ?Sized>(stimuli: &[String], rng: &mut R) -> ChoiceAssignment {
    let mut assignment: ChoiceAssignment = stimuli
        .iter()
        .map(|s| (s.clone(), Choice::A))
        .collect();
    let half = stimuli.len() / 2;
    for idx in index::sample(rng, stimuli.len(), half) {
        assignment[&stimuli[idx]] = Choice::B;
    }
    assignment
}

/// Flip every assignment. Pure involution: applying twice is the identity.
pub fn invert_choices(choices: &ChoiceAssignment) -> ChoiceAssignment {
    choices
        .iter()
        .map(|(stimulus, &choice)| (stimulus.clone(), choice.invert()))
        .collect()
}
