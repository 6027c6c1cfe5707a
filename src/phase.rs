//! ═══════════════════════════════════════════════════════════════════════════════
//! PHASE — Exact Rational Training Phase and Variant Planning
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! The phase controls the mixture of cue-light-assisted and unassisted
//! trial variants. Downstream trial schedulers interpret stimulus
//! frequencies as small relative sampling weights, so the fractional part
//! of the phase must survive as an exact reduced fraction. The phase is
//! therefore parsed digit-wise from the text the operator typed: `1.25`
//! is exactly 5/4, and it never passes through `f64`.
//! ═══════════════════════════════════════════════════════════════════════════════

use std::fmt;
use std::str::FromStr;

use crate::error::ChorusError;

/// Non-negative rational phase value, always in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    numerator: u64,
    denominator: u64,
}

/// How many variants a stimulus expands into at a given phase, and with
/// which frequency weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantPlan {
    /// `phase <= 1`: one cue-light variant, frequency 1
    CueOnly,
    /// `1 < phase < 2`: both variants; frequencies realize `phase - 1`
    /// exactly, so `free / (cue + free)` equals the reduced fraction
    Mixed { cue_frequency: u64, free_frequency: u64 },
    /// `phase >= 2`: one unassisted variant, frequency 1
    FreeOnly,
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Phase {
    /// Build a phase from an integer ratio, reducing to lowest terms.
    pub fn from_ratio(numerator: u64, denominator: u64) -> Result<Self, ChorusError> {
        if denominator == 0 {
            return Err(ChorusError::UnsupportedPhase(format!(
                "{}/{}",
                numerator, denominator
            )));
        }
        let d = gcd(numerator, denominator).max(1);
        Ok(Phase {
            numerator: numerator / d,
            denominator: denominator / d,
        })
    }

    /// The variant set this phase calls for.
    ///
    /// For `1 < phase < 2`, with `phase - 1 = n/d` in lowest terms, the
    /// cue-light variant gets weight `d - n` and the unassisted variant
    /// weight `n`. Since `gcd(n, d) = gcd(phase_num, phase_den) = 1`, the
    /// weights are already as small as they can be.
    pub fn plan(&self) -> VariantPlan {
        if self.numerator <= self.denominator {
            VariantPlan::CueOnly
        } else if self.numerator >= 2 * self.denominator {
            VariantPlan::FreeOnly
        } else {
            let past_one = self.numerator - self.denominator;
            VariantPlan::Mixed {
                cue_frequency: self.denominator - past_one,
                free_frequency: past_one,
            }
        }
    }
}

impl FromStr for Phase {
    type Err = ChorusError;

    /// Parse decimal text (`"1"`, `"1.25"`, `".5"`) into an exact fraction.
    ///
    /// Negative values are outside the supported domain and rejected here,
    /// before any file is read or written.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let unsupported = || ChorusError::UnsupportedPhase(s.to_string());

        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, f),
            None => (text, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(unsupported());
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(unsupported());
        }
        // 10^9 keeps every intermediate comfortably inside u64
        if frac_part.len() > 9 {
            return Err(unsupported());
        }

        let integral: u64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| unsupported())?
        };
        let denominator = 10u64.pow(frac_part.len() as u32);
        let fractional: u64 = if frac_part.is_empty() {
            0
        } else {
            frac_part.parse().map_err(|_| unsupported())?
        };
        let numerator = integral
            .checked_mul(denominator)
            .and_then(|n| n.checked_add(fractional))
            .ok_or_else(unsupported)?;
        Phase::from_ratio(numerator, denominator)
    }
}

impl fmt::Display for Phase {
    /// Render back as decimal text (`5/4` prints as `1.25`); used in the
    /// generated file name. Denominators produced by parsing always divide
    /// a power of ten; anything else falls back to `n/d` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            return write!(f, "{}", self.numerator);
        }
        let mut rest = self.denominator;
        let mut twos = 0u32;
        let mut fives = 0u32;
        while rest % 2 == 0 {
            rest /= 2;
            twos += 1;
        }
        while rest % 5 == 0 {
            rest /= 5;
            fives += 1;
        }
        if rest != 1 {
            return write!(f, "{}/{}", self.numerator, self.denominator);
        }
        let digits = twos.max(fives);
        let scale = 10u64.pow(digits) / self.denominator;
        let scaled = self.numerator * scale;
        let ten = 10u64.pow(digits);
        let frac = format!("{:0width$}", scaled % ten, width = digits as usize);
        write!(f, "{}.{}", scaled / ten, frac.trim_end_matches('0'))
    }
}
