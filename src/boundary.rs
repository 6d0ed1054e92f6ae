/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Safety boundaries and the directives they produce.
//!
//! - [`BoundaryPolicy`]: configurable safety floor and warning margin.
//! - [`SafetyVerdict`]: three-band classification of the climate's safety.
//! - [`AdjustmentDirective`]: what each agent may do next.
//! - [`BoundaryBreach`]: notice sent to both agents when the floor is crossed.
//!
//! # Bands
//!
//! ```text
//!   0.0 ─────────── floor ─────────── floor + margin ─────────── 1.0
//!        Breach             Warning                     Safe
//! ```
//!
//! # Invariants
//!
//! - [`BoundaryPolicy::evaluate`] is pure: no side effects, nothing retained.
//! - `max_care_intensity = care_quality × trust`, so low mutual trust or poor
//!   care quality throttles the size of the next supportive act.
//! - `max_emotion_intensity` is 1.0 while safe and falls linearly with safety
//!   below the warning band, reaching 0.0 at safety 0.0.

use crate::climate::{unit, ClimateState};

// ─── SafetyVerdict ──────────────────────────────────────────────────────────

/// Classification of the climate's safety scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SafetyVerdict {
    /// At or above `safety_floor + warning_margin`.
    Safe,
    /// Between the floor and the top of the margin.
    Warning,
    /// Below `safety_floor`. Growth is suppressed and both agents are notified.
    Breach,
}

impl SafetyVerdict {
    /// Fraction of a seedling's growth step withheld under this verdict.
    ///
    /// | Verdict | Penalty |
    /// |---|---|
    /// | Safe | 0.0 |
    /// | Warning | 0.5 |
    /// | Breach | 1.0 |
    pub fn breach_penalty(self) -> f32 {
        match self {
            SafetyVerdict::Safe => 0.0,
            SafetyVerdict::Warning => 0.5,
            SafetyVerdict::Breach => 1.0,
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            SafetyVerdict::Safe => "safe",
            SafetyVerdict::Warning => "warning",
            SafetyVerdict::Breach => "breach",
        }
    }
}

impl core::fmt::Display for SafetyVerdict {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── AdjustmentDirective ────────────────────────────────────────────────────

/// Limits on the next actions of each agent, computed fresh every cycle.
///
/// The engine never stores directives; callers may log them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjustmentDirective {
    /// Upper bound on the guardian's next care intensity [0.0, 1.0].
    pub max_care_intensity: f32,
    /// Upper bound on the emotional intensity the climate will acknowledge [0.0, 1.0].
    pub max_emotion_intensity: f32,
    /// Verdict on the climate that produced this directive.
    pub safety_verdict: SafetyVerdict,
}

impl AdjustmentDirective {
    /// `true` when the verdict is [`SafetyVerdict::Breach`].
    pub fn is_breach(&self) -> bool {
        self.safety_verdict == SafetyVerdict::Breach
    }
}

// ─── BoundaryBreach ─────────────────────────────────────────────────────────

/// Notification distributed to both agents of a cycle that ended in breach.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryBreach {
    /// Cycle count after the breaching cycle.
    pub cycle: u64,
    /// Safety at the end of the cycle.
    pub safety: f32,
    /// Floor that was crossed.
    pub safety_floor: f32,
}

// ─── BoundaryPolicy ─────────────────────────────────────────────────────────

/// Thresholds that turn a [`ClimateState`] into an [`AdjustmentDirective`].
///
/// Default: floor 0.2, margin 0.1 (warning band [0.2, 0.3)).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoundaryPolicy {
    /// Safety below this value is a breach.
    pub safety_floor: f32,
    /// Width of the warning band above the floor.
    pub warning_margin: f32,
}

impl BoundaryPolicy {
    /// Construct the standard policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the safety scalar of `state`.
    pub fn verdict(&self, state: &ClimateState) -> SafetyVerdict {
        if state.safety < self.safety_floor {
            SafetyVerdict::Breach
        } else if state.safety < self.safety_floor + self.warning_margin {
            SafetyVerdict::Warning
        } else {
            SafetyVerdict::Safe
        }
    }

    /// Compute the directive for `state`.
    pub fn evaluate(&self, state: &ClimateState) -> AdjustmentDirective {
        let safety_verdict = self.verdict(state);
        AdjustmentDirective {
            max_care_intensity: unit(state.care_quality * state.trust),
            max_emotion_intensity: self.emotion_allowance(state.safety, safety_verdict),
            safety_verdict,
        }
    }

    /// Emotion allowance: 1.0 when safe, otherwise `safety / (floor + margin)`.
    fn emotion_allowance(&self, safety: f32, verdict: SafetyVerdict) -> f32 {
        match verdict {
            SafetyVerdict::Safe => 1.0,
            SafetyVerdict::Warning | SafetyVerdict::Breach => {
                let top = self.safety_floor + self.warning_margin;
                if top > 0.0 {
                    unit(safety / top)
                } else {
                    0.0
                }
            }
        }
    }

    /// The same policy with a new floor, clamped into [0.0, 1.0].
    pub fn with_safety_floor(self, safety_floor: f32) -> Self {
        Self { safety_floor: unit(safety_floor), ..self }
    }

    /// Build the breach notice for a cycle that ended in `state`.
    pub fn breach_notice(&self, state: &ClimateState) -> BoundaryBreach {
        BoundaryBreach {
            cycle: state.cycle_count,
            safety: state.safety,
            safety_floor: self.safety_floor,
        }
    }
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        Self {
            safety_floor: 0.2,
            warning_margin: 0.1,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
