/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! The climate regulation engine.
//!
//! [`ClimateEngine`] owns the current [`ClimateState`], folds care and
//! emotion events into it, and runs the [`BoundaryPolicy`] to produce the next
//! [`AdjustmentDirective`].
//!
//! # Transition
//!
//! ```text
//! care:     trust'        = trust + α · i · (1 − trust)
//!           care_quality' = care_quality + β · i − decay
//! emotion:  safety'       = safety + valence(kind) · γ · i
//! ```
//!
//! Every result is clamped into [0.0, 1.0].
//!
//! # Invariants
//!
//! - Deterministic: the same event and starting state always give a
//!   bit-identical result. No randomness, no clock.
//! - Atomic: all events of a cycle are validated before anything is
//!   computed; a rejected cycle leaves the owned state untouched.
//! - `cycle_count` grows by exactly one per applied cycle.
//!
//! Agent registration is the [`Shelter`](crate::shelter::Shelter)'s concern;
//! it checks source and target ids before handing events to the engine.

use crate::boundary::{AdjustmentDirective, BoundaryPolicy};
use crate::climate::{unit, ClimateState};
use crate::error::{check_intensity, ShelterError};
use crate::event::{CareEvent, ClimateEvent, EmotionEvent};

// ─── EngineConfig ───────────────────────────────────────────────────────────

/// Gains and decay of the climate transition.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// α: trust gained per unit of care, scaled by remaining headroom. Default 0.3.
    pub trust_gain: f32,
    /// β: care quality gained per unit of care. Default 0.2.
    pub quality_gain: f32,
    /// Care quality lost on every care update. Default 0.01.
    pub quality_decay: f32,
    /// γ: safety moved per unit of emotion. Default 0.3.
    pub safety_gain: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trust_gain: 0.3,
            quality_gain: 0.2,
            quality_decay: 0.01,
            safety_gain: 0.3,
        }
    }
}

// ─── ClimateEngine ──────────────────────────────────────────────────────────

/// Owner of the climate state and its transition function.
#[derive(Clone, Debug)]
pub struct ClimateEngine {
    config: EngineConfig,
    policy: BoundaryPolicy,
    state: ClimateState,
}

impl ClimateEngine {
    /// Construct an engine starting from `initial`.
    pub fn new(config: EngineConfig, policy: BoundaryPolicy, initial: ClimateState) -> Self {
        Self { config, policy, state: initial }
    }

    /// Copy of the current climate.
    pub fn state(&self) -> ClimateState {
        self.state
    }

    /// The boundary policy in force.
    pub fn policy(&self) -> &BoundaryPolicy {
        &self.policy
    }

    /// The transition gains in force.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Directive for the current climate.
    pub fn directive(&self) -> AdjustmentDirective {
        self.policy.evaluate(&self.state)
    }

    /// Replace the boundary policy and return the directive it gives for the
    /// current climate. The climate itself is untouched.
    pub fn set_policy(&mut self, policy: BoundaryPolicy) -> AdjustmentDirective {
        self.policy = policy;
        self.directive()
    }

    // ── Pure transitions ───────────────────────────────────────────────────

    /// Apply a single event to `state` and evaluate the result.
    ///
    /// Counts as one cycle. Fails with
    /// [`InvalidEvent::IntensityOutOfRange`](crate::error::InvalidEvent::IntensityOutOfRange)
    /// when the intensity is NaN or outside [0.0, 1.0].
    pub fn apply(
        &self,
        event: &ClimateEvent,
        state: &ClimateState,
    ) -> Result<(ClimateState, AdjustmentDirective), ShelterError> {
        check_intensity(event.intensity())?;
        let mut next = *state;
        match event {
            ClimateEvent::Care(care) => self.care_update(&mut next, care),
            ClimateEvent::Emotion(emotion) => self.emotion_update(&mut next, emotion),
        }
        next.cycle_count = next.cycle_count.saturating_add(1);
        let directive = self.policy.evaluate(&next);
        Ok((next, directive))
    }

    /// Apply a full care cycle (care first, then emotion) to `state`.
    ///
    /// Both intensities are validated before either update runs. The cycle
    /// counts once.
    pub fn apply_cycle(
        &self,
        care: &CareEvent,
        emotion: &EmotionEvent,
        state: &ClimateState,
    ) -> Result<(ClimateState, AdjustmentDirective), ShelterError> {
        check_intensity(care.intensity)?;
        check_intensity(emotion.intensity)?;
        let mut next = *state;
        self.care_update(&mut next, care);
        self.emotion_update(&mut next, emotion);
        next.cycle_count = next.cycle_count.saturating_add(1);
        let directive = self.policy.evaluate(&next);
        Ok((next, directive))
    }

    // ── Committing transitions ─────────────────────────────────────────────

    /// Apply a care cycle to the owned state. Nothing changes on `Err`.
    pub fn commit_cycle(
        &mut self,
        care: &CareEvent,
        emotion: &EmotionEvent,
    ) -> Result<AdjustmentDirective, ShelterError> {
        let (next, directive) = self.apply_cycle(care, emotion, &self.state)?;
        tracing::trace!(
            cycle = next.cycle_count,
            trust = next.trust,
            care_quality = next.care_quality,
            safety = next.safety,
            "climate committed"
        );
        self.state = next;
        Ok(directive)
    }

    /// Apply a single event to the owned state. Nothing changes on `Err`.
    pub fn commit(&mut self, event: &ClimateEvent) -> Result<AdjustmentDirective, ShelterError> {
        let (next, directive) = self.apply(event, &self.state)?;
        self.state = next;
        Ok(directive)
    }

    // ── Scalar updates ─────────────────────────────────────────────────────

    fn care_update(&self, state: &mut ClimateState, care: &CareEvent) {
        let i = care.intensity;
        state.trust = unit(state.trust + self.config.trust_gain * i * (1.0 - state.trust));
        state.care_quality =
            unit(state.care_quality + self.config.quality_gain * i - self.config.quality_decay);
    }

    fn emotion_update(&self, state: &mut ClimateState, emotion: &EmotionEvent) {
        let delta = emotion.emotion_kind.valence() * self.config.safety_gain * emotion.intensity;
        state.safety = unit(state.safety + delta);
    }
}

impl Default for ClimateEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default(), BoundaryPolicy::default(), ClimateState::default())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
