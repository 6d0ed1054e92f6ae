//! The protective agent.
//!
//! A [`Guardian`] holds its identity, its own view of trust, and the care
//! style that shapes the support it offers. It never touches the climate: it
//! emits [`CareEvent`]s and reacts to the directives the shelter hands back.
//!
//! Trust follows two signals. The climate's trust sets the baseline, and the
//! seedling's emotional answers, accumulated across cycles, shift it by up to
//! [`FEEDBACK_WEIGHT`] either way.

use crate::boundary::{AdjustmentDirective, BoundaryBreach};
use crate::climate::{unit, ClimateState};
use crate::event::{CareEvent, EmotionEvent};
use crate::ids::{GuardianId, SeedlingId};
use crate::seedling::Seedling;

/// Rate at which a guardian's trust level follows the climate's trust.
pub const TRUST_SMOOTHING: f32 = 0.2;

/// Largest shift the accumulated emotional feedback applies to the trust target.
pub const FEEDBACK_WEIGHT: f32 = 0.1;

/// Parameters that shape how a guardian gives care.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CareStyle {
    /// Preferred care intensity when unconstrained [0.0, 1.0]. Default 0.8.
    pub empathy: f32,
    /// Share of the allowance a guardian keeps offering after a breach
    /// notice [0.0, 1.0]. Default 0.9.
    pub patience: f32,
}

impl Default for CareStyle {
    fn default() -> Self {
        Self { empathy: 0.8, patience: 0.9 }
    }
}

/// A protective agent.
#[derive(Clone, Debug)]
pub struct Guardian {
    id: GuardianId,
    name: String,
    trust_level: f32,
    care_style: CareStyle,
    care_allowance: f32,
    emotional_feedback: f32,
    children: Vec<SeedlingId>,
    breach_count: u32,
    last_breach: Option<BoundaryBreach>,
}

impl Guardian {
    /// Create a guardian with the default care style and trust level 0.5.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_care_style(name, CareStyle::default())
    }

    /// Create a guardian with an explicit care style. Parameters are clamped into [0.0, 1.0].
    pub fn with_care_style(name: impl Into<String>, care_style: CareStyle) -> Self {
        Self {
            id: GuardianId::new(),
            name: name.into(),
            trust_level: 0.5,
            care_style: CareStyle {
                empathy: unit(care_style.empathy),
                patience: unit(care_style.patience),
            },
            care_allowance: 1.0,
            emotional_feedback: 0.0,
            children: Vec::new(),
            breach_count: 0,
            last_breach: None,
        }
    }

    /// This guardian's id.
    pub fn id(&self) -> GuardianId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The guardian's smoothed view of climate trust [0.0, 1.0].
    pub fn trust_level(&self) -> f32 {
        self.trust_level
    }

    /// Care style parameters.
    pub fn care_style(&self) -> &CareStyle {
        &self.care_style
    }

    /// Largest care intensity this guardian will currently offer.
    pub fn care_allowance(&self) -> f32 {
        self.care_allowance
    }

    /// Running mean of signed emotional feedback, in [-1.0, 1.0].
    pub fn emotional_feedback(&self) -> f32 {
        self.emotional_feedback
    }

    /// Seedlings created by this guardian.
    pub fn children(&self) -> &[SeedlingId] {
        &self.children
    }

    /// Breach notices received so far.
    pub fn breach_count(&self) -> u32 {
        self.breach_count
    }

    /// Most recent breach notice.
    pub fn last_breach(&self) -> Option<&BoundaryBreach> {
        self.last_breach.as_ref()
    }

    /// Create a seedling parented by this guardian and remember it as a child.
    pub fn create_seedling(&mut self, name: impl Into<String>) -> Seedling {
        let seedling = Seedling::new(name, self.id);
        self.children.push(seedling.id());
        seedling
    }

    /// Build the next care event for `target`.
    ///
    /// Intensity is the preferred intensity (`empathy`) capped at the current allowance.
    pub fn offer_care(&self, target: SeedlingId, timestamp: u64) -> CareEvent {
        let intensity = self.care_style.empathy.min(self.care_allowance);
        CareEvent::new(self.id, target, intensity, timestamp)
    }

    /// Fold the seedling's answer into the accumulated feedback.
    ///
    /// The signed value `valence × intensity` enters a running mean at
    /// [`TRUST_SMOOTHING`].
    pub fn receive_feedback(&mut self, event: &EmotionEvent) {
        let signal = event.emotion_kind.valence() * unit(event.intensity);
        self.emotional_feedback = (self.emotional_feedback
            + TRUST_SMOOTHING * (signal - self.emotional_feedback))
            .clamp(-1.0, 1.0);
    }

    /// React to a cycle's directive.
    ///
    /// The allowance becomes `directive.max_care_intensity`. The trust level
    /// moves at [`TRUST_SMOOTHING`] toward `climate.trust` shifted by
    /// `FEEDBACK_WEIGHT × emotional_feedback`.
    pub fn adjust_support(&mut self, directive: &AdjustmentDirective, climate: &ClimateState) {
        self.care_allowance = unit(directive.max_care_intensity);
        let target = unit(climate.trust + FEEDBACK_WEIGHT * self.emotional_feedback);
        self.trust_level = unit(self.trust_level + TRUST_SMOOTHING * (target - self.trust_level));
    }

    /// Record a breach notice and scale the allowance back by `patience`.
    pub fn notify_breach(&mut self, notice: &BoundaryBreach) {
        self.breach_count = self.breach_count.saturating_add(1);
        self.last_breach = Some(*notice);
        self.care_allowance = unit(self.care_allowance * self.care_style.patience);
    }
}
