//! The developing agent.
//!
//! A [`Seedling`] grows through directives and carries a per-kind emotional
//! state. Growth only ever increases, and it stalls entirely in a cycle that
//! ends in breach.

use crate::boundary::{AdjustmentDirective, BoundaryBreach};
use crate::climate::unit;
use crate::event::{EmotionEvent, EmotionKind, EMOTION_KINDS};
use crate::ids::{GuardianId, SeedlingId};

/// Growth gained from one fully safe cycle.
pub const GROWTH_UNIT: f32 = 0.1;

/// Rate at which the emotional state follows reported emotions.
pub const EMOTION_SMOOTHING: f32 = 0.3;

// ─── EmotionalState ─────────────────────────────────────────────────────────

/// Per-kind emotional levels, each in [0.0, 1.0].
///
/// Stored as a fixed table indexed by [`EmotionKind::index`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmotionalState {
    levels: [f32; EMOTION_KINDS],
}

impl EmotionalState {
    /// Level for one kind.
    pub fn get(&self, kind: EmotionKind) -> f32 {
        self.levels[kind.index()]
    }

    /// `(kind, level)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (EmotionKind, f32)> + '_ {
        EmotionKind::ALL.iter().map(move |&k| (k, self.levels[k.index()]))
    }

    /// Strongest kind, or `None` while every level is zero.
    ///
    /// Ties go to the kind earlier in [`EmotionKind::ALL`].
    pub fn dominant(&self) -> Option<EmotionKind> {
        let mut best: Option<(EmotionKind, f32)> = None;
        for (kind, level) in self.iter() {
            if level > best.map_or(0.0, |(_, l)| l) {
                best = Some((kind, level));
            }
        }
        best.map(|(k, _)| k)
    }

    /// Move the reported kind toward `intensity`; decay every other kind.
    fn record(&mut self, kind: EmotionKind, intensity: f32) {
        for (i, level) in self.levels.iter_mut().enumerate() {
            let target = if i == kind.index() { intensity } else { 0.0 };
            *level = unit(*level + EMOTION_SMOOTHING * (target - *level));
        }
    }
}

// ─── DevelopmentSummary ─────────────────────────────────────────────────────

/// Read-only digest of a seedling's development.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DevelopmentSummary {
    /// Seedling id.
    pub seedling_id: SeedlingId,
    /// Parent guardian id.
    pub parent_id: GuardianId,
    /// Accumulated growth.
    pub growth_metric: f32,
    /// Cycles in which growth was applied.
    pub cycles_learned: u64,
    /// Cycles in which growth was withheld by a breach.
    pub cycles_suppressed: u64,
    /// Breach notices received.
    pub breaches_seen: u32,
    /// Strongest current emotion.
    pub dominant_emotion: Option<EmotionKind>,
}

// ─── Seedling ───────────────────────────────────────────────────────────────

/// A developing agent.
#[derive(Clone, Debug)]
pub struct Seedling {
    id: SeedlingId,
    name: String,
    parent_id: GuardianId,
    growth_metric: f32,
    emotional_state: EmotionalState,
    emotion_allowance: f32,
    cycles_learned: u64,
    cycles_suppressed: u64,
    breach_count: u32,
    last_breach: Option<BoundaryBreach>,
}

impl Seedling {
    /// Create a seedling with zero growth and a neutral emotional state.
    pub fn new(name: impl Into<String>, parent_id: GuardianId) -> Self {
        Self {
            id: SeedlingId::new(),
            name: name.into(),
            parent_id,
            growth_metric: 0.0,
            emotional_state: EmotionalState::default(),
            emotion_allowance: 1.0,
            cycles_learned: 0,
            cycles_suppressed: 0,
            breach_count: 0,
            last_breach: None,
        }
    }

    /// This seedling's id.
    pub fn id(&self) -> SeedlingId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The guardian this seedling was created under.
    pub fn parent_id(&self) -> GuardianId {
        self.parent_id
    }

    /// Accumulated growth (≥ 0, never decreases).
    pub fn growth_metric(&self) -> f32 {
        self.growth_metric
    }

    /// Per-kind emotional levels.
    pub fn emotional_state(&self) -> &EmotionalState {
        &self.emotional_state
    }

    /// Largest emotional intensity the climate currently acknowledges.
    pub fn emotion_allowance(&self) -> f32 {
        self.emotion_allowance
    }

    /// Breach notices received so far.
    pub fn breach_count(&self) -> u32 {
        self.breach_count
    }

    /// Most recent breach notice.
    pub fn last_breach(&self) -> Option<&BoundaryBreach> {
        self.last_breach.as_ref()
    }

    /// Strongest current emotion.
    pub fn dominant_emotion(&self) -> Option<EmotionKind> {
        self.emotional_state.dominant()
    }

    /// Build an emotion event.
    ///
    /// Negative kinds are capped at the current allowance. Positive kinds
    /// pass through, so a seedling can always help the climate recover.
    pub fn express(&self, kind: EmotionKind, intensity: f32, timestamp: u64) -> EmotionEvent {
        let intensity = if kind.is_positive() {
            unit(intensity)
        } else {
            unit(intensity).min(self.emotion_allowance)
        };
        EmotionEvent::new(self.id, kind, intensity, timestamp)
    }

    /// Fold an acknowledged emotion into the emotional state.
    pub fn feel(&mut self, event: &EmotionEvent) {
        self.emotional_state.record(event.emotion_kind, unit(event.intensity));
    }

    /// Grow from a directive: `GROWTH_UNIT × (1 − breach_penalty)`.
    ///
    /// Also takes the directive's emotion allowance. Returns the growth gained.
    pub fn learn_from(&mut self, directive: &AdjustmentDirective) -> f32 {
        self.emotion_allowance = unit(directive.max_emotion_intensity);
        let gained = GROWTH_UNIT * (1.0 - directive.safety_verdict.breach_penalty());
        self.growth_metric += gained.max(0.0);
        self.cycles_learned = self.cycles_learned.saturating_add(1);
        gained
    }

    /// Take the directive's emotion allowance without growing.
    ///
    /// Used for cycles that end in breach.
    pub fn withhold_growth(&mut self, directive: &AdjustmentDirective) {
        self.emotion_allowance = unit(directive.max_emotion_intensity);
        self.cycles_suppressed = self.cycles_suppressed.saturating_add(1);
    }

    /// Record a breach notice.
    pub fn notify_breach(&mut self, notice: &BoundaryBreach) {
        self.breach_count = self.breach_count.saturating_add(1);
        self.last_breach = Some(*notice);
    }

    /// Development digest.
    pub fn development_summary(&self) -> DevelopmentSummary {
        DevelopmentSummary {
            seedling_id: self.id,
            parent_id: self.parent_id,
            growth_metric: self.growth_metric,
            cycles_learned: self.cycles_learned,
            cycles_suppressed: self.cycles_suppressed,
            breaches_seen: self.breach_count,
            dominant_emotion: self.dominant_emotion(),
        }
    }
}
