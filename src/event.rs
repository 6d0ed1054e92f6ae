//! Typed events flowing into the climate engine.
//!
//! What an agent feels or decides is produced outside this crate; it arrives
//! here already reduced to a [`CareEvent`] or an [`EmotionEvent`]. Timestamps
//! are logical ticks supplied by the caller.

use crate::ids::{GuardianId, SeedlingId};

/// Emotions a seedling can report.
///
/// The effect of each kind on the climate is a fixed table lookup
/// ([`EmotionKind::valence`]), so the engine's transition stays total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EmotionKind {
    /// Settled, at ease.
    Calm,
    /// Overwhelmed or hurting.
    Distress,
    /// Delight.
    Joy,
    /// Perceived threat.
    Fear,
    /// Reliance on the guardian.
    Trust,
    /// Unable to make sense of what happened.
    Confusion,
}

/// Number of [`EmotionKind`] variants.
pub const EMOTION_KINDS: usize = 6;

/// Valence per kind, indexed by [`EmotionKind::index`].
const VALENCE: [f32; EMOTION_KINDS] = [
    1.0,  // Calm
    -1.0, // Distress
    1.0,  // Joy
    -1.0, // Fear
    1.0,  // Trust
    -1.0, // Confusion
];

impl EmotionKind {
    /// Every kind, in table order.
    pub const ALL: [EmotionKind; EMOTION_KINDS] = [
        EmotionKind::Calm,
        EmotionKind::Distress,
        EmotionKind::Joy,
        EmotionKind::Fear,
        EmotionKind::Trust,
        EmotionKind::Confusion,
    ];

    /// Position of this kind in per-kind tables.
    pub const fn index(self) -> usize {
        match self {
            EmotionKind::Calm => 0,
            EmotionKind::Distress => 1,
            EmotionKind::Joy => 2,
            EmotionKind::Fear => 3,
            EmotionKind::Trust => 4,
            EmotionKind::Confusion => 5,
        }
    }

    /// +1.0 for calm, joy and trust; -1.0 for distress, fear and confusion.
    pub fn valence(self) -> f32 {
        VALENCE[self.index()]
    }

    /// `true` for the kinds that raise safety.
    pub fn is_positive(self) -> bool {
        self.valence() > 0.0
    }

    /// Lowercase name, as used in logs and summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            EmotionKind::Calm => "calm",
            EmotionKind::Distress => "distress",
            EmotionKind::Joy => "joy",
            EmotionKind::Fear => "fear",
            EmotionKind::Trust => "trust",
            EmotionKind::Confusion => "confusion",
        }
    }
}

impl core::fmt::Display for EmotionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One act of support from a guardian to a seedling.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CareEvent {
    /// Guardian giving care.
    pub source_id: GuardianId,
    /// Seedling receiving care.
    pub target_id: SeedlingId,
    /// Strength of the supportive act [0.0, 1.0].
    pub intensity: f32,
    /// Logical tick.
    pub timestamp: u64,
}

impl CareEvent {
    /// Construct a care event. The intensity is validated when the event is applied.
    pub fn new(source_id: GuardianId, target_id: SeedlingId, intensity: f32, timestamp: u64) -> Self {
        Self { source_id, target_id, intensity, timestamp }
    }
}

/// An emotional report from a seedling.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmotionEvent {
    /// Seedling reporting the emotion.
    pub source_id: SeedlingId,
    /// What was felt.
    pub emotion_kind: EmotionKind,
    /// How strongly [0.0, 1.0].
    pub intensity: f32,
    /// Logical tick.
    pub timestamp: u64,
}

impl EmotionEvent {
    /// Construct an emotion event. The intensity is validated when the event is applied.
    pub fn new(source_id: SeedlingId, emotion_kind: EmotionKind, intensity: f32, timestamp: u64) -> Self {
        Self { source_id, emotion_kind, intensity, timestamp }
    }

    /// Stand-in for an absent response: calm at zero intensity.
    ///
    /// Substituted when a cycle closes without the seedling answering, so
    /// the cycle always terminates.
    pub fn neutral(source_id: SeedlingId, timestamp: u64) -> Self {
        Self::new(source_id, EmotionKind::Calm, 0.0, timestamp)
    }
}

/// Either event, as accepted by [`ClimateEngine::apply`](crate::engine::ClimateEngine::apply).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClimateEvent {
    /// Guardian care.
    Care(CareEvent),
    /// Seedling emotion.
    Emotion(EmotionEvent),
}

impl ClimateEvent {
    /// Intensity carried by the wrapped event.
    pub fn intensity(&self) -> f32 {
        match self {
            ClimateEvent::Care(e) => e.intensity,
            ClimateEvent::Emotion(e) => e.intensity,
        }
    }

    /// Logical tick of the wrapped event.
    pub fn timestamp(&self) -> u64 {
        match self {
            ClimateEvent::Care(e) => e.timestamp,
            ClimateEvent::Emotion(e) => e.timestamp,
        }
    }
}

impl From<CareEvent> for ClimateEvent {
    fn from(e: CareEvent) -> Self {
        ClimateEvent::Care(e)
    }
}

impl From<EmotionEvent> for ClimateEvent {
    fn from(e: EmotionEvent) -> Self {
        ClimateEvent::Emotion(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, kind) in EmotionKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i, "{kind}");
        }
    }

    #[test]
    fn test_valence_table() {
        assert!(EmotionKind::Calm.is_positive());
        assert!(EmotionKind::Joy.is_positive());
        assert!(EmotionKind::Trust.is_positive());
        assert!(!EmotionKind::Distress.is_positive());
        assert!(!EmotionKind::Fear.is_positive());
        assert!(!EmotionKind::Confusion.is_positive());
        for kind in EmotionKind::ALL {
            assert_eq!(kind.valence().abs(), 1.0);
        }
    }

    #[test]
    fn test_neutral_emotion() {
        let s = SeedlingId::new();
        let e = EmotionEvent::neutral(s, 7);
        assert_eq!(e.source_id, s);
        assert_eq!(e.emotion_kind, EmotionKind::Calm);
        assert_eq!(e.intensity, 0.0);
        assert_eq!(e.timestamp, 7);
    }

    #[test]
    fn test_climate_event_accessors() {
        let care = CareEvent::new(GuardianId::new(), SeedlingId::new(), 0.4, 3);
        let ev = ClimateEvent::from(care);
        assert_eq!(ev.intensity(), 0.4);
        assert_eq!(ev.timestamp(), 3);
    }
}
