//! Recent-cycle records and the emotional summary built from them.
//!
//! The shelter keeps the last few [`CycleRecord`]s in a fixed-capacity ring;
//! [`ClimateSummary`] digests that window. Nothing here is persisted. Callers
//! that want history beyond the window log the records themselves.

use crate::boundary::SafetyVerdict;
use crate::climate::ClimateState;
use crate::event::{EmotionKind, EMOTION_KINDS};

/// One completed care cycle, as seen by the shelter.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleRecord {
    /// Cycle count after this cycle.
    pub cycle: u64,
    /// Intensity of the care event.
    pub care_intensity: f32,
    /// Kind of the emotion event.
    pub emotion_kind: EmotionKind,
    /// Intensity of the emotion event.
    pub emotion_intensity: f32,
    /// `true` when no emotion was supplied and the neutral stand-in was used.
    pub implicit_emotion: bool,
    /// Verdict at the end of the cycle.
    pub verdict: SafetyVerdict,
    /// Climate at the end of the cycle.
    pub climate: ClimateState,
}

/// Digest of the shelter's recent-cycle window.
///
/// Emotion statistics count only emotions that were actually reported;
/// neutral stand-ins for missing responses are left out.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClimateSummary {
    /// Cycles in the window.
    pub cycles: usize,
    /// Reported emotions per kind, indexed by [`EmotionKind::index`].
    pub emotion_counts: [u32; EMOTION_KINDS],
    /// Most frequently reported emotion. Ties go to the earlier kind.
    pub dominant_emotion: Option<EmotionKind>,
    /// Mean intensity of reported emotions (0.0 if none).
    pub average_emotion_intensity: f32,
    /// Mean care intensity (0.0 if no cycles).
    pub average_care_intensity: f32,
    /// Cycles that ended in warning.
    pub warning_count: u32,
    /// Cycles that ended in breach.
    pub breach_count: u32,
    /// Current climate.
    pub climate: ClimateState,
}

impl ClimateSummary {
    /// Summarise `records` (oldest first) against the current `climate`.
    pub fn from_records<'a, I>(records: I, climate: ClimateState) -> Self
    where
        I: IntoIterator<Item = &'a CycleRecord>,
    {
        let mut cycles = 0usize;
        let mut emotion_counts = [0u32; EMOTION_KINDS];
        let mut reported = 0u32;
        let mut emotion_total = 0.0f32;
        let mut care_total = 0.0f32;
        let mut warning_count = 0u32;
        let mut breach_count = 0u32;

        for r in records {
            cycles += 1;
            care_total += r.care_intensity;
            if !r.implicit_emotion {
                emotion_counts[r.emotion_kind.index()] += 1;
                reported += 1;
                emotion_total += r.emotion_intensity;
            }
            match r.verdict {
                SafetyVerdict::Safe => {}
                SafetyVerdict::Warning => warning_count += 1,
                SafetyVerdict::Breach => breach_count += 1,
            }
        }

        let mut dominant_emotion = None;
        let mut best = 0u32;
        for kind in EmotionKind::ALL {
            let n = emotion_counts[kind.index()];
            if n > best {
                best = n;
                dominant_emotion = Some(kind);
            }
        }

        Self {
            cycles,
            emotion_counts,
            dominant_emotion,
            average_emotion_intensity: if reported > 0 { emotion_total / reported as f32 } else { 0.0 },
            average_care_intensity: if cycles > 0 { care_total / cycles as f32 } else { 0.0 },
            warning_count,
            breach_count,
            climate,
        }
    }

    /// Reported emotions of one kind.
    pub fn count(&self, kind: EmotionKind) -> u32 {
        self.emotion_counts[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cycle: u64, kind: EmotionKind, intensity: f32, implicit: bool, verdict: SafetyVerdict) -> CycleRecord {
        CycleRecord {
            cycle,
            care_intensity: 0.5,
            emotion_kind: kind,
            emotion_intensity: intensity,
            implicit_emotion: implicit,
            verdict,
            climate: ClimateState::new(),
        }
    }

    #[test]
    fn test_empty_window() {
        let s = ClimateSummary::from_records(core::iter::empty(), ClimateState::new());
        assert_eq!(s.cycles, 0);
        assert_eq!(s.dominant_emotion, None);
        assert_eq!(s.average_emotion_intensity, 0.0);
        assert_eq!(s.average_care_intensity, 0.0);
    }

    #[test]
    fn test_counts_and_dominant() {
        let records = [
            record(1, EmotionKind::Joy, 0.8, false, SafetyVerdict::Safe),
            record(2, EmotionKind::Fear, 0.4, false, SafetyVerdict::Warning),
            record(3, EmotionKind::Joy, 0.6, false, SafetyVerdict::Safe),
            record(4, EmotionKind::Calm, 0.0, true, SafetyVerdict::Breach),
        ];
        let s = ClimateSummary::from_records(&records, ClimateState::new());
        assert_eq!(s.cycles, 4);
        assert_eq!(s.count(EmotionKind::Joy), 2);
        assert_eq!(s.count(EmotionKind::Fear), 1);
        assert_eq!(s.count(EmotionKind::Calm), 0, "implicit emotions are not counted");
        assert_eq!(s.dominant_emotion, Some(EmotionKind::Joy));
        assert!((s.average_emotion_intensity - 0.6).abs() < 1e-6);
        assert!((s.average_care_intensity - 0.5).abs() < 1e-6);
        assert_eq!(s.warning_count, 1);
        assert_eq!(s.breach_count, 1);
    }
}
