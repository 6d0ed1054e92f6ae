/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! The shared climate of a care relationship.
//!
//! [`ClimateState`] is plain data: three bounded scalars and a cycle counter.
//! It is owned by the [`ClimateEngine`](crate::engine::ClimateEngine); every
//! other component only ever sees a copy.
//!
//! # Invariants
//!
//! - `trust`, `care_quality` and `safety` stay in [0.0, 1.0] after every
//!   transition. Values are clamped, never rejected.
//! - `cycle_count` only grows.

/// Snapshot of the relationship climate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClimateState {
    /// Mutual trust [0.0, 1.0].
    pub trust: f32,
    /// Quality of recent care [0.0, 1.0]. Erodes without reinforcement.
    pub care_quality: f32,
    /// Felt safety of the shelter [0.0, 1.0].
    pub safety: f32,
    /// Number of completed care cycles.
    pub cycle_count: u64,
}

impl ClimateState {
    /// The neutral starting climate: every scalar at 0.5, no cycles.
    pub fn new() -> Self {
        Self::with_scalars(0.5, 0.5, 0.5)
    }

    /// Build a climate at cycle 0 from explicit scalars, clamping each into [0.0, 1.0].
    ///
    /// NaN inputs become 0.0.
    pub fn with_scalars(trust: f32, care_quality: f32, safety: f32) -> Self {
        Self {
            trust: unit(trust),
            care_quality: unit(care_quality),
            safety: unit(safety),
            cycle_count: 0,
        }
    }

    /// `true` when every scalar lies in [0.0, 1.0].
    pub fn is_bounded(&self) -> bool {
        [self.trust, self.care_quality, self.safety]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }
}

impl Default for ClimateState {
    fn default() -> Self {
        Self::new()
    }
}

/// Clamp into [0.0, 1.0], mapping NaN to 0.0.
pub(crate) fn unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let c = ClimateState::default();
        assert_eq!(c.trust, 0.5);
        assert_eq!(c.care_quality, 0.5);
        assert_eq!(c.safety, 0.5);
        assert_eq!(c.cycle_count, 0);
        assert!(c.is_bounded());
    }

    #[test]
    fn test_with_scalars_clamps() {
        let c = ClimateState::with_scalars(1.7, -0.3, f32::NAN);
        assert_eq!(c.trust, 1.0);
        assert_eq!(c.care_quality, 0.0);
        assert_eq!(c.safety, 0.0);
        assert!(c.is_bounded());
    }

    #[test]
    fn test_is_bounded_detects_escape() {
        let mut c = ClimateState::new();
        c.safety = 1.2;
        assert!(!c.is_bounded());
    }
}
