//! Error types for the shelter core.
//!
//! Every rejection is detected before the climate is touched, so an `Err`
//! from any operation here means nothing changed and the caller may retry
//! with corrected input. A boundary breach is not an error; it travels on the
//! [`AdjustmentDirective`](crate::boundary::AdjustmentDirective).

use crate::ids::{AgentRef, SeedlingId};

/// Why an event was rejected as malformed.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidEvent {
    /// Intensity was NaN or outside [0.0, 1.0].
    #[error("intensity {intensity} outside [0, 1]")]
    IntensityOutOfRange {
        /// The offending intensity.
        intensity: f32,
    },

    /// A care event targeted a seedling the shelter does not know.
    #[error("unknown target seedling {0}")]
    UnknownTarget(SeedlingId),

    /// The emotion event came from a seedling other than the one the care
    /// event targeted in the same cycle.
    #[error("emotion from seedling {actual} but care targeted seedling {expected}")]
    EmotionSourceMismatch {
        /// Seedling the care event targeted.
        expected: SeedlingId,
        /// Seedling that sent the emotion event.
        actual: SeedlingId,
    },
}

/// Errors returned by [`Shelter`](crate::shelter::Shelter) and
/// [`ClimateEngine`](crate::engine::ClimateEngine).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShelterError {
    /// Malformed intensity or unknown target.
    #[error("invalid event: {0}")]
    InvalidEvent(#[from] InvalidEvent),

    /// Event from an agent never added to the shelter.
    #[error("unregistered agent: {0}")]
    UnregisteredAgent(AgentRef),

    /// The agent was already added to this shelter.
    #[error("agent already registered: {0}")]
    AlreadyRegistered(AgentRef),

    /// A policy threshold was NaN or infinite.
    #[error("safety floor {value} is not a finite number")]
    InvalidThreshold {
        /// The rejected value.
        value: f32,
    },
}

impl ShelterError {
    /// `true` for the [`ShelterError::InvalidEvent`] family.
    pub fn is_invalid_event(&self) -> bool {
        matches!(self, ShelterError::InvalidEvent(_))
    }
}

/// Reject intensities outside [0.0, 1.0]. NaN fails the range check.
pub(crate) fn check_intensity(intensity: f32) -> Result<f32, InvalidEvent> {
    if (0.0..=1.0).contains(&intensity) {
        Ok(intensity)
    } else {
        Err(InvalidEvent::IntensityOutOfRange { intensity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_intensity_bounds() {
        assert_eq!(check_intensity(0.0), Ok(0.0));
        assert_eq!(check_intensity(1.0), Ok(1.0));
        assert!(check_intensity(-0.01).is_err());
        assert!(check_intensity(1.01).is_err());
        assert!(check_intensity(f32::NAN).is_err());
        assert!(check_intensity(f32::INFINITY).is_err());
    }

    #[test]
    fn test_invalid_event_converts_into_shelter_error() {
        let err: ShelterError = InvalidEvent::IntensityOutOfRange { intensity: 2.0 }.into();
        assert!(err.is_invalid_event());
        assert_eq!(err.to_string(), "invalid event: intensity 2 outside [0, 1]");
    }

    #[test]
    fn test_invalid_threshold_message() {
        let err = ShelterError::InvalidThreshold { value: f32::INFINITY };
        assert!(!err.is_invalid_event());
        assert_eq!(err.to_string(), "safety floor inf is not a finite number");
    }

    #[test]
    fn test_unregistered_is_not_invalid_event() {
        let err = ShelterError::UnregisteredAgent(AgentRef::Seedling(SeedlingId::new()));
        assert!(!err.is_invalid_event());
        assert!(err.to_string().starts_with("unregistered agent: seedling "));
    }
}
