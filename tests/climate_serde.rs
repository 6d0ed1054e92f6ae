//! JSON round trips for the serialisable types.
#![cfg(feature = "serde")]

use shelter_core::{
    AdjustmentDirective, CareEvent, ClimateState, EmotionEvent, EmotionKind, Guardian,
    SafetyVerdict, Shelter, ShelterConfig,
};

#[test]
fn test_climate_state_round_trip() {
    let state = ClimateState::with_scalars(0.7, 0.4, 0.25);
    let json = serde_json::to_string(&state).unwrap();
    let back: ClimateState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}

#[test]
fn test_directive_uses_snake_case_verdict() {
    let d = AdjustmentDirective {
        max_care_intensity: 0.5,
        max_emotion_intensity: 0.25,
        safety_verdict: SafetyVerdict::Warning,
    };
    let value = serde_json::to_value(d).unwrap();
    assert_eq!(value["safety_verdict"], "warning");
    let back: AdjustmentDirective = serde_json::from_value(value).unwrap();
    assert_eq!(back, d);
}

#[test]
fn test_partial_config_fills_defaults() {
    let config: ShelterConfig =
        serde_json::from_str(r#"{ "policy": { "safety_floor": 0.3 } }"#).unwrap();
    assert_eq!(config.policy.safety_floor, 0.3);
    assert_eq!(config.policy.warning_margin, 0.1);
    assert_eq!(config.engine, ShelterConfig::default().engine);
    assert_eq!(config.initial_climate, ClimateState::new());
}

#[test]
fn test_summary_serialises_after_cycles() {
    let mut shelter = Shelter::new("Archive");
    let mut guardian = Guardian::new("Athena");
    let seedling = guardian.create_seedling("Pythia");
    let g = shelter.add_guardian(guardian).unwrap();
    let s = shelter.add_seedling(seedling).unwrap();
    for t in 0..3 {
        shelter
            .run_cycle(
                CareEvent::new(g, s, 0.6, t),
                Some(EmotionEvent::new(s, EmotionKind::Joy, 0.5, t)),
            )
            .unwrap();
    }

    let summary = shelter.emotional_summary();
    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["cycles"], 3);
    assert_eq!(value["dominant_emotion"], "joy");
    assert_eq!(value["climate"]["cycle_count"], 3);
}
