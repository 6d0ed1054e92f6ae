//! End-to-end care cycle scenarios through the public `Shelter` API.

use shelter_core::{
    AgentRef, CareEvent, ClimateState, CyclePhase, EmotionEvent, EmotionKind, Guardian,
    GuardianId, SafetyVerdict, SeedlingId, Shelter, ShelterConfig, ShelterError,
};

// ─── helpers ─────────────────────────────────────────────────────────────────

fn shelter_with(initial: ClimateState) -> (Shelter, GuardianId, SeedlingId) {
    let config = ShelterConfig { initial_climate: initial, ..ShelterConfig::default() };
    let mut shelter = Shelter::with_config("SafeHaven", config);
    let mut guardian = Guardian::new("Athena");
    let seedling = guardian.create_seedling("Pythia");
    let g = shelter.add_guardian(guardian).unwrap();
    let s = shelter.add_seedling(seedling).unwrap();
    (shelter, g, s)
}

fn neutral_shelter() -> (Shelter, GuardianId, SeedlingId) {
    shelter_with(ClimateState::with_scalars(0.5, 0.5, 0.5))
}

// ─── scenarios ───────────────────────────────────────────────────────────────

#[test]
fn test_care_then_calm_is_safe() {
    let (mut shelter, g, s) = neutral_shelter();
    let d = shelter
        .run_cycle(
            CareEvent::new(g, s, 0.8, 1),
            Some(EmotionEvent::new(s, EmotionKind::Calm, 0.6, 1)),
        )
        .unwrap();

    let climate = shelter.climate_snapshot();
    assert_eq!(d.safety_verdict, SafetyVerdict::Safe);
    assert_eq!(climate.cycle_count, 1);
    assert!(climate.trust > 0.5, "trust={}", climate.trust);
    assert!(climate.safety > 0.5);
    assert_eq!(d.max_emotion_intensity, 1.0);
    assert!((d.max_care_intensity - climate.care_quality * climate.trust).abs() < 1e-6);
}

#[test]
fn test_distress_at_low_safety_signals_breach() {
    let (mut shelter, g, s) = shelter_with(ClimateState::with_scalars(0.5, 0.5, 0.25));
    let d = shelter
        .run_cycle(
            CareEvent::new(g, s, 0.0, 1),
            Some(EmotionEvent::new(s, EmotionKind::Distress, 0.9, 1)),
        )
        .unwrap();

    // 0.25 − 0.3·0.9 clamps to 0.0
    assert_eq!(shelter.climate_snapshot().safety, 0.0);
    assert_eq!(d.safety_verdict, SafetyVerdict::Breach);
    assert_eq!(d.max_emotion_intensity, 0.0);
    assert_eq!(shelter.guardian(&g).unwrap().breach_count(), 1);
    assert_eq!(shelter.seedling(&s).unwrap().breach_count(), 1);
    assert_eq!(shelter.seedling(&s).unwrap().growth_metric(), 0.0);
}

#[test]
fn test_mild_fear_in_warning_band_does_not_notify() {
    // 0.35 − 0.3·0.4 = 0.23, inside [floor, floor + margin)
    let (mut shelter, g, s) = shelter_with(ClimateState::with_scalars(0.5, 0.5, 0.35));
    let d = shelter
        .run_cycle(
            CareEvent::new(g, s, 0.3, 1),
            Some(EmotionEvent::new(s, EmotionKind::Fear, 0.4, 1)),
        )
        .unwrap();
    assert_eq!(d.safety_verdict, SafetyVerdict::Warning);
    assert!(d.max_emotion_intensity < 1.0);
    assert_eq!(shelter.guardian(&g).unwrap().breach_count(), 0);
    assert!(shelter.last_breach().is_none());
    // Warning halves growth.
    let growth = shelter.seedling(&s).unwrap().growth_metric();
    assert!((growth - 0.05).abs() < 1e-6, "growth={growth}");
}

#[test]
fn test_breach_leaves_growth_unchanged() {
    let (mut shelter, g, s) = neutral_shelter();
    let mut tick = 0;
    loop {
        let growth_before = shelter.seedling(&s).unwrap().growth_metric();
        let d = shelter
            .run_cycle(
                CareEvent::new(g, s, 0.1, tick),
                Some(EmotionEvent::new(s, EmotionKind::Fear, 1.0, tick)),
            )
            .unwrap();
        let growth = shelter.seedling(&s).unwrap().growth_metric();
        if d.safety_verdict == SafetyVerdict::Breach {
            assert_eq!(growth, growth_before);
            let dev = shelter.seedling(&s).unwrap().development_summary();
            assert_eq!(dev.cycles_suppressed, 1);
            assert_eq!(dev.breaches_seen, 1);
            assert_eq!(shelter.guardian(&g).unwrap().breach_count(), 1);
            assert_eq!(shelter.last_breach().map(|b| b.cycle), Some(tick + 1));
            break;
        }
        assert!(growth > growth_before);
        tick += 1;
        assert!(tick < 20, "safety never reached the floor");
    }
}

#[test]
fn test_unregistered_guardian_rejected_without_mutation() {
    let (mut shelter, _, s) = neutral_shelter();
    let stranger = Guardian::new("Stranger");
    let before = shelter.climate_snapshot();

    let err = shelter
        .run_cycle(CareEvent::new(stranger.id(), s, 0.5, 0), None)
        .unwrap_err();

    assert_eq!(err, ShelterError::UnregisteredAgent(AgentRef::Guardian(stranger.id())));
    assert_eq!(shelter.climate_snapshot(), before);
    assert_eq!(shelter.phase(), CyclePhase::Idle);
    assert_eq!(shelter.recent_cycles().count(), 0);
}

#[test]
fn test_invalid_intensity_rejected_without_mutation() {
    let (mut shelter, g, s) = neutral_shelter();
    shelter.run_cycle(CareEvent::new(g, s, 0.5, 0), None).unwrap();
    let before = shelter.climate_snapshot();
    let growth_before = shelter.seedling(&s).unwrap().growth_metric();
    let trust_before = shelter.guardian(&g).unwrap().trust_level();

    for bad in [-0.1, 1.1, f32::NAN] {
        let err = shelter.run_cycle(CareEvent::new(g, s, bad, 1), None).unwrap_err();
        assert!(err.is_invalid_event(), "{err}");
        let err = shelter
            .run_cycle(
                CareEvent::new(g, s, 0.5, 1),
                Some(EmotionEvent::new(s, EmotionKind::Joy, bad, 1)),
            )
            .unwrap_err();
        assert!(err.is_invalid_event(), "{err}");
    }

    assert_eq!(shelter.climate_snapshot(), before);
    assert_eq!(shelter.seedling(&s).unwrap().growth_metric(), growth_before);
    assert_eq!(shelter.guardian(&g).unwrap().trust_level(), trust_before);
    assert_eq!(shelter.recent_cycles().count(), 1);
}

#[test]
fn test_rejected_cycle_can_be_retried() {
    let (mut shelter, g, s) = neutral_shelter();
    assert!(shelter.run_cycle(CareEvent::new(g, s, 1.5, 0), None).is_err());
    let d = shelter.run_cycle(CareEvent::new(g, s, 1.0, 0), None).unwrap();
    assert_eq!(d.safety_verdict, SafetyVerdict::Safe);
    assert_eq!(shelter.climate_snapshot().cycle_count, 1);
}

#[test]
fn test_agents_drive_their_own_events() {
    let (mut shelter, g, s) = neutral_shelter();
    for tick in 0..10 {
        let care = shelter.guardian(&g).unwrap().offer_care(s, tick);
        assert!(care.intensity <= shelter.guardian(&g).unwrap().care_allowance());
        let emotion = shelter.seedling(&s).unwrap().express(EmotionKind::Trust, 0.7, tick);
        assert_eq!(emotion.intensity, 0.7);
        shelter.run_cycle(care, Some(emotion)).unwrap();

        let g_allow = shelter.guardian(&g).unwrap().care_allowance();
        assert_eq!(g_allow, shelter.standing_directive().max_care_intensity);
    }
    let summary = shelter.emotional_summary();
    assert_eq!(summary.cycles, 10);
    assert_eq!(summary.dominant_emotion, Some(EmotionKind::Trust));
    assert_eq!(summary.count(EmotionKind::Trust), 10);
    assert_eq!(summary.breach_count, 0);
    assert_eq!(summary.climate, shelter.climate_snapshot());
}

#[test]
fn test_shelters_are_independent() {
    let (mut a, ga, sa) = neutral_shelter();
    let (b, _, _) = neutral_shelter();
    a.run_cycle(
        CareEvent::new(ga, sa, 0.9, 0),
        Some(EmotionEvent::new(sa, EmotionKind::Joy, 0.9, 0)),
    )
    .unwrap();
    assert_eq!(b.climate_snapshot(), ClimateState::with_scalars(0.5, 0.5, 0.5));
    assert_ne!(a.climate_snapshot(), b.climate_snapshot());
}

#[test]
fn test_agent_driven_cycle_recovers_from_breach() {
    // Agents start with a full allowance, so one fearful answer from the
    // warning band drives safety to 0.
    let (mut shelter, g, s) = shelter_with(ClimateState::with_scalars(0.5, 0.5, 0.25));
    let mut tick = 0;
    let mut drive = |shelter: &mut Shelter, kind: EmotionKind, intensity: f32| {
        let care = shelter.guardian(&g).unwrap().offer_care(s, tick);
        let emotion = shelter.seedling(&s).unwrap().express(kind, intensity, tick);
        tick += 1;
        shelter.run_cycle(care, Some(emotion)).unwrap()
    };

    drive(&mut shelter, EmotionKind::Fear, 1.0);
    assert_eq!(shelter.climate_snapshot().safety, 0.0);
    assert_eq!(shelter.standing_directive().safety_verdict, SafetyVerdict::Breach);
    assert_eq!(shelter.standing_directive().max_emotion_intensity, 0.0);

    // Fear is now fully damped; it cannot push safety further.
    let d = drive(&mut shelter, EmotionKind::Fear, 1.0);
    assert_eq!(d.safety_verdict, SafetyVerdict::Breach);
    let growth_in_breach = shelter.seedling(&s).unwrap().growth_metric();

    let mut verdicts = Vec::new();
    for _ in 0..4 {
        verdicts.push(drive(&mut shelter, EmotionKind::Trust, 0.8).safety_verdict);
    }
    assert_ne!(verdicts[0], SafetyVerdict::Breach);
    assert_eq!(verdicts.last(), Some(&SafetyVerdict::Safe));
    assert!(shelter.climate_snapshot().safety > 0.3);
    assert!(shelter.seedling(&s).unwrap().growth_metric() > growth_in_breach);
}
