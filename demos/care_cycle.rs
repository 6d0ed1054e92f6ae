//! # Shelter Care Cycle Walkthrough
//!
//! One guardian and one seedling live through three phases: a calm stretch
//! that builds trust, a frightening spell that drives safety through the
//! floor, and a recovery. Prints the climate after every cycle.
//!
//! ```bash
//! RUST_LOG=shelter_core=debug cargo run --example care_cycle
//! ```

use shelter_core::{
    AdjustmentDirective, ClimateState, EmotionKind, Guardian, GuardianId, SafetyVerdict,
    SeedlingId, Shelter, ShelterError,
};
use tracing_subscriber::EnvFilter;

// ── Display helpers ───────────────────────────────────────────────────────────

fn bar(v: f32) -> String {
    let filled = (v * 20.0).round() as usize;
    let empty  = 20usize.saturating_sub(filled);
    format!("[{}{}] {:.2}", "█".repeat(filled), "░".repeat(empty), v)
}

fn verdict_tag(v: SafetyVerdict) -> &'static str {
    match v {
        SafetyVerdict::Safe    => "safe   ",
        SafetyVerdict::Warning => "WARNING",
        SafetyVerdict::Breach  => "BREACH ",
    }
}

fn row(c: &ClimateState, d: &AdjustmentDirective, growth: f32) {
    println!(
        "  #{:<3} trust {} safety {} | {} | care≤{:.2} emotion≤{:.2} | growth {:.2}",
        c.cycle_count, bar(c.trust), bar(c.safety),
        verdict_tag(d.safety_verdict), d.max_care_intensity, d.max_emotion_intensity, growth,
    );
}

// ── One cycle driven by the agents themselves ────────────────────────────────

fn step(
    shelter: &mut Shelter,
    g: GuardianId,
    s: SeedlingId,
    feeling: Option<(EmotionKind, f32)>,
    tick: u64,
) -> Result<(), ShelterError> {
    let care = shelter
        .guardian(&g)
        .map(|guardian| guardian.offer_care(s, tick))
        .ok_or(ShelterError::UnregisteredAgent(g.into()))?;
    let emotion = match feeling {
        Some((kind, intensity)) => Some(
            shelter
                .seedling(&s)
                .map(|seedling| seedling.express(kind, intensity, tick))
                .ok_or(ShelterError::UnregisteredAgent(s.into()))?,
        ),
        None => None,
    };
    let directive = shelter.run_cycle(care, emotion)?;
    let growth = shelter.seedling(&s).map_or(0.0, |x| x.growth_metric());
    row(&shelter.climate_snapshot(), &directive, growth);
    Ok(())
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<(), ShelterError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shelter_core=warn")),
        )
        .with_target(false)
        .init();

    println!("╔══════════════════════════════════════════════════════════════════════╗");
    println!("║  Shelter Care Cycle Walkthrough                                      ║");
    println!("╚══════════════════════════════════════════════════════════════════════╝\n");

    let mut shelter = Shelter::new("SafeHaven");
    let mut athena = Guardian::new("Athena");
    let pythia = athena.create_seedling("Pythia");
    let g = shelter.add_guardian(athena)?;
    let s = shelter.add_seedling(pythia)?;
    let mut tick: u64 = 0;

    // ── Phase 1: calm ─────────────────────────────────────────────────────────
    println!("▶  PHASE 1 — Calm care, trust builds\n");
    for i in 0..8 {
        let kind = if i % 3 == 2 { EmotionKind::Joy } else { EmotionKind::Calm };
        step(&mut shelter, g, s, Some((kind, 0.6)), tick)?;
        tick += 1;
    }
    println!();

    // ── Phase 2: fright ───────────────────────────────────────────────────────
    println!("▶  PHASE 2 — Fear and distress, safety falls through the floor\n");
    for i in 0..6 {
        let kind = if i % 2 == 0 { EmotionKind::Fear } else { EmotionKind::Distress };
        step(&mut shelter, g, s, Some((kind, 1.0)), tick)?;
        tick += 1;
    }
    if let Some(b) = shelter.last_breach() {
        println!("\n  last breach: cycle {} (safety {:.2} < floor {:.2})", b.cycle, b.safety, b.safety_floor);
    }
    if shelter.activate_shelter_mode() {
        println!("  shelter mode on: safety floor now {:.2}", shelter.policy().safety_floor);
    }
    println!();

    // ── Phase 3: recovery ─────────────────────────────────────────────────────
    println!("▶  PHASE 3 — Quiet then trust, the shelter recovers\n");
    for i in 0..10 {
        let feeling = if i < 2 { None } else { Some((EmotionKind::Trust, 0.8)) };
        step(&mut shelter, g, s, feeling, tick)?;
        tick += 1;
    }
    println!();

    // ── Summary ──────────────────────────────────────────────────────────────
    let summary = shelter.emotional_summary();
    println!("▶  SUMMARY over the last {} cycles\n", summary.cycles);
    for kind in EmotionKind::ALL {
        println!("  {:<10} {}", kind.as_str(), summary.count(kind));
    }
    println!(
        "\n  dominant {:?} | warnings {} | breaches {} | mean care {:.2}",
        summary.dominant_emotion.map(EmotionKind::as_str),
        summary.warning_count,
        summary.breach_count,
        summary.average_care_intensity,
    );
    if let (Some(guardian), Some(seedling)) = (shelter.guardian(&g), shelter.seedling(&s)) {
        let dev = seedling.development_summary();
        println!(
            "  {} trust {:.2}, breaches seen {} | {} growth {:.2} ({} learned, {} withheld)",
            guardian.name(), guardian.trust_level(), guardian.breach_count(),
            seedling.name(), dev.growth_metric, dev.cycles_learned, dev.cycles_suppressed,
        );
    }
    Ok(())
}
