/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! The shelter: registration, the care-cycle state machine, and directive
//! distribution.
//!
//! # Care cycle
//!
//! ```text
//! Idle → AwaitingCare → AwaitingEmotion → ClimateUpdated → Idle
//! ```
//!
//! - **AwaitingCare**: one [`CareEvent`] from a registered guardian to a
//!   registered seedling.
//! - **AwaitingEmotion**: one [`EmotionEvent`] from the seedling the care
//!   targeted. A missing response becomes calm at intensity 0.
//! - **ClimateUpdated**: the engine applies care then emotion, the directive
//!   goes to both agents, and the cycle record enters the recent window.
//!
//! The whole cycle runs inside [`Shelter::run_cycle`]. Between calls the
//! machine is always `Idle`.
//!
//! # Invariants
//!
//! - Every rejection happens before the climate or any agent is mutated.
//! - A cycle that ends in breach notifies both agents and leaves the
//!   seedling's growth unchanged.
//! - Shelters share nothing; independent relationships may run side by side.
//!
//! # Protection level
//!
//! The boundary policy can be tightened between cycles.
//! [`Shelter::activate_shelter_mode`] raises the safety floor by
//! [`SHELTER_MODE_STEP`] once; [`Shelter::update_safety_floor`] sets it
//! directly. Both re-evaluate the standing directive against the current
//! climate. Agents see the new limits at the end of the next cycle.

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use heapless::HistoryBuffer;

use crate::boundary::{AdjustmentDirective, BoundaryBreach, BoundaryPolicy};
use crate::climate::ClimateState;
use crate::engine::{ClimateEngine, EngineConfig};
use crate::error::{check_intensity, InvalidEvent, ShelterError};
use crate::event::{CareEvent, EmotionEvent};
use crate::guardian::Guardian;
use crate::ids::{AgentRef, GuardianId, SeedlingId};
use crate::seedling::Seedling;
use crate::summary::{ClimateSummary, CycleRecord};

/// Number of recent cycles kept for [`Shelter::emotional_summary`].
pub const HISTORY_WINDOW: usize = 32;

/// Safety-floor increase applied by [`Shelter::activate_shelter_mode`].
pub const SHELTER_MODE_STEP: f32 = 0.1;

// ─── CyclePhase ─────────────────────────────────────────────────────────────

/// Position in the care-cycle state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CyclePhase {
    /// No cycle in progress.
    Idle,
    /// Waiting for the guardian's care event.
    AwaitingCare,
    /// Waiting for the targeted seedling's emotion event.
    AwaitingEmotion,
    /// Climate updated; directives being distributed.
    ClimateUpdated,
}

// ─── ShelterConfig ──────────────────────────────────────────────────────────

/// Everything tunable about a shelter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShelterConfig {
    /// Transition gains.
    pub engine: EngineConfig,
    /// Safety thresholds.
    pub policy: BoundaryPolicy,
    /// Climate at construction.
    pub initial_climate: ClimateState,
}

// ─── Shelter ────────────────────────────────────────────────────────────────

/// Container of one care relationship and its climate.
pub struct Shelter {
    name: String,
    engine: ClimateEngine,
    guardians: HashMap<GuardianId, Guardian>,
    seedlings: HashMap<SeedlingId, Seedling>,
    phase: CyclePhase,
    standing: AdjustmentDirective,
    recent: HistoryBuffer<CycleRecord, HISTORY_WINDOW>,
    last_breach: Option<BoundaryBreach>,
    shelter_mode: bool,
}

impl Shelter {
    /// Create a shelter with the default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, ShelterConfig::default())
    }

    /// Create a shelter from an explicit configuration.
    ///
    /// The standing directive is evaluated from the initial climate.
    pub fn with_config(name: impl Into<String>, config: ShelterConfig) -> Self {
        let engine = ClimateEngine::new(config.engine, config.policy, config.initial_climate);
        let standing = engine.directive();
        Self {
            name: name.into(),
            engine,
            guardians: HashMap::new(),
            seedlings: HashMap::new(),
            phase: CyclePhase::Idle,
            standing,
            recent: HistoryBuffer::new(),
            last_breach: None,
            shelter_mode: false,
        }
    }

    // ── Registration ───────────────────────────────────────────────────────

    /// Register a guardian. Fails if a guardian with the same id is already present.
    pub fn add_guardian(&mut self, guardian: Guardian) -> Result<GuardianId, ShelterError> {
        let id = guardian.id();
        match self.guardians.entry(id) {
            Entry::Occupied(_) => Err(ShelterError::AlreadyRegistered(AgentRef::Guardian(id))),
            Entry::Vacant(slot) => {
                tracing::debug!(shelter = %self.name, guardian = %id, name = guardian.name(), "guardian registered");
                slot.insert(guardian);
                Ok(id)
            }
        }
    }

    /// Register a seedling. Fails if a seedling with the same id is already present.
    pub fn add_seedling(&mut self, seedling: Seedling) -> Result<SeedlingId, ShelterError> {
        let id = seedling.id();
        match self.seedlings.entry(id) {
            Entry::Occupied(_) => Err(ShelterError::AlreadyRegistered(AgentRef::Seedling(id))),
            Entry::Vacant(slot) => {
                tracing::debug!(shelter = %self.name, seedling = %id, name = seedling.name(), "seedling registered");
                slot.insert(seedling);
                Ok(id)
            }
        }
    }

    // ── Cycle driving ──────────────────────────────────────────────────────

    /// Run one full care cycle.
    ///
    /// `emotion = None` stands for a seedling that did not answer; the
    /// neutral event (calm, intensity 0) is used in its place. Returns the
    /// new directive, which is also handed to both agents.
    ///
    /// # Errors
    ///
    /// - [`ShelterError::UnregisteredAgent`] when the care source or the
    ///   emotion source was never added.
    /// - [`ShelterError::InvalidEvent`] for an intensity outside [0, 1], an
    ///   unknown care target, or an emotion from a seedling other than the target.
    ///
    /// On error nothing changes.
    pub fn run_cycle(
        &mut self,
        care: CareEvent,
        emotion: Option<EmotionEvent>,
    ) -> Result<AdjustmentDirective, ShelterError> {
        let result = self.drive_cycle(care, emotion);
        self.transition(CyclePhase::Idle);
        if let Err(err) = &result {
            tracing::debug!(shelter = %self.name, %err, "care cycle rejected");
        }
        result
    }

    fn drive_cycle(
        &mut self,
        care: CareEvent,
        emotion: Option<EmotionEvent>,
    ) -> Result<AdjustmentDirective, ShelterError> {
        self.transition(CyclePhase::AwaitingCare);
        self.accept_care(&care)?;

        self.transition(CyclePhase::AwaitingEmotion);
        let implicit_emotion = emotion.is_none();
        let emotion =
            emotion.unwrap_or_else(|| EmotionEvent::neutral(care.target_id, care.timestamp));
        self.accept_emotion(&care, &emotion)?;

        self.transition(CyclePhase::ClimateUpdated);
        let directive = self.engine.commit_cycle(&care, &emotion)?;
        let climate = self.engine.state();
        self.distribute(&care, &emotion, &directive, &climate);

        self.recent.write(CycleRecord {
            cycle: climate.cycle_count,
            care_intensity: care.intensity,
            emotion_kind: emotion.emotion_kind,
            emotion_intensity: emotion.intensity,
            implicit_emotion,
            verdict: directive.safety_verdict,
            climate,
        });
        self.standing = directive;

        tracing::debug!(
            shelter = %self.name,
            cycle = climate.cycle_count,
            trust = climate.trust,
            care_quality = climate.care_quality,
            safety = climate.safety,
            verdict = %directive.safety_verdict,
            "care cycle complete"
        );
        Ok(directive)
    }

    fn accept_care(&self, care: &CareEvent) -> Result<(), ShelterError> {
        if !self.guardians.contains_key(&care.source_id) {
            return Err(ShelterError::UnregisteredAgent(AgentRef::Guardian(care.source_id)));
        }
        check_intensity(care.intensity)?;
        if !self.seedlings.contains_key(&care.target_id) {
            return Err(InvalidEvent::UnknownTarget(care.target_id).into());
        }
        Ok(())
    }

    fn accept_emotion(&self, care: &CareEvent, emotion: &EmotionEvent) -> Result<(), ShelterError> {
        if !self.seedlings.contains_key(&emotion.source_id) {
            return Err(ShelterError::UnregisteredAgent(AgentRef::Seedling(emotion.source_id)));
        }
        if emotion.source_id != care.target_id {
            return Err(InvalidEvent::EmotionSourceMismatch {
                expected: care.target_id,
                actual: emotion.source_id,
            }
            .into());
        }
        check_intensity(emotion.intensity)?;
        Ok(())
    }

    fn distribute(
        &mut self,
        care: &CareEvent,
        emotion: &EmotionEvent,
        directive: &AdjustmentDirective,
        climate: &ClimateState,
    ) {
        let notice = directive
            .is_breach()
            .then(|| self.engine.policy().breach_notice(climate));

        if let Some(guardian) = self.guardians.get_mut(&care.source_id) {
            guardian.receive_feedback(emotion);
            guardian.adjust_support(directive, climate);
            if let Some(notice) = &notice {
                guardian.notify_breach(notice);
            }
        }

        if let Some(seedling) = self.seedlings.get_mut(&emotion.source_id) {
            seedling.feel(emotion);
            match &notice {
                Some(notice) => {
                    seedling.withhold_growth(directive);
                    seedling.notify_breach(notice);
                }
                None => {
                    seedling.learn_from(directive);
                }
            }
        }

        if let Some(notice) = notice {
            tracing::warn!(
                shelter = %self.name,
                cycle = notice.cycle,
                safety = notice.safety,
                floor = notice.safety_floor,
                "boundary breach"
            );
            self.last_breach = Some(notice);
        }
    }

    fn transition(&mut self, next: CyclePhase) {
        tracing::trace!(shelter = %self.name, from = ?self.phase, to = ?next, "cycle phase");
        self.phase = next;
    }

    // ── Protection level ───────────────────────────────────────────────────

    /// Enter shelter mode: raise the safety floor by [`SHELTER_MODE_STEP`]
    /// (capped at 1.0).
    ///
    /// Returns `false` and changes nothing if shelter mode is already active.
    pub fn activate_shelter_mode(&mut self) -> bool {
        if self.shelter_mode {
            return false;
        }
        let policy = *self.engine.policy();
        let raised = policy.with_safety_floor(policy.safety_floor + SHELTER_MODE_STEP);
        self.shelter_mode = true;
        self.replace_policy(raised);
        tracing::info!(
            shelter = %self.name,
            from = policy.safety_floor,
            to = raised.safety_floor,
            "shelter mode activated"
        );
        true
    }

    /// Set the safety floor, clamped into [0.0, 1.0]. Returns the previous floor.
    ///
    /// # Errors
    ///
    /// [`ShelterError::InvalidThreshold`] for NaN or infinite input. Nothing changes.
    pub fn update_safety_floor(&mut self, safety_floor: f32) -> Result<f32, ShelterError> {
        if !safety_floor.is_finite() {
            return Err(ShelterError::InvalidThreshold { value: safety_floor });
        }
        let policy = *self.engine.policy();
        let updated = policy.with_safety_floor(safety_floor);
        self.replace_policy(updated);
        tracing::debug!(
            shelter = %self.name,
            from = policy.safety_floor,
            to = updated.safety_floor,
            "safety floor updated"
        );
        Ok(policy.safety_floor)
    }

    fn replace_policy(&mut self, policy: BoundaryPolicy) {
        self.standing = self.engine.set_policy(policy);
    }

    // ── Inspection ─────────────────────────────────────────────────────────

    /// Shelter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Copy of the current climate.
    pub fn climate_snapshot(&self) -> ClimateState {
        self.engine.state()
    }

    /// Current state-machine phase. Always [`CyclePhase::Idle`] between calls.
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Directive from the last completed cycle, or from the initial climate.
    pub fn standing_directive(&self) -> AdjustmentDirective {
        self.standing
    }

    /// Most recent breach notice.
    pub fn last_breach(&self) -> Option<&BoundaryBreach> {
        self.last_breach.as_ref()
    }

    /// The boundary policy in force.
    pub fn policy(&self) -> &BoundaryPolicy {
        self.engine.policy()
    }

    /// `true` once [`Shelter::activate_shelter_mode`] has run.
    pub fn shelter_mode_active(&self) -> bool {
        self.shelter_mode
    }

    /// A registered guardian.
    pub fn guardian(&self, id: &GuardianId) -> Option<&Guardian> {
        self.guardians.get(id)
    }

    /// A registered seedling.
    pub fn seedling(&self, id: &SeedlingId) -> Option<&Seedling> {
        self.seedlings.get(id)
    }

    /// All registered guardians, in no particular order.
    pub fn guardians(&self) -> impl Iterator<Item = &Guardian> {
        self.guardians.values()
    }

    /// All registered seedlings, in no particular order.
    pub fn seedlings(&self) -> impl Iterator<Item = &Seedling> {
        self.seedlings.values()
    }

    /// Recent cycle records, oldest first, at most [`HISTORY_WINDOW`].
    pub fn recent_cycles(&self) -> impl Iterator<Item = &CycleRecord> {
        self.recent.oldest_ordered()
    }

    /// Digest of the recent-cycle window.
    pub fn emotional_summary(&self) -> ClimateSummary {
        ClimateSummary::from_records(self.recent.oldest_ordered(), self.engine.state())
    }
}

impl core::fmt::Debug for Shelter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Shelter")
            .field("name", &self.name)
            .field("climate", &self.engine.state())
            .field("phase", &self.phase)
            .field("shelter_mode", &self.shelter_mode)
            .field("guardians", &self.guardians.len())
            .field("seedlings", &self.seedlings.len())
            .field("recent_cycles", &self.recent.len())
            .finish()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
