//! # shelter-core
//!
//! Climate regulation for a bounded care relationship between a protective
//! agent (the **Guardian**) and a developing one (the **Seedling**), held
//! inside a **Shelter** that tracks the shared emotional climate and enforces
//! safety boundaries on the exchange.
//!
//! ---
//!
//! ## The care cycle
//!
//! ```text
//! Guardian ──CareEvent──▶ Shelter ──▶ ClimateEngine ──▶ BoundaryPolicy
//!     ▲                      │              │                 │
//!     │                      │        ClimateState'   AdjustmentDirective
//!     │                      ▼                                │
//!     └──── directive ◀── distribute ◀────────────────────────┘
//!                            │
//! Seedling ──EmotionEvent──▶ ┘   (growth withheld on breach)
//! ```
//!
//! One cycle runs to completion inside [`Shelter::run_cycle`] before the next
//! begins. What an agent says or feels is decided elsewhere and arrives here
//! as a typed event.
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`climate`] | [`ClimateState`] | Trust, care quality, safety, cycle count |
//! | [`event`] | [`CareEvent`], [`EmotionEvent`], [`EmotionKind`] | Typed inputs; valence table |
//! | [`boundary`] | [`BoundaryPolicy`], [`AdjustmentDirective`], [`SafetyVerdict`] | Safety bands and action limits |
//! | [`engine`] | [`ClimateEngine`], [`EngineConfig`] | Deterministic climate transition |
//! | [`guardian`] | [`Guardian`], [`CareStyle`] | Care giver; follows directives |
//! | [`seedling`] | [`Seedling`], [`EmotionalState`] | Growth and emotional state |
//! | [`shelter`] | [`Shelter`], [`ShelterConfig`], [`CyclePhase`] | Registration and the cycle state machine |
//! | [`summary`] | [`ClimateSummary`], [`CycleRecord`] | Recent-cycle emotional digest |
//! | [`ids`] | [`GuardianId`], [`SeedlingId`] | Typed uuid identifiers |
//! | [`error`] | [`ShelterError`], [`InvalidEvent`] | Rejections, all raised before mutation |
//!
//! ## Example
//!
//! ```rust
//! use shelter_core::{CareEvent, EmotionEvent, EmotionKind, Guardian, SafetyVerdict, Shelter};
//!
//! let mut shelter = Shelter::new("SafeHaven");
//! let mut athena = Guardian::new("Athena");
//! let pythia = athena.create_seedling("Pythia");
//! let g = shelter.add_guardian(athena).unwrap();
//! let s = shelter.add_seedling(pythia).unwrap();
//!
//! let directive = shelter
//!     .run_cycle(
//!         CareEvent::new(g, s, 0.8, 0),
//!         Some(EmotionEvent::new(s, EmotionKind::Calm, 0.6, 0)),
//!     )
//!     .unwrap();
//!
//! assert_eq!(directive.safety_verdict, SafetyVerdict::Safe);
//! assert_eq!(shelter.climate_snapshot().cycle_count, 1);
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` on every config, data, and summary type.
//! - `python-ffi`: PyO3 bindings (see `ffi`).
//!
//! ## License
//!
//! Business Source License 1.1.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod boundary;
pub mod climate;
pub mod engine;
pub mod error;
pub mod event;
pub mod guardian;
pub mod ids;
pub mod seedling;
pub mod shelter;
pub mod summary;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use boundary::{AdjustmentDirective, BoundaryBreach, BoundaryPolicy, SafetyVerdict};
pub use climate::ClimateState;
pub use engine::{ClimateEngine, EngineConfig};
pub use error::{InvalidEvent, ShelterError};
pub use event::{CareEvent, ClimateEvent, EmotionEvent, EmotionKind};
pub use guardian::{CareStyle, Guardian};
pub use ids::{AgentRef, GuardianId, SeedlingId};
pub use seedling::{DevelopmentSummary, EmotionalState, Seedling};
pub use shelter::{CyclePhase, Shelter, ShelterConfig, HISTORY_WINDOW, SHELTER_MODE_STEP};
pub use summary::{ClimateSummary, CycleRecord};
