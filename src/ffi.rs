//! Python FFI bindings via PyO3.
//!
//! Exposes the shelter to Python with string ids and lowercase emotion names.
//! Every [`ShelterError`] surfaces as `ValueError`.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from shelter_core import Guardian, Shelter
//!
//! shelter = Shelter("SafeHaven")
//! athena = Guardian("Athena")
//! pythia = athena.create_seedling("Pythia")
//! g = shelter.add_guardian(athena)
//! s = shelter.add_seedling(pythia)
//!
//! d = shelter.run_cycle(g, s, 0.8, "calm", 0.6, timestamp=0)
//! print(d.safety_verdict, d.max_care_intensity)
//! print(shelter.climate_snapshot().trust)
//! ```

#![allow(non_snake_case)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use uuid::Uuid;

use crate::boundary::AdjustmentDirective;
use crate::climate::ClimateState;
use crate::error::ShelterError;
use crate::event::{CareEvent, EmotionEvent, EmotionKind};
use crate::guardian::Guardian;
use crate::ids::{GuardianId, SeedlingId};
use crate::seedling::Seedling;
use crate::shelter::Shelter;

// ── Conversions ──────────────────────────────────────────────────────────────

fn to_py_err(err: ShelterError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn parse_uuid(raw: &str) -> PyResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| PyValueError::new_err(format!("bad id {raw:?}: {e}")))
}

fn parse_kind(raw: &str) -> PyResult<EmotionKind> {
    EmotionKind::ALL
        .into_iter()
        .find(|k| k.as_str() == raw)
        .ok_or_else(|| PyValueError::new_err(format!("unknown emotion kind {raw:?}")))
}

// ── ClimateState ─────────────────────────────────────────────────────────────

/// Read-only copy of the shelter climate.
#[pyclass(name = "ClimateState", frozen)]
#[derive(Clone)]
pub struct PyClimateState {
    inner: ClimateState,
}

#[pymethods]
impl PyClimateState {
    /// Mutual trust in [0.0, 1.0].
    #[getter]
    pub fn trust(&self) -> f32 {
        self.inner.trust
    }
    /// Care quality in [0.0, 1.0].
    #[getter]
    pub fn care_quality(&self) -> f32 {
        self.inner.care_quality
    }
    /// Safety in [0.0, 1.0].
    #[getter]
    pub fn safety(&self) -> f32 {
        self.inner.safety
    }
    /// Completed care cycles.
    #[getter]
    pub fn cycle_count(&self) -> u64 {
        self.inner.cycle_count
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "ClimateState(trust={:.3}, care_quality={:.3}, safety={:.3}, cycle_count={})",
            self.inner.trust, self.inner.care_quality, self.inner.safety, self.inner.cycle_count,
        )
    }
}

// ── AdjustmentDirective ──────────────────────────────────────────────────────

/// Limits on each agent's next action.
#[pyclass(name = "AdjustmentDirective", frozen)]
#[derive(Clone)]
pub struct PyDirective {
    inner: AdjustmentDirective,
}

#[pymethods]
impl PyDirective {
    /// Upper bound on the next care intensity.
    #[getter]
    pub fn max_care_intensity(&self) -> f32 {
        self.inner.max_care_intensity
    }
    /// Upper bound on acknowledged emotional intensity.
    #[getter]
    pub fn max_emotion_intensity(&self) -> f32 {
        self.inner.max_emotion_intensity
    }
    /// "safe", "warning" or "breach".
    #[getter]
    pub fn safety_verdict(&self) -> &'static str {
        self.inner.safety_verdict.as_str()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "AdjustmentDirective(max_care_intensity={:.3}, max_emotion_intensity={:.3}, safety_verdict={:?})",
            self.inner.max_care_intensity,
            self.inner.max_emotion_intensity,
            self.inner.safety_verdict.as_str(),
        )
    }
}

// ── Guardian ─────────────────────────────────────────────────────────────────

/// A protective agent. Adding it to a shelter registers a copy.
#[pyclass(name = "Guardian")]
#[derive(Clone)]
pub struct PyGuardian {
    inner: Guardian,
}

#[pymethods]
impl PyGuardian {
    /// Create a guardian with the default care style.
    #[new]
    pub fn new(name: &str) -> Self {
        Self { inner: Guardian::new(name) }
    }

    /// Guardian id as a string.
    #[getter]
    pub fn id(&self) -> String {
        self.inner.id().to_string()
    }

    /// Display name.
    #[getter]
    pub fn name(&self) -> String {
        self.inner.name().to_owned()
    }

    /// Smoothed trust level.
    #[getter]
    pub fn trust_level(&self) -> f32 {
        self.inner.trust_level()
    }

    /// Create a seedling parented by this guardian.
    pub fn create_seedling(&mut self, name: &str) -> PySeedling {
        PySeedling { inner: self.inner.create_seedling(name) }
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("Guardian(name={:?}, id={})", self.inner.name(), self.inner.id())
    }
}

// ── Seedling ─────────────────────────────────────────────────────────────────

/// A developing agent. Adding it to a shelter registers a copy.
#[pyclass(name = "Seedling")]
#[derive(Clone)]
pub struct PySeedling {
    inner: Seedling,
}

#[pymethods]
impl PySeedling {
    /// Create a seedling under the guardian with id `parent_id`.
    #[new]
    pub fn new(name: &str, parent_id: &str) -> PyResult<Self> {
        let parent = GuardianId::from(parse_uuid(parent_id)?);
        Ok(Self { inner: Seedling::new(name, parent) })
    }

    /// Seedling id as a string.
    #[getter]
    pub fn id(&self) -> String {
        self.inner.id().to_string()
    }

    /// Parent guardian id as a string.
    #[getter]
    pub fn parent_id(&self) -> String {
        self.inner.parent_id().to_string()
    }

    /// Accumulated growth.
    #[getter]
    pub fn growth_metric(&self) -> f32 {
        self.inner.growth_metric()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("Seedling(name={:?}, id={})", self.inner.name(), self.inner.id())
    }
}

// ── Shelter ──────────────────────────────────────────────────────────────────

/// Container of one care relationship and its climate.
#[pyclass(name = "Shelter")]
pub struct PyShelter {
    inner: Shelter,
}

#[pymethods]
impl PyShelter {
    /// Create a shelter with the default configuration.
    #[new]
    pub fn new(name: &str) -> Self {
        Self { inner: Shelter::new(name) }
    }

    /// Register a copy of `guardian`; returns its id.
    pub fn add_guardian(&mut self, guardian: &PyGuardian) -> PyResult<String> {
        self.inner
            .add_guardian(guardian.inner.clone())
            .map(|id| id.to_string())
            .map_err(to_py_err)
    }

    /// Register a copy of `seedling`; returns its id.
    pub fn add_seedling(&mut self, seedling: &PySeedling) -> PyResult<String> {
        self.inner
            .add_seedling(seedling.inner.clone())
            .map(|id| id.to_string())
            .map_err(to_py_err)
    }

    /// Run one care cycle.
    ///
    /// Args:
    ///     guardian_id:       id of the registered guardian giving care
    ///     seedling_id:       id of the registered seedling receiving care
    ///     care_intensity:    float in [0.0, 1.0]
    ///     emotion_kind:      "calm", "distress", "joy", "fear", "trust", "confusion",
    ///                        or None for no response
    ///     emotion_intensity: float in [0.0, 1.0]
    ///     timestamp:         logical tick
    #[pyo3(signature = (guardian_id, seedling_id, care_intensity, emotion_kind=None, emotion_intensity=0.0, timestamp=0))]
    pub fn run_cycle(
        &mut self,
        guardian_id: &str,
        seedling_id: &str,
        care_intensity: f32,
        emotion_kind: Option<&str>,
        emotion_intensity: f32,
        timestamp: u64,
    ) -> PyResult<PyDirective> {
        let source = GuardianId::from(parse_uuid(guardian_id)?);
        let target = SeedlingId::from(parse_uuid(seedling_id)?);
        let care = CareEvent::new(source, target, care_intensity, timestamp);
        let emotion = emotion_kind
            .map(|raw| {
                parse_kind(raw).map(|k| EmotionEvent::new(target, k, emotion_intensity, timestamp))
            })
            .transpose()?;
        self.inner
            .run_cycle(care, emotion)
            .map(|inner| PyDirective { inner })
            .map_err(to_py_err)
    }

    /// Copy of the current climate.
    pub fn climate_snapshot(&self) -> PyClimateState {
        PyClimateState { inner: self.inner.climate_snapshot() }
    }

    /// Raise the safety floor one step; False if shelter mode was already on.
    pub fn activate_shelter_mode(&mut self) -> bool {
        self.inner.activate_shelter_mode()
    }

    /// Whether shelter mode is on.
    #[getter]
    pub fn shelter_mode_active(&self) -> bool {
        self.inner.shelter_mode_active()
    }

    /// Set the safety floor (clamped to [0.0, 1.0]); returns the previous floor.
    pub fn update_safety_floor(&mut self, safety_floor: f32) -> PyResult<f32> {
        self.inner.update_safety_floor(safety_floor).map_err(to_py_err)
    }

    /// Growth of a registered seedling.
    pub fn growth_of(&self, seedling_id: &str) -> PyResult<f32> {
        let id = SeedlingId::from(parse_uuid(seedling_id)?);
        self.inner
            .seedling(&id)
            .map(Seedling::growth_metric)
            .ok_or_else(|| PyValueError::new_err(format!("unknown seedling {seedling_id}")))
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("Shelter(name={:?})", self.inner.name())
    }
}

// ── Module entry point ───────────────────────────────────────────────────────

/// Liminal shelter climate engine, Python bindings.
#[pymodule]
pub fn shelter_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyClimateState>()?;
    m.add_class::<PyDirective>()?;
    m.add_class::<PyGuardian>()?;
    m.add_class::<PySeedling>()?;
    m.add_class::<PyShelter>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
