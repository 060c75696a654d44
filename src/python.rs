//! Python bindings
//!
//! The engine is loaded once and cached; every `AltLifeGame` shares it. State
//! crosses the boundary as JSON strings.

use pyo3::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::character::Gender;
use crate::config::GameSettings;
use crate::error::AltLifeError;
use crate::save::SaveStore;
use crate::simulator::{GameSession, LifeEngine};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;

// ============================================================================
// Cached Engine
// ============================================================================

/// Global engine shared by all sessions
static CACHED_ENGINE: OnceCell<RwLock<Arc<LifeEngine>>> = OnceCell::new();

fn cached_engine() -> PyResult<Arc<LifeEngine>> {
    CACHED_ENGINE
        .get()
        .map(|lock| lock.read().clone())
        .ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(
                "Engine not initialized. Call init_engine() first.",
            )
        })
}

fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| AltLifeError::from(e).into())
}

fn parse_gender(gender: &str) -> PyResult<Gender> {
    match gender.trim().to_ascii_lowercase().as_str() {
        "male" | "m" => Ok(Gender::Male),
        "female" | "f" => Ok(Gender::Female),
        "nonbinary" | "non_binary" | "non-binary" | "x" => Ok(Gender::NonBinary),
        other => Err(pyo3::exceptions::PyValueError::new_err(format!(
            "unknown gender: {other}"
        ))),
    }
}

fn store_for(engine: &LifeEngine) -> SaveStore {
    SaveStore::new(engine.settings().save_dir.clone())
}

// ============================================================================
// Python Functions
// ============================================================================

/// Load settings and content, then cache the engine (call once at startup).
///
/// Without a path, settings come from `ALT_LIFE_SETTINGS` or defaults.
#[pyfunction]
#[pyo3(signature = (settings_path=None))]
fn init_engine(settings_path: Option<PathBuf>) -> PyResult<()> {
    let settings = match settings_path {
        Some(path) => GameSettings::from_file(&path)?,
        None => GameSettings::from_env(),
    };
    let engine = Arc::new(LifeEngine::from_settings(settings));

    if let Some(existing) = CACHED_ENGINE.get() {
        *existing.write() = engine;
    } else {
        let _ = CACHED_ENGINE.set(RwLock::new(engine));
    }
    Ok(())
}

#[pyfunction]
fn is_engine_initialized() -> bool {
    CACHED_ENGINE.get().is_some()
}

/// Names of all save slots
#[pyfunction]
fn list_saves() -> PyResult<Vec<String>> {
    let engine = cached_engine()?;
    Ok(store_for(&engine).list_slots())
}

// ============================================================================
// AltLifeGame PyClass
// ============================================================================

/// One life, held in Rust memory
#[pyclass]
pub struct AltLifeGame {
    session: GameSession,
}

#[pymethods]
impl AltLifeGame {
    /// Start a new life
    #[new]
    #[pyo3(signature = (name, gender="female", scenario=None, traits=None))]
    fn new(
        name: &str,
        gender: &str,
        scenario: Option<&str>,
        traits: Option<Vec<String>>,
    ) -> PyResult<Self> {
        let engine = cached_engine()?;
        let store = store_for(&engine);
        let traits = traits.unwrap_or_default();
        let (session, _) =
            GameSession::start(engine, name, parse_gender(gender)?, scenario, &traits)?;
        Ok(Self {
            session: session.with_store(store),
        })
    }

    /// Resume a life from a save slot
    #[staticmethod]
    fn load(name: &str) -> PyResult<Self> {
        let engine = cached_engine()?;
        let store = store_for(&engine);
        Ok(Self {
            session: GameSession::load(engine, store, name)?,
        })
    }

    #[getter]
    fn revision(&self) -> u64 {
        self.session.revision()
    }

    /// Current state as JSON
    fn snapshot(&self) -> PyResult<String> {
        to_json(&self.session.snapshot())
    }

    /// Advance one year; JSON report, or None once the life has ended or
    /// while an event waits for an answer
    fn advance_year(&mut self) -> PyResult<Option<String>> {
        self.session
            .advance_year()
            .map(|report| to_json(&report))
            .transpose()
    }

    /// Answer the pending event; JSON report or None when nothing applies
    fn resolve_choice(&mut self, choice_index: usize) -> PyResult<Option<String>> {
        self.session
            .resolve_choice(choice_index)
            .map(|report| to_json(&report))
            .transpose()
    }

    fn enroll(&mut self, course_id: &str) -> bool {
        self.session.enroll(course_id)
    }

    #[pyo3(signature = (action_id, skill_score=None))]
    fn perform_action(
        &mut self,
        action_id: &str,
        skill_score: Option<u32>,
    ) -> PyResult<Option<String>> {
        self.session
            .perform_action(action_id, skill_score)
            .map(|outcome| to_json(&outcome))
            .transpose()
    }

    /// Advance the active course one week; the new term phase or None
    fn advance_week(&mut self) -> PyResult<Option<String>> {
        self.session
            .advance_week()
            .map(|phase| to_json(&phase))
            .transpose()
    }

    fn join_club(&mut self, club_id: &str) -> bool {
        self.session.join_club(club_id)
    }

    fn set_autosave(&mut self, enabled: bool) {
        self.session.set_autosave(enabled);
    }

    /// Write a named slot; returns the file path
    fn save(&self, name: &str) -> PyResult<Option<String>> {
        let path = self.session.save(name)?;
        Ok(path.map(|p| p.display().to_string()))
    }

    /// Write a named slot on a background thread
    ///
    /// # Example (Python)
    /// ```python
    /// path = await game.save_async("slot1")
    /// ```
    fn save_async<'py>(&self, py: Python<'py>, name: &str) -> PyResult<Bound<'py, PyAny>> {
        let store = store_for(self.session.engine());
        let save = self.session.to_save(name);

        pyo3_async_runtimes::tokio::future_into_py(py, async move {
            let path = store.save_async(save).await?;
            Ok(path.display().to_string())
        })
    }
}

// ============================================================================
// Python Module Definition
// ============================================================================

#[pymodule]
fn alt_life_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_engine, m)?)?;
    m.add_function(wrap_pyfunction!(is_engine_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(list_saves, m)?)?;
    m.add_class::<AltLifeGame>()?;
    Ok(())
}
