//! Session bindings for Python.

use std::time::Duration;

use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

use crate::cards::CardIndex;
use crate::core::{default_faces, GameConfig, DEFAULT_DELAY_MS};
use crate::game::{ClickOutcome, GameSession, Phase};
use crate::layout::Cell;
use crate::render::render_text;

/// Python wrapper for GameSession.
///
/// Time is driven by the caller through `advance`.
#[pyclass(name = "GameSession", unsendable)]
pub struct PyGameSession {
    inner: GameSession,
}

#[pymethods]
impl PyGameSession {
    /// Create a new session.
    ///
    /// # Arguments
    /// - faces: 12 distinct asset strings (defaults to the bundled photos)
    /// - seed: shuffle seed, random when omitted
    /// - on_complete: zero-argument callable invoked once when solved
    /// - reveal_delay_ms / flash_delay_ms / clear_delay_ms: mismatch delays
    #[new]
    #[pyo3(signature = (
        faces = None,
        seed = None,
        on_complete = None,
        reveal_delay_ms = DEFAULT_DELAY_MS,
        flash_delay_ms = DEFAULT_DELAY_MS,
        clear_delay_ms = DEFAULT_DELAY_MS
    ))]
    fn new(
        faces: Option<Vec<String>>,
        seed: Option<u64>,
        on_complete: Option<PyObject>,
        reveal_delay_ms: u64,
        flash_delay_ms: u64,
        clear_delay_ms: u64,
    ) -> PyResult<Self> {
        let config = GameConfig {
            faces: faces.unwrap_or_else(default_faces),
            reveal_delay_ms,
            flash_delay_ms,
            clear_delay_ms,
            seed,
        };

        let callback = move || {
            if let Some(callback) = on_complete {
                Python::with_gil(|py| {
                    if let Err(err) = callback.call0(py) {
                        err.print(py);
                    }
                });
            }
        };

        let inner = GameSession::new(config, callback)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Click the card at `index`.
    ///
    /// Returns one of "selected", "matched", "completed", "mismatched"
    /// or "rejected".
    fn click(&mut self, index: usize) -> PyResult<&'static str> {
        let index = CardIndex::try_new(index)
            .ok_or_else(|| PyIndexError::new_err(format!("card index {index} out of range")))?;

        Ok(match self.inner.click(index) {
            ClickOutcome::Selected(_) => "selected",
            ClickOutcome::Matched { .. } => "matched",
            ClickOutcome::Completed { .. } => "completed",
            ClickOutcome::Mismatched { .. } => "mismatched",
            ClickOutcome::Rejected(_) => "rejected",
        })
    }

    /// Advance the clock by `ms` milliseconds. Returns timers fired.
    fn advance(&mut self, ms: u64) -> usize {
        self.inner.advance(Duration::from_millis(ms))
    }

    /// Cancel pending timers and stop accepting clicks.
    fn teardown(&mut self) -> usize {
        self.inner.teardown()
    }

    #[getter]
    fn phase(&self) -> &'static str {
        match self.inner.phase() {
            Phase::Idle => "idle",
            Phase::OneSelected => "one_selected",
            Phase::Resolving => "resolving",
            Phase::Complete => "complete",
        }
    }

    #[getter]
    fn selected(&self) -> Vec<usize> {
        self.inner.state().selected().iter().map(|i| i.index()).collect()
    }

    #[getter]
    fn matched(&self) -> Vec<usize> {
        self.inner.state().matched().iter().map(|i| i.index()).collect()
    }

    #[getter]
    fn incorrect(&self) -> Vec<usize> {
        self.inner.state().incorrect().iter().map(|i| i.index()).collect()
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.inner.seed()
    }

    #[getter]
    fn pending_timers(&self) -> usize {
        self.inner.pending_timers()
    }

    fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    /// Asset of every position, in board order.
    fn board(&self) -> Vec<String> {
        (0..self.inner.board().len())
            .map(|i| self.inner.asset_at(CardIndex::new(i)).to_string())
            .collect()
    }

    /// Flattened heart layout: a card index per cell, None for spacers.
    fn layout(&self) -> Vec<Option<usize>> {
        self.inner
            .layout()
            .cells()
            .iter()
            .map(|cell| match cell {
                Cell::Card(index) => Some(index.index()),
                Cell::Empty => None,
            })
            .collect()
    }

    /// Distinct assets in the order they should be preloaded.
    fn preload_assets(&self) -> Vec<String> {
        self.inner
            .preload_assets()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Plain-text rendering of the board.
    fn render(&self) -> String {
        render_text(&self.inner)
    }

    fn __repr__(&self) -> String {
        format!(
            "GameSession(seed={}, phase={}, matched={})",
            self.inner.seed(),
            self.phase(),
            self.inner.state().matched_count()
        )
    }
}
