//! Python bindings for embedding a game session.
//!
//! # Quick Start
//!
//! ```python
//! import photo_pair
//!
//! def show_proposal():
//!     print("will you?")
//!
//! game = photo_pair.GameSession(seed=42, on_complete=show_proposal)
//! game.click(0)
//! game.click(4)
//! game.advance(2000)
//! print(game.render())
//! ```

use pyo3::prelude::*;

mod py_session;

pub use py_session::*;

/// photo_pair: heart-shaped photo pair matching game.
#[pymodule]
fn photo_pair(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGameSession>()?;
    Ok(())
}
