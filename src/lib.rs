//! Alt Life Core - headless rules engine for a life-simulation game
//!
//! The crate holds the behavioral core: character stats with clamping and
//! aging, event eligibility and choice resolution, education progress, static
//! content catalogs and save slots. Hosts drive it through
//! [`simulator::GameSession`]; the optional `python` feature exposes the same
//! session to Python via PyO3.

pub mod achievement;
pub mod character;
pub mod condition;
pub mod config;
pub mod education;
pub mod error;
pub mod event;
pub mod save;
pub mod simulator;
pub mod traits;

#[cfg(feature = "python")]
mod python;

pub use crate::character::{Character, Gender, Stat};
pub use crate::config::{ContentCatalog, GameSettings};
pub use crate::error::{AltLifeError, Result};
pub use crate::save::{GameSave, SaveStore, AUTOSAVE_SLOT};
pub use crate::simulator::{GameSession, LifeEngine, LifeSnapshot};
