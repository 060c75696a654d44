//! Configuration module for game content and runtime settings
//!
//! Content definitions deserialize straight from the static JSON files; the
//! `loader` turns them into a read-only `ContentCatalog`.

mod achievement;
mod education;
mod event;
pub mod loader;
mod scenario;
mod settings;

pub use achievement::*;
pub use education::*;
pub use event::*;
pub use loader::ContentCatalog;
pub use scenario::*;
pub use settings::*;
