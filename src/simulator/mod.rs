//! Yearly life loop and the session that owns one life
//!
//! [`LifeEngine`] applies the rules; [`GameSession`] holds the state, the RNG
//! and the snapshot channel.

mod engine;
mod session;


pub use engine::*;
pub use session::*;
