//! Education progress module
//!
//! GPA, term weeks, action cooldowns and per-age usage caps for every course a
//! character attends.

mod state;
mod tracker;

#[cfg(test)]
mod property_tests;

pub use state::*;
pub use tracker::*;
