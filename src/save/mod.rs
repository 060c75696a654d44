//! Save slot persistence module

mod store;

#[cfg(test)]
mod property_tests;

pub use store::*;
