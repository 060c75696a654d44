//! Personality trait processing module

mod processor;

#[cfg(test)]
mod property_tests;

pub use processor::*;
