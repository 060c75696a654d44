//! Achievement unlocking module

mod checker;

pub use checker::*;
