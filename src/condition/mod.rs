//! Condition parsing and evaluation module
//!
//! Content gates events, traits and achievements with strings such as
//! `"AGE>=18 & (MONEY>1000 | TRT?[genius])"`, evaluated against a
//! [`ConditionScope`].

mod ast;
pub mod cache;
mod evaluator;
pub mod parser;


pub use ast::*;
pub use cache::*;
pub use evaluator::*;
pub use parser::parse;
