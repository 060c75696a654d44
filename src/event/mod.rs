//! Event selection and resolution module

mod processor;
pub mod selector;


pub use processor::*;
pub use selector::*;
