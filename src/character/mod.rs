//! Character state and stat application

mod state;


pub use state::*;
