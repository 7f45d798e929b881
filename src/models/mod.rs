pub mod catalog;
pub mod gemini;
pub mod generation;

pub use catalog::*;
pub use generation::*;
