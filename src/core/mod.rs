//! Core business logic modules.

pub mod normalizer;
pub mod parser;
pub mod placement;
pub mod resolver;
pub mod scanner;
