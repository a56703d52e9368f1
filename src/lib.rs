//! move2jelly Library
//!
//! Resolves loosely named video files against TMDB and places them into a
//! Jellyfin-style movie and series library.

pub mod cli;
pub mod core;
pub mod error;
pub mod generators;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
