//! Library path and name generators.

pub mod filename;
pub mod folder;
pub mod sidecar;
