//! JSON configuration for tools built on the crate.
pub mod descriptor;
