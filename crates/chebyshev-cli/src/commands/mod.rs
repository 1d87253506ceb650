//! CLI command implementations

pub mod score;
