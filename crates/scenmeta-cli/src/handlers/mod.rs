//! Command handlers.
//!
//! Handlers are thin: resolve configuration, call into `scenmeta-core` or
//! `scenmeta-download`, and format output for the terminal.

pub mod criteria;
pub mod download;
pub mod metadata;
pub mod paths;
