//! Command-line adapter for scenmeta.
//!
//! `main.rs` is the composition root; this library holds the parser,
//! command definitions, handlers and presentation helpers so they can be
//! tested without spawning the binary.

#![deny(unused_crate_dependencies)]

// Used by the binary only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use commands::{Commands, OutputFormat};
pub use error::{CliError, exit_code_for};
pub use parser::Cli;
