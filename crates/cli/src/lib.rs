//! CLI harness for the Chord ring simulator.
//!
//! Provides commands for:
//! - Inspecting ring order and successors
//! - Printing finger tables
//! - Looking up single keys
//! - Running every registered key through the router

pub mod commands;
pub mod config;
pub mod logging;

pub use commands::{Command, CommandResult};
pub use config::{CliConfig, Scenario};
