//! Operator tool around the difficulty and proof-of-work rules.

pub mod chain;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
