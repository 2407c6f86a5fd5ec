//! Command-line interface for the cilin binary.

pub mod args;
pub mod commands;
