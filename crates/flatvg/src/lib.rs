//! The command line interface of flatvg.
pub mod args;
pub mod commands;
pub mod config;
mod walk;
