//! Arguments of the flatvg binary
use clap::{Parser, Subcommand};

use crate::{commands::Fuse, config::Config};

/// A command that can be run from the command line
pub trait RunCommand {
    /// # Errors
    ///
    /// If any part of the lifecycle fails
    /// * Fails to read or parse the config
    /// * Fails to read or write any files
    fn run(self, config: Config) -> anyhow::Result<()>;
}

#[derive(Parser)]
#[clap(
    bin_name = "flatvg",
    name = "flatvg",
    author,
    version,
    about = "Flattens the transforms of vector-graphics into their shapes",
    long_about = None
)]
/// The arguments given to the binary
pub struct Args {
    /// The command to run
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
/// The commands available to the binary
pub enum Command {
    /// Fuse the transforms of SVG documents into their geometry
    #[clap(alias = "apply")]
    Fuse(Fuse),
}
