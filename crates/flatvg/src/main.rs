//! Flatvg flattens the transforms of SVG documents into the geometry of their shapes.

use clap::Parser;
use flatvg::{
    args::{Args, Command, RunCommand},
    config::Config,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let config = Config::load()?;

    match args.command {
        Command::Fuse(args) => args.run(config)?,
    }
    Ok(())
}
