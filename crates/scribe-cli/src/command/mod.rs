use clap::{Parser, Subcommand};
use tracing::Level;

use self::{
    build_features::BuildFeaturesArg, normalize_text::NormalizeTextArg,
    transform_features::TransformFeaturesArg,
};

mod build_features;
mod normalize_text;
mod transform_features;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log level for diagnostics written to stderr
    #[arg(long, global = true, default_value_t = Level::INFO)]
    log_level: Level,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Fit the vectorizers on a training set and write its feature table
    BuildFeatures(#[clap(flatten)] BuildFeaturesArg),
    /// Write the feature table of a held-out set using a fitted model
    TransformFeatures(#[clap(flatten)] TransformFeaturesArg),
    /// Print the normalization variants of a text
    NormalizeText(#[clap(flatten)] NormalizeTextArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    match args.mode {
        Mode::BuildFeatures(arg) => build_features::run(&arg)?,
        Mode::TransformFeatures(arg) => transform_features::run(&arg)?,
        Mode::NormalizeText(arg) => normalize_text::run(&arg)?,
    }
    Ok(())
}
