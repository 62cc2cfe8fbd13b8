use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "translator")]
#[command(about = "Translation service with pluggable LLM providers.")]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Port to listen on (overrides config and PORT)
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// List supported models and exit
    #[arg(long)]
    pub list_models: bool,
}
