use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "hull-walker")]
#[command(about = "Headless walker for hull layouts", long_about = None)]
pub struct Args {
    /// TOML config with `[hull]` and `[session]` tables
    #[arg(long, default_value = "walker.toml")]
    pub config: PathBuf,
    /// Saved layout (JSON) to start from instead of the default hull
    #[arg(long)]
    pub layout: Option<PathBuf>,
    /// TOML script of walk/climb/edit steps to play
    #[arg(long)]
    pub script: Option<PathBuf>,
    /// Where to write the final layout
    #[arg(long)]
    pub save_out: Option<PathBuf>,
    /// Idle frames to run after the script
    #[arg(long, default_value_t = 0)]
    pub frames: u32,
}
