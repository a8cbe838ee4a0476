use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hcm-assistant",
    version,
    about = "HCM chat backend with LLM tool orchestration"
)]
pub struct Cli {
    /// Configuration file (defaults to config/server.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Listen address, overrides `[server] bind`
    #[arg(long)]
    pub addr: Option<SocketAddr>,
    /// Completion model, overrides `[gateway] model`
    #[arg(long)]
    pub model: Option<String>,
    /// Directory served at `/`, overrides `[server] static_dir`
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}
