use clap::Parser;
use hcm_assistant::cli::Cli;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    hcm_assistant::run(Cli::parse()).await
}
