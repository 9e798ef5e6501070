//! Voxform - voice-driven form filling
//!
//! Main entry point for the Voxform CLI and server.

mod cli;
mod cmd_fill;
mod server;

use clap::Parser;

use voxform_config::ConfigLoader;

use crate::cli::{Cli, Commands};
use crate::cmd_fill::FillArgs;
use crate::server::{init_tracing, log_dir, run_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load_or_default(&cli.config)?;
    ConfigLoader::apply_env_overrides(&mut config)?;

    init_tracing(log_dir(&config))?;

    match cli.command {
        None => run_server(config).await,
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            run_server(config).await
        }
        Some(Commands::Detect { file }) => cmd_fill::detect(&config, &file).await,
        Some(Commands::Fill {
            file,
            say,
            image,
            format,
            output,
            endpoint,
        }) => {
            let args = FillArgs {
                file,
                say,
                image,
                format,
                output,
                endpoint,
            };
            cmd_fill::fill(&config, args).await
        }
    }
}
