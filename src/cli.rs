//! CLI definitions for Voxform.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Voxform CLI.
#[derive(Parser)]
#[command(name = "voxform")]
#[command(about = "Fill HTML forms by voice and image, then export them")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the voice agent and form session server (default)
    Serve {
        /// Server host
        #[arg(long)]
        host: Option<String>,

        /// Server port
        #[arg(long)]
        port: Option<u16>,
    },

    /// List the editable regions detected in a form
    Detect {
        /// HTML form to inspect
        file: PathBuf,
    },

    /// Fill a form from the command line and export it
    Fill {
        /// HTML form to fill
        file: PathBuf,

        /// Speak a transcript into a region, e.g. `--say 2="John Smith"`
        #[arg(long = "say", value_name = "INDEX=TRANSCRIPT", value_parser = parse_assignment)]
        say: Vec<(usize, String)>,

        /// Attach an image file to a region, e.g. `--image 1=logo.png`
        #[arg(long = "image", value_name = "INDEX=PATH", value_parser = parse_assignment)]
        image: Vec<(usize, String)>,

        /// Export format (html, xlsx, print)
        #[arg(long, default_value = "html")]
        format: String,

        /// Output path. Defaults to `<name>_filled.<ext>` in the current directory.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Voice agent endpoint. Overrides `voice.endpoint`.
        #[arg(long)]
        endpoint: Option<String>,
    },
}

/// Parse `INDEX=VALUE`, with a 1-based region index.
fn parse_assignment(raw: &str) -> Result<(usize, String), String> {
    let (index, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=VALUE, got '{}'", raw))?;
    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a region index", index.trim()))?;
    if index == 0 {
        return Err("region indices start at 1".to_string());
    }
    Ok((index, value.to_string()))
}
