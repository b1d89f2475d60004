mod inspect;
mod render;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use crate::inspect::{EntityKind, EnumKind};
use crate::render::RenderCommand;
use crate::settings::CliSettings;

#[derive(Parser)]
#[command(name = "botwire")]
#[command(about = "Build and inspect Bot API payloads offline", long_about = None)]
struct Cli {
    /// Settings file (defaults to $BOTWIRE_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the wire payload of a request
    Render {
        #[command(subcommand)]
        request: RenderCommand,
    },

    /// Decode an enum token, or list an enum's tokens
    Decode {
        #[arg(value_enum)]
        kind: EnumKind,
        token: Option<String>,
    },

    /// Parse a saved platform reply
    Parse {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "message")]
        kind: EntityKind,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = CliSettings::load(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Render { request } => {
            let (method, payload) = request.render(&settings)?;
            if settings.output.include_method {
                json!({"method": method, "payload": payload})
            } else {
                Value::Object(payload)
            }
        }
        Commands::Decode { kind, token } => inspect::describe(kind, token.as_deref()),
        Commands::Parse { file, kind } => inspect::parse_file(&file, kind)?,
    };

    let text = if settings.output.compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{text}");
    Ok(())
}
