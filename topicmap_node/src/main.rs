//! topicmap entry point.

use clap::{Parser, Subcommand};
use eyre::{Result, bail};
use std::path::PathBuf;
use topicmap_core::{Args, Value};
use topicmap_node::{Command, Config, TopicmapNode};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Inspect a topic namespace from the command line.
#[derive(Parser, Debug)]
#[command(name = "topicmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (YAML). The built-in demo tree is used if absent.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Report publish, subscribe and service topics (default)
    List,
    /// Report publish and subscribe topics
    Topics,
    /// Report service topics
    Services,
    /// Read a data topic
    Get { path: String },
    /// Call a service
    Call {
        path: String,

        /// Positional arguments
        args: Vec<String>,

        /// Keyword arguments
        #[arg(short = 'k', long = "kwarg", value_name = "KEY=VALUE")]
        kwargs: Vec<String>,
    },
    /// Push a value to a subscribe topic
    Set { path: String, value: String },
    /// Dump the public data as JSON
    Export,
}

impl CliCommand {
    fn into_command(self) -> Result<Command> {
        let command = match self {
            Self::List => Command::List,
            Self::Topics => Command::Topics,
            Self::Services => Command::Services,
            Self::Get { path } => Command::Get { path },
            Self::Call { path, args, kwargs } => {
                let mut call_args =
                    Args::positional(args.iter().map(|arg| Value::parse_literal(arg)));
                for kwarg in &kwargs {
                    let Some((key, value)) = kwarg.split_once('=') else {
                        bail!("Keyword argument `{kwarg}` must be KEY=VALUE");
                    };
                    call_args = call_args.with_keyword(key, Value::parse_literal(value));
                }
                Command::Call {
                    path,
                    args: call_args,
                }
            }
            Self::Set { path, value } => Command::Set {
                path,
                value: Value::parse_literal(&value),
            },
            Self::Export => Command::Export,
        };
        Ok(command)
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut node = match &cli.config {
        Some(path) => {
            info!(config_file = %path.display(), "Loading configuration");
            let config = Config::load(path)?;
            TopicmapNode::new(&config)?
        }
        None => TopicmapNode::demo()?,
    };

    let command = cli
        .command
        .unwrap_or(CliCommand::List)
        .into_command()?;

    let output = node.execute(&command)?;
    println!("{output}");

    Ok(())
}
