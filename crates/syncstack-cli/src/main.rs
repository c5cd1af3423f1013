use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use syncstack_core::config::EXAMPLE_TOML;
use syncstack_core::{PipelineConfig, synth_pipeline};

#[derive(Parser)]
#[command(
    name = "syncstack",
    about = "Synthesize a scheduled S3-to-S3 transfer stack into a deployment template"
)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the stack and write the template as JSON
    Synth {
        /// Pipeline config (TOML); the bundled example is used when omitted
        #[arg(long, env = "SYNCSTACK_CONFIG")]
        config: Option<PathBuf>,
        /// Override the stack name from the config
        #[arg(long)]
        stack_name: Option<String>,
        /// Output file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the bundled example config
    ExampleConfig,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => {
            info!("no config given, using the bundled example");
            PipelineConfig::example().context("bundled example config is invalid")
        }
    }
}

fn synth(
    config: Option<&Path>,
    stack_name: Option<String>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let mut config = load_config(config)?;
    if let Some(name) = stack_name {
        config.stack.name = name;
    }

    let template = synth_pipeline(&config)
        .with_context(|| format!("failed to build stack {}", config.stack.name))?;
    let json = template
        .to_json_pretty()
        .context("failed to serialize template")?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "template written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Synth {
            config,
            stack_name,
            output,
        } => synth(config.as_deref(), stack_name, output.as_deref()),
        Commands::ExampleConfig => {
            print!("{EXAMPLE_TOML}");
            Ok(())
        }
    }
}
