use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dpi::commands::{check_config::check_config, notify::NotifyCommand, serve::serve};
use dpi_utils::dpi_version;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    init_tracing();

    if let Some(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    let config = dpi_config::load(&cli.config)?;
    let environment = dpi_config::load_environment()?;

    match cli.command {
        Command::Serve => serve(config, environment).await?,
        Command::Notify { command } => command.invoke(config, environment).await?,
        Command::CheckConfig { verbose } => check_config(config, environment, verbose)?,
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version = dpi_version())]
struct Cli {
    /// Config files to load, separated by colons. Later files override
    /// earlier ones.
    #[arg(
        short,
        long,
        env = "DPI_CONFIG",
        value_delimiter = ':',
        default_value = "config.toml"
    )]
    config: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the REST API server which accepts contact form submissions
    #[command(aliases(["run", "start", "r", "s"]))]
    Serve,
    /// Test notification deliverability
    #[command(aliases(["n"]))]
    Notify {
        #[command(subcommand)]
        command: NotifyCommand,
    },
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .init();
}
