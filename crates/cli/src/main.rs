use anyhow::Context;
use authorbook_kernel::settings::{DatabaseBackend, Settings};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "authorbook", version, about = "Author and book catalogue service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API until interrupted
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
        /// Override the configured store backend
        #[arg(long, value_enum)]
        backend: Option<Backend>,
    },
    /// Print the resolved settings as JSON
    Settings,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    Memory,
    Mysql,
}

impl From<Backend> for DatabaseBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Memory => DatabaseBackend::Memory,
            Backend::Mysql => DatabaseBackend::Mysql,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load settings")?;

    match cli.command {
        Command::Settings => {
            let rendered = serde_json::to_string_pretty(&settings)
                .with_context(|| "failed to render settings")?;
            println!("{rendered}");
            Ok(())
        }
        Command::Serve { port, backend } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            if let Some(backend) = backend {
                settings.database.backend = backend.into();
            }

            authorbook_telemetry::init(&settings.telemetry)?;
            tracing::info!(
                env = ?settings.environment,
                port = settings.server.port,
                backend = ?settings.database.backend,
                "authorbook serve starting"
            );

            tokio::runtime::Runtime::new()
                .with_context(|| "failed to start tokio runtime")?
                .block_on(authorbook_app::run(settings))
        }
    }
}
