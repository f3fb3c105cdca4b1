/// Veatunes - headless player for Subsonic servers
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use veatunes_cli::{commands, display, CliConfig, Command};
use veatunes_playback::MusicApi;

#[derive(Parser)]
#[command(name = "veatunes")]
#[command(about = "Control a Veatunes play queue from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "VEATUNES_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "veatunes=info,veatunes_cli=info,veatunes_playback=info,veatunes_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    if cli.command == Command::Ping {
        return commands::ping(&config).await;
    }

    let api = commands::connect(&config)?.map(|client| Arc::new(client) as Arc<dyn MusicApi>);
    let mut manager = commands::open_player(&config, api);

    commands::apply(&cli.command, &mut manager).await?;

    print!("{}", display::render_status(&manager));
    Ok(())
}
