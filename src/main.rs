//! Life Progress CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lifeprog::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args, cli.json).await,
        Commands::Quest(command) => commands::quest::execute(command, cli.user, cli.json).await,
        Commands::Stats(command) => commands::stats::execute(command, cli.user, cli.json).await,
        Commands::Friend(command) => commands::friend::execute(command, cli.user, cli.json).await,
        Commands::Feed(command) => commands::feed::execute(command, cli.user, cli.json).await,
        Commands::Notification(command) => {
            commands::notification::execute(command, cli.user, cli.json).await
        }
    };

    if let Err(err) = result {
        lifeprog::cli::handle_error(err, cli.json);
    }
}
