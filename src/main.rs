//! Repocache CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use repocache::cli::{commands, Cli, Commands};
use repocache::infrastructure::config::ConfigLoader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level, &config.logging.format);

    let result = match cli.command {
        Commands::Serve => commands::serve::execute(config).await,
        Commands::Fetch { username } => match commands::build_context(&config).await {
            Ok(ctx) => commands::repos::handle_fetch(&ctx, &username, cli.json).await,
            Err(err) => Err(err),
        },
        Commands::Get { username, repo } => match commands::build_context(&config).await {
            Ok(ctx) => commands::repos::handle_get(&ctx, &username, &repo, cli.json).await,
            Err(err) => Err(err),
        },
        Commands::Cached => match commands::build_context(&config).await {
            Ok(ctx) => commands::repos::handle_cached(&ctx, cli.json).await,
            Err(err) => Err(err),
        },
        Commands::Project(command) => match commands::build_context(&config).await {
            Ok(ctx) => commands::project::execute(&ctx, command, cli.json).await,
            Err(err) => Err(err),
        },
    };

    if let Err(err) = result {
        repocache::cli::handle_error(err, cli.json);
    }
}

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
