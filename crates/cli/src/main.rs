use anyhow::Context;
use clap::{Parser, Subcommand};
use library_db::SqliteStore;
use library_kernel::settings::Settings;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "library-cli", version, about = "Library catalog server and tooling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print every route in registration order
    Routes,
    /// Load the layered settings and print what was resolved
    CheckConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(),
        Command::Routes => print_routes(),
        Command::CheckConfig => check_config(),
    }
}

fn serve() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load library settings")?;
    library_telemetry::init(&settings.telemetry)?;

    runtime()?.block_on(library_app::run(settings))
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")
}

/// Routes come from the module registry, which needs a store to assemble;
/// a throwaway in-memory one is enough.
fn print_routes() -> anyhow::Result<()> {
    let store = runtime()?
        .block_on(SqliteStore::in_memory())
        .context("failed to open in-memory store")?;
    let registry = library_app::build_registry(Arc::new(store));
    for (module, route) in registry.route_table() {
        println!(
            "{:<6} {:<40} {}::{}",
            route.method, route.path, module, route.operation
        );
    }
    Ok(())
}

fn check_config() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load library settings")?;
    println!("environment: {:?}", settings.environment);
    println!("bind address: {}", settings.server.bind_address());
    println!("request timeout: {}ms", settings.server.request_timeout_ms);
    println!("database: {}", settings.database.url);
    println!("max connections: {}", settings.database.max_connections);
    tracing::debug!(?settings, "settings resolved");
    Ok(())
}
