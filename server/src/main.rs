use clap::Parser;
use tokio::net::TcpListener;
use todo_core::TodoStore;
use todo_server::config::Config;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = if config.verbose {
        EnvFilter::new("todo_server=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let store = if config.empty {
        TodoStore::new()
    } else {
        TodoStore::seeded()
    };

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, todos = store.len(), "listening");

    todo_server::run(listener, store, todo_server::shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
