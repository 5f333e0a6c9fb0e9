//! Command-line and environment configuration.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;

/// In-memory todo list HTTP service.
#[derive(Parser, Debug, Clone)]
#[command(name = "todo-server", version)]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "TODO_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Enable debug logging for the server and request traces.
    #[arg(short, long)]
    pub verbose: bool,

    /// Start without the two default todos.
    #[arg(long)]
    pub empty: bool,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
