//! Causeway Retry Gate
//!
//! A minimal address-validation exchange over UDP: the server answers
//! every fresh hello with a retry packet, then admits only clients that
//! echo the token back from the same address.
//!
//! Environment variables:
//! - CAUSEWAY_MODE: "server" or "client"
//! - CAUSEWAY_BIND: Bind address (server only, default 0.0.0.0:4433)
//! - CAUSEWAY_SERVER: Server address (client only, default 127.0.0.1:4433)
//! - CAUSEWAY_SECRET: 64 hex chars (server only, default fresh random).
//!   Two servers sharing it accept each other's tokens.
//! - RUST_LOG: Log filter (default "info,causeway_validation=debug")

mod client;
mod server;
mod wire;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,causeway_validation=debug".into()),
        )
        .init();

    match std::env::var("CAUSEWAY_MODE").as_deref() {
        Ok("server") => server::run().await,
        Ok("client") => client::run().await,
        _ => {
            eprintln!("Set CAUSEWAY_MODE=server or CAUSEWAY_MODE=client");
            std::process::exit(2);
        }
    }
}
