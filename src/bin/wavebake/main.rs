//! wavebake - play a demo score through the default output device
//!
//! Run with: cargo run
//! Logging: RUST_LOG=wavebake=debug cargo run

mod app;
mod demo;

use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    app::Player::new(demo::score()).run()
}
