//! `slkdb` - Run Lua scripts against Warcraft III object data.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slkdb_cli::{run, Args};

fn main() {
    // Logs go to stderr so script output stays clean.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slkdb=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let result = args.into_config().and_then(|config| {
        tracing::debug!(
            archive = %config.archive.display(),
            layout = ?config.layout,
            write_policy = ?config.binding.write_policy,
            "configuration loaded"
        );
        run(&config)
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
