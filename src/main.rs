mod cli;

use std::io;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use butik::Services;

use crate::cli::{Cli, OutputFormat, Session};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "butik=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let services = Services::in_memory();

    if cli.seed {
        let summary = butik::seed(&services)?;
        if cli.format == OutputFormat::Text {
            println!(
                "Loaded demo data: {} customers, {} products, {} orders",
                summary.customers, summary.products, summary.orders
            );
        }
    }

    if cli.format == OutputFormat::Text {
        println!("Butik shop manager. Type 'help' for commands, 'quit' to leave.");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&services, cli.format).run(stdin.lock(), &mut stdout.lock())?;
    Ok(())
}
