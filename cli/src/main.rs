mod cli;
mod repl;
mod transport;

use anyhow::anyhow;
use clap::Parser;
use fxconv_core::currency::parse_supported;
use fxconv_core::{
    convert, format_rate, load_initial_rates, resolve_quote, source_entry, ConversionRequest, ConverterState,
    RatesClient, CATALOGUE,
};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::repl::Session;
use crate::transport::UreqTransport;

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

/// Warm the cache and tell the user if we are running on built-in rates.
fn start(client: &RatesClient, transport: &mut UreqTransport) -> ConverterState {
    let mut state = ConverterState::new();
    let report = load_initial_rates(&mut state, client, transport);
    if let Some(warning) = &report.warning {
        eprintln!("Warning: {warning}");
    }
    state
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_filter());

    let endpoints = cli.endpoints()?;
    let client = RatesClient::new(&endpoints);
    let mut transport = UreqTransport::new();

    match cli.command.clone().unwrap_or(Commands::Interactive) {
        Commands::Currencies => {
            for (code, name) in CATALOGUE {
                println!("{code}  {name}");
            }
        }
        Commands::Convert { amount, from, to, json } => {
            let request = ConversionRequest::parse(&amount, &from, &to)?;
            let mut state = start(&client, &mut transport);
            let conversion = convert(&mut state, &client, &mut transport, &request).map_err(|e| {
                error!(error = %e, "Conversion failed");
                anyhow!(e.user_message())
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&conversion)?);
            } else {
                println!("{conversion}");
                println!("{}", conversion.rate_line());
                if let Some(updated) = conversion.updated_line() {
                    println!("{updated}");
                }
            }
        }
        Commands::Rate { from, to } => {
            let (from, to) = (parse_supported(&from)?, parse_supported(&to)?);
            let mut state = start(&client, &mut transport);
            let quote = resolve_quote(&mut state, &client, &mut transport, from, to).map_err(|e| {
                error!(error = %e, "Rate lookup failed");
                anyhow!(fxconv_core::error::CONVERSION_FAILED)
            })?;
            println!("{}", format_rate(quote.rate, from, to));
            match source_entry(&state.cache, &quote, from, to) {
                Some(entry) => println!(
                    "derived: {}, source: {}, fetched {}",
                    quote.derivation,
                    entry.origin,
                    entry.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                None => println!("derived: {}", quote.derivation),
            }
        }
        Commands::Interactive => {
            let state = start(&client, &mut transport);
            let mut session = Session::new(state, client, transport);
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            repl::run(&mut session, stdin.lock(), &mut stdout)?;
        }
    }

    Ok(())
}
