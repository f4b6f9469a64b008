use clap::Parser;
use tracing_subscriber::EnvFilter;

use txnlens::cli::{self, Cli, Commands};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::History {
            source,
            filters,
            remove_chip,
            json,
        } => cli::history::run(&source, &filters, &remove_chip, json),
        Commands::Suggest {
            query,
            limit,
            recent,
        } => cli::suggest::run(&query, limit, &recent),
        Commands::Sample { output } => cli::sample::run(output),
        Commands::Options => cli::options::run(),
        Commands::Config { init } => cli::config::run(init),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
