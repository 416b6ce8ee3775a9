mod cli;
mod db;
mod error;
mod fmt;
mod models;
mod reconciler;
mod settings;
mod store;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;
use store::Store;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("EXPENSES_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let db_path = settings::resolve_db_path(cli.db.as_deref());
    let open = || Store::open(&db_path);

    match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir, cli.db.as_deref()),
        Commands::Add {
            amount,
            category,
            date,
            description,
        } => cli::expenses::add(&mut open()?, amount, &category, date.as_deref(), &description)
            .map(drop),
        Commands::List => cli::expenses::list(&open()?),
        Commands::Search { category } => cli::expenses::search(&open()?, &category),
        Commands::Delete { id } => cli::expenses::delete(&mut open()?, id),
        Commands::Summary => cli::summary::run(&open()?),
        Commands::Export { output } => cli::export::run(&open()?, &output),
        Commands::Import { file } => cli::import::run(&mut open()?, &file).map(drop),
        Commands::Status => cli::status::run(&db_path),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}
