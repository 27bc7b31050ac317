use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::rc::Rc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use warcalc::config::Config;
use warcalc::error::WcResult;
use warcalc::roster::RosterStore;
use warcalc::storage::{FileStore, KeyValueStore};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    settings: Config,

    /// JSON file with base settings; explicit flags override it.
    #[arg(global = true, long = "config")]
    config_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect or edit the stored roster.
    Roster(cmd::roster::RosterArgs),
    /// Print the request payload the engine would receive.
    Payload(cmd::payload::PayloadArgs),
    /// Run one calculation pass and print the charts.
    Calc(cmd::calc::CalcArgs),
}

fn resolve_config(cli: &Cli, matches: &clap::ArgMatches) -> WcResult<Config> {
    match &cli.config_file {
        Some(path) => {
            info!("⚙️  Loading settings from {}", path.display());
            let mut config = Config::load_from_file(path)?;
            config.merge_from_cli(&cli.settings, matches);
            Ok(config)
        }
        None => Ok(cli.settings.clone()),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warcalc=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let config = resolve_config(&cli, &matches).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(2);
    });

    let storage: Rc<dyn KeyValueStore> = Rc::new(FileStore::new(&config.data_dir));
    let store = Rc::new(RosterStore::open(storage, config.storage_key.clone()));

    let outcome = match cli.command {
        Commands::Roster(args) => cmd::roster::run(args, &store, &config),
        Commands::Payload(args) => cmd::payload::run(args, &store),
        Commands::Calc(args) => cmd::calc::run(args, &store, &config),
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}
