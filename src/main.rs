use clap::Parser;
use log::{error, info, warn};

use idea_capture::{App, Cli, Config, LocalStore, Result};

pub fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

fn main() {
    let cli = Cli::parse();

    initialize_logger(cli.verbose);

    info!("Application starting up");

    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        data_dir,
        verbose,
        command,
    } = cli;

    let mut config = Config::load(config_path.as_deref())?;
    if let Some(dir) = data_dir {
        config.data_dir = Some(dir);
    }

    let store = match &config.data_dir {
        Some(dir) => LocalStore::open(dir)?,
        None => {
            warn!("No data directory available; changes will not be persisted");
            LocalStore::disconnected()
        }
    };

    let app = App::new(store, config, verbose);
    app.run(command)
}
