//! Command-line shell for the Duskvale adventure.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use dv_fiction::GameConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "duskvale",
    about = "Duskvale, a small text adventure of quests, fights and fishing",
    version
)]
struct Cli {
    /// RNG seed for a reproducible run (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Name of a new player
    #[arg(short, long)]
    name: Option<String>,

    /// Save file used by `save` and `load`
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Load the save file before playing
    #[arg(short, long)]
    load: bool,

    /// Log game mechanics to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> GameConfig {
        let mut config = GameConfig::default().with_seed(self.seed.unwrap_or_else(rand::random));
        if let Some(name) = &self.name {
            config = config.with_player_name(name.as_str());
        }
        if let Some(path) = &self.save {
            config = config.with_save_path(path.clone());
        }
        config
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = commands::play::run(cli.config(), cli.load) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
