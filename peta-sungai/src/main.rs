//! Point d'entrée CLI pour peta-sungai

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

use peta_sungai::Config;

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;

/// Carte des sungai de Jabodetabek : fusion, filtrage et recherche
#[derive(Parser)]
#[command(name = "peta-sungai")]
#[command(author, version)]
#[command(about = "Fusionner, filtrer et rechercher les sungai de Jabodetabek")]
#[command(long_about = "Fusionne les tronçons de sungai portant le même nom, filtre les sungai par kabupaten/kota et recherche par nom.\n\nSans fichier lisible, des données de démonstration sont utilisées.")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Preset (default/exact) ou chemin vers une config JSON
    #[arg(short, long, default_value = "default", global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    let config = Config::resolve(&cli.config)?.with_env_overrides()?;
    debug!(config = ?config, "Configuration loaded");

    cli::run(cli.command, config).await
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
