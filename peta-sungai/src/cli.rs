//! Définition et implémentation des commandes CLI
//!
//! - `merge`: GeoJSON → sungai fusionnées → GeoJSON
//! - `filter`: sungai dans une ou plusieurs limites
//! - `search` / `suggest`: recherche par nom
//! - `boundaries`: liste des limites disponibles

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Subcommand;
use sungai::{SpatialStrategy, SungaiError};
use tracing::{info, warn};

use peta_sungai::export::export_to_geojson;
use peta_sungai::{load_boundaries, load_rivers, AppState, Config, LoadReport, SelectionMode};

#[derive(Subcommand)]
pub enum Commands {
    /// Merge river segments sharing a name and export GeoJSON
    Merge {
        /// River GeoJSON file (défaut : config / PETA_SUNGAI_RIVERS)
        #[arg(short, long)]
        rivers: Option<PathBuf>,

        /// Output GeoJSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Write the load report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Classify rivers against one or more administrative boundaries
    Filter {
        /// Boundary identifier (repeatable)
        #[arg(short, long = "boundary", required = true)]
        boundaries: Vec<String>,

        /// Intersection strategy: simple or exact (défaut : config)
        #[arg(long)]
        strategy: Option<String>,

        /// Export rivers inside the selection to this GeoJSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the load report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Search rivers by name or description
    Search {
        /// Free-text query
        query: String,
    },

    /// Suggest river names for a partial query
    Suggest {
        /// Partial name
        query: String,
    },

    /// List boundaries (id and name), sorted by name
    Boundaries,
}

/// Exécute une commande
pub async fn run(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Merge {
            rivers,
            output,
            report,
        } => {
            let path = rivers.unwrap_or_else(|| config.rivers_path.clone());
            cmd_merge(&path, &output, report.as_deref()).await
        }
        Commands::Filter {
            boundaries,
            strategy,
            output,
            report,
        } => {
            let strategy = match strategy {
                Some(s) => s
                    .parse::<SpatialStrategy>()
                    .context("Invalid --strategy")?,
                None => config.spatial_strategy(),
            };
            cmd_filter(&config, &boundaries, strategy, output.as_deref(), report.as_deref()).await
        }
        Commands::Search { query } => cmd_search(&config, &query).await,
        Commands::Suggest { query } => cmd_suggest(&config, &query).await,
        Commands::Boundaries => cmd_boundaries(&config).await,
    }
}

/// Exécute la commande merge
pub async fn cmd_merge(rivers_path: &Path, output: &Path, report_path: Option<&Path>) -> Result<()> {
    let start = Instant::now();
    info!(path = %rivers_path.display(), output = %output.display(), "Merging rivers");

    let loaded = load_rivers(rivers_path).await;
    let mut report = LoadReport::new(&loaded, None);

    let written = export_to_geojson(&loaded.index.features, output)?;
    println!("Wrote {} rivers to {}", written, output.display());

    report.set_duration(start.elapsed());
    finish_report(&report, report_path)
}

/// Exécute la commande filter
pub async fn cmd_filter(
    config: &Config,
    boundary_ids: &[String],
    strategy: SpatialStrategy,
    output: Option<&Path>,
    report_path: Option<&Path>,
) -> Result<()> {
    let start = Instant::now();

    let mode = if boundary_ids.len() > 1 {
        SelectionMode::Multi
    } else {
        config.selection
    };
    info!(
        boundaries = ?boundary_ids,
        strategy = %strategy,
        mode = ?mode,
        "Filtering rivers"
    );

    let (rivers, boundaries) = tokio::join!(
        load_rivers(&config.rivers_path),
        load_boundaries(&config.boundaries_path)
    );
    let mut report = LoadReport::new(&rivers, Some(&boundaries));

    let mut state = AppState::new(rivers.index.features, boundaries.boundaries, strategy, mode);

    let mut last_summary = None;
    for id in boundary_ids {
        match state.select_boundary(id) {
            Ok(summary) => last_summary = summary,
            Err(SungaiError::UnresolvedBoundary(id)) => {
                println!("Boundary not found: {}", id);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let Some(summary) = last_summary else {
        warn!("No boundary selected, nothing to filter");
        report.set_duration(start.elapsed());
        return finish_report(&report, report_path);
    };

    println!("{}", summary.message());
    for river in state.rivers() {
        let marker = if state.view().flags(&river.id).filtered {
            " "
        } else {
            "*"
        };
        println!("  [{}] {}", marker, river.name());
    }

    if let Some(path) = output {
        let written = export_to_geojson(state.visible_rivers(), path)?;
        println!("Wrote {} rivers to {}", written, path.display());
    }

    report.record_filter(summary);
    report.set_duration(start.elapsed());
    finish_report(&report, report_path)
}

/// Exécute la commande search
pub async fn cmd_search(config: &Config, query: &str) -> Result<()> {
    let loaded = load_rivers(&config.rivers_path).await;
    let mut state = AppState::new(
        loaded.index.features,
        Vec::new(),
        config.spatial_strategy(),
        config.selection,
    );

    let result = state.search(query);
    if result.is_empty() {
        println!("Tidak ditemukan sungai dengan nama \"{}\"", query.trim());
        return Ok(());
    }

    println!("Ditemukan {} sungai untuk \"{}\"", result.matches.len(), query.trim());
    for &i in &result.matches {
        let river = &state.rivers()[i];
        let marker = if Some(i) == result.primary { "*" } else { " " };
        let merged = river.merged_names();
        if merged.is_empty() {
            println!("  [{}] {}", marker, river.name());
        } else {
            println!("  [{}] {} ({})", marker, river.name(), merged.join(", "));
        }
    }
    Ok(())
}

/// Exécute la commande suggest
pub async fn cmd_suggest(config: &Config, query: &str) -> Result<()> {
    let loaded = load_rivers(&config.rivers_path).await;
    let state = AppState::new(
        loaded.index.features,
        Vec::new(),
        config.spatial_strategy(),
        config.selection,
    )
    .with_suggestions(config.autocomplete_limit, config.autocomplete_min_chars);

    for name in state.suggest(query) {
        println!("{}", name);
    }
    Ok(())
}

/// Exécute la commande boundaries
pub async fn cmd_boundaries(config: &Config) -> Result<()> {
    let loaded = load_boundaries(&config.boundaries_path).await;
    if loaded.source.is_demo() {
        println!("(demo data: {})", loaded.source);
    }
    for boundary in &loaded.boundaries {
        println!("{}\t{}", boundary.id, boundary.name);
    }
    Ok(())
}

fn finish_report(report: &LoadReport, path: Option<&Path>) -> Result<()> {
    report.display();
    if let Some(path) = path {
        report
            .save_to_file(path)
            .context(format!("Failed to write report: {}", path.display()))?;
        info!(path = %path.display(), "Report saved");
    }
    Ok(())
}
