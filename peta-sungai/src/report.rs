//! Rapport de chargement avec dégradation gracieuse
//!
//! Collecte les compteurs de l'index, les replis sur les démos et le
//! résultat du dernier filtrage, pour affichage console ou sauvegarde JSON.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::loader::{DataSource, LoadedBoundaries, LoadedRivers};
use crate::state::FilterSummary;

/// Statut global du chargement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadStatus {
    /// Données lues depuis les fichiers
    Success,
    /// Au moins une source remplacée par les démos
    Degraded,
}

/// Rapport complet de chargement
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub status: LoadStatus,
    /// Durée du chargement
    pub duration_secs: f64,

    /// Origine des sungai (chemin ou « demo »)
    pub rivers_source: String,
    /// Origine des limites
    pub boundaries_source: String,

    /// Features sungai en entrée
    pub raw_rivers: usize,
    /// Features après fusion
    pub merged_rivers: usize,
    /// Groupes fusionnés
    pub merged_groups: usize,
    /// Sungai sans nom
    pub unnamed_rivers: usize,
    /// Groupes conservés tels quels
    pub passthrough_groups: usize,
    /// Limites administratives
    pub boundaries: usize,

    /// Raisons des replis sur les démos
    pub fallbacks: Vec<String>,

    /// Dernier filtrage appliqué
    pub filter: Option<FilterSummary>,
}

impl LoadReport {
    /// Construit le rapport depuis les résultats du chargement
    pub fn new(rivers: &LoadedRivers, boundaries: Option<&LoadedBoundaries>) -> Self {
        let stats = &rivers.index.stats;
        let mut report = Self {
            status: LoadStatus::Success,
            duration_secs: 0.0,
            rivers_source: rivers.source.to_string(),
            boundaries_source: String::new(),
            raw_rivers: stats.raw,
            merged_rivers: rivers.index.len(),
            merged_groups: stats.merged_groups,
            unnamed_rivers: stats.unnamed,
            passthrough_groups: stats.passthrough_groups,
            boundaries: 0,
            fallbacks: Vec::new(),
            filter: None,
        };

        if let DataSource::Demo { reason } = &rivers.source {
            report.fallbacks.push(format!("rivers: {}", reason));
        }

        if let Some(loaded) = boundaries {
            report.boundaries_source = loaded.source.to_string();
            report.boundaries = loaded.boundaries.len();
            if let DataSource::Demo { reason } = &loaded.source {
                report.fallbacks.push(format!("boundaries: {}", reason));
            }
        }

        report.finalize();
        report
    }

    /// Enregistre le résultat d'un filtrage
    pub fn record_filter(&mut self, summary: FilterSummary) {
        self.filter = Some(summary);
    }

    /// Définit la durée du chargement
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        self.status = if self.fallbacks.is_empty() {
            LoadStatus::Success
        } else {
            LoadStatus::Degraded
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("LOAD REPORT");
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);

        println!("\n--- RIVERS ---");
        println!("Source: {}", self.rivers_source);
        println!(
            "Features: {} raw, {} after merge ({} groups merged, {} unnamed, {} kept unmerged)",
            self.raw_rivers,
            self.merged_rivers,
            self.merged_groups,
            self.unnamed_rivers,
            self.passthrough_groups
        );

        if !self.boundaries_source.is_empty() {
            println!("\n--- BOUNDARIES ---");
            println!("Source: {}", self.boundaries_source);
            println!("Boundaries: {}", self.boundaries);
        }

        if let Some(filter) = &self.filter {
            println!("\n--- FILTER ---");
            println!("{} / {} rivers inside {}", filter.inside, filter.total, filter.boundaries.join(", "));
        }

        if !self.fallbacks.is_empty() {
            println!("\n--- FALLBACKS ({}) ---", self.fallbacks.len());
            for f in &self.fallbacks {
                println!("  {}", f);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{} rivers ({} raw, {} merged groups), {} boundaries, {:?}",
            self.merged_rivers, self.raw_rivers, self.merged_groups, self.boundaries, self.status
        )
    }
}
