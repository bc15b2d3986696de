//! Configuration de l'application

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sungai::search::{DEFAULT_MIN_CHARS, DEFAULT_SUGGESTION_LIMIT};
use sungai::SpatialStrategy;
use tracing::debug;

use crate::state::SelectionMode;

/// Variable d'environnement : fichier des sungai
pub const ENV_RIVERS: &str = "PETA_SUNGAI_RIVERS";
/// Variable d'environnement : fichier des limites administratives
pub const ENV_BOUNDARIES: &str = "PETA_SUNGAI_BOUNDARIES";
/// Variable d'environnement : stratégie de filtrage (simple/exact)
pub const ENV_STRATEGY: &str = "PETA_SUNGAI_STRATEGY";

/// Stratégie de filtrage, sous forme sérialisable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategySetting {
    #[default]
    Simple,
    Exact,
}

impl From<StrategySetting> for SpatialStrategy {
    fn from(setting: StrategySetting) -> Self {
        match setting {
            StrategySetting::Simple => SpatialStrategy::Simple,
            StrategySetting::Exact => SpatialStrategy::Exact,
        }
    }
}

impl From<SpatialStrategy> for StrategySetting {
    fn from(strategy: SpatialStrategy) -> Self {
        match strategy {
            SpatialStrategy::Simple => StrategySetting::Simple,
            SpatialStrategy::Exact => StrategySetting::Exact,
        }
    }
}

/// Configuration principale
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Fichier GeoJSON des sungai
    pub rivers_path: PathBuf,

    /// Fichier GeoJSON des limites kabupaten/kota
    pub boundaries_path: PathBuf,

    /// Stratégie du test ligne/polygone
    pub strategy: StrategySetting,

    /// Sélection d'une seule limite ou de plusieurs
    pub selection: SelectionMode,

    /// Nombre maximal de suggestions
    pub autocomplete_limit: usize,

    /// Longueur minimale de saisie avant suggestion
    pub autocomplete_min_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rivers_path: PathBuf::from("river.geojson"),
            boundaries_path: PathBuf::from("IDN_adm_2_kabkota.json"),
            strategy: StrategySetting::Simple,
            selection: SelectionMode::Single,
            autocomplete_limit: DEFAULT_SUGGESTION_LIMIT,
            autocomplete_min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "default" => Self::load_embedded(include_str!("presets/default.json")),
            "exact" => Self::load_embedded(include_str!("presets/exact.json")),
            _ => anyhow::bail!("Unknown preset: {}. Use: default, exact", preset),
        }
    }

    /// Preset embarqué ou chemin vers un fichier JSON
    pub fn resolve(spec: &str) -> Result<Self> {
        let path = Path::new(spec);
        if path.extension().is_some_and(|ext| ext == "json") || path.exists() {
            Self::load(path)
        } else {
            Self::from_preset(spec)
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }

    /// Applique les variables d'environnement (après chargement de `.env`)
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(path) = lookup(ENV_RIVERS) {
            debug!(path = %path, "Rivers path from environment");
            self.rivers_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(ENV_BOUNDARIES) {
            debug!(path = %path, "Boundaries path from environment");
            self.boundaries_path = PathBuf::from(path);
        }
        if let Some(strategy) = lookup(ENV_STRATEGY) {
            let parsed: SpatialStrategy = strategy
                .parse()
                .context(format!("Invalid {}", ENV_STRATEGY))?;
            self.strategy = parsed.into();
        }
        Ok(self)
    }

    /// Stratégie de filtrage du cœur
    pub fn spatial_strategy(&self) -> SpatialStrategy {
        self.strategy.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_presets() {
        let config = Config::from_preset("default").unwrap();
        assert_eq!(config.spatial_strategy(), SpatialStrategy::Simple);
        assert_eq!(config.selection, SelectionMode::Single);
        assert_eq!(config.autocomplete_limit, 5);

        let config = Config::from_preset("exact").unwrap();
        assert_eq!(config.spatial_strategy(), SpatialStrategy::Exact);
        assert_eq!(config.selection, SelectionMode::Multi);

        assert!(Config::from_preset("nope").is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"strategy": "exact"}"#).unwrap();
        assert_eq!(config.strategy, StrategySetting::Exact);
        assert_eq!(config.rivers_path, PathBuf::from("river.geojson"));
        assert_eq!(config.autocomplete_min_chars, 2);
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join("peta_sungai_config_test.json");
        std::fs::write(&path, r#"{"rivers_path": "data/sungai.geojson", "selection": "multi"}"#)
            .unwrap();

        let config = Config::resolve(path.to_str().unwrap()).unwrap();
        assert_eq!(config.rivers_path, PathBuf::from("data/sungai.geojson"));
        assert_eq!(config.selection, SelectionMode::Multi);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_RIVERS, "/tmp/rivers.geojson"),
            (ENV_STRATEGY, "exact"),
        ]
        .into_iter()
        .collect();

        let config = Config::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.rivers_path, PathBuf::from("/tmp/rivers.geojson"));
        assert_eq!(config.boundaries_path, PathBuf::from("IDN_adm_2_kabkota.json"));
        assert_eq!(config.spatial_strategy(), SpatialStrategy::Exact);

        let bad = Config::default().with_overrides(|key| {
            (key == ENV_STRATEGY).then(|| "fuzzy".to_string())
        });
        assert!(bad.is_err());
    }
}
