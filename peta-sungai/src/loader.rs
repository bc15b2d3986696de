//! Chargement asynchrone des fichiers GeoJSON avec repli sur les démos
//!
//! Un fichier illisible ou malformé (sans tableau `features`) n'est jamais
//! fatal : les données de démonstration prennent le relais et le repli est
//! signalé dans [`DataSource::Demo`].

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sungai::demo::{demo_boundaries, demo_rivers};
use sungai::{build_index, parse_feature_collection, prepare_boundaries, Boundary, Feature, FeatureIndex};
use tracing::{info, warn};

/// Origine des données chargées
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Fichier lu avec succès
    File(PathBuf),
    /// Repli sur les données de démonstration
    Demo { reason: String },
}

impl DataSource {
    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo { .. })
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Demo { reason } => write!(f, "demo ({})", reason),
        }
    }
}

/// Sungai chargées et fusionnées
#[derive(Debug, Clone)]
pub struct LoadedRivers {
    pub index: FeatureIndex,
    pub source: DataSource,
}

/// Limites chargées et préparées
#[derive(Debug, Clone)]
pub struct LoadedBoundaries {
    pub boundaries: Vec<Boundary>,
    pub source: DataSource,
}

/// Lit un fichier GeoJSON et retourne ses features
pub async fn read_features(path: &Path) -> Result<Vec<Feature>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .context(format!("Failed to read {}", path.display()))?;

    let features = parse_feature_collection(&content)
        .context(format!("Invalid GeoJSON in {}", path.display()))?;
    Ok(features)
}

/// Charge les sungai, ou les démos en cas d'échec, puis construit l'index
pub async fn load_rivers(path: &Path) -> LoadedRivers {
    let (raw, source) = match read_features(path).await {
        Ok(features) => {
            info!(path = %path.display(), features = features.len(), "Rivers loaded");
            (features, DataSource::File(path.to_path_buf()))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %format!("{:#}", e), "Falling back to demo rivers");
            (
                demo_rivers(),
                DataSource::Demo {
                    reason: format!("{:#}", e),
                },
            )
        }
    };

    LoadedRivers {
        index: build_index(raw),
        source,
    }
}

/// Charge les limites administratives, ou les démos si aucune n'est exploitable
pub async fn load_boundaries(path: &Path) -> LoadedBoundaries {
    let reason = match read_features(path).await {
        Ok(features) => {
            let boundaries = prepare_boundaries(features);
            if !boundaries.is_empty() {
                info!(path = %path.display(), boundaries = boundaries.len(), "Boundaries loaded");
                return LoadedBoundaries {
                    boundaries,
                    source: DataSource::File(path.to_path_buf()),
                };
            }
            format!("No usable boundary in {}", path.display())
        }
        Err(e) => format!("{:#}", e),
    };

    warn!(path = %path.display(), reason = %reason, "Falling back to demo boundaries");
    LoadedBoundaries {
        boundaries: prepare_boundaries(demo_boundaries()),
        source: DataSource::Demo { reason },
    }
}
