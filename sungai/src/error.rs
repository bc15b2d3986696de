//! Types d'erreurs pour le crate sungai

use thiserror::Error;

/// Erreurs pouvant survenir dans le cœur (normalisation, fusion, filtrage)
#[derive(Debug, Error)]
pub enum SungaiError {
    /// Document GeoJSON sans tableau `features` exploitable
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Aucune géométrie linéaire dans un groupe de noms
    #[error("No line geometry to merge in group '{group}'")]
    EmptyGeometry { group: String },

    /// Identifiant de limite administrative inconnu
    #[error("Boundary not found: {0}")]
    UnresolvedBoundary(String),

    /// Géométrie d'un type inattendu
    #[error("Unsupported geometry: expected {expected}, found {found}")]
    UnsupportedGeometry {
        expected: &'static str,
        found: &'static str,
    },
}

impl SungaiError {
    /// Crée une erreur d'entrée malformée
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput(reason.into())
    }

    /// Crée une erreur de groupe sans géométrie linéaire
    pub fn empty_geometry(group: impl Into<String>) -> Self {
        Self::EmptyGeometry {
            group: group.into(),
        }
    }
}
