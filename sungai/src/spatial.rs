//! Filtrage spatial des sungai par limite administrative
//!
//! Deux stratégies :
//! - [`SpatialStrategy::Simple`] échantillonne les sommets de la ligne et teste
//!   chacun par lancer de rayon contre l'anneau extérieur. Les trous sont
//!   ignorés, et une ligne qui traverse le polygone sans qu'aucun sommet n'y
//!   tombe est classée « dehors » (limitation connue, conservée telle quelle).
//! - [`SpatialStrategy::Exact`] délègue au prédicat `Intersects` de `geo`.

use std::fmt;
use std::str::FromStr;

use geo::{Coord, Geometry, Intersects, LineString, Polygon};

use crate::types::{Boundary, Feature};
use crate::SungaiError;

/// Stratégie de test ligne/polygone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpatialStrategy {
    /// Échantillonnage des sommets + lancer de rayon
    #[default]
    Simple,
    /// Intersection géométrique exacte
    Exact,
}

impl FromStr for SpatialStrategy {
    type Err = SungaiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "exact" => Ok(Self::Exact),
            other => Err(SungaiError::malformed(format!(
                "Unknown spatial strategy: {}. Use: simple, exact",
                other
            ))),
        }
    }
}

impl fmt::Display for SpatialStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

/// Point dans un anneau, par lancer de rayon.
///
/// Pour chaque arête (i, j = i - 1), bascule l'état si l'arête enjambe
/// strictement `y` et croise à gauche de `x`. Le résultat pour un point
/// exactement sur une arête dépend de l'arête.
pub fn point_in_ring(point: Coord, ring: &[Coord]) -> bool {
    let Coord { x, y } = point;
    let mut inside = false;

    let mut j = ring.len().wrapping_sub(1);
    for (i, vi) in ring.iter().enumerate() {
        let vj = ring[j];
        if (vi.y > y) != (vj.y > y) && x < (vj.x - vi.x) * (y - vi.y) / (vj.y - vi.y) + vi.x {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Teste si une géométrie linéaire touche une géométrie surfacique.
///
/// Toute combinaison hors (Multi)LineString × (Multi)Polygon retourne `false`.
pub fn intersects(line: &Geometry, polygon: &Geometry, strategy: SpatialStrategy) -> bool {
    let Some(lines) = line_parts(line) else {
        return false;
    };
    let Some(polygons) = polygon_parts(polygon) else {
        return false;
    };

    match strategy {
        SpatialStrategy::Simple => lines.iter().any(|line| {
            line.coords().any(|coord| {
                polygons
                    .iter()
                    .any(|polygon| point_in_ring(*coord, &polygon.exterior().0))
            })
        }),
        SpatialStrategy::Exact => lines
            .iter()
            .any(|line| polygons.iter().any(|polygon| line.intersects(*polygon))),
    }
}

/// Classe chaque sungai : `true` si elle touche au moins une des limites
pub fn classify(rivers: &[Feature], boundaries: &[&Boundary], strategy: SpatialStrategy) -> Vec<bool> {
    rivers
        .iter()
        .map(|river| {
            boundaries
                .iter()
                .any(|boundary| intersects(&river.geometry, boundary.geometry(), strategy))
        })
        .collect()
}

fn line_parts(geometry: &Geometry) -> Option<Vec<&LineString>> {
    match geometry {
        Geometry::LineString(line) => Some(vec![line]),
        Geometry::MultiLineString(lines) => Some(lines.0.iter().collect()),
        _ => None,
    }
}

fn polygon_parts(geometry: &Geometry) -> Option<Vec<&Polygon>> {
    match geometry {
        Geometry::Polygon(polygon) => Some(vec![polygon]),
        Geometry::MultiPolygon(polygons) => Some(polygons.0.iter().collect()),
        _ => None,
    }
}
