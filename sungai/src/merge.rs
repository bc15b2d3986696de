//! Fusion des tronçons d'une même sungai en une géométrie continue
//!
//! Les fichiers sources découpent souvent une sungai en plusieurs features
//! portant le même nom. Les tronçons sont raccordés par leurs extrémités
//! quasi coïncidentes, de façon gloutonne et déterministe.

use geo::{Coord, Geometry, LineString, MultiLineString};
use tracing::debug;

use crate::types::Feature;
use crate::SungaiError;

/// Tolérance de raccord des extrémités, en unités de coordonnées (~10 m en degrés)
pub const ENDPOINT_TOLERANCE: f64 = 1e-4;

/// Fusionne les géométries linéaires d'un groupe de features.
///
/// Les géométries non linéaires sont ignorées. Si aucune ne reste, retourne
/// [`SungaiError::EmptyGeometry`] et l'appelant conserve les features d'origine.
pub fn merge_features(features: &[Feature]) -> Result<MultiLineString, SungaiError> {
    let segments = flatten_segments(features);

    if segments.is_empty() {
        let group = features
            .first()
            .map(|f| f.name().to_string())
            .unwrap_or_default();
        return Err(SungaiError::empty_geometry(group));
    }

    Ok(merge_segments(segments))
}

/// Aplatit les features en tronçons indépendants (une MultiLineString
/// fournit chacune de ses lignes)
pub fn flatten_segments(features: &[Feature]) -> Vec<Vec<Coord>> {
    let mut segments = Vec::new();

    for feature in features {
        match &feature.geometry {
            Geometry::LineString(line) => segments.push(line.0.clone()),
            Geometry::MultiLineString(lines) => {
                segments.extend(lines.0.iter().map(|line| line.0.clone()));
            }
            _ => {}
        }
    }

    segments.retain(|segment| !segment.is_empty());
    segments
}

/// Construit une chaîne à partir du premier tronçon et y raccorde les autres.
///
/// Le premier élément du résultat est la chaîne ; les tronçons jamais
/// raccordés suivent, dans leur ordre d'origine.
pub fn merge_segments(segments: Vec<Vec<Coord>>) -> MultiLineString {
    let mut remaining: Vec<Option<Vec<Coord>>> = segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .map(Some)
        .collect();

    if remaining.len() <= 1 {
        return MultiLineString::new(remaining.into_iter().flatten().map(LineString::new).collect());
    }

    let Some(mut chain) = remaining[0].take() else {
        return MultiLineString::new(Vec::new());
    };
    let mut consumed = 1;

    'grow: while consumed < remaining.len() {
        let chain_start = chain[0];
        let chain_end = chain[chain.len() - 1];

        for slot in remaining.iter_mut() {
            let Some(segment) = slot.as_ref() else {
                continue;
            };
            let seg_start = segment[0];
            let seg_end = segment[segment.len() - 1];

            if coords_near(seg_start, chain_end) {
                // Cas 1: début du tronçon == fin de chaîne → ajouter tel quel
                chain.extend_from_slice(&segment[1..]);
            } else if coords_near(seg_end, chain_end) {
                // Cas 2: fin du tronçon == fin de chaîne → ajouter inversé
                chain.extend(segment.iter().rev().skip(1));
            } else if coords_near(seg_end, chain_start) {
                // Cas 3: fin du tronçon == début de chaîne → insérer au début
                let mut new_chain = segment[..segment.len() - 1].to_vec();
                new_chain.append(&mut chain);
                chain = new_chain;
            } else if coords_near(seg_start, chain_start) {
                // Cas 4: début du tronçon == début de chaîne → insérer inversé au début
                let mut reversed: Vec<Coord> = segment.iter().rev().copied().collect();
                reversed.pop();
                reversed.append(&mut chain);
                chain = reversed;
            } else {
                continue;
            }

            *slot = None;
            consumed += 1;
            continue 'grow;
        }

        break;
    }

    let leftovers: Vec<LineString> = remaining.into_iter().flatten().map(LineString::new).collect();
    debug!(
        chain_points = chain.len(),
        consumed = consumed,
        leftovers = leftovers.len(),
        "Segments merged"
    );

    let mut lines = Vec::with_capacity(leftovers.len() + 1);
    lines.push(LineString::new(chain));
    lines.extend(leftovers);
    MultiLineString::new(lines)
}

/// Compare deux coordonnées avec la tolérance de raccord
fn coords_near(a: Coord, b: Coord) -> bool {
    (a.x - b.x).abs() < ENDPOINT_TOLERANCE && (a.y - b.y).abs() < ENDPOINT_TOLERANCE
}
