//! Lecture des FeatureCollection GeoJSON et préparation des limites
//!
//! Le chargement réseau ou disque reste à la charge de l'appelant : ce module
//! ne reçoit que du texte ou une valeur JSON déjà lue.

use geo::Geometry;
use geojson::feature::Id;
use serde_json::Value;
use tracing::{debug, warn};

use crate::normalize::compare_names;
use crate::properties::{boundary_id, boundary_name};
use crate::types::{geometry_type_name, keys, Boundary, Feature};
use crate::SungaiError;

/// Niveau administratif attribué par défaut aux kabupaten/kota
pub const DEFAULT_ADMIN_LEVEL: u64 = 5;

/// Parse un document GeoJSON contenant un tableau `features`
pub fn parse_feature_collection(text: &str) -> Result<Vec<Feature>, SungaiError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| SungaiError::malformed(format!("Invalid JSON: {}", e)))?;
    features_from_value(value)
}

/// Convertit une valeur JSON déjà lue en features.
///
/// Un `features` absent ou qui n'est pas un tableau est une
/// [`SungaiError::MalformedInput`]. Les features sans géométrie exploitable
/// sont ignorées avec un warning.
pub fn features_from_value(value: Value) -> Result<Vec<Feature>, SungaiError> {
    let Value::Object(mut root) = value else {
        return Err(SungaiError::malformed("Document is not a JSON object"));
    };

    let items = match root.remove("features") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(SungaiError::malformed("'features' is not an array")),
        None => return Err(SungaiError::malformed("Missing 'features' array")),
    };

    let total = items.len();
    let mut features = Vec::with_capacity(total);

    for (index, item) in items.into_iter().enumerate() {
        let raw: geojson::Feature = match serde_json::from_value(item) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(index = index, error = %e, "Skipping invalid feature");
                continue;
            }
        };

        let Some(geojson_geometry) = raw.geometry else {
            warn!(index = index, "Skipping feature without geometry");
            continue;
        };

        let geometry = match Geometry::<f64>::try_from(geojson_geometry) {
            Ok(geometry) => geometry,
            Err(e) => {
                warn!(index = index, error = %e, "Skipping feature with unconvertible geometry");
                continue;
            }
        };

        let id = match raw.id {
            Some(Id::String(s)) => s,
            Some(Id::Number(n)) => n.to_string(),
            None => format!("feature-{}", index),
        };

        features.push(Feature::new(id, geometry, raw.properties.unwrap_or_default()));
    }

    debug!(total = total, kept = features.len(), "FeatureCollection parsed");
    Ok(features)
}

/// Prépare les limites administratives pour la sélection et le filtrage.
///
/// Estampille `name`, `id`, `type` et `admin_level`, écarte les géométries
/// non surfaciques, et trie par nom d'affichage.
pub fn prepare_boundaries(features: Vec<Feature>) -> Vec<Boundary> {
    let mut boundaries: Vec<Boundary> = features
        .into_iter()
        .enumerate()
        .filter_map(|(index, mut feature)| {
            if !matches!(
                feature.geometry,
                Geometry::Polygon(_) | Geometry::MultiPolygon(_)
            ) {
                warn!(
                    id = %feature.id,
                    geometry = geometry_type_name(&feature.geometry),
                    "Skipping non-polygon boundary"
                );
                return None;
            }

            let name = boundary_name(&feature.properties)
                .unwrap_or_else(|| format!("Wilayah {}", index + 1));
            let id = boundary_id(&feature.properties, index);

            let props = &mut feature.properties;
            props.insert(keys::NAME.to_string(), Value::from(name.as_str()));
            props.insert(keys::ID.to_string(), Value::from(id.as_str()));
            props.insert(keys::TYPE.to_string(), Value::from("city"));
            if !props.get(keys::ADMIN_LEVEL).is_some_and(|v| !v.is_null()) {
                props.insert(keys::ADMIN_LEVEL.to_string(), Value::from(DEFAULT_ADMIN_LEVEL));
            }

            Some(Boundary { id, name, feature })
        })
        .collect();

    boundaries.sort_by(|a, b| compare_names(&a.name, &b.name));
    boundaries
}

/// Recherche une limite par identifiant
pub fn find_boundary<'a>(boundaries: &'a [Boundary], id: &str) -> Result<&'a Boundary, SungaiError> {
    boundaries
        .iter()
        .find(|b| b.id == id)
        .ok_or_else(|| SungaiError::UnresolvedBoundary(id.to_string()))
}
