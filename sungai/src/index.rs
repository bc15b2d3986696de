//! Regroupement des features par nom normalisé et fusion par groupe

use std::collections::HashMap;

use geo::Geometry;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::merge::merge_features;
use crate::normalize::{compare_names, is_placeholder_name, normalize_name};
use crate::properties::{description, river_name};
use crate::types::{keys, Feature};

/// Préfixe des clés synthétiques attribuées aux features sans nom
pub const UNNAMED_KEY_PREFIX: &str = "unnamed_river_";

/// Groupe transitoire de features partageant une clé
#[derive(Debug, Clone)]
pub struct NameGroup {
    /// Clé de regroupement (nom normalisé ou clé synthétique)
    pub key: String,

    /// Features du groupe, dans l'ordre de rencontre
    pub features: Vec<Feature>,

    /// Groupe singleton d'une feature sans nom (jamais fusionné)
    pub unnamed: bool,
}

/// Statistiques de construction de l'index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Nombre de features en entrée
    pub raw: usize,
    /// Nombre de groupes
    pub groups: usize,
    /// Groupes fusionnés en une seule feature
    pub merged_groups: usize,
    /// Features sans nom
    pub unnamed: usize,
    /// Groupes conservés tels quels faute de géométrie linéaire
    pub passthrough_groups: usize,
}

/// Résultat de [`build_index`]
#[derive(Debug, Clone)]
pub struct FeatureIndex {
    /// Features fusionnées, triées par nom d'affichage
    pub features: Vec<Feature>,
    pub stats: IndexStats,
}

impl FeatureIndex {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Recherche une feature par identifiant
    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }
}

/// Regroupe les features par clé, en conservant l'ordre de première apparition.
///
/// Le nom d'affichage est estampillé sur chaque feature. Une feature sans nom
/// reçoit une clé unique `unnamed_river_{n}` et le nom `Sungai {index}`.
pub fn group_features(raw: Vec<Feature>) -> Vec<NameGroup> {
    let mut groups: Vec<NameGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unnamed_counter = 0usize;

    for (index, mut feature) in raw.into_iter().enumerate() {
        let name = if feature.is_unnamed() {
            None
        } else {
            river_name(&feature.properties)
        };

        if is_placeholder_name(name.as_deref()) {
            unnamed_counter += 1;
            // Une feature déjà estampillée garde sa clé et son nom générés
            let key = if feature.normalized_name().starts_with(UNNAMED_KEY_PREFIX) {
                feature.normalized_name().to_string()
            } else {
                format!("{}{}", UNNAMED_KEY_PREFIX, unnamed_counter)
            };
            let display = if feature.is_unnamed() && !feature.name().is_empty() {
                feature.name().to_string()
            } else {
                format!("Sungai {}", index + 1)
            };
            stamp(&mut feature, &display, &key);
            feature
                .properties
                .insert(keys::UNNAMED.to_string(), Value::Bool(true));

            groups.push(NameGroup {
                key,
                features: vec![feature],
                unnamed: true,
            });
            continue;
        }

        let display = name.unwrap_or_default();
        let key = normalize_name(&display);
        stamp(&mut feature, &display, &key);

        match positions.get(&key) {
            Some(&pos) => groups[pos].features.push(feature),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(NameGroup {
                    key,
                    features: vec![feature],
                    unnamed: false,
                });
            }
        }
    }

    groups
}

/// Construit la liste fusionnée et triée exposée à la couche de rendu.
///
/// Un groupe d'une seule feature (ou sans nom) est émis tel quel. Sinon les
/// géométries linéaires sont fusionnées en une feature portant `mergedNames`
/// et `originalCount` ; les features non linéaires du groupe sont émises à
/// part. Un groupe sans aucune ligne est émis tel quel.
pub fn build_index(raw: Vec<Feature>) -> FeatureIndex {
    let mut stats = IndexStats {
        raw: raw.len(),
        ..Default::default()
    };

    let groups = group_features(raw);
    stats.groups = groups.len();

    let mut features = Vec::with_capacity(groups.len());

    for group in groups {
        if group.unnamed {
            stats.unnamed += 1;
        }

        if group.unnamed || group.features.len() == 1 {
            features.extend(group.features);
            continue;
        }

        match merge_features(&group.features) {
            Ok(merged) => {
                let (lines, others): (Vec<Feature>, Vec<Feature>) = group
                    .features
                    .into_iter()
                    .partition(|f| is_line_geometry(&f.geometry));

                debug!(
                    key = %group.key,
                    sources = lines.len(),
                    parts = merged.0.len(),
                    "Merged name group"
                );

                stats.merged_groups += 1;
                features.push(merged_feature(&group.key, &lines, Geometry::MultiLineString(merged)));
                features.extend(others);
            }
            Err(e) => {
                warn!(key = %group.key, error = %e, "Keeping group unmerged");
                stats.passthrough_groups += 1;
                features.extend(group.features);
            }
        }
    }

    features.sort_by(|a, b| compare_names(a.name(), b.name()));

    info!(
        raw = stats.raw,
        output = features.len(),
        merged_groups = stats.merged_groups,
        unnamed = stats.unnamed,
        "Feature index built"
    );

    FeatureIndex { features, stats }
}

/// Raccourci : la liste triée seule
pub fn build(raw: Vec<Feature>) -> Vec<Feature> {
    build_index(raw).features
}

/// Estampille le nom d'affichage, la clé et le texte de recherche
fn stamp(feature: &mut Feature, display: &str, key: &str) {
    let searchable = format!("{} {}", display, description(&feature.properties))
        .trim()
        .to_lowercase();

    let props = &mut feature.properties;
    props.insert(keys::NAME.to_string(), Value::from(display));
    props.insert(keys::NORMALIZED_NAME.to_string(), Value::from(key));
    props.insert(keys::SEARCHABLE_TEXT.to_string(), Value::from(searchable));
}

/// Construit la feature synthétique d'un groupe fusionné
fn merged_feature(key: &str, sources: &[Feature], geometry: Geometry) -> Feature {
    let first = &sources[0];

    let mut merged_names: Vec<String> = Vec::new();
    for source in sources {
        let names = source.merged_names();
        let names = if names.is_empty() { vec![source.name()] } else { names };
        for name in names {
            if !merged_names.iter().any(|n| n == name) {
                merged_names.push(name.to_string());
            }
        }
    }

    let original_count: u64 = sources.iter().map(Feature::original_count).sum();

    let mut properties = first.properties.clone();
    properties.insert(keys::NORMALIZED_NAME.to_string(), Value::from(key));
    properties.insert(
        keys::MERGED_NAMES.to_string(),
        Value::Array(merged_names.into_iter().map(Value::from).collect()),
    );
    properties.insert(keys::ORIGINAL_COUNT.to_string(), Value::from(original_count));

    Feature::new(first.id.clone(), geometry, properties)
}

fn is_line_geometry(geometry: &Geometry) -> bool {
    matches!(
        geometry,
        Geometry::LineString(_) | Geometry::MultiLineString(_)
    )
}
