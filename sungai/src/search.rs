//! Recherche plein texte et autocomplétion sur la liste fusionnée

use crate::normalize::{normalize_name, normalize_search};
use crate::types::Feature;

/// Nombre de suggestions par défaut
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Longueur minimale de saisie avant suggestion
pub const DEFAULT_MIN_CHARS: usize = 2;

/// Résultat d'une recherche (indices dans la liste interrogée)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Toutes les correspondances, dans l'ordre de la liste
    pub matches: Vec<usize>,

    /// Correspondance principale : nom normalisé identique, sinon la première
    pub primary: Option<usize>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Recherche les features dont le texte contient la requête.
///
/// La requête et `searchableText` sont réduits par [`normalize_search`]. Une
/// feature dont le nom normalisé égale celui de la requête correspond aussi,
/// et devient la correspondance principale.
pub fn search(features: &[Feature], query: &str) -> SearchResult {
    let needle = normalize_search(query);
    if needle.is_empty() {
        return SearchResult::default();
    }
    let exact_key = normalize_name(query);

    let mut result = SearchResult::default();
    for (i, feature) in features.iter().enumerate() {
        let is_exact = !exact_key.is_empty() && feature.normalized_name() == exact_key;
        if is_exact || normalize_search(feature.searchable_text()).contains(&needle) {
            result.matches.push(i);
            if is_exact && result.primary.is_none() {
                result.primary = Some(i);
            }
        }
    }

    if result.primary.is_none() {
        result.primary = result.matches.first().copied();
    }
    result
}

/// Suggestions de noms d'affichage distincts pour une saisie partielle
pub fn autocomplete(features: &[Feature], query: &str, limit: usize, min_chars: usize) -> Vec<String> {
    if query.trim().chars().count() < min_chars {
        return Vec::new();
    }
    let needle = normalize_search(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut suggestions: Vec<String> = Vec::new();
    for feature in features {
        if suggestions.len() >= limit {
            break;
        }
        let name = feature.name();
        if normalize_search(name).contains(&needle) && !suggestions.iter().any(|s| s == name) {
            suggestions.push(name.to_string());
        }
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build;
    use geo::{line_string, Geometry};
    use serde_json::{json, Value};

    fn rivers() -> Vec<Feature> {
        let raw: Vec<Feature> = [
            json!({"name": "Ciliwung", "description": "Sungai utama Jakarta"}),
            json!({"name": "Cisadane", "description": "Wilayah Tangerang"}),
            json!({"name": "Angke"}),
            json!({"name": "Kali Angke Hilir"}),
            json!({"name": "Cakung Drain"}),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, props): (usize, Value)| {
            let x = i as f64 * 10.0;
            Feature::new(
                format!("f{}", i),
                Geometry::LineString(line_string![(x: x, y: 0.0), (x: x + 1.0, y: 0.0)]),
                props.as_object().cloned().unwrap_or_default(),
            )
        })
        .collect();
        build(raw)
    }

    #[test]
    fn test_blank_query() {
        let features = rivers();
        assert!(search(&features, "").is_empty());
        assert!(search(&features, "  ?! ").is_empty());
    }

    #[test]
    fn test_search_description() {
        let features = rivers();
        let result = search(&features, "tangerang");
        assert_eq!(result.matches.len(), 1);
        assert_eq!(features[result.primary.unwrap()].name(), "Cisadane");
    }

    #[test]
    fn test_exact_match_is_primary() {
        let features = rivers();
        // "Kali Angke" se normalise en "angke" : la feature "Angke" est principale
        let result = search(&features, "Kali Angke");
        let primary = &features[result.primary.unwrap()];
        assert_eq!(primary.name(), "Angke");
        assert!(result
            .matches
            .iter()
            .any(|&i| features[i].name() == "Kali Angke Hilir"));
    }

    #[test]
    fn test_spaces_ignored() {
        let features = rivers();
        let result = search(&features, "ci liwung");
        assert_eq!(features[result.primary.unwrap()].name(), "Ciliwung");
    }

    #[test]
    fn test_autocomplete() {
        let features = rivers();
        assert!(autocomplete(&features, "c", DEFAULT_SUGGESTION_LIMIT, DEFAULT_MIN_CHARS).is_empty());
        assert_eq!(
            autocomplete(&features, "ci", DEFAULT_SUGGESTION_LIMIT, DEFAULT_MIN_CHARS),
            vec!["Ciliwung", "Cisadane"]
        );
        assert_eq!(autocomplete(&features, "angke", 1, DEFAULT_MIN_CHARS), vec!["Angke"]);
    }
}
