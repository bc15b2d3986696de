//! Accès typé aux propriétés avec listes de clés candidates
//!
//! Les fichiers sources nomment les mêmes champs de façons différentes
//! (`name`, `NAME`, `NAMOBJ`, `ADM2_EN`...). Chaque champ logique est résolu
//! par une liste ordonnée de clés, partagée par tous les chemins d'ingestion.

use serde_json::Value;

use crate::types::Properties;

/// Clés candidates pour le nom d'une sungai
pub const RIVER_NAME_KEYS: &[&str] = &["name", "NAME", "NAMOBJ", "nama"];

/// Clés candidates pour le nom d'une limite administrative
pub const BOUNDARY_NAME_KEYS: &[&str] = &["ADM2_EN", "ADM1_EN", "name", "NAME", "NAMOBJ"];

/// Clés candidates pour la description
pub const DESCRIPTION_KEYS: &[&str] = &["description", "desc", "REMARK"];

/// Retourne la première valeur non vide parmi les clés candidates.
///
/// Les nombres sont rendus en texte (certains fichiers stockent des codes
/// numériques). Les chaînes blanches sont ignorées.
pub fn resolve_str(properties: &Properties, candidates: &[&str]) -> Option<String> {
    candidates.iter().find_map(|key| match properties.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Nom d'une sungai, si présent
pub fn river_name(properties: &Properties) -> Option<String> {
    resolve_str(properties, RIVER_NAME_KEYS)
}

/// Nom d'une limite administrative, si présent
pub fn boundary_name(properties: &Properties) -> Option<String> {
    resolve_str(properties, BOUNDARY_NAME_KEYS)
}

/// Description libre (vide si absente)
pub fn description(properties: &Properties) -> String {
    resolve_str(properties, DESCRIPTION_KEYS).unwrap_or_default()
}

/// Identifiant d'une limite administrative
///
/// Ordre: `ADM2_PCODE`, `id` existant, nom en minuscules avec les espaces
/// remplacés par `-`, `kabkota-{ADM1_PCODE}`, puis `boundary-{index}`.
pub fn boundary_id(properties: &Properties, index: usize) -> String {
    if let Some(code) = resolve_str(properties, &["ADM2_PCODE", "id"]) {
        return code;
    }
    if let Some(name) = boundary_name(properties) {
        return name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
    }
    if let Some(code) = resolve_str(properties, &["ADM1_PCODE"]) {
        return format!("kabkota-{}", code);
    }
    format!("boundary-{}", index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Properties {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_resolve_str_order() {
        let p = props(json!({"NAME": "Angke", "NAMOBJ": "Kali Angke"}));
        assert_eq!(river_name(&p), Some("Angke".to_string()));

        let p = props(json!({"name": "  ", "NAMOBJ": "Kali Angke"}));
        assert_eq!(river_name(&p), Some("Kali Angke".to_string()));

        let p = props(json!({"name": null}));
        assert_eq!(river_name(&p), None);
    }

    #[test]
    fn test_resolve_number() {
        let p = props(json!({"ADM2_PCODE": 3171}));
        assert_eq!(boundary_id(&p, 0), "3171");
    }

    #[test]
    fn test_boundary_name_prefers_adm2() {
        let p = props(json!({"ADM1_EN": "Dki Jakarta", "ADM2_EN": "Jakarta Selatan"}));
        assert_eq!(boundary_name(&p), Some("Jakarta Selatan".to_string()));
    }

    #[test]
    fn test_boundary_id_fallbacks() {
        let p = props(json!({"ADM2_PCODE": "ID3171", "ADM2_EN": "Jakarta Selatan"}));
        assert_eq!(boundary_id(&p, 3), "ID3171");

        let p = props(json!({"ADM2_EN": "Kota  Depok"}));
        assert_eq!(boundary_id(&p, 3), "kota-depok");

        let p = props(json!({"ADM1_PCODE": "ID32"}));
        assert_eq!(boundary_id(&p, 3), "kabkota-ID32");

        assert_eq!(boundary_id(&Properties::new(), 3), "boundary-3");
    }

    #[test]
    fn test_description() {
        let p = props(json!({"desc": "Sungai utama"}));
        assert_eq!(description(&p), "Sungai utama");
        assert_eq!(description(&Properties::new()), "");
    }
}
