//! Normalisation des noms de sungai et de limites
//!
//! Deux variantes distinctes :
//! - [`normalize_name`] produit la clé de regroupement (diacritiques retirés,
//!   préfixes de domaine retirés) ;
//! - [`normalize_search`] produit une clé de recherche plein texte
//!   (minuscules, alphanumérique ASCII uniquement).

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Préfixes de domaine retirés en tête de clé, dans cet ordre, une fois chacun
pub const DOMAIN_PREFIXES: &[&str] = &["sungai", "kali", "ci", "k", "s", "bendung", "saluran"];

/// Valeurs de nom considérées comme absentes
const NO_NAME_PLACEHOLDERS: &[&str] = &[
    "unnamed",
    "no name",
    "noname",
    "tanpa nama",
    "tidak ada nama",
    "tidak bernama",
    "null",
    "none",
    "n/a",
    "-",
];

/// Clé de regroupement d'un nom.
///
/// Minuscules, diacritiques retirés, tout caractère non alphanumérique ASCII
/// retiré (espaces compris), puis chaque préfixe de [`DOMAIN_PREFIXES`] est
/// testé une seule fois dans l'ordre. Le résultat peut être vide.
///
/// Pas idempotent en général : `"Bendung Kali Baru"` donne `"kalibaru"`,
/// qui donne à son tour `"baru"`.
pub fn normalize_name(name: &str) -> String {
    let folded: String = name
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii_alphanumeric)
        .collect();

    let mut key = folded.as_str();
    for prefix in DOMAIN_PREFIXES {
        if let Some(rest) = key.strip_prefix(prefix) {
            key = rest;
        }
    }
    key.to_string()
}

/// Clé de recherche : minuscules, alphanumérique ASCII uniquement
pub fn normalize_search(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Vrai si le nom est absent, blanc, ou un marqueur connu de « sans nom »
pub fn is_placeholder_name(name: Option<&str>) -> bool {
    match name.map(str::trim) {
        None | Some("") => true,
        Some(name) => {
            let lower = name.to_lowercase();
            NO_NAME_PLACEHOLDERS.contains(&lower.as_str())
        }
    }
}

/// Comparaison de noms d'affichage insensible à la casse et aux accents.
///
/// Approximation de `localeCompare` : clé repliée d'abord, puis texte brut
/// pour départager. Combinée à un tri stable, deux noms identiques gardent
/// leur ordre de rencontre.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_and_prefix() {
        assert_eq!(normalize_name("Ci Liwung"), "liwung");
        assert_eq!(normalize_name("ciliwung"), "liwung");
        assert_eq!(normalize_name("Ci Liwung"), normalize_name("ciliwung"));
    }

    #[test]
    fn test_prefix_order() {
        // sungai puis ci
        assert_eq!(normalize_name("Sungai Ciliwung Hulu"), "liwunghulu");
        // kali puis ci
        assert_eq!(normalize_name("Kali Ciliwung"), "liwung");
        // kali une seule fois, puis k
        assert_eq!(normalize_name("Kali Kali Angke"), "aliangke");
        // s est testé avant saluran
        assert_eq!(normalize_name("Saluran Tarum"), "alurantarum");
        assert_eq!(normalize_name("Sunter"), "unter");
    }

    #[test]
    fn test_not_idempotent_after_prefix() {
        let once = normalize_name("Bendung Kali Baru");
        assert_eq!(once, "kalibaru");
        assert_eq!(normalize_name(&once), "baru");

        let stable = normalize_name("Pesanggrahan");
        assert_eq!(normalize_name(&stable), stable);
    }

    #[test]
    fn test_diacritics_and_punctuation() {
        assert_eq!(normalize_name("Kalí Grogol-Ulu"), "grogolulu");
        assert_eq!(normalize_name("  Pésanggrahan  "), "pesanggrahan");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("   "), "");
        assert_eq!(normalize_name("Sungai"), "");
        assert_eq!(normalize_search(""), "");
    }

    #[test]
    fn test_normalize_search_keeps_prefixes() {
        assert_eq!(normalize_search("Ci Liwung"), "ciliwung");
        assert_eq!(normalize_search("Kali Angke (Hilir)"), "kaliangkehilir");
        // pas de décomposition : le caractère accentué disparaît
        assert_eq!(normalize_search("Pésanggrahan"), "psanggrahan");
    }

    #[test]
    fn test_placeholder_names() {
        assert!(is_placeholder_name(None));
        assert!(is_placeholder_name(Some("")));
        assert!(is_placeholder_name(Some("   ")));
        assert!(is_placeholder_name(Some("Unnamed")));
        assert!(is_placeholder_name(Some("Tanpa Nama")));
        assert!(!is_placeholder_name(Some("Ciliwung")));
    }

    #[test]
    fn test_compare_names() {
        assert_eq!(compare_names("angke", "Bekasi"), Ordering::Less);
        assert_eq!(compare_names("Élang", "Emas"), Ordering::Less);
        assert_eq!(compare_names("Depok", "Depok"), Ordering::Equal);
    }
}
