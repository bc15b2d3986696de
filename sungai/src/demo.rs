//! Jeux de données de démonstration
//!
//! Utilisés quand les fichiers sources sont absents ou malformés. Ils passent
//! par exactement le même chemin (index, préparation des limites) que les
//! données réelles.

use geo::{line_string, polygon, Geometry};
use serde_json::{json, Value};

use crate::types::{Feature, Properties};

fn props(value: Value) -> Properties {
    match value {
        Value::Object(map) => map,
        _ => Properties::new(),
    }
}

/// Deux sungai de démonstration (Ciliwung, Cisadane)
pub fn demo_rivers() -> Vec<Feature> {
    vec![
        Feature::new(
            "demo-ciliwung",
            Geometry::LineString(line_string![
                (x: 106.8456, y: -6.1744),
                (x: 106.8234, y: -6.2088),
                (x: 106.8123, y: -6.2456)
            ]),
            props(json!({
                "name": "Ciliwung",
                "description": "Sungai utama yang melewati Jakarta"
            })),
        ),
        Feature::new(
            "demo-cisadane",
            Geometry::LineString(line_string![
                (x: 106.7456, y: -6.1234),
                (x: 106.7234, y: -6.1456),
                (x: 106.7123, y: -6.1789)
            ]),
            props(json!({
                "name": "Cisadane",
                "description": "Sungai di wilayah Tangerang"
            })),
        ),
    ]
}

/// Deux limites de démonstration (Depok, Jakarta Selatan)
pub fn demo_boundaries() -> Vec<Feature> {
    vec![
        Feature::new(
            "depok-demo",
            Geometry::Polygon(polygon![
                (x: 106.75, y: -6.35),
                (x: 106.82, y: -6.35),
                (x: 106.82, y: -6.45),
                (x: 106.75, y: -6.45),
                (x: 106.75, y: -6.35)
            ]),
            props(json!({
                "name": "Kota Depok (Demo)",
                "id": "depok-demo",
                "type": "city",
                "admin_level": 5
            })),
        ),
        Feature::new(
            "jaksel-demo",
            Geometry::Polygon(polygon![
                (x: 106.78, y: -6.20),
                (x: 106.86, y: -6.20),
                (x: 106.86, y: -6.35),
                (x: 106.78, y: -6.35),
                (x: 106.78, y: -6.20)
            ]),
            props(json!({
                "name": "Jakarta Selatan (Demo)",
                "id": "jaksel-demo",
                "type": "city",
                "admin_level": 5,
                "parent": "jakarta-demo"
            })),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;
    use crate::ingest::prepare_boundaries;
    use crate::spatial::{classify, SpatialStrategy};

    #[test]
    fn test_demo_pipeline() {
        let index = build_index(demo_rivers());
        assert_eq!(index.len(), 2);
        assert_eq!(index.features[0].name(), "Ciliwung");

        let boundaries = prepare_boundaries(demo_boundaries());
        assert_eq!(boundaries[0].id, "jaksel-demo");
        assert_eq!(boundaries[1].id, "depok-demo");

        // Le sommet (106.8123, -6.2456) de Ciliwung tombe dans Jakarta Selatan
        let jaksel = &boundaries[0];
        let inside = classify(&index.features, &[jaksel], SpatialStrategy::Simple);
        assert_eq!(inside, vec![true, false]);
    }
}
