//! Tests d'intégration : GeoJSON → index fusionné → filtrage par limite

use geo::Geometry;
use sungai::spatial::{classify, intersects, SpatialStrategy};
use sungai::{build_index, parse_feature_collection, prepare_boundaries, search};

const RIVERS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"name": "Kali Pesanggrahan"},
         "geometry": {"type": "LineString", "coordinates": [[106.76, -6.30], [106.77, -6.25]]}},
        {"type": "Feature", "properties": {"name": "Sunter"},
         "geometry": {"type": "LineString", "coordinates": [[106.90, -6.20], [106.89, -6.14]]}},
        {"type": "Feature", "properties": {"NAME": "Pesanggrahan"},
         "geometry": {"type": "LineString", "coordinates": [[106.78, -6.20], [106.77, -6.25]]}},
        {"type": "Feature", "properties": {"NAMOBJ": "Sungai Pesanggrahan"},
         "geometry": {"type": "MultiLineString", "coordinates": [[[106.755, -6.35], [106.76, -6.30]], [[106.50, -6.50], [106.51, -6.51]]]}},
        {"type": "Feature", "properties": {"name": ""},
         "geometry": {"type": "LineString", "coordinates": [[106.80, -6.40], [106.81, -6.41]]}},
        {"type": "Feature", "properties": {},
         "geometry": {"type": "LineString", "coordinates": [[106.80, -6.40], [106.81, -6.41]]}}
    ]
}"#;

const BOUNDARIES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"ADM2_EN": "Jakarta Selatan", "ADM2_PCODE": "ID3174"},
         "geometry": {"type": "Polygon", "coordinates": [[[106.78, -6.20], [106.86, -6.20], [106.86, -6.35], [106.78, -6.35], [106.78, -6.20]]]}},
        {"type": "Feature", "properties": {"ADM2_EN": "Kota Depok", "ADM2_PCODE": "ID3276"},
         "geometry": {"type": "MultiPolygon", "coordinates": [[[[106.75, -6.35], [106.82, -6.35], [106.82, -6.45], [106.75, -6.45], [106.75, -6.35]]]]}}
    ]
}"#;

#[test]
fn test_split_river_is_merged() {
    let index = build_index(parse_feature_collection(RIVERS).unwrap());

    // Pesanggrahan (3 features), Sunter, deux sans nom
    assert_eq!(index.stats.raw, 6);
    assert_eq!(index.stats.merged_groups, 1);
    assert_eq!(index.stats.unnamed, 2);
    assert_eq!(index.len(), 4);

    let pesanggrahan = index
        .features
        .iter()
        .find(|f| f.normalized_name() == "pesanggrahan")
        .unwrap();
    assert_eq!(pesanggrahan.original_count(), 3);
    assert_eq!(
        pesanggrahan.merged_names(),
        vec!["Kali Pesanggrahan", "Pesanggrahan", "Sungai Pesanggrahan"]
    );

    let Geometry::MultiLineString(lines) = &pesanggrahan.geometry else {
        panic!("merged geometry should be a MultiLineString");
    };
    // Une chaîne continue + le tronçon isolé de la MultiLineString
    assert_eq!(lines.0.len(), 2);
    assert_eq!(lines.0[0].0.len(), 4);
    assert_eq!(lines.0[0].0[0].x, 106.755);
    assert_eq!(lines.0[0].0[3].x, 106.78);
    assert_eq!(lines.0[1].0[0].x, 106.50);
}

#[test]
fn test_sorted_output() {
    let index = build_index(parse_feature_collection(RIVERS).unwrap());
    let names: Vec<&str> = index.features.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["Kali Pesanggrahan", "Sungai 5", "Sungai 6", "Sunter"]);
}

#[test]
fn test_filter_by_boundary() {
    let index = build_index(parse_feature_collection(RIVERS).unwrap());
    let boundaries = prepare_boundaries(parse_feature_collection(BOUNDARIES).unwrap());
    assert_eq!(boundaries[0].name, "Jakarta Selatan");

    let jaksel = &boundaries[0];
    let depok = &boundaries[1];

    let simple = classify(&index.features, &[jaksel], SpatialStrategy::Simple);
    let exact = classify(&index.features, &[jaksel], SpatialStrategy::Exact);
    // Pesanggrahan : seul sommet (106.78, -6.20) sur le coin, aucun à l'intérieur
    assert_eq!(simple, vec![false, false, false, false]);
    assert_eq!(exact, vec![true, false, false, false]);

    let either = classify(&index.features, &[jaksel, depok], SpatialStrategy::Simple);
    assert_eq!(either, vec![false, true, true, false]);
}

#[test]
fn test_exact_catches_pass_through() {
    let line = parse_feature_collection(
        r#"{"features": [{"type": "Feature", "properties": {},
            "geometry": {"type": "LineString", "coordinates": [[106.70, -6.30], [106.90, -6.30]]}}]}"#,
    )
    .unwrap();
    let boundaries = prepare_boundaries(parse_feature_collection(BOUNDARIES).unwrap());

    let river = &line[0].geometry;
    let polygon = boundaries[0].geometry();
    assert!(!intersects(river, polygon, SpatialStrategy::Simple));
    assert!(intersects(river, polygon, SpatialStrategy::Exact));
}

#[test]
fn test_search_merged() {
    let index = build_index(parse_feature_collection(RIVERS).unwrap());
    let result = search::search(&index.features, "pesanggrahan");
    let primary = &index.features[result.primary.unwrap()];
    assert_eq!(primary.original_count(), 3);
}
