//! Types de données pour le crate sungai

use geo::Geometry;
use serde_json::{Map, Value};

/// Propriétés libres d'une feature (objet JSON)
pub type Properties = Map<String, Value>;

/// Clés des propriétés calculées pendant le traitement
pub mod keys {
    pub const NAME: &str = "name";
    pub const NORMALIZED_NAME: &str = "normalizedName";
    pub const SEARCHABLE_TEXT: &str = "searchableText";
    pub const MERGED_NAMES: &str = "mergedNames";
    pub const ORIGINAL_COUNT: &str = "originalCount";
    pub const UNNAMED: &str = "unnamed";
    pub const ID: &str = "id";
    pub const TYPE: &str = "type";
    pub const ADMIN_LEVEL: &str = "admin_level";
}

/// Une feature (sungai ou limite) avec sa géométrie et ses attributs
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Identifiant unique (id GeoJSON ou `feature-{index}`)
    pub id: String,

    /// Géométrie (LineString, MultiLineString, Polygon, MultiPolygon...)
    pub geometry: Geometry,

    /// Attributs de la feature
    pub properties: Properties,
}

impl Feature {
    pub fn new(id: impl Into<String>, geometry: Geometry, properties: Properties) -> Self {
        Self {
            id: id.into(),
            geometry,
            properties,
        }
    }

    /// Nom d'affichage estampillé (vide si absent)
    pub fn name(&self) -> &str {
        self.str_property(keys::NAME).unwrap_or("")
    }

    /// Clé de regroupement calculée par l'index
    pub fn normalized_name(&self) -> &str {
        self.str_property(keys::NORMALIZED_NAME).unwrap_or("")
    }

    /// Texte de recherche (nom + description en minuscules)
    pub fn searchable_text(&self) -> &str {
        self.str_property(keys::SEARCHABLE_TEXT).unwrap_or("")
    }

    /// Vrai si la feature a été marquée sans nom
    pub fn is_unnamed(&self) -> bool {
        self.properties
            .get(keys::UNNAMED)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Nombre de features sources fusionnées (1 si non fusionnée)
    pub fn original_count(&self) -> u64 {
        self.properties
            .get(keys::ORIGINAL_COUNT)
            .and_then(Value::as_u64)
            .unwrap_or(1)
    }

    /// Noms d'origine repliés dans une feature fusionnée
    pub fn merged_names(&self) -> Vec<&str> {
        self.properties
            .get(keys::MERGED_NAMES)
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    fn str_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

/// Une limite administrative (kabupaten/kota) prête pour le filtrage
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    /// Identifiant stable (code ADM2_PCODE ou dérivé du nom)
    pub id: String,

    /// Nom d'affichage
    pub name: String,

    /// Feature source, propriétés estampillées
    pub feature: Feature,
}

impl Boundary {
    pub fn geometry(&self) -> &Geometry {
        &self.feature.geometry
    }
}

/// Nom du type de géométrie, pour les logs et les erreurs
pub fn geometry_type_name(geometry: &Geometry) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
