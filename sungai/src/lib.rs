//! # sungai
//!
//! Cœur de la carte des sungai de Jabodetabek : normalisation des noms,
//! fusion des tronçons de sungai et filtrage par limite administrative.
//!
//! ## Features
//!
//! - Deux normalisations de noms (regroupement et recherche)
//! - Fusion gloutonne et déterministe des tronçons par extrémités proches
//! - Filtrage ligne/polygone par échantillonnage de sommets ou intersection exacte
//! - Index fusionné, trié, avec recherche et autocomplétion
//! - Types `geo` pour l'interopérabilité avec l'écosystème Rust géospatial
//!
//! Aucune entrée/sortie : les fonctions prennent des données et en rendent.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sungai::{build_index, parse_feature_collection, prepare_boundaries};
//! use sungai::spatial::{classify, SpatialStrategy};
//!
//! let rivers = build_index(parse_feature_collection(&river_text)?);
//! let boundaries = prepare_boundaries(parse_feature_collection(&boundary_text)?);
//!
//! let inside = classify(&rivers.features, &[&boundaries[0]], SpatialStrategy::Simple);
//! ```

pub mod demo;
pub mod error;
pub mod index;
pub mod ingest;
pub mod merge;
pub mod normalize;
pub mod properties;
pub mod search;
pub mod spatial;
pub mod types;

pub use error::SungaiError;
pub use index::{build, build_index, FeatureIndex, IndexStats};
pub use ingest::{features_from_value, find_boundary, parse_feature_collection, prepare_boundaries};
pub use normalize::{normalize_name, normalize_search};
pub use spatial::SpatialStrategy;
pub use types::{Boundary, Feature, Properties};
