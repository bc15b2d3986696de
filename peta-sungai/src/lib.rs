//! # peta-sungai
//!
//! Carte des sungai de Jabodetabek : chargement des données, fusion,
//! filtrage par kabupaten/kota, recherche et export.
//!
//! ## Features
//!
//! - Chargement asynchrone avec repli sur des données de démonstration
//! - État applicatif explicite (sélection, table d'état de vue)
//! - Stratégie de filtrage et mode de sélection configurables
//! - Export GeoJSON et rapport de chargement
//! - CLI simple
//!
//! ## Usage CLI
//!
//! ```bash
//! # Fusionner les tronçons et exporter
//! peta-sungai merge --rivers river.geojson --output merged.geojson
//!
//! # Sungai d'un kabupaten/kota
//! peta-sungai filter --boundary ID3174 --strategy exact
//!
//! # Recherche et suggestions
//! peta-sungai search "ci liwung"
//! peta-sungai suggest ang
//! ```

pub mod config;
pub mod export;
pub mod loader;
pub mod report;
pub mod state;

pub use config::Config;
pub use loader::{load_boundaries, load_rivers, DataSource};
pub use report::{LoadReport, LoadStatus};
pub use state::{AppState, FilterSummary, SelectionMode};
