//! État de l'application : données chargées, sélection, table d'état de vue
//!
//! Le cœur `sungai` ne voit jamais cet état. Les drapeaux de rendu
//! (filtré, surligné) vivent dans une table à part, indexée par identifiant
//! de feature, et ne modifient pas les features elles-mêmes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sungai::search::{self, SearchResult};
use sungai::spatial::classify;
use sungai::{find_boundary, Boundary, Feature, SpatialStrategy, SungaiError};
use tracing::{debug, info, warn};

/// Mode de sélection des limites
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Une seule limite à la fois (la nouvelle remplace l'ancienne)
    #[default]
    Single,
    /// Plusieurs limites, chaque sélection bascule l'appartenance
    Multi,
}

/// Drapeaux de rendu d'une feature
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LayerFlags {
    /// Hors des limites sélectionnées
    pub filtered: bool,
    /// Mise en évidence (au plus une sungai)
    pub highlighted: bool,
}

/// Table d'état de vue, indexée par identifiant de feature
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    flags: HashMap<String, LayerFlags>,
}

impl ViewState {
    pub fn flags(&self, id: &str) -> LayerFlags {
        self.flags.get(id).copied().unwrap_or_default()
    }

    pub fn set_filtered(&mut self, id: &str, filtered: bool) {
        self.flags.entry(id.to_string()).or_default().filtered = filtered;
    }

    pub fn set_highlighted(&mut self, id: &str, highlighted: bool) {
        self.flags.entry(id.to_string()).or_default().highlighted = highlighted;
    }

    pub fn clear_filtered(&mut self) {
        self.flags.values_mut().for_each(|f| f.filtered = false);
    }

    pub fn clear_highlighted(&mut self) {
        self.flags.values_mut().for_each(|f| f.highlighted = false);
    }

    /// Identifiant de la feature surlignée, s'il y en a une
    pub fn highlighted(&self) -> Option<&str> {
        self.flags
            .iter()
            .find(|(_, f)| f.highlighted)
            .map(|(id, _)| id.as_str())
    }
}

/// Résumé d'un filtrage par limite
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    /// Sungai touchant au moins une limite sélectionnée
    pub inside: usize,
    /// Sungai au total
    pub total: usize,
    /// Noms des limites sélectionnées
    pub boundaries: Vec<String>,
}

impl FilterSummary {
    /// Message affiché à l'utilisateur
    pub fn message(&self) -> String {
        format!(
            "Menampilkan {} sungai dalam {}",
            self.inside,
            self.boundaries.join(", ")
        )
    }
}

/// État de l'application, possédé par le contrôleur racine
#[derive(Debug, Clone)]
pub struct AppState {
    rivers: Vec<Feature>,
    boundaries: Vec<Boundary>,
    strategy: SpatialStrategy,
    mode: SelectionMode,
    selected: Vec<String>,
    view: ViewState,
    suggestion_limit: usize,
    suggestion_min_chars: usize,
}

impl AppState {
    pub fn new(
        rivers: Vec<Feature>,
        boundaries: Vec<Boundary>,
        strategy: SpatialStrategy,
        mode: SelectionMode,
    ) -> Self {
        Self {
            rivers,
            boundaries,
            strategy,
            mode,
            selected: Vec::new(),
            view: ViewState::default(),
            suggestion_limit: search::DEFAULT_SUGGESTION_LIMIT,
            suggestion_min_chars: search::DEFAULT_MIN_CHARS,
        }
    }

    /// Réglages d'autocomplétion
    pub fn with_suggestions(mut self, limit: usize, min_chars: usize) -> Self {
        self.suggestion_limit = limit;
        self.suggestion_min_chars = min_chars;
        self
    }

    pub fn rivers(&self) -> &[Feature] {
        &self.rivers
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn strategy(&self) -> SpatialStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: SpatialStrategy) -> Option<FilterSummary> {
        self.strategy = strategy;
        self.apply_filter()
    }

    /// Identifiants des limites sélectionnées, dans l'ordre de sélection
    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    /// Sungai non filtrées
    pub fn visible_rivers(&self) -> impl Iterator<Item = &Feature> {
        self.rivers
            .iter()
            .filter(|river| !self.view.flags(&river.id).filtered)
    }

    /// Sélectionne une limite et recalcule le filtrage.
    ///
    /// Un identifiant inconnu retourne [`SungaiError::UnresolvedBoundary`]
    /// sans modifier l'état. En mode multiple, resélectionner une limite la
    /// retire ; `None` signifie qu'il ne reste aucune limite sélectionnée.
    pub fn select_boundary(&mut self, id: &str) -> Result<Option<FilterSummary>, SungaiError> {
        if let Err(e) = find_boundary(&self.boundaries, id) {
            warn!(boundary = %id, "Boundary not found");
            return Err(e);
        }

        match self.mode {
            SelectionMode::Single => {
                self.selected = vec![id.to_string()];
            }
            SelectionMode::Multi => {
                if let Some(pos) = self.selected.iter().position(|s| s == id) {
                    self.selected.remove(pos);
                } else {
                    self.selected.push(id.to_string());
                }
            }
        }

        Ok(self.apply_filter())
    }

    /// Efface la sélection et tous les drapeaux de filtrage
    pub fn clear_selection(&mut self) {
        debug!("Clearing boundary selection");
        self.selected.clear();
        self.view.clear_filtered();
    }

    /// Surligne une sungai (une seule à la fois). Retourne `false` si
    /// l'identifiant est inconnu.
    pub fn highlight(&mut self, id: &str) -> bool {
        if !self.rivers.iter().any(|r| r.id == id) {
            return false;
        }
        self.view.clear_highlighted();
        self.view.set_highlighted(id, true);
        true
    }

    pub fn clear_highlights(&mut self) {
        self.view.clear_highlighted();
    }

    /// Recherche et surligne la correspondance principale.
    ///
    /// Une requête blanche efface les surlignages.
    pub fn search(&mut self, query: &str) -> SearchResult {
        if query.trim().is_empty() {
            self.clear_highlights();
            return SearchResult::default();
        }

        let result = search::search(&self.rivers, query);
        match result.primary {
            Some(i) => {
                let id = self.rivers[i].id.clone();
                self.highlight(&id);
                info!(query = %query, matches = result.matches.len(), "Search");
            }
            None => info!(query = %query, "No river found"),
        }
        result
    }

    /// Suggestions pour une saisie partielle
    pub fn suggest(&self, query: &str) -> Vec<String> {
        search::autocomplete(
            &self.rivers,
            query,
            self.suggestion_limit,
            self.suggestion_min_chars,
        )
    }

    /// Efface surlignage, sélection et recherche
    pub fn reset(&mut self) {
        self.clear_highlights();
        self.clear_selection();
    }

    fn apply_filter(&mut self) -> Option<FilterSummary> {
        let selected: Vec<&Boundary> = self
            .selected
            .iter()
            .filter_map(|id| self.boundaries.iter().find(|b| &b.id == id))
            .collect();

        if selected.is_empty() {
            self.view.clear_filtered();
            return None;
        }

        let inside = classify(&self.rivers, &selected, self.strategy);
        let summary = FilterSummary {
            inside: inside.iter().filter(|&&i| i).count(),
            total: self.rivers.len(),
            boundaries: selected.iter().map(|b| b.name.clone()).collect(),
        };

        for (river, is_inside) in self.rivers.iter().zip(inside) {
            self.view.set_filtered(&river.id, !is_inside);
        }

        info!(
            inside = summary.inside,
            total = summary.total,
            strategy = %self.strategy,
            "Rivers filtered by boundary"
        );
        Some(summary)
    }
}
