//! Stateful gear view.
//!
//! [`GearView`] owns the loaded collection together with everything the user
//! can change about how it is shown: category, filter text, facet selections,
//! sort and page. Every mutation re-runs [`crate::filtering::apply`] and keeps
//! the resulting page, notes and exclusion counts for display.

use std::collections::HashSet;

use crate::GearError;
use crate::config::ViewConfig;
use crate::filtering::autocomplete::Autocomplete;
use crate::filtering::facets::{ExclusionReport, FacetKind, FacetRegistry, ToggleFacet};
use crate::filtering::pagination::{ViewWindow, content_range};
use crate::filtering::pipeline::apply;
use crate::filtering::query_parser::{FilterQuery, InputState, parse};
use crate::filtering::sort::{SortField, SortSpec};
use crate::models::{Category, Item, Mark, Player};
use crate::settings::{self, SettingsStore};

pub struct GearView<S: SettingsStore> {
    store: S,
    filter_text_key: String,
    player: Option<Player>,
    category: Category,
    raw_filter: String,
    query: FilterQuery,
    facets: FacetRegistry,
    sort: SortSpec,
    window: ViewWindow,
    autocomplete: Autocomplete,
    visible: Vec<Item>,
    total: usize,
    notes: Vec<String>,
    exclusions: ExclusionReport,
}

impl<S: SettingsStore> GearView<S> {
    /// Create an empty view, restoring any persisted filter text from `store`.
    #[must_use]
    pub fn new(config: ViewConfig, store: S) -> Self {
        let raw_filter = store.get(&config.filter_text_key).unwrap_or_default();
        let query = parse(&raw_filter);
        let mut autocomplete = Autocomplete::new(config.autocomplete_options);
        autocomplete.update(&query);
        if !raw_filter.is_empty() {
            tracing::debug!(filter = %raw_filter, "Restored persisted filter text");
        }
        Self {
            store,
            filter_text_key: config.filter_text_key,
            player: None,
            category: config.category,
            raw_filter,
            query,
            facets: FacetRegistry::new(),
            sort: config.sort,
            window: ViewWindow::new(0, config.page_size),
            autocomplete,
            visible: Vec::new(),
            total: 0,
            notes: Vec::new(),
            exclusions: ExclusionReport::new(),
        }
    }

    /// Replace the collection, rebuild facet options and re-filter.
    pub fn load(&mut self, player: Player) {
        tracing::info!(items = player.gear.len(), "Loading gear");
        self.facets.invalidate_choices();
        self.facets.regenerate_choices(&player, false);
        self.player = Some(player);
        self.refresh();
    }

    /// Parse and load a JSON player snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GearError::Serialization`] if the snapshot is malformed; the
    /// current collection is left untouched.
    pub fn load_json(&mut self, json: &str) -> Result<(), GearError> {
        let player = Player::from_json(json)?;
        self.load(player);
        Ok(())
    }

    #[must_use]
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Switch category and re-filter
    pub fn select_category(&mut self, category: Category) {
        self.category = category;
        self.refresh();
    }

    /// Switch category by route path. Unknown paths leave the view unchanged.
    pub fn select_path(&mut self, path: &str) -> bool {
        match Category::from_path(path) {
            Some(category) => {
                self.select_category(category);
                true
            }
            None => {
                tracing::debug!(path = %path, "Unknown gear path");
                false
            }
        }
    }

    #[must_use]
    pub fn filter_text(&self) -> &str {
        &self.raw_filter
    }

    #[must_use]
    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    /// Replace the wildcard text, persist it and re-filter.
    pub fn set_filter_text(&mut self, raw: &str) {
        raw.clone_into(&mut self.raw_filter);
        self.query = parse(raw);
        self.autocomplete.update(&self.query);
        if let Err(err) = settings::persist_filter_text(&mut self.store, &self.filter_text_key, raw) {
            err.log_internal();
        }
        self.refresh();
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        self.query.input_state()
    }

    /// Autocomplete options for the fragment being typed
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        self.autocomplete.current()
    }

    #[must_use]
    pub fn facets(&self) -> &FacetRegistry {
        &self.facets
    }

    /// Change one facet's selection and re-filter.
    ///
    /// Returns false, without re-filtering, when `kind` has no facet.
    pub fn update_facet(&mut self, kind: FacetKind, change: impl FnOnce(&mut ToggleFacet)) -> bool {
        let Some(facet) = self.facets.facet_mut(kind) else {
            return false;
        };
        change(facet);
        self.refresh();
        true
    }

    /// True when any token is present or any facet is restricted
    #[must_use]
    pub fn filters_dirty(&self) -> bool {
        !self.query.is_empty() || self.facets.is_dirty()
    }

    /// Clear the text (and its persisted copy) and select every facet option.
    pub fn reset_filters(&mut self) {
        self.raw_filter.clear();
        self.query = FilterQuery::default();
        self.autocomplete.clear();
        if let Err(err) = self.store.remove(&self.filter_text_key) {
            err.log_internal();
        }
        self.facets.reset();
        self.refresh();
    }

    #[must_use]
    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Sort by `field`, flipping direction if it is already the sort field
    pub fn sort_by(&mut self, field: SortField) {
        self.sort.toggle(field);
        self.refresh();
    }

    /// Like [`GearView::sort_by`] but by key; unknown keys mean `power`.
    pub fn sort_by_key(&mut self, key: &str) {
        self.sort_by(SortField::from_key_or_default(key));
    }

    #[must_use]
    pub fn window(&self) -> ViewWindow {
        self.window
    }

    pub fn set_page(&mut self, page: usize) {
        self.window.page = page;
        self.refresh();
    }

    /// Change the page size. A size of zero is treated as one.
    pub fn show(&mut self, count: usize) {
        self.window.size = count.max(1);
        self.refresh();
    }

    #[must_use]
    pub fn visible(&self) -> &[Item] {
        &self.visible
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    #[must_use]
    pub fn exclusions(&self) -> &ExclusionReport {
        &self.exclusions
    }

    /// Label such as `weapons 0-19/45` for the current page
    #[must_use]
    pub fn range_label(&self) -> String {
        let start = self.window.page.saturating_mul(self.window.size);
        let range = start..start + self.visible.len();
        content_range(&range, self.total, self.category.path())
    }

    /// Run the pipeline and store its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`GearError::NotLoaded`] when no collection is loaded; the
    /// previous page is kept.
    pub fn try_filter_gear(&mut self) -> Result<(), GearError> {
        let player = self.player.as_ref().ok_or(GearError::NotLoaded)?;
        let outcome = apply(
            &player.gear,
            self.category,
            &self.query,
            &self.facets,
            self.sort,
            self.window,
        );
        self.visible = outcome.visible.into_iter().cloned().collect();
        self.total = outcome.total;
        self.window.page = outcome.page;
        self.notes = outcome.notes;
        self.exclusions = outcome.exclusions;
        Ok(())
    }

    /// Re-run the pipeline, logging instead of propagating failures
    pub fn refresh(&mut self) {
        if let Err(err) = self.try_filter_gear() {
            err.log_internal();
            if !err.is_transient() {
                tracing::warn!(error = %err, "Filtering failed, keeping previous page");
            }
        }
    }

    /// Apply `mark` to every item on the current page.
    pub fn mark_visible(&mut self, mark: Option<Mark>) {
        let ids: HashSet<&str> = self.visible.iter().map(|i| i.id.as_str()).collect();
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let mut changed = 0usize;
        for item in player.gear.iter_mut().filter(|i| ids.contains(i.id.as_str())) {
            item.mark = mark;
            item.refresh_search_text();
            changed += 1;
        }
        tracing::debug!(items = changed, mark = ?mark, "Marked visible gear");
        self.refresh();
    }

    /// Set `mark` on one item; applying its current mark again clears it.
    ///
    /// Returns false when no item has `id`.
    pub fn mark_item(&mut self, id: &str, mark: Mark) -> bool {
        let Some(item) = self.item_mut(id) else {
            return false;
        };
        item.mark = if item.mark == Some(mark) { None } else { Some(mark) };
        item.refresh_search_text();
        self.refresh();
        true
    }

    /// Replace an item's free-text notes. Returns false when no item has `id`.
    pub fn set_item_notes(&mut self, id: &str, notes: Option<String>) -> bool {
        let Some(item) = self.item_mut(id) else {
            return false;
        };
        item.notes = notes.filter(|n| !n.trim().is_empty());
        self.refresh();
        true
    }

    fn item_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.player
            .as_mut()
            .and_then(|p| p.gear.iter_mut().find(|i| i.id == id))
    }

    #[must_use]
    pub fn highlight_all_perks(&self) -> bool {
        settings::highlight_all_perks(&self.store)
    }

    pub fn set_highlight_all_perks(&mut self, enabled: bool) {
        if let Err(err) = settings::persist_highlight_all_perks(&mut self.store, enabled) {
            err.log_internal();
        }
    }
}
