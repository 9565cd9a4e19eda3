//! Transient UI state for a paged resource list: filters, sort,
//! pagination, row selection, column visibility, and dialog flags. The
//! controller owns no fetched data; its only output is the derived
//! [`ListParams`] handed to the query layer.

use std::collections::{BTreeMap, BTreeSet};

use payloads::SortOrder;
use payloads::requests::ListParams;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub by: &'static str,
    pub order: SortOrder,
}

/// Free-text query plus resource-specific filter fields. Kept twice in
/// the controller: the staged copy the filter UI edits, and the active
/// copy that feeds the query parameters once applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSet {
    pub q: String,
    pub fields: BTreeMap<&'static str, String>,
}

impl FilterSet {
    fn is_empty(&self) -> bool {
        self.q.trim().is_empty()
            && self.fields.values().all(|v| v.trim().is_empty())
    }
}

/// Open/closed flags for the list's dialogs. Mutual exclusion is a UI
/// convention, not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dialogs {
    /// Single-row delete confirmation, holding the target id.
    pub delete_target: Option<Uuid>,
    pub bulk_delete_open: bool,
    pub filter_open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListController {
    staged_filters: FilterSet,
    active_filters: FilterSet,
    sort: SortSpec,
    page: u32,
    per_page: u32,
    selection: BTreeSet<Uuid>,
    visible_columns: BTreeMap<&'static str, bool>,
    pub dialogs: Dialogs,
}

impl ListController {
    pub fn new(
        default_sort: SortSpec,
        per_page: u32,
        columns: &[&'static str],
    ) -> Self {
        Self {
            staged_filters: FilterSet::default(),
            active_filters: FilterSet::default(),
            sort: default_sort,
            page: 1,
            per_page,
            selection: BTreeSet::new(),
            visible_columns: columns.iter().map(|c| (*c, true)).collect(),
            dialogs: Dialogs::default(),
        }
    }

    // --- Filter state ---

    pub fn staged_filters(&self) -> &FilterSet {
        &self.staged_filters
    }

    pub fn stage_query(&mut self, q: String) {
        self.staged_filters.q = q;
    }

    pub fn stage_filter(&mut self, field: &'static str, value: String) {
        self.staged_filters.fields.insert(field, value);
    }

    /// Commit staged filters into the active query parameters. Resets
    /// to the first page; the previous selection refers to rows that
    /// may no longer be rendered, so it is dropped.
    pub fn apply_filters(&mut self) {
        self.active_filters = self.staged_filters.clone();
        self.page = 1;
        self.selection.clear();
        self.dialogs.filter_open = false;
    }

    /// Clear both staged and active filters.
    pub fn reset_filters(&mut self) {
        self.staged_filters = FilterSet::default();
        self.active_filters = FilterSet::default();
        self.page = 1;
        self.selection.clear();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.active_filters.is_empty()
    }

    // --- Sort state ---

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Click on a sortable column header: the active column flips
    /// direction, any other column becomes active with its default
    /// direction.
    pub fn toggle_sort(
        &mut self,
        column: &'static str,
        default_order: SortOrder,
    ) {
        if self.sort.by == column {
            self.sort.order = self.sort.order.toggled();
        } else {
            self.sort = SortSpec {
                by: column,
                order: default_order,
            };
        }
        self.selection.clear();
    }

    // --- Pagination state ---

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
        self.selection.clear();
    }

    pub fn set_per_page(&mut self, per_page: u32) {
        self.per_page = per_page.max(1);
        self.page = 1;
        self.selection.clear();
    }

    // --- Selection state ---

    pub fn selection(&self) -> &BTreeSet<Uuid> {
        &self.selection
    }

    pub fn selected_ids(&self) -> Vec<Uuid> {
        self.selection.iter().copied().collect()
    }

    pub fn is_selected(&self, id: Uuid) -> bool {
        self.selection.contains(&id)
    }

    pub fn toggle_row(&mut self, id: Uuid) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// "Select all on page": the selection becomes exactly the rendered
    /// ids, never rows from other pages.
    pub fn select_page(&mut self, ids: &[Uuid]) {
        self.selection = ids.iter().copied().collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Whether every rendered row is selected (drives the header
    /// checkbox).
    pub fn page_fully_selected(&self, ids: &[Uuid]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.selection.contains(id))
    }

    // --- Column visibility ---

    pub fn is_column_visible(&self, column: &'static str) -> bool {
        self.visible_columns.get(column).copied().unwrap_or(true)
    }

    pub fn toggle_column(&mut self, column: &'static str) {
        let entry = self.visible_columns.entry(column).or_insert(true);
        *entry = !*entry;
    }

    pub fn columns(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.visible_columns.iter().map(|(c, v)| (*c, *v))
    }

    // --- Dialog state ---

    pub fn open_delete(&mut self, id: Uuid) {
        self.dialogs.delete_target = Some(id);
    }

    pub fn open_bulk_delete(&mut self) {
        self.dialogs.bulk_delete_open = true;
    }

    pub fn open_filter(&mut self) {
        self.dialogs.filter_open = true;
    }

    pub fn close_dialogs(&mut self) {
        self.dialogs = Dialogs::default();
    }

    /// A mutation finished, successfully or not: the affected ids are
    /// only knowable from a fresh fetch, so the selection is dropped
    /// unconditionally and the dialogs close.
    pub fn mutation_settled(&mut self) {
        self.selection.clear();
        self.close_dialogs();
    }

    // --- Derived query parameters ---

    /// The sole input to the query layer.
    pub fn params(&self) -> ListParams {
        let mut params = ListParams::default()
            .page(self.page)
            .per_page(self.per_page)
            .sort(self.sort.by, self.sort.order);
        if !self.active_filters.q.trim().is_empty() {
            params = params.query(self.active_filters.q.clone());
        }
        for (field, value) in &self.active_filters.fields {
            params = params.filter(*field, value.clone());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ListController {
        ListController::new(
            SortSpec {
                by: "uploaded_at",
                order: SortOrder::Desc,
            },
            20,
            &["title", "uploaded_at"],
        )
    }

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn sort_toggle_follows_header_click_protocol() {
        let mut c = controller();
        // Unsorted text column: activates ascending.
        c.toggle_sort("title", SortOrder::Asc);
        assert_eq!(
            c.sort(),
            SortSpec {
                by: "title",
                order: SortOrder::Asc
            }
        );
        // Same column again: flips to descending.
        c.toggle_sort("title", SortOrder::Asc);
        assert_eq!(c.sort().order, SortOrder::Desc);
        // Different column: takes over with its own default.
        c.toggle_sort("status", SortOrder::Asc);
        assert_eq!(
            c.sort(),
            SortSpec {
                by: "status",
                order: SortOrder::Asc
            }
        );
    }

    #[test]
    fn applying_filters_resets_page_and_clears_selection() {
        let mut c = controller();
        c.set_page(3);
        c.toggle_row(id(1));
        c.stage_query("resume".to_string());
        c.apply_filters();

        assert_eq!(c.page(), 1);
        assert!(c.selection().is_empty());
        assert_eq!(c.params().q.as_deref(), Some("resume"));
    }

    #[test]
    fn staged_filters_are_invisible_until_applied() {
        let mut c = controller();
        c.stage_filter("status", "published".to_string());
        assert!(c.params().filters.is_empty());

        c.apply_filters();
        assert_eq!(
            c.params().filters.get("status").map(String::as_str),
            Some("published")
        );

        c.reset_filters();
        assert!(c.params().filters.is_empty());
        assert!(c.staged_filters().fields.is_empty());
        assert!(!c.has_active_filters());
    }

    #[test]
    fn per_page_change_resets_page() {
        let mut c = controller();
        c.set_page(5);
        c.set_per_page(50);
        assert_eq!(c.page(), 1);
        assert_eq!(c.per_page(), 50);
    }

    #[test]
    fn any_parameter_change_clears_selection() {
        let mut c = controller();

        c.toggle_row(id(1));
        c.set_page(2);
        assert!(c.selection().is_empty());

        c.toggle_row(id(2));
        c.toggle_sort("title", SortOrder::Asc);
        assert!(c.selection().is_empty());

        c.toggle_row(id(3));
        c.set_per_page(10);
        assert!(c.selection().is_empty());
    }

    #[test]
    fn select_page_is_exactly_the_rendered_ids() {
        let mut c = controller();
        c.toggle_row(id(99));
        let rendered = [id(1), id(2), id(3)];
        c.select_page(&rendered);

        assert_eq!(c.selected_ids(), rendered.to_vec());
        assert!(c.page_fully_selected(&rendered));
        assert!(!c.is_selected(id(99)));
    }

    #[test]
    fn mutation_settled_clears_selection_and_dialogs_unconditionally() {
        let mut c = controller();
        c.toggle_row(id(1));
        c.toggle_row(id(2));
        c.open_bulk_delete();

        // Applies whether the backend reported 2, 1, or 0 deletions.
        c.mutation_settled();
        assert!(c.selection().is_empty());
        assert_eq!(c.dialogs, Dialogs::default());
    }

    #[test]
    fn toggle_row_is_an_involution() {
        let mut c = controller();
        c.toggle_row(id(7));
        assert!(c.is_selected(id(7)));
        c.toggle_row(id(7));
        assert!(!c.is_selected(id(7)));
    }

    #[test]
    fn params_merge_filters_sort_and_pagination() {
        let mut c = controller();
        c.stage_query("designer".to_string());
        c.stage_filter("status", "open".to_string());
        c.apply_filters();
        c.set_page(2);

        let params = c.params();
        assert_eq!(params.page, Some(2));
        assert_eq!(params.per_page, Some(20));
        assert_eq!(params.q.as_deref(), Some("designer"));
        assert_eq!(params.sort_by.as_deref(), Some("uploaded_at"));
        assert_eq!(params.sort_order, Some(SortOrder::Desc));
        assert_eq!(
            params.filters.get("status").map(String::as_str),
            Some("open")
        );
    }

    #[test]
    fn column_visibility_toggles_in_memory_only() {
        let mut c = controller();
        assert!(c.is_column_visible("title"));
        c.toggle_column("title");
        assert!(!c.is_column_visible("title"));
        c.toggle_column("title");
        assert!(c.is_column_visible("title"));
    }
}
