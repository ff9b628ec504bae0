//! Table State
//!
//! Everything one screen remembers between events: rows, query,
//! selection, open overlay, collapsed tree rows.

use std::collections::{BTreeMap, BTreeSet};

use crate::api::{ApiResult, QueryParams, SortOrder};
use crate::form::FormValues;
use crate::models::{ListPage, Record, RecordId, TreeNode};
use crate::screens::{FormSpec, ScreenSpec};
use crate::tree::{build_tree_by, flatten_tree, TreeRow, TreeSpec};

/// The one modal/drawer a screen may show at a time
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Overlay {
    #[default]
    Closed,
    CreateForm,
    ChildForm {
        parent_id: RecordId,
    },
    UpdateForm(Record),
    AssignMenus(Record),
    Detail(Record),
    ConfirmDelete(RecordId),
}

/// Open create/update form, if any
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingForm<'a> {
    Create,
    CreateChild(RecordId),
    Update(&'a Record),
}

/// Coarse screen phase, derived from state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Listing,
    HasSelection,
}

/// Checked rows keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection(BTreeMap<RecordId, Record>);

impl Selection {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.0.keys().copied().collect()
    }

    /// Returns whether the row is selected afterwards
    pub fn toggle(&mut self, record: &Record) -> bool {
        let Some(id) = record.id() else {
            return false;
        };
        if self.0.remove(&id).is_some() {
            false
        } else {
            self.0.insert(id, record.clone());
            true
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    fn select_all<'a>(&mut self, records: impl IntoIterator<Item = &'a Record>) {
        for record in records {
            if let Some(id) = record.id() {
                self.0.insert(id, record.clone());
            }
        }
    }

    /// Keep only ids present in `records`, refreshed to their new values
    fn retain_listed(&mut self, records: &[Record]) {
        let kept = records
            .iter()
            .filter_map(|record| Some((record.id()?, record)))
            .filter(|(id, _)| self.0.contains_key(id))
            .map(|(id, record)| (id, record.clone()))
            .collect();
        self.0 = kept;
    }

    fn unselect_all<'a>(&mut self, records: impl IntoIterator<Item = &'a Record>) {
        for id in records.into_iter().filter_map(Record::id) {
            self.0.remove(&id);
        }
    }
}

/// A list request in flight
#[derive(Debug, Clone, PartialEq)]
pub struct QueryTicket {
    pub seq: u64,
    pub params: QueryParams,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    /// Rows of the current page, in server order
    pub rows: Vec<Record>,
    /// Hierarchy built from `rows` on tree screens
    pub forest: Vec<TreeNode>,
    pub total: u64,
    pub query: QueryParams,
    /// Page size used after a reset
    pub default_page_size: Option<u32>,
    pub selection: Selection,
    pub overlay: Overlay,
    pub collapsed: BTreeSet<RecordId>,
    pub loading: bool,
    pub load_failed: bool,
    queried: bool,
    latest_seq: u64,
}

impl TableState {
    pub fn new(default_page_size: Option<u32>) -> Self {
        Self {
            query: QueryParams::first_page(default_page_size),
            default_page_size,
            ..Default::default()
        }
    }

    pub fn for_screen(spec: &ScreenSpec, default_page_size: u32) -> Self {
        Self::new(spec.paging.page_size(default_page_size))
    }

    pub fn phase(&self) -> Phase {
        if !self.queried {
            Phase::Idle
        } else if self.selection.is_empty() {
            Phase::Listing
        } else {
            Phase::HasSelection
        }
    }

    /// Footer bar for batch actions shows only with a selection
    pub fn footer_visible(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn page_count(&self) -> u32 {
        match self.query.page_size {
            Some(size) if size > 0 => self.total.div_ceil(size as u64).max(1) as u32,
            _ => 1,
        }
    }

    // ========================
    // Query lifecycle
    // ========================

    /// Record a new request; only its response may land from now on
    pub fn begin_query(&mut self, params: QueryParams) -> QueryTicket {
        self.latest_seq += 1;
        self.query = params.clone();
        self.loading = true;
        QueryTicket {
            seq: self.latest_seq,
            params,
        }
    }

    /// Apply a response; stale ones are ignored. Returns whether applied.
    pub fn finish_query(
        &mut self,
        seq: u64,
        result: ApiResult<ListPage>,
        tree: Option<&TreeSpec>,
    ) -> bool {
        if seq != self.latest_seq {
            return false;
        }
        self.loading = false;
        self.queried = true;
        match result {
            Ok(page) => {
                self.total = page.total();
                self.forest = tree.map(|spec| build_tree_by(&page.list, spec)).unwrap_or_default();
                self.rows = page.list;
                self.selection.retain_listed(&self.rows);
                self.load_failed = false;
            }
            Err(_) => self.load_failed = true,
        }
        true
    }

    /// Drop page, sort and filter state; keep nothing from the old query
    pub fn reset_query(&mut self) -> QueryParams {
        self.query = QueryParams::first_page(self.default_page_size);
        self.query.clone()
    }

    /// Rows in display order, indented when the screen is a tree
    pub fn display_rows(&self, is_tree: bool) -> Vec<TreeRow> {
        if is_tree {
            flatten_tree(&self.forest, &self.collapsed)
        } else {
            self.rows
                .iter()
                .map(|record| TreeRow {
                    record: record.clone(),
                    depth: 0,
                    has_children: false,
                })
                .collect()
        }
    }

    pub fn toggle_collapsed(&mut self, id: RecordId) {
        if !self.collapsed.remove(&id) {
            self.collapsed.insert(id);
        }
    }

    /// Search form submit: new fields, back to page one, keep sort
    pub fn search_params(&self, fields: serde_json::Map<String, serde_json::Value>) -> QueryParams {
        QueryParams {
            fields,
            current: self.default_page_size.map(|_| 1),
            ..self.query.clone()
        }
    }

    /// Search box contents matching the active filters
    pub fn search_text(&self) -> BTreeMap<String, String> {
        self.query
            .fields
            .iter()
            .map(|(name, value)| {
                let text = match value {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (name.clone(), text)
            })
            .collect()
    }

    /// Header click on a sortable column; single-column sort
    pub fn sort_params(&self, field: &str) -> QueryParams {
        let next = SortOrder::cycle(self.query.sorter.get(field).copied());
        let mut params = self.query.clone();
        params.sorter.clear();
        if let Some(order) = next {
            params.sorter.insert(field.to_string(), order);
        }
        params
    }

    pub fn page_params(&self, page: u32) -> QueryParams {
        let mut params = self.query.clone();
        if params.page_size.is_some() {
            params.current = Some(page.clamp(1, self.page_count()));
        }
        params
    }

    // ========================
    // Selection
    // ========================

    pub fn all_selected(&self) -> bool {
        let mut ids = self.rows.iter().filter_map(Record::id).peekable();
        ids.peek().is_some() && ids.all(|id| self.selection.contains(id))
    }

    /// Header check box: select every row on the page, or none
    pub fn toggle_all(&mut self) {
        if self.all_selected() {
            self.selection.unselect_all(&self.rows);
        } else {
            self.selection.select_all(&self.rows);
        }
    }

    // ========================
    // Overlays
    // ========================

    pub fn open(&mut self, overlay: Overlay) {
        self.overlay = overlay;
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::Closed;
    }

    pub fn pending_form(&self) -> Option<PendingForm<'_>> {
        match &self.overlay {
            Overlay::CreateForm => Some(PendingForm::Create),
            Overlay::ChildForm { parent_id } => Some(PendingForm::CreateChild(*parent_id)),
            Overlay::UpdateForm(record) => Some(PendingForm::Update(record)),
            _ => None,
        }
    }

    /// Id awaiting delete confirmation
    pub fn pending_delete(&self) -> Option<RecordId> {
        match self.overlay {
            Overlay::ConfirmDelete(id) => Some(id),
            _ => None,
        }
    }
}

/// Which remote call a form submit maps to
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Add(Record),
    Update(Record),
}

/// Form spec and starting values for the open form
pub fn form_for<'s>(spec: &'s ScreenSpec, pending: PendingForm<'_>) -> Option<&'s FormSpec> {
    match pending {
        PendingForm::Create => spec.create_form.as_ref(),
        PendingForm::CreateChild(_) => spec.child_form.as_ref(),
        PendingForm::Update(_) => spec.update_form.as_ref(),
    }
}

/// Shape validated form values into the payload for the open form
pub fn prepare_submission(spec: &ScreenSpec, pending: PendingForm<'_>, values: Record) -> Option<Submission> {
    let form = form_for(spec, pending)?;
    match pending {
        PendingForm::Create => Some(Submission::Add(values)),
        PendingForm::CreateChild(parent_id) => {
            let parent_key = spec
                .tree
                .as_ref()
                .map(|t| t.parent_key.as_str())
                .unwrap_or("parent_id");
            let mut payload = values;
            payload.insert(parent_key, parent_id);
            Some(Submission::Add(payload))
        }
        PendingForm::Update(original) => {
            let mut payload = original.clone();
            payload.merge(values);
            if let Some(id) = original.id() {
                payload.insert("id", id);
            }
            if let Some(keys) = form.submit_fields {
                payload = payload.project(keys);
                if let Some(id) = original.id() {
                    payload.insert("id", id);
                }
            }
            Some(Submission::Update(payload))
        }
    }
}

/// Raw values to prefill the open form with
pub fn form_values_for(spec: &ScreenSpec, pending: PendingForm<'_>) -> FormValues {
    let record = match pending {
        PendingForm::Update(record) => Some(record),
        _ => None,
    };
    form_for(spec, pending)
        .map(|form| crate::form::initial_values(form, record))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::screens::ScreenKey;
    use serde_json::json;

    fn page(ids: &[i64]) -> ListPage {
        ListPage {
            list: ids.iter().map(|id| Record::new().with("id", *id)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut state = TableState::new(Some(10));
        let first = state.begin_query(QueryParams::first_page(Some(10)));
        let second = state.begin_query(state.page_params(2));

        assert!(state.finish_query(second.seq, Ok(page(&[11, 12])), None));
        assert!(!state.finish_query(first.seq, Ok(page(&[1, 2])), None));

        let ids: Vec<i64> = state.rows.iter().filter_map(Record::id).collect();
        assert_eq!(ids, vec![11, 12]);
        assert!(!state.loading);
    }

    #[test]
    fn test_failed_query_keeps_rows() {
        let mut state = TableState::new(None);
        let t = state.begin_query(QueryParams::default());
        state.finish_query(t.seq, Ok(page(&[1])), None);

        let t = state.begin_query(QueryParams::default());
        state.finish_query(t.seq, Err(ApiError::Status(500)), None);

        assert_eq!(state.rows.len(), 1);
        assert!(state.load_failed);
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = TableState::new(None);
        assert_eq!(state.phase(), Phase::Idle);

        let t = state.begin_query(QueryParams::default());
        state.finish_query(t.seq, Ok(page(&[1, 2])), None);
        assert_eq!(state.phase(), Phase::Listing);
        assert!(!state.footer_visible());

        let row = state.rows[0].clone();
        assert!(state.selection.toggle(&row));
        assert_eq!(state.phase(), Phase::HasSelection);
        assert!(state.footer_visible());

        assert!(!state.selection.toggle(&row));
        assert_eq!(state.phase(), Phase::Listing);
    }

    #[test]
    fn test_toggle_all() {
        let mut state = TableState::new(None);
        let t = state.begin_query(QueryParams::default());
        state.finish_query(t.seq, Ok(page(&[1, 2, 3])), None);

        state.toggle_all();
        assert_eq!(state.selection.ids(), vec![1, 2, 3]);
        assert!(state.all_selected());

        state.toggle_all();
        assert!(state.selection.is_empty());
    }

    #[test]
    fn test_query_keeps_only_listed_selection() {
        let mut state = TableState::new(None);
        let t = state.begin_query(QueryParams::default());
        state.finish_query(t.seq, Ok(page(&[1, 2, 3])), None);
        state.toggle_all();

        let t = state.begin_query(QueryParams::default());
        state.finish_query(t.seq, Ok(page(&[2, 3, 4])), None);

        assert_eq!(state.selection.ids(), vec![2, 3]);
        assert!(!state.all_selected());

        let t = state.begin_query(QueryParams::default());
        state.finish_query(t.seq, Ok(page(&[7])), None);
        assert!(state.selection.is_empty());
        assert!(!state.footer_visible());
    }

    #[test]
    fn test_tree_rows_and_collapse() {
        let mut state = TableState::new(None);
        let list = vec![
            Record::new().with("id", 1).with("parent_id", 0),
            Record::new().with("id", 2).with("parent_id", 1),
            Record::new().with("id", 3).with("parent_id", 42),
        ];
        let t = state.begin_query(QueryParams::default());
        state.finish_query(t.seq, Ok(ListPage { list, ..Default::default() }), Some(&TreeSpec::new(0, "parent_id")));

        let shown: Vec<(i64, usize)> = state
            .display_rows(true)
            .iter()
            .map(|r| (r.record.id().unwrap(), r.depth))
            .collect();
        assert_eq!(shown, vec![(1, 0), (2, 1)]);

        state.toggle_collapsed(1);
        assert_eq!(state.display_rows(true).len(), 1);
        state.toggle_collapsed(1);
        assert_eq!(state.display_rows(true).len(), 2);

        // Flat view ignores the hierarchy
        assert_eq!(state.display_rows(false).len(), 3);
    }

    #[test]
    fn test_sort_search_and_page_params() {
        let mut state = TableState::new(Some(10));
        state.total = 35;

        let sorted = state.sort_params("create_time");
        assert_eq!(sorted.sorter.get("create_time"), Some(&SortOrder::Ascend));
        state.query = sorted;
        let sorted = state.sort_params("create_time");
        assert_eq!(sorted.sorter.get("create_time"), Some(&SortOrder::Descend));
        state.query = sorted;
        assert!(state.sort_params("create_time").sorter.is_empty());
        assert_eq!(state.sort_params("name").sorter.len(), 1);

        assert_eq!(state.page_count(), 4);
        assert_eq!(state.page_params(9).current, Some(4));
        assert_eq!(state.page_params(0).current, Some(1));

        state.query.current = Some(3);
        let mut fields = serde_json::Map::new();
        fields.insert("name".into(), json!("admin"));
        let search = state.search_params(fields);
        assert_eq!(search.current, Some(1));
        assert_eq!(search.sorter, state.query.sorter);
        assert_eq!(search.fields.get("name"), Some(&json!("admin")));
    }

    #[test]
    fn test_reset_query_discards_everything() {
        let mut state = TableState::new(Some(20));
        state.query = state.sort_params("create_time");
        state.query.current = Some(5);
        state.query.fields.insert("name".into(), json!("x"));

        let params = state.reset_query();

        assert_eq!(params, QueryParams::first_page(Some(20)));
        assert_eq!(state.query, params);
    }

    #[test]
    fn test_search_text_follows_query() {
        let mut state = TableState::new(Some(20));
        let mut fields = serde_json::Map::new();
        fields.insert("name".into(), json!("admin"));
        fields.insert("status".into(), json!(1));
        state.query = state.search_params(fields);

        let text = state.search_text();
        assert_eq!(text.get("name").map(String::as_str), Some("admin"));
        assert_eq!(text.get("status").map(String::as_str), Some("1"));

        state.reset_query();
        assert!(state.search_text().is_empty());
    }

    #[test]
    fn test_overlays_are_exclusive() {
        let mut state = TableState::new(None);
        let record = Record::new().with("id", 4);

        state.open(Overlay::UpdateForm(record.clone()));
        assert_eq!(state.pending_form(), Some(PendingForm::Update(&record)));

        state.open(Overlay::Detail(record));
        assert_eq!(state.pending_form(), None);

        state.open(Overlay::ConfirmDelete(4));
        assert_eq!(state.pending_delete(), Some(4));

        state.close_overlay();
        assert_eq!(state.overlay, Overlay::Closed);
    }

    #[test]
    fn test_prepare_child_submission_sets_parent() {
        let spec = ScreenKey::Menu.spec();
        let values = Record::new().with("name", "用户管理");

        let submission = prepare_submission(&spec, PendingForm::CreateChild(3), values).unwrap();

        assert_eq!(
            submission,
            Submission::Add(Record::new().with("name", "用户管理").with("parent_id", 3))
        );
    }

    #[test]
    fn test_prepare_update_submission_whitelists_fields() {
        let spec = ScreenKey::Role.spec();
        let original = Record::new()
            .with("id", 2)
            .with("name", "旧名")
            .with("remark", "旧备注内容")
            .with("create_by", "admin");
        let values = Record::new().with("id", 2).with("name", "新名").with("remark", "新的备注内容");

        let submission = prepare_submission(&spec, PendingForm::Update(&original), values).unwrap();

        let Submission::Update(payload) = submission else {
            panic!("expected update");
        };
        assert_eq!(payload.into_value(), json!({"id": 2, "name": "新名", "remark": "新的备注内容"}));
    }

    #[test]
    fn test_prepare_update_without_whitelist_keeps_original_fields() {
        let spec = ScreenKey::Coupon.spec();
        let original = Record::new().with("id", 9).with("name", "a").with("useCount", 3);

        let submission =
            prepare_submission(&spec, PendingForm::Update(&original), Record::new().with("name", "b")).unwrap();

        assert_eq!(
            submission,
            Submission::Update(Record::new().with("id", 9).with("name", "b").with("useCount", 3))
        );
    }

    #[test]
    fn test_no_form_no_submission() {
        let spec = ScreenKey::MemberAddress.spec();

        assert_eq!(prepare_submission(&spec, PendingForm::Create, Record::new()), None);
    }
}
