//! CRUD Table Controller
//!
//! Drives one entity screen: querying, selection, overlays, and the
//! feedback-wrapped mutations. State lives behind [`StateHandle`] so the
//! same logic runs against a Leptos signal or a plain cell in tests.

mod state;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::{RwSignal, Update, WithUntracked};
use serde_json::{json, Map, Value};

use crate::api::{QueryParams, RemoteSource};
use crate::feedback::{with_feedback, Notifier, Operation};
use crate::models::{Record, RecordId};
use crate::screens::ScreenSpec;
use crate::tree::TreeSpec;

pub use state::{
    form_for, form_values_for, prepare_submission, Overlay, PendingForm, Phase, Submission, TableState,
};

/// Action name of the role -> menus assignment endpoint
pub const ASSIGN_MENUS_ACTION: &str = "updateRoleMenu";

/// Access to a screen's [`TableState`]
///
/// Both methods return `None` once the owner is gone.
pub trait StateHandle: Clone {
    fn update<R>(&self, f: impl FnOnce(&mut TableState) -> R) -> Option<R>;
    fn read<R>(&self, f: impl FnOnce(&TableState) -> R) -> Option<R>;
}

impl StateHandle for RwSignal<TableState> {
    fn update<R>(&self, f: impl FnOnce(&mut TableState) -> R) -> Option<R> {
        self.try_update(f)
    }

    fn read<R>(&self, f: impl FnOnce(&TableState) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }
}

impl StateHandle for Rc<RefCell<TableState>> {
    fn update<R>(&self, f: impl FnOnce(&mut TableState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }

    fn read<R>(&self, f: impl FnOnce(&TableState) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}

#[derive(Clone)]
pub struct CrudController<N, H> {
    source: Arc<dyn RemoteSource>,
    notifier: N,
    state: H,
    tree: Option<TreeSpec>,
}

impl<N, H> CrudController<N, H>
where
    N: Notifier + Clone,
    H: StateHandle,
{
    pub fn new(source: Arc<dyn RemoteSource>, notifier: N, state: H, tree: Option<TreeSpec>) -> Self {
        Self {
            source,
            notifier,
            state,
            tree,
        }
    }

    pub fn state(&self) -> &H {
        &self.state
    }

    pub fn is_tree(&self) -> bool {
        self.tree.is_some()
    }

    // ========================
    // Listing
    // ========================

    /// Issue a list request. Returns whether its response was applied.
    pub async fn query(&self, params: QueryParams) -> bool {
        let Some(ticket) = self.state.update(|s| s.begin_query(params)) else {
            return false;
        };
        log::debug!("[TABLE] query #{} {}", ticket.seq, ticket.params.to_body());

        let result = self.source.list(&ticket.params).await;
        if let Err(err) = &result {
            log::error!("[TABLE] query #{} failed: {}", ticket.seq, err);
        }

        let tree = self.tree.as_ref();
        let applied = self
            .state
            .update(|s| s.finish_query(ticket.seq, result, tree))
            .unwrap_or(false);
        if !applied {
            log::debug!("[TABLE] query #{} superseded", ticket.seq);
        }
        applied
    }

    /// Re-run the current query as is
    pub async fn reload(&self) -> bool {
        match self.state.read(|s| s.query.clone()) {
            Some(params) => self.query(params).await,
            None => false,
        }
    }

    /// Clear selection, drop page/sort/filter, query again
    pub async fn reload_and_reset(&self) -> bool {
        let Some(params) = self.state.update(|s| {
            s.selection.clear();
            s.reset_query()
        }) else {
            return false;
        };
        self.query(params).await
    }

    pub async fn search(&self, fields: Map<String, Value>) -> bool {
        match self.state.read(|s| s.search_params(fields)) {
            Some(params) => self.query(params).await,
            None => false,
        }
    }

    pub async fn sort_by(&self, field: &str) -> bool {
        match self.state.read(|s| s.sort_params(field)) {
            Some(params) => self.query(params).await,
            None => false,
        }
    }

    pub async fn go_to_page(&self, page: u32) -> bool {
        match self.state.read(|s| s.page_params(page)) {
            Some(params) => self.query(params).await,
            None => false,
        }
    }

    // ========================
    // Overlays
    // ========================

    pub fn open_create(&self) {
        self.state.update(|s| s.open(Overlay::CreateForm));
    }

    pub fn open_create_child(&self, parent_id: RecordId) {
        self.state.update(|s| s.open(Overlay::ChildForm { parent_id }));
    }

    pub fn open_update(&self, record: Record) {
        self.state.update(|s| s.open(Overlay::UpdateForm(record)));
    }

    pub fn open_assign_menus(&self, record: Record) {
        self.state.update(|s| s.open(Overlay::AssignMenus(record)));
    }

    pub fn open_detail(&self, record: Record) {
        self.state.update(|s| s.open(Overlay::Detail(record)));
    }

    /// Cancel whatever is open; nothing is sent
    pub fn close_overlay(&self) {
        self.state.update(TableState::close_overlay);
    }

    // ========================
    // Mutations
    // ========================

    /// Send a prepared form payload. On success the form closes and the
    /// list resets; on failure the form stays open.
    pub async fn submit(&self, submission: Submission) -> bool {
        let ok = match &submission {
            Submission::Add(record) => with_feedback(&self.notifier, Operation::Add, self.source.add(record)).await,
            Submission::Update(record) => {
                with_feedback(&self.notifier, Operation::Update, self.source.update(record)).await
            }
        };
        if ok {
            self.after_mutation().await;
        }
        ok
    }

    /// Shape validated values for whichever form is open, then send them.
    /// Returns false without a call when no form is open.
    pub async fn submit_form(&self, spec: &ScreenSpec, values: Record) -> bool {
        let submission = self
            .state
            .read(|s| s.pending_form().and_then(|pending| prepare_submission(spec, pending, values)))
            .flatten();
        match submission {
            Some(submission) => self.submit(submission).await,
            None => false,
        }
    }

    /// Ask before deleting one row
    pub fn request_delete(&self, id: RecordId) {
        self.state.update(|s| s.open(Overlay::ConfirmDelete(id)));
    }

    /// Declined: close the dialog, no call
    pub fn cancel_delete(&self) {
        self.state.update(|s| {
            if s.pending_delete().is_some() {
                s.close_overlay();
            }
        });
    }

    /// Confirmed: delete the row the dialog was opened for
    pub async fn confirm_delete(&self) -> bool {
        let id = self.state.update(|s| {
            let id = s.pending_delete();
            if id.is_some() {
                s.close_overlay();
            }
            id
        });
        let Some(id) = id.flatten() else {
            return false;
        };

        let ok = with_feedback(&self.notifier, Operation::Delete, self.source.delete_one(id)).await;
        if ok {
            self.after_mutation().await;
        }
        ok
    }

    /// Delete every selected row. No call at all with an empty selection.
    pub async fn batch_delete(&self) -> bool {
        let ids = self.state.read(|s| s.selection.ids()).unwrap_or_default();
        if ids.is_empty() {
            return false;
        }

        let ok = with_feedback(&self.notifier, Operation::Delete, self.source.delete_many(&ids)).await;
        if ok {
            self.after_mutation().await;
        }
        ok
    }

    /// Replace a role's menus
    pub async fn assign_menus(&self, role_id: RecordId, menu_ids: Vec<RecordId>) -> bool {
        let body = json!({ "role_id": role_id, "menu_ids": menu_ids });
        let ok = with_feedback(
            &self.notifier,
            Operation::AssignMenus,
            self.source.call(ASSIGN_MENUS_ACTION, body),
        )
        .await;
        if ok {
            self.after_mutation().await;
        }
        ok
    }

    async fn after_mutation(&self) {
        self.state.update(TableState::close_overlay);
        self.reload_and_reset().await;
    }

    // ========================
    // Selection & tree rows
    // ========================

    pub fn toggle_row(&self, record: &Record) {
        self.state.update(|s| s.selection.toggle(record));
    }

    pub fn toggle_all(&self) {
        self.state.update(TableState::toggle_all);
    }

    pub fn clear_selection(&self) {
        self.state.update(|s| s.selection.clear());
    }

    pub fn toggle_collapsed(&self, id: RecordId) {
        self.state.update(|s| s.toggle_collapsed(id));
    }
}
