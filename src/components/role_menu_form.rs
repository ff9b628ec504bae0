//! Role Menu Form Component
//!
//! Checkbox tree of all menus for assigning them to one role. Checking a
//! menu checks its whole subtree.

use std::collections::BTreeSet;

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

use crate::api::QueryParams;
use crate::context::use_app_context;
use crate::models::{Record, RecordId, TreeNode};
use crate::screens::ScreenKey;
use crate::tree::{build_tree_by, flatten_tree, subtree_ids, TreeRow, TreeSpec};

/// Menu ids the role already holds, when the row carries them
fn assigned_menu_ids(role: &Record) -> BTreeSet<RecordId> {
    role.get("menu_ids")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default()
}

fn toggle_subtree(checked: &mut BTreeSet<RecordId>, forest: &[TreeNode], id: RecordId) {
    let ids = subtree_ids(forest, id);
    if checked.contains(&id) {
        for id in &ids {
            checked.remove(id);
        }
    } else {
        checked.extend(ids);
    }
}

#[component]
pub fn RoleMenuForm(
    role: Record,
    /// Receives the checked menu ids
    #[prop(into)]
    on_submit: Callback<Vec<RecordId>>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let menus = RwSignal::new(Vec::<TreeNode>::new());
    let loaded = RwSignal::new(false);
    let checked = RwSignal::new(assigned_menu_ids(&role));
    let title = format!("分配菜单 - {}", role.text("name").unwrap_or_default());

    let menu_spec = ScreenKey::Menu.spec();
    let tree_spec = menu_spec
        .tree
        .clone()
        .unwrap_or_else(|| TreeSpec::new(0, "parent_id"))
        .sorted_by("order_num");
    let source = ctx.source_for(&menu_spec);
    spawn_local(async move {
        match source.list(&QueryParams::default()).await {
            Ok(page) => {
                log::debug!("[ROLE] loaded {} menus", page.list.len());
                menus.set(build_tree_by(&page.list, &tree_spec));
            }
            Err(err) => log::error!("[ROLE] loading menus failed: {}", err),
        }
        loaded.set(true);
    });

    let rows = move || menus.with(|forest| flatten_tree(forest, &BTreeSet::new()));

    view! {
        <div class="modal-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="modal role-menu-modal" on:click=|ev| ev.stop_propagation()>
                <h3 class="modal-title">{title}</h3>
                <Show when=move || loaded.get() fallback=|| view! { <p class="loading">"加载中..."</p> }>
                    <ul class="menu-tree">
                        <For
                            each=rows
                            key=|row: &TreeRow| (row.record.id(), row.depth)
                            children=move |row: TreeRow| {
                                let id = row.record.id();
                                let name = row.record.text("name").unwrap_or_default();
                                let indent = format!("padding-left: {}px", row.depth * 20);
                                view! {
                                    <li style=indent>
                                        <label>
                                            <input
                                                type="checkbox"
                                                disabled=id.is_none()
                                                prop:checked=move || {
                                                    id.is_some_and(|id| checked.with(|c| c.contains(&id)))
                                                }
                                                on:change=move |_| {
                                                    if let Some(id) = id {
                                                        let forest = menus.get_untracked();
                                                        checked.update(|c| toggle_subtree(c, &forest, id));
                                                    }
                                                }
                                            />
                                            {name}
                                        </label>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
                <div class="modal-actions">
                    <button class="cancel-btn" on:click=move |_| on_cancel.run(())>"取消"</button>
                    <button
                        class="confirm-btn"
                        on:click=move |_| on_submit.run(checked.get_untracked().into_iter().collect())
                    >
                        "提交"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_tree;
    use serde_json::json;

    #[test]
    fn test_assigned_menu_ids() {
        let role = Record::new().with("id", 1).with("menu_ids", json!([3, 1, "x"]));
        assert_eq!(assigned_menu_ids(&role), BTreeSet::from([1, 3]));
        assert!(assigned_menu_ids(&Record::new().with("id", 1)).is_empty());
    }

    #[test]
    fn test_toggle_subtree() {
        let records = vec![
            Record::new().with("id", 1).with("parent_id", 0),
            Record::new().with("id", 2).with("parent_id", 1),
            Record::new().with("id", 3).with("parent_id", 0),
        ];
        let forest = build_tree(&records, 0, "parent_id");
        let mut checked = BTreeSet::new();

        toggle_subtree(&mut checked, &forest, 1);
        assert_eq!(checked, BTreeSet::from([1, 2]));

        toggle_subtree(&mut checked, &forest, 1);
        assert!(checked.is_empty());
    }
}
