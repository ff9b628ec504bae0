//! CRUD Table Component
//!
//! Generic list screen: search form, sortable paged table (or indented
//! tree), row actions, batch toolbar and whichever overlay is open.

use std::collections::BTreeMap;
use std::future::Future;

use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{Map, Value};

use crate::api::SortOrder;
use crate::components::{ConfirmModal, DetailDrawer, FooterToolbar, ModalForm, RoleMenuForm};
use crate::context::{use_app_context, ScreenController};
use crate::controller::{form_for, form_values_for, Overlay, TableState};
use crate::feedback::{DELETE_CONFIRM_CONTENT, DELETE_CONFIRM_TITLE};
use crate::models::{Record, RecordId};
use crate::screens::{Column, ScreenSpec};
use crate::tree::TreeRow;

/// Pixels of indent per tree level
const INDENT_PX: usize = 20;

/// Run an async controller action from an event handler
fn spawn_with<F, Fut>(controller: StoredValue<ScreenController>, action: F)
where
    F: FnOnce(ScreenController) -> Fut,
    Fut: Future + 'static,
{
    let pending = action(controller.get_value());
    spawn_local(async move {
        pending.await;
    });
}

/// Table screen for one entity
#[component]
pub fn CrudTable(spec: ScreenSpec) -> impl IntoView {
    let ctx = use_app_context();
    let controller = ctx.controller_for(&spec);
    let state = *controller.state();
    let is_tree = controller.is_tree();
    let controller = StoredValue::new(controller);

    let header_title = spec.header_title;
    let has_create = spec.create_form.is_some();
    let search_columns: Vec<Column> = if spec.search_form {
        spec.search_columns().cloned().collect()
    } else {
        Vec::new()
    };
    let columns: Vec<Column> = spec.table_columns().cloned().collect();
    let colspan = (columns.len() + 2).to_string();
    let spec = StoredValue::new(spec);

    // Initial load
    Effect::new(move |_| {
        spawn_with(controller, |c| async move { c.reload_and_reset().await });
    });

    // ========================
    // Search form
    // ========================
    let search_values = RwSignal::new(BTreeMap::<String, String>::new());

    // Inputs follow the committed filters, so a reset from anywhere clears them
    let committed = Memo::new(move |_| state.with(|s| s.search_text()));
    Effect::new(move |_| search_values.set(committed.get()));

    let on_search = move |ev: SubmitEvent| {
        ev.prevent_default();
        let fields: Map<String, Value> = search_values.with_untracked(|values| {
            values
                .iter()
                .filter(|(_, text)| !text.trim().is_empty())
                .map(|(name, text)| (name.clone(), Value::String(text.trim().to_string())))
                .collect()
        });
        spawn_with(controller, move |c| async move { c.search(fields).await });
    };

    let on_reset = move |_: MouseEvent| {
        search_values.set(BTreeMap::new());
        spawn_with(controller, |c| async move { c.reload_and_reset().await });
    };

    let search_form = (!search_columns.is_empty()).then(|| {
        view! {
            <form class="search-form" on:submit=on_search>
                {search_columns
                    .iter()
                    .map(|column| {
                        let name = column.data_index;
                        view! {
                            <label class="search-field">
                                <span>{column.title}</span>
                                <input
                                    type="text"
                                    prop:value=move || {
                                        search_values.with(|v| v.get(name).cloned().unwrap_or_default())
                                    }
                                    on:input=move |ev| {
                                        search_values.update(|v| {
                                            v.insert(name.to_string(), event_target_value(&ev));
                                        });
                                    }
                                />
                            </label>
                        }
                    })
                    .collect_view()}
                <button type="submit">"查询"</button>
                <button type="button" on:click=on_reset>"重置"</button>
            </form>
        }
    });

    // ========================
    // Table
    // ========================
    let header_cells = columns
        .iter()
        .map(|column| header_cell(column, state, controller))
        .collect_view();
    let columns = StoredValue::new(columns);

    let pager = move || {
        state.with(|s| {
            s.query
                .page_size
                .map(|_| (s.query.current.unwrap_or(1), s.page_count(), s.total))
        })
    };

    let empty_text = move || {
        state.with(|s| {
            (s.rows.is_empty() && !s.loading).then_some(if s.load_failed { "加载失败" } else { "暂无数据" })
        })
    };

    let overlay = Memo::new(move |_| state.with(|s| s.overlay.clone()));

    view! {
        <section class="crud-table">
            <header class="page-header">
                <h2>{header_title}</h2>
            </header>

            {search_form}

            <div class="table-toolbar">
                {has_create.then(|| view! {
                    <button class="primary" on:click=move |_| controller.with_value(|c| c.open_create())>
                        "新建"
                    </button>
                })}
                <button on:click=move |_| spawn_with(controller, |c| async move { c.reload().await })>
                    "刷新"
                </button>
                <Show when=move || state.with(|s| s.loading)>
                    <span class="table-loading">"加载中..."</span>
                </Show>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th class="select-col">
                            <input
                                type="checkbox"
                                prop:checked=move || state.with(TableState::all_selected)
                                on:change=move |_| controller.with_value(|c| c.toggle_all())
                            />
                        </th>
                        {header_cells}
                        <th>"操作"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || state.with(|s| s.display_rows(is_tree))
                        key=|row: &TreeRow| {
                            (
                                row.record.id(),
                                row.depth,
                                serde_json::to_string(&row.record).unwrap_or_default(),
                            )
                        }
                        children=move |row: TreeRow| {
                            columns.with_value(|columns| {
                                row_view(row, columns, is_tree, spec, state, controller)
                            })
                        }
                    />
                    {move || empty_text().map(|text| view! {
                        <tr class="empty-row">
                            <td colspan=colspan.clone()>{text}</td>
                        </tr>
                    })}
                </tbody>
            </table>

            {move || pager().map(|(current, pages, total)| view! {
                <div class="pager">
                    <span>{format!("共 {} 条", total)}</span>
                    <button
                        disabled=current <= 1
                        on:click=move |_| {
                            spawn_with(controller, move |c| async move { c.go_to_page(current.saturating_sub(1)).await })
                        }
                    >
                        "上一页"
                    </button>
                    <span>{format!("{} / {}", current, pages)}</span>
                    <button
                        disabled=current >= pages
                        on:click=move |_| {
                            spawn_with(controller, move |c| async move { c.go_to_page(current + 1).await })
                        }
                    >
                        "下一页"
                    </button>
                </div>
            })}

            <Show when=move || state.with(TableState::footer_visible)>
                <FooterToolbar
                    count=Signal::derive(move || state.with(|s| s.selection.len()))
                    on_batch_delete=move |_| {
                        spawn_with(controller, |c| async move { c.batch_delete().await })
                    }
                    on_clear=move |_| controller.with_value(|c| c.clear_selection())
                />
            </Show>

            {move || overlay_view(overlay.get(), spec, state, controller)}
        </section>
    }
}

fn header_cell(
    column: &Column,
    state: RwSignal<TableState>,
    controller: StoredValue<ScreenController>,
) -> AnyView {
    if !column.sortable {
        return view! { <th>{column.title}</th> }.into_any();
    }

    let field = column.data_index;
    let indicator = move || match state.with(|s| s.query.sorter.get(field).copied()) {
        Some(SortOrder::Ascend) => " ↑",
        Some(SortOrder::Descend) => " ↓",
        None => "",
    };
    view! {
        <th
            class="sortable"
            on:click=move |_| spawn_with(controller, move |c| async move { c.sort_by(field).await })
        >
            {column.title}
            {indicator}
        </th>
    }
    .into_any()
}

fn row_view(
    row: TreeRow,
    columns: &[Column],
    is_tree: bool,
    spec: StoredValue<ScreenSpec>,
    state: RwSignal<TableState>,
    controller: StoredValue<ScreenController>,
) -> impl IntoView {
    let record = row.record;
    let id = record.id();
    let selected = move || id.is_some_and(|id| state.with(|s| s.selection.contains(id)));
    let (has_update, has_child, has_assign) =
        spec.with_value(|s| (s.update_form.is_some(), s.child_form.is_some(), s.assign_menus));

    let cells = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let tree_cell = is_tree && index == 0;
            let style = if tree_cell {
                format!("padding-left: {}px", row.depth * INDENT_PX)
            } else {
                String::new()
            };
            let toggle = match id {
                Some(id) if tree_cell && row.has_children => {
                    let collapsed = move || state.with(|s| s.collapsed.contains(&id));
                    Some(view! {
                        <button
                            class="tree-toggle"
                            on:click=move |_| controller.with_value(|c| c.toggle_collapsed(id))
                        >
                            {move || if collapsed() { "▸" } else { "▾" }}
                        </button>
                    })
                }
                _ => None,
            };
            let text = column.render(&record);
            let content = if column.opens_detail {
                let record = record.clone();
                view! {
                    <a class="detail-link" on:click=move |_| controller.with_value(|c| c.open_detail(record.clone()))>
                        {text}
                    </a>
                }
                .into_any()
            } else {
                view! { <span>{text}</span> }.into_any()
            };
            view! { <td style=style>{toggle}{content}</td> }
        })
        .collect_view();

    let edit = has_update.then(|| {
        let record = record.clone();
        view! {
            <button class="link-btn" on:click=move |_| controller.with_value(|c| c.open_update(record.clone()))>
                "编辑"
            </button>
        }
    });
    let add_child = id.filter(|_| has_child).map(|id| {
        view! {
            <button class="link-btn" on:click=move |_| controller.with_value(|c| c.open_create_child(id))>
                "添加子菜单"
            </button>
        }
    });
    let assign = has_assign.then(|| {
        let record = record.clone();
        view! {
            <button
                class="link-btn"
                on:click=move |_| controller.with_value(|c| c.open_assign_menus(record.clone()))
            >
                "分配菜单"
            </button>
        }
    });
    let delete = id.map(|id| {
        view! {
            <button class="link-btn danger" on:click=move |_| controller.with_value(|c| c.request_delete(id))>
                "删除"
            </button>
        }
    });

    view! {
        <tr class=move || if selected() { "selected" } else { "" }>
            <td class="select-col">
                <input
                    type="checkbox"
                    prop:checked=selected
                    on:change=move |_| controller.with_value(|c| c.toggle_row(&record))
                />
            </td>
            {cells}
            <td class="row-actions">{edit}{add_child}{assign}{delete}</td>
        </tr>
    }
}

fn overlay_view(
    overlay: Overlay,
    spec: StoredValue<ScreenSpec>,
    state: RwSignal<TableState>,
    controller: StoredValue<ScreenController>,
) -> AnyView {
    let close = Callback::new(move |_: ()| controller.with_value(|c| c.close_overlay()));

    match overlay {
        Overlay::Closed => ().into_any(),
        Overlay::Detail(record) => {
            let (title, columns) = spec.with_value(|s| {
                (record.text(s.title_field).unwrap_or_default(), s.columns.clone())
            });
            view! { <DetailDrawer title=title columns=columns record=record on_close=close /> }.into_any()
        }
        Overlay::ConfirmDelete(_) => view! {
            <ConfirmModal
                title=DELETE_CONFIRM_TITLE
                content=DELETE_CONFIRM_CONTENT
                on_confirm=move |_| spawn_with(controller, |c| async move { c.confirm_delete().await })
                on_cancel=move |_| controller.with_value(|c| c.cancel_delete())
            />
        }
        .into_any(),
        Overlay::AssignMenus(role) => {
            let role_id = role.id();
            let on_submit = Callback::new(move |menu_ids: Vec<RecordId>| {
                if let Some(role_id) = role_id {
                    spawn_with(controller, move |c| async move {
                        c.assign_menus(role_id, menu_ids).await
                    });
                }
            });
            view! { <RoleMenuForm role=role on_submit=on_submit on_cancel=close /> }.into_any()
        }
        Overlay::CreateForm | Overlay::ChildForm { .. } | Overlay::UpdateForm(_) => {
            form_overlay(spec, state, controller, close)
        }
    }
}

fn form_overlay(
    spec: StoredValue<ScreenSpec>,
    state: RwSignal<TableState>,
    controller: StoredValue<ScreenController>,
    close: Callback<()>,
) -> AnyView {
    let prepared = state.with_untracked(|s| {
        let pending = s.pending_form()?;
        spec.with_value(|sp| {
            let form = form_for(sp, pending)?.clone();
            Some((form, form_values_for(sp, pending)))
        })
    });
    let Some((form, initial)) = prepared else {
        return ().into_any();
    };

    let on_submit = move |values: Record| {
        let spec = spec.get_value();
        spawn_with(controller, move |c| async move { c.submit_form(&spec, values).await });
    };

    let title = form.title;
    view! {
        <ModalForm title=title form=form initial=initial on_submit=on_submit on_cancel=close />
    }
    .into_any()
}
