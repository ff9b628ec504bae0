//! Detail Drawer Component
//!
//! Read-only side panel listing every column of one record.

use leptos::prelude::*;

use crate::models::Record;
use crate::screens::Column;

#[component]
pub fn DetailDrawer(
    #[prop(into)] title: String,
    columns: Vec<Column>,
    record: Record,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="drawer-backdrop" on:click=move |_| on_close.run(())>
            <aside class="drawer" on:click=|ev| ev.stop_propagation()>
                <header class="drawer-header">
                    <h3>{title}</h3>
                    <button class="close-btn" on:click=move |_| on_close.run(())>"×"</button>
                </header>
                <dl class="descriptions">
                    {columns
                        .iter()
                        .map(|column| view! {
                            <dt>{column.title}</dt>
                            <dd>{column.render(&record)}</dd>
                        })
                        .collect_view()}
                </dl>
            </aside>
        </div>
    }
}
