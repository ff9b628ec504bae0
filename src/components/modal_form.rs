//! Modal Form Component
//!
//! Create/update form rendered from a [`FormSpec`]. Values are validated
//! locally; only a valid record reaches `on_submit`.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::form::{error_for, validate, FieldError, FormValues};
use crate::models::Record;
use crate::screens::{FieldKind, FormField, FormSpec};

#[component]
pub fn ModalForm(
    #[prop(into)] title: String,
    form: FormSpec,
    /// Starting values, including hidden fields such as `id`
    initial: FormValues,
    #[prop(into)] on_submit: Callback<Record>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let values = RwSignal::new(initial);
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let visible_fields: Vec<FormField> = form
        .fields
        .iter()
        .filter(|field| field.kind != FieldKind::Hidden)
        .cloned()
        .collect();
    let form = StoredValue::new(form);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let checked = form.with_value(|form| values.with_untracked(|values| validate(form, values)));
        match checked {
            Ok(record) => {
                errors.set(Vec::new());
                on_submit.run(record);
            }
            Err(found) => {
                log::debug!("[FORM] {} invalid field(s)", found.len());
                errors.set(found);
            }
        }
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="modal form-modal" on:click=|ev| ev.stop_propagation()>
                <h3 class="modal-title">{title}</h3>
                <form class="modal-form" on:submit=submit>
                    {visible_fields
                        .into_iter()
                        .map(|field| field_view(field, values, errors))
                        .collect_view()}
                    <div class="modal-actions">
                        <button type="button" class="cancel-btn" on:click=move |_| on_cancel.run(())>
                            "取消"
                        </button>
                        <button type="submit" class="confirm-btn">"提交"</button>
                    </div>
                </form>
            </div>
        </div>
    }
}

fn field_view(field: FormField, values: RwSignal<FormValues>, errors: RwSignal<Vec<FieldError>>) -> impl IntoView {
    let name = field.name;
    let value = move || values.with(|v| v.get(name).cloned().unwrap_or_default());
    let set_value = move |text: String| {
        values.update(|v| {
            v.insert(name.to_string(), text);
        });
    };
    let error = move || errors.with(|e| error_for(e, name).map(str::to_string));

    let input = match field.kind {
        FieldKind::TextArea => view! {
            <textarea
                name=name
                prop:value=value
                on:input=move |ev| set_value(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Select(options) => view! {
            <select
                name=name
                prop:value=value
                on:change=move |ev| set_value(event_target_value(&ev))
            >
                <option value="">"请选择"</option>
                {options
                    .iter()
                    .map(|(option, label)| view! { <option value=*option>{*label}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::Radio(options) => view! {
            <span class="radio-group">
                {options
                    .iter()
                    .map(|(option, label)| {
                        let option = *option;
                        view! {
                            <label class="radio">
                                <input
                                    type="radio"
                                    name=name
                                    value=option
                                    prop:checked=move || value() == option
                                    on:change=move |_| set_value(option.to_string())
                                />
                                {*label}
                            </label>
                        }
                    })
                    .collect_view()}
            </span>
        }
        .into_any(),
        FieldKind::Text | FieldKind::Hidden => view! {
            <input
                type="text"
                name=name
                prop:value=value
                on:input=move |ev| set_value(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class=move || if error().is_some() { "form-item has-error" } else { "form-item" }>
            <label class="form-label">
                {field.required.map(|_| view! { <span class="required">"*"</span> })}
                {field.label}
            </label>
            {input}
            {move || error().map(|message| view! { <div class="field-error">{message}</div> })}
        </div>
    }
}
