//! Review & update extracted parameters
//!
//! One text input per extracted key, in extraction order. Every keystroke goes
//! through the field validator and its message is shown under the input.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::HtmlInputElement;
use crate::app::Session;

#[component]
pub fn ReviewForm<F>(session: Session, on_predict: F) -> impl IntoView
where
    F: Fn() + 'static + Clone + Send + Sync,
{
    let loading = move || session.with(|s| s.is_loading());
    let field_names = move || {
        session.with(|s| s.form().data().keys().map(str::to_string).collect::<Vec<_>>())
    };

    view! {
        <div class="review">
            <h4 class="review-title">"Review & Update Extracted Parameters"</h4>
            <form class="review-grid" on:submit=|ev| ev.prevent_default()>
                <Show
                    when=move || !field_names().is_empty()
                    fallback=|| view! { <p>"No parameters extracted."</p> }
                >
                    <For
                        each=field_names
                        key=|name| name.clone()
                        children=move |name| view! { <FieldInput session=session name=name /> }
                    />
                </Show>
            </form>

            <div class="review-actions">
                <button
                    type="button"
                    class="btn-outlined"
                    disabled=loading
                    on:click={
                        let on_predict = on_predict.clone();
                        move |_| on_predict()
                    }
                >
                    {move || if loading() { "Detecting..." } else { "Detect" }}
                </button>
                <button
                    type="reset"
                    class="btn-cancel"
                    disabled=loading
                    on:click=move |_| session.update(|s| s.rollback())
                >
                    "Cancel"
                </button>
            </div>
        </div>
    }
}

#[component]
fn FieldInput(session: Session, name: String) -> impl IntoView {
    let value_key = name.clone();
    let error_key = name.clone();
    let change_key = name.clone();

    let on_input = move |ev: web_sys::Event| {
        if let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        {
            let value = input.value();
            session.update(|s| s.form_mut().on_field_change(&change_key, &value));
        }
    };

    view! {
        <div class="field">
            <label for=name.clone() class="field-label">
                {name.clone()} <span class="required">"*"</span>
            </label>
            <input
                type="text"
                id=name.clone()
                placeholder=format!("Enter {}", name)
                prop:value=move || session.with(|s| s.form().data().value(&value_key).to_string())
                disabled=move || session.with(|s| s.is_loading())
                on:input=on_input
            />
            {move || session
                .with(|s| s.form().error(&error_key).map(str::to_string))
                .map(|message| view! { <small class="field-error">{message}</small> })}
        </div>
    }
}
