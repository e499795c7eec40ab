//! Error toast

use leptos::prelude::*;

#[component]
pub fn Toast(message: ReadSignal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="toast toast-error" role="alert">
                {move || message.get().unwrap_or_default()}
            </div>
        </Show>
    }
}
