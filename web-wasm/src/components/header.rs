//! Header component

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1 class="page-title">"Thalassemia Detection"</h1>
        </header>
    }
}
