//! Prediction result dialog
//!
//! The session is already rolled back when this opens; the outcome only
//! lives here until the dialog is closed.

use leptos::prelude::*;
use thalassemia_common::PredictOutcome;

#[component]
pub fn ResultDialog(
    outcome: ReadSignal<Option<PredictOutcome>>,
    set_outcome: WriteSignal<Option<PredictOutcome>>,
) -> impl IntoView {
    let content = move || outcome.get().and_then(|o| o.dialog().map(|d| (o, d)));

    view! {
        {move || content().map(|(o, (title, text))| {
            let class = match o {
                PredictOutcome::Normal => "dialog dialog-success",
                _ => "dialog dialog-info",
            };
            view! {
                <div class="dialog-backdrop">
                    <div class=class role="dialog">
                        <h2>{title}</h2>
                        <p>{text}</p>
                        <button class="btn-filled" on:click=move |_| set_outcome.set(None)>
                            "OK"
                        </button>
                    </div>
                </div>
            }
        })}
    }
}
