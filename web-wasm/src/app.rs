//! Main application component

use leptos::prelude::*;
use leptos::task::spawn_local;
use gloo::timers::callback::Timeout;
use web_sys::File;
use thalassemia_common::{PredictOutcome, UploadSession};
use crate::api::backend;
use crate::components::{
    header::Header,
    result_dialog::ResultDialog,
    review_form::ReviewForm,
    toast::Toast,
    upload_area::UploadArea,
};

/// Browser `File` handles are not `Send`, so the session lives in local storage.
pub type Session = RwSignal<UploadSession<File>, LocalStorage>;

const TOAST_DURATION_MS: u32 = 4_000;

#[component]
pub fn App() -> impl IntoView {
    let session: Session = RwSignal::new_local(UploadSession::new());
    let (dialog, set_dialog) = signal(None::<PredictOutcome>);
    let (toast, set_toast) = signal(None::<String>);

    let show_toast = move |message: &str| {
        set_toast.set(Some(message.to_string()));
        Timeout::new(TOAST_DURATION_MS, move || set_toast.set(None)).forget();
    };

    // Upload handler
    let on_upload = move || {
        let mut file = None;
        session.update(|s| {
            if s.begin_upload().is_ok() {
                file = s.selected_file().cloned();
            }
        });
        let Some(file) = file else { return };

        spawn_local(async move {
            let result = backend::upload_report(&file).await;
            if let Err(err) = &result {
                gloo::console::error!("upload failed", err.clone());
            }
            session.update(|s| {
                s.complete_upload(result);
            });
        });
    };

    // Detect handler
    let on_predict = move || {
        let mut parameters = None;
        session.update(|s| parameters = Some(s.begin_predict()));
        let Some(parameters) = parameters else { return };

        spawn_local(async move {
            let result = backend::predict_report(&parameters).await;
            if let Err(err) = &result {
                gloo::console::error!("prediction failed", err.clone());
            }
            let mut outcome = PredictOutcome::Failed;
            session.update(|s| outcome = s.complete_predict(result));

            if let Some(message) = outcome.toast() {
                show_toast(message);
            } else if outcome.dialog().is_some() {
                set_dialog.set(Some(outcome));
            }
        });
    };

    let reviewing = move || session.with(|s| s.view_mode().is_review());

    view! {
        <div class="container">
            <Header />
            <Toast message=toast />

            <Show
                when=reviewing
                fallback=move || view! { <UploadArea session=session on_upload=on_upload /> }
            >
                <ReviewForm session=session on_predict=on_predict />
            </Show>

            <ResultDialog outcome=dialog set_outcome=set_dialog />
        </div>
    }
}
