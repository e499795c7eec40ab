//! Report chooser: drag & drop zone, file picker, and the Upload button

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, HtmlInputElement};
use thalassemia_common::api::ACCEPTED_FILE_TYPES;
use thalassemia_common::session::WAIT_MESSAGE;
use crate::app::Session;

const INPUT_ID: &str = "blood-report";

/// Picker and drop share this. Returns false while a call is in flight.
fn select_report(session: Session, file: File) -> bool {
    let name = file.name();
    let mut selected = false;
    session.update(|s| selected = s.select_file(file, name));
    selected
}

#[component]
pub fn UploadArea<F>(session: Session, on_upload: F) -> impl IntoView
where
    F: Fn() + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let loading = move || session.with(|s| s.is_loading());

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
        if loading() {
            return;
        }
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            select_report(session, file);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_change = move |ev: web_sys::Event| {
        if loading() {
            return;
        }
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            select_report(session, file);
        }
        // Picking the same file again should still fire `change`
        input.set_value("");
    };

    let on_remove = move |_| session.update(|s| s.remove_file());

    view! {
        <div class="chooser">
            <div
                class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=on_dragleave
            >
                <p class="upload-title">"Upload Blood Report"</p>
                <p class="text-muted">"Drag & Drop your PDF Report File Here"</p>
                <small class="text-muted">"or"</small>

                <input
                    type="file"
                    accept=ACCEPTED_FILE_TYPES
                    id=INPUT_ID
                    hidden=true
                    disabled=loading
                    on:change=on_change
                />
                <label for=INPUT_ID class="choose-file">"Choose File"</label>

                {move || session.with(|s| s.error_message().map(str::to_string)).map(|message| view! {
                    <p class="error-text">{message}</p>
                })}

                {move || session.with(|s| s.selected_file_name().map(str::to_string)).map(|name| view! {
                    <div class="selected-file">
                        <p class="file-name">{name}</p>
                        <Show when=move || !loading()>
                            <button class="btn-link" on:click=on_remove>"Remove"</button>
                        </Show>
                    </div>
                })}
            </div>

            <button
                class="btn-filled"
                disabled=loading
                on:click={
                    let on_upload = on_upload.clone();
                    move |_| on_upload()
                }
            >
                {move || if loading() { "Uploading..." } else { "Upload" }}
            </button>

            <Show when=loading>
                <h4 class="wait-hint">{WAIT_MESSAGE}</h4>
            </Show>
        </div>
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use thalassemia_common::{FormData, UploadSession, ViewMode};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn report(name: &str) -> File {
        let bits = js_sys::Array::of1(&JsValue::from_str("%PDF-1.4"));
        File::new_with_str_sequence(&bits, name).expect("File construction failed")
    }

    #[wasm_bindgen_test]
    fn wasm_select_report_ignored_while_uploading() {
        let session: Session = RwSignal::new_local(UploadSession::new());
        assert!(select_report(session, report("a.pdf")));
        session.update(|s| s.begin_upload().expect("file is selected"));

        assert!(!select_report(session, report("b.pdf")));
        assert_eq!(
            session.with_untracked(|s| s.selected_file_name().map(str::to_string)),
            Some("a.pdf".to_string())
        );

        let from_a: FormData = [("Name", "from-a")].into_iter().collect();
        session.update(|s| {
            s.complete_upload::<()>(Ok(from_a));
        });
        session.with_untracked(|s| {
            assert_eq!(s.view_mode(), ViewMode::Review);
            assert_eq!(s.selected_file().map(|f| f.name()), Some("a.pdf".to_string()));
        });
    }

    #[wasm_bindgen_test]
    fn wasm_select_report_replaces_file_when_idle() {
        let session: Session = RwSignal::new_local(UploadSession::new());
        assert!(select_report(session, report("a.pdf")));
        assert!(select_report(session, report("b.pdf")));
        assert_eq!(
            session.with_untracked(|s| s.selected_file_name().map(str::to_string)),
            Some("b.pdf".to_string())
        );
    }
}
