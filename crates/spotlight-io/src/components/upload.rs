//! File upload zone with drag-and-drop and file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use spotlight_flow::{ByteSize, Candidate};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// Asked whether a file may be read. Returning `false` drops it.
    on_candidate: Callback<Candidate, bool>,
    /// Called with the candidate and its bytes once it has been read.
    on_file: EventHandler<(Candidate, Vec<u8>)>,
    /// Called with a message when an accepted file cannot be read.
    on_error: EventHandler<String>,
    /// Size limit shown in the hint.
    max_file_bytes: u64,
}

/// A drag-and-drop zone that also opens the file picker when clicked.
///
/// Only the first file of a pick or drop is used. Its name, MIME type,
/// and size are screened through `on_candidate` before the bytes are
/// read, so rejected files are never loaded. The picker is cleared after
/// each pick so the same file can be chosen again.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut picker = use_signal(|| Option::<HtmlInputElement>::None);

    // Shared by the picker (`handle_files`) and drop (`handle_drop`) paths.
    let process_files = move |files: Vec<FileData>| async move {
        let Some(file) = files.into_iter().next() else {
            return;
        };
        let candidate = Candidate::new(
            file.name(),
            file.content_type().unwrap_or_default(),
            file.size(),
        );
        if !props.on_candidate.call(candidate.clone()) {
            return;
        }
        match file.read_bytes().await {
            Ok(bytes) => props.on_file.call((candidate, bytes.to_vec())),
            Err(e) => props.on_error.call(format!("Failed to read file: {e}")),
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
        if let Some(input) = &*picker.peek() {
            input.set_value("");
        }
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let limit = ByteSize(props.max_file_bytes);
    let zone_class = if dragging() {
        "upload-zone upload-zone--dragover"
    } else {
        "upload-zone"
    };

    rsx! {
        label {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            input {
                r#type: "file",
                accept: "image/*",
                class: "visually-hidden",
                onchange: handle_files,
                onmounted: move |evt: MountedEvent| {
                    let input = evt
                        .data()
                        .downcast::<web_sys::Element>()
                        .and_then(|el| el.dyn_ref::<HtmlInputElement>().cloned());
                    picker.set(input);
                },
            }

            div { class: "upload-zone__icon", "⇪" }
            p { class: "upload-zone__title", "Drop an image here or click to browse" }
            p { class: "upload-zone__hint", "PNG, JPEG, WebP and other images up to {limit}" }
        }
    }
}
