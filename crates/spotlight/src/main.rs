use dioxus::prelude::*;
use spotlight_flow::{Candidate, FlowConfig, Selection, Status};
use spotlight_io::controller::{self, SelectionSignal};
use spotlight_io::page;
use spotlight_io::{FileUpload, ImagePreview, NoticeBanner, ResultsPanel, StatusBadge};

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the page's single [`Selection`] and the [`FlowConfig`], and
/// wires the upload zone, preview card, results panel, and notice
/// banner to the upload flow controller. The upload zone stays mounted
/// in every status, so a new file can replace a finished result.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let config = use_context_provider(FlowConfig::default);
    let selection: SelectionSignal = use_signal(Selection::new);

    // --- Handlers ---
    let screen_config = config.clone();
    let on_candidate = move |candidate: Candidate| -> bool {
        controller::screen(selection, &candidate, &screen_config)
    };

    let accept_config = config.clone();
    let on_file = move |(candidate, bytes): (Candidate, Vec<u8>)| {
        controller::accept(selection, candidate, bytes, &accept_config);
    };

    let submit_config = config.clone();
    let on_analyze = move |()| controller::submit(selection, &submit_config);
    let on_remove = move |()| controller::clear(selection);
    let on_reset = move |()| controller::reset(selection);
    let on_dismiss = move |id: u64| controller::dismiss(selection, id);

    let error_config = config.clone();
    let on_error = move |message: String| controller::report(selection, &message, &error_config);

    use_hook(|| {
        if let Err(e) = page::suppress_default_drops() {
            tracing::warn!(error = %e, "page-wide drop guard not installed");
        }
    });

    // --- Snapshot for rendering ---
    let (status, preview, result, notice) = {
        let current = selection.read();
        let preview = current
            .preview()
            .zip(current.file())
            .map(|(url, file)| (url.as_str().to_owned(), file.name.clone(), file.len()));
        (
            current.status(),
            preview,
            current.result().cloned(),
            current.notice().cloned(),
        )
    };

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/style.css") }

        div { class: "page",
            header { class: "page__header",
                h1 { class: "page__title", "spotlight" }
                p { class: "page__subtitle",
                    "Upload an image to run object detection on it"
                }
                StatusBadge { status }
            }

            main { class: "page__main",
                for notice in notice {
                    NoticeBanner { key: "{notice.id}", notice: notice.clone(), on_dismiss }
                }

                FileUpload {
                    on_candidate,
                    on_file,
                    on_error,
                    max_file_bytes: config.max_file_bytes,
                }

                if let Some(ref result) = result {
                    ResultsPanel { result: result.clone(), on_reset }
                } else {
                    for (src, name, size) in preview {
                        ImagePreview {
                            key: "{src}",
                            src: src.clone(),
                            name: name.clone(),
                            size: u64::try_from(size).unwrap_or(u64::MAX),
                            submitting: status == Status::Submitting,
                            on_remove,
                            on_analyze: on_analyze.clone(),
                        }
                    }
                }
            }
        }
    }
}
