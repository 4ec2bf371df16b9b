//! Local preview of the chosen image with remove and analyze actions.

use dioxus::prelude::*;
use spotlight_flow::ByteSize;

/// Props for the [`ImagePreview`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImagePreviewProps {
    /// `blob:` URL of the chosen image.
    src: String,
    /// File name shown under the image.
    name: String,
    /// File size in bytes.
    size: u64,
    /// Whether a submission is in flight. Disables both actions.
    submitting: bool,
    on_remove: EventHandler<()>,
    on_analyze: EventHandler<()>,
}

/// Shows the chosen image before upload.
///
/// The analyze button is the only submission control; it is disabled
/// and shows a spinner while a request is in flight.
#[component]
pub fn ImagePreview(props: ImagePreviewProps) -> Element {
    let size = ByteSize(props.size);
    let submitting = props.submitting;

    rsx! {
        section { class: "card preview", onmounted: super::reveal,
            div { class: "preview__frame",
                img { class: "preview__image", src: "{props.src}", alt: "Selected image" }
                button {
                    class: "preview__remove",
                    r#type: "button",
                    title: "Remove image",
                    aria_label: "Remove image",
                    disabled: submitting,
                    onclick: move |_| props.on_remove.call(()),
                    "×"
                }
            }
            p { class: "preview__meta", "{props.name} · {size}" }

            button {
                class: "btn btn--primary",
                r#type: "button",
                disabled: submitting,
                onclick: move |_| props.on_analyze.call(()),
                if submitting {
                    span { class: "spinner" }
                    "Analyzing..."
                } else {
                    "Detect Objects"
                }
            }
        }
    }
}
