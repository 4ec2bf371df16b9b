//! Dismissible error banner.

use dioxus::prelude::*;
use spotlight_flow::Notice;

/// Props for the [`NoticeBanner`] component.
#[derive(Props, Clone, PartialEq)]
pub struct NoticeBannerProps {
    /// The notice to show.
    notice: Notice,
    /// Called with the notice id when the close button is pressed.
    on_dismiss: EventHandler<u64>,
}

/// Shows a notice with a close button, scrolled into view on mount.
///
/// Auto-dismissal is driven by the controller's timer; this component
/// only renders and forwards manual dismissals. Key it by the notice id
/// so a superseding notice mounts afresh.
#[component]
pub fn NoticeBanner(props: NoticeBannerProps) -> Element {
    let notice = props.notice;
    let id = notice.id;

    rsx! {
        div { class: "notice", role: "alert", onmounted: super::reveal,
            span { class: "notice__icon", "!" }
            p { class: "notice__text", "{notice.message}" }
            button {
                class: "notice__close",
                r#type: "button",
                aria_label: "Dismiss",
                onclick: move |_| props.on_dismiss.call(id),
                "×"
            }
        }
    }
}
