//! Status badge.

use dioxus::prelude::*;
use spotlight_flow::Status;

/// A small pill showing the selection's status.
#[component]
pub fn StatusBadge(status: Status) -> Element {
    let modifier = match status {
        Status::Idle | Status::PreviewReady => "badge--neutral",
        Status::Submitting => "badge--busy",
        Status::Success => "badge--success",
        Status::Error => "badge--error",
    };

    rsx! {
        span { class: "badge {modifier}", "{status}" }
    }
}
