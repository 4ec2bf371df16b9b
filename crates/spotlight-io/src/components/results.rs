//! Before/after images and statistics of a finished analysis.

use dioxus::prelude::*;
use spotlight_flow::{ANALYSIS_COMPLETE, AnalysisResult, StatCard};

/// Props for the [`ResultsPanel`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ResultsPanelProps {
    /// The analysis to show. Image references are already cache-busted.
    result: AnalysisResult,
    /// Called by the "Analyze another" button.
    on_reset: EventHandler<()>,
}

/// Side-by-side original and annotated images, followed by one card per
/// statistic (or a neutral placeholder when there are none).
#[component]
pub fn ResultsPanel(props: ResultsPanelProps) -> Element {
    let result = props.result;

    rsx! {
        section { class: "card results", onmounted: super::reveal,
            div { class: "results__grid",
                ResultImage {
                    key: "{result.uploaded_image}",
                    title: "Original",
                    src: result.uploaded_image.clone(),
                    alt: "Uploaded Image",
                }
                ResultImage {
                    key: "{result.result_image}",
                    title: "Detected",
                    src: result.result_image.clone(),
                    alt: "Detected Result",
                }
            }

            if result.stats.is_empty() {
                p { class: "results__placeholder", "{ANALYSIS_COMPLETE}" }
            } else {
                div { class: "results__stats",
                    for card in result.stats.iter() {
                        StatTile { key: "{card.label}", card: card.clone() }
                    }
                }
            }

            button {
                class: "btn btn--secondary",
                r#type: "button",
                onclick: move |_| props.on_reset.call(()),
                "Analyze another image"
            }
        }
    }
}

/// One image of the before/after pair, faded in once loaded.
///
/// Keyed by its (cache-busted) source, so every new result mounts a
/// fresh instance that starts hidden.
#[component]
fn ResultImage(title: &'static str, src: String, alt: &'static str) -> Element {
    let mut loaded = use_signal(|| false);
    let class = if loaded() {
        "results__image results__image--loaded"
    } else {
        "results__image"
    };

    rsx! {
        figure { class: "results__figure",
            figcaption { class: "results__caption", "{title}" }
            img {
                class: "{class}",
                src: "{src}",
                alt: "{alt}",
                onload: move |_| loaded.set(true),
            }
        }
    }
}

/// A single label/value statistic card.
#[component]
fn StatTile(card: StatCard) -> Element {
    rsx! {
        div { class: "stat",
            div { class: "stat__label", "{card.label}" }
            div { class: "stat__value", "{card.value}" }
        }
    }
}
