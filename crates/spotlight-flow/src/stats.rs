//! Formatting of server-supplied statistics into display cards.

use serde_json::{Map, Value};

use crate::types::StatCard;

/// Turn an internal statistic key into a display label.
///
/// Underscores become spaces, then the first letter of every word is
/// upper-cased: `confidence_score` → `Confidence Score`. A word starts
/// at any ASCII letter or digit not preceded by one, so `f1-score`
/// becomes `F1-Score`. The rest of the key is left as is.
#[must_use]
pub fn humanize_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut in_word = false;
    for c in key.chars() {
        let c = if c == '_' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric();
        if is_word && !in_word {
            label.push(c.to_ascii_uppercase());
        } else {
            label.push(c);
        }
        in_word = is_word;
    }
    label
}

/// Render a statistic value for display.
///
/// Strings are shown without quotes; numbers, booleans, `null`, and
/// nested values use their JSON text.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build display cards from a `stats` object, ordered by key.
#[must_use]
pub fn stat_cards(stats: &Map<String, Value>) -> Vec<StatCard> {
    let mut entries: Vec<_> = stats.iter().collect();
    entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
    entries
        .into_iter()
        .map(|(key, value)| StatCard {
            label: humanize_label(key),
            value: display_value(value),
        })
        .collect()
}
