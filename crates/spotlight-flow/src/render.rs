//! Render-time helpers: cache-busting and the clock behind it.

use web_time::{SystemTime, UNIX_EPOCH};

/// Query parameter carrying the cache-busting stamp.
pub const CACHE_BUST_PARAM: &str = "t";

/// Append `t=<stamp>` to an image reference so the browser refetches it
/// even when the server reuses the filename.
///
/// Uses `&` when the reference already has a query string, and keeps
/// any `#fragment` at the end.
#[must_use]
pub fn cache_bust(reference: &str, stamp: u64) -> String {
    let (base, fragment) = reference
        .split_once('#')
        .map_or((reference, None), |(base, frag)| (base, Some(frag)));
    let separator = if base.contains('?') { '&' } else { '?' };
    let mut busted = format!("{base}{separator}{CACHE_BUST_PARAM}={stamp}");
    if let Some(fragment) = fragment {
        busted.push('#');
        busted.push_str(fragment);
    }
    busted
}

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// Uses `performance`/`Date` in the browser via `web-time`. Returns 0 if
/// the clock reads before the epoch.
#[must_use]
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
