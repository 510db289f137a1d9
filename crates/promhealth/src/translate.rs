//! HTTP status to plugin status translation.

use crate::types::{ExitLevel, ProbeResult, TranslatedStatus};
use tracing::debug;

/// Map an HTTP status code onto a plugin exit level.
///
/// Only 2xx is OK. Client and server errors are both CRITICAL, anything else
/// (1xx, unfollowed 3xx, out-of-range codes) is UNKNOWN. WARNING is never
/// produced.
pub fn level_for_status(status_code: u16) -> ExitLevel {
    match status_code {
        200..=299 => ExitLevel::Ok,
        400..=499 => ExitLevel::Critical,
        500..=599 => ExitLevel::Critical,
        _ => ExitLevel::Unknown,
    }
}

/// Translate a probe response into the plugin's level and output line.
///
/// The body is appended verbatim after `<LEVEL> - `; it is not inspected for
/// the "Healthy"/"Ready" phrase.
pub fn translate(probe: ProbeResult) -> TranslatedStatus {
    let level = level_for_status(probe.status_code);
    debug!(status = probe.status_code, level = %level, "Translated probe response");

    TranslatedStatus {
        level,
        output: format!("{} - {}", level, probe.body),
    }
}
