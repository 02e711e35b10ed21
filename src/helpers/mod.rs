//! Display helpers shared by the CLI commands

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use tracing::warn;

/// Format applied when the configured one cannot be parsed
pub const DEFAULT_DATE_FORMAT: &str = "%d %b %Y";

/// Format a publication date with the configured format string.
///
/// A format string chrono cannot parse degrades to
/// [`DEFAULT_DATE_FORMAT`] with a warning; rendering never fails.
pub fn format_date(date: &DateTime<Utc>, format: &str) -> String {
    let valid = StrftimeItems::new(format).all(|item| !matches!(item, Item::Error));
    if valid {
        date.format(format).to_string()
    } else {
        warn!(
            "Invalid date_format '{}', falling back to '{}'",
            format, DEFAULT_DATE_FORMAT
        );
        date.format(DEFAULT_DATE_FORMAT).to_string()
    }
}
