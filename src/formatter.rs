//! Identifier formatting for bulk endpoints.
//!
//! Zendesk bulk endpoints take their ids as a comma-separated `ids` query
//! parameter and reject more than 100 of them. The limit is checked here so
//! an oversized batch never costs a round trip.

use std::fmt::Display;

use crate::error::ZendeskError;

/// Maximum number of ids a single bulk call accepts.
pub const MAX_BULK_IDS: usize = 100;

/// Renders ids as a comma-separated list in iteration order.
///
/// # Errors
///
/// Returns `ZendeskError::Validation` if `ids` is empty or holds more than
/// [`MAX_BULK_IDS`] elements.
///
/// # Example
///
/// ```
/// use zendesk_api::formatter::to_csv;
///
/// assert_eq!(to_csv(&[1, 2, 3]).unwrap(), "1,2,3");
/// assert!(to_csv::<u64>(&[]).is_err());
/// ```
pub fn to_csv<T: Display>(ids: &[T]) -> Result<String, ZendeskError> {
    if ids.is_empty() || ids.len() > MAX_BULK_IDS {
        return Err(ZendeskError::validation(format!(
            "ids must have between 1 and {} elements, got {}",
            MAX_BULK_IDS,
            ids.len()
        )));
    }

    let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
    Ok(rendered.join(","))
}
