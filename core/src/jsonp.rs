//! JSONP framing for read requests.

use uuid::Uuid;

use crate::error::ApiError;

/// A fresh callback name, unique per request.
pub fn callback_name() -> String {
    format!("discussion_{}", Uuid::new_v4().simple())
}

/// Strip `callback( ... )` (and an optional trailing `;`) from a JSONP body,
/// returning the JSON text inside.
pub fn unwrap<'a>(body: &'a str, callback: &str) -> Result<&'a str, ApiError> {
    let trimmed = body.trim();
    let inner = trimmed
        .strip_prefix(callback)
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('('))
        .map(|rest| rest.trim_end().trim_end_matches(';').trim_end())
        .and_then(|rest| rest.strip_suffix(')'));

    match inner {
        Some(json) => Ok(json.trim()),
        None => {
            tracing::warn!(callback, "response was not wrapped in the JSONP callback");
            Err(ApiError::Jsonp(format!("expected a call to {callback}")))
        }
    }
}
