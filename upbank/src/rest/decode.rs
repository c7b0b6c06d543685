//! Decoding of response envelopes.

use serde::Deserialize;

use super::RawResponse;
use crate::error::{Result, UpError};
use crate::types::{Page, Resource};

/// Longest slice of a non-JSON error body kept in an error message.
const MAX_ERROR_BODY: usize = 200;

/// Error document returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorDocument {
    errors: Vec<ErrorObject>,
}

#[derive(Debug, Deserialize)]
struct ErrorObject {
    title: Option<String>,
    detail: Option<String>,
}

/// Decode one page of `R` from a response.
///
/// Non-2xx statuses fail with `UpError::Http` without looking at the body as
/// a page.
pub fn decode_page<R: Resource>(raw: &RawResponse) -> Result<Page<R>> {
    if !raw.is_success() {
        return Err(UpError::Http {
            status: raw.status,
            message: error_message(&raw.body),
        });
    }
    serde_json::from_slice::<Page<R>>(&raw.body)
        .map_err(|e| UpError::decode(format!("{} page", R::COLLECTION), e))
}

fn error_message(body: &[u8]) -> String {
    if let Ok(doc) = serde_json::from_slice::<ErrorDocument>(body) {
        let parts: Vec<String> = doc
            .errors
            .into_iter()
            .filter_map(|e| match (e.title, e.detail) {
                (Some(t), Some(d)) => Some(format!("{t}: {d}")),
                (Some(t), None) => Some(t),
                (None, d) => d,
            })
            .collect();
        if !parts.is_empty() {
            return parts.join("; ");
        }
    }
    let text = String::from_utf8_lossy(body);
    text.chars().take(MAX_ERROR_BODY).collect()
}
