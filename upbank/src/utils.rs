use unicode_segmentation::UnicodeSegmentation;
use url::Url;

use crate::error::{Result, UpError};

/// Variation selector that requests emoji presentation.
const EMOJI_PRESENTATION_SELECTOR: char = '\u{FE0F}';

/// Split a leading emoji off a display name.
///
/// The first extended grapheme cluster counts as an emoji when its first
/// scalar has the `Emoji_Presentation` property, or when it is a multi-scalar
/// cluster carrying U+FE0F. Returns `(emoji, remainder)`; the remainder is not
/// trimmed, so the two always concatenate back to `name`.
pub fn split_leading_emoji(name: &str) -> (Option<&str>, &str) {
    let Some(first) = name.graphemes(true).next() else {
        return (None, name);
    };
    if is_emoji_grapheme(first) {
        (Some(first), &name[first.len()..])
    } else {
        (None, name)
    }
}

fn is_emoji_grapheme(grapheme: &str) -> bool {
    let mut scalars = grapheme.chars();
    let Some(lead) = scalars.next() else {
        return false;
    };
    if unic_emoji_char::is_emoji_presentation(lead) {
        return true;
    }
    grapheme.chars().count() > 1 && grapheme.contains(EMOJI_PRESENTATION_SELECTOR)
}

/// Parse an absolute `http(s)` URL.
///
/// # Errors
///
/// Returns `UpError::InvalidUrl` for relative, malformed, or non-HTTP URLs.
pub fn parse_absolute_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| UpError::invalid_url(raw, e))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        scheme => Err(UpError::invalid_url(
            raw,
            format!("unsupported scheme or missing host ({scheme})"),
        )),
    }
}
