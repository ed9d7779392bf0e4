//! Body decoding by the charset announced in `Content-Type`.

use std::borrow::Cow;

/// Decodes `body` as text.
///
/// UTF-8 (also the default when no charset is given) and the single-byte
/// Latin-1 family are decoded exactly. Any other charset falls back to lossy
/// UTF-8; use the raw bytes when that matters.
pub fn decode<'a>(body: &'a [u8], charset: Option<&str>) -> Cow<'a, str> {
    let Some(cs) = charset.map(|c| c.trim_matches('"')) else {
        return String::from_utf8_lossy(body);
    };
    if is_utf8(cs) {
        return String::from_utf8_lossy(body);
    }
    if is_latin1(cs) {
        // Latin-1 bytes map 1:1 onto U+0000..U+00FF.
        return Cow::Owned(body.iter().map(|&b| char::from(b)).collect());
    }
    tracing::debug!("unsupported charset {:?}, decoding body as UTF-8", cs);
    String::from_utf8_lossy(body)
}

fn is_utf8(cs: &str) -> bool {
    cs.eq_ignore_ascii_case("utf-8") || cs.eq_ignore_ascii_case("utf8")
}

fn is_latin1(cs: &str) -> bool {
    ["iso-8859-1", "iso8859-1", "latin1", "latin-1", "l1", "us-ascii", "ascii"]
        .iter()
        .any(|name| cs.eq_ignore_ascii_case(name))
}
