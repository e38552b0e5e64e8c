//! Request headers of a Chrome page load, as captured from the browser's
//! network tab. The site serves inputs to plain clients too, but this keeps
//! requests indistinguishable from clicking the input link.

use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::Error;
use crate::model::Session;

const BROWSER_HEADERS: [(&str, &str); 13] = [
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
    ),
    ("accept-language", "en-US,en-DE;q=0.9,en;q=0.8,de-DE;q=0.7,de;q=0.6"),
    ("cache-control", "max-age=0"),
    ("priority", "u=0, i"),
    ("sec-ch-ua", r#""Google Chrome";v="131", "Chromium";v="131", "Not_A Brand";v="24""#),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", r#""Windows""#),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "same-origin"),
    ("sec-fetch-user", "?1"),
    ("upgrade-insecure-requests", "1"),
    (
        "user-agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    ),
];

/// Builds the full header set for one input request. The cookie is marked
/// sensitive so it does not show up in `Debug` output of the map.
pub fn browser_headers(session: &Session, referer: &str) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::with_capacity(BROWSER_HEADERS.len() + 2);
    for (name, value) in BROWSER_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }

    let mut cookie = HeaderValue::from_str(&session.cookie()).map_err(|_| {
        Error::InvalidHeader("SESSION contains characters that are not allowed in a cookie".to_string())
    })?;
    cookie.set_sensitive(true);
    headers.insert(http::header::COOKIE, cookie);

    let referer = HeaderValue::from_str(referer)
        .map_err(|_| Error::InvalidHeader(format!("invalid referer `{referer}`")))?;
    headers.insert(http::header::REFERER, referer);

    Ok(headers)
}
