use crate::UrlError;
use url::Url;

/// Normalizes an absolute URL string
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject non-HTTP(S) schemes (mailto, javascript, tel, ftp, ...)
/// 3. Reject URLs without a host
/// 4. Remove the fragment (everything after #)
///
/// The host is lowercased by the `url` crate during parsing. Path case,
/// trailing slashes, and the query string are preserved: two URLs that
/// differ in any of them are distinct pages, and `http://` vs `https://`
/// variants of the same page stay distinct.
///
/// # Examples
///
/// ```
/// use site_sounder::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.COM/page?q=1#section").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page?q=1");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    finish_normalization(url)
}

/// Resolves a possibly-relative URL reference against a base, then normalizes
///
/// This is the entry point for links discovered on a page: `href` values may
/// be relative ("../about"), root-relative ("/contact"), or absolute.
///
/// # Examples
///
/// ```
/// use site_sounder::url::resolve_url;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// let url = resolve_url("../pricing#plans", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/pricing");
/// ```
pub fn resolve_url(reference: &str, base: &Url) -> Result<Url, UrlError> {
    let url = base
        .join(reference)
        .map_err(|e| UrlError::Parse(e.to_string()))?;
    finish_normalization(url)
}

/// Applies the scheme/host checks and fragment stripping to a parsed URL
fn finish_normalization(mut url: Url) -> Result<Url, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}
