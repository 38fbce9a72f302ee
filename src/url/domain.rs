use url::Url;

/// Extracts the domain from a URL
///
/// Returns the lowercase host portion of the URL, or None if the URL has no
/// host (which cannot happen for a normalized HTTP(S) URL).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_sounder::url::extract_domain;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if the URL's host exactly matches the crawl domain
///
/// Subdomains do not match: a crawl of `example.com` never enters
/// `blog.example.com`. The port is not part of the comparison.
pub fn in_domain(url: &Url, domain: &str) -> bool {
    url.host_str()
        .map(|h| h.eq_ignore_ascii_case(domain))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_in_domain_exact_match() {
        let url = Url::parse("https://example.com/page").unwrap();
        assert!(in_domain(&url, "example.com"));
    }

    #[test]
    fn test_in_domain_rejects_other_host() {
        let url = Url::parse("https://other.com/page").unwrap();
        assert!(!in_domain(&url, "example.com"));
    }

    #[test]
    fn test_in_domain_rejects_subdomain() {
        let url = Url::parse("https://blog.example.com/page").unwrap();
        assert!(!in_domain(&url, "example.com"));
    }

    #[test]
    fn test_in_domain_rejects_parent_domain() {
        let url = Url::parse("https://example.com/page").unwrap();
        assert!(!in_domain(&url, "blog.example.com"));
    }

    #[test]
    fn test_in_domain_ignores_port() {
        let url = Url::parse("http://127.0.0.1:9999/page").unwrap();
        assert!(in_domain(&url, "127.0.0.1"));
    }
}
