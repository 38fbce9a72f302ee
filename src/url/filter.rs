use url::Url;

/// File extensions that never contain crawlable page content
const SKIP_EXTENSIONS: &[&str] = &[
    ".pdf", ".zip", ".exe", ".dmg", ".pkg", ".jpg", ".jpeg", ".png", ".gif", ".svg", ".ico",
    ".css", ".js", ".xml",
];

/// Path segments that mark machine or administrative endpoints
const SKIP_PATHS: &[&str] = &["/api/", "/admin/", "/wp-admin/", "/cgi-bin/", "/mail/"];

/// Returns true if the URL points at crawlable page content
///
/// Links to static assets (images, stylesheets, archives) and to
/// administrative or API paths are dropped from the frontier: fetching them
/// costs a request and yields nothing to traverse. The check is
/// case-insensitive on the path.
pub fn should_visit(url: &Url) -> bool {
    let path = url.path().to_lowercase();

    if SKIP_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }

    if SKIP_PATHS.iter().any(|seg| path.contains(seg)) {
        return false;
    }

    true
}
