use url::Url;

/// Produces the identity key a crawl uses to remember visited pages.
///
/// A monitoring check must probe URLs exactly as configured, so the key
/// keeps scheme, host, port, path, and query untouched and only drops the
/// fragment: `page.html#top` and `page.html#bottom` are the same document.
/// Case of the host and default ports are already canonicalized by URL
/// parsing.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitesentry::url::visit_key;
///
/// let a = Url::parse("http://example.com/page.html#top").unwrap();
/// let b = Url::parse("http://example.com/page.html#bottom").unwrap();
///
/// assert_eq!(visit_key(&a), visit_key(&b));
/// assert_eq!(visit_key(&a), "http://example.com/page.html");
/// ```
pub fn visit_key(url: &Url) -> String {
    let mut key = url.clone();
    key.set_fragment(None);
    key.into()
}

/// Checks whether two URLs point at the same site, meaning the same host
/// and port.
///
/// Used in two places: a link whose site differs from the page being
/// scanned is only probed when the check opts into outbound links, and a
/// crawl never leaves the site of its base URL. An explicit default port
/// is equivalent to no port at all.
pub fn same_site(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}
