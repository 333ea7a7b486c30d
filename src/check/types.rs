use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// One check definition: a URL, the validation rules to apply to it, and
/// the mode that decides how far beyond that URL the check reaches.
///
/// A `CheckSpec` is immutable for the duration of a run. The scheduler (or
/// the runner binary, via a TOML definition file) supplies it fully
/// populated; the engine never mutates or persists it.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckSpec {
    /// Target URL. For spider checks this must be a directory-style base
    /// URL (trailing slash); the crawl never leaves its site.
    pub url: String,

    /// Which engine runs this check
    pub kind: CheckKind,

    /// HTTP method used for the probe (and for link probes)
    #[serde(default)]
    pub method: HttpMethod,

    /// Status code the target must answer with
    #[serde(rename = "expected-status", default = "default_expected_status")]
    pub expected_status: u16,

    /// Content assertion applied after the status check passes
    #[serde(default)]
    pub condition: ContentCondition,

    /// Probe the links found on checked pages
    #[serde(rename = "check-broken-links", default)]
    pub check_broken_links: bool,

    /// Newline-delimited glob list; matching links are not followed
    #[serde(rename = "do-not-follow", default)]
    pub do_not_follow: String,

    /// Newline-delimited glob list; matching sitemap entries are dropped
    #[serde(rename = "excluded-urls", default)]
    pub excluded_urls: String,

    /// Probe links leaving the page's site during broken-link scans.
    /// Unset behaves like `false`: only same-site links are probed.
    #[serde(rename = "follow-outbound-broken-links", default)]
    pub follow_outbound_broken_links: Option<bool>,

    /// Time budget for a whole request once connected (milliseconds)
    #[serde(rename = "socket-timeout-ms", default = "default_timeout_ms")]
    pub socket_timeout_ms: u64,

    /// Time budget for establishing a connection (milliseconds)
    #[serde(rename = "connection-timeout-ms", default = "default_timeout_ms")]
    pub connection_timeout_ms: u64,

    /// Forward proxy for all requests of this check
    #[serde(default)]
    pub proxy: Option<ProxySettings>,

    /// Basic auth credentials sent preemptively with every request
    #[serde(default)]
    pub credentials: Option<Credentials>,
}

fn default_expected_status() -> u16 {
    200
}

fn default_timeout_ms() -> u64 {
    20_000
}

impl CheckSpec {
    /// Creates a definition with the given mode and URL and every other
    /// field at its default.
    pub fn new(kind: CheckKind, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind,
            method: HttpMethod::default(),
            expected_status: default_expected_status(),
            condition: ContentCondition::default(),
            check_broken_links: false,
            do_not_follow: String::new(),
            excluded_urls: String::new(),
            follow_outbound_broken_links: None,
            socket_timeout_ms: default_timeout_ms(),
            connection_timeout_ms: default_timeout_ms(),
            proxy: None,
            credentials: None,
        }
    }

    pub fn socket_timeout(&self) -> Duration {
        Duration::from_millis(self.socket_timeout_ms)
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }

    /// Whether broken-link scans may probe links on a different site.
    pub fn probes_outbound_links(&self) -> bool {
        self.follow_outbound_broken_links == Some(true)
    }
}

/// The three check modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    /// Probe one URL (optionally scanning its links one hop)
    SinglePage,
    /// Probe every URL listed in a sitemap document
    Sitemap,
    /// Crawl and probe every reachable page under a base URL
    Spider,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckKind::SinglePage => "single-page",
            CheckKind::Sitemap => "sitemap",
            CheckKind::Spider => "spider",
        };
        write!(f, "{}", name)
    }
}

/// HTTP method for check requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Head,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
        };
        write!(f, "{}", name)
    }
}

/// Content assertion against the fetched body.
///
/// Evaluated only after the status check passed; a status mismatch and a
/// content mismatch are never reported for the same fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "kebab-case")]
pub enum ContentCondition {
    /// Always passes
    #[default]
    None,
    /// Body must contain the text
    Contains(String),
    /// Body must not contain the text
    DoesntContain(String),
}

impl ContentCondition {
    /// Tests the fetched body against this condition.
    pub fn evaluate(&self, body: &str) -> bool {
        match self {
            ContentCondition::None => true,
            ContentCondition::Contains(text) => body.contains(text.as_str()),
            ContentCondition::DoesntContain(text) => !body.contains(text.as_str()),
        }
    }
}

/// Forward proxy settings; username and password are optional as a pair
#[derive(Debug, Clone, Deserialize)]
pub struct ProxySettings {
    pub host: String,

    pub port: u16,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

/// Basic auth credentials for the target site
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,

    pub password: String,
}
