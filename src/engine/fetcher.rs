//! HTTP fetcher implementation
//!
//! This module performs the single HTTP probes every check mode bottoms out
//! in: building the per-run client (timeouts, proxy, user agent), sending
//! one request with optional preemptive Basic auth, and classifying
//! transport failures into the report's error categories.

use crate::check::{CheckSpec, Credentials, HttpMethod};
use crate::FetchError;
use reqwest::Client;
use url::Url;

/// Status and body of one successful HTTP exchange.
///
/// "Successful" means the transport round trip completed; whether the
/// status code or body content is acceptable is the caller's decision.
#[derive(Debug)]
pub struct PageResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded response body; empty for HEAD requests
    pub body: String,
}

/// Builds the HTTP client for one check run
///
/// The client carries everything that is constant across the run: the
/// connection timeout, the total request timeout standing in for the socket
/// timeout, the forward proxy (with Basic credentials when configured), and
/// the crate user agent. Redirects follow reqwest's default policy, so
/// status validation sees the final response of a redirect chain.
///
/// # Arguments
///
/// * `spec` - The check definition supplying timeouts and proxy settings
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(FetchError)` - Proxy or client construction failed
pub fn build_client(spec: &CheckSpec) -> Result<Client, FetchError> {
    let user_agent = format!("sitesentry/{}", env!("CARGO_PKG_VERSION"));

    let mut builder = Client::builder()
        .user_agent(user_agent)
        .timeout(spec.socket_timeout())
        .connect_timeout(spec.connection_timeout())
        .gzip(true)
        .brotli(true);

    if let Some(settings) = &spec.proxy {
        let mut proxy = reqwest::Proxy::all(format!("http://{}:{}", settings.host, settings.port))
            .map_err(|e| FetchError::Io(e.to_string()))?;
        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            proxy = proxy.basic_auth(username, password);
        }
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(|e| FetchError::Io(e.to_string()))
}

/// Performs one HTTP probe
///
/// # Arguments
///
/// * `client` - The run-scoped HTTP client
/// * `url` - Target URL, already parsed
/// * `method` - GET or HEAD
/// * `credentials` - Optional Basic auth, attached preemptively
///
/// # Returns
///
/// * `Ok(PageResponse)` - The exchange completed; status and body captured
/// * `Err(FetchError)` - Categorized transport failure
pub async fn fetch_page(
    client: &Client,
    url: &Url,
    method: HttpMethod,
    credentials: Option<&Credentials>,
) -> Result<PageResponse, FetchError> {
    let mut request = match method {
        HttpMethod::Get => client.get(url.clone()),
        HttpMethod::Head => client.head(url.clone()),
    };

    if let Some(credentials) = credentials {
        request = request.basic_auth(&credentials.username, Some(&credentials.password));
    }

    tracing::debug!("{} {}", method, url);

    let response = request
        .send()
        .await
        .map_err(|e| classify_error(&e, url))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| classify_error(&e, url))?;

    tracing::debug!("{} answered {}", url, status);

    Ok(PageResponse { status, body })
}

/// Maps a transport error onto the report's failure categories.
///
/// reqwest flags timeouts and connection-phase failures; DNS failures are
/// only visible as text in the error source chain, so the chain is scanned
/// for the resolver wording and the host is taken from the target URL.
fn classify_error(error: &reqwest::Error, url: &Url) -> FetchError {
    if error.is_timeout() {
        if error.is_connect() {
            return FetchError::ConnectTimeout;
        }
        return FetchError::SocketTimeout;
    }

    if error.is_connect() && is_dns_failure(error) {
        let host = url.host_str().unwrap_or_default().to_string();
        return FetchError::UnknownHost(host);
    }

    FetchError::Io(error.to_string())
}

/// Walks the error source chain looking for resolver failures.
fn is_dns_failure(error: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(error);
    while let Some(current) = source {
        let text = current.to_string();
        if text.contains("dns error") || text.contains("failed to lookup") {
            return true;
        }
        source = current.source();
    }
    false
}
