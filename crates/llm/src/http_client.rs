//! HTTP Client Factory
//!
//! Builds the reqwest client used by providers, with optional proxy support.

/// Build a `reqwest::Client` for the given proxy setting.
///
/// - `Some(url)` -> route every request through that proxy
/// - `None` -> explicitly disable proxy (`no_proxy`), ignoring env vars
///
/// No request timeout is set; callers that want one wrap the call themselves.
pub fn build_http_client(proxy_url: Option<&str>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("phishguard/", env!("CARGO_PKG_VERSION")));
    match proxy_url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => {
            builder = builder.proxy(reqwest::Proxy::all(url)?);
        }
        None => {
            builder = builder.no_proxy();
        }
    }
    builder.build()
}
