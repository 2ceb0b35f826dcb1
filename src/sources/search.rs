use std::time::Duration;

use serde::Deserialize;

use super::SearchIndex;
use crate::error::PopstarError;
use crate::state::PackageInfo;

/// Envelope of every AUR RPC v5 response.
#[derive(Deserialize)]
struct RpcResponse {
    /// `search`, `multiinfo` or `error`.
    #[serde(rename = "type")]
    kind: String,
    /// Present when `kind` is `error`.
    #[serde(default)]
    error: Option<String>,
    /// Matching packages.
    #[serde(default)]
    results: Vec<PackageInfo>,
}

/// What: Decode an AUR RPC search body.
///
/// Inputs:
/// - `body`: Raw response text
///
/// Output:
/// - Packages in response order; `IndexRejected` for an error envelope,
///   `Parse` for anything that is not a valid envelope.
pub fn decode_search_response(body: &str) -> Result<Vec<PackageInfo>, PopstarError> {
    let resp: RpcResponse = serde_json::from_str(body)?;
    if resp.kind == "error" {
        return Err(PopstarError::IndexRejected(
            resp.error.unwrap_or_else(|| "unknown error".to_string()),
        ));
    }
    Ok(resp.results)
}

/// What: Build the RPC v5 search URL `<search_url>/<term>?by=name-desc`.
///
/// Inputs:
/// - `search_url`: Search endpoint
/// - `term`: Search text, percent-encoded as one path segment
///
/// Output: Request URL, or `InvalidUrl` for an unusable endpoint.
fn search_request_url(search_url: &str, term: &str) -> Result<reqwest::Url, PopstarError> {
    let invalid = || PopstarError::InvalidUrl(search_url.to_string());
    let mut url = reqwest::Url::parse(search_url).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|()| invalid())?
        .pop_if_empty()
        .push(term);
    url.query_pairs_mut().append_pair("by", "name-desc");
    Ok(url)
}

/// AUR RPC client.
#[derive(Debug, Clone)]
pub struct AurIndex {
    /// Shared HTTP client.
    client: reqwest::Client,
    /// Search endpoint, e.g. `https://aur.archlinux.org/rpc/v5/search`.
    search_url: String,
}

impl AurIndex {
    /// What: Build a client for `search_url`.
    ///
    /// Inputs:
    /// - `search_url`: RPC search endpoint
    ///
    /// Output: Client, or `Network` if the HTTP stack cannot be initialized.
    pub fn new(search_url: impl Into<String>) -> Result<Self, PopstarError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("popstar/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            search_url: search_url.into(),
        })
    }
}

impl SearchIndex for AurIndex {
    async fn search(&self, term: &str) -> Result<Vec<PackageInfo>, PopstarError> {
        let url = search_request_url(&self.search_url, term)?;
        tracing::debug!(%url, "querying package index");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        match decode_search_response(&body) {
            Err(PopstarError::Parse(_)) if !status.is_success() => {
                Err(PopstarError::Network(format!("index answered HTTP {status}")))
            }
            other => other,
        }
    }
}
