pub mod api;
pub mod error;

pub use error::{ClientError, Endpoint};

use async_trait::async_trait;
use hyper::body::Bytes;
use hyper::client::HttpConnector;
use hyper::{Body, Client, Method, Request};
use hyper_tls::HttpsConnector;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_FID: &str = "774643";
pub const DEFAULT_TOP_POSTS_LIMIT: u32 = 5;

/// Farcaster account identifier, kept as the numeric string the backend expects.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fid(String);

impl Fid {
    /// Blank or missing input falls back to [DEFAULT_FID].
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(fid) if !fid.is_empty() => Self(fid.to_string()),
            _ => Self::default(),
        }
    }

    /// Reads the `fid` query parameter of a dashboard link, if it has a non-blank one.
    pub fn from_launch_url(url: &Url) -> Option<Self> {
        url.query_pairs()
            .find(|(key, _)| key == "fid")
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Fid {
    fn default() -> Self {
        Self(DEFAULT_FID.to_string())
    }
}

impl fmt::Display for Fid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three reads the dashboard needs. [AnalyticsClient] is the real implementation; the seam
/// exists so the store can be driven without a network.
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    async fn summary(&self, fid: &Fid) -> Result<api::SummaryResponse, ClientError>;

    async fn top_posts(&self, fid: &Fid, limit: u32)
        -> Result<api::TopPostsResponse, ClientError>;

    async fn activity(&self, fid: &Fid) -> Result<api::ActivityResponse, ClientError>;
}

#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    https_client: Client<HttpsConnector<HttpConnector>>,
    base_url: Url,
}

impl AnalyticsClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let https = HttpsConnector::new();
        let https_client = Client::builder().build::<_, hyper::Body>(https);

        // NB: exactly one trailing slash, otherwise [Url::join] drops the last path segment
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;

        Ok(Self {
            https_client,
            base_url,
        })
    }

    pub fn endpoint_url(
        &self,
        endpoint: Endpoint,
        params: &[(&str, &str)],
    ) -> Result<Url, ClientError> {
        let mut url = self.base_url.join(endpoint.path())?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get(&self, endpoint: Endpoint, url: Url) -> Result<Bytes, ClientError> {
        debug!(%endpoint, %url, "GET");

        let req = Request::builder()
            .method(Method::GET)
            .uri(url.as_str())
            .header("Accept", "application/json")
            .body(Body::empty())?;

        let resp = self.https_client.request(req).await?;
        let status = resp.status();
        let body = hyper::body::to_bytes(resp.into_body()).await?;

        if !status.is_success() {
            let err = ClientError::Request {
                endpoint,
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: String::from_utf8_lossy(&body).into_owned(),
            };
            warn!(%endpoint, status = status.as_u16(), "request failed");
            return Err(err);
        }

        Ok(body)
    }
}

fn parse<T: DeserializeOwned>(endpoint: Endpoint, body: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(body).map_err(|source| ClientError::Parse { endpoint, source })
}

#[async_trait]
impl AnalyticsSource for AnalyticsClient {
    async fn summary(&self, fid: &Fid) -> Result<api::SummaryResponse, ClientError> {
        let url = self.endpoint_url(Endpoint::Summary, &[("fid", fid.as_str())])?;
        let body = self.get(Endpoint::Summary, url).await?;
        parse(Endpoint::Summary, &body)
    }

    async fn top_posts(
        &self,
        fid: &Fid,
        limit: u32,
    ) -> Result<api::TopPostsResponse, ClientError> {
        let limit = limit.to_string();
        let url = self.endpoint_url(
            Endpoint::TopPosts,
            &[("fid", fid.as_str()), ("limit", &limit)],
        )?;
        let body = self.get(Endpoint::TopPosts, url).await?;
        parse(Endpoint::TopPosts, &body)
    }

    async fn activity(&self, fid: &Fid) -> Result<api::ActivityResponse, ClientError> {
        let url = self.endpoint_url(Endpoint::Activity, &[("fid", fid.as_str())])?;
        let body = self.get(Endpoint::Activity, url).await?;
        let resp: api::ActivityResponse = parse(Endpoint::Activity, &body)?;

        if !resp.ok {
            return Err(ClientError::Semantic("Activity response not ok".to_string()));
        }
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fid_fallback() {
        assert_eq!(Fid::parse_or_default(None).as_str(), "774643");
        assert_eq!(Fid::parse_or_default(Some("   ")).as_str(), "774643");
        assert_eq!(Fid::parse_or_default(Some(" 3 ")).as_str(), "3");
    }

    #[test]
    fn test_fid_from_launch_url() {
        let url = Url::parse("https://example.app/?fid=194&theme=dark").unwrap();
        assert_eq!(Fid::from_launch_url(&url), Some(Fid("194".to_string())));

        let url = Url::parse("https://example.app/?fid=").unwrap();
        assert_eq!(Fid::from_launch_url(&url), None);
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let client = AnalyticsClient::new("http://localhost:4000/proxy/").unwrap();
        let url = client
            .endpoint_url(Endpoint::TopPosts, &[("fid", "1 2"), ("limit", "5")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:4000/proxy/api/live/top-posts?fid=1+2&limit=5"
        );
    }
}
