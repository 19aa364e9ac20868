use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use log::warn;
use crate::config::Config;
use crate::error::ScrapeError;
use crate::models::FetchResult;

/// Anything that can turn a page URL into a `FetchResult`.
pub trait PageFetcher {
    fn fetch(&self, url: &str, session: &str) -> FetchResult;
}

impl<T: PageFetcher + ?Sized> PageFetcher for &T {
    fn fetch(&self, url: &str, session: &str) -> FetchResult {
        (**self).fetch(url, session)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProxyRequest<'a> {
    cmd: &'static str,
    url: &'a str,
    max_timeout: u64,
    session: &'a str,
    follow_redirects: bool,
    headers: ProxyHeaders<'a>,
}

#[derive(Serialize)]
struct ProxyHeaders<'a> {
    #[serde(rename = "Accept-Language")]
    accept_language: &'a str,
}

#[derive(Deserialize)]
struct ProxyReply {
    #[serde(default)]
    status: String,
    #[serde(default)]
    solution: Option<Solution>,
}

#[derive(Deserialize, Default)]
struct Solution {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    status: Option<u16>,
    #[serde(default)]
    response: Option<String>,
}

/// Client for a FlareSolverr-style rendering proxy.
pub struct ProxyClient {
    client: Client,
    endpoint: String,
    max_timeout_ms: u64,
    accept_language: String,
}

impl ProxyClient {
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(ProxyClient {
            client,
            endpoint: config.fs_url.clone(),
            max_timeout_ms: config.max_timeout_ms,
            accept_language: config.accept_language.clone(),
        })
    }

    fn post(&self, url: &str, session: &str) -> Result<String, reqwest::Error> {
        let payload = ProxyRequest {
            cmd: "request.get",
            url,
            max_timeout: self.max_timeout_ms,
            session,
            follow_redirects: true,
            headers: ProxyHeaders {
                accept_language: &self.accept_language,
            },
        };

        self.client
            .post(&self.endpoint)
            .json(&payload)
            .send()?
            .error_for_status()?
            .text()
    }
}

impl PageFetcher for ProxyClient {
    fn fetch(&self, url: &str, session: &str) -> FetchResult {
        match self.post(url, session) {
            Ok(body) => interpret_reply(url, &body),
            Err(e) => {
                warn!("Proxy request for {} failed: {}", url, e);
                FetchResult::failed(url, e.to_string())
            }
        }
    }
}

/// Turns a raw proxy reply body into a `FetchResult`. Missing solution
/// fields fall back to the requested URL, status 0 and empty markup.
pub fn interpret_reply(requested_url: &str, body: &str) -> FetchResult {
    let reply: ProxyReply = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return FetchResult::failed(requested_url, format!("malformed proxy reply: {}", e)),
    };

    if reply.status != "ok" {
        return FetchResult::failed(requested_url, body);
    }

    let solution = reply.solution.unwrap_or_default();
    FetchResult {
        ok: true,
        url: solution.url.unwrap_or_else(|| requested_url.to_string()),
        status_code: solution.status.unwrap_or(0),
        html: solution.response.unwrap_or_default(),
        error: None,
    }
}
