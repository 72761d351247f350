//! Boundary client: one HTTP GET with timeout and uniform error classification.

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use super::http_client::create_http_client_with_timeout;
use super::urls::{QueryParams, Route, join_url};
use crate::config::Config;
use crate::data_fetcher::models::ErrorEnvelope;
use crate::error::AppError;

/// HTTP client bound to one API root.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct StatsClient {
    http: Client,
    api_root: String,
}

impl StatsClient {
    /// Builds a client from an explicit configuration.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = create_http_client_with_timeout(config.http_timeout())?;
        Ok(Self {
            http,
            api_root: config.api_root(),
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Builds the full request URL for a route path and its query parameters.
    pub fn build_url(&self, path: &str, params: &QueryParams) -> Result<Url, AppError> {
        let joined = join_url(&self.api_root, path);
        let mut url =
            Url::parse(&joined).map_err(|e| AppError::InvalidUrl(format!("{joined}: {e}")))?;
        append_query(&mut url, params);
        Ok(url)
    }

    /// Builds the full request URL for a route whose segments carry player names.
    pub fn build_route_url(&self, route: &Route, params: &QueryParams) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.api_root)
            .map_err(|e| AppError::InvalidUrl(format!("{}: {e}", self.api_root)))?;
        route.apply(&mut url)?;
        append_query(&mut url, params);
        Ok(url)
    }

    /// Issues a GET and decodes the JSON body as `T`.
    ///
    /// # Errors
    /// * `AppError::Timeout` - the configured timeout elapsed first
    /// * `AppError::Network` - transport failure before a response arrived
    /// * `AppError::Http` - non-success status with a `{error: {...}}` body
    /// * `AppError::Unknown` - non-success status with any other body
    /// * `AppError::Decode` - success status but the body is not a `T`
    #[instrument(skip(self, params))]
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<T, AppError> {
        let url = self.build_url(path, params)?;
        self.fetch(url).await
    }

    /// Same as [`StatsClient::get`] for a segment-built route.
    #[instrument(skip(self, params))]
    pub async fn get_route<T: DeserializeOwned>(
        &self,
        route: &Route,
        params: &QueryParams,
    ) -> Result<T, AppError> {
        let url = self.build_route_url(route, params)?;
        self.fetch(url).await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppError> {
        info!("Fetching data from URL: {url}");

        let response = match self.http.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return Err(classify_transport_error(&e, url.as_str())),
        };

        let status = response.status();
        debug!("Response status: {status}");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = parse_error_response(status, &body, url.as_str());
            error!("HTTP {} from {}: {}", status.as_u16(), url, err);
            return Err(err);
        }

        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => return Err(classify_transport_error(&e, url.as_str())),
        };
        debug!("Response length: {} bytes", body.len());

        serde_json::from_str::<T>(&body).map_err(|e| {
            warn!("Failed to parse API response: {} (URL: {})", e, url);
            AppError::decode(e.to_string(), url.as_str())
        })
    }
}

fn append_query(url: &mut Url, params: &QueryParams) {
    if !params.is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in params.pairs() {
            query.append_pair(key, value);
        }
    }
}

fn classify_transport_error(e: &reqwest::Error, url: &str) -> AppError {
    if e.is_timeout() {
        warn!("Request timed out: {url}");
        AppError::timeout(url)
    } else {
        error!("Request failed for URL {}: {}", url, e);
        AppError::network(url, e.to_string())
    }
}

/// Classifies a non-success response.
///
/// A body shaped like `{error: {code, message, details}}` yields
/// `AppError::Http` (missing code becomes `UNKNOWN`, missing message becomes the
/// status line). Anything else yields `AppError::Unknown` with the status line.
pub fn parse_error_response(status: StatusCode, body: &str, url: &str) -> AppError {
    let status_line = status
        .canonical_reason()
        .unwrap_or("Something went wrong")
        .to_string();

    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => AppError::http(
            status.as_u16(),
            envelope
                .error
                .code
                .unwrap_or_else(|| crate::constants::error_codes::UNKNOWN.to_string()),
            envelope.error.message.unwrap_or(status_line),
            envelope.error.details,
            url,
        ),
        Err(_) => AppError::unknown(status.as_u16(), status_line, url),
    }
}
