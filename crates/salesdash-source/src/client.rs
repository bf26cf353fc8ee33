//! HTTP client for the sales transactions endpoint.
//!
//! One `GET` per query, no retries and no caching: any failure is returned
//! to the caller as a [`SourceError`].

use std::time::Duration;

use reqwest::{Client, Url};
use salesdash_core::{RawTransaction, SourceQuery, DEFAULT_SOURCE_URL};

use crate::error::SourceError;

/// Client for the sales endpoint.
///
/// Use [`SalesClient::new`] for the public endpoint or
/// [`SalesClient::with_base_url`] to point at another deployment or a mock
/// server in tests.
pub struct SalesClient {
    client: Client,
    base_url: Url,
}

impl SalesClient {
    /// Creates a client pointed at the public sales endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, SourceError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_SOURCE_URL)
    }

    /// Creates a client with a custom endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SourceError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| SourceError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches every transaction matching `query`.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Http`] on network failure.
    /// - [`SourceError::UnexpectedStatus`] on a non-2xx response.
    /// - [`SourceError::Deserialize`] if the body is not a JSON list of
    ///   transaction records.
    pub async fn fetch_transactions(
        &self,
        query: &SourceQuery,
    ) -> Result<Vec<RawTransaction>, SourceError> {
        let url = self.build_url(query);
        tracing::debug!(url = %url, "fetching sales transactions");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let records: Vec<RawTransaction> =
            serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
                context: format!(
                    "transactions (region={}, year={})",
                    query.region,
                    query.year.map_or_else(|| "all".to_owned(), |y| y.to_string())
                ),
                source: e,
            })?;

        tracing::info!(
            region = %query.region,
            records = records.len(),
            "fetched sales transactions"
        );
        Ok(records)
    }

    /// Appends the `regiao` and `ano` parameters to the base URL, keeping any
    /// query string already present on it.
    fn build_url(&self, query: &SourceQuery) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query.params() {
                pairs.append_pair(k, &v);
            }
        }
        url
    }
}
