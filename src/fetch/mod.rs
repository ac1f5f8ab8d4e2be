//! MTA-STS policy document fetching.
//!
//! The policy lives at `https://mta-sts.<domain>/.well-known/mta-sts.txt` and is
//! fetched with a plain GET. Redirects are not followed (RFC 8461 section 3.3),
//! so a 3xx answer is reported like any other non-2xx status.

use std::future::Future;

use log::{debug, warn};

use crate::config::{MAX_POLICY_BODY_SIZE, MTA_STS_POLICY_PATH};
use crate::domain::DomainName;
use crate::error_handling::{categorize_reqwest_error, HttpFetchError};

/// Fetches a policy document body.
pub trait PolicyFetcher: Send + Sync {
    /// GETs `url` and returns the body text of a 2xx response.
    fn fetch_policy(&self, url: &str) -> impl Future<Output = Result<String, HttpFetchError>> + Send;
}

/// [`PolicyFetcher`] backed by a shared `reqwest::Client`.
///
/// The client should be built by [`crate::initialization::init_client`], which
/// disables redirects and applies the configured timeout.
#[derive(Clone)]
pub struct HttpPolicyFetcher {
    client: reqwest::Client,
}

impl HttpPolicyFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl PolicyFetcher for HttpPolicyFetcher {
    async fn fetch_policy(&self, url: &str) -> Result<String, HttpFetchError> {
        debug!("Fetching MTA-STS policy from {url}");
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("MTA-STS policy request to {url} failed: {e}");
            categorize_reqwest_error(&e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("MTA-STS policy at {url} returned {status}");
            return Err(HttpFetchError::Status(status.as_u16()));
        }

        if let Some(length) = response.content_length() {
            let length = usize::try_from(length).unwrap_or(usize::MAX);
            if length > MAX_POLICY_BODY_SIZE {
                return Err(HttpFetchError::BodyTooLarge(length));
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| categorize_reqwest_error(&e))?;
        if body.len() > MAX_POLICY_BODY_SIZE {
            return Err(HttpFetchError::BodyTooLarge(body.len()));
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// URL of the MTA-STS policy document for `domain`.
pub fn mta_sts_policy_url(domain: &DomainName) -> String {
    format!("https://{}{MTA_STS_POLICY_PATH}", domain.prefixed("mta-sts"))
}
