// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP asset retrieval with a per-request timeout.

use std::time::Duration;

use async_trait::async_trait;
use logoplace_core::AssetFetcher;
use logoplace_core::error::{LogoplaceError, Result};
use tracing::{debug, instrument};

/// [`AssetFetcher`] over plain HTTP(S) using a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpAssetFetcher {
    client: reqwest::Client,
}

impl HttpAssetFetcher {
    /// # Errors
    ///
    /// [`LogoplaceError::Config`] if the client cannot be built (TLS backend
    /// initialisation, for example).
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LogoplaceError::Config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LogoplaceError::AssetFetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LogoplaceError::AssetFetch(format!(
                "{status} for url ({url})"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LogoplaceError::AssetFetch(format!("failed to read body: {e}")))?;
        debug!(len = bytes.len(), "Asset downloaded");
        Ok(bytes.to_vec())
    }
}

/// Human-readable detail of a fetch error, without the variant prefix.
pub fn fetch_error_detail(err: &LogoplaceError) -> String {
    match err {
        LogoplaceError::AssetFetch(detail) => detail.clone(),
        other => other.to_string(),
    }
}
