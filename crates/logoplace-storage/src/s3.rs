// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// S3 primary store — parses the original asset reference into a bucket/key,
// derives the composite's key next to it, and uploads PNG bytes.

use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::primitives::ByteStream;
use logoplace_core::error::{LogoplaceError, Result};
use tokio::runtime::Handle;
use tracing::{debug, instrument};

const S3_HOST_SUFFIX: &str = "s3.amazonaws.com";

/// A bucket/key pair recovered from an asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Location {
    pub bucket: String,
    pub key: String,
}

impl S3Location {
    /// Parse `s3://bucket/key` or `https://bucket.s3.amazonaws.com/key`.
    ///
    /// # Errors
    ///
    /// [`LogoplaceError::InvalidStorageReference`] for anything else, or when
    /// the bucket or key is empty.
    pub fn parse(reference: &str) -> Result<Self> {
        let invalid = || LogoplaceError::InvalidStorageReference(reference.to_string());

        let (bucket, key) = if let Some(rest) = reference.strip_prefix("s3://") {
            rest.split_once('/').ok_or_else(invalid)?
        } else {
            let rest = reference
                .strip_prefix("https://")
                .or_else(|| reference.strip_prefix("http://"))
                .ok_or_else(invalid)?;
            let (host, path) = rest.split_once('/').ok_or_else(invalid)?;
            if !host.contains(S3_HOST_SUFFIX) {
                return Err(invalid());
            }
            let bucket = host.split('.').next().unwrap_or_default();
            let path = path.split(['?', '#']).next().unwrap_or_default();
            (bucket, path)
        };

        let key = key.trim_start_matches('/');
        if bucket.is_empty() || key.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    /// Where the composite of this asset goes: same bucket, `-logo` suffix.
    pub fn composite_location(&self) -> Self {
        Self {
            bucket: self.bucket.clone(),
            key: composite_key(&self.key),
        }
    }

    /// Public virtual-hosted URL of the object.
    pub fn url(&self) -> String {
        format!("https://{}.{}/{}", self.bucket, S3_HOST_SUFFIX, self.key)
    }
}

/// `photos/beach.jpg` becomes `photos/beach-logo.jpg`; a key without an
/// extension gets `-logo.png` appended.
pub fn composite_key(key: &str) -> String {
    let file_start = key.rfind('/').map_or(0, |i| i + 1);
    match key[file_start..].rfind('.') {
        Some(dot) => {
            let dot = file_start + dot;
            format!("{}-logo.{}", &key[..dot], &key[dot + 1..])
        }
        None => format!("{key}-logo.png"),
    }
}

/// Write side of an object store. Implementations block until the write is
/// acknowledged.
pub trait ObjectStore: Send + Sync {
    fn put_png(&self, location: &S3Location, body: Vec<u8>) -> Result<()>;
}

/// [`ObjectStore`] backed by the AWS SDK.
///
/// The SDK is async; uploads are driven on `handle` from the calling (blocking)
/// thread. Must not be called from inside an async task.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: S3Client,
    handle: Handle,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, handle: Handle) -> Self {
        Self { client, handle }
    }
}

impl ObjectStore for S3ObjectStore {
    #[instrument(skip(self, body), fields(bucket = %location.bucket, key = %location.key, len = body.len()))]
    fn put_png(&self, location: &S3Location, body: Vec<u8>) -> Result<()> {
        let request = self
            .client
            .put_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .content_type("image/png")
            .body(ByteStream::from(body))
            .send();
        self.handle
            .block_on(request)
            .map_err(|e| LogoplaceError::Persistence(format!("S3 upload failed: {e}")))?;
        debug!("Composite uploaded");
        Ok(())
    }
}
