use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::sync::OnceCell;

use super::ReadAt;
use anyhow::{Result, anyhow, bail};

/// HTTP(S) reader for remote images.
///
/// Uses Range requests when the server advertises them, so only the head of
/// a large image needs to travel. Otherwise the whole body is fetched once
/// and served from memory.
pub struct HttpReader {
    client: Client,
    url: String,
    size: u64,
    supports_ranges: bool,
    body: OnceCell<Vec<u8>>,
    max_retry: u32,
}

impl HttpReader {
    /// Create a new HTTP reader
    ///
    /// This will send a HEAD request to learn the size and Range support
    pub async fn new(url: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let resp = client.head(&url).send().await?;
        if !resp.status().is_success() {
            bail!("HTTP request failed with status: {}", resp.status());
        }

        let supports_ranges = resp
            .headers()
            .get("accept-ranges")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("bytes"));

        let size = resp
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| anyhow!("Remote server did not return Content-Length"))?;

        debug!("{url}: {size} bytes, range requests supported: {supports_ranges}");

        Ok(Self {
            client,
            url,
            size,
            supports_ranges,
            body: OnceCell::new(),
            max_retry: 10,
        })
    }

    /// Send a GET, retrying timeouts and connection failures with a linear
    /// backoff.
    async fn get(&self, range: Option<&str>) -> Result<reqwest::Response> {
        let mut retry_count = 0;
        loop {
            let mut request = self.client.get(&self.url);
            if let Some(range) = range {
                request = request.header("Range", range);
            }

            match request.send().await {
                Ok(resp) => return Ok(resp),
                Err(e) if e.is_timeout() || e.is_connect() => {
                    retry_count += 1;
                    if retry_count >= self.max_retry {
                        bail!("Max retries exceeded");
                    }
                    warn!(
                        "Connection error, retry {}/{}: {}",
                        retry_count, self.max_retry, e
                    );
                    tokio::time::sleep(Duration::from_millis(500 * retry_count as u64)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn read_range(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let end = (offset + buf.len() as u64 - 1).min(self.size - 1);
        let range = format!("bytes={}-{}", offset, end);

        let resp = self.get(Some(&range)).await?;
        if resp.status() != StatusCode::PARTIAL_CONTENT {
            bail!("HTTP request failed with status: {}", resp.status());
        }

        let bytes = resp.bytes().await?;
        let n = bytes.len().min(buf.len());
        buf[..n].copy_from_slice(&bytes[..n]);
        Ok(n)
    }

    async fn full_body(&self) -> Result<&[u8]> {
        let body = self
            .body
            .get_or_try_init(|| async {
                let resp = self.get(None).await?;
                if !resp.status().is_success() {
                    bail!("HTTP request failed with status: {}", resp.status());
                }
                Ok(resp.bytes().await?.to_vec())
            })
            .await?;
        Ok(body)
    }
}

#[async_trait]
impl ReadAt for HttpReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() || offset >= self.size {
            return Ok(0);
        }

        if self.supports_ranges {
            return self.read_range(offset, buf).await;
        }

        let body = self.full_body().await?;
        let Some(available) = usize::try_from(offset).ok().and_then(|o| body.get(o..)) else {
            return Ok(0);
        };
        let n = buf.len().min(available.len());
        buf[..n].copy_from_slice(&available[..n]);
        Ok(n)
    }

    fn size(&self) -> u64 {
        self.size
    }
}
