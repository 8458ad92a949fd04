//! Byte acquisition.
//!
//! Decoding works on a complete in-memory buffer. This module is the only
//! asynchronous part of the crate: it fetches bytes from a local file, an
//! HTTP(S) URL or memory and hands over a finished `Vec<u8>` via [`load`].

mod http;
mod local;
mod memory;

pub use http::HttpReader;
pub use local::LocalFileReader;
pub use memory::MemoryReader;

use anyhow::{Result, bail};
use async_trait::async_trait;
use log::debug;

/// Trait for random access reading from a data source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;
}

/// Read the source from offset 0 into memory.
///
/// At most `limit` bytes are read when a limit is given. The returned buffer
/// always has the full requested length; a source that ends early is an
/// error.
pub async fn load<R: ReadAt + ?Sized>(reader: &R, limit: Option<u64>) -> Result<Vec<u8>> {
    let size = limit.map_or(reader.size(), |limit| limit.min(reader.size()));
    let mut buf = vec![0u8; usize::try_from(size)?];

    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read_at(filled as u64, &mut buf[filled..]).await?;
        if n == 0 {
            bail!("source ended after {} of {} bytes", filled, buf.len());
        }
        filled += n;
    }

    debug!("loaded {} bytes", buf.len());
    Ok(buf)
}
