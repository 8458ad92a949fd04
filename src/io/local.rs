use super::ReadAt;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Image file on the local filesystem, read with positional reads so the
/// reader can be shared without a seek position.
pub struct LocalFileReader {
    path: PathBuf,
    file: File,
    size: u64,
}

impl LocalFileReader {
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let size = file
            .metadata()
            .with_context(|| format!("cannot stat {}", path.display()))?
            .len();
        Ok(Self {
            path: path.to_path_buf(),
            file,
            size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(unix)]
fn pread(file: &File, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
    use std::os::unix::fs::FileExt;
    file.read_at(buf, offset)
}

#[cfg(windows)]
fn pread(file: &File, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
    use std::os::windows::fs::FileExt;
    file.seek_read(buf, offset)
}

#[cfg(not(any(unix, windows)))]
fn pread(mut file: &File, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
    use std::io::{Read, Seek, SeekFrom};
    file.seek(SeekFrom::Start(offset))?;
    file.read(buf)
}

#[async_trait]
impl ReadAt for LocalFileReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        pread(&self.file, offset, buf)
            .with_context(|| format!("cannot read {} at offset {}", self.path.display(), offset))
    }

    fn size(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn reads_at_offsets() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("head.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x10]).expect("write fixture");

        let reader = LocalFileReader::new(&path).unwrap();
        assert_eq!(reader.size(), 6);
        assert_eq!(reader.path(), path.as_path());

        let mut buf = [0u8; 3];
        assert_eq!(reader.read_at(2, &mut buf).await.unwrap(), 3);
        assert_eq!(buf, [0xFF, 0xE1, 0x00]);
        assert_eq!(reader.read_at(6, &mut buf).await.unwrap(), 0);
    }
}
