//! File references for multipart operations (image edit, speech-to-text).
//!
//! A reference is either an `http(s)` URL or a local path. Remote files are
//! streamed into a scratch file first; the scratch file is a [`tempfile`]
//! handle, so it is removed on every exit path, including a size-limit
//! rejection halfway through the download.

use bytes::Bytes;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::{Error, Result};

/// Upper bound for a single attached file.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 25 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
        }
    }

    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Image => &["png", "jpg", "jpeg", "webp", "gif"],
            Self::Audio => &["mp3", "wav", "m4a", "ogg", "flac", "webm", "mp4", "mpeg", "mpga"],
        }
    }
}

/// Raw bytes plus the metadata needed for a multipart file part.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFile {
    pub bytes: Bytes,
    pub filename: String,
    pub mime: String,
}

pub struct FileResolver {
    http_client: reqwest::Client,
    max_size: u64,
    scratch_dir: Option<PathBuf>,
}

impl Default for FileResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FileResolver {
    /// Resolver with a default HTTP client. Clients made by the builder get one
    /// sharing their timeout and proxy instead.
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
            max_size: DEFAULT_MAX_FILE_SIZE,
            scratch_dir: None,
        }
    }

    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = client;
        self
    }

    /// Directory for download scratch files. Defaults to the system temp dir.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub async fn resolve(&self, reference: &str, kind: MediaKind) -> Result<ResolvedFile> {
        let reference = reference.trim();
        match url::Url::parse(reference) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                self.resolve_remote(url, kind).await
            }
            _ => self.resolve_local(Path::new(reference), kind).await,
        }
    }

    async fn resolve_local(&self, path: &Path, kind: MediaKind) -> Result<ResolvedFile> {
        let reference = path.display().to_string();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from)
            .ok_or_else(|| Error::file("File reference has no file name", &reference))?;
        check_extension(&filename, kind, &reference)?;

        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| Error::file(format!("Cannot read file {}: {}", reference, e), &reference))?;
        if !meta.is_file() {
            return Err(Error::file(format!("{} is not a regular file", reference), &reference));
        }
        if meta.len() > self.max_size {
            return Err(self.too_large(&reference));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::file(format!("Cannot read file {}: {}", reference, e), &reference))?;
        Ok(ResolvedFile {
            mime: guess_mime(&filename),
            bytes: Bytes::from(bytes),
            filename,
        })
    }

    async fn resolve_remote(&self, url: url::Url, kind: MediaKind) -> Result<ResolvedFile> {
        let reference = url.to_string();
        let filename = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .ok_or_else(|| Error::file("File URL has no file name", &reference))?;
        check_extension(&filename, kind, &reference)?;

        let resp = self.http_client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(Error::file(
                format!("Failed to download {}: HTTP {}", reference, resp.status().as_u16()),
                &reference,
            ));
        }
        if resp.content_length().map(|len| len > self.max_size).unwrap_or(false) {
            return Err(self.too_large(&reference));
        }

        let scratch = match &self.scratch_dir {
            Some(dir) => tempfile::Builder::new().prefix("modelhub-").tempfile_in(dir)?,
            None => tempfile::Builder::new().prefix("modelhub-").tempfile()?,
        };
        let mut out = tokio::fs::File::from_std(scratch.reopen()?);
        let mut written: u64 = 0;
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            written += chunk.len() as u64;
            if written > self.max_size {
                return Err(self.too_large(&reference));
            }
            out.write_all(&chunk).await?;
        }
        out.flush().await?;
        drop(out);

        let bytes = tokio::fs::read(scratch.path()).await?;
        debug!(reference = reference.as_str(), bytes = bytes.len(), "downloaded file reference");
        Ok(ResolvedFile {
            mime: guess_mime(&filename),
            bytes: Bytes::from(bytes),
            filename,
        })
    }

    fn too_large(&self, reference: &str) -> Error {
        Error::file(
            format!("File {} exceeds the maximum size of {} bytes", reference, self.max_size),
            reference,
        )
    }
}

fn check_extension(filename: &str, kind: MediaKind, reference: &str) -> Result<()> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let allowed = kind.allowed_extensions();
    if !allowed.contains(&ext.as_str()) {
        return Err(Error::file(
            format!(
                "Unsupported {} file extension '{}'; allowed: {}",
                kind.as_str(),
                ext,
                allowed.join(", ")
            ),
            reference,
        ));
    }
    Ok(())
}

fn guess_mime(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
