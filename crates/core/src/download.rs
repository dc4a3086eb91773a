//! Cover and screenshot downloads.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use reqwest::blocking::{Client, ClientBuilder};
use tracing::info;

/// Extension for a downloaded image: `jpg` when the URL mentions `.jpg`
/// anywhere, `png` for everything else.
pub fn extension_for(url: &str) -> &'static str {
    if url.contains(".jpg") {
        "jpg"
    } else {
        "png"
    }
}

/// File name for an asset: `{base}.{ext}` or `{base}_scr_{index}.{ext}`.
pub fn file_name_for(base_name: &str, index: Option<usize>, url: &str) -> String {
    let extension = extension_for(url);
    match index {
        Some(index) => format!("{base_name}_scr_{index}.{extension}"),
        None => format!("{base_name}.{extension}"),
    }
}

/// HTTP client builder shared by the metadata client and the downloader.
///
/// Requests never time out; a stalled server blocks the run.
pub fn untimed_client_builder() -> ClientBuilder {
    Client::builder().timeout(None)
}

/// An image to store next to a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    /// Source URL.
    pub url: String,
    /// File name without suffix or extension, usually the game title.
    pub base_name: String,
    /// Screenshot position within the game's list; `None` for covers.
    pub index: Option<usize>,
}

impl AssetRequest {
    /// Cover image named after the game.
    pub fn cover(url: impl Into<String>, base_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            base_name: base_name.into(),
            index: None,
        }
    }

    /// Screenshot at `index` within the game's list.
    pub fn screenshot(url: impl Into<String>, base_name: impl Into<String>, index: usize) -> Self {
        Self {
            url: url.into(),
            base_name: base_name.into(),
            index: Some(index),
        }
    }

    /// Name of the file the asset is written to.
    pub fn file_name(&self) -> String {
        file_name_for(&self.base_name, self.index, &self.url)
    }
}

/// Destination for asset downloads.
pub trait AssetSink {
    /// Store `request` inside `directory` and return the written path.
    fn fetch(&self, directory: &Path, request: &AssetRequest) -> Result<PathBuf>;
}

/// Downloads assets with plain blocking GET requests.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    http: Client,
}

impl HttpDownloader {
    /// Downloader with an untimed HTTP client.
    pub fn new() -> Result<Self> {
        Self::with_builder(untimed_client_builder())
    }

    /// Downloader on top of a preconfigured HTTP builder.
    pub fn with_builder(builder: ClientBuilder) -> Result<Self> {
        let http = builder
            .build()
            .context("failed to build download HTTP client")?;
        Ok(Self::with_client(http))
    }

    /// Downloader sharing an existing HTTP client.
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    /// Download `url` into `directory` under the asset naming scheme.
    pub fn download(
        &self,
        directory: &Path,
        url: &str,
        base_name: &str,
        index: Option<usize>,
    ) -> Result<PathBuf> {
        let request = AssetRequest {
            url: url.to_string(),
            base_name: base_name.to_string(),
            index,
        };
        self.fetch(directory, &request)
    }
}

impl AssetSink for HttpDownloader {
    fn fetch(&self, directory: &Path, request: &AssetRequest) -> Result<PathBuf> {
        let path = directory.join(request.file_name());
        info!(url = %request.url, path = %path.display(), "downloading");

        let mut response = self
            .http
            .get(&request.url)
            .send()
            .with_context(|| format!("failed to request {}", request.url))?
            .error_for_status()
            .with_context(|| format!("download of {} failed", request.url))?;

        let mut file =
            File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        io::copy(&mut response, &mut file)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}
