use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::errors::DownloadError;
use crate::file_utils::FileManager;

/// Downloader binary acquisition
///
/// This module locates the external downloader binary inside the working
/// directory and, when it is missing, fetches the newest release asset for
/// this platform from the project's GitHub release feed.
/// Release feed of the external downloader project
const RELEASE_FEED_URL: &str = "https://api.github.com/repos/yt-dlp/yt-dlp/releases";

/// One downloadable asset of a release
#[derive(Debug, Deserialize)]
struct ReleaseAsset {
    name: String,
    browser_download_url: String,
}

/// One entry of the release feed
#[derive(Debug, Deserialize)]
struct Release {
    assets: Vec<ReleaseAsset>,
}

/// Manages the downloader binary inside the working directory
pub struct BinaryManager {
    workdir: PathBuf,
    client: reqwest::Client,
}

impl BinaryManager {
    pub fn new<P: AsRef<Path>>(workdir: P) -> Self {
        BinaryManager {
            workdir: workdir.as_ref().to_path_buf(),
            client: reqwest::Client::new(),
        }
    }

    /// Shared HTTP client, reused for direct subtitle fetches
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Binary filename for the current platform
    pub fn binary_filename() -> &'static str {
        if cfg!(target_os = "windows") {
            "yt-dlp.exe"
        } else {
            "yt-dlp"
        }
    }

    /// Expected location of the binary inside the working directory
    pub fn binary_path(&self) -> PathBuf {
        self.workdir.join(Self::binary_filename())
    }

    /// Return the binary path, fetching the latest release first when the
    /// binary is not present yet
    pub async fn ensure_binary(&self) -> Result<PathBuf> {
        let path = self.binary_path();
        if FileManager::file_exists(&path) {
            debug!("Using existing downloader binary at {}", path.display());
            return Ok(path);
        }
        self.download_latest_release().await
    }

    /// Download the newest release asset for this platform and mark it
    /// executable on unix
    pub async fn download_latest_release(&self) -> Result<PathBuf> {
        info!("Downloader binary not found, fetching latest release");

        let response = self
            .client
            .get(RELEASE_FEED_URL)
            .header(
                reqwest::header::USER_AGENT,
                concat!("ytgrab/", env!("CARGO_PKG_VERSION")),
            )
            .send()
            .await
            .map_err(|e| DownloadError::Fetch {
                url: RELEASE_FEED_URL.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(DownloadError::Fetch {
                url: RELEASE_FEED_URL.to_string(),
                reason: format!("HTTP status {}", response.status()),
            }
            .into());
        }

        let releases: Vec<Release> = response
            .json()
            .await
            .context("Failed to parse release feed JSON")?;

        let filename = Self::binary_filename();
        let asset = releases
            .first()
            .and_then(|release| release.assets.iter().find(|asset| asset.name == filename))
            .ok_or_else(|| DownloadError::MissingReleaseAsset(filename.to_string()))?;

        let path = self.binary_path();
        download_file(&self.client, &asset.browser_download_url, &path).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .with_context(|| format!("Failed to mark {} executable", path.display()))?;
        }

        info!("Downloader binary installed at {}", path.display());
        Ok(path)
    }
}

/// Fetch a URL straight to a local file
pub async fn download_file(
    client: &reqwest::Client,
    url: &str,
    output_path: &Path,
) -> Result<()> {
    debug!("Downloading {} to {}", url, output_path.display());

    let response = client.get(url).send().await.map_err(|e| DownloadError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if !response.status().is_success() {
        return Err(DownloadError::Fetch {
            url: url.to_string(),
            reason: format!("HTTP status {}", response.status()),
        }
        .into());
    }

    let body: bytes::Bytes = response.bytes().await.map_err(|e| DownloadError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    FileManager::write_bytes(output_path, &body)
}
