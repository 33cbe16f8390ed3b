//! Local audio assets, downloaded on first use.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use drill_core::Item;
use drill_store::{StoreError, write_atomic};
use reqwest::blocking::Client;
use thiserror::Error;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("asset key {0:?} is not a plain file name")]
    InvalidKey(String),
    #[error("failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Turns a catalog item into a playable local file.
pub trait AssetResolver {
    fn resolve(&mut self, item: &Item) -> Result<PathBuf, AssetError>;
}

impl<T: AssetResolver + ?Sized> AssetResolver for &mut T {
    fn resolve(&mut self, item: &Item) -> Result<PathBuf, AssetError> {
        (**self).resolve(item)
    }
}

/// Caches assets under `sounds_dir/<key>`, fetching missing ones over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAssetCache {
    client: Client,
    sounds_dir: PathBuf,
}

impl HttpAssetCache {
    pub fn new(sounds_dir: impl Into<PathBuf>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(DOWNLOAD_TIMEOUT).build()?;
        Ok(Self {
            client,
            sounds_dir: sounds_dir.into(),
        })
    }

    pub fn sounds_dir(&self) -> &Path {
        &self.sounds_dir
    }

    /// Where `item` is cached, rejecting keys that would escape the cache.
    pub fn cached_path(&self, item: &Item) -> Result<PathBuf, AssetError> {
        let is_plain = Path::new(&item.key)
            .file_name()
            .is_some_and(|name| name == item.key.as_str());
        if !is_plain {
            return Err(AssetError::InvalidKey(item.key.clone()));
        }
        Ok(self.sounds_dir.join(&item.key))
    }

    fn download(&self, url: &str) -> Result<Vec<u8>, reqwest::Error> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

impl AssetResolver for HttpAssetCache {
    fn resolve(&mut self, item: &Item) -> Result<PathBuf, AssetError> {
        let path = self.cached_path(item)?;
        if path.is_file() {
            return Ok(path);
        }

        tracing::info!(key = %item.key, url = %item.locator, "Downloading audio asset");
        let bytes = self
            .download(&item.locator)
            .map_err(|source| AssetError::Download {
                url: item.locator.clone(),
                source,
            })?;
        write_atomic(&path, &bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Cached audio asset");

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_asset_skips_download() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ma1.mp3"), b"ID3").unwrap();

        let mut cache = HttpAssetCache::new(dir.path()).unwrap();
        // The locator is never contacted for a cached asset
        let item = Item::new("ma1.mp3", "not a url");

        let path = cache.resolve(&item).unwrap();
        assert_eq!(path, dir.path().join("ma1.mp3"));
    }

    #[test]
    fn test_keys_must_be_plain_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = HttpAssetCache::new(dir.path()).unwrap();

        for key in ["../escape.mp3", "nested/ma1.mp3", ".."] {
            let item = Item::new(key, "https://example.com/x.mp3");
            let err = cache.resolve(&item).unwrap_err();
            assert!(matches!(err, AssetError::InvalidKey(_)), "{key}: {err}");
        }
    }

    #[test]
    fn test_download_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = HttpAssetCache::new(dir.path()).unwrap();
        let item = Item::new("ma1.mp3", "not a url");

        let err = cache.resolve(&item).unwrap_err();
        assert!(matches!(err, AssetError::Download { .. }));
        assert!(!dir.path().join("ma1.mp3").exists());
    }
}
